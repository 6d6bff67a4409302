//! Cluster layout as read from the database catalog.
//!
//! This module is intentionally free of I/O. Catalog rows arrive as text and
//! leave as a validated [`ClusterSnapshot`].

use crate::domain::error::TopologyError;
use crate::domain::operation::{HostSummary, Scope};

/// Content id shared by the coordinator and its standby.
pub const COORDINATOR_CONTENT_ID: i32 = -1;

/// Field separator used when the catalog client prints rows.
pub const ROW_SEPARATOR: char = '|';

/// Primary segments and the coordinator, ordered by content id.
pub const SEGMENT_QUERY: &str = "SELECT content, hostname, port, datadir, role \
FROM gp_segment_configuration WHERE role = 'p' ORDER BY content";

/// The standby coordinator, if one is configured.
pub const STANDBY_QUERY: &str = "SELECT content, hostname, port, datadir, role \
FROM gp_segment_configuration WHERE content = -1 AND role = 'm'";

/// Replication role of a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Primary,
    Mirror,
}

impl Role {
    /// Parse the single-letter catalog code (`p` / `m`).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "p" => Some(Self::Primary),
            "m" => Some(Self::Mirror),
            _ => None,
        }
    }
}

/// One row of the segment configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentConfig {
    pub content_id: i32,
    pub hostname: String,
    pub port: u16,
    pub data_dir: String,
    pub role: Role,
}

impl SegmentConfig {
    /// Parse a `content|hostname|port|datadir|role` row.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::MalformedRow`] when a field is missing or
    /// does not parse.
    pub fn parse_row(row: &str) -> Result<Self, TopologyError> {
        let malformed = |reason: &str| TopologyError::MalformedRow {
            row: row.to_string(),
            reason: reason.to_string(),
        };
        let fields: Vec<&str> = row.split(ROW_SEPARATOR).map(str::trim).collect();
        let [content, hostname, port, data_dir, role] = fields.as_slice() else {
            return Err(malformed("expected 5 fields"));
        };
        if hostname.is_empty() {
            return Err(malformed("empty hostname"));
        }
        Ok(Self {
            content_id: content.parse().map_err(|_| malformed("bad content id"))?,
            hostname: (*hostname).to_string(),
            port: port.parse().map_err(|_| malformed("bad port"))?,
            data_dir: (*data_dir).to_string(),
            role: Role::from_code(role).ok_or_else(|| malformed("bad role"))?,
        })
    }

    fn is_coordinator(&self) -> bool {
        self.content_id == COORDINATOR_CONTENT_ID && self.role == Role::Primary
    }

    fn is_standby(&self) -> bool {
        self.content_id == COORDINATOR_CONTENT_ID && self.role == Role::Mirror
    }
}

/// Parse every non-empty line of catalog output.
///
/// # Errors
///
/// Returns the first [`TopologyError::MalformedRow`] encountered.
pub fn parse_rows(output: &str) -> Result<Vec<SegmentConfig>, TopologyError> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(SegmentConfig::parse_row)
        .collect()
}

/// Validated cluster layout for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSnapshot {
    coordinator: SegmentConfig,
    standby: Option<SegmentConfig>,
    segments: Vec<SegmentConfig>,
}

impl ClusterSnapshot {
    /// Validate catalog records into a snapshot.
    ///
    /// Mirror records other than the standby coordinator are ignored.
    ///
    /// # Errors
    ///
    /// Fails unless there is exactly one coordinator and at most one standby.
    pub fn new(records: Vec<SegmentConfig>) -> Result<Self, TopologyError> {
        let mut coordinators = Vec::new();
        let mut standbys = Vec::new();
        let mut segments = Vec::new();
        for record in records {
            if record.is_coordinator() {
                coordinators.push(record);
            } else if record.is_standby() {
                standbys.push(record);
            } else if record.content_id >= 0 && record.role == Role::Primary {
                segments.push(record);
            }
        }
        if standbys.len() > 1 {
            return Err(TopologyError::MultipleStandbys(standbys.len()));
        }
        if coordinators.len() > 1 {
            return Err(TopologyError::MultipleCoordinators(coordinators.len()));
        }
        let coordinator = coordinators.pop().ok_or(TopologyError::NoCoordinator)?;
        segments.sort_by_key(|s| s.content_id);
        Ok(Self {
            coordinator,
            standby: standbys.pop(),
            segments,
        })
    }

    #[must_use]
    pub fn coordinator(&self) -> &SegmentConfig {
        &self.coordinator
    }

    #[must_use]
    pub fn standby(&self) -> Option<&SegmentConfig> {
        self.standby.as_ref()
    }

    #[must_use]
    pub fn segments(&self) -> &[SegmentConfig] {
        &self.segments
    }

    /// Fail unless this process runs on the coordinator host.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NotCoordinator`] on any other host.
    pub fn ensure_coordinator_host(&self, local_hostname: &str) -> Result<(), TopologyError> {
        if self.coordinator.hostname == local_hostname {
            Ok(())
        } else {
            Err(TopologyError::NotCoordinator {
                local: local_hostname.to_string(),
                coordinator: self.coordinator.hostname.clone(),
            })
        }
    }

    /// Distinct hostnames `scope` targets: coordinator first, then segment
    /// hosts in content order, then the standby.
    #[must_use]
    pub fn hosts_for_scope(&self, scope: Scope) -> Vec<String> {
        let mut hosts: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            if !hosts.iter().any(|h| h == name) {
                hosts.push(name.to_string());
            }
        };
        if scope.include_coordinator {
            push(&self.coordinator.hostname);
        }
        if scope.segment_hosts {
            for seg in &self.segments {
                push(&seg.hostname);
            }
        }
        if let Some(standby) = self.standby.as_ref().filter(|_| scope.include_standby) {
            push(&standby.hostname);
        }
        hosts
    }

    #[must_use]
    pub fn count_distinct_hosts(&self, scope: Scope) -> usize {
        self.hosts_for_scope(scope).len()
    }

    /// The standby coordinator has a host to itself: no segment and not the
    /// coordinator.
    #[must_use]
    pub fn is_standby_alone(&self) -> bool {
        self.standby.as_ref().is_some_and(|standby| {
            standby.hostname != self.coordinator.hostname
                && !self.segments.iter().any(|s| s.hostname == standby.hostname)
        })
    }

    /// Host counts used by the status and summary messages.
    #[must_use]
    pub fn summary(&self, scope: Scope) -> HostSummary {
        HostSummary {
            total: self.count_distinct_hosts(scope),
            standby_alone: scope.include_standby && self.is_standby_alone(),
        }
    }
}
