//! The catalogue of `pxf cluster` operations.
//!
//! Every operation carries its message templates, the environment variables
//! it needs, the hosts it targets and whether it asks for confirmation. The
//! table is built at compile time and never mutated.

use std::fmt;

use serde::Serialize;

use crate::domain::env::EnvVar;

/// A lifecycle action fanned out across the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Init,
    Start,
    Stop,
    Status,
    Sync,
    Reset,
    Register,
    Restart,
    Prepare,
    Migrate,
}

/// Which hosts an operation reaches and where its command executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    /// Target every host that carries a primary segment.
    pub segment_hosts: bool,
    /// Also target the coordinator host.
    pub include_coordinator: bool,
    /// Also target the standby coordinator host, when there is one.
    pub include_standby: bool,
    /// Run each host's command on the coordinator (push) instead of over SSH.
    pub run_locally: bool,
}

impl Scope {
    /// Segment hosts only, command executed remotely.
    pub const SEGMENTS: Self = Self {
        segment_hosts: true,
        include_coordinator: false,
        include_standby: false,
        run_locally: false,
    };

    /// Coordinator, standby and segment hosts, command executed remotely.
    pub const WHOLE_CLUSTER: Self = Self {
        segment_hosts: true,
        include_coordinator: true,
        include_standby: true,
        run_locally: false,
    };

    /// Segment and standby hosts, command executed on the coordinator.
    pub const PUSH_FROM_COORDINATOR: Self = Self {
        segment_hosts: true,
        include_coordinator: false,
        include_standby: true,
        run_locally: true,
    };
}

/// Message templates for one operation.
///
/// Placeholders are positional `{}` markers filled by [`fill`].
#[derive(Debug)]
pub struct Messages {
    /// `(succeeded, total, plural(total))`
    pub success: &'static str,
    /// `(count, plural(count))`, or `(standby clause, count, plural(count))`
    /// when `standby` is set.
    pub status: &'static str,
    /// `(failed, total, plural(total))`
    pub error: &'static str,
    /// Confirmation prompt.
    pub warning: Option<&'static str>,
    /// Clause spliced into `status` when the standby has a host to itself.
    pub standby: Option<&'static str>,
    /// Printed ahead of the status line.
    pub notice: Option<&'static str>,
}

/// Immutable definition of one operation.
#[derive(Debug)]
pub struct OperationSpec {
    pub name: &'static str,
    pub messages: Messages,
    pub required_env: &'static [EnvVar],
    pub optional_env: &'static [EnvVar],
    pub scope: Scope,
    pub requires_confirmation: bool,
}

/// Host counts an operation reports against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSummary {
    /// Distinct hosts the command will run against.
    pub total: usize,
    /// The standby coordinator shares its host with nothing else.
    pub standby_alone: bool,
}

/// Pluralisation suffix for host counts.
#[must_use]
pub const fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Fill `{}` placeholders in `template` from `args`, left to right.
///
/// Surplus placeholders are left untouched; surplus arguments are ignored.
#[must_use]
pub fn fill(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

impl OperationSpec {
    /// Announcement printed before the fan-out starts.
    #[must_use]
    pub fn status_message(&self, hosts: HostSummary) -> String {
        let Some(clause) = self.messages.standby else {
            return fill(self.messages.status, &[&hosts.total, &plural(hosts.total)]);
        };
        let mut count = hosts.total;
        if self.scope.include_coordinator {
            count = count.saturating_sub(1);
        }
        let clause = if hosts.standby_alone {
            count = count.saturating_sub(1);
            clause
        } else {
            ""
        };
        fill(self.messages.status, &[&clause, &count, &plural(count)])
    }

    /// Summary printed when every host succeeded.
    #[must_use]
    pub fn success_message(&self, total: usize) -> String {
        fill(self.messages.success, &[&total, &total, &plural(total)])
    }

    /// Summary printed when at least one host failed.
    #[must_use]
    pub fn error_message(&self, failed: usize, total: usize) -> String {
        fill(self.messages.error, &[&failed, &total, &plural(total)])
    }
}

impl Operation {
    /// Every operation, in CLI order.
    pub const ALL: [Self; 10] = [
        Self::Init,
        Self::Start,
        Self::Stop,
        Self::Status,
        Self::Sync,
        Self::Reset,
        Self::Register,
        Self::Restart,
        Self::Prepare,
        Self::Migrate,
    ];

    /// Definition record for this operation.
    #[must_use]
    pub fn spec(self) -> &'static OperationSpec {
        match self {
            Self::Init => &INIT,
            Self::Start => &START,
            Self::Stop => &STOP,
            Self::Status => &STATUS,
            Self::Sync => &SYNC,
            Self::Reset => &RESET,
            Self::Register => &REGISTER,
            Self::Restart => &RESTART,
            Self::Prepare => &PREPARE,
            Self::Migrate => &MIGRATE,
        }
    }

    /// Name used on the command line, locally and on every remote host.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Look an operation up by its command-line name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Catalogue ─────────────────────────────────────────────────────────────────

const STANDBY_CLAUSE: &str = ", standby coordinator host,";

const LIFECYCLE_ENV: &[EnvVar] = &[EnvVar::PxfHome];
const LIFECYCLE_OPTIONAL_ENV: &[EnvVar] = &[EnvVar::PxfBase];

static INIT: OperationSpec = OperationSpec {
    name: "init",
    messages: Messages {
        success: "PXF initialized successfully on {} out of {} host{}",
        status: "Initializing PXF on coordinator host{} and {} segment host{}...",
        error: "PXF failed to initialize on {} out of {} host{}",
        warning: None,
        standby: Some(STANDBY_CLAUSE),
        notice: Some(
            "*****************************************************************************\n\
* DEPRECATION NOTICE:\n\
* The \"pxf cluster init\" command is deprecated and will be removed\n\
* in a future release of PXF.\n\
*\n\
* Use the \"pxf cluster register\" command instead.\n\
*\n\
*****************************************************************************",
        ),
    },
    required_env: &[EnvVar::GpHome, EnvVar::PxfHome, EnvVar::JavaHome],
    optional_env: &[],
    scope: Scope::WHOLE_CLUSTER,
    requires_confirmation: false,
};

static START: OperationSpec = OperationSpec {
    name: "start",
    messages: Messages {
        success: "PXF started successfully on {} out of {} host{}",
        status: "Starting PXF on {} segment host{}...",
        error: "PXF failed to start on {} out of {} host{}",
        warning: None,
        standby: None,
        notice: None,
    },
    required_env: LIFECYCLE_ENV,
    optional_env: LIFECYCLE_OPTIONAL_ENV,
    scope: Scope::SEGMENTS,
    requires_confirmation: false,
};

static STOP: OperationSpec = OperationSpec {
    name: "stop",
    messages: Messages {
        success: "PXF stopped successfully on {} out of {} host{}",
        status: "Stopping PXF on {} segment host{}...",
        error: "PXF failed to stop on {} out of {} host{}",
        warning: None,
        standby: None,
        notice: None,
    },
    required_env: LIFECYCLE_ENV,
    optional_env: LIFECYCLE_OPTIONAL_ENV,
    scope: Scope::SEGMENTS,
    requires_confirmation: false,
};

static STATUS: OperationSpec = OperationSpec {
    name: "status",
    messages: Messages {
        success: "PXF is running on {} out of {} host{}",
        status: "Checking status of PXF servers on {} segment host{}...",
        error: "PXF is not running on {} out of {} host{}",
        warning: None,
        standby: None,
        notice: None,
    },
    required_env: LIFECYCLE_ENV,
    optional_env: LIFECYCLE_OPTIONAL_ENV,
    scope: Scope::SEGMENTS,
    requires_confirmation: false,
};

static SYNC: OperationSpec = OperationSpec {
    name: "sync",
    messages: Messages {
        success: "PXF configs synced successfully on {} out of {} host{}",
        status: "Syncing PXF configuration files from coordinator host to{} {} segment host{}...",
        error: "PXF configs failed to sync on {} out of {} host{}",
        warning: None,
        standby: Some(" standby coordinator host and"),
        notice: None,
    },
    required_env: &[EnvVar::PxfBase],
    optional_env: &[],
    scope: Scope::PUSH_FROM_COORDINATOR,
    requires_confirmation: false,
};

static RESET: OperationSpec = OperationSpec {
    name: "reset",
    messages: Messages {
        success: "PXF has been reset on {} out of {} host{}",
        status: "Resetting PXF on coordinator host{} and {} segment host{}...",
        error: "Failed to reset PXF on {} out of {} host{}",
        warning: Some(
            "Ensure your PXF cluster is stopped before continuing. \
This is a destructive action. Press y to continue:",
        ),
        standby: Some(STANDBY_CLAUSE),
        notice: Some(
            "*****************************************************************************\n\
* DEPRECATION NOTICE:\n\
* The \"pxf cluster reset\" command is deprecated and will be removed\n\
* in a future release of PXF.\n\
*****************************************************************************",
        ),
    },
    required_env: &[EnvVar::PxfHome],
    optional_env: &[],
    scope: Scope::WHOLE_CLUSTER,
    requires_confirmation: true,
};

static REGISTER: OperationSpec = OperationSpec {
    name: "register",
    messages: Messages {
        success: "PXF extension has been installed on {} out of {} host{}",
        status: "Installing PXF extension on coordinator host{} and {} segment host{}...",
        error: "Failed to install PXF extension on {} out of {} host{}",
        warning: None,
        standby: Some(STANDBY_CLAUSE),
        notice: None,
    },
    required_env: &[EnvVar::GpHome, EnvVar::PxfHome],
    optional_env: &[],
    scope: Scope::WHOLE_CLUSTER,
    requires_confirmation: false,
};

static RESTART: OperationSpec = OperationSpec {
    name: "restart",
    messages: Messages {
        success: "PXF restarted successfully on {} out of {} host{}",
        status: "Restarting PXF on {} segment host{}...",
        error: "PXF failed to restart on {} out of {} host{}",
        warning: None,
        standby: None,
        notice: None,
    },
    required_env: LIFECYCLE_ENV,
    optional_env: LIFECYCLE_OPTIONAL_ENV,
    scope: Scope::SEGMENTS,
    requires_confirmation: false,
};

static PREPARE: OperationSpec = OperationSpec {
    name: "prepare",
    messages: Messages {
        success: "PXF prepared successfully on {} out of {} host{}",
        status: "Preparing PXF on coordinator host{} and {} segment host{}...",
        error: "PXF failed to prepare on {} out of {} host{}",
        warning: None,
        standby: Some(STANDBY_CLAUSE),
        notice: None,
    },
    required_env: &[EnvVar::PxfHome, EnvVar::PxfBase],
    optional_env: &[],
    scope: Scope::WHOLE_CLUSTER,
    requires_confirmation: false,
};

static MIGRATE: OperationSpec = OperationSpec {
    name: "migrate",
    messages: Messages {
        success: "PXF configuration migrated successfully on {} out of {} host{}",
        status: "Migrating PXF configuration on coordinator host{} and {} segment host{}...",
        error: "PXF failed to migrate configuration on {} out of {} host{}",
        warning: None,
        standby: Some(STANDBY_CLAUSE),
        notice: None,
    },
    required_env: &[EnvVar::PxfHome, EnvVar::PxfConf, EnvVar::PxfBase],
    optional_env: &[],
    scope: Scope::WHOLE_CLUSTER,
    requires_confirmation: false,
};
