//! Shared mock infrastructure for unit tests.
//!
//! Hand-written port implementations that record how often they were used,
//! so each test file doesn't have to re-define the same boilerplate.

#![allow(clippy::expect_used)]

use std::cell::{Cell, RefCell};

use anyhow::Result;
use pxf_cli::application::ports::{
    CatalogQuery, Confirmation, FanOutExecutor, LocalHost, ProgressReporter,
};
use pxf_cli::domain::cluster::STANDBY_QUERY;
use pxf_cli::domain::{
    CommandPlan, HostOutput, RemoteOutput, Role, Scope, SegmentConfig, TopologyError,
};

// ── Cluster fixtures ──────────────────────────────────────────────────────────

pub fn record(content_id: i32, hostname: &str, role: Role) -> SegmentConfig {
    SegmentConfig {
        content_id,
        hostname: hostname.to_string(),
        port: if content_id < 0 { 5432 } else { 6000 },
        data_dir: format!("/data/gpseg{content_id}"),
        role,
    }
}

/// Coordinator `cdw`; segments on `sdw1` (two), `sdw2`, `sdw3`.
pub fn primaries() -> Vec<SegmentConfig> {
    vec![
        record(-1, "cdw", Role::Primary),
        record(0, "sdw1", Role::Primary),
        record(1, "sdw1", Role::Primary),
        record(2, "sdw2", Role::Primary),
        record(3, "sdw3", Role::Primary),
    ]
}

/// Standby coordinator on its own host.
pub fn standby() -> SegmentConfig {
    record(-1, "scdw", Role::Mirror)
}

// ── Mock: catalog ─────────────────────────────────────────────────────────────

pub struct MockCatalog {
    pub primaries: Vec<SegmentConfig>,
    pub standby: Option<SegmentConfig>,
    pub unreachable: bool,
    pub pings: Cell<usize>,
    pub queries: RefCell<Vec<String>>,
}

impl MockCatalog {
    pub fn new(primaries: Vec<SegmentConfig>, standby: Option<SegmentConfig>) -> Self {
        Self {
            primaries,
            standby,
            unreachable: false,
            pings: Cell::new(0),
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn cluster() -> Self {
        Self::new(primaries(), Some(standby()))
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::cluster()
        }
    }

    pub fn touched(&self) -> bool {
        self.pings.get() > 0 || !self.queries.borrow().is_empty()
    }
}

impl CatalogQuery for MockCatalog {
    async fn ping(&self) -> Result<(), TopologyError> {
        self.pings.set(self.pings.get() + 1);
        if self.unreachable {
            return Err(TopologyError::Connection {
                reason: "connection refused".to_string(),
            });
        }
        Ok(())
    }

    async fn query(&self, sql: &str) -> Result<Vec<SegmentConfig>, TopologyError> {
        self.queries.borrow_mut().push(sql.to_string());
        if sql == STANDBY_QUERY {
            Ok(self.standby.iter().cloned().collect())
        } else {
            Ok(self.primaries.clone())
        }
    }
}

// ── Mock: local host ──────────────────────────────────────────────────────────

pub struct MockHost(pub &'static str);

impl LocalHost for MockHost {
    async fn hostname(&self) -> Result<String> {
        Ok(self.0.to_string())
    }
}

// ── Mock: fan-out executor ────────────────────────────────────────────────────

/// Succeeds on every host except those listed in `failures`.
#[derive(Default)]
pub struct MockExecutor {
    pub failures: Vec<(&'static str, &'static str)>,
    pub calls: RefCell<Vec<(Vec<String>, Scope, CommandPlan)>>,
}

impl MockExecutor {
    pub fn failing(failures: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn only_call(&self) -> (Vec<String>, Scope, CommandPlan) {
        let calls = self.calls.borrow();
        assert_eq!(calls.len(), 1, "expected exactly one fan-out");
        calls[0].clone()
    }
}

impl FanOutExecutor for MockExecutor {
    async fn execute(&self, targets: &[String], scope: Scope, plan: &CommandPlan) -> RemoteOutput {
        self.calls
            .borrow_mut()
            .push((targets.to_vec(), scope, plan.clone()));
        let hosts = targets
            .iter()
            .map(|host| {
                match self.failures.iter().find(|(h, _)| h == host) {
                    Some((_, stderr)) => HostOutput::failed(host, "", stderr, "exit status: 1"),
                    None => HostOutput::ok(host, "done"),
                }
            })
            .collect();
        RemoteOutput { hosts }
    }
}

// ── Mock: confirmation ────────────────────────────────────────────────────────

pub struct MockConfirmation {
    pub answer: bool,
    pub prompts: RefCell<Vec<String>>,
}

impl MockConfirmation {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl Confirmation for MockConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answer
    }
}

// ── Mock: reporter ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Info(String),
    Success(String),
    Warn(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingReporter {
    pub lines: RefCell<Vec<Line>>,
}

impl RecordingReporter {
    pub fn infos(&self) -> Vec<String> {
        self.collect(|l| match l {
            Line::Info(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn successes(&self) -> Vec<String> {
        self.collect(|l| match l {
            Line::Success(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.collect(|l| match l {
            Line::Warn(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.collect(|l| match l {
            Line::Error(m) => Some(m.clone()),
            _ => None,
        })
    }

    fn collect(&self, pick: impl Fn(&Line) -> Option<String>) -> Vec<String> {
        self.lines.borrow().iter().filter_map(pick).collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.lines.borrow_mut().push(Line::Info(message.to_string()));
    }

    fn success(&self, message: &str) {
        self.lines
            .borrow_mut()
            .push(Line::Success(message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.lines.borrow_mut().push(Line::Warn(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.lines.borrow_mut().push(Line::Error(message.to_string()));
    }
}

// ── Environment ───────────────────────────────────────────────────────────────

/// Lookup over a fixed set of variables.
pub fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let owned: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name| {
        owned
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}
