//! Dispatch of one `pxf cluster` operation, end to end.
//!
//! `Idle -> ResolvingEnv -> DiscoveringTopology -> BuildingCommand ->
//! Executing -> Aggregating -> Done`, leaving early for `Cancelled` or
//! `Failed`. Every error is settled here into one reported line and an exit
//! code; nothing propagates past [`Dispatcher::run`].

use crate::application::ports::{
    CatalogQuery, Confirmation, FanOutExecutor, LocalHost, ProgressReporter,
};
use crate::application::services::topology;
use crate::domain::{
    DispatchError, DispatchResult, Operation, RenderFlags, build, resolve,
};

/// Where a dispatch currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    ResolvingEnv,
    DiscoveringTopology,
    BuildingCommand,
    Executing,
    Aggregating,
    Done,
    Cancelled,
    Failed,
}

/// Terminal result of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The fan-out ran; individual hosts may still have failed.
    Done(DispatchResult),
    /// The operator declined the confirmation prompt.
    Cancelled(Operation),
    /// The dispatch stopped before any remote command was issued.
    Failed(DispatchError),
}

impl Outcome {
    /// Terminal state this outcome corresponds to.
    #[must_use]
    pub fn state(&self) -> DispatchState {
        match self {
            Self::Done(_) => DispatchState::Done,
            Self::Cancelled(_) => DispatchState::Cancelled,
            Self::Failed(_) => DispatchState::Failed,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done(result) if result.is_success())
    }

    /// Process exit code: `0` only when every host succeeded.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.is_success())
    }
}

/// Collaborators for a single dispatch. Build one per invocation.
pub struct Dispatcher<'a, C, L, F, P, R> {
    pub catalog: &'a C,
    pub local: &'a L,
    pub executor: &'a F,
    pub confirmation: &'a P,
    pub reporter: &'a R,
    /// Environment lookup, usually the process environment.
    pub env: &'a dyn Fn(&str) -> Option<String>,
}

struct Progress {
    op: Operation,
    state: DispatchState,
}

impl Progress {
    fn enter(&mut self, next: DispatchState) {
        tracing::debug!(operation = %self.op, from = ?self.state, to = ?next, "dispatch transition");
        self.state = next;
    }
}

impl<C, L, F, P, R> Dispatcher<'_, C, L, F, P, R>
where
    C: CatalogQuery,
    L: LocalHost,
    F: FanOutExecutor,
    P: Confirmation,
    R: ProgressReporter,
{
    /// Run `op` across the cluster.
    pub async fn run(self, op: Operation, flags: RenderFlags) -> Outcome {
        let spec = op.spec();
        let mut progress = Progress {
            op,
            state: DispatchState::Idle,
        };
        progress.enter(DispatchState::ResolvingEnv);

        if spec.requires_confirmation {
            let prompt = spec.messages.warning.unwrap_or_default();
            if !self.confirmation.confirm(prompt) {
                progress.enter(DispatchState::Cancelled);
                self.reporter.info(&format!("pxf cluster {op} cancelled"));
                return Outcome::Cancelled(op);
            }
        }

        let env = match resolve(spec.required_env, spec.optional_env, self.env) {
            Ok(env) => env,
            Err(e) => return self.fail(&mut progress, e.into()),
        };

        progress.enter(DispatchState::DiscoveringTopology);
        let snapshot = match topology::discover(self.catalog, self.local, spec.scope).await {
            Ok(snapshot) => snapshot,
            Err(e) => return self.fail(&mut progress, e.into()),
        };

        progress.enter(DispatchState::BuildingCommand);
        let plan = match build(op, &env, flags) {
            Ok(plan) => plan,
            Err(e) => return self.fail(&mut progress, e.into()),
        };

        let targets = snapshot.hosts_for_scope(spec.scope);
        if let Some(notice) = spec.messages.notice {
            self.reporter.warn(notice);
        }
        self.reporter
            .info(&spec.status_message(snapshot.summary(spec.scope)));

        progress.enter(DispatchState::Executing);
        tracing::debug!(hosts = targets.len(), local = spec.scope.run_locally, "fan-out");
        let output = self.executor.execute(&targets, spec.scope, &plan).await;

        progress.enter(DispatchState::Aggregating);
        let result = DispatchResult::from_output(op, &output);
        if result.is_success() {
            self.reporter.success(&result.summary_message());
        } else {
            self.reporter
                .error(&format!("ERROR: {}", result.summary_message()));
            for failure in &result.failures {
                self.reporter.error(&failure.to_string());
            }
        }

        progress.enter(DispatchState::Done);
        Outcome::Done(result)
    }

    fn fail(&self, progress: &mut Progress, err: DispatchError) -> Outcome {
        progress.enter(DispatchState::Failed);
        self.reporter.error(&format!("Error: {err}"));
        Outcome::Failed(err)
    }
}
