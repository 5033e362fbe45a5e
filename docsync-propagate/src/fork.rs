//! Fork Coordinator: one forked, up-to-date checkout per booster of a mission.

use docsync_core::{catalog, Booster, FailurePolicy, MissionId, RepoName};
use docsync_git::{GitContext, WorkingCopy};
use docsync_host::{HostError, RemoteHost};

use crate::checkout::checkout_repository;
use crate::error::{write, PropagateError, Stage};

/// A booster whose repository has been forked and checked out.
#[derive(Debug)]
pub struct ForkedBooster {
    pub booster: Booster,
    /// The fork, under the authenticated user.
    pub fork: RepoName,
    pub working_copy: WorkingCopy,
}

/// A booster that could not be processed under [`FailurePolicy::Continue`].
#[derive(Debug)]
pub struct BoosterFailure {
    pub repository: RepoName,
    pub error: PropagateError,
}

/// Result of [`ForkCoordinator::prepare_forks`]: one entry per matching
/// booster, in catalog order. Never holds an `Err` under
/// [`FailurePolicy::Abort`].
#[derive(Debug, Default)]
pub struct ForkOutcome {
    pub boosters: Vec<Result<ForkedBooster, BoosterFailure>>,
}

impl ForkOutcome {
    pub fn forks(&self) -> impl Iterator<Item = &ForkedBooster> {
        self.boosters.iter().filter_map(|b| b.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &BoosterFailure> {
        self.boosters.iter().filter_map(|b| b.as_ref().err())
    }

    pub fn into_forks(self) -> impl Iterator<Item = ForkedBooster> {
        self.boosters.into_iter().filter_map(Result::ok)
    }
}

pub struct ForkCoordinator<'h, H: RemoteHost + ?Sized> {
    host: &'h H,
    git: GitContext,
    policy: FailurePolicy,
}

impl<'h, H: RemoteHost + ?Sized> ForkCoordinator<'h, H> {
    pub fn new(host: &'h H, git: GitContext, policy: FailurePolicy) -> Self {
        Self { host, git, policy }
    }

    /// Fork and check out every booster bound to `mission`.
    ///
    /// Needs an authenticated host as soon as one booster matches.
    pub fn prepare_forks(
        &self,
        boosters: &[Booster],
        mission: &MissionId,
    ) -> Result<ForkOutcome, PropagateError> {
        let matching = catalog::for_mission(boosters, mission);
        let mut outcome = ForkOutcome::default();
        if matching.is_empty() {
            tracing::info!(mission = %mission, "no boosters for mission");
            return Ok(outcome);
        }
        if !self.host.is_authenticated() {
            return Err(write(Stage::Fork)(HostError::Unauthenticated { operation: "fork" }));
        }

        tracing::info!(mission = %mission, count = matching.len(), "preparing forks");
        for booster in matching {
            match self.fork_one(booster) {
                Ok(forked) => outcome.boosters.push(Ok(forked)),
                Err(error) => match self.policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::Continue => {
                        tracing::warn!(
                            repository = %booster.repository,
                            error = %error,
                            "skipping booster"
                        );
                        outcome.boosters.push(Err(BoosterFailure {
                            repository: booster.repository.clone(),
                            error,
                        }));
                    }
                },
            }
        }
        Ok(outcome)
    }

    fn fork_one(&self, booster: &Booster) -> Result<ForkedBooster, PropagateError> {
        let fork = self
            .host
            .fork(&booster.repository)
            .map_err(write(Stage::Fork))?;
        tracing::info!(source = %booster.repository, fork = %fork.full_name, "forked");
        let working_copy = checkout_repository(self.host, &fork, &self.git)?;
        Ok(ForkedBooster {
            booster: booster.clone(),
            fork: fork.full_name,
            working_copy,
        })
    }
}
