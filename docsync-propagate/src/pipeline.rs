//! Shared end-to-end entrypoint used by the CLI.
//!
//! resolve → check out the mission PR → fork every booster of the mission →
//! copy the tracked file into each fork → propagate.

use std::path::{Component, Path};

use docsync_core::{Booster, FailurePolicy, Mapping, PullRequestRef, RepoName, Settings};
use docsync_git::GitContext;
use docsync_host::RemoteHost;

use crate::engine::{Propagation, Propagator};
use crate::error::{io_err, PropagateError};
use crate::fork::ForkCoordinator;
use crate::resolver::MappingResolver;
use crate::switch::checkout_pull_request;

/// Outcome for one booster.
#[derive(Debug)]
pub struct BoosterReport {
    pub repository: RepoName,
    pub outcome: Result<Propagation, PropagateError>,
}

/// Outcome of a pipeline run.
#[derive(Debug)]
pub enum RunReport {
    /// The pull request touches no tracked path.
    NotDocumentation,
    /// One report per booster of the mission, in catalog order.
    Propagated {
        mapping: Mapping,
        boosters: Vec<BoosterReport>,
    },
}

/// Run the whole workflow for the pull request `trigger`.
///
/// Under [`FailurePolicy::Abort`] the first failing booster ends the run with
/// its error; under [`FailurePolicy::Continue`] it is reported and the
/// remaining boosters are processed.
pub fn run<H: RemoteHost + ?Sized>(
    host: &H,
    settings: &Settings,
    git_ctx: &GitContext,
    resolver: &MappingResolver,
    boosters: &[Booster],
    trigger: &PullRequestRef,
) -> Result<RunReport, PropagateError> {
    let Some(mapping) = resolver.resolve(host, trigger)? else {
        return Ok(RunReport::NotDocumentation);
    };
    let propagator = Propagator::from_settings(host, settings)?;

    let (mission_copy, head) = checkout_pull_request(host, git_ctx, trigger)?;
    tracing::info!(pr = %trigger, branch = head.branch(), "mission pull request checked out");

    let coordinator = ForkCoordinator::new(host, git_ctx.clone(), settings.failure_policy);
    let outcome = coordinator.prepare_forks(boosters, &mapping.mission_id)?;

    let mut reports = Vec::with_capacity(outcome.boosters.len());
    for entry in outcome.boosters {
        let forked = match entry {
            Ok(forked) => forked,
            Err(failure) => {
                reports.push(BoosterReport {
                    repository: failure.repository,
                    outcome: Err(failure.error),
                });
                continue;
            }
        };
        let result = apply_tracked_file(
            mission_copy.path(),
            forked.working_copy.path(),
            &mapping.tracked_path,
        )
        .and_then(|()| propagator.propagate(&forked.working_copy, trigger));

        match (result, settings.failure_policy) {
            (Err(error), FailurePolicy::Abort) => return Err(error),
            (Err(error), FailurePolicy::Continue) => {
                tracing::warn!(repository = %forked.booster.repository, error = %error, "propagation failed");
                reports.push(BoosterReport {
                    repository: forked.booster.repository,
                    outcome: Err(error),
                });
            }
            (Ok(propagation), _) => reports.push(BoosterReport {
                repository: forked.booster.repository,
                outcome: Ok(propagation),
            }),
        }
    }

    Ok(RunReport::Propagated {
        mapping,
        boosters: reports,
    })
}

/// Copy `tracked` from the `source` checkout to the same relative path in
/// `target`. A file deleted in `source` is deleted in `target`.
pub fn apply_tracked_file(source: &Path, target: &Path, tracked: &str) -> Result<(), PropagateError> {
    let rel = Path::new(tracked);
    let is_safe = rel.components().next().is_some()
        && rel.components().all(|c| matches!(c, Component::Normal(_)));
    if !is_safe {
        return Err(PropagateError::UnsafePath {
            path: tracked.to_owned(),
        });
    }

    let from = source.join(rel);
    let to = target.join(rel);
    if from.is_file() {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        std::fs::copy(&from, &to).map_err(|e| io_err(&to, e))?;
        tracing::debug!(path = %to.display(), "applied tracked file");
    } else if to.exists() {
        std::fs::remove_file(&to).map_err(|e| io_err(&to, e))?;
        tracing::debug!(path = %to.display(), "removed tracked file");
    }
    Ok(())
}
