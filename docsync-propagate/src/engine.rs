//! Propagation Engine: turn an edited working copy into a pull request.
//!
//! ## Sequence
//!
//! 1. create-branch: recreate the work branch at the base branch
//! 2. commit: stage everything, commit
//! 3. push: force-push the work branch to `origin`
//! 4. create-pull-request: open a PR from `<login>:<branch>` on the fork's parent,
//!    or reuse the one a previous run opened
//! 5. link-back: comment on the triggering PR with the new PR's URL
//!
//! Steps run strictly in order. A failure stops the sequence and leaves the
//! working copy as the failing step left it.

use docsync_core::{PullRequestRef, RepoName, Settings};
use docsync_git::{repository_name_from_url, WorkingCopy};
use docsync_host::{Comment, CreatedPullRequest, NewPullRequest, RemoteHost};

use crate::error::{git, lookup, missing, write, PropagateError, Stage};
use crate::message::{Message, MessageContext, MessageRenderer};

/// What one successful propagation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation {
    pub commit: String,
    /// Repository the pull request was opened on (the fork's parent).
    pub target: RepoName,
    pub pull_request: CreatedPullRequest,
    /// The comment left on the triggering pull request.
    pub comment: Comment,
}

pub struct Propagator<'h, H: RemoteHost + ?Sized> {
    host: &'h H,
    branch: String,
    base_branch: String,
    messages: MessageRenderer,
}

impl<'h, H: RemoteHost + ?Sized> Propagator<'h, H> {
    pub fn new(host: &'h H, branch: &str, base_branch: &str, messages: MessageRenderer) -> Self {
        Self {
            host,
            branch: branch.to_owned(),
            base_branch: base_branch.to_owned(),
            messages,
        }
    }

    /// Branch names and message templates from `settings`.
    pub fn from_settings(host: &'h H, settings: &Settings) -> Result<Self, PropagateError> {
        let messages = MessageRenderer::new(&settings.messages)?;
        Ok(Self::new(host, &settings.branch, &settings.base_branch, messages))
    }

    /// Run the full sequence on `copy`, whose working tree already holds the change.
    pub fn propagate(
        &self,
        copy: &WorkingCopy,
        trigger: &PullRequestRef,
    ) -> Result<Propagation, PropagateError> {
        let mut ctx = MessageContext {
            trigger: trigger.to_string(),
            repository: String::new(),
            branch: self.branch.clone(),
            pull_request_url: String::new(),
        };

        self.create_branch(copy)?;
        let commit = self.commit(copy, &ctx)?;
        self.push(copy)?;
        let (target, pull_request) = self.create_pull_request(copy, &mut ctx)?;
        ctx.pull_request_url = pull_request.html_url.clone();
        let comment = self.link_back(trigger, &ctx)?;

        Ok(Propagation {
            commit,
            target,
            pull_request,
            comment,
        })
    }

    fn create_branch(&self, copy: &WorkingCopy) -> Result<(), PropagateError> {
        tracing::info!(
            stage = %Stage::CreateBranch,
            branch = %self.branch,
            base = %copy.base_branch(),
            "creating branch"
        );
        copy.recreate_branch(&self.branch)
            .map_err(git(Stage::CreateBranch))
    }

    fn commit(&self, copy: &WorkingCopy, ctx: &MessageContext) -> Result<String, PropagateError> {
        let message = self.messages.render(Message::Commit, ctx)?;
        let sha = copy.commit_all(&message).map_err(git(Stage::Commit))?;
        tracing::info!(stage = %Stage::Commit, commit = %sha, "committed");
        Ok(sha)
    }

    fn push(&self, copy: &WorkingCopy) -> Result<(), PropagateError> {
        tracing::info!(stage = %Stage::Push, branch = %self.branch, "pushing");
        copy.push(&self.branch).map_err(git(Stage::Push))
    }

    fn create_pull_request(
        &self,
        copy: &WorkingCopy,
        ctx: &mut MessageContext,
    ) -> Result<(RepoName, CreatedPullRequest), PropagateError> {
        let stage = Stage::CreatePullRequest;
        let name = repository_name_from_url(copy.origin_url()).ok_or_else(|| {
            PropagateError::OriginUrl {
                url: copy.origin_url().to_owned(),
            }
        })?;
        let login = self.host.current_user().map_err(lookup(stage))?;
        let fork_name = RepoName::new(&login, name)?;
        let fork = self.host.repository(&fork_name).map_err(lookup(stage))?;
        let parent = fork
            .parent
            .ok_or_else(|| missing(stage, format!("parent of {fork_name}")))?;
        ctx.repository = parent.full_name.to_string();

        let pull = NewPullRequest {
            title: self.messages.render(Message::Title, ctx)?,
            head: format!("{login}:{}", self.branch),
            base: self.base_branch.clone(),
            body: self.messages.render(Message::Body, ctx)?,
        };
        let created = match self.host.create_pull_request(&parent.full_name, &pull) {
            Ok(created) => {
                tracing::info!(
                    stage = %stage,
                    target = %parent.full_name,
                    url = %created.html_url,
                    "pull request opened"
                );
                created
            }
            Err(err) if err.is_unprocessable() => {
                // A previous run already opened it; the forced push updated it.
                let existing = self
                    .host
                    .find_open_pull_request(&parent.full_name, &pull.head, &pull.base)
                    .map_err(lookup(stage))?;
                match existing {
                    Some(open) => {
                        tracing::info!(
                            stage = %stage,
                            target = %parent.full_name,
                            url = %open.html_url,
                            "pull request already open"
                        );
                        CreatedPullRequest {
                            number: open.number,
                            html_url: open.html_url,
                        }
                    }
                    None => return Err(write(stage)(err)),
                }
            }
            Err(err) => return Err(write(stage)(err)),
        };
        Ok((parent.full_name, created))
    }

    fn link_back(
        &self,
        trigger: &PullRequestRef,
        ctx: &MessageContext,
    ) -> Result<Comment, PropagateError> {
        let stage = Stage::LinkBack;
        let original = self
            .host
            .pull_request(&trigger.repository, trigger.number)
            .map_err(lookup(stage))?;
        let body = self.messages.render(Message::Comment, ctx)?;
        let comment = self
            .host
            .comment(&trigger.repository, original.number, &body)
            .map_err(write(stage))?;
        tracing::info!(stage = %stage, trigger = %trigger, url = %comment.html_url, "linked back");
        Ok(comment)
    }
}
