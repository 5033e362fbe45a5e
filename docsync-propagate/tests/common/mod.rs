//! In-process remote host backed by local bare repositories.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::process::Command;

use docsync_core::{Booster, CommitIdentity, PullRequestRef, RepoName};
use docsync_git::GitContext;
use docsync_host::{
    Comment, CommitPointer, CreatedPullRequest, HostError, NewPullRequest, PullRequest,
    RemoteHost, Repository,
};
use tempfile::TempDir;

/// Login of the authenticated user; forks land under this owner.
pub const LOGIN: &str = "docs-bot";

pub fn ctx() -> GitContext {
    GitContext::new(CommitIdentity::default(), None)
}

pub fn repo(full: &str) -> RepoName {
    RepoName::parse(full).expect("valid repo name")
}

pub fn booster(mission: &str, full: &str) -> Booster {
    Booster {
        mission_id: mission.into(),
        repository: repo(full),
        name: None,
    }
}

// ---------------------------------------------------------------------------
// git fixtures
// ---------------------------------------------------------------------------

/// Run git in `dir` with a throwaway identity; panics on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(dir)
        .args([
            "-c",
            "user.name=fixture",
            "-c",
            "user.email=fixture@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .output()
        .expect("spawn git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Add a commit to `branch` of `bare` through a scratch clone.
pub fn commit_to(bare: &Path, branch: &str, rel: &str, content: &str) {
    let scratch = TempDir::new().expect("scratch");
    git(scratch.path(), &["clone", "--quiet", path_str(bare), "."]);
    let exists = !git(scratch.path(), &["ls-remote", "--heads", "origin", branch]).is_empty();
    if exists {
        git(scratch.path(), &["checkout", "--quiet", branch]);
    } else {
        git(scratch.path(), &["checkout", "--quiet", "-b", branch]);
    }
    write(scratch.path(), rel, content);
    git(scratch.path(), &["add", "--all"]);
    git(scratch.path(), &["commit", "--quiet", "-m", &format!("update {rel}")]);
    git(scratch.path(), &["push", "--quiet", "origin", branch]);
}

/// Content of `rel` at `rev` in `bare`.
pub fn show(bare: &Path, rev: &str, rel: &str) -> String {
    git(bare, &["show", &format!("{rev}:{rel}")])
}

pub fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, content).expect("write");
}

pub fn path_str(p: &Path) -> &str {
    p.to_str().expect("utf-8 path")
}

// ---------------------------------------------------------------------------
// FakeHost
// ---------------------------------------------------------------------------

#[derive(Default)]
struct State {
    repos: HashMap<RepoName, Repository>,
    pulls: HashMap<(RepoName, u64), (PullRequest, Vec<String>)>,
    created: Vec<(RepoName, NewPullRequest)>,
    comments: Vec<(RepoName, u64, String)>,
    failing_forks: HashSet<RepoName>,
    fail_comments: bool,
    reject_pulls: bool,
    fork_calls: usize,
}

/// A [`RemoteHost`] whose repositories are bare repos in a temp directory.
///
/// Clone URLs are local paths, so `WorkingCopy` clones and pushes for real.
pub struct FakeHost {
    root: TempDir,
    authenticated: bool,
    state: RefCell<State>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("host root"),
            authenticated: true,
            state: RefCell::new(State::default()),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            ..Self::new()
        }
    }

    /// Create `full` as a bare repository holding `files` on `master`.
    pub fn seed(&self, full: &str, files: &[(&str, &str)]) -> Repository {
        let name = repo(full);
        let owner_dir = self.root.path().join(name.owner());
        std::fs::create_dir_all(&owner_dir).expect("owner dir");
        let bare = owner_dir.join(format!("{}.git", name.name()));
        let seed = owner_dir.join(format!("{}-seed", name.name()));

        git(&owner_dir, &["init", "--quiet", "--bare", "-b", "master", path_str(&bare)]);
        git(&owner_dir, &["init", "--quiet", "-b", "master", path_str(&seed)]);
        for (rel, content) in files {
            write(&seed, rel, content);
        }
        git(&seed, &["add", "--all"]);
        git(&seed, &["commit", "--quiet", "-m", "initial"]);
        git(&seed, &["push", "--quiet", path_str(&bare), "master"]);

        let repository = Repository {
            full_name: name.clone(),
            clone_url: path_str(&bare).to_owned(),
            fork: false,
            default_branch: "master".into(),
            parent: None,
        };
        self.state.borrow_mut().repos.insert(name, repository.clone());
        repository
    }

    /// Copy `source` to `<owner>/<same name>` as a fork of it.
    pub fn fork_as(&self, source: &str, owner: &str) -> Repository {
        let parent = self.repo(source);
        let name = RepoName::new(owner, parent.full_name.name()).expect("fork name");
        if let Some(existing) = self.state.borrow().repos.get(&name) {
            return existing.clone();
        }
        let owner_dir = self.root.path().join(owner);
        std::fs::create_dir_all(&owner_dir).expect("owner dir");
        let bare = owner_dir.join(format!("{}.git", name.name()));
        git(
            &owner_dir,
            &["clone", "--quiet", "--bare", &parent.clone_url, path_str(&bare)],
        );

        let fork = Repository {
            full_name: name.clone(),
            clone_url: path_str(&bare).to_owned(),
            fork: true,
            default_branch: parent.default_branch.clone(),
            parent: Some(Box::new(parent)),
        };
        self.state.borrow_mut().repos.insert(name, fork.clone());
        fork
    }

    /// Register pull request `number` on `base`, from `head_branch` of `head`.
    pub fn open_pull_request(
        &self,
        base: &str,
        number: u64,
        head: &str,
        head_branch: &str,
        files: &[&str],
    ) -> PullRequestRef {
        let base_repo = self.repo(base);
        let head_repo = self.repo(head);
        let pull = PullRequest {
            number,
            html_url: format!("https://example.test/{base}/pull/{number}"),
            head: CommitPointer {
                ref_name: head_branch.into(),
                sha: String::new(),
                repo: Some(head_repo),
            },
            base: CommitPointer {
                ref_name: base_repo.default_branch.clone(),
                sha: String::new(),
                repo: Some(base_repo.clone()),
            },
        };
        let files = files.iter().map(|f| f.to_string()).collect();
        self.state
            .borrow_mut()
            .pulls
            .insert((base_repo.full_name.clone(), number), (pull, files));
        PullRequestRef::new(base_repo.full_name, number)
    }

    pub fn fail_fork_of(&self, full: &str) {
        self.state.borrow_mut().failing_forks.insert(repo(full));
    }

    pub fn fail_comments(&self) {
        self.state.borrow_mut().fail_comments = true;
    }

    /// Answer every pull request creation with a 422 that is not a duplicate.
    pub fn reject_pull_requests(&self) {
        self.state.borrow_mut().reject_pulls = true;
    }

    pub fn repo(&self, full: &str) -> Repository {
        self.state
            .borrow()
            .repos
            .get(&repo(full))
            .cloned()
            .unwrap_or_else(|| panic!("unknown repository {full}"))
    }

    pub fn bare(&self, full: &str) -> PathBuf {
        PathBuf::from(self.repo(full).clone_url)
    }

    pub fn created(&self) -> Vec<(RepoName, NewPullRequest)> {
        self.state.borrow().created.clone()
    }

    pub fn comments(&self) -> Vec<(RepoName, u64, String)> {
        self.state.borrow().comments.clone()
    }

    pub fn fork_calls(&self) -> usize {
        self.state.borrow().fork_calls
    }

    fn created_url(repo: &RepoName, number: u64) -> String {
        format!("https://example.test/{repo}/pull/{number}")
    }

    fn not_found(what: String) -> HostError {
        HostError::Status {
            status: 404,
            url: format!("https://example.test/{what}"),
            message: "Not Found".into(),
        }
    }
}

impl RemoteHost for FakeHost {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn pull_request_files(&self, repo: &RepoName, number: u64) -> Result<Vec<String>, HostError> {
        self.state
            .borrow()
            .pulls
            .get(&(repo.clone(), number))
            .map(|(_, files)| files.clone())
            .ok_or_else(|| Self::not_found(format!("{repo}/pull/{number}/files")))
    }

    fn pull_request(&self, repo: &RepoName, number: u64) -> Result<PullRequest, HostError> {
        self.state
            .borrow()
            .pulls
            .get(&(repo.clone(), number))
            .map(|(pull, _)| pull.clone())
            .ok_or_else(|| Self::not_found(format!("{repo}/pull/{number}")))
    }

    fn find_open_pull_request(
        &self,
        repo: &RepoName,
        head: &str,
        base: &str,
    ) -> Result<Option<PullRequest>, HostError> {
        let state = self.state.borrow();
        let found = state
            .created
            .iter()
            .position(|(r, p)| r == repo && p.head == head && p.base == base)
            .map(|index| {
                let number = 101 + index as u64;
                PullRequest {
                    number,
                    html_url: Self::created_url(repo, number),
                    head: CommitPointer {
                        ref_name: head.to_owned(),
                        sha: String::new(),
                        repo: None,
                    },
                    base: CommitPointer {
                        ref_name: base.to_owned(),
                        sha: String::new(),
                        repo: None,
                    },
                }
            });
        Ok(found)
    }

    fn repository(&self, repo: &RepoName) -> Result<Repository, HostError> {
        self.state
            .borrow()
            .repos
            .get(repo)
            .cloned()
            .ok_or_else(|| Self::not_found(repo.to_string()))
    }

    fn current_user(&self) -> Result<String, HostError> {
        if !self.authenticated {
            return Err(HostError::Unauthenticated {
                operation: "current user",
            });
        }
        Ok(LOGIN.to_owned())
    }

    fn fork(&self, repo: &RepoName) -> Result<Repository, HostError> {
        if !self.authenticated {
            return Err(HostError::Unauthenticated { operation: "fork" });
        }
        {
            let mut state = self.state.borrow_mut();
            state.fork_calls += 1;
            if state.failing_forks.contains(repo) {
                return Err(HostError::Status {
                    status: 403,
                    url: format!("https://example.test/{repo}/forks"),
                    message: "forking is disabled".into(),
                });
            }
            if !state.repos.contains_key(repo) {
                return Err(Self::not_found(repo.to_string()));
            }
        }
        Ok(self.fork_as(&repo.to_string(), LOGIN))
    }

    fn create_pull_request(
        &self,
        repo: &RepoName,
        pull: &NewPullRequest,
    ) -> Result<CreatedPullRequest, HostError> {
        if !self.authenticated {
            return Err(HostError::Unauthenticated {
                operation: "create pull request",
            });
        }
        let mut state = self.state.borrow_mut();
        if state.reject_pulls {
            return Err(HostError::Status {
                status: 422,
                url: format!("https://example.test/{repo}/pulls"),
                message: "Validation Failed (No commits between master and the head)".into(),
            });
        }
        let duplicate = state
            .created
            .iter()
            .any(|(r, p)| r == repo && p.head == pull.head && p.base == pull.base);
        if duplicate {
            return Err(HostError::Status {
                status: 422,
                url: format!("https://example.test/{repo}/pulls"),
                message: format!("A pull request already exists for {}.", pull.head),
            });
        }
        state.created.push((repo.clone(), pull.clone()));
        let number = 100 + state.created.len() as u64;
        Ok(CreatedPullRequest {
            number,
            html_url: Self::created_url(repo, number),
        })
    }

    fn comment(&self, repo: &RepoName, number: u64, body: &str) -> Result<Comment, HostError> {
        let mut state = self.state.borrow_mut();
        if state.fail_comments {
            return Err(HostError::Status {
                status: 500,
                url: format!("https://example.test/{repo}/issues/{number}/comments"),
                message: "Server Error".into(),
            });
        }
        state.comments.push((repo.clone(), number, body.to_owned()));
        let id = state.comments.len() as u64;
        Ok(Comment {
            id,
            html_url: format!("https://example.test/{repo}/pull/{number}#issuecomment-{id}"),
        })
    }
}
