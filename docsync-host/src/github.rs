//! Blocking GitHub REST client over `ureq`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use docsync_core::{RepoName, Token};

use crate::error::HostError;
use crate::model::{
    Comment, CreatedPullRequest, NewPullRequest, PullRequest, PullRequestFile, Repository, User,
};
use crate::RemoteHost;

/// Page size for list endpoints (GitHub maximum).
const PER_PAGE: usize = 100;

/// GitHub stops listing PR files after 3000 entries.
const MAX_FILE_PAGES: usize = 30;

const USER_AGENT: &str = concat!("docsync/", env!("CARGO_PKG_VERSION"));

/// A GitHub API client, anonymous or token-authenticated.
pub struct GitHubClient {
    agent: ureq::Agent,
    api_url: String,
    token: Option<Token>,
}

impl GitHubClient {
    /// Read-only client without credentials.
    pub fn anonymous(api_url: &str, timeout: Duration) -> Self {
        Self {
            agent: build_agent(timeout),
            api_url: api_url.trim_end_matches('/').to_owned(),
            token: None,
        }
    }

    /// Client that sends `Authorization: Bearer <token>`.
    pub fn authenticated(api_url: &str, timeout: Duration, token: Token) -> Self {
        Self {
            token: Some(token),
            ..Self::anonymous(api_url, timeout)
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        let req = self
            .agent
            .request(method, url)
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", "2022-11-28");
        match &self.token {
            Some(token) => req.set("Authorization", &format!("Bearer {}", token.secret())),
            None => req,
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HostError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "GET");
        let response = self.request("GET", &url).call().map_err(|e| map_error(&url, e))?;
        decode(&url, response)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, HostError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "POST");
        let response = self
            .request("POST", &url)
            .send_json(body)
            .map_err(|e| map_error(&url, e))?;
        decode(&url, response)
    }

    fn require_token(&self, operation: &'static str) -> Result<(), HostError> {
        match self.token {
            Some(_) => Ok(()),
            None => Err(HostError::Unauthenticated { operation }),
        }
    }
}

impl RemoteHost for GitHubClient {
    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn pull_request_files(&self, repo: &RepoName, number: u64) -> Result<Vec<String>, HostError> {
        let mut files = Vec::new();
        for page in 1..=MAX_FILE_PAGES {
            let batch: Vec<PullRequestFile> = self.get(&format!(
                "/repos/{repo}/pulls/{number}/files?per_page={PER_PAGE}&page={page}"
            ))?;
            let last = batch.len() < PER_PAGE;
            files.extend(batch.into_iter().map(|f| f.filename));
            if last {
                break;
            }
        }
        Ok(files)
    }

    fn pull_request(&self, repo: &RepoName, number: u64) -> Result<PullRequest, HostError> {
        self.get(&format!("/repos/{repo}/pulls/{number}"))
    }

    fn find_open_pull_request(
        &self,
        repo: &RepoName,
        head: &str,
        base: &str,
    ) -> Result<Option<PullRequest>, HostError> {
        let open: Vec<PullRequest> = self.get(&format!(
            "/repos/{repo}/pulls?state=open&head={head}&base={base}"
        ))?;
        Ok(open.into_iter().next())
    }

    fn repository(&self, repo: &RepoName) -> Result<Repository, HostError> {
        self.get(&format!("/repos/{repo}"))
    }

    fn current_user(&self) -> Result<String, HostError> {
        self.require_token("current user lookup")?;
        let user: User = self.get("/user")?;
        Ok(user.login)
    }

    fn fork(&self, repo: &RepoName) -> Result<Repository, HostError> {
        self.require_token("fork")?;
        self.post(&format!("/repos/{repo}/forks"), &serde_json::json!({}))
    }

    fn create_pull_request(
        &self,
        repo: &RepoName,
        pull: &NewPullRequest,
    ) -> Result<CreatedPullRequest, HostError> {
        self.require_token("pull request creation")?;
        self.post(&format!("/repos/{repo}/pulls"), pull)
    }

    fn comment(&self, repo: &RepoName, number: u64, body: &str) -> Result<Comment, HostError> {
        self.require_token("comment")?;
        self.post(
            &format!("/repos/{repo}/issues/{number}/comments"),
            &serde_json::json!({ "body": body }),
        )
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

fn decode<T: DeserializeOwned>(url: &str, response: ureq::Response) -> Result<T, HostError> {
    response.into_json().map_err(|source| HostError::Decode {
        url: url.to_owned(),
        source,
    })
}

fn map_error(url: &str, err: ureq::Error) -> HostError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            HostError::Status {
                status,
                url: url.to_owned(),
                message: error_message(&body),
            }
        }
        ureq::Error::Transport(transport) => HostError::Transport {
            url: url.to_owned(),
            message: transport.to_string(),
        },
    }
}

/// GitHub error bodies are `{"message": "...", "errors": [...]}`.
fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|v| v.get("message")).and_then(|m| m.as_str());
    let detail = parsed
        .as_ref()
        .and_then(|v| v.get("errors"))
        .and_then(|e| e.as_array())
        .and_then(|errors| errors.first())
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str());
    match (message, detail) {
        (Some(m), Some(d)) => format!("{m} ({d})"),
        (Some(m), None) => m.to_owned(),
        _ => body.chars().take(200).collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
