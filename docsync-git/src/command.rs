//! Invocation of the `git` binary.
//!
//! Every command runs non-interactively with the configured commit identity.
//! When a token is present it is handed to git through an inline credential
//! helper that reads it from the child's environment, answering
//! `username=<token>` and an empty password. The token is therefore never part
//! of a URL, an argument list or a log line.

use std::path::Path;
use std::process::Command;

use docsync_core::{CommitIdentity, Token};

use crate::error::GitError;

const TOKEN_ENV: &str = "DOCSYNC_GIT_TOKEN";

const CREDENTIAL_HELPER: &str = "!f() { test \"$1\" = get || exit 0; \
     echo \"username=${DOCSYNC_GIT_TOKEN}\"; echo \"password=\"; }; f";

/// Identity and credentials applied to every git command.
#[derive(Debug, Clone, Default)]
pub struct GitContext {
    pub identity: CommitIdentity,
    pub token: Option<Token>,
}

impl GitContext {
    pub fn new(identity: CommitIdentity, token: Option<Token>) -> Self {
        Self { identity, token }
    }

    /// Run `git <args>` in `dir` and return trimmed stdout.
    pub(crate) fn run(&self, dir: &Path, args: &[&str]) -> Result<String, GitError> {
        let mut cmd = Command::new("git");
        cmd.current_dir(dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .arg("-c")
            .arg(format!("user.name={}", self.identity.name))
            .arg("-c")
            .arg(format!("user.email={}", self.identity.email))
            .args(["-c", "commit.gpgsign=false", "-c", "advice.detachedHead=false"]);
        if let Some(token) = &self.token {
            // The empty helper entry resets any helpers inherited from global config.
            cmd.args(["-c", "credential.helper="])
                .arg("-c")
                .arg(format!("credential.helper={CREDENTIAL_HELPER}"))
                .env(TOKEN_ENV, token.secret());
        }
        cmd.args(args);

        tracing::debug!(dir = %dir.display(), "git {}", args.join(" "));
        let output = cmd.output().map_err(GitError::Spawn)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::Command {
                args: args.join(" "),
                status: output.status.to_string(),
                stderr: self.redact(stderr.trim()),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Replace any occurrence of the token with `***`.
    pub(crate) fn redact(&self, text: &str) -> String {
        match &self.token {
            Some(token) if !token.secret().is_empty() => text.replace(token.secret(), "***"),
            _ => text.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_hides_token() {
        let ctx = GitContext::new(CommitIdentity::default(), Some(Token::new("ghp_abc")));
        assert_eq!(
            ctx.redact("fatal: https://ghp_abc@github.com/o/r.git denied"),
            "fatal: https://***@github.com/o/r.git denied"
        );
    }

    #[test]
    fn redact_without_token_is_identity() {
        let ctx = GitContext::default();
        assert_eq!(ctx.redact("plain"), "plain");
    }

    #[test]
    fn failing_command_reports_args() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = GitContext::default()
            .run(dir.path(), &["rev-parse", "--verify", "no-such-ref"])
            .unwrap_err();
        match err {
            GitError::Command { args, .. } => assert_eq!(args, "rev-parse --verify no-such-ref"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
