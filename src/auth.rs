// src/auth.rs

//! Authentication against the remote data source (Synapse).
//!
//! Two steps: a silent login that only uses cached credentials, and an
//! interactive login that may prompt on the terminal. The interactive step is
//! only taken when the silent one reports [`AuthError::NotAuthenticated`];
//! network failures and a missing client propagate as they are.

use std::io::ErrorKind;
use std::process::Stdio;
use std::sync::LazyLock;

use regex::Regex;
use tokio::process::Command;
use tracing::{info, warn};

use crate::errors::AuthError;
use crate::types::BoxFuture;

static NETWORK_FAILURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(connection ?error|max retries exceeded|timed? ?out|name resolution|network is unreachable|connection refused)",
    )
    .expect("static regex is valid")
});

/// How authentication finally succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Silent,
    Interactive,
}

pub trait Authenticator: Send {
    /// Log in without prompting.
    fn login_silent(&mut self) -> BoxFuture<'_, Result<(), AuthError>>;

    /// Log in, prompting the user if needed.
    fn login_interactive(&mut self) -> BoxFuture<'_, Result<(), AuthError>>;
}

/// Silent login, falling back to interactive only when not authenticated.
pub async fn authenticate<A: Authenticator + ?Sized>(auth: &mut A) -> Result<AuthOutcome, AuthError> {
    match auth.login_silent().await {
        Ok(()) => {
            info!("authenticated with cached credentials");
            Ok(AuthOutcome::Silent)
        }
        Err(AuthError::NotAuthenticated) => {
            warn!("no cached credentials; falling back to interactive login");
            auth.login_interactive().await?;
            info!("authenticated interactively");
            Ok(AuthOutcome::Interactive)
        }
        Err(other) => Err(other),
    }
}

/// Authenticator backed by the `synapse` command-line client.
#[derive(Debug, Clone)]
pub struct SynapseCli {
    program: String,
}

impl SynapseCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn silent(&self) -> Result<(), AuthError> {
        let output = Command::new(&self.program)
            .arg("login")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(classify_login_failure(&stderr))
    }

    async fn interactive(&self) -> Result<(), AuthError> {
        let status = Command::new(&self.program)
            .args(["login", "--remember-me"])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(AuthError::Failed(format!(
                "'{} login --remember-me' exited with {}",
                self.program, status
            )))
        }
    }

    fn spawn_error(&self, err: std::io::Error) -> AuthError {
        match err.kind() {
            ErrorKind::NotFound => AuthError::ToolUnavailable(self.program.clone()),
            _ => AuthError::Failed(format!("running '{}': {err}", self.program)),
        }
    }
}

impl Default for SynapseCli {
    fn default() -> Self {
        Self::new("synapse")
    }
}

impl Authenticator for SynapseCli {
    fn login_silent(&mut self) -> BoxFuture<'_, Result<(), AuthError>> {
        Box::pin(self.silent())
    }

    fn login_interactive(&mut self) -> BoxFuture<'_, Result<(), AuthError>> {
        Box::pin(self.interactive())
    }
}

/// Map the stderr of a failed silent login onto an error kind.
pub fn classify_login_failure(stderr: &str) -> AuthError {
    match NETWORK_FAILURE.find(stderr) {
        Some(m) => AuthError::Network(m.as_str().to_string()),
        None => AuthError::NotAuthenticated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted {
        silent: Result<(), AuthError>,
        interactive: Result<(), AuthError>,
        interactive_calls: usize,
    }

    impl Authenticator for Scripted {
        fn login_silent(&mut self) -> BoxFuture<'_, Result<(), AuthError>> {
            let r = self.silent.clone();
            Box::pin(async move { r })
        }

        fn login_interactive(&mut self) -> BoxFuture<'_, Result<(), AuthError>> {
            self.interactive_calls += 1;
            let r = self.interactive.clone();
            Box::pin(async move { r })
        }
    }

    fn scripted(silent: Result<(), AuthError>, interactive: Result<(), AuthError>) -> Scripted {
        Scripted {
            silent,
            interactive,
            interactive_calls: 0,
        }
    }

    #[tokio::test]
    async fn cached_credentials_skip_the_prompt() {
        let mut auth = scripted(Ok(()), Ok(()));
        assert_eq!(authenticate(&mut auth).await, Ok(AuthOutcome::Silent));
        assert_eq!(auth.interactive_calls, 0);
    }

    #[tokio::test]
    async fn not_authenticated_falls_back_once() {
        let mut auth = scripted(Err(AuthError::NotAuthenticated), Ok(()));
        assert_eq!(authenticate(&mut auth).await, Ok(AuthOutcome::Interactive));
        assert_eq!(auth.interactive_calls, 1);
    }

    #[tokio::test]
    async fn network_errors_propagate_without_prompting() {
        let mut auth = scripted(Err(AuthError::Network("timed out".into())), Ok(()));
        assert_eq!(
            authenticate(&mut auth).await,
            Err(AuthError::Network("timed out".into()))
        );
        assert_eq!(auth.interactive_calls, 0);
    }

    #[tokio::test]
    async fn failed_fallback_is_an_error() {
        let mut auth = scripted(
            Err(AuthError::NotAuthenticated),
            Err(AuthError::Failed("bad password".into())),
        );
        assert!(authenticate(&mut auth).await.is_err());
    }

    #[test]
    fn classifies_network_noise() {
        assert!(matches!(
            classify_login_failure("requests.exceptions.ConnectionError: Max retries exceeded"),
            AuthError::Network(_)
        ));
        assert_eq!(
            classify_login_failure("SynapseNoCredentialsError: No credentials provided."),
            AuthError::NotAuthenticated
        );
    }
}
