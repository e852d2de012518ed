//! Converging one app to its desired state.
//!
//! Every run starts from scratch: the current account, installed list and
//! outdated list are queried from `mas` each time. Sign-in always comes
//! first, then the install/update step for the desired state.

use crate::backend::{Runner, display_args};
use crate::error::{Error, Result};
use crate::matching;
use crate::types::{AppSpec, DesiredState, Outcome};

/// Drives `mas` until an app matches its [`AppSpec`].
pub struct StateReconciler<'a> {
    runner: &'a dyn Runner,
    dry_run: bool,
}

impl<'a> StateReconciler<'a> {
    /// Create a reconciler. With `dry_run`, sign-in and install are skipped
    /// but queries still run and the outcome reports what would change.
    pub fn new(runner: &'a dyn Runner, dry_run: bool) -> Self {
        Self { runner, dry_run }
    }

    /// Sign in, then bring the app to `spec.state`.
    pub fn run(&self, spec: &AppSpec) -> Result<Outcome> {
        let signin = self.ensure_signed_in(spec)?;
        let state = match spec.state {
            DesiredState::Present => self.ensure_present(spec)?,
            DesiredState::Latest => self.ensure_latest(spec)?,
        };

        let outcome = Outcome { signin, state };
        log::info!(
            "{}: changed={} signin={:?} state={:?}",
            spec.id,
            outcome.changed(),
            outcome.signin,
            outcome.state
        );
        Ok(outcome)
    }

    /// Make sure `spec.account` is the signed-in account.
    ///
    /// Returns the account if a sign-in happened.
    pub fn ensure_signed_in(&self, spec: &AppSpec) -> Result<Option<String>> {
        let current = self.exec(&["account"])?;
        if current.trim_end() == spec.account {
            log::debug!("already signed in as {}", spec.account);
            return Ok(None);
        }

        if self.dry_run {
            log::info!("would sign in as {}", spec.account);
        } else {
            self.exec(&["signin", &spec.account, &spec.password])?;
            log::info!("signed in as {}", spec.account);
        }
        Ok(Some(spec.account.clone()))
    }

    /// Install the app if it is not installed.
    ///
    /// Returns `Present` if an install happened.
    pub fn ensure_present(&self, spec: &AppSpec) -> Result<Option<DesiredState>> {
        let listed = self.exec(&["list"])?;
        if let Some(line) = matching::referencing_line(&listed, &spec.id)? {
            log::debug!("{} already installed: {line}", spec.id);
            return Ok(None);
        }

        self.install(&spec.id)?;
        Ok(Some(DesiredState::Present))
    }

    /// Install the app, or update it if `mas outdated` lists it.
    ///
    /// A fresh install counts as latest and is reported as `Present`
    /// without a second install.
    pub fn ensure_latest(&self, spec: &AppSpec) -> Result<Option<DesiredState>> {
        if let Some(state) = self.ensure_present(spec)? {
            return Ok(Some(state));
        }

        let outdated = self.exec(&["outdated"])?;
        match matching::referencing_line(&outdated, &spec.id)? {
            Some(line) => {
                log::debug!("{} is outdated: {line}", spec.id);
                self.install(&spec.id)?;
                Ok(Some(DesiredState::Latest))
            }
            None => {
                log::debug!("{} is up to date", spec.id);
                Ok(None)
            }
        }
    }

    fn install(&self, id: &str) -> Result<()> {
        if self.dry_run {
            log::info!("would install {id}");
            return Ok(());
        }
        self.exec(&["install", id])?;
        log::info!("installed {id}");
        Ok(())
    }

    /// Run a command, turning a non-zero exit into a tool error.
    fn exec(&self, args: &[&str]) -> Result<String> {
        log::debug!("running mas {}", display_args(args));
        let output = self.runner.run(args)?;
        if !output.success() {
            log::debug!(
                "mas {} exited with {:?}",
                display_args(args),
                output.code
            );
            return Err(Error::tool(output.stderr));
        }
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::scripted::ScriptedRunner;

    const ACCOUNT: &str = "me@example.com";

    fn spec(id: &str, state: DesiredState) -> AppSpec {
        AppSpec::new(id, state, ACCOUNT, "hunter2")
    }

    fn signed_in() -> ScriptedRunner {
        ScriptedRunner::new().ok("account", &format!("{ACCOUNT}\n"))
    }

    #[test]
    fn test_present_installs_missing_app() {
        let runner = signed_in()
            .ok("list", "409183694 Keynote (13.1)\n")
            .ok("install", "");

        let outcome = StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Present))
            .unwrap();

        assert_eq!(outcome.state, Some(DesiredState::Present));
        assert_eq!(outcome.signin, None);
        assert!(outcome.changed());
        assert_eq!(runner.count("install"), 1);
        assert!(runner.calls().contains(&vec![
            "install".to_string(),
            "497799835".to_string()
        ]));
    }

    #[test]
    fn test_present_second_run_is_noop() {
        let runner = signed_in()
            .ok("list", "497799835 Xcode (14.3)\n")
            .ok("install", "");

        let outcome = StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Present))
            .unwrap();

        assert_eq!(outcome, Outcome::default());
        assert!(!outcome.changed());
        assert_eq!(runner.count("install"), 0);
    }

    #[test]
    fn test_present_does_not_query_outdated() {
        let runner = signed_in().ok("list", "497799835 Xcode (14.3)\n");

        StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Present))
            .unwrap();

        assert_eq!(runner.count("outdated"), 0);
    }

    #[test]
    fn test_latest_updates_outdated_app_once() {
        let runner = signed_in()
            .ok("list", "497799835 Xcode (14.3)\n")
            .ok("outdated", "497799835 Xcode (14.3 -> 15.0)\n")
            .ok("install", "");

        let outcome = StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Latest))
            .unwrap();

        assert_eq!(outcome.state, Some(DesiredState::Latest));
        assert_eq!(runner.count("install"), 1);
    }

    #[test]
    fn test_latest_current_app_is_noop() {
        let runner = signed_in()
            .ok("list", "497799835 Xcode (14.3)\n")
            .ok("outdated", "409183694 Keynote (13.1 -> 14.0)\n")
            .ok("install", "");

        let outcome = StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Latest))
            .unwrap();

        assert!(!outcome.changed());
        assert_eq!(runner.count("install"), 0);
    }

    #[test]
    fn test_latest_fresh_install_skips_outdated_check() {
        let runner = signed_in().ok("list", "").ok("install", "");

        let outcome = StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Latest))
            .unwrap();

        assert_eq!(outcome.state, Some(DesiredState::Present));
        assert_eq!(runner.count("install"), 1);
        assert_eq!(runner.count("outdated"), 0);
    }

    #[test]
    fn test_signin_is_idempotent() {
        let runner = signed_in().ok("list", "497799835 Xcode (14.3)\n");

        let outcome = StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Present))
            .unwrap();

        assert_eq!(outcome.signin, None);
        assert_eq!(runner.count("signin"), 0);
    }

    #[test]
    fn test_signs_in_when_account_differs() {
        let runner = ScriptedRunner::new()
            .ok("account", "someone@else.com\n")
            .ok("signin", "")
            .ok("list", "497799835 Xcode (14.3)\n");

        let outcome = StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Present))
            .unwrap();

        assert_eq!(outcome.signin.as_deref(), Some(ACCOUNT));
        assert!(outcome.changed());
        assert_eq!(runner.calls()[1], vec!["signin", ACCOUNT, "hunter2"]);
    }

    #[test]
    fn test_signin_happens_before_queries() {
        let runner = ScriptedRunner::new()
            .ok("account", "\n")
            .ok("signin", "")
            .ok("list", "")
            .ok("install", "");

        StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Present))
            .unwrap();

        let order: Vec<String> = runner.calls().into_iter().map(|c| c[0].clone()).collect();
        assert_eq!(order, vec!["account", "signin", "list", "install"]);
    }

    #[test]
    fn test_dry_run_never_mutates() {
        let runner = ScriptedRunner::new()
            .ok("account", "someone@else.com\n")
            .ok("list", "409183694 Keynote (13.1)\n");

        let outcome = StateReconciler::new(&runner, true)
            .run(&spec("497799835", DesiredState::Latest))
            .unwrap();

        assert_eq!(outcome.signin.as_deref(), Some(ACCOUNT));
        assert_eq!(outcome.state, Some(DesiredState::Present));
        assert_eq!(runner.count("signin"), 0);
        assert_eq!(runner.count("install"), 0);
        assert_eq!(runner.count("account"), 1);
        assert_eq!(runner.count("list"), 1);
    }

    #[test]
    fn test_dry_run_reports_pending_update() {
        let runner = signed_in()
            .ok("list", "497799835 Xcode (14.3)\n")
            .ok("outdated", "497799835 Xcode (14.3 -> 15.0)\n");

        let outcome = StateReconciler::new(&runner, true)
            .run(&spec("497799835", DesiredState::Latest))
            .unwrap();

        assert_eq!(outcome.state, Some(DesiredState::Latest));
        assert_eq!(runner.count("install"), 0);
        assert_eq!(runner.count("outdated"), 1);
    }

    #[test]
    fn test_account_failure_aborts() {
        let runner = ScriptedRunner::new()
            .fail("account", "Error: Not signed in")
            .ok("list", "");

        let err = StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Present))
            .unwrap_err();

        assert_eq!(err.to_string(), "Error: Not signed in");
        assert_eq!(runner.count("list"), 0);
    }

    #[test]
    fn test_signin_failure_aborts() {
        let runner = ScriptedRunner::new()
            .ok("account", "other@example.com\n")
            .fail("signin", "Error: The sign in failed")
            .ok("list", "");

        let err = StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Present))
            .unwrap_err();

        assert_eq!(err.to_string(), "Error: The sign in failed");
        assert_eq!(runner.count("list"), 0);
    }

    #[test]
    fn test_list_failure_aborts() {
        let runner = signed_in().fail("list", "list exploded").ok("install", "");

        let err = StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Present))
            .unwrap_err();

        assert!(err.is_tool_error());
        assert_eq!(err.to_string(), "list exploded");
        assert_eq!(runner.count("install"), 0);
    }

    #[test]
    fn test_outdated_failure_aborts() {
        let runner = signed_in()
            .ok("list", "497799835 Xcode (14.3)\n")
            .fail("outdated", "outdated exploded")
            .ok("install", "");

        let err = StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Latest))
            .unwrap_err();

        assert_eq!(err.to_string(), "outdated exploded");
        assert_eq!(runner.count("install"), 0);
    }

    #[test]
    fn test_install_failure_aborts() {
        let runner = signed_in()
            .ok("list", "")
            .fail("install", "Error: App not found");

        let err = StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Present))
            .unwrap_err();

        assert_eq!(err.to_string(), "Error: App not found");
    }

    #[test]
    fn test_update_failure_aborts() {
        let runner = signed_in()
            .ok("list", "497799835 Xcode (14.3)\n")
            .ok("outdated", "497799835 Xcode (14.3 -> 15.0)\n")
            .fail("install", "Error: Download failed");

        let result = StateReconciler::new(&runner, false)
            .run(&spec("497799835", DesiredState::Latest));

        let err = result.unwrap_err();
        assert!(err.is_tool_error());
        assert_eq!(err.to_string(), "Error: Download failed");
        assert_eq!(runner.count("install"), 1);
    }

    #[test]
    fn test_invalid_id_pattern_aborts_before_install() {
        let runner = signed_in()
            .ok("list", "(12 Something (1.0)\n")
            .ok("install", "");

        let err = StateReconciler::new(&runner, false)
            .run(&spec("(12", DesiredState::Present))
            .unwrap_err();

        assert!(matches!(err, Error::InvalidId { .. }));
        assert_eq!(runner.count("list"), 1);
        assert_eq!(runner.count("install"), 0);
    }

    #[test]
    fn test_invalid_id_pattern_aborts_latest() {
        let runner = signed_in()
            .ok("list", "(12 Something (1.0)\n")
            .ok("outdated", "")
            .ok("install", "");

        let err = StateReconciler::new(&runner, false)
            .run(&spec("(12", DesiredState::Latest))
            .unwrap_err();

        assert!(matches!(err, Error::InvalidId { .. }));
        assert_eq!(runner.count("outdated"), 0);
        assert_eq!(runner.count("install"), 0);
    }

    #[test]
    fn test_prefix_id_is_not_considered_installed() {
        let runner = signed_in()
            .ok("list", "1234 SomeApp (1.0)\n")
            .ok("install", "");

        let outcome = StateReconciler::new(&runner, false)
            .run(&spec("123", DesiredState::Present))
            .unwrap();

        assert_eq!(outcome.state, Some(DesiredState::Present));
        assert_eq!(runner.calls().last().unwrap(), &vec!["install", "123"]);
    }
}
