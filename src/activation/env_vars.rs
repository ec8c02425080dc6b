use std::process::Command;

use super::{ActivationError, Activator, EnvKeys};
use crate::store::Profile;

/// Sets persistent user environment variables through `setx`.
///
/// Takes effect for processes launched afterwards, not the current tree.
/// The token is set first; if the base URL then fails, the token is left
/// updated.
pub struct EnvVarActivator {
    program: String,
    keys: EnvKeys,
}

impl EnvVarActivator {
    pub fn new(program: impl Into<String>, keys: EnvKeys) -> Self {
        Self {
            program: program.into(),
            keys,
        }
    }

    fn set_var(&self, var: &str, value: &str) -> Result<(), ActivationError> {
        let output = Command::new(&self.program)
            .arg(var)
            .arg(value)
            .output()
            .map_err(|e| ActivationError::EnvVar {
                var: var.to_string(),
                reason: format!("could not run {}: {}", self.program, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ActivationError::EnvVar {
                var: var.to_string(),
                reason: format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            });
        }

        tracing::debug!(var = %var, "Environment variable set");
        Ok(())
    }
}

impl Activator for EnvVarActivator {
    fn apply(&self, profile: &Profile) -> Result<(), ActivationError> {
        self.set_var(&self.keys.token, profile.token.expose())?;
        self.set_var(&self.keys.base_url, &profile.base_url)?;
        tracing::info!(profile = %profile.name, "Environment variables updated");
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "Environment variables updated: {}, {}\nRestart applications for the change to take effect.",
            self.keys.token, self.keys.base_url
        )
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile::new("prod", "https://api.example.com", "tok123")
    }

    #[test]
    fn succeeds_when_both_calls_succeed() {
        let activator = EnvVarActivator::new("true", EnvKeys::default());
        activator.apply(&profile()).unwrap();
        // Same inputs, same outcome.
        activator.apply(&profile()).unwrap();
    }

    #[test]
    fn failure_names_the_first_variable() {
        let activator = EnvVarActivator::new("false", EnvKeys::default());
        match activator.apply(&profile()) {
            Err(ActivationError::EnvVar { var, .. }) => assert_eq!(var, "ANTHROPIC_AUTH_TOKEN"),
            other => panic!("expected EnvVar error, got {:?}", other),
        }
    }

    #[test]
    fn missing_program_is_reported() {
        let activator =
            EnvVarActivator::new("/nonexistent/ccswitch-setx", EnvKeys::default());
        let err = activator.apply(&profile()).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_AUTH_TOKEN"));
        assert!(err.to_string().contains("could not run"));
    }
}
