use tracing::debug;

/// Resolve a configuration value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_env_reference(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved config value from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// First non-empty value of an environment variable.
pub fn env_value(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_literal() {
        assert_eq!(resolve_env_reference("https://risk.example"), "https://risk.example");
    }

    #[test]
    fn test_resolve_env_var() {
        std::env::set_var("TEST_RISKSCOPE_REF", "https://from-env.example");
        assert_eq!(resolve_env_reference("$TEST_RISKSCOPE_REF"), "https://from-env.example");
        std::env::remove_var("TEST_RISKSCOPE_REF");
    }

    #[test]
    fn test_resolve_missing_env_var() {
        assert_eq!(resolve_env_reference("$NONEXISTENT_RISKSCOPE_VAR"), "$NONEXISTENT_RISKSCOPE_VAR");
    }

    #[test]
    fn test_env_value_ignores_blank() {
        std::env::set_var("TEST_RISKSCOPE_BLANK", "  ");
        assert!(env_value("TEST_RISKSCOPE_BLANK").is_none());
        std::env::remove_var("TEST_RISKSCOPE_BLANK");
    }
}
