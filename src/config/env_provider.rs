use std::collections::HashMap;

/// Source of configuration values
///
/// Settings and secrets read through this trait so tests can supply values
/// without touching the process environment.
pub trait EnvironmentProvider: Send + Sync {
    fn get_var(&self, key: &str) -> Option<String>;

    /// Value with surrounding whitespace removed; blank counts as unset
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get_var(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Production environment provider that reads from system environment
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed set of variables
///
/// Used by tests, and by callers that assemble configuration in code.
#[derive(Debug, Default, Clone)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_vars(mut self, vars: &[(&str, &str)]) -> Self {
        for (key, value) in vars {
            self.vars.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_environment_provider() {
        let provider = MockEnvironment::empty()
            .with_var("TEST_KEY", "test_value")
            .with_var("ANOTHER_KEY", "another_value");

        assert_eq!(provider.get_var("TEST_KEY"), Some("test_value".to_string()));
        assert_eq!(provider.get_var("ANOTHER_KEY"), Some("another_value".to_string()));
        assert_eq!(provider.get_var("NON_EXISTENT"), None);
    }

    #[test]
    fn test_get_non_empty_treats_blank_as_unset() {
        let provider = MockEnvironment::empty().with_vars(&[("BLANK", "   "), ("PADDED", " x ")]);

        assert_eq!(provider.get_non_empty("BLANK"), None);
        assert_eq!(provider.get_non_empty("PADDED"), Some("x".to_string()));
        assert_eq!(provider.get_non_empty("MISSING"), None);
    }
}
