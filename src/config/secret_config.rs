/// How one secret is read from the environment
#[derive(Debug, Clone)]
pub struct SecretConfig {
    /// Environment variable name
    pub name: &'static str,
    pub required: bool,
    pub min_length: Option<usize>,
}

impl SecretConfig {
    /// Required secret with no length rule
    pub const fn env(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            min_length: None,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub const fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }
}
