/// Source of the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSource {
    /// Request originated from an HTTP endpoint
    API,

    /// Request originated from a CLI command
    CLI,
}

impl RequestSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::API => "api",
            Self::CLI => "cli",
        }
    }
}
