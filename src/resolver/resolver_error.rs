use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ResolverError {
    Network(String),
    JsonParse(String),
    /// The operator answered a failure prompt with abort.
    Aborted,
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverError::Network(msg) => write!(f, "Network error: {msg}"),
            ResolverError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            ResolverError::Aborted => write!(f, "Aborted by operator"),
        }
    }
}

impl Error for ResolverError {}
