use std::fmt;

/// Client address and request line taken from one access log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub client_ip: String,
    pub request_text: String,
}

impl ParsedRequest {
    pub fn new(client_ip: &str, request_text: &str) -> Self {
        ParsedRequest {
            client_ip: client_ip.to_string(),
            request_text: request_text.to_string(),
        }
    }
}

/// Why a request was flagged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Request text matched the named attack signature
    Pattern(String),
    /// Client address is blacklisted and not whitelisted
    Blacklisted,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Pattern(name) => write!(f, "pattern {}", name),
            Signal::Blacklisted => write!(f, "blacklisted address"),
        }
    }
}
