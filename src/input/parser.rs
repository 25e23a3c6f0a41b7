use crate::models::ParsedRequest;
use regex::Regex;

/// Extracts the client address and request line from access log lines
///
/// Expected shape: `<client-ip> ... "<request-line>" ...`. Lines without a
/// leading dotted-decimal token or without a quoted section are skipped.
pub struct LogLineParser {
    ip_prefix: Regex,
    quoted: Regex,
}

impl LogLineParser {
    pub fn new() -> Self {
        LogLineParser {
            ip_prefix: Regex::new(r"^[0-9.]+").expect("static regex"),
            quoted: Regex::new(r#""([^"]*)""#).expect("static regex"),
        }
    }

    /// Parse one raw line, `None` when the line does not have the expected shape
    pub fn parse(&self, line: &str) -> Option<ParsedRequest> {
        let client_ip = self.ip_prefix.find(line)?.as_str();
        let request_text = self.quoted.captures(line)?.get(1)?.as_str();

        Some(ParsedRequest::new(client_ip, request_text))
    }
}

impl Default for LogLineParser {
    fn default() -> Self {
        Self::new()
    }
}
