//! HTTP request method vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// A supported HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Connect,
    Trace,
}

impl HttpMethod {
    /// Every supported method, in canonical order.
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Connect,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// True if `token` names a supported method. Matching is exact.
    pub fn is_valid(token: &str) -> bool {
        token.parse::<HttpMethod>().is_ok()
    }

    /// Names of every supported method.
    pub fn all() -> Vec<&'static str> {
        Self::ALL.iter().map(HttpMethod::as_str).collect()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Returned when a token is not a supported method.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown HTTP method \"{0}\"")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        assert!(HttpMethod::is_valid("GET"));
        assert!(HttpMethod::is_valid("OPTIONS"));
        assert!(!HttpMethod::is_valid("get"));
        assert!(!HttpMethod::is_valid("ANY"));
        assert!(!HttpMethod::is_valid("/foo"));
        assert!(!HttpMethod::is_valid(""));
    }

    #[test]
    fn test_all_round_trips() {
        let all = HttpMethod::all();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0], "GET");
        for name in all {
            assert_eq!(name.parse::<HttpMethod>().unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_serializes_as_name() {
        assert_eq!(serde_json::to_string(&HttpMethod::Patch).unwrap(), "\"PATCH\"");
    }
}
