//! Common types used throughout json-scaffold
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method a route handler is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
}

impl Method {
    /// Every supported method, in the order handlers are emitted by default
    pub const ALL: [Method; 5] = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
    ];

    /// Uppercase name (`GET`)
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
        }
    }

    /// Lowercase name, as used for decorators and function names (`get`)
    pub fn lower(self) -> &'static str {
        match self {
            Method::GET => "get",
            Method::POST => "post",
            Method::PUT => "put",
            Method::DELETE => "delete",
            Method::PATCH => "patch",
        }
    }

    /// Whether generated handlers for this method receive the model as body
    pub fn takes_body(self) -> bool {
        matches!(self, Method::POST | Method::PUT)
    }

    /// Drop repeated methods, keeping the first occurrence of each
    pub fn collapse(methods: impl IntoIterator<Item = Method>) -> Vec<Method> {
        let mut unique = Vec::new();
        for method in methods {
            if !unique.contains(&method) {
                unique.push(method);
            }
        }
        unique
    }

    /// Parse a comma-separated method list such as `"post, GET"`.
    ///
    /// Names are case-insensitive and surrounding whitespace is ignored.
    /// Repeated methods collapse to their first occurrence.
    pub fn parse_list(list: &str) -> Result<Vec<Method>> {
        let methods = Self::collapse(
            list.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::parse)
                .collect::<Result<Vec<Method>>>()?,
        );

        if methods.is_empty() {
            return Err(Error::invalid_value("methods", "at least one HTTP method is required"));
        }
        Ok(methods)
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            "PATCH" => Ok(Method::PATCH),
            _ => Err(Error::InvalidMethod {
                method: s.trim().to_string(),
            }),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
