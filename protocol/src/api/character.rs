//! Character API DTOs
//!
//! Query parameters for `GET /characters` and the response envelope shared by
//! `GET /characters` and `GET /characters/{id}`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::common::Character;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page the server will return
pub const MAX_PAGE_SIZE: u32 = 100;

// ============================================================================
// List query
// ============================================================================

/// Query for `GET /characters`
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ListCharactersQuery {
    #[validate(length(min = 1, max = 255))]
    pub name_starts_with: Option<String>,
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
    pub offset: u32,
    pub order_by: Option<OrderBy>,
}

impl Default for ListCharactersQuery {
    fn default() -> Self {
        Self {
            name_starts_with: None,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            order_by: None,
        }
    }
}

impl ListCharactersQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name_starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.name_starts_with = Some(prefix.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// Query-string pairs in the server's parameter names
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];

        if let Some(prefix) = &self.name_starts_with {
            pairs.push(("nameStartsWith", prefix.clone()));
        }

        if let Some(order_by) = self.order_by {
            pairs.push(("orderBy", order_by.as_str().to_string()));
        }

        pairs
    }
}

/// Server-side ordering accepted by `orderBy`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    NameAsc,
    NameDesc,
    ModifiedAsc,
    ModifiedDesc,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameAsc => "name",
            Self::NameDesc => "-name",
            Self::ModifiedAsc => "modified",
            Self::ModifiedDesc => "-modified",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::NameAsc),
            "-name" => Ok(Self::NameDesc),
            "modified" => Ok(Self::ModifiedAsc),
            "-modified" => Ok(Self::ModifiedDesc),
            other => Err(format!(
                "unknown order '{}', expected one of: name, -name, modified, -modified",
                other
            )),
        }
    }
}

// ============================================================================
// Response envelope
// ============================================================================

/// Top-level response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDataWrapper {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    pub data: CharacterDataContainer,
}

impl CharacterDataWrapper {
    pub fn into_results(self) -> Vec<Character> {
        self.data.results
    }
}

/// Pagination window plus the records in it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterDataContainer {
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
    /// Total records matching the query on the server
    #[serde(default)]
    pub total: u32,
    /// Records in this page
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub results: Vec<Character>,
}

/// Error body returned with non-2xx statuses
///
/// The server uses `status` for 401/409 style failures and `message` for
/// 404/405, and `code` is sometimes a string (`InvalidCredentials`).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn describe(&self) -> Option<String> {
        self.message.clone().or_else(|| self.status.clone())
    }
}
