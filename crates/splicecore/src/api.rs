//! Endpoint table and wire schemas for the storefront API.
//!
//! The endpoint set is closed: the client can only ever talk to the five
//! routes below, so they are an enum rather than free-form strings. Every
//! response is validated against an explicit schema at the client layer;
//! mismatches surface as `TransportError::Parse` instead of propagating
//! missing fields into the UI.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

/// File tier in the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Free,
    Premium,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Free => "free",
            FileCategory::Premium => "premium",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(FileCategory::Free),
            "premium" => Ok(FileCategory::Premium),
            other => Err(format!("unknown file category: {other}")),
        }
    }
}

/// The full set of API routes the client uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// POST /api/user/status — resolve the caller's account and premium quota
    UserStatus,
    /// GET /api/files/counts — per-tier catalog sizes for the home screen
    FileCounts,
    /// POST /api/files/{category} — one page of the catalog, with search
    Files(FileCategory),
    /// GET /api/stats — cheap liveness probe used by the connectivity monitor
    Stats,
    /// POST /api/files/{id}/download — ask the bot to deliver a file
    Download(u64),
}

impl Endpoint {
    /// URL path relative to the API base.
    pub fn path(&self) -> String {
        match self {
            Endpoint::UserStatus => "/api/user/status".to_string(),
            Endpoint::FileCounts => "/api/files/counts".to_string(),
            Endpoint::Files(category) => format!("/api/files/{category}"),
            Endpoint::Stats => "/api/stats".to_string(),
            Endpoint::Download(file_id) => format!("/api/files/{file_id}/download"),
        }
    }

    /// HTTP method for the route.
    pub fn method(&self) -> Method {
        match self {
            Endpoint::FileCounts | Endpoint::Stats => Method::GET,
            _ => Method::POST,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

// ============================================================================
// Request bodies
// ============================================================================

/// Body of `POST /api/user/status`: the Telegram identity of the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityRequest {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Body of `POST /api/files/{category}`: page selection and search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileQuery {
    /// 1-based page number
    pub page: u32,
    /// Case-insensitive substring matched against name and description
    #[serde(default)]
    pub search: String,
    pub user_id: Option<i64>,
}

impl Default for FileQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            user_id: None,
        }
    }
}

/// Body of `POST /api/files/{id}/download`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub user_id: Option<i64>,
    pub file_type: FileCategory,
}

// ============================================================================
// Response schemas
// ============================================================================

/// Account status and premium quota, replaced wholesale on every
/// successful bootstrap. Never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatus {
    pub user_id: i64,
    pub username: String,
    pub is_premium: bool,
    pub premium_downloads_used: u32,
    pub premium_downloads_remaining: u32,
}

/// Per-tier catalog sizes shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCounts {
    pub free_count: u32,
    pub premium_count: u32,
}

impl FileCounts {
    pub fn total(&self) -> u32 {
        self.free_count + self.premium_count
    }
}

/// One downloadable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub file_id: u64,
    pub name: String,
    pub description: String,
    pub file_type: FileCategory,
    /// Size in bytes
    pub file_size: u64,
    /// ISO date (yyyy-mm-dd) the entry was published
    pub created_at: String,
    pub download_count: u32,
}

/// Pagination metadata accompanying a catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_files: u32,
    pub files_per_page: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// One page of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePage {
    pub files: Vec<FileEntry>,
    pub pagination: Pagination,
}

/// Acknowledgement of a download request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadAck {
    pub success: bool,
    pub message: String,
}
