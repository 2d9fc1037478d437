use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{CatalogEntry, ChangedEntry};
use crate::issues::{Issue, Report, ReportLocation};

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project root
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractCatalogParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// Documents or directories relative to the project root (default: the root)
    pub documents: Option<Vec<String>>,
    /// Marker identifiers (default: configured markers)
    pub markers: Option<Vec<String>>,
    /// Write the catalog to the configured output file when complete
    pub write: Option<bool>,
    /// Max entries to return (default 50, max 200)
    pub limit: Option<u32>,
    /// Entries to skip
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiffCatalogsParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// Previously committed catalog, relative to the project root
    pub old_catalog: String,
    /// Newly extracted catalog, relative to the project root
    pub new_catalog: String,
}

// ============================================================
// Config Types (get_config)
// ============================================================

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub markers: Vec<String>,
    pub extensions: Vec<String>,
    pub ignores: Vec<String>,
    pub output: String,
    pub report_variants: bool,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            markers: c.markers,
            extensions: c.extensions,
            ignores: c.ignores,
            output: c.output,
            report_variants: c.report_variants,
        }
    }
}

// ============================================================
// Extraction Types (extract_catalog)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractCatalogResult {
    pub stats: ExtractStats,
    /// Catalog entries in rank order (paginated)
    pub entries: Vec<EntryItem>,
    /// All issues, sorted by location
    pub issues: Vec<IssueItem>,
    pub pagination: Pagination,
    /// Catalog path relative to the project root, when written
    pub written: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractStats {
    pub documents_scanned: usize,
    pub strings_extracted: usize,
    pub entry_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    /// False when a document could not be read
    pub complete: bool,
    pub hash: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryItem {
    pub key: String,
    pub rank: usize,
    pub text: String,
    pub occurrence_count: usize,
    /// First occurrence as `document:line:column`
    pub first_seen: Option<String>,
}

impl From<&CatalogEntry> for EntryItem {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            key: entry.key.to_string(),
            rank: entry.rank,
            text: entry.text.clone(),
            occurrence_count: entry.occurrences.len(),
            first_seen: entry.occurrences.first().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueItem {
    pub severity: String,
    pub rule: String,
    pub message: String,
    pub document_id: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub details: Option<String>,
}

impl From<&Issue> for IssueItem {
    fn from(issue: &Issue) -> Self {
        let (document_id, line, column) = match issue.location() {
            ReportLocation::Source(ctx) => {
                (ctx.document_id().to_string(), Some(ctx.line()), Some(ctx.col()))
            }
            ReportLocation::File { path } => (path.to_string(), None, None),
        };
        Self {
            severity: issue.report_severity().to_string(),
            rule: issue.report_rule().to_string(),
            message: issue.message(),
            document_id,
            line,
            column,
            details: issue.details(),
        }
    }
}

// ============================================================
// Diff Types (diff_catalogs)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiffCatalogsResult {
    pub has_changes: bool,
    pub added: Vec<EntryItem>,
    pub removed: Vec<EntryItem>,
    pub changed: Vec<ChangedItem>,
    pub unchanged: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangedItem {
    pub key: String,
    pub old_text: String,
    pub new_text: String,
}

impl From<&ChangedEntry<'_>> for ChangedItem {
    fn from(change: &ChangedEntry<'_>) -> Self {
        Self {
            key: change.new.key.to_string(),
            old_text: change.old.text.clone(),
            new_text: change.new.text.clone(),
        }
    }
}

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
