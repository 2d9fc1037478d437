use std::path::{Path, PathBuf};

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::cli::commands::extract::collect_issues;
use crate::config::load_config;
use crate::core::{
    Extractor, Pipeline, diff as diff_catalogs_of, document_id, read_catalog, scan_documents,
    write_catalog,
};
use crate::issues::Severity;

use super::types::{
    ChangedItem, ConfigDto, ConfigValues, DiffCatalogsParams, DiffCatalogsResult, EntryItem,
    ExtractCatalogParams, ExtractCatalogResult, ExtractStats, GetConfigParams, IssueItem,
    Pagination,
};

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 200;

#[derive(Clone)]
pub struct TrcatMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for TrcatMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl TrcatMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Extract marked strings into a catalog
    #[tool(
        description = "Extract marker-wrapped strings (e.g. tr(\"Okay!\")) from project documents into a content-addressed catalog. Returns stats, all issues and a paginated list of entries in first-seen order."
    )]
    pub async fn extract_catalog(
        &self,
        params: Parameters<ExtractCatalogParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let root = Path::new(&params.project_root_path);
        let limit = params
            .limit
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);

        let config = load_config(root)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?
            .config
            .with_markers(params.markers.as_deref().unwrap_or_default());
        config
            .validate()
            .map_err(|e| McpError::invalid_params(format!("Invalid markers: {}", e), None))?;

        let documents: Vec<PathBuf> = match params.documents {
            Some(documents) if !documents.is_empty() => {
                documents.iter().map(|d| root.join(d)).collect()
            }
            _ => vec![root.to_path_buf()],
        };
        let mut scan = scan_documents(&documents, &config.extensions, &config.ignores, false);
        for file in &mut scan.files {
            if let Ok(relative) = file.strip_prefix(root) {
                *file = relative.to_path_buf();
            }
        }
        for failure in &mut scan.failures {
            if let Ok(relative) = Path::new(&failure.document_id).strip_prefix(root) {
                failure.document_id = document_id(relative);
            }
        }

        let run = Pipeline::new(Extractor::new(&config.markers))
            .run_scan(root, scan)
            .map_err(|e| McpError::internal_error(format!("Extraction failed: {}", e), None))?;

        let issues = {
            let mut issues = collect_issues(&run, &config, root);
            issues.sort();
            issues
        };
        let error_count = issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();

        let written = if params.write.unwrap_or(false) && run.catalog.is_complete() {
            write_catalog(&root.join(&config.output), &run.catalog).map_err(|e| {
                McpError::internal_error(format!("Failed to write catalog: {}", e), None)
            })?;
            Some(document_id(Path::new(&config.output)))
        } else {
            None
        };

        let total_count = run.catalog.len();
        let entries: Vec<EntryItem> = run
            .catalog
            .iter()
            .skip(offset)
            .take(limit)
            .map(EntryItem::from)
            .collect();
        let has_more = offset + entries.len() < total_count;

        let result = ExtractCatalogResult {
            stats: ExtractStats {
                documents_scanned: run.documents_scanned,
                strings_extracted: run.strings_extracted,
                entry_count: total_count,
                error_count,
                warning_count: issues.len() - error_count,
                complete: run.catalog.is_complete(),
                hash: run.catalog.hash().to_string(),
            },
            entries,
            issues: issues.iter().map(IssueItem::from).collect(),
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
            written,
        };

        json_result(&result)
    }

    /// Diff two persisted catalogs
    #[tool(
        description = "Compare a previously committed catalog with a newly extracted one. Returns added, removed and changed entries plus the unchanged count."
    )]
    pub async fn diff_catalogs(
        &self,
        params: Parameters<DiffCatalogsParams>,
    ) -> Result<CallToolResult, McpError> {
        let root = Path::new(&params.0.project_root_path);
        let old = read_catalog(&root.join(&params.0.old_catalog))
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let new = read_catalog(&root.join(&params.0.new_catalog))
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let report = diff_catalogs_of(&old, &new);
        let result = DiffCatalogsResult {
            has_changes: report.has_changes(),
            added: report.added.iter().copied().map(EntryItem::from).collect(),
            removed: report.removed.iter().copied().map(EntryItem::from).collect(),
            changed: report.changed.iter().map(ChangedItem::from).collect(),
            unchanged: report.unchanged,
        };

        json_result(&result)
    }

    /// Get the current trcat configuration
    #[tool(description = "Get the current trcat configuration.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        let config_dto = ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        };

        json_result(&config_dto)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;

    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_handler]
impl ServerHandler for TrcatMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "trcat MCP helps AI agents keep a game's translation catalog in sync with its dialogue sources.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration (markers, extensions, output)\n\
                 2. extract_catalog - Extract marked strings into a catalog (paginated entries, issues, stats)\n\
                 3. diff_catalogs - Compare two catalog files\n\n\
                 Recommended Workflow:\n\
                 1. Use extract_catalog to see malformed markers and near-duplicate variants\n\
                 2. Fix errors in the source documents, then extract with write=true\n\
                 3. Use diff_catalogs against the committed catalog to review what translators must update"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tracing::info!("starting MCP server on stdio");
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = TrcatMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
