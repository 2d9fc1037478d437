//! Extraction pipeline: Extractor → Key Normalizer → Catalog Builder.
//!
//! Documents are read and scanned in parallel. Their results are then merged
//! one document at a time, in the order the documents were given, by a single
//! [`CatalogBuilder`]. Completion order of the parallel work never affects
//! ranks.

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use rayon::prelude::*;

use crate::core::{
    Catalog, CatalogBuilder, CatalogError, ContentAddressed, DocumentExtraction, Extractor,
    KeyScheme, MarkerDiagnostic, ScanResult, SourceDocument, normalize,
};

/// Shared flag that stops a run between documents.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A document that could not be processed.
#[derive(Debug)]
pub struct DocumentFailure {
    pub document_id: String,
    pub error: CatalogError,
}

/// Outcome of one extraction run.
#[derive(Debug)]
pub struct ExtractionRun {
    /// Incomplete when the run was cancelled or a document failed.
    pub catalog: Catalog,
    /// Skipped marker invocations, in document then scan order.
    pub diagnostics: Vec<MarkerDiagnostic>,
    pub failures: Vec<DocumentFailure>,
    pub documents_scanned: usize,
    pub strings_extracted: usize,
    pub cancelled: bool,
}

impl ExtractionRun {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    /// True when every document was read, nothing malformed was found and the
    /// run was not cancelled.
    pub fn is_clean(&self) -> bool {
        self.catalog.is_complete() && self.error_count() == 0
    }
}

pub struct Pipeline {
    extractor: Extractor,
    scheme: Box<dyn KeyScheme>,
    cancel: CancelFlag,
}

impl Pipeline {
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor,
            scheme: Box::new(ContentAddressed),
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_scheme(mut self, scheme: impl KeyScheme + 'static) -> Self {
        self.scheme = Box::new(scheme);
        self
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Read and extract the documents at `paths`, merged in `paths` order.
    ///
    /// # Errors
    ///
    /// Only fatal errors (`DuplicateKeyTextMismatch`). A document that cannot
    /// be read is recorded in [`ExtractionRun::failures`].
    pub fn run_paths(&self, paths: &[PathBuf]) -> Result<ExtractionRun, CatalogError> {
        self.run_paths_from(Path::new(""), paths)
    }

    /// Like [`Pipeline::run_paths`], with `paths` relative to `base`. Document
    /// ids stay relative.
    pub fn run_paths_from(
        &self,
        base: &Path,
        paths: &[PathBuf],
    ) -> Result<ExtractionRun, CatalogError> {
        let results: Vec<_> = paths
            .par_iter()
            .map(|path| {
                SourceDocument::read_from(base, path).map(|document| self.scan(&document))
            })
            .collect();
        self.merge(results)
    }

    /// Extract the documents found by [`scan_documents`](crate::core::scan_documents).
    ///
    /// Entries the directory walk could not read are reported as failures
    /// and leave the catalog incomplete.
    pub fn run_scan(&self, base: &Path, scan: ScanResult) -> Result<ExtractionRun, CatalogError> {
        let mut run = self.run_paths_from(base, &scan.files)?;
        if !scan.failures.is_empty() {
            run.failures.extend(scan.failures);
            run.catalog.mark_incomplete();
        }
        Ok(run)
    }

    /// Extract in-memory documents, merged in slice order.
    pub fn run_documents(
        &self,
        documents: &[SourceDocument],
    ) -> Result<ExtractionRun, CatalogError> {
        let results: Vec<_> = documents
            .par_iter()
            .map(|document| Ok::<_, CatalogError>(self.scan(document)))
            .collect();
        self.merge(results)
    }

    fn scan(&self, document: &SourceDocument) -> DocumentExtraction {
        let extraction = self.extractor.extract(document);
        tracing::debug!(
            document = document.id(),
            hash = document.hash(),
            strings = extraction.strings.len(),
            diagnostics = extraction.diagnostics.len(),
            "scanned document"
        );
        extraction
    }

    fn merge(
        &self,
        results: Vec<Result<DocumentExtraction, CatalogError>>,
    ) -> Result<ExtractionRun, CatalogError> {
        let mut builder = CatalogBuilder::new();
        let mut diagnostics = Vec::new();
        let mut failures = Vec::new();
        let mut documents_scanned = 0;
        let mut strings_extracted = 0;
        let mut cancelled = false;

        for result in results {
            if self.cancel.is_cancelled() {
                tracing::warn!(merged = documents_scanned, "extraction cancelled");
                cancelled = true;
                break;
            }
            match result {
                Ok(extraction) => {
                    documents_scanned += 1;
                    strings_extracted += extraction.strings.len();
                    for error in extraction.diagnostics.iter().filter_map(|d| d.to_error()) {
                        tracing::debug!(%error, "skipped marker");
                    }
                    diagnostics.extend(extraction.diagnostics);
                    let scheme = self.scheme.as_ref();
                    builder.extend(
                        extraction
                            .strings
                            .into_iter()
                            .map(|s| normalize(scheme, s)),
                    )?;
                }
                Err(error) if !error.is_fatal() => {
                    let document_id = error.document_id().unwrap_or_default().to_string();
                    tracing::warn!(document = %document_id, %error, "cannot read document");
                    failures.push(DocumentFailure { document_id, error });
                }
                Err(error) => return Err(error),
            }
        }

        let catalog = if cancelled || !failures.is_empty() {
            builder.into_partial()
        } else {
            builder.finish()
        };

        tracing::info!(
            documents = documents_scanned,
            entries = catalog.len(),
            strings = strings_extracted,
            complete = catalog.is_complete(),
            "built catalog"
        );

        Ok(ExtractionRun {
            catalog,
            diagnostics,
            failures,
            documents_scanned,
            strings_extracted,
            cancelled,
        })
    }
}
