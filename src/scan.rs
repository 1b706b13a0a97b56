//! Document loading and stream selection.
//!
//! Stage 1 of the build pipeline. Reads exported knowledge-graph documents,
//! assigns them to template streams, and projects each one down to the fields
//! its template declares. The resulting [`Manifest`] is what the generate
//! stage renders.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! └── documents/                   # `documents_dir` in config
//!     ├── articles.json            # Array of documents
//!     ├── faqs/
//!     │   └── billing.json         # Subdirectories are walked too
//!     └── home.json                # Single document object
//! ```
//!
//! Files are read in path order; within a file, documents keep array order.
//!
//! ## Document Shape
//!
//! ```json
//! {
//!   "meta": { "entityType": "helpArticle", "locale": "en" },
//!   "id": "123",
//!   "name": "Reset your password",
//!   "slug": "reset-password"
//! }
//! ```
//!
//! ## Validation
//!
//! - Every `.json` file must parse
//! - Every document must be a JSON object
//!
//! Documents that match no template are kept in [`Manifest::unmatched`] for
//! reporting; they are not an error.

use crate::config::{self, SiteConfig};
use crate::stream;
use crate::templates::TemplateKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Documents directory not found: {0}")]
    MissingDocumentsDir(PathBuf),
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Document {index} in {path} is not a JSON object")]
    InvalidDocument { path: PathBuf, index: usize },
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub streams: Vec<StreamBatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmatched: Vec<UnmatchedDocument>,
    pub config: SiteConfig,
}

impl Manifest {
    /// Total documents across all streams.
    pub fn document_count(&self) -> usize {
        self.streams.iter().map(|s| s.documents.len()).sum()
    }
}

/// Documents selected for one template.
#[derive(Debug, Serialize, Deserialize)]
pub struct StreamBatch {
    pub template: TemplateKind,
    pub stream_id: String,
    pub documents: Vec<StreamDocument>,
}

/// A projected document and the file it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamDocument {
    /// Path relative to the documents directory.
    pub source: String,
    pub data: Value,
}

/// A document no template's stream selected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedDocument {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
}

/// A raw document as loaded from disk.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub source: String,
    pub data: Value,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    scan_with_config(root, None)
}

/// Scan with an optional extra config file layered over the root config.
pub fn scan_with_config(
    root: &Path,
    config_overlay: Option<&Path>,
) -> Result<Manifest, ScanError> {
    let config = config::load_config_with_overlay(root, config_overlay)?;
    let documents = load_documents(&root.join(&config.documents_dir))?;
    let (streams, unmatched) = select_streams(&documents, &TemplateKind::ALL);

    Ok(Manifest {
        streams,
        unmatched,
        config,
    })
}

/// Load every document under `dir`, in path order.
pub fn load_documents(dir: &Path) -> Result<Vec<SourceDocument>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::MissingDocumentsDir(dir.to_path_buf()));
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_json(path) {
            continue;
        }

        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content).map_err(|source| ScanError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let source = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        let items = match value {
            Value::Array(items) => items,
            other => vec![other],
        };
        for (index, data) in items.into_iter().enumerate() {
            if !data.is_object() {
                return Err(ScanError::InvalidDocument {
                    path: path.to_path_buf(),
                    index,
                });
            }
            documents.push(SourceDocument {
                source: source.clone(),
                data,
            });
        }
    }
    Ok(documents)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Assign documents to each template's stream and project them.
///
/// A document may feed several streams. Every template gets a batch, even an
/// empty one, in the order of `templates`.
pub fn select_streams(
    documents: &[SourceDocument],
    templates: &[TemplateKind],
) -> (Vec<StreamBatch>, Vec<UnmatchedDocument>) {
    let mut matched = vec![false; documents.len()];

    let streams: Vec<StreamBatch> = templates
        .iter()
        .map(|&template| {
            let stream = &template.config().stream;
            let selected = documents
                .iter()
                .enumerate()
                .filter(|(_, doc)| stream.matches(&doc.data))
                .map(|(i, doc)| {
                    matched[i] = true;
                    StreamDocument {
                        source: doc.source.clone(),
                        data: stream.project(&doc.data),
                    }
                })
                .collect();
            StreamBatch {
                template,
                stream_id: stream.id.to_string(),
                documents: selected,
            }
        })
        .collect();

    let unmatched: Vec<UnmatchedDocument> = documents
        .iter()
        .zip(&matched)
        .filter(|(_, hit)| !**hit)
        .map(|(doc, _)| UnmatchedDocument {
            source: doc.source.clone(),
            id: document_id(&doc.data),
            entity_type: stream::entity_type(&doc.data).map(str::to_string),
        })
        .collect();

    (streams, unmatched)
}

/// A raw document's `id`, string or number.
pub fn document_id(document: &Value) -> Option<String> {
    match document.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
