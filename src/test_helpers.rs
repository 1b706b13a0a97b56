//! Shared test utilities for the help-site test suite.
//!
//! Provides fixture setup and lookup helpers over scan-stage data.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let articles = find_stream(&manifest, "helpArticle");
//! assert_eq!(stream_ids(articles), vec!["1001", "1002", "1003"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::{Manifest, StreamBatch, document_id};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups: panics with a clear message on miss
// =========================================================================

/// Find a stream batch by stream id. Panics if not found.
pub fn find_stream<'a>(manifest: &'a Manifest, stream_id: &str) -> &'a StreamBatch {
    manifest
        .streams
        .iter()
        .find(|s| s.stream_id == stream_id)
        .unwrap_or_else(|| {
            let ids: Vec<&str> = manifest.streams.iter().map(|s| s.stream_id.as_str()).collect();
            panic!("stream '{stream_id}' not found. Available: {ids:?}")
        })
}

/// Document ids of a stream batch, in order.
pub fn stream_ids(batch: &StreamBatch) -> Vec<String> {
    batch
        .documents
        .iter()
        .map(|d| document_id(&d.data).unwrap_or_default())
        .collect()
}
