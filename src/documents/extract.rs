//! Document Discovery and Text Extraction
//!
//! Walks a document root for ingestible files and converts them to plain
//! text. Format-specific parsing (PDF, DOCX) is a capability boundary:
//! the built-in extractor handles plain-text formats and reports an empty
//! string for the rest, which the pipeline treats as a skip, not an error.

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// File extensions eligible for ingestion.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "pdf", "docx"];

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text extraction capability.
///
/// Returns the document's text, or an empty string when there is nothing
/// to extract (unsupported format, undecodable content). `Err` is reserved
/// for filesystem faults.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Built-in extractor for plain-text formats.
///
/// Reads `txt` and `md` with lossy UTF-8 decoding. `pdf` and `docx` are
/// discovered but yield an empty string until a format-aware extractor is
/// injected in their place.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let ext = extension_of(path);
        match ext.as_str() {
            "txt" | "md" => {
                let bytes = fs::read(path)?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            _ => {
                debug!(path = %path.display(), ext = %ext, "No extractor for format");
                Ok(String::new())
            }
        }
    }
}

/// Lowercased extension of `path`, empty when absent.
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Recursively list ingestible files under `root`, in sorted path order so
/// ingestion runs are reproducible.
pub fn discover_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| SUPPORTED_EXTENSIONS.contains(&extension_of(path).as_str()))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_discover_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.txt", "b.md", "c.pdf", "d.docx", "skip.rs", "skip.json"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let files = discover_files(dir.path());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.md", "c.pdf", "d.docx"]);
    }

    #[test]
    fn test_discover_recurses_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub/inner.md")).unwrap();
        File::create(dir.path().join("outer.txt")).unwrap();

        let files = discover_files(dir.path());
        assert_eq!(files.len(), 2);
        assert!(files.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_extract_reads_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");
        let mut f = File::create(&path).unwrap();
        write!(f, "hello world").unwrap();

        let text = PlainTextExtractor.extract(&path).await.unwrap();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn test_extract_returns_empty_for_unhandled_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.pdf");
        File::create(&path).unwrap();

        let text = PlainTextExtractor.extract(&path).await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_extract_surfaces_filesystem_faults() {
        let missing = Path::new("/nonexistent/really/missing.txt");
        assert!(PlainTextExtractor.extract(missing).await.is_err());
    }
}
