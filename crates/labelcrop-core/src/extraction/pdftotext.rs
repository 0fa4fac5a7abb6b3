use crate::error::LabelError;
use crate::extraction::{count_pages, PageSource, PdfExtractor};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Each page is read with `pdftotext -layout` first, which keeps the
/// "SKU ID | Description" columns on one line. Pages that come back blank are
/// retried in raw reading-order mode.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn open(&self, pdf_bytes: &[u8]) -> Result<Box<dyn PageSource>, LabelError> {
        if !Self::is_available() {
            return Err(LabelError::PdftotextNotFound);
        }

        let pages = count_pages(pdf_bytes)?;

        // pdftotext needs a path, so keep the PDF in a temp file for as long
        // as the source lives.
        let mut file =
            tempfile::NamedTempFile::new().map_err(|e| LabelError::Extraction(e.to_string()))?;
        file.write_all(pdf_bytes)
            .map_err(|e| LabelError::Extraction(e.to_string()))?;
        file.flush()
            .map_err(|e| LabelError::Extraction(e.to_string()))?;

        Ok(Box::new(PdftotextSource { file, pages }))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

struct PdftotextSource {
    file: tempfile::NamedTempFile,
    pages: usize,
}

impl PageSource for PdftotextSource {
    fn page_count(&self) -> usize {
        self.pages
    }

    fn page_text(&self, page_index: usize) -> String {
        let page = page_index + 1;

        match run_pdftotext(self.file.path(), page, true) {
            Ok(text) if !text.trim().is_empty() => return text,
            Ok(_) => debug!(page, "layout text empty, retrying raw mode"),
            Err(e) => warn!(page, error = %e, "pdftotext -layout failed"),
        }

        match run_pdftotext(self.file.path(), page, false) {
            Ok(text) => text,
            Err(e) => {
                warn!(page, error = %e, "pdftotext failed, treating page as empty");
                String::new()
            }
        }
    }
}

/// Extract a single 1-based page to stdout.
fn run_pdftotext(pdf_path: &Path, page: usize, layout: bool) -> Result<String, LabelError> {
    let page_arg = page.to_string();
    let mut cmd = Command::new("pdftotext");
    if layout {
        cmd.arg("-layout");
    }
    let output = cmd
        .args(["-f", &page_arg, "-l", &page_arg])
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LabelError::PdftotextNotFound
            } else {
                LabelError::Extraction(format!("pdftotext failed: {}", e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(LabelError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_name() {
        assert_eq!(PdftotextExtractor::new().backend_name(), "pdftotext");
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        // Either pdftotext is missing or lopdf refuses the bytes; both are fatal.
        let result = PdftotextExtractor::new().open(b"not a pdf");
        assert!(matches!(
            result,
            Err(LabelError::PdftotextNotFound) | Err(LabelError::PdfLoad(_))
        ));
    }
}
