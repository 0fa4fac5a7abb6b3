pub mod lopdf_text;
pub mod pdftotext;

use crate::error::LabelError;

/// Text access to the pages of one opened PDF.
///
/// Implementations must be shareable across the page worker pool.
pub trait PageSource: Send + Sync {
    fn page_count(&self) -> usize;

    /// Best-effort text of a page (0-based). Returns an empty string when
    /// nothing could be read; a bad page is never an error.
    fn page_text(&self, page_index: usize) -> String;
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Open a PDF for page-by-page text extraction.
    ///
    /// Fails only when the document as a whole cannot be read.
    fn open(&self, pdf_bytes: &[u8]) -> Result<Box<dyn PageSource>, LabelError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Count pages with lopdf, mapping parse failures to `PdfLoad`.
pub(crate) fn count_pages(pdf_bytes: &[u8]) -> Result<usize, LabelError> {
    let doc = lopdf::Document::load_mem(pdf_bytes).map_err(|e| LabelError::PdfLoad(e.to_string()))?;
    Ok(doc.get_pages().len())
}
