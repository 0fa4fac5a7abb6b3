use crate::error::LabelError;
use crate::extraction::{PageSource, PdfExtractor};
use tracing::warn;

/// Pure-Rust extraction backend built on lopdf.
///
/// Less faithful to the label's column layout than pdftotext, but needs no
/// external binary. The document is parsed once, so all page text is pulled
/// when the PDF is opened.
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        LopdfExtractor
    }
}

impl Default for LopdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for LopdfExtractor {
    fn open(&self, pdf_bytes: &[u8]) -> Result<Box<dyn PageSource>, LabelError> {
        let doc = lopdf::Document::load_mem(pdf_bytes)
            .map_err(|e| LabelError::PdfLoad(e.to_string()))?;

        let texts = doc
            .get_pages()
            .keys()
            .map(|&number| match doc.extract_text(&[number]) {
                Ok(text) => text,
                Err(e) => {
                    warn!(page = number, error = %e, "lopdf text extraction failed");
                    String::new()
                }
            })
            .collect();

        Ok(Box::new(TextPages { texts }))
    }

    fn backend_name(&self) -> &str {
        "lopdf"
    }
}

/// Page texts held in memory.
pub(crate) struct TextPages {
    pub(crate) texts: Vec<String>,
}

impl PageSource for TextPages {
    fn page_count(&self) -> usize {
        self.texts.len()
    }

    fn page_text(&self, page_index: usize) -> String {
        self.texts.get(page_index).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = LopdfExtractor::new().open(b"%PDF-garbage");
        assert!(matches!(result, Err(LabelError::PdfLoad(_))));
    }

    #[test]
    fn test_text_pages_out_of_range_is_empty() {
        let pages = TextPages {
            texts: vec!["one".into()],
        };
        assert_eq!(pages.page_count(), 1);
        assert_eq!(pages.page_text(0), "one");
        assert_eq!(pages.page_text(5), "");
    }
}
