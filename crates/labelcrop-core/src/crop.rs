use lopdf::{Document, Object};
use tracing::debug;

use crate::error::LabelError;
use crate::model::{CropBox, InputDocument};

/// A re-serialized PDF with every page cropped to the label region.
#[derive(Debug, Clone)]
pub struct CroppedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Crop every page of a PDF to `bounds` by setting its CropBox and TrimBox.
///
/// Page content is untouched; viewers and printers only show the region.
pub fn crop_pdf(input: &InputDocument, bounds: &CropBox) -> Result<CroppedPdf, LabelError> {
    let mut doc = Document::load_mem(&input.bytes)
        .map_err(|e| LabelError::PdfLoad(format!("{}: {}", input.name, e)))?;

    let page_ids: Vec<_> = doc.get_pages().into_values().collect();
    if page_ids.is_empty() {
        return Err(LabelError::EmptyDocument {
            name: input.name.clone(),
        });
    }

    for id in &page_ids {
        let dict = doc
            .get_object_mut(*id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| LabelError::PdfLoad(format!("page {:?}: {}", id, e)))?;
        dict.set("CropBox", rect(bounds));
        dict.set("TrimBox", rect(bounds));
    }
    debug!(pages = page_ids.len(), bounds = %bounds, "cropped pages");

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| LabelError::Extraction(format!("failed to write cropped PDF: {e}")))?;

    Ok(CroppedPdf {
        bytes,
        page_count: page_ids.len(),
    })
}

fn rect(b: &CropBox) -> Object {
    Object::Array(vec![
        Object::Real(b.left),
        Object::Real(b.bottom),
        Object::Real(b.right),
        Object::Real(b.top),
    ])
}
