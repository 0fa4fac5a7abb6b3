pub mod config;
pub mod crop;
pub mod inspect;
pub mod process;

use labelcrop_core::config::{load_config, validate_config, LabelConfig};
use labelcrop_core::error::LabelError;
use labelcrop_core::extraction::lopdf_text::LopdfExtractor;
use labelcrop_core::extraction::pdftotext::PdftotextExtractor;
use labelcrop_core::extraction::PdfExtractor;
use labelcrop_core::model::InputDocument;
use std::path::{Path, PathBuf};

use crate::Backend;

pub fn extractor(backend: Backend) -> Box<dyn PdfExtractor> {
    match backend {
        Backend::Pdftotext => Box::new(PdftotextExtractor::new()),
        Backend::Lopdf => Box::new(LopdfExtractor::new()),
    }
}

/// Config file if given, defaults otherwise.
fn resolve_config(path: Option<&Path>) -> Result<LabelConfig, LabelError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(LabelConfig::default()),
    }
}

/// Config from file or defaults, with the worker override applied, validated.
pub fn job_config(path: Option<&Path>, workers: Option<usize>) -> Result<LabelConfig, LabelError> {
    let mut config = resolve_config(path)?;
    if let Some(w) = workers {
        config.workers = w;
    }
    validate_config(&config)?;
    Ok(config)
}

pub fn read_inputs(paths: &[PathBuf]) -> Result<Vec<InputDocument>, LabelError> {
    paths
        .iter()
        .map(|p| -> Result<InputDocument, LabelError> {
            let bytes = std::fs::read(p)?;
            Ok(InputDocument::new(p.display().to_string(), bytes))
        })
        .collect()
}

/// `<stem><suffix>.pdf` for a given input path.
pub fn cropped_name(input: &Path, suffix: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "labels".to_string());
    format!("{stem}{suffix}.pdf")
}
