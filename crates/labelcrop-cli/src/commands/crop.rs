use labelcrop_core::crop::crop_pdf;
use labelcrop_core::error::LabelError;
use labelcrop_core::export::{commit_outputs, ensure_writable_dir, OutputFile};
use std::path::PathBuf;

use super::{cropped_name, job_config, read_inputs};

pub fn run(
    input_files: Vec<PathBuf>,
    out_dir: PathBuf,
    config_file: Option<PathBuf>,
) -> Result<(), LabelError> {
    let config = job_config(config_file.as_deref(), None)?;
    ensure_writable_dir(&out_dir)?;
    let docs = read_inputs(&input_files)?;

    let mut files = Vec::with_capacity(docs.len());
    let mut page_counts = Vec::with_capacity(docs.len());
    for (path, doc) in input_files.iter().zip(&docs) {
        let cropped = crop_pdf(doc, &config.crop)?;
        page_counts.push(cropped.page_count);
        files.push(OutputFile::new(
            cropped_name(path, &config.cropped_suffix),
            cropped.bytes,
        ));
    }

    let paths = commit_outputs(&out_dir, &files)?;
    for (out_path, pages) in paths.iter().zip(page_counts) {
        eprintln!("Cropped {} page(s) -> {}", pages, out_path.display());
    }

    Ok(())
}
