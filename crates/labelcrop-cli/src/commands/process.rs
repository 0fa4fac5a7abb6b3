use labelcrop_core::crop::crop_pdf;
use labelcrop_core::error::LabelError;
use labelcrop_core::export::{commit_outputs, csv_files, ensure_writable_dir, OutputFile};
use labelcrop_core::report::append_summary;
use std::path::PathBuf;

use super::{cropped_name, extractor, job_config, read_inputs};
use crate::output;
use crate::Backend;

pub fn run(
    input_files: Vec<PathBuf>,
    out_dir: PathBuf,
    lite: bool,
    config_file: Option<PathBuf>,
    workers: Option<usize>,
    backend: Backend,
    output_format: &str,
) -> Result<(), LabelError> {
    let config = job_config(config_file.as_deref(), workers)?;
    ensure_writable_dir(&out_dir)?;

    let docs = read_inputs(&input_files)?;

    let mut files = Vec::with_capacity(docs.len() + 2);
    let mut page_counts = Vec::with_capacity(docs.len());
    for (path, doc) in input_files.iter().zip(&docs) {
        let cropped = crop_pdf(doc, &config.crop)?;
        page_counts.push(cropped.page_count);
        files.push(OutputFile::new(
            cropped_name(path, &config.cropped_suffix),
            cropped.bytes,
        ));
    }
    let pdf_count = files.len();

    let result = if lite {
        None
    } else {
        let extractor = extractor(backend);
        let result = labelcrop_core::process_documents(&docs, extractor.as_ref(), &config)?;

        // The summary closes the run, after the last document's labels.
        if let Some(last) = files.last_mut() {
            last.bytes = append_summary(&last.bytes, &result.summary)?;
        }
        files.extend(csv_files(&result, &config));
        Some(result)
    };

    // Nothing is written until every file above is built.
    let paths = commit_outputs(&out_dir, &files)?;

    for (out_path, pages) in paths.iter().zip(page_counts) {
        eprintln!("Cropped {} page(s) -> {}", pages, out_path.display());
    }

    let Some(result) = result else {
        return Ok(());
    };

    match output_format {
        "json" => output::json::print(&result)?,
        _ => print!("{}", output::table::format_summary(&result.summary)),
    }

    if let [sku_csv, orders_csv] = &paths[pdf_count..] {
        eprintln!("SKU summary -> {}", sku_csv.display());
        eprintln!("Order list  -> {}", orders_csv.display());
    }
    if let Some(last) = paths[..pdf_count].last() {
        eprintln!("Summary page(s) appended to {}", last.display());
    }
    let unknown = result.pages.iter().filter(|p| p.is_placeholder()).count();
    if unknown > 0 {
        eprintln!("  warning: {unknown} page(s) had no recognizable SKU");
    }

    Ok(())
}
