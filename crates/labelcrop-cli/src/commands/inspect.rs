use labelcrop_core::error::LabelError;
use std::path::PathBuf;

use super::{extractor, job_config, read_inputs};
use crate::output;
use crate::Backend;

pub fn run(
    input_file: PathBuf,
    config_file: Option<PathBuf>,
    workers: Option<usize>,
    backend: Backend,
    output_format: &str,
) -> Result<(), LabelError> {
    let config = job_config(config_file.as_deref(), workers)?;
    let docs = read_inputs(&[input_file])?;
    let extractor = extractor(backend);
    let result = labelcrop_core::process_documents(&docs, extractor.as_ref(), &config)?;

    match output_format {
        "json" => output::json::print(&result.pages)?,
        _ => {
            print!("{}", output::table::format_pages(&result.pages));
            println!();
            print!("{}", output::table::format_summary(&result.summary));
        }
    }

    Ok(())
}
