use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::config::LabelConfig;
use crate::error::LabelError;
use crate::model::{JobOutput, OrderLineItem, SummaryReport};

pub const SKU_HEADER: [&str; 3] = ["Sr. No", "SKU", "Qty"];
pub const ORDER_HEADER: [&str; 5] = ["Sr. No", "Order ID", "Order Date", "SKU", "Qty"];

/// A file destined for the output folder, held in memory until commit.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl OutputFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        OutputFile {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Summary table rows, header first.
pub fn sku_rows(summary: &SummaryReport) -> Vec<Vec<String>> {
    let mut rows = vec![header(&SKU_HEADER)];
    rows.extend(
        summary
            .rows
            .iter()
            .map(|r| vec![r.serial.to_string(), r.sku.clone(), r.qty.to_string()]),
    );
    rows
}

/// Order line-item rows, header first, numbered from 1.
pub fn order_rows(items: &[OrderLineItem]) -> Vec<Vec<String>> {
    let mut rows = vec![header(&ORDER_HEADER)];
    rows.extend(items.iter().enumerate().map(|(i, it)| {
        vec![
            (i + 1).to_string(),
            it.order_id.clone(),
            it.order_date.clone(),
            it.sku.clone(),
            it.qty.to_string(),
        ]
    }));
    rows
}

fn header(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

pub fn csv_escape(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') || text.contains('\r') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Render rows as CSV with `\r\n` line endings.
pub fn to_csv(rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row.iter().map(|f| csv_escape(f)).collect();
        out.push_str(&line.join(","));
        out.push_str("\r\n");
    }
    out
}

/// Fail early if `dir` is missing or read-only.
pub fn ensure_writable_dir(dir: &Path) -> Result<(), LabelError> {
    let fail = |reason: String| LabelError::OutputDir {
        path: dir.to_path_buf(),
        reason,
    };

    if !dir.is_dir() {
        return Err(fail("folder does not exist".into()));
    }

    let probe = dir.join("~write_test.tmp");
    std::fs::write(&probe, b"ok").map_err(|e| fail(e.to_string()))?;
    std::fs::remove_file(&probe).map_err(|e| fail(e.to_string()))?;
    Ok(())
}

/// `dir/name` if free, else `dir/stem_1.ext`, `dir/stem_2.ext`, ...
pub fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let base = Path::new(name);
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    let ext = base
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|i| dir.join(format!("{stem}_{i}{ext}")))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

/// The SKU summary and order CSVs for a job, named per `config`.
pub fn csv_files(output: &JobOutput, config: &LabelConfig) -> [OutputFile; 2] {
    [
        OutputFile::new(
            config.sku_csv_name.as_str(),
            to_csv(&sku_rows(&output.summary)),
        ),
        OutputFile::new(
            config.orders_csv_name.as_str(),
            to_csv(&order_rows(&output.order_items)),
        ),
    ]
}

/// Write a batch of files into `dir`, all or nothing.
///
/// Every file is first written to a temp file inside `dir`. Only when all of
/// them are on disk are they renamed to their final, non-clobbering names. If
/// any step fails, the temp files and any already renamed files are removed.
/// Returned paths follow the order of `files`.
pub fn commit_outputs(dir: &Path, files: &[OutputFile]) -> Result<Vec<PathBuf>, LabelError> {
    ensure_writable_dir(dir)?;

    let mut staged = Vec::with_capacity(files.len());
    for file in files {
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&file.bytes)?;
        tmp.flush()?;
        staged.push((file, tmp));
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(files.len());
    for (file, tmp) in staged {
        let target = unique_path(dir, &file.name);
        if let Err(e) = tmp.persist_noclobber(&target) {
            rollback(&written);
            return Err(LabelError::Io(e.error));
        }
        written.push(target);
    }

    info!(files = written.len(), dir = %dir.display(), "wrote outputs");
    Ok(written)
}

fn rollback(written: &[PathBuf]) {
    for path in written {
        if let Err(e) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "could not remove partial output");
        }
    }
}
