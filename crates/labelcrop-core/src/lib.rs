pub mod aggregate;
pub mod config;
pub mod crop;
pub mod error;
pub mod export;
pub mod extraction;
pub mod labels;
pub mod model;
pub mod report;

use aggregate::Aggregator;
use config::LabelConfig;
use error::LabelError;
use extraction::PdfExtractor;
use labels::reconcile_page;
use model::{InputDocument, JobOutput, PageRecord};
use rayon::prelude::*;
use tracing::info;

/// Main API entry point: extract and aggregate label data from one or more PDFs.
///
/// Documents are treated as one continuous run of labels, so page indices
/// (and `UNKNOWN_<n>` placeholders) count across all inputs. Pages are read
/// and reconciled on a pool of `config.workers` threads; results are folded
/// in page order on the calling thread.
///
/// Only whole-document failures (unreadable PDF, zero pages, missing
/// extraction backend) are errors. A page that yields no text still produces
/// a record.
pub fn process_documents(
    docs: &[InputDocument],
    extractor: &dyn PdfExtractor,
    config: &LabelConfig,
) -> Result<JobOutput, LabelError> {
    let pool = worker_pool(config.workers)?;
    let mut pages: Vec<PageRecord> = Vec::new();

    for doc in docs {
        let source = extractor.open(&doc.bytes)?;
        let count = source.page_count();
        if count == 0 {
            return Err(LabelError::EmptyDocument {
                name: doc.name.clone(),
            });
        }
        info!(
            document = %doc.name,
            pages = count,
            backend = extractor.backend_name(),
            "extracting labels"
        );

        let offset = pages.len();
        let records: Vec<PageRecord> = pool.install(|| {
            (0..count)
                .into_par_iter()
                .map(|i| reconcile_page(offset + i, &source.page_text(i)))
                .collect()
        });
        pages.extend(records);
    }

    let output = aggregate_pages(pages);
    info!(
        pages = output.summary.total_pages,
        skus = output.summary.rows.len(),
        units = output.summary.total_units(),
        "job complete"
    );
    Ok(output)
}

/// Reconcile already-extracted page texts, numbering pages from `first_index`.
///
/// Entry point for callers that hold page text themselves, such as text
/// dumped by another tool or a test fixture, and have no PDF to open.
/// Pair it with [`aggregate_pages`] to get the same `JobOutput` that
/// [`process_documents`] builds. Records come back in input order regardless
/// of which worker finished first.
pub fn process_pages(
    texts: &[String],
    first_index: usize,
    workers: usize,
) -> Result<Vec<PageRecord>, LabelError> {
    let pool = worker_pool(workers)?;
    Ok(pool.install(|| {
        texts
            .par_iter()
            .enumerate()
            .map(|(i, text)| reconcile_page(first_index + i, text))
            .collect()
    }))
}

/// Fold page records, in page order, into a job result.
pub fn aggregate_pages(pages: Vec<PageRecord>) -> JobOutput {
    let mut aggregator = Aggregator::new();
    for record in &pages {
        aggregator.fold(record);
    }
    let (summary, order_items) = aggregator.finish();
    JobOutput {
        summary,
        order_items,
        pages,
    }
}

fn worker_pool(workers: usize) -> Result<rayon::ThreadPool, LabelError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
        .map_err(|e| LabelError::WorkerPool(e.to_string()))
}
