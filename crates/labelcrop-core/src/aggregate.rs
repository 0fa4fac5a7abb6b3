use std::collections::BTreeMap;

use crate::model::{is_placeholder, OrderLineItem, PageRecord, SummaryReport, SummaryRow};

/// Running totals for one processing job.
///
/// Owned by the thread that folds page results; pages are processed in
/// parallel elsewhere and handed over here one at a time.
#[derive(Debug, Default)]
pub struct Aggregator {
    counts: BTreeMap<String, usize>,
    order_items: Vec<OrderLineItem>,
    pages: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every SKU occurrence on the page and record its line items.
    pub fn fold(&mut self, record: &PageRecord) {
        for sku in &record.skus {
            *self.counts.entry(sku.clone()).or_insert(0) += 1;
        }
        self.order_items.extend(record.line_items());
        self.pages += 1;
    }

    pub fn finish(self) -> (SummaryReport, Vec<OrderLineItem>) {
        let summary = SummaryReport {
            rows: sort_summary(self.counts),
            total_pages: self.pages,
        };
        (summary, self.order_items)
    }
}

/// Order SKU totals for reporting: real SKUs first, placeholders last, each
/// group lexicographic. Serial numbers follow the final order.
pub fn sort_summary<I>(counts: I) -> Vec<SummaryRow>
where
    I: IntoIterator<Item = (String, usize)>,
{
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| (is_placeholder(a), a).cmp(&(is_placeholder(b), b)));

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (sku, qty))| SummaryRow {
            serial: i + 1,
            sku,
            qty,
        })
        .collect()
}
