use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of the SKU synthesized for pages where nothing could be extracted.
pub const PLACEHOLDER_PREFIX: &str = "UNKNOWN_";

/// Placeholder SKU for a page with no recognizable item.
pub fn placeholder_sku(page_index: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{page_index}")
}

pub fn is_placeholder(sku: &str) -> bool {
    sku.starts_with(PLACEHOLDER_PREFIX)
}

/// Order metadata found on a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMeta {
    pub order_id: Option<String>,
    pub order_date: Option<String>,
}

/// Everything extracted from one label page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub page_index: usize,
    /// One entry per item row, in table order. Never empty.
    pub skus: Vec<String>,
    pub order_id: Option<String>,
    pub order_date: Option<String>,
}

impl PageRecord {
    /// True if the page fell through to the `UNKNOWN_<n>` placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.skus.len() == 1 && is_placeholder(&self.skus[0])
    }

    /// Tally the page's SKUs into order line items, first-seen order.
    ///
    /// The order date is only carried when an order ID was found; a date on
    /// its own has no order to attach to.
    pub fn line_items(&self) -> Vec<OrderLineItem> {
        let mut tally: Vec<(&str, usize)> = Vec::new();
        for sku in &self.skus {
            match tally.iter_mut().find(|(s, _)| *s == sku.as_str()) {
                Some((_, qty)) => *qty += 1,
                None => tally.push((sku.as_str(), 1)),
            }
        }

        let order_id = self.order_id.clone().unwrap_or_default();
        let order_date = if self.order_id.is_some() {
            self.order_date.clone().unwrap_or_default()
        } else {
            String::new()
        };

        tally
            .into_iter()
            .map(|(sku, qty)| OrderLineItem {
                order_id: order_id.clone(),
                order_date: order_date.clone(),
                sku: sku.to_string(),
                qty,
            })
            .collect()
    }
}

/// One (page, SKU) pair with its quantity on that page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub order_id: String,
    pub order_date: String,
    pub sku: String,
    pub qty: usize,
}

/// Aggregated quantity of one SKU across a whole job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// 1-based position in the sorted summary.
    pub serial: usize,
    pub sku: String,
    pub qty: usize,
}

/// Sorted SKU totals plus the number of label pages processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub rows: Vec<SummaryRow>,
    pub total_pages: usize,
}

impl SummaryReport {
    pub fn total_units(&self) -> usize {
        self.rows.iter().map(|r| r.qty).sum()
    }
}

/// Label region in PDF points (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropBox {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Default for CropBox {
    fn default() -> Self {
        CropBox {
            left: 185.0,
            bottom: 450.0,
            right: 410.0,
            top: 820.0,
        }
    }
}

impl fmt::Display for CropBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.left, self.bottom, self.right, self.top
        )
    }
}

/// One input PDF, named for diagnostics and output file naming.
#[derive(Debug, Clone)]
pub struct InputDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        InputDocument {
            name: name.into(),
            bytes,
        }
    }
}

/// Result of a full processing job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobOutput {
    pub summary: SummaryReport,
    pub order_items: Vec<OrderLineItem>,
    pub pages: Vec<PageRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(skus: &[&str], order_id: Option<&str>, order_date: Option<&str>) -> PageRecord {
        PageRecord {
            page_index: 0,
            skus: skus.iter().map(|s| s.to_string()).collect(),
            order_id: order_id.map(String::from),
            order_date: order_date.map(String::from),
        }
    }

    #[test]
    fn test_line_items_tally_per_sku() {
        let items = record(&["X1", "X1", "Y2"], Some("OD1"), None).line_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].order_id, "OD1");
        assert_eq!(items[0].sku, "X1");
        assert_eq!(items[0].qty, 2);
        assert_eq!(items[1].sku, "Y2");
        assert_eq!(items[1].qty, 1);
    }

    #[test]
    fn test_date_dropped_without_order_id() {
        let items = record(&["X1"], None, Some("12/05/2024")).line_items();
        assert_eq!(items[0].order_id, "");
        assert_eq!(items[0].order_date, "");
    }

    #[test]
    fn test_date_kept_with_order_id() {
        let items = record(&["X1"], Some("OD1"), Some("12/05/2024")).line_items();
        assert_eq!(items[0].order_date, "12/05/2024");
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(record(&["UNKNOWN_3"], None, None).is_placeholder());
        assert!(!record(&["A1"], None, None).is_placeholder());
        assert_eq!(placeholder_sku(7), "UNKNOWN_7");
    }
}
