use tracing::{debug, warn};

use super::fallback::extract_fallback_sku;
use super::normalize::normalized_lines;
use super::order::extract_order_meta;
use super::table::extract_table_skus;
use crate::model::{placeholder_sku, PageRecord};

/// Turn one page's raw text into a `PageRecord`.
///
/// SKUs come from the item table; if the table yields nothing, from the
/// single best fallback token; if that fails too, the page gets the
/// `UNKNOWN_<page_index>` placeholder. Empty text is a normal input.
pub fn reconcile_page(page_index: usize, text: &str) -> PageRecord {
    let lines = normalized_lines(text);

    let mut skus = extract_table_skus(&lines);
    if skus.is_empty() {
        skus = match extract_fallback_sku(&lines) {
            Some(sku) => {
                debug!(page = page_index, %sku, "item table not found, used fallback SKU");
                vec![sku]
            }
            None => {
                warn!(page = page_index, "no SKU found on page, using placeholder");
                vec![placeholder_sku(page_index)]
            }
        };
    }

    let meta = extract_order_meta(&lines);
    debug!(
        page = page_index,
        skus = ?skus,
        order_id = ?meta.order_id,
        order_date = ?meta.order_date,
        "reconciled page"
    );

    PageRecord {
        page_index,
        skus,
        order_id: meta.order_id,
        order_date: meta.order_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: &str = "\
E-Kart Logistics
Standard Delivery
Order ID: OD432198765012
Order Date: 04/10/2024
SKU ID | Description | QTY
1 KURTA-RED-XL | Women Cotton Kurta | 1
2 KURTA-RED-XL | Women Cotton Kurta | 1
3 DUPATTA-01 | Chiffon dupatta | 1
AWB No. FMPC1234567890
Not for resale
";

    #[test]
    fn test_full_label() {
        let rec = reconcile_page(0, LABEL);
        assert_eq!(rec.skus, vec!["KURTA-RED-XL", "KURTA-RED-XL", "DUPATTA-01"]);
        assert_eq!(rec.order_id.as_deref(), Some("OD432198765012"));
        assert_eq!(rec.order_date.as_deref(), Some("04/10/2024"));
    }

    #[test]
    fn test_unrecognizable_page_gets_placeholder() {
        let rec = reconcile_page(7, "just some words\nnothing useful");
        assert_eq!(rec.skus, vec!["UNKNOWN_7"]);
        assert_eq!(rec.order_id, None);
        assert!(rec.is_placeholder());
    }

    #[test]
    fn test_empty_text_gets_placeholder() {
        let rec = reconcile_page(0, "");
        assert_eq!(rec.skus, vec!["UNKNOWN_0"]);
        assert_eq!(rec.order_date, None);
    }

    #[test]
    fn test_fallback_single_sku() {
        let rec = reconcile_page(2, "Item\nAB | x\nLONGSKU-42 | Blue mug\n");
        assert_eq!(rec.skus, vec!["LONGSKU-42"]);
    }
}
