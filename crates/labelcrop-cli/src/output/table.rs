use labelcrop_core::model::{PageRecord, SummaryReport};
use std::fmt::Write;

/// SKU summary as an aligned text table, headed by the label count.
pub fn format_summary(summary: &SummaryReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Labels: {}\n", summary.total_pages);

    if summary.rows.is_empty() {
        let _ = writeln!(out, "  (no SKUs)");
        return out;
    }

    let sku_width = summary
        .rows
        .iter()
        .map(|r| r.sku.len())
        .max()
        .unwrap_or(3)
        .max(3);

    let _ = writeln!(out, "  {:>6}  {:<sku_width$}  {:>5}", "Sr. No", "SKU", "Qty");
    let _ = writeln!(out, "  {}", "-".repeat(6 + 2 + sku_width + 2 + 5));
    for row in &summary.rows {
        let _ = writeln!(
            out,
            "  {:>6}  {:<sku_width$}  {:>5}",
            row.serial, row.sku, row.qty
        );
    }
    let _ = writeln!(out, "  {}", "-".repeat(6 + 2 + sku_width + 2 + 5));
    let _ = writeln!(
        out,
        "  {:>6}  {:<sku_width$}  {:>5}",
        "",
        "Total",
        summary.total_units()
    );

    out
}

/// One block per page: SKUs and order metadata.
pub fn format_pages(pages: &[PageRecord]) -> String {
    let mut out = String::new();

    for page in pages {
        let marker = if page.is_placeholder() { " (?)" } else { "" };
        let _ = writeln!(out, "Page {}{}", page.page_index + 1, marker);
        let _ = writeln!(
            out,
            "  Order ID:   {}",
            page.order_id.as_deref().unwrap_or("-")
        );
        let _ = writeln!(
            out,
            "  Order Date: {}",
            page.order_date.as_deref().unwrap_or("-")
        );
        for sku in &page.skus {
            let _ = writeln!(out, "    {}", sku);
        }
    }

    out
}
