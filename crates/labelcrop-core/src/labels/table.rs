use std::sync::LazyLock;

use regex::Regex;

use super::{clean_token, SKU_TOKEN};

static TABLE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bSKU\s*ID\b\s*\|\s*Description").expect("table header regex")
});

static TABLE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bAWB No\.|\bUse Transparent Packaging\b|\bNot for resale\b|\bPrinted at\b",
    )
    .expect("table terminator regex")
});

/// `<row number> <sku> | <description>`
static ITEM_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^\s*(\d+)\s+({SKU_TOKEN})\s*\|\s*(.+?)\s*$"))
        .expect("item row regex")
});

/// Detect the "SKU ID | Description" header of the item table.
pub fn is_table_header(line: &str) -> bool {
    TABLE_HEADER.is_match(line)
}

/// Detect the footer phrases that close the item table.
pub fn is_table_end(line: &str) -> bool {
    TABLE_END.is_match(line)
}

/// Parse one item row, returning its SKU.
pub fn parse_item_row(line: &str) -> Option<String> {
    ITEM_ROW.captures(line).map(|caps| clean_token(&caps[2]))
}

/// Extract every SKU of the page's item table, one per row, in order.
///
/// The table starts after the header line (or at the top of the page when no
/// header is present) and stops at the first terminator line. Lines in
/// between that are not item rows are ignored.
pub fn extract_table_skus(lines: &[String]) -> Vec<String> {
    let start = lines
        .iter()
        .position(|l| is_table_header(l))
        .map(|i| i + 1)
        .unwrap_or(0);

    lines[start..]
        .iter()
        .take_while(|l| !is_table_end(l))
        .filter_map(|l| parse_item_row(l))
        .collect()
}
