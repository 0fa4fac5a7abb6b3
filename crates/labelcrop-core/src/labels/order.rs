use std::sync::LazyLock;

use regex::Regex;

use crate::model::OrderMeta;

/// Lines inspected below the carrier header, header line included.
const CARRIER_WINDOW: usize = 15;
/// Lines treated as the top of the label for labeled searches.
const TOP_LINES: usize = 25;

static CARRIER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bE[- ]?Kart\b|\bEKart\b").expect("carrier header regex")
});

static ORDER_ID_LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bOrder\s*(ID|#)?\s*[:|\-]?\s*(OD[0-9A-Z\-]{8,20})\b")
        .expect("labeled order id regex")
});

static ORDER_ID_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bOD[0-9A-Z\-]{8,20}\b").expect("bare order id regex"));

static ORDER_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(Order\s*Date|Placed\s*on)\s*[:|\-]?\s*([0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4}|[0-9]{4}[/\-][0-9]{1,2}[/\-][0-9]{1,2})\b",
    )
    .expect("order date regex")
});

/// Locate the order ID and order date on a label page.
pub fn extract_order_meta(lines: &[String]) -> OrderMeta {
    OrderMeta {
        order_id: find_order_id(lines),
        order_date: find_order_date(lines),
    }
}

/// Order ID search, most reliable source first:
/// 1. the block under the carrier header (labeled, then bare, per line)
/// 2. a labeled ID near the top of the page
/// 3. any bare `OD...` token on the page
pub fn find_order_id(lines: &[String]) -> Option<String> {
    if let Some(anchor) = lines.iter().position(|l| CARRIER_HEADER.is_match(l)) {
        let window = &lines[anchor..lines.len().min(anchor + CARRIER_WINDOW)];
        if let Some(id) = window
            .iter()
            .find_map(|l| labeled_order_id(l).or_else(|| bare_order_id(l)))
        {
            return Some(id);
        }
    }

    top(lines)
        .iter()
        .find_map(|l| labeled_order_id(l))
        .or_else(|| lines.iter().find_map(|l| bare_order_id(l)))
}

/// Order date after an "Order Date" / "Placed on" label, top of the page first.
pub fn find_order_date(lines: &[String]) -> Option<String> {
    top(lines)
        .iter()
        .find_map(|l| labeled_order_date(l))
        .or_else(|| lines.iter().find_map(|l| labeled_order_date(l)))
}

fn top(lines: &[String]) -> &[String] {
    &lines[..lines.len().min(TOP_LINES)]
}

fn labeled_order_id(line: &str) -> Option<String> {
    ORDER_ID_LABELED
        .captures(line)
        .map(|caps| caps[2].trim().to_string())
}

fn bare_order_id(line: &str) -> Option<String> {
    ORDER_ID_BARE.find(line).map(|m| m.as_str().trim().to_string())
}

fn labeled_order_date(line: &str) -> Option<String> {
    ORDER_DATE.captures(line).map(|caps| caps[2].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::normalized_lines;

    #[test]
    fn test_labeled_id_under_carrier_header() {
        let lines = normalized_lines("E-Kart Logistics\nStandard Delivery\nOrder ID: OD123456789\n");
        assert_eq!(find_order_id(&lines).as_deref(), Some("OD123456789"));
    }

    #[test]
    fn test_bare_id_without_anchor() {
        let lines = normalized_lines("Ship to: Jane\nRef OD987654321XY handle with care\n");
        assert_eq!(find_order_id(&lines).as_deref(), Some("OD987654321XY"));
    }

    #[test]
    fn test_carrier_window_prefers_first_line_hit() {
        // A bare ID inside the window beats a labeled ID further down.
        let mut text = String::from("EKart\nOD11111111AA\n");
        text.push_str("Order #: OD22222222BB\n");
        let lines = normalized_lines(&text);
        assert_eq!(find_order_id(&lines).as_deref(), Some("OD11111111AA"));
    }

    /// `len` filler lines with the given lines placed at their indices.
    fn page(len: usize, placed: &[(usize, &str)]) -> Vec<String> {
        (0..len)
            .map(|i| {
                placed
                    .iter()
                    .find(|(at, _)| *at == i)
                    .map(|(_, text)| text.to_string())
                    .unwrap_or_else(|| format!("filler line {i}"))
            })
            .collect()
    }

    #[test]
    fn test_bare_id_just_outside_carrier_window() {
        // Window covers lines 0..=14, so the bare ID on line 15 is not in it
        // and the labeled search over the top lines wins.
        let lines = page(
            30,
            &[
                (0, "E-Kart Logistics"),
                (15, "OD11111111AA"),
                (20, "Order ID: OD22222222BB"),
            ],
        );
        assert_eq!(find_order_id(&lines).as_deref(), Some("OD22222222BB"));
    }

    #[test]
    fn test_bare_id_on_last_carrier_window_line() {
        let lines = page(
            30,
            &[
                (0, "E-Kart Logistics"),
                (14, "OD11111111AA"),
                (20, "Order ID: OD22222222BB"),
            ],
        );
        assert_eq!(find_order_id(&lines).as_deref(), Some("OD11111111AA"));
    }

    #[test]
    fn test_labeled_id_past_top_lines_loses_to_bare() {
        // Line 25 is the 26th line, outside the labeled search.
        let lines = page(
            30,
            &[(3, "Ref OD33333333CC"), (25, "Order ID: OD44444444DD")],
        );
        assert_eq!(find_order_id(&lines).as_deref(), Some("OD33333333CC"));
    }

    #[test]
    fn test_labeled_id_on_last_top_line_beats_bare() {
        let lines = page(
            30,
            &[(3, "Ref OD33333333CC"), (24, "Order ID: OD44444444DD")],
        );
        assert_eq!(find_order_id(&lines).as_deref(), Some("OD44444444DD"));
    }

    #[test]
    fn test_bare_scan_covers_whole_page() {
        let mut text = String::from("E Kart Logistics\n");
        for i in 0..30 {
            text.push_str(&format!("filler line {i}\n"));
        }
        text.push_str("Order ID: OD55555555CC\n");
        let lines = normalized_lines(&text);
        assert_eq!(find_order_id(&lines).as_deref(), Some("OD55555555CC"));
    }

    #[test]
    fn test_labeled_beats_bare_outside_window() {
        let text = "Invoice OD00000000ZZ\nOrder ID - OD12345678QQ\n";
        let lines = normalized_lines(text);
        assert_eq!(find_order_id(&lines).as_deref(), Some("OD12345678QQ"));
    }

    #[test]
    fn test_short_od_token_ignored() {
        let lines = normalized_lines("ODD1234 and OD12\n");
        assert_eq!(find_order_id(&lines), None);
    }

    #[test]
    fn test_order_date_forms() {
        let lines = normalized_lines("Order Date: 05/11/2024\n");
        assert_eq!(find_order_date(&lines).as_deref(), Some("05/11/2024"));

        let lines = normalized_lines("Placed on 2024-11-05\n");
        assert_eq!(find_order_date(&lines).as_deref(), Some("2024-11-05"));

        let lines = normalized_lines("Dispatched 05/11/2024\n");
        assert_eq!(find_order_date(&lines), None);
    }

    #[test]
    fn test_order_date_beyond_top_lines() {
        let mut text = String::new();
        for i in 0..30 {
            text.push_str(&format!("line {i}\n"));
        }
        text.push_str("ORDER DATE | 1-2-24\n");
        let lines = normalized_lines(&text);
        assert_eq!(find_order_date(&lines).as_deref(), Some("1-2-24"));
    }

    #[test]
    fn test_extract_order_meta_empty() {
        assert_eq!(extract_order_meta(&[]), OrderMeta::default());
    }
}
