use std::sync::LazyLock;

use regex::Regex;

use super::{clean_token, SKU_TOKEN};

/// Row-number-prefixed form: `<n> <sku> |`
static STRICT_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^\s*\d+\s+({SKU_TOKEN})\s*\|")).expect("strict row regex")
});

/// Any token directly before a pipe.
static RELAXED_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b({SKU_TOKEN})\s*\|")).expect("relaxed token regex")
});

/// Find a single SKU on a page whose item table could not be parsed.
///
/// First looks for a row-number-prefixed `<n> <sku> |` line anywhere on the
/// page. Failing that, takes the longest token that sits directly before a
/// pipe on any line; ties go to the earliest. A bare `ID` (a leftover of the
/// "SKU ID |" header) is never returned.
pub fn extract_fallback_sku(lines: &[String]) -> Option<String> {
    strict_match(lines).or_else(|| longest_relaxed_match(lines))
}

fn strict_match(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .filter_map(|l| STRICT_ROW.captures(l))
        .map(|caps| clean_token(&caps[1]))
        .find(|tok| !is_header_fragment(tok))
}

fn longest_relaxed_match(lines: &[String]) -> Option<String> {
    let mut best: Option<String> = None;

    for line in lines {
        for caps in RELAXED_TOKEN.captures_iter(line) {
            let tok = clean_token(&caps[1]);
            if is_header_fragment(&tok) {
                continue;
            }
            if best.as_ref().map_or(true, |b| tok.len() > b.len()) {
                best = Some(tok);
            }
        }
    }

    best
}

fn is_header_fragment(tok: &str) -> bool {
    tok.eq_ignore_ascii_case("ID")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_strict_row_wins() {
        let page = lines(&["Sold by | ACME RETAIL PRIVATE LIMITED", "3 BAG-TOTE-01 | Tote bag"]);
        assert_eq!(extract_fallback_sku(&page).as_deref(), Some("BAG-TOTE-01"));
    }

    #[test]
    fn test_strict_skips_id_fragment() {
        let page = lines(&["1 ID | Description", "2 REAL-SKU | thing"]);
        assert_eq!(extract_fallback_sku(&page).as_deref(), Some("REAL-SKU"));
    }

    #[test]
    fn test_relaxed_longest_wins() {
        let page = lines(&["AB | something", "ABCDEF | something else"]);
        assert_eq!(extract_fallback_sku(&page).as_deref(), Some("ABCDEF"));
    }

    #[test]
    fn test_relaxed_tie_goes_to_first() {
        let page = lines(&["XY12 | a", "ZW34 | b"]);
        assert_eq!(extract_fallback_sku(&page).as_deref(), Some("XY12"));
    }

    #[test]
    fn test_relaxed_excludes_id() {
        let page = lines(&["SKU ID Description", "id | x"]);
        assert_eq!(extract_fallback_sku(&page), None);
    }

    #[test]
    fn test_nothing_before_pipe() {
        let page = lines(&["Ship to Mumbai", "| orphan pipe"]);
        assert_eq!(extract_fallback_sku(&page), None);
        assert_eq!(extract_fallback_sku(&[]), None);
    }
}
