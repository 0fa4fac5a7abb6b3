pub mod fallback;
pub mod normalize;
pub mod order;
pub mod reconcile;
pub mod table;

pub use normalize::{normalize_line, normalized_lines};
pub use reconcile::reconcile_page;

/// SKU token grammar: alphanumeric at both ends, `._-` and spaces inside.
pub(crate) const SKU_TOKEN: &str = r"[A-Za-z0-9][A-Za-z0-9._\- ]*[A-Za-z0-9]";

/// Trim a captured token and collapse interior runs of spaces.
pub(crate) fn clean_token(raw: &str) -> String {
    raw.split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
