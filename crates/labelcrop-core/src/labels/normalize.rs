/// Canonicalize a raw extracted text line.
///
/// Steps:
/// 1. Drop zero-width spaces and byte-order marks
/// 2. Map broken-bar / box-drawing separators to `|`
/// 3. Map en and em dashes to `-`
/// 4. Map non-breaking spaces to plain spaces
/// 5. Collapse runs of spaces and tabs to a single space
/// 6. Trim
pub fn normalize_line(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars() {
        let c = match c {
            '\u{200B}' | '\u{FEFF}' => continue,
            '\u{00A6}' | '\u{2502}' | '\u{FFE4}' => '|',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{00A0}' => ' ',
            other => other,
        };

        if c == ' ' || c == '\t' {
            pending_space = true;
            continue;
        }

        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    // Other whitespace (e.g. U+3000) is not collapsed, only trimmed.
    out.trim().to_string()
}

/// Split page text into normalized, non-empty lines.
pub fn normalized_lines(text: &str) -> Vec<String> {
    text.split(is_line_break)
        .map(normalize_line)
        .filter(|l| !l.is_empty())
        .collect()
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0B}'
            | '\u{0C}'
            | '\u{1C}'
            | '\u{1D}'
            | '\u{1E}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}
