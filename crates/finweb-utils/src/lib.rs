//! Utility functions and helpers

/// Format a number with thousands separators
///
/// Works on the textual form so decimal values keep their exact digits:
/// `"-34000.50"` becomes `"-34,000.50"`.
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::new();
    let mut count = 0;
    for c in int_part.chars().rev() {
        if count == 3 {
            grouped.push(',');
            count = 0;
        }
        grouped.push(c);
        count += 1;
    }
    let int_grouped: String = grouped.chars().rev().collect();

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, int_grouped, frac),
        None => format!("{}{}", sign, int_grouped),
    }
}

/// Escape text for safe inclusion in HTML content and attribute values
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Prefix an amount with a currency symbol, e.g. `"₹ 52,000"`
pub fn with_currency<T: ToString>(symbol: &str, amount: T) -> String {
    if symbol.is_empty() {
        format_number(amount)
    } else {
        format!("{} {}", symbol, format_number(amount))
    }
}
