//! Display formatting for repository counts, matching the compact style
//! GitHub uses: 847, 2k, 2.5k, 1.2m.
//!
//! The exact numeric policy is part of the catalog's visible contract, so
//! these stay deterministic and locale-independent.

/// Format a count in compact style.
///
/// Exact thousands render without a decimal place (`2k`), everything else
/// at that scale with one (`2.5k`); same rule at the millions scale with an
/// `m` suffix. Values below 1000 render as-is. NaN and non-finite inputs
/// render as `0`.
pub fn format_compact_count(n: f64) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }

    if n >= 1_000_000.0 {
        let millions = n / 1_000_000.0;
        if millions.fract() == 0.0 {
            format!("{:.0}m", millions)
        } else {
            format!("{:.1}m", millions)
        }
    } else if n >= 1000.0 {
        let thousands = n / 1000.0;
        if thousands.fract() == 0.0 {
            format!("{:.0}k", thousands)
        } else {
            format!("{:.1}k", thousands)
        }
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// Format a count with a trailing unit, e.g. `2.5k stars`.
pub fn format_count_with_unit(n: f64, unit: &str) -> String {
    format!("{} {}", format_compact_count(n), unit)
}

/// Parse a compact count back into an integer.
///
/// Strips thousands separators, multiplies by 1e6/1e3 for a trailing
/// `m`/`k` (case-insensitive) and floors. Without a suffix the leading
/// integer part is taken. Unparsable input yields 0.
pub fn parse_compact_count(text: &str) -> i64 {
    let clean = text.trim().to_lowercase().replace(',', "");

    if let Some(pos) = clean.find('m') {
        (leading_number(&clean[..pos]) * 1_000_000.0).floor() as i64
    } else if let Some(pos) = clean.find('k') {
        (leading_number(&clean[..pos]) * 1000.0).floor() as i64
    } else {
        leading_number(&clean).trunc() as i64
    }
}

/// Longest leading decimal number of `s`, or 0.0 when there is none.
fn leading_number(s: &str) -> f64 {
    let s = s.trim();
    let mut end = 0;
    let mut seen_dot = false;

    for (i, c) in s.char_indices() {
        match c {
            '-' | '+' if i == 0 => end = i + 1,
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    s[..end].parse().unwrap_or(0.0)
}
