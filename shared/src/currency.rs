//! Brazilian real formatting: `1.234,56` (dot groups thousands, comma
//! separates the two decimals).

/// Format with two decimals and thousands separators, without the `R$` symbol
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return "0,00".to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (integer, decimals) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{},{}", sign, group_thousands(integer), decimals)
}

/// `R$ 1.234,56`, optionally prefixed (e.g. `+ ` or `- ` on transaction lists)
pub fn display_brl(value: f64, prefix: &str) -> String {
    format!("{}R$ {}", prefix, format_brl(value))
}

/// Read a masked value back. Empty or unreadable input is 0.
pub fn parse_brl(masked: &str) -> f64 {
    let cleaned = masked.replace('.', "").replacen(',', ".", 1);
    parse_leading_float(&cleaned).unwrap_or(0.0)
}

/// Parse the longest numeric prefix of `raw`, like a lenient browser parse:
/// `"12.5abc"` is 12.5, `"abc"` is `None`.
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (index, ch) in trimmed.char_indices() {
        match ch {
            '+' | '-' if index == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = index + ch.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    trimmed[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Live mask applied on every keystroke.
///
/// Keeps digits and a single comma, at most two decimal digits, and groups
/// the integer digits by thousands.
pub fn mask_input(raw: &str) -> String {
    let kept: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == ',').collect();

    let parts: Vec<&str> = kept.split(',').collect();
    let mut value = if parts.len() > 2 {
        format!("{},{}", parts[0], parts[1..].concat())
    } else {
        kept.clone()
    };
    if let Some(decimals) = parts.get(1) {
        if decimals.len() > 2 {
            value = format!("{},{}", parts[0], &decimals[..2]);
        }
    }

    if value.is_empty() {
        return value;
    }
    match value.split_once(',') {
        Some((integer, decimals)) => format!("{},{}", group_thousands(integer), decimals),
        None => group_thousands(&value),
    }
}

/// Caret position after the mask changed the value length
pub fn caret_after_mask(caret: u32, old_value: &str, new_value: &str) -> u32 {
    let old_len = old_value.chars().count() as i64;
    let new_len = new_value.chars().count() as i64;
    let moved = i64::from(caret) + (new_len - old_len);
    moved.clamp(0, new_len) as u32
}

/// Blur formatting: a positive value gets its two decimals back
pub fn format_on_blur(masked: &str) -> Option<String> {
    let value = parse_brl(masked);
    (value > 0.0).then(|| format_brl(value))
}

/// Format a server-rendered plain number (`1234.5`) for the masked input
pub fn format_initial(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    parse_leading_float(raw).map(format_brl)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "0,00");
        assert_eq!(format_brl(1234.56), "1.234,56");
        assert_eq!(format_brl(1_000_000.0), "1.000.000,00");
        assert_eq!(format_brl(999.999), "1.000,00");
        assert_eq!(format_brl(-42.5), "-42,50");
        assert_eq!(format_brl(f64::NAN), "0,00");
        assert_eq!(display_brl(10.0, "+ "), "+ R$ 10,00");
    }

    #[test]
    fn test_parse_brl_degrades_to_zero() {
        assert_eq!(parse_brl("1.234,56"), 1234.56);
        assert_eq!(parse_brl("10"), 10.0);
        assert_eq!(parse_brl(""), 0.0);
        assert_eq!(parse_brl("abc"), 0.0);
        assert_eq!(parse_brl(",5"), 0.5);
    }

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("12.5abc"), Some(12.5));
        assert_eq!(parse_leading_float("  -3"), Some(-3.0));
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("x1"), None);
    }

    #[test]
    fn test_mask_input() {
        assert_eq!(mask_input("1234"), "1.234");
        assert_eq!(mask_input("1234567,8"), "1.234.567,8");
        assert_eq!(mask_input("R$ 12a3,456"), "123,45");
        assert_eq!(mask_input("1,2,3"), "1,23");
        assert_eq!(mask_input("1,234,5"), "1,23");
        assert_eq!(mask_input("abc"), "");
        assert_eq!(mask_input(","), ",");
    }

    #[test]
    fn test_caret_after_mask() {
        // "1234" -> "1.234": caret at end moves one to the right
        assert_eq!(caret_after_mask(4, "1234", "1.234"), 5);
        assert_eq!(caret_after_mask(1, "a1", "1"), 0);
        assert_eq!(caret_after_mask(0, "abc", ""), 0);
    }

    #[test]
    fn test_blur_and_initial_formatting() {
        assert_eq!(format_on_blur("1.234"), Some("1.234,00".to_string()));
        assert_eq!(format_on_blur("0"), None);
        assert_eq!(format_on_blur(""), None);
        assert_eq!(format_initial("1500.5"), Some("1.500,50".to_string()));
        assert_eq!(format_initial(""), None);
        assert_eq!(format_initial("n/a"), None);
    }
}
