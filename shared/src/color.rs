/// Preview colour when the input is empty
pub const DEFAULT_COLOR: &str = "#3B82F6";

/// `#RRGGBB` check, case-insensitive
pub fn is_hex_color(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit)
}

/// Colour shown in the preview swatch
pub fn preview_color(input_value: &str) -> &str {
    let value = input_value.trim();
    if value.is_empty() {
        DEFAULT_COLOR
    } else {
        value
    }
}

/// Upper-cased code shown next to the swatch
pub fn display_code(input_value: &str) -> String {
    preview_color(input_value).to_ascii_uppercase()
}

/// Whether a palette entry represents the current input colour
pub fn is_active_swatch(swatch: &str, current: &str) -> bool {
    swatch.eq_ignore_ascii_case(preview_color(current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#10b981"));
        assert!(is_hex_color("#FFFFFF"));
        assert!(!is_hex_color("10B981"));
        assert!(!is_hex_color("#10B98"));
        assert!(!is_hex_color("#10B98G"));
    }

    #[test]
    fn test_preview_and_active_swatch() {
        assert_eq!(preview_color(""), DEFAULT_COLOR);
        assert_eq!(display_code("#ef4444"), "#EF4444");
        assert!(is_active_swatch("#EF4444", "#ef4444"));
        assert!(is_active_swatch("#3b82f6", ""));
        assert!(!is_active_swatch("#EF4444", "#10B981"));
    }
}
