/// Maximum digits in a Brazilian phone number (2 area + 9 subscriber)
pub const MAX_PHONE_DIGITS: usize = 11;

/// Progressive phone mask: `(11`, `(11) 9876`, `(11) 98765-4321`
pub fn mask_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(MAX_PHONE_DIGITS).collect();
    let len = digits.len();

    if len >= 7 {
        format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..])
    } else if len >= 2 {
        format!("({}) {}", &digits[..2], &digits[2..])
    } else if len > 0 {
        format!("({}", digits)
    } else {
        String::new()
    }
}

/// Digits of a phone field, ignoring the mask characters
pub fn phone_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
