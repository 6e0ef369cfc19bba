/// Renders an 11-digit phone number as `(XX) XXXXX-XXXX`.
///
/// Non-digit characters are stripped before counting. Input that does not
/// contain exactly 11 digits is returned unchanged, so the helper is safe
/// to call on every keystroke.
#[must_use]
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 11 {
        return input.to_string();
    }
    format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_eleven_digit_number() {
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
    }

    #[test]
    fn strips_existing_punctuation_before_masking() {
        assert_eq!(format_phone("(11) 98765-4321"), "(11) 98765-4321");
        assert_eq!(format_phone("11 98765 4321"), "(11) 98765-4321");
    }

    #[test]
    fn leaves_other_lengths_unchanged() {
        assert_eq!(format_phone("1198765432"), "1198765432"); // 10 digits
        assert_eq!(format_phone("119876543210"), "119876543210"); // 12 digits
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("abc"), "abc");
    }
}
