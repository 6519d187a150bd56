//! Field-format checks and the error-report type shared by every step
//! predicate. Failures here are never fatal: they block advancement until the
//! applicant corrects the input.

use serde::Serialize;

/// Inline error attached to a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Collected outcome of one step's validation predicate: field-level errors
/// render inline, form-level errors render as a transient banner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub field_errors: Vec<FieldError>,
    pub form_errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty() && self.form_errors.is_empty()
    }

    pub fn field(&mut self, field: &'static str, message: impl Into<String>) {
        self.field_errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn form(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }
}

/// Ten digits, leading digit 6-9.
pub fn valid_mobile(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && matches!(bytes[0], b'6'..=b'9')
        && bytes.iter().all(u8::is_ascii_digit)
}

/// Five uppercase letters, four digits, one uppercase letter.
pub fn valid_pan(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[..5].iter().all(u8::is_ascii_uppercase)
        && bytes[5..9].iter().all(u8::is_ascii_digit)
        && bytes[9].is_ascii_uppercase()
}

/// Twelve digits; embedded spaces are tolerated and stripped.
pub fn valid_aadhaar(value: &str) -> bool {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    digits.len() == 12 && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Local part, one `@`, and a dotted domain; no whitespace anywhere.
pub fn valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    matches!(domain.rfind('.'), Some(dot) if dot > 0 && dot + 1 < domain.len())
}

/// Six digits.
pub fn valid_pin_code(value: &str) -> bool {
    value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Fifteen-character GSTIN: state code, PAN, entity digit, the literal `Z`,
/// and a check character.
pub fn valid_gstin(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 15
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[2..7].iter().all(u8::is_ascii_uppercase)
        && bytes[7..11].iter().all(u8::is_ascii_digit)
        && bytes[11].is_ascii_uppercase()
        && (bytes[12].is_ascii_uppercase() || matches!(bytes[12], b'1'..=b'9'))
        && bytes[13] == b'Z'
        && (bytes[14].is_ascii_uppercase() || bytes[14].is_ascii_digit())
}

/// Four uppercase letters, a zero, six uppercase alphanumerics.
pub fn valid_ifsc(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 11
        && bytes[..4].iter().all(u8::is_ascii_uppercase)
        && bytes[4] == b'0'
        && bytes[5..]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_requires_ten_digits_with_valid_prefix() {
        assert!(valid_mobile("9876543210"));
        assert!(valid_mobile("6000000000"));
        assert!(!valid_mobile("5876543210"));
        assert!(!valid_mobile("98765432"));
        assert!(!valid_mobile("98765432101"));
        assert!(!valid_mobile("98765o3210"));
    }

    #[test]
    fn pan_matches_five_four_one_shape() {
        assert!(valid_pan("ABCDE1234F"));
        assert!(!valid_pan("ABCDE12345"));
        assert!(!valid_pan("abcde1234f"));
        assert!(!valid_pan("ABCD1234EF"));
        assert!(!valid_pan("ABCDE1234FX"));
    }

    #[test]
    fn aadhaar_ignores_spaces() {
        assert!(valid_aadhaar("123456789012"));
        assert!(valid_aadhaar("1234 5678 9012"));
        assert!(!valid_aadhaar("12345678901"));
        assert!(!valid_aadhaar("12345678901x"));
    }

    #[test]
    fn email_needs_local_at_dotted_domain() {
        assert!(valid_email("applicant@example.com"));
        assert!(valid_email("a.b@mail.co.in"));
        assert!(!valid_email("applicant@example"));
        assert!(!valid_email("@example.com"));
        assert!(!valid_email("a b@example.com"));
        assert!(!valid_email("applicant@.com"));
        assert!(!valid_email("applicant@example."));
    }

    #[test]
    fn pin_code_is_six_digits() {
        assert!(valid_pin_code("400001"));
        assert!(!valid_pin_code("4000"));
        assert!(!valid_pin_code("40000a"));
    }

    #[test]
    fn gstin_matches_registration_shape() {
        assert!(valid_gstin("22AAAAA0000A1Z5"));
        assert!(valid_gstin("07ABCDE1234F2ZQ"));
        assert!(!valid_gstin("22AAAAA0000A1X5"));
        assert!(!valid_gstin("22AAAAA0000A0Z5"));
        assert!(!valid_gstin("22AAAAA0000A1Z"));
    }

    #[test]
    fn ifsc_requires_bank_branch_shape() {
        assert!(valid_ifsc("TJSB0000123"));
        assert!(valid_ifsc("HDFC0A1B2C3"));
        assert!(!valid_ifsc("TJSB1000123"));
        assert!(!valid_ifsc("TJ0B0000123"));
        assert!(!valid_ifsc("TJSB000012"));
    }

    #[test]
    fn report_tracks_field_and_form_errors() {
        let mut report = ValidationReport::default();
        assert!(report.is_valid());
        report.field("mobile", "Please enter a valid 10-digit mobile number");
        report.form("Please agree to the Terms & Conditions and Privacy Policy");
        assert!(!report.is_valid());
        assert_eq!(report.field_errors.len(), 1);
        assert_eq!(report.form_errors.len(), 1);
    }
}
