//! Client-side form validation.
//!
//! Every auth form validates locally before any network call. Each function
//! returns a [`FormErrors`] map keyed by field name; an empty map means the
//! form may be submitted.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Field name -> human-readable error message.
pub type FormErrors = BTreeMap<&'static str, String>;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.+-]+@[\w.-]+\.[A-Za-z]{2,}$").unwrap());

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z ]{3,30}$").unwrap());

static CONTACT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

static LICENSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9/-]{5,20}$").unwrap());

static OTP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6}$").unwrap());

pub const MIN_PASSWORD_LEN: usize = 6;

fn check_email(errors: &mut FormErrors, email: &str) {
    if email.is_empty() {
        errors.insert("email", "Email is required".to_string());
    } else if !EMAIL_RE.is_match(email) {
        errors.insert("email", "Enter a valid email address".to_string());
    }
}

fn check_password(errors: &mut FormErrors, field: &'static str, password: &str) {
    if password.is_empty() {
        errors.insert(field, "Password is required".to_string());
    } else if password.len() < MIN_PASSWORD_LEN {
        errors.insert(
            field,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
}

/// Validates the login form.
pub fn validate_login(email: &str, password: &str) -> FormErrors {
    let mut errors = FormErrors::new();
    check_email(&mut errors, email);
    check_password(&mut errors, "password", password);
    errors
}

/// Validates signup step 1 (account credentials).
///
/// The confirm field is checked independently of the password field, so a
/// too-short password and a mismatched confirmation both surface at once.
pub fn validate_signup_step1(email: &str, password: &str, confirm: &str) -> FormErrors {
    let mut errors = FormErrors::new();
    check_email(&mut errors, email);
    check_password(&mut errors, "password", password);
    if confirm.is_empty() {
        errors.insert("confirm", "Confirm your password".to_string());
    } else if confirm != password {
        errors.insert("confirm", "Passwords do not match".to_string());
    }
    errors
}

/// Validates signup step 2 (doctor profile).
pub fn validate_signup_step2(
    name: &str,
    specialty: &str,
    contact_number: &str,
    hospital: &str,
    license_number: &str,
) -> FormErrors {
    let mut errors = FormErrors::new();
    if name.is_empty() {
        errors.insert("name", "Name is required".to_string());
    } else if !NAME_RE.is_match(name) {
        errors.insert(
            "name",
            "Name must be 3-30 letters and spaces".to_string(),
        );
    }
    if specialty.is_empty() {
        errors.insert("specialty", "Specialty is required".to_string());
    }
    if contact_number.is_empty() {
        errors.insert("contact_number", "Contact number is required".to_string());
    } else if !CONTACT_RE.is_match(contact_number) {
        errors.insert(
            "contact_number",
            "Contact number must be exactly 10 digits".to_string(),
        );
    }
    if hospital.is_empty() {
        errors.insert("hospital", "Hospital is required".to_string());
    }
    // License is optional, but when given it must look like one.
    if !license_number.is_empty() && !LICENSE_RE.is_match(license_number) {
        errors.insert(
            "license_number",
            "License must be 5-20 uppercase letters, digits, - or /".to_string(),
        );
    }
    errors
}

/// Validates the forgot-password form.
pub fn validate_forgot_password(email: &str) -> FormErrors {
    let mut errors = FormErrors::new();
    check_email(&mut errors, email);
    errors
}

/// Validates the create-new-password form.
pub fn validate_new_password(password: &str, confirm: &str) -> FormErrors {
    let mut errors = FormErrors::new();
    check_password(&mut errors, "password", password);
    if confirm.is_empty() {
        errors.insert("confirm", "Confirm your password".to_string());
    } else if confirm != password {
        errors.insert("confirm", "Passwords do not match".to_string());
    }
    errors
}

/// Validates a one-time passcode (6 digits).
pub fn validate_otp(otp: &str) -> FormErrors {
    let mut errors = FormErrors::new();
    if !OTP_RE.is_match(otp) {
        errors.insert("otp", "Enter the 6-digit code".to_string());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_valid_input_passes() {
        assert!(validate_login("doc@example.com", "hunter22").is_empty());
    }

    #[test]
    fn test_login_rejects_bad_email() {
        for email in ["", "nope", "a@b", "a b@example.com", "a@example."] {
            let errors = validate_login(email, "hunter22");
            assert!(errors.contains_key("email"), "accepted {email:?}");
        }
    }

    #[test]
    fn test_login_accepts_plus_and_dots_in_email() {
        assert!(validate_login("first.last+tag@sub.example.co", "hunter22").is_empty());
    }

    #[test]
    fn test_login_rejects_short_password() {
        let errors = validate_login("doc@example.com", "abc12");
        assert!(errors.contains_key("password"));
        assert!(validate_login("doc@example.com", "abc123").is_empty());
    }

    #[test]
    fn test_step1_reports_all_errors_at_once() {
        let errors = validate_signup_step1("bad", "abc", "xyz");
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password"));
        assert!(errors.contains_key("confirm"));
    }

    #[test]
    fn test_step1_confirm_checked_independently() {
        // Password too short but confirm matches it: only the password errors.
        let errors = validate_signup_step1("doc@example.com", "abc", "abc");
        assert!(errors.contains_key("password"));
        assert!(!errors.contains_key("confirm"));
    }

    #[test]
    fn test_step1_mismatch() {
        let errors = validate_signup_step1("doc@example.com", "hunter22", "hunter23");
        assert_eq!(
            errors.get("confirm").map(String::as_str),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_step2_valid_profile() {
        assert!(
            validate_signup_step2("Jane Doe", "Cardiology", "9876543210", "City Hospital", "")
                .is_empty()
        );
    }

    #[test]
    fn test_step2_name_rules() {
        let errors = validate_signup_step2("Jo", "Cardiology", "9876543210", "City Hospital", "");
        assert!(errors.contains_key("name"));
        let errors =
            validate_signup_step2("Jane42", "Cardiology", "9876543210", "City Hospital", "");
        assert!(errors.contains_key("name"));
    }

    #[test]
    fn test_step2_contact_must_be_ten_digits() {
        for contact in ["123456789", "12345678901", "98765abc10", ""] {
            let errors =
                validate_signup_step2("Jane Doe", "Cardiology", contact, "City Hospital", "");
            assert!(errors.contains_key("contact_number"), "accepted {contact:?}");
        }
    }

    #[test]
    fn test_step2_license_optional_but_validated() {
        assert!(
            validate_signup_step2("Jane Doe", "Cardiology", "9876543210", "City Hospital", "")
                .is_empty()
        );
        assert!(validate_signup_step2(
            "Jane Doe",
            "Cardiology",
            "9876543210",
            "City Hospital",
            "MH/2020-1234"
        )
        .is_empty());
        let errors = validate_signup_step2(
            "Jane Doe",
            "Cardiology",
            "9876543210",
            "City Hospital",
            "mh1234",
        );
        assert!(errors.contains_key("license_number"));
    }

    #[test]
    fn test_new_password_mismatch_and_length() {
        let errors = validate_new_password("abc", "abcd");
        assert!(errors.contains_key("password"));
        assert!(errors.contains_key("confirm"));
        assert!(validate_new_password("hunter22", "hunter22").is_empty());
    }

    #[test]
    fn test_otp_exactly_six_digits() {
        assert!(validate_otp("123456").is_empty());
        for otp in ["12345", "1234567", "12345a", ""] {
            assert!(!validate_otp(otp).is_empty(), "accepted {otp:?}");
        }
    }
}
