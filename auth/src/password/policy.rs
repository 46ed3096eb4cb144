use regex::Regex;

use super::errors::PolicyError;

/// Password strength policy checked at registration time.
///
/// A password is acceptable when it is at least 8 characters of ASCII
/// letters and digits, with at least one letter and at least one digit.
/// No upper bound, no special-character requirement.
pub struct PasswordPolicy;

impl PasswordPolicy {
    /// Validate a candidate password against the policy.
    ///
    /// Must be called before the registration path touches the store.
    ///
    /// # Errors
    /// * `TooWeak` - Password does not satisfy the policy
    pub fn validate(password: &str) -> Result<(), PolicyError> {
        // The regex crate has no lookaheads, so the shape check and the
        // letter/digit requirements are separate passes.
        let shape_ok =
            Regex::new(r"^[A-Za-z0-9]{8,}$").is_ok_and(|re| re.is_match(password));
        let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());

        if shape_ok && has_letter && has_digit {
            Ok(())
        } else {
            Err(PolicyError::TooWeak)
        }
    }
}
