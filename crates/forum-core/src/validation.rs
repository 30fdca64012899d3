//! Input validation rules
//!
//! Pure checks on user-supplied text. Each rule maps to exactly one
//! [`DomainError`] variant so callers can report it without extra context.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::DomainError;

/// Inclusive username length bounds
pub const USERNAME_MIN_LEN: usize = 4;
pub const USERNAME_MAX_LEN: usize = 36;

/// Minimum password length
pub const PASSWORD_MIN_LEN: usize = 8;

/// Lower-case `local@domain.tld`
pub const EMAIL_PATTERN_SRC: &str = r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN_SRC).expect("email pattern is a valid regex"));

/// Kind of free text being checked, selecting the error reported on bad characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Post,
    Comment,
    Category,
}

impl TextKind {
    fn invalid(self) -> DomainError {
        match self {
            Self::Post => DomainError::InvalidPost,
            Self::Comment => DomainError::InvalidComment,
            Self::Category => DomainError::InvalidCategory,
        }
    }
}

#[inline]
fn is_printable_ascii(c: char) -> bool {
    (' '..='\u{7f}').contains(&c)
}

fn validate_username_chars(login: &str) -> Result<(), DomainError> {
    if login.chars().all(is_printable_ascii) {
        Ok(())
    } else {
        Err(DomainError::InvalidUserName)
    }
}

fn validate_username_length(login: &str) -> Result<(), DomainError> {
    if (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&login.len()) {
        Ok(())
    } else {
        Err(DomainError::InvalidUserName)
    }
}

/// Email must look like `local@domain.tld` in lower case
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(DomainError::InvalidEmail)
    }
}

/// Password needs 8+ characters with an upper-case letter, a lower-case letter, and a digit
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    let long_enough = password.chars().count() >= PASSWORD_MIN_LEN;
    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(DomainError::InvalidPassword)
    }
}

/// Check a whole signup form.
///
/// Username must be printable ASCII, 4 to 36 characters. Order: username
/// characters, email, username length, password.
pub fn validate_signup(login: &str, email: &str, password: &str) -> Result<(), DomainError> {
    validate_username_chars(login)?;
    validate_email(email)?;
    validate_username_length(login)?;
    validate_password(password)
}

/// Check a title, body, comment or category tag.
///
/// A single scan rejects the first character outside printable ASCII. Text
/// that passes but is empty or only spaces is reported as [`DomainError::EmptyValue`].
pub fn validate_text(value: &str, kind: TextKind) -> Result<(), DomainError> {
    let mut blank = true;
    for c in value.chars() {
        if !is_printable_ascii(c) {
            return Err(kind.invalid());
        }
        if c != ' ' {
            blank = false;
        }
    }
    if blank {
        return Err(DomainError::EmptyValue);
    }
    Ok(())
}
