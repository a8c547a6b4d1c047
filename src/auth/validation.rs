use lazy_static::lazy_static;
use regex::Regex;
use time::{format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime};

use crate::error::ApiError;

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 16;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Absent and empty both count as missing.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 8 to 16 UTF-16 code units with at least one of `SPECIAL_CHARS`.
pub fn is_valid_password(password: &str) -> bool {
    let len = password.encode_utf16().count();
    (PASSWORD_MIN..=PASSWORD_MAX).contains(&len) && password.chars().any(|c| SPECIAL_CHARS.contains(c))
}

pub fn check_email(email: &str) -> Result<(), ApiError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ApiError::InvalidEmailFormat)
    }
}

pub fn check_password(password: &str) -> Result<(), ApiError> {
    if is_valid_password(password) {
        Ok(())
    } else {
        Err(ApiError::WeakPassword)
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, keeping the calendar date.
pub fn parse_date_of_birth(raw: &str) -> Result<Date, ApiError> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .or_else(|_| OffsetDateTime::parse(raw, &Rfc3339).map(|dt| dt.date()))
        .map_err(|_| ApiError::InvalidDateOfBirth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ivan@mail.ru"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("invalid-email"));
        assert!(!is_valid_email("no-tld@mail"));
        assert!(!is_valid_email("sp ace@mail.ru"));
        assert!(!is_valid_email("two@@mail.ru"));
        assert!(!is_valid_email("@mail.ru"));
    }

    #[test]
    fn password_accepts_length_and_special_char() {
        assert!(is_valid_password("secret1!"));
        assert!(is_valid_password("secret123!"));
        assert!(is_valid_password("ivanivan?"));
        assert!(is_valid_password("abcdefghijklmno{"));
        assert!(is_valid_password("\"\"\"\"\"\"\"\""));
    }

    #[test]
    fn password_rejects_bad_length_or_missing_special() {
        assert!(!is_valid_password("short"));
        assert!(!is_valid_password("sh0rt!"));
        assert!(!is_valid_password("password1"));
        assert!(!is_valid_password("abcdefghijklmnop!"));
        assert!(!is_valid_password("passw-rd_1"));
    }

    #[test]
    fn password_length_counts_utf16_units() {
        // 4 emoji + '!' = 9 units, 5 chars.
        assert!(is_valid_password("🔥🔥🔥🔥!"));
        // 8 emoji + '!' = 17 units, 9 chars.
        assert!(!is_valid_password("🔥🔥🔥🔥🔥🔥🔥🔥!"));
        // BMP characters count once: 6 Cyrillic letters + '1' + '?' = 8 units.
        assert!(is_valid_password("пароль1?"));
    }

    #[test]
    fn present_treats_empty_as_missing() {
        assert_eq!(present(&Some("x".into())), Some("x"));
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&None), None);
    }

    #[test]
    fn date_of_birth_formats() {
        assert_eq!(parse_date_of_birth("1990-01-01").unwrap(), date!(1990 - 01 - 01));
        assert_eq!(
            parse_date_of_birth("1985-05-15T00:00:00Z").unwrap(),
            date!(1985 - 05 - 15)
        );
        assert!(matches!(
            parse_date_of_birth("yesterday"),
            Err(ApiError::InvalidDateOfBirth)
        ));
        assert!(parse_date_of_birth("1990-02-30").is_err());
    }

    #[test]
    fn check_helpers_map_to_error_kinds() {
        assert!(matches!(check_email("nope"), Err(ApiError::InvalidEmailFormat)));
        assert!(matches!(check_password("password1"), Err(ApiError::WeakPassword)));
        assert!(check_email("ok@ok.ok").is_ok());
        assert!(check_password("secret1!").is_ok());
    }
}
