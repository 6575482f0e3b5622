//! Shortcode generation and validation utilities.
//!
//! Generated and caller-supplied shortcodes share one alphabet,
//! `[A-Za-z0-9_-]`, so every generated code is also a valid custom code.

use crate::domain::errors::RegistryError;
use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// The 64 symbols a shortcode may contain.
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

pub const MIN_CODE_LENGTH: usize = 3;
pub const MAX_CODE_LENGTH: usize = 20;

/// Smallest generated length the service accepts (64^6 ≈ 6.9e10 codes).
pub const MIN_GENERATED_LENGTH: usize = 6;

/// Default generated length: 48 bits of entropy.
pub const DEFAULT_GENERATED_LENGTH: usize = 8;

static SHORTCODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{3,20}$").expect("shortcode pattern is a valid regex")
});

/// Generates a random shortcode of `length` symbols.
///
/// Each symbol is drawn uniformly from [`ALPHABET`] using the thread-local
/// CSPRNG.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(8);
/// assert_eq!(code.len(), 8);
/// assert!(is_valid_shortcode(&code));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Number of distinct codes of the given length.
///
/// Saturates at `u128::MAX`, far beyond what memory could ever hold.
pub fn code_space_size(length: usize) -> u128 {
    let length = u32::try_from(length).unwrap_or(u32::MAX);
    (ALPHABET.len() as u128).saturating_pow(length)
}

/// Returns true if `code` matches `^[A-Za-z0-9_-]{3,20}$`.
pub fn is_valid_shortcode(code: &str) -> bool {
    SHORTCODE_REGEX.is_match(code)
}

/// Validates a caller-supplied shortcode.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidShortcode`] if the code is shorter than 3,
/// longer than 20, or contains anything besides letters, digits, `-` and `_`.
pub fn validate_shortcode(code: &str) -> Result<(), RegistryError> {
    if is_valid_shortcode(code) {
        Ok(())
    } else {
        Err(RegistryError::InvalidShortcode {
            shortcode: code.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_requested_length() {
        for length in [MIN_CODE_LENGTH, DEFAULT_GENERATED_LENGTH, MAX_CODE_LENGTH] {
            assert_eq!(generate_code(length).len(), length);
        }
    }

    #[test]
    fn test_generate_code_matches_pattern() {
        for _ in 0..500 {
            let code = generate_code(DEFAULT_GENERATED_LENGTH);
            assert!(is_valid_shortcode(&code), "generated '{}' is invalid", code);
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000)
            .map(|_| generate_code(DEFAULT_GENERATED_LENGTH))
            .collect();

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_uses_whole_alphabet() {
        let seen: HashSet<char> = (0..200)
            .flat_map(|_| generate_code(20).into_bytes())
            .map(|b| b as char)
            .collect();

        assert!(seen.iter().all(|c| ALPHABET.contains(&(*c as u8))));
        assert!(seen.len() > 50);
    }

    #[test]
    fn test_code_space_size() {
        assert_eq!(code_space_size(3), 262_144);
        assert_eq!(code_space_size(6), 68_719_476_736);
        assert_eq!(code_space_size(20), 1u128 << 120);
    }

    #[test]
    fn test_validate_accepts_boundaries() {
        assert!(validate_shortcode("abc").is_ok());
        assert!(validate_shortcode("a".repeat(20).as_str()).is_ok());
    }

    #[test]
    fn test_validate_accepts_mixed_alphabet() {
        assert!(validate_shortcode("My_Link-2024").is_ok());
        assert!(validate_shortcode("---").is_ok());
        assert!(validate_shortcode("ABC123").is_ok());
    }

    #[test]
    fn test_validate_too_short() {
        let result = validate_shortcode("ab");
        assert!(matches!(result, Err(RegistryError::InvalidShortcode { .. })));
    }

    #[test]
    fn test_validate_too_long() {
        assert!(validate_shortcode(&"a".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_rejects_special_characters() {
        for code in ["my code", "my.code", "code@123", "ünï", "abc/def", ""] {
            assert!(
                validate_shortcode(code).is_err(),
                "'{}' should be invalid",
                code
            );
        }
    }

    #[test]
    fn test_validate_rejects_trailing_newline() {
        assert!(validate_shortcode("abc123\n").is_err());
    }
}
