//! Field-format validators.
//!
//! The coordinator only needs a boolean verdict per field; the concrete
//! format rules are supplied by the surrounding application through the
//! [`FieldValidators`] trait. [`StandardValidators`] is the stock
//! implementation.

/// Pure string → bool predicates for checkout fields.
pub trait FieldValidators {
    fn address(&self, raw: &str) -> bool;
    fn email(&self, raw: &str) -> bool;
    fn phone(&self, raw: &str) -> bool;
}

/// Stock format rules:
///
/// - address: at least 5 characters from letters/digits/space/`,.-`
/// - email: `local@domain.tld`, no whitespace, non-empty parts
/// - phone: optional leading `+`, then 10 to 15 digits
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardValidators;

impl FieldValidators for StandardValidators {
    fn address(&self, raw: &str) -> bool {
        let allowed = |c: char| c.is_alphanumeric() || c.is_whitespace() || ",.-".contains(c);
        raw.chars().count() >= 5 && raw.chars().all(allowed)
    }

    fn email(&self, raw: &str) -> bool {
        if raw.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = raw.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return false;
        }
        match domain.rsplit_once('.') {
            Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
            None => false,
        }
    }

    fn phone(&self, raw: &str) -> bool {
        let digits = raw.strip_prefix('+').unwrap_or(raw);
        (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
    }
}
