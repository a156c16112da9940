//! Participant identity rules.

use tracing::instrument;

/// Characters allowed in the data part of a bech32 string.
const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";
/// Longest bech32 string.
const MAX_LEN: usize = 90;
/// Length of the trailing bech32 checksum.
const CHECKSUM_LEN: usize = 6;

/// Decides whether a string is a well-formed participant identity.
pub trait IdentityRule {
    /// Checks one identity.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] naming the first problem found.
    fn check(&self, identity: &str) -> Result<(), AddressError>;
}

/// Why an identity was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum AddressError {
    /// Empty string.
    #[display("empty address")]
    Empty,

    /// Longer than a bech32 string may be.
    #[display("address is {} characters, at most 90 allowed", _0)]
    TooLong(usize),

    /// Upper-case characters.
    #[display("address must be lower case")]
    NotLowerCase,

    /// No `1` between prefix and data.
    #[display("address has no separator")]
    MissingSeparator,

    /// Prefix other than the configured one.
    #[display("expected prefix {:?}, found {:?}", expected, found)]
    WrongPrefix {
        /// Configured prefix.
        expected: String,
        /// Prefix found.
        found: String,
    },

    /// Data part too short to hold a checksum.
    #[display("address data is too short")]
    TooShort,

    /// A character outside the bech32 alphabet.
    #[display("invalid address character {:?}", _0)]
    BadCharacter(char),
}

impl std::error::Error for AddressError {}

/// Accepts bech32-shaped account addresses with a fixed prefix, such as
/// `cosmos1...`.
///
/// Only the shape is checked; the checksum is not verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bech32Rule {
    prefix: String,
}

impl Bech32Rule {
    /// Creates a rule for addresses starting with `prefix` and `1`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the expected prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for Bech32Rule {
    fn default() -> Self {
        Self::new("cosmos")
    }
}

impl IdentityRule for Bech32Rule {
    #[instrument(skip(self), fields(prefix = %self.prefix))]
    fn check(&self, identity: &str) -> Result<(), AddressError> {
        if identity.is_empty() {
            return Err(AddressError::Empty);
        }
        if identity.len() > MAX_LEN {
            return Err(AddressError::TooLong(identity.len()));
        }
        if identity.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(AddressError::NotLowerCase);
        }

        let (prefix, data) = identity
            .rsplit_once('1')
            .ok_or(AddressError::MissingSeparator)?;
        if prefix != self.prefix {
            return Err(AddressError::WrongPrefix {
                expected: self.prefix.clone(),
                found: prefix.to_string(),
            });
        }
        if data.len() < CHECKSUM_LEN {
            return Err(AddressError::TooShort);
        }
        match data.chars().find(|c| !BECH32_CHARSET.contains(*c)) {
            Some(bad) => Err(AddressError::BadCharacter(bad)),
            None => Ok(()),
        }
    }
}

/// Accepts any non-empty identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyIdentity;

impl IdentityRule for AnyIdentity {
    fn check(&self, identity: &str) -> Result<(), AddressError> {
        if identity.is_empty() {
            Err(AddressError::Empty)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "cosmos1jmjfq0tplp9tmx4v9uemw72y4d2wa5nr3xn9d3";

    #[test]
    fn test_accepts_account_address() {
        assert_eq!(Bech32Rule::default().check(ALICE), Ok(()));
    }

    #[test]
    fn test_rejects_wrong_prefix() {
        assert_eq!(
            Bech32Rule::new("osmo").check(ALICE),
            Err(AddressError::WrongPrefix {
                expected: "osmo".to_string(),
                found: "cosmos".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_malformed() {
        let rule = Bech32Rule::default();
        assert_eq!(rule.check(""), Err(AddressError::Empty));
        assert_eq!(rule.check("alice"), Err(AddressError::MissingSeparator));
        assert_eq!(rule.check("cosmos1abc"), Err(AddressError::TooShort));
        assert_eq!(rule.check("COSMOS1QQQQQQ"), Err(AddressError::NotLowerCase));
        assert_eq!(rule.check("cosmos1qqqqqqb"), Err(AddressError::BadCharacter('b')));
        assert!(matches!(
            rule.check(&format!("cosmos1{}", "q".repeat(90))),
            Err(AddressError::TooLong(_))
        ));
    }

    #[test]
    fn test_any_identity() {
        assert_eq!(AnyIdentity.check("alice"), Ok(()));
        assert_eq!(AnyIdentity.check(""), Err(AddressError::Empty));
    }
}
