//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input contains whitespace.
    #[error("email cannot contain whitespace")]
    ContainsWhitespace,
    /// The input does not contain exactly one @ symbol.
    #[error("email must contain exactly one @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// The domain has no dot separating two non-empty labels.
    #[error("email domain must contain a dot")]
    MissingDomainDot,
}

/// An email address of the shape `local@domain.tld`.
///
/// ## Constraints
///
/// - Not empty, with no upper length limit
/// - No whitespace anywhere, where whitespace is the ECMAScript `\s` set
/// - Exactly one @ symbol, with a non-empty local part before it
/// - The domain contains a dot with at least one character on each side
///
/// ## Examples
///
/// ```
/// use corner_shop_core::Email;
///
/// assert!(Email::parse("ann@x.com").is_ok());
/// assert!(Email::parse("a@b.c").is_ok());
///
/// assert!(Email::parse("bad").is_err());        // missing @
/// assert!(Email::parse("ann@localhost").is_err()); // no dot in domain
/// assert!(Email::parse("a b@x.com").is_err());  // whitespace
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

/// Whitespace as the browser's `\s` class sees it: the Unicode spaces
/// plus the byte order mark, but not NEL.
const fn is_form_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0b}' | '\u{0c}' | '\r' | ' ' | '\u{a0}' | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}' | '\u{2029}' | '\u{202f}' | '\u{205f}' | '\u{3000}' | '\u{feff}'
    )
}

impl Email {
    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Contains whitespace
    /// - Does not contain exactly one @ symbol
    /// - Has an empty local part or domain
    /// - Has no dot inside the domain
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.chars().any(is_form_whitespace) {
            return Err(EmailError::ContainsWhitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if domain.contains('@') {
            return Err(EmailError::MissingAtSymbol);
        }

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        let has_inner_dot = domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
        if !has_inner_dot {
            return Err(EmailError::MissingDomainDot);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the local part of the email (before the @).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("ann@x.com").is_ok());
        assert!(Email::parse("user.name@example.com").is_ok());
        assert!(Email::parse("user+tag@example.com").is_ok());
        assert!(Email::parse("user@subdomain.example.co.uk").is_ok());
        assert!(Email::parse("a@b.c").is_ok());
        assert!(Email::parse("a@b.c.").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_long_address() {
        let long = format!("{}@x.com", "a".repeat(300));
        assert_eq!(Email::parse(&long).unwrap().local_part().len(), 300);
    }

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(
            Email::parse("ann @x.com"),
            Err(EmailError::ContainsWhitespace)
        );
        assert_eq!(
            Email::parse(" ann@x.com"),
            Err(EmailError::ContainsWhitespace)
        );
        assert_eq!(
            Email::parse("a\u{feff}@b.com"),
            Err(EmailError::ContainsWhitespace)
        );
        assert_eq!(
            Email::parse("a\u{3000}@b.com"),
            Err(EmailError::ContainsWhitespace)
        );
        // NEL is not in the `\s` class
        assert!(Email::parse("a\u{85}@b.com").is_ok());
    }

    #[test]
    fn test_parse_at_symbols() {
        assert_eq!(Email::parse("bad"), Err(EmailError::MissingAtSymbol));
        assert_eq!(Email::parse("a@b@c.com"), Err(EmailError::MissingAtSymbol));
    }

    #[test]
    fn test_parse_empty_parts() {
        assert_eq!(Email::parse("@x.com"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::parse("ann@"), Err(EmailError::EmptyDomain));
    }

    #[test]
    fn test_parse_domain_dot() {
        assert_eq!(Email::parse("ann@x"), Err(EmailError::MissingDomainDot));
        assert_eq!(Email::parse("ann@.com"), Err(EmailError::MissingDomainDot));
        assert_eq!(Email::parse("ann@com."), Err(EmailError::MissingDomainDot));
    }

    #[test]
    fn test_parts() {
        let email = Email::parse("ann@x.com").unwrap();
        assert_eq!(email.local_part(), "ann");
        assert_eq!(email.domain(), "x.com");
        assert_eq!(format!("{email}"), "ann@x.com");
    }

    #[test]
    fn test_serde_validates() {
        let email: Email = serde_json::from_str("\"ann@x.com\"").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"ann@x.com\"");
        assert!(serde_json::from_str::<Email>("\"bad\"").is_err());
    }
}
