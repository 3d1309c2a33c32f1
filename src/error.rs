//! Error types for record/map marshalling.
//!
//! Errors fall into two classes:
//!
//! - **Per-field errors**: a value could not be coerced into its field's kind
//!   ([`Error::Parse`], [`Error::Unconvertible`], [`Error::Unsupported`],
//!   [`Error::TypeMismatch`]) or a hook failed ([`Error::Custom`]). They carry the
//!   offending field's name and abort the current call.
//! - **Fatal errors**: a static annotation or registration mistake
//!   ([`Error::Config`], [`Error::Precondition`]). These are bugs in the program,
//!   not bad input, and must never be retried. See [`Error::is_fatal`].
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatmap::Error;
//!
//! let err = Error::parse("age", "int", "abc", "invalid syntax");
//! assert_eq!(
//!     err.to_string(),
//!     "cannot parse 'age' as int: parsing \"abc\": invalid syntax"
//! );
//! assert!(!err.is_fatal());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while converting records and flat maps.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A string could not be parsed as the field's scalar type.
    #[error("cannot parse '{field}' as {kind}: parsing {input:?}: {reason}")]
    Parse {
        field: String,
        kind: &'static str,
        input: String,
        reason: String,
    },

    /// The source value has no conversion rule into the target kind.
    #[error(
        "'{field}' expected type '{expected}', got unconvertible type '{found}', value: '{value}'"
    )]
    Unconvertible {
        field: String,
        expected: String,
        found: String,
        value: String,
    },

    /// The target kind is outside the supported scalar set.
    #[error("{field}: unsupported type: {kind}")]
    Unsupported { field: String, kind: String },

    /// A hook produced a value that does not fit the field.
    #[error("'{field}' expected type '{expected}', got '{found}'")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// A padding annotation is incomplete or malformed.
    #[error("cannot format field {field}: {reason}")]
    Config { field: String, reason: String },

    /// The record's registration does not match its accessors.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Custom error, typically raised by a hook
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a literal parse error.
    pub fn parse(field: &str, kind: &'static str, input: &str, reason: &str) -> Self {
        Error::Parse {
            field: field.to_string(),
            kind,
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an error for a source/target pair the coercion table does not cover.
    pub fn unconvertible(
        field: &str,
        expected: impl fmt::Display,
        found: impl fmt::Display,
        value: impl fmt::Display,
    ) -> Self {
        Error::Unconvertible {
            field: field.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates an unsupported kind error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatmap::Error;
    ///
    /// let err = Error::unsupported("tags", "sequence");
    /// assert_eq!(err.to_string(), "tags: unsupported type: sequence");
    /// ```
    pub fn unsupported(field: &str, kind: impl fmt::Display) -> Self {
        Error::Unsupported {
            field: field.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Creates a type mismatch error for a hook result.
    pub fn type_mismatch(
        field: &str,
        expected: impl fmt::Display,
        found: impl fmt::Display,
    ) -> Self {
        Error::TypeMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a fatal annotation error.
    pub fn config(field: &str, reason: impl fmt::Display) -> Self {
        Error::Config {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a fatal registration error.
    pub fn precondition(msg: impl fmt::Display) -> Self {
        Error::Precondition(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatmap::Error;
    ///
    /// let err = Error::custom("unknown currency");
    /// assert_eq!(err.to_string(), "unknown currency");
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` for errors caused by static annotation or registration
    /// mistakes. These abort processing and must not be retried.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config { .. } | Error::Precondition(_))
    }

    /// Returns the name of the field the error is attached to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Parse { field, .. }
            | Error::Unconvertible { field, .. }
            | Error::Unsupported { field, .. }
            | Error::TypeMismatch { field, .. }
            | Error::Config { field, .. } => Some(field),
            Error::Precondition(_) | Error::Custom(_) => None,
        }
    }

    /// Attaches `name` to errors raised below the field level, where the
    /// field's name was not known yet.
    pub(crate) fn in_field(self, name: &str) -> Self {
        match self {
            Error::Unsupported { field, kind } if field.is_empty() => Error::Unsupported {
                field: name.to_string(),
                kind,
            },
            Error::Custom(msg) => Error::Custom(format!("{}: {}", name, msg)),
            other => other,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
