//! Validated name newtypes.
//!
//! Widget names, service names and command targets end up in element ids,
//! form field names and URL path segments, so they are restricted to a safe
//! identifier alphabet at construction time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Check that `value` is a non-empty identifier made of `[A-Za-z0-9_.-]`
/// that is not only dots (`.` and `..` are path segments).
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`], [`ValidationError::InvalidName`]
/// or [`ValidationError::DotsOnlyName`].
pub fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-'))
    {
        return Err(ValidationError::InvalidName(value.to_string()));
    }
    if value.chars().all(|ch| ch == '.') {
        return Err(ValidationError::DotsOnlyName(value.to_string()));
    }
    Ok(())
}

macro_rules! define_name {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a name.
            ///
            /// # Errors
            ///
            /// Returns a [`ValidationError`] when the name is empty or contains
            /// characters outside `[A-Za-z0-9_.-]`.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                validate_identifier(&value)?;
                Ok(Self(value))
            }

            /// Borrow the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> Self {
                name.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_name!(
    /// Unique name of a dashboard widget (also the id of its root element).
    WidgetName
);

define_name!(
    /// Name of a system service controllable from the dashboard.
    ServiceName
);
