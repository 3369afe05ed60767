//! Component and platform identifiers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separator between the domain and the platform part of an identifier.
pub const SEPARATOR: char = '.';

/// Reasons an identifier string is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The input was the empty string
    #[error("Identifier cannot be empty")]
    Empty,
    /// A separator with nothing on one side
    #[error("Invalid platform identifier '{0}': domain and platform must both be non-empty")]
    InvalidPlatform(String),
}

/// A unit that can own translation files.
///
/// `light` is a component, `light.hue` is the `hue` platform of the `light` domain.
/// Components order before platforms, so a sorted set places every component
/// ahead of the platforms that share its domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identifier {
    /// A component, named by its domain
    Component(String),
    /// A platform a component provides for another domain
    Platform {
        /// Domain the platform extends
        domain: String,
        /// Name of the providing component
        platform: String,
    },
}

impl Identifier {
    /// Parses an identifier, splitting on the first separator.
    ///
    /// # Examples
    /// ```
    /// use component_translations::identifier::Identifier;
    ///
    /// let id = Identifier::parse("light.hue").unwrap();
    /// assert_eq!(id.domain(), "light");
    /// assert!(id.is_platform());
    /// ```
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        if value.is_empty() {
            return Err(IdentifierError::Empty);
        }

        match value.split_once(SEPARATOR) {
            None => Ok(Self::Component(value.to_string())),
            Some((domain, platform)) if !domain.is_empty() && !platform.is_empty() => {
                Ok(Self::Platform { domain: domain.to_string(), platform: platform.to_string() })
            }
            Some(_) => Err(IdentifierError::InvalidPlatform(value.to_string())),
        }
    }

    /// A component identifier.
    #[must_use]
    pub fn component(name: impl Into<String>) -> Self {
        Self::Component(name.into())
    }

    /// The `platform` platform of the `domain` domain.
    #[must_use]
    pub fn platform(domain: impl Into<String>, platform: impl Into<String>) -> Self {
        Self::Platform { domain: domain.into(), platform: platform.into() }
    }

    /// The component-name portion shared by a component and its platforms.
    #[must_use]
    pub fn domain(&self) -> &str {
        match self {
            Self::Component(name) => name,
            Self::Platform { domain, .. } => domain,
        }
    }

    /// Whether this names a platform rather than a component.
    #[must_use]
    pub const fn is_platform(&self) -> bool {
        matches!(self, Self::Platform { .. })
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component(name) => f.write_str(name),
            Self::Platform { domain, platform } => write!(f, "{domain}{SEPARATOR}{platform}"),
        }
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
