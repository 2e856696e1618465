//! Locator model: a strategy tag plus a string payload.
//!
//! Targets are immutable values built by the free factory functions
//! ([`css`], [`xpath`], [`id`], ...) or by the validating [`Target::of`]
//! constructor. They carry no backend knowledge; the selector module renders
//! them into each backend's native syntax.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::result::{UiError, UiResult};

/// How a [`Target`] payload is interpreted when resolving elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// CSS selector, passed through as-is
    Css,
    /// XPath expression
    XPath,
    /// Element id attribute
    Id,
    /// Form control name attribute
    Name,
    /// Single CSS class name
    ClassName,
    /// Element tag name
    TagName,
    /// Exact anchor text
    LinkText,
    /// Substring of anchor text
    PartialLinkText,
    /// Exact text content of any element
    Text,
    /// data-testid attribute
    DataTestId,
    /// ARIA role
    Role,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Css => "css",
            Self::XPath => "xpath",
            Self::Id => "id",
            Self::Name => "name",
            Self::ClassName => "class_name",
            Self::TagName => "tag",
            Self::LinkText => "link_text",
            Self::PartialLinkText => "partial_link_text",
            Self::Text => "text",
            Self::DataTestId => "data_test_id",
            Self::Role => "role",
        };
        write!(f, "{name}")
    }
}

/// An immutable locator: strategy plus payload.
///
/// Equality is structural, so targets work as map keys and in assertions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    strategy: Strategy,
    value: String,
}

impl Target {
    /// Build a target, rejecting an empty payload.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidArgument`] when `value` is empty.
    pub fn of(strategy: Strategy, value: impl Into<String>) -> UiResult<Self> {
        let target = Self::new(strategy, value);
        target.validate()?;
        Ok(target)
    }

    fn new(strategy: Strategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    /// The strategy tag this target was built with.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The raw payload this target was built with.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Reject targets whose payload is empty.
    ///
    /// The factory functions are infallible, so adapters re-check here before
    /// rendering a selector.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidArgument`] when the payload is empty.
    pub fn validate(&self) -> UiResult<()> {
        if self.value.is_empty() {
            return Err(UiError::InvalidArgument {
                message: format!("{} target requires a non-empty value", self.strategy),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy, self.value)
    }
}

/// CSS selector target.
#[must_use]
pub fn css(value: impl Into<String>) -> Target {
    Target::new(Strategy::Css, value)
}

/// XPath expression target.
#[must_use]
pub fn xpath(value: impl Into<String>) -> Target {
    Target::new(Strategy::XPath, value)
}

/// Element id target.
#[must_use]
pub fn id(value: impl Into<String>) -> Target {
    Target::new(Strategy::Id, value)
}

/// Form control name target.
#[must_use]
pub fn name(value: impl Into<String>) -> Target {
    Target::new(Strategy::Name, value)
}

/// CSS class name target.
#[must_use]
pub fn class_name(value: impl Into<String>) -> Target {
    Target::new(Strategy::ClassName, value)
}

/// Tag name target.
#[must_use]
pub fn tag(value: impl Into<String>) -> Target {
    Target::new(Strategy::TagName, value)
}

/// Exact anchor text target.
#[must_use]
pub fn link_text(value: impl Into<String>) -> Target {
    Target::new(Strategy::LinkText, value)
}

/// Anchor text substring target.
#[must_use]
pub fn partial_link_text(value: impl Into<String>) -> Target {
    Target::new(Strategy::PartialLinkText, value)
}

/// Exact element text target.
#[must_use]
pub fn text(value: impl Into<String>) -> Target {
    Target::new(Strategy::Text, value)
}

/// data-testid attribute target.
#[must_use]
pub fn data_test_id(value: impl Into<String>) -> Target {
    Target::new(Strategy::DataTestId, value)
}

/// ARIA role target.
#[must_use]
pub fn role(value: impl Into<String>) -> Target {
    Target::new(Strategy::Role, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction_tests {
        use super::*;

        #[test]
        fn of_round_trips_strategy_and_value() {
            let strategies = [
                Strategy::Css,
                Strategy::XPath,
                Strategy::Id,
                Strategy::Name,
                Strategy::ClassName,
                Strategy::TagName,
                Strategy::LinkText,
                Strategy::PartialLinkText,
                Strategy::Text,
                Strategy::DataTestId,
                Strategy::Role,
            ];
            for strategy in strategies {
                let target = Target::of(strategy, "payload").unwrap();
                assert_eq!(target.strategy(), strategy);
                assert_eq!(target.value(), "payload");
            }
        }

        #[test]
        fn of_rejects_empty_value() {
            let err = Target::of(Strategy::Css, "").unwrap_err();
            assert!(matches!(err, UiError::InvalidArgument { .. }));
        }

        #[test]
        fn factories_round_trip() {
            assert_eq!(css("#a").strategy(), Strategy::Css);
            assert_eq!(css("#a").value(), "#a");
            assert_eq!(xpath("//div").strategy(), Strategy::XPath);
            assert_eq!(id("main").strategy(), Strategy::Id);
            assert_eq!(name("email").strategy(), Strategy::Name);
            assert_eq!(class_name("row").strategy(), Strategy::ClassName);
            assert_eq!(tag("button").strategy(), Strategy::TagName);
            assert_eq!(link_text("Home").strategy(), Strategy::LinkText);
            assert_eq!(
                partial_link_text("Hom").strategy(),
                Strategy::PartialLinkText
            );
            assert_eq!(text("Save").strategy(), Strategy::Text);
            assert_eq!(data_test_id("save-btn").strategy(), Strategy::DataTestId);
            assert_eq!(role("button").strategy(), Strategy::Role);
        }

        #[test]
        fn factory_with_empty_value_fails_validation() {
            let target = css("");
            assert!(target.validate().is_err());
            assert!(css("#a").validate().is_ok());
        }
    }

    mod equality_tests {
        use super::*;

        #[test]
        fn equality_is_structural() {
            assert_eq!(css("#a"), css("#a"));
            assert_ne!(css("#a"), css("#b"));
            assert_ne!(css("x"), tag("x"));
        }

        #[test]
        fn targets_serialize_round_trip() {
            let target = data_test_id("submit");
            let json = serde_json::to_string(&target).unwrap();
            let back: Target = serde_json::from_str(&json).unwrap();
            assert_eq!(back, target);
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn display_pairs_strategy_and_value() {
            assert_eq!(css("#a").to_string(), "css=#a");
            assert_eq!(link_text("Home").to_string(), "link_text=Home");
        }
    }
}
