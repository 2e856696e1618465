//! Error taxonomy shared by every action-contract operation.

use thiserror::Error;

/// Result type for UI action operations.
pub type UiResult<T> = Result<T, UiError>;

/// Selector rendering used in failures raised against a pinned collected
/// handle, where no fresh locator string exists.
pub const CURRENT_CONTEXT: &str = "current context";

/// Typed failure raised by the action contract.
///
/// Element-level variants carry the contract operation name and the rendered
/// selector that produced them ([`CURRENT_CONTEXT`] when the operation ran
/// against a pinned collected handle).
#[derive(Error, Debug)]
pub enum UiError {
    /// A target or configuration argument was rejected before any backend call
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument
        message: String,
    },

    /// The locator matched nothing where a matching element is required
    #[error("{op}: no element matches {selector}")]
    NotFound {
        /// Operation that required the element
        op: &'static str,
        /// Rendered selector
        selector: String,
    },

    /// A zero-argument operation ran with no prior focus or collect+choose
    #[error("{op}: no current element (focus or collect+choose first)")]
    MissingContext {
        /// Operation that needed a context
        op: &'static str,
    },

    /// choose() index outside the collected range
    #[error("index {index} out of range for {len} collected elements")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of collected elements
        len: usize,
    },

    /// A wait was not satisfied within its budget
    #[error("{op}: {selector} did not reach the requested state within {ms}ms")]
    Timeout {
        /// Waiting operation
        op: &'static str,
        /// Rendered selector
        selector: String,
        /// Budget in milliseconds
        ms: u64,
    },

    /// Backend reported the element detached from the document; surfaced only
    /// once the transparent retry budget is exhausted
    #[error("{op}: element for {selector} became stale")]
    Stale {
        /// Operation that hit the detachment
        op: &'static str,
        /// Rendered selector
        selector: String,
    },

    /// The backend or session cannot perform the requested operation
    #[error("{op}: unsupported: {message}")]
    Unsupported {
        /// Operation requested
        op: &'static str,
        /// Why the backend refused it
        message: String,
    },

    /// Engine-reported failure outside the taxonomy
    #[error("{op}: backend failure: {message}")]
    Backend {
        /// Operation in flight
        op: &'static str,
        /// Engine-reported cause
        message: String,
    },

    /// Filesystem failure while persisting a screenshot
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UiError {
    /// True when the failure is a transient detachment worth retrying.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }

    /// True when the failure is a missing-element condition.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True when a wait ran out of budget.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Re-tag the operation and selector on element-level failures.
    ///
    /// Driver implementations raise errors under their own local names;
    /// adapters rewrite them to the contract operation and the selector the
    /// caller supplied before surfacing them.
    #[must_use]
    pub fn tagged(self, op: &'static str, selector: &str) -> Self {
        match self {
            Self::NotFound { .. } => Self::NotFound {
                op,
                selector: selector.to_string(),
            },
            Self::Stale { .. } => Self::Stale {
                op,
                selector: selector.to_string(),
            },
            Self::Timeout { ms, .. } => Self::Timeout {
                op,
                selector: selector.to_string(),
                ms,
            },
            Self::Unsupported { message, .. } => Self::Unsupported { op, message },
            Self::Backend { message, .. } => Self::Backend { op, message },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod display_tests {
        use super::*;

        #[test]
        fn not_found_names_operation_and_selector() {
            let err = UiError::NotFound {
                op: "click",
                selector: "#save".to_string(),
            };
            assert_eq!(err.to_string(), "click: no element matches #save");
        }

        #[test]
        fn missing_context_names_operation() {
            let err = UiError::MissingContext { op: "get_text" };
            assert!(err.to_string().contains("get_text"));
            assert!(err.to_string().contains("focus or collect+choose"));
        }

        #[test]
        fn index_out_of_range_reports_bounds() {
            let err = UiError::IndexOutOfRange { index: 5, len: 3 };
            assert_eq!(
                err.to_string(),
                "index 5 out of range for 3 collected elements"
            );
        }

        #[test]
        fn timeout_reports_budget() {
            let err = UiError::Timeout {
                op: "wait_for_visible",
                selector: "#delayed".to_string(),
                ms: 100,
            };
            assert!(err.to_string().contains("100ms"));
        }
    }

    mod predicate_tests {
        use super::*;

        #[test]
        fn stale_is_the_only_transient_class() {
            let stale = UiError::Stale {
                op: "get_text",
                selector: "#x".to_string(),
            };
            assert!(stale.is_stale());
            let not_found = UiError::NotFound {
                op: "focus",
                selector: "#x".to_string(),
            };
            assert!(!not_found.is_stale());
            assert!(not_found.is_not_found());
        }

        #[test]
        fn timeout_predicate() {
            let err = UiError::Timeout {
                op: "wait_for_hidden",
                selector: "#x".to_string(),
                ms: 50,
            };
            assert!(err.is_timeout());
            assert!(!err.is_stale());
        }
    }

    mod tagging_tests {
        use super::*;

        #[test]
        fn tagged_rewrites_element_failures() {
            let err = UiError::Stale {
                op: "text",
                selector: "internal".to_string(),
            };
            let tagged = err.tagged("get_text", "#name");
            match tagged {
                UiError::Stale { op, selector } => {
                    assert_eq!(op, "get_text");
                    assert_eq!(selector, "#name");
                }
                other => panic!("unexpected variant: {other:?}"),
            }
        }

        #[test]
        fn tagged_keeps_timeout_budget() {
            let err = UiError::Timeout {
                op: "wait_for",
                selector: "raw".to_string(),
                ms: 250,
            };
            match err.tagged("wait_for_visible", ".item") {
                UiError::Timeout { op, selector, ms } => {
                    assert_eq!(op, "wait_for_visible");
                    assert_eq!(selector, ".item");
                    assert_eq!(ms, 250);
                }
                other => panic!("unexpected variant: {other:?}"),
            }
        }

        #[test]
        fn tagged_leaves_argument_errors_alone() {
            let err = UiError::InvalidArgument {
                message: "empty value".to_string(),
            };
            match err.tagged("focus", "#x") {
                UiError::InvalidArgument { message } => assert_eq!(message, "empty value"),
                other => panic!("unexpected variant: {other:?}"),
            }
        }
    }
}
