//! Per-session element context: the focused target and collected handles.
//!
//! The context is the state machine behind zero-argument operations. A
//! session is `Unfocused` until `focus` records a target, and a `collect`
//! adds a handle list that `choose` can pin an index into. Transitions:
//!
//! ```text
//!   focus(t)    -> current = t,   chosen cleared
//!   collect(t)  -> collected = n, chosen cleared, current unchanged
//!   choose(i)   -> chosen = i     (requires a prior collect, i < len)
//! ```
//!
//! Resolution gives a pinned handle priority over the focused target; a
//! pinned handle is used as stored, while a focused target is re-resolved
//! fresh on every call.

use crate::result::{UiError, UiResult};
use crate::target::Target;

/// What a zero-argument operation acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Use the pinned collected handle at this index, no re-lookup. The
    /// element may have gone stale since collection; the caller pinned it
    /// knowingly.
    Pinned(usize),
    /// Re-resolve this target against the backend. Never a cached handle:
    /// page mutations between focus and action are expected.
    Fresh(Target),
}

/// Mutable locator state owned by one adapter instance.
#[derive(Debug)]
pub struct ElementContext<H> {
    current: Option<Target>,
    collected: Option<Vec<H>>,
    chosen: Option<usize>,
}

impl<H> ElementContext<H> {
    /// Empty context: nothing focused, nothing collected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: None,
            collected: None,
            chosen: None,
        }
    }

    /// Record a new focused target, dropping any collection pin.
    pub fn set_focused(&mut self, target: Target) {
        self.current = Some(target);
        self.chosen = None;
    }

    /// Record a fresh collection, dropping any previous pin. The focused
    /// target stays as it was. Returns the number of handles collected.
    pub fn set_collected(&mut self, handles: Vec<H>) -> usize {
        let len = handles.len();
        self.collected = Some(handles);
        self.chosen = None;
        len
    }

    /// Pin one collected handle by index.
    ///
    /// # Errors
    ///
    /// [`UiError::MissingContext`] when `collect` never ran, and
    /// [`UiError::IndexOutOfRange`] when the index is outside the collected
    /// list. An empty collection has no valid index.
    pub fn choose(&mut self, index: usize) -> UiResult<()> {
        let Some(list) = &self.collected else {
            return Err(UiError::MissingContext { op: "choose" });
        };
        if index >= list.len() {
            return Err(UiError::IndexOutOfRange {
                index,
                len: list.len(),
            });
        }
        self.chosen = Some(index);
        Ok(())
    }

    /// Number of handles from the last `collect`, zero before any.
    #[must_use]
    pub fn size(&self) -> usize {
        self.collected.as_ref().map_or(0, Vec::len)
    }

    /// Resolve what a zero-argument operation acts on: the pinned handle
    /// wins, otherwise the focused target is re-resolved by the caller.
    ///
    /// # Errors
    ///
    /// [`UiError::MissingContext`] when neither a pin nor a focused target
    /// exists.
    pub fn resolve(&self, op: &'static str) -> UiResult<Resolution> {
        if let (Some(index), Some(list)) = (self.chosen, &self.collected) {
            if index < list.len() {
                return Ok(Resolution::Pinned(index));
            }
        }
        match &self.current {
            Some(target) => Ok(Resolution::Fresh(target.clone())),
            None => Err(UiError::MissingContext { op }),
        }
    }

    /// Mutable access to a collected handle.
    #[must_use]
    pub fn handle_mut(&mut self, index: usize) -> Option<&mut H> {
        self.collected.as_mut().and_then(|list| list.get_mut(index))
    }

    /// The focused target, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Target> {
        self.current.as_ref()
    }

    /// The pinned index, if any.
    #[must_use]
    pub const fn chosen(&self) -> Option<usize> {
        self.chosen
    }

    /// Drop all locator state. Used by `close`.
    pub fn clear(&mut self) {
        self.current = None;
        self.collected = None;
        self.chosen = None;
    }
}

impl<H> Default for ElementContext<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::css;

    mod transition_tests {
        use super::*;

        #[test]
        fn starts_unfocused() {
            let ctx: ElementContext<u32> = ElementContext::new();
            assert!(ctx.current().is_none());
            assert_eq!(ctx.size(), 0);
            assert!(ctx.resolve("click").is_err());
        }

        #[test]
        fn focus_replaces_current_and_clears_pin() {
            let mut ctx: ElementContext<u32> = ElementContext::new();
            ctx.set_collected(vec![1, 2, 3]);
            ctx.choose(2).unwrap();
            assert_eq!(ctx.chosen(), Some(2));

            ctx.set_focused(css("#name"));
            assert_eq!(ctx.current(), Some(&css("#name")));
            assert_eq!(ctx.chosen(), None);
        }

        #[test]
        fn collect_clears_pin_but_keeps_current() {
            let mut ctx: ElementContext<u32> = ElementContext::new();
            ctx.set_focused(css("#name"));
            ctx.set_collected(vec![1, 2]);
            ctx.choose(0).unwrap();

            let count = ctx.set_collected(vec![7]);
            assert_eq!(count, 1);
            assert_eq!(ctx.chosen(), None);
            assert_eq!(ctx.current(), Some(&css("#name")));
        }

        #[test]
        fn clear_drops_everything() {
            let mut ctx: ElementContext<u32> = ElementContext::new();
            ctx.set_focused(css("#name"));
            ctx.set_collected(vec![1]);
            ctx.choose(0).unwrap();

            ctx.clear();
            assert!(ctx.current().is_none());
            assert_eq!(ctx.size(), 0);
            assert!(ctx.resolve("click").is_err());
        }
    }

    mod choose_tests {
        use super::*;

        #[test]
        fn choose_before_collect_is_missing_context() {
            let mut ctx: ElementContext<u32> = ElementContext::new();
            for index in [0, 1, 100] {
                let err = ctx.choose(index).unwrap_err();
                assert!(matches!(err, UiError::MissingContext { op: "choose" }));
            }
        }

        #[test]
        fn choose_validates_against_collected_length() {
            let mut ctx: ElementContext<u32> = ElementContext::new();
            ctx.set_collected(vec![10, 20, 30]);

            for index in 0..3 {
                assert!(ctx.choose(index).is_ok());
            }
            let err = ctx.choose(3).unwrap_err();
            assert!(matches!(
                err,
                UiError::IndexOutOfRange { index: 3, len: 3 }
            ));
        }

        #[test]
        fn choose_on_empty_collection_is_out_of_range() {
            let mut ctx: ElementContext<u32> = ElementContext::new();
            ctx.set_collected(vec![]);
            let err = ctx.choose(0).unwrap_err();
            assert!(matches!(
                err,
                UiError::IndexOutOfRange { index: 0, len: 0 }
            ));
        }
    }

    mod resolution_tests {
        use super::*;

        #[test]
        fn pinned_handle_wins_over_focused_target() {
            let mut ctx: ElementContext<u32> = ElementContext::new();
            ctx.set_focused(css("#name"));
            ctx.set_collected(vec![10, 20]);
            ctx.choose(1).unwrap();

            assert_eq!(ctx.resolve("click").unwrap(), Resolution::Pinned(1));
            assert_eq!(*ctx.handle_mut(1).unwrap(), 20);
        }

        #[test]
        fn unpinned_collection_falls_back_to_focused_target() {
            let mut ctx: ElementContext<u32> = ElementContext::new();
            ctx.set_focused(css("#name"));
            ctx.set_collected(vec![10, 20]);

            assert_eq!(
                ctx.resolve("click").unwrap(),
                Resolution::Fresh(css("#name"))
            );
        }

        #[test]
        fn collection_without_focus_or_pin_is_missing_context() {
            let mut ctx: ElementContext<u32> = ElementContext::new();
            ctx.set_collected(vec![10]);
            let err = ctx.resolve("click").unwrap_err();
            assert!(matches!(err, UiError::MissingContext { op: "click" }));
        }

        #[test]
        fn size_reflects_last_collection_only() {
            let mut ctx: ElementContext<u32> = ElementContext::new();
            assert_eq!(ctx.size(), 0);
            ctx.set_collected(vec![1, 2, 3]);
            assert_eq!(ctx.size(), 3);
            ctx.set_collected(vec![]);
            assert_eq!(ctx.size(), 0);
        }
    }
}
