//! The action contract: one operation set over interchangeable backends.
//!
//! Element operations come in pairs. The two-argument form takes a
//! [`Target`] and is always sugar for `focus(target)` followed by the
//! zero-argument `*_current` form; it therefore replaces the focused target
//! and discards any collection pin before acting. The zero-argument form
//! acts on the current context: the pinned collected handle when one is
//! chosen, otherwise a fresh resolution of the focused target.
//!
//! Navigation and session operations (`open`, `back`, `title`, `screenshot`,
//! `close`, ...) act on the session and leave the element context alone.

use std::path::Path;
use std::time::Duration;

use crate::result::UiResult;
use crate::target::Target;

/// Framework-agnostic UI action contract.
///
/// Implementations are flat adapters over one backend; sessions are
/// single-threaded and waits block the calling thread. The two-argument
/// defaults must not be overridden with anything other than focus-then-act:
/// callers rely on `op(target)` discarding a prior `collect` pin.
pub trait UiActions {
    // --- session ---

    /// Navigate to a URL.
    ///
    /// # Errors
    ///
    /// Backend navigation failures.
    fn open(&mut self, url: &str) -> UiResult<()>;

    /// History back.
    ///
    /// # Errors
    ///
    /// Backend navigation failures.
    fn back(&mut self) -> UiResult<()>;

    /// History forward.
    ///
    /// # Errors
    ///
    /// Backend navigation failures.
    fn forward(&mut self) -> UiResult<()>;

    /// Reload the current page.
    ///
    /// # Errors
    ///
    /// Backend navigation failures.
    fn refresh(&mut self) -> UiResult<()>;

    /// Current document title.
    ///
    /// # Errors
    ///
    /// Backend failures.
    fn title(&mut self) -> UiResult<String>;

    /// Current URL.
    ///
    /// # Errors
    ///
    /// Backend failures.
    fn url(&mut self) -> UiResult<String>;

    /// Capture the page as PNG and write it to `path`, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// `Unsupported` when the backend cannot produce screenshots, `Io` when
    /// the write fails.
    fn screenshot(&mut self, path: &Path) -> UiResult<()>;

    /// Release all backend resources and clear the element context.
    ///
    /// Every release step is attempted even when an earlier one fails; at
    /// most one failure surfaces.
    ///
    /// # Errors
    ///
    /// The first release failure.
    fn close(&mut self) -> UiResult<()>;

    // --- element context ---

    /// Resolve `target` once to confirm it exists, give it engine focus and
    /// make it the current target. Clears any collection pin. On failure the
    /// previous context is untouched.
    ///
    /// # Errors
    ///
    /// `NotFound` when nothing matches, `InvalidArgument` for an empty
    /// payload.
    fn focus(&mut self, target: &Target) -> UiResult<()>;

    /// Collect all current matches (possibly none) as pinnable handles,
    /// clearing any previous pin. The focused target stays as it was.
    /// Returns the number collected.
    ///
    /// # Errors
    ///
    /// Backend failures, `InvalidArgument` for an empty payload.
    fn collect(&mut self, target: &Target) -> UiResult<usize>;

    /// Pin one collected handle; subsequent zero-argument operations act on
    /// it without re-lookup.
    ///
    /// # Errors
    ///
    /// `MissingContext` before any `collect`, `IndexOutOfRange` outside the
    /// collected list.
    fn choose(&mut self, index: usize) -> UiResult<()>;

    /// Number of handles from the last `collect`, zero before any.
    fn size(&self) -> usize;

    // --- element operations, zero-argument forms ---

    /// Click the current element.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, or backend failures.
    fn click_current(&mut self) -> UiResult<()>;

    /// Double-click the current element.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, or backend failures.
    fn double_click_current(&mut self) -> UiResult<()>;

    /// Replace the current element's content with `text`.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, or backend failures.
    fn compose_current(&mut self, text: &str) -> UiResult<()>;

    /// Clear the current element's content.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, or backend failures.
    fn clear_current(&mut self) -> UiResult<()>;

    /// Text content of the current element. On the DOM backend this waits
    /// for visibility and retries transparently on transient staleness.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, `Timeout`, or `Stale` once the retry
    /// budget is exhausted.
    fn get_text_current(&mut self) -> UiResult<String>;

    /// Input value of the current element, falling back to text content when
    /// the element has no value or the backend rejects the read.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, or backend failures.
    fn value_current(&mut self) -> UiResult<String>;

    /// Attribute of the current element, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, or backend failures.
    fn attribute_current(&mut self, attr: &str) -> UiResult<Option<String>>;

    /// Single non-waiting presence check: fresh match count for a focused
    /// target, visibility probe for a pinned handle. Query errors report
    /// `false` rather than propagating.
    ///
    /// # Errors
    ///
    /// `MissingContext` only.
    fn exists_current(&mut self) -> UiResult<bool>;

    /// Whether the current element is visible; an absent element is not
    /// visible.
    ///
    /// # Errors
    ///
    /// `MissingContext` or backend failures.
    fn is_visible_current(&mut self) -> UiResult<bool>;

    /// Block until the current element is visible.
    ///
    /// # Errors
    ///
    /// `Timeout` when the budget elapses, `MissingContext`.
    fn wait_for_visible_current(&mut self, timeout: Duration) -> UiResult<()>;

    /// Block until the current element is hidden or gone.
    ///
    /// # Errors
    ///
    /// `Timeout` when the budget elapses, `MissingContext`.
    fn wait_for_hidden_current(&mut self, timeout: Duration) -> UiResult<()>;

    /// Move the pointer over the current element.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, or backend failures.
    fn hover_current(&mut self) -> UiResult<()>;

    /// Press one key on the current element: a named key maps to the
    /// backend's native code, anything else is sent literally.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, or backend failures.
    fn press_current(&mut self, key: &str) -> UiResult<()>;

    /// Press a chord on the current element; held modifiers are released
    /// when the chord ends.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, or backend failures.
    fn press_chord_current(&mut self, keys: &[&str]) -> UiResult<()>;

    /// Select a dropdown option on the current element by visible label.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, or backend failures.
    fn select_by_text_current(&mut self, label: &str) -> UiResult<()>;

    /// Select a dropdown option on the current element by value attribute.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, or backend failures.
    fn select_by_value_current(&mut self, value: &str) -> UiResult<()>;

    /// Set the current element's checked state. Idempotent: toggles only
    /// when the state differs.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, or backend failures.
    fn set_checked_current(&mut self, checked: bool) -> UiResult<()>;

    /// Attach a file to the current element.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty path, `MissingContext`, `NotFound`, or
    /// backend failures.
    fn upload_file_current(&mut self, path: &Path) -> UiResult<()>;

    /// Scroll the current element into the viewport.
    ///
    /// # Errors
    ///
    /// `MissingContext`, `NotFound`, or backend failures.
    fn scroll_into_view_current(&mut self) -> UiResult<()>;

    // --- element operations, two-argument sugar ---
    //
    // Each form below focuses first, so it discards a prior collect pin
    // before acting.

    /// `focus(target)` then [`UiActions::click_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn click(&mut self, target: &Target) -> UiResult<()> {
        self.focus(target)?;
        self.click_current()
    }

    /// `focus(target)` then [`UiActions::double_click_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn double_click(&mut self, target: &Target) -> UiResult<()> {
        self.focus(target)?;
        self.double_click_current()
    }

    /// `focus(target)` then [`UiActions::compose_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn compose(&mut self, target: &Target, text: &str) -> UiResult<()> {
        self.focus(target)?;
        self.compose_current(text)
    }

    /// `focus(target)` then [`UiActions::clear_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn clear(&mut self, target: &Target) -> UiResult<()> {
        self.focus(target)?;
        self.clear_current()
    }

    /// `focus(target)` then [`UiActions::get_text_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn get_text(&mut self, target: &Target) -> UiResult<String> {
        self.focus(target)?;
        self.get_text_current()
    }

    /// `focus(target)` then [`UiActions::value_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn value(&mut self, target: &Target) -> UiResult<String> {
        self.focus(target)?;
        self.value_current()
    }

    /// `focus(target)` then [`UiActions::attribute_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn attribute(&mut self, target: &Target, attr: &str) -> UiResult<Option<String>> {
        self.focus(target)?;
        self.attribute_current(attr)
    }

    /// `focus(target)` then [`UiActions::exists_current`]. Note the focus
    /// step: an absent element surfaces as `NotFound` here, not `Ok(false)`.
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn exists(&mut self, target: &Target) -> UiResult<bool> {
        self.focus(target)?;
        self.exists_current()
    }

    /// `focus(target)` then [`UiActions::is_visible_current`]. The focus
    /// step makes an absent element `NotFound`, not `Ok(false)`.
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn is_visible(&mut self, target: &Target) -> UiResult<bool> {
        self.focus(target)?;
        self.is_visible_current()
    }

    /// `focus(target)` then [`UiActions::wait_for_visible_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn wait_for_visible(&mut self, target: &Target, timeout: Duration) -> UiResult<()> {
        self.focus(target)?;
        self.wait_for_visible_current(timeout)
    }

    /// `focus(target)` then [`UiActions::wait_for_hidden_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn wait_for_hidden(&mut self, target: &Target, timeout: Duration) -> UiResult<()> {
        self.focus(target)?;
        self.wait_for_hidden_current(timeout)
    }

    /// `focus(target)` then [`UiActions::hover_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn hover(&mut self, target: &Target) -> UiResult<()> {
        self.focus(target)?;
        self.hover_current()
    }

    /// `focus(target)` then [`UiActions::press_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn press(&mut self, target: &Target, key: &str) -> UiResult<()> {
        self.focus(target)?;
        self.press_current(key)
    }

    /// `focus(target)` then [`UiActions::press_chord_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn press_chord(&mut self, target: &Target, keys: &[&str]) -> UiResult<()> {
        self.focus(target)?;
        self.press_chord_current(keys)
    }

    /// `focus(target)` then [`UiActions::select_by_text_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn select_by_text(&mut self, target: &Target, label: &str) -> UiResult<()> {
        self.focus(target)?;
        self.select_by_text_current(label)
    }

    /// `focus(target)` then [`UiActions::select_by_value_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn select_by_value(&mut self, target: &Target, value: &str) -> UiResult<()> {
        self.focus(target)?;
        self.select_by_value_current(value)
    }

    /// `focus(target)` then [`UiActions::set_checked_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn set_checked(&mut self, target: &Target, checked: bool) -> UiResult<()> {
        self.focus(target)?;
        self.set_checked_current(checked)
    }

    /// `focus(target)` then [`UiActions::upload_file_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn upload_file(&mut self, target: &Target, path: &Path) -> UiResult<()> {
        self.focus(target)?;
        self.upload_file_current(path)
    }

    /// `focus(target)` then [`UiActions::scroll_into_view_current`].
    ///
    /// # Errors
    ///
    /// As the two steps.
    fn scroll_into_view(&mut self, target: &Target) -> UiResult<()> {
        self.focus(target)?;
        self.scroll_into_view_current()
    }
}
