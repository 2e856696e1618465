//! Backend boundary traits.
//!
//! The contract talks to engines through two small trait families. The
//! DOM-driver family models a synchronous driver that hands out element
//! handles for native CSS/XPath lookups. The page family models a
//! higher-level engine addressed by dialect selector strings, with built-in
//! auto-waiting on actions and per-element handles only for pinned
//! collections. Adapters own one driver value each and never reach past
//! these traits.

use std::path::Path;
use std::time::Duration;

use crate::result::UiResult;
use crate::selector::DomSelector;

/// Visibility state a wait can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    /// Present and displayed
    Visible,
    /// Absent from the document, or present but not displayed
    Hidden,
}

/// DOM-level synchronous driver: one browser session whose lookups yield
/// element handles.
pub trait DomDriver {
    /// Element handle produced by lookups.
    type Element: DomElement;

    /// Single non-waiting lookup; `Ok(None)` when nothing matches.
    ///
    /// # Errors
    ///
    /// Engine-level failures only; absence is not an error here.
    fn find(&mut self, selector: &DomSelector) -> UiResult<Option<Self::Element>>;

    /// All current matches, possibly empty.
    ///
    /// # Errors
    ///
    /// Engine-level failures only.
    fn find_all(&mut self, selector: &DomSelector) -> UiResult<Vec<Self::Element>>;

    /// Navigate to a URL.
    ///
    /// # Errors
    ///
    /// Engine navigation failures.
    fn navigate(&mut self, url: &str) -> UiResult<()>;

    /// History back.
    ///
    /// # Errors
    ///
    /// Engine navigation failures.
    fn back(&mut self) -> UiResult<()>;

    /// History forward.
    ///
    /// # Errors
    ///
    /// Engine navigation failures.
    fn forward(&mut self) -> UiResult<()>;

    /// Reload the current page.
    ///
    /// # Errors
    ///
    /// Engine navigation failures.
    fn refresh(&mut self) -> UiResult<()>;

    /// Current document title.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn title(&mut self) -> UiResult<String>;

    /// Current URL.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn url(&mut self) -> UiResult<String>;

    /// Current page rendered as PNG bytes.
    ///
    /// # Errors
    ///
    /// `Unsupported` when the driver cannot produce screenshots.
    fn screenshot_png(&mut self) -> UiResult<Vec<u8>>;

    /// Tear the session down. Further calls are invalid.
    ///
    /// # Errors
    ///
    /// Release failures.
    fn quit(&mut self) -> UiResult<()>;
}

/// Handle to one located DOM element.
///
/// Methods fail with `Stale` when the element has detached from the
/// document since it was located.
pub trait DomElement {
    /// Click the element.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn click(&mut self) -> UiResult<()>;

    /// Double-click the element.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn double_click(&mut self) -> UiResult<()>;

    /// Send a key sequence, literal text and key codepoints alike.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn send_keys(&mut self, keys: &str) -> UiResult<()>;

    /// Clear an input's content.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn clear(&mut self) -> UiResult<()>;

    /// Visible text content.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn text(&mut self) -> UiResult<String>;

    /// Attribute value, `Ok(None)` when the attribute is absent.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn attribute(&mut self, attr: &str) -> UiResult<Option<String>>;

    /// Whether the element is currently displayed.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn is_displayed(&mut self) -> UiResult<bool>;

    /// Whether a checkbox/radio/option is selected.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn is_selected(&mut self) -> UiResult<bool>;

    /// Give the element programmatic focus.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn focus(&mut self) -> UiResult<()>;

    /// Move the pointer over the element.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn hover(&mut self) -> UiResult<()>;

    /// Scroll the element into the viewport.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn scroll_into_view(&mut self) -> UiResult<()>;

    /// Select a dropdown option by visible label.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn select_by_label(&mut self, label: &str) -> UiResult<()>;

    /// Select a dropdown option by value attribute.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn select_by_value(&mut self, value: &str) -> UiResult<()>;

    /// Attach a file to a file input.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn upload(&mut self, path: &Path) -> UiResult<()>;
}

/// Page-automation engine addressed by dialect selector strings.
///
/// Element-addressed methods auto-wait the way such engines do; `count`,
/// `is_visible` and `collect` observe without waiting.
pub trait PageDriver {
    /// Pinned element handle from `collect`.
    type Handle: PageHandle;

    /// Navigate to a URL.
    ///
    /// # Errors
    ///
    /// Engine navigation failures.
    fn goto(&mut self, url: &str) -> UiResult<()>;

    /// History back.
    ///
    /// # Errors
    ///
    /// Engine navigation failures.
    fn back(&mut self) -> UiResult<()>;

    /// History forward.
    ///
    /// # Errors
    ///
    /// Engine navigation failures.
    fn forward(&mut self) -> UiResult<()>;

    /// Reload the current page.
    ///
    /// # Errors
    ///
    /// Engine navigation failures.
    fn reload(&mut self) -> UiResult<()>;

    /// Current document title.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn title(&mut self) -> UiResult<String>;

    /// Current URL.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn url(&mut self) -> UiResult<String>;

    /// Current page rendered as PNG bytes.
    ///
    /// # Errors
    ///
    /// `Unsupported` when the engine cannot produce screenshots.
    fn screenshot_png(&mut self) -> UiResult<Vec<u8>>;

    /// Ordered release of page, browser and engine. Every step must be
    /// attempted even when an earlier one fails; the first failure is
    /// returned.
    ///
    /// # Errors
    ///
    /// The first release failure.
    fn close(&mut self) -> UiResult<()>;

    /// Number of current matches, without waiting.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn count(&mut self, selector: &str) -> UiResult<usize>;

    /// Handles for all current matches, without waiting.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn collect(&mut self, selector: &str) -> UiResult<Vec<Self::Handle>>;

    /// Give the first match programmatic focus.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn focus(&mut self, selector: &str) -> UiResult<()>;

    /// Click the first match.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn click(&mut self, selector: &str) -> UiResult<()>;

    /// Double-click the first match.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn dblclick(&mut self, selector: &str) -> UiResult<()>;

    /// Replace the first match's content with `text`.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn fill(&mut self, selector: &str, text: &str) -> UiResult<()>;

    /// Press one engine-named key on the first match.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn press(&mut self, selector: &str, key: &str) -> UiResult<()>;

    /// Text content of the first match.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn text(&mut self, selector: &str) -> UiResult<String>;

    /// Input value of the first match.
    ///
    /// # Errors
    ///
    /// Fails when the element is not input-like; callers fall back to
    /// [`PageDriver::text`].
    fn input_value(&mut self, selector: &str) -> UiResult<String>;

    /// Attribute of the first match, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn attribute(&mut self, selector: &str, attr: &str) -> UiResult<Option<String>>;

    /// Whether the first match is visible; false when nothing matches.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn is_visible(&mut self, selector: &str) -> UiResult<bool>;

    /// Whether the first match is checked.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn is_checked(&mut self, selector: &str) -> UiResult<bool>;

    /// Select a dropdown option by visible label.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn select_label(&mut self, selector: &str, label: &str) -> UiResult<()>;

    /// Select a dropdown option by value attribute.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn select_value(&mut self, selector: &str, value: &str) -> UiResult<()>;

    /// Attach a file to a file input.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn upload(&mut self, selector: &str, path: &Path) -> UiResult<()>;

    /// Move the pointer over the first match.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn hover(&mut self, selector: &str) -> UiResult<()>;

    /// Scroll the first match into the viewport.
    ///
    /// # Errors
    ///
    /// Engine failures.
    fn scroll_into_view(&mut self, selector: &str) -> UiResult<()>;

    /// Block until the selector reaches `state` or the budget elapses.
    ///
    /// # Errors
    ///
    /// `Timeout` when the budget elapses first.
    fn wait_for(
        &mut self,
        selector: &str,
        state: VisibilityState,
        timeout: Duration,
    ) -> UiResult<()>;
}

/// Pinned handle to one collected element on the page engine.
///
/// The handle addresses the element as it stood at collection time and is
/// never re-resolved, so it can go stale when the page mutates.
pub trait PageHandle {
    /// Click the element.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn click(&mut self) -> UiResult<()>;

    /// Double-click the element.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn dblclick(&mut self) -> UiResult<()>;

    /// Replace the element's content with `text`.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn fill(&mut self, text: &str) -> UiResult<()>;

    /// Clear the element's content.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn clear(&mut self) -> UiResult<()>;

    /// Press one engine-named key.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn press(&mut self, key: &str) -> UiResult<()>;

    /// Text content.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn text(&mut self) -> UiResult<String>;

    /// Input value.
    ///
    /// # Errors
    ///
    /// Fails when the element is not input-like.
    fn input_value(&mut self) -> UiResult<String>;

    /// Attribute value, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn attribute(&mut self, attr: &str) -> UiResult<Option<String>>;

    /// Whether the element is visible.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn is_visible(&mut self) -> UiResult<bool>;

    /// Whether the element is checked.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn is_checked(&mut self) -> UiResult<bool>;

    /// Give the element programmatic focus.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn focus(&mut self) -> UiResult<()>;

    /// Move the pointer over the element.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn hover(&mut self) -> UiResult<()>;

    /// Scroll the element into the viewport.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn scroll_into_view(&mut self) -> UiResult<()>;

    /// Select a dropdown option by visible label.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn select_by_label(&mut self, label: &str) -> UiResult<()>;

    /// Select a dropdown option by value attribute.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn select_by_value(&mut self, value: &str) -> UiResult<()>;

    /// Attach a file to a file input.
    ///
    /// # Errors
    ///
    /// `Stale` or engine failures.
    fn upload(&mut self, path: &Path) -> UiResult<()>;

    /// Block until the element reaches `state` or the budget elapses.
    ///
    /// # Errors
    ///
    /// `Timeout` when the budget elapses first.
    fn wait_for(&mut self, state: VisibilityState, timeout: Duration) -> UiResult<()>;
}
