//! In-memory fake backends.
//!
//! [`FakeDom`] and [`FakePage`] implement the backend traits over a shared
//! map of staged elements, so contract behavior can be exercised without a
//! browser. Both are cheap to clone; clones share state, which lets a test
//! keep a handle for staging and inspection while the adapter owns another.
//!
//! Elements are staged under the rendered selector string the adapter will
//! produce for the target, either directly or through
//! [`FakeDom::stage_target`] / [`FakePage::stage_target`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::driver::{DomDriver, DomElement, PageDriver, PageHandle, VisibilityState};
use crate::result::{UiError, UiResult};
use crate::selector::{dom_selector, page_selector, DomSelector};
use crate::target::Target;

/// Builder for one staged element.
#[derive(Debug, Clone, Default)]
pub struct Elem {
    text: String,
    value: Option<String>,
    attrs: Vec<(String, String)>,
    checked: bool,
    hidden: bool,
    reveal_after: Option<Duration>,
    stale_reads: u32,
}

impl Elem {
    /// Empty visible element.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Mark the element input-like with the given value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Set the initial checked state.
    #[must_use]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Keep the element attached but never displayed.
    #[must_use]
    pub fn start_hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Keep the element hidden until `delay` after staging.
    #[must_use]
    pub fn reveal_after(mut self, delay: Duration) -> Self {
        self.reveal_after = Some(delay);
        self
    }

    /// Fail the first `reads` text reads with a staleness error.
    #[must_use]
    pub fn stale_for(mut self, reads: u32) -> Self {
        self.stale_reads = reads;
        self
    }
}

#[derive(Debug)]
struct ElemState {
    text: String,
    value: Option<String>,
    attrs: HashMap<String, String>,
    checked: bool,
    hidden: bool,
    visible_at: Option<Instant>,
    stale_reads: u32,
    clicks: u32,
    pressed: Vec<String>,
    uploads: Vec<PathBuf>,
}

impl ElemState {
    fn staged(spec: Elem) -> Shared {
        Arc::new(Mutex::new(Self {
            text: spec.text,
            value: spec.value,
            attrs: spec.attrs.into_iter().collect(),
            checked: spec.checked,
            hidden: spec.hidden,
            visible_at: spec.reveal_after.map(|d| Instant::now() + d),
            stale_reads: spec.stale_reads,
            clicks: 0,
            pressed: Vec::new(),
            uploads: Vec::new(),
        }))
    }

    fn visible(&self) -> bool {
        if let Some(at) = self.visible_at {
            return Instant::now() >= at;
        }
        !self.hidden
    }

    fn text_read(&mut self) -> UiResult<String> {
        if self.stale_reads > 0 {
            self.stale_reads -= 1;
            return Err(UiError::Stale {
                op: "text",
                selector: "staged element".to_string(),
            });
        }
        Ok(self.text.clone())
    }
}

type Shared = Arc<Mutex<ElemState>>;

#[derive(Debug, Default)]
struct Document {
    elements: HashMap<String, Vec<Shared>>,
    history: Vec<String>,
    history_index: usize,
    title: String,
    screenshot: Vec<u8>,
    calls: Vec<String>,
}

impl Document {
    fn navigate(&mut self, url: &str) {
        if !self.history.is_empty() {
            self.history.truncate(self.history_index + 1);
        }
        self.history.push(url.to_string());
        self.history_index = self.history.len() - 1;
    }

    fn back(&mut self) {
        self.history_index = self.history_index.saturating_sub(1);
    }

    fn forward(&mut self) {
        if self.history_index + 1 < self.history.len() {
            self.history_index += 1;
        }
    }

    fn url(&self) -> String {
        self.history
            .get(self.history_index)
            .cloned()
            .unwrap_or_default()
    }

    fn first(&self, selector: &str) -> Option<Shared> {
        self.elements
            .get(selector)
            .and_then(|list| list.first())
            .map(Arc::clone)
    }

    fn all(&self, selector: &str) -> Vec<Shared> {
        self.elements
            .get(selector)
            .map(|list| list.iter().map(Arc::clone).collect())
            .unwrap_or_default()
    }
}

// Shared staging and inspection surface over one locked document.
macro_rules! staging_api {
    ($fake:ident) => {
        impl $fake {
            /// Empty document.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Stage an element under a rendered selector string. Staging
            /// the same selector again appends a further match.
            pub fn stage(&self, selector: &str, elem: Elem) {
                self.inner
                    .lock()
                    .unwrap()
                    .doc
                    .elements
                    .entry(selector.to_string())
                    .or_default()
                    .push(ElemState::staged(elem));
            }

            /// Remove every element staged under a selector. Handles already
            /// collected keep working; fresh lookups stop matching.
            pub fn remove(&self, selector: &str) {
                self.inner.lock().unwrap().doc.elements.remove(selector);
            }

            /// Set the bytes returned for screenshots.
            pub fn set_screenshot(&self, bytes: Vec<u8>) {
                self.inner.lock().unwrap().doc.screenshot = bytes;
            }

            /// Set the document title.
            pub fn set_title(&self, title: impl Into<String>) {
                self.inner.lock().unwrap().doc.title = title.into();
            }

            /// Click count of the first element under a selector.
            #[must_use]
            pub fn clicks(&self, selector: &str) -> u32 {
                self.nth_clicks(selector, 0)
            }

            /// Click count of the nth element under a selector.
            #[must_use]
            pub fn nth_clicks(&self, selector: &str, index: usize) -> u32 {
                self.inner
                    .lock()
                    .unwrap()
                    .doc
                    .elements
                    .get(selector)
                    .and_then(|list| list.get(index))
                    .map_or(0, |state| state.lock().unwrap().clicks)
            }

            /// Current input value of the first element under a selector.
            #[must_use]
            pub fn value_of(&self, selector: &str) -> Option<String> {
                let state = self.inner.lock().unwrap().doc.first(selector)?;
                let value = state.lock().unwrap().value.clone();
                value
            }

            /// Checked state of the first element under a selector.
            #[must_use]
            pub fn checked(&self, selector: &str) -> bool {
                self.inner
                    .lock()
                    .unwrap()
                    .doc
                    .first(selector)
                    .is_some_and(|state| state.lock().unwrap().checked)
            }

            /// Keys pressed on the first element under a selector.
            #[must_use]
            pub fn pressed(&self, selector: &str) -> Vec<String> {
                self.inner
                    .lock()
                    .unwrap()
                    .doc
                    .first(selector)
                    .map_or_else(Vec::new, |state| state.lock().unwrap().pressed.clone())
            }

            /// Last uploaded path for the first element under a selector.
            #[must_use]
            pub fn last_upload(&self, selector: &str) -> Option<PathBuf> {
                let state = self.inner.lock().unwrap().doc.first(selector)?;
                let upload = state.lock().unwrap().uploads.last().cloned();
                upload
            }

            /// Driver calls recorded so far.
            #[must_use]
            pub fn calls(&self) -> Vec<String> {
                self.inner.lock().unwrap().doc.calls.clone()
            }
        }
    };
}

#[derive(Debug, Default)]
struct DomInner {
    doc: Document,
    quit_count: u32,
    fail_queries: Option<String>,
}

/// Fake DOM-driver backend.
#[derive(Debug, Clone, Default)]
pub struct FakeDom {
    inner: Arc<Mutex<DomInner>>,
}

staging_api!(FakeDom);

impl FakeDom {
    /// Stage an element under the rendering of a target.
    pub fn stage_target(&self, target: &Target, elem: Elem) {
        self.stage(&dom_selector(target).to_string(), elem);
    }

    /// Make every subsequent lookup fail with a backend error.
    pub fn fail_queries(&self, message: impl Into<String>) {
        self.inner.lock().unwrap().fail_queries = Some(message.into());
    }

    /// Number of times the session was torn down.
    #[must_use]
    pub fn quit_count(&self) -> u32 {
        self.inner.lock().unwrap().quit_count
    }

    fn lookup(&self, verb: &str, selector: &DomSelector) -> UiResult<Vec<Shared>> {
        let key = selector.to_string();
        let mut inner = self.inner.lock().unwrap();
        inner.doc.calls.push(format!("{verb} {key}"));
        if let Some(message) = &inner.fail_queries {
            return Err(UiError::Backend {
                op: "find",
                message: message.clone(),
            });
        }
        Ok(inner.doc.all(&key))
    }
}

impl DomDriver for FakeDom {
    type Element = FakeDomElement;

    fn find(&mut self, selector: &DomSelector) -> UiResult<Option<FakeDomElement>> {
        let matches = self.lookup("find", selector)?;
        Ok(matches
            .into_iter()
            .next()
            .map(|state| FakeDomElement { state }))
    }

    fn find_all(&mut self, selector: &DomSelector) -> UiResult<Vec<FakeDomElement>> {
        let matches = self.lookup("find_all", selector)?;
        Ok(matches
            .into_iter()
            .map(|state| FakeDomElement { state })
            .collect())
    }

    fn navigate(&mut self, url: &str) -> UiResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.doc.calls.push(format!("navigate {url}"));
        inner.doc.navigate(url);
        Ok(())
    }

    fn back(&mut self) -> UiResult<()> {
        self.inner.lock().unwrap().doc.back();
        Ok(())
    }

    fn forward(&mut self) -> UiResult<()> {
        self.inner.lock().unwrap().doc.forward();
        Ok(())
    }

    fn refresh(&mut self) -> UiResult<()> {
        Ok(())
    }

    fn title(&mut self) -> UiResult<String> {
        Ok(self.inner.lock().unwrap().doc.title.clone())
    }

    fn url(&mut self) -> UiResult<String> {
        Ok(self.inner.lock().unwrap().doc.url())
    }

    fn screenshot_png(&mut self) -> UiResult<Vec<u8>> {
        Ok(self.inner.lock().unwrap().doc.screenshot.clone())
    }

    fn quit(&mut self) -> UiResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.doc.calls.push("quit".to_string());
        inner.quit_count += 1;
        Ok(())
    }
}

/// Element handle produced by [`FakeDom`].
#[derive(Debug, Clone)]
pub struct FakeDomElement {
    state: Shared,
}

impl DomElement for FakeDomElement {
    fn click(&mut self) -> UiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.clicks += 1;
        state.checked = !state.checked;
        Ok(())
    }

    fn double_click(&mut self) -> UiResult<()> {
        self.state.lock().unwrap().clicks += 2;
        Ok(())
    }

    fn send_keys(&mut self, keys: &str) -> UiResult<()> {
        let mut state = self.state.lock().unwrap();
        let current = state.value.take().unwrap_or_default();
        state.value = Some(current + keys);
        Ok(())
    }

    fn clear(&mut self) -> UiResult<()> {
        self.state.lock().unwrap().value = Some(String::new());
        Ok(())
    }

    fn text(&mut self) -> UiResult<String> {
        self.state.lock().unwrap().text_read()
    }

    fn attribute(&mut self, attr: &str) -> UiResult<Option<String>> {
        let state = self.state.lock().unwrap();
        if attr == "value" {
            return Ok(state.value.clone());
        }
        Ok(state.attrs.get(attr).cloned())
    }

    fn is_displayed(&mut self) -> UiResult<bool> {
        Ok(self.state.lock().unwrap().visible())
    }

    fn is_selected(&mut self) -> UiResult<bool> {
        Ok(self.state.lock().unwrap().checked)
    }

    fn focus(&mut self) -> UiResult<()> {
        Ok(())
    }

    fn hover(&mut self) -> UiResult<()> {
        Ok(())
    }

    fn scroll_into_view(&mut self) -> UiResult<()> {
        Ok(())
    }

    fn select_by_label(&mut self, label: &str) -> UiResult<()> {
        self.state.lock().unwrap().value = Some(label.to_string());
        Ok(())
    }

    fn select_by_value(&mut self, value: &str) -> UiResult<()> {
        self.state.lock().unwrap().value = Some(value.to_string());
        Ok(())
    }

    fn upload(&mut self, path: &Path) -> UiResult<()> {
        self.state.lock().unwrap().uploads.push(path.to_path_buf());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct PageInner {
    doc: Document,
    released: Vec<&'static str>,
    fail_release: Vec<String>,
}

/// Fake page-automation backend.
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    inner: Arc<Mutex<PageInner>>,
}

staging_api!(FakePage);

impl FakePage {
    /// Stage an element under the rendering of a target.
    pub fn stage_target(&self, target: &Target, elem: Elem) {
        self.stage(&page_selector(target), elem);
    }

    /// Make the named release step ("page", "browser" or "engine") fail.
    pub fn fail_release(&self, step: impl Into<String>) {
        self.inner.lock().unwrap().fail_release.push(step.into());
    }

    /// Release steps completed by `close`, in order.
    #[must_use]
    pub fn released(&self) -> Vec<&'static str> {
        self.inner.lock().unwrap().released.clone()
    }

    fn first(&self, op: &'static str, selector: &str) -> UiResult<Shared> {
        self.inner
            .lock()
            .unwrap()
            .doc
            .first(selector)
            .ok_or_else(|| UiError::Backend {
                op,
                message: format!("nothing staged for {selector}"),
            })
    }

    fn visible_now(&self, selector: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .doc
            .first(selector)
            .is_some_and(|state| state.lock().unwrap().visible())
    }
}

fn poll_state(
    op: &'static str,
    selector: &str,
    state: VisibilityState,
    timeout: Duration,
    mut visible: impl FnMut() -> bool,
) -> UiResult<()> {
    let deadline = Instant::now() + timeout;
    loop {
        let satisfied = match state {
            VisibilityState::Visible => visible(),
            VisibilityState::Hidden => !visible(),
        };
        if satisfied {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(UiError::Timeout {
                op,
                selector: selector.to_string(),
                ms: timeout.as_millis() as u64,
            });
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

impl PageDriver for FakePage {
    type Handle = FakePageHandle;

    fn goto(&mut self, url: &str) -> UiResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.doc.calls.push(format!("goto {url}"));
        inner.doc.navigate(url);
        Ok(())
    }

    fn back(&mut self) -> UiResult<()> {
        self.inner.lock().unwrap().doc.back();
        Ok(())
    }

    fn forward(&mut self) -> UiResult<()> {
        self.inner.lock().unwrap().doc.forward();
        Ok(())
    }

    fn reload(&mut self) -> UiResult<()> {
        Ok(())
    }

    fn title(&mut self) -> UiResult<String> {
        Ok(self.inner.lock().unwrap().doc.title.clone())
    }

    fn url(&mut self) -> UiResult<String> {
        Ok(self.inner.lock().unwrap().doc.url())
    }

    fn screenshot_png(&mut self) -> UiResult<Vec<u8>> {
        Ok(self.inner.lock().unwrap().doc.screenshot.clone())
    }

    fn close(&mut self) -> UiResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let mut first_failure = None;
        for step in ["page", "browser", "engine"] {
            if inner.fail_release.iter().any(|s| s == step) {
                if first_failure.is_none() {
                    first_failure = Some(UiError::Backend {
                        op: "close",
                        message: format!("{step} release failed"),
                    });
                }
            } else {
                inner.released.push(step);
            }
        }
        first_failure.map_or(Ok(()), Err)
    }

    fn count(&mut self, selector: &str) -> UiResult<usize> {
        let mut inner = self.inner.lock().unwrap();
        inner.doc.calls.push(format!("count {selector}"));
        Ok(inner.doc.all(selector).len())
    }

    fn collect(&mut self, selector: &str) -> UiResult<Vec<FakePageHandle>> {
        let mut inner = self.inner.lock().unwrap();
        inner.doc.calls.push(format!("collect {selector}"));
        Ok(inner
            .doc
            .all(selector)
            .into_iter()
            .map(|state| FakePageHandle { state })
            .collect())
    }

    fn focus(&mut self, selector: &str) -> UiResult<()> {
        self.first("focus", selector).map(|_| ())
    }

    fn click(&mut self, selector: &str) -> UiResult<()> {
        let state = self.first("click", selector)?;
        let mut state = state.lock().unwrap();
        state.clicks += 1;
        state.checked = !state.checked;
        Ok(())
    }

    fn dblclick(&mut self, selector: &str) -> UiResult<()> {
        let state = self.first("dblclick", selector)?;
        state.lock().unwrap().clicks += 2;
        Ok(())
    }

    fn fill(&mut self, selector: &str, text: &str) -> UiResult<()> {
        let state = self.first("fill", selector)?;
        state.lock().unwrap().value = Some(text.to_string());
        Ok(())
    }

    fn press(&mut self, selector: &str, key: &str) -> UiResult<()> {
        let state = self.first("press", selector)?;
        state.lock().unwrap().pressed.push(key.to_string());
        Ok(())
    }

    fn text(&mut self, selector: &str) -> UiResult<String> {
        let state = self.first("text", selector)?;
        let text = state.lock().unwrap().text_read();
        text
    }

    fn input_value(&mut self, selector: &str) -> UiResult<String> {
        let state = self.first("input_value", selector)?;
        let value = state.lock().unwrap().value.clone();
        value.ok_or(UiError::Backend {
            op: "input_value",
            message: "element is not an input".to_string(),
        })
    }

    fn attribute(&mut self, selector: &str, attr: &str) -> UiResult<Option<String>> {
        let state = self.first("attribute", selector)?;
        let value = state.lock().unwrap().attrs.get(attr).cloned();
        Ok(value)
    }

    fn is_visible(&mut self, selector: &str) -> UiResult<bool> {
        Ok(self.visible_now(selector))
    }

    fn is_checked(&mut self, selector: &str) -> UiResult<bool> {
        let state = self.first("is_checked", selector)?;
        let checked = state.lock().unwrap().checked;
        Ok(checked)
    }

    fn select_label(&mut self, selector: &str, label: &str) -> UiResult<()> {
        let state = self.first("select_label", selector)?;
        state.lock().unwrap().value = Some(label.to_string());
        Ok(())
    }

    fn select_value(&mut self, selector: &str, value: &str) -> UiResult<()> {
        let state = self.first("select_value", selector)?;
        state.lock().unwrap().value = Some(value.to_string());
        Ok(())
    }

    fn upload(&mut self, selector: &str, path: &Path) -> UiResult<()> {
        let state = self.first("upload", selector)?;
        state.lock().unwrap().uploads.push(path.to_path_buf());
        Ok(())
    }

    fn hover(&mut self, selector: &str) -> UiResult<()> {
        self.first("hover", selector).map(|_| ())
    }

    fn scroll_into_view(&mut self, selector: &str) -> UiResult<()> {
        self.first("scroll_into_view", selector).map(|_| ())
    }

    fn wait_for(
        &mut self,
        selector: &str,
        state: VisibilityState,
        timeout: Duration,
    ) -> UiResult<()> {
        let fake = self.clone();
        let key = selector.to_string();
        poll_state("wait_for", selector, state, timeout, move || {
            fake.visible_now(&key)
        })
    }
}

/// Pinned handle produced by [`FakePage`].
#[derive(Debug, Clone)]
pub struct FakePageHandle {
    state: Shared,
}

impl PageHandle for FakePageHandle {
    fn click(&mut self) -> UiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.clicks += 1;
        state.checked = !state.checked;
        Ok(())
    }

    fn dblclick(&mut self) -> UiResult<()> {
        self.state.lock().unwrap().clicks += 2;
        Ok(())
    }

    fn fill(&mut self, text: &str) -> UiResult<()> {
        self.state.lock().unwrap().value = Some(text.to_string());
        Ok(())
    }

    fn clear(&mut self) -> UiResult<()> {
        self.state.lock().unwrap().value = Some(String::new());
        Ok(())
    }

    fn press(&mut self, key: &str) -> UiResult<()> {
        self.state.lock().unwrap().pressed.push(key.to_string());
        Ok(())
    }

    fn text(&mut self) -> UiResult<String> {
        self.state.lock().unwrap().text_read()
    }

    fn input_value(&mut self) -> UiResult<String> {
        let value = self.state.lock().unwrap().value.clone();
        value.ok_or(UiError::Backend {
            op: "input_value",
            message: "element is not an input".to_string(),
        })
    }

    fn attribute(&mut self, attr: &str) -> UiResult<Option<String>> {
        Ok(self.state.lock().unwrap().attrs.get(attr).cloned())
    }

    fn is_visible(&mut self) -> UiResult<bool> {
        Ok(self.state.lock().unwrap().visible())
    }

    fn is_checked(&mut self) -> UiResult<bool> {
        Ok(self.state.lock().unwrap().checked)
    }

    fn focus(&mut self) -> UiResult<()> {
        Ok(())
    }

    fn hover(&mut self) -> UiResult<()> {
        Ok(())
    }

    fn scroll_into_view(&mut self) -> UiResult<()> {
        Ok(())
    }

    fn select_by_label(&mut self, label: &str) -> UiResult<()> {
        self.state.lock().unwrap().value = Some(label.to_string());
        Ok(())
    }

    fn select_by_value(&mut self, value: &str) -> UiResult<()> {
        self.state.lock().unwrap().value = Some(value.to_string());
        Ok(())
    }

    fn upload(&mut self, path: &Path) -> UiResult<()> {
        self.state.lock().unwrap().uploads.push(path.to_path_buf());
        Ok(())
    }

    fn wait_for(&mut self, state: VisibilityState, timeout: Duration) -> UiResult<()> {
        let shared = Arc::clone(&self.state);
        poll_state("wait_for", "pinned handle", state, timeout, move || {
            shared.lock().unwrap().visible()
        })
    }
}
