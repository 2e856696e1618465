//! Chrome `DevTools` Protocol binding for the page-automation family.
//!
//! [`CdpPage`] drives one Chromium instance over CDP and implements
//! [`PageDriver`]. Dialect selectors are compiled to JavaScript query
//! expressions and run through `Runtime.evaluate`; element-addressed
//! operations poll for a match first, which gives this backend the same
//! auto-waiting shape as a dedicated page engine. Collected elements are
//! pinned into a page-global array and addressed by slot, so pinned handles
//! survive page mutation until the element detaches or the page navigates.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::driver::{PageDriver, PageHandle, VisibilityState};
use crate::result::{UiError, UiResult};
use crate::session::SessionConfig;

/// Page-global array collected elements are pinned into.
const PIN_ARRAY: &str = "window.__actuar_pins";

/// JS fragment computing whether `el` is rendered, shared by every
/// visibility probe.
const VISIBLE_BODY: &str = "const s = window.getComputedStyle(el); \
     const r = el.getBoundingClientRect(); \
     return s.display !== 'none' && s.visibility !== 'hidden' \
         && r.width > 0 && r.height > 0;";

/// JS expression for the first element matching a dialect selector, or
/// null.
fn first_expr(selector: &str) -> String {
    if let Some(s) = selector.strip_prefix("xpath=") {
        format!(
            "document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
        )
    } else if let Some(t) = selector.strip_prefix("text=") {
        format!(
            "(Array.from(document.querySelectorAll('*')).find(el => {}) ?? null)",
            own_text_matches(t)
        )
    } else {
        let css = rewrite_role(selector);
        format!("document.querySelector({css:?})")
    }
}

/// JS expression for an array of every element matching a dialect
/// selector.
fn all_expr(selector: &str) -> String {
    if let Some(s) = selector.strip_prefix("xpath=") {
        format!(
            "(() => {{ const r = document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
             const out = []; for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); return out; }})()"
        )
    } else if let Some(t) = selector.strip_prefix("text=") {
        format!(
            "Array.from(document.querySelectorAll('*')).filter(el => {})",
            own_text_matches(t)
        )
    } else {
        let css = rewrite_role(selector);
        format!("Array.from(document.querySelectorAll({css:?}))")
    }
}

/// JS expression counting matches for a dialect selector.
fn count_expr(selector: &str) -> String {
    if let Some(s) = selector.strip_prefix("xpath=") {
        format!(
            "document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength"
        )
    } else {
        format!("({}).length", all_expr(selector))
    }
}

/// Predicate over `el` matching the text dialect: the element's own text
/// nodes, whitespace-normalized, equal the wanted string.
fn own_text_matches(text: &str) -> String {
    format!(
        "Array.from(el.childNodes).filter(n => n.nodeType === 3).map(n => n.textContent).join('').replace(/\\s+/g, ' ').trim() === {text:?}"
    )
}

/// The role dialect has no CSS prefix form, so it is rewritten to an
/// attribute selector here.
fn rewrite_role(selector: &str) -> String {
    selector.strip_prefix("role=").map_or_else(
        || selector.to_string(),
        |role| format!("[role=\"{}\"]", crate::selector::css_double_quoted(role)),
    )
}

fn visible_expr(selector: &str) -> String {
    format!(
        "(() => {{ const el = {}; if (!el) return false; {VISIBLE_BODY} }})()",
        first_expr(selector)
    )
}

fn backend(op: &'static str, err: &dyn std::fmt::Display) -> UiError {
    UiError::Backend {
        op,
        message: err.to_string(),
    }
}

/// One Chromium session driven over CDP.
pub struct CdpPage {
    runtime: Arc<Runtime>,
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl CdpPage {
    /// Launch Chromium and open a blank page.
    ///
    /// # Errors
    ///
    /// Launch or connection failures.
    pub fn launch(config: &SessionConfig) -> UiResult<Self> {
        let runtime = Runtime::new()?;

        let mut builder = BrowserConfig::builder();
        if !config.headless() {
            builder = builder.with_head();
        }
        let browser_config = builder.build().map_err(|message| UiError::Backend {
            op: "launch",
            message,
        })?;

        let (browser, mut events) = runtime
            .block_on(Browser::launch(browser_config))
            .map_err(|e| backend("launch", &e))?;

        let handler = runtime.spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = runtime
            .block_on(browser.new_page("about:blank"))
            .map_err(|e| backend("launch", &e))?;

        tracing::debug!(headless = config.headless(), "chromium session started");
        Ok(Self {
            runtime: Arc::new(runtime),
            browser,
            page,
            handler,
            wait_timeout: config.wait_timeout(),
            poll_interval: config.poll_interval(),
        })
    }

    /// Evaluate a JS expression and deserialize its value.
    fn eval<T: serde::de::DeserializeOwned>(&self, op: &'static str, js: String) -> UiResult<T> {
        let page = self.page.clone();
        self.runtime.block_on(async move {
            let result = page.evaluate(js).await.map_err(|e| backend(op, &e))?;
            result.into_value().map_err(|e| backend(op, &e))
        })
    }

    /// Poll until the selector has at least one match.
    fn await_first(&self, op: &'static str, selector: &str) -> UiResult<()> {
        let deadline = Instant::now() + self.wait_timeout;
        loop {
            let count: usize = self.eval(op, count_expr(selector))?;
            if count > 0 {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(UiError::Timeout {
                    op,
                    selector: selector.to_string(),
                    ms: self.wait_timeout.as_millis() as u64,
                });
            }
            std::thread::sleep(self.poll_interval);
        }
    }

    /// Wait for a match, then run `body` with `el` bound to the first one.
    fn act(&self, op: &'static str, selector: &str, body: &str) -> UiResult<serde_json::Value> {
        self.await_first(op, selector)?;
        let js = format!(
            "(() => {{ const el = {}; if (!el) return {{__gone: true}}; {body} }})()",
            first_expr(selector)
        );
        let value: serde_json::Value = self.eval(op, js)?;
        if value.get("__gone").is_some() {
            return Err(UiError::Backend {
                op,
                message: format!("element for {selector} vanished before the action ran"),
            });
        }
        Ok(value)
    }

    /// Resolve a JS expression to a remote object and attach `path` to it
    /// as the file-input selection.
    fn set_input_file(&self, op: &'static str, element_expr: String, path: &Path) -> UiResult<()> {
        // CDP rejects relative paths
        let file = std::fs::canonicalize(path)?.to_string_lossy().into_owned();
        let page = self.page.clone();
        self.runtime.block_on(async move {
            let eval = EvaluateParams::builder()
                .expression(element_expr)
                .build()
                .map_err(|message| UiError::Backend { op, message })?;
            let result = page.evaluate(eval).await.map_err(|e| backend(op, &e))?;
            let object_id = result.object().object_id.clone().ok_or(UiError::Backend {
                op,
                message: "file input is not addressable".to_string(),
            })?;
            let params = SetFileInputFilesParams::builder()
                .files(vec![file])
                .object_id(object_id)
                .build()
                .map_err(|message| UiError::Backend { op, message })?;
            page.execute(params).await.map_err(|e| backend(op, &e))?;
            Ok(())
        })
    }
}

impl PageDriver for CdpPage {
    type Handle = CdpHandle;

    fn goto(&mut self, url: &str) -> UiResult<()> {
        let page = self.page.clone();
        let url = url.to_string();
        self.runtime.block_on(async move {
            page.goto(url).await.map_err(|e| backend("open", &e))?;
            Ok(())
        })
    }

    fn back(&mut self) -> UiResult<()> {
        self.eval::<bool>("back", "(() => { history.back(); return true; })()".to_string())
            .map(|_| ())
    }

    fn forward(&mut self) -> UiResult<()> {
        self.eval::<bool>(
            "forward",
            "(() => { history.forward(); return true; })()".to_string(),
        )
        .map(|_| ())
    }

    fn reload(&mut self) -> UiResult<()> {
        self.eval::<bool>(
            "refresh",
            "(() => { location.reload(); return true; })()".to_string(),
        )
        .map(|_| ())
    }

    fn title(&mut self) -> UiResult<String> {
        self.eval("title", "document.title".to_string())
    }

    fn url(&mut self) -> UiResult<String> {
        self.eval("url", "window.location.href".to_string())
    }

    fn screenshot_png(&mut self) -> UiResult<Vec<u8>> {
        let page = self.page.clone();
        self.runtime.block_on(async move {
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();
            let screenshot = page
                .execute(params)
                .await
                .map_err(|e| backend("screenshot", &e))?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&screenshot.data)
                .map_err(|e| backend("screenshot", &e))
        })
    }

    fn close(&mut self) -> UiResult<()> {
        let mut first_failure: Option<UiError> = None;
        let mut note = |step: &str, err: UiError| {
            if first_failure.is_none() {
                first_failure = Some(UiError::Backend {
                    op: "close",
                    message: format!("{step} release failed: {err}"),
                });
            } else {
                tracing::warn!(step, error = %err, "release failure after the first");
            }
        };

        let page = self.page.clone();
        if let Err(e) = self
            .runtime
            .block_on(async move { page.close().await })
            .map_err(|e| backend("close", &e))
        {
            note("page", e);
        }

        let browser = &mut self.browser;
        if let Err(e) = self
            .runtime
            .block_on(browser.close())
            .map_err(|e| backend("close", &e))
        {
            note("browser", e);
        }

        self.handler.abort();
        first_failure.map_or(Ok(()), Err)
    }

    fn count(&mut self, selector: &str) -> UiResult<usize> {
        self.eval("count", count_expr(selector))
    }

    fn collect(&mut self, selector: &str) -> UiResult<Vec<CdpHandle>> {
        let js = format!(
            "(() => {{ const els = {}; {PIN_ARRAY} = {PIN_ARRAY} || []; \
             const start = {PIN_ARRAY}.length; \
             for (const el of els) {PIN_ARRAY}.push(el); \
             return [start, els.length]; }})()",
            all_expr(selector)
        );
        let (start, count): (usize, usize) = self.eval("collect", js)?;
        Ok((start..start + count)
            .map(|slot| CdpHandle {
                runtime: Arc::clone(&self.runtime),
                page: self.page.clone(),
                poll_interval: self.poll_interval,
                slot,
            })
            .collect())
    }

    fn focus(&mut self, selector: &str) -> UiResult<()> {
        self.act("focus", selector, "el.focus(); return true;")
            .map(|_| ())
    }

    fn click(&mut self, selector: &str) -> UiResult<()> {
        self.act(
            "click",
            selector,
            "el.scrollIntoView({block: 'center'}); el.click(); return true;",
        )
        .map(|_| ())
    }

    fn dblclick(&mut self, selector: &str) -> UiResult<()> {
        self.act("dblclick", selector, js_body::DBLCLICK).map(|_| ())
    }

    fn fill(&mut self, selector: &str, text: &str) -> UiResult<()> {
        self.act("fill", selector, &js_body::fill(text)).map(|_| ())
    }

    fn press(&mut self, selector: &str, key: &str) -> UiResult<()> {
        self.act("press", selector, &js_body::press(key)).map(|_| ())
    }

    fn text(&mut self, selector: &str) -> UiResult<String> {
        let value = self.act("get_text", selector, js_body::TEXT)?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn input_value(&mut self, selector: &str) -> UiResult<String> {
        let value = self.act("value", selector, js_body::INPUT_VALUE)?;
        if value.get("__not_input").is_some() {
            return Err(UiError::Backend {
                op: "value",
                message: format!("{selector} is not an input"),
            });
        }
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn attribute(&mut self, selector: &str, attr: &str) -> UiResult<Option<String>> {
        let value = self.act("attribute", selector, &js_body::attribute(attr))?;
        Ok(value.as_str().map(ToString::to_string))
    }

    fn is_visible(&mut self, selector: &str) -> UiResult<bool> {
        self.eval("is_visible", visible_expr(selector))
    }

    fn is_checked(&mut self, selector: &str) -> UiResult<bool> {
        let value = self.act("is_checked", selector, "return !!el.checked;")?;
        Ok(value.as_bool().unwrap_or(false))
    }

    fn select_label(&mut self, selector: &str, label: &str) -> UiResult<()> {
        let value = self.act("select_by_text", selector, &js_body::select_label(label))?;
        if value.get("__no_option").is_some() {
            return Err(UiError::Backend {
                op: "select_by_text",
                message: format!("no option labeled {label:?}"),
            });
        }
        Ok(())
    }

    fn select_value(&mut self, selector: &str, value_attr: &str) -> UiResult<()> {
        let value = self.act(
            "select_by_value",
            selector,
            &js_body::select_value(value_attr),
        )?;
        if value.get("__no_option").is_some() {
            return Err(UiError::Backend {
                op: "select_by_value",
                message: format!("no option with value {value_attr:?}"),
            });
        }
        Ok(())
    }

    fn upload(&mut self, selector: &str, path: &Path) -> UiResult<()> {
        self.await_first("upload_file", selector)?;
        self.set_input_file("upload_file", first_expr(selector), path)
    }

    fn hover(&mut self, selector: &str) -> UiResult<()> {
        self.act("hover", selector, js_body::HOVER).map(|_| ())
    }

    fn scroll_into_view(&mut self, selector: &str) -> UiResult<()> {
        self.act(
            "scroll_into_view",
            selector,
            "el.scrollIntoView({block: 'center'}); return true;",
        )
        .map(|_| ())
    }

    fn wait_for(
        &mut self,
        selector: &str,
        state: VisibilityState,
        timeout: Duration,
    ) -> UiResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let visible: bool = self.eval("wait_for", visible_expr(selector))?;
            let satisfied = match state {
                VisibilityState::Visible => visible,
                VisibilityState::Hidden => !visible,
            };
            if satisfied {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(UiError::Timeout {
                    op: "wait_for",
                    selector: selector.to_string(),
                    ms: timeout.as_millis() as u64,
                });
            }
            std::thread::sleep(self.poll_interval);
        }
    }
}

impl std::fmt::Debug for CdpPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpPage")
            .field("wait_timeout", &self.wait_timeout)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

/// Pinned handle addressing one slot of the page-global pin array.
pub struct CdpHandle {
    runtime: Arc<Runtime>,
    page: Page,
    poll_interval: Duration,
    slot: usize,
}

impl CdpHandle {
    /// Run `body` with `el` bound to the pinned element.
    ///
    /// A missing or detached element surfaces as `Stale`.
    fn eval_on(&self, op: &'static str, body: &str) -> UiResult<serde_json::Value> {
        let js = format!(
            "(() => {{ const el = ({PIN_ARRAY} || [])[{slot}]; \
             if (!el || !el.isConnected) return {{__stale: true}}; {body} }})()",
            slot = self.slot
        );
        let page = self.page.clone();
        let value: serde_json::Value = self.runtime.block_on(async move {
            let result = page.evaluate(js).await.map_err(|e| backend(op, &e))?;
            result.into_value().map_err(|e| backend(op, &e))
        })?;
        if value.get("__stale").is_some() {
            return Err(UiError::Stale {
                op,
                selector: format!("pinned element {}", self.slot),
            });
        }
        Ok(value)
    }
}

impl PageHandle for CdpHandle {
    fn click(&mut self) -> UiResult<()> {
        self.eval_on(
            "click",
            "el.scrollIntoView({block: 'center'}); el.click(); return true;",
        )
        .map(|_| ())
    }

    fn dblclick(&mut self) -> UiResult<()> {
        self.eval_on("dblclick", js_body::DBLCLICK).map(|_| ())
    }

    fn fill(&mut self, text: &str) -> UiResult<()> {
        self.eval_on("fill", &js_body::fill(text)).map(|_| ())
    }

    fn clear(&mut self) -> UiResult<()> {
        self.eval_on("clear", &js_body::fill("")).map(|_| ())
    }

    fn press(&mut self, key: &str) -> UiResult<()> {
        self.eval_on("press", &js_body::press(key)).map(|_| ())
    }

    fn text(&mut self) -> UiResult<String> {
        let value = self.eval_on("get_text", js_body::TEXT)?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn input_value(&mut self) -> UiResult<String> {
        let value = self.eval_on("value", js_body::INPUT_VALUE)?;
        if value.get("__not_input").is_some() {
            return Err(UiError::Backend {
                op: "value",
                message: "pinned element is not an input".to_string(),
            });
        }
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn attribute(&mut self, attr: &str) -> UiResult<Option<String>> {
        let value = self.eval_on("attribute", &js_body::attribute(attr))?;
        Ok(value.as_str().map(ToString::to_string))
    }

    fn is_visible(&mut self) -> UiResult<bool> {
        let value = self.eval_on("is_visible", VISIBLE_BODY)?;
        Ok(value.as_bool().unwrap_or(false))
    }

    fn is_checked(&mut self) -> UiResult<bool> {
        let value = self.eval_on("is_checked", "return !!el.checked;")?;
        Ok(value.as_bool().unwrap_or(false))
    }

    fn focus(&mut self) -> UiResult<()> {
        self.eval_on("focus", "el.focus(); return true;").map(|_| ())
    }

    fn hover(&mut self) -> UiResult<()> {
        self.eval_on("hover", js_body::HOVER).map(|_| ())
    }

    fn scroll_into_view(&mut self) -> UiResult<()> {
        self.eval_on(
            "scroll_into_view",
            "el.scrollIntoView({block: 'center'}); return true;",
        )
        .map(|_| ())
    }

    fn select_by_label(&mut self, label: &str) -> UiResult<()> {
        let value = self.eval_on("select_by_text", &js_body::select_label(label))?;
        if value.get("__no_option").is_some() {
            return Err(UiError::Backend {
                op: "select_by_text",
                message: format!("no option labeled {label:?}"),
            });
        }
        Ok(())
    }

    fn select_by_value(&mut self, value_attr: &str) -> UiResult<()> {
        let value = self.eval_on("select_by_value", &js_body::select_value(value_attr))?;
        if value.get("__no_option").is_some() {
            return Err(UiError::Backend {
                op: "select_by_value",
                message: format!("no option with value {value_attr:?}"),
            });
        }
        Ok(())
    }

    fn upload(&mut self, path: &Path) -> UiResult<()> {
        // probe attachment first so staleness surfaces as Stale, not as a
        // protocol error
        self.eval_on("upload_file", "return true;")?;
        let element_expr = format!("({PIN_ARRAY} || [])[{}]", self.slot);
        let file = std::fs::canonicalize(path)?.to_string_lossy().into_owned();
        let page = self.page.clone();
        self.runtime.block_on(async move {
            let eval = EvaluateParams::builder()
                .expression(element_expr)
                .build()
                .map_err(|message| UiError::Backend {
                    op: "upload_file",
                    message,
                })?;
            let result = page
                .evaluate(eval)
                .await
                .map_err(|e| backend("upload_file", &e))?;
            let object_id = result.object().object_id.clone().ok_or(UiError::Backend {
                op: "upload_file",
                message: "file input is not addressable".to_string(),
            })?;
            let params = SetFileInputFilesParams::builder()
                .files(vec![file])
                .object_id(object_id)
                .build()
                .map_err(|message| UiError::Backend {
                    op: "upload_file",
                    message,
                })?;
            page.execute(params)
                .await
                .map_err(|e| backend("upload_file", &e))?;
            Ok(())
        })
    }

    fn wait_for(&mut self, state: VisibilityState, timeout: Duration) -> UiResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let probe = self.eval_on("wait_for", VISIBLE_BODY);
            let visible = match probe {
                Ok(value) => value.as_bool().unwrap_or(false),
                // detached counts as gone, which only the hidden wait
                // accepts
                Err(e) if e.is_stale() => {
                    return match state {
                        VisibilityState::Hidden => Ok(()),
                        VisibilityState::Visible => Err(e),
                    };
                }
                Err(e) => return Err(e),
            };
            let satisfied = match state {
                VisibilityState::Visible => visible,
                VisibilityState::Hidden => !visible,
            };
            if satisfied {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(UiError::Timeout {
                    op: "wait_for",
                    selector: format!("pinned element {}", self.slot),
                    ms: timeout.as_millis() as u64,
                });
            }
            std::thread::sleep(self.poll_interval);
        }
    }
}

impl std::fmt::Debug for CdpHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpHandle").field("slot", &self.slot).finish()
    }
}

/// JS action bodies shared by the selector and handle paths. Each runs
/// with `el` bound and returns a JSON-serializable value.
mod js_body {
    pub const DBLCLICK: &str = "el.scrollIntoView({block: 'center'}); el.click(); el.click(); \
         el.dispatchEvent(new MouseEvent('dblclick', {bubbles: true})); return true;";

    pub const TEXT: &str = "return el.innerText ?? el.textContent ?? '';";

    pub const INPUT_VALUE: &str =
        "if (!('value' in el)) return {__not_input: true}; return String(el.value);";

    pub const HOVER: &str = "el.scrollIntoView({block: 'center'}); \
         el.dispatchEvent(new MouseEvent('mouseover', {bubbles: true})); \
         el.dispatchEvent(new MouseEvent('mouseenter')); return true;";

    pub fn fill(text: &str) -> String {
        format!(
            "el.focus(); el.value = {text:?}; \
             el.dispatchEvent(new Event('input', {{bubbles: true}})); \
             el.dispatchEvent(new Event('change', {{bubbles: true}})); return true;"
        )
    }

    pub fn press(key: &str) -> String {
        format!(
            "el.focus(); \
             el.dispatchEvent(new KeyboardEvent('keydown', {{key: {key:?}, bubbles: true}})); \
             el.dispatchEvent(new KeyboardEvent('keypress', {{key: {key:?}, bubbles: true}})); \
             if ({key:?}.length === 1 && 'value' in el) {{ el.value += {key:?}; \
             el.dispatchEvent(new Event('input', {{bubbles: true}})); }} \
             el.dispatchEvent(new KeyboardEvent('keyup', {{key: {key:?}, bubbles: true}})); \
             return true;"
        )
    }

    pub fn attribute(attr: &str) -> String {
        format!("return el.getAttribute({attr:?});")
    }

    pub fn select_label(label: &str) -> String {
        format!(
            "const opts = Array.from(el.options ?? []); \
             const m = opts.find(o => o.label === {label:?} || o.textContent.trim() === {label:?}); \
             if (!m) return {{__no_option: true}}; \
             el.value = m.value; el.dispatchEvent(new Event('change', {{bubbles: true}})); return true;"
        )
    }

    pub fn select_value(value: &str) -> String {
        format!(
            "const opts = Array.from(el.options ?? []); \
             const m = opts.find(o => o.value === {value:?}); \
             if (!m) return {{__no_option: true}}; \
             el.value = m.value; el.dispatchEvent(new Event('change', {{bubbles: true}})); return true;"
        )
    }
}
