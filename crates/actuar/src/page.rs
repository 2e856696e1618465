//! Action-contract adapter for page-automation engines.
//!
//! The engine is addressed by dialect selector strings and auto-waits on
//! element-addressed operations itself, so this adapter carries no polling
//! loop and no read retry. Pinned handles from `collect` are the one place
//! staleness can still surface.

use std::path::Path;
use std::time::Duration;

use crate::actions::UiActions;
use crate::context::{ElementContext, Resolution};
use crate::driver::{PageDriver, PageHandle, VisibilityState};
use crate::keys;
use crate::result::{UiError, UiResult, CURRENT_CONTEXT};
use crate::selector::page_selector;
use crate::target::Target;

/// [`UiActions`] over a [`PageDriver`].
pub struct PageActions<P: PageDriver> {
    page: P,
    context: ElementContext<P::Handle>,
    closed: bool,
}

impl<P: PageDriver> PageActions<P> {
    /// Wrap a page engine.
    #[must_use]
    pub fn new(page: P) -> Self {
        Self {
            page,
            context: ElementContext::new(),
            closed: false,
        }
    }

    /// Resolve the context and dispatch to the pinned handle or to the
    /// engine with the rendered selector.
    fn dispatch<T>(
        &mut self,
        op: &'static str,
        on_handle: impl FnOnce(&mut P::Handle) -> UiResult<T>,
        on_page: impl FnOnce(&mut P, &str) -> UiResult<T>,
    ) -> UiResult<T> {
        match self.context.resolve(op)? {
            Resolution::Pinned(index) => {
                let handle = self
                    .context
                    .handle_mut(index)
                    .ok_or(UiError::MissingContext { op })?;
                on_handle(handle).map_err(|e| e.tagged(op, CURRENT_CONTEXT))
            }
            Resolution::Fresh(target) => {
                target.validate()?;
                let rendered = page_selector(&target);
                on_page(&mut self.page, &rendered).map_err(|e| e.tagged(op, &rendered))
            }
        }
    }
}

impl<P: PageDriver> UiActions for PageActions<P> {
    fn open(&mut self, url: &str) -> UiResult<()> {
        tracing::debug!(url, "open");
        self.page.goto(url)
    }

    fn back(&mut self) -> UiResult<()> {
        self.page.back()
    }

    fn forward(&mut self) -> UiResult<()> {
        self.page.forward()
    }

    fn refresh(&mut self) -> UiResult<()> {
        self.page.reload()
    }

    fn title(&mut self) -> UiResult<String> {
        self.page.title()
    }

    fn url(&mut self) -> UiResult<String> {
        self.page.url()
    }

    fn screenshot(&mut self, path: &Path) -> UiResult<()> {
        if path.as_os_str().is_empty() {
            return Err(UiError::InvalidArgument {
                message: "screenshot path must not be empty".to_string(),
            });
        }
        let png = self.page.screenshot_png()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, png)?;
        Ok(())
    }

    fn close(&mut self) -> UiResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.context.clear();
        tracing::debug!("close session");
        self.page.close()
    }

    fn focus(&mut self, target: &Target) -> UiResult<()> {
        target.validate()?;
        let rendered = page_selector(target);
        tracing::debug!(target = %target, selector = %rendered, "focus");
        // the engine would wait for a match instead of failing, so absence
        // is checked with a non-waiting count first
        let count = self
            .page
            .count(&rendered)
            .map_err(|e| e.tagged("focus", &rendered))?;
        if count == 0 {
            return Err(UiError::NotFound {
                op: "focus",
                selector: rendered,
            });
        }
        self.page
            .focus(&rendered)
            .map_err(|e| e.tagged("focus", &rendered))?;
        self.context.set_focused(target.clone());
        Ok(())
    }

    fn collect(&mut self, target: &Target) -> UiResult<usize> {
        target.validate()?;
        let rendered = page_selector(target);
        let handles = self
            .page
            .collect(&rendered)
            .map_err(|e| e.tagged("collect", &rendered))?;
        let count = self.context.set_collected(handles);
        tracing::debug!(target = %target, count, "collect");
        Ok(count)
    }

    fn choose(&mut self, index: usize) -> UiResult<()> {
        self.context.choose(index)
    }

    fn size(&self) -> usize {
        self.context.size()
    }

    fn click_current(&mut self) -> UiResult<()> {
        self.dispatch("click", PageHandle::click, |p, s| p.click(s))
    }

    fn double_click_current(&mut self) -> UiResult<()> {
        self.dispatch("double_click", PageHandle::dblclick, |p, s| p.dblclick(s))
    }

    fn compose_current(&mut self, text: &str) -> UiResult<()> {
        self.dispatch("compose", |h| h.fill(text), |p, s| p.fill(s, text))
    }

    fn clear_current(&mut self) -> UiResult<()> {
        self.dispatch("clear", PageHandle::clear, |p, s| p.fill(s, ""))
    }

    fn get_text_current(&mut self) -> UiResult<String> {
        self.dispatch("get_text", PageHandle::text, |p, s| p.text(s))
    }

    fn value_current(&mut self) -> UiResult<String> {
        self.dispatch(
            "value",
            |h| match h.input_value() {
                Ok(value) => Ok(value),
                Err(_) => h.text(),
            },
            |p, s| match p.input_value(s) {
                Ok(value) => Ok(value),
                Err(_) => p.text(s),
            },
        )
    }

    fn attribute_current(&mut self, attr: &str) -> UiResult<Option<String>> {
        self.dispatch(
            "attribute",
            |h| h.attribute(attr),
            |p, s| p.attribute(s, attr),
        )
    }

    fn exists_current(&mut self) -> UiResult<bool> {
        self.dispatch(
            "exists",
            // a probe that answers proves attachment
            |h| Ok(h.is_visible().is_ok()),
            |p, s| Ok(matches!(p.count(s), Ok(n) if n > 0)),
        )
    }

    fn is_visible_current(&mut self) -> UiResult<bool> {
        self.dispatch(
            "is_visible",
            |h| Ok(h.is_visible().unwrap_or(false)),
            |p, s| Ok(p.is_visible(s).unwrap_or(false)),
        )
    }

    fn wait_for_visible_current(&mut self, timeout: Duration) -> UiResult<()> {
        self.dispatch(
            "wait_for_visible",
            |h| h.wait_for(VisibilityState::Visible, timeout),
            |p, s| p.wait_for(s, VisibilityState::Visible, timeout),
        )
    }

    fn wait_for_hidden_current(&mut self, timeout: Duration) -> UiResult<()> {
        self.dispatch(
            "wait_for_hidden",
            |h| h.wait_for(VisibilityState::Hidden, timeout),
            |p, s| p.wait_for(s, VisibilityState::Hidden, timeout),
        )
    }

    fn hover_current(&mut self) -> UiResult<()> {
        self.dispatch("hover", PageHandle::hover, |p, s| p.hover(s))
    }

    fn press_current(&mut self, key: &str) -> UiResult<()> {
        let mapped = keys::page_key(key);
        self.dispatch("press", |h| h.press(&mapped), |p, s| p.press(s, &mapped))
    }

    fn press_chord_current(&mut self, chord: &[&str]) -> UiResult<()> {
        // the engine holds no modifier state across presses, so a chord is
        // delivered as one press per key in order
        for key in chord {
            self.press_current(key)?;
        }
        Ok(())
    }

    fn select_by_text_current(&mut self, label: &str) -> UiResult<()> {
        self.dispatch(
            "select_by_text",
            |h| h.select_by_label(label),
            |p, s| p.select_label(s, label),
        )
    }

    fn select_by_value_current(&mut self, value: &str) -> UiResult<()> {
        self.dispatch(
            "select_by_value",
            |h| h.select_by_value(value),
            |p, s| p.select_value(s, value),
        )
    }

    fn set_checked_current(&mut self, checked: bool) -> UiResult<()> {
        self.dispatch(
            "set_checked",
            |h| {
                if h.is_checked()? == checked {
                    Ok(())
                } else {
                    h.click()
                }
            },
            |p, s| {
                if p.is_checked(s)? == checked {
                    Ok(())
                } else {
                    p.click(s)
                }
            },
        )
    }

    fn upload_file_current(&mut self, path: &Path) -> UiResult<()> {
        if path.as_os_str().is_empty() {
            return Err(UiError::InvalidArgument {
                message: "upload path must not be empty".to_string(),
            });
        }
        self.dispatch("upload_file", |h| h.upload(path), |p, s| p.upload(s, path))
    }

    fn scroll_into_view_current(&mut self) -> UiResult<()> {
        self.dispatch("scroll_into_view", PageHandle::scroll_into_view, |p, s| {
            p.scroll_into_view(s)
        })
    }
}

impl<P: PageDriver> std::fmt::Debug for PageActions<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageActions")
            .field("current", &self.context.current())
            .field("chosen", &self.context.chosen())
            .field("collected", &self.context.size())
            .field("closed", &self.closed)
            .finish()
    }
}
