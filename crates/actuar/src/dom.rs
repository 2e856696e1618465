//! Action-contract adapter for DOM-driver backends.
//!
//! The driver hands out element handles for native CSS/XPath lookups and
//! does no waiting of its own, so this adapter supplies the polling
//! visibility waits and the transparent stale-read retry.

use std::path::Path;
use std::time::Duration;

use crate::actions::UiActions;
use crate::context::{ElementContext, Resolution};
use crate::driver::{DomDriver, DomElement};
use crate::keys;
use crate::result::{UiError, UiResult, CURRENT_CONTEXT};
use crate::retry::RetryPolicy;
use crate::selector::dom_selector;
use crate::session::SessionConfig;
use crate::target::Target;
use crate::wait::{poll_until, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

/// [`UiActions`] over a [`DomDriver`].
pub struct DomActions<D: DomDriver> {
    driver: D,
    context: ElementContext<D::Element>,
    wait_timeout: Duration,
    poll_interval: Duration,
    read_retry: RetryPolicy,
    closed: bool,
}

impl<D: DomDriver> DomActions<D> {
    /// Wrap a driver with default timing (5s waits, 50ms polls).
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            context: ElementContext::new(),
            wait_timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            read_retry: RetryPolicy::stale_reads(),
            closed: false,
        }
    }

    /// Wrap a driver with timing from a session config.
    #[must_use]
    pub fn with_config(driver: D, config: &SessionConfig) -> Self {
        let mut actions = Self::new(driver);
        actions.wait_timeout = config.wait_timeout();
        actions.poll_interval = config.poll_interval();
        actions
    }

    /// Resolve the context and run `f` on the element it designates.
    ///
    /// A pinned handle is used as stored; a focused target is re-resolved
    /// with a single non-waiting lookup. Errors out of `f` are re-tagged
    /// with the contract operation and the rendered selector.
    fn with_element<T>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut D::Element) -> UiResult<T>,
    ) -> UiResult<T> {
        match self.context.resolve(op)? {
            Resolution::Pinned(index) => {
                let el = self
                    .context
                    .handle_mut(index)
                    .ok_or(UiError::MissingContext { op })?;
                f(el).map_err(|e| e.tagged(op, CURRENT_CONTEXT))
            }
            Resolution::Fresh(target) => {
                target.validate()?;
                let selector = dom_selector(&target);
                let rendered = selector.to_string();
                let found = self
                    .driver
                    .find(&selector)
                    .map_err(|e| e.tagged(op, &rendered))?;
                match found {
                    Some(mut el) => f(&mut el).map_err(|e| e.tagged(op, &rendered)),
                    None => Err(UiError::NotFound {
                        op,
                        selector: rendered,
                    }),
                }
            }
        }
    }

    fn wait_for_state(
        &mut self,
        op: &'static str,
        visible: bool,
        timeout: Duration,
    ) -> UiResult<()> {
        let ms = timeout.as_millis() as u64;
        let interval = self.poll_interval;
        match self.context.resolve(op)? {
            Resolution::Pinned(index) => {
                let el = self
                    .context
                    .handle_mut(index)
                    .ok_or(UiError::MissingContext { op })?;
                let met = poll_until(timeout, interval, || match el.is_displayed() {
                    Ok(displayed) => Ok(displayed == visible),
                    // a detached element is gone, which only the hidden
                    // wait accepts
                    Err(e) if e.is_stale() => Ok(!visible),
                    Err(e) => Err(e.tagged(op, CURRENT_CONTEXT)),
                })?;
                if met {
                    Ok(())
                } else {
                    Err(UiError::Timeout {
                        op,
                        selector: CURRENT_CONTEXT.to_string(),
                        ms,
                    })
                }
            }
            Resolution::Fresh(target) => {
                target.validate()?;
                let selector = dom_selector(&target);
                let rendered = selector.to_string();
                let driver = &mut self.driver;
                let met = poll_until(timeout, interval, || match driver.find(&selector) {
                    Ok(Some(mut el)) => match el.is_displayed() {
                        Ok(displayed) => Ok(displayed == visible),
                        Err(e) if e.is_stale() => Ok(!visible),
                        Err(e) => Err(e.tagged(op, &rendered)),
                    },
                    // absent counts as not visible
                    Ok(None) => Ok(!visible),
                    Err(e) => Err(e.tagged(op, &rendered)),
                })?;
                if met {
                    Ok(())
                } else {
                    Err(UiError::Timeout {
                        op,
                        selector: rendered,
                        ms,
                    })
                }
            }
        }
    }
}

impl<D: DomDriver> UiActions for DomActions<D> {
    fn open(&mut self, url: &str) -> UiResult<()> {
        tracing::debug!(url, "open");
        self.driver.navigate(url)
    }

    fn back(&mut self) -> UiResult<()> {
        self.driver.back()
    }

    fn forward(&mut self) -> UiResult<()> {
        self.driver.forward()
    }

    fn refresh(&mut self) -> UiResult<()> {
        self.driver.refresh()
    }

    fn title(&mut self) -> UiResult<String> {
        self.driver.title()
    }

    fn url(&mut self) -> UiResult<String> {
        self.driver.url()
    }

    fn screenshot(&mut self, path: &Path) -> UiResult<()> {
        if path.as_os_str().is_empty() {
            return Err(UiError::InvalidArgument {
                message: "screenshot path must not be empty".to_string(),
            });
        }
        let png = self.driver.screenshot_png()?;
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
        self.driver.quit()
    }

    fn focus(&mut self, target: &Target) -> UiResult<()> {
        target.validate()?;
        let selector = dom_selector(target);
        let rendered = selector.to_string();
        tracing::debug!(target = %target, selector = %rendered, "focus");
        let found = self
            .driver
            .find(&selector)
            .map_err(|e| e.tagged("focus", &rendered))?;
        let Some(mut el) = found else {
            return Err(UiError::NotFound {
                op: "focus",
                selector: rendered,
            });
        };
        el.focus().map_err(|e| e.tagged("focus", &rendered))?;
        self.context.set_focused(target.clone());
        Ok(())
    }

    fn collect(&mut self, target: &Target) -> UiResult<usize> {
        target.validate()?;
        let selector = dom_selector(target);
        let rendered = selector.to_string();
        let handles = self
            .driver
            .find_all(&selector)
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
        self.with_element("click", |el| el.click())
    }

    fn double_click_current(&mut self) -> UiResult<()> {
        self.with_element("double_click", |el| el.double_click())
    }

    fn compose_current(&mut self, text: &str) -> UiResult<()> {
        self.with_element("compose", |el| {
            el.clear()?;
            el.send_keys(text)
        })
    }

    fn clear_current(&mut self) -> UiResult<()> {
        self.with_element("clear", |el| el.clear())
    }

    fn get_text_current(&mut self) -> UiResult<String> {
        let retry = self.read_retry;
        retry.run(
            || {
                // navigation can replace the element between the visibility
                // wait and the read, so both sit inside the retry
                self.wait_for_state("wait_for_visible", true, self.wait_timeout)?;
                self.with_element("get_text", |el| el.text())
            },
            UiError::is_stale,
        )
    }

    fn value_current(&mut self) -> UiResult<String> {
        let retry = self.read_retry;
        retry.run(
            || {
                self.with_element("value", |el| match el.attribute("value") {
                    Ok(Some(value)) => Ok(value),
                    Ok(None) | Err(_) => el.text(),
                })
            },
            UiError::is_stale,
        )
    }

    fn attribute_current(&mut self, attr: &str) -> UiResult<Option<String>> {
        self.with_element("attribute", |el| el.attribute(attr))
    }

    fn exists_current(&mut self) -> UiResult<bool> {
        match self.context.resolve("exists")? {
            Resolution::Pinned(index) => {
                let el = self
                    .context
                    .handle_mut(index)
                    .ok_or(UiError::MissingContext { op: "exists" })?;
                // a probe that answers at all proves attachment; only a
                // stale or failed probe counts as absent
                Ok(el.is_displayed().is_ok())
            }
            Resolution::Fresh(target) => {
                target.validate()?;
                let selector = dom_selector(&target);
                match self.driver.find_all(&selector) {
                    Ok(matches) => Ok(!matches.is_empty()),
                    Err(_) => Ok(false),
                }
            }
        }
    }

    fn is_visible_current(&mut self) -> UiResult<bool> {
        match self.context.resolve("is_visible")? {
            Resolution::Pinned(index) => {
                let el = self
                    .context
                    .handle_mut(index)
                    .ok_or(UiError::MissingContext { op: "is_visible" })?;
                Ok(el.is_displayed().unwrap_or(false))
            }
            Resolution::Fresh(target) => {
                target.validate()?;
                let selector = dom_selector(&target);
                match self.driver.find(&selector) {
                    Ok(Some(mut el)) => Ok(el.is_displayed().unwrap_or(false)),
                    // absent and broken probes both read as not visible
                    Ok(None) | Err(_) => Ok(false),
                }
            }
        }
    }

    fn wait_for_visible_current(&mut self, timeout: Duration) -> UiResult<()> {
        self.wait_for_state("wait_for_visible", true, timeout)
    }

    fn wait_for_hidden_current(&mut self, timeout: Duration) -> UiResult<()> {
        self.wait_for_state("wait_for_hidden", false, timeout)
    }

    fn hover_current(&mut self) -> UiResult<()> {
        self.with_element("hover", |el| el.hover())
    }

    fn press_current(&mut self, key: &str) -> UiResult<()> {
        let sequence = keys::dom_sequence(key);
        self.with_element("press", |el| el.send_keys(&sequence))
    }

    fn press_chord_current(&mut self, chord: &[&str]) -> UiResult<()> {
        if chord.is_empty() {
            return Ok(());
        }
        let sequence = keys::dom_chord(chord);
        self.with_element("press", |el| el.send_keys(&sequence))
    }

    fn select_by_text_current(&mut self, label: &str) -> UiResult<()> {
        self.with_element("select_by_text", |el| el.select_by_label(label))
    }

    fn select_by_value_current(&mut self, value: &str) -> UiResult<()> {
        self.with_element("select_by_value", |el| el.select_by_value(value))
    }

    fn set_checked_current(&mut self, checked: bool) -> UiResult<()> {
        self.with_element("set_checked", |el| {
            if el.is_selected()? != checked {
                el.click()
            } else {
                Ok(())
            }
        })
    }

    fn upload_file_current(&mut self, path: &Path) -> UiResult<()> {
        if path.as_os_str().is_empty() {
            return Err(UiError::InvalidArgument {
                message: "upload path must not be empty".to_string(),
            });
        }
        self.with_element("upload_file", |el| el.upload(path))
    }

    fn scroll_into_view_current(&mut self) -> UiResult<()> {
        self.with_element("scroll_into_view", |el| el.scroll_into_view())
    }
}

impl<D: DomDriver> std::fmt::Debug for DomActions<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomActions")
            .field("current", &self.context.current())
            .field("chosen", &self.context.chosen())
            .field("collected", &self.context.size())
            .field("closed", &self.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Elem, FakeDom};
    use crate::target::{css, id, text};

    fn session(dom: &FakeDom) -> DomActions<FakeDom> {
        DomActions::new(dom.clone())
    }

    mod context_tests {
        use super::*;

        #[test]
        fn focus_then_zero_arg_ops_act_on_the_target() {
            let dom = FakeDom::new();
            dom.stage("#name", Elem::new().with_value(""));
            let mut ui = session(&dom);

            ui.focus(&css("#name")).unwrap();
            ui.compose_current("Bob").unwrap();
            assert_eq!(ui.value_current().unwrap(), "Bob");
        }

        #[test]
        fn focus_on_absent_element_is_not_found_and_keeps_context() {
            let dom = FakeDom::new();
            dom.stage("#name", Elem::new());
            let mut ui = session(&dom);
            ui.focus(&css("#name")).unwrap();

            let err = ui.focus(&css("#missing")).unwrap_err();
            assert!(err.is_not_found());
            // previous focus still drives zero-argument operations
            ui.click_current().unwrap();
            assert_eq!(dom.clicks("#name"), 1);
        }

        #[test]
        fn zero_arg_without_context_is_missing_context() {
            let dom = FakeDom::new();
            let mut ui = session(&dom);
            let err = ui.click_current().unwrap_err();
            assert!(matches!(err, UiError::MissingContext { op: "click" }));
        }

        #[test]
        fn collect_size_choose_click_acts_on_first_only() {
            let dom = FakeDom::new();
            dom.stage(".item", Elem::new().with_text("a"));
            dom.stage(".item", Elem::new().with_text("b"));
            dom.stage(".item", Elem::new().with_text("c"));
            let mut ui = session(&dom);

            assert_eq!(ui.collect(&css(".item")).unwrap(), 3);
            assert_eq!(ui.size(), 3);
            ui.choose(0).unwrap();
            ui.click_current().unwrap();
            assert_eq!(dom.nth_clicks(".item", 0), 1);
            assert_eq!(dom.nth_clicks(".item", 1), 0);
            assert_eq!(dom.nth_clicks(".item", 2), 0);
        }

        #[test]
        fn choose_out_of_range_and_before_collect() {
            let dom = FakeDom::new();
            dom.stage(".item", Elem::new());
            let mut ui = session(&dom);

            assert!(matches!(
                ui.choose(0).unwrap_err(),
                UiError::MissingContext { .. }
            ));
            ui.collect(&css(".item")).unwrap();
            assert!(ui.choose(0).is_ok());
            assert!(matches!(
                ui.choose(1).unwrap_err(),
                UiError::IndexOutOfRange { index: 1, len: 1 }
            ));
        }

        #[test]
        fn two_arg_form_discards_a_collection_pin() {
            let dom = FakeDom::new();
            dom.stage(".item", Elem::new());
            dom.stage(".item", Elem::new());
            dom.stage("#save", Elem::new());
            let mut ui = session(&dom);

            ui.collect(&css(".item")).unwrap();
            ui.choose(1).unwrap();
            // sugar focuses #save first, so the pin is gone
            ui.click(&css("#save")).unwrap();
            assert_eq!(dom.clicks("#save"), 1);
            assert_eq!(dom.nth_clicks(".item", 1), 0);
            // and the follow-up zero-arg call re-resolves #save
            ui.click_current().unwrap();
            assert_eq!(dom.clicks("#save"), 2);
        }

        #[test]
        fn empty_target_value_is_rejected_before_the_backend() {
            let dom = FakeDom::new();
            let mut ui = session(&dom);
            let err = ui.focus(&css("")).unwrap_err();
            assert!(matches!(err, UiError::InvalidArgument { .. }));
            assert!(dom.calls().is_empty());
        }
    }

    mod read_tests {
        use super::*;

        #[test]
        fn get_text_recovers_from_transient_staleness() {
            let dom = FakeDom::new();
            dom.stage("#status", Elem::new().with_text("ready").stale_for(2));
            let mut ui = session(&dom);

            ui.focus(&css("#status")).unwrap();
            assert_eq!(ui.get_text_current().unwrap(), "ready");
        }

        #[test]
        fn get_text_surfaces_staleness_once_the_budget_is_gone() {
            let dom = FakeDom::new();
            dom.stage("#status", Elem::new().with_text("ready").stale_for(5));
            let mut ui = session(&dom);

            ui.focus(&css("#status")).unwrap();
            let err = ui.get_text_current().unwrap_err();
            assert!(err.is_stale());
        }

        #[test]
        fn value_falls_back_to_text_without_a_value_attribute() {
            let dom = FakeDom::new();
            dom.stage("#label", Elem::new().with_text("shown"));
            let mut ui = session(&dom);

            assert_eq!(ui.value(&css("#label")).unwrap(), "shown");
        }

        #[test]
        fn value_prefers_the_value_attribute() {
            let dom = FakeDom::new();
            dom.stage("#field", Elem::new().with_value("typed").with_text("label"));
            let mut ui = session(&dom);

            assert_eq!(ui.value(&css("#field")).unwrap(), "typed");
        }

        #[test]
        fn attribute_reads_are_optional() {
            let dom = FakeDom::new();
            dom.stage(
                "#save",
                Elem::new().with_attr("data-kind", "primary"),
            );
            let mut ui = session(&dom);

            assert_eq!(
                ui.attribute(&css("#save"), "data-kind").unwrap(),
                Some("primary".to_string())
            );
            assert_eq!(ui.attribute_current("data-missing").unwrap(), None);
        }

        #[test]
        fn text_strategy_targets_resolve_through_their_xpath_rendering() {
            let dom = FakeDom::new();
            dom.stage_target(&text("Save draft"), Elem::new().with_text("Save draft"));
            let mut ui = session(&dom);

            assert_eq!(ui.get_text(&text("Save draft")).unwrap(), "Save draft");
        }
    }

    mod visibility_tests {
        use super::*;

        #[test]
        fn wait_for_visible_succeeds_on_a_delayed_reveal() {
            let dom = FakeDom::new();
            dom.stage(
                "#delayed",
                Elem::new().reveal_after(Duration::from_millis(300)),
            );
            let mut ui = session(&dom);

            ui.focus(&css("#delayed")).unwrap();
            ui.wait_for_visible_current(Duration::from_millis(4000))
                .unwrap();
            assert!(ui.is_visible_current().unwrap());
        }

        #[test]
        fn wait_for_visible_times_out_on_a_hidden_element() {
            let dom = FakeDom::new();
            dom.stage("#never", Elem::new().start_hidden());
            let mut ui = session(&dom);

            ui.focus(&css("#never")).unwrap();
            let err = ui
                .wait_for_visible_current(Duration::from_millis(100))
                .unwrap_err();
            assert!(err.is_timeout());
        }

        #[test]
        fn wait_for_hidden_is_satisfied_by_absence() {
            let dom = FakeDom::new();
            dom.stage("#toast", Elem::new());
            let mut ui = session(&dom);
            ui.focus(&css("#toast")).unwrap();

            dom.remove("#toast");
            ui.wait_for_hidden_current(Duration::from_millis(200))
                .unwrap();
        }

        #[test]
        fn exists_is_a_non_waiting_count_check() {
            let dom = FakeDom::new();
            dom.stage("#name", Elem::new().start_hidden());
            let mut ui = session(&dom);

            ui.focus(&css("#name")).unwrap();
            // hidden but present
            assert!(ui.exists_current().unwrap());
            dom.remove("#name");
            assert!(!ui.exists_current().unwrap());
        }

        #[test]
        fn exists_reports_false_on_query_errors() {
            let dom = FakeDom::new();
            dom.stage("#name", Elem::new());
            let mut ui = session(&dom);
            ui.focus(&css("#name")).unwrap();

            dom.fail_queries("connection dropped");
            assert!(!ui.exists_current().unwrap());
        }

        #[test]
        fn is_visible_is_false_for_absent_elements() {
            let dom = FakeDom::new();
            dom.stage("#name", Elem::new());
            let mut ui = session(&dom);
            ui.focus(&css("#name")).unwrap();

            dom.remove("#name");
            assert!(!ui.is_visible_current().unwrap());
        }

        #[test]
        fn pinned_handles_probe_without_relookup() {
            let dom = FakeDom::new();
            dom.stage(".row", Elem::new());
            dom.stage(".row", Elem::new().start_hidden());
            let mut ui = session(&dom);

            ui.collect(&css(".row")).unwrap();
            ui.choose(1).unwrap();
            assert!(!ui.is_visible_current().unwrap());
            // hidden but attached still exists
            assert!(ui.exists_current().unwrap());
            ui.choose(0).unwrap();
            assert!(ui.exists_current().unwrap());
            assert!(ui.is_visible_current().unwrap());
        }
    }

    mod interaction_tests {
        use super::*;

        #[test]
        fn set_checked_toggles_at_most_once() {
            let dom = FakeDom::new();
            dom.stage("#agree", Elem::new());
            let mut ui = session(&dom);

            ui.set_checked(&css("#agree"), true).unwrap();
            ui.set_checked_current(true).unwrap();
            assert!(dom.checked("#agree"));
            assert_eq!(dom.clicks("#agree"), 1);

            ui.set_checked_current(false).unwrap();
            assert!(!dom.checked("#agree"));
            assert_eq!(dom.clicks("#agree"), 2);
        }

        #[test]
        fn compose_replaces_existing_content() {
            let dom = FakeDom::new();
            dom.stage("#name", Elem::new().with_value("old"));
            let mut ui = session(&dom);

            ui.compose(&css("#name"), "new").unwrap();
            assert_eq!(dom.value_of("#name"), Some("new".to_string()));
        }

        #[test]
        fn press_sends_the_wire_codepoint() {
            let dom = FakeDom::new();
            dom.stage("#name", Elem::new().with_value(""));
            let mut ui = session(&dom);

            ui.press(&css("#name"), "Enter").unwrap();
            assert_eq!(dom.value_of("#name"), Some("\u{E007}".to_string()));
        }

        #[test]
        fn chord_ends_with_the_null_release() {
            let dom = FakeDom::new();
            dom.stage("#editor", Elem::new().with_value(""));
            let mut ui = session(&dom);

            ui.press_chord(&css("#editor"), &["Control", "a"]).unwrap();
            assert_eq!(
                dom.value_of("#editor"),
                Some(format!("\u{E009}a{}", keys::DOM_NULL))
            );
        }

        #[test]
        fn select_and_upload_reach_the_element() {
            let dom = FakeDom::new();
            dom.stage("#country", Elem::new());
            dom.stage("#attachment", Elem::new());
            let mut ui = session(&dom);

            ui.select_by_text(&css("#country"), "Spain").unwrap();
            assert_eq!(dom.value_of("#country"), Some("Spain".to_string()));

            ui.upload_file(&css("#attachment"), Path::new("/tmp/report.pdf"))
                .unwrap();
            assert_eq!(
                dom.last_upload("#attachment"),
                Some(std::path::PathBuf::from("/tmp/report.pdf"))
            );
        }

        #[test]
        fn upload_rejects_an_empty_path() {
            let dom = FakeDom::new();
            dom.stage("#attachment", Elem::new());
            let mut ui = session(&dom);
            ui.focus(&css("#attachment")).unwrap();

            let err = ui.upload_file_current(Path::new("")).unwrap_err();
            assert!(matches!(err, UiError::InvalidArgument { .. }));
        }

        #[test]
        fn id_targets_resolve_by_css_id() {
            let dom = FakeDom::new();
            dom.stage("#main", Elem::new());
            let mut ui = session(&dom);

            ui.hover(&id("main")).unwrap();
            ui.double_click_current().unwrap();
            ui.scroll_into_view_current().unwrap();
            assert!(dom.calls().iter().any(|c| c.contains("#main")));
        }
    }

    mod session_tests {
        use super::*;

        #[test]
        fn navigation_leaves_the_element_context_alone() {
            let dom = FakeDom::new();
            dom.stage("#name", Elem::new());
            let mut ui = session(&dom);

            ui.open("https://example.test/form").unwrap();
            ui.focus(&css("#name")).unwrap();
            ui.refresh().unwrap();
            ui.back().unwrap();
            ui.forward().unwrap();
            // still focused after navigation calls
            ui.click_current().unwrap();
            assert_eq!(dom.clicks("#name"), 1);
            assert_eq!(ui.url().unwrap(), "https://example.test/form");
        }

        #[test]
        fn screenshot_creates_parent_directories() {
            let dom = FakeDom::new();
            dom.set_screenshot(vec![0x89, b'P', b'N', b'G']);
            let mut ui = session(&dom);

            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("shots/deep/页面.png");
            ui.screenshot(&path).unwrap();
            assert_eq!(std::fs::read(&path).unwrap(), vec![0x89, b'P', b'N', b'G']);
        }

        #[test]
        fn screenshot_rejects_an_empty_path() {
            let dom = FakeDom::new();
            let mut ui = session(&dom);
            let err = ui.screenshot(Path::new("")).unwrap_err();
            assert!(matches!(err, UiError::InvalidArgument { .. }));
        }

        #[test]
        fn close_quits_once_and_clears_context() {
            let dom = FakeDom::new();
            dom.stage("#name", Elem::new());
            let mut ui = session(&dom);
            ui.focus(&css("#name")).unwrap();

            ui.close().unwrap();
            ui.close().unwrap();
            assert_eq!(dom.quit_count(), 1);
            assert!(matches!(
                ui.click_current().unwrap_err(),
                UiError::MissingContext { .. }
            ));
        }
    }
}
