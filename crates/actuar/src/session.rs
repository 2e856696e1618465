//! Session configuration and engine selection.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::result::{UiError, UiResult};
use crate::wait::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

/// Backend family a session runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// DOM-driver backend: native CSS/XPath lookups, explicit waits.
    Dom,
    /// Page-automation backend: dialect selectors, engine-side waits.
    #[default]
    Page,
}

impl FromStr for Engine {
    type Err = UiError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dom" => Ok(Self::Dom),
            "page" => Ok(Self::Page),
            _ => Err(UiError::InvalidArgument {
                message: format!("unknown engine {raw:?} (expected \"dom\" or \"page\")"),
            }),
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dom => write!(f, "dom"),
            Self::Page => write!(f, "page"),
        }
    }
}

/// Session settings shared by both adapter families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    engine: Engine,
    headless: bool,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            engine: Engine::Page,
            headless: true,
            wait_timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl SessionConfig {
    /// Environment variable selecting the engine.
    pub const ENGINE_VAR: &'static str = "ACTUAR_ENGINE";
    /// Environment variable toggling headless mode.
    pub const HEADLESS_VAR: &'static str = "ACTUAR_HEADLESS";

    /// Defaults: page engine, headless, 5s waits, 50ms polls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `ACTUAR_ENGINE` and `ACTUAR_HEADLESS` where
    /// set.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when a variable is set to an unparseable value.
    pub fn from_env() -> UiResult<Self> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(Self::ENGINE_VAR) {
            config.engine = raw.parse()?;
        }
        if let Ok(raw) = std::env::var(Self::HEADLESS_VAR) {
            config.headless = parse_bool(&raw)?;
        }
        Ok(config)
    }

    /// Select the backend family.
    #[must_use]
    pub const fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Toggle headless mode.
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the default budget for implicit visibility waits.
    #[must_use]
    pub const fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Set the polling interval for explicit waits.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Selected backend family.
    #[must_use]
    pub const fn engine(&self) -> Engine {
        self.engine
    }

    /// Whether the browser runs without a visible window.
    #[must_use]
    pub const fn headless(&self) -> bool {
        self.headless
    }

    /// Budget for implicit visibility waits.
    #[must_use]
    pub const fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }

    /// Polling interval for explicit waits.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

fn parse_bool(raw: &str) -> UiResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(UiError::InvalidArgument {
            message: format!("not a boolean: {raw:?}"),
        }),
    }
}

/// Launch a browser session for the configured engine.
///
/// # Errors
///
/// `Unsupported` for the DOM engine, which has no bundled driver; wrap your
/// own [`crate::driver::DomDriver`] in [`crate::dom::DomActions`] instead.
/// Otherwise browser launch failures.
#[cfg(feature = "browser")]
pub fn launch(config: &SessionConfig) -> UiResult<Box<dyn crate::actions::UiActions>> {
    match config.engine() {
        Engine::Page => {
            let page = crate::cdp::CdpPage::launch(config)?;
            Ok(Box::new(crate::page::PageActions::new(page)))
        }
        Engine::Dom => Err(UiError::Unsupported {
            op: "launch",
            message: "no DOM driver is bundled; wrap one in DomActions".to_string(),
        }),
    }
}
