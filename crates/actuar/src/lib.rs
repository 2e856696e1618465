//! Actuar: one UI action contract over interchangeable browser backends
//!
//! Suites script against a single verb set (`UiActions`) and run unchanged
//! on two structurally different automation families: DOM drivers with
//! native CSS/XPath lookups and explicit waits, and page-automation
//! engines with dialect selectors and engine-side waiting.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     ACTUAR Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐        ┌──────────────────────────┐            │
//! │   │ Test Suite │───────►│ UiActions (one contract) │            │
//! │   └────────────┘        └───────┬──────────┬───────┘            │
//! │                                 │          │                    │
//! │                    ┌────────────▼──┐  ┌────▼───────────┐        │
//! │                    │ DomActions    │  │ PageActions    │        │
//! │                    │ explicit waits│  │ engine waits   │        │
//! │                    └────────────┬──┘  └────┬───────────┘        │
//! │                    ┌────────────▼──┐  ┌────▼───────────┐        │
//! │                    │ DomDriver     │  │ PageDriver     │        │
//! │                    │ CSS / XPath   │  │ dialect string │        │
//! │                    └───────────────┘  └────────────────┘        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod actions;
pub mod context;
pub mod dom;
pub mod driver;
pub mod fake;
pub mod keys;
pub mod page;
pub mod result;
pub mod retry;
pub mod selector;
pub mod session;
pub mod target;
pub mod wait;

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "browser")]
pub mod cdp;

pub use actions::UiActions;
#[cfg(feature = "api")]
pub use api::{ApiActions, ApiResponse, Headers, HttpApi, Params};
#[cfg(feature = "browser")]
pub use cdp::{CdpHandle, CdpPage};
pub use context::{ElementContext, Resolution};
pub use dom::DomActions;
pub use driver::{DomDriver, DomElement, PageDriver, PageHandle, VisibilityState};
pub use fake::{Elem, FakeDom, FakeDomElement, FakePage, FakePageHandle};
pub use keys::{Key, DOM_NULL};
pub use page::PageActions;
pub use result::{UiError, UiResult, CURRENT_CONTEXT};
pub use retry::RetryPolicy;
pub use selector::{dom_selector, page_selector, DomSelector};
#[cfg(feature = "browser")]
pub use session::launch;
pub use session::{Engine, SessionConfig};
pub use target::{Strategy, Target};
pub use wait::{poll_until, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::actions::*;
    #[cfg(feature = "api")]
    pub use super::api::*;
    #[cfg(feature = "browser")]
    pub use super::cdp::*;
    pub use super::context::*;
    pub use super::dom::*;
    pub use super::driver::*;
    pub use super::fake::*;
    pub use super::keys::*;
    pub use super::page::*;
    pub use super::result::*;
    pub use super::retry::*;
    pub use super::selector::*;
    pub use super::session::*;
    pub use super::target::*;
    pub use super::wait::*;
}
