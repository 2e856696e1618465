//! Example: Browser Smoke
//!
//! Demonstrates: launching a real headless Chromium session over CDP and
//! driving it through the action contract.
//!
//! Requires a Chrome or Chromium binary on PATH.
//!
//! Run with: `cargo run --example browser_smoke --features browser`

use std::path::Path;

use actuar::target::css;
use actuar::{launch, SessionConfig, UiResult};

fn main() -> UiResult<()> {
    println!("=== Browser Smoke Example ===\n");

    // Engine and headless mode can be overridden via ACTUAR_ENGINE and
    // ACTUAR_HEADLESS.
    let config = SessionConfig::from_env()?;
    println!("1. Launching {} engine (headless: {})...", config.engine(), config.headless());
    let mut ui = launch(&config)?;

    println!("2. Opening example.com...");
    ui.open("https://example.com")?;
    println!("   title: {:?}", ui.title()?);
    println!("   url:   {:?}", ui.url()?);

    println!("3. Reading the heading...");
    let heading = ui.get_text(&css("h1"))?;
    println!("   h1: {heading:?}");
    println!("   more-link exists: {}", ui.exists(&css("a[href]"))?);

    println!("4. Capturing a screenshot...");
    let shot = Path::new("target/browser_smoke.png");
    ui.screenshot(shot)?;
    println!("   written to {}", shot.display());

    println!("5. Closing the session...");
    ui.close()?;

    println!("\nSmoke test completed.");
    Ok(())
}
