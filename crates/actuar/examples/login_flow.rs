//! Example: Login Flow
//!
//! Demonstrates: one suite function driving both backend families through
//! the shared action contract, using the in-memory fakes.
//!
//! Run with: `cargo run --example login_flow`

use std::time::Duration;

use actuar::fake::{Elem, FakeDom, FakePage};
use actuar::target::{css, id, role};
use actuar::{DomActions, PageActions, UiActions, UiResult};

/// The suite. Nothing in here knows which backend is underneath.
fn run_login(ui: &mut impl UiActions) -> UiResult<String> {
    ui.open("https://app.test/login")?;

    ui.compose(&id("email"), "bob@example.com")?;
    ui.compose(&id("password"), "hunter2")?;
    ui.click(&role("button"))?;

    ui.wait_for_visible(&css(".banner"), Duration::from_secs(2))?;
    let banner = ui.get_text(&css(".banner"))?;

    // Pick the second row of the account table without re-querying.
    let rows = ui.collect(&css(".account-row"))?;
    println!("   {rows} account rows collected");
    ui.choose(1)?;
    let account = ui.get_text_current()?;
    println!("   chosen row reads {account:?}");

    ui.close()?;
    Ok(banner)
}

fn stage_login_page(stage: &dyn Fn(&actuar::Target, Elem)) {
    stage(&id("email"), Elem::new());
    stage(&id("password"), Elem::new());
    stage(&role("button"), Elem::new().with_text("Sign in"));
    stage(
        &css(".banner"),
        Elem::new()
            .with_text("Welcome back, Bob")
            .start_hidden()
            .reveal_after(Duration::from_millis(120)),
    );
    stage(&css(".account-row"), Elem::new().with_text("Checking"));
    stage(&css(".account-row"), Elem::new().with_text("Savings"));
}

fn main() -> UiResult<()> {
    println!("=== Login Flow Example ===\n");

    // 1. Same suite over the DOM-driver family.
    println!("1. DOM backend (explicit waits)...");
    let dom = FakeDom::new();
    stage_login_page(&|target, elem| dom.stage_target(target, elem));
    let banner = run_login(&mut DomActions::new(dom.clone()))?;
    println!("   banner: {banner:?}");
    println!("   button clicks recorded: {}", dom.clicks("[role=\"button\"]"));
    println!("   email field holds: {:?}\n", dom.value_of("#email"));

    // 2. Same suite over the page-automation family.
    println!("2. Page backend (engine-side waits)...");
    let page = FakePage::new();
    stage_login_page(&|target, elem| page.stage_target(target, elem));
    let banner = run_login(&mut PageActions::new(page.clone()))?;
    println!("   banner: {banner:?}");
    println!("   release order: {:?}", page.released());

    println!("\nLogin flow completed on both backends.");
    Ok(())
}
