//! Settings demo binary
//!
//! Walks a settings screen through loading its notifications section, changing
//! and saving settings, and dismissing the confirmation banner.

use relay_store_core::environment::SystemClock;
use settings_demo::{NotificationsAction, NotificationsState, SettingsScreen};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "settings=debug,settings_demo=debug,relay_store_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Settings Demo: relaying child actions to a parent ===\n");

    let screen = SettingsScreen::new(SystemClock);
    println!("Notifications store built? {}", screen.is_loaded());

    // First access builds the store with the screen's relay wired in
    let store = screen.notifications_store();
    println!("Notifications store built? {}", screen.is_loaded());

    for action in [
        NotificationsAction::Toggle(true),
        NotificationsAction::SetDigestHour(18),
        NotificationsAction::Save,
    ] {
        println!("\n>>> Sending: {action:?}");
        let mut handle = store.send(action).await?;
        handle
            .wait_with_timeout(Duration::from_secs(5))
            .await
            .map_err(|()| anyhow::anyhow!("effects did not finish in time"))?;
    }

    // The saved confirmation arrives through a feedback action; give its relay a moment
    tokio::time::sleep(Duration::from_millis(50)).await;

    let state = store.state(NotificationsState::clone).await;
    println!("\nNotifications state:\n{}", serde_json::to_string_pretty(&state)?);
    println!("\nBanner: {:?}", screen.banner());

    // Later calls hand back the same store
    let again = screen.notifications_store();
    println!("Same store on second access? {}", std::sync::Arc::ptr_eq(&store, &again));

    // Dismiss the banner through the presence binding
    screen.banner_visible().set(false);
    println!("Banner after dismiss: {:?}", screen.banner());

    println!("\nActions observed by the screen:");
    for entry in screen.activity() {
        println!("  • {entry}");
    }

    store.shutdown().await?;
    println!("\n=== Demo Complete ===");
    Ok(())
}
