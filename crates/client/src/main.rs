//! Headless CLI for the tracker engine
//!
//! Loads an account's library, expands the first game, and prints the
//! derived achievement view. Useful for exercising the engine against a
//! running backend without a UI.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use steamtrack_client::config::Config;
use steamtrack_client::http::HttpProvider;
use steamtrack_client::session::{RowState, Session};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "steamtrack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load();

    let account_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.steam_id.clone());
    if account_id.trim().is_empty() {
        eprintln!("usage: steamtrack <steam-id>   (or set steam_id in config.toml)");
        eprintln!("log in via {} to obtain one", config.auth_login_url);
        std::process::exit(2);
    }

    let provider = Arc::new(HttpProvider::new(&config.api_base_url));
    let mut session = Session::new(provider);
    session.set_account(account_id);
    session.load_library();

    while session.library_loading() {
        if !session.wait_event().await {
            break;
        }
    }

    if session.games().is_empty() {
        println!("No games found for this account.");
        return;
    }

    println!("Library ({} games):", session.games().len());
    for game in session.games() {
        println!("  {:>8}  {}  [{}]", game.appid, game.name, game.playtime_display());
    }

    let first = session.games()[0].appid;
    session.toggle_game(first);
    while session.row_state(first) == RowState::Loading {
        if !session.wait_event().await {
            break;
        }
    }

    match session.expanded_counts() {
        Some((completed, total)) => {
            println!("\nAchievements for {}: {} / {} unlocked", first, completed, total)
        }
        None => println!("\nNo achievement data for {}", first),
    }
    for record in session.visible_achievements() {
        let unlocked = record
            .unlocked_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("  {:<40} {}", record.name, unlocked);
    }
}
