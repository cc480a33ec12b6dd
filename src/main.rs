// src/main.rs
//
// Bootstrap: build the repository from configuration, run one search,
// print the three watch lists.
//
// Usage: anime_companion [query]

use anyhow::Context;

use anime_companion::application::{build_app_state, ErrorResponse};
use anime_companion::config::AppConfig;
use anime_companion::{Anime, WatchList};

fn print_anime(anime: &Anime) {
    match anime.alternative_title() {
        Some(alt) => println!("  [{}] {} ({})", anime.id, anime.display_title(), alt),
        None => println!("  [{}] {}", anime.id, anime.display_title()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. CONFIGURATION
    let config = AppConfig::from_env().context("invalid configuration")?;

    // 2. DEPENDENCY GRAPH
    let state = build_app_state(&config).context("failed to initialise backend")?;

    // 3. SEARCH
    // A failed search is reported and the lists are still printed
    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    println!("Search '{}':", query);
    match state.search.search(&query).await {
        Ok(_) => {
            for anime in state.search.results() {
                print_anime(&anime);
            }
        }
        Err(e) => {
            let response = ErrorResponse::from_app_error(e);
            match response.details {
                Some(details) => println!("  {} ({})", response.message, details),
                None => println!("  {}", response.message),
            }
        }
    }

    // 4. LISTS
    for list in WatchList::ALL {
        let entries = state
            .repository
            .list(list)
            .await
            .with_context(|| format!("failed to load {}", list.label()))?;

        println!("{} ({}):", list.label(), entries.len());
        for anime in &entries {
            print_anime(anime);
        }
    }

    Ok(())
}
