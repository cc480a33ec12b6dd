// End-to-end flow through the public API, as a UI layer would drive it

use std::sync::Arc;

use anime_companion::application::{ErrorResponse, ErrorType};
use anime_companion::{
    build_app_state, Anime, AnimeRepository, AppConfig, AppState, ErrorKind,
    InMemoryAnimeRepository, SearchOutcome, StaticCatalog, WatchList,
};

fn fresh_state() -> AppState {
    let repository: Arc<dyn AnimeRepository> = Arc::new(InMemoryAnimeRepository::new(Arc::new(
        StaticCatalog::samples(),
    )));
    AppState::new(repository)
}

#[tokio::test]
async fn test_search_then_mark_from_results() {
    let state = fresh_state();

    let outcome = state.search.search("supernatural").await.unwrap();
    assert!(matches!(outcome, SearchOutcome::Applied { count: 2, .. }));

    // Mark every hit as to-watch, then one of them as watching
    let hits = state.search.results();
    for anime in &hits {
        state.repository.add_to_to_watch(anime).await.unwrap();
    }
    state.repository.add_to_watching(&hits[0]).await.unwrap();

    // Tapping the same action again is harmless
    state.repository.add_to_to_watch(&hits[1]).await.unwrap();

    let to_watch = state.repository.list_to_watch().await.unwrap();
    assert_eq!(to_watch.len(), 2);
    let watching = state.repository.list_watching().await.unwrap();
    assert_eq!(watching, vec![hits[0].clone()]);
}

#[tokio::test]
async fn test_finish_show_moves_it_between_lists() {
    let state = build_app_state(&AppConfig::default()).unwrap();

    let watching = state.repository.list(WatchList::Watching).await.unwrap();
    let finished = watching[0].clone();

    // Cross-list transitions are orchestrated by the caller
    state.repository.add_to_watched(&finished).await.unwrap();
    state.repository.remove_from_watching(&finished).await.unwrap();

    assert!(state.repository.list_watching().await.unwrap().is_empty());
    let watched = state.repository.list_watched().await.unwrap();
    assert!(watched.iter().any(|a| a.id == finished.id));
}

#[tokio::test]
async fn test_untracked_source_id_can_be_listed_and_removed() {
    let state = fresh_state();
    let local = Anime::new(0).with_titles(None, None, Some("自主制作"));

    state.repository.add_to_watching(&local).await.unwrap();
    state.repository.add_to_watching(&local).await.unwrap();
    assert_eq!(state.repository.list_watching().await.unwrap(), vec![local.clone()]);

    state.repository.remove_from_watching(&local).await.unwrap();
    assert!(state.repository.list_watching().await.unwrap().is_empty());
}

#[test]
fn test_bad_configuration_maps_to_validation_response() {
    let err = AppConfig::from_lookup(|key| {
        (key == "ANIME_COMPANION_STORAGE").then(|| "postgres".to_string())
    })
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let response = ErrorResponse::from_app_error(err);
    assert_eq!(response.error_type, ErrorType::Validation);
}
