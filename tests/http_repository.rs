mod common;

use common::{ApiState, broken_router, healthy_router, spawn_api};
use meme_board::{
    domain::MemeRepository,
    errors::SourceError,
    models::{GENERATOR_AUTHOR, MemeId, MemeRecord, UNTITLED},
    repositories::HttpMemeRepository,
};

fn repo(base_url: &str) -> HttpMemeRepository {
    HttpMemeRepository::new(reqwest::Client::new(), base_url)
}

#[tokio::test]
async fn lists_memes_in_server_order() {
    let base = spawn_api(healthy_router(ApiState::default())).await;
    let memes = repo(&base).list_all().await.unwrap();

    let ids: Vec<&str> = memes.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["65f0aa", "65f0bb", "7", "65f0cc"]);
    assert_eq!(memes[0].captions[0], "Deploy on Friday");
    assert_eq!(memes[0].topic.as_deref(), Some("devops"));
    assert!(memes[1].captions.is_empty());
}

#[tokio::test]
async fn null_fields_do_not_break_the_list() {
    let base = spawn_api(healthy_router(ApiState::default())).await;
    let memes = repo(&base).list_all().await.unwrap();
    assert_eq!(memes.len(), 4);

    let nulls = memes.into_iter().find(|m| m.id.as_str() == "65f0cc").unwrap();
    assert!(nulls.captions.is_empty());
    assert_eq!((nulls.upvotes, nulls.downvotes, nulls.comments), (0, 0, 0));
    assert_eq!(nulls.timestamp, 0);

    let meme = MemeRecord::from_wire(nulls, String::new());
    assert_eq!(meme.title, UNTITLED);
    assert_eq!(meme.author, GENERATOR_AUTHOR);
}

#[tokio::test]
async fn fetches_one_meme_through_its_envelope() {
    let base = spawn_api(healthy_router(ApiState::default())).await;
    let meme = repo(&base).get_by_id(&MemeId::from("65f0aa")).await.unwrap();

    assert_eq!(meme.id, MemeId::from("65f0aa"));
    assert_eq!((meme.upvotes, meme.downvotes, meme.comments), (10, 2, 4));
}

#[tokio::test]
async fn missing_meme_is_not_found() {
    let base = spawn_api(healthy_router(ApiState::default())).await;
    let err = repo(&base).get_by_id(&MemeId::from("nope")).await.unwrap_err();

    assert!(matches!(err, SourceError::NotFound(id) if id.as_str() == "nope"));
}

#[tokio::test]
async fn non_json_body_is_a_backend_error() {
    let base = spawn_api(broken_router()).await;
    let err = repo(&base).list_all().await.unwrap_err();

    assert!(matches!(err, SourceError::BackendError(_)), "got {err:?}");
}

#[tokio::test]
async fn server_error_status_is_reported() {
    let base = spawn_api(broken_router()).await;
    let err = repo(&base).get_by_id(&MemeId::from("65f0aa")).await.unwrap_err();

    let internal = reqwest::StatusCode::INTERNAL_SERVER_ERROR;
    assert!(
        matches!(err, SourceError::Status { status, .. } if status == internal),
        "got {err:?}"
    );
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    // Grab a free port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = repo(&format!("http://{}", addr)).list_all().await.unwrap_err();
    assert!(matches!(err, SourceError::Request { .. }), "got {err:?}");
}
