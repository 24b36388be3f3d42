use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use tower::ServiceExt;

use api_types::{
    poll::PollView,
    team::TeamView,
    user::UserView,
    vote::{VoteNew, VoteView},
};
use engine::{Engine, PartCode};
use migration::MigratorTrait;
use server::{ServerState, router};

/// Fresh in-memory database with five teams and the demo poll (id 1).
async fn demo_app() -> (Router, Arc<Engine>) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let engine = Arc::new(Engine::builder().database(db).build());
    for name in ["alpha", "bravo", "charlie", "delta", "echo"] {
        engine.new_team(name).await.unwrap();
    }
    engine.new_poll("Best demo of the day?").await.unwrap();

    let state = ServerState {
        engine: engine.clone(),
    };
    (router(state), engine)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn post_json(app: &Router, uri: &str, body: &impl serde::Serialize) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

#[tokio::test]
async fn polls_endpoint_lists_every_poll() {
    let (app, engine) = demo_app().await;
    engine.new_poll("Second poll").await.unwrap();

    let (status, body) = get(&app, "/polls").await;
    assert_eq!(status, StatusCode::OK);

    let polls: Vec<PollView> = serde_json::from_slice(&body).unwrap();
    assert_eq!(polls.len(), 2);
    assert_eq!(polls[0].question, "Best demo of the day?");
}

#[tokio::test]
async fn demo_get_lists_team_choices() {
    let (app, _engine) = demo_app().await;

    let (status, body) = get(&app, "/polls/vote/demo").await;
    assert_eq!(status, StatusCode::OK);

    let teams: Vec<TeamView> = serde_json::from_slice(&body).unwrap();
    let names: Vec<&str> = teams.iter().map(|team| team.name.as_str()).collect();
    assert_eq!(names, ["alpha", "bravo", "charlie", "delta", "echo"]);
}

#[tokio::test]
async fn casting_twice_creates_two_distinct_votes() {
    let (app, _engine) = demo_app().await;
    let payload = VoteNew { poll: 1, team: 3 };

    let (status, body) = post_json(&app, "/polls/vote/demo", &payload).await;
    assert_eq!(status, StatusCode::CREATED);
    let first: VoteView = serde_json::from_slice(&body).unwrap();
    assert_eq!(first.poll, 1);
    assert_eq!(first.team, 3);

    let (status, body) = post_json(&app, "/polls/vote/demo", &payload).await;
    assert_eq!(status, StatusCode::CREATED);
    let second: VoteView = serde_json::from_slice(&body).unwrap();
    assert_ne!(second.id, first.id);
}

#[tokio::test]
async fn casting_with_dangling_references_returns_field_errors() {
    let (app, _engine) = demo_app().await;

    let (status, body) = post_json(&app, "/polls/vote/demo", &VoteNew { poll: 99, team: 77 }).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let errors: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(errors.get("poll").is_some());
    assert!(errors.get("team").is_some());
}

#[tokio::test]
async fn results_are_scoped_to_the_requested_poll() {
    let (app, engine) = demo_app().await;
    engine.new_poll("Second poll").await.unwrap();
    engine.create_vote(1, 3).await.unwrap();
    engine.create_vote(1, 5).await.unwrap();
    engine.create_vote(2, 1).await.unwrap();

    let (status, body) = get(&app, "/polls/vote/demo/result").await;
    assert_eq!(status, StatusCode::OK);
    let votes: Vec<VoteView> = serde_json::from_slice(&body).unwrap();
    let mut teams: Vec<i32> = votes.iter().map(|vote| vote.team).collect();
    teams.sort_unstable();
    assert_eq!(teams, [3, 5]);

    let (status, body) = get(&app, "/polls/vote/demo/result?poll=2").await;
    assert_eq!(status, StatusCode::OK);
    let votes: Vec<VoteView> = serde_json::from_slice(&body).unwrap();
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].team, 1);
}

#[tokio::test]
async fn part_leader_returns_only_that_parts_users() {
    let (app, engine) = demo_app().await;
    let sua = engine
        .create_user("sua@example.com", "sua", "pw-one")
        .await
        .unwrap();
    let doyun = engine
        .create_user("doyun@example.com", "doyun", "pw-two")
        .await
        .unwrap();
    let hana = engine
        .create_user("hana@example.com", "hana", "pw-three")
        .await
        .unwrap();
    engine
        .assign_user(sua.id, None, Some(PartCode::BackEnd.code()))
        .await
        .unwrap();
    engine
        .assign_user(doyun.id, None, Some(PartCode::BackEnd.code()))
        .await
        .unwrap();
    engine
        .assign_user(hana.id, None, Some(PartCode::FrontEnd.code()))
        .await
        .unwrap();

    let (status, body) = get(&app, "/polls/vote/part-leader/back-end").await;
    assert_eq!(status, StatusCode::OK);

    let users: Vec<UserView> = serde_json::from_slice(&body).unwrap();
    let mut usernames: Vec<&str> = users.iter().map(|user| user.username.as_str()).collect();
    usernames.sort_unstable();
    assert_eq!(usernames, ["doyun", "sua"]);

    // The password hash must never appear in the payload.
    let raw = String::from_utf8(body).unwrap();
    assert!(!raw.contains("password"));
}

#[tokio::test]
async fn part_leader_rejects_unknown_part_with_empty_400() {
    let (app, _engine) = demo_app().await;

    for part in ["devops", "Back-End", "backend", "marketing"] {
        let (status, body) = get(&app, &format!("/polls/vote/part-leader/{part}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "part: {part}");
        assert!(body.is_empty(), "part: {part}");
    }
}
