use sea_orm::Database;

use engine::{Engine, EngineError, PartCode};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

fn field_errors(err: EngineError) -> engine::FieldErrors {
    match err {
        EngineError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_user_hashes_password_and_normalizes_email() {
    let engine = engine_with_db().await;

    let user = engine
        .create_user("Sua@EXAMPLE.Com", "sua", "top-secret")
        .await
        .unwrap();

    // Domain is case-folded, local part kept as-is.
    assert_eq!(user.email, "Sua@example.com");
    assert_eq!(user.username, "sua");
    assert!(!user.is_superuser);
    assert_ne!(user.password, "top-secret");
    assert!(user.password.starts_with("$argon2"));
}

#[tokio::test]
async fn create_user_without_email_is_rejected() {
    let engine = engine_with_db().await;

    for email in ["", "   "] {
        let err = engine
            .create_user(email, "sua", "top-secret")
            .await
            .unwrap_err();
        assert!(field_errors(err).contains_field("email"));
    }
}

#[tokio::test]
async fn duplicate_email_or_username_is_a_field_error() {
    let engine = engine_with_db().await;
    engine
        .create_user("sua@example.com", "sua", "top-secret")
        .await
        .unwrap();

    let err = engine
        .create_user("sua@example.com", "other", "pw")
        .await
        .unwrap_err();
    assert!(field_errors(err).contains_field("email"));

    let err = engine
        .create_user("other@example.com", "sua", "pw")
        .await
        .unwrap_err();
    assert!(field_errors(err).contains_field("username"));
}

#[tokio::test]
async fn create_superuser_sets_the_flag() {
    let engine = engine_with_db().await;

    let admin = engine
        .create_superuser("admin@example.com", "admin", "root-pw")
        .await
        .unwrap();
    assert!(admin.is_superuser);
}

#[tokio::test]
async fn verify_password_matches_only_the_original_plaintext() {
    let engine = engine_with_db().await;
    engine
        .create_user("sua@example.com", "sua", "top-secret")
        .await
        .unwrap();

    let found = engine
        .verify_password("sua@EXAMPLE.com", "top-secret")
        .await
        .unwrap();
    assert_eq!(found.map(|user| user.username), Some("sua".to_string()));

    assert!(
        engine
            .verify_password("sua@example.com", "wrong")
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        engine
            .verify_password("nobody@example.com", "top-secret")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn list_users_by_part_returns_exactly_that_part() {
    let engine = engine_with_db().await;
    let sua = engine
        .create_user("sua@example.com", "sua", "pw")
        .await
        .unwrap();
    let doyun = engine
        .create_user("doyun@example.com", "doyun", "pw")
        .await
        .unwrap();
    let hana = engine
        .create_user("hana@example.com", "hana", "pw")
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
        .assign_user(hana.id, None, Some(PartCode::Design.code()))
        .await
        .unwrap();

    let back_end = engine.list_users_by_part(PartCode::BackEnd).await.unwrap();
    let mut usernames: Vec<String> = back_end.into_iter().map(|user| user.username).collect();
    usernames.sort();
    assert_eq!(usernames, ["doyun", "sua"]);

    let managers = engine
        .list_users_by_part(PartCode::ProjectManager)
        .await
        .unwrap();
    assert!(managers.is_empty());
}

#[tokio::test]
async fn assign_user_rejects_dangling_references() {
    let engine = engine_with_db().await;
    let user = engine
        .create_user("sua@example.com", "sua", "pw")
        .await
        .unwrap();

    let err = engine
        .assign_user(user.id, Some(42), None)
        .await
        .unwrap_err();
    assert!(field_errors(err).contains_field("team"));

    let err = engine.assign_user(9999, None, None).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("user 9999".to_string()));
}

#[tokio::test]
async fn team_and_part_names_are_length_limited() {
    let engine = engine_with_db().await;

    let team = engine.new_team("  white-hedgehog  ").await.unwrap();
    assert_eq!(team.name, "white-hedgehog");

    let err = engine
        .new_team("a-name-well-over-twenty-characters")
        .await
        .unwrap_err();
    assert!(field_errors(err).contains_field("name"));

    let err = engine.new_part("").await.unwrap_err();
    assert!(field_errors(err).contains_field("name"));
}
