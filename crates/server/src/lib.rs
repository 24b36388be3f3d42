use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod part_leader;
mod polls;
mod server;
mod vote;

pub mod types {
    pub mod poll {
        pub use api_types::poll::PollView;
    }

    pub mod team {
        pub use api_types::team::TeamView;
    }

    pub mod vote {
        pub use api_types::vote::{ResultQuery, VoteNew, VoteView};
    }

    pub mod user {
        pub use api_types::user::UserView;
    }
}

pub enum ServerError {
    Engine(EngineError),
    /// Path part segment outside the four known slugs. Answered with a
    /// bare 400, not a 404.
    UnknownPart(String),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::Engine(EngineError::Validation(errors)) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            Self::Engine(EngineError::KeyNotFound(key)) => {
                tracing::debug!("lookup failed: {key}");
                StatusCode::BAD_REQUEST.into_response()
            }
            Self::Engine(EngineError::Database(err)) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Error {
                        error: "internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::Engine(EngineError::PasswordHash(err)) => {
                tracing::error!("password hashing error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Error {
                        error: "internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::UnknownPart(part) => {
                tracing::debug!("unknown part requested: {part}");
                StatusCode::BAD_REQUEST.into_response()
            }
            Self::Generic(error) => {
                (StatusCode::BAD_REQUEST, Json(Error { error })).into_response()
            }
        }
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
