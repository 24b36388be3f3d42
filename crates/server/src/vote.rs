//! Demo vote endpoints: choices, casting, results.

use api_types::{
    team::TeamView,
    vote::{ResultQuery, VoteNew, VoteView},
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

/// The poll the demo endpoints operate on when none is given.
const DEMO_POLL_ID: i32 = 1;

/// Lists the teams available as vote choices.
pub async fn choices(State(state): State<ServerState>) -> Result<Json<Vec<TeamView>>, ServerError> {
    let teams = state.engine.list_teams().await?;

    Ok(Json(
        teams
            .into_iter()
            .map(|team| TeamView {
                id: team.id,
                name: team.name,
            })
            .collect(),
    ))
}

/// Casts a vote. Validation failures come back as a 400 with field errors.
pub async fn cast(
    State(state): State<ServerState>,
    Json(payload): Json<VoteNew>,
) -> Result<(StatusCode, Json<VoteView>), ServerError> {
    let vote = state.engine.create_vote(payload.poll, payload.team).await?;

    Ok((StatusCode::CREATED, Json(view(vote))))
}

/// Lists the votes cast under a poll (`?poll=N`, defaulting to the demo poll).
pub async fn results(
    State(state): State<ServerState>,
    Query(query): Query<ResultQuery>,
) -> Result<Json<Vec<VoteView>>, ServerError> {
    let poll_id = query.poll.unwrap_or(DEMO_POLL_ID);
    let votes = state.engine.list_votes_for_poll(poll_id).await?;

    Ok(Json(votes.into_iter().map(view).collect()))
}

fn view(vote: engine::votes::Model) -> VoteView {
    VoteView {
        id: vote.id,
        poll: vote.poll_id,
        team: vote.team_id,
    }
}
