//! Poll listing endpoint.

use api_types::poll::PollView;
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<PollView>>, ServerError> {
    let polls = state.engine.list_polls().await?;

    Ok(Json(polls.into_iter().map(view).collect()))
}

fn view(poll: engine::polls::Model) -> PollView {
    PollView {
        id: poll.id,
        question: poll.question,
    }
}
