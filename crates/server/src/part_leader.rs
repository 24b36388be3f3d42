//! Part-leader endpoint: users of one organizational part.

use api_types::user::UserView;
use axum::{
    Json,
    extract::{Path, State},
};
use engine::PartCode;

use crate::{ServerError, server::ServerState};

/// Lists the users belonging to the part named in the path.
///
/// Anything outside the four canonical slugs is a bare 400.
pub async fn list(
    Path(part): Path<String>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<UserView>>, ServerError> {
    let Some(code) = PartCode::from_slug(&part) else {
        return Err(ServerError::UnknownPart(part));
    };

    let users = state.engine.list_users_by_part(code).await?;

    Ok(Json(users.into_iter().map(view).collect()))
}

fn view(user: engine::users::Model) -> UserView {
    UserView {
        id: user.id,
        email: user.email,
        username: user.username,
        joined_at: user.joined_at,
        team: user.team_id,
        part: user.part_id,
        is_superuser: user.is_superuser,
    }
}
