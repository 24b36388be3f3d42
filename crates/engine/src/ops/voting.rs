//! Poll and vote operations.

use sea_orm::{ActiveValue, prelude::*};

use crate::{EngineError, FieldErrors, ResultEngine, polls, teams, votes};

use super::Engine;

impl Engine {
    /// All polls, unfiltered and unpaginated.
    pub async fn list_polls(&self) -> ResultEngine<Vec<polls::Model>> {
        polls::Entity::find()
            .all(&self.database)
            .await
            .map_err(EngineError::from)
    }

    /// Adds a poll.
    pub async fn new_poll(&self, question: &str) -> ResultEngine<polls::Model> {
        let question = question.trim();
        if question.is_empty() {
            return Err(EngineError::Validation(FieldErrors::with(
                "question",
                "must not be empty",
            )));
        }

        let poll = polls::ActiveModel {
            question: ActiveValue::Set(question.to_string()),
            ..Default::default()
        };
        Ok(poll.insert(&self.database).await?)
    }

    /// Records a vote for `team_id` under `poll_id`.
    ///
    /// Both references must resolve; a dangling one comes back as a field
    /// error and nothing is written. Duplicate votes are not deduplicated.
    pub async fn create_vote(&self, poll_id: i32, team_id: i32) -> ResultEngine<votes::Model> {
        let mut errors = FieldErrors::new();
        if polls::Entity::find_by_id(poll_id)
            .one(&self.database)
            .await?
            .is_none()
        {
            errors.push("poll", format!("poll {poll_id} does not exist"));
        }
        if teams::Entity::find_by_id(team_id)
            .one(&self.database)
            .await?
            .is_none()
        {
            errors.push("team", format!("team {team_id} does not exist"));
        }
        if !errors.is_empty() {
            return Err(EngineError::Validation(errors));
        }

        let vote = votes::ActiveModel {
            poll_id: ActiveValue::Set(poll_id),
            team_id: ActiveValue::Set(team_id),
            ..Default::default()
        };
        Ok(vote.insert(&self.database).await?)
    }

    /// All votes cast under the given poll.
    pub async fn list_votes_for_poll(&self, poll_id: i32) -> ResultEngine<Vec<votes::Model>> {
        votes::Entity::find()
            .filter(votes::Column::PollId.eq(poll_id))
            .all(&self.database)
            .await
            .map_err(EngineError::from)
    }
}
