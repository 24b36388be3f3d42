//! Account operations: users, teams, parts.

use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    EngineError, FieldErrors, ResultEngine, parts,
    parts::PartCode,
    teams, users,
    util::{hash_password, normalize_email, verify_password},
};

use super::{Engine, with_tx};

const NAME_MAX_LEN: usize = 20;

impl Engine {
    /// Creates a user with a normalized email and a hashed password.
    ///
    /// Email and username are pre-checked for uniqueness so conflicts come
    /// back as field errors rather than a bare database error.
    pub async fn create_user(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> ResultEngine<users::Model> {
        self.insert_user(&self.database, email, username, password)
            .await
    }

    /// Creates a user and grants the superuser flag, in one transaction.
    pub async fn create_superuser(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> ResultEngine<users::Model> {
        with_tx!(self, |tx| {
            let user = self.insert_user(&tx, email, username, password).await?;
            let mut user: users::ActiveModel = user.into();
            user.is_superuser = ActiveValue::Set(true);
            user.update(&tx).await.map_err(EngineError::from)
        })
    }

    async fn insert_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        email: &str,
        username: &str,
        password: &str,
    ) -> ResultEngine<users::Model> {
        let mut errors = FieldErrors::new();
        let email = email.trim();
        if email.is_empty() {
            errors.push("email", "user must have an email address");
        }
        let username = username.trim();
        if username.is_empty() {
            errors.push("username", "user must have a username");
        }
        if !errors.is_empty() {
            return Err(EngineError::Validation(errors));
        }

        let email = normalize_email(email);
        if users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(conn)
            .await?
            .is_some()
        {
            errors.push("email", "user with this email already exists");
        }
        if users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(conn)
            .await?
            .is_some()
        {
            errors.push("username", "user with this username already exists");
        }
        if !errors.is_empty() {
            return Err(EngineError::Validation(errors));
        }

        let user = users::ActiveModel {
            email: ActiveValue::Set(email),
            username: ActiveValue::Set(username.to_string()),
            password: ActiveValue::Set(hash_password(password)?),
            joined_at: ActiveValue::Set(Utc::now()),
            is_superuser: ActiveValue::Set(false),
            ..Default::default()
        };
        Ok(user.insert(conn).await?)
    }

    /// Checks a plaintext password against the stored hash.
    ///
    /// Returns `None` for an unknown email or a mismatch; callers cannot
    /// distinguish the two.
    pub async fn verify_password(
        &self,
        email: &str,
        password: &str,
    ) -> ResultEngine<Option<users::Model>> {
        let email = normalize_email(email);
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?;

        Ok(user.filter(|user| verify_password(password, &user.password)))
    }

    /// All users belonging to the given part, in no particular order.
    pub async fn list_users_by_part(&self, code: PartCode) -> ResultEngine<Vec<users::Model>> {
        users::Entity::find()
            .filter(users::Column::PartId.eq(code.code()))
            .all(&self.database)
            .await
            .map_err(EngineError::from)
    }

    /// Sets a user's team and/or part associations.
    pub async fn assign_user(
        &self,
        user_id: i32,
        team_id: Option<i32>,
        part_id: Option<i32>,
    ) -> ResultEngine<users::Model> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("user {user_id}")))?;

        let mut errors = FieldErrors::new();
        if let Some(team_id) = team_id {
            if teams::Entity::find_by_id(team_id)
                .one(&self.database)
                .await?
                .is_none()
            {
                errors.push("team", format!("team {team_id} does not exist"));
            }
        }
        if let Some(part_id) = part_id {
            if parts::Entity::find_by_id(part_id)
                .one(&self.database)
                .await?
                .is_none()
            {
                errors.push("part", format!("part {part_id} does not exist"));
            }
        }
        if !errors.is_empty() {
            return Err(EngineError::Validation(errors));
        }

        let mut user: users::ActiveModel = user.into();
        if team_id.is_some() {
            user.team_id = ActiveValue::Set(team_id);
        }
        if part_id.is_some() {
            user.part_id = ActiveValue::Set(part_id);
        }
        user.update(&self.database)
            .await
            .map_err(EngineError::from)
    }

    /// All teams, used as the vote choices.
    pub async fn list_teams(&self) -> ResultEngine<Vec<teams::Model>> {
        teams::Entity::find()
            .all(&self.database)
            .await
            .map_err(EngineError::from)
    }

    /// Adds a team.
    pub async fn new_team(&self, name: &str) -> ResultEngine<teams::Model> {
        let name = validated_name(name, "name")?;
        let team = teams::ActiveModel {
            name: ActiveValue::Set(name),
            ..Default::default()
        };
        Ok(team.insert(&self.database).await?)
    }

    /// Adds a part.
    pub async fn new_part(&self, name: &str) -> ResultEngine<parts::Model> {
        let name = validated_name(name, "name")?;
        let part = parts::ActiveModel {
            name: ActiveValue::Set(name),
            ..Default::default()
        };
        Ok(part.insert(&self.database).await?)
    }
}

fn validated_name(value: &str, field: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(FieldErrors::with(
            field,
            "must not be empty",
        )));
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(EngineError::Validation(FieldErrors::with(
            field,
            format!("must be at most {NAME_MAX_LEN} characters"),
        )));
    }
    Ok(trimmed.to_string())
}
