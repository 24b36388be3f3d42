use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod team {
    use super::*;

    /// A team offered as a vote choice.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TeamView {
        pub id: i32,
        pub name: String,
    }
}

pub mod part {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PartView {
        pub id: i32,
        pub name: String,
    }
}

pub mod poll {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PollView {
        pub id: i32,
        pub question: String,
    }
}

pub mod vote {
    use super::*;

    /// Request body for casting a vote.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoteNew {
        pub poll: i32,
        pub team: i32,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct VoteView {
        pub id: i32,
        pub poll: i32,
        pub team: i32,
    }

    /// Query string for the demo result endpoint.
    ///
    /// `poll` defaults server-side to 1, the demo poll.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ResultQuery {
        pub poll: Option<i32>,
    }
}

pub mod user {
    use super::*;

    /// A user as exposed over the API. The password hash never leaves the
    /// store layer.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i32,
        pub email: String,
        pub username: String,
        pub joined_at: DateTime<Utc>,
        pub team: Option<i32>,
        pub part: Option<i32>,
        pub is_superuser: bool,
    }
}

#[cfg(test)]
mod tests {
    use super::team::TeamView;

    #[test]
    fn team_view_round_trips_through_json() {
        let team = TeamView {
            id: 7,
            name: "white-hedgehog".to_string(),
        };

        let encoded = serde_json::to_string(&team).unwrap();
        let decoded: TeamView = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, team);
    }
}
