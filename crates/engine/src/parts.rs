//! Parts table and the well-known part codes.
//!
//! A part is an organizational category (front-end, back-end, design,
//! project-manager). The four canonical parts carry fixed numeric codes
//! that double as their row ids; [`PartCode`] is the explicit lookup that
//! replaces string-compare dispatch in the handlers.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "parts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::users::Entity")]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// The canonical organizational parts and their fixed numeric codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartCode {
    BackEnd = 1,
    FrontEnd = 2,
    Design = 3,
    ProjectManager = 4,
}

impl PartCode {
    pub const ALL: [PartCode; 4] = [
        PartCode::BackEnd,
        PartCode::FrontEnd,
        PartCode::Design,
        PartCode::ProjectManager,
    ];

    /// The numeric code, which is also the `parts` row id.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// The canonical path/display slug for this part.
    pub fn slug(self) -> &'static str {
        match self {
            Self::BackEnd => "back-end",
            Self::FrontEnd => "front-end",
            Self::Design => "design",
            Self::ProjectManager => "project-manager",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|part| part.slug() == slug)
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|part| part.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::PartCode;

    #[test]
    fn slugs_and_codes_round_trip() {
        for part in PartCode::ALL {
            assert_eq!(PartCode::from_slug(part.slug()), Some(part));
            assert_eq!(PartCode::from_code(part.code()), Some(part));
        }
    }

    #[test]
    fn unknown_slug_is_rejected() {
        assert_eq!(PartCode::from_slug("devops"), None);
        assert_eq!(PartCode::from_slug("Back-End"), None);
        assert_eq!(PartCode::from_code(0), None);
    }
}
