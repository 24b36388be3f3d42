//! Initial schema migration - creates all tables from scratch.
//!
//! - `teams`: named groups users belong to and votes pick
//! - `parts`: organizational categories (front-end, back-end, ...)
//! - `users`: accounts with unique email/username and hashed passwords
//! - `polls`: named questions votes are cast under
//! - `votes`: one chosen team per poll entry
//!
//! The four canonical parts are seeded so their row ids line up with the
//! fixed part codes (1=back-end, 2=front-end, 3=design, 4=project-manager).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Teams {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Parts {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    Username,
    Password,
    JoinedAt,
    TeamId,
    PartId,
    IsSuperuser,
}

#[derive(Iden)]
enum Polls {
    Table,
    Id,
    Question,
}

#[derive(Iden)]
enum Votes {
    Table,
    Id,
    PollId,
    TeamId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teams::Name).string_len(20).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Parts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Parts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Parts::Name).string_len(20).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(30)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::TeamId).integer())
                    .col(ColumnDef::new(Users::PartId).integer())
                    .col(
                        ColumnDef::new(Users::IsSuperuser)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-users-team_id")
                            .from(Users::Table, Users::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-users-part_id")
                            .from(Users::Table, Users::PartId)
                            .to(Parts::Table, Parts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Polls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Polls::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Polls::Question).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Votes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Votes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Votes::PollId).integer().not_null())
                    .col(ColumnDef::new(Votes::TeamId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-votes-poll_id")
                            .from(Votes::Table, Votes::PollId)
                            .to(Polls::Table, Polls::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-votes-team_id")
                            .from(Votes::Table, Votes::TeamId)
                            .to(Teams::Table, Teams::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Seed the canonical parts so ids match the fixed codes.
        let insert = Query::insert()
            .into_table(Parts::Table)
            .columns([Parts::Id, Parts::Name])
            .values_panic([1.into(), "back-end".into()])
            .values_panic([2.into(), "front-end".into()])
            .values_panic([3.into(), "design".into()])
            .values_panic([4.into(), "project-manager".into()])
            .to_owned();
        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Votes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Polls::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Parts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await
    }
}
