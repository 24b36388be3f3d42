//! Bootstrap utility for the poll backend.
//!
//! The HTTP surface deliberately has no account or fixture endpoints, so
//! users, teams, parts and polls are created from here.

use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::Engine;
use migration::MigratorTrait;
use sea_orm::Database;

#[derive(Parser, Debug)]
#[command(name = "ostraka_admin")]
#[command(about = "Admin utilities for Ostraka (bootstrap users/teams/polls)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./ostraka.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Team(NameArgs),
    Part(NameArgs),
    Poll(Poll),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
    /// Grant the superuser flag.
    #[arg(long)]
    superuser: bool,
    #[arg(long)]
    team_id: Option<i32>,
    #[arg(long)]
    part_id: Option<i32>,
}

#[derive(Args, Debug)]
struct NameArgs {
    #[command(subcommand)]
    command: NameCommand,
}

#[derive(Subcommand, Debug)]
enum NameCommand {
    Create {
        #[arg(long)]
        name: String,
    },
}

#[derive(Args, Debug)]
struct Poll {
    #[command(subcommand)]
    command: PollCommand,
}

#[derive(Subcommand, Debug)]
enum PollCommand {
    Create {
        #[arg(long)]
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = Database::connect(&cli.database_url).await?;
    migration::Migrator::up(&db, None).await?;
    let engine = Engine::builder().database(db).build();

    match cli.command {
        Command::User(user) => match user.command {
            UserCommand::Create(args) => {
                let user = if args.superuser {
                    engine
                        .create_superuser(&args.email, &args.username, &args.password)
                        .await?
                } else {
                    engine
                        .create_user(&args.email, &args.username, &args.password)
                        .await?
                };
                if args.team_id.is_some() || args.part_id.is_some() {
                    engine
                        .assign_user(user.id, args.team_id, args.part_id)
                        .await?;
                }
                println!("created user {} (id {})", user.username, user.id);
            }
        },
        Command::Team(team) => match team.command {
            NameCommand::Create { name } => {
                let team = engine.new_team(&name).await?;
                println!("created team {} (id {})", team.name, team.id);
            }
        },
        Command::Part(part) => match part.command {
            NameCommand::Create { name } => {
                let part = engine.new_part(&name).await?;
                println!("created part {} (id {})", part.name, part.id);
            }
        },
        Command::Poll(poll) => match poll.command {
            PollCommand::Create { question } => {
                let poll = engine.new_poll(&question).await?;
                println!("created poll \"{}\" (id {})", poll.question, poll.id);
            }
        },
    }

    Ok(())
}
