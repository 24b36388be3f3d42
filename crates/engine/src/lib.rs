//! Store layer for the poll backend.
//!
//! The [`Engine`] owns the database connection and exposes every operation
//! the handlers and the admin CLI need: account management under
//! `ops/accounts` and poll/vote management under `ops/voting`. Records are
//! plain sea-orm models; nothing is cached in process.

pub use error::{EngineError, FieldErrors};
pub use ops::{Engine, EngineBuilder};
pub use parts::PartCode;

mod error;
mod ops;
mod util;

pub mod parts;
pub mod polls;
pub mod teams;
pub mod users;
pub mod votes;

type ResultEngine<T> = Result<T, EngineError>;
