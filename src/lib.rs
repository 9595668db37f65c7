//! In-memory state and derivation core for a business expense and
//! project tracker.
//!
//! Two independent stores own the data: [`ExpenseStore`] for logged
//! expenses and [`ProjectStore`] for projects, tasks, time entries and
//! team members. Mutations run synchronously to completion; summaries and
//! filtered views are pure derivations recomputed from current state.
//! [`Hydrator`] performs the one-time startup load from a [`Storage`]
//! slot (seed data when nothing is stored) and wires write-back
//! persistence after every mutation.

mod errors;
mod expense;
mod export;
mod project;
mod storage;

pub use errors::*;
pub use expense::*;
pub use export::*;
pub use project::*;
pub use storage::*;
