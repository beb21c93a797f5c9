//! User accounts and sessions.
//!
//! This is the authentication collaborator of the board context: it answers
//! "is this user logged in?" and keeps the `Users` table. It follows the same
//! hexagonal split as [`crate::board`]:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
