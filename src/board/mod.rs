//! Collaborative task boards.
//!
//! A board owns three fixed columns (Backlog, In Progress, Done) with
//! per-column WIP limits, plus a membership set. The [`services::BoardRegistry`]
//! keeps the live graph in memory, answers every query without I/O, and
//! writes each successful mutation through to a row store. At startup the
//! graph is rebuilt from that store.
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
