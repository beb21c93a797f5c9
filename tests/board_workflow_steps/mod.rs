//! Step definitions for the board workflow scenarios.

mod given;
mod then;
mod when;
pub mod world;
