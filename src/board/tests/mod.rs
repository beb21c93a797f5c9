//! Unit tests for the board module.
//!
//! Domain tests cover the task, column and board rules in isolation; the
//! registry, rebuild and sync tests drive the services over the in-memory
//! store, and the store tests run the same contract against both adapters.

mod domain_tests;
mod registry_tests;
mod support;
