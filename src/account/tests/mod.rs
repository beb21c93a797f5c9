//! Unit tests for the account module.

mod adapter_tests;
