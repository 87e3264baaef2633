//! Unit tests for the gateway.

mod error_tests;
