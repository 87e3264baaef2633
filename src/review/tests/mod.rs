//! Unit tests for the review workflow.

mod support;
