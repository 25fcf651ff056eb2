//! Unit tests for the task context.

mod transition_tests;
