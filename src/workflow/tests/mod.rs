//! Unit tests for the workflow context.
