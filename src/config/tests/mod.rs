//! Unit tests for tracker configuration.
