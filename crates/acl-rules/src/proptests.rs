//! Property-based tests for rule mutation and the access model.
