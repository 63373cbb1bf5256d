//! Property-based tests for merge and rendering laws

mod profile_laws;
