//! Test fixtures for Spyglass unit tests.
//!
//! This module is only available when compiling with `--cfg test` or
//! running tests. It provides a shared sample dependency log and search
//! output exercising every matcher kind.

pub mod fixtures;
