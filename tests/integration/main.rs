//! Integration tests for the GlassFrog Rust client.
//!
//! Every test runs the real REST gateway against a local wiremock server
//! that serves GlassFrog-shaped envelopes, so the full path from
//! `Client::get` through URL building, authentication and link resolution
//! is exercised without network access.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With request logging
//! RUST_LOG=glassfrog=debug cargo test --test integration -- --nocapture
//! ```

mod client_tests;
mod common;
mod resolution_tests;
