//! Shared helpers for unit tests that need a local mock HTTP server.

pub(crate) mod socket_guard;
