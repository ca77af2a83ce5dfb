//! Test support shared by database-backed unit tests.

pub(crate) mod helpers;

pub(crate) use context::TestContext;
