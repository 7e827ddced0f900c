//! Integration tests driving the full router.
//!
//! These tests need a PostgreSQL instance; set `NIMBUS_TEST_DATABASE_URL`
//! (or `DATABASE_URL`) to run them. Without it every test skips.

mod helpers;

mod auth_test;
mod file_test;
