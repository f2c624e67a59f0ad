//! Library target for the `gravel` binary.
//!
//! `cargo test -p gravel-cli --lib` typechecks the CLI without building the
//! integration suite, so the binary root is compiled here as a module.

#[allow(dead_code)]
#[path = "main.rs"]
mod main_bin;
