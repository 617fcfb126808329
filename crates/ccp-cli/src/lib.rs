//! ccp-cli library root.
//!
//! Re-exports argument parsing, profile config and the apply flow so
//! integration tests can exercise them without spawning the binary.

pub mod args;
pub mod config;
pub mod run;
