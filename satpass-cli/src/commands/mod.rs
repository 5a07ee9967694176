//! CLI command implementations.

pub mod cities;
pub mod common;
pub mod config;
pub mod init;
pub mod pass;
pub mod position;
pub mod track;
