//! CLI command implementations

pub mod commands;
mod demo;
pub mod init;
pub mod languages;
pub mod listen;
