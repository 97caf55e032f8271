//! filelinker - link free-text names to the best matching file in a catalog

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod linker;
pub mod output;
pub mod source;
