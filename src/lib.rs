//! Customer database tools
//!
//! Two small programs over the `customers` table (a lister and a
//! connection checker) and the static build configuration of the web
//! frontend.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod build_config;
pub mod commands;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod repositories;

pub use commands::Outcome;
pub use errors::ToolError;
