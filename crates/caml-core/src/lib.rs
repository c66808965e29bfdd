//! # caml-core
//!
//! Core types shared by the CAML query builder crates.
//!
//! This crate provides the foundational building blocks used across the workspace:
//! - Common error type (`CamlError`)
//! - Result type alias (`CamlResult`)
//! - Runtime configuration loaded from the environment

pub mod error;
pub mod result;
pub mod config;

pub use error::*;
pub use result::*;
