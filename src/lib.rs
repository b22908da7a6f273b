//! Nutriview library
//!
//! This module exposes the data-access layer (cache, repository, models,
//! catalog) and the CLI definitions for use in integration tests.

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod data;
pub mod repository;
