//! # lab-core
//!
//! Core types, traits, and utilities for Lab Site RS.
//!
//! This crate provides the foundational building blocks used across all
//! other crates:
//! - Validation error collection
//! - Core traits (Identifiable, Timestamped)
//! - Configuration types

pub mod config;
pub mod error;
pub mod traits;

pub use error::*;
pub use traits::*;
