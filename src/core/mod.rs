//! core
//!
//! Core domain types, schemas, and checks for basalt-build.
//!
//! # Modules
//!
//! - [`types`] - Extension descriptors
//! - [`platform`] - Host platform classification
//! - [`version`] - Version string checks and tool version parsing
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for build locations
//!
//! # Design Principles
//!
//! - Descriptors are plain data, validated only when used
//! - Schemas are strict and reject unknown fields
//! - Platform decisions are made once and passed explicitly

pub mod config;
pub mod paths;
pub mod platform;
pub mod types;
pub mod version;
