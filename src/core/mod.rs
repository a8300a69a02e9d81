//! core
//!
//! Core domain types and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid, Refspec, Signature, Branch, etc.
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing

pub mod config;
pub mod types;
