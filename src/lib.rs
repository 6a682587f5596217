//! mri — Meter Reading Import
//!
//! Normalises heterogeneous meter-reading files into one canonical schema and
//! re-exports them. This crate re-exports the pipeline and source crates so
//! that integration tests and embedders can import them from one place.
//!
//! # Architecture
//!
//! ```text
//! file ──► Sources ──► Resolver ──► Normalizer ──► Validator ──► ImportResult
//!                         │                                          │
//!                      Catalog                                    Export ──► file
//! ```
//!
//! Every stage runs synchronously inside one call; concurrent imports share
//! nothing but the read-only synonym catalog.

pub mod commands;

pub use mri_core::*;
pub use mri_sources as sources;
