//! Core types and definitions for the NEXORA animation engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! anchors, event components, scene configuration, frame views, and
//! constants. It has no dependency on any drawing surface or runtime.

pub mod anchor;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod state;
pub mod types;
