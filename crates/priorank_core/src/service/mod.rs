//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, selector, rating engine and persistence into the
//!   session-level API consumed by the presentation layer.
//! - Keep UI code decoupled from storage and policy details.

pub mod session;
