//! Core types shared across kitledger facilities
//!
//! This crate provides the canonical schema constants used by both the
//! error facility and the logging facility, so every crate emits the same
//! structured field keys and event names.

pub mod schema;
