//! Screening decision engine for the Tsavo West delivery-driver role.
//!
//! The engine turns a free-form screening conversation into a structured,
//! persisted qualification record. Transport, presentation, and storage
//! backends live in the surrounding service; this crate owns the dialogue
//! state machine, the tool-invocation contract, and the scoring rubric.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
