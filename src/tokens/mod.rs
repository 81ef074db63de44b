//! Token generation module.
//!
//! Evaluates stable rules against a snapshot payload and emits range tokens.

pub mod generator;

pub use generator::*;
