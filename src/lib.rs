//! # Connect-M
//!
//! A generalized Connect Four: pieces drop onto a square N x N board and a
//! straight run of M connected pieces wins. A minimax opponent with
//! alpha-beta pruning plays the other side. The binary wraps the engine in a
//! plain terminal loop; everything else is library code.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, players, session state machine
//! - [`ai`] — Agent trait, minimax search engine, random baseline
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
