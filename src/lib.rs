//! Sentence Builder · word-order trainer backend.
//!
//! The learner sees a Chinese prompt and rebuilds the English sentence from a
//! scrambled pool of word tiles. `session` holds the game state machine;
//! `driver` runs one session per WebSocket connection with its timers;
//! `routes` exposes the WebSocket and a small HTTP API.

pub mod board;
pub mod clock;
pub mod config;
pub mod domain;
pub mod driver;
pub mod logic;
pub mod pinyin;
pub mod pool;
pub mod protocol;
pub mod routes;
pub mod seeds;
pub mod session;
pub mod shuffle;
pub mod speech;
pub mod state;
pub mod telemetry;
