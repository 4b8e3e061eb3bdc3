//! Playing field session: engine state machine, configuration, piece queue and scoring.

#![allow(clippy::new_without_default)]

#[macro_use]
extern crate tracing;

pub mod config;
pub use config::*;

pub mod event;
pub use event::*;

pub mod engine;
pub use engine::*;

pub mod queue;
pub use queue::*;

pub mod scoring;
pub use scoring::*;

pub mod game;
pub use game::*;
