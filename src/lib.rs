//! Guided reframe dialogue engine.
//!
//! A three-phase conversation (reframe, shift, tag) on top of a
//! conversational assistant. The engine mines assistant prose for a
//! first-person reframe and an "I went from X to Y" shift statement, guides
//! the user through capturing the shift without the assistant, and produces a
//! [`model::ReframeResult`] once the user applies it.

pub mod assistant;
pub mod cli;
pub mod config;
pub mod dialogue;
pub mod extract;
pub mod intercept;
pub mod model;
pub mod normalize;
pub mod prompts;
pub mod session;
pub mod shift;
pub mod storage;
