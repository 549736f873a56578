#![warn(missing_docs)]
//! Scene intro: fade-in, camera cutscene and typewriter dialogue.
//!
//! The sequencing pieces ([`tween`], [`reveal`], [`dialogue`], [`cutscene`],
//! [`intro`]) are plain state machines advanced with explicit deltas; each
//! plugin wires one of them into the app and draws its state.

pub mod camera;
pub mod cutscene;
pub mod dialogue;
pub mod error;
pub mod intro;
pub mod math;
pub mod reveal;
pub mod tween;

use bevy::prelude::*;

/// Application-wide game state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Intro sequence playing; input locked.
    #[default]
    Intro,
    /// Dialogue accepting clicks and choices.
    Dialogue,
    /// Debug overlay active (Tab to toggle).
    Debugging,
}

/// Per-frame ordering: sequencers step first, then views redraw.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceSet {
    /// State machines advance by the frame delta.
    Drive,
    /// Components are updated from state machine output.
    Present,
}
