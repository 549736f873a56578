//! Dialogue box: typewriter lines, click-to-skip, one button per choice.
//!
//! [`DialoguePlayer`] holds all playback state and is driven by systems in
//! this module; the intro sequence decides when it starts.

mod entities;
mod player;
pub mod script;
mod systems;

pub use entities::{ChoiceButton, DialogueBox, DialogueText, ScriptSource};
pub use player::{
    DialoguePlayer, DialogueState, DialogueSurface, InputOutcome, PlaybackCursor,
};

use bevy::prelude::*;

use crate::error::SequenceError;
use crate::reveal::{self, TextReveal};
use crate::{GameState, SequenceSet};
use script::RonFileLoader;

/// Per-plugin configuration for dialogue playback.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct DialogueConfig {
    /// Seconds between revealed characters.
    pub typing_speed: f32,
    /// Pause after an echoed choice before the next node (seconds).
    pub choice_continue_delay: f32,
    /// Prepended to a picked option to mark it as the player's line.
    pub echo_prefix: String,
    /// RON script asset to play.
    pub script_path: String,
    /// Dialogue text size.
    pub font_size: f32,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            typing_speed: reveal::DEFAULT_INTERVAL,
            choice_continue_delay: 0.5,
            echo_prefix: "You: ".into(),
            script_path: "assets/dialogue/scene1.ron".into(),
            font_size: 26.0,
        }
    }
}

impl DialogueConfig {
    /// Checks the timings: the typing speed must be a valid reveal interval
    /// and the continue delay finite and non-negative.
    pub fn validate(&self) -> Result<(), SequenceError> {
        TextReveal::new(self.typing_speed)?;
        let delay = self.choice_continue_delay;
        if !delay.is_finite() || delay < 0.0 {
            return Err(SequenceError::InvalidArgument(format!(
                "choice continue delay must be finite and non-negative, got {delay}"
            )));
        }
        Ok(())
    }
}

/// Dialogue UI, input routing, and per-frame reveal.
pub struct DialoguePlugin(pub DialogueConfig);

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        let player = DialoguePlayer::new(&self.0).unwrap_or_else(|err| {
            error!("Dialogue config rejected ({err}); using default timings");
            DialoguePlayer::default()
        });

        app.register_type::<DialogueConfig>()
            .insert_resource(self.0.clone())
            .insert_resource(player)
            .insert_resource(ScriptSource::new(RonFileLoader::new(&self.0.script_path)))
            .add_systems(
                Startup,
                (systems::spawn_dialogue_ui, systems::load_script),
            )
            .configure_sets(Update, (SequenceSet::Drive, SequenceSet::Present).chain())
            .add_systems(
                Update,
                (
                    (systems::primary_input, systems::choose_option)
                        .chain()
                        .run_if(in_state(GameState::Dialogue)),
                    systems::tick_dialogue,
                )
                    .chain()
                    .in_set(SequenceSet::Drive),
            )
            .add_systems(
                Update,
                systems::present_dialogue
                    .in_set(SequenceSet::Present)
                    .run_if(resource_changed::<DialoguePlayer>),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(DialogueConfig::default().validate().is_ok());
    }

    #[test]
    fn nan_typing_speed_is_rejected() {
        let cfg = DialogueConfig {
            typing_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(SequenceError::InvalidArgument(_))
        ));
        assert!(DialoguePlayer::new(&cfg).is_err());
    }

    #[test]
    fn negative_continue_delay_is_rejected() {
        let cfg = DialogueConfig {
            choice_continue_delay: -0.5,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_typing_speed_reveals_instantly() {
        let cfg = DialogueConfig {
            typing_speed: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
