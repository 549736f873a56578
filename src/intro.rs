//! Intro sequence played at startup.
//!
//! Locks input, fades the scene in, plays the camera cutscene, then frees the
//! cursor and starts the dialogue. Each step waits for the previous one to
//! settle; a missing fade panel, cutscene or dialogue is skipped with a
//! warning rather than stalling the chain.

mod entities;
mod sequence;
mod systems;

pub use entities::{FadePanel, SceneStage};
pub use sequence::{IntroPhase, IntroSequence, IntroStage};

use bevy::prelude::*;

use crate::{GameState, SequenceSet};

/// Per-plugin configuration for the intro sequence.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct IntroConfig {
    /// Fade panel opaque → transparent (seconds).
    pub fade_in_duration: f32,
    /// Pause between the fade and the cutscene (seconds).
    pub scene_load_delay: f32,
    /// Pause between the cutscene and the dialogue (seconds).
    pub dialogue_start_delay: f32,
    /// Spawn the fade panel. Without it the fade is skipped.
    pub fade_panel: bool,
    /// Start the sequence automatically after startup.
    pub auto_start: bool,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            fade_in_duration: 1.0,
            scene_load_delay: 0.5,
            dialogue_start_delay: 1.0,
            fade_panel: true,
            auto_start: true,
        }
    }
}

/// Startup fade → cutscene → dialogue chain.
pub struct IntroPlugin(pub IntroConfig);

impl Plugin for IntroPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<IntroConfig>()
            .register_type::<FadePanel>()
            .insert_resource(self.0.clone())
            .insert_resource(IntroSequence::new(&self.0))
            .configure_sets(Update, (SequenceSet::Drive, SequenceSet::Present).chain())
            .add_systems(
                Startup,
                systems::spawn_fade_panel.run_if(|cfg: Res<IntroConfig>| cfg.fade_panel),
            )
            .add_systems(
                PostStartup,
                systems::begin_intro.run_if(|cfg: Res<IntroConfig>| cfg.auto_start),
            )
            .add_systems(
                Update,
                systems::run_intro
                    .in_set(SequenceSet::Drive)
                    .run_if(in_state(GameState::Intro)),
            );
    }
}
