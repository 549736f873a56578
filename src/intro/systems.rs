use bevy::prelude::*;

use super::entities::{FadePanel, SceneStage};
use super::sequence::IntroSequence;
use crate::GameState;

/// Spawns the opaque black panel the intro fades out.
pub fn spawn_fade_panel(mut commands: Commands) {
    commands.spawn((
        Name::new("FadePanel"),
        FadePanel,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::BLACK),
        GlobalZIndex(i32::MAX),
    ));
}

/// Kicks the intro off once the scene exists.
pub fn begin_intro(mut intro: ResMut<IntroSequence>, mut stage: SceneStage) {
    if let Err(err) = intro.start(&mut stage) {
        debug!("Intro not started: {err}");
    }
}

/// Steps the intro; hands the app over to dialogue when it is done.
pub fn run_intro(
    time: Res<Time>,
    mut intro: ResMut<IntroSequence>,
    mut stage: SceneStage,
    mut next: ResMut<NextState<GameState>>,
) {
    intro.advance(time.delta_secs(), &mut stage);
    if intro.is_done() {
        next.set(GameState::Dialogue);
    }
}
