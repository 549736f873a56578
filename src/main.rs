//! Scene intro viewer.
//!
//! Fades in, plays the camera cutscene, then runs the dialogue script.
//! Tab toggles the world inspector once the dialogue is running; Escape quits.

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::window::CursorOptions;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
#[cfg(feature = "native")]
use clap::error::ErrorKind;
#[cfg(feature = "native")]
use clap::{CommandFactory, Parser};
#[cfg(feature = "native")]
use scene_intro::error::SequenceError;

use scene_intro::GameState;
use scene_intro::camera::{self, CameraPlugin};
use scene_intro::cutscene::{CutsceneConfig, CutscenePlugin};
use scene_intro::dialogue::{DialogueConfig, DialoguePlugin};
use scene_intro::intro::{IntroConfig, IntroPlugin};

/// Command-line overrides for the shipped defaults.
#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Dialogue script to play (RON).
    #[arg(long)]
    script: Option<String>,
    /// Seconds between revealed characters.
    #[arg(long)]
    typing_speed: Option<f32>,
    /// Skip the fade-in panel.
    #[arg(long)]
    no_fade: bool,
}

#[cfg(feature = "native")]
impl Args {
    /// Shipped defaults with these overrides applied, rejecting bad timings.
    fn into_configs(self) -> Result<(DialogueConfig, IntroConfig), SequenceError> {
        let mut dialogue = DialogueConfig::default();
        if let Some(script) = self.script {
            dialogue.script_path = script;
        }
        if let Some(speed) = self.typing_speed {
            dialogue.typing_speed = speed;
        }
        dialogue.validate()?;
        let intro = IntroConfig {
            fade_panel: !self.no_fade,
            ..default()
        };
        Ok((dialogue, intro))
    }
}

/// Shipped defaults with any command-line overrides applied. Invalid
/// overrides end the process with a usage error.
#[cfg(feature = "native")]
fn configs() -> (DialogueConfig, IntroConfig) {
    match Args::parse().into_configs() {
        Ok(configs) => configs,
        Err(err) => Args::command()
            .error(ErrorKind::ValueValidation, err)
            .exit(),
    }
}

#[cfg(not(feature = "native"))]
fn configs() -> (DialogueConfig, IntroConfig) {
    (DialogueConfig::default(), IntroConfig::default())
}

fn main() {
    let (dialogue_cfg, intro_cfg) = configs();
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Scene Intro".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .init_state::<GameState>();

    #[cfg(feature = "native")]
    app.add_plugins(bevy::remote::RemotePlugin::default())
        .add_plugins(bevy::remote::http::RemoteHttpPlugin::default());

    app.add_plugins(bevy_egui::EguiPlugin::default())
        .add_plugins(CameraPlugin(camera::CameraConfig::default()))
        .add_plugins(CutscenePlugin(CutsceneConfig::default()))
        .add_plugins(DialoguePlugin(dialogue_cfg))
        .add_plugins(IntroPlugin(intro_cfg))
        .add_systems(Update, exit_on_esc)
        .add_systems(Update, toggle_inspector)
        .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
    mut cursors: Query<&mut CursorOptions>,
) {
    if !keys.just_pressed(KeyCode::Tab) {
        return;
    }
    let new_state = match state.get() {
        GameState::Dialogue => GameState::Debugging,
        GameState::Debugging => GameState::Dialogue,
        GameState::Intro => return,
    };
    info!("Switching to {new_state:?}");
    if new_state == GameState::Debugging {
        for mut opts in &mut cursors {
            camera::apply_cursor_lock(&mut opts, false);
        }
    }
    next.set(new_state);
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
