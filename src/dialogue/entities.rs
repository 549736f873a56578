use std::sync::Arc;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::DialogueConfig;
use super::player::DialogueSurface;
use super::script::{Script, ScriptLoader};
use crate::error::ScriptError;
use crate::reveal::markup;

/// Root node of the dialogue box. Hidden until the intro hands over.
#[derive(Component, Reflect)]
pub struct DialogueBox;

/// The text node lines are typed into.
#[derive(Component, Reflect)]
pub struct DialogueText;

/// Container for the choice buttons.
#[derive(Component, Reflect)]
pub struct ChoicePanel;

/// A choice button; the value is the option index it selects.
#[derive(Component, Reflect)]
pub struct ChoiceButton(pub usize);

/// Label inside the [`ChoiceButton`] with the same index.
#[derive(Component, Reflect)]
pub struct ChoiceLabel(pub usize);

/// Where the dialogue script comes from.
#[derive(Resource, Clone)]
pub struct ScriptSource(Arc<dyn ScriptLoader + Send + Sync>);

impl ScriptSource {
    /// Wraps `loader`.
    pub fn new(loader: impl ScriptLoader + Send + Sync + 'static) -> Self {
        Self(Arc::new(loader))
    }

    /// Runs the loader.
    pub fn load(&self) -> Result<Script, ScriptError> {
        self.0.load()
    }
}

// ── Presentation surface ────────────────────────────────────────────

pub(super) type PanelQuery<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static mut Visibility),
    (With<ChoicePanel>, Without<ChoiceButton>),
>;

/// UI queries the player draws onto. Choice buttons are spawned on demand,
/// so a node may offer any number of options.
#[derive(SystemParam)]
pub struct DialogueUi<'w, 's> {
    pub(super) commands: Commands<'w, 's>,
    pub(super) cfg: Res<'w, DialogueConfig>,
    pub(super) text: Query<'w, 's, &'static mut Text, (With<DialogueText>, Without<ChoiceLabel>)>,
    pub(super) panel: PanelQuery<'w, 's>,
    pub(super) buttons: Query<'w, 's, (&'static ChoiceButton, &'static mut Visibility), Without<ChoicePanel>>,
    pub(super) labels: Query<'w, 's, (&'static ChoiceLabel, &'static mut Text), Without<DialogueText>>,
}

impl DialogueSurface for DialogueUi<'_, '_> {
    fn show_text(&mut self, text: &str, visible_characters: usize) {
        let shown = markup::visible_prefix(text, visible_characters);
        for mut node in &mut self.text {
            node.0.clone_from(&shown);
        }
    }

    fn show_choices(&mut self, choices: &[String]) {
        let spawned = self
            .buttons
            .iter()
            .map(|(button, _)| button.0 + 1)
            .max()
            .unwrap_or(0);
        let font_size = self.cfg.font_size * 0.8;
        for (panel, mut visibility) in &mut self.panel {
            *visibility = Visibility::Inherited;
            if choices.len() > spawned {
                self.commands.entity(panel).with_children(|panel| {
                    for (index, choice) in choices.iter().enumerate().skip(spawned) {
                        spawn_choice_button(panel, index, &markup::strip_tags(choice), font_size);
                    }
                });
            }
        }
        for (button, mut visibility) in &mut self.buttons {
            *visibility = if button.0 < choices.len() {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
        for (label, mut text) in &mut self.labels {
            if let Some(choice) = choices.get(label.0) {
                text.0 = markup::strip_tags(choice);
            }
        }
    }

    fn hide_choices(&mut self) {
        for (_, mut visibility) in &mut self.panel {
            *visibility = Visibility::Hidden;
        }
    }
}

/// Spawns the button for option `index` with its label already filled in.
fn spawn_choice_button(panel: &mut ChildSpawnerCommands, index: usize, label: &str, font_size: f32) {
    panel
        .spawn((
            Button,
            ChoiceButton(index),
            Node {
                padding: UiRect::axes(Val::Px(18.0), Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::srgb(0.15, 0.15, 0.2)),
        ))
        .with_children(|button| {
            button.spawn((
                ChoiceLabel(index),
                Text::new(label),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}
