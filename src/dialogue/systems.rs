use std::sync::Arc;

use bevy::prelude::*;

use super::DialogueConfig;
use super::entities::{ChoiceButton, ChoicePanel, DialogueBox, DialogueText, DialogueUi, ScriptSource};
use super::player::{DialoguePlayer, InputOutcome};

/// Spawns the hidden dialogue box: a text line above an empty choice row.
/// Buttons are added the first time a node offers that many options.
pub fn spawn_dialogue_ui(mut commands: Commands, cfg: Res<DialogueConfig>) {
    commands
        .spawn((
            Name::new("DialogueBox"),
            DialogueBox,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(10.0),
                right: Val::Percent(10.0),
                bottom: Val::Px(32.0),
                min_height: Val::Px(140.0),
                padding: UiRect::all(Val::Px(20.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
            Visibility::Hidden,
        ))
        .with_children(|root| {
            root.spawn((
                DialogueText,
                Text::new(""),
                TextFont {
                    font_size: cfg.font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            root.spawn((
                ChoicePanel,
                Node {
                    flex_direction: FlexDirection::Row,
                    flex_wrap: FlexWrap::Wrap,
                    column_gap: Val::Px(24.0),
                    row_gap: Val::Px(12.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                Visibility::Hidden,
            ));
        });
}

/// Loads the configured script into the player. A failure leaves the player
/// uninitialized; the intro then skips the dialogue phase.
pub fn load_script(source: Res<ScriptSource>, mut player: ResMut<DialoguePlayer>) {
    match source.load() {
        Ok(script) => {
            if let Err(err) = player.load(Arc::new(script)) {
                warn!("Dialogue script not applied: {err}");
            }
        }
        Err(err) => error!("Dialogue script unavailable: {err}"),
    }
}

/// Left click, Space or Enter: finish the running line or advance.
pub fn primary_input(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut player: ResMut<DialoguePlayer>,
) {
    let pressed = mouse.just_pressed(MouseButton::Left)
        || keys.just_pressed(KeyCode::Space)
        || keys.just_pressed(KeyCode::Enter);
    if !pressed {
        return;
    }

    match player.on_primary_input() {
        InputOutcome::Skipped => debug!("Line skipped to end"),
        InputOutcome::Advanced => debug!("Advanced to node {}", player.cursor().index),
        InputOutcome::Ignored => {}
    }
}

/// Forwards pressed choice buttons to the player.
pub fn choose_option(
    buttons: Query<(&Interaction, &ChoiceButton), Changed<Interaction>>,
    mut player: ResMut<DialoguePlayer>,
) {
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match player.select_choice(button.0) {
            Ok(()) => info!("Picked option {}", button.0),
            Err(err) => warn!("Choice {} rejected: {err}", button.0),
        }
    }
}

/// Steps the reveal and echo timers.
pub fn tick_dialogue(time: Res<Time>, mut player: ResMut<DialoguePlayer>) {
    if player.bypass_change_detection().advance(time.delta_secs()) {
        player.set_changed();
    }
}

/// Redraws the dialogue box after the player changed.
pub fn present_dialogue(player: Res<DialoguePlayer>, mut ui: DialogueUi) {
    player.present(&mut ui);
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::dialogue::entities::ChoiceLabel;
    use crate::dialogue::script::{DialogueNode, Script};

    fn world_with(nodes: Vec<DialogueNode>) -> World {
        let cfg = DialogueConfig::default();
        let mut player = DialoguePlayer::with_script(Arc::new(Script::new(nodes)), &cfg).unwrap();
        player.start().unwrap();

        let mut world = World::new();
        world.insert_resource(cfg);
        world.insert_resource(player);
        world.run_system_once(spawn_dialogue_ui).unwrap();
        world
    }

    fn labels(world: &mut World) -> Vec<(usize, String)> {
        let mut labels: Vec<_> = world
            .query::<(&ChoiceLabel, &Text)>()
            .iter(world)
            .map(|(label, text)| (label.0, text.0.clone()))
            .collect();
        labels.sort();
        labels
    }

    fn visible_buttons(world: &mut World) -> Vec<usize> {
        let mut shown: Vec<_> = world
            .query::<(&ChoiceButton, &Visibility)>()
            .iter(world)
            .filter(|(_, visibility)| **visibility != Visibility::Hidden)
            .map(|(button, _)| button.0)
            .collect();
        shown.sort();
        shown
    }

    // ── choice buttons ──────────────────────────────────────────────

    #[test]
    fn every_option_gets_a_button() {
        let mut world = world_with(vec![DialogueNode::choice(["a", "b", "<i>c</i>"])]);
        world.run_system_once(present_dialogue).unwrap();

        assert_eq!(
            labels(&mut world),
            [(0, "a".to_string()), (1, "b".to_string()), (2, "c".to_string())]
        );
        assert_eq!(visible_buttons(&mut world), [0, 1, 2]);
    }

    #[test]
    fn third_button_selects_third_option() {
        let mut world = world_with(vec![DialogueNode::choice(["a", "b", "c"])]);
        world.run_system_once(present_dialogue).unwrap();

        let third = world
            .query::<(Entity, &ChoiceButton)>()
            .iter(&world)
            .find(|(_, button)| button.0 == 2)
            .map(|(entity, _)| entity)
            .unwrap();
        world.entity_mut(third).insert(Interaction::Pressed);
        world.run_system_once(choose_option).unwrap();

        assert_eq!(world.resource::<DialoguePlayer>().current_line(), "You: c");
    }

    #[test]
    fn narrower_choice_reuses_and_hides_buttons() {
        let mut world = world_with(vec![
            DialogueNode::choice(["a", "b", "c"]),
            DialogueNode::choice(["x", "y"]),
        ]);
        world.run_system_once(present_dialogue).unwrap();

        let mut player = world.resource_mut::<DialoguePlayer>();
        player.select_choice(0).unwrap();
        player.advance(60.0);
        assert_eq!(player.on_primary_input(), InputOutcome::Advanced);
        world.run_system_once(present_dialogue).unwrap();

        assert_eq!(labels(&mut world).len(), 3);
        assert_eq!(&labels(&mut world)[..2], [(0, "x".to_string()), (1, "y".to_string())]);
        assert_eq!(visible_buttons(&mut world), [0, 1]);
    }
}
