use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::CursorOptions;

use super::sequence::IntroStage;
use crate::camera::{PointerLook, apply_cursor_lock};
use crate::cutscene::CameraCutscene;
use crate::dialogue::{DialogueBox, DialoguePlayer};

/// Full-screen panel faded out at the start of the intro.
#[derive(Component, Reflect)]
pub struct FadePanel;

type FadeQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut BackgroundColor, &'static mut Visibility),
    (With<FadePanel>, Without<DialogueBox>),
>;

/// World access the intro sequence works through. Any collaborator may be
/// missing; the sequence skips what it cannot reach.
#[derive(SystemParam)]
pub struct SceneStage<'w, 's> {
    look: Option<ResMut<'w, PointerLook>>,
    cutscene: Option<ResMut<'w, CameraCutscene>>,
    dialogue: Option<ResMut<'w, DialoguePlayer>>,
    cursors: Query<'w, 's, &'static mut CursorOptions>,
    fade: FadeQuery<'w, 's>,
    dialogue_box: Query<'w, 's, &'static mut Visibility, (With<DialogueBox>, Without<FadePanel>)>,
}

impl IntroStage for SceneStage<'_, '_> {
    fn set_pointer_look(&mut self, enabled: bool) {
        let Some(look) = self.look.as_mut() else {
            return;
        };
        if enabled {
            look.enable();
        } else {
            look.disable();
        }
    }

    fn set_cursor_locked(&mut self, locked: bool) {
        for mut opts in &mut self.cursors {
            apply_cursor_lock(&mut opts, locked);
        }
    }

    fn has_fade_panel(&self) -> bool {
        !self.fade.is_empty()
    }

    fn set_fade_alpha(&mut self, alpha: f32) {
        for (mut color, _) in &mut self.fade {
            color.0.set_alpha(alpha);
        }
    }

    fn set_fade_visible(&mut self, visible: bool) {
        for (_, mut visibility) in &mut self.fade {
            *visibility = visible_if(visible);
        }
    }

    fn set_dialogue_visible(&mut self, visible: bool) {
        for mut visibility in &mut self.dialogue_box {
            *visibility = visible_if(visible);
        }
    }

    fn cutscene(&mut self) -> Option<&mut CameraCutscene> {
        self.cutscene.as_deref_mut()
    }

    fn dialogue(&mut self) -> Option<&mut DialoguePlayer> {
        self.dialogue.as_deref_mut()
    }
}

fn visible_if(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}
