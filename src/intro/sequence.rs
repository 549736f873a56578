//! Phase machine chaining fade → cutscene → dialogue.

use bevy::log::{debug, info, warn};
use bevy::prelude::Resource;

use super::IntroConfig;
use crate::cutscene::CameraCutscene;
use crate::dialogue::DialoguePlayer;
use crate::error::SequenceError;
use crate::math::EasingCurve;
use crate::tween::{Tween, TweenSpec};

/// Phases of the intro, in the only order they can run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntroPhase {
    /// [`IntroSequence::start`] has not been called.
    #[default]
    NotStarted,
    /// Input locked, dialogue hidden.
    Locked,
    /// Fade panel going from opaque to transparent.
    FadingIn,
    /// Pause before the cutscene.
    PreCutsceneDelay,
    /// Waiting for the camera cutscene to complete.
    PlayingCutscene,
    /// Pause before the dialogue.
    PostCutsceneDelay,
    /// Cursor freed, dialogue shown.
    Unlocked,
    /// Dialogue running; the intro is done.
    DialogueStarted,
}

/// Everything the intro touches but does not own.
pub trait IntroStage {
    /// Turns pointer look on or off.
    fn set_pointer_look(&mut self, enabled: bool);
    /// Locks and hides the cursor, or frees it.
    fn set_cursor_locked(&mut self, locked: bool);
    /// `true` when there is a fade panel to drive.
    fn has_fade_panel(&self) -> bool;
    /// Sets the fade panel opacity.
    fn set_fade_alpha(&mut self, alpha: f32);
    /// Shows or hides the fade panel.
    fn set_fade_visible(&mut self, visible: bool);
    /// Shows or hides the dialogue presentation surface.
    fn set_dialogue_visible(&mut self, visible: bool);
    /// The camera cutscene, if one is wired up.
    fn cutscene(&mut self) -> Option<&mut CameraCutscene>;
    /// The dialogue player, if one is wired up.
    fn dialogue(&mut self) -> Option<&mut DialoguePlayer>;
}

/// One-shot intro sequencer driven by [`Self::advance`].
#[derive(Resource, Debug)]
pub struct IntroSequence {
    phase: IntroPhase,
    timer: f32,
    fade: Option<Tween<f32>>,
    trace: Vec<IntroPhase>,
    fade_in_duration: f32,
    scene_load_delay: f32,
    dialogue_start_delay: f32,
}

impl IntroSequence {
    /// A sequencer with `cfg` timings, not yet started.
    pub fn new(cfg: &IntroConfig) -> Self {
        Self {
            phase: IntroPhase::NotStarted,
            timer: 0.0,
            fade: None,
            trace: Vec::new(),
            fade_in_duration: cfg.fade_in_duration,
            scene_load_delay: cfg.scene_load_delay,
            dialogue_start_delay: cfg.dialogue_start_delay,
        }
    }

    /// Locks input and begins the fade. Any later call is ignored.
    pub fn start(&mut self, stage: &mut impl IntroStage) -> Result<(), SequenceError> {
        if self.is_started() {
            debug!("Intro sequence already started; ignoring start");
            return Err(SequenceError::SequenceMisuse("intro already started"));
        }
        info!("Intro sequence starting");

        self.enter(IntroPhase::Locked);
        stage.set_cursor_locked(true);
        stage.set_pointer_look(false);
        stage.set_dialogue_visible(false);

        self.begin_fade(stage);
        Ok(())
    }

    /// Advances the current phase by `dt` seconds.
    pub fn advance(&mut self, dt: f32, stage: &mut impl IntroStage) {
        match self.phase {
            IntroPhase::FadingIn => self.tick_fade(dt, stage),
            IntroPhase::PreCutsceneDelay => {
                if self.wait(dt, self.scene_load_delay) {
                    self.begin_cutscene(stage);
                }
            }
            IntroPhase::PlayingCutscene => {
                let complete = match stage.cutscene() {
                    Some(cutscene) => {
                        cutscene.advance(dt);
                        cutscene.is_complete()
                    }
                    None => {
                        warn!("Camera cutscene went away mid-play");
                        true
                    }
                };
                if complete {
                    self.end_cutscene(stage);
                }
            }
            IntroPhase::PostCutsceneDelay => {
                if self.wait(dt, self.dialogue_start_delay) {
                    self.hand_over(stage);
                }
            }
            IntroPhase::NotStarted
            | IntroPhase::Locked
            | IntroPhase::Unlocked
            | IntroPhase::DialogueStarted => {}
        }
    }

    fn begin_fade(&mut self, stage: &mut impl IntroStage) {
        self.enter(IntroPhase::FadingIn);
        if !stage.has_fade_panel() {
            debug!("No fade panel; skipping fade");
            self.enter(IntroPhase::PreCutsceneDelay);
            return;
        }

        match TweenSpec::new(1.0, 0.0, self.fade_in_duration, EasingCurve::Linear) {
            Ok(spec) => {
                info!("Fading in scene");
                stage.set_fade_alpha(1.0);
                stage.set_fade_visible(true);
                self.fade = Some(Tween::new(spec));
            }
            Err(err) => {
                warn!("Fade skipped: {err}");
                stage.set_fade_alpha(0.0);
                stage.set_fade_visible(false);
                self.enter(IntroPhase::PreCutsceneDelay);
            }
        }
    }

    fn tick_fade(&mut self, dt: f32, stage: &mut impl IntroStage) {
        let Some(fade) = self.fade.as_mut() else {
            self.enter(IntroPhase::PreCutsceneDelay);
            return;
        };
        let step = fade.tick(dt);
        stage.set_fade_alpha(step.value);
        if step.finished {
            stage.set_fade_visible(false);
            self.fade = None;
            self.enter(IntroPhase::PreCutsceneDelay);
        }
    }

    fn begin_cutscene(&mut self, stage: &mut impl IntroStage) {
        self.enter(IntroPhase::PlayingCutscene);
        let playing = match stage.cutscene() {
            Some(cutscene) => match cutscene.play() {
                Ok(()) => {
                    info!("Starting camera cutscene");
                    true
                }
                Err(err) => {
                    warn!("Camera cutscene skipped: {err}");
                    false
                }
            },
            None => {
                warn!(
                    "{}; skipping cutscene",
                    SequenceError::MissingCollaborator("camera cutscene")
                );
                false
            }
        };
        if !playing {
            self.end_cutscene(stage);
        }
    }

    fn end_cutscene(&mut self, stage: &mut impl IntroStage) {
        stage.set_pointer_look(true);
        self.enter(IntroPhase::PostCutsceneDelay);
    }

    fn hand_over(&mut self, stage: &mut impl IntroStage) {
        self.enter(IntroPhase::Unlocked);
        stage.set_cursor_locked(false);

        let has_dialogue = stage.dialogue().is_some();
        if has_dialogue {
            stage.set_dialogue_visible(true);
        }

        self.enter(IntroPhase::DialogueStarted);
        let started = match stage.dialogue() {
            Some(dialogue) => dialogue.start(),
            None => Err(SequenceError::MissingCollaborator("dialogue player")),
        };
        match started {
            Ok(()) => info!("Intro sequence complete; dialogue running"),
            Err(err) => {
                warn!("Dialogue not started: {err}");
                if has_dialogue {
                    stage.set_dialogue_visible(false);
                }
            }
        }
    }

    fn wait(&mut self, dt: f32, duration: f32) -> bool {
        self.timer += dt;
        self.timer >= duration
    }

    fn enter(&mut self, phase: IntroPhase) {
        debug!("Intro phase: {phase:?}");
        self.phase = phase;
        self.timer = 0.0;
        self.trace.push(phase);
    }

    /// Current phase.
    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// `true` once [`Self::start`] has run.
    pub fn is_started(&self) -> bool {
        self.phase != IntroPhase::NotStarted
    }

    /// `true` once the dialogue has been handed control.
    pub fn is_done(&self) -> bool {
        self.phase == IntroPhase::DialogueStarted
    }

    /// Every phase entered so far, in order.
    pub fn trace(&self) -> &[IntroPhase] {
        &self.trace
    }
}
