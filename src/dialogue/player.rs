//! Dialogue playback state machine.
//!
//! Walks a [`Script`] one node at a time. Text lines are revealed through a
//! [`TextReveal`]; a click while revealing finishes the line instantly, a
//! click on a finished line advances. Choice nodes block clicks until an
//! option is selected, then echo the option as the player's line and move on
//! by themselves after a short pause.

use std::sync::Arc;

use bevy::log::{debug, info};
use bevy::prelude::Resource;

use super::DialogueConfig;
use super::script::Script;
use crate::error::SequenceError;
use crate::reveal::markup;
use crate::reveal::{RevealState, TextReveal};

/// Playback stage of a [`DialoguePlayer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialogueState {
    /// No script loaded yet.
    #[default]
    Uninitialized,
    /// Script loaded, waiting for [`DialoguePlayer::start`].
    Idle,
    /// A text line is on screen (revealing or revealed).
    ShowingLine,
    /// Options are on screen; clicks are ignored.
    ShowingChoice,
    /// The picked option is being echoed back before moving on.
    EchoingChoice,
    /// Every node has been played.
    Finished,
}

/// Position within the script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackCursor {
    /// Index of the current node.
    pub index: usize,
    /// Reveal progress of the current line.
    pub reveal_state: RevealState,
    /// `true` while a choice node waits for a selection.
    pub awaiting_choice: bool,
}

/// What a primary input did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not routed: not started, awaiting a choice, or finished.
    Ignored,
    /// The running reveal was finished instantly.
    Skipped,
    /// The cursor moved to the next node.
    Advanced,
}

/// Where the player draws its text and options.
pub trait DialogueSurface {
    /// Shows `text` with only its first `visible_characters` visible characters.
    fn show_text(&mut self, text: &str, visible_characters: usize);
    /// Presents `choices`, addressed by index.
    fn show_choices(&mut self, choices: &[String]);
    /// Removes any presented choices.
    fn hide_choices(&mut self);
}

/// Plays one script. Insert as a resource; scenes differ only by script.
#[derive(Resource)]
pub struct DialoguePlayer {
    script: Option<Arc<Script>>,
    state: DialogueState,
    cursor: PlaybackCursor,
    reveal: TextReveal,
    line: String,
    echo_prefix: String,
    continue_delay: f32,
    continue_elapsed: f32,
}

impl Default for DialoguePlayer {
    fn default() -> Self {
        Self::assemble(TextReveal::default(), &DialogueConfig::default())
    }
}

impl DialoguePlayer {
    /// An uninitialized player; call [`Self::load`] before starting.
    ///
    /// Fails when `config` has a negative or non-finite typing speed or
    /// continue delay.
    pub fn new(config: &DialogueConfig) -> Result<Self, SequenceError> {
        config.validate()?;
        Ok(Self::assemble(TextReveal::new(config.typing_speed)?, config))
    }

    /// A player ready to start `script`.
    pub fn with_script(
        script: Arc<Script>,
        config: &DialogueConfig,
    ) -> Result<Self, SequenceError> {
        let mut player = Self::new(config)?;
        player.script = Some(script);
        player.state = DialogueState::Idle;
        Ok(player)
    }

    fn assemble(reveal: TextReveal, config: &DialogueConfig) -> Self {
        Self {
            script: None,
            state: DialogueState::Uninitialized,
            cursor: PlaybackCursor::default(),
            reveal,
            line: String::new(),
            echo_prefix: config.echo_prefix.clone(),
            continue_delay: config.choice_continue_delay,
            continue_elapsed: 0.0,
        }
    }

    /// Attaches `script`. Only allowed before playback has started.
    pub fn load(&mut self, script: Arc<Script>) -> Result<(), SequenceError> {
        match self.state {
            DialogueState::Uninitialized | DialogueState::Idle => {
                info!("Dialogue script loaded ({} nodes)", script.len());
                self.script = Some(script);
                self.state = DialogueState::Idle;
                Ok(())
            }
            _ => Err(SequenceError::SequenceMisuse(
                "cannot swap the script of a running dialogue",
            )),
        }
    }

    /// Begins playback from the first node. Calling it again is a no-op;
    /// use [`Self::restart`] to play from the top.
    pub fn start(&mut self) -> Result<(), SequenceError> {
        match self.state {
            DialogueState::Uninitialized => {
                Err(SequenceError::MissingCollaborator("dialogue script"))
            }
            DialogueState::Idle => {
                info!("Starting dialogue");
                self.play_from_top();
                Ok(())
            }
            _ => {
                debug!("Dialogue already started; ignoring start");
                Err(SequenceError::SequenceMisuse("dialogue already started"))
            }
        }
    }

    /// Resets the cursor and plays from the first node, whatever the state.
    pub fn restart(&mut self) -> Result<(), SequenceError> {
        if self.script.is_none() {
            return Err(SequenceError::MissingCollaborator("dialogue script"));
        }
        info!("Restarting dialogue");
        self.play_from_top();
        Ok(())
    }

    /// Routes a click / confirm press.
    pub fn on_primary_input(&mut self) -> InputOutcome {
        match self.state {
            DialogueState::ShowingLine | DialogueState::EchoingChoice => {
                if self.reveal.is_revealing() {
                    self.reveal.force_complete();
                    self.cursor.reveal_state = self.reveal.state();
                    InputOutcome::Skipped
                } else {
                    self.advance_cursor();
                    InputOutcome::Advanced
                }
            }
            _ => InputOutcome::Ignored,
        }
    }

    /// Picks option `choice` of the current choice node.
    pub fn select_choice(&mut self, choice: usize) -> Result<(), SequenceError> {
        if self.state != DialogueState::ShowingChoice {
            return Err(SequenceError::SequenceMisuse("no choice is pending"));
        }
        let options = self
            .current_node_options()
            .ok_or(SequenceError::SequenceMisuse("no choice is pending"))?;
        let picked = options.get(choice).ok_or_else(|| {
            SequenceError::InvalidArgument(format!(
                "choice {choice} out of range for {} options",
                options.len()
            ))
        })?;

        self.line = format!("{}{}", self.echo_prefix, picked);
        self.cursor.awaiting_choice = false;
        self.state = DialogueState::EchoingChoice;
        self.continue_elapsed = 0.0;
        self.reveal.start(markup::visible_len(&self.line));
        self.cursor.reveal_state = self.reveal.state();
        Ok(())
    }

    /// Advances timers by `dt` seconds. Returns `true` if anything a
    /// surface would show has changed.
    pub fn advance(&mut self, dt: f32) -> bool {
        match self.state {
            DialogueState::ShowingLine => {
                let changed = self.reveal.advance(dt);
                self.cursor.reveal_state = self.reveal.state();
                changed
            }
            DialogueState::EchoingChoice if self.reveal.is_revealing() => {
                let changed = self.reveal.advance(dt);
                self.cursor.reveal_state = self.reveal.state();
                changed
            }
            DialogueState::EchoingChoice => {
                self.continue_elapsed += dt;
                if self.continue_elapsed >= self.continue_delay {
                    self.advance_cursor();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Draws the current state onto `surface`.
    pub fn present(&self, surface: &mut impl DialogueSurface) {
        match self.state {
            DialogueState::ShowingChoice => {
                surface.show_text("", 0);
                if let Some(options) = self.current_node_options() {
                    surface.show_choices(options);
                }
            }
            _ => {
                surface.hide_choices();
                surface.show_text(&self.line, self.reveal.visible_characters());
            }
        }
    }

    fn play_from_top(&mut self) {
        self.cursor = PlaybackCursor::default();
        self.render_current();
    }

    fn advance_cursor(&mut self) {
        self.cursor.index += 1;
        self.render_current();
    }

    /// Shows the node under the cursor, cancelling anything pending for the
    /// previous one.
    fn render_current(&mut self) {
        self.reveal.cancel();
        self.continue_elapsed = 0.0;

        let Some(node) = self
            .script
            .as_ref()
            .and_then(|script| script.get(self.cursor.index))
        else {
            if self.state != DialogueState::Finished {
                info!("Dialogue complete");
            }
            self.state = DialogueState::Finished;
            self.cursor.awaiting_choice = false;
            return;
        };

        if node.is_choice() {
            self.line.clear();
            self.state = DialogueState::ShowingChoice;
            self.cursor.awaiting_choice = true;
            self.cursor.reveal_state = RevealState::Idle;
        } else {
            self.line = node.text.clone();
            self.state = DialogueState::ShowingLine;
            self.cursor.awaiting_choice = false;
            self.reveal.start(markup::visible_len(&self.line));
            self.cursor.reveal_state = self.reveal.state();
        }
    }

    fn current_node_options(&self) -> Option<&[String]> {
        self.script
            .as_ref()?
            .get(self.cursor.index)?
            .options()
    }

    /// Current playback stage.
    pub fn state(&self) -> DialogueState {
        self.state
    }

    /// Current cursor.
    pub fn cursor(&self) -> PlaybackCursor {
        self.cursor
    }

    /// `true` once [`Self::start`] has run.
    pub fn is_started(&self) -> bool {
        !matches!(
            self.state,
            DialogueState::Uninitialized | DialogueState::Idle
        )
    }

    /// `true` once every node has been played.
    pub fn is_finished(&self) -> bool {
        self.state == DialogueState::Finished
    }

    /// `true` while the current line is still appearing.
    pub fn is_revealing(&self) -> bool {
        self.reveal.is_revealing()
    }

    /// Full text of the line on screen, markup included.
    pub fn current_line(&self) -> &str {
        &self.line
    }

    /// Visible characters of the line on screen.
    pub fn visible_characters(&self) -> usize {
        self.reveal.visible_characters()
    }

    /// What the reader currently sees of the line, markup removed.
    pub fn visible_text(&self) -> String {
        markup::visible_prefix(&self.line, self.reveal.visible_characters())
    }

    /// Options of the pending choice, if one is on screen.
    pub fn pending_choices(&self) -> Option<&[String]> {
        if self.cursor.awaiting_choice {
            self.current_node_options()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::script::DialogueNode;

    const TICK: f32 = 0.04;

    fn config() -> DialogueConfig {
        DialogueConfig {
            typing_speed: TICK,
            ..Default::default()
        }
    }

    fn player(nodes: Vec<DialogueNode>) -> DialoguePlayer {
        DialoguePlayer::with_script(Arc::new(Script::new(nodes)), &config()).unwrap()
    }

    fn reveal_fully(player: &mut DialoguePlayer) -> usize {
        let mut ticks = 0;
        while player.is_revealing() {
            player.advance(TICK);
            ticks += 1;
            assert!(ticks < 10_000);
        }
        ticks
    }

    #[derive(Default)]
    struct RecordingSurface {
        text: String,
        visible: usize,
        choices: Vec<String>,
    }

    impl DialogueSurface for RecordingSurface {
        fn show_text(&mut self, text: &str, visible_characters: usize) {
            self.text = text.to_string();
            self.visible = visible_characters;
        }

        fn show_choices(&mut self, choices: &[String]) {
            self.choices = choices.to_vec();
        }

        fn hide_choices(&mut self) {
            self.choices.clear();
        }
    }

    // ── start / restart ─────────────────────────────────────────────

    #[test]
    fn input_before_start_is_ignored() {
        let mut p = player(vec![DialogueNode::line("Hi")]);
        assert_eq!(p.on_primary_input(), InputOutcome::Ignored);
        assert_eq!(p.state(), DialogueState::Idle);
    }

    #[test]
    fn start_without_script_reports_missing_script() {
        let mut p = DialoguePlayer::new(&config()).unwrap();
        assert!(matches!(
            p.start(),
            Err(SequenceError::MissingCollaborator(_))
        ));
        assert_eq!(p.state(), DialogueState::Uninitialized);
    }

    #[test]
    fn second_start_keeps_position() {
        let mut p = player(vec![DialogueNode::line("a"), DialogueNode::line("b")]);
        p.start().unwrap();
        reveal_fully(&mut p);
        p.on_primary_input();
        assert_eq!(p.cursor().index, 1);
        assert!(matches!(p.start(), Err(SequenceError::SequenceMisuse(_))));
        assert_eq!(p.cursor().index, 1);
    }

    #[test]
    fn restart_rewinds_to_first_node() {
        let mut p = player(vec![DialogueNode::line("a"), DialogueNode::line("b")]);
        p.start().unwrap();
        reveal_fully(&mut p);
        p.on_primary_input();
        p.restart().unwrap();
        assert_eq!(p.cursor().index, 0);
        assert_eq!(p.current_line(), "a");
        assert!(p.is_revealing());
    }

    #[test]
    fn load_after_start_is_rejected() {
        let mut p = player(vec![DialogueNode::line("a")]);
        p.start().unwrap();
        assert!(p.load(Arc::new(Script::default())).is_err());
    }

    #[test]
    fn empty_script_finishes_on_start() {
        let mut p = player(Vec::new());
        p.start().unwrap();
        assert!(p.is_finished());
    }

    // ── primary input ───────────────────────────────────────────────

    #[test]
    fn click_while_revealing_skips_without_advancing() {
        let mut p = player(vec![DialogueNode::line("Hello there"), DialogueNode::line("b")]);
        p.start().unwrap();
        p.advance(TICK * 3.0);
        let before = p.visible_characters();
        assert_eq!(p.on_primary_input(), InputOutcome::Skipped);
        assert!(p.visible_characters() >= before);
        assert_eq!(p.visible_characters(), 11);
        assert_eq!(p.cursor().index, 0);
        assert_eq!(p.cursor().reveal_state, RevealState::Complete);
    }

    #[test]
    fn click_after_reveal_advances_by_one() {
        let mut p = player(vec![
            DialogueNode::line("a"),
            DialogueNode::line("b"),
            DialogueNode::line("c"),
        ]);
        p.start().unwrap();
        for expected in 1..3 {
            reveal_fully(&mut p);
            assert_eq!(p.on_primary_input(), InputOutcome::Advanced);
            assert_eq!(p.cursor().index, expected);
        }
    }

    #[test]
    fn finished_is_terminal() {
        let mut p = player(vec![DialogueNode::line("only")]);
        p.start().unwrap();
        reveal_fully(&mut p);
        p.on_primary_input();
        assert!(p.is_finished());
        for _ in 0..3 {
            assert_eq!(p.on_primary_input(), InputOutcome::Ignored);
            assert!(!p.advance(1.0));
        }
        assert!(p.is_finished());
    }

    #[test]
    fn ellipsis_line_still_needs_a_click() {
        let mut p = player(vec![DialogueNode::line("..."), DialogueNode::line("next")]);
        p.start().unwrap();
        reveal_fully(&mut p);
        p.advance(10.0);
        assert_eq!(p.cursor().index, 0);
        p.on_primary_input();
        assert_eq!(p.cursor().index, 1);
    }

    #[test]
    fn empty_text_line_reveals_and_waits() {
        let mut p = player(vec![DialogueNode::line(""), DialogueNode::line("x")]);
        p.start().unwrap();
        assert_eq!(reveal_fully(&mut p), 1);
        assert_eq!(p.state(), DialogueState::ShowingLine);
    }

    #[test]
    fn markup_is_not_revealed_as_characters() {
        let mut p = player(vec![DialogueNode::line("<sketchy>Waiting.</sketchy>")]);
        p.start().unwrap();
        assert_eq!(reveal_fully(&mut p), "Waiting.".len() + 1);
        assert_eq!(p.visible_text(), "Waiting.");
    }

    // ── choices ─────────────────────────────────────────────────────

    #[test]
    fn choice_node_blocks_clicks() {
        let mut p = player(vec![DialogueNode::choice(["A", "B"]), DialogueNode::line("x")]);
        p.start().unwrap();
        assert!(p.cursor().awaiting_choice);
        assert_eq!(p.on_primary_input(), InputOutcome::Ignored);
        assert_eq!(p.pending_choices().unwrap(), ["A", "B"]);
        assert_eq!(p.cursor().index, 0);
    }

    #[test]
    fn selecting_echoes_the_picked_option() {
        for (index, label) in [(0, "A"), (1, "B")] {
            let mut p = player(vec![DialogueNode::choice(["A", "B"])]);
            p.start().unwrap();
            p.select_choice(index).unwrap();
            assert!(p.current_line().contains(label));
            assert_eq!(p.current_line(), format!("You: {label}"));
            assert!(!p.cursor().awaiting_choice);
        }
    }

    #[test]
    fn out_of_range_choice_is_invalid() {
        let mut p = player(vec![DialogueNode::choice(["A", "B"])]);
        p.start().unwrap();
        assert!(matches!(
            p.select_choice(2),
            Err(SequenceError::InvalidArgument(_))
        ));
        assert!(p.cursor().awaiting_choice);
    }

    #[test]
    fn selecting_without_pending_choice_is_misuse() {
        let mut p = player(vec![DialogueNode::line("a")]);
        p.start().unwrap();
        assert!(matches!(
            p.select_choice(0),
            Err(SequenceError::SequenceMisuse(_))
        ));
    }

    #[test]
    fn single_option_choice_is_supported() {
        let mut p = player(vec![DialogueNode::choice(["..."])]);
        p.start().unwrap();
        p.select_choice(0).unwrap();
        assert_eq!(p.current_line(), "You: ...");
    }

    #[test]
    fn echo_advances_after_delay_without_click() {
        let mut p = player(vec![DialogueNode::choice(["A", "B"]), DialogueNode::line("next")]);
        p.start().unwrap();
        p.select_choice(0).unwrap();
        reveal_fully(&mut p);
        assert_eq!(p.cursor().index, 0);
        p.advance(0.25);
        assert_eq!(p.cursor().index, 0);
        p.advance(0.25);
        assert_eq!(p.cursor().index, 1);
        assert_eq!(p.current_line(), "next");
    }

    #[test]
    fn click_during_echo_pause_advances_once() {
        let mut p = player(vec![
            DialogueNode::choice(["A", "B"]),
            DialogueNode::line("next"),
            DialogueNode::line("later"),
        ]);
        p.start().unwrap();
        p.select_choice(1).unwrap();
        reveal_fully(&mut p);
        assert_eq!(p.on_primary_input(), InputOutcome::Advanced);
        assert_eq!(p.cursor().index, 1);
        // The pending auto-advance was cancelled with the node change.
        p.advance(1.0);
        assert_eq!(p.cursor().index, 1);
    }

    #[test]
    fn click_during_echo_reveal_skips_then_auto_advances() {
        let mut p = player(vec![DialogueNode::choice(["A", "B"]), DialogueNode::line("next")]);
        p.start().unwrap();
        p.select_choice(0).unwrap();
        p.advance(TICK);
        assert!(p.is_revealing());

        assert_eq!(p.on_primary_input(), InputOutcome::Skipped);
        assert_eq!(p.state(), DialogueState::EchoingChoice);
        assert_eq!(p.visible_text(), "You: A");
        assert_eq!(p.cursor().index, 0);

        p.advance(0.25);
        assert_eq!(p.cursor().index, 0);
        p.advance(0.25);
        assert_eq!(p.cursor().index, 1);
        assert_eq!(p.current_line(), "next");
    }

    // ── presentation ────────────────────────────────────────────────

    #[test]
    fn present_shows_partial_line() {
        let mut p = player(vec![DialogueNode::line("Hello")]);
        p.start().unwrap();
        p.advance(TICK * 2.0);
        let mut surface = RecordingSurface::default();
        p.present(&mut surface);
        assert_eq!(surface.text, "Hello");
        assert_eq!(surface.visible, p.visible_characters());
        assert!(surface.choices.is_empty());
    }

    #[test]
    fn present_shows_choices_without_text() {
        let mut p = player(vec![DialogueNode::choice(["A", "B"])]);
        p.start().unwrap();
        let mut surface = RecordingSurface::default();
        p.present(&mut surface);
        assert_eq!(surface.text, "");
        assert_eq!(surface.choices, vec!["A".to_string(), "B".to_string()]);
    }

    // ── full walkthrough ────────────────────────────────────────────

    #[test]
    fn hi_choice_bye_walkthrough() {
        let mut p = player(vec![
            DialogueNode::line("Hi"),
            DialogueNode::choice(["A", "B"]),
            DialogueNode::line("Bye"),
        ]);
        p.start().unwrap();
        assert_eq!(p.current_line(), "Hi");
        assert_eq!(reveal_fully(&mut p), 3);
        assert_eq!(p.visible_text(), "Hi");

        assert_eq!(p.on_primary_input(), InputOutcome::Advanced);
        assert_eq!(p.state(), DialogueState::ShowingChoice);

        p.select_choice(0).unwrap();
        assert_eq!(p.state(), DialogueState::EchoingChoice);
        reveal_fully(&mut p);
        assert_eq!(p.visible_text(), "You: A");

        let mut waited = 0.0;
        while p.cursor().index == 1 {
            p.advance(0.1);
            waited += 0.1;
            assert!(waited < 5.0, "echo never continued");
        }
        assert_eq!(p.current_line(), "Bye");
        reveal_fully(&mut p);
        assert_eq!(p.on_primary_input(), InputOutcome::Advanced);
        assert!(p.is_finished());
    }
}
