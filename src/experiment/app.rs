//! Top-level application state machine.
//!
//! Pure interaction flow: no rendering, no terminal handles. The frame loop
//! translates device events into [`InputEvent`]s and calls
//! [`App::handle_event`]; time-driven presentation advances through
//! [`App::tick`]. Rendering reads the public state and draws it.

use crate::experiment::config::ExperimentConfig;
use crate::experiment::error::ExperimentError;
use crate::experiment::participant::{AttemptOutcome, Participant};
use crate::experiment::sequence::{ClickOutcome, PresentationStep, Sequence};
use std::time::Instant;

/// Current screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Waiting for a valid participant identifier.
    Identification,
    /// Instructions shown, waiting for proceed.
    Instructions,
    /// Highlight animation running.
    ShowingSequence,
    /// Waiting for the participant to tap the sequence back.
    AwaitingInput,
    /// Attempt scored, feedback shown, waiting for proceed.
    Feedback,
    /// Session over; only quit is accepted.
    Done,
}

/// Device-independent input event, produced by the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Escape key or window close. Honored from every screen.
    Quit,
    /// Return key: submit the identifier field.
    Confirm,
    /// Space bar: leave instructions or feedback.
    Proceed,
    /// Text entry for the identifier field.
    Char(char),
    Backspace,
    /// Pointer release at logical canvas coordinates.
    Click { x: i32, y: i32 },
}

/// What the frame loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    /// Persist the participant's record (if any) and end the process.
    Exit,
}

/// Feedback lines composed when an attempt is scored.
#[derive(Debug, Clone, Default)]
pub struct Feedback {
    pub headline: String,
    pub detail: Option<String>,
    pub prompt: String,
}

/// The application: owns the one active participant, sequence, and screen.
#[derive(Debug)]
pub struct App {
    pub cfg: ExperimentConfig,
    pub screen: Screen,
    pub participant: Option<Participant>,
    pub sequence: Option<Sequence>,
    /// Identifier field contents.
    pub id_input: String,
    /// Validation message shown under the identifier field.
    pub id_error: Option<String>,
    pub feedback: Feedback,
    pub trial_over: bool,
    /// Set when the instructions are left; gates the first highlight.
    pub trial_start: Option<Instant>,
}

impl App {
    #[must_use]
    pub fn new(cfg: ExperimentConfig) -> Self {
        Self {
            cfg,
            screen: Screen::Identification,
            participant: None,
            sequence: None,
            id_input: String::new(),
            id_error: None,
            feedback: Feedback::default(),
            trial_over: false,
            trial_start: None,
        }
    }

    /// Routes one input event into the current screen.
    ///
    /// Identifier validation failures are recovered locally (message shown,
    /// screen unchanged); only layout infeasibility propagates as an error.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        now: Instant,
    ) -> Result<Signal, ExperimentError> {
        if event == InputEvent::Quit {
            return Ok(Signal::Exit);
        }

        match self.screen {
            Screen::Identification => self.handle_id_input(event),
            Screen::Instructions => {
                if event == InputEvent::Proceed {
                    self.trial_start = Some(now);
                    self.start_sequence()?;
                }
            }
            // Clicks during presentation are not scored.
            Screen::ShowingSequence => {}
            Screen::AwaitingInput => {
                if let InputEvent::Click { x, y } = event {
                    self.handle_click(x, y);
                }
            }
            Screen::Feedback => {
                if event == InputEvent::Proceed {
                    self.leave_feedback()?;
                }
            }
            Screen::Done => {}
        }

        Ok(Signal::Continue)
    }

    /// Advances the presentation animation by one tick.
    pub fn tick(&mut self, now: Instant) {
        if self.screen != Screen::ShowingSequence {
            return;
        }
        let (Some(sequence), Some(trial_start)) = (self.sequence.as_mut(), self.trial_start)
        else {
            return;
        };
        if sequence.advance_presentation(now, trial_start, &self.cfg) == PresentationStep::Done {
            if let Some(participant) = self.participant.as_mut() {
                participant.clicks = 0;
            }
            self.screen = Screen::AwaitingInput;
        }
    }

    fn handle_id_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Char(c) => self.id_input.push(c),
            InputEvent::Backspace => {
                self.id_input.pop();
            }
            InputEvent::Confirm => {
                let parsed = self.id_input.trim().parse::<u32>().ok();
                let accepted = parsed
                    .and_then(|id| Participant::new(id, self.cfg.max_participants).ok());
                match accepted {
                    Some(participant) => {
                        self.participant = Some(participant);
                        self.id_error = None;
                        self.screen = Screen::Instructions;
                    }
                    None => {
                        self.id_error = Some(format!(
                            "Incorrect participant ID. Please type a number between 1 and {}!",
                            self.cfg.max_participants
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, x: i32, y: i32) {
        let Some(sequence) = self.sequence.as_mut() else {
            return;
        };
        let Some(participant) = self.participant.as_mut() else {
            return;
        };

        match sequence.register_click((x, y), participant.clicks) {
            ClickOutcome::Miss => {}
            ClickOutcome::Continue => participant.clicks += 1,
            ClickOutcome::Complete { correct } => {
                let outcome =
                    participant.record_attempt(correct, sequence.length, self.cfg.n_boxes);
                self.trial_over = outcome.ends_trial();
                if self.trial_over {
                    participant.finalize_trial();
                }
                self.feedback =
                    compose_feedback(outcome, participant, self.cfg.max_trials);
                self.screen = Screen::Feedback;
            }
        }
    }

    fn leave_feedback(&mut self) -> Result<(), ExperimentError> {
        if self.trial_over {
            let at_last_trial = self
                .participant
                .as_ref()
                .is_some_and(|p| p.current_trial >= self.cfg.max_trials);
            if at_last_trial {
                self.screen = Screen::Done;
                return Ok(());
            }
            if let Some(participant) = self.participant.as_mut() {
                participant.advance_trial(self.cfg.max_trials)?;
            }
            self.trial_over = false;
        }
        self.start_sequence()
    }

    /// Generates the next sequence at the span under test and starts its
    /// presentation.
    fn start_sequence(&mut self) -> Result<(), ExperimentError> {
        let Some(participant) = self.participant.as_mut() else {
            return Ok(());
        };
        let length = participant.next_span_length();
        self.sequence = Some(Sequence::generate(&self.cfg, length)?);
        participant.clicks = 0;
        self.screen = Screen::ShowingSequence;
        Ok(())
    }
}

fn compose_feedback(
    outcome: AttemptOutcome,
    participant: &Participant,
    max_trials: u32,
) -> Feedback {
    let headline = match outcome {
        AttemptOutcome::Won => "Congratulations! You won!",
        AttemptOutcome::Advance => "Great job!",
        AttemptOutcome::Retry => "One more try!",
        AttemptOutcome::SpanExhausted => "Trial finished!",
    }
    .to_string();

    if outcome.ends_trial() {
        if participant.current_trial < max_trials {
            Feedback {
                headline,
                detail: Some(format!(
                    "Your corsi span in trial {}/{} was {}",
                    participant.current_trial, max_trials, participant.span
                )),
                prompt: "Press space bar for next trial!".to_string(),
            }
        } else {
            Feedback {
                headline,
                detail: Some(format!(
                    "Your final corsi span after {} trials is {} +- {}",
                    max_trials, participant.mean_span, participant.std_span
                )),
                prompt: "Press ESC to close application!".to_string(),
            }
        }
    } else {
        Feedback {
            headline,
            detail: None,
            prompt: "Press space bar to continue".to_string(),
        }
    }
}
