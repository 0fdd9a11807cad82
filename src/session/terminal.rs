//! Keyboard-driven presentation loop over crossterm.
//!
//! The terminal cannot render the images themselves; each trial shows
//! the asset path and progress, and the program relies on an external
//! viewer or printed cards in clinical use. Input handling is raw-mode
//! with a short poll so Ctrl+C and Esc stay responsive.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use log::debug;
use rand::Rng;
use std::io::{self, Write};
use std::time::Duration;

use super::RunPhase;
use crate::models::Side;
use crate::sequencer::TrialSequencer;

/// Restores cooked mode on every exit path, including panics.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw terminal mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// What the user did with a prompt.
enum Answer {
    Guess(Side),
    Start,
    Quit,
}

/// Drives one run through its phases at a terminal.
pub struct TerminalSession {
    phase: RunPhase,
    poll_timeout: Duration,
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSession {
    pub fn new() -> Self {
        Self {
            phase: RunPhase::Idle,
            poll_timeout: Duration::from_millis(50),
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Ask for the pain level (digits, Enter to submit). Returns `None`
    /// if the user quit instead of answering; re-prompts on values
    /// outside 0..=10.
    pub fn prompt_pain_level(&mut self) -> Result<Option<u8>> {
        self.phase = RunPhase::AwaitingPainLevel;
        let _guard = RawModeGuard::enable()?;
        let mut stdout = io::stdout();

        loop {
            write!(
                stdout,
                "What is your current pain level (0-10)? Press Enter when done: "
            )?;
            stdout.flush()?;

            let Some(text) = self.read_line(&mut stdout)? else {
                return Ok(None);
            };
            match text.trim().parse::<u8>() {
                Ok(level) if level <= 10 => {
                    self.phase = RunPhase::Ready;
                    return Ok(Some(level));
                }
                _ => {
                    write!(
                        stdout,
                        "Please enter a number between 0 and 10 and press Enter\r\n"
                    )?;
                }
            }
        }
    }

    /// Present every remaining trial and record the guesses. Returns
    /// `true` when the run finished, `false` on early termination; in
    /// both cases the sequencer holds a persistable result.
    pub fn run_trials<R: Rng>(&mut self, seq: &mut TrialSequencer<R>) -> Result<bool> {
        let _guard = RawModeGuard::enable()?;
        let mut stdout = io::stdout();

        write!(
            stdout,
            "If the image is of a left hand or foot, press A or Left.\r\n\
             If the image is of a right hand or foot, press D or Right.\r\n\
             Press Space to start, Esc to stop early.\r\n"
        )?;
        stdout.flush()?;
        loop {
            match self.wait_for_answer()? {
                Answer::Start => break,
                Answer::Quit => return Ok(false),
                Answer::Guess(_) => {}
            }
        }

        self.phase = RunPhase::Running;
        seq.next();
        while let Some(asset) = seq.current() {
            write!(
                stdout,
                "Image {} of {}: {}\r\n",
                seq.trial_index(),
                seq.trial_count(),
                asset.path.display()
            )?;
            stdout.flush()?;

            let side = loop {
                match self.wait_for_answer()? {
                    Answer::Guess(side) => break side,
                    Answer::Quit => {
                        self.phase = RunPhase::Done;
                        return Ok(false);
                    }
                    Answer::Start => {}
                }
            };
            let correct = seq.record_guess(side)?;
            debug!("guessed {side}, {}", if correct { "correct" } else { "incorrect" });
        }

        self.phase = RunPhase::Done;
        Ok(true)
    }

    /// Block until a key resolves to an answer, a start, or a quit.
    fn wait_for_answer(&self) -> Result<Answer> {
        loop {
            let Some(key) = self.next_key()? else { continue };
            if is_quit(&key) {
                return Ok(Answer::Quit);
            }
            match key.code {
                KeyCode::Left | KeyCode::Char('a') => return Ok(Answer::Guess(Side::Left)),
                KeyCode::Right | KeyCode::Char('d') => return Ok(Answer::Guess(Side::Right)),
                KeyCode::Char(' ') => return Ok(Answer::Start),
                _ => {}
            }
        }
    }

    /// Accumulate a line of characters, echoing as we go. `None` means
    /// the user quit.
    fn read_line(&self, stdout: &mut impl Write) -> Result<Option<String>> {
        let mut text = String::new();
        loop {
            let Some(key) = self.next_key()? else { continue };
            if is_quit(&key) {
                write!(stdout, "\r\n")?;
                return Ok(None);
            }
            match key.code {
                KeyCode::Enter => {
                    write!(stdout, "\r\n")?;
                    return Ok(Some(text));
                }
                KeyCode::Backspace => {
                    if text.pop().is_some() {
                        write!(stdout, "\u{8} \u{8}")?;
                        stdout.flush()?;
                    }
                }
                KeyCode::Char(c) => {
                    text.push(c);
                    write!(stdout, "{c}")?;
                    stdout.flush()?;
                }
                _ => {}
            }
        }
    }

    /// One keypress, or `None` if the poll timed out.
    fn next_key(&self) -> Result<Option<KeyEvent>> {
        if event::poll(self.poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
        _ => false,
    }
}
