//! Run-session state and the terminal presentation loop that drives a
//! sequencer through it.

pub mod terminal;

pub use terminal::TerminalSession;

/// The phases a session moves through, in order. State is carried
/// explicitly between the presentation loop and the sequencer rather
/// than stashed in a shared untyped slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    AwaitingPainLevel,
    Ready,
    Running,
    Done,
}

impl Default for RunPhase {
    fn default() -> Self {
        RunPhase::Idle
    }
}

impl RunPhase {
    /// The next phase; `Done` is terminal.
    pub fn advance(self) -> RunPhase {
        match self {
            RunPhase::Idle => RunPhase::AwaitingPainLevel,
            RunPhase::AwaitingPainLevel => RunPhase::Ready,
            RunPhase::Ready => RunPhase::Running,
            RunPhase::Running => RunPhase::Done,
            RunPhase::Done => RunPhase::Done,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == RunPhase::Done
    }
}
