//! # Confirmation modal state
//!
//! A single dialog instance is reused for every confirmation request. The
//! pending action lives here rather than on a DOM node: the confirm control
//! dispatches to whatever action is currently stored, and storing a new one
//! drops the previous one without running it.
//!
//! Every transition hands out a token. Transition-end handlers (or their
//! fallback timers) report back with that token, and a token that is no
//! longer current is ignored. This is what keeps a late exit completion from
//! hiding a dialog that was reopened in the meantime.

/// Lifecycle of the dialog element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    /// Element shown, entry transition running
    Opening,
    Open,
    /// Exit transition running, element hidden once it ends
    Closing,
}

/// Identifies one entry or exit transition
pub type TransitionToken = u64;

#[derive(Debug)]
pub struct ConfirmModal<A> {
    phase: ModalPhase,
    prompt: String,
    action: Option<A>,
    token: TransitionToken,
}

impl<A> ConfirmModal<A> {
    pub fn new() -> Self {
        Self {
            phase: ModalPhase::Closed,
            prompt: String::new(),
            action: None,
            token: 0,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn token(&self) -> TransitionToken {
        self.token
    }

    /// The dialog element is in the document flow (not `hidden`)
    pub fn is_displayed(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    /// Confirm, cancel and Escape are only honoured in these phases
    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening | ModalPhase::Open)
    }

    /// Display `prompt` and bind `action`, replacing any pending one.
    ///
    /// Returns the token of the entry transition to wait for. Reopening during
    /// `Closing` starts a new entry transition and invalidates the pending exit.
    pub fn show(&mut self, prompt: impl Into<String>, action: A) -> TransitionToken {
        self.prompt = prompt.into();
        self.action = Some(action);
        match self.phase {
            ModalPhase::Closed | ModalPhase::Closing => {
                self.phase = ModalPhase::Opening;
                self.token += 1;
            }
            ModalPhase::Opening | ModalPhase::Open => {}
        }
        self.token
    }

    /// Entry transition finished
    pub fn entry_finished(&mut self, token: TransitionToken) -> bool {
        if self.phase == ModalPhase::Opening && token == self.token {
            self.phase = ModalPhase::Open;
            true
        } else {
            false
        }
    }

    /// Start hiding the dialog. The pending action is dropped un-invoked.
    /// Returns `None` when there is nothing to close.
    pub fn close(&mut self) -> Option<TransitionToken> {
        if !self.accepts_input() {
            return None;
        }
        self.action = None;
        self.phase = ModalPhase::Closing;
        self.token += 1;
        Some(self.token)
    }

    /// Exit transition finished
    pub fn exit_finished(&mut self, token: TransitionToken) -> bool {
        if self.phase == ModalPhase::Closing && token == self.token {
            self.phase = ModalPhase::Closed;
            true
        } else {
            false
        }
    }

    /// Take the bound action and start closing.
    ///
    /// The caller runs the action after releasing any borrow of the modal,
    /// since the action may itself open another confirmation.
    pub fn confirm(&mut self) -> Option<A> {
        if !self.accepts_input() {
            return None;
        }
        let action = self.action.take();
        self.close();
        action
    }

    /// Keyboard handler. Escape closes a visible dialog and is a no-op otherwise.
    pub fn handle_key(&mut self, key: &str) -> Option<TransitionToken> {
        if key == "Escape" {
            self.close()
        } else {
            None
        }
    }
}

impl<A> Default for ConfirmModal<A> {
    fn default() -> Self {
        Self::new()
    }
}
