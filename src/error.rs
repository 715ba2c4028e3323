//! Error taxonomy.
//!
//! Two levels:
//!
//! - [`Rejection`]: a user action the rules refuse. Reported to the
//!   collaborator for display, never mutates state, always recoverable.
//! - Invariant violations (out-of-range hand index, bad player count):
//!   programmer errors a correctly gated UI never produces. These panic
//!   via assertions instead of being silently swallowed.
//!
//! Every engine operation is all-or-nothing within its synchronous
//! extent; operations needing external acknowledgment pause on a prompt
//! rather than fail.

use thiserror::Error;

use crate::player::PlayerId;

/// A rejected user action. No state was changed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The match has not been initialized with players yet.
    #[error("the match has not been started")]
    NotStarted,

    /// The match already has a winner.
    #[error("the match is over")]
    MatchOver,

    /// Drawing from an empty deck.
    #[error("the deck is empty")]
    DeckEmpty,

    /// A turn-consuming action was already taken this cycle.
    #[error("an action was already taken this turn")]
    ActionLocked,

    /// A prompt is outstanding; resume it before acting.
    #[error("a prompt is awaiting acknowledgment")]
    PromptPending,

    /// `acknowledge` was called with nothing to acknowledge.
    #[error("no prompt is awaiting acknowledgment")]
    NoPromptPending,

    /// `acknowledge` was called while a target choice is pending.
    #[error("a target choice is pending; choose a target instead")]
    TargetChoicePending,

    /// `choose_target` was called with no target choice pending.
    #[error("no target choice is pending")]
    NotAwaitingTarget,

    /// The chosen target was not among the offered candidates.
    #[error("{0} is not an eligible target")]
    IneligibleTarget(PlayerId),

    /// A combination call outside combination mode.
    #[error("combination mode is not active")]
    NotInCombinationMode,

    /// Selecting a non-cat card for a combination.
    #[error("card at index {0} is not a cat card")]
    NotACatCard(usize),

    /// Confirming a combination without exactly two cards selected.
    #[error("exactly two cat cards must be selected ({0} selected)")]
    SelectionSize(usize),

    /// Confirming a combination of cats with different variants.
    #[error("selected cat cards must share a variant")]
    VariantMismatch,
}
