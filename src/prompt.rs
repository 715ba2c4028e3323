//! Suspension points.
//!
//! The engine never blocks on the presentation layer. Any effect that
//! needs an acknowledgment or a choice before the transition can finish
//! parks a [`Prompt`] on the engine and returns. The collaborator renders
//! it and resumes exactly once:
//!
//! - every variant except `TargetChoice` resumes via `Game::acknowledge`;
//! - `TargetChoice` resumes via `Game::choose_target`.
//!
//! At most one prompt is outstanding at a time, and all other entry
//! points are rejected while one is. There is no timeout and no way to
//! cancel an outstanding prompt.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardKind};
use crate::player::PlayerId;

/// Why a target is being chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StealPurpose {
    /// A Favor card was played.
    Favor,
    /// A matching cat pair was combined.
    CatCombo,
}

/// An outstanding request to the presentation layer.
///
/// Informational variants carry only the `CardKind` to display.
/// `CardDrawn` is special: it owns the in-flight card, which at that
/// moment is in neither the deck, a hand, nor the discard pile.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Prompt {
    /// A card was drawn and must be revealed to the drawer before it
    /// resolves (into the hand, or into kitten handling).
    CardDrawn {
        /// The in-flight card.
        card: Card,
    },

    /// See-the-Future: the top cards of the deck, topmost first.
    /// Peek only; the deck is untouched.
    FutureRevealed { cards: Vec<CardKind> },

    /// The actor must pick an opponent to steal from.
    TargetChoice {
        purpose: StealPurpose,
        /// Active opponents with non-empty hands. Never empty.
        candidates: Vec<PlayerId>,
    },

    /// A random card was taken from `from` and is shown to the actor.
    CardStolen { from: PlayerId, card: CardKind },

    /// An opponent's auto-cancel negated the played card.
    Canceled { by: PlayerId, card: CardKind },

    /// The chosen target had no cards to give.
    EmptyHand { target: PlayerId },

    /// No opponent was eligible to be targeted at all.
    NoEligibleTarget,

    /// The drawer spent a Defuse; the kitten went back into the deck.
    Defused { player: PlayerId },

    /// The drawer had no Defuse and is eliminated.
    Exploded { player: PlayerId },

    /// The match is over.
    GameOver { winner: PlayerId },
}

impl Prompt {
    /// Whether this prompt resumes via `choose_target` rather than
    /// `acknowledge`.
    #[must_use]
    pub fn awaits_target(&self) -> bool {
        matches!(self, Prompt::TargetChoice { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_awaits_target() {
        let choice = Prompt::TargetChoice {
            purpose: StealPurpose::Favor,
            candidates: vec![PlayerId::new(1)],
        };
        assert!(choice.awaits_target());
        assert!(!Prompt::NoEligibleTarget.awaits_target());
    }

    #[test]
    fn test_prompt_serialization() {
        let prompt = Prompt::Canceled {
            by: PlayerId::new(1),
            card: CardKind::Shuffle,
        };
        let json = serde_json::to_string(&prompt).unwrap();
        let back: Prompt = serde_json::from_str(&json).unwrap();
        match back {
            Prompt::Canceled { by, card } => {
                assert_eq!(by, PlayerId::new(1));
                assert_eq!(card, CardKind::Shuffle);
            }
            other => panic!("unexpected prompt: {other:?}"),
        }
    }
}
