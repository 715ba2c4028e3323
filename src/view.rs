//! Read-only state projection for rendering.
//!
//! `Game::view` produces a [`GameView`]: a pure snapshot of everything
//! the table UI shows. Building a view never mutates the engine, so the
//! collaborator can re-render after every call, idempotently.
//!
//! Hidden information stays hidden: only the current player's hand is
//! included card-by-card; opponents appear as hand sizes.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardKind};
use crate::player::PlayerId;

/// One card as the UI sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub kind: CardKind,
    /// Entered the hand during the last interaction (animation hint).
    pub just_drawn: bool,
    /// Selected in the current cat combination.
    pub selected: bool,
}

/// One seat as the UI sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub hand_size: usize,
    pub is_active: bool,
    pub auto_cancel: bool,
    /// Full hand, only for the current player. `None` for everyone else.
    pub hand: Option<Vec<CardView>>,
}

/// Snapshot of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub players: Vec<PlayerView>,
    pub current: PlayerId,
    pub turns_remaining: u32,
    /// True once a turn-consuming action was taken this cycle.
    pub action_taken: bool,
    pub deck_size: usize,
    pub discard_size: usize,
    /// Top of the discard pile, for display.
    pub top_discard: Option<CardKind>,
    pub combination_mode: bool,
    /// Hand indices currently selected for a combination.
    pub selected_cats: Vec<usize>,
    pub winner: Option<PlayerId>,
}
