//! Player identity and per-player state.
//!
//! ## PlayerId
//!
//! Type-safe 0-based player index. Seat order is fixed once the match
//! starts (the setup shuffle happens before IDs are assigned).
//!
//! ## Player
//!
//! Passive data holder with invariant-preserving hand mutators:
//! every mutation keeps the `has_defuse` cache consistent with the hand,
//! and `is_active` transitions true -> false exactly once.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardKind};

/// Player identifier; 0-based seat index after the setup shuffle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw 0-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a match with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A player in the match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    name: String,
    hand: Vec<Card>,
    is_active: bool,
    has_defuse: bool,
    auto_cancel: bool,
}

impl Player {
    /// Create a player with an empty hand.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Vec::new(),
            is_active: true,
            has_defuse: false,
            auto_cancel: false,
        }
    }

    /// Player name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The hand, in insertion order. Indices into this slice are the
    /// indices the engine's play/selection calls expect.
    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Still in the match?
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Materialized "holds at least one Defuse" cache.
    #[must_use]
    pub fn has_defuse(&self) -> bool {
        self.has_defuse
    }

    /// Auto-cancel opt-in: play this player's Cancel automatically
    /// against any cancelable card an opponent plays.
    #[must_use]
    pub fn auto_cancel(&self) -> bool {
        self.auto_cancel
    }

    /// Set the auto-cancel opt-in.
    pub fn set_auto_cancel(&mut self, enabled: bool) {
        self.auto_cancel = enabled;
    }

    /// Add a card to the hand, flagging it as just drawn.
    pub fn add_card(&mut self, mut card: Card) {
        card.just_drawn = true;
        self.hand.push(card);
        self.refresh_defuse_cache();
    }

    /// Remove and return the card at `index`.
    ///
    /// Hand indices come from the gating UI; an out-of-range index is a
    /// programmer error and panics.
    pub fn remove_card(&mut self, index: usize) -> Card {
        assert!(
            index < self.hand.len(),
            "hand index {} out of range for {} (hand size {})",
            index,
            self.name,
            self.hand.len()
        );
        let card = self.hand.remove(index);
        self.refresh_defuse_cache();
        card
    }

    /// Index of the first card of `kind` in the hand.
    #[must_use]
    pub fn find_card(&self, kind: CardKind) -> Option<usize> {
        self.hand.iter().position(|c| c.kind == kind)
    }

    /// Does the hand contain a card of `kind`?
    #[must_use]
    pub fn has_card(&self, kind: CardKind) -> bool {
        self.find_card(kind).is_some()
    }

    /// Eliminate this player. One-way: there is no revival.
    pub fn eliminate(&mut self) {
        self.is_active = false;
    }

    /// Drop the transient `just_drawn` flags.
    pub fn clear_just_drawn(&mut self) {
        for card in &mut self.hand {
            card.just_drawn = false;
        }
    }

    /// Reset for a fresh round: empty hand, active, opt-ins cleared.
    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.is_active = true;
        self.has_defuse = false;
        self.auto_cancel = false;
    }

    fn refresh_defuse_cache(&mut self) {
        self.has_defuse = self.hand.iter().any(|c| c.kind == CardKind::Defuse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CatVariant};

    fn card(id: u32, kind: CardKind) -> Card {
        Card::new(CardId::new(id), kind)
    }

    #[test]
    fn test_player_id_basics() {
        let ids: Vec<_> = PlayerId::all(3).collect();
        assert_eq!(ids, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
        assert_eq!(PlayerId::new(2).index(), 2);
        assert_eq!(format!("{}", PlayerId::new(1)), "Player 1");
    }

    #[test]
    fn test_add_card_sets_just_drawn_and_defuse_cache() {
        let mut player = Player::new("Ana");
        assert!(!player.has_defuse());

        player.add_card(card(0, CardKind::Defuse));
        assert!(player.has_defuse());
        assert!(player.hand()[0].just_drawn);

        player.clear_just_drawn();
        assert!(!player.hand()[0].just_drawn);
    }

    #[test]
    fn test_defuse_cache_survives_removing_one_of_two() {
        let mut player = Player::new("Ana");
        player.add_card(card(0, CardKind::Defuse));
        player.add_card(card(1, CardKind::Defuse));

        player.remove_card(0);
        assert!(player.has_defuse());

        player.remove_card(0);
        assert!(!player.has_defuse());
    }

    #[test]
    fn test_remove_preserves_insertion_order() {
        let mut player = Player::new("Bo");
        player.add_card(card(0, CardKind::Skip));
        player.add_card(card(1, CardKind::Attack));
        player.add_card(card(2, CardKind::Favor));

        let removed = player.remove_card(1);
        assert_eq!(removed.kind, CardKind::Attack);
        assert_eq!(player.hand()[0].kind, CardKind::Skip);
        assert_eq!(player.hand()[1].kind, CardKind::Favor);
    }

    #[test]
    #[should_panic(expected = "hand index 3 out of range")]
    fn test_remove_out_of_range_panics() {
        let mut player = Player::new("Bo");
        player.add_card(card(0, CardKind::Skip));
        player.remove_card(3);
    }

    #[test]
    fn test_find_card() {
        let mut player = Player::new("Cy");
        player.add_card(card(0, CardKind::Cat(CatVariant::TacoCat)));
        player.add_card(card(1, CardKind::Cancel));

        assert_eq!(player.find_card(CardKind::Cancel), Some(1));
        assert_eq!(player.find_card(CardKind::Defuse), None);
        assert!(player.has_card(CardKind::Cat(CatVariant::TacoCat)));
        assert!(!player.has_card(CardKind::Cat(CatVariant::Cattermelon)));
    }

    #[test]
    fn test_eliminate_is_one_way() {
        let mut player = Player::new("Di");
        assert!(player.is_active());
        player.eliminate();
        assert!(!player.is_active());
    }

    #[test]
    fn test_reset_for_round() {
        let mut player = Player::new("Ed");
        player.add_card(card(0, CardKind::Defuse));
        player.set_auto_cancel(true);
        player.eliminate();

        player.reset_for_round();

        assert!(player.hand().is_empty());
        assert!(player.is_active());
        assert!(!player.has_defuse());
        assert!(!player.auto_cancel());
        assert_eq!(player.name(), "Ed");
    }
}
