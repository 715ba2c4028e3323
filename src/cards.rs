//! Card types and deck composition.
//!
//! ## CardKind
//!
//! The closed set of card types in a match. Cat cards carry a
//! `CatVariant`; two cat cards match iff they share a variant.
//!
//! ## Deck composition
//!
//! The base deck holds 46 cards: Cancel x5, Attack x4, Skip x4, Favor x4,
//! Shuffle x4, See-the-Future x5, and 4 of each of the 5 cat variants.
//! Defuse and Exploding Kitten cards are never part of the base deck;
//! they are minted during dealing so that exactly 6 Defuse cards and
//! `player_count - 1` kittens exist per match.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within one match.
///
/// Opaque display identity: the presentation layer keys art and
/// animations off it, the rules never compare cards by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// The five cat-card variants.
///
/// Cat cards have no effect alone; a matching pair is combined to
/// steal a random card from an opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatVariant {
    TacoCat,
    Cattermelon,
    HairyPotatoCat,
    BeardedCat,
    RainbowRalphingCat,
}

impl CatVariant {
    /// All variants, in deck-building order.
    pub const ALL: [CatVariant; 5] = [
        CatVariant::TacoCat,
        CatVariant::Cattermelon,
        CatVariant::HairyPotatoCat,
        CatVariant::BeardedCat,
        CatVariant::RainbowRalphingCat,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CatVariant::TacoCat => "Taco Cat",
            CatVariant::Cattermelon => "Cattermelon",
            CatVariant::HairyPotatoCat => "Hairy Potato Cat",
            CatVariant::BeardedCat => "Bearded Cat",
            CatVariant::RainbowRalphingCat => "Rainbow Ralphing Cat",
        }
    }
}

/// A card type.
///
/// `Cat(variant)` compares equal only for the same variant, which is
/// exactly the matching rule for combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Neutralizes a drawn Exploding Kitten.
    Defuse,
    /// Negates another player's just-played action card.
    Cancel,
    /// Ends the turn and saddles the next player with an extra turn.
    Attack,
    /// Ends the turn without drawing.
    Skip,
    /// Takes a random card from a chosen opponent.
    Favor,
    /// Reshuffles the deck.
    Shuffle,
    /// Peeks at the top three deck cards.
    SeeFuture,
    /// Cat card; pairs of the same variant steal.
    Cat(CatVariant),
    /// Eliminates the drawer unless defused.
    ExplodingKitten,
}

impl CardKind {
    /// Whether an opponent's Cancel card can negate this card when played.
    ///
    /// Everything except the kitten and the Defuse is fair game.
    #[must_use]
    pub fn is_cancelable(self) -> bool {
        !matches!(self, CardKind::ExplodingKitten | CardKind::Defuse)
    }

    /// Whether this is a cat card (any variant).
    #[must_use]
    pub fn is_cat(self) -> bool {
        matches!(self, CardKind::Cat(_))
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardKind::Defuse => "Defuse",
            CardKind::Cancel => "Cancel",
            CardKind::Attack => "Attack",
            CardKind::Skip => "Skip",
            CardKind::Favor => "Favor",
            CardKind::Shuffle => "Shuffle",
            CardKind::SeeFuture => "See the Future",
            CardKind::Cat(variant) => variant.name(),
            CardKind::ExplodingKitten => "Exploding Kitten",
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A card in play.
///
/// Immutable once minted, except for `just_drawn`: a transient flag the
/// presentation layer uses to animate a card entering a hand. The engine
/// sets it when a card joins a hand and clears it at the next entry call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    /// Opaque display identity.
    pub id: CardId,
    /// Card type.
    pub kind: CardKind,
    /// Presentation-only "entered a hand this interaction" flag.
    #[serde(default)]
    pub just_drawn: bool,
}

impl Card {
    /// Mint a card.
    #[must_use]
    pub fn new(id: CardId, kind: CardKind) -> Self {
        Self {
            id,
            kind,
            just_drawn: false,
        }
    }
}

/// Allocator for match-unique card IDs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardIds {
    next: u32,
}

impl CardIds {
    /// Create an allocator starting at ID 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a card with the next free ID.
    pub fn mint(&mut self, kind: CardKind) -> Card {
        let id = CardId(self.next);
        self.next += 1;
        Card::new(id, kind)
    }
}

/// Number of cards in the base deck (no Defuse, no kittens).
pub const BASE_DECK_SIZE: usize = 46;

/// Total Defuse cards in circulation per match, regardless of player count.
pub const TOTAL_DEFUSE: usize = 6;

/// Cards dealt to each player before the guaranteed Defuse.
pub const HAND_SIZE: usize = 7;

/// Build the 46-card base deck, unshuffled.
///
/// Counts: Cancel x5, Attack x4, Skip x4, Favor x4, Shuffle x4,
/// See-the-Future x5, each cat variant x4.
#[must_use]
pub fn build_base_deck(ids: &mut CardIds) -> Vec<Card> {
    let mut deck = Vec::with_capacity(BASE_DECK_SIZE);

    let counts = [
        (CardKind::Cancel, 5),
        (CardKind::Attack, 4),
        (CardKind::Skip, 4),
        (CardKind::Favor, 4),
        (CardKind::Shuffle, 4),
        (CardKind::SeeFuture, 5),
    ];
    for (kind, count) in counts {
        for _ in 0..count {
            deck.push(ids.mint(kind));
        }
    }
    for variant in CatVariant::ALL {
        for _ in 0..4 {
            deck.push(ids.mint(CardKind::Cat(variant)));
        }
    }

    debug_assert_eq!(deck.len(), BASE_DECK_SIZE);
    deck
}
