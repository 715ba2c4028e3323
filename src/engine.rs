//! The game engine: deck/discard lifecycle, turn accounting, card-effect
//! resolution, cancellation, combinations, elimination and win detection.
//!
//! ## Ownership
//!
//! One [`Game`] per match, constructed and owned by the application
//! controller and handed by reference to the presentation layer. There is
//! no ambient singleton.
//!
//! ## Control flow
//!
//! The collaborator calls an entry point (`draw_card`, `play_card`, the
//! combination calls). The engine mutates state synchronously and either
//! finishes the transition or parks a [`Prompt`] and returns. While a
//! prompt is outstanding every other entry point is rejected; the
//! collaborator resumes through `acknowledge` or `choose_target`, which
//! run the deferred remainder of the transition (ending the turn,
//! releasing the action lock, resolving a kitten). After every call the
//! collaborator re-renders from [`Game::view`].
//!
//! ## Turn accounting
//!
//! `turns_remaining` counts the consecutive action-turns the current
//! player still owes (normally 1; Attack cards pile extra turns onto the
//! victim). The `action_taken` lock blocks a second turn-consuming action
//! while `turns_remaining == 1`; effects that keep the turn open (Attack,
//! Shuffle, See-the-Future, Favor, combinations) release the lock instead
//! of ending the turn.

use smallvec::SmallVec;
use tracing::debug;

use crate::cards::{self, Card, CardIds, CardKind, HAND_SIZE, TOTAL_DEFUSE};
use crate::error::Rejection;
use crate::player::{Player, PlayerId};
use crate::prompt::{Prompt, StealPurpose};
use crate::rng::GameRng;
use crate::view::{CardView, GameView, PlayerView};

/// A match in progress.
pub struct Game {
    players: Vec<Player>,
    /// Draw pile; top of the deck is the end of the vec.
    deck: Vec<Card>,
    /// Append-only discard pile; order irrelevant to the rules.
    discard: Vec<Card>,
    current: usize,
    turns_remaining: u32,
    action_taken: bool,
    combination_mode: bool,
    selected_cats: SmallVec<[usize; 2]>,
    prompt: Option<Prompt>,
    winner: Option<PlayerId>,
    rng: GameRng,
    ids: CardIds,
}

impl Game {
    /// Create an engine with no match running. Call [`Game::init`] to
    /// start one.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            players: Vec::new(),
            deck: Vec::new(),
            discard: Vec::new(),
            current: 0,
            turns_remaining: 1,
            action_taken: false,
            combination_mode: false,
            selected_cats: SmallVec::new(),
            prompt: None,
            winner: None,
            rng: GameRng::new(seed),
            ids: CardIds::new(),
        }
    }

    /// Start a match for 2-4 named players.
    ///
    /// Player order is shuffled once here and fixed for the whole match.
    /// The collaborator gates the player count; out-of-bounds counts are
    /// a programmer error.
    pub fn init(&mut self, names: &[&str]) {
        assert!(
            (2..=4).contains(&names.len()),
            "player count must be 2-4, got {}",
            names.len()
        );

        self.players = names.iter().map(|&name| Player::new(name)).collect();
        self.rng.shuffle(&mut self.players);
        self.current = 0;
        self.turns_remaining = 1;
        self.action_taken = false;
        self.combination_mode = false;
        self.selected_cats.clear();
        self.prompt = None;
        self.winner = None;
        self.setup_round();

        debug!(players = self.players.len(), "match started");
    }

    /// Build and shuffle the deck, deal hands, seed Defuse/Kitten counts.
    fn setup_round(&mut self) {
        self.deck = cards::build_base_deck(&mut self.ids);
        self.discard = Vec::new();
        self.rng.shuffle(&mut self.deck);

        for i in 0..self.players.len() {
            for _ in 0..HAND_SIZE {
                if let Some(card) = self.deck.pop() {
                    self.players[i].add_card(card);
                }
            }
            let defuse = self.ids.mint(CardKind::Defuse);
            self.players[i].add_card(defuse);
        }

        // Exactly TOTAL_DEFUSE Defuse cards and player_count - 1 kittens
        // exist per round: the game is always winnable by elimination.
        for _ in 0..(TOTAL_DEFUSE - self.players.len()) {
            let card = self.ids.mint(CardKind::Defuse);
            self.deck.push(card);
        }
        for _ in 0..(self.players.len() - 1) {
            let card = self.ids.mint(CardKind::ExplodingKitten);
            self.deck.push(card);
        }
        self.rng.shuffle(&mut self.deck);
    }

    // === Inspection ===

    /// All players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// One player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        PlayerId(self.current as u8)
    }

    /// Consecutive action-turns the current player still owes.
    #[must_use]
    pub fn turns_remaining(&self) -> u32 {
        self.turns_remaining
    }

    /// True once a turn-consuming action was taken this cycle.
    #[must_use]
    pub fn action_taken(&self) -> bool {
        self.action_taken
    }

    /// The draw pile, bottom to top.
    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// The discard pile.
    #[must_use]
    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    /// The outstanding prompt, if any.
    #[must_use]
    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Is cat-combination selection active?
    #[must_use]
    pub fn combination_mode(&self) -> bool {
        self.combination_mode
    }

    /// Hand indices selected for the combination.
    #[must_use]
    pub fn selected_cats(&self) -> &[usize] {
        &self.selected_cats
    }

    /// The winner, once the match has ended.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Has the match ended?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Pure projection of the table for rendering. Idempotent.
    #[must_use]
    pub fn view(&self) -> GameView {
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let hand = (i == self.current).then(|| {
                    p.hand()
                        .iter()
                        .enumerate()
                        .map(|(idx, c)| CardView {
                            id: c.id,
                            kind: c.kind,
                            just_drawn: c.just_drawn,
                            selected: self.combination_mode
                                && self.selected_cats.contains(&idx),
                        })
                        .collect()
                });
                PlayerView {
                    id: PlayerId(i as u8),
                    name: p.name().to_string(),
                    hand_size: p.hand().len(),
                    is_active: p.is_active(),
                    auto_cancel: p.auto_cancel(),
                    hand,
                }
            })
            .collect();

        GameView {
            players,
            current: self.current_player(),
            turns_remaining: self.turns_remaining,
            action_taken: self.action_taken,
            deck_size: self.deck.len(),
            discard_size: self.discard.len(),
            top_discard: self.discard.last().map(|c| c.kind),
            combination_mode: self.combination_mode,
            selected_cats: self.selected_cats.to_vec(),
            winner: self.winner,
        }
    }

    // === Settings ===

    /// Flip a player's auto-cancel opt-in. Allowed at any time.
    pub fn set_auto_cancel(&mut self, player: PlayerId, enabled: bool) {
        self.players[player.index()].set_auto_cancel(enabled);
    }

    // === Actions ===

    /// Draw the top card of the deck.
    ///
    /// The drawn card is revealed via [`Prompt::CardDrawn`] and resolves
    /// on acknowledgment: a kitten enters kitten handling, anything else
    /// joins the hand and ends the turn.
    pub fn draw_card(&mut self) -> Result<(), Rejection> {
        self.guard()?;
        if self.deck.is_empty() {
            return Err(Rejection::DeckEmpty);
        }
        if self.locked() {
            return Err(Rejection::ActionLocked);
        }

        self.clear_just_drawn();
        self.exit_combination();
        self.action_taken = true;
        let Some(card) = self.deck.pop() else {
            return Err(Rejection::DeckEmpty);
        };

        debug!(player = %self.current_player(), card = %card.kind, "card drawn");
        self.prompt = Some(Prompt::CardDrawn { card });
        Ok(())
    }

    /// Play the card at `index` in the current player's hand.
    ///
    /// Every card except the kitten and the Defuse is subject to the
    /// automatic-cancellation check before its effect dispatches.
    pub fn play_card(&mut self, index: usize) -> Result<(), Rejection> {
        self.guard()?;
        if self.locked() {
            return Err(Rejection::ActionLocked);
        }

        self.clear_just_drawn();
        self.exit_combination();
        let card = self.players[self.current].remove_card(index);
        let kind = card.kind;
        debug!(player = %self.current_player(), card = %kind, "card played");

        if kind.is_cancelable() {
            if let Some((who, cancel_idx)) = self.pick_canceler() {
                let cancel = self.players[who].remove_card(cancel_idx);
                self.discard.push(card);
                self.discard.push(cancel);
                debug!(by = %PlayerId(who as u8), card = %kind, "auto-canceled");
                self.prompt = Some(Prompt::Canceled {
                    by: PlayerId(who as u8),
                    card: kind,
                });
                return Ok(());
            }
        }

        self.discard.push(card);
        match kind {
            CardKind::Attack => {
                // Stacking: the victim owes the actor's remaining turns
                // plus one more. The actor's turn ends immediately.
                self.turns_remaining = if self.turns_remaining > 0 {
                    self.turns_remaining + 1
                } else {
                    2
                };
                self.current = self.next_active_index();
                self.action_taken = false;
                debug!(
                    victim = %self.current_player(),
                    turns = self.turns_remaining,
                    "attack resolved"
                );
            }
            CardKind::Skip => {
                self.action_taken = true;
                self.end_turn();
            }
            CardKind::Shuffle => {
                self.rng.shuffle(&mut self.deck);
                self.action_taken = false;
            }
            CardKind::SeeFuture => {
                self.action_taken = false;
                let cards = self.deck.iter().rev().take(3).map(|c| c.kind).collect();
                self.prompt = Some(Prompt::FutureRevealed { cards });
            }
            CardKind::Favor => {
                self.action_taken = false;
                self.request_target(StealPurpose::Favor);
            }
            // Cat alone, Defuse outside a kitten response, Cancel played
            // as an ordinary card: a plain turn-consuming action.
            _ => {
                self.action_taken = true;
                self.end_turn();
            }
        }
        Ok(())
    }

    /// Acknowledge the outstanding prompt and run the deferred remainder
    /// of the transition.
    pub fn acknowledge(&mut self) -> Result<(), Rejection> {
        let prompt = self.prompt.take().ok_or(Rejection::NoPromptPending)?;
        if prompt.awaits_target() {
            self.prompt = Some(prompt);
            return Err(Rejection::TargetChoicePending);
        }
        self.clear_just_drawn();

        match prompt {
            Prompt::CardDrawn { card } => {
                if card.kind == CardKind::ExplodingKitten {
                    self.resolve_kitten(card);
                } else {
                    self.players[self.current].add_card(card);
                    self.end_turn();
                }
            }
            Prompt::FutureRevealed { .. }
            | Prompt::CardStolen { .. }
            | Prompt::EmptyHand { .. }
            | Prompt::NoEligibleTarget => {
                self.action_taken = false;
            }
            Prompt::Canceled { .. } => {
                self.action_taken = true;
                self.end_turn();
            }
            Prompt::Defused { .. } => {
                self.end_turn();
            }
            Prompt::Exploded { .. } => {
                if let Some(survivor) = self.sole_survivor() {
                    self.winner = Some(survivor);
                    debug!(winner = %survivor, "match over");
                    self.prompt = Some(Prompt::GameOver { winner: survivor });
                } else {
                    self.end_turn();
                }
            }
            Prompt::GameOver { .. } => {}
            Prompt::TargetChoice { .. } => unreachable!("handled above"),
        }
        Ok(())
    }

    /// Resolve a pending target choice by stealing one uniformly-random
    /// card from `target`'s hand.
    pub fn choose_target(&mut self, target: PlayerId) -> Result<(), Rejection> {
        let eligible = match &self.prompt {
            Some(Prompt::TargetChoice { candidates, .. }) => candidates.contains(&target),
            _ => return Err(Rejection::NotAwaitingTarget),
        };
        if !eligible {
            return Err(Rejection::IneligibleTarget(target));
        }
        self.prompt = None;
        self.clear_just_drawn();

        let t = target.index();
        if self.players[t].hand().is_empty() {
            // Candidates are filtered for non-empty hands, but the
            // transfer still guards against giving from nothing.
            self.prompt = Some(Prompt::EmptyHand { target });
            return Ok(());
        }

        let pick = self.rng.gen_range_usize(0..self.players[t].hand().len());
        let stolen = self.players[t].remove_card(pick);
        let kind = stolen.kind;
        self.players[self.current].add_card(stolen);
        debug!(from = %target, card = %kind, "card stolen");
        self.prompt = Some(Prompt::CardStolen { from: target, card: kind });
        Ok(())
    }

    // === Cat combinations ===

    /// Enter or leave combination-selection mode. Never consumes a turn;
    /// either direction clears the selection and releases the lock.
    pub fn toggle_combination_mode(&mut self) -> Result<(), Rejection> {
        self.guard()?;
        self.clear_just_drawn();
        self.combination_mode = !self.combination_mode;
        self.selected_cats.clear();
        self.action_taken = false;
        Ok(())
    }

    /// Toggle a cat card in or out of the combination selection.
    ///
    /// At most two cards can be selected; a third toggle-on is ignored.
    pub fn toggle_cat_selection(&mut self, index: usize) -> Result<(), Rejection> {
        self.guard()?;
        if !self.combination_mode {
            return Err(Rejection::NotInCombinationMode);
        }
        let hand = self.players[self.current].hand();
        assert!(
            index < hand.len(),
            "hand index {} out of range (hand size {})",
            index,
            hand.len()
        );
        if !hand[index].kind.is_cat() {
            return Err(Rejection::NotACatCard(index));
        }

        self.clear_just_drawn();
        if let Some(pos) = self.selected_cats.iter().position(|&i| i == index) {
            self.selected_cats.remove(pos);
        } else if self.selected_cats.len() < 2 {
            self.selected_cats.push(index);
        }
        Ok(())
    }

    /// Discard the selected matching pair and request a steal target.
    pub fn confirm_combination(&mut self) -> Result<(), Rejection> {
        self.guard()?;
        if !self.combination_mode {
            return Err(Rejection::NotInCombinationMode);
        }
        if self.selected_cats.len() != 2 {
            return Err(Rejection::SelectionSize(self.selected_cats.len()));
        }
        let (a, b) = (self.selected_cats[0], self.selected_cats[1]);
        let hand = self.players[self.current].hand();
        if hand[a].kind != hand[b].kind {
            return Err(Rejection::VariantMismatch);
        }

        self.clear_just_drawn();
        // Remove the higher index first so the lower one stays valid.
        let (hi, lo) = if a > b { (a, b) } else { (b, a) };
        let first = self.players[self.current].remove_card(hi);
        let second = self.players[self.current].remove_card(lo);
        debug!(player = %self.current_player(), card = %first.kind, "cat pair combined");
        self.discard.push(first);
        self.discard.push(second);

        self.combination_mode = false;
        self.selected_cats.clear();
        self.action_taken = false;
        self.request_target(StealPurpose::CatCombo);
        Ok(())
    }

    /// Leave combination mode without playing anything.
    pub fn cancel_combination(&mut self) -> Result<(), Rejection> {
        self.guard()?;
        self.clear_just_drawn();
        self.exit_combination();
        self.action_taken = false;
        Ok(())
    }

    // === Match lifecycle ===

    /// Tear the match down to the uninitialized state.
    pub fn reset(&mut self) {
        self.players.clear();
        self.deck.clear();
        self.discard.clear();
        self.current = 0;
        self.turns_remaining = 1;
        self.action_taken = false;
        self.combination_mode = false;
        self.selected_cats.clear();
        self.prompt = None;
        self.winner = None;
    }

    /// Start a fresh round with the same players in the same seats:
    /// hands and opt-ins reset, everyone active, new deck, new deal.
    pub fn next_round(&mut self) -> Result<(), Rejection> {
        if self.players.is_empty() {
            return Err(Rejection::NotStarted);
        }

        for player in &mut self.players {
            player.reset_for_round();
        }
        self.current = 0;
        self.turns_remaining = 1;
        self.action_taken = false;
        self.combination_mode = false;
        self.selected_cats.clear();
        self.prompt = None;
        self.winner = None;
        self.setup_round();

        debug!("next round dealt");
        Ok(())
    }

    // === Internals ===

    /// Common entry-point gate: a match must be running, not won, and
    /// not suspended on a prompt.
    fn guard(&self) -> Result<(), Rejection> {
        if self.players.is_empty() {
            return Err(Rejection::NotStarted);
        }
        if self.winner.is_some() {
            return Err(Rejection::MatchOver);
        }
        if self.prompt.is_some() {
            return Err(Rejection::PromptPending);
        }
        Ok(())
    }

    /// The turn lock: one turn-consuming action per owed turn.
    fn locked(&self) -> bool {
        self.action_taken && self.turns_remaining == 1
    }

    fn exit_combination(&mut self) {
        self.combination_mode = false;
        self.selected_cats.clear();
    }

    fn clear_just_drawn(&mut self) {
        for player in &mut self.players {
            player.clear_just_drawn();
        }
    }

    /// Pick a canceling opponent uniformly at random: active, not the
    /// actor, opted into auto-cancel, holding a Cancel card. Returns the
    /// player index and the index of their Cancel card.
    fn pick_canceler(&mut self) -> Option<(usize, usize)> {
        let cancelers: Vec<(usize, usize)> = self
            .players
            .iter()
            .enumerate()
            .filter(|(i, p)| *i != self.current && p.is_active() && p.auto_cancel())
            .filter_map(|(i, p)| p.find_card(CardKind::Cancel).map(|ci| (i, ci)))
            .collect();
        if cancelers.is_empty() {
            return None;
        }
        let pick = self.rng.gen_range_usize(0..cancelers.len());
        Some(cancelers[pick])
    }

    /// Eligible steal targets: active opponents with cards to give.
    fn request_target(&mut self, purpose: StealPurpose) {
        let candidates: Vec<PlayerId> = self
            .players
            .iter()
            .enumerate()
            .filter(|(i, p)| *i != self.current && p.is_active() && !p.hand().is_empty())
            .map(|(i, _)| PlayerId(i as u8))
            .collect();

        self.prompt = if candidates.is_empty() {
            Some(Prompt::NoEligibleTarget)
        } else {
            Some(Prompt::TargetChoice { purpose, candidates })
        };
    }

    /// Resolve a drawn kitten: spend a Defuse and slip the kitten back
    /// into the deck at a random position, or eliminate the drawer.
    fn resolve_kitten(&mut self, kitten: Card) {
        let player = self.current_player();
        if self.players[self.current].has_defuse() {
            if let Some(idx) = self.players[self.current].find_card(CardKind::Defuse) {
                let defuse = self.players[self.current].remove_card(idx);
                self.discard.push(defuse);
                let at = self.rng.gen_range_inclusive(0..=self.deck.len());
                self.deck.insert(at, kitten);
                debug!(%player, position = at, "kitten defused");
                self.prompt = Some(Prompt::Defused { player });
                return;
            }
        }

        self.players[self.current].eliminate();
        self.discard.push(kitten);
        debug!(%player, "player exploded");
        self.prompt = Some(Prompt::Exploded { player });
    }

    /// The winner iff exactly one player is still active.
    fn sole_survivor(&self) -> Option<PlayerId> {
        let mut active = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active());
        match (active.next(), active.next()) {
            (Some((i, _)), None) => Some(PlayerId(i as u8)),
            _ => None,
        }
    }

    /// Decrement the owed-turn counter; hand the seat to the next active
    /// player once it reaches zero. The lock is released either way.
    fn end_turn(&mut self) {
        self.turns_remaining -= 1;
        if self.turns_remaining == 0 {
            self.turns_remaining = 1;
            self.current = self.next_active_index();
            debug!(next = %self.current_player(), "turn passed");
        }
        self.action_taken = false;
    }

    /// Next seat in order that is still active, wrapping around.
    fn next_active_index(&self) -> usize {
        let mut i = (self.current + 1) % self.players.len();
        while !self.players[i].is_active() {
            i = (i + 1) % self.players.len();
        }
        i
    }
}
