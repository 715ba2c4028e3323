//! # kitten-engine
//!
//! Rules engine for a turn-based, exploding-kitten style elimination
//! card game: 2-4 players draw from a shared deck, play action cards,
//! and drop out when they draw a kitten they cannot defuse. Last player
//! standing wins.
//!
//! ## Design Principles
//!
//! 1. **Engine owns the rules, nothing else**: rendering, input widgets,
//!    and message boxes live in a collaborator. The engine exposes entry
//!    points and a pure [`view`](engine::Game::view) projection.
//!
//! 2. **Suspension as data**: effects that need an acknowledgment or a
//!    target choice park a [`Prompt`] instead of blocking. The
//!    collaborator resumes via `acknowledge`/`choose_target`, and every
//!    other call is rejected until it does.
//!
//! 3. **Deterministic**: all randomness flows through a seeded
//!    [`GameRng`]; the same seed replays the same match.
//!
//! ## Modules
//!
//! - `cards`: card kinds, cat variants, deck composition
//! - `player`: player identity and hand mutators
//! - `rng`: deterministic match RNG
//! - `error`: the rejection taxonomy
//! - `prompt`: suspension points and the resume protocol
//! - `view`: read-only projection for rendering
//! - `engine`: the game state machine

pub mod cards;
pub mod engine;
pub mod error;
pub mod player;
pub mod prompt;
pub mod rng;
pub mod view;

// Re-export commonly used types
pub use crate::cards::{Card, CardId, CardKind, CatVariant};
pub use crate::engine::Game;
pub use crate::error::Rejection;
pub use crate::player::{Player, PlayerId};
pub use crate::prompt::{Prompt, StealPurpose};
pub use crate::rng::GameRng;
pub use crate::view::{CardView, GameView, PlayerView};
