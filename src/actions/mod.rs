//! Player instructions and their dispatch.
//!
//! Each game declares its operations as an `InstructionKind` enum and
//! registers one handler per variant in a `HandlerTable`. Players decide
//! through the `PlayerBehavior` capability; the dealer applies what they
//! decide through `Dealer::handle_player_actions`.
//!
//! ## Key Types
//!
//! - `InstructionKind`: Closed set of operations for one game
//! - `Instruction`: One requested operation with its cards and target
//! - `HandlerTable`: Completeness-checked kind-to-handler mapping
//! - `ActionContext`: What a handler may touch
//! - `Player` / `PlayerBehavior`: Seat and decision capability

pub mod handlers;
pub mod instruction;
pub mod player;

pub use handlers::{ActionContext, Handler, HandlerTable, HandlerTableBuilder};
pub use instruction::{Instruction, InstructionKind};
pub use player::{FnBehavior, PassiveBehavior, Player, PlayerBehavior, PlayerView, ScriptedBehavior};
