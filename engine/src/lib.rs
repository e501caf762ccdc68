//! 国际象棋规则引擎
//!
//! 包含:
//! - 棋子、棋盘、格子等核心数据结构
//! - 走法生成和规则验证 (含王车易位、吃过路兵、升变)
//! - 对局状态 (走子方、走子记录、悔棋、终局判定)

mod board;
mod constants;
mod error;
mod game;
mod movegen;
mod moves;
mod piece;

pub use board::Board;
pub use constants::*;
pub use error::{EngineError, Result};
pub use game::{CastleRights, GameState};
pub use movegen::MoveGenerator;
pub use moves::Move;
pub use piece::{Piece, PieceType, Side, Square};
