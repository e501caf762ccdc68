//! 对局状态
//!
//! 持有棋盘、走子方、走子记录，并负责执行与撤销走法。
//! 易位权和过路兵目标都带历史日志，保证悔棋能精确还原。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::movegen::MoveGenerator;
use crate::moves::Move;
use crate::piece::{PieceType, Side, Square};

/// 易位权
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastleRights {
    /// 白方短易位
    pub wks: bool,
    /// 白方长易位
    pub wqs: bool,
    /// 黑方短易位
    pub bks: bool,
    /// 黑方长易位
    pub bqs: bool,
}

impl CastleRights {
    /// 初始局面：四个方向都允许
    pub fn initial() -> Self {
        Self {
            wks: true,
            wqs: true,
            bks: true,
            bqs: true,
        }
    }

    /// 获取指定阵营的 (短易位, 长易位) 权利
    pub fn for_side(&self, side: Side) -> (bool, bool) {
        match side {
            Side::White => (self.wks, self.wqs),
            Side::Black => (self.bks, self.bqs),
        }
    }

    /// 根据走法更新易位权：王或车移动、车被吃都会丧失对应权利
    fn update(&mut self, mv: &Move) {
        match (mv.piece_moved.piece_type, mv.piece_moved.side) {
            (PieceType::King, Side::White) => {
                self.wks = false;
                self.wqs = false;
            }
            (PieceType::King, Side::Black) => {
                self.bks = false;
                self.bqs = false;
            }
            (PieceType::Rook, _) => self.clear_corner(mv.from),
            _ => {}
        }

        if let Some(captured) = mv.captured {
            if captured.piece_type == PieceType::Rook {
                self.clear_corner(mv.capture_square());
            }
        }
    }

    /// 角格上的车失效时清除对应权利
    fn clear_corner(&mut self, square: Square) {
        match (square.row, square.col) {
            (7, 0) => self.wqs = false,
            (7, 7) => self.wks = false,
            (0, 0) => self.bqs = false,
            (0, 7) => self.bks = false,
            _ => {}
        }
    }
}

/// 对局状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub side_to_move: Side,
    /// 已执行走法记录（仅追加，悔棋时弹出）
    pub move_log: Vec<Move>,
    /// 是否将死
    pub checkmate: bool,
    /// 是否逼和
    pub stalemate: bool,
    /// 吃过路兵目标格（上一步兵走两格跳过的格子）
    pub en_passant_target: Option<Square>,
    /// 易位权
    pub castle_rights: CastleRights,
    /// 过路兵目标历史（用于悔棋还原）
    en_passant_log: Vec<Option<Square>>,
    /// 易位权历史（用于悔棋还原）
    castle_rights_log: Vec<CastleRights>,
}

impl GameState {
    /// 创建初始对局
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Side::White)
    }

    /// 从指定棋盘创建对局（用于构造局面）
    pub fn from_board(board: Board, side_to_move: Side) -> Self {
        Self {
            board,
            side_to_move,
            move_log: Vec::new(),
            checkmate: false,
            stalemate: false,
            en_passant_target: None,
            castle_rights: CastleRights::initial(),
            en_passant_log: vec![None],
            castle_rights_log: vec![CastleRights::initial()],
        }
    }

    /// 重新计算当前走子方的完整合法走法集
    ///
    /// 全量重算开销较大，调用方必须缓存结果，只在执行走法、
    /// 悔棋或重开后刷新。无合法走法时设置终局标志。
    pub fn valid_moves(&mut self) -> Vec<Move> {
        let moves = MoveGenerator::generate_legal(self);
        if moves.is_empty() {
            if self.in_check() {
                self.checkmate = true;
            } else {
                self.stalemate = true;
            }
        } else {
            self.checkmate = false;
            self.stalemate = false;
        }
        moves
    }

    /// 执行一步已验证合法的走法
    pub fn make_move(&mut self, mv: Move) {
        debug!(capture = mv.is_capture(), "执行走法 {}", mv.notation());
        self.board.apply(&mv);

        // 兵走两格后，下一步对方可吃过路兵
        self.en_passant_target = if mv.piece_moved.piece_type == PieceType::Pawn
            && mv.from.row.abs_diff(mv.to.row) == 2
        {
            Some(Square::new_unchecked((mv.from.row + mv.to.row) / 2, mv.from.col))
        } else {
            None
        };
        self.en_passant_log.push(self.en_passant_target);

        self.castle_rights.update(&mv);
        self.castle_rights_log.push(self.castle_rights);

        self.move_log.push(mv);
        self.side_to_move = self.side_to_move.opponent();
    }

    /// 撤销最近一步走法，记录为空时返回 `None`
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.move_log.pop()?;
        debug!("撤销走法 {}", mv.notation());
        self.board.revert(&mv);

        self.en_passant_log.pop();
        self.en_passant_target = *self.en_passant_log.last().unwrap_or(&None);

        self.castle_rights_log.pop();
        self.castle_rights = *self
            .castle_rights_log
            .last()
            .unwrap_or(&CastleRights::initial());

        self.side_to_move = self.side_to_move.opponent();
        self.checkmate = false;
        self.stalemate = false;
        Some(mv)
    }

    /// 当前走子方是否被将军
    pub fn in_check(&self) -> bool {
        MoveGenerator::is_in_check(&self.board, self.side_to_move)
    }

    /// 对局是否结束（将死或逼和）
    pub fn is_over(&self) -> bool {
        self.checkmate || self.stalemate
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    /// 按坐标记谱执行一串走法，走法必须在合法集中
    fn play(state: &mut GameState, notations: &[&str]) {
        for notation in notations {
            let from = Square::from_algebraic(&notation[0..2]).unwrap();
            let to = Square::from_algebraic(&notation[2..4]).unwrap();
            let mv = state
                .valid_moves()
                .into_iter()
                .find(|m| m.from == from && m.to == to)
                .unwrap_or_else(|| panic!("走法不合法: {}", notation));
            state.make_move(mv);
        }
    }

    #[test]
    fn test_initial_state() {
        let mut state = GameState::new();
        assert_eq!(state.side_to_move, Side::White);
        assert!(state.move_log.is_empty());
        assert_eq!(state.valid_moves().len(), 20);
        assert!(!state.is_over());
    }

    #[test]
    fn test_make_and_undo_restores_state() {
        let mut state = GameState::new();
        let original = state.clone();

        play(&mut state, &["e2e4", "e7e5", "g1f3"]);
        assert_eq!(state.move_log.len(), 3);
        assert_eq!(state.side_to_move, Side::Black);

        state.undo_move();
        state.undo_move();
        state.undo_move();
        assert_eq!(state, original);
    }

    #[test]
    fn test_undo_empty_log() {
        let mut state = GameState::new();
        assert_eq!(state.undo_move(), None);
    }

    #[test]
    fn test_fools_mate_checkmate() {
        let mut state = GameState::new();
        play(&mut state, &["f2f3", "e7e5", "g2g4", "d8h4"]);

        let moves = state.valid_moves();
        assert!(moves.is_empty());
        assert!(state.checkmate);
        assert!(!state.stalemate);
        assert!(state.is_over());
    }

    #[test]
    fn test_undo_clears_checkmate() {
        let mut state = GameState::new();
        play(&mut state, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        state.valid_moves();
        assert!(state.checkmate);

        state.undo_move();
        assert!(!state.checkmate);
        assert!(!state.valid_moves().is_empty());
    }

    #[test]
    fn test_stalemate() {
        // 黑王 a8 无子可动但未被将军
        let mut board = Board::empty();
        board.set(sq("a8"), Some(Piece::new(PieceType::King, Side::Black)));
        board.set(sq("c7"), Some(Piece::new(PieceType::Queen, Side::White)));
        board.set(sq("b6"), Some(Piece::new(PieceType::King, Side::White)));

        let mut state = GameState::from_board(board, Side::Black);
        assert!(state.valid_moves().is_empty());
        assert!(state.stalemate);
        assert!(!state.checkmate);
    }

    #[test]
    fn test_en_passant_make_and_undo() {
        let mut state = GameState::new();
        play(&mut state, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        let before = state.clone();

        play(&mut state, &["e5d6"]);
        let last = *state.move_log.last().unwrap();
        assert!(last.en_passant);
        // 被吃的黑兵从 d5 移除
        assert!(state.board.get(sq("d5")).is_none());
        assert_eq!(
            state.board.get(sq("d6")),
            Some(Piece::new(PieceType::Pawn, Side::White))
        );

        state.undo_move();
        assert_eq!(state, before);
    }

    #[test]
    fn test_castle_make_and_undo() {
        let mut state = GameState::new();
        play(&mut state, &["g1f3", "g8f6", "g2g3", "g7g6", "f1g2", "f8g7"]);
        let before = state.clone();

        play(&mut state, &["e1g1"]);
        let last = *state.move_log.last().unwrap();
        assert!(last.castle);
        assert_eq!(
            state.board.get(sq("f1")),
            Some(Piece::new(PieceType::Rook, Side::White))
        );
        assert!(!state.castle_rights.wks);
        assert!(!state.castle_rights.wqs);

        state.undo_move();
        assert_eq!(state, before);
    }

    #[test]
    fn test_rook_move_clears_castle_right() {
        let mut state = GameState::new();
        play(&mut state, &["h2h4", "h7h5", "h1h3"]);
        assert!(!state.castle_rights.wks);
        assert!(state.castle_rights.wqs);

        state.undo_move();
        assert!(state.castle_rights.wks);
    }

    #[test]
    fn test_promotion_auto_queen() {
        let mut board = Board::empty();
        board.set(sq("a7"), Some(Piece::new(PieceType::Pawn, Side::White)));
        board.set(sq("e1"), Some(Piece::new(PieceType::King, Side::White)));
        board.set(sq("e8"), Some(Piece::new(PieceType::King, Side::Black)));

        let mut state = GameState::from_board(board, Side::White);
        play(&mut state, &["a7a8"]);
        assert_eq!(
            state.board.get(sq("a8")),
            Some(Piece::new(PieceType::Queen, Side::White))
        );

        state.undo_move();
        assert_eq!(
            state.board.get(sq("a7")),
            Some(Piece::new(PieceType::Pawn, Side::White))
        );
    }
}
