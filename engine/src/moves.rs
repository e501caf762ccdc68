//! 走法定义

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{BLACK_BACK_ROW, WHITE_BACK_ROW};
use crate::piece::{Piece, PieceType, Side, Square};

/// 走法
///
/// `piece_moved` / `captured` 等字段仅作描述，相等性只比较起点和终点：
/// 两次点击生成的候选走法靠 (from, to) 在合法走法集中查找匹配
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Move {
    /// 起始格子
    pub from: Square,
    /// 目标格子
    pub to: Square,
    /// 移动的棋子
    pub piece_moved: Piece,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
    /// 是否是吃过路兵
    pub en_passant: bool,
    /// 是否是王车易位
    pub castle: bool,
    /// 是否是兵升变
    pub promotion: bool,
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Move {
    /// 创建普通走法，从棋盘快照填充描述字段
    ///
    /// 起点无棋子时返回 `None`
    pub fn new(from: Square, to: Square, board: &Board) -> Option<Self> {
        let piece_moved = board.get(from)?;
        let promotion = piece_moved.piece_type == PieceType::Pawn
            && match piece_moved.side {
                Side::White => to.row == BLACK_BACK_ROW,
                Side::Black => to.row == WHITE_BACK_ROW,
            };
        Some(Self {
            from,
            to,
            piece_moved,
            captured: board.get(to),
            en_passant: false,
            castle: false,
            promotion,
        })
    }

    /// 创建吃过路兵走法
    ///
    /// 被吃的兵在起点行、终点列，而不是终点格子上
    pub fn new_en_passant(from: Square, to: Square, board: &Board) -> Option<Self> {
        let piece_moved = board.get(from)?;
        let captured = Some(Piece::new(PieceType::Pawn, piece_moved.side.opponent()));
        Some(Self {
            from,
            to,
            piece_moved,
            captured,
            en_passant: true,
            castle: false,
            promotion: false,
        })
    }

    /// 创建王车易位走法
    pub fn new_castle(from: Square, to: Square, board: &Board) -> Option<Self> {
        let piece_moved = board.get(from)?;
        Some(Self {
            from,
            to,
            piece_moved,
            captured: None,
            en_passant: false,
            castle: true,
            promotion: false,
        })
    }

    /// 被吃棋子实际所在的格子
    pub fn capture_square(&self) -> Square {
        if self.en_passant {
            Square::new_unchecked(self.from.row, self.to.col)
        } else {
            self.to
        }
    }

    /// 是否是吃子走法
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// 坐标记谱，如 "e2e4"
    pub fn notation(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_eq_by_squares_only() {
        let board = Board::initial();
        let from = Square::from_algebraic("e2").unwrap();
        let to = Square::from_algebraic("e4").unwrap();

        let mv = Move::new(from, to, &board).unwrap();
        // 描述字段不同也视为相等
        let mut other = mv;
        other.captured = Some(Piece::new(PieceType::Queen, Side::Black));
        assert_eq!(mv, other);

        let different = Move::new(from, Square::from_algebraic("e3").unwrap(), &board).unwrap();
        assert_ne!(mv, different);
    }

    #[test]
    fn test_move_from_empty_square() {
        let board = Board::initial();
        let from = Square::from_algebraic("e4").unwrap();
        let to = Square::from_algebraic("e5").unwrap();
        assert!(Move::new(from, to, &board).is_none());
    }

    #[test]
    fn test_move_notation() {
        let board = Board::initial();
        let mv = Move::new(
            Square::from_algebraic("g1").unwrap(),
            Square::from_algebraic("f3").unwrap(),
            &board,
        )
        .unwrap();
        assert_eq!(mv.notation(), "g1f3");
    }

    #[test]
    fn test_promotion_flag() {
        let mut board = Board::empty();
        let from = Square::new_unchecked(1, 0);
        board.set(from, Some(Piece::new(PieceType::Pawn, Side::White)));

        let mv = Move::new(from, Square::new_unchecked(0, 0), &board).unwrap();
        assert!(mv.promotion);

        let mv = Move::new(from, Square::new_unchecked(2, 0), &board).unwrap();
        assert!(!mv.promotion);
    }

    #[test]
    fn test_en_passant_capture_square() {
        let mut board = Board::empty();
        let from = Square::from_algebraic("e5").unwrap();
        board.set(from, Some(Piece::new(PieceType::Pawn, Side::White)));
        let to = Square::from_algebraic("d6").unwrap();

        let mv = Move::new_en_passant(from, to, &board).unwrap();
        assert_eq!(mv.capture_square(), Square::from_algebraic("d5").unwrap());
        assert_eq!(mv.captured, Some(Piece::new(PieceType::Pawn, Side::Black)));
        assert!(mv.is_capture());
    }

    #[test]
    fn test_is_capture() {
        let board = Board::initial();
        let quiet = Move::new(
            Square::from_algebraic("e2").unwrap(),
            Square::from_algebraic("e4").unwrap(),
            &board,
        )
        .unwrap();
        assert!(!quiet.is_capture());

        // 直接构造吃子走法：白兵落在黑兵所在格
        let capture = Move::new(
            Square::from_algebraic("e2").unwrap(),
            Square::from_algebraic("d7").unwrap(),
            &board,
        )
        .unwrap();
        assert!(capture.is_capture());
    }
}
