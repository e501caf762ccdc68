//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::moves::Move;
use crate::piece::{Piece, PieceType, Side, Square};

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 8x8 棋盘，索引为 row * 8 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; BOARD_SIZE * BOARD_SIZE],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        let back_row = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        // 黑方（上方，行 0-1）
        for (col, piece_type) in back_row.iter().enumerate() {
            board.set(
                Square::new_unchecked(0, col as u8),
                Some(Piece::new(*piece_type, Side::Black)),
            );
            board.set(
                Square::new_unchecked(1, col as u8),
                Some(Piece::new(PieceType::Pawn, Side::Black)),
            );
        }

        // 白方（下方，行 6-7）
        for (col, piece_type) in back_row.iter().enumerate() {
            board.set(
                Square::new_unchecked(6, col as u8),
                Some(Piece::new(PieceType::Pawn, Side::White)),
            );
            board.set(
                Square::new_unchecked(7, col as u8),
                Some(Piece::new(*piece_type, Side::White)),
            );
        }

        board
    }

    /// 获取指定格子的棋子
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.to_index()]
    }

    /// 设置指定格子的棋子
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.to_index()] = piece;
    }

    /// 在棋盘上执行一步走法（不检查合法性，不记录日志）
    ///
    /// 也用于走法合法性模拟，因此必须完整处理吃过路兵和易位的棋盘变化
    pub fn apply(&mut self, mv: &Move) {
        let placed = if mv.promotion {
            Piece::new(PieceType::Queen, mv.piece_moved.side)
        } else {
            mv.piece_moved
        };
        self.set(mv.to, Some(placed));
        self.set(mv.from, None);

        // 吃过路兵：被吃的兵不在终点格子上
        if mv.en_passant {
            self.set(mv.capture_square(), None);
        }

        // 王车易位：车同步跳到王的另一侧
        if mv.castle {
            let row = mv.from.row;
            if mv.to.col > mv.from.col {
                // 短易位
                let rook = self.get(Square::new_unchecked(row, 7));
                self.set(Square::new_unchecked(row, mv.to.col - 1), rook);
                self.set(Square::new_unchecked(row, 7), None);
            } else {
                // 长易位
                let rook = self.get(Square::new_unchecked(row, 0));
                self.set(Square::new_unchecked(row, mv.to.col + 1), rook);
                self.set(Square::new_unchecked(row, 0), None);
            }
        }
    }

    /// 撤销一步走法的棋盘变化
    pub fn revert(&mut self, mv: &Move) {
        // 升变时 piece_moved 仍是兵，直接放回即可
        self.set(mv.from, Some(mv.piece_moved));
        self.set(mv.to, None);

        if let Some(captured) = mv.captured {
            self.set(mv.capture_square(), Some(captured));
        }

        if mv.castle {
            let row = mv.from.row;
            if mv.to.col > mv.from.col {
                let rook = self.get(Square::new_unchecked(row, mv.to.col - 1));
                self.set(Square::new_unchecked(row, 7), rook);
                self.set(Square::new_unchecked(row, mv.to.col - 1), None);
            } else {
                let rook = self.get(Square::new_unchecked(row, mv.to.col + 1));
                self.set(Square::new_unchecked(row, 0), rook);
                self.set(Square::new_unchecked(row, mv.to.col + 1), None);
            }
        }
    }

    /// 查找指定阵营的王
    pub fn find_king(&self, side: Side) -> Option<Square> {
        self.all_pieces()
            .into_iter()
            .find(|(_, piece)| piece.piece_type == PieceType::King && piece.side == side)
            .map(|(square, _)| square)
    }

    /// 获取指定阵营的所有棋子
    pub fn pieces(&self, side: Side) -> Vec<(Square, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.side == side)
            .collect()
    }

    /// 获取所有棋子
    pub fn all_pieces(&self) -> Vec<(Square, Piece)> {
        let mut result = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let square = Square::new_unchecked(row as u8, col as u8);
                if let Some(piece) = self.get(square) {
                    result.push((square, piece));
                }
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}
