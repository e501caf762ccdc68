//! 棋子和格子定义

use serde::{Deserialize, Serialize};

use crate::constants::BOARD_SIZE;
use crate::error::EngineError;

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    /// 王
    King,
    /// 后
    Queen,
    /// 车
    Rook,
    /// 象
    Bishop,
    /// 马
    Knight,
    /// 兵
    Pawn,
}

impl PieceType {
    /// 获取棋子编码字符（大写）
    pub fn to_char(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Knight => 'N',
            PieceType::Pawn => 'P',
        }
    }

    /// 从编码字符解析
    pub fn from_char(c: char) -> Option<PieceType> {
        match c {
            'K' => Some(PieceType::King),
            'Q' => Some(PieceType::Queen),
            'R' => Some(PieceType::Rook),
            'B' => Some(PieceType::Bishop),
            'N' => Some(PieceType::Knight),
            'P' => Some(PieceType::Pawn),
            _ => None,
        }
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 白方（先手，棋盘下方）
    White,
    /// 黑方（后手，棋盘上方）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// 获取阵营编码字符
    pub fn to_char(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }

    /// 从编码字符解析
    pub fn from_char(c: char) -> Option<Side> {
        match c {
            'w' => Some(Side::White),
            'b' => Some(Side::Black),
            _ => None,
        }
    }

    /// 兵的前进方向（行增量）
    pub fn pawn_direction(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub side: Side,
}

impl Piece {
    /// 创建新棋子
    pub fn new(piece_type: PieceType, side: Side) -> Self {
        Self { piece_type, side }
    }

    /// 获取两字符编码（阵营 + 类型），如 "wP"、"bK"
    ///
    /// 棋子贴图资源以此编码命名
    pub fn code(&self) -> String {
        format!("{}{}", self.side.to_char(), self.piece_type.to_char())
    }

    /// 从两字符编码解析
    pub fn from_code(code: &str) -> crate::Result<Piece> {
        let mut chars = code.chars();
        let (Some(side_char), Some(type_char), None) =
            (chars.next(), chars.next(), chars.next())
        else {
            return Err(EngineError::InvalidPieceCode(code.to_string()));
        };
        let side = Side::from_char(side_char)
            .ok_or_else(|| EngineError::InvalidPieceCode(code.to_string()))?;
        let piece_type = PieceType::from_char(type_char)
            .ok_or_else(|| EngineError::InvalidPieceCode(code.to_string()))?;
        Ok(Piece::new(piece_type, side))
    }
}

/// 棋盘格子
///
/// 行 0 是黑方底线（棋盘最上方），列 0 是 a 线
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    /// 行 (0-7)
    pub row: u8,
    /// 列 (0-7)
    pub col: u8,
}

impl Square {
    /// 创建新格子
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新格子（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 获取偏移后的格子
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Square> {
        let new_row = self.row as i8 + dr;
        let new_col = self.col as i8 + dc;
        if (0..BOARD_SIZE as i8).contains(&new_row) && (0..BOARD_SIZE as i8).contains(&new_col) {
            Some(Square {
                row: new_row as u8,
                col: new_col as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// 从代数坐标解析，如 "e4"
    pub fn from_algebraic(s: &str) -> crate::Result<Square> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(EngineError::InvalidAlgebraic(s.to_string()));
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(EngineError::InvalidAlgebraic(s.to_string()));
        }
        let col = file as u8 - b'a';
        let row = b'8' - rank as u8;
        Ok(Square { row, col })
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        write!(f, "{}{}", file, rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_code() {
        let white_pawn = Piece::new(PieceType::Pawn, Side::White);
        assert_eq!(white_pawn.code(), "wP");

        let black_king = Piece::new(PieceType::King, Side::Black);
        assert_eq!(black_king.code(), "bK");

        assert_eq!(Piece::from_code("wQ"), Ok(Piece::new(PieceType::Queen, Side::White)));
        assert_eq!(Piece::from_code("bN"), Ok(Piece::new(PieceType::Knight, Side::Black)));
        assert!(Piece::from_code("--").is_err());
        assert!(Piece::from_code("wX").is_err());
        assert!(Piece::from_code("wPP").is_err());
    }

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(0, 0).is_some());
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
    }

    #[test]
    fn test_square_offset() {
        let sq = Square::new_unchecked(6, 4);
        assert_eq!(sq.offset(-2, 0), Some(Square::new_unchecked(4, 4)));
        assert_eq!(sq.offset(2, 0), None);
        assert_eq!(sq.offset(0, -5), None);
    }

    #[test]
    fn test_square_algebraic() {
        // 行 0 是第 8 横排
        assert_eq!(Square::new_unchecked(0, 0).to_string(), "a8");
        assert_eq!(Square::new_unchecked(7, 4).to_string(), "e1");
        assert_eq!(Square::from_algebraic("e1"), Ok(Square::new_unchecked(7, 4)));
        assert_eq!(Square::from_algebraic("a8"), Ok(Square::new_unchecked(0, 0)));
        assert!(Square::from_algebraic("i1").is_err());
        assert!(Square::from_algebraic("e9").is_err());
        assert!(Square::from_algebraic("e").is_err());
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent(), Side::White);
    }
}
