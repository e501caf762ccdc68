//! 引擎常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 8;

/// 白方兵的起始行（第 2 横排）
pub const WHITE_PAWN_ROW: u8 = 6;

/// 黑方兵的起始行（第 7 横排）
pub const BLACK_PAWN_ROW: u8 = 1;

/// 白方底线行
pub const WHITE_BACK_ROW: u8 = 7;

/// 黑方底线行
pub const BLACK_BACK_ROW: u8 = 0;
