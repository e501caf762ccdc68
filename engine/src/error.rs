//! 错误类型定义

use thiserror::Error;

/// 规则引擎错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 无效的代数坐标
    #[error("Invalid algebraic square: {0}")]
    InvalidAlgebraic(String),

    /// 无效的棋子编码
    #[error("Invalid piece code: {0}")]
    InvalidPieceCode(String),
}

/// 引擎操作结果类型
pub type Result<T> = std::result::Result<T, EngineError>;
