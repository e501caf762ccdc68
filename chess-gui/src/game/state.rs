//! 客户端游戏状态
//!
//! 两次点击构成一次走子手势的状态机，以及合法走法集缓存。
//! 引擎的合法走法计算开销大，只在局面变化后重新快照。

use bevy::prelude::*;
use tracing::info;

use engine::{GameState, Move, Side, Square};

/// 一次点击的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// 点击成为新的选中格
    Selected(Square),
    /// 取消选中（同一格点击两次）
    Deselected,
    /// 完成一步合法走法并已提交引擎
    Committed(Move),
    /// 终局后忽略输入
    Ignored,
}

/// 客户端游戏状态
#[derive(Resource)]
pub struct ClientGame {
    /// 引擎对局状态
    pub state: GameState,
    /// 合法走法集快照，在每次提交走法、悔棋、重开后刷新
    pub valid_moves: Vec<Move>,
    /// 选中的格子（第一次点击）
    pub selected: Option<Square>,
}

impl Default for ClientGame {
    fn default() -> Self {
        Self::from_state(GameState::new())
    }
}

impl ClientGame {
    /// 从引擎状态创建，立即快照合法走法集
    pub fn from_state(mut state: GameState) -> Self {
        let valid_moves = state.valid_moves();
        Self {
            state,
            valid_moves,
            selected: None,
        }
    }

    /// 对局是否结束（将死或逼和，重开前不再接受走子输入）
    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    /// 处理一次棋盘格点击
    pub fn handle_click(&mut self, square: Square) -> ClickOutcome {
        if self.is_game_over() {
            return ClickOutcome::Ignored;
        }

        match self.selected {
            // 同一格点击两次：取消选中，放弃手势
            Some(prev) if prev == square => {
                self.selected = None;
                ClickOutcome::Deselected
            }
            // 无选中：成为选中格
            None => {
                self.selected = Some(square);
                ClickOutcome::Selected(square)
            }
            // 两次点击构成候选走法，按引擎给出的顺序查找首个 (from, to) 匹配
            Some(prev) => {
                if let Some(candidate) = Move::new(prev, square, &self.state.board) {
                    if let Some(mv) = self.valid_moves.iter().find(|m| **m == candidate).copied() {
                        self.commit(mv);
                        return ClickOutcome::Committed(mv);
                    }
                }
                // 未匹配到合法走法：旧选择废弃，该点击成为新手势的起点
                self.selected = Some(square);
                ClickOutcome::Selected(square)
            }
        }
    }

    /// 提交走法到引擎并刷新快照
    fn commit(&mut self, mv: Move) {
        info!("走子 {}", mv.notation());
        self.state.make_move(mv);
        self.selected = None;
        self.refresh_valid_moves();
    }

    /// 悔棋：撤销最近一步
    ///
    /// 保留当前选中格不变，不触发动画。
    /// 终局后或无可撤销走法时返回 `false`
    pub fn undo(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        if self.state.undo_move().is_none() {
            return false;
        }
        info!("悔棋");
        self.refresh_valid_moves();
        true
    }

    /// 重开对局：全新初始局面，清除选中和终局状态
    pub fn restart(&mut self) {
        info!("重新开始");
        self.state = GameState::new();
        self.selected = None;
        self.refresh_valid_moves();
    }

    /// 从引擎重新快照合法走法集
    ///
    /// 所有改变局面的路径都经过这里，保证不会用陈旧的快照做验证
    fn refresh_valid_moves(&mut self) {
        self.valid_moves = self.state.valid_moves();
    }

    /// 需要高亮的选中格及其全部合法落点
    ///
    /// 防御性检查：选中格上不是当前走子方的棋子时不产生任何高亮，
    /// 外部状态变化后残留的陈旧选择不会画出误导性标记
    pub fn highlights(&self) -> Option<(Square, Vec<Square>)> {
        let selected = self.selected?;
        let own_piece = self
            .state
            .board
            .get(selected)
            .map(|piece| piece.side == self.state.side_to_move)
            .unwrap_or(false);
        if !own_piece {
            return None;
        }
        let destinations = self
            .valid_moves
            .iter()
            .filter(|mv| mv.from == selected)
            .map(|mv| mv.to)
            .collect();
        Some((selected, destinations))
    }

    /// 终局提示文本，对局未结束时返回 `None`
    pub fn game_over_text(&self) -> Option<String> {
        if self.state.checkmate {
            // 被将死的一方是当前走子方
            let winner = match self.state.side_to_move {
                Side::White => "Black",
                Side::Black => "White",
            };
            Some(format!("{} wins by checkmate", winner))
        } else if self.state.stalemate {
            Some("Stalemate".to_string())
        } else {
            None
        }
    }
}
