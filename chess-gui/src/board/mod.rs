//! 棋盘渲染模块
//!
//! 负责棋盘格、高亮和棋子的渲染。
//! 每帧固定按 棋盘格 -> 高亮 -> 棋子 的层序绘制（由 z 轴保证）。

mod render;
pub mod pieces;

pub use render::*;
pub use pieces::*;

use bevy::prelude::*;

use engine::Square;

use crate::game::{ClientGame, PendingAnimation};
use crate::theme::ColorTheme;
use crate::WINDOW_SIZE;

/// 棋盘插件
pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(BoardLayout::default())
            .add_systems(Startup, setup_board)
            .add_systems(Update, (update_pieces, update_highlights));
    }
}

/// 棋盘布局配置
#[derive(Resource, Clone, Debug)]
pub struct BoardLayout {
    /// 棋盘左上角位置 (世界坐标)
    pub origin: Vec2,
    /// 格子边长
    pub square_size: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        // 棋盘铺满窗口，相机位于原点
        Self {
            origin: Vec2::new(-WINDOW_SIZE / 2.0, WINDOW_SIZE / 2.0),
            square_size: WINDOW_SIZE / engine::BOARD_SIZE as f32,
        }
    }
}

impl BoardLayout {
    /// 将格子坐标转换为屏幕坐标（格子中心）
    ///
    /// 行 0 在棋盘最上方，向下递增；世界坐标 y 轴向上
    pub fn square_to_screen(&self, square: Square) -> Vec2 {
        self.interpolated_to_screen(square.row as f32, square.col as f32)
    }

    /// 将小数格子坐标转换为屏幕坐标，用于走子动画插值
    pub fn interpolated_to_screen(&self, row: f32, col: f32) -> Vec2 {
        Vec2::new(
            self.origin.x + (col + 0.5) * self.square_size,
            self.origin.y - (row + 0.5) * self.square_size,
        )
    }

    /// 将屏幕坐标转换为格子坐标，超出棋盘范围返回 `None`
    pub fn screen_to_square(&self, pos: Vec2) -> Option<Square> {
        let dx = pos.x - self.origin.x;
        let dy = self.origin.y - pos.y;
        if dx < 0.0 || dy < 0.0 {
            return None;
        }
        let col = (dx / self.square_size) as u32;
        let row = (dy / self.square_size) as u32;
        Square::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?)
    }
}

/// 高亮标记组件
#[derive(Component)]
pub struct HighlightMarker;

/// 高亮类型
#[derive(Clone, Copy, Debug)]
pub enum HighlightType {
    /// 选中的棋子所在格
    Selected,
    /// 选中棋子的合法落点
    Destination,
}

/// 设置棋盘
fn setup_board(mut commands: Commands, layout: Res<BoardLayout>, theme: Res<ColorTheme>) {
    render::spawn_board(&mut commands, &layout, &theme);
}

/// 更新棋子显示
///
/// 局面变化后整体重建棋子实体；有待播放动画时，
/// 移动的棋子从起点格生成并挂上动画组件。
/// 动画期间输入被挡住，局面不会再次变化，重建每次提交只发生一次
fn update_pieces(
    mut commands: Commands,
    game: Res<ClientGame>,
    pending: Res<PendingAnimation>,
    layout: Res<BoardLayout>,
    asset_server: Res<AssetServer>,
    pieces_query: Query<Entity, With<PieceMarker>>,
) {
    if !game.is_changed() {
        return;
    }

    // 清除旧棋子（含上局动画残留的吃子残影）
    for entity in pieces_query.iter() {
        commands.entity(entity).despawn();
    }

    pieces::spawn_pieces(
        &mut commands,
        &game.state.board,
        &layout,
        &asset_server,
        pending.0,
    );
}

/// 更新高亮显示
///
/// 仅当选中格上是当前走子方的棋子时绘制：选中格一种颜色，
/// 从该格出发的所有合法落点另一种颜色
fn update_highlights(
    mut commands: Commands,
    game: Res<ClientGame>,
    layout: Res<BoardLayout>,
    theme: Res<ColorTheme>,
    highlights_query: Query<Entity, With<HighlightMarker>>,
) {
    if !game.is_changed() {
        return;
    }

    // 清除旧高亮
    for entity in highlights_query.iter() {
        commands.entity(entity).despawn();
    }

    let Some((selected, destinations)) = game.highlights() else {
        return;
    };

    render::spawn_highlight(
        &mut commands,
        &layout,
        selected,
        theme.selected_highlight,
        HighlightType::Selected,
    );

    for destination in destinations {
        render::spawn_highlight(
            &mut commands,
            &layout,
            destination,
            theme.destination_highlight,
            HighlightType::Destination,
        );
    }
}
