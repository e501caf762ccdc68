//! 国际象棋客户端
//!
//! 使用 Bevy 引擎实现的国际象棋图形界面：
//! 点击选子走棋、合法落点高亮、走子滑动动画、终局提示

pub mod board;
pub mod game;
pub mod theme;
pub mod ui;

use bevy::prelude::*;

/// 窗口边长（像素）
pub const WINDOW_SIZE: f32 = 512.0;

/// 客户端插件
pub struct ChessGuiPlugin;

impl Plugin for ChessGuiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            theme::ThemePlugin,
            board::BoardPlugin,
            game::GamePlugin,
            ui::UiPlugin,
        ))
        .add_systems(Startup, setup_camera);
    }
}

/// 设置 2D 相机
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
