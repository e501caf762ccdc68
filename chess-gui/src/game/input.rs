//! 输入处理

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::{ClickOutcome, ClientGame, PendingAnimation};
use crate::board::BoardLayout;

/// 处理鼠标输入
///
/// 把点击位置换算成棋盘格后交给手势状态机；
/// 点击在棋盘外的输入在这里被过滤掉
pub fn handle_mouse_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    layout: Res<BoardLayout>,
    mut game: ResMut<ClientGame>,
    mut pending: ResMut<PendingAnimation>,
) {
    // 只处理左键点击
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    // 获取鼠标位置
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };

    // 转换为世界坐标
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(world_position) = camera.viewport_to_world_2d(camera_transform, cursor_position) else {
        return;
    };

    // 转换为棋盘格，棋盘外的点击直接忽略
    let Some(square) = layout.screen_to_square(world_position) else {
        return;
    };

    // 提交成功的走法排队等待动画播放
    if let ClickOutcome::Committed(mv) = game.handle_click(square) {
        pending.0 = Some(mv);
    }
}

/// 处理键盘输入
///
/// Z 悔棋（不播放动画），R 重开。其余按键忽略
pub fn handle_keyboard_input(keys: Res<ButtonInput<KeyCode>>, mut game: ResMut<ClientGame>) {
    if keys.just_pressed(KeyCode::KeyZ) {
        game.undo();
    }
    if keys.just_pressed(KeyCode::KeyR) {
        game.restart();
    }
}
