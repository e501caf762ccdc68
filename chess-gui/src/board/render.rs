//! 棋盘格和高亮渲染

use bevy::prelude::*;

use engine::{Square, BOARD_SIZE};

use super::{BoardLayout, HighlightMarker, HighlightType};
use crate::theme::ColorTheme;

/// 生成 64 个棋盘格
pub fn spawn_board(commands: &mut Commands, layout: &BoardLayout, theme: &ColorTheme) {
    for row in 0..BOARD_SIZE as u8 {
        for col in 0..BOARD_SIZE as u8 {
            let square = Square::new_unchecked(row, col);
            let pos = layout.square_to_screen(square);
            commands.spawn((
                Sprite {
                    color: theme.square_color(square),
                    custom_size: Some(Vec2::splat(layout.square_size)),
                    ..default()
                },
                Transform::from_xyz(pos.x, pos.y, 0.0),
            ));
        }
    }
}

/// 生成单个高亮格
///
/// 半透明覆盖层，位于棋盘格之上、棋子之下
pub fn spawn_highlight(
    commands: &mut Commands,
    layout: &BoardLayout,
    square: Square,
    color: Color,
    highlight_type: HighlightType,
) {
    let pos = layout.square_to_screen(square);
    let z = match highlight_type {
        HighlightType::Selected => 1.0,
        HighlightType::Destination => 2.0,
    };

    commands.spawn((
        Sprite {
            color,
            custom_size: Some(Vec2::splat(layout.square_size)),
            ..default()
        },
        Transform::from_xyz(pos.x, pos.y, z),
        HighlightMarker,
    ));
}
