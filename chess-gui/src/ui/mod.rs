//! UI 模块
//!
//! 终局提示：居中文字，先画偏移的阴影再画前景（双色投影效果）

use bevy::prelude::*;

use crate::game::{animation_idle, ClientGame};
use crate::theme::ColorTheme;

/// UI 插件
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // 等走子动画播放完再显示终局提示
        app.add_systems(Update, update_game_over_overlay.run_if(animation_idle));
    }
}

/// 终局提示标记组件
#[derive(Component)]
pub struct GameOverMarker;

/// 终局文字字号
const GAME_OVER_FONT_SIZE: f32 = 32.0;

/// 阴影偏移（像素）
const SHADOW_OFFSET: Vec2 = Vec2::new(2.0, -2.0);

/// 根据对局状态生成或清除终局提示
fn update_game_over_overlay(
    mut commands: Commands,
    game: Res<ClientGame>,
    theme: Res<ColorTheme>,
    overlay_query: Query<Entity, With<GameOverMarker>>,
) {
    if !game.is_changed() {
        return;
    }

    for entity in overlay_query.iter() {
        commands.entity(entity).despawn();
    }

    let Some(text) = game.game_over_text() else {
        return;
    };

    // 阴影在下层，偏移一点
    commands.spawn((
        Text2d::new(text.clone()),
        TextFont {
            font_size: GAME_OVER_FONT_SIZE,
            ..default()
        },
        TextColor(theme.game_over_shadow),
        Transform::from_xyz(SHADOW_OFFSET.x, SHADOW_OFFSET.y, 20.0),
        GameOverMarker,
    ));

    // 前景文字
    commands.spawn((
        Text2d::new(text),
        TextFont {
            font_size: GAME_OVER_FONT_SIZE,
            ..default()
        },
        TextColor(theme.game_over_text),
        Transform::from_xyz(0.0, 0.0, 21.0),
        GameOverMarker,
    ));
}
