use bevy::log::LogPlugin;
use bevy::prelude::*;
use tracing_subscriber::EnvFilter;

use chess_gui::{ChessGuiPlugin, WINDOW_SIZE};

fn main() {
    // 使用自己的 tracing 订阅器，禁用 Bevy 内置的 LogPlugin 避免重复初始化
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "国际象棋".into(),
                        resolution: (WINDOW_SIZE as u32, WINDOW_SIZE as u32).into(),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(ChessGuiPlugin)
        .run();
}
