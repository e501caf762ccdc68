//! 主题和配色方案
//!
//! 定义棋盘格、高亮和终局文字的颜色配置

use bevy::prelude::*;

use engine::Square;

/// 主题插件
pub struct ThemePlugin;

impl Plugin for ThemePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ColorTheme::classic());
    }
}

/// 颜色主题配置
#[derive(Resource, Clone, Debug)]
pub struct ColorTheme {
    pub name: String,

    // 棋盘格
    pub light_square: Color,
    pub dark_square: Color,

    // 交互高亮
    pub selected_highlight: Color,
    pub destination_highlight: Color,

    // 终局文字
    pub game_over_text: Color,
    pub game_over_shadow: Color,
}

impl ColorTheme {
    /// 经典木质配色
    pub fn classic() -> Self {
        Self {
            name: "经典木质".to_string(),

            // 棋盘格 - 浅色与深色交替
            light_square: Color::srgb_u8(240, 217, 181), // #F0D9B5 浅木色
            dark_square: Color::srgb_u8(181, 136, 99),   // #B58863 深木色

            // 交互高亮 - 半透明覆盖在棋盘格之上
            selected_highlight: Color::srgba_u8(0, 0, 255, 100), // 蓝色，选中的棋子
            destination_highlight: Color::srgba_u8(255, 255, 0, 100), // 黄色，合法落点

            // 终局文字 - 前景黑色加灰色阴影
            game_over_text: Color::srgb_u8(0, 0, 0),
            game_over_shadow: Color::srgb_u8(128, 128, 128),
        }
    }

    /// 绿色配色
    #[allow(dead_code)]
    pub fn green() -> Self {
        Self {
            name: "绿色".to_string(),

            light_square: Color::srgb_u8(238, 238, 210), // #EEEED2
            dark_square: Color::srgb_u8(118, 150, 86),   // #769656

            selected_highlight: Color::srgba_u8(255, 255, 51, 120),
            destination_highlight: Color::srgba_u8(255, 70, 70, 110),

            game_over_text: Color::srgb_u8(255, 255, 255),
            game_over_shadow: Color::srgb_u8(40, 40, 40),
        }
    }

    /// 获取棋盘格底色：行列和的奇偶决定深浅
    pub fn square_color(&self, square: Square) -> Color {
        if (square.row + square.col) % 2 == 0 {
            self.light_square
        } else {
            self.dark_square
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_color_alternates() {
        let theme = ColorTheme::classic();
        // a8 (0,0) 是浅色格
        assert_eq!(
            theme.square_color(Square::new_unchecked(0, 0)),
            theme.light_square
        );
        assert_eq!(
            theme.square_color(Square::new_unchecked(0, 1)),
            theme.dark_square
        );
        assert_eq!(
            theme.square_color(Square::new_unchecked(1, 0)),
            theme.dark_square
        );
        assert_eq!(
            theme.square_color(Square::new_unchecked(7, 7)),
            theme.light_square
        );
    }
}
