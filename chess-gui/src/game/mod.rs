//! 游戏逻辑模块
//!
//! 管理手势状态机、走法提交和动画排队

mod input;
mod state;

pub use input::*;
pub use state::*;

use bevy::prelude::*;

use engine::Move;

use crate::board::pieces::{animate_pieces, MoveAnimation};

/// 游戏插件
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClientGame::default())
            .insert_resource(PendingAnimation::default())
            .add_systems(
                Update,
                (
                    (handle_mouse_input, handle_keyboard_input).run_if(animation_idle),
                    animate_pieces,
                ),
            );
    }
}

/// 正在播放动画的已提交走法
///
/// 提交时写入，动画播放完毕后由动画系统清除，
/// 存续期间覆盖从提交到动画结束的完整区间，不依赖系统执行顺序。
/// 悔棋不经过这里，所以悔棋永远不触发动画
#[derive(Resource, Default)]
pub struct PendingAnimation(pub Option<Move>);

/// 动画期间不处理任何输入也不更新终局提示，走子动画总是完整播放
pub fn animation_idle(
    pending: Res<PendingAnimation>,
    animations: Query<(), With<MoveAnimation>>,
) -> bool {
    pending.0.is_none() && animations.is_empty()
}
