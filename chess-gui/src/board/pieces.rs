//! 棋子渲染和走子动画

use bevy::prelude::*;

use engine::{Board, Move};

use super::BoardLayout;
use crate::game::PendingAnimation;

/// 每移动一格播放的动画帧数
pub const FRAMES_PER_SQUARE: u32 = 10;

/// 棋子标记组件
#[derive(Component)]
pub struct PieceMarker;

/// 动画期间显示在目标格上的被吃棋子残影
#[derive(Component)]
pub struct CapturedGhost;

/// 生成所有棋子
///
/// `animation` 为刚提交的走法时，该走法的棋子从起点格生成并播放滑动动画，
/// 被吃的棋子在其原格子保留残影直到动画结束
pub fn spawn_pieces(
    commands: &mut Commands,
    board: &Board,
    layout: &BoardLayout,
    asset_server: &AssetServer,
    animation: Option<Move>,
) {
    for (square, piece) in board.all_pieces() {
        let animating = animation.filter(|mv| mv.to == square);
        let pos = match animating {
            Some(mv) => layout.square_to_screen(mv.from),
            None => layout.square_to_screen(square),
        };

        let mut entity = commands.spawn((
            Sprite {
                image: asset_server.load(format!("pieces/{}.png", piece.code())),
                custom_size: Some(Vec2::splat(layout.square_size)),
                ..default()
            },
            Transform::from_xyz(pos.x, pos.y, 10.0),
            PieceMarker,
        ));
        if let Some(mv) = animating {
            entity.insert(MoveAnimation::new(mv));
        }
    }

    // 吃子残影：画在被吃棋子的格子上，位于移动棋子之下
    if let Some(mv) = animation {
        if let Some(captured) = mv.captured {
            let pos = layout.square_to_screen(mv.capture_square());
            commands.spawn((
                Sprite {
                    image: asset_server.load(format!("pieces/{}.png", captured.code())),
                    custom_size: Some(Vec2::splat(layout.square_size)),
                    ..default()
                },
                Transform::from_xyz(pos.x, pos.y, 5.0),
                PieceMarker,
                CapturedGhost,
            ));
        }
    }
}

/// 棋子移动动画组件
///
/// 帧数与移动距离成正比：每帧把棋子放在起点到终点连线的等分点上
#[derive(Component, Debug)]
pub struct MoveAnimation {
    mv: Move,
    frame: u32,
    frame_count: u32,
}

impl MoveAnimation {
    pub fn new(mv: Move) -> Self {
        let d_row = (mv.to.row as i32 - mv.from.row as i32).unsigned_abs();
        let d_col = (mv.to.col as i32 - mv.from.col as i32).unsigned_abs();
        Self {
            mv,
            frame: 0,
            frame_count: ((d_row + d_col) * FRAMES_PER_SQUARE).max(1),
        }
    }

    /// 总帧数（首尾各含一帧，共 frame_count + 1 个位置）
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// 前进一帧
    pub fn advance(&mut self) {
        self.frame = (self.frame + 1).min(self.frame_count);
    }

    /// 当前插值位置（小数行列坐标）
    pub fn current_position(&self) -> (f32, f32) {
        let t = self.frame as f32 / self.frame_count as f32;
        let d_row = self.mv.to.row as f32 - self.mv.from.row as f32;
        let d_col = self.mv.to.col as f32 - self.mv.from.col as f32;
        (
            self.mv.from.row as f32 + d_row * t,
            self.mv.from.col as f32 + d_col * t,
        )
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.frame_count
    }
}

/// 推进棋子移动动画
///
/// `PendingAnimation` 从提交时写入到这里播放完毕才清除，
/// 输入系统在整个区间内被挡住，走子动画总是不被打断地播放完
pub fn animate_pieces(
    mut commands: Commands,
    layout: Res<BoardLayout>,
    mut pending: ResMut<PendingAnimation>,
    mut query: Query<(Entity, &mut Transform, &mut MoveAnimation)>,
    ghosts: Query<Entity, With<CapturedGhost>>,
) {
    for (entity, mut transform, mut animation) in query.iter_mut() {
        animation.advance();
        let (row, col) = animation.current_position();
        let pos = layout.interpolated_to_screen(row, col);
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;

        if animation.is_finished() {
            commands.entity(entity).remove::<MoveAnimation>();
            for ghost in ghosts.iter() {
                commands.entity(ghost).despawn();
            }
            pending.0 = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Square;

    fn test_move(from: (u8, u8), to: (u8, u8)) -> Move {
        let mut board = Board::empty();
        let from = Square::new_unchecked(from.0, from.1);
        board.set(
            from,
            Some(engine::Piece::new(engine::PieceType::Rook, engine::Side::White)),
        );
        Move::new(from, Square::new_unchecked(to.0, to.1), &board).unwrap()
    }

    #[test]
    fn test_frame_count_from_distance() {
        // 直线两格：(|dRow| + |dCol|) * 每格帧数
        let animation = MoveAnimation::new(test_move((6, 4), (4, 4)));
        assert_eq!(animation.frame_count(), 2 * FRAMES_PER_SQUARE);

        // 斜线走法按行列距离之和计
        let animation = MoveAnimation::new(test_move((7, 0), (5, 2)));
        assert_eq!(animation.frame_count(), 4 * FRAMES_PER_SQUARE);
    }

    #[test]
    fn test_interpolation() {
        let mut animation = MoveAnimation::new(test_move((6, 4), (4, 4)));
        assert_eq!(animation.current_position(), (6.0, 4.0));

        // 推进到中点
        for _ in 0..FRAMES_PER_SQUARE {
            animation.advance();
        }
        assert_eq!(animation.current_position(), (5.0, 4.0));
        assert!(!animation.is_finished());

        // 推进到终点
        for _ in 0..FRAMES_PER_SQUARE {
            animation.advance();
        }
        assert_eq!(animation.current_position(), (4.0, 4.0));
        assert!(animation.is_finished());
    }

    #[test]
    fn test_advance_clamps_at_end() {
        let mut animation = MoveAnimation::new(test_move((6, 4), (5, 4)));
        for _ in 0..FRAMES_PER_SQUARE * 3 {
            animation.advance();
        }
        assert_eq!(animation.current_position(), (5.0, 4.0));
    }

    #[test]
    fn test_pending_move_blocks_input_until_animation_ends() {
        let mv = test_move((6, 4), (4, 4));
        let frame_count = MoveAnimation::new(mv).frame_count();

        let mut app = App::new();
        app.insert_resource(BoardLayout::default())
            .insert_resource(PendingAnimation(Some(mv)))
            .add_systems(Update, animate_pieces);
        app.world_mut()
            .spawn((Transform::default(), MoveAnimation::new(mv)));

        // 动画播放期间标记始终存在，输入门保持关闭
        for _ in 0..frame_count - 1 {
            app.update();
            assert!(app.world().resource::<PendingAnimation>().0.is_some());
        }

        // 最后一帧播放完毕后标记清除，动画组件移除，输入门打开
        app.update();
        assert!(app.world().resource::<PendingAnimation>().0.is_none());
        app.update();
        let mut query = app.world_mut().query::<&MoveAnimation>();
        assert_eq!(query.iter(app.world()).count(), 0);
    }
}
