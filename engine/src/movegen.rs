//! 走法生成和验证

use crate::board::Board;
use crate::game::GameState;
use crate::moves::Move;
use crate::piece::{Piece, PieceType, Side, Square};

/// 直线方向（车）
const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 斜线方向（象）
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// 马的跳跃偏移
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成当前走子方的所有合法走法（过滤掉走完被将军的走法）
    ///
    /// 全量重算，调用方应缓存结果，仅在局面变化后刷新
    pub fn generate_legal(state: &GameState) -> Vec<Move> {
        let side = state.side_to_move;
        let mut moves =
            Self::generate_pseudo_legal(&state.board, side, state.en_passant_target);
        Self::generate_castle_moves(&state.board, side, &state.castle_rights, &mut moves);

        moves.retain(|mv| {
            // 模拟走法后王不能处于被攻击状态
            let mut test_board = state.board.clone();
            test_board.apply(mv);
            !Self::is_in_check(&test_board, side)
        });

        moves
    }

    /// 生成指定阵营的所有伪合法走法（不考虑将军，不含易位）
    pub fn generate_pseudo_legal(
        board: &Board,
        side: Side,
        en_passant_target: Option<Square>,
    ) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (square, piece) in board.pieces(side) {
            match piece.piece_type {
                PieceType::Pawn => {
                    Self::generate_pawn_moves(board, square, side, en_passant_target, &mut moves)
                }
                PieceType::Knight => {
                    Self::generate_step_moves(board, square, side, &KNIGHT_OFFSETS, &mut moves)
                }
                PieceType::King => {
                    let king_offsets: [(i8, i8); 8] = [
                        (-1, -1),
                        (-1, 0),
                        (-1, 1),
                        (0, -1),
                        (0, 1),
                        (1, -1),
                        (1, 0),
                        (1, 1),
                    ];
                    Self::generate_step_moves(board, square, side, &king_offsets, &mut moves)
                }
                PieceType::Rook => {
                    Self::generate_ray_moves(board, square, side, &ORTHOGONAL, &mut moves)
                }
                PieceType::Bishop => {
                    Self::generate_ray_moves(board, square, side, &DIAGONAL, &mut moves)
                }
                PieceType::Queen => {
                    Self::generate_ray_moves(board, square, side, &ORTHOGONAL, &mut moves);
                    Self::generate_ray_moves(board, square, side, &DIAGONAL, &mut moves);
                }
            }
        }

        moves
    }

    /// 生成兵的走法（前进、起步两格、斜吃、吃过路兵）
    fn generate_pawn_moves(
        board: &Board,
        from: Square,
        side: Side,
        en_passant_target: Option<Square>,
        moves: &mut Vec<Move>,
    ) {
        let dir = side.pawn_direction();
        let start_row = match side {
            Side::White => crate::constants::WHITE_PAWN_ROW,
            Side::Black => crate::constants::BLACK_PAWN_ROW,
        };

        // 前进一格
        if let Some(to) = from.offset(dir, 0) {
            if board.get(to).is_none() {
                if let Some(mv) = Move::new(from, to, board) {
                    moves.push(mv);
                }
                // 起步两格
                if from.row == start_row {
                    if let Some(to2) = from.offset(dir * 2, 0) {
                        if board.get(to2).is_none() {
                            if let Some(mv) = Move::new(from, to2, board) {
                                moves.push(mv);
                            }
                        }
                    }
                }
            }
        }

        // 斜吃和吃过路兵
        for dc in [-1, 1] {
            let Some(to) = from.offset(dir, dc) else {
                continue;
            };
            if let Some(target) = board.get(to) {
                if target.side != side {
                    if let Some(mv) = Move::new(from, to, board) {
                        moves.push(mv);
                    }
                }
            } else if en_passant_target == Some(to) {
                if let Some(mv) = Move::new_en_passant(from, to, board) {
                    moves.push(mv);
                }
            }
        }
    }

    /// 生成单步跳跃类走法（马、王）
    fn generate_step_moves(
        board: &Board,
        from: Square,
        side: Side,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, dc) in offsets {
            let Some(to) = from.offset(dr, dc) else {
                continue;
            };
            match board.get(to) {
                Some(piece) if piece.side == side => {}
                _ => {
                    if let Some(mv) = Move::new(from, to, board) {
                        moves.push(mv);
                    }
                }
            }
        }
    }

    /// 生成射线类走法（车、象、后）
    fn generate_ray_moves(
        board: &Board,
        from: Square,
        side: Side,
        directions: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, dc) in directions {
            let mut current = from;
            while let Some(to) = current.offset(dr, dc) {
                match board.get(to) {
                    None => {
                        if let Some(mv) = Move::new(from, to, board) {
                            moves.push(mv);
                        }
                        current = to;
                    }
                    Some(piece) => {
                        if piece.side != side {
                            if let Some(mv) = Move::new(from, to, board) {
                                moves.push(mv);
                            }
                        }
                        break;
                    }
                }
            }
        }
    }

    /// 生成王车易位走法
    ///
    /// 王在被将军时、经过或落入受攻击格子时不能易位
    fn generate_castle_moves(
        board: &Board,
        side: Side,
        rights: &crate::game::CastleRights,
        moves: &mut Vec<Move>,
    ) {
        let row = match side {
            Side::White => crate::constants::WHITE_BACK_ROW,
            Side::Black => crate::constants::BLACK_BACK_ROW,
        };
        let king_home = Square::new_unchecked(row, 4);
        if board.get(king_home) != Some(Piece::new(PieceType::King, side)) {
            return;
        }
        let enemy = side.opponent();
        if Self::is_square_attacked(board, king_home, enemy) {
            return;
        }

        let (kingside, queenside) = rights.for_side(side);

        if kingside
            && board.get(Square::new_unchecked(row, 7)) == Some(Piece::new(PieceType::Rook, side))
            && board.get(Square::new_unchecked(row, 5)).is_none()
            && board.get(Square::new_unchecked(row, 6)).is_none()
            && !Self::is_square_attacked(board, Square::new_unchecked(row, 5), enemy)
            && !Self::is_square_attacked(board, Square::new_unchecked(row, 6), enemy)
        {
            if let Some(mv) = Move::new_castle(king_home, Square::new_unchecked(row, 6), board) {
                moves.push(mv);
            }
        }

        if queenside
            && board.get(Square::new_unchecked(row, 0)) == Some(Piece::new(PieceType::Rook, side))
            && board.get(Square::new_unchecked(row, 1)).is_none()
            && board.get(Square::new_unchecked(row, 2)).is_none()
            && board.get(Square::new_unchecked(row, 3)).is_none()
            && !Self::is_square_attacked(board, Square::new_unchecked(row, 2), enemy)
            && !Self::is_square_attacked(board, Square::new_unchecked(row, 3), enemy)
        {
            if let Some(mv) = Move::new_castle(king_home, Square::new_unchecked(row, 2), board) {
                moves.push(mv);
            }
        }
    }

    /// 检查指定阵营的王是否被攻击
    ///
    /// 棋盘上没有王时（构造的测试局面）视为未被将军
    pub fn is_in_check(board: &Board, side: Side) -> bool {
        match board.find_king(side) {
            Some(king) => Self::is_square_attacked(board, king, side.opponent()),
            None => false,
        }
    }

    /// 检查格子是否被指定阵营攻击
    pub fn is_square_attacked(board: &Board, square: Square, by: Side) -> bool {
        // 马
        for &(dr, dc) in &KNIGHT_OFFSETS {
            if let Some(from) = square.offset(dr, dc) {
                if board.get(from) == Some(Piece::new(PieceType::Knight, by)) {
                    return true;
                }
            }
        }

        // 兵：攻击方的兵位于该格子前进方向的反方向一行
        let dir = by.pawn_direction();
        for dc in [-1, 1] {
            if let Some(from) = square.offset(-dir, dc) {
                if board.get(from) == Some(Piece::new(PieceType::Pawn, by)) {
                    return true;
                }
            }
        }

        // 王（相邻格）
        for dr in -1..=1i8 {
            for dc in -1..=1i8 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(from) = square.offset(dr, dc) {
                    if board.get(from) == Some(Piece::new(PieceType::King, by)) {
                        return true;
                    }
                }
            }
        }

        // 直线射线：车、后
        if Self::ray_attacked(board, square, by, &ORTHOGONAL, PieceType::Rook) {
            return true;
        }

        // 斜线射线：象、后
        Self::ray_attacked(board, square, by, &DIAGONAL, PieceType::Bishop)
    }

    /// 沿射线方向查找第一个棋子，判断是否是攻击方的滑动子力
    fn ray_attacked(
        board: &Board,
        square: Square,
        by: Side,
        directions: &[(i8, i8)],
        slider: PieceType,
    ) -> bool {
        for &(dr, dc) in directions {
            let mut current = square;
            while let Some(next) = current.offset(dr, dc) {
                match board.get(next) {
                    None => current = next,
                    Some(piece) => {
                        if piece.side == by
                            && (piece.piece_type == slider || piece.piece_type == PieceType::Queen)
                        {
                            return true;
                        }
                        break;
                    }
                }
            }
        }
        false
    }
}
