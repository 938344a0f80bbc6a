use rand::Rng;

use super::state::{Board, BoardError, Cell, Move, MoveResult, Score, TilePosition, WINNING_TILE};

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(board: &Board, direction: Move) -> MoveResult {
    match direction {
        Move::Left => move_left(board),
        Move::Right => move_right(board),
        Move::Up => move_up(board),
        Move::Down => move_down(board),
    }
}

/// Positions of empty cells, in row-major scan order.
pub fn empty_cells(board: &Board) -> Vec<(usize, usize)> {
    let size = board.size();
    let mut empties = Vec::new();
    for row in 0..size {
        for col in 0..size {
            if board.get(row, col) == 0 {
                empties.push((row, col));
            }
        }
    }
    empties
}

/// Fresh board of `size` x `size` with two random starting tiles.
///
/// The tiles are placed sequentially, so the second draw can never land on
/// the cell taken by the first.
pub fn initialize<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Board, BoardError> {
    let board = Board::empty(size)?;
    Ok(board.with_random_tile(rng).with_random_tile(rng))
}

/// Insert a random 2 (90%) or 4 (10%) tile using thread-local RNG.
///
/// For reproducible behavior, prefer `Board::with_random_tile(&mut impl Rng)`.
pub fn insert_random_tile(board: &Board) -> Board {
    board.with_random_tile_thread()
}

/// The core one-dimensional primitive: slide a line leftward and merge
/// adjacent equal tiles once.
///
/// Steps: compact non-zero values preserving order, merge adjacent equal
/// pairs left-to-right (a freshly merged tile never merges again in the same
/// pass), re-compact, pad with zeros back to the input length. Returns the
/// new line and the score earned, which is the sum of the merged values.
pub fn slide_and_merge_line(line: &[Cell]) -> (Vec<Cell>, Score) {
    let mut compacted: Vec<Cell> = line.iter().copied().filter(|&cell| cell != 0).collect();
    let mut score: Score = 0;
    let mut idx = 0;
    while idx + 1 < compacted.len() {
        if compacted[idx] == compacted[idx + 1] {
            compacted[idx] *= 2;
            score += Score::from(compacted[idx]);
            compacted[idx + 1] = 0;
            // Skip the slot consumed by the merge.
            idx += 2;
        } else {
            idx += 1;
        }
    }
    compacted.retain(|&cell| cell != 0);
    compacted.resize(line.len(), 0);
    (compacted, score)
}

/// Apply the line primitive to every row independently.
pub fn move_left(board: &Board) -> MoveResult {
    let size = board.size();
    let mut score: Score = 0;
    let mut cells = Vec::with_capacity(size * size);
    for row in board.rows() {
        let (line, line_score) = slide_and_merge_line(row);
        score += line_score;
        cells.extend(line);
    }
    let next = Board::from_cells(size, cells);
    let moved = next != *board;
    MoveResult {
        board: next,
        score,
        moved,
    }
}

/// Mirror the rows, move left, mirror back.
pub fn move_right(board: &Board) -> MoveResult {
    let result = move_left(&mirror(board));
    MoveResult {
        board: mirror(&result.board),
        score: result.score,
        moved: result.moved,
    }
}

/// Transpose, move left, transpose back.
pub fn move_up(board: &Board) -> MoveResult {
    let result = move_left(&transpose(board));
    MoveResult {
        board: transpose(&result.board),
        score: result.score,
        moved: result.moved,
    }
}

/// Transpose, move right, transpose back.
pub fn move_down(board: &Board) -> MoveResult {
    let result = move_right(&transpose(board));
    MoveResult {
        board: transpose(&result.board),
        score: result.score,
        moved: result.moved,
    }
}

/// Swap row and column indices. Requires a square board, which the `Board`
/// invariant guarantees.
pub(crate) fn transpose(board: &Board) -> Board {
    let size = board.size();
    let mut cells = vec![0; size * size];
    for row in 0..size {
        for col in 0..size {
            cells[col * size + row] = board.get(row, col);
        }
    }
    Board::from_cells(size, cells)
}

/// Reverse every row.
pub(crate) fn mirror(board: &Board) -> Board {
    let cells = board
        .rows()
        .flat_map(|row| row.iter().rev().copied())
        .collect();
    Board::from_cells(board.size(), cells)
}

/// True iff any cell has reached the winning tile.
pub fn has_won(board: &Board) -> bool {
    board.rows().flatten().any(|&cell| cell >= WINNING_TILE)
}

/// True iff a move in some direction could change the board: an empty cell
/// exists, or two equal tiles are adjacent horizontally or vertically.
pub fn can_move(board: &Board) -> bool {
    let size = board.size();
    if board.rows().flatten().any(|&cell| cell == 0) {
        return true;
    }
    for row in 0..size {
        for col in 0..size - 1 {
            if board.get(row, col) == board.get(row, col + 1) {
                return true;
            }
        }
    }
    for row in 0..size - 1 {
        for col in 0..size {
            if board.get(row, col) == board.get(row + 1, col) {
                return true;
            }
        }
    }
    false
}

/// All non-empty cells as render positions, in row-major order.
pub fn tiles_with_positions(board: &Board) -> Vec<TilePosition> {
    let size = board.size();
    let mut tiles = Vec::new();
    for row in 0..size {
        for col in 0..size {
            let value = board.get(row, col);
            if value != 0 {
                tiles.push(TilePosition { row, col, value });
            }
        }
    }
    tiles
}

pub(crate) fn format_val(val: &Cell) -> String {
    match *val {
        0 => String::from("       "),
        v => {
            let mut s = v.to_string();
            while s.len() < 7 {
                match s.len() {
                    6 => s = format!(" {}", s),
                    _ => s = format!(" {} ", s),
                }
            }
            s
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(rows: &[&[Cell]]) -> Board {
        Board::from_rows(rows.iter().map(|row| row.to_vec()).collect()).expect("valid test board")
    }

    fn tile_count(b: &Board) -> usize {
        b.rows().flatten().filter(|&&cell| cell != 0).count()
    }

    #[test]
    fn it_rejects_degenerate_sizes() {
        assert_eq!(Board::empty(0).unwrap_err(), BoardError::InvalidSize(0));
        assert_eq!(Board::empty(1).unwrap_err(), BoardError::InvalidSize(1));
        assert!(Board::empty(2).is_ok());
        assert!(initialize(1, &mut StdRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn it_rejects_non_square_rows() {
        let err = Board::from_rows(vec![vec![2, 0], vec![0]]).unwrap_err();
        assert_eq!(err, BoardError::NotSquare { rows: 2, width: 1 });
        assert!(Board::from_rows(vec![vec![2, 0, 0], vec![0, 0, 0]]).is_err());
    }

    #[test]
    fn it_slide_and_merge_line() {
        assert_eq!(slide_and_merge_line(&[0, 0, 0, 0]), (vec![0, 0, 0, 0], 0));
        assert_eq!(slide_and_merge_line(&[2, 4, 2, 4]), (vec![2, 4, 2, 4], 0));
        assert_eq!(slide_and_merge_line(&[2, 2, 4, 4]), (vec![4, 8, 0, 0], 12));
        assert_eq!(slide_and_merge_line(&[2, 0, 0, 2]), (vec![4, 0, 0, 0], 4));
        assert_eq!(slide_and_merge_line(&[2, 0, 2, 0]), (vec![4, 0, 0, 0], 4));
        assert_eq!(slide_and_merge_line(&[0, 2, 2, 2]), (vec![4, 2, 0, 0], 4));
        assert_eq!(slide_and_merge_line(&[4, 4, 4, 4]), (vec![8, 8, 0, 0], 16));
    }

    #[test]
    fn it_merges_each_tile_at_most_once() {
        // The 4 created from 2+2 must not merge with the trailing 4.
        assert_eq!(slide_and_merge_line(&[2, 2, 4, 0]), (vec![4, 4, 0, 0], 4));
        // Nor may a fresh 8 re-merge with the neighbor it slid into.
        assert_eq!(slide_and_merge_line(&[4, 4, 8, 0]), (vec![8, 8, 0, 0], 8));
    }

    #[test]
    fn it_slide_is_idempotent() {
        for line in [
            vec![2, 2, 0, 0],
            vec![2, 0, 2, 0],
            vec![4, 4, 4, 4],
            vec![2, 4, 8, 16],
            vec![0, 0, 0, 0],
            vec![2, 2, 2, 2, 2],
        ] {
            let (once, _) = slide_and_merge_line(&line);
            let (twice, score) = slide_and_merge_line(&once);
            assert_eq!(twice, once);
            assert_eq!(score, 0);
        }
    }

    #[test]
    fn it_preserves_sum_and_never_adds_tiles() {
        for line in [
            vec![2, 2, 4, 4],
            vec![2, 0, 2, 8],
            vec![16, 16, 16, 0],
            vec![2, 4, 8, 16, 32],
        ] {
            let (merged, _) = slide_and_merge_line(&line);
            let sum_before: u64 = line.iter().map(|&c| u64::from(c)).sum();
            let sum_after: u64 = merged.iter().map(|&c| u64::from(c)).sum();
            assert_eq!(sum_before, sum_after);
            let count_before = line.iter().filter(|&&c| c != 0).count();
            let count_after = merged.iter().filter(|&&c| c != 0).count();
            assert!(count_after <= count_before);
        }
    }

    #[test]
    fn test_move_left() {
        let start = board(&[
            &[2, 2, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ]);
        let result = move_left(&start);
        assert_eq!(
            result.board,
            board(&[
                &[4, 0, 0, 0],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0],
            ])
        );
        assert_eq!(result.score, 4);
        assert!(result.moved);
    }

    #[test]
    fn test_move_right() {
        let start = board(&[&[2, 0, 2, 0], &[4, 2, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 8]]);
        let result = move_right(&start);
        assert_eq!(
            result.board,
            board(&[&[0, 0, 0, 4], &[0, 0, 4, 2], &[0, 0, 0, 0], &[0, 0, 0, 8]])
        );
        assert_eq!(result.score, 4);
        assert!(result.moved);
    }

    #[test]
    fn test_move_up() {
        let start = board(&[&[2, 2], &[2, 2]]);
        let result = move_up(&start);
        assert_eq!(result.board, board(&[&[4, 4], &[0, 0]]));
        assert_eq!(result.score, 8);
        assert!(result.moved);
        assert!(!has_won(&result.board));
        assert!(can_move(&result.board));
    }

    #[test]
    fn test_move_down() {
        let start = board(&[&[2, 4, 0], &[0, 4, 0], &[2, 2, 0]]);
        let result = move_down(&start);
        assert_eq!(result.board, board(&[&[0, 0, 0], &[0, 8, 0], &[4, 2, 0]]));
        assert_eq!(result.score, 12);
        assert!(result.moved);
    }

    #[test]
    fn it_wall_move_is_a_noop() {
        // Already packed against the left wall with no merges available.
        let start = board(&[&[2, 4, 8, 16], &[4, 2, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        let result = move_left(&start);
        assert!(!result.moved);
        assert_eq!(result.score, 0);
        assert_eq!(result.board, start);
    }

    #[test]
    fn it_empty_board_moves_are_noops() {
        let empty = Board::empty(4).unwrap();
        for dir in Move::ALL {
            let result = shift(&empty, dir);
            assert!(!result.moved);
            assert_eq!(result.score, 0);
        }
    }

    #[test]
    fn it_left_then_right_restores_sequence_without_merges() {
        let start = board(&[
            &[0, 2, 0, 4],
            &[8, 0, 16, 0],
            &[0, 0, 2, 0],
            &[4, 0, 0, 8],
        ]);
        let left = move_left(&start);
        assert_eq!(left.score, 0);
        let back = move_right(&left.board);
        for (original, restored) in start.rows().zip(back.board.rows()) {
            let a: Vec<Cell> = original.iter().copied().filter(|&c| c != 0).collect();
            let b: Vec<Cell> = restored.iter().copied().filter(|&c| c != 0).collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn it_can_move_matches_exhaustive_shifts() {
        let terminal = board(&[&[2, 4, 8], &[16, 32, 64], &[128, 256, 512]]);
        let mergeable_full = board(&[&[2, 4, 8], &[16, 4, 64], &[128, 256, 512]]);
        let sparse = board(&[&[0, 0, 0, 2], &[0, 0, 0, 0], &[0, 0, 4, 0], &[0, 0, 0, 0]]);
        let cornered = board(&[&[2, 0], &[0, 0]]);
        for b in [terminal, mergeable_full, sparse, cornered] {
            let any_moved = Move::ALL.iter().any(|&dir| shift(&b, dir).moved);
            assert_eq!(can_move(&b), any_moved, "board:{}", b);
        }
    }

    #[test]
    fn it_full_board_without_merges_is_terminal() {
        let terminal = board(&[&[2, 4, 8], &[16, 32, 64], &[128, 256, 512]]);
        assert!(!can_move(&terminal));
        for dir in Move::ALL {
            assert!(!shift(&terminal, dir).moved);
        }
    }

    #[test]
    fn it_has_won() {
        assert!(!has_won(&board(&[&[2, 4], &[1024, 1024]])));
        assert!(has_won(&board(&[&[2, 4], &[2048, 0]])));
        assert!(has_won(&board(&[&[4096, 0], &[0, 0]])));
    }

    #[test]
    fn it_empty_cells_scan_row_major() {
        let b = board(&[&[2, 0, 4], &[0, 8, 0], &[0, 0, 16]]);
        assert_eq!(
            empty_cells(&b),
            vec![(0, 1), (1, 0), (1, 2), (2, 0), (2, 1)]
        );
        let full = board(&[&[2, 4], &[8, 16]]);
        assert!(empty_cells(&full).is_empty());
    }

    #[test]
    fn it_tiles_with_positions() {
        let b = board(&[&[2, 0, 0], &[0, 64, 0], &[0, 0, 4]]);
        let tiles = tiles_with_positions(&b);
        assert_eq!(
            tiles,
            vec![
                TilePosition { row: 0, col: 0, value: 2 },
                TilePosition { row: 1, col: 1, value: 64 },
                TilePosition { row: 2, col: 2, value: 4 },
            ]
        );
        assert_eq!(tiles[1].key(), "1-1-64");
    }

    #[test]
    fn it_insert_random_tile_fills_then_stays_put() {
        let mut b = Board::empty(3).unwrap();
        for _ in 0..9 {
            b = insert_random_tile(&b);
        }
        assert!(empty_cells(&b).is_empty());
        assert!(b.rows().flatten().all(|&cell| cell == 2 || cell == 4));
        // Identity on a full board, not an error.
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(b.with_random_tile(&mut rng), b);
    }

    #[test]
    fn it_initialize_places_two_tiles() {
        let mut rng = StdRng::seed_from_u64(99);
        let b = initialize(5, &mut rng).unwrap();
        assert_eq!(b.size(), 5);
        assert_eq!(tile_count(&b), 2);
        assert!(b
            .rows()
            .flatten()
            .all(|&cell| cell == 0 || cell == 2 || cell == 4));
    }

    #[test]
    fn it_transpose_and_mirror_are_involutions() {
        let b = board(&[&[2, 4, 0], &[0, 8, 16], &[32, 0, 64]]);
        assert_eq!(transpose(&transpose(&b)), b);
        assert_eq!(mirror(&mirror(&b)), b);
        assert_eq!(transpose(&b).get(0, 2), 32);
        assert_eq!(mirror(&b).get(0, 0), 0);
    }
}
