// Probability-based cold-shot selection for the CPU.
// Scores every unshot square by how many ways the remaining enemy ships
// could be laid through it, then fires at the best one.

use log::debug;

use crate::{
    board::TargetView,
    common::{Coordinate, Direction},
    config::BOARD_SIZE,
};

/// Per-cell placement counts. Recomputed before every cold shot.
pub type ProbabilityBoard = [[u32; BOARD_SIZE]; BOARD_SIZE];

/// Count, for every unshot cell, the directions in which each unsunk ship
/// could lie when anchored on that cell. Contributions of all unsunk ships
/// are summed; shot cells score zero.
pub fn calc_probability(view: &TargetView<'_>) -> ProbabilityBoard {
    let mut matrix = [[0u32; BOARD_SIZE]; BOARD_SIZE];
    let lengths: Vec<usize> = view.unsunk_ships().map(|s| s.length()).collect();

    for cell in view.unshot() {
        for &len in lengths.iter() {
            let mut open = [true; 4];
            for k in 1..len {
                for (i, dir) in Direction::ALL.into_iter().enumerate() {
                    if open[i] && !cell.offset(dir, k).is_some_and(|c| !view.is_shot(c)) {
                        open[i] = false;
                    }
                }
                if open.iter().all(|o| !o) {
                    break;
                }
            }
            matrix[cell.y][cell.x] += open.iter().filter(|&&o| o).count() as u32;
        }
    }
    matrix
}

/// Whether a straight run of `length` unshot cells can pass through `pivot`
/// along the axis of `dir`. The pivot itself always counts; shot cells and
/// the board edge bound the run.
pub fn can_ship_exist(
    view: &TargetView<'_>,
    length: usize,
    pivot: Coordinate,
    dir: Direction,
) -> bool {
    let reach = |d: Direction| {
        (1..length)
            .take_while(|&k| pivot.offset(d, k).is_some_and(|c| !view.is_shot(c)))
            .count()
    };
    1 + reach(dir) + reach(dir.opposite()) >= length
}

/// Length of the smallest ship still afloat.
pub fn smallest_unsunk_length(view: &TargetView<'_>) -> Option<usize> {
    view.unsunk_ships().map(|s| s.length()).min()
}

/// Stride check for the smallest remaining ship: any ship of length
/// `min_len` must cover one cell on every `min_len`-th diagonal.
pub fn has_parity(coord: Coordinate, min_len: usize) -> bool {
    min_len > 0 && (coord.x + coord.y + 1) % min_len == 0
}

/// Pick the unshot cell with the highest score. Ties prefer cells on the
/// parity stride, then the first cell in row-major order. With nothing
/// scoring, the first unshot cell is used.
pub fn pick_cold_shot(view: &TargetView<'_>, matrix: &ProbabilityBoard) -> Coordinate {
    let min_len = smallest_unsunk_length(view).unwrap_or(0);
    let mut best: Option<(u32, bool, Coordinate)> = None;
    for cell in view.unshot() {
        let score = matrix[cell.y][cell.x];
        let parity = has_parity(cell, min_len);
        let better = match best {
            None => true,
            Some((top, top_parity, _)) => score > top || (score == top && parity && !top_parity),
        };
        if better {
            best = Some((score, parity, cell));
        }
    }
    match best {
        Some((score, _, cell)) if score > 0 => cell,
        _ => view.unshot().next().unwrap_or(Coordinate::new(0, 0)),
    }
}

/// Convenience wrapper that calculates the probability board and selects
/// the cold shot from it.
pub fn calc_probability_and_pick(view: &TargetView<'_>) -> (ProbabilityBoard, Coordinate) {
    let matrix = calc_probability(view);
    let shot = pick_cold_shot(view, &matrix);
    debug!(
        "cold shot at {} (score {})",
        shot, matrix[shot.y][shot.x]
    );
    (matrix, shot)
}
