//! CPU targeting: a per-ship hunt/sink state machine on top of the
//! probability heuristic in [`crate::ai`].
//!
//! Every ship that has been hit but not sunk owns a [`Hunt`]: the cells hit
//! so far (the first one is where the ship was discovered) and a queue of
//! cells to try next. A hunt moves through these modes:
//!
//! - `Seeking`: one hit, the orthogonal neighbors that could still hold the
//!   ship are queued.
//! - `Extending`: a second hit fixed the axis; the engine walks forward one
//!   cell at a time.
//! - `Backtracking`: the forward walk ran into a miss or the edge, so the
//!   cells past the first hit on the other side are queued, one per point
//!   of health left.
//! - `Sweeping`: both ends are exhausted while the ship is still afloat
//!   (its hits are not contiguous); every unshot neighbor of every hit is
//!   queued.
//!
//! The hunt is dropped as soon as its ship sinks. With no hunt left the
//! engine falls back to a cold shot chosen by the probability board.

use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::{
    ai::{self, ProbabilityBoard},
    board::TargetView,
    common::{Coordinate, Direction, ShotOutcome},
    config::MAX_SELECTION_ATTEMPTS,
    ship::ShipCode,
};

/// Stage of the search for one damaged ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntMode {
    Seeking,
    Extending { heading: Direction },
    Backtracking,
    Sweeping,
}

/// Search state for a ship that has been hit but not sunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunt {
    code: ShipCode,
    hits: Vec<Coordinate>,
    pending: VecDeque<Coordinate>,
    mode: HuntMode,
}

impl Hunt {
    pub fn code(&self) -> ShipCode {
        self.code
    }

    /// Cells hit so far, in the order they were hit.
    pub fn hits(&self) -> &[Coordinate] {
        &self.hits
    }

    /// Queued candidates, next shot first.
    pub fn pending(&self) -> impl Iterator<Item = &Coordinate> {
        self.pending.iter()
    }

    pub fn mode(&self) -> HuntMode {
        self.mode
    }

    fn first_hit(&self) -> Coordinate {
        self.hits[0]
    }
}

/// Chooses the CPU's shots against one opponent board.
#[derive(Debug, Clone, Default)]
pub struct TargetingEngine {
    /// Active hunts in discovery order.
    hunts: Vec<Hunt>,
    /// Ship whose queue supplied the last shot, if it was not a cold shot.
    last_source: Option<ShipCode>,
    last_probability: Option<ProbabilityBoard>,
}

impl TargetingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when no damaged ship is being pursued.
    pub fn is_idle(&self) -> bool {
        self.hunts.is_empty()
    }

    pub fn hunts(&self) -> &[Hunt] {
        &self.hunts
    }

    pub fn hunt(&self, code: ShipCode) -> Option<&Hunt> {
        self.hunts.iter().find(|h| h.code == code)
    }

    /// Probability board behind the last shot, if it was a cold shot.
    pub fn last_probability(&self) -> Option<&ProbabilityBoard> {
        self.last_probability.as_ref()
    }

    /// Choose the next cell to fire at. Never returns a cell that `view`
    /// reports as already shot, as long as one unshot cell remains.
    pub fn next_target(&mut self, view: &TargetView<'_>) -> Coordinate {
        for _ in 0..MAX_SELECTION_ATTEMPTS {
            let idx = match self.hunts.iter().position(|h| !h.pending.is_empty()) {
                Some(idx) => idx,
                None if !self.hunts.is_empty() => 0,
                None => break,
            };
            if self.hunts[idx].pending.is_empty() {
                self.replan(idx, view);
                if self.hunts[idx].pending.is_empty() {
                    let dropped = self.hunts.remove(idx);
                    warn!("no candidates left for {}, dropping hunt", dropped.code);
                    continue;
                }
            }

            let hunt = &mut self.hunts[idx];
            let Some(candidate) = hunt.pending.pop_front() else {
                continue;
            };
            if view.is_shot(candidate) {
                debug!("skipping queued {} for {}: already shot", candidate, hunt.code);
                continue;
            }
            if hunt.mode == HuntMode::Seeking {
                let first = hunt.first_hit();
                let fits = Direction::between(first, candidate)
                    .map_or(true, |dir| ai::can_ship_exist(view, hunt.code.length(), first, dir));
                if !fits {
                    debug!("{} cannot lie through {}, skipping", hunt.code, candidate);
                    continue;
                }
            }
            self.last_source = Some(hunt.code);
            self.last_probability = None;
            return candidate;
        }

        self.last_source = None;
        let (matrix, shot) = ai::calc_probability_and_pick(view);
        self.last_probability = Some(matrix);
        shot
    }

    /// Update hunt state with the outcome of the shot at `coord`. `view`
    /// must already reflect that shot.
    pub fn record_result(&mut self, view: &TargetView<'_>, coord: Coordinate, outcome: ShotOutcome) {
        let source = self.last_source.take();
        match outcome {
            ShotOutcome::Miss => {
                if let Some(idx) = source.and_then(|code| self.position(code)) {
                    self.handle_miss(idx, view);
                }
            }
            ShotOutcome::Hit(code) => self.handle_hit(view, code, coord),
            ShotOutcome::Sunk(code) => {
                if let Some(idx) = self.position(code) {
                    self.hunts.remove(idx);
                }
                info!("sunk {} at {}", code, coord);
            }
        }
    }

    fn position(&self, code: ShipCode) -> Option<usize> {
        self.hunts.iter().position(|h| h.code == code)
    }

    fn handle_miss(&mut self, idx: usize, view: &TargetView<'_>) {
        let hunt = &mut self.hunts[idx];
        match hunt.mode {
            HuntMode::Extending { heading } => {
                debug!("{}: miss while extending {:?}, backtracking", hunt.code, heading);
                self.backtrack(idx, view, heading.opposite());
            }
            HuntMode::Backtracking => {
                // Past a miss on this side nothing can belong to the ship.
                hunt.pending.clear();
            }
            HuntMode::Seeking | HuntMode::Sweeping => {}
        }
    }

    fn handle_hit(&mut self, view: &TargetView<'_>, code: ShipCode, coord: Coordinate) {
        let Some(idx) = self.position(code) else {
            let pending = fan_out(view, code, coord);
            debug!("found {} at {}, queued {:?}", code, coord, pending);
            self.hunts.push(Hunt {
                code,
                hits: vec![coord],
                pending,
                mode: HuntMode::Seeking,
            });
            return;
        };

        let hunt = &mut self.hunts[idx];
        let prev = hunt.hits[hunt.hits.len() - 1];
        hunt.hits.push(coord);
        match hunt.mode {
            HuntMode::Seeking | HuntMode::Extending { .. } => {
                if hunt.mode == HuntMode::Seeking {
                    hunt.pending.clear();
                }
                let Some(heading) = Direction::between(prev, coord) else {
                    return;
                };
                hunt.mode = HuntMode::Extending { heading };
                match coord.step(heading).filter(|&c| !view.is_shot(c)) {
                    Some(next) => {
                        debug!("{}: extending {:?} to {}", code, heading, next);
                        hunt.pending.push_back(next);
                    }
                    None => {
                        debug!("{}: reached the end heading {:?}, backtracking", code, heading);
                        self.backtrack(idx, view, heading.opposite());
                    }
                }
            }
            HuntMode::Backtracking | HuntMode::Sweeping => {}
        }
    }

    /// Queue the cells past the first hit in `dir`, skipping cells already
    /// hit and stopping at a miss or the edge, one per point of health left.
    fn backtrack(&mut self, idx: usize, view: &TargetView<'_>, dir: Direction) {
        let hunt = &mut self.hunts[idx];
        let health = view.ship(hunt.code).map_or(0, |s| s.health());
        let first = hunt.first_hit();

        hunt.pending.clear();
        hunt.mode = HuntMode::Backtracking;
        let walk = (1..).map_while(|k| first.offset(dir, k));
        for cell in walk {
            if hunt.pending.len() >= health || view.is_miss(cell) {
                break;
            }
            if !view.is_hit(cell) {
                hunt.pending.push_back(cell);
            }
        }
        debug!("{}: backtracking {:?} from {}, queued {:?}", hunt.code, dir, first, hunt.pending);
    }

    /// Rebuild the queue of a hunt that ran dry while its ship is afloat.
    fn replan(&mut self, idx: usize, view: &TargetView<'_>) {
        let hunt = &self.hunts[idx];
        if hunt.hits.len() >= 2 && !matches!(hunt.mode, HuntMode::Backtracking | HuntMode::Sweeping) {
            let last = hunt.hits[hunt.hits.len() - 1];
            if let Some(heading) = Direction::between(hunt.first_hit(), last) {
                self.backtrack(idx, view, heading.opposite());
                if !self.hunts[idx].pending.is_empty() {
                    return;
                }
            }
        }

        let hunt = &mut self.hunts[idx];
        hunt.mode = HuntMode::Sweeping;
        for &hit in hunt.hits.iter() {
            for (_, cell) in hit.neighbors() {
                if !view.is_shot(cell) && !hunt.pending.contains(&cell) {
                    hunt.pending.push_back(cell);
                }
            }
        }
        debug!("{}: sweeping around {:?}, queued {:?}", hunt.code, hunt.hits, hunt.pending);
    }
}

/// Unshot neighbors of a fresh hit through which the ship could still lie,
/// best probability score first; ties keep the Up, Down, Left, Right order.
fn fan_out(view: &TargetView<'_>, code: ShipCode, hit: Coordinate) -> VecDeque<Coordinate> {
    let matrix = ai::calc_probability(view);
    let mut candidates: Vec<Coordinate> = hit
        .neighbors()
        .filter(|&(dir, cell)| !view.is_shot(cell) && ai::can_ship_exist(view, code.length(), hit, dir))
        .map(|(_, cell)| cell)
        .collect();
    candidates.sort_by(|a, b| matrix[b.y][b.x].cmp(&matrix[a.y][a.x]));
    candidates.into()
}
