use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use crate::{
    ai::ProbabilityBoard,
    board::TargetView,
    common::{Coordinate, ShotOutcome},
    player::Player,
    targeting::TargetingEngine,
};

/// CPU opponent driven by the hunt/sink targeting engine.
#[derive(Debug, Default)]
pub struct AiPlayer {
    engine: TargetingEngine,
}

impl AiPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(&self) -> &TargetingEngine {
        &self.engine
    }
}

impl Player for AiPlayer {
    fn name(&self) -> &'static str {
        "targeting"
    }

    fn select_target(&mut self, _rng: &mut SmallRng, view: &TargetView<'_>) -> Coordinate {
        self.engine.next_target(view)
    }

    fn handle_shot_result(&mut self, view: &TargetView<'_>, coord: Coordinate, outcome: ShotOutcome) {
        self.engine.record_result(view, coord, outcome);
    }

    fn probability(&self) -> Option<&ProbabilityBoard> {
        self.engine.last_probability()
    }
}

/// Scripted opponent that fires at uniformly random unshot cells.
#[derive(Debug, Default)]
pub struct RandomPlayer;

impl RandomPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_target(&mut self, rng: &mut SmallRng, view: &TargetView<'_>) -> Coordinate {
        let open: Vec<Coordinate> = view.unshot().collect();
        open.choose(rng).copied().unwrap_or(Coordinate::new(0, 0))
    }
}
