use crate::grid::{manhattan, CellKind, GridMemory, Pos};
use crate::observation::{Gem, Observation};
use crate::pathfind::find_path;
use crate::signal::{gem_signal_at, DEFAULT_SIGMA};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Fixed evaluation order for the gradient fallback.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }

    pub fn from_offset(delta: (i32, i32)) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| dir.offset() == delta)
    }

    pub fn token(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::West => "W",
            Direction::East => "E",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Capacity of the recent-position ring used to bias wandering away
    /// from cells the bot just visited.
    pub recent_window: usize,
    /// Spread of the gem-signal field consulted by the gradient fallback.
    pub sigma: f64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            recent_window: 20,
            sigma: DEFAULT_SIGMA,
        }
    }
}

/// The decision agent. Owns the persistent map memory and the recent-position
/// ring; everything else is recomputed per tick and dropped.
pub struct ExplorerBot {
    cfg: ExplorerConfig,
    map: GridMemory,
    recent: VecDeque<Pos>,
    rng: SmallRng,
}

impl ExplorerBot {
    pub fn new(cfg: ExplorerConfig) -> Self {
        Self::from_rng(cfg, SmallRng::from_entropy())
    }

    /// Seeded constructor so wander decisions are reproducible in tests and
    /// replays.
    pub fn with_seed(cfg: ExplorerConfig, seed: u64) -> Self {
        Self::from_rng(cfg, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(cfg: ExplorerConfig, rng: SmallRng) -> Self {
        Self {
            cfg,
            map: GridMemory::new(),
            recent: VecDeque::with_capacity(cfg.recent_window),
            rng,
        }
    }

    pub fn map(&self) -> &GridMemory {
        &self.map
    }

    /// Folds one observation into the map and records the visit.
    pub fn remember(&mut self, obs: &Observation) -> Pos {
        self.map
            .merge(obs.wall.iter().copied(), obs.floor.iter().copied(), obs.bot);
        if self.recent.len() == self.cfg.recent_window {
            self.recent.pop_front();
        }
        self.recent.push_back(obs.bot);
        obs.bot
    }

    /// One target per tick, strict priority: richest visible gem, else the
    /// nearest frontier cell, else a random floor cell the bot has not been
    /// on recently.
    pub fn choose_target(&mut self, bot_pos: Pos, gems: &[Gem]) -> Pos {
        if let Some(first) = gems.first() {
            let mut best = first;
            for gem in &gems[1..] {
                if gem.ttl > best.ttl {
                    best = gem;
                }
            }
            return best.position;
        }

        let frontier = self.map.frontier_cells();
        if let Some(&nearest) = frontier.iter().min_by_key(|&&pos| manhattan(bot_pos, pos)) {
            return nearest;
        }

        self.wander_target(bot_pos)
    }

    fn wander_target(&mut self, bot_pos: Pos) -> Pos {
        let candidates: Vec<Pos> = self
            .map
            .floor_cells()
            .filter(|pos| !self.recent.contains(pos))
            .collect();
        if candidates.is_empty() {
            bot_pos
        } else {
            candidates[self.rng.gen_range(0..candidates.len())]
        }
    }

    /// Turns (position, target) into a move. A found path dictates the step;
    /// with no path the bot climbs the gem-signal gradient over the open
    /// directions instead.
    pub fn decide(&self, bot_pos: Pos, target: Pos, gems: &[Gem]) -> Direction {
        if let Some(path) = find_path(&self.map, bot_pos, target) {
            if let Some(&next) = path.first() {
                let delta = (next.0 - bot_pos.0, next.1 - bot_pos.1);
                return Direction::from_offset(delta).unwrap_or(Direction::North);
            }
        }
        self.gradient_move(bot_pos, gems)
    }

    fn gradient_move(&self, bot_pos: Pos, gems: &[Gem]) -> Direction {
        let mut best = None;
        let mut strongest = f64::NEG_INFINITY;
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let dest = (bot_pos.0 + dx, bot_pos.1 + dy);
            if self.map.kind_at(dest) == CellKind::Wall {
                continue;
            }
            let signal = gem_signal_at(dest, gems, self.cfg.sigma);
            if signal > strongest {
                strongest = signal;
                best = Some(dir);
            }
        }
        best.unwrap_or(Direction::North)
    }

    /// Full tick: merge the observation, pick a target, emit a move.
    pub fn step(&mut self, obs: &Observation) -> Direction {
        let bot_pos = self.remember(obs);
        let target = self.choose_target(bot_pos, &obs.visible_gems);
        let direction = self.decide(bot_pos, target, &obs.visible_gems);
        tracing::debug!(
            bot = ?bot_pos,
            target = ?target,
            %direction,
            known_cells = self.map.len(),
            gems = obs.visible_gems.len(),
            "tick"
        );
        direction
    }
}
