use std::collections::BTreeMap;

/// Cell coordinate on the unbounded integer lattice.
pub type Pos = (i32, i32);

/// Orthogonal neighbor offsets in fixed N, S, W, E order.
pub const ORTHO_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Unknown,
    Wall,
    Floor,
}

impl CellKind {
    /// Transition table for observed cells. Wall is sticky: once a coordinate
    /// is a wall it stays a wall even if a later observation reports floor.
    /// Floor only fills in unknown cells.
    fn absorb(self, observed: CellKind) -> CellKind {
        match (self, observed) {
            (_, CellKind::Wall) => CellKind::Wall,
            (CellKind::Unknown, CellKind::Floor) => CellKind::Floor,
            (current, _) => current,
        }
    }
}

/// Persistent partial map of the cave. Entries are added, never removed;
/// `Unknown` is the implicit default and is never stored.
#[derive(Debug, Default)]
pub struct GridMemory {
    cells: BTreeMap<Pos, CellKind>,
}

impl GridMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind_at(&self, pos: Pos) -> CellKind {
        self.cells.get(&pos).copied().unwrap_or(CellKind::Unknown)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Folds one tick's observation into the map. Walls land first, floors
    /// second, and the bot's own cell is forced to floor last: the bot is
    /// standing on it, so it cannot be a wall regardless of prior state.
    pub fn merge<W, F>(&mut self, walls: W, floors: F, bot_pos: Pos)
    where
        W: IntoIterator<Item = Pos>,
        F: IntoIterator<Item = Pos>,
    {
        for pos in walls {
            self.observe(pos, CellKind::Wall);
        }
        for pos in floors {
            self.observe(pos, CellKind::Floor);
        }
        self.cells.insert(bot_pos, CellKind::Floor);
    }

    fn observe(&mut self, pos: Pos, observed: CellKind) {
        let next = self.kind_at(pos).absorb(observed);
        if next != CellKind::Unknown {
            self.cells.insert(pos, next);
        }
    }

    /// Orthogonal neighbors that are not known walls. Unknown cells count as
    /// walkable on purpose: assuming the unexplored is passable is what pulls
    /// the search toward new territory.
    pub fn walkable_neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        ORTHO_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let next = (pos.0 + dx, pos.1 + dy);
            (self.kind_at(next) != CellKind::Wall).then_some(next)
        })
    }

    /// Every known floor cell bordering at least one unknown cell. Full scan
    /// each call; the map is bounded by the cave size so this stays cheap.
    pub fn frontier_cells(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .filter(|(_, kind)| **kind == CellKind::Floor)
            .filter(|((x, y), _)| {
                ORTHO_OFFSETS
                    .iter()
                    .any(|&(dx, dy)| self.kind_at((x + dx, y + dy)) == CellKind::Unknown)
            })
            .map(|(pos, _)| *pos)
            .collect()
    }

    /// Known floor cells in coordinate order, for the wander fallback.
    pub fn floor_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .filter(|(_, kind)| **kind == CellKind::Floor)
            .map(|(pos, _)| *pos)
    }
}
