use crate::grid::{manhattan, GridMemory, Pos};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// A* over the known map, 4-connected, unit step cost, Manhattan heuristic.
///
/// Returns the cells from just after `start` through `goal` inclusive,
/// `Some(vec![])` when `start == goal`, and `None` when no sequence of
/// non-wall cells connects them. `None` means "unreachable on the map as
/// currently known", not "no path exists": unknown cells are treated as
/// walkable, so the verdict can flip as more of the cave is observed.
pub fn find_path(grid: &GridMemory, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    if start == goal {
        return Some(Vec::new());
    }

    // Ties on f-cost break by insertion order via a monotone sequence number,
    // keeping the search fully deterministic.
    let mut open = BinaryHeap::new();
    let mut seq = 0u64;
    open.push(Reverse((manhattan(start, goal), seq, start)));

    let mut came_from: HashMap<Pos, Pos> = HashMap::new();
    let mut g_cost: HashMap<Pos, i32> = HashMap::new();
    g_cost.insert(start, 0);

    while let Some(Reverse((_, _, current))) = open.pop() {
        if current == goal {
            return Some(reconstruct(&came_from, start, goal));
        }

        let next_cost = g_cost[&current] + 1;
        for neighbor in grid.walkable_neighbors(current) {
            let improved = match g_cost.get(&neighbor) {
                Some(&known) => next_cost < known,
                None => true,
            };
            if improved {
                g_cost.insert(neighbor, next_cost);
                came_from.insert(neighbor, current);
                seq += 1;
                open.push(Reverse((next_cost + manhattan(neighbor, goal), seq, neighbor)));
            }
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(width: i32, height: i32) -> GridMemory {
        let mut grid = GridMemory::new();
        let floors = (0..width).flat_map(|x| (0..height).map(move |y| (x, y)));
        grid.merge([], floors, (0, 0));
        grid
    }

    #[test]
    fn same_start_and_goal_is_empty() {
        let grid = open_grid(3, 3);
        assert_eq!(find_path(&grid, (1, 1), (1, 1)), Some(Vec::new()));
    }

    #[test]
    fn straight_corridor() {
        let mut grid = GridMemory::new();
        grid.merge([], [(0, 0), (1, 0), (2, 0), (3, 0)], (0, 0));
        let path = find_path(&grid, (0, 0), (3, 0)).expect("corridor is connected");
        assert_eq!(path, vec![(1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn path_length_is_optimal_around_a_wall() {
        // 5x5 open room with a vertical wall at x=2, y=0..4 (gap at y=4).
        let mut grid = open_grid(5, 5);
        grid.merge([(2, 0), (2, 1), (2, 2), (2, 3)], [], (0, 0));
        // Seal the unknown border so the search cannot route around outside.
        let border: Vec<Pos> = (-1..6)
            .flat_map(|x| [(x, -1), (x, 5)])
            .chain((-1..6).flat_map(|y| [(-1, y), (5, y)]))
            .collect();
        grid.merge(border, [], (0, 0));

        let path = find_path(&grid, (0, 2), (4, 2)).expect("gap at y=4 connects the halves");
        // Manhattan distance is 4, but the detour through (2,4) costs 8.
        assert_eq!(path.len(), 8);
        assert!(path.contains(&(2, 4)));
        assert_eq!(*path.last().unwrap(), (4, 2));
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        let mut grid = open_grid(3, 1);
        grid.merge(
            [(-1, 0), (1, 0), (0, -1), (0, 1)],
            [],
            (0, 0),
        );
        assert_eq!(find_path(&grid, (0, 0), (2, 0)), None);
    }

    #[test]
    fn routes_through_unknown_cells() {
        // Only the start is known; everything else is unknown and therefore
        // optimistically walkable.
        let mut grid = GridMemory::new();
        grid.merge([], [], (0, 0));
        let path = find_path(&grid, (0, 0), (2, 0)).expect("unknown cells are walkable");
        assert_eq!(path, vec![(1, 0), (2, 0)]);
    }

    #[test]
    fn path_excludes_start_and_ends_at_goal() {
        let grid = open_grid(4, 4);
        let path = find_path(&grid, (0, 0), (3, 3)).unwrap();
        assert!(!path.contains(&(0, 0)));
        assert_eq!(path.len(), 6);
        assert_eq!(*path.last().unwrap(), (3, 3));
    }
}
