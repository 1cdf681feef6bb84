//! Memoized A* oracle over the (x, y, heading) state space.
//!
//! Pairwise queries between snapshot candidates dominate the planner's
//! runtime, and the optimizer asks for the same pairs across many subset
//! masks, so every solved pair is recorded in both directions. Motion is
//! cost-symmetric (a backward step mirrors a forward step, arc turns mirror
//! in the opposite sense), so the reverse entry is the same cost with the
//! reversed cell sequence.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use log::trace;

use crate::planner::expand;
use crate::planner::grid::Grid;
use crate::planner::heading::{Heading, rotation_cost};
use crate::planner::{PlanOptions, Pose};

/// Memo tables for pairwise costs and cell paths, owned by one planning
/// request.
#[derive(Debug, Default)]
pub struct PathTables {
    cost: HashMap<(Pose, Pose), u32>,
    path: HashMap<(Pose, Pose), Vec<Pose>>,
}

impl PathTables {
    pub fn cost(&self, u: Pose, v: Pose) -> Option<u32> {
        self.cost.get(&(u, v)).copied()
    }

    pub fn path(&self, u: Pose, v: Pose) -> Option<&[Pose]> {
        self.path.get(&(u, v)).map(Vec::as_slice)
    }

    fn contains(&self, u: Pose, v: Pose) -> bool {
        self.path.contains_key(&(u, v))
    }

    fn record(&mut self, u: Pose, v: Pose, cost: u32, path: Vec<Pose>) {
        let mut reversed = path.clone();
        reversed.reverse();

        self.cost.insert((u, v), cost);
        self.cost.insert((v, u), cost);
        self.path.insert((u, v), path);
        self.path.insert((v, u), reversed);
    }
}

/// Solve every unordered pose pair in `poses`, filling the tables.
///
/// Pairs with no kinematically valid path are left absent; the optimizer
/// treats missing entries as infeasible edges.
pub fn populate_pairs(
    tables: &mut PathTables,
    grid: &Grid,
    opts: &PlanOptions,
    poses: &[Pose],
) {
    for i in 0..poses.len() {
        for j in (i + 1)..poses.len() {
            let (u, v) = (poses[i], poses[j]);
            if u == v || tables.contains(u, v) {
                continue;
            }

            if let Some((path, cost)) = astar(grid, opts, u, v) {
                tables.record(u, v, cost, path);
            } else {
                trace!(
                    "no path between ({},{},{:?}) and ({},{},{:?})",
                    u.x, u.y, u.dir, v.x, v.y, v.dir
                );
            }
        }
    }
}

/// State index into the dense per-state arrays: (y * W + x) * 4 + heading.
fn state_index(grid: &Grid, x: i32, y: i32, dir: Heading) -> usize {
    ((y * grid.width + x) as usize) * 4 + dir.index()
}

fn manhattan(ax: i32, ay: i32, bx: i32, by: i32) -> u32 {
    ((ax - bx).abs() + (ay - by).abs()) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    pose: Pose,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on f so the std max-heap pops the cheapest node; ties
        // break on coordinates for a deterministic expansion order.
        other
            .f
            .cmp(&self.f)
            .then_with(|| (other.pose.x, other.pose.y, other.pose.dir.index()).cmp(&(
                self.pose.x,
                self.pose.y,
                self.pose.dir.index(),
            )))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest-cost path from `start` to `goal`, or `None` when the open set
/// exhausts first.
///
/// Edge weight is `rotation_cost * turn_factor + 1 + step_cost`, with the
/// Manhattan distance as an admissible heuristic (every edge moves at least
/// one cell per unit of cost and rotation only adds).
pub fn astar(
    grid: &Grid,
    opts: &PlanOptions,
    start: Pose,
    goal: Pose,
) -> Option<(Vec<Pose>, u32)> {
    let states = (grid.width * grid.height) as usize * 4;
    let mut g = vec![u32::MAX; states];
    let mut visited = vec![false; states];
    let mut parent: Vec<Option<Pose>> = vec![None; states];

    let mut open = BinaryHeap::new();
    g[state_index(grid, start.x, start.y, start.dir)] = 0;
    open.push(OpenNode {
        f: manhattan(start.x, start.y, goal.x, goal.y),
        pose: start,
    });

    while let Some(OpenNode { pose, .. }) = open.pop() {
        let idx = state_index(grid, pose.x, pose.y, pose.dir);
        if visited[idx] {
            continue;
        }

        if pose == goal {
            return Some((reconstruct(grid, &parent, pose), g[idx]));
        }

        visited[idx] = true;
        let here = g[idx];

        for t in expand::neighbors(grid, opts, pose.x, pose.y, pose.dir) {
            let next_idx = state_index(grid, t.x, t.y, t.dir);
            if visited[next_idx] {
                continue;
            }

            let move_cost = rotation_cost(t.dir, pose.dir) * opts.turn_factor + 1 + t.step_cost;
            let tentative = here + move_cost;

            if tentative < g[next_idx] {
                g[next_idx] = tentative;
                parent[next_idx] = Some(pose);
                open.push(OpenNode {
                    f: tentative + manhattan(t.x, t.y, goal.x, goal.y),
                    pose: Pose::new(t.x, t.y, t.dir),
                });
            }
        }
    }

    None
}

fn reconstruct(grid: &Grid, parent: &[Option<Pose>], end: Pose) -> Vec<Pose> {
    let mut path = vec![end];
    let mut cursor = end;

    while let Some(prev) = parent[state_index(grid, cursor.x, cursor.y, cursor.dir)] {
        path.push(prev);
        cursor = prev;
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::grid::Obstacle;
    use crate::planner::turning;

    fn open_grid() -> Grid {
        Grid::new(20, 20)
    }

    fn assert_legal(path: &[Pose], grid: &Grid, opts: &PlanOptions) {
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(grid.in_bounds(b.x, b.y), "cell out of bounds: {:?}", b);

            if a.dir == b.dir {
                let (dx, dy) = a.dir.unit();
                let step = (b.x - a.x, b.y - a.y);
                assert!(
                    step == (dx, dy) || step == (-dx, -dy),
                    "illegal straight step {:?} -> {:?}",
                    a,
                    b
                );
            } else {
                let land = turning::landing(a.x, a.y, a.dir, b.dir, opts.turn_radius);
                assert_eq!(land, Some((b.x, b.y)), "illegal turn {:?} -> {:?}", a, b);
            }
        }
    }

    #[test]
    fn straight_line_costs_one_per_cell() {
        let grid = open_grid();
        let opts = PlanOptions::default();

        let start = Pose::new(5, 5, Heading::North);
        let goal = Pose::new(5, 10, Heading::North);
        let (path, cost) = astar(&grid, &opts, start, goal).unwrap();

        assert_eq!(cost, 5);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_legal(&path, &grid, &opts);
    }

    #[test]
    fn backward_motion_is_as_cheap_as_forward() {
        let grid = open_grid();
        let opts = PlanOptions::default();

        let start = Pose::new(5, 10, Heading::North);
        let goal = Pose::new(5, 5, Heading::North);
        let (_, cost) = astar(&grid, &opts, start, goal).unwrap();
        assert_eq!(cost, 5);
    }

    #[test]
    fn tables_are_symmetric() {
        let grid = open_grid();
        let opts = PlanOptions::default();
        let mut tables = PathTables::default();

        let u = Pose::new(1, 1, Heading::North);
        let v = Pose::new(5, 5, Heading::East);
        populate_pairs(&mut tables, &grid, &opts, &[u, v]);

        assert_eq!(tables.cost(u, v), tables.cost(v, u));
        let forward = tables.path(u, v).unwrap().to_vec();
        let mut backward = tables.path(v, u).unwrap().to_vec();
        backward.reverse();
        assert_eq!(forward, backward);

        assert_eq!(forward.first(), Some(&u));
        assert_eq!(forward.last(), Some(&v));
        assert_legal(&forward, &grid, &opts);
    }

    #[test]
    fn unreachable_goal_leaves_no_entry() {
        let mut grid = open_grid();
        // Wall the start into the south-west corner pocket.
        for x in 1..=3 {
            grid.add_obstacle(Obstacle {
                id: x,
                x,
                y: 3,
                face: Some(Heading::North),
            });
        }
        for y in 1..=2 {
            grid.add_obstacle(Obstacle {
                id: 10 + y,
                x: 3,
                y,
                face: Some(Heading::North),
            });
        }
        let opts = PlanOptions::default();
        let mut tables = PathTables::default();

        let u = Pose::new(1, 1, Heading::North);
        let v = Pose::new(10, 10, Heading::North);
        populate_pairs(&mut tables, &grid, &opts, &[u, v]);

        assert_eq!(tables.cost(u, v), None);
        assert_eq!(tables.cost(v, u), None);
    }

    #[test]
    fn detours_around_a_blocking_cell() {
        let mut grid = open_grid();
        grid.add_obstacle(Obstacle {
            id: 1,
            x: 5,
            y: 7,
            face: Some(Heading::North),
        });
        let opts = PlanOptions::default();

        let start = Pose::new(5, 5, Heading::North);
        let goal = Pose::new(5, 10, Heading::North);
        let (path, cost) = astar(&grid, &opts, start, goal).unwrap();

        assert!(cost > 5);
        assert!(path.iter().all(|p| (p.x, p.y) != (5, 7)));
        assert_legal(&path, &grid, &opts);
    }
}
