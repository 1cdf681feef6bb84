//! Visit-order optimization.
//!
//! The optimizer walks obstacle subset masks from largest to smallest. For
//! each mask it enumerates one-candidate-per-obstacle choices (bounded by
//! the combination budget), prices every choice with the memoized A* oracle
//! and an open TSP, and keeps the cheapest tour. As soon as a popcount tier
//! produces any feasible tour the search stops: visiting more obstacles
//! always beats a cheaper tour over fewer.

use anyhow::{Context, Result, ensure};
use log::debug;

use crate::planner::candidates::CandidateGroup;
use crate::planner::grid::Grid;
use crate::planner::search::PathTables;
use crate::planner::tsp::{self, DistanceMatrix};
use crate::planner::{PathCell, PlanOptions, Pose, search};

/// A realized tour: full cell path plus its total cost (travel and
/// candidate penalties).
#[derive(Debug, Clone)]
pub struct Tour {
    pub path: Vec<PathCell>,
    pub distance: f64,
}

/// Pose chosen for one tour node, with the screenshot id to tag on arrival
/// (-1 for the start node, which photographs nothing).
#[derive(Debug, Clone, Copy)]
struct TourNode {
    pose: Pose,
    screenshot_id: i32,
}

/// Pick one candidate per obstacle and a visit order minimizing total cost.
///
/// Returns `None` when no non-empty subset of obstacles admits a tour.
pub fn optimal_visit_order(
    grid: &Grid,
    opts: &PlanOptions,
    tables: &mut PathTables,
    start: Pose,
    groups: &[CandidateGroup],
) -> Result<Option<Tour>> {
    let n = groups.len();

    let mut best_distance = f64::INFINITY;
    let mut best_path: Vec<PathCell> = Vec::new();

    for tier in (1..=n as u32).rev() {
        for mask in 1u32..(1 << n) {
            if mask.count_ones() != tier {
                continue;
            }

            let selected: Vec<&CandidateGroup> = groups
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, g)| g)
                .collect();

            let mut poses = vec![start];
            for group in &selected {
                poses.extend(group.candidates.iter().map(|c| c.pose));
            }
            search::populate_pairs(tables, grid, opts, &poses);

            let mut budget = opts.combination_budget;
            let choices = candidate_choices(&selected, &mut budget);
            debug!(
                "mask {:#b}: {} groups, {} candidate choices",
                mask,
                selected.len(),
                choices.len()
            );

            for choice in &choices {
                let mut nodes = vec![TourNode {
                    pose: start,
                    screenshot_id: -1,
                }];
                let mut fixed_penalty = 0u32;

                for (group_idx, &cand_idx) in choice.iter().enumerate() {
                    let group = selected[group_idx];
                    let cand = group.candidates[cand_idx];
                    nodes.push(TourNode {
                        pose: cand.pose,
                        screenshot_id: group.screenshot_id,
                    });
                    fixed_penalty += cand.penalty;
                }

                let matrix = build_matrix(tables, &nodes)?;
                let (permutation, tsp_cost) = tsp::solve_dynamic_programming(&matrix);
                if tsp_cost >= tsp::INFEASIBLE {
                    continue;
                }

                let total = tsp_cost + fixed_penalty as f64;
                if total >= best_distance {
                    continue;
                }

                best_distance = total;
                best_path = unpack_tour(tables, &nodes, &permutation)?;
            }
        }

        // A feasible tour at this tier visits more obstacles than anything
        // a smaller mask could produce.
        if !best_path.is_empty() {
            break;
        }
    }

    if best_path.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Tour {
            path: best_path,
            distance: best_distance,
        }))
    }
}

/// Enumerate one-candidate-per-group index vectors, spending one unit of
/// budget per expanded prefix so pathological fan-outs stay bounded.
fn candidate_choices(groups: &[&CandidateGroup], budget: &mut usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(groups.len());
    expand_choice(groups, 0, &mut current, &mut out, budget);
    out
}

fn expand_choice(
    groups: &[&CandidateGroup],
    index: usize,
    current: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
    budget: &mut usize,
) {
    if index == groups.len() {
        out.push(current.clone());
        return;
    }

    if *budget == 0 {
        return;
    }
    *budget -= 1;

    for cand_idx in 0..groups[index].candidates.len() {
        current.push(cand_idx);
        expand_choice(groups, index + 1, current, out, budget);
        current.pop();
    }
}

fn build_matrix(tables: &PathTables, nodes: &[TourNode]) -> Result<DistanceMatrix> {
    let n = nodes.len();
    let mut matrix = DistanceMatrix::new(n);

    for s in 0..n {
        for e in (s + 1)..n {
            let (u, v) = (nodes[s].pose, nodes[e].pose);

            let weight = if u == v {
                0.0
            } else {
                let forward = tables.cost(u, v);
                ensure!(
                    forward == tables.cost(v, u),
                    "cost table asymmetry between {:?} and {:?}",
                    u,
                    v
                );
                forward.map(f64::from).unwrap_or(tsp::INFEASIBLE)
            };

            matrix.set(s, e, weight);
            matrix.set(e, s, weight);
        }
    }

    matrix.zero_column(0);
    Ok(matrix)
}

/// Concatenate the stored legs of the winning permutation into one cell
/// path, tagging each leg's final cell with its screenshot id.
fn unpack_tour(
    tables: &PathTables,
    nodes: &[TourNode],
    permutation: &[usize],
) -> Result<Vec<PathCell>> {
    let mut path = vec![PathCell::from_pose(nodes[0].pose)];

    for pair in permutation.windows(2) {
        let from = nodes[pair[0]].pose;
        let to = nodes[pair[1]];

        if from != to.pose {
            let leg = tables
                .path(from, to.pose)
                .context("tour leg missing from the path table")?;
            path.extend(leg[1..].iter().copied().map(PathCell::from_pose));
        }

        if let Some(last) = path.last_mut() {
            last.snapshot = Some(to.screenshot_id);
        }
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::candidates;
    use crate::planner::grid::Obstacle;
    use crate::planner::heading::Heading;

    fn setup(obstacles: &[(i32, i32, Heading)]) -> (Grid, Vec<CandidateGroup>) {
        let mut grid = Grid::new(20, 20);
        for (i, &(x, y, face)) in obstacles.iter().enumerate() {
            grid.add_obstacle(Obstacle {
                id: i as i32 + 1,
                x,
                y,
                face: Some(face),
            });
        }
        let generated = candidates::snapshot_groups(&grid, &PlanOptions::default());
        (grid, generated.groups)
    }

    #[test]
    fn single_obstacle_tour_ends_on_its_candidate() {
        let (grid, groups) = setup(&[(10, 10, Heading::North)]);
        let opts = PlanOptions::default();
        let mut tables = PathTables::default();
        let start = Pose::new(1, 1, Heading::North);

        let tour = optimal_visit_order(&grid, &opts, &mut tables, start, &groups)
            .unwrap()
            .unwrap();

        let last = tour.path.last().unwrap();
        assert_eq!((last.x, last.y, last.dir), (10, 11, Heading::South));
        assert_eq!(last.snapshot, Some(1));
        assert_eq!(tour.path[0].pose(), start);
        assert!(tour.distance > 0.0);
    }

    #[test]
    fn tour_visits_every_feasible_obstacle() {
        let (grid, groups) = setup(&[(5, 10, Heading::North), (15, 10, Heading::North)]);
        let opts = PlanOptions::default();
        let mut tables = PathTables::default();
        let start = Pose::new(1, 10, Heading::East);

        let tour = optimal_visit_order(&grid, &opts, &mut tables, start, &groups)
            .unwrap()
            .unwrap();

        let snaps: Vec<i32> = tour.path.iter().filter_map(|c| c.snapshot).collect();
        assert_eq!(snaps.len(), 2);
        assert!(snaps.contains(&1) && snaps.contains(&2));
    }

    #[test]
    fn choice_enumeration_respects_the_budget() {
        let (_, groups) = setup(&[(5, 10, Heading::North), (15, 10, Heading::North)]);
        let refs: Vec<&CandidateGroup> = groups.iter().collect();

        let mut budget = usize::MAX;
        let all = candidate_choices(&refs, &mut budget);
        assert_eq!(all.len(), 4);

        // One unit of budget expands only the first group's prefix.
        let mut tight = 1usize;
        let truncated = candidate_choices(&refs, &mut tight);
        assert!(truncated.len() < all.len());
    }
}
