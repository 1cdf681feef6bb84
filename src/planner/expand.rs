//! Neighbor transitions of the (x, y, heading) state space.

use crate::planner::grid::Grid;
use crate::planner::heading::Heading;
use crate::planner::{PlanOptions, turning};

/// A transition to an adjacent state: target cell, new heading, and the step
/// cost on top of the base move cost (soft clearance, turn penalty).
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub x: i32,
    pub y: i32,
    pub dir: Heading,
    pub step_cost: u32,
}

/// All legal transitions out of (x, y, dir).
///
/// Straight motion moves one cell forward or backward along the heading; a
/// quarter turn lands radius cells away on both axes and must pass the
/// footprint check as well as the landing-cell clearance.
pub fn neighbors(grid: &Grid, opts: &PlanOptions, x: i32, y: i32, dir: Heading) -> Vec<Transition> {
    let mut out = Vec::with_capacity(4);
    let (dx, dy) = dir.unit();

    for (nx, ny) in [(x + dx, y + dy), (x - dx, y - dy)] {
        if grid.reachable(nx, ny, false) {
            out.push(Transition {
                x: nx,
                y: ny,
                dir,
                step_cost: grid.clearance_cost(nx, ny, opts),
            });
        }
    }

    for to in [dir.clockwise(), dir.counterclockwise()] {
        let Some((tx, ty)) = turning::landing(x, y, dir, to, opts.turn_radius) else {
            continue;
        };

        if grid.reachable(tx, ty, true)
            && turning::turn_is_valid(&grid.obstacles, x, y, dir, to, opts.turn_radius)
        {
            out.push(Transition {
                x: tx,
                y: ty,
                dir: to,
                step_cost: grid.clearance_cost(tx, ty, opts) + opts.turn_penalty,
            });
        }
    }

    out
}
