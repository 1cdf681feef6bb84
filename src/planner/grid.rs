//! Arena model: bounds, obstacle set and reachability predicates.

use crate::planner::PlanOptions;
use crate::planner::heading::Heading;

/// An oriented obstacle occupying exactly one grid cell.
///
/// `face` is the picture side the robot must photograph. `None` means the
/// side is unknown (hidden) and every geometrically valid face is considered
/// by the candidate generator.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub id: i32,
    pub x: i32,
    pub y: i32,
    pub face: Option<Heading>,
}

/// Rectangular grid arena with a one-cell safety margin on every edge.
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub obstacles: Vec<Obstacle>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            obstacles: Vec::new(),
        }
    }

    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// A cell the robot may occupy: one full cell away from every arena edge.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 1 && x <= self.width - 2 && y >= 1 && y <= self.height - 2
    }

    pub fn is_obstacle_cell(&self, x: i32, y: i32) -> bool {
        self.obstacles.iter().any(|ob| ob.x == x && ob.y == y)
    }

    /// Whether the robot may stand on (x, y).
    ///
    /// The cell must be in bounds and clear every obstacle cell by at least
    /// `clearance` (Chebyshev). The same rule applies to a turn's landing
    /// cell; the swept footprint of the arc is validated separately with the
    /// green-area exemption.
    pub fn reachable(&self, x: i32, y: i32, turn: bool) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }

        let clearance = if turn {
            MIN_TURN_CLEARANCE
        } else {
            MIN_CLEARANCE
        };

        self.obstacles
            .iter()
            .all(|ob| chebyshev(ob.x, ob.y, x, y) >= clearance)
    }

    /// Soft clearance cost: a small penalty for cells that pass close to an
    /// obstacle without violating the hard clearance. Applies at the
    /// Chebyshev offsets (1,2), (2,1) and (2,2).
    pub fn clearance_cost(&self, x: i32, y: i32, opts: &PlanOptions) -> u32 {
        for ob in &self.obstacles {
            let dx = (ob.x - x).abs();
            let dy = (ob.y - y).abs();

            if (dx == 2 && dy == 2) || (dx == 1 && dy == 2) || (dx == 2 && dy == 1) {
                return opts.safe_cost;
            }
        }

        0
    }
}

/// Minimum Chebyshev distance between the robot cell and any obstacle cell
/// for straight motion. One means the robot may stand adjacent to an
/// obstacle but never on top of it.
const MIN_CLEARANCE: i32 = 1;

/// Clearance required at the landing cell of an arc turn.
const MIN_TURN_CLEARANCE: i32 = 1;

pub fn chebyshev(ax: i32, ay: i32, bx: i32, by: i32) -> i32 {
    (ax - bx).abs().max((ay - by).abs())
}
