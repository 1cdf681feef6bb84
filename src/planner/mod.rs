//! Snapshot tour planning pipeline.
//!
//! One planning request flows through the modules in order: the arena is
//! populated (`grid`), snapshot candidates are generated per obstacle
//! (`candidates`), the order optimizer (`order`) queries the memoized A*
//! oracle (`search`, which expands moves via `expand` and validates arc
//! turns via `turning`) and solves a small open TSP (`tsp`) to pick one
//! candidate per obstacle and the visit order. The realized cell path is
//! returned together with the compiled firmware command stream.

pub mod candidates;
pub mod expand;
pub mod grid;
pub mod heading;
pub mod order;
pub mod search;
pub mod tsp;
pub mod turning;

use anyhow::Result;
use log::{debug, info, warn};

use crate::commands;
use crate::planner::grid::{Grid, Obstacle};
use crate::planner::heading::Heading;

pub const ARENA_WIDTH: i32 = 20;
pub const ARENA_HEIGHT: i32 = 20;

/// Tunables of the planning pipeline.
///
/// The defaults are the calibrated values for the physical robot; tests
/// override individual fields (notably `turn_radius`) to probe geometry
/// edge cases.
#[derive(Debug, Clone, Copy)]
pub struct PlanOptions {
    /// Radius of a quarter-circle turn, in cells.
    pub turn_radius: i32,

    /// Weight applied to rotational distance in the A* edge cost.
    pub turn_factor: u32,

    /// Flat additive cost per arc turn, so straight motion wins ties.
    pub turn_penalty: u32,

    /// Soft penalty for skirting close to an obstacle.
    pub safe_cost: u32,

    /// Penalty per unit of camera misalignment (distance beyond the primary
    /// offset, lateral shift) of a snapshot candidate.
    pub snapshot_penalty: u32,

    /// Budget for candidate-choice enumeration inside one subset mask.
    pub combination_budget: usize,

    /// Relaxed planning: admit laterally offset snapshot candidates so a
    /// tour is more likely, at the cost of picture quality.
    pub retrying: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            turn_radius: 3,
            turn_factor: 2,
            turn_penalty: 10,
            safe_cost: 2,
            snapshot_penalty: 50,
            combination_budget: 5000,
            retrying: false,
        }
    }
}

/// A robot configuration: cell plus heading.
///
/// Equality and hashing are exactly (x, y, dir); snapshot metadata lives on
/// [`PathCell`] instead so memoization and the A* closed set never split
/// states on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pose {
    pub x: i32,
    pub y: i32,
    pub dir: Heading,
}

impl Pose {
    pub fn new(x: i32, y: i32, dir: Heading) -> Self {
        Self { x, y, dir }
    }
}

/// One cell of the realized tour. `snapshot` is set on the final cell of a
/// leg that ends at a snapshot candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCell {
    pub x: i32,
    pub y: i32,
    pub dir: Heading,
    pub snapshot: Option<i32>,
}

impl PathCell {
    pub fn from_pose(pose: Pose) -> Self {
        Self {
            x: pose.x,
            y: pose.y,
            dir: pose.dir,
            snapshot: None,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.x, self.y, self.dir)
    }
}

/// Result of one planning request.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Compressed firmware command stream. Empty when no tour exists.
    pub commands: Vec<String>,

    /// Tour cost: travel plus the penalties of the chosen candidates.
    pub distance: f64,

    /// Key poses of the tour (filtered to segment endpoints and snapshots).
    pub path: Vec<PathCell>,

    /// Ids of obstacles dropped because no snapshot candidate was feasible.
    pub dropped: Vec<i32>,
}

impl Plan {
    fn empty(dropped: Vec<i32>) -> Self {
        Self {
            commands: Vec::new(),
            distance: 0.0,
            path: Vec::new(),
            dropped,
        }
    }
}

/// Plan a snapshot tour over `obstacles` starting from `start`.
///
/// Recoverable degradations (an obstacle with no feasible candidate, an
/// unreachable pose pair) shrink the solution instead of failing; an error
/// is returned only for internal invariant violations.
pub fn plan(start: Pose, obstacles: &[Obstacle], opts: &PlanOptions) -> Result<Plan> {
    let mut grid = Grid::new(ARENA_WIDTH, ARENA_HEIGHT);
    for ob in obstacles {
        grid.add_obstacle(*ob);
    }

    let generated = candidates::snapshot_groups(&grid, opts);
    for id in &generated.dropped {
        warn!("obstacle {} has no feasible snapshot candidate, dropping it", id);
    }

    if generated.groups.is_empty() {
        info!("no viewable obstacles, returning an empty tour");
        return Ok(Plan::empty(generated.dropped));
    }

    let mut tables = search::PathTables::default();
    let outcome = order::optimal_visit_order(&grid, opts, &mut tables, start, &generated.groups)?;

    let Some(tour) = outcome else {
        info!("no feasible tour over any obstacle subset, returning an empty tour");
        return Ok(Plan::empty(generated.dropped));
    };

    debug!(
        "tour over {} cells, cost {:.1} ({} obstacle groups)",
        tour.path.len(),
        tour.distance,
        generated.groups.len()
    );

    let key_states = commands::filter_key_states(&tour.path);
    let stream = commands::compress(commands::compile(&key_states));

    Ok(Plan {
        commands: stream,
        distance: tour.distance,
        path: key_states,
        dropped: generated.dropped,
    })
}
