//! Wire types of the planning request and response.

use serde::{Deserialize, Serialize};

use crate::planner::{PathCell, Plan};

/// One planning request, as read from the input JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    pub robot_x: i32,
    pub robot_y: i32,

    /// Robot heading: 0 (N), 2 (E), 4 (S) or 6 (W).
    pub robot_dir: i32,

    pub obstacles: Vec<ObstacleSpec>,

    /// Relaxed planning: admit degraded snapshot poses so a tour is more
    /// likely on a second attempt.
    #[serde(default)]
    pub retrying: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ObstacleSpec {
    pub id: i32,
    pub x: i32,
    pub y: i32,

    /// Picture side: 0/2/4/6 as a heading, -1 when hidden.
    pub d: i32,
}

/// The planning response written to the output JSON file.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub commands: Vec<String>,
    pub distance: f64,
    pub path: Vec<PathCellJson>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PathCellJson {
    pub x: i32,
    pub y: i32,

    /// Heading encoding shared with the request.
    pub d: i32,

    /// Screenshot id taken at this pose, -1 for none.
    pub s: i32,
}

impl From<&PathCell> for PathCellJson {
    fn from(cell: &PathCell) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            d: cell.dir.code(),
            s: cell.snapshot.unwrap_or(-1),
        }
    }
}

impl From<&Plan> for PlanResponse {
    fn from(plan: &Plan) -> Self {
        Self {
            commands: plan.commands.clone(),
            distance: plan.distance,
            path: plan.path.iter().map(PathCellJson::from).collect(),
        }
    }
}
