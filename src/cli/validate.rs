// src/cli/validate.rs
use anyhow::{Result, bail};

use crate::model::PlanRequest;
use crate::planner::heading::Heading;
use crate::planner::{ARENA_HEIGHT, ARENA_WIDTH};

/// Largest obstacle count the exact tour solver is sized for.
pub const MAX_OBSTACLES: usize = 8;

/// Reject a malformed request before any planning work, naming the field.
pub fn validate_request(request: &PlanRequest) -> Result<()> {
    if Heading::from_code(request.robot_dir).is_none() {
        bail!(
            "robot_dir must be one of 0, 2, 4, 6 (got {})",
            request.robot_dir
        );
    }

    if !cell_in_margin(request.robot_x, request.robot_y) {
        bail!(
            "robot_x/robot_y must lie inside the arena margin (1..={}, 1..={}): got ({}, {})",
            ARENA_WIDTH - 2,
            ARENA_HEIGHT - 2,
            request.robot_x,
            request.robot_y
        );
    }

    if request.obstacles.len() > MAX_OBSTACLES {
        bail!(
            "obstacles: at most {} obstacles are supported (got {})",
            MAX_OBSTACLES,
            request.obstacles.len()
        );
    }

    for ob in &request.obstacles {
        if ob.d != -1 && Heading::from_code(ob.d).is_none() {
            bail!("obstacles[id={}].d must be 0, 2, 4, 6 or -1 (got {})", ob.id, ob.d);
        }

        if !cell_in_margin(ob.x, ob.y) {
            bail!(
                "obstacles[id={}] must lie strictly inside the arena: got ({}, {})",
                ob.id,
                ob.x,
                ob.y
            );
        }

        if ob.x == request.robot_x && ob.y == request.robot_y {
            bail!("obstacles[id={}] coincides with the robot start cell", ob.id);
        }
    }

    Ok(())
}

fn cell_in_margin(x: i32, y: i32) -> bool {
    x >= 1 && x <= ARENA_WIDTH - 2 && y >= 1 && y <= ARENA_HEIGHT - 2
}
