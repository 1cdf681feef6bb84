use rover_snap_planner::model::{ObstacleSpec, PathCellJson, PlanRequest, PlanResponse};
use rover_snap_planner::planner::heading::Heading;
use rover_snap_planner::planner::turning;

pub fn request(
    robot: (i32, i32, i32),
    obstacles: &[(i32, i32, i32, i32)],
    retrying: bool,
) -> PlanRequest {
    PlanRequest {
        robot_x: robot.0,
        robot_y: robot.1,
        robot_dir: robot.2,
        obstacles: obstacles
            .iter()
            .map(|&(id, x, y, d)| ObstacleSpec { id, x, y, d })
            .collect(),
        retrying,
    }
}

/// Every segment between consecutive key poses must be a legal maneuver:
/// a straight run along the shared heading axis, or one quarter arc whose
/// landing matches the turn table.
pub fn assert_key_path_legal(path: &[PathCellJson], radius: i32) {
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let da = Heading::from_code(a.d).expect("bad heading in path");
        let db = Heading::from_code(b.d).expect("bad heading in path");

        assert!(
            (1..=18).contains(&b.x) && (1..=18).contains(&b.y),
            "key pose outside the margin: ({}, {})",
            b.x,
            b.y
        );

        if da == db {
            let (ux, uy) = da.unit();
            let (dx, dy) = (b.x - a.x, b.y - a.y);
            assert!(
                dx * uy == dy * ux && (dx != 0 || dy != 0 || b.s != -1),
                "straight segment off the heading axis: ({},{}) -> ({},{})",
                a.x,
                a.y,
                b.x,
                b.y
            );
        } else {
            let landing = turning::landing(a.x, a.y, da, db, radius);
            assert_eq!(
                landing,
                Some((b.x, b.y)),
                "turn landing mismatch: ({},{},{}) -> ({},{},{})",
                a.x,
                a.y,
                a.d,
                b.x,
                b.y,
                b.d
            );
        }
    }
}

pub fn snap_commands(response: &PlanResponse) -> Vec<String> {
    response
        .commands
        .iter()
        .filter(|c| c.starts_with("SNAP"))
        .cloned()
        .collect()
}
