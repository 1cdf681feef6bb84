//! Snapshot candidate generation.
//!
//! For every obstacle the generator emits the poses from which the camera
//! can photograph the picture side: directly in front of the face at forward
//! offset 1 (the primary, penalty-free candidate) or 2, and, during retry
//! planning, shifted one cell sideways. The penalty grows with the camera
//! misalignment, so the optimizer only pays for a degraded shot when the
//! primary pose is expensive or infeasible.

use crate::planner::grid::Grid;
use crate::planner::heading::Heading;
use crate::planner::{PlanOptions, Pose};

/// A feasible snapshot pose with its quality penalty.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub pose: Pose,
    pub penalty: u32,
}

/// All feasible snapshot poses for one obstacle.
#[derive(Debug, Clone)]
pub struct CandidateGroup {
    pub screenshot_id: i32,
    pub candidates: Vec<Candidate>,
}

/// Candidate groups in obstacle order, plus the ids of obstacles that ended
/// up with no feasible candidate at all.
#[derive(Debug, Clone)]
pub struct GeneratedCandidates {
    pub groups: Vec<CandidateGroup>,
    pub dropped: Vec<i32>,
}

/// Forward offsets, in cells, between the obstacle and the camera pose.
const VIEW_OFFSETS: [i32; 2] = [1, 2];

/// Build one candidate group per obstacle, preserving obstacle order.
///
/// A hidden face expands to every face whose front cell is in bounds; the
/// candidates of all those faces share the obstacle's single group, so the
/// optimizer picks exactly one side to photograph.
pub fn snapshot_groups(grid: &Grid, opts: &PlanOptions) -> GeneratedCandidates {
    let mut groups = Vec::new();
    let mut dropped = Vec::new();

    for ob in &grid.obstacles {
        let mut candidates = Vec::new();

        for face in faces_to_consider(grid, ob.x, ob.y, ob.face) {
            candidates.extend(face_candidates(grid, opts, ob.x, ob.y, face));
        }

        if candidates.is_empty() {
            dropped.push(ob.id);
            continue;
        }

        candidates.sort_by_key(|c| c.penalty);
        groups.push(CandidateGroup {
            screenshot_id: ob.id,
            candidates,
        });
    }

    GeneratedCandidates { groups, dropped }
}

/// Faces the candidate generator considers for one obstacle. A face whose
/// front cell already falls outside the margin points off the arena and is
/// dropped here.
fn faces_to_consider(grid: &Grid, x: i32, y: i32, face: Option<Heading>) -> Vec<Heading> {
    let faces = match face {
        Some(f) => vec![f],
        None => Heading::ALL.to_vec(),
    };

    faces
        .into_iter()
        .filter(|f| {
            let (fx, fy) = f.unit();
            grid.in_bounds(x + fx, y + fy)
        })
        .collect()
}

fn face_candidates(
    grid: &Grid,
    opts: &PlanOptions,
    x: i32,
    y: i32,
    face: Heading,
) -> Vec<Candidate> {
    let (fx, fy) = face.unit();
    let (px, py) = face.perpendicular();

    let laterals: &[i32] = if opts.retrying { &[-1, 0, 1] } else { &[0] };

    let mut out = Vec::new();
    for &offset in &VIEW_OFFSETS {
        for &lateral in laterals {
            let cx = x + fx * offset + px * lateral;
            let cy = y + fy * offset + py * lateral;

            if !grid.reachable(cx, cy, false) {
                continue;
            }

            let misalignment = (offset - 1).unsigned_abs() + lateral.unsigned_abs();
            out.push(Candidate {
                pose: Pose::new(cx, cy, face.opposite()),
                penalty: opts.snapshot_penalty * misalignment,
            });
        }
    }

    out
}
