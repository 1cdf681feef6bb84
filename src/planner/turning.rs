//! Quarter-circle turn geometry.
//!
//! A turn is a 90-degree heading change performed as a quarter arc of fixed
//! radius. Every turn belongs to one of four quadrants, named after the
//! diagonal the robot sweeps:
//!
//! * quadrant 1: N->E, W->S (down-right)
//! * quadrant 2: N->W, E->S (down-left)
//! * quadrant 3: S->W, E->N (up-left)
//! * quadrant 4: S->E, W->N (up-right)
//!
//! Headings 180 degrees apart are not turns. The quadrant fixes the landing
//! cell, the swept footprint and the anchor of the green area, a 3x3 corner
//! of the footprint the robot body never sweeps.

use crate::planner::grid::Obstacle;
use crate::planner::heading::Heading;

/// Quadrant of a 90-degree turn, or 0 when the pair is not a turn.
pub fn quadrant(from: Heading, to: Heading) -> u8 {
    use Heading::*;

    match (from, to) {
        (North, East) | (West, South) => 1,
        (North, West) | (East, South) => 2,
        (South, West) | (East, North) => 3,
        (South, East) | (West, North) => 4,
        _ => 0,
    }
}

/// Landing cell of a quarter turn started at (x, y).
///
/// The displacement is radius cells along the old heading plus radius cells
/// along the new one, which reproduces the per-quadrant offset table.
pub fn landing(x: i32, y: i32, from: Heading, to: Heading, radius: i32) -> Option<(i32, i32)> {
    if quadrant(from, to) == 0 {
        return None;
    }

    let (fx, fy) = from.unit();
    let (tx, ty) = to.unit();
    Some((x + (fx + tx) * radius, y + (fy + ty) * radius))
}

/// Axis-aligned cell rectangle swept by a turn, inflated by one cell for the
/// robot body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Footprint {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

pub fn footprint(x: i32, y: i32, from: Heading, to: Heading, radius: i32) -> Option<Footprint> {
    let (lx, ly) = landing(x, y, from, to, radius)?;

    Some(Footprint {
        min_x: x.min(lx) - 1,
        min_y: y.min(ly) - 1,
        max_x: x.max(lx) + 1,
        max_y: y.max(ly) + 1,
    })
}

/// Centre of the green area: the footprint corner outside the arc sweep.
fn green_anchor(x: i32, y: i32, from: Heading, to: Heading, radius: i32) -> Option<(i32, i32)> {
    let q = quadrant(from, to);
    let (lx, ly) = landing(x, y, from, to, radius)?;

    let anchor = match q {
        1 => (x.max(lx), y.min(ly)),
        2 => (x.min(lx), y.min(ly)),
        3 => (x.min(lx), y.max(ly)),
        4 => (x.max(lx), y.max(ly)),
        _ => return None,
    };

    Some(anchor)
}

/// Whether (px, py) falls inside the 3x3 green area of the turn.
///
/// The exemption only exists for radius >= 4; tighter arcs sweep the whole
/// footprint.
pub fn in_green_area(
    x: i32,
    y: i32,
    from: Heading,
    to: Heading,
    radius: i32,
    px: i32,
    py: i32,
) -> bool {
    if radius < 4 {
        return false;
    }

    let Some((gx, gy)) = green_anchor(x, y, from, to, radius) else {
        return false;
    };

    (px - gx).abs() <= 1 && (py - gy).abs() <= 1
}

/// Check the swept footprint of a turn against the obstacle set.
///
/// Every obstacle inside the footprint must lie in the green area. The
/// landing cell's own clearance is the caller's responsibility (it goes
/// through the same reachability predicate as straight moves).
pub fn turn_is_valid(
    obstacles: &[Obstacle],
    x: i32,
    y: i32,
    from: Heading,
    to: Heading,
    radius: i32,
) -> bool {
    let Some(area) = footprint(x, y, from, to, radius) else {
        return false;
    };

    obstacles.iter().all(|ob| {
        !area.contains(ob.x, ob.y) || in_green_area(x, y, from, to, radius, ob.x, ob.y)
    })
}
