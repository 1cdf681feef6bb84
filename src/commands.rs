//! Firmware command stream compilation.
//!
//! The realized tour is a dense cell-by-cell path. The firmware wants a
//! compact operator stream instead: straight runs collapsed to a single
//! `SF`/`SB` token with the displacement in centimetres, quarter turns as
//! one of `RF`/`RB`/`LF`/`LB` with a fixed 090-degree payload, `SNAP<id>`
//! after every picture pose and a terminating `FIN`.

use crate::planner::PathCell;
use crate::planner::heading::Heading;

/// Reduce a dense path to its key poses: the start, every snapshot pose,
/// the end of every straight run, and every turn landing that leads to
/// further motion.
pub fn filter_key_states(path: &[PathCell]) -> Vec<PathCell> {
    let Some(&first) = path.first() else {
        return Vec::new();
    };

    let mut filtered = vec![first];
    let mut i = 1;

    while i < path.len() {
        let current = path[i];
        let prev = filtered[filtered.len() - 1];

        if current.snapshot.is_some() {
            filtered.push(current);
            i += 1;
            continue;
        }

        if current.dir == prev.dir {
            // Scan to the end of the straight run.
            let mut end = i;
            while end < path.len() - 1 {
                let next = path[end + 1];
                if next.dir != current.dir || next.snapshot.is_some() {
                    break;
                }
                end += 1;
            }

            let end_state = path[end];
            if end_state.x != prev.x || end_state.y != prev.y {
                filtered.push(end_state);
            }
            i = end + 1;
            continue;
        }

        // Turn landing: keep it only when something moves afterwards.
        let mut next_idx = i + 1;
        while next_idx < path.len() {
            let next = path[next_idx];
            if next.x != current.x || next.y != current.y || next.snapshot.is_some() {
                filtered.push(current);
                break;
            }
            if next.dir != current.dir {
                break;
            }
            next_idx += 1;
        }

        i += 1;
    }

    filtered
}

/// Translate a filtered pose sequence into the raw command stream.
pub fn compile(path: &[PathCell]) -> Vec<String> {
    let Some(&first) = path.first() else {
        return Vec::new();
    };

    let mut commands = Vec::new();
    let mut current_direction = first.dir;
    let (mut start_x, mut start_y) = (first.x, first.y);

    for state in &path[1..] {
        let dx = state.x - start_x;
        let dy = state.y - start_y;

        if state.dir != current_direction {
            if let Some(token) = turn_token(current_direction, state.dir, dx, dy) {
                commands.push(token.to_string());
            }

            if let Some(id) = state.snapshot {
                commands.push(format!("SNAP{id}"));
            }

            start_x = state.x;
            start_y = state.y;
            current_direction = state.dir;
            continue;
        }

        let distance = dx.abs().max(dy.abs()) * 10;
        if is_forward(current_direction, dx, dy) {
            commands.push(format!("SF{distance:03}"));
        } else {
            commands.push(format!("SB{distance:03}"));
        }

        if let Some(id) = state.snapshot {
            commands.push(format!("SNAP{id}"));
        }

        start_x = state.x;
        start_y = state.y;
    }

    commands.push("FIN".to_string());
    commands
}

/// Sum the payloads of adjacent motion commands sharing a prefix
/// (`SF050 SF020` becomes `SF070`, back-to-back same-sense turns add up).
/// `SNAP` and `FIN` break runs.
pub fn compress(commands: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(commands.len());

    for cmd in commands {
        let merged = match (out.last().and_then(|l| split_motion(l)), split_motion(&cmd)) {
            (Some((prev_prefix, prev_value)), Some((prefix, value))) if prev_prefix == prefix => {
                Some(format!("{prefix}{:03}", prev_value + value))
            }
            _ => None,
        };

        match merged {
            Some(m) => {
                let last = out.len() - 1;
                out[last] = m;
            }
            None => out.push(cmd),
        }
    }

    out
}

/// Classify a quarter-turn segment.
///
/// The token combines the turn sense with the travel direction: a clockwise
/// heading change driven forward is `RF`, driven in reverse it is `LB`; a
/// counterclockwise change is `LF` forward and `RB` in reverse. The travel
/// direction is read off the displacement along the old heading's axis.
fn turn_token(from: Heading, to: Heading, dx: i32, dy: i32) -> Option<&'static str> {
    use Heading::*;

    if from.clockwise() == to {
        let forward = match from {
            North => dx > 0,
            East => dy < 0,
            South => dx < 0,
            West => dy > 0,
        };
        Some(if forward { "RF090" } else { "LB090" })
    } else if from.counterclockwise() == to {
        let forward = match from {
            North => dx < 0,
            East => dy > 0,
            South => dx > 0,
            West => dy < 0,
        };
        Some(if forward { "LF090" } else { "RB090" })
    } else {
        None
    }
}

fn is_forward(dir: Heading, dx: i32, dy: i32) -> bool {
    match dir {
        Heading::North => dy > 0,
        Heading::East => dx > 0,
        Heading::South => dy < 0,
        Heading::West => dx < 0,
    }
}

fn split_motion(cmd: &str) -> Option<(&str, u32)> {
    const MOTION_PREFIXES: [&str; 6] = ["SF", "SB", "RF", "RB", "LF", "LB"];

    let prefix = cmd.get(..2)?;
    if !MOTION_PREFIXES.contains(&prefix) {
        return None;
    }

    let value: u32 = cmd.get(2..)?.parse().ok()?;
    Some((prefix, value))
}
