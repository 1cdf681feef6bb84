//! Snapshot tour planner for a differential-drive robot.
//!
//! Given a bounded grid arena and a set of oriented obstacles, the planner
//! chooses one camera pose per obstacle and a visit order, produces the full
//! kinematically valid cell path (straight segments plus quarter-circle
//! turns) and compiles it into the firmware command stream.

pub mod cli;
pub mod commands;
pub mod model;
pub mod planner;
pub mod ui;
