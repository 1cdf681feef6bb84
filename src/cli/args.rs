use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "planner",
    version,
    about = "Plan a snapshot tour for the rover over a JSON obstacle map",
    long_about = "\
Reads a planning request (robot pose plus oriented obstacles) from the input
file, computes the snapshot tour, and writes the command stream, the tour
distance and the key poses to the output file.

An infeasible request is not an error: the response then carries an empty
command list.
"
)]
pub struct Cli {
    /// Path to the JSON planning request
    pub input: PathBuf,

    /// Path the JSON planning response is written to
    pub output: PathBuf,
}
