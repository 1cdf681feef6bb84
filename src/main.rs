use anyhow::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    rover_snap_planner::cli::run()
}
