pub mod args;
pub mod validate;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;

use crate::model::{PlanRequest, PlanResponse};
use crate::planner::grid::Obstacle;
use crate::planner::heading::Heading;
use crate::planner::{self, PlanOptions, Pose};
use crate::ui;

pub fn run() -> Result<()> {
    let cli = args::Cli::parse();

    let raw = fs::read_to_string(&cli.input)
        .with_context(|| format!("cannot read request file {}", cli.input.display()))?;
    let request: PlanRequest = serde_json::from_str(&raw)
        .with_context(|| format!("malformed request in {}", cli.input.display()))?;

    validate::validate_request(&request)?;

    let response = execute(&request)?;

    let rendered = serde_json::to_string_pretty(&response).context("cannot encode the response")?;
    fs::write(&cli.output, rendered)
        .with_context(|| format!("cannot write response file {}", cli.output.display()))?;

    if response.commands.is_empty() {
        ui::warning("no feasible tour; wrote an empty command list");
    } else {
        ui::success(format!(
            "planned {} commands over {} key poses (distance {:.1})",
            response.commands.len(),
            response.path.len(),
            response.distance
        ));
    }

    Ok(())
}

/// Run one planning request end to end. Shared by the binary and the
/// integration tests.
pub fn execute(request: &PlanRequest) -> Result<PlanResponse> {
    let start = Pose::new(
        request.robot_x,
        request.robot_y,
        Heading::from_code(request.robot_dir).context("robot_dir already validated")?,
    );

    let obstacles: Vec<Obstacle> = request
        .obstacles
        .iter()
        .map(|ob| Obstacle {
            id: ob.id,
            x: ob.x,
            y: ob.y,
            face: Heading::from_code(ob.d),
        })
        .collect();

    let opts = PlanOptions {
        retrying: request.retrying,
        ..Default::default()
    };

    let plan = planner::plan(start, &obstacles, &opts)?;

    for id in &plan.dropped {
        ui::warning(format!(
            "obstacle {} has no feasible snapshot candidate and was skipped",
            id
        ));
    }

    Ok(PlanResponse::from(&plan))
}
