use std::fs;

use rover_snap_planner::cli::execute;
use rover_snap_planner::model::PlanRequest;

#[test]
fn request_file_round_trips_through_the_planner() {
    let dir = tempfile::tempdir().expect("no temp dir");
    let input_path = dir.path().join("input.json");
    let output_path = dir.path().join("output.json");

    fs::write(
        &input_path,
        r#"{
            "robot_x": 1,
            "robot_y": 1,
            "robot_dir": 0,
            "obstacles": [{"id": 1, "x": 10, "y": 10, "d": 0}]
        }"#,
    )
    .expect("cannot write request");

    let raw = fs::read_to_string(&input_path).expect("cannot read request");
    let request: PlanRequest = serde_json::from_str(&raw).expect("malformed request");
    let response = execute(&request).expect("planning failed");

    let rendered = serde_json::to_string_pretty(&response).expect("cannot encode");
    fs::write(&output_path, rendered).expect("cannot write response");

    let reread: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).expect("cannot read response"))
            .expect("response is not JSON");

    let commands = reread["commands"].as_array().expect("commands missing");
    assert_eq!(commands.last().and_then(|v| v.as_str()), Some("FIN"));
    assert!(reread["distance"].as_f64().expect("distance missing") > 0.0);

    let path = reread["path"].as_array().expect("path missing");
    let last = path.last().expect("empty path");
    assert_eq!(last["x"], 10);
    assert_eq!(last["y"], 11);
    assert_eq!(last["d"], 4);
    assert_eq!(last["s"], 1);
}

#[test]
fn missing_fields_are_rejected_at_parse_time() {
    let raw = r#"{"robot_x": 1, "robot_y": 1, "obstacles": []}"#;
    let parsed: Result<PlanRequest, _> = serde_json::from_str(raw);
    assert!(parsed.is_err());
}
