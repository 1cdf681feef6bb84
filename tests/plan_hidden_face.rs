mod common;

use common::{assert_key_path_legal, request, snap_commands};
use rover_snap_planner::cli::execute;

#[test]
fn hidden_face_is_photographed_from_the_cheapest_side() {
    let req = request((1, 1, 0), &[(1, 10, 10, -1)], false);
    let response = execute(&req).expect("planning failed");

    assert_eq!(snap_commands(&response), vec!["SNAP1"]);

    // All four faces are viewable mid-arena; the winner must be one of the
    // four penalty-free poses directly in front of a side.
    let last = response.path.last().expect("empty path");
    assert_eq!(last.s, 1);

    let primaries = [(10, 11, 4), (11, 10, 6), (10, 9, 0), (9, 10, 2)];
    assert!(
        primaries.contains(&(last.x, last.y, last.d)),
        "tour ended on a misaligned pose: {:?}",
        (last.x, last.y, last.d)
    );

    assert!(response.distance > 0.0);
    assert_key_path_legal(&response.path, 3);
}
