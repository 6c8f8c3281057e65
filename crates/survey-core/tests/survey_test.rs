//! End-to-end checks of grid generation and mission encoding.
//!
//! Run with: cargo test -p survey-core --test survey_test

use survey_core::{
    count_commands, encode_mission, generate_grid_survey, point_in_polygon, CommandKind, GeoPoint,
    GridSurveyResult, SurveyError, SurveyParams,
};

fn unit_square() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0, 0.001),
        GeoPoint::new(0.001, 0.001),
        GeoPoint::new(0.001, 0.0),
    ]
}

/// Irregular field near Irvine, roughly 400 m across.
fn irvine_field() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(33.6800, -117.8300),
        GeoPoint::new(33.6805, -117.8262),
        GeoPoint::new(33.6832, -117.8258),
        GeoPoint::new(33.6838, -117.8281),
        GeoPoint::new(33.6821, -117.8304),
    ]
}

fn params(line_spacing_m: f64, speed_mps: f64) -> SurveyParams {
    SurveyParams {
        line_spacing_m,
        grid_angle_deg: 0.0,
        speed_mps,
        altitude_m: 60.0,
        include_speed_commands: true,
        hold_nose_position: false,
    }
}

fn home() -> GeoPoint {
    GeoPoint::new(33.6799, -117.8302)
}

fn sample_results() -> Vec<GridSurveyResult> {
    vec![
        generate_grid_survey(&unit_square(), &params(30.0, 10.0)).unwrap(),
        generate_grid_survey(&irvine_field(), &params(25.0, 12.0)).unwrap(),
        generate_grid_survey(&irvine_field(), &params(40.0, 0.0)).unwrap(),
        generate_grid_survey(&irvine_field()[..2], &params(25.0, 12.0)).unwrap(),
    ]
}

#[test]
fn degenerate_polygons_produce_nothing() {
    let polygon = unit_square();
    for n in 0..3 {
        let result = generate_grid_survey(&polygon[..n], &params(30.0, 10.0)).unwrap();
        assert_eq!(result.num_lines, 0);
        assert!(result.waypoints.is_empty());
        assert_eq!(result.total_distance_m, 0.0);
        assert_eq!(result.estimated_time_s, 0.0);
    }
}

#[test]
fn count_commands_matches_encoding() {
    for result in sample_results() {
        assert_eq!(count_commands(&result), encode_mission(&result, home()).len());
    }
}

#[test]
fn only_first_command_is_current() {
    for result in sample_results() {
        let commands = encode_mission(&result, home());
        assert_eq!(commands[0].seq, 0);
        assert!(commands[0].current);
        assert_eq!(commands.iter().filter(|c| c.current).count(), 1);
    }
}

#[test]
fn mission_ends_with_bare_rtl() {
    for result in sample_results() {
        let commands = encode_mission(&result, home());
        let last = commands.last().unwrap();
        assert_eq!(last.command, CommandKind::ReturnToLaunch);
        assert_eq!((last.x, last.y), (0, 0));
        assert_eq!(last.position(), None);
    }
}

#[test]
fn sequence_numbers_are_contiguous() {
    for result in sample_results() {
        let commands = encode_mission(&result, home());
        let seqs: Vec<u32> = commands.iter().map(|c| c.seq).collect();
        let expected: Vec<u32> = (0..commands.len() as u32).collect();
        assert_eq!(seqs, expected);
    }
}

#[test]
fn encoding_is_deterministic() {
    for result in sample_results() {
        let first = serde_json::to_vec(&encode_mission(&result, home())).unwrap();
        let second = serde_json::to_vec(&encode_mission(&result, home())).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn consecutive_lines_alternate() {
    let result = generate_grid_survey(&irvine_field(), &params(25.0, 12.0)).unwrap();
    assert!(result.num_lines >= 2);

    for (line, pair) in result.grid_lines.iter().zip(result.waypoints.chunks(2)) {
        let (start, end) = (&pair[0], &pair[1]);
        assert_eq!(start.line_index, end.line_index);
        if start.line_index % 2 == 0 {
            assert_eq!(start.position, line.start);
            assert_eq!(end.position, line.end);
        } else {
            assert_eq!(start.position, line.end);
            assert_eq!(end.position, line.start);
        }
    }

    // Surviving sweeps are consecutive here, so directions strictly alternate.
    let firsts: Vec<usize> = result.waypoints.iter().step_by(2).map(|wp| wp.line_index).collect();
    for pair in firsts.windows(2) {
        assert_eq!(pair[1], pair[0] + 1);
    }
}

#[test]
fn square_waypoints_stay_inside() {
    let polygon = unit_square();
    let result = generate_grid_survey(&polygon, &params(30.0, 10.0)).unwrap();
    assert!(result.num_lines >= 1);
    for wp in &result.waypoints {
        assert!(point_in_polygon(wp.position, &polygon), "{wp:?} outside");
    }
}

#[test]
fn spacing_wider_than_diagonal_gives_one_line() {
    // Diagonal of the square is ~157 m.
    let result = generate_grid_survey(&unit_square(), &params(200.0, 10.0)).unwrap();
    assert_eq!(result.num_lines, 1);

    let commands = encode_mission(&result, home());
    let speed_changes = commands
        .iter()
        .filter(|c| c.command == CommandKind::ChangeSpeed)
        .count();
    assert_eq!(speed_changes, 1);
}

#[test]
fn zero_speed_emits_no_speed_changes() {
    let result = generate_grid_survey(&irvine_field(), &params(30.0, 0.0)).unwrap();
    assert!(result.num_lines > 0);
    assert_eq!(result.estimated_time_s, 0.0);

    let commands = encode_mission(&result, home());
    assert!(commands.iter().all(|c| c.command != CommandKind::ChangeSpeed));
}

#[test]
fn speed_change_once_per_line() {
    let result = generate_grid_survey(&irvine_field(), &params(25.0, 12.0)).unwrap();
    let commands = encode_mission(&result, home());
    let speed_changes = commands
        .iter()
        .filter(|c| c.command == CommandKind::ChangeSpeed)
        .count();
    assert_eq!(speed_changes, result.num_lines);

    // Each speed change sits directly before a line-start waypoint.
    for (idx, command) in commands.iter().enumerate() {
        if command.command == CommandKind::ChangeSpeed {
            assert_eq!(commands[idx + 1].command, CommandKind::Waypoint);
            assert_eq!(command.param2, 12.0);
        }
    }
}

#[test]
fn triangle_never_fails_and_labels_area() {
    let triangle = vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0, 0.01),
        GeoPoint::new(0.01, 0.0),
    ];
    let result = generate_grid_survey(&triangle, &params(50.0, 10.0)).unwrap();
    assert!(result.num_lines > 0);
    assert_eq!(result.polygon_area_label, "152.8 acres");

    let small = vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0, 0.0004),
        GeoPoint::new(0.0003, 0.0),
    ];
    let result = generate_grid_survey(&small, &params(10.0, 5.0)).unwrap();
    assert_eq!(result.polygon_area_label, "7985 ft²");
}

#[test]
fn non_positive_spacing_is_rejected() {
    for spacing in [0.0, -10.0, f64::NAN] {
        let err = generate_grid_survey(&unit_square(), &params(spacing, 10.0)).unwrap_err();
        assert!(
            matches!(err, SurveyError::InvalidParameter { .. }),
            "unexpected error {err:?}"
        );
    }
}

#[test]
fn waypoint_positions_decode_close_to_source() {
    let result = generate_grid_survey(&irvine_field(), &params(30.0, 10.0)).unwrap();
    let commands = encode_mission(&result, home());
    let decoded: Vec<GeoPoint> = commands
        .iter()
        .skip(2)
        .filter(|c| c.command == CommandKind::Waypoint)
        .filter_map(|c| c.position())
        .collect();

    assert_eq!(decoded.len(), result.waypoints.len());
    for (decoded, wp) in decoded.iter().zip(&result.waypoints) {
        assert!((decoded.lat - wp.position.lat).abs() < 2e-7);
        assert!((decoded.lon - wp.position.lon).abs() < 2e-7);
    }
}
