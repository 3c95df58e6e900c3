mod common;

use std::io::Cursor;

use common::{fixture_graph, fixtures_dir};
use wayfarer_lib::{
    build_graph, load_routes, load_routes_from_path, load_traffic, load_traffic_from_path,
    parse_route_line, parse_traffic_line, Error, RouteCosts, RouteGraph,
};

#[test]
fn route_line_parses_every_cost() {
    let record = parse_route_line(1, "Guatemala|Antigua|30|300|5|2|45").expect("parses");

    assert_eq!(record.origin, "Guatemala");
    assert_eq!(record.destination, "Antigua");
    assert_eq!(
        record.costs,
        RouteCosts {
            vehicle_time: 30,
            walking_time: 300,
            fuel_cost: 5,
            physical_wear: 2,
            distance: 45,
        }
    );
}

#[test]
fn traffic_line_parses_window() {
    let record = parse_traffic_line(4, "A|B|7|9|80").expect("parses");

    assert_eq!(record.window.start_time, 7);
    assert_eq!(record.window.end_time, 9);
    assert_eq!(record.window.congestion_probability, 80);
}

#[test]
fn malformed_number_names_line_and_field() {
    let err = parse_route_line(12, "A|B|1|2|3|four|5").expect_err("bad wear");

    match err {
        Error::ParseFailure {
            line, field, value, ..
        } => {
            assert_eq!(line, 12);
            assert_eq!(field, "physical_wear");
            assert_eq!(value, "four");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn build_graph_registers_endpoints_first() {
    let records = vec![
        parse_route_line(1, "A|B|1|1|1|1|1").unwrap(),
        parse_route_line(2, "B|C|1|1|1|1|1").unwrap(),
        parse_route_line(3, "A|B|2|2|2|2|2").unwrap(),
    ];
    let graph = build_graph(&records).expect("builds");

    assert_eq!(graph.location_count(), 3);
    assert_eq!(graph.route_count(), 3);
}

#[test]
fn bad_records_are_rejected_without_aborting_the_batch() {
    let input = "A|B|1|1|1|1|5\nA|C|x|1|1|1|1\nB|C|1|1|1\n\nB|D|1|1|1|1|2\n";
    let mut graph = RouteGraph::new();
    let report = load_routes(&mut graph, Cursor::new(input)).expect("reader works");

    assert_eq!(report.accepted, 2);
    assert_eq!(report.rejected.len(), 2);
    assert_eq!(report.rejected[0].line, 2);
    assert!(matches!(report.rejected[0].error, Error::ParseFailure { .. }));
    assert_eq!(report.rejected[1].line, 3);
    assert!(matches!(
        report.rejected[1].error,
        Error::MalformedRecord { found: 5, .. }
    ));

    assert!(!graph.contains("C"), "rejected lines register nothing");
    assert_eq!(graph.route_count(), 2);
}

#[test]
fn fixture_routes_load_cleanly() {
    let mut graph = RouteGraph::new();
    let report = load_routes_from_path(&mut graph, &fixtures_dir().join("routes.txt"))
        .expect("fixture loads");

    assert!(report.is_clean());
    assert_eq!(report.accepted, 10);
}

#[test]
fn fixture_traffic_annotates_first_matching_route() {
    let mut graph = fixture_graph();
    let report = load_traffic_from_path(&mut graph, &fixtures_dir().join("traffic.txt"))
        .expect("fixture loads");

    assert_eq!(report.accepted, 3);
    assert_eq!(report.unmatched, 1);
    assert!(report.rejected.is_empty());
    assert!(!report.is_clean());

    let guatemala_antigua = graph
        .routes_from("Guatemala")
        .find(|route| route.destination().name() == "Antigua")
        .expect("route exists");
    let windows: Vec<(u32, u32, u32)> = guatemala_antigua
        .traffic_windows()
        .iter()
        .map(|window| {
            (
                window.start_time,
                window.end_time,
                window.congestion_probability,
            )
        })
        .collect();
    assert_eq!(windows, vec![(7, 9, 80), (8, 10, 60)]);
}

#[test]
fn missing_file_is_reported_with_path() {
    let mut graph = RouteGraph::new();
    let path = fixtures_dir().join("does-not-exist.txt");
    let err = load_routes_from_path(&mut graph, &path).expect_err("missing");

    assert!(matches!(err, Error::DataFileNotFound { path: ref missing } if *missing == path));
}

#[test]
fn malformed_traffic_is_rejected() {
    let mut graph = fixture_graph();
    let input = "Guatemala|Antigua|7|nine|80\n";
    let report = load_traffic(&mut graph, Cursor::new(input)).expect("reader works");

    assert_eq!(report.accepted, 0);
    assert_eq!(report.rejected.len(), 1);
}

#[test]
fn leading_hash_is_part_of_the_name() {
    let line = "#4 Avenida|Antigua|1|1|1|1|5";
    let parsed = parse_route_line(1, line).expect("single line parses");

    let mut graph = RouteGraph::new();
    let report = load_routes(&mut graph, Cursor::new(format!("{line}\n"))).expect("reader works");

    assert!(report.is_clean());
    assert_eq!(report.accepted, 1);
    assert_eq!(graph.route_count(), 1);
    assert!(graph.contains(&parsed.origin));
    assert!(graph.contains("#4 Avenida"));

    let traffic = "#4 Avenida|Antigua|6|8|30\n";
    let report = load_traffic(&mut graph, Cursor::new(traffic)).expect("reader works");
    assert_eq!(report.accepted, 1);
    assert_eq!(report.unmatched, 0);
    assert_eq!(graph.routes()[0].traffic_windows().len(), 1);
}

#[test]
fn traffic_report_splits_applied_unmatched_and_rejected() {
    let mut graph = fixture_graph();
    let input = "Guatemala|Antigua|7|9|80\nAntigua|Guatemala|7|9|80\nTecpan|Quetzaltenango|x|9|80\nTecpan|Quetzaltenango|1|2|3\n";
    let report = load_traffic(&mut graph, Cursor::new(input)).expect("reader works");

    assert_eq!(report.accepted, 2);
    assert_eq!(report.unmatched, 1);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].line, 3);
}
