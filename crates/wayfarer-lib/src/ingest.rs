//! Parsing of pipe-delimited route and traffic records.
//!
//! Route lines look like
//! `origin|destination|vehicleTime|walkingTime|gasConsumption|physicalWear|distance`
//! and traffic lines like `origin|destination|startTime|endTime|trafficProbability`.
//! Numeric fields are non-negative integers. A line that fails to parse is
//! rejected on its own; the rest of the batch is still ingested.

use std::fs;
use std::io::{ErrorKind, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::graph::{Location, Route, RouteCosts, RouteGraph};
use crate::traffic::{apply_traffic_records, TrafficWindow};

const ROUTE_FIELDS: [&str; 7] = [
    "origin",
    "destination",
    "vehicle_time",
    "walking_time",
    "gas_consumption",
    "physical_wear",
    "distance",
];

const TRAFFIC_FIELDS: [&str; 5] = [
    "origin",
    "destination",
    "start_time",
    "end_time",
    "traffic_probability",
];

/// One parsed route line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub origin: String,
    pub destination: String,
    pub costs: RouteCosts,
}

/// One parsed traffic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficRecord {
    pub origin: String,
    pub destination: String,
    pub window: TrafficWindow,
}

/// A line that could not be ingested.
#[derive(Debug)]
pub struct RejectedRecord {
    pub line: usize,
    pub error: Error,
}

/// Outcome of ingesting a batch of records.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Records parsed and applied to the graph.
    pub accepted: usize,
    /// Traffic records that parsed but matched no route.
    pub unmatched: usize,
    pub rejected: Vec<RejectedRecord>,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.unmatched == 0
    }
}

/// Parse a single route line. `line` is only used for error reporting.
pub fn parse_route_line(line: usize, text: &str) -> Result<RouteRecord> {
    let fields: Vec<&str> = text.split('|').map(str::trim).collect();
    route_from_fields(line, &fields)
}

/// Parse a single traffic line. `line` is only used for error reporting.
pub fn parse_traffic_line(line: usize, text: &str) -> Result<TrafficRecord> {
    let fields: Vec<&str> = text.split('|').map(str::trim).collect();
    traffic_from_fields(line, &fields)
}

fn route_from_fields(line: usize, fields: &[&str]) -> Result<RouteRecord> {
    require_fields(line, fields, ROUTE_FIELDS.len())?;
    let number = |idx: usize| parse_number(line, ROUTE_FIELDS[idx], fields[idx]);

    Ok(RouteRecord {
        origin: fields[0].to_string(),
        destination: fields[1].to_string(),
        costs: RouteCosts {
            vehicle_time: number(2)?,
            walking_time: number(3)?,
            fuel_cost: number(4)?,
            physical_wear: number(5)?,
            distance: number(6)?,
        },
    })
}

fn traffic_from_fields(line: usize, fields: &[&str]) -> Result<TrafficRecord> {
    require_fields(line, fields, TRAFFIC_FIELDS.len())?;
    let number = |idx: usize| parse_number(line, TRAFFIC_FIELDS[idx], fields[idx]);

    Ok(TrafficRecord {
        origin: fields[0].to_string(),
        destination: fields[1].to_string(),
        window: TrafficWindow {
            start_time: number(2)?,
            end_time: number(3)?,
            congestion_probability: number(4)?,
        },
    })
}

fn require_fields(line: usize, fields: &[&str], expected: usize) -> Result<()> {
    if fields.len() < expected {
        return Err(Error::MalformedRecord {
            line,
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

fn parse_number(line: usize, field: &'static str, value: &str) -> Result<u32> {
    value.parse::<u32>().map_err(|source| Error::ParseFailure {
        line,
        field,
        value: value.to_string(),
        source,
    })
}

/// Register both endpoints of `record`, then append its route.
pub fn insert_route_record(graph: &mut RouteGraph, record: &RouteRecord) -> Result<()> {
    graph.add_location(&record.origin);
    graph.add_location(&record.destination);
    graph.add_route(Route::new(
        Location::new(record.origin.as_str()),
        Location::new(record.destination.as_str()),
        record.costs,
    ))
}

/// Build a fresh graph from already parsed records.
pub fn build_graph<'a, I>(records: I) -> Result<RouteGraph>
where
    I: IntoIterator<Item = &'a RouteRecord>,
{
    let mut graph = RouteGraph::new();
    for record in records {
        insert_route_record(&mut graph, record)?;
    }
    Ok(graph)
}

fn record_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(reader)
}

fn record_line(record: &StringRecord) -> usize {
    record
        .position()
        .map(|position| position.line() as usize)
        .unwrap_or_default()
}

fn csv_error_line(error: &csv::Error) -> usize {
    error
        .position()
        .map(|position| position.line() as usize)
        .unwrap_or_default()
}

fn reject(report: &mut IngestReport, line: usize, error: Error) {
    warn!(line, %error, "rejecting record");
    report.rejected.push(RejectedRecord { line, error });
}

/// Ingest route lines from `reader` into `graph`.
pub fn load_routes<R: Read>(graph: &mut RouteGraph, reader: R) -> Result<IngestReport> {
    let mut report = IngestReport::default();
    for result in record_reader(reader).records() {
        let record = match result {
            Ok(record) => record,
            Err(error) => {
                reject(&mut report, csv_error_line(&error), Error::Csv(error));
                continue;
            }
        };

        let line = record_line(&record);
        let fields: Vec<&str> = record.iter().collect();
        match route_from_fields(line, &fields) {
            Ok(parsed) => {
                insert_route_record(graph, &parsed)?;
                report.accepted += 1;
            }
            Err(error) => reject(&mut report, line, error),
        }
    }

    info!(
        accepted = report.accepted,
        rejected = report.rejected.len(),
        locations = graph.location_count(),
        routes = graph.route_count(),
        "loaded route catalog"
    );
    Ok(report)
}

/// Ingest traffic lines from `reader`, annotating routes in `graph`.
pub fn load_traffic<R: Read>(graph: &mut RouteGraph, reader: R) -> Result<IngestReport> {
    let mut report = IngestReport::default();
    let mut parsed = Vec::new();
    for result in record_reader(reader).records() {
        let record = match result {
            Ok(record) => record,
            Err(error) => {
                reject(&mut report, csv_error_line(&error), Error::Csv(error));
                continue;
            }
        };

        let line = record_line(&record);
        let fields: Vec<&str> = record.iter().collect();
        match traffic_from_fields(line, &fields) {
            Ok(traffic) => parsed.push(traffic),
            Err(error) => reject(&mut report, line, error),
        }
    }

    report.accepted = apply_traffic_records(graph, &parsed);
    report.unmatched = parsed.len() - report.accepted;

    info!(
        accepted = report.accepted,
        unmatched = report.unmatched,
        rejected = report.rejected.len(),
        "applied traffic records"
    );
    Ok(report)
}

fn open_data_file(path: &Path) -> Result<fs::File> {
    fs::File::open(path).map_err(|error| match error.kind() {
        ErrorKind::NotFound => Error::DataFileNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(error),
    })
}

/// Ingest a route catalog file.
pub fn load_routes_from_path(graph: &mut RouteGraph, path: &Path) -> Result<IngestReport> {
    load_routes(graph, open_data_file(path)?)
}

/// Ingest a traffic file.
pub fn load_traffic_from_path(graph: &mut RouteGraph, path: &Path) -> Result<IngestReport> {
    load_traffic(graph, open_data_file(path)?)
}
