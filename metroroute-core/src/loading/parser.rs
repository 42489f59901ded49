use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use geo::Point;
use log::{debug, warn};
use thiserror::Error;

use super::config::NetworkConfig;
use crate::{Error, model::SegmentRecord};

/// Logical columns of a segment row, in file order
const FIELD_NAMES: [&str; 10] = [
    "from_station",
    "to_station",
    "time",
    "distance",
    "cost",
    "line",
    "from_lat",
    "from_lon",
    "to_lat",
    "to_lon",
];

/// Why a row was dropped during ingestion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RejectReason {
    #[error("expected 10 fields, found {found}")]
    MissingFields { found: usize },
    #[error("field '{field}' is empty")]
    EmptyField { field: &'static str },
    #[error("field '{field}' has invalid value '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("malformed row: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordRejection {
    /// 1-based line in the source, 0 if unknown
    pub line: u64,
    pub reason: RejectReason,
}

/// Outcome of reading a segment file
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Non-blank data rows seen
    pub rows_read: usize,
    pub accepted: usize,
    pub rejections: Vec<RecordRejection>,
}

impl LoadReport {
    pub fn rejected(&self) -> usize {
        self.rejections.len()
    }

    fn reject(&mut self, line: u64, reason: RejectReason) {
        warn!("Skipping line {line}: {reason}");
        self.rejections.push(RecordRejection { line, reason });
    }
}

/// Parse delimited segment rows into validated records.
///
/// Rows that fail validation are skipped and reported; they never abort
/// the rest of the input.
///
/// # Errors
///
/// Returns an error only if the configured delimiter is not ASCII
pub fn parse_segments<R: Read>(
    reader: R,
    config: &NetworkConfig,
) -> Result<(Vec<SegmentRecord>, LoadReport), Error> {
    if !config.delimiter.is_ascii() {
        return Err(Error::InvalidData(format!(
            "delimiter '{}' is not an ASCII character",
            config.delimiter
        )));
    }

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(config.delimiter as u8)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for row in csv_reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                let line = e.position().map_or(0, csv::Position::line);
                report.rows_read += 1;
                report.reject(line, RejectReason::Malformed(e.to_string()));
                continue;
            }
        };

        if row.iter().all(str::is_empty) {
            continue;
        }
        report.rows_read += 1;

        let line = row.position().map_or(0, csv::Position::line);
        match validate_row(&row) {
            Ok(record) => {
                debug!(
                    "Line {line}: {} -> {} on {} ({} min, {})",
                    record.from, record.to, record.line, record.time, record.cost
                );
                records.push(record);
            }
            Err(reason) => report.reject(line, reason),
        }
    }

    report.accepted = records.len();
    Ok((records, report))
}

fn validate_row(row: &StringRecord) -> Result<SegmentRecord, RejectReason> {
    if row.len() < FIELD_NAMES.len() {
        return Err(RejectReason::MissingFields { found: row.len() });
    }

    let mut fields = [""; 10];
    for (idx, name) in FIELD_NAMES.iter().enumerate() {
        let value = row.get(idx).unwrap_or_default();
        if value.is_empty() {
            return Err(RejectReason::EmptyField { field: *name });
        }
        fields[idx] = value;
    }

    let time = parse_integer(fields[2], FIELD_NAMES[2])?;
    let distance = parse_real(fields[3], FIELD_NAMES[3])?;
    if distance < 0.0 {
        return Err(RejectReason::InvalidNumber {
            field: FIELD_NAMES[3],
            value: fields[3].to_string(),
        });
    }
    let cost = parse_integer(fields[4], FIELD_NAMES[4])?;
    let from_lat = parse_real(fields[6], FIELD_NAMES[6])?;
    let from_lon = parse_real(fields[7], FIELD_NAMES[7])?;
    let to_lat = parse_real(fields[8], FIELD_NAMES[8])?;
    let to_lon = parse_real(fields[9], FIELD_NAMES[9])?;

    Ok(SegmentRecord {
        from: fields[0].to_string(),
        to: fields[1].to_string(),
        time,
        distance,
        cost,
        line: fields[5].to_string(),
        from_coord: Point::new(from_lon, from_lat),
        to_coord: Point::new(to_lon, to_lat),
    })
}

fn parse_integer(value: &str, field: &'static str) -> Result<u32, RejectReason> {
    value.parse::<u32>().map_err(|_| RejectReason::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_real(value: &str, field: &'static str) -> Result<f64, RejectReason> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RejectReason::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "From,To,Time,Distance,Cost,Line,LatFrom,LonFrom,LatTo,LonTo\n";

    fn parse(body: &str) -> (Vec<SegmentRecord>, LoadReport) {
        let input = format!("{HEADER}{body}");
        parse_segments(input.as_bytes(), &NetworkConfig::new("unused.csv")).unwrap()
    }

    #[test]
    fn parses_trimmed_rows() {
        let (records, report) =
            parse(" Rajiv Chowk , Mandi House , 4 , 1.2 , 20 , Blue Line , 28.63 , 77.21 , 28.62 , 77.23 \n");

        assert_eq!(report.accepted, 1);
        assert_eq!(report.rejected(), 0);
        let record = &records[0];
        assert_eq!(record.from, "Rajiv Chowk");
        assert_eq!(record.to, "Mandi House");
        assert_eq!(record.line, "Blue Line");
        assert_eq!(record.time, 4);
        assert_eq!(record.cost, 20);
        assert_eq!(record.from_coord, Point::new(77.21, 28.63));
        assert_eq!(record.to_coord, Point::new(77.23, 28.62));
    }

    #[test]
    fn skips_bad_rows_and_keeps_going() {
        let (records, report) = parse(
            "A,B,2,1.0,10,Red,1,2,3,4\n\
             A,B,2,1.0\n\
             A,B,two,1.0,10,Red,1,2,3,4\n\
             A,B,2,1.0,10,,1,2,3,4\n\
             A,B,-2,1.0,10,Red,1,2,3,4\n\
             A,B,2,-1.0,10,Red,1,2,3,4\n\
             A,B,2,1.0,10,Red,1,north,3,4\n\
             B,C,3,1.0,10,Red,3,4,5,6\n",
        );

        assert_eq!(records.len(), 2);
        assert_eq!(report.rows_read, 8);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected(), 6);

        let reasons: Vec<_> = report.rejections.iter().map(|r| r.reason.clone()).collect();
        assert_eq!(reasons[0], RejectReason::MissingFields { found: 4 });
        assert_eq!(
            reasons[1],
            RejectReason::InvalidNumber {
                field: "time",
                value: "two".to_string()
            }
        );
        assert_eq!(reasons[2], RejectReason::EmptyField { field: "line" });
        assert_eq!(report.rejections[0].line, 3);
    }

    #[test]
    fn blank_rows_are_not_counted() {
        let (records, report) = parse("A,B,2,1.0,10,Red,1,2,3,4\n   \n\nB,C,2,1.0,10,Red,1,2,3,4\n");

        assert_eq!(records.len(), 2);
        assert_eq!(report.rows_read, 2);
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let mut config = NetworkConfig::new("unused.csv");
        config.delimiter = '→';
        assert!(matches!(
            parse_segments("".as_bytes(), &config),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn honours_custom_delimiter_without_header() {
        let mut config = NetworkConfig::new("unused.csv");
        config.delimiter = ';';
        config.has_headers = false;

        let (records, report) =
            parse_segments("A;B;2;0.5;10;Red;1;2;3;4\n".as_bytes(), &config).unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(records[0].to, "B");
    }
}
