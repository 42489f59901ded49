use std::fs::File;

use log::{error, info};

use super::config::NetworkConfig;
use super::parser::parse_segments;
use crate::{Error, MetroNetwork};

/// Creates a metro network based on the provided configuration
///
/// # Errors
///
/// Returns an error if the data file cannot be read, or if not a single
/// row could be turned into a segment. Callers should disable querying
/// in the latter case.
pub fn create_metro_network(config: &NetworkConfig) -> Result<MetroNetwork, Error> {
    validate_config(config)?;

    info!("Reading segment data: {}", config.data_path.display());
    let file = File::open(&config.data_path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!(
                "Failed to open file '{}': {}",
                config.data_path.display(),
                e
            ),
        )
    })?;

    let (records, report) = parse_segments(file, config)?;
    info!(
        "Parsed {} data rows: {} accepted, {} skipped",
        report.rows_read,
        report.accepted,
        report.rejected()
    );

    if report.accepted == 0 {
        let message = if report.rows_read == 0 {
            format!("no data rows found in '{}'", config.data_path.display())
        } else {
            format!(
                "all {} data rows in '{}' were skipped",
                report.rows_read,
                config.data_path.display()
            )
        };
        error!("{message}");
        return Err(Error::DataUnavailable(message));
    }

    let network = MetroNetwork::build(records)?;
    info!("Metro network created successfully");
    Ok(network)
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    if !config.data_path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Segment file not found: {}", config.data_path.display()),
        )));
    }

    if config.data_path.is_dir() {
        return Err(Error::InvalidData(format!(
            "Segment path is a directory: {}",
            config.data_path.display()
        )));
    }

    Ok(())
}
