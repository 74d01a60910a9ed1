use crate::core::results::{EvaluationResult, RankedResults};
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

pub const CSV_HEADER: [&str; 6] = [
    "irs_sequence",
    "inhibition_strand",
    "recognition_strand",
    "dg1",
    "dg2",
    "displacement_score",
];

#[derive(Debug, Error)]
pub enum ResultsIoError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// Writes `results` as CSV, header first, rows in ranked order.
pub fn write_results<W: Write>(results: &RankedResults, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if results.is_empty() {
        csv_writer.write_record(CSV_HEADER)?;
    }
    for result in results {
        csv_writer.serialize(result)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_results<R: Read>(reader: R) -> Result<RankedResults, csv::Error> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let rows = csv_reader
        .deserialize::<EvaluationResult>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RankedResults::from_ranked(rows))
}

pub fn write_results_to_path(results: &RankedResults, path: &Path) -> Result<(), ResultsIoError> {
    let display = path.to_string_lossy().to_string();
    let file = std::fs::File::create(path).map_err(|e| ResultsIoError::Io {
        path: display.clone(),
        source: e,
    })?;
    write_results(results, std::io::BufWriter::new(file)).map_err(|e| ResultsIoError::Csv {
        path: display,
        source: e,
    })
}

pub fn read_results_from_path(path: &Path) -> Result<RankedResults, ResultsIoError> {
    let display = path.to_string_lossy().to_string();
    let file = std::fs::File::open(path).map_err(|e| ResultsIoError::Io {
        path: display.clone(),
        source: e,
    })?;
    read_results(file).map_err(|e| ResultsIoError::Csv {
        path: display,
        source: e,
    })
}
