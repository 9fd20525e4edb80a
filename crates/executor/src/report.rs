use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;

use super::error::Error;
use super::types::Distance;
use apsp_core::DistanceMatrix;

/// One reachable ordered pair in the distance report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub from: usize,
    pub to: usize,
    pub distance: Distance,
}

/// Writes `from,to,distance` rows for every reachable off-diagonal pair.
///
/// Returns the number of rows written.
pub fn write_distances<W: io::Write>(
    matrix: &DistanceMatrix<Distance>,
    inf: Distance,
    out: W,
) -> Result<usize, Error> {
    let mut wtr = csv::Writer::from_writer(out);
    let mut written = 0;

    for (from, row) in matrix.rows().enumerate() {
        for (to, &distance) in row.iter().enumerate() {
            if from == to || distance >= inf {
                continue;
            }
            wtr.serialize(DistanceRecord { from, to, distance })?;
            written += 1;
        }
    }

    wtr.flush()?;
    Ok(written)
}

pub fn write_report_file(
    path: &Path,
    matrix: &DistanceMatrix<Distance>,
    inf: Distance,
) -> Result<usize, Error> {
    let file = File::create(path)?;
    write_distances(matrix, inf, file)
}
