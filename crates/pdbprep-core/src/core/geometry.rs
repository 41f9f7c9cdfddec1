use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use rayon::prelude::*;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DistanceError {
    #[error("Residue {0} not found in structure")]
    ResidueNotFound(isize),
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Minimum inter-atomic distance between the residues that had numbers `a` and `b` in the
/// source file.
pub fn residue_distance(structure: &Structure, a: isize, b: isize) -> Result<f64, DistanceError> {
    let first = structure
        .by_original_number(a)
        .ok_or(DistanceError::ResidueNotFound(a))?;
    let second = structure
        .by_original_number(b)
        .ok_or(DistanceError::ResidueNotFound(b))?;
    Ok(first.distance(second))
}

/// A pair of residues whose minimum distance is within a cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub first: usize,
    pub second: usize,
    pub distance: f64,
}

/// Symmetric matrix of [`Residue::distance`] values, in residue order.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    labels: Vec<Option<isize>>,
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes all pairwise residue distances, one row per rayon task.
    ///
    /// The diagonal is computed like every other entry and is therefore `0.0`.
    pub fn compute<'a>(residues: impl IntoIterator<Item = &'a Residue>) -> Self {
        let residues: Vec<&Residue> = residues.into_iter().collect();
        let size = residues.len();
        let values: Vec<f64> = residues
            .par_iter()
            .flat_map_iter(|a| residues.iter().map(move |b| a.distance(b)))
            .collect();
        Self {
            labels: residues.iter().map(|r| r.sequence_number()).collect(),
            size,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current sequence numbers of the residues, in matrix order.
    pub fn labels(&self) -> &[Option<isize>] {
        &self.labels
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        (i < self.size && j < self.size).then(|| self.values[i * self.size + j])
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        (i < self.size).then(|| &self.values[i * self.size..(i + 1) * self.size])
    }

    /// Residue pairs `i < j` whose distance is at most `cutoff`, in row-major order.
    pub fn contacts(&self, cutoff: f64) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let distance = self.values[i * self.size + j];
                if distance <= cutoff {
                    contacts.push(Contact {
                        first: i,
                        second: j,
                        distance,
                    });
                }
            }
        }
        contacts
    }

    /// Writes the matrix as CSV with a header row and a leading label column.
    ///
    /// Residues marked for removal are labelled `-`.
    pub fn write_csv(&self, writer: impl Write) -> Result<(), DistanceError> {
        let labels: Vec<String> = self
            .labels
            .iter()
            .map(|l| l.map_or_else(|| "-".to_string(), |n| n.to_string()))
            .collect();

        let mut csv_writer = csv::Writer::from_writer(writer);
        let mut header = Vec::with_capacity(self.size + 1);
        header.push("residue".to_string());
        header.extend(labels.iter().cloned());
        csv_writer.write_record(&header)?;

        for (i, label) in labels.iter().enumerate() {
            let row = self.row(i).unwrap_or_default();
            let mut record = Vec::with_capacity(self.size + 1);
            record.push(label.clone());
            record.extend(row.iter().map(|d| format!("{:.3}", d)));
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
