//! Dense pairwise similarity matrix.
//!
//! Scores are stored row-major. `score(i, j)` is how similar catalog
//! position `j` is to position `i`; facets are not required to be
//! symmetric, so ranking always reads the query movie's row.

use crate::error::{Result, SimilarityError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// A `rows x cols` table of scores, finite and non-negative off the diagonal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from row-major scores, validating shape and values
    pub fn new(rows: usize, cols: usize, scores: Vec<f32>) -> Result<Self> {
        let matrix = Self { rows, cols, scores };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Build a matrix from a list of equally long rows
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let row_count = rows.len();
        let cols = rows.first().map(Vec::len).unwrap_or(0);

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(SimilarityError::Malformed(format!(
                "row {} has {} columns, expected {}",
                i,
                row.len(),
                cols
            )));
        }

        Self::new(row_count, cols, rows.into_iter().flatten().collect())
    }

    /// Decode a matrix from its serialized bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let matrix: SimilarityMatrix = bincode::deserialize(bytes)?;
        matrix.validate()?;
        Ok(matrix)
    }

    /// Read a whole matrix file
    pub fn read_from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the matrix to a writer
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// Serialize the matrix to a file, replacing it if present
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Scores of row `i` against every column, or `None` when out of range
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.rows {
            return None;
        }
        let start = i * self.cols;
        Some(&self.scores[start..start + self.cols])
    }

    /// Single score lookup
    pub fn score(&self, i: usize, j: usize) -> Option<f32> {
        self.row(i).and_then(|row| row.get(j).copied())
    }

    fn validate(&self) -> Result<()> {
        let expected = self.rows.checked_mul(self.cols).ok_or_else(|| {
            SimilarityError::Malformed(format!("{}x{} overflows", self.rows, self.cols))
        })?;

        if self.scores.len() != expected {
            return Err(SimilarityError::Malformed(format!(
                "{}x{} matrix carries {} scores",
                self.rows,
                self.cols,
                self.scores.len()
            )));
        }

        // score(i, i) is never read, so the diagonal may hold anything
        let cols = self.cols;
        if let Some((idx, _)) = self
            .scores
            .par_iter()
            .enumerate()
            .find_any(|&(idx, s)| idx / cols != idx % cols && (!s.is_finite() || *s < 0.0))
        {
            let (i, j) = (idx / cols, idx % cols);
            return Err(SimilarityError::Malformed(format!(
                "score({}, {}) = {} is not a finite non-negative number",
                i, j, self.scores[idx]
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_and_lookup() {
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.2, 0.7],
            vec![0.2, 1.0, 0.1],
            vec![0.7, 0.1, 1.0],
        ])
        .unwrap();

        assert!(matrix.is_square());
        assert_eq!(matrix.row(2), Some(&[0.7, 0.1, 1.0][..]));
        assert_eq!(matrix.score(0, 2), Some(0.7));
        assert_eq!(matrix.score(3, 0), None);
        assert_eq!(matrix.score(0, 3), None);
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5]]);
        assert!(matches!(result, Err(SimilarityError::Malformed(_))));
    }

    #[test]
    fn test_score_count_must_match_shape() {
        let result = SimilarityMatrix::new(2, 2, vec![1.0, 0.0, 0.0]);
        assert!(matches!(result, Err(SimilarityError::Malformed(_))));
    }

    #[test]
    fn test_nan_and_negative_scores_are_rejected() {
        assert!(SimilarityMatrix::new(1, 2, vec![1.0, f32::NAN]).is_err());
        assert!(SimilarityMatrix::new(1, 2, vec![1.0, -0.5]).is_err());
        // Unnormalized scores are fine
        assert!(SimilarityMatrix::new(1, 2, vec![12.0, 3.5]).is_ok());
    }

    #[test]
    fn test_diagonal_is_not_validated() {
        let nan_diagonal = SimilarityMatrix::new(2, 2, vec![f32::NAN, 0.5, 0.5, f32::NAN]);
        assert!(nan_diagonal.is_ok());

        let negative_diagonal = SimilarityMatrix::new(2, 2, vec![-1.0, 0.5, 0.5, -1.0]);
        assert!(negative_diagonal.is_ok());

        // Off-diagonal entries are still checked
        assert!(SimilarityMatrix::new(2, 2, vec![f32::NAN, f32::NAN, 0.5, 1.0]).is_err());
    }

    #[test]
    fn test_file_write_and_read_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("similarity_tags.bin");
        let matrix = SimilarityMatrix::new(2, 2, vec![1.0, 0.25, 0.75, 1.0]).unwrap();

        matrix.write_to_file(&path).unwrap();

        assert_eq!(SimilarityMatrix::read_from_file(&path).unwrap(), matrix);
    }

    #[test]
    fn test_bytes_survive_encoding() {
        let matrix = SimilarityMatrix::new(2, 2, vec![1.0, 0.25, 0.25, 1.0]).unwrap();

        let mut bytes = Vec::new();
        matrix.write_to(&mut bytes).unwrap();

        assert_eq!(SimilarityMatrix::from_bytes(&bytes).unwrap(), matrix);
    }

    #[test]
    fn test_corrupt_bytes_are_rejected() {
        let result = SimilarityMatrix::from_bytes(&[0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(SimilarityError::Encoding(_))));
    }
}
