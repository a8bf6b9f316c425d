//! Text export/import of complete colorings.
//!
//! A coloring of \(K_n\) is written as an `n x n` matrix of `0/1` characters where
//! `1` marks a `B` edge and `0` an `A` edge; the diagonal is `0`. This is exactly
//! the adjacency matrix of the `B` color class.

use crate::assignment::ColoringAssignment;
use crate::error::{ColoringError, Result};
use crate::graph::{Edge, edges};
use crate::score::Color;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Writing
// ============================================================================

/// Writes a complete coloring as a `0/1` matrix.
///
/// # Errors
/// [`ColoringError::InvalidState`] if the coloring is partial; [`ColoringError::Io`]
/// if writing fails.
pub fn write_matrix<W: Write>(assignment: &ColoringAssignment, mut w: W) -> Result<()> {
    if !assignment.is_total() {
        return Err(ColoringError::InvalidState(format!(
            "only complete colorings can be exported ({} of {} edges colored)",
            assignment.len(),
            assignment.edge_count()
        )));
    }
    let n = assignment.n();
    for i in 0..n {
        let row: String = (0..n)
            .map(|j| {
                if i != j && assignment.get(Edge::new(i, j)) == Some(Color::B) {
                    '1'
                } else {
                    '0'
                }
            })
            .collect();
        writeln!(w, "{row}")?;
    }
    Ok(())
}

/// Saves a complete coloring to `path`.
///
/// # Errors
/// Same conditions as [`write_matrix`], plus file creation failures.
pub fn save_to_file(assignment: &ColoringAssignment, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    write_matrix(assignment, &mut w)?;
    w.flush()?;
    Ok(())
}

// ============================================================================
// Parsing
// ============================================================================

/// Errors encountered while parsing a coloring matrix.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatrixParseError {
    /// No non-empty rows were found.
    #[error("coloring matrix is empty")]
    Empty,
    /// A row has the wrong length.
    #[error("coloring matrix is not square: row {row} has length {got}, expected {expected}")]
    NonSquare {
        /// Row index.
        row: usize,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// Encountered a character other than `0`/`1`.
    #[error("invalid character at ({row}, {col}): {ch:?} (expected '0' or '1')")]
    InvalidChar {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The offending character.
        ch: char,
    },
    /// Diagonal entry is `1`.
    #[error("diagonal entry set at vertex {vertex}")]
    SelfLoop {
        /// The vertex.
        vertex: usize,
    },
    /// `M[i][j] != M[j][i]`.
    #[error("coloring matrix is not symmetric at ({i},{j})")]
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },
}

impl From<MatrixParseError> for ColoringError {
    fn from(e: MatrixParseError) -> Self {
        ColoringError::InvalidInput(e.to_string())
    }
}

/// Parses a `0/1` coloring matrix. Blank lines and surrounding whitespace are ignored.
///
/// # Errors
/// Returns an error if the input is empty, non-square, contains invalid characters,
/// has a set diagonal entry, or is not symmetric.
pub fn parse_matrix(text: &str) -> std::result::Result<ColoringAssignment, MatrixParseError> {
    let lines: Vec<&[u8]> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::as_bytes)
        .collect();
    if lines.is_empty() {
        return Err(MatrixParseError::Empty);
    }
    let n = lines.len();

    let mut rows = Vec::with_capacity(n);
    for (i, bytes) in lines.iter().enumerate() {
        if bytes.len() != n {
            return Err(MatrixParseError::NonSquare {
                row: i,
                expected: n,
                got: bytes.len(),
            });
        }
        let mut row = Vec::with_capacity(n);
        for (j, &b) in bytes.iter().enumerate() {
            row.push(match b {
                b'0' => false,
                b'1' => true,
                _ => {
                    return Err(MatrixParseError::InvalidChar {
                        row: i,
                        col: j,
                        ch: b as char,
                    });
                }
            });
        }
        if row[i] {
            return Err(MatrixParseError::SelfLoop { vertex: i });
        }
        rows.push(row);
    }

    let colors = edges(n)
        .map(|e| {
            let (i, j) = e.endpoints();
            if rows[i][j] != rows[j][i] {
                return Err(MatrixParseError::NotSymmetric { i, j });
            }
            Ok(Some(if rows[i][j] { Color::B } else { Color::A }))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(ColoringAssignment::from_colors(n, colors))
}

/// Loads a coloring matrix from `path`.
///
/// # Errors
/// [`ColoringError::Io`] if the file cannot be read; [`ColoringError::InvalidInput`]
/// if it is malformed.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<ColoringAssignment> {
    let mut text = String::new();
    File::open(path)?.read_to_string(&mut text)?;
    Ok(parse_matrix(&text)?)
}

/// Writes a complete coloring to stdout.
///
/// # Errors
/// Same conditions as [`write_matrix`].
pub fn print_matrix(assignment: &ColoringAssignment) -> Result<()> {
    let stdout = io::stdout();
    write_matrix(assignment, stdout.lock())
}

// ============================================================================
// Tests
// ============================================================================
