//! Board loading: letter grids and explicit adjacency lists
//!
//! Two input forms produce the same `Graph<FoundWords>`:
//!
//! - **Grid**: one row per line. A row is either whitespace-separated cells
//!   (the first character of each token is the letter) or a single run of
//!   letters. Cells are named `<LETTER>_<row>_<col>` and connected to all
//!   eight surrounding cells.
//! - **Adjacency**: `ID NEIGHBOR NEIGHBOR ...` per line. Edges are made
//!   undirected; every listed neighbor must have its own line.
//!
//! In both forms blank lines and lines starting with `#` are ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use super::computation::FoundWords;
use crate::error::BoardError;
use crate::pregel::{Graph, VertexId};

/// Input form of a board file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardFormat {
    /// Rectangular letter grid with 8-neighbour adjacency
    #[default]
    Grid,
    /// One line per vertex listing its neighbors
    Adjacency,
}

/// A rectangular letter grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: Vec<Vec<char>>,
}

impl Board {
    /// Parse the grid form
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let rows: Vec<Vec<char>> = content_lines(text).map(|(_, line)| parse_row(line)).collect();
        Self::from_cells(rows)
    }

    /// Build a board from row strings such as `["CAT", "XYZ"]`
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        Self::from_cells(rows.iter().map(|r| parse_row(r.as_ref())).collect())
    }

    fn from_cells(rows: Vec<Vec<char>>) -> Result<Self, BoardError> {
        let expected = rows.first().map(Vec::len).ok_or(BoardError::Empty)?;
        if expected == 0 {
            return Err(BoardError::Empty);
        }
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(BoardError::Ragged {
                row,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { rows })
    }

    /// Load a grid file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, BoardError> {
        let text = read_board(path.as_ref()).await?;
        Self::parse(&text)
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Letter at a cell, as written in the input
    pub fn letter(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Vertex id of a cell: uppercase letter, row and column
    pub fn cell_id(&self, row: usize, col: usize) -> Option<VertexId> {
        self.letter(row, col).map(|letter| {
            let upper: String = letter.to_uppercase().collect();
            VertexId::new(format!("{}_{}_{}", upper, row, col))
        })
    }

    /// Build the search graph: one vertex per cell, edges to the 8 neighbours
    pub fn to_graph(&self) -> Graph<FoundWords> {
        let mut graph = Graph::new();
        let (height, width) = (self.height(), self.width());

        let mut ids = Vec::with_capacity(height);
        for row in 0..height {
            let mut line = Vec::with_capacity(width);
            for col in 0..width {
                if let Some(id) = self.cell_id(row, col) {
                    graph.add_vertex(id.clone(), FoundWords::new());
                    line.push(id);
                }
            }
            ids.push(line);
        }

        for row in 0..height {
            for col in 0..width {
                for (dr, dc) in NEIGHBOUR_OFFSETS {
                    let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
                        continue;
                    };
                    if r < height && c < width {
                        graph.add_neighbor(ids[row][col].clone(), ids[r][c].clone());
                    }
                }
            }
        }

        graph
    }
}

const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn parse_row(line: &str) -> Vec<char> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [run] => run.chars().collect(),
        tokens => tokens.iter().filter_map(|t| t.chars().next()).collect(),
    }
}

/// Non-blank, non-comment lines with their 1-based line numbers
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

async fn read_board(path: &Path) -> Result<String, BoardError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BoardError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Parse the adjacency-list form into a validated graph
pub fn parse_adjacency(text: &str) -> Result<Graph<FoundWords>, BoardError> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for (line_no, line) in content_lines(text) {
        let mut fields = line.split_whitespace();
        let Some(id) = fields.next() else { continue };
        if !seen.insert(id) {
            return Err(BoardError::DuplicateId {
                line: line_no,
                id: id.to_string(),
            });
        }
        records.push((id, fields.collect::<Vec<_>>()));
    }

    if records.is_empty() {
        return Err(BoardError::Empty);
    }

    let mut graph = Graph::new();
    for (id, _) in &records {
        graph.add_vertex(*id, FoundWords::new());
    }
    for (id, neighbors) in &records {
        for neighbor in neighbors {
            graph.add_neighbor(*id, *neighbor);
            graph.add_neighbor(*neighbor, *id);
        }
    }
    graph.validate()?;

    Ok(graph)
}

/// Load a board file in the given form and build its graph
pub async fn load_graph(
    path: impl AsRef<Path>,
    format: BoardFormat,
) -> Result<Graph<FoundWords>, BoardError> {
    let path = path.as_ref();
    let text = read_board(path).await?;
    let graph = match format {
        BoardFormat::Grid => Board::parse(&text)?.to_graph(),
        BoardFormat::Adjacency => parse_adjacency(&text)?,
    };
    debug!(path = %path.display(), ?format, vertices = graph.len(), "Board loaded");
    Ok(graph)
}
