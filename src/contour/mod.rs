//! Boundary tracing with Freeman chain codes.
//!
//! Codes 0..=7 index the 8-neighbourhood counter-clockwise starting east:
//!
//! ```text
//!  3 2 1
//!  4 . 0
//!  5 6 7
//! ```
//!
//! with `(dx, dy)` = (row, column) offsets listed in [`FREEMAN_OFFSETS`].
//! Tracing walks a binary grid and emits one [`Edge`] per connected run it
//! follows; [`closure::edges_closure`] later bridges small gaps between edges
//! and [`trace_edges`] rasterizes the result.

pub mod closure;

pub use closure::edges_closure;

use crate::image::{GridF32, GridU8};
use serde::Serialize;

pub const FREEMAN_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Pixels above this level count as foreground (inputs are 0 or 255).
pub const FOREGROUND_LEVEL: f32 = 20.0;

const FOLLOW_START_DIR: u8 = 1;
const FOLLOW_MAX_FAILURES: u32 = 5;

/// A traced boundary: start pixel, end pixel, and the chain codes leading
/// from one to the other.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub start: (isize, isize),
    pub end: (isize, isize),
    pub directions: Vec<u8>,
}

impl Edge {
    pub fn new(start: (isize, isize)) -> Self {
        Self {
            start,
            end: start,
            directions: Vec::new(),
        }
    }

    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Pixels visited by the chain, starting with `start`.
    pub fn pixels(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        let mut pos = self.start;
        std::iter::once(self.start).chain(self.directions.iter().map(move |&d| {
            pos = step(pos, d);
            pos
        }))
    }
}

#[inline]
pub(crate) fn step(pos: (isize, isize), dir: u8) -> (isize, isize) {
    let (dx, dy) = FREEMAN_OFFSETS[dir as usize & 7];
    (pos.0 + dx, pos.1 + dy)
}

#[inline]
fn is_foreground(src: &GridF32, pos: (isize, isize)) -> bool {
    src.try_get(pos.0, pos.1)
        .is_some_and(|v| v > FOREGROUND_LEVEL)
}

/// Trace every foreground run of `src` (row-major scan, 1-pixel border
/// excluded) into a list of edges.
pub fn freeman_encoding(src: &GridF32) -> Vec<Edge> {
    let mut visited = GridU8::new(src.rows, src.cols);
    let mut edges = Vec::new();
    if src.rows < 3 || src.cols < 3 {
        return edges;
    }

    for x in 1..src.rows - 1 {
        for y in 1..src.cols - 1 {
            if visited.get(x, y) != 0 || src.get(x, y) <= FOREGROUND_LEVEL {
                continue;
            }
            visited.set(x, y, 1);
            let mut edge = Edge::new((x as isize, y as isize));
            follow_edge(src, &mut visited, &mut edge);
            edges.push(edge);
        }
    }

    log::debug!("freeman_encoding: {} edges", edges.len());
    edges
}

/// Extend `edge` from its start until it loops back or runs out of unvisited
/// neighbours.
///
/// After each accepted step the search direction turns left by 90°; each
/// failed probe turns it right by 45°. Five failed probes in a row end the
/// edge.
fn follow_edge(src: &GridF32, visited: &mut GridU8, edge: &mut Edge) {
    let mut pos = edge.start;
    let mut dir = FOLLOW_START_DIR;
    let mut failures = 0;

    loop {
        let probe = step(pos, dir);
        let free = visited
            .try_get(probe.0, probe.1)
            .is_some_and(|v| v == 0);
        if free && is_foreground(src, probe) {
            edge.directions.push(dir);
            pos = probe;
            visited.try_set(pos.0, pos.1, 1);
            failures = 0;
            dir = (dir + 2) % 8;
        } else {
            dir = (dir + 7) % 8;
            failures += 1;
        }

        if probe == edge.start || failures == FOLLOW_MAX_FAILURES {
            break;
        }
    }

    edge.end = pos;
}

/// Rasterize edges into a `rows × cols` mask (255 on every chain pixel).
/// Chain pixels falling outside the grid are skipped.
pub fn trace_edges(edges: &[Edge], rows: usize, cols: usize) -> GridU8 {
    let mut out = GridU8::new(rows, cols);
    for edge in edges {
        for (x, y) in edge.pixels() {
            out.try_set(x, y, 255);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(rows: usize, cols: usize, pixels: &[(usize, usize)]) -> GridF32 {
        let mut g = GridF32::new(rows, cols);
        for &(x, y) in pixels {
            g.set(x, y, 255.0);
        }
        g
    }

    #[test]
    fn isolated_pixel_is_a_point_edge() {
        let src = mask(5, 5, &[(2, 2)]);
        let edges = freeman_encoding(&src);
        assert_eq!(edges.len(), 1);
        assert!(edges[0].is_point());
        assert_eq!(edges[0].start, (2, 2));
        assert!(edges[0].directions.is_empty());
    }

    #[test]
    fn horizontal_run_is_encoded_eastward() {
        let src = mask(5, 9, &[(2, 2), (2, 3), (2, 4), (2, 5), (2, 6)]);
        let edges = freeman_encoding(&src);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].start, (2, 2));
        assert_eq!(edges[0].end, (2, 6));
        assert_eq!(edges[0].directions, vec![0, 0, 0, 0]);
    }

    #[test]
    fn diagonal_run_uses_code_seven() {
        let src = mask(7, 7, &[(1, 1), (2, 2), (3, 3), (4, 4)]);
        let edges = freeman_encoding(&src);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].directions, vec![7, 7, 7]);
        assert_eq!(edges[0].end, (4, 4));
    }

    #[test]
    fn closed_square_returns_to_start() {
        let mut pixels = Vec::new();
        for i in 2..=5 {
            pixels.extend([(2, i), (5, i), (i, 2), (i, 5)]);
        }
        let src = mask(8, 8, &pixels);
        let edges = freeman_encoding(&src);
        assert_eq!(edges.len(), 1);
        let rendered = trace_edges(&edges, 8, 8);
        assert_eq!(rendered.count_nonzero(), 12);
    }

    #[test]
    fn rendering_reproduces_the_traced_mask() {
        let pixels = [
            (1, 1),
            (1, 2),
            (1, 3),
            (2, 4),
            (3, 4),
            (4, 3),
            (6, 6),
            (6, 7),
            (3, 8),
        ];
        let src = mask(9, 10, &pixels);
        let edges = freeman_encoding(&src);
        let rendered = trace_edges(&edges, 9, 10);
        for x in 0..9 {
            for y in 0..10 {
                assert_eq!(
                    rendered.get(x, y) != 0,
                    src.get(x, y) != 0.0,
                    "mismatch at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn pixels_follow_the_chain() {
        let edge = Edge {
            start: (3, 3),
            end: (2, 5),
            directions: vec![0, 1],
        };
        let px: Vec<_> = edge.pixels().collect();
        assert_eq!(px, vec![(3, 3), (3, 4), (2, 5)]);
    }
}
