//! Gap closing between traced edges.
//!
//! From both endpoints of every edge, two walks advance pixel by pixel in the
//! directions derived from the local slope (`+3` and `+7` chain codes from the
//! quantized gradient direction). A walk stops when it meets a foreground
//! pixel of the source mask (the pixel itself or the two neighbours on its
//! forward arc) or reaches the 1-pixel border. Walks that met foreground after
//! at least one free step are spliced into the edge, extending it up to the
//! last free pixel.
use super::{step, Edge};
use crate::error::{invariant, Result};
use crate::image::GridF32;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    Start,
    End,
}

const WALKS: [(Anchor, u8); 4] = [
    (Anchor::Start, 3),
    (Anchor::Start, 7),
    (Anchor::End, 3),
    (Anchor::End, 7),
];

#[derive(Debug)]
struct Walk {
    anchor: Anchor,
    offset: u8,
    pos: (isize, isize),
    steps: Vec<u8>,
    done: bool,
}

enum Advance {
    Free,
    Boundary,
    Hit,
}

/// Quantize a slope angle in [−π, π] to a chain code.
#[inline]
fn slope_code(slope: f32) -> u8 {
    let code = (((slope + PI) / (2.0 * PI)) * 8.0).round() as i32;
    code.rem_euclid(8) as u8
}

#[inline]
fn is_set(src: &GridF32, pos: (isize, isize)) -> bool {
    src.try_get(pos.0, pos.1).is_some_and(|v| v > 0.0)
}

impl Walk {
    fn advance(&mut self, src: &GridF32, slope: &GridF32) -> Advance {
        let local = slope.try_get(self.pos.0, self.pos.1).unwrap_or(0.0);
        let dir = (slope_code(local) + self.offset) % 8;
        let next = step(self.pos, dir);

        let rows = src.rows as isize;
        let cols = src.cols as isize;
        if next.0 <= 0 || next.1 <= 0 || next.0 >= rows - 1 || next.1 >= cols - 1 {
            return Advance::Boundary;
        }

        let hit = is_set(src, next)
            || is_set(src, step(next, (dir + 1) % 8))
            || is_set(src, step(next, (dir + 7) % 8));
        if hit {
            return Advance::Hit;
        }
        self.steps.push(dir);
        self.pos = next;
        Advance::Free
    }
}

/// Extend each edge towards nearby foreground for at most `nb_iterations`
/// steps per walk.
///
/// `src` is the mask the edges were traced from and `slope` the gradient
/// direction of the same image. Point edges (start == end) are skipped. Once
/// a walk has extended one endpoint, the other walk from that endpoint stops,
/// keeping the chain a single path.
pub fn edges_closure(
    edges: &mut [Edge],
    src: &GridF32,
    slope: &GridF32,
    nb_iterations: usize,
) -> Result<()> {
    if !src.same_shape(slope) {
        return Err(invariant("closure mask and slope differ in size"));
    }

    let mut extended = 0usize;
    for edge in edges.iter_mut() {
        if edge.is_point() {
            continue;
        }

        let mut walks: Vec<Walk> = WALKS
            .iter()
            .map(|&(anchor, offset)| Walk {
                anchor,
                offset,
                pos: match anchor {
                    Anchor::Start => edge.start,
                    Anchor::End => edge.end,
                },
                steps: Vec::new(),
                done: false,
            })
            .collect();
        let mut start_extended = false;
        let mut end_extended = false;

        for _ in 0..nb_iterations {
            if walks.iter().all(|w| w.done) {
                break;
            }
            for walk in walks.iter_mut().filter(|w| !w.done) {
                let anchor_extended = match walk.anchor {
                    Anchor::Start => start_extended,
                    Anchor::End => end_extended,
                };
                if anchor_extended {
                    walk.done = true;
                    continue;
                }
                match walk.advance(src, slope) {
                    Advance::Free => {}
                    Advance::Boundary => walk.done = true,
                    Advance::Hit => {
                        walk.done = true;
                        if walk.steps.is_empty() {
                            continue;
                        }
                        match walk.anchor {
                            Anchor::Start => {
                                let mut directions: Vec<u8> =
                                    walk.steps.iter().rev().map(|&d| (d + 4) % 8).collect();
                                directions.append(&mut edge.directions);
                                edge.directions = directions;
                                edge.start = walk.pos;
                                start_extended = true;
                            }
                            Anchor::End => {
                                edge.directions.extend_from_slice(&walk.steps);
                                edge.end = walk.pos;
                                end_extended = true;
                            }
                        }
                        extended += 1;
                    }
                }
            }
        }
    }

    log::debug!("edges_closure: {extended} endpoints extended");
    Ok(())
}
