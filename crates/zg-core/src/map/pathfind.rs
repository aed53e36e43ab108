//! Passage routing: straight line walks and A* search
//!
//! A* runs over 8-connected cells, with costs of 10 per straight step and 14 per
//! diagonal. Passability comes from an [`ObstacleMask`]; [`Reachability`]
//! answers "is there any route at all" without searching.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use serde::{Deserialize, Serialize};

use super::{Coord, ObstacleMask, SURROUNDING};
use crate::consts::{DIAGONAL_STEP_COST, STRAIGHT_STEP_COST};

/// Cells visited walking a straight line from `from` to `to`, both included
///
/// The dominant axis advances every step. The minor axis advances whenever an
/// accumulator, seeded with half the dominant extent, reaches that extent.
pub fn line_walk(from: Coord, to: Coord) -> Vec<Coord> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let mut steep = false;
    let mut step = dx.signum();
    let mut minor_step = dy.signum();
    let mut longest = dx.abs();
    let mut shortest = dy.abs();

    if longest < shortest {
        steep = true;
        std::mem::swap(&mut longest, &mut shortest);
        step = dy.signum();
        minor_step = dx.signum();
    }

    let mut cells = Vec::with_capacity(longest as usize + 1);
    let (mut x, mut y) = (from.x, from.y);
    let mut acc = longest / 2;

    for _ in 0..longest {
        cells.push(Coord::new(x, y));
        if steep {
            y += step;
        } else {
            x += step;
        }
        acc += shortest;
        if acc >= longest {
            if steep {
                x += minor_step;
            } else {
                y += minor_step;
            }
            acc -= longest;
        }
    }
    cells.push(to);
    cells
}

/// A* estimate between two cells
pub fn heuristic(a: Coord, b: Coord) -> i64 {
    let dx = i64::from((a.x - b.x).abs());
    let dy = i64::from((a.y - b.y).abs());
    dx + dy + dx.min(dy) * (DIAGONAL_STEP_COST - 2 * STRAIGHT_STEP_COST)
}

/// Cheapest possible path cost between two cells on an open grid
pub fn octile_lower_bound(a: Coord, b: Coord) -> i64 {
    let dx = i64::from((a.x - b.x).abs());
    let dy = i64::from((a.y - b.y).abs());
    let (long, short) = (dx.max(dy), dx.min(dy));
    DIAGONAL_STEP_COST * short + STRAIGHT_STEP_COST * (long - short)
}

/// 8-connected components of the passable cells of an [`ObstacleMask`]
///
/// Two cells share a component exactly when [`find_path`] can route between
/// them, since A* moves between any two passable 8-neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachability {
    width: usize,
    height: usize,
    labels: Vec<Option<u32>>,
    components: u32,
}

impl Reachability {
    /// Label every passable cell, breadth-first from each unlabelled one
    pub fn new(mask: &ObstacleMask<'_>) -> Self {
        let (width, height) = (mask.width(), mask.height());
        let mut labels = vec![None; width * height];
        let mut components = 0;
        let mut queue = VecDeque::new();

        for y in 0..height {
            for x in 0..width {
                let start = Coord::new(x as i32, y as i32);
                if labels[y * width + x].is_some() || mask.is_obstacle(start) {
                    continue;
                }
                labels[y * width + x] = Some(components);
                queue.push_back(start);

                while let Some(c) = queue.pop_front() {
                    for &(dx, dy) in &SURROUNDING {
                        let n = c.offset(dx, dy);
                        if mask.is_obstacle(n) {
                            continue;
                        }
                        let slot = &mut labels[index_of(mask, n)];
                        if slot.is_none() {
                            *slot = Some(components);
                            queue.push_back(n);
                        }
                    }
                }
                components += 1;
            }
        }

        Self {
            width,
            height,
            labels,
            components,
        }
    }

    /// Component of `c`, or `None` for obstacles and out-of-bounds cells
    pub fn component(&self, c: Coord) -> Option<u32> {
        if c.x < 0 || c.y < 0 || c.x as usize >= self.width || c.y as usize >= self.height {
            return None;
        }
        self.labels[c.y as usize * self.width + c.x as usize]
    }

    pub fn component_count(&self) -> u32 {
        self.components
    }

    /// Whether a route between `a` and `b` exists
    pub fn connected(&self, a: Coord, b: Coord) -> bool {
        match (self.component(a), self.component(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}

/// A route found by [`find_path`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// Start to goal, both included
    pub cells: Vec<Coord>,
    pub cost: i64,
}

impl Path {
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

/// Open set entry; the heap pops lowest f, then lowest h, then oldest
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenNode {
    cell: Coord,
    g: i64,
    f: i64,
    h: i64,
    seq: u64,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn index_of(mask: &ObstacleMask<'_>, c: Coord) -> usize {
    c.y as usize * mask.width() + c.x as usize
}

fn reconstruct_path(
    came_from: &[Option<Coord>],
    mask: &ObstacleMask<'_>,
    goal: Coord,
) -> Vec<Coord> {
    let mut cells = vec![goal];
    let mut current = goal;
    while let Some(prev) = came_from[index_of(mask, current)] {
        cells.push(prev);
        current = prev;
    }
    cells.reverse();
    cells
}

/// Cheapest 8-directional route from `start` to `goal` avoiding obstacles
///
/// Returns `None` when either endpoint is an obstacle or the goal cannot be
/// reached.
pub fn find_path(mask: &ObstacleMask<'_>, start: Coord, goal: Coord) -> Option<Path> {
    if mask.is_obstacle(start) || mask.is_obstacle(goal) {
        return None;
    }
    if start == goal {
        return Some(Path {
            cells: vec![start],
            cost: 0,
        });
    }

    let size = mask.width() * mask.height();
    let mut g_scores = vec![i64::MAX; size];
    let mut came_from: Vec<Option<Coord>> = vec![None; size];
    let mut closed = vec![false; size];
    let mut open_set = BinaryHeap::new();
    let mut seq = 0u64;

    g_scores[index_of(mask, start)] = 0;
    let h = heuristic(start, goal);
    open_set.push(OpenNode {
        cell: start,
        g: 0,
        f: h,
        h,
        seq,
    });

    while let Some(current) = open_set.pop() {
        if current.cell == goal {
            return Some(Path {
                cells: reconstruct_path(&came_from, mask, goal),
                cost: current.g,
            });
        }

        let current_index = index_of(mask, current.cell);
        if closed[current_index] {
            continue;
        }
        closed[current_index] = true;

        for &(dx, dy) in &SURROUNDING {
            let next = current.cell.offset(dx, dy);
            if mask.is_obstacle(next) {
                continue;
            }
            let next_index = index_of(mask, next);
            if closed[next_index] {
                continue;
            }

            let step_cost = if dx != 0 && dy != 0 {
                DIAGONAL_STEP_COST
            } else {
                STRAIGHT_STEP_COST
            };
            let g = current.g + step_cost;

            if g < g_scores[next_index] {
                g_scores[next_index] = g;
                came_from[next_index] = Some(current.cell);
                let h = heuristic(next, goal);
                seq += 1;
                open_set.push(OpenNode {
                    cell: next,
                    g,
                    f: g + h,
                    h,
                    seq,
                });
            }
        }
    }

    None
}
