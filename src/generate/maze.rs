//! Randomized depth-first backtracking maze.
//!
//! Cells with two even coordinates are rooms; the odd cells between them are
//! walls. Carving starts at (0, 0) and knocks down the wall between the
//! current room and a random unvisited room two cells away, backtracking when
//! a room has no unvisited neighbours left. Every room ends up connected by
//! exactly one path, and the corridors (rooms plus carved walls) are the
//! `true` cells of the result.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::pattern::Pattern;

/// Up, right, down, left.
const DIRECTIONS: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// One pending room on the carving stack: the room itself, its direction
/// order, and how many of those directions have been tried.
struct Frame {
    x: usize,
    y: usize,
    dirs: [(i64, i64); 4],
    next: usize,
}

impl Frame {
    fn enter<R: Rng + ?Sized>(x: usize, y: usize, rng: &mut R) -> Self {
        let mut dirs = DIRECTIONS;
        dirs.shuffle(rng);
        Self { x, y, dirs, next: 0 }
    }
}

/// Carve a maze using the supplied random source.
///
/// The work stack lives on the heap, so grid size is limited by memory only.
pub fn maze<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Pattern> {
    let mut pattern = Pattern::new(width, height)?;
    let mut visited = vec![false; width * height];
    let mut rooms = 1usize;

    visited[0] = true;
    pattern.set(0, 0, true);
    let mut stack = vec![Frame::enter(0, 0, rng)];
    let mut max_depth = 1usize;

    while let Some(frame) = stack.last_mut() {
        let next = frame.next;
        if next == DIRECTIONS.len() {
            stack.pop();
            continue;
        }
        frame.next += 1;
        let (dx, dy) = frame.dirs[next];
        let (x, y) = (frame.x as i64, frame.y as i64);

        let nx = x + dx * 2;
        let ny = y + dy * 2;
        if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
            continue;
        }
        let (nx, ny) = (nx as usize, ny as usize);
        if visited[ny * width + nx] {
            continue;
        }

        pattern.set((x + dx) as usize, (y + dy) as usize, true);
        pattern.set(nx, ny, true);
        visited[ny * width + nx] = true;
        rooms += 1;

        stack.push(Frame::enter(nx, ny, rng));
        max_depth = max_depth.max(stack.len());
    }

    log::debug!("maze {width}x{height}: carved {rooms} rooms, max stack depth {max_depth}");
    Ok(pattern)
}

/// Reproducible maze from a fixed seed.
pub fn maze_seeded(width: usize, height: usize, seed: u64) -> Result<Pattern> {
    let mut rng = StdRng::seed_from_u64(seed);
    maze(width, height, &mut rng)
}
