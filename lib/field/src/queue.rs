//! Random piece source.

use mino::standard_rules::PieceType;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Uniformly random shapes with a fixed-size preview. A fresh shape is drawn on every
/// [`pop`](ShapeQueue::pop), so the preview is always full.
#[derive(Clone, Debug)]
pub struct ShapeQueue<R> {
    rng: R,
    upcoming: VecDeque<PieceType>,
    preview: usize,
}

impl ShapeQueue<SmallRng> {
    pub fn from_seed(seed: u64, preview: usize) -> Self {
        Self::new(SmallRng::seed_from_u64(seed), preview)
    }
}

impl<R: Rng> ShapeQueue<R> {
    /// `preview` is raised to 1 if smaller.
    pub fn new(rng: R, preview: usize) -> Self {
        let preview = preview.max(1);
        let mut queue = Self {
            rng,
            upcoming: VecDeque::with_capacity(preview + 1),
            preview,
        };
        while queue.upcoming.len() < preview {
            queue.enqueue();
        }
        queue
    }

    fn enqueue(&mut self) {
        let idx = self.rng.gen_range(0..PieceType::ALL.len());
        self.upcoming.push_back(PieceType::ALL[idx]);
    }

    pub fn preview(&self) -> usize {
        self.preview
    }

    pub fn upcoming(&self) -> impl Iterator<Item = PieceType> + '_ {
        self.upcoming.iter().copied()
    }

    /// The shape the next [`pop`](Self::pop) returns.
    pub fn peek(&self) -> PieceType {
        self.upcoming[0]
    }

    pub fn pop(&mut self) -> PieceType {
        let next = self.peek();
        self.upcoming.pop_front();
        self.enqueue();
        next
    }
}
