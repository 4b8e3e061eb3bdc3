//! Single-player game: the engine fed by a shape queue, with scoring.

use mino::standard_rules::{Piece, PieceType};
use mino::Input;
use rand::Rng;

use crate::config::Config;
use crate::engine::Engine;
use crate::event::{Event, Status};
use crate::queue::ShapeQueue;
use crate::scoring::ScoreSystem;

pub struct Game<R> {
    engine: Engine<PieceType>,
    queue: ShapeQueue<R>,
    scores: ScoreSystem,
    pieces_placed: u32,
}

impl<R: Rng> Game<R> {
    pub fn new(config: &Config, queue: ShapeQueue<R>) -> Result<Self, mino::Error> {
        let engine = Engine::from_config(config)?;
        let scores = ScoreSystem::new(engine.matrix().rows() as u32);
        Ok(Self {
            engine,
            queue,
            scores,
            pieces_placed: 0,
        })
    }

    pub fn engine(&self) -> &Engine<PieceType> {
        &self.engine
    }

    pub fn queue(&self) -> &ShapeQueue<R> {
        &self.queue
    }

    pub fn scores(&self) -> &ScoreSystem {
        &self.scores
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn status(&self) -> Status {
        self.engine.status()
    }

    /// Start a new session and spawn the first piece. Does nothing unless ready.
    pub fn start(&mut self) -> Vec<Event<PieceType>> {
        if self.engine.start() {
            self.scores.reset();
            self.pieces_placed = 0;
            self.spawn_next();
        }
        self.pump()
    }

    pub fn pause(&mut self) -> Vec<Event<PieceType>> {
        self.engine.pause();
        self.pump()
    }

    pub fn resume(&mut self) -> Vec<Event<PieceType>> {
        self.engine.resume();
        self.pump()
    }

    pub fn toggle(&mut self) -> Vec<Event<PieceType>> {
        if self.engine.status() == Status::Ready {
            return self.start();
        }
        self.engine.toggle();
        self.pump()
    }

    pub fn stop(&mut self) -> Vec<Event<PieceType>> {
        self.engine.stop();
        self.pump()
    }

    pub fn tick(&mut self) -> Vec<Event<PieceType>> {
        self.engine.tick();
        self.pump()
    }

    pub fn apply(&mut self, input: Input) -> Vec<Event<PieceType>> {
        self.engine.apply(input);
        self.pump()
    }

    fn spawn_next(&mut self) -> bool {
        let shape = self.queue.pop();
        self.engine.spawn(Piece::from_shape(shape))
    }

    /// Drain engine events, reacting to clears and locks, until the engine is quiet.
    fn pump(&mut self) -> Vec<Event<PieceType>> {
        let mut out = Vec::new();
        loop {
            let events = self.engine.drain_events();
            if events.is_empty() {
                break;
            }

            let mut fixed = false;
            for event in &events {
                match event {
                    Event::RowsCleared(cleared) => {
                        let lines = cleared.rows.len() as u32;
                        let points = self.scores.add_lines(lines);
                        debug!("{lines} lines for {points} points, score {}", self.scores.score());
                    }
                    Event::Fixed { .. } => {
                        self.pieces_placed += 1;
                        fixed = true;
                    }
                    Event::Stopped => {
                        info!(
                            "stopped after {} pieces, score {}",
                            self.pieces_placed,
                            self.scores.score()
                        );
                    }
                    _ => {}
                }
            }
            out.extend(events);

            if fixed {
                self.spawn_next();
            }
        }
        out
    }
}
