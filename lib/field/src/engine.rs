//! Active piece orchestration on top of the matrix.

use mino::piece::CELLS_PER_STATE;
use mino::{Input, Locked, Matrix, Piece, Side};
use std::fmt::Debug;

use crate::config::Config;
use crate::event::{Event, Status};

/// Borders a rotation may not cross. The top is left out so pieces can rotate while still
/// partly above the visible field.
const ROTATION_BORDERS: [Side; 3] = [Side::Bottom, Side::Left, Side::Right];

/// Outcome of a downward move request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Descent {
    /// The piece fell this many rows.
    Moved(u32),
    /// The piece could not fall and was committed to the matrix.
    Locked { cleared: usize },
    /// Not running, or there is no active piece.
    Idle,
}

impl Descent {
    pub fn changed(self) -> bool {
        match self {
            Descent::Moved(n) => n > 0,
            Descent::Locked { .. } => true,
            Descent::Idle => false,
        }
    }
}

pub struct Engine<T> {
    matrix: Matrix<T>,
    active: Option<Piece<T>>,
    status: Status,
    events: Vec<Event<T>>,
}

impl<T: Copy + Debug> Engine<T> {
    pub fn new(rows: i32, cols: i32) -> Result<Self, mino::Error> {
        Ok(Self {
            matrix: Matrix::new(rows, cols)?,
            active: None,
            status: Status::Ready,
            events: Vec::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, mino::Error> {
        Self::new(config.row_count, config.col_count)
    }

    pub fn matrix(&self) -> &Matrix<T> {
        &self.matrix
    }

    pub fn active(&self) -> Option<&Piece<T>> {
        self.active.as_ref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Events produced since the last drain, oldest first.
    pub fn events(&self) -> &[Event<T>] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<Event<T>> {
        std::mem::take(&mut self.events)
    }

    fn set_status(&mut self, status: Status) {
        let old = self.status;
        if old == status {
            return;
        }
        info!("status {old} -> {status}");
        self.status = status;
        self.events.push(Event::StatusChanged { status, old });
    }

    /// Begin a new session with an empty matrix. Only acts from [`Status::Ready`].
    pub fn start(&mut self) -> bool {
        if self.status != Status::Ready {
            return false;
        }
        self.matrix.clear();
        self.active = None;
        self.set_status(Status::Running);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.status != Status::Running {
            return false;
        }
        self.set_status(Status::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != Status::Paused {
            return false;
        }
        self.set_status(Status::Running);
        true
    }

    pub fn toggle(&mut self) -> bool {
        match self.status {
            Status::Ready => self.start(),
            Status::Running => self.pause(),
            Status::Paused => self.resume(),
        }
    }

    /// End the session. The matrix is kept until the next [`start`](Self::start).
    pub fn stop(&mut self) {
        self.set_status(Status::Ready);
        self.events.push(Event::Stopped);
    }

    /// Make `piece` the active piece at the spawn position. Returns `false` (and stops the
    /// session) if there is no room for it.
    pub fn spawn(&mut self, mut piece: Piece<T>) -> bool {
        let col = self.matrix.cols() / 2 - 2;

        piece.move_to(-1, col);
        if self.matrix.is_overlap(piece.current()) {
            piece.move_to(-2, col);
        }
        if self.matrix.is_overlap(piece.current()) {
            info!("no room to spawn {:?}, game over", piece.tag());
            self.active = None;
            self.stop();
            return false;
        }

        debug!("spawned {:?} at {:?}", piece.tag(), piece.anchor());
        self.events.push(Event::Spawned {
            cells: *piece.current(),
        });
        self.active = Some(piece);
        true
    }

    /// Move the active piece down by up to `step` rows. If the clamped step is 0 the piece
    /// is locked instead.
    pub fn move_down(&mut self, step: u32) -> Descent {
        if !self.is_running() {
            return Descent::Idle;
        }
        let Some(piece) = self.active.as_ref() else {
            return Descent::Idle;
        };

        if self.matrix.clamp_step(piece.current(), step, Side::Bottom) == 0 {
            return self.lock();
        }
        Descent::Moved(self.shift(Side::Bottom, step))
    }

    pub fn move_left(&mut self, step: u32) -> u32 {
        if !self.is_running() {
            return 0;
        }
        self.shift(Side::Left, step)
    }

    pub fn move_right(&mut self, step: u32) -> u32 {
        if !self.is_running() {
            return 0;
        }
        self.shift(Side::Right, step)
    }

    fn shift(&mut self, side: Side, step: u32) -> u32 {
        let Some(piece) = self.active.as_mut() else {
            return 0;
        };
        let step = self.matrix.clamp_step(piece.current(), step, side);
        if step > 0 {
            let from = *piece.current();
            piece.shift(side, step as i32);
            trace!("{:?} moved {step} toward {side:?}", piece.tag());
            self.events.push(Event::Moved {
                from,
                to: *piece.current(),
            });
        }
        step
    }

    /// Advance the active piece to its next rotation state if that state fits.
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if piece.rotation_count() < 2 {
            return false;
        }

        let blocked = piece.next().iter().any(|cell| {
            let (row, col) = cell.pos();
            self.matrix.is_over_borders(row, col, &ROTATION_BORDERS)
                || self.matrix.is_occupied(row, col)
        });
        if blocked {
            trace!("{:?} rotation blocked", piece.tag());
            return false;
        }

        let from = *piece.current();
        piece.rotate();
        self.events.push(Event::Moved {
            from,
            to: *piece.current(),
        });
        true
    }

    /// One scheduler tick.
    pub fn tick(&mut self) -> Descent {
        self.move_down(1)
    }

    /// Dispatch a player input. Returns whether anything changed.
    pub fn apply(&mut self, input: Input) -> bool {
        match input {
            Input::Left => self.move_left(1) > 0,
            Input::Right => self.move_right(1) > 0,
            Input::Down => self.move_down(1).changed(),
            Input::Rotate => self.rotate(),
            Input::SonicDrop => self.move_down(u32::MAX).changed(),
        }
    }

    fn lock(&mut self) -> Descent {
        let Some(piece) = self.active.take() else {
            return Descent::Idle;
        };
        let tag = piece.tag();
        let Locked { cells, cleared } = self.matrix.lock(piece.into_cells());

        let rows = cleared.as_ref().map_or(0, |cl| cl.rows.len());
        if let Some(cleared) = cleared {
            debug!("cleared rows {:?}", cleared.rows);
            self.events.push(Event::RowsCleared(cleared));
        }
        if cells.len() < CELLS_PER_STATE {
            debug!("{tag:?} locked, {} cells dropped", CELLS_PER_STATE - cells.len());
        } else {
            debug!("{tag:?} locked");
        }
        self.events.push(Event::Fixed { cells });

        Descent::Locked { cleared: rows }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use mino::standard_rules::{Piece, PieceType};
    use mino::Cell;

    fn running(rows: i32, cols: i32) -> Engine<PieceType> {
        let mut engine = Engine::new(rows, cols).unwrap();
        assert!(engine.start());
        engine.drain_events();
        engine
    }

    fn coords(cells: &[Cell<PieceType>]) -> Vec<(i32, i32)> {
        let mut v = cells.iter().map(Cell::pos).collect::<Vec<_>>();
        v.sort();
        v
    }

    fn active_coords(engine: &Engine<PieceType>) -> Vec<(i32, i32)> {
        coords(engine.active().unwrap().current())
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert!(Engine::<PieceType>::new(0, 10).is_err());
        assert!(Engine::<PieceType>::from_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_spawn_position() {
        let mut engine = running(20, 10);
        assert!(engine.spawn(Piece::from_shape(PieceType::T)));
        assert_eq!(engine.active().unwrap().anchor(), (-1, 3));
        assert_eq!(active_coords(&engine), [(0, 4), (0, 5), (0, 6), (1, 5)]);
        assert!(matches!(engine.drain_events()[..], [Event::Spawned { .. }]));
    }

    #[test]
    fn test_spawn_retries_higher() {
        let mut engine = running(20, 10);
        engine.matrix.lock([Cell::new(1, 5, PieceType::O)]);
        assert!(engine.spawn(Piece::from_shape(PieceType::T)));
        assert_eq!(engine.active().unwrap().anchor(), (-2, 3));
        assert_eq!(active_coords(&engine), [(-1, 4), (-1, 5), (-1, 6), (0, 5)]);
    }

    #[test]
    fn test_spawn_blocked_stops() {
        let mut engine = running(2, 10);
        engine.matrix.lock([Cell::new(0, 4, PieceType::O)]);
        assert!(!engine.spawn(Piece::from_shape(PieceType::O)));
        assert!(engine.active().is_none());
        assert_eq!(engine.status(), Status::Ready);
        assert_eq!(
            engine.drain_events(),
            [
                Event::StatusChanged {
                    status: Status::Ready,
                    old: Status::Running
                },
                Event::Stopped
            ]
        );
        // the final board stays visible
        assert!(engine.matrix().is_occupied(0, 4));
    }

    #[test]
    fn test_horizontal_moves_clamp() {
        let mut engine = running(20, 10);
        engine.spawn(Piece::from_shape(PieceType::O));
        assert_eq!(engine.move_right(5), 4);
        assert_eq!(active_coords(&engine), [(0, 8), (0, 9), (1, 8), (1, 9)]);
        assert_eq!(engine.move_right(1), 0);
        assert!(!engine.apply(Input::Right));
        assert_eq!(engine.move_left(10), 8);
        assert!(engine.apply(Input::Right));
        assert_eq!(active_coords(&engine), [(0, 1), (0, 2), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_moves_stop_at_locked_cells() {
        let mut engine = running(20, 10);
        engine.matrix.lock([Cell::new(1, 1, PieceType::I), Cell::new(10, 5, PieceType::I)]);
        engine.spawn(Piece::from_shape(PieceType::O));
        assert_eq!(engine.move_left(9), 2);
        assert_eq!(engine.move_right(2), 2);
        assert_eq!(engine.move_down(u32::MAX), Descent::Moved(8));
        assert_eq!(active_coords(&engine), [(8, 4), (8, 5), (9, 4), (9, 5)]);
    }

    #[test]
    fn test_lock_happens_once() {
        let mut engine = running(20, 10);
        engine.spawn(Piece::from_shape(PieceType::O));
        engine.drain_events();

        assert_eq!(engine.move_down(u32::MAX), Descent::Moved(18));
        assert_eq!(engine.tick(), Descent::Locked { cleared: 0 });
        assert_eq!(engine.tick(), Descent::Idle);
        assert!(engine.active().is_none());

        let events = engine.drain_events();
        assert_eq!(events.len(), 2);
        let Event::Fixed { cells } = &events[1] else {
            panic!("expected Fixed, got {events:?}");
        };
        assert_eq!(coords(cells), [(18, 4), (18, 5), (19, 4), (19, 5)]);
        assert_eq!(engine.matrix().cells().count(), 4);
    }

    #[test]
    fn test_zero_step_locks() {
        let mut engine = running(20, 10);
        engine.spawn(Piece::from_shape(PieceType::O));
        engine.drain_events();

        assert_eq!(engine.move_down(0), Descent::Locked { cleared: 0 });
        assert!(engine.active().is_none());
        assert!(!engine.apply(Input::Down));
        let events = engine.drain_events();
        assert_eq!(events.len(), 1);
        let Event::Fixed { cells } = &events[0] else {
            panic!("expected Fixed, got {events:?}");
        };
        assert_eq!(coords(cells), [(0, 4), (0, 5), (1, 4), (1, 5)]);
    }

    #[test]
    fn test_lock_drops_hidden_cells() {
        let mut engine = running(20, 10);
        engine.matrix.lock([Cell::new(1, 5, PieceType::O)]);
        assert!(engine.spawn(Piece::from_shape(PieceType::T)));
        engine.drain_events();

        assert_eq!(engine.tick(), Descent::Locked { cleared: 0 });
        let events = engine.drain_events();
        let Event::Fixed { cells } = &events[0] else {
            panic!("expected Fixed, got {events:?}");
        };
        assert_eq!(coords(cells), [(0, 5)]);
        assert_eq!(engine.matrix().cells().count(), 2);
    }

    #[test]
    fn test_rotation_blocked_by_right_wall() {
        let mut engine = running(20, 10);
        engine.spawn(Piece::from_shape(PieceType::I));
        assert!(engine.rotate());
        assert_eq!(engine.move_right(10), 4);
        assert_eq!(active_coords(&engine), [(-1, 9), (0, 9), (1, 9), (2, 9)]);

        // the horizontal state would cover columns 7..=10
        assert!(!engine.rotate());
        assert_eq!(engine.active().unwrap().rotation_index(), 1);

        assert_eq!(engine.move_left(1), 1);
        assert!(engine.rotate());
        assert_eq!(active_coords(&engine), [(0, 6), (0, 7), (0, 8), (0, 9)]);
    }

    #[test]
    fn test_rotation_ignores_top_border() {
        let mut engine = running(20, 10);
        engine.spawn(Piece::from_shape(PieceType::I));
        assert!(engine.rotate());
        assert_eq!(active_coords(&engine), [(-1, 5), (0, 5), (1, 5), (2, 5)]);

        // flush against the left wall the horizontal state would stick out
        assert_eq!(engine.move_left(10), 5);
        assert!(!engine.rotate());
        assert!(!engine.apply(Input::Rotate));
        assert_eq!(engine.active().unwrap().rotation_index(), 1);
    }

    #[test]
    fn test_rotation_blocked_by_floor() {
        let mut engine = running(20, 10);
        engine.spawn(Piece::from_shape(PieceType::T));
        assert!(engine.rotate());
        assert!(engine.rotate());
        assert_eq!(engine.move_down(u32::MAX), Descent::Moved(19));
        assert_eq!(active_coords(&engine), [(18, 5), (19, 4), (19, 5), (19, 6)]);
        assert!(!engine.rotate());
        assert_eq!(engine.active().unwrap().rotation_index(), 2);
    }

    #[test]
    fn test_rotation_blocked_by_cells() {
        let mut engine = running(20, 10);
        engine.spawn(Piece::from_shape(PieceType::T));
        assert_eq!(engine.move_down(5), Descent::Moved(5));
        engine.matrix.lock([Cell::new(4, 5, PieceType::O)]);
        assert!(!engine.rotate());
        assert_eq!(engine.active().unwrap().rotation_index(), 0);
    }

    #[test]
    fn test_single_state_rotation_is_noop() {
        let mut engine = running(20, 10);
        engine.spawn(Piece::from_shape(PieceType::O));
        engine.drain_events();
        assert!(!engine.rotate());
        assert!(engine.events().is_empty());
    }

    #[test]
    fn test_status_gating() {
        let mut engine = Engine::<PieceType>::new(20, 10).unwrap();
        assert_eq!(engine.tick(), Descent::Idle);
        assert!(!engine.pause());
        assert!(!engine.resume());

        assert!(engine.toggle());
        assert_eq!(engine.status(), Status::Running);
        assert!(!engine.start());
        engine.spawn(Piece::from_shape(PieceType::L));

        assert!(engine.toggle());
        assert_eq!(engine.status(), Status::Paused);
        assert_eq!(engine.move_left(1), 0);
        assert_eq!(engine.move_down(1), Descent::Idle);
        assert!(!engine.rotate());
        assert!(!engine.apply(Input::SonicDrop));

        assert!(engine.resume());
        assert_eq!(engine.move_left(1), 1);
        assert_eq!(engine.tick(), Descent::Moved(1));

        let statuses = engine
            .drain_events()
            .into_iter()
            .filter_map(|ev| match ev {
                Event::StatusChanged { status, .. } => Some(status),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(statuses, [Status::Running, Status::Paused, Status::Running]);
    }

    #[test]
    fn test_stop_then_restart_clears() {
        let mut engine = running(20, 10);
        engine.spawn(Piece::from_shape(PieceType::O));
        engine.apply(Input::SonicDrop);
        engine.apply(Input::Down);
        assert_eq!(engine.matrix().cells().count(), 4);

        engine.stop();
        engine.stop();
        assert_eq!(
            engine.drain_events().into_iter().rev().take(3).collect::<Vec<_>>(),
            [
                Event::Stopped,
                Event::Stopped,
                Event::StatusChanged {
                    status: Status::Ready,
                    old: Status::Running
                },
            ]
        );
        assert_eq!(engine.matrix().cells().count(), 4);

        assert!(engine.start());
        assert_eq!(engine.matrix().cells().count(), 0);
        assert!(engine.active().is_none());
    }

    #[test]
    fn test_lock_clears_row() {
        let mut engine = running(6, 5);
        engine.spawn(Piece::from_shape(PieceType::I));
        assert_eq!(active_coords(&engine), [(0, 0), (0, 1), (0, 2), (0, 3)]);
        engine
            .matrix
            .lock([Cell::new(5, 4, PieceType::T), Cell::new(4, 4, PieceType::T)]);
        engine.drain_events();

        assert_eq!(engine.move_down(u32::MAX), Descent::Moved(5));
        assert_eq!(engine.tick(), Descent::Locked { cleared: 1 });

        let events = engine.drain_events();
        assert_eq!(events.len(), 3);
        let Event::RowsCleared(cleared) = &events[1] else {
            panic!("expected RowsCleared, got {events:?}");
        };
        assert_eq!(cleared.rows, [5]);
        assert_eq!(cleared.before.len(), 6);
        assert_eq!(coords(&cleared.after), [(5, 4)]);
        assert!(matches!(&events[2], Event::Fixed { cells } if cells.len() == 4));
        assert_eq!(engine.matrix().get(5, 4).map(Cell::tag), Some(PieceType::T));
        assert_eq!(engine.matrix().cells().count(), 1);
    }
}
