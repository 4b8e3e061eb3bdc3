//! Session status and the events an engine reports to its observers.

use mino::piece::CELLS_PER_STATE;
use mino::{Cell, Cleared};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Ready,
    Running,
    Paused,
}

impl Status {
    pub fn name(self) -> &'static str {
        match self {
            Status::Ready => "ready",
            Status::Running => "running",
            Status::Paused => "paused",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Something observable happened inside the engine. Events are queued in the order the
/// changes were made and handed out by [`Engine::drain_events`](crate::Engine::drain_events).
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Event<T> {
    StatusChanged {
        status: Status,
        old: Status,
    },
    /// A piece became active at these cells.
    Spawned {
        cells: [Cell<T>; CELLS_PER_STATE],
    },
    /// The active piece was translated or rotated.
    Moved {
        from: [Cell<T>; CELLS_PER_STATE],
        to: [Cell<T>; CELLS_PER_STATE],
    },
    /// Full rows were removed and the stack compacted.
    RowsCleared(Cleared<T>),
    /// The active piece was committed to the matrix. `cells` holds only the cells that were
    /// actually stored.
    Fixed {
        cells: Vec<Cell<T>>,
    },
    Stopped,
}
