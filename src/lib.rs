pub mod bot;
pub mod grid;
pub mod observation;
pub mod pathfind;
pub mod signal;

pub use bot::{Direction, ExplorerBot, ExplorerConfig};
pub use grid::{CellKind, GridMemory, Pos};
pub use observation::Observation;
