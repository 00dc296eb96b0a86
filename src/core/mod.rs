pub mod cursor;
pub mod element;
pub mod timer;

pub use cursor::RotationCursor;
pub use element::{ElementId, EventKind};
pub use timer::{TimerHandle, TimerMode};
