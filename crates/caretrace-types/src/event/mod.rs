pub mod event;
pub mod kind;
pub mod normalized;

pub use event::*;
pub use kind::*;
pub use normalized::*;
