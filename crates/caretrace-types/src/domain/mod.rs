pub mod agent;
pub mod patient;
pub mod risk;
pub mod step;

pub use agent::*;
pub use patient::*;
pub use risk::*;
pub use step::*;
