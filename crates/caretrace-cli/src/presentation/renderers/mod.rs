mod console;
mod traits;

pub use console::ConsoleRenderer;
pub use traits::Renderer;
