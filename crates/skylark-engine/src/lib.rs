pub mod api;
pub mod core;
pub mod input;
pub mod renderer;
pub mod runner;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig, RenderContext};
pub use api::types::{GameEvent, GameStatus};
pub use core::rng::Rng;
pub use core::time::FixedTimestep;
pub use input::latch::{InputLatch, KeyBindings};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::ScrollCamera;
pub use renderer::canvas::{Canvas, Color, ShapeVertex, TextAlign, TextCommand};
pub use renderer::traits::{Frame, Renderer};
pub use runner::{FrameDriver, GameRunner, Scheduler};
