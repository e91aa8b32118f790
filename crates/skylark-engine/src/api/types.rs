use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Session status owned by the host UI layer.
///
/// The engine never transitions this itself — the host writes it into the
/// runner and the runner gates the simulation on it. Rendering runs in every
/// status so pause/menu overlays sit on top of a live frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Playing,
    Paused,
    Complete,
}

/// A game event communicated from game logic to the host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// Event with a kind and no payload.
    pub fn signal(kind: f32) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}
