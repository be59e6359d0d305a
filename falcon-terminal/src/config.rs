/// Front-end tuning: frame rate, pointer mapping and animation timings.
use crossterm::event::KeyCode;

pub const TARGET_FPS: u64 = 30;

/// Pointer positions are mapped onto a virtual viewport of this size so the
/// flight envelope does not depend on the terminal's cell count.
pub const VIEWPORT_WIDTH: f32 = 1280.0;
pub const VIEWPORT_HEIGHT: f32 = 720.0;

/// Seconds for the craft to catch up with the pointer
pub const FOLLOW_SECONDS: f32 = 1.0;

/// Lateral travel at the viewport edge
pub const FOLLOW_RANGE_X: f32 = 100.0;

/// Depth travel per viewport pixel is `1 / FOLLOW_DEPTH_DIVISOR`
pub const FOLLOW_DEPTH_DIVISOR: f32 = 2.5;

/// Engine halo stretch at the right edge of the viewport
pub const HALO_STRETCH: f32 = 1.5;

pub const LOOP_SECONDS: f32 = 2.0;

pub const BLAST_SECONDS: f32 = 0.5;
pub const BLAST_DISTANCE: f32 = 1000.0;

pub const FIRE_KEY: KeyCode = KeyCode::Char(' ');
pub const QUIT_KEYS: [KeyCode; 2] = [KeyCode::Char('q'), KeyCode::Esc];

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "falcon=info";
