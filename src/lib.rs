//! ASCII torus renderer
//!
//! This library ray marches the signed distance field of a rotating torus and
//! turns every terminal cell into one of a handful of shading glyphs.

pub mod animation;
pub mod config;
pub mod march;
pub mod normal;
pub mod renderer;
pub mod scene;
pub mod terminal;

pub use animation::{Animator, Clock, FrameStats, SystemClock};
pub use config::ConfigError;
pub use march::{Glyph, MarchOutcome, RayMarcher};
pub use renderer::{Frame, FrameRenderer};
pub use scene::{SceneParameters, Torus};
pub use terminal::{RenderError, TerminalDisplay};

/// Viewport width in terminal cells
pub const WIDTH: usize = 80;

/// Viewport height in terminal cells
pub const HEIGHT: usize = 20;

/// Every character a frame can contain, brightest surface first
pub const GLYPH_ALPHABET: [char; 5] = ['@', '#', '=', '.', ' '];
