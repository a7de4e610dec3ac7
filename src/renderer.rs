//! Frame assembly: one marched ray per terminal cell

use crate::march::{Glyph, Ray, RayMarcher};
use crate::scene::SceneParameters;
use crate::{HEIGHT, WIDTH};
use nalgebra::{Point3, Rotation3, Vector3};
use std::fmt;

/// Depth of the camera plane every ray starts from
pub const CAMERA_DEPTH: f64 = -10.0;

/// Vertical squash applied to row coordinates, since terminal cells are
/// roughly twice as tall as they are wide
pub fn aspect_correction() -> f64 {
    2.0 * HEIGHT as f64 / WIDTH as f64
}

/// Map a terminal cell to camera-space coordinates
///
/// Columns span -1..1; rows span the same range scaled by
/// [`aspect_correction`].
pub fn cell_to_camera(column: usize, row: usize) -> (f64, f64) {
    let x = column as f64 / WIDTH as f64 * 2.0 - 1.0;
    let y = (row as f64 / HEIGHT as f64 * 2.0 - 1.0) * aspect_correction();
    (x, y)
}

/// Scene rotation for a given angle: a turn about the y-axis taking
/// (x, z) to (x·cosθ − z·sinθ, x·sinθ + z·cosθ)
pub fn scene_rotation(angle: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), -angle)
}

/// The ray for one cell: the camera-plane point rotated into the scene,
/// looking along the rotated depth axis
pub fn camera_ray(rotation: &Rotation3<f64>, column: usize, row: usize) -> Ray {
    let (x, y) = cell_to_camera(column, row);
    Ray::new(rotation * Point3::new(x, y, CAMERA_DEPTH), rotation * Vector3::z())
}

/// A complete grid of glyphs, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: usize,
    glyphs: Vec<Glyph>,
}

impl Frame {
    pub fn get(&self, column: usize, row: usize) -> Glyph {
        self.glyphs[row * self.width + column]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.glyphs.chunks(self.width)
    }

    /// Number of cells that hit the torus
    pub fn coverage(&self) -> usize {
        self.glyphs.iter().filter(|g| **g != Glyph::Background).count()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut line = String::with_capacity(self.width + 1);
        for row in self.rows() {
            line.clear();
            line.extend(row.iter().map(|g| g.as_char()));
            line.push('\n');
            f.write_str(&line)?;
        }
        Ok(())
    }
}

/// Renders whole frames of the rotating torus
#[derive(Debug, Clone, Copy)]
pub struct FrameRenderer {
    marcher: RayMarcher,
}

impl FrameRenderer {
    pub fn new(params: &SceneParameters) -> Self {
        Self {
            marcher: RayMarcher::new(params),
        }
    }

    /// Render one frame with the scene rotated by `angle` radians
    ///
    /// Every cell in the frame shares the same rotation.
    pub fn render(&self, angle: f64) -> Frame {
        let rotation = scene_rotation(angle);
        let mut glyphs = Vec::with_capacity(WIDTH * HEIGHT);

        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                let ray = camera_ray(&rotation, column, row);
                glyphs.push(self.marcher.sample(&ray));
            }
        }

        Frame {
            width: WIDTH,
            glyphs,
        }
    }
}
