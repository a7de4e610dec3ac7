//! Scene constants and the torus distance field

use nalgebra::{Point3, Vector2};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed parameters of the rotating torus scene
///
/// `Default` holds the values the renderer ships with. A YAML file may
/// override any subset of them (see [`crate::config`]).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneParameters {
    /// Distance from the torus center to the middle of the tube
    pub major_radius: f64,
    /// Full width of the tube cross-section
    pub thickness: f64,
    /// Offset used for central differences when estimating normals
    pub normal_epsilon: f64,
    /// Field distance at or below which a march counts as a hit
    pub hit_threshold: f64,
    /// Step budget for a single march
    pub max_steps: u32,
    /// Rotation speed in radians per second
    pub angular_speed: f64,
    /// Target frames per second
    pub frame_rate: f64,
}

impl Default for SceneParameters {
    fn default() -> Self {
        Self {
            major_radius: 0.4,
            thickness: 0.3,
            normal_epsilon: 0.001,
            hit_threshold: 0.01,
            max_steps: 30,
            angular_speed: 2.0,
            frame_rate: 30.0,
        }
    }
}

impl SceneParameters {
    /// The torus described by these parameters
    pub fn torus(&self) -> Torus {
        Torus::new(self.major_radius, self.thickness)
    }

    /// Fixed delay between frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate)
    }

    /// Rotation angle at the given clock reading
    pub fn rotation_angle(&self, seconds: f64) -> f64 {
        self.angular_speed * seconds
    }
}

/// Torus centered at the origin, lying in the xy-plane with its axis along z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    pub major_radius: f64,
    pub thickness: f64,
}

impl Torus {
    pub fn new(major_radius: f64, thickness: f64) -> Self {
        Self { major_radius, thickness }
    }

    /// Exact signed distance from `point` to the torus surface
    ///
    /// Negative inside the tube, zero on the surface, positive outside.
    /// Points on the z-axis are well defined.
    #[inline]
    pub fn distance(&self, point: &Point3<f64>) -> f64 {
        let radial = Vector2::new(point.x, point.y).norm();
        let q = Vector2::new(radial - self.major_radius, point.z);
        q.norm() - self.thickness / 2.0
    }

    /// The field as a plain function value, for code generic over any field
    pub fn field(&self) -> impl Fn(&Point3<f64>) -> f64 + Copy + '_ {
        move |p: &Point3<f64>| self.distance(p)
    }
}
