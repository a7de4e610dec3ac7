//! Ray marching against the torus field and glyph selection

use crate::normal::estimate_normal;
use crate::scene::{SceneParameters, Torus};
use crate::GLYPH_ALPHABET;
use nalgebra::{Point3, Unit, Vector3};

/// Normals with a y component below this face the light
pub const LIT_THRESHOLD: f64 = -0.15;

/// Normals with a z component below this face the camera head-on
pub const FROSTED_THRESHOLD: f64 = -0.5;

/// A ray with a fixed direction
///
/// Marching only ever advances the depth along `direction`; the origin and
/// direction themselves never change during a march.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, depth: f64) -> Point3<f64> {
        self.origin + self.direction * depth
    }
}

/// One character of the rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Frosted and lit
    Bright,
    /// Frosted, in shadow
    Frosted,
    /// Lit side wall
    Lit,
    /// Unlit side wall
    Shadow,
    /// No surface
    Background,
}

impl Glyph {
    /// Pick the glyph for a surface point from its two lighting flags
    pub fn from_lighting(is_lit: bool, is_frosted: bool) -> Self {
        match (is_frosted, is_lit) {
            (true, true) => Glyph::Bright,
            (true, false) => Glyph::Frosted,
            (false, true) => Glyph::Lit,
            (false, false) => Glyph::Shadow,
        }
    }

    pub fn as_char(self) -> char {
        // Variant order matches the alphabet
        GLYPH_ALPHABET[self as usize]
    }
}

impl From<Glyph> for char {
    fn from(glyph: Glyph) -> char {
        glyph.as_char()
    }
}

/// Two-tone lighting derived from a surface normal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lighting {
    pub is_lit: bool,
    pub is_frosted: bool,
}

impl Lighting {
    pub fn from_normal(normal: &Unit<Vector3<f64>>) -> Self {
        Self {
            is_lit: normal.y < LIT_THRESHOLD,
            is_frosted: normal.z < FROSTED_THRESHOLD,
        }
    }

    pub fn glyph(self) -> Glyph {
        Glyph::from_lighting(self.is_lit, self.is_frosted)
    }
}

/// Result of marching a single ray
#[derive(Debug, Clone, Copy)]
pub enum MarchOutcome {
    Hit {
        point: Point3<f64>,
        /// `None` only if the field gradient vanished at the hit point
        normal: Option<Unit<Vector3<f64>>>,
        steps: u32,
    },
    Miss,
}

impl MarchOutcome {
    /// Glyph for this outcome
    pub fn glyph(&self) -> Glyph {
        match self {
            MarchOutcome::Hit { normal: Some(normal), .. } => Lighting::from_normal(normal).glyph(),
            MarchOutcome::Hit { normal: None, .. } => {
                tracing::trace!("degenerate normal at hit point, shading as unlit");
                Glyph::Shadow
            }
            MarchOutcome::Miss => Glyph::Background,
        }
    }
}

/// Fixed-budget sphere tracer over the torus field
#[derive(Debug, Clone, Copy)]
pub struct RayMarcher {
    torus: Torus,
    hit_threshold: f64,
    max_steps: u32,
    normal_epsilon: f64,
}

impl RayMarcher {
    pub fn new(params: &SceneParameters) -> Self {
        Self {
            torus: params.torus(),
            hit_threshold: params.hit_threshold,
            max_steps: params.max_steps,
            normal_epsilon: params.normal_epsilon,
        }
    }

    /// March `ray` until the field drops to the hit threshold or the step
    /// budget runs out
    ///
    /// Each step evaluates the field at the current depth and, on a miss,
    /// advances the depth by exactly that distance.
    pub fn march(&self, ray: &Ray) -> MarchOutcome {
        let field = self.torus.field();
        let mut depth = 0.0;

        for step in 0..self.max_steps {
            let point = ray.at(depth);
            let d = field(&point);

            if d <= self.hit_threshold {
                return MarchOutcome::Hit {
                    point,
                    normal: estimate_normal(field, &point, self.normal_epsilon),
                    steps: step + 1,
                };
            }

            depth += d;
        }

        MarchOutcome::Miss
    }

    /// March `ray` and shade the result
    pub fn sample(&self, ray: &Ray) -> Glyph {
        self.march(ray).glyph()
    }
}
