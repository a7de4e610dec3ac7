//! Surface normals from central differences of a distance field

use nalgebra::{Point3, Unit, Vector3};

/// Estimate the outward unit normal of `field` at `point`
///
/// Samples the field `epsilon` either side of the point along each axis and
/// normalizes the resulting gradient. Returns `None` when the gradient
/// vanishes, which only happens far from any surface.
pub fn estimate_normal<F>(field: F, point: &Point3<f64>, epsilon: f64) -> Option<Unit<Vector3<f64>>>
where
    F: Fn(&Point3<f64>) -> f64,
{
    let ex = Vector3::new(epsilon, 0.0, 0.0);
    let ey = Vector3::new(0.0, epsilon, 0.0);
    let ez = Vector3::new(0.0, 0.0, epsilon);

    let gradient = Vector3::new(
        field(&(point + ex)) - field(&(point - ex)),
        field(&(point + ey)) - field(&(point - ey)),
        field(&(point + ez)) - field(&(point - ez)),
    );

    Unit::try_new(gradient, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneParameters;

    #[test]
    fn test_outer_equator_normal_points_outward() {
        let params = SceneParameters::default();
        let torus = params.torus();
        let r = torus.major_radius + torus.thickness / 2.0;

        let n = estimate_normal(torus.field(), &Point3::new(r, 0.0, 0.0), params.normal_epsilon).unwrap();
        assert!((n.x - 1.0).abs() < 1e-3);
        assert!(n.y.abs() < 1e-3);
        assert!(n.z.abs() < 1e-3);

        let n = estimate_normal(torus.field(), &Point3::new(0.0, -r, 0.0), params.normal_epsilon).unwrap();
        assert!(n.x.abs() < 1e-3);
        assert!((n.y + 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_top_of_tube_normal() {
        let params = SceneParameters::default();
        let torus = params.torus();
        let p = Point3::new(torus.major_radius, 0.0, -torus.thickness / 2.0);

        let n = estimate_normal(torus.field(), &p, params.normal_epsilon).unwrap();
        assert!((n.z + 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_normal_is_unit_length() {
        let params = SceneParameters::default();
        let torus = params.torus();
        let p = Point3::new(0.3, 0.35, 0.1);

        let n = estimate_normal(torus.field(), &p, params.normal_epsilon).unwrap();
        assert!((n.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_works_with_any_field() {
        let plane = |p: &Point3<f64>| p.y - 1.0;
        let n = estimate_normal(plane, &Point3::new(5.0, 1.0, -2.0), 0.001).unwrap();
        assert!((n.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_field_has_no_normal() {
        let constant = |_: &Point3<f64>| 2.5;
        assert!(estimate_normal(constant, &Point3::origin(), 0.001).is_none());
    }
}
