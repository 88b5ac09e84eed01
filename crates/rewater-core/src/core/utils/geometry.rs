use nalgebra::{Point3, Vector3};
use thiserror::Error;

const MIN_BOND_LENGTH: f64 = 1.0e-4;
const MIN_BISECTOR_NORM: f64 = 1.0e-4;
const MAX_BISECTOR_NORM: f64 = 1.9999;

/// Distances at or below this magnitude mean "no such site".
pub const SITE_DISTANCE_THRESHOLD: f64 = 1.0e-4;

/// Target geometry of a rigid water model. Lengths in Angstrom, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterGeometry {
    pub r_oh: f64,
    pub angle: f64,
    pub r_om: f64,
    pub r_ol: f64,
    pub lp_angle: f64,
}

impl WaterGeometry {
    pub fn has_m_site(&self) -> bool {
        self.r_om.abs() > SITE_DISTANCE_THRESHOLD
    }

    pub fn has_lone_pairs(&self) -> bool {
        self.r_ol.abs() > SITE_DISTANCE_THRESHOLD
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("bad input water structure (O-H distance below 0.0001 A)")]
    ShortBond,
    #[error("bad input water structure (O-H bonds are collinear)")]
    Collinear,
}

/// Idealized positions of one water molecule, in the units of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealWater {
    pub oxygen: Point3<f64>,
    pub h1: Point3<f64>,
    pub h2: Point3<f64>,
    pub m_site: Option<Point3<f64>>,
    pub lone_pairs: Option<[Point3<f64>; 2]>,
}

impl IdealWater {
    /// Virtual sites in output order: the M site first, then both lone pairs.
    pub fn extra_sites(&self) -> Vec<Point3<f64>> {
        self.m_site
            .into_iter()
            .chain(self.lone_pairs.into_iter().flatten())
            .collect()
    }
}

/// Places the hydrogens (and any virtual sites) of a water molecule on the target geometry.
///
/// The oxygen stays where it is. The original H-O-H bisector and molecular plane are kept,
/// while bond length and angle are forced to the values in `params`. Lone pairs sit on the
/// side opposite the hydrogens, symmetric about the bisector and out of the H-O-H plane.
pub fn idealize_water(
    oxygen: &Point3<f64>,
    h1: &Point3<f64>,
    h2: &Point3<f64>,
    params: &WaterGeometry,
) -> Result<IdealWater, GeometryError> {
    let oh1 = h1 - oxygen;
    let oh2 = h2 - oxygen;
    if oh1.norm() < MIN_BOND_LENGTH || oh2.norm() < MIN_BOND_LENGTH {
        return Err(GeometryError::ShortBond);
    }
    let v1 = oh1.normalize();
    let v2 = oh2.normalize();

    let sum = v1 + v2;
    let sum_norm = sum.norm();
    if !(MIN_BISECTOR_NORM..=MAX_BISECTOR_NORM).contains(&sum_norm) {
        return Err(GeometryError::Collinear);
    }
    let bisector: Vector3<f64> = sum / sum_norm;
    let in_plane = (v1 - v2).normalize();

    let half_angle = (params.angle / 2.0).to_radians();
    let along_bisector = bisector * (half_angle.cos() * params.r_oh);
    let across = in_plane * (half_angle.sin() * params.r_oh);

    let m_site = params
        .has_m_site()
        .then(|| oxygen + bisector * params.r_om);

    let lone_pairs = params.has_lone_pairs().then(|| {
        let normal = bisector.cross(&in_plane);
        let half_lp = (params.lp_angle / 2.0).to_radians();
        let out_of_plane = normal * (half_lp.sin() * params.r_ol);
        let backwards = bisector * (half_lp.cos() * params.r_ol);
        [
            oxygen + out_of_plane - backwards,
            oxygen - out_of_plane - backwards,
        ]
    });

    Ok(IdealWater {
        oxygen: *oxygen,
        h1: oxygen + along_bisector + across,
        h2: oxygen + along_bisector - across,
        m_site,
        lone_pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    fn tip3p() -> WaterGeometry {
        WaterGeometry {
            r_oh: 0.9572,
            angle: 104.52,
            r_om: 0.0,
            r_ol: 0.0,
            lp_angle: 0.0,
        }
    }

    fn tip4p() -> WaterGeometry {
        WaterGeometry {
            r_om: 0.15,
            ..tip3p()
        }
    }

    fn tip5p() -> WaterGeometry {
        WaterGeometry {
            r_ol: 0.7,
            lp_angle: 109.47,
            ..tip3p()
        }
    }

    fn angle_degrees(center: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
        (a - center).angle(&(b - center)).to_degrees()
    }

    fn raw_water() -> (Point3<f64>, Point3<f64>, Point3<f64>) {
        (
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.957, 0.0, 0.0),
            Point3::new(-0.240, 0.927, 0.0),
        )
    }

    #[test]
    fn hydrogens_are_placed_at_target_distance_and_angle() {
        let (o, h1, h2) = raw_water();
        let ideal = idealize_water(&o, &h1, &h2, &tip3p()).unwrap();

        assert!(((ideal.h1 - o).norm() - 0.9572).abs() < TOLERANCE);
        assert!(((ideal.h2 - o).norm() - 0.9572).abs() < TOLERANCE);
        assert!((angle_degrees(&o, &ideal.h1, &ideal.h2) - 104.52).abs() < TOLERANCE);
        assert_eq!(ideal.oxygen, o);
        assert!(ideal.extra_sites().is_empty());
    }

    #[test]
    fn original_bisector_and_plane_are_preserved() {
        let o = Point3::new(3.0, -1.0, 2.0);
        let h1 = Point3::new(3.9, -0.7, 2.1);
        let h2 = Point3::new(2.8, -0.1, 2.3);
        let ideal = idealize_water(&o, &h1, &h2, &tip3p()).unwrap();

        let old_bisector = ((h1 - o).normalize() + (h2 - o).normalize()).normalize();
        let new_bisector = ((ideal.h1 - o).normalize() + (ideal.h2 - o).normalize()).normalize();
        assert!((old_bisector - new_bisector).norm() < TOLERANCE);

        let old_normal = (h1 - o).cross(&(h2 - o)).normalize();
        let new_normal = (ideal.h1 - o).cross(&(ideal.h2 - o)).normalize();
        assert!((old_normal - new_normal).norm() < TOLERANCE);
    }

    #[test]
    fn m_site_lies_on_bisector_towards_hydrogens() {
        let (o, h1, h2) = raw_water();
        let ideal = idealize_water(&o, &h1, &h2, &tip4p()).unwrap();

        let bisector = ((h1 - o).normalize() + (h2 - o).normalize()).normalize();
        let m = ideal.m_site.unwrap();
        assert!((m - (o + bisector * 0.15)).norm() < TOLERANCE);
        assert!(ideal.lone_pairs.is_none());
        assert_eq!(ideal.extra_sites(), vec![m]);
    }

    #[test]
    fn lone_pairs_are_symmetric_and_opposite_the_hydrogens() {
        let (o, h1, h2) = raw_water();
        let ideal = idealize_water(&o, &h1, &h2, &tip5p()).unwrap();
        let [lp1, lp2] = ideal.lone_pairs.unwrap();

        assert!(((lp1 - o).norm() - 0.7).abs() < TOLERANCE);
        assert!(((lp2 - o).norm() - 0.7).abs() < TOLERANCE);
        assert!((angle_degrees(&o, &lp1, &lp2) - 109.47).abs() < TOLERANCE);

        let bisector = ((ideal.h1 - o) + (ideal.h2 - o)).normalize();
        assert!((lp1 - o).dot(&bisector) < 0.0);
        assert!((lp2 - o).dot(&bisector) < 0.0);

        let normal = (ideal.h1 - o).cross(&(ideal.h2 - o)).normalize();
        assert!(((lp1 - o).dot(&normal) + (lp2 - o).dot(&normal)).abs() < TOLERANCE);
        assert!((lp1 - o).dot(&normal).abs() > 0.1);
        assert!(ideal.m_site.is_none());
        assert_eq!(ideal.extra_sites(), vec![lp1, lp2]);
    }

    #[test]
    fn overlapping_hydrogen_is_rejected() {
        let o = Point3::new(1.0, 1.0, 1.0);
        let h1 = Point3::new(1.00001, 1.0, 1.0);
        let h2 = Point3::new(0.0, 2.0, 1.0);
        assert_eq!(
            idealize_water(&o, &h1, &h2, &tip3p()),
            Err(GeometryError::ShortBond)
        );
    }

    #[test]
    fn antiparallel_bonds_are_rejected() {
        let o = Point3::origin();
        let h1 = Point3::new(1.0, 0.0, 0.0);
        let h2 = Point3::new(-1.0, 0.0, 0.0);
        assert_eq!(
            idealize_water(&o, &h1, &h2, &tip3p()),
            Err(GeometryError::Collinear)
        );
    }

    #[test]
    fn coincident_bond_directions_are_rejected() {
        let o = Point3::origin();
        let h1 = Point3::new(1.0, 0.0, 0.0);
        let h2 = Point3::new(2.0, 0.0, 0.0);
        let err = idealize_water(&o, &h1, &h2, &tip3p()).unwrap_err();
        assert_eq!(err, GeometryError::Collinear);
        assert!(err.to_string().contains("bad input water structure"));
    }

    #[test]
    fn site_flags_follow_distance_threshold() {
        assert!(!tip3p().has_m_site());
        assert!(tip4p().has_m_site());
        assert!(tip5p().has_lone_pairs());
        let tiny = WaterGeometry {
            r_om: 5.0e-5,
            ..tip3p()
        };
        assert!(!tiny.has_m_site());
    }
}
