//! Ellipsoidal polar stereographic projection.
//!
//! Implements the polar aspect from Snyder, "Map Projections: A Working
//! Manual" (USGS PP 1395), pp. 160-162. The south aspect is computed by
//! mirroring latitudes, longitudes and plane coordinates through the north
//! aspect formulas.
//!
//! Scale is set either by a true-scale latitude `lat_ts` or, when `lat_ts`
//! is the pole itself, by the scale factor `k_0`.

use super::definition::{ProjectionDefinition, ProjectionFamily};
use crate::errors::{GreenlandVizError, Result};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Maximum fixed-point iterations for the inverse latitude
const MAX_ITERATIONS: usize = 15;
/// Convergence threshold for the inverse latitude, radians
const CONVERGENCE: f64 = 1e-14;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarStereographic {
    /// First eccentricity
    e: f64,
    /// Central meridian in radians
    lon0: f64,
    /// True when the projection is centred on the south pole
    south: bool,
    /// `rho = akm1 * t(phi)`, already scaled by the semi-major axis
    akm1: f64,
}

impl PolarStereographic {
    /// Build the projection from a validated stereographic definition.
    ///
    /// # Errors
    ///
    /// `ProjectionError` if the definition is not stereographic or fails
    /// [`ProjectionDefinition::validate`].
    pub fn from_definition(def: &ProjectionDefinition) -> Result<Self> {
        if def.family != ProjectionFamily::Stereographic {
            return Err(GreenlandVizError::projection(format!(
                "expected a stere definition, got {}",
                def.family.as_str()
            )));
        }
        def.validate()?;

        let ellipsoid = def
            .ellipsoid
            .ok_or_else(|| GreenlandVizError::projection("missing ellipsoid (+ellps)"))?;
        let e = ellipsoid.eccentricity();
        let south = def.lat_0.is_some_and(|lat| lat < 0.0);
        let phits = def.true_scale_latitude().abs().to_radians();

        let akm1 = if (phits - FRAC_PI_2).abs() < 1e-10 {
            2.0 * def.k_0 / ((1.0 + e).powf(1.0 + e) * (1.0 - e).powf(1.0 - e)).sqrt()
        } else {
            let sin_ts = phits.sin();
            let mc = phits.cos() / (1.0 - e * e * sin_ts * sin_ts).sqrt();
            mc / tsfn(phits, e)
        };

        Ok(Self {
            e,
            lon0: def.lon_0.to_radians(),
            south,
            akm1: akm1 * ellipsoid.a,
        })
    }

    /// Geographic degrees to projected meters.
    pub fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let mut phi = lat.to_radians();
        let mut lam = lon.to_radians() - self.lon0;
        if self.south {
            phi = -phi;
            lam = -lam;
        }

        let rho = self.akm1 * tsfn(phi, self.e);
        let mut x = rho * lam.sin();
        let mut y = -rho * lam.cos();

        if self.south {
            x = -x;
            y = -y;
        }
        (x, y)
    }

    /// Projected meters to geographic degrees, longitude in `[-180, 180]`.
    ///
    /// The pole itself is not special-cased.
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let (x, y) = if self.south { (-x, -y) } else { (x, y) };

        let rho = x.hypot(y);
        let t = rho / self.akm1;
        let half_e = 0.5 * self.e;

        let mut phi = FRAC_PI_2 - 2.0 * t.atan();
        for _ in 0..MAX_ITERATIONS {
            let esin = self.e * phi.sin();
            let next = FRAC_PI_2 - 2.0 * (t * ((1.0 - esin) / (1.0 + esin)).powf(half_e)).atan();
            let delta = (next - phi).abs();
            phi = next;
            if delta < CONVERGENCE {
                break;
            }
        }

        let mut lam = x.atan2(-y);
        if self.south {
            phi = -phi;
            lam = -lam;
        }

        (adjlon(lam + self.lon0).to_degrees(), phi.to_degrees())
    }
}

/// Snyder's `t`: isometric co-latitude function
fn tsfn(phi: f64, e: f64) -> f64 {
    let esin = e * phi.sin();
    (FRAC_PI_4 - 0.5 * phi).tan() / ((1.0 - esin) / (1.0 + esin)).powf(0.5 * e)
}

/// Wrap a longitude in radians into `[-PI, PI]`
fn adjlon(lam: f64) -> f64 {
    if lam.abs() <= PI {
        return lam;
    }
    lam - 2.0 * PI * ((lam + PI) / (2.0 * PI)).floor()
}
