//! Projection parameters
//!
//! A [`ProjectionDefinition`] is an immutable record of the parameters that
//! fully determine a transform. Definitions can be written in the PROJ.4
//! `+key=value` syntax:
//!
//! ```
//! use greenland_viz::projection::ProjectionDefinition;
//!
//! let def: ProjectionDefinition =
//!     "+proj=stere +ellps=WGS84 +datum=WGS84 +lat_ts=71.0 +lat_0=90 +lon_0=321.0 +k_0=1.0"
//!         .parse()
//!         .unwrap();
//! assert_eq!(def.lat_ts, Some(71.0));
//! ```

use crate::errors::{GreenlandVizError, Result};
use std::fmt;
use std::str::FromStr;

/// Native projection of the Greenland 1 km dataset
pub const GREENLAND_PROJ: &str =
    "+proj=stere +ellps=WGS84 +datum=WGS84 +lat_ts=71.0 +lat_0=90 +lon_0=321.0 +k_0=1.0";

/// Plain geographic longitude/latitude
pub const GEOGRAPHIC_PROJ: &str = "+proj=latlong +ellps=WGS84 +datum=WGS84";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionFamily {
    /// `+proj=stere`, polar aspect only
    Stereographic,
    /// `+proj=latlong` and its aliases
    LatLong,
}

impl ProjectionFamily {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stereographic => "stere",
            Self::LatLong => "latlong",
        }
    }

    fn from_proj_name(name: &str) -> Option<Self> {
        match name {
            "stere" => Some(Self::Stereographic),
            "latlong" | "longlat" | "latlon" | "lonlat" => Some(Self::LatLong),
            _ => None,
        }
    }
}

/// Reference ellipsoid given by semi-major axis and flattening
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub name: &'static str,
    /// Semi-major axis in meters
    pub a: f64,
    /// Flattening
    pub f: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        name: "WGS84",
        a: 6_378_137.0,
        f: 1.0 / 298.257_223_563,
    };

    pub const GRS80: Ellipsoid = Ellipsoid {
        name: "GRS80",
        a: 6_378_137.0,
        f: 1.0 / 298.257_222_101,
    };

    /// International 1924 (Hayford)
    pub const INTERNATIONAL: Ellipsoid = Ellipsoid {
        name: "intl",
        a: 6_378_388.0,
        f: 1.0 / 297.0,
    };

    pub fn from_proj_name(name: &str) -> Option<Self> {
        [Self::WGS84, Self::GRS80, Self::INTERNATIONAL]
            .into_iter()
            .find(|e| e.name == name)
    }

    /// First eccentricity
    pub fn eccentricity(&self) -> f64 {
        (self.f * (2.0 - self.f)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datum {
    Wgs84,
    Nad83,
    Nzgd49,
}

impl Datum {
    pub fn from_proj_name(name: &str) -> Option<Self> {
        match name {
            "WGS84" => Some(Self::Wgs84),
            "NAD83" => Some(Self::Nad83),
            "nzgd49" => Some(Self::Nzgd49),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wgs84 => "WGS84",
            Self::Nad83 => "NAD83",
            Self::Nzgd49 => "nzgd49",
        }
    }

    /// Ellipsoid the datum is defined on
    pub const fn ellipsoid(self) -> Ellipsoid {
        match self {
            Self::Wgs84 => Ellipsoid::WGS84,
            Self::Nad83 => Ellipsoid::GRS80,
            Self::Nzgd49 => Ellipsoid::INTERNATIONAL,
        }
    }
}

/// Parameters of a coordinate reference system. Angles are in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionDefinition {
    pub family: ProjectionFamily,
    pub ellipsoid: Option<Ellipsoid>,
    pub datum: Option<Datum>,
    /// Latitude of true scale
    pub lat_ts: Option<f64>,
    /// Latitude of origin; +90 or -90 for the polar aspect
    pub lat_0: Option<f64>,
    /// Central meridian
    pub lon_0: f64,
    /// Scale factor, only used when the true-scale latitude is the pole
    pub k_0: f64,
}

impl ProjectionDefinition {
    /// Polar stereographic, WGS84, true scale at 71°N, central meridian 321°E
    pub fn greenland_stereographic() -> Self {
        Self {
            family: ProjectionFamily::Stereographic,
            ellipsoid: Some(Ellipsoid::WGS84),
            datum: Some(Datum::Wgs84),
            lat_ts: Some(71.0),
            lat_0: Some(90.0),
            lon_0: 321.0,
            k_0: 1.0,
        }
    }

    /// Geographic longitude/latitude on WGS84
    pub fn geographic() -> Self {
        Self {
            family: ProjectionFamily::LatLong,
            ellipsoid: Some(Ellipsoid::WGS84),
            datum: Some(Datum::Wgs84),
            lat_ts: None,
            lat_0: None,
            lon_0: 0.0,
            k_0: 1.0,
        }
    }

    /// Check that the parameters describe a transform this crate can run.
    ///
    /// # Errors
    ///
    /// `ProjectionError` when the ellipsoid or datum is missing, the datum
    /// sits on a different ellipsoid, or the stereographic parameters are not
    /// a valid polar aspect.
    pub fn validate(&self) -> Result<()> {
        let ellipsoid = self
            .ellipsoid
            .ok_or_else(|| GreenlandVizError::projection("missing ellipsoid (+ellps)"))?;
        let datum = self
            .datum
            .ok_or_else(|| GreenlandVizError::projection("missing datum (+datum)"))?;

        if datum.ellipsoid() != ellipsoid {
            return Err(GreenlandVizError::projection(format!(
                "datum {} is defined on {}, not {}",
                datum.as_str(),
                datum.ellipsoid().name,
                ellipsoid.name
            )));
        }

        if !self.lon_0.is_finite() {
            return Err(GreenlandVizError::projection("lon_0 must be finite"));
        }

        if self.family == ProjectionFamily::Stereographic {
            let lat_0 = self
                .lat_0
                .ok_or_else(|| GreenlandVizError::projection("missing lat_0 for stere"))?;
            if lat_0.abs() != 90.0 {
                return Err(GreenlandVizError::projection(format!(
                    "only the polar aspect is supported, got lat_0={}",
                    lat_0
                )));
            }

            let lat_ts = self.true_scale_latitude();
            if !(lat_ts.is_finite() && lat_ts.abs() > 0.0 && lat_ts.abs() <= 90.0)
                || lat_ts.signum() != lat_0.signum()
            {
                return Err(GreenlandVizError::projection(format!(
                    "lat_ts={} must lie in the same hemisphere as lat_0={}",
                    lat_ts, lat_0
                )));
            }

            if !(self.k_0.is_finite() && self.k_0 > 0.0) {
                return Err(GreenlandVizError::projection(format!(
                    "k_0 must be positive, got {}",
                    self.k_0
                )));
            }
        }

        Ok(())
    }

    /// `lat_ts`, falling back to the pole like PROJ does
    pub fn true_scale_latitude(&self) -> f64 {
        self.lat_ts.or(self.lat_0).unwrap_or(90.0)
    }

    pub fn is_geographic(&self) -> bool {
        self.family == ProjectionFamily::LatLong
    }
}

impl FromStr for ProjectionDefinition {
    type Err = GreenlandVizError;

    fn from_str(s: &str) -> Result<Self> {
        let mut family = None;
        let mut ellipsoid = None;
        let mut datum = None;
        let mut lat_ts = None;
        let mut lat_0 = None;
        let mut lon_0 = 0.0;
        let mut k_0 = 1.0;

        for token in s.split_whitespace() {
            let param = token.strip_prefix('+').ok_or_else(|| {
                GreenlandVizError::projection(format!("expected '+key=value', got '{}'", token))
            })?;
            let (key, value) = param.split_once('=').unwrap_or((param, ""));

            match key {
                "proj" => {
                    family = Some(ProjectionFamily::from_proj_name(value).ok_or_else(|| {
                        GreenlandVizError::projection(format!("unsupported projection '{}'", value))
                    })?);
                }
                "ellps" => {
                    ellipsoid = Some(Ellipsoid::from_proj_name(value).ok_or_else(|| {
                        GreenlandVizError::projection(format!("unknown ellipsoid '{}'", value))
                    })?);
                }
                "datum" => {
                    datum = Some(Datum::from_proj_name(value).ok_or_else(|| {
                        GreenlandVizError::projection(format!("unknown datum '{}'", value))
                    })?);
                }
                "lat_ts" => lat_ts = Some(parse_number(key, value)?),
                "lat_0" => lat_0 = Some(parse_number(key, value)?),
                "lon_0" => lon_0 = parse_number(key, value)?,
                "k_0" | "k" => k_0 = parse_number(key, value)?,
                "no_defs" | "type" => {}
                _ => {
                    return Err(GreenlandVizError::projection(format!(
                        "unsupported parameter '+{}'",
                        key
                    )))
                }
            }
        }

        let family = family.ok_or_else(|| GreenlandVizError::projection("missing +proj"))?;

        // +datum implies its ellipsoid when +ellps is omitted
        if ellipsoid.is_none() {
            ellipsoid = datum.map(Datum::ellipsoid);
        }

        Ok(Self {
            family,
            ellipsoid,
            datum,
            lat_ts,
            lat_0,
            lon_0,
            k_0,
        })
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64> {
    value.parse::<f64>().map_err(|_| {
        GreenlandVizError::projection(format!("invalid value '{}' for +{}", value, key))
    })
}

impl fmt::Display for ProjectionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+proj={}", self.family.as_str())?;
        if let Some(ellipsoid) = self.ellipsoid {
            write!(f, " +ellps={}", ellipsoid.name)?;
        }
        if let Some(datum) = self.datum {
            write!(f, " +datum={}", datum.as_str())?;
        }
        if self.family == ProjectionFamily::Stereographic {
            if let Some(lat_ts) = self.lat_ts {
                write!(f, " +lat_ts={}", lat_ts)?;
            }
            if let Some(lat_0) = self.lat_0 {
                write!(f, " +lat_0={}", lat_0)?;
            }
            write!(f, " +lon_0={} +k_0={}", self.lon_0, self.k_0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_greenland_string() {
        let def: ProjectionDefinition = GREENLAND_PROJ.parse().unwrap();
        assert_eq!(def, ProjectionDefinition::greenland_stereographic());
    }

    #[test]
    fn parses_geographic_string() {
        let def: ProjectionDefinition = GEOGRAPHIC_PROJ.parse().unwrap();
        assert_eq!(def, ProjectionDefinition::geographic());
    }

    #[test]
    fn datum_fills_in_ellipsoid() {
        let def: ProjectionDefinition = "+proj=longlat +datum=NAD83".parse().unwrap();
        assert_eq!(def.ellipsoid, Some(Ellipsoid::GRS80));
        def.validate().unwrap();
    }

    #[test]
    fn display_round_trips() {
        let def = ProjectionDefinition::greenland_stereographic();
        let reparsed: ProjectionDefinition = def.to_string().parse().unwrap();
        assert_eq!(reparsed, def);
    }

    #[test]
    fn rejects_unknown_parameter() {
        let result = "+proj=stere +ellps=WGS84 +towgs84=0,0,0".parse::<ProjectionDefinition>();
        assert!(matches!(result, Err(GreenlandVizError::ProjectionError { .. })));
    }

    #[test]
    fn rejects_unsupported_family() {
        let result = "+proj=merc +datum=WGS84".parse::<ProjectionDefinition>();
        assert!(matches!(result, Err(GreenlandVizError::ProjectionError { .. })));
    }

    #[test]
    fn wgs84_eccentricity() {
        let e = Ellipsoid::WGS84.eccentricity();
        assert!((e - 0.081_819_190_842_622).abs() < 1e-12);
    }
}
