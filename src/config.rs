use crate::error::{DiffError, Result};
use std::str::FromStr;

/// Longitude dimension name
pub const LON_STR: &str = "lon";
/// Latitude dimension name
pub const LAT_STR: &str = "lat";
/// Full (layer-centre) hybrid level dimension name
pub const PFULL_STR: &str = "pfull";
/// Half (interface) hybrid level dimension name
pub const PHALF_STR: &str = "phalf";

/// Physical and grid constants
#[derive(Clone, Debug)]
pub struct Constants {
    /// Earth's radius (m)
    pub earth_radius: f64,
    /// Extent of a full circle of longitude (degrees)
    pub lon_circumference: f64,
    /// Radians per degree
    pub deg_to_rad: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            earth_radius: 6371000.0,
            lon_circumference: 360.0,
            deg_to_rad: std::f64::consts::PI / 180.0,
        }
    }
}

/// Which edges of a one-sided or centered derivative are filled with
/// lower-order or opposite-direction stencils instead of being dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FillEdge {
    None,
    Left,
    Right,
    #[default]
    Both,
}

impl FillEdge {
    pub fn left(self) -> bool {
        matches!(self, FillEdge::Left | FillEdge::Both)
    }

    pub fn right(self) -> bool {
        matches!(self, FillEdge::Right | FillEdge::Both)
    }

    pub fn any(self) -> bool {
        self != FillEdge::None
    }
}

impl From<bool> for FillEdge {
    fn from(fill: bool) -> Self {
        if fill {
            FillEdge::Both
        } else {
            FillEdge::None
        }
    }
}

impl FromStr for FillEdge {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "false" => Ok(FillEdge::None),
            "left" => Ok(FillEdge::Left),
            "right" => Ok(FillEdge::Right),
            "both" | "true" => Ok(FillEdge::Both),
            other => Err(DiffError::UnsupportedOperator(format!(
                "fill_edge '{}'",
                other
            ))),
        }
    }
}

/// Per-call derivative configuration
#[derive(Clone, Debug, PartialEq)]
pub struct DerivConfig {
    /// Grid points between the samples of the smallest stencil
    pub spacing: usize,
    /// Order of accuracy
    pub order: usize,
    pub fill_edge: FillEdge,
    /// Treat the dimension as periodic
    pub cyclic: bool,
    /// Period of the coordinate when cyclic
    pub circumference: f64,
}

impl Default for DerivConfig {
    fn default() -> Self {
        Self {
            spacing: 1,
            order: 2,
            fill_edge: FillEdge::Both,
            cyclic: false,
            circumference: Constants::default().lon_circumference,
        }
    }
}

impl DerivConfig {
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_fill_edge(mut self, fill_edge: impl Into<FillEdge>) -> Self {
        self.fill_edge = fill_edge.into();
        self
    }

    pub fn with_cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    pub fn with_circumference(mut self, circumference: f64) -> Self {
        self.circumference = circumference;
        self
    }

    /// Number of samples the stencil reaches beyond its base point
    pub fn reach(&self) -> usize {
        self.order * self.spacing
    }

    /// Validate the settings that do not depend on the field
    pub fn validate(&self) -> Result<()> {
        if self.spacing < 1 {
            return Err(DiffError::InvalidSpacing {
                spacing: self.spacing,
            });
        }
        if self.order < 1 {
            return Err(DiffError::InvalidOrder {
                order: self.order,
                reason: "order must be at least 1".to_string(),
            });
        }
        if self.cyclic && !(self.circumference.is_finite() && self.circumference > 0.0) {
            return Err(DiffError::UnsupportedOperator(format!(
                "circumference {}",
                self.circumference
            )));
        }
        Ok(())
    }
}

/// Configuration of derivatives on the sphere
#[derive(Clone, Debug, PartialEq)]
pub struct SphereConfig {
    pub order: usize,
    pub spacing: usize,
    pub cyclic_lon: bool,
    pub fill_edge_lon: FillEdge,
    pub fill_edge_lat: FillEdge,
    /// Edge filling of the vertical upwind advection
    pub fill_edge_vert: FillEdge,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            order: 2,
            spacing: 1,
            cyclic_lon: true,
            fill_edge_lon: FillEdge::Both,
            fill_edge_lat: FillEdge::Both,
            fill_edge_vert: FillEdge::Both,
        }
    }
}

impl SphereConfig {
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_cyclic_lon(mut self, cyclic_lon: bool) -> Self {
        self.cyclic_lon = cyclic_lon;
        self
    }

    pub fn with_fill_edge_lon(mut self, fill_edge: impl Into<FillEdge>) -> Self {
        self.fill_edge_lon = fill_edge.into();
        self
    }

    pub fn with_fill_edge_lat(mut self, fill_edge: impl Into<FillEdge>) -> Self {
        self.fill_edge_lat = fill_edge.into();
        self
    }

    pub fn with_fill_edge_vert(mut self, fill_edge: impl Into<FillEdge>) -> Self {
        self.fill_edge_vert = fill_edge.into();
        self
    }

    /// Derivative configuration along longitude
    pub fn lon_config(&self) -> DerivConfig {
        DerivConfig::default()
            .with_order(self.order)
            .with_spacing(self.spacing)
            .with_fill_edge(self.fill_edge_lon)
            .with_cyclic(self.cyclic_lon)
    }

    /// Derivative configuration along latitude
    pub fn lat_config(&self) -> DerivConfig {
        DerivConfig::default()
            .with_order(self.order)
            .with_spacing(self.spacing)
            .with_fill_edge(self.fill_edge_lat)
    }

    /// Derivative configuration along the hybrid levels
    pub fn vert_config(&self) -> DerivConfig {
        DerivConfig::default()
            .with_order(self.order)
            .with_spacing(self.spacing)
            .with_fill_edge(self.fill_edge_vert)
    }

    pub fn validate(&self) -> Result<()> {
        self.lon_config().validate()?;
        self.lat_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = Constants::default();
        assert_eq!(constants.earth_radius, 6371000.0);
        assert_eq!(constants.lon_circumference, 360.0);
        assert!((constants.deg_to_rad * 180.0 - std::f64::consts::PI).abs() < 1e-15);
    }

    #[test]
    fn test_fill_edge_parsing() {
        assert_eq!("left".parse::<FillEdge>().unwrap(), FillEdge::Left);
        assert_eq!("Right".parse::<FillEdge>().unwrap(), FillEdge::Right);
        assert_eq!("both".parse::<FillEdge>().unwrap(), FillEdge::Both);
        assert_eq!("none".parse::<FillEdge>().unwrap(), FillEdge::None);
        assert!(matches!(
            "middle".parse::<FillEdge>(),
            Err(DiffError::UnsupportedOperator(_))
        ));
        assert_eq!(FillEdge::from(true), FillEdge::Both);
        assert!(FillEdge::Right.right() && !FillEdge::Right.left());
    }

    #[test]
    fn test_config_validation() {
        assert!(DerivConfig::default().validate().is_ok());
        assert!(matches!(
            DerivConfig::default().with_spacing(0).validate(),
            Err(DiffError::InvalidSpacing { spacing: 0 })
        ));
        assert!(matches!(
            DerivConfig::default().with_order(0).validate(),
            Err(DiffError::InvalidOrder { order: 0, .. })
        ));
        assert!(SphereConfig::default().validate().is_ok());
    }

    #[test]
    fn test_sphere_config_splits() {
        let config = SphereConfig::default().with_order(1).with_fill_edge_lat(false);
        assert!(config.lon_config().cyclic);
        assert!(!config.lat_config().cyclic);
        assert_eq!(config.lat_config().fill_edge, FillEdge::None);
        assert_eq!(config.lon_config().order, 1);
        assert_eq!(config.vert_config().fill_edge, FillEdge::Both);
        let config = config.with_fill_edge_vert(false);
        assert_eq!(config.vert_config().fill_edge, FillEdge::None);
        assert!(!config.vert_config().cyclic);
    }
}
