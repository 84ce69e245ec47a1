use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// IAU 2012 astronomical unit in kilometres
pub const AU_TO_KM: f64 = 149_597_870.7;
pub const AU_TO_M: f64 = AU_TO_KM * 1000.0;

/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Nominal solar radius (km)
pub const SOLAR_RADIUS_KM: f64 = 695_700.0;

/// Jupiter equatorial radius (km)
pub const JUPITER_RADIUS_KM: f64 = 71_492.0;

/// A physical length quantity using f64 precision.
///
/// Kilometres are the base unit. Orbits are usually built with
/// [`Length::from_au`] and bodies with [`Length::from_earth_radii`].
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// let earth_orbit = Length::from_au(1.0);
/// let earth_radius = Length::from_earth_radii(1.0);
/// assert!(earth_orbit > earth_radius);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: km

impl Length {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_km(value: f64) -> Self {
        Self(value)
    }

    pub fn from_meters(value: f64) -> Self {
        Self(value / 1000.0)
    }

    /// Creates a new `Length` from a value in astronomical units.
    pub fn from_au(value: f64) -> Self {
        Self(value * AU_TO_KM)
    }

    /// Creates a new `Length` from a value in Earth radii.
    pub fn from_earth_radii(value: f64) -> Self {
        Self(value * EARTH_RADIUS_KM)
    }

    /// Creates a new `Length` from a value in solar radii.
    pub fn from_solar_radii(value: f64) -> Self {
        Self(value * SOLAR_RADIUS_KM)
    }

    pub fn from_jupiter_radii(value: f64) -> Self {
        Self(value * JUPITER_RADIUS_KM)
    }

    pub fn to_km(&self) -> f64 {
        self.0
    }

    pub fn to_m(&self) -> f64 {
        self.0 * 1000.0
    }

    pub fn to_au(&self) -> f64 {
        self.0 / AU_TO_KM
    }

    pub fn to_earth_radii(&self) -> f64 {
        self.0 / EARTH_RADIUS_KM
    }

    pub fn to_solar_radii(&self) -> f64 {
        self.0 / SOLAR_RADIUS_KM
    }

    pub fn to_jupiter_radii(&self) -> f64 {
        self.0 / JUPITER_RADIUS_KM
    }

    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Dimensionless ratio of two lengths
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Length) -> f64 {
        self.0 / rhs.0
    }
}

impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}

impl std::iter::Sum for Length {
    fn sum<I: Iterator<Item = Length>>(iter: I) -> Length {
        iter.fold(Length::zero(), |acc, l| acc + l)
    }
}
