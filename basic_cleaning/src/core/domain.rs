use serde::{Deserialize, Serialize};

/// Column holding the nightly price.
pub const PRICE: &str = "price";
/// Column holding the listing longitude in degrees.
pub const LONGITUDE: &str = "longitude";
/// Column holding the listing latitude in degrees.
pub const LATITUDE: &str = "latitude";
/// Column holding the date of the most recent review.
pub const LAST_REVIEW: &str = "last_review";

/// Columns the raw table must contain, in the order they are checked.
pub const REQUIRED_COLUMNS: &[&str] = &[PRICE, LONGITUDE, LATITUDE, LAST_REVIEW];

/// Parameters supplied for one invocation of the cleaning step.
///
/// Immutable for the duration of a run. The ordering of `min_price` and
/// `max_price` is not checked; an inverted range simply keeps no rows.
///
/// # Examples
///
/// ```
/// use basic_cleaning::RunConfiguration;
///
/// let config = RunConfiguration {
///     input_artifact: "sample.csv:latest".to_string(),
///     output_artifact: "clean_sample.csv".to_string(),
///     output_type: "clean_sample".to_string(),
///     output_description: "Data with outliers and null values removed".to_string(),
///     min_price: 10.0,
///     max_price: 350.0,
/// };
/// assert_eq!(config.price_range().min, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfiguration {
    pub input_artifact: String,
    pub output_artifact: String,
    pub output_type: String,
    pub output_description: String,
    pub min_price: f64,
    pub max_price: f64,
}

impl RunConfiguration {
    pub fn price_range(&self) -> PriceRange {
        PriceRange::new(self.min_price, self.max_price)
    }
}

/// Inclusive price interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    /// `true` when no price can satisfy the range.
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// Inclusive longitude/latitude bounding box.
///
/// The default box covers New York City, the market the listings come from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoBounds {
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_latitude: f64,
    pub max_latitude: f64,
}

impl GeoBounds {
    pub const NYC: GeoBounds = GeoBounds {
        min_longitude: -74.25,
        max_longitude: -73.50,
        min_latitude: 40.5,
        max_latitude: 41.2,
    };

    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        (self.min_longitude..=self.max_longitude).contains(&longitude)
            && (self.min_latitude..=self.max_latitude).contains(&latitude)
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::NYC
    }
}
