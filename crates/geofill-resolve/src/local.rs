//! Local offline resolver: coordinate pair to country name, no network.

/// Country bounding boxes: (lat_min, lat_max, lon_min, lon_max, name).
/// Approximate coverage; misses fall through to the remote resolver.
/// Boxes nested inside a larger neighbor come first (Singapore sits within
/// Malaysia's box).
const COUNTRY_BOUNDS: &[(f64, f64, f64, f64, &str)] = &[
    // North America
    (24.5, 49.5, -125.0, -66.0, "United States"),
    (49.5, 83.0, -141.0, -52.0, "Canada"),
    (14.5, 24.5, -118.4, -86.7, "Mexico"),
    // Europe
    (49.0, 61.0, -8.0, 2.0, "United Kingdom"),
    (51.5, 55.5, -10.5, -5.4, "Ireland"),
    (41.3, 51.1, -5.0, 9.6, "France"),
    (47.3, 55.1, 5.9, 15.0, "Germany"),
    (36.6, 47.1, 6.6, 18.5, "Italy"),
    (36.0, 43.8, -9.5, 3.3, "Spain"),
    (36.9, 42.1, -9.5, -6.2, "Portugal"),
    (50.8, 53.5, 3.4, 7.2, "Netherlands"),
    (49.5, 51.5, 2.5, 6.4, "Belgium"),
    (45.8, 47.8, 5.9, 10.5, "Switzerland"),
    (46.4, 49.0, 9.5, 17.2, "Austria"),
    (55.0, 58.0, 8.0, 15.2, "Denmark"),
    (57.5, 71.2, 4.5, 31.1, "Norway"),
    (55.3, 69.1, 11.1, 24.2, "Sweden"),
    (59.8, 70.1, 20.6, 31.6, "Finland"),
    (63.3, 66.6, -24.5, -13.5, "Iceland"),
    (49.0, 54.8, 14.1, 24.2, "Poland"),
    (48.5, 51.1, 12.1, 18.9, "Czechia"),
    (45.7, 48.6, 16.1, 22.9, "Hungary"),
    (43.6, 48.3, 20.2, 29.7, "Romania"),
    (41.2, 44.2, 22.3, 28.6, "Bulgaria"),
    (36.0, 42.0, 19.4, 28.3, "Greece"),
    // Middle East and Asia
    (22.6, 26.1, 51.0, 56.4, "United Arab Emirates"),
    (24.5, 26.2, 50.7, 51.7, "Qatar"),
    (16.4, 32.2, 34.9, 55.7, "Saudi Arabia"),
    (29.5, 33.3, 34.3, 35.9, "Israel"),
    (36.0, 42.1, 26.0, 44.8, "Turkey"),
    (25.1, 39.8, 44.0, 63.3, "Iran"),
    (23.6, 37.1, 60.9, 77.8, "Pakistan"),
    (6.7, 35.5, 68.2, 97.4, "India"),
    (20.7, 26.6, 88.0, 92.7, "Bangladesh"),
    (5.9, 20.5, 97.3, 105.6, "Thailand"),
    (1.15, 1.5, 103.6, 104.1, "Singapore"),
    (0.9, 7.4, 100.0, 119.3, "Malaysia"),
    (8.5, 23.4, 102.1, 109.5, "Vietnam"),
    (-11.0, 6.1, 95.0, 141.0, "Indonesia"),
    (4.6, 21.1, 116.9, 126.6, "Philippines"),
    (18.2, 53.6, 73.7, 135.1, "China"),
    (33.1, 38.6, 124.6, 129.6, "South Korea"),
    (30.0, 45.5, 129.4, 145.8, "Japan"),
    (21.9, 25.3, 120.0, 122.0, "Taiwan"),
    // Oceania
    (-44.0, -10.0, 113.0, 154.0, "Australia"),
    (-47.3, -34.4, 166.4, 178.6, "New Zealand"),
    // South America
    (-33.8, 5.3, -73.9, -34.8, "Brazil"),
    (-55.1, -21.8, -73.6, -53.6, "Argentina"),
    (-56.0, -17.5, -75.7, -66.4, "Chile"),
    (-35.0, -30.1, -58.4, -53.1, "Uruguay"),
    (0.4, 12.5, -73.4, -59.8, "Venezuela"),
    (-4.2, 12.5, -79.0, -66.9, "Colombia"),
    (-18.4, 0.0, -81.3, -68.7, "Peru"),
    (-22.9, -9.7, -69.6, -57.5, "Bolivia"),
    (-5.0, 1.4, -81.1, -75.2, "Ecuador"),
    // Africa
    (-34.8, -22.1, 16.5, 32.9, "South Africa"),
    (-4.7, 5.0, 33.9, 41.9, "Kenya"),
    (-11.7, -1.0, 29.3, 40.4, "Tanzania"),
    (12.3, 16.7, -17.5, -11.4, "Senegal"),
    (4.7, 11.2, -3.3, 1.2, "Ghana"),
    (4.3, 13.9, 2.7, 14.7, "Nigeria"),
    (27.7, 35.9, -13.2, -1.0, "Morocco"),
    (19.0, 37.1, -8.7, 12.0, "Algeria"),
    (30.2, 37.5, 7.5, 11.6, "Tunisia"),
    (22.0, 31.7, 24.7, 36.9, "Egypt"),
];

/// Offline reverse geocoder over a static bounding-box table.
///
/// Pure and synchronous. A miss is expected and routes the record to the
/// remote resolver; it is never an error.
#[derive(Debug, Default)]
pub struct LocalResolver;

impl LocalResolver {
    pub fn new() -> Self {
        Self
    }

    /// Country containing the coordinate, or `None` when the table has no
    /// match. Non-finite or out-of-range inputs are treated as not found.
    pub fn resolve(&self, lat: f64, lon: f64) -> Option<&'static str> {
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }

        COUNTRY_BOUNDS
            .iter()
            .find(|(lat_min, lat_max, lon_min, lon_max, _)| {
                lat >= *lat_min && lat <= *lat_max && lon >= *lon_min && lon <= *lon_max
            })
            .map(|&(_, _, _, _, name)| name)
    }
}
