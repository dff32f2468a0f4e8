//! Map view support
//!
//! - `projection`: Web Mercator projection onto the unit square
//! - `viewport`: viewport state, gestures and marker placement
//! - marker grouping: listings whose coordinates round to the same
//!   3-decimal cell share one marker

pub mod projection;
pub mod viewport;

pub use projection::{project, MAX_LATITUDE};
pub use viewport::{MarkerPosition, Viewport, MAX_ZOOM, MIN_ZOOM};

use crate::model::{GeoPoint, Property};

/// Rounding precision for marker grouping, in decimal degrees.
/// 3 decimals is roughly a 100 m cell, enough to merge units in the
/// same building without merging neighbouring blocks.
const GROUP_DECIMALS: i32 = 3;

fn group_key(point: GeoPoint) -> (i64, i64) {
    let scale = 10f64.powi(GROUP_DECIMALS);
    ((point.lat * scale).round() as i64, (point.lng * scale).round() as i64)
}

/// One map marker: a coordinate plus every listing that rounds to it
#[derive(Debug, Clone)]
pub struct MarkerGroup<'a> {
    pub point: GeoPoint,
    pub properties: Vec<&'a Property>,
}

impl MarkerGroup<'_> {
    /// Groups with more than one listing open as a list instead of a card
    pub fn is_cluster(&self) -> bool {
        self.properties.len() > 1
    }
}

/// Build one marker per rounded coordinate cell. Listings without
/// coordinates are skipped. Order follows first appearance in `properties`.
pub fn marker_groups(properties: &[Property]) -> Vec<MarkerGroup<'_>> {
    let mut groups: Vec<((i64, i64), MarkerGroup<'_>)> = Vec::new();

    for property in properties {
        let Some(point) = property.geo() else {
            continue;
        };
        let key = group_key(point);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.properties.push(property),
            None => groups.push((key, MarkerGroup { point, properties: vec![property] })),
        }
    }

    groups.into_iter().map(|(_, group)| group).collect()
}

/// Every listing sharing the clicked listing's rounded coordinate cell,
/// the clicked one included
pub fn properties_at<'a>(properties: &'a [Property], clicked: &Property) -> Vec<&'a Property> {
    let Some(point) = clicked.geo() else {
        return Vec::new();
    };
    let key = group_key(point);
    properties
        .iter()
        .filter(|p| p.geo().map(group_key) == Some(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_properties;

    fn placed(id: &str, lat: f64, lng: f64) -> Property {
        let mut property = seed_properties().remove(0);
        property.id = id.to_string();
        property.latitude = Some(lat);
        property.longitude = Some(lng);
        property
    }

    #[test]
    fn test_same_cell_listings_share_a_marker() {
        let properties = vec![
            placed("a", 55.7558, 37.6173),
            placed("b", 55.7561, 37.6168), // rounds to the same 3-decimal cell
            placed("c", 55.7900, 37.5300),
        ];

        let groups = marker_groups(&properties);
        assert_eq!(groups.len(), 2);
        assert!(groups[0].is_cluster());
        assert_eq!(groups[0].properties.len(), 2);
        assert!(!groups[1].is_cluster());
    }

    #[test]
    fn test_properties_at_returns_whole_cell() {
        let properties = vec![
            placed("a", 55.7558, 37.6173),
            placed("b", 55.7561, 37.6168),
            placed("c", 55.7900, 37.5300),
        ];

        let at_cell = properties_at(&properties, &properties[1]);
        let ids: Vec<&str> = at_cell.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_unplaced_listings_are_skipped() {
        let mut unplaced = placed("x", 0.0, 0.0);
        unplaced.latitude = None;
        unplaced.longitude = None;

        let properties = vec![unplaced, placed("y", 43.5855, 39.7231)];
        let groups = marker_groups(&properties);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].properties[0].id, "y");

        assert!(properties_at(&properties, &properties[0]).is_empty());
    }

    #[test]
    fn test_seed_listings_all_get_markers() {
        let properties = seed_properties();
        let groups = marker_groups(&properties);
        let total: usize = groups.iter().map(|g| g.properties.len()).sum();
        assert_eq!(total, properties.len());
    }
}
