//! Listing catalog: search, featured picks and owner submissions
//!
//! Mirrors the discovery and home screens: filters map one-to-one onto the
//! original query parameters (`location`, `city`, `beds`, `baths`,
//! `squareFeet`, `type`). Only available listings are ever returned.

use crate::account;
use crate::error::{MarketError, MarketResult};
use crate::model::{next_record_id, Property, PropertyKind};
use crate::store::{keys, RecordStore};

/// How many featured listings the home screen shows
const FEATURED_LIMIT: usize = 10;

/// Catalog search criteria; unset fields do not constrain
#[derive(Debug, Clone)]
pub struct SearchFilter {
    pub kind: PropertyKind,
    pub city: Option<String>,
    /// Case-insensitive substring matched against address and city
    pub location: Option<String>,
    pub min_beds: Option<u32>,
    pub min_baths: Option<u32>,
    pub min_area_m2: Option<u32>,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            kind: PropertyKind::Rent,
            city: None,
            location: None,
            min_beds: None,
            min_baths: None,
            min_area_m2: None,
        }
    }
}

impl SearchFilter {
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    fn matches(&self, property: &Property) -> bool {
        if !property.available || property.kind != self.kind {
            return false;
        }
        if let Some(city) = &self.city {
            if &property.city != city {
                return false;
            }
        }
        if let Some(location) = &self.location {
            let needle = location.to_lowercase();
            let in_address = property.address.to_lowercase().contains(&needle);
            let in_city = property.city.to_lowercase().contains(&needle);
            if !in_address && !in_city {
                return false;
            }
        }
        if let Some(min) = self.min_beds {
            if property.beds < min {
                return false;
            }
        }
        if let Some(min) = self.min_baths {
            if property.baths < min {
                return false;
            }
        }
        if let Some(min) = self.min_area_m2 {
            if property.area_m2 < min {
                return false;
            }
        }
        true
    }
}

/// All available listings matching the filter
pub fn search(store: &RecordStore, filter: &SearchFilter) -> Vec<Property> {
    let properties: Vec<Property> = store.get(keys::PROPERTIES, Vec::new());
    properties.into_iter().filter(|p| filter.matches(p)).collect()
}

/// Up to ten available listings flagged for promotion
pub fn featured(store: &RecordStore) -> Vec<Property> {
    let properties: Vec<Property> = store.get(keys::PROPERTIES, Vec::new());
    properties
        .into_iter()
        .filter(|p| p.is_featured() && p.available)
        .take(FEATURED_LIMIT)
        .collect()
}

/// Look up a listing by id
pub fn property(store: &RecordStore, id: &str) -> MarketResult<Property> {
    let properties: Vec<Property> = store.get(keys::PROPERTIES, Vec::new());
    properties
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| MarketError::not_found("Property", id))
}

/// A listing submission from the add-property screen
#[derive(Debug, Clone, Default)]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    /// Full address; the leading comma-separated component becomes the city
    pub address: String,
    pub price: i64,
    pub price_daily: Option<i64>,
    pub beds: u32,
    pub baths: u32,
    pub area_m2: u32,
    pub images: Vec<String>,
}

/// Validate a draft and append it as a rental listing owned by the acting user
pub fn add_property(store: &mut RecordStore, draft: PropertyDraft) -> MarketResult<Property> {
    if draft.title.trim().is_empty() {
        return Err(MarketError::validation("title is required"));
    }
    if draft.address.trim().is_empty() {
        return Err(MarketError::validation("address is required"));
    }
    if draft.price <= 0 {
        return Err(MarketError::validation("price must be positive"));
    }

    let owner = account::current_or_default(store);
    let city = draft
        .address
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let property = Property {
        id: next_record_id(),
        title: draft.title.trim().to_string(),
        description: draft.description,
        address: draft.address.trim().to_string(),
        city,
        price: draft.price,
        price_daily: draft.price_daily,
        price_buy: None,
        kind: PropertyKind::Rent,
        beds: draft.beds,
        baths: draft.baths,
        area_m2: draft.area_m2,
        images: if draft.images.is_empty() {
            vec!["🏠".into()]
        } else {
            draft.images
        },
        facilities: vec![],
        owner_id: owner.id,
        available: true,
        latitude: None,
        longitude: None,
        metro: None,
        featured: None,
    };

    let mut properties: Vec<Property> = store.get(keys::PROPERTIES, Vec::new());
    properties.push(property.clone());
    store.set(keys::PROPERTIES, &properties);

    tracing::info!("Added listing {} in {}", property.id, property.city);
    Ok(property)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::store::MemoryBackend;

    fn seeded_store() -> RecordStore {
        let mut store = RecordStore::new(MemoryBackend::new());
        seed::ensure_seeded(&mut store);
        store
    }

    #[test]
    fn test_search_by_kind_and_city() {
        let store = seeded_store();

        let rentals = search(&store, &SearchFilter::new(PropertyKind::Rent));
        assert!(!rentals.is_empty());
        assert!(rentals.iter().all(|p| p.kind == PropertyKind::Rent));

        let mut filter = SearchFilter::new(PropertyKind::Buy);
        filter.city = Some("Сочи".into());
        let sochi = search(&store, &filter);
        assert!(sochi.iter().all(|p| p.city == "Сочи" && p.kind == PropertyKind::Buy));
        assert!(!sochi.is_empty());
    }

    #[test]
    fn test_search_location_substring_is_case_insensitive() {
        let store = seeded_store();
        let mut filter = SearchFilter::new(PropertyKind::Rent);
        filter.location = Some("тверская".into());
        let hits = search(&store, &filter);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|p| p.address.contains("Тверская")));
    }

    #[test]
    fn test_search_minimum_thresholds() {
        let store = seeded_store();
        let mut filter = SearchFilter::new(PropertyKind::Rent);
        filter.min_beds = Some(3);
        filter.min_area_m2 = Some(90);
        for hit in search(&store, &filter) {
            assert!(hit.beds >= 3);
            assert!(hit.area_m2 >= 90);
        }
    }

    #[test]
    fn test_unavailable_listings_are_hidden() {
        let mut store = seeded_store();
        let mut properties: Vec<Property> = store.get(keys::PROPERTIES, Vec::new());
        for p in &mut properties {
            p.available = false;
        }
        store.set(keys::PROPERTIES, &properties);

        assert!(search(&store, &SearchFilter::new(PropertyKind::Rent)).is_empty());
        assert!(featured(&store).is_empty());
    }

    #[test]
    fn test_featured_limit_and_flag() {
        let store = seeded_store();
        let picks = featured(&store);
        assert!(picks.len() <= 10);
        assert!(picks.iter().all(|p| p.is_featured()));
    }

    #[test]
    fn test_property_lookup() {
        let store = seeded_store();
        assert_eq!(property(&store, "1").unwrap().id, "1");
        assert!(matches!(
            property(&store, "missing"),
            Err(MarketError::NotFound { .. })
        ));
    }

    #[test]
    fn test_add_property_derives_city_and_owner() {
        let mut store = seeded_store();
        let draft = PropertyDraft {
            title: "1-комн. кв. · 40 м²".into(),
            description: "Тихий двор".into(),
            address: "Екатеринбург, ул. Ленина, д. 5".into(),
            price: 35_000,
            price_daily: Some(1_800),
            beds: 1,
            baths: 1,
            area_m2: 40,
            images: vec![],
        };

        let added = add_property(&mut store, draft).unwrap();
        assert_eq!(added.city, "Екатеринбург");
        assert_eq!(added.owner_id, "1");
        assert_eq!(added.images, vec!["🏠".to_string()]);

        let found = property(&store, &added.id).unwrap();
        assert_eq!(found, added);
    }

    #[test]
    fn test_add_property_validation() {
        let mut store = seeded_store();
        let draft = PropertyDraft {
            address: "Москва, ул. Арбат, д. 1".into(),
            price: 40_000,
            ..Default::default()
        };
        assert!(matches!(
            add_property(&mut store, draft),
            Err(MarketError::Validation(_))
        ));
    }
}
