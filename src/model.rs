//! Core record types for the Orelax marketplace
//!
//! This module defines the records persisted by the [`crate::store`] layer:
//! - `User`: an account known to the app
//! - `Property`: a rental or sale listing
//! - `Booking` / `Purchase`: transactions against a listing
//! - `Chat` / `Message`: conversation threads with counterparties
//!
//! Field names serialize in camelCase so the persisted layout matches the
//! key/value documents described in the external-interface contract
//! (`user`, `users`, `properties`, `bookings`, `purchases`, `chats`).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Record ids are timestamp-derived strings with a process-local monotonic
/// suffix, so two records created in the same millisecond never collide.
pub fn next_record_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", Utc::now().timestamp_millis(), seq)
}

/// An account record. The acting user lives under the `user` key; all
/// known users (chat counterparties included) under `users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Whether a listing is offered for rent or for sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Rent,
    Buy,
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyKind::Rent => write!(f, "rent"),
            PropertyKind::Buy => write!(f, "buy"),
        }
    }
}

impl std::str::FromStr for PropertyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rent" => Ok(PropertyKind::Rent),
            "buy" => Ok(PropertyKind::Buy),
            other => Err(format!("unknown property kind: {other} (use rent|buy)")),
        }
    }
}

/// Monthly vs daily pricing mode for a rental
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RentType {
    Monthly,
    Daily,
}

impl std::fmt::Display for RentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RentType::Monthly => write!(f, "monthly"),
            RentType::Daily => write!(f, "daily"),
        }
    }
}

impl std::str::FromStr for RentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(RentType::Monthly),
            "daily" => Ok(RentType::Daily),
            other => Err(format!("unknown rent type: {other} (use monthly|daily)")),
        }
    }
}

/// A geographic coordinate pair (WGS 84 degrees)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A rental or sale listing
///
/// Prices follow the original data shape: `price` is rubles per month,
/// `price_daily` rubles per day, `price_buy` millions of rubles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    /// Monthly rent in rubles
    pub price: i64,
    /// Daily rent in rubles, when the listing supports daily stays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_daily: Option<i64>,
    /// Sale price in millions of rubles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_buy: Option<f64>,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub beds: u32,
    pub baths: u32,
    /// Floor area in square meters
    #[serde(rename = "squareFeet")]
    pub area_m2: u32,
    /// Glyph identifiers standing in for photos
    pub images: Vec<String>,
    pub facilities: Vec<String>,
    pub owner_id: String,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Nearest metro station label, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metro: Option<String>,
    /// Promoted on the home screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Property {
    /// Coordinates as a point, when both components are present
    pub fn geo(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }

    /// Daily rate, falling back to a thirtieth of the monthly rent
    pub fn daily_price(&self) -> i64 {
        self.price_daily.unwrap_or(self.price / 30)
    }

    /// Sale price in millions, falling back to the monthly rent figure
    pub fn buy_price(&self) -> f64 {
        self.price_buy.unwrap_or(self.price as f64)
    }

    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }
}

/// Booking lifecycle state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A reservation of a rental listing for a date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub property_id: String,
    pub user_id: String,
    /// Stay date as entered (`YYYY-MM-DD`)
    pub date: String,
    pub adults: u32,
    pub status: BookingStatus,
    pub rent_type: RentType,
}

/// A completed sale request against a `buy` listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub property_id: String,
    pub user_id: String,
    /// Sale price in millions of rubles
    pub price: f64,
    pub status: String,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender_id: String,
    /// RFC 3339 send timestamp
    pub timestamp: String,
}

/// A conversation thread with one counterparty
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    /// The counterparty's user id
    pub user_id: String,
    pub messages: Vec<Message>,
}

impl Chat {
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
