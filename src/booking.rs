//! Booking and purchase operations
//!
//! The booking flow follows the original screens: a booking is created
//! `pending`, the checkout screen quotes it (15% promotion applied), paying
//! confirms it. Profile actions can cancel. Sale listings go through
//! [`create_purchase`] instead.

use crate::account;
use crate::catalog;
use crate::error::{MarketError, MarketResult};
use crate::model::{next_record_id, Booking, BookingStatus, Property, PropertyKind, Purchase, RentType};
use crate::store::{keys, RecordStore};
use chrono::Utc;

/// Checkout promotion applied to every booking
pub const DISCOUNT_PERCENT: f64 = 15.0;

/// Priced summary shown on the checkout screen
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub rent_type: RentType,
    /// Rate in rubles per period
    pub base: i64,
    /// Discount in rubles, rounded
    pub discount: i64,
    /// Amount due in rubles, rounded
    pub total: i64,
}

impl Quote {
    fn for_property(property: &Property, rent_type: RentType) -> Self {
        let base = match rent_type {
            RentType::Daily => property.daily_price(),
            RentType::Monthly => property.price,
        };
        // The screen rounds both lines independently
        let discount = (base as f64 * DISCOUNT_PERCENT / 100.0).round() as i64;
        let total = (base as f64 * (100.0 - DISCOUNT_PERCENT) / 100.0).round() as i64;
        Self {
            rent_type,
            base,
            discount,
            total,
        }
    }
}

/// Create a pending booking for a rental listing
///
/// The caller shows the checkout for the returned booking's id next.
pub fn create_booking(
    store: &mut RecordStore,
    property_id: &str,
    date: &str,
    adults: u32,
    rent_type: RentType,
) -> MarketResult<Booking> {
    if date.trim().is_empty() {
        return Err(MarketError::validation("date is required"));
    }
    if adults == 0 {
        return Err(MarketError::validation("at least one adult is required"));
    }

    let property = catalog::property(store, property_id)?;
    if property.kind != PropertyKind::Rent {
        return Err(MarketError::validation("only rental listings can be booked"));
    }

    let user = account::current_or_default(store);
    let booking = Booking {
        id: next_record_id(),
        property_id: property.id,
        user_id: user.id,
        date: date.trim().to_string(),
        adults,
        status: BookingStatus::Pending,
        rent_type,
    };

    let mut bookings: Vec<Booking> = store.get(keys::BOOKINGS, Vec::new());
    bookings.push(booking.clone());
    store.set(keys::BOOKINGS, &bookings);

    tracing::info!("Created booking {} for listing {}", booking.id, booking.property_id);
    Ok(booking)
}

/// Look up a booking by id
pub fn booking(store: &RecordStore, id: &str) -> MarketResult<Booking> {
    let bookings: Vec<Booking> = store.get(keys::BOOKINGS, Vec::new());
    bookings
        .into_iter()
        .find(|b| b.id == id)
        .ok_or_else(|| MarketError::not_found("Booking", id))
}

/// All bookings made by a user, for the profile screen
pub fn bookings_for(store: &RecordStore, user_id: &str) -> Vec<Booking> {
    let bookings: Vec<Booking> = store.get(keys::BOOKINGS, Vec::new());
    bookings.into_iter().filter(|b| b.user_id == user_id).collect()
}

/// Price the checkout for a booking under its current rent type
pub fn checkout_quote(store: &RecordStore, booking_id: &str) -> MarketResult<Quote> {
    let booking = booking(store, booking_id)?;
    let property = catalog::property(store, &booking.property_id)?;
    Ok(Quote::for_property(&property, booking.rent_type))
}

/// Persist a rent-type switch made on the checkout screen
pub fn set_rent_type(
    store: &mut RecordStore,
    booking_id: &str,
    rent_type: RentType,
) -> MarketResult<Booking> {
    update_booking(store, booking_id, |b| b.rent_type = rent_type)
}

/// Pay: mark the booking confirmed
pub fn confirm_booking(store: &mut RecordStore, booking_id: &str) -> MarketResult<Booking> {
    update_booking(store, booking_id, |b| b.status = BookingStatus::Confirmed)
}

/// Cancel a booking from the profile screen
pub fn cancel_booking(store: &mut RecordStore, booking_id: &str) -> MarketResult<Booking> {
    update_booking(store, booking_id, |b| b.status = BookingStatus::Cancelled)
}

fn update_booking(
    store: &mut RecordStore,
    booking_id: &str,
    apply: impl FnOnce(&mut Booking),
) -> MarketResult<Booking> {
    let mut bookings: Vec<Booking> = store.get(keys::BOOKINGS, Vec::new());
    let entry = bookings
        .iter_mut()
        .find(|b| b.id == booking_id)
        .ok_or_else(|| MarketError::not_found("Booking", booking_id))?;
    apply(entry);
    let updated = entry.clone();
    store.set(keys::BOOKINGS, &bookings);
    Ok(updated)
}

/// Submit a purchase request for a sale listing
pub fn create_purchase(store: &mut RecordStore, property_id: &str) -> MarketResult<Purchase> {
    let property = catalog::property(store, property_id)?;
    if property.kind != PropertyKind::Buy {
        return Err(MarketError::validation("listing is not for sale"));
    }

    let user = account::current_or_default(store);
    let purchase = Purchase {
        id: next_record_id(),
        property_id: property.id.clone(),
        user_id: user.id,
        price: property.buy_price(),
        status: "paid".into(),
        created_at: Utc::now().to_rfc3339(),
    };

    let mut purchases: Vec<Purchase> = store.get(keys::PURCHASES, Vec::new());
    purchases.push(purchase.clone());
    store.set(keys::PURCHASES, &purchases);

    tracing::info!("Created purchase {} for listing {}", purchase.id, purchase.property_id);
    Ok(purchase)
}

/// All purchases made by a user
pub fn purchases_for(store: &RecordStore, user_id: &str) -> Vec<Purchase> {
    let purchases: Vec<Purchase> = store.get(keys::PURCHASES, Vec::new());
    purchases.into_iter().filter(|p| p.user_id == user_id).collect()
}
