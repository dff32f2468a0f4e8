//! Account and session operations
//!
//! The acting user lives under the `user` key, the session flag under
//! `isLoggedIn`. "Missing user" is an explicit `Option` here; callers that
//! need an acting user materialize the default seed account instead of
//! null-checking at every site.

use crate::error::{MarketError, MarketResult};
use crate::model::{next_record_id, User};
use crate::seed;
use crate::store::{keys, RecordStore};

/// The acting user, if one is stored
pub fn current_user(store: &RecordStore) -> Option<User> {
    store.get(keys::USER, None)
}

/// The acting user, materializing the default seed account when absent
pub fn current_or_default(store: &mut RecordStore) -> User {
    if let Some(user) = current_user(store) {
        return user;
    }
    let default = seed::seed_users().into_iter().next().expect("seed users are non-empty");
    tracing::debug!("No acting user, falling back to seed account {}", default.id);
    store.set(keys::USER, &default);
    default
}

pub fn is_logged_in(store: &RecordStore) -> bool {
    store.get(keys::IS_LOGGED_IN, false)
}

/// Create an account and open a session
pub fn register(
    store: &mut RecordStore,
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> MarketResult<User> {
    let name = name.trim();
    let email = email.trim();

    if name.is_empty() || email.is_empty() {
        return Err(MarketError::validation("name and email are required"));
    }
    if password.is_empty() {
        return Err(MarketError::validation("password is required"));
    }
    if password != confirm_password {
        return Err(MarketError::validation("passwords do not match"));
    }

    let user = User {
        id: next_record_id(),
        name: name.to_string(),
        email: email.to_string(),
    };

    store.set(keys::USER, &user);

    let mut users: Vec<User> = store.get(keys::USERS, Vec::new());
    users.push(user.clone());
    store.set(keys::USERS, &users);

    store.set(keys::IS_LOGGED_IN, &true);
    tracing::info!("Registered user {}", user.id);
    Ok(user)
}

/// Open a session for the stored user when the email matches
pub fn login(store: &mut RecordStore, email: &str) -> MarketResult<User> {
    match current_user(store) {
        Some(user) if user.email == email => {
            store.set(keys::IS_LOGGED_IN, &true);
            Ok(user)
        }
        _ => Err(MarketError::InvalidCredentials),
    }
}

/// Close the session and drop the acting user record
pub fn logout(store: &mut RecordStore) {
    store.remove(keys::USER);
    store.set(keys::IS_LOGGED_IN, &false);
}

/// Update the acting user's name and email, syncing the `users` collection
pub fn update_profile(store: &mut RecordStore, name: &str, email: &str) -> MarketResult<User> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(MarketError::validation("name and email are required"));
    }

    let mut user =
        current_user(store).ok_or_else(|| MarketError::not_found("User", "current"))?;
    user.name = name.to_string();
    user.email = email.to_string();

    store.set(keys::USER, &user);

    let mut users: Vec<User> = store.get(keys::USERS, Vec::new());
    for entry in &mut users {
        if entry.id == user.id {
            *entry = user.clone();
        }
    }
    store.set(keys::USERS, &users);

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    fn seeded_store() -> RecordStore {
        let mut store = RecordStore::new(MemoryBackend::new());
        seed::ensure_seeded(&mut store);
        store
    }

    #[test]
    fn test_register_and_login() {
        let mut store = RecordStore::new(MemoryBackend::new());

        let user = register(&mut store, "Ирина", "irina@mail.com", "pw", "pw").unwrap();
        assert!(is_logged_in(&store));
        assert_eq!(current_user(&store).unwrap(), user);

        logout(&mut store);
        assert!(!is_logged_in(&store));
        assert!(current_user(&store).is_none());

        // Logged out and the record is gone, so the email no longer matches
        assert!(matches!(
            login(&mut store, "irina@mail.com"),
            Err(MarketError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_register_validation() {
        let mut store = RecordStore::new(MemoryBackend::new());

        assert!(matches!(
            register(&mut store, "", "a@b.c", "pw", "pw"),
            Err(MarketError::Validation(_))
        ));
        assert!(matches!(
            register(&mut store, "Имя", "a@b.c", "pw", "other"),
            Err(MarketError::Validation(_))
        ));
    }

    #[test]
    fn test_login_matches_stored_email() {
        let mut store = seeded_store();
        let user = login(&mut store, "orbix.design@mail.com").unwrap();
        assert_eq!(user.id, "1");
        assert!(login(&mut store, "nobody@mail.com").is_err());
    }

    #[test]
    fn test_current_or_default_materializes_seed_user() {
        let mut store = RecordStore::new(MemoryBackend::new());
        assert!(current_user(&store).is_none());

        let user = current_or_default(&mut store);
        assert_eq!(user.id, "1");
        // Persisted for subsequent calls
        assert_eq!(current_user(&store), Some(user));
    }

    #[test]
    fn test_update_profile_syncs_users_collection() {
        let mut store = seeded_store();
        let updated = update_profile(&mut store, "Саиф У.", "saif@mail.com").unwrap();
        assert_eq!(updated.name, "Саиф У.");

        let users: Vec<User> = store.get(keys::USERS, Vec::new());
        let entry = users.iter().find(|u| u.id == updated.id).unwrap();
        assert_eq!(entry.email, "saif@mail.com");
    }

    #[test]
    fn test_update_profile_requires_fields() {
        let mut store = seeded_store();
        assert!(update_profile(&mut store, " ", "a@b.c").is_err());
    }
}
