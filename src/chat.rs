//! Chat threads with listing counterparties
//!
//! Threads are whole records under the `chats` key; sending a message
//! rewrites the collection. Counterparties are resolved against the `users`
//! collection.

use crate::account;
use crate::error::{MarketError, MarketResult};
use crate::model::{next_record_id, Chat, Message, User};
use crate::store::{keys, RecordStore};
use chrono::Utc;

/// All chat threads
pub fn threads(store: &RecordStore) -> Vec<Chat> {
    store.get(keys::CHATS, Vec::new())
}

/// Look up a thread by id
pub fn thread(store: &RecordStore, id: &str) -> MarketResult<Chat> {
    threads(store)
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| MarketError::not_found("Chat", id))
}

/// The user on the other side of a thread, when known
pub fn counterparty(store: &RecordStore, chat: &Chat) -> Option<User> {
    let users: Vec<User> = store.get(keys::USERS, Vec::new());
    users.into_iter().find(|u| u.id == chat.user_id)
}

/// Append a message from the acting user to a thread
pub fn send_message(store: &mut RecordStore, chat_id: &str, text: &str) -> MarketResult<Message> {
    let text = text.trim();
    if text.is_empty() {
        return Err(MarketError::validation("message text is required"));
    }

    let sender = account::current_or_default(store);
    let message = Message {
        id: next_record_id(),
        text: text.to_string(),
        sender_id: sender.id,
        timestamp: Utc::now().to_rfc3339(),
    };

    let mut chats: Vec<Chat> = store.get(keys::CHATS, Vec::new());
    let chat = chats
        .iter_mut()
        .find(|c| c.id == chat_id)
        .ok_or_else(|| MarketError::not_found("Chat", chat_id))?;
    chat.messages.push(message.clone());
    store.set(keys::CHATS, &chats);

    Ok(message)
}
