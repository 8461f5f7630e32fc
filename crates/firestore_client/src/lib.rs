//! Firestore REST client.
//!
//! Backs both document collections the engine needs: the `users`
//! subscriber store and the `mail_queue` outbound queue. Only two
//! operations exist — full-collection list and per-document delete.

pub mod auth;
pub mod rest;
pub mod value;

pub use auth::FirestoreAuth;
pub use rest::FirestoreClient;
