// Service exports
pub mod appwrite;
pub mod auth;
pub mod cache;
pub mod store;

pub use appwrite::AppwriteClient;
pub use auth::{AuthError, Claims, JwtVerifier};
pub use cache::CachedStore;
pub use store::{InMemoryStore, ProfileStore, StoreError};
