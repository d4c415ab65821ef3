//! Observable stores over [`crate::storage::KeyValueStore`].

pub mod observable;
pub mod profile;
pub mod session;

pub use observable::{Listeners, Subscription};
pub use profile::{ProfileStore, PROFILE_KEY};
pub use session::{LoginOutcome, SessionStore, TOKEN_KEY};
