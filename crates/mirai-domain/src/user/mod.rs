mod aggregate;
mod repository;


pub use aggregate::{User, UserProfile};
pub use repository::{PassphraseHasher, UserRepository};
