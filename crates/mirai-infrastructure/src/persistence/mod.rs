pub mod repositories;

mod database;
mod repository_base;

pub use database::{Database, DatabaseSettings};
pub use repository_base::SqliteRepositoryBase;
