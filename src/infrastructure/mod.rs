pub mod diesel_store;
pub mod memory;
pub mod models;

pub use diesel_store::DieselBookstore;
pub use memory::MemoryBookstore;
