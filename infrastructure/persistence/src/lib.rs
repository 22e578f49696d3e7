pub mod db;
mod error;
pub mod unit_of_work;
pub mod catalog {
    pub mod entity;
    pub mod repository;
}
pub mod inventory {
    pub mod entity;
    pub mod repository;
}
pub mod cart {
    pub mod entity;
    pub mod repository;
}
pub mod order {
    pub mod entity;
    pub mod repository;
}
pub mod memory {
    mod repositories;
    pub mod store;
}

pub use memory::store::{InMemoryStore, MemoryState};
pub use unit_of_work::PgTransactionCoordinator;
