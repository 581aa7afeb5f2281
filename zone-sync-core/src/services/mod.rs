//! Business logic service layer

mod sync_service;

pub use sync_service::SyncService;
