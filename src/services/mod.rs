pub mod gateway;
pub use gateway::{CacheOutcome, Lookup, LookupKey, RecordStore, lookup_or_fetch};

pub mod resource_service;
pub use resource_service::{ResourceError, ResourceService};

pub mod resource_service_impl;
pub use resource_service_impl::SeaOrmResourceService;
