//! Storefront domain model: value objects, aggregates and store events.
pub mod aggregates;
pub mod events;
pub mod value_objects;
