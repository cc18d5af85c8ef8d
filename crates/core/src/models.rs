pub mod buckets;
pub mod form;
pub mod slot;
