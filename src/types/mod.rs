pub mod element;
pub mod station;
pub mod summary;
