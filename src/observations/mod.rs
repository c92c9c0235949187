pub mod aggregate;
pub mod error;
pub mod fetch;
pub mod probe;
pub mod response;
