pub mod extract;
pub mod fields;

pub use extract::{ApiJson, ApiPath};
