//! Plain-data blueprint descriptions and their conversion into a `Graph`.

pub mod conversion;
pub mod definition;

pub use conversion::IntoGraph;
pub use definition::*;
