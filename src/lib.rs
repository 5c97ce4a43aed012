pub mod error;
pub mod models;
pub mod notation;
pub mod features;
pub mod regex_gen;
pub mod parsers;
pub mod engine;
pub mod reporting;

// Re-export commonly used items
pub use error::*;
pub use models::*;
pub use notation::*;
pub use features::*;
pub use regex_gen::*;
pub use parsers::*;
pub use engine::*;
pub use reporting::*;
