pub mod config;
pub mod db;
pub mod error;
pub mod hash;
pub mod inflect;
pub mod schema;
pub mod word;

pub use config::*;
pub use error::*;
pub use hash::*;
pub use inflect::*;
pub use word::*;
