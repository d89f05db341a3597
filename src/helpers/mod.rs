//! Helper functions shared by the generator and template filters

mod date;
mod url;

pub use date::*;
pub use url::*;
