pub mod error;
pub mod footer;
pub mod header;
pub mod record;
pub mod spectrum;

pub use error::*;
pub use footer::*;
pub use header::*;
pub use record::*;
pub use spectrum::*;
