pub mod index;
pub mod response;

pub use index::*;
pub use response::*;
