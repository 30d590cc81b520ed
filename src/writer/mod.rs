pub mod evolution;
pub mod lookups;
pub mod schema_gen;
pub mod sqlite;

pub use evolution::*;
pub use lookups::*;
pub use schema_gen::*;
pub use sqlite::*;
