mod loader;
mod model;

pub use loader::{LoadResult, load_rule, parse_rule};
pub use model::{DsRule, PathType, Rule, SchemaOrRef};
