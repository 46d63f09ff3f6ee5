//! Schema reference resolution, document loading, and JSON validation.

mod load;
mod plugin;
mod remote;
mod resolver;
mod validate;

pub use load::DocLoader;
pub use plugin::{PluginRegistry, ValidationHandler};
pub use remote::{HttpClient, ReqwestClient};
pub use resolver::{ResolverConfig, SchemaSource, resolve, to_uri};
pub use validate::{JsonValidationErrors, JsonValidator};
