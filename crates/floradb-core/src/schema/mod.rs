mod registry;

pub use registry::{SchemaBuilder, SchemaError, SchemaRegistry};
