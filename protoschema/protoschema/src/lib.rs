mod driver;
mod error;

pub use driver::{CompileOptions, compile_descriptor_set, compile_descriptor_set_with_options};
pub use error::Error;
pub use protoschema_core as core;
pub use protoschema_protobuf as protobuf;
