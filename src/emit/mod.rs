mod json;

pub use json::{assemble, generate, to_canonical_json, typed_wrapper_source, GeneratedArtifacts};
