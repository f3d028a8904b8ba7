pub mod artifacts;
pub mod filename;

pub use artifacts::{output_filename, ArtifactStore};
pub use filename::{file_stem, secure_filename};
