//! Archive assembly and the end-to-end package pipeline.

pub mod archive;
pub mod filename;
pub mod manifest;
pub mod password;
pub mod pipeline;

pub use archive::{assemble_package, PackageArchive, PackageError, PackageFile};
pub use pipeline::{build_secure_package, build_standard_package, BuiltPackage, PackageInputs, PipelineError};
