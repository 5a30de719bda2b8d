//! Asset ingestion and lifetime.
//!
//! - [`ingest`]: accept or reject user-supplied files
//! - [`temp`]: temporary `blob:` handles for local files
//! - [`handle`]: the live [`AssetHandle`] and its release
//! - [`loaders`]: GLB decoding into the scene graph

pub mod handle;
pub mod ingest;
pub mod loaders;
pub mod temp;

pub use handle::{AssetHandle, AssetSource, default_export_name};
pub use ingest::{GLB_EXTENSION, GLB_MIME, LocalFile, has_glb_extension, validate_glb};
pub use loaders::GlbLoader;
pub use temp::{TEMP_URI_SCHEME, TempHandle, TempHandleStore};
