pub mod glb;

pub use glb::{ASSET_ROOT_NAME, GlbLoader};
