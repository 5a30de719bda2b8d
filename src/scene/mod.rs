//! Scene Graph Module
//!
//! The minimal scene representation the animator writes into:
//! - [`Node`]: named node with parent/child links
//! - [`Transform`]: position, Euler rotation and scale
//! - [`SceneGraph`]: generational node storage

pub mod graph;
pub mod node;
pub mod transform;

pub use graph::SceneGraph;
pub use node::Node;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
