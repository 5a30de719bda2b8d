use std::path::{Path, PathBuf};

use crate::assets::GlbLoader;
use crate::assets::temp::{TEMP_URI_SCHEME, TempHandleStore};
use crate::errors::{AnimatorError, Result};
use crate::host::{AssetDecoder, DecodedAsset, NodeTransforms};
use crate::scene::{NodeHandle, SceneGraph, Transform};

/// In-memory renderer: decodes GLB content into a [`SceneGraph`] and lets the
/// animator mutate it, without drawing anything.
///
/// Source resolution:
/// - `blob:` URIs are looked up in the shared [`TempHandleStore`]
/// - `http://` / `https://` URIs are rejected
/// - anything else is a file path, relative to the asset root when one is set
///
/// Disk reads go through `tokio::fs`, so decoding a path needs a tokio runtime.
pub struct HeadlessRenderer {
    graph: SceneGraph,
    temp_handles: TempHandleStore,
    asset_root: Option<PathBuf>,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new(temp_handles: TempHandleStore) -> Self {
        Self {
            graph: SceneGraph::new(),
            temp_handles,
            asset_root: None,
        }
    }

    #[must_use]
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = Some(root.into());
        self
    }

    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    async fn read_source(&self, uri: &str) -> Result<Vec<u8>> {
        if uri.starts_with(TEMP_URI_SCHEME) {
            return self
                .temp_handles
                .resolve(uri)
                .map(|bytes| bytes.to_vec())
                .ok_or_else(|| AnimatorError::Decode(format!("temporary handle '{uri}' is not live")));
        }
        if uri.starts_with("http://") || uri.starts_with("https://") {
            return Err(AnimatorError::Decode(format!(
                "remote source '{uri}' is not supported by the headless renderer"
            )));
        }

        let path = self.resolve_path(uri);
        Ok(tokio::fs::read(&path).await?)
    }

    fn resolve_path(&self, uri: &str) -> PathBuf {
        match &self.asset_root {
            // web-style absolute paths are relative to the asset root
            Some(root) => root.join(uri.trim_start_matches('/')),
            None => Path::new(uri).to_path_buf(),
        }
    }
}

impl AssetDecoder for HeadlessRenderer {
    async fn decode(&mut self, uri: &str) -> Result<DecodedAsset> {
        let bytes = self.read_source(uri).await?;
        GlbLoader::load(&bytes, &mut self.graph)
    }
}

impl NodeTransforms for HeadlessRenderer {
    fn transform_mut(&mut self, node: NodeHandle) -> Option<&mut Transform> {
        self.graph.transform_mut(node)
    }

    fn find_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        self.graph.find_by_name(root, name)
    }

    fn remove_subtree(&mut self, root: NodeHandle) -> usize {
        self.graph.remove_subtree(root)
    }
}
