//! Shared fixtures: an in-memory GLB writer and a ready-made headless session.

#![allow(dead_code)]

use serde_json::{Value, json};

use glb_animator::{
    AnimatorSettings, HeadlessRenderer, LocalFile, ManualFrameLoop, TempHandleStore, ViewerSession,
};

pub const DT: f32 = 1.0 / 60.0;

pub type TestSession = ViewerSession<HeadlessRenderer, ManualFrameLoop>;

const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;
const FLOAT: u32 = 5126;

/// Writes minimal binary glTF files: nodes under one scene and any number of
/// single-channel translation clips.
#[derive(Default)]
pub struct GlbBuilder {
    nodes: Vec<Value>,
    scene_roots: Option<Vec<usize>>,
    accessors: Vec<Value>,
    buffer_views: Vec<Value>,
    animations: Vec<Value>,
    bin: Vec<u8>,
}

impl GlbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node. Nodes are indexed in insertion order.
    pub fn node(mut self, name: &str) -> Self {
        self.nodes.push(json!({ "name": name }));
        self
    }

    /// Links `child` under `parent` through the parent's `children` list.
    pub fn child(mut self, parent: usize, child: usize) -> Self {
        let node = &mut self.nodes[parent];
        if node.get("children").is_none() {
            node["children"] = json!([]);
        }
        node["children"].as_array_mut().unwrap().push(json!(child));
        self
    }

    /// Overrides the scene's root list, which defaults to every node.
    pub fn scene_roots(mut self, roots: &[usize]) -> Self {
        self.scene_roots = Some(roots.to_vec());
        self
    }

    /// Adds a clip that moves node `node` through `positions` at `times`.
    pub fn translation_clip(mut self, name: &str, node: usize, times: &[f32], positions: &[[f32; 3]]) -> Self {
        assert_eq!(times.len(), positions.len());

        let min = times.iter().copied().fold(f32::INFINITY, f32::min);
        let max = times.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let input = self.push_accessor(times, "SCALAR", Some((json!([min]), json!([max]))));
        let flat: Vec<f32> = positions.iter().flatten().copied().collect();
        let output = self.push_accessor(&flat, "VEC3", None);

        self.animations.push(json!({
            "name": name,
            "samplers": [{ "input": input, "output": output, "interpolation": "LINEAR" }],
            "channels": [{ "sampler": 0, "target": { "node": node, "path": "translation" } }],
        }));
        self
    }

    fn push_accessor(&mut self, data: &[f32], kind: &str, bounds: Option<(Value, Value)>) -> usize {
        let components = match kind {
            "VEC3" => 3,
            _ => 1,
        };
        let offset = self.bin.len();
        for v in data {
            self.bin.extend_from_slice(&v.to_le_bytes());
        }

        let view = self.buffer_views.len();
        self.buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": offset,
            "byteLength": data.len() * 4,
        }));

        let mut accessor = json!({
            "bufferView": view,
            "componentType": FLOAT,
            "count": data.len() / components,
            "type": kind,
        });
        if let Some((min, max)) = bounds {
            accessor["min"] = min;
            accessor["max"] = max;
        }
        self.accessors.push(accessor);
        self.accessors.len() - 1
    }

    pub fn build(self) -> Vec<u8> {
        let node_indices = self.scene_roots.unwrap_or_else(|| (0..self.nodes.len()).collect());
        let mut doc = json!({
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": node_indices }],
            "nodes": self.nodes,
        });
        if !self.bin.is_empty() {
            doc["buffers"] = json!([{ "byteLength": self.bin.len() }]);
            doc["bufferViews"] = Value::Array(self.buffer_views);
            doc["accessors"] = Value::Array(self.accessors);
            doc["animations"] = Value::Array(self.animations);
        }

        let mut json_chunk = serde_json::to_vec(&doc).unwrap();
        while json_chunk.len() % 4 != 0 {
            json_chunk.push(b' ');
        }
        let mut bin_chunk = self.bin;
        while bin_chunk.len() % 4 != 0 {
            bin_chunk.push(0);
        }

        let mut total = 12 + 8 + json_chunk.len();
        if !bin_chunk.is_empty() {
            total += 8 + bin_chunk.len();
        }

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(b"glTF");
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
        out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
        out.extend_from_slice(&json_chunk);
        if !bin_chunk.is_empty() {
            out.extend_from_slice(&(bin_chunk.len() as u32).to_le_bytes());
            out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
            out.extend_from_slice(&bin_chunk);
        }
        out
    }
}

/// One node named `Body`, no clips.
pub fn static_model() -> Vec<u8> {
    GlbBuilder::new().node("Body").build()
}

/// One node named `Body` and a one-second translation clip per name, in order.
pub fn clip_model(names: &[&str]) -> Vec<u8> {
    names
        .iter()
        .fold(GlbBuilder::new().node("Body"), |b, name| {
            b.translation_clip(name, 0, &[0.0, 1.0], &[[0.0, 0.0, 0.0], [0.0, 2.0, 0.0]])
        })
        .build()
}

/// Drives a load to completion on a current-thread tokio runtime.
pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

pub fn glb_file(name: &str, bytes: Vec<u8>) -> LocalFile {
    LocalFile::new(name, bytes)
}

/// A session with no initial model.
pub fn session() -> TestSession {
    session_with(AnimatorSettings {
        initial_model_uri: None,
        ..AnimatorSettings::default()
    })
}

pub fn session_with(settings: AnimatorSettings) -> TestSession {
    let store = TempHandleStore::new();
    let renderer = HeadlessRenderer::new(store.clone());
    ViewerSession::new(renderer, ManualFrameLoop::new(), store, settings)
}

/// Transform of the live asset's root node.
pub fn root_transform(session: &TestSession) -> glb_animator::Transform {
    let root = session.current_asset().and_then(|a| a.root()).unwrap();
    session.renderer().graph().get_node(root).unwrap().transform.clone()
}

/// Transform of the first node named `name` under the live asset.
pub fn node_transform(session: &TestSession, name: &str) -> glb_animator::Transform {
    let root = session.current_asset().and_then(|a| a.root()).unwrap();
    let graph = session.renderer().graph();
    let node = graph.find_by_name(root, name).unwrap();
    graph.get_node(node).unwrap().transform.clone()
}
