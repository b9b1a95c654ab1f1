#![forbid(unsafe_code)]

//! The versioned document file format.
//!
//! A document serializes to a nested JSON structure: metadata, camera, and
//! the root trees with children inlined recursively. `collapsed` and
//! `widthConstrained` are written only when set, so untouched nodes stay
//! compact. Loading runs a migration step first — a file claiming a future
//! version is rejected outright rather than half-parsed.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::measure::TextMeasurer;
use crate::node::{Node, NodeId};
use crate::store::{Camera, MapMeta, NodeStore};

/// Newest format version this build reads and writes.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a document failed to load.
#[derive(Debug)]
pub enum LoadError {
    /// The file declares a version newer than this build understands.
    UnsupportedVersion(u32),
    /// The data was malformed: bad JSON, duplicate ids, dangling links.
    InvalidData(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedVersion(version) => {
                write!(f, "unsupported document version {version}")
            }
            Self::InvalidData(msg) => write!(f, "invalid document data: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidData(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// File schema
// ---------------------------------------------------------------------------

fn default_version() -> u32 {
    CURRENT_FORMAT_VERSION
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Top-level file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFile {
    /// Format version; absent means 1.
    #[serde(default = "default_version")]
    pub version: u32,
    pub meta: MetaFile,
    pub camera: CameraFile,
    pub roots: Vec<NodeFile>,
    /// Opaque attachments, carried through untouched.
    #[serde(default)]
    pub assets: Vec<serde_json::Value>,
}

/// Document metadata as serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaFile {
    pub id: String,
    pub theme: String,
}

/// Camera as serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraFile {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// One node with its subtree inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFile {
    pub id: NodeId,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub collapsed: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub width_constrained: bool,
    pub children: Vec<NodeFile>,
}

// ---------------------------------------------------------------------------
// Migration
// ---------------------------------------------------------------------------

/// Bring a parsed file up to [`CURRENT_FORMAT_VERSION`].
///
/// Version 1 is current, so today this only rejects files from the future;
/// the seam is where version bumps will chain their upgrades.
pub fn migrate_to_latest(file: MapFile) -> Result<MapFile, LoadError> {
    match file.version {
        CURRENT_FORMAT_VERSION => Ok(file),
        newer => Err(LoadError::UnsupportedVersion(newer)),
    }
}

// ---------------------------------------------------------------------------
// Store <-> file
// ---------------------------------------------------------------------------

/// Serialize a store to the file structure.
#[must_use]
pub fn to_file(store: &NodeStore) -> MapFile {
    fn node_file(store: &NodeStore, id: NodeId) -> Option<NodeFile> {
        let node = store.node(id)?;
        Some(NodeFile {
            id: node.id,
            text: node.text.clone(),
            x: node.x,
            y: node.y,
            width: node.width,
            height: node.height,
            collapsed: node.collapsed,
            width_constrained: node.width_constrained,
            children: node
                .children
                .iter()
                .filter_map(|&child| node_file(store, child))
                .collect(),
        })
    }

    let camera = store.camera();
    MapFile {
        version: CURRENT_FORMAT_VERSION,
        meta: MetaFile {
            id: store.meta().id.clone(),
            theme: store.meta().theme.clone(),
        },
        camera: CameraFile {
            x: camera.x,
            y: camera.y,
            zoom: camera.zoom,
        },
        roots: store
            .roots()
            .iter()
            .filter_map(|&root| node_file(store, root))
            .collect(),
        assets: Vec::new(),
    }
}

/// Rebuild a store from a file, reconstructing parent links, validating id
/// uniqueness, and seeding the id counter past the highest loaded id.
pub fn from_file(
    file: MapFile,
    measurer: Box<dyn TextMeasurer>,
) -> Result<NodeStore, LoadError> {
    let file = migrate_to_latest(file)?;

    let mut nodes: FxHashMap<NodeId, Node> = FxHashMap::default();
    let mut roots = Vec::with_capacity(file.roots.len());

    fn insert(
        nodes: &mut FxHashMap<NodeId, Node>,
        entry: &NodeFile,
        parent: Option<NodeId>,
    ) -> Result<(), LoadError> {
        let node = Node {
            id: entry.id,
            parent,
            children: entry.children.iter().map(|child| child.id).collect(),
            x: entry.x,
            y: entry.y,
            width: entry.width,
            height: entry.height,
            text: entry.text.clone(),
            collapsed: entry.collapsed,
            width_constrained: entry.width_constrained,
        };
        if nodes.insert(entry.id, node).is_some() {
            return Err(LoadError::InvalidData(format!(
                "duplicate node id {}",
                entry.id
            )));
        }
        for child in &entry.children {
            insert(nodes, child, Some(entry.id))?;
        }
        Ok(())
    }

    for root in &file.roots {
        insert(&mut nodes, root, None)?;
        roots.push(root.id);
    }

    Ok(NodeStore::from_parts(
        nodes,
        roots,
        Camera {
            x: file.camera.x,
            y: file.camera.y,
            zoom: file.camera.zoom,
        },
        MapMeta {
            id: file.meta.id,
            theme: file.meta.theme,
        },
        measurer,
    ))
}

/// Serialize a file structure to JSON text.
pub fn to_json(file: &MapFile) -> Result<String, LoadError> {
    Ok(serde_json::to_string(file)?)
}

/// Parse JSON text into a file structure (unmigrated).
pub fn parse_json(json: &str) -> Result<MapFile, LoadError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MonospaceMeasurer;

    fn empty_file() -> MapFile {
        MapFile {
            version: 1,
            meta: MetaFile {
                id: "test".into(),
                theme: "default".into(),
            },
            camera: CameraFile {
                x: 0.0,
                y: 0.0,
                zoom: 1.0,
            },
            roots: Vec::new(),
            assets: Vec::new(),
        }
    }

    #[test]
    fn migrate_passes_current_version_through() {
        let file = empty_file();
        let migrated = migrate_to_latest(file.clone()).unwrap();
        assert_eq!(migrated, file);
    }

    #[test]
    fn migrate_rejects_future_version() {
        let mut file = empty_file();
        file.version = 999;
        let err = migrate_to_latest(file).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedVersion(999)));
    }

    #[test]
    fn missing_version_defaults_to_one() {
        let json = r#"{"meta":{"id":"m","theme":"default"},"camera":{"x":0,"y":0,"zoom":1},"roots":[]}"#;
        let file = parse_json(json).unwrap();
        assert_eq!(file.version, 1);
    }

    #[test]
    fn serialize_writes_current_version() {
        let store = NodeStore::new(Box::new(MonospaceMeasurer));
        let file = to_file(&store);
        assert_eq!(file.version, CURRENT_FORMAT_VERSION);
    }

    #[test]
    fn round_trip_empty_document() {
        let store = NodeStore::new(Box::new(MonospaceMeasurer));
        let file = to_file(&store);
        let json = to_json(&file).unwrap();
        let reparsed = parse_json(&json).unwrap();
        assert_eq!(reparsed, file);
        let reloaded = from_file(reparsed, Box::new(MonospaceMeasurer)).unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn round_trip_preserves_tree_and_flags() {
        let mut store = NodeStore::new(Box::new(MonospaceMeasurer));
        let root = store.add_root("root", 0.0, 0.0);
        let a = store.add_child(root, "a").unwrap();
        let _b = store.add_child(root, "b").unwrap();
        let _a1 = store.add_child(a, "a1").unwrap();
        store.set_collapsed(a, true).unwrap();
        store.constrain_width(root, 80.0).unwrap();
        store.set_camera(12.0, -3.0, 1.5);

        let file = to_file(&store);
        let json = to_json(&file).unwrap();
        let reloaded = from_file(parse_json(&json).unwrap(), Box::new(MonospaceMeasurer)).unwrap();

        assert_eq!(to_file(&reloaded), file);
        assert_eq!(reloaded.len(), store.len());
        assert!(reloaded.node(a).unwrap().collapsed);
        assert!(reloaded.node(root).unwrap().width_constrained);
        assert_eq!(reloaded.camera(), store.camera());
        assert_eq!(reloaded.children(root).unwrap(), store.children(root).unwrap());
    }

    #[test]
    fn reloaded_store_continues_id_sequence() {
        let mut store = NodeStore::new(Box::new(MonospaceMeasurer));
        let root = store.add_root("root", 0.0, 0.0);
        let child = store.add_child(root, "child").unwrap();

        let file = to_file(&store);
        let mut reloaded = from_file(file, Box::new(MonospaceMeasurer)).unwrap();
        let fresh = reloaded.add_child(root, "fresh").unwrap();
        assert!(fresh.raw() > child.raw());
    }

    #[test]
    fn default_flags_are_omitted_from_json() {
        let mut store = NodeStore::new(Box::new(MonospaceMeasurer));
        store.add_root("root", 0.0, 0.0);
        let json = to_json(&to_file(&store)).unwrap();
        assert!(!json.contains("collapsed"));
        assert!(!json.contains("widthConstrained"));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let json = r#"{
            "version": 1,
            "meta": {"id": "m", "theme": "default"},
            "camera": {"x": 0, "y": 0, "zoom": 1},
            "roots": [
                {"id": 0, "text": "a", "x": 0, "y": 0, "width": 100, "height": 32, "children": []},
                {"id": 0, "text": "b", "x": 0, "y": 0, "width": 100, "height": 32, "children": []}
            ]
        }"#;
        let err = from_file(parse_json(json).unwrap(), Box::new(MonospaceMeasurer)).unwrap_err();
        assert!(matches!(err, LoadError::InvalidData(_)));
    }

    #[test]
    fn malformed_json_is_invalid_data() {
        let err = parse_json("{not json").unwrap_err();
        assert!(matches!(err, LoadError::InvalidData(_)));
    }
}
