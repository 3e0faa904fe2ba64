//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// Builder for a whole `conversations.json` archive
#[derive(Default)]
pub struct ArchiveBuilder {
    records: Vec<Value>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conversation(mut self, conversation: ConversationBuilder) -> Self {
        self.records.push(conversation.to_json());
        self
    }

    /// Add a record verbatim (for malformed-record cases)
    pub fn with_raw(mut self, record: Value) -> Self {
        self.records.push(record);
        self
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.records.clone())
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    /// Write the archive as `conversations.json` in a fresh temp dir
    pub fn write_to_temp(&self) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("conversations.json");
        fs::write(&path, self.to_json_string()).expect("Failed to write archive");
        (temp_dir, path)
    }
}

/// Builder for one conversation record
pub struct ConversationBuilder {
    id: Value,
    title: Option<String>,
    create_time: Option<f64>,
    gizmo_id: Option<String>,
    model: Option<String>,
    is_archived: bool,
    is_starred: Option<bool>,
    nodes: Vec<NodeBuilder>,
}

impl ConversationBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: json!(id),
            title: None,
            create_time: None,
            gizmo_id: None,
            model: None,
            is_archived: false,
            is_starred: None,
            nodes: Vec::new(),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn created(mut self, epoch_seconds: f64) -> Self {
        self.create_time = Some(epoch_seconds);
        self
    }

    pub fn project(mut self, gizmo_id: &str) -> Self {
        self.gizmo_id = Some(gizmo_id.to_string());
        self
    }

    pub fn model(mut self, slug: &str) -> Self {
        self.model = Some(slug.to_string());
        self
    }

    pub fn archived(mut self) -> Self {
        self.is_archived = true;
        self
    }

    pub fn starred(mut self) -> Self {
        self.is_starred = Some(true);
        self
    }

    pub fn node(mut self, node: NodeBuilder) -> Self {
        self.nodes.push(node);
        self
    }

    /// Append a linear thread under an empty root node `root`.
    ///
    /// Turns are `(role, text)` pairs; node ids are `n1`, `n2`, ...
    pub fn thread(mut self, turns: &[(&str, &str)]) -> Self {
        let ids: Vec<String> = (1..=turns.len()).map(|i| format!("n{}", i)).collect();

        let mut root = NodeBuilder::empty("root");
        if let Some(first) = ids.first() {
            root = root.children(&[first.as_str()]);
        }
        self.nodes.push(root);

        for (i, (role, text)) in turns.iter().enumerate() {
            let parent = if i == 0 { "root".to_string() } else { ids[i - 1].clone() };
            let mut node = NodeBuilder::message(&ids[i], role, text).parent(&parent);
            if let Some(next) = ids.get(i + 1) {
                node = node.children(&[next.as_str()]);
            }
            self.nodes.push(node);
        }
        self
    }

    pub fn to_json(&self) -> Value {
        let mapping: Map<String, Value> =
            self.nodes.iter().map(|node| (node.id.clone(), node.to_json())).collect();

        let mut record = json!({
            "id": self.id,
            "title": self.title,
            "create_time": self.create_time,
            "update_time": self.create_time,
            "gizmo_id": self.gizmo_id,
            "gizmo_type": self.gizmo_id.as_ref().map(|_| "snorlax"),
            "default_model_slug": self.model,
            "is_archived": self.is_archived,
            "mapping": mapping,
        });
        if let Some(starred) = self.is_starred {
            record["is_starred"] = json!(starred);
        }
        record
    }
}

/// Builder for one mapping node
pub struct NodeBuilder {
    id: String,
    message: Option<Value>,
    parent: Option<String>,
    children: Vec<String>,
}

impl NodeBuilder {
    /// Node without a message (e.g. the synthetic root)
    pub fn empty(id: &str) -> Self {
        Self { id: id.to_string(), message: None, parent: None, children: Vec::new() }
    }

    /// Node with a plain text message
    pub fn message(id: &str, role: &str, text: &str) -> Self {
        Self::with_content(id, role, json!({ "content_type": "text", "parts": [text] }))
    }

    /// Node with an arbitrary content object
    pub fn with_content(id: &str, role: &str, content: Value) -> Self {
        let message = json!({
            "id": format!("msg-{}", id),
            "author": { "role": role },
            "create_time": 1_700_000_000.0,
            "content": content,
        });
        Self { id: id.to_string(), message: Some(message), parent: None, children: Vec::new() }
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn children(mut self, children: &[&str]) -> Self {
        self.children = children.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "message": self.message,
            "parent": self.parent,
            "children": self.children,
        })
    }
}
