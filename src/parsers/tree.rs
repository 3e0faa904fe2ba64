//! Flattening of a conversation's node mapping into an ordered message list.
//!
//! Nodes are stored in an arena (a flat vector plus an id → slot table) and walked
//! depth-first with an explicit stack and a visited set, so corrupt mappings with
//! cycles, shared children or dangling parent ids cannot loop or recurse unboundedly.

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::content::extract_message_content;
use crate::models::{MessageNode, ProcessedMessage, Role};

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("mapping node '{node_id}' is malformed: {source}")]
    MalformedNode {
        node_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("message in node '{node_id}' has no author")]
    MissingAuthor { node_id: String },
}

/// Arena of message nodes keyed by their mapping id
#[derive(Debug, Default)]
pub struct MessageTree {
    nodes: Vec<(String, MessageNode)>,
    slots: HashMap<String, usize>,
}

impl MessageTree {
    /// Build the arena from a raw `mapping` object, preserving document order
    pub fn from_mapping(mapping: &Map<String, Value>) -> Result<Self, FlattenError> {
        let mut nodes = Vec::with_capacity(mapping.len());
        let mut slots = HashMap::with_capacity(mapping.len());

        for (node_id, value) in mapping {
            let node = MessageNode::deserialize(value).map_err(|source| {
                FlattenError::MalformedNode { node_id: node_id.clone(), source }
            })?;
            slots.insert(node_id.clone(), nodes.len());
            nodes.push((node_id.clone(), node));
        }

        Ok(Self { nodes, slots })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, node_id: &str) -> Option<&MessageNode> {
        self.slots.get(node_id).map(|&slot| &self.nodes[slot].1)
    }

    /// Ids of root nodes in document order.
    ///
    /// A node is a root when its parent is missing, null, empty, or not present in
    /// the mapping.
    pub fn root_ids(&self) -> Vec<&str> {
        self.root_slots().into_iter().map(|slot| self.nodes[slot].0.as_str()).collect()
    }

    fn root_slots(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, (_, node))| match node.parent.as_deref() {
                None | Some("") => true,
                Some(parent) => !self.slots.contains_key(parent),
            })
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Walk the tree from every root and emit messages in pre-order.
    ///
    /// Each node is visited at most once. Nodes without a message, without content,
    /// or whose extracted text is blank emit nothing but their children are still walked.
    pub fn flatten(&self) -> Result<Vec<ProcessedMessage>, FlattenError> {
        let mut visited = vec![false; self.nodes.len()];
        let mut messages = Vec::new();
        let mut stack = Vec::new();

        for root in self.root_slots() {
            stack.push(root);

            while let Some(slot) = stack.pop() {
                if visited[slot] {
                    continue;
                }
                visited[slot] = true;

                let (node_id, node) = &self.nodes[slot];
                if let Some(message) = emit_message(node_id, node, messages.is_empty())? {
                    messages.push(message);
                }

                // Reverse so the first child is popped first
                for child_id in node.children.iter().rev() {
                    if let Some(&child) = self.slots.get(child_id)
                        && !visited[child]
                    {
                        stack.push(child);
                    }
                }
            }
        }

        Ok(messages)
    }
}

/// Convenience wrapper: build the arena and flatten it
pub fn flatten_mapping(mapping: &Map<String, Value>) -> Result<Vec<ProcessedMessage>, FlattenError> {
    MessageTree::from_mapping(mapping)?.flatten()
}

fn emit_message(
    node_id: &str,
    node: &MessageNode,
    is_first_message: bool,
) -> Result<Option<ProcessedMessage>, FlattenError> {
    let Some(message) = node.message.as_ref() else {
        return Ok(None);
    };
    let Some(content) = message.content.as_ref() else {
        return Ok(None);
    };

    let text = extract_message_content(content);
    if text.trim().is_empty() {
        return Ok(None);
    }

    let author = message
        .author
        .as_ref()
        .ok_or_else(|| FlattenError::MissingAuthor { node_id: node_id.to_string() })?;
    let Some(role) = author.role.as_deref().and_then(Role::from_name) else {
        debug!("Skipping message in node '{}' with role {:?}", node_id, author.role);
        return Ok(None);
    };

    Ok(Some(ProcessedMessage {
        id: message.id.clone().unwrap_or_else(|| node_id.to_string()),
        node_id: node_id.to_string(),
        role,
        content: text,
        create_time: message.create_time,
        is_first_message,
        parent_id: node.parent.clone(),
        children_ids: node.children.clone(),
    }))
}
