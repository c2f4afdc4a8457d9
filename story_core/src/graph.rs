//! Dialogue graph data and TOML loading

use crate::variables::{StoryValue, Variables};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Embedded Aethermoor story
const BUILTIN_STORY: &str = include_str!("../data/story.toml");

/// Error loading a story graph
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("IO error reading '{path}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid story graph: {0}")]
    Validation(String),
}

/// A player choice leading to another node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryChoice {
    pub text: String,
    pub destination: String,
    /// Requirements checked by a [`ChoiceCondition`](crate::ChoiceCondition)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<BTreeMap<String, StoryValue>>,
}

/// One passage of the story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryNode {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub choices: Vec<StoryChoice>,
    /// Free-form `kind:value` markers such as `location:tavern`
    #[serde(default)]
    pub tags: Vec<String>,
    /// Bestiary ids to fight on arrival
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub encounter: Vec<String>,
}

impl StoryNode {
    /// Values of every tag with the given kind
    pub fn tag_values<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tags.iter().filter_map(move |tag| {
            tag.split_once(':')
                .filter(|(k, _)| *k == kind)
                .map(|(_, v)| v)
        })
    }

    /// True for nodes tagged as a fight or boss lair, or with an encounter
    pub fn is_combat(&self) -> bool {
        !self.encounter.is_empty()
            || self
                .tags
                .iter()
                .any(|t| t.starts_with("combat:") || t.starts_with("boss:"))
    }
}

/// On-disk layout of a story document
#[derive(Debug, Deserialize)]
struct StoryFile {
    start_node: String,
    #[serde(default)]
    variables: Variables,
    #[serde(default)]
    nodes: Vec<StoryNode>,
}

/// A complete dialogue graph
#[derive(Debug, Clone, PartialEq)]
pub struct StoryGraph {
    start_node: String,
    nodes: HashMap<String, StoryNode>,
    variables: Variables,
}

impl StoryGraph {
    /// Build a graph from parts. Later nodes replace earlier ones with the same id.
    pub fn new(start_node: impl Into<String>, nodes: Vec<StoryNode>, variables: Variables) -> Self {
        StoryGraph {
            start_node: start_node.into(),
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
            variables,
        }
    }

    /// The embedded Aethermoor story
    pub fn builtin() -> Result<Self, GraphError> {
        Self::from_toml(BUILTIN_STORY)
    }

    /// Parse a story document. The start node must exist.
    pub fn from_toml(content: &str) -> Result<Self, GraphError> {
        let file: StoryFile = toml::from_str(content)?;
        let graph = StoryGraph::new(file.start_node, file.nodes, file.variables);
        if graph.node(&graph.start_node).is_none() {
            return Err(GraphError::Validation(format!(
                "start node '{}' is not defined",
                graph.start_node
            )));
        }
        debug!(nodes = graph.nodes.len(), start = %graph.start_node, "story graph loaded");
        Ok(graph)
    }

    pub fn load(path: &Path) -> Result<Self, GraphError> {
        let content = std::fs::read_to_string(path).map_err(|error| GraphError::Io {
            error,
            path: path.to_path_buf(),
        })?;
        Self::from_toml(&content)
    }

    pub fn start_node(&self) -> &str {
        &self.start_node
    }

    pub fn node(&self, id: &str) -> Option<&StoryNode> {
        self.nodes.get(id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Variables a fresh playthrough starts with
    pub fn initial_variables(&self) -> &Variables {
        &self.variables
    }

    /// Describe every structural problem: a missing start node, or choices
    /// pointing at undefined nodes. Empty when the graph is well formed.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !self.nodes.contains_key(&self.start_node) {
            problems.push(format!("start node '{}' is not defined", self.start_node));
        }

        let mut ids: Vec<&String> = self.nodes.keys().collect();
        ids.sort();
        for id in ids {
            for (i, choice) in self.nodes[id].choices.iter().enumerate() {
                if !self.nodes.contains_key(&choice.destination) {
                    problems.push(format!(
                        "node '{}' choice {} leads to undefined node '{}'",
                        id, i, choice.destination
                    ));
                }
            }
        }
        problems
    }

    /// Node ids that cannot be reached from the start node
    pub fn unreachable_nodes(&self) -> Vec<&str> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack = vec![self.start_node.as_str()];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.choices.iter().map(|c| c.destination.as_str()));
            }
        }

        let mut unreachable: Vec<&str> = self
            .node_ids()
            .filter(|id| !seen.contains(id))
            .collect();
        unreachable.sort_unstable();
        unreachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
start_node = "gate"

[variables]
has_key = false

[[nodes]]
id = "gate"
text = "A locked gate."
tags = ["location:gate"]

[[nodes.choices]]
text = "Open it"
destination = "yard"
conditions = { has_key = true }

[[nodes.choices]]
text = "Climb over"
destination = "wall"

[[nodes]]
id = "yard"
text = "An empty yard."
encounter = ["wolf"]
"#;

    #[test]
    fn test_builtin_is_well_formed() {
        let graph = StoryGraph::builtin().unwrap();
        assert_eq!(graph.start_node(), "start");
        assert!(graph.len() >= 30);
        assert_eq!(graph.validate(), Vec::<String>::new());
        assert!(graph.unreachable_nodes().is_empty());
    }

    #[test]
    fn test_parse_small_graph() {
        let graph = StoryGraph::from_toml(SMALL).unwrap();
        let gate = graph.node("gate").unwrap();
        assert_eq!(gate.choices.len(), 2);
        assert_eq!(
            gate.choices[0].conditions.as_ref().unwrap()["has_key"],
            StoryValue::Flag(true)
        );
        assert_eq!(gate.tag_values("location").collect::<Vec<_>>(), vec!["gate"]);
        assert!(graph.node("yard").unwrap().is_combat());
        assert!(!gate.is_combat());
    }

    #[test]
    fn test_validate_reports_dangling() {
        let graph = StoryGraph::from_toml(SMALL).unwrap();
        let problems = graph.validate();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("'wall'"));
    }

    #[test]
    fn test_missing_start_node_rejected() {
        let result = StoryGraph::from_toml("start_node = \"nowhere\"\n");
        assert!(matches!(result, Err(GraphError::Validation(_))));
    }
}
