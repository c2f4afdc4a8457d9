//! Story interpreter

use crate::condition::ChoiceCondition;
use crate::graph::{GraphError, StoryChoice, StoryGraph, StoryNode};
use crate::store::{ProgressStore, StoreError, StoryProgress};
use crate::variables::{StoryValue, Variables};
use tracing::{debug, info, warn};

/// Text shown when the current node id has no node
pub const MISSING_NODE_TEXT: &str = "Error: story node not found.";

/// Default key for progress records
pub const DEFAULT_PROGRESS_KEY: &str = "rpg_story_save";

/// What a choice did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceOutcome {
    /// False when the choice was rejected and nothing changed
    pub moved: bool,
    /// The caller should start an encounter
    pub triggers_combat: bool,
    /// Bestiary ids of the destination's encounter, if it has one
    pub encounter: Vec<String>,
}

/// Walks a [`StoryGraph`], holding the current node and variables
#[derive(Debug, Clone, PartialEq)]
pub struct StoryEngine {
    graph: StoryGraph,
    current_node: String,
    variables: Variables,
    visited: Vec<String>,
    key: String,
}

impl StoryEngine {
    /// Start a fresh playthrough of `graph`
    pub fn new(graph: StoryGraph) -> Self {
        let start = graph.start_node().to_string();
        StoryEngine {
            variables: graph.initial_variables().clone(),
            visited: vec![start.clone()],
            current_node: start,
            graph,
            key: DEFAULT_PROGRESS_KEY.to_string(),
        }
    }

    /// Fresh playthrough of the embedded Aethermoor story
    pub fn builtin() -> Result<Self, GraphError> {
        Ok(Self::new(StoryGraph::builtin()?))
    }

    /// Use a different key for progress records
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }

    pub fn current_node_id(&self) -> &str {
        &self.current_node
    }

    pub fn current_node(&self) -> Option<&StoryNode> {
        self.graph.node(&self.current_node)
    }

    pub fn current_text(&self) -> &str {
        self.current_node()
            .map_or(MISSING_NODE_TEXT, |node| node.text.as_str())
    }

    /// All choices of the current node, empty if the node is missing
    pub fn current_choices(&self) -> &[StoryChoice] {
        self.current_node()
            .map_or(&[][..], |node| node.choices.as_slice())
    }

    /// Choices that pass `condition`, with their index in the full list
    pub fn available_choices<C: ChoiceCondition>(
        &self,
        condition: &C,
    ) -> Vec<(usize, &StoryChoice)> {
        self.current_choices()
            .iter()
            .enumerate()
            .filter(|(_, choice)| condition.is_available(choice, &self.variables))
            .collect()
    }

    pub fn has_choices(&self) -> bool {
        !self.current_choices().is_empty()
    }

    pub fn tags(&self) -> &[String] {
        self.current_node().map_or(&[][..], |node| node.tags.as_slice())
    }

    /// Distinct node ids entered so far, in order of first visit
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Follow choice `index` of the current node. Out of range does nothing.
    pub fn make_choice(&mut self, index: usize) -> ChoiceOutcome {
        let Some(choice) = self.current_choices().get(index).cloned() else {
            debug!(node = %self.current_node, index, "choice out of range, ignored");
            return ChoiceOutcome::default();
        };

        self.current_node = choice.destination.clone();
        if !self.visited.contains(&choice.destination) {
            self.visited.push(choice.destination.clone());
        }

        let destination = self.graph.node(&choice.destination);
        if destination.is_none() {
            warn!(node = %choice.destination, "choice leads to an undefined node");
        }
        let encounter = destination.map(|n| n.encounter.clone()).unwrap_or_default();
        let triggers_combat = choice.text.to_lowercase().contains("combat")
            || destination.is_some_and(|n| n.is_combat());

        debug!(node = %self.current_node, triggers_combat, "choice made");
        ChoiceOutcome {
            moved: true,
            triggers_combat,
            encounter,
        }
    }

    /// Follow choice `index` only if `condition` allows it
    pub fn make_choice_with<C: ChoiceCondition>(&mut self, index: usize, condition: &C) -> ChoiceOutcome {
        let allowed = self
            .current_choices()
            .get(index)
            .is_some_and(|choice| condition.is_available(choice, &self.variables));
        if !allowed {
            return ChoiceOutcome::default();
        }
        self.make_choice(index)
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<StoryValue>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn variable(&self, name: &str) -> Option<&StoryValue> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.variable(name).and_then(StoryValue::as_text)
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.variable(name).and_then(StoryValue::as_number)
    }

    pub fn get_flag(&self, name: &str) -> Option<bool> {
        self.variable(name).and_then(StoryValue::as_flag)
    }

    /// Snapshot of the current position
    pub fn progress(&self) -> StoryProgress {
        StoryProgress {
            current_node: self.current_node.clone(),
            variables: self.variables.clone(),
            visited: self.visited.clone(),
        }
    }

    /// Resume from a snapshot. Saved variables override the graph's initial
    /// ones; an empty node id falls back to the start node.
    pub fn restore(&mut self, progress: StoryProgress) {
        self.current_node = if progress.current_node.is_empty() {
            self.graph.start_node().to_string()
        } else {
            progress.current_node
        };

        let mut variables = self.graph.initial_variables().clone();
        variables.extend(progress.variables);
        self.variables = variables;

        let mut visited: Vec<String> = Vec::with_capacity(progress.visited.len());
        for id in progress.visited {
            if !visited.contains(&id) {
                visited.push(id);
            }
        }
        if visited.is_empty() {
            visited.push(self.current_node.clone());
        }
        self.visited = visited;
    }

    pub fn save_progress<S: ProgressStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        store.set(&self.key, &self.progress())?;
        debug!(key = %self.key, node = %self.current_node, "story progress saved");
        Ok(())
    }

    /// Restore from `store`. Returns false when no record exists.
    pub fn load_progress<S: ProgressStore + ?Sized>(&mut self, store: &S) -> Result<bool, StoreError> {
        match store.get(&self.key)? {
            Some(progress) => {
                self.restore(progress);
                info!(node = %self.current_node, "story progress loaded");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Back to the start node and initial variables, clearing the saved record.
    ///
    /// The in-memory reset happens even if the store fails.
    pub fn reset<S: ProgressStore + ?Sized>(&mut self, store: &mut S) -> Result<(), StoreError> {
        self.current_node = self.graph.start_node().to_string();
        self.variables = self.graph.initial_variables().clone();
        self.visited = vec![self.current_node.clone()];
        info!("story reset");
        store.delete(&self.key)
    }
}
