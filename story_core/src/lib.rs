//! story_core - Branching dialogue for Aethermoor
//!
//! - `StoryGraph`: nodes, choices and tags loaded from TOML
//! - `StoryEngine`: walks the graph, holds typed variables, saves progress
//! - `ChoiceCondition`: decides which choices are offered
//! - `Narrator`: templated flavor lines from the game's voices
//!
//! ```rust,no_run
//! use story_core::{MemoryProgressStore, StoryEngine};
//!
//! let mut story = StoryEngine::builtin().unwrap();
//! let mut store = MemoryProgressStore::new();
//!
//! println!("{}", story.current_text());
//! for (i, choice) in story.current_choices().iter().enumerate() {
//!     println!("{}. {}", i + 1, choice.text);
//! }
//! let outcome = story.make_choice(1);
//! if outcome.triggers_combat {
//!     println!("fight: {:?}", outcome.encounter);
//! }
//! story.save_progress(&mut store).unwrap();
//! ```

pub mod condition;
pub mod engine;
pub mod graph;
pub mod narrator;
pub mod store;
pub mod variables;

pub use condition::{AlwaysAvailable, ChoiceCondition, VariableConditions};
pub use engine::{ChoiceOutcome, StoryEngine, DEFAULT_PROGRESS_KEY, MISSING_NODE_TEXT};
pub use graph::{GraphError, StoryChoice, StoryGraph, StoryNode};
pub use narrator::{Agent, AgentRole, Narrator};
pub use store::{MemoryProgressStore, ProgressStore, StoreError, StoryProgress};
pub use variables::{StoryValue, Variables};
