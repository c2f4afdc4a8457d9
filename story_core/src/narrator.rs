//! Templated flavor lines for the narrator and story characters

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Embedded narrator voices
const BUILTIN_NARRATOR: &str = include_str!("../data/narrator.toml");

/// Words replaced by the player's name
const NAME_PLACEHOLDERS: [&str; 2] = ["traveler", "adventurer"];

const FALLBACK_LINE: &str = "I understand.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    DungeonMaster,
    Npc,
    Ally,
}

impl AgentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::DungeonMaster => "dungeon_master",
            AgentRole::Npc => "npc",
            AgentRole::Ally => "ally",
        }
    }
}

/// A voice with its own lines and verbal habits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub role: AgentRole,
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub knowledge: Vec<String>,
    /// One is picked and put in front of every templated line
    #[serde(default)]
    pub prefixes: Vec<String>,
    /// One is picked and appended to every templated line
    #[serde(default)]
    pub suffixes: Vec<String>,
    /// Lines keyed by context
    #[serde(default)]
    pub templates: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Narrator {
    unknown_agent: String,
    #[serde(default)]
    aliases: HashMap<String, String>,
    /// Lines keyed by role id, for contexts an agent has no templates for
    #[serde(default)]
    generic: HashMap<String, Vec<String>>,
    #[serde(default)]
    agents: Vec<Agent>,
}

impl Narrator {
    /// The embedded Aethermoor voices
    pub fn builtin() -> Result<Self, toml::de::Error> {
        Self::from_toml(BUILTIN_NARRATOR)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let narrator: Narrator = toml::from_str(content)?;
        debug!(agents = narrator.agents.len(), "narrator loaded");
        Ok(narrator)
    }

    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_by_role(&self, role: AgentRole) -> Vec<&Agent> {
        self.agents.iter().filter(|a| a.role == role).collect()
    }

    /// Template key for a context: aliases first, else the lowercased context
    pub fn template_key(&self, context: &str) -> String {
        let context = context.to_lowercase();
        self.aliases.get(&context).cloned().unwrap_or(context)
    }

    pub fn respond(&self, agent_id: &str, context: &str, player_name: Option<&str>) -> String {
        self.respond_with_rng(agent_id, context, player_name, &mut rand::thread_rng())
    }

    /// A line from `agent_id` for `context`.
    ///
    /// Templated lines get the player's name and the agent's flourishes.
    /// Contexts without templates get a plain line for the agent's role.
    pub fn respond_with_rng(
        &self,
        agent_id: &str,
        context: &str,
        player_name: Option<&str>,
        rng: &mut impl Rng,
    ) -> String {
        let Some(agent) = self.agent(agent_id) else {
            debug!(agent = agent_id, "unknown narrator agent");
            return self.unknown_agent.clone();
        };

        let key = self.template_key(context);
        let Some(line) = agent.templates.get(&key).and_then(|lines| lines.choose(rng)) else {
            return self.generic_line(agent.role, rng);
        };

        let mut line = match player_name {
            Some(name) if !name.is_empty() => NAME_PLACEHOLDERS
                .iter()
                .fold(line.clone(), |text, word| replace_word(&text, word, name)),
            _ => line.clone(),
        };

        if let Some(prefix) = agent.prefixes.choose(rng).filter(|p| !p.is_empty()) {
            line = format!("{}{}", prefix, lowercase_first(&line));
        }
        if let Some(suffix) = agent.suffixes.choose(rng) {
            line.push_str(suffix);
        }
        line
    }

    fn generic_line(&self, role: AgentRole, rng: &mut impl Rng) -> String {
        self.generic
            .get(role.as_str())
            .and_then(|lines| lines.choose(rng))
            .map_or_else(|| FALLBACK_LINE.to_string(), Clone::clone)
    }
}

/// Replace whole-word, ASCII case-insensitive occurrences of `word`
fn replace_word(text: &str, word: &str, replacement: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let is_word_byte = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let bytes = lower.as_bytes();

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut from = 0;
    while let Some(found) = lower[from..].find(word) {
        let start = from + found;
        let end = start + word.len();
        let bounded_left = start == 0 || !is_word_byte(bytes[start - 1]);
        let bounded_right = end == bytes.len() || !is_word_byte(bytes[end]);
        if bounded_left && bounded_right {
            out.push_str(&text[last..start]);
            out.push_str(replacement);
            last = end;
        }
        from = end;
    }
    out.push_str(&text[last..]);
    out
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn narrator() -> Narrator {
        Narrator::builtin().unwrap()
    }

    #[test]
    fn test_builtin_agents() {
        let n = narrator();
        assert_eq!(n.agents().len(), 3);
        assert_eq!(n.agent("merchant_npc").unwrap().name, "Gareth the Trader");
        assert_eq!(n.agents_by_role(AgentRole::Ally).len(), 1);
    }

    #[test]
    fn test_context_aliases() {
        let n = narrator();
        assert_eq!(n.template_key("Battle_Start"), "combat_start");
        assert_eq!(n.template_key("sell"), "bargaining");
        assert_eq!(n.template_key("Gossip"), "gossip");
    }

    #[test]
    fn test_unknown_agent() {
        let line = narrator().respond("innkeeper", "greeting", None);
        assert_eq!(line, "I'm sorry, I cannot respond right now.");
    }

    #[test]
    fn test_first_choices_with_step_rng() {
        let n = narrator();
        let mut rng = StepRng::new(0, 0);

        let line = n.respond_with_rng("dungeon_master", "win", None, &mut rng);
        assert_eq!(line, "In my experience, skill and grit carry the day. You are victorious!");

        let line = n.respond_with_rng("companion_ally", "heal", None, &mut rng);
        assert_eq!(
            line,
            "Let the light close your wounds and renew your strength. May the light guide us."
        );
    }

    #[test]
    fn test_player_name_substitution() {
        let n = narrator();
        let mut rng = StepRng::new(0, 0);
        let line = n.respond_with_rng("merchant_npc", "hello", Some("Vex"), &mut rng);
        assert_eq!(
            line,
            "Welcome, Vex! I carry goods from every corner of the realm. A good deal for all involved!"
        );
    }

    #[test]
    fn test_unknown_context_uses_role_line() {
        let n = narrator();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..20 {
            let line = n.respond_with_rng("merchant_npc", "weather", Some("Vex"), &mut rng);
            assert!(n.generic["npc"].contains(&line));
        }
    }

    #[test]
    fn test_replace_word_boundaries() {
        assert_eq!(
            replace_word("Adventurer, the adventurers' adventurer!", "adventurer", "Ana"),
            "Ana, the adventurers' Ana!"
        );
        assert_eq!(replace_word("no match here", "traveler", "Ana"), "no match here");
    }

    #[test]
    fn test_lowercase_first() {
        assert_eq!(lowercase_first("Battle"), "battle");
        assert_eq!(lowercase_first(""), "");
    }
}
