use serde::{Deserialize, Serialize};

/// Enemy stat line at its base level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub health: i32,
    pub damage: i32,
    #[serde(default)]
    pub armor: i32,
    #[serde(default = "default_level")]
    pub level: u32,
}

fn default_level() -> u32 {
    1
}
