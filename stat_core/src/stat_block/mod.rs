//! Effective stats from base stats, equipment and active effects

mod aggregator;
mod equipment;

pub use aggregator::{attack_power, total_armor, total_stats};
pub use equipment::{equip_item, unequip_item};
