//! Hit damage

mod calculation;

pub use calculation::{calculate_damage, calculate_damage_with_rng, mitigation};
