//! Playthroughs of the built-in story

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use story_core::*;

#[test]
fn test_random_walks_stay_on_defined_nodes() {
    let graph = StoryGraph::builtin().unwrap();
    for seed in 0..25 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut story = StoryEngine::new(graph.clone());

        for _ in 0..60 {
            assert!(story.current_node().is_some(), "walk {} left the graph", seed);
            assert_ne!(story.current_text(), MISSING_NODE_TEXT);
            let indices: Vec<usize> = (0..story.current_choices().len()).collect();
            let Some(&index) = indices.choose(&mut rng) else {
                break;
            };
            assert!(story.make_choice(index).moved);
        }
    }
}

#[test]
fn test_main_path_to_hero_ending() {
    let mut story = StoryEngine::builtin().unwrap();
    let mut fights = Vec::new();

    for destination in [
        "guard_conversation",
        "accept_quest",
        "enter_shadowlands",
        "forest_path",
        "forest_depths",
        "world_tree_grove",
        "final_confrontation",
        "final_battle",
        "hero_ending",
    ] {
        let index = story
            .current_choices()
            .iter()
            .position(|c| c.destination == destination)
            .unwrap_or_else(|| panic!("no choice leads to {}", destination));
        let outcome = story.make_choice(index);
        if !outcome.encounter.is_empty() {
            fights.push(outcome.encounter);
        }
    }

    assert_eq!(story.tags(), &["ending:hero".to_string()]);
    assert!(story.current_text().contains("THE END"));
    assert_eq!(fights.len(), 3);
    assert_eq!(fights[2], vec!["malachar".to_string()]);
}

#[test]
fn test_restore_reproduces_view() {
    let mut store = MemoryProgressStore::new();
    let mut story = StoryEngine::builtin().unwrap().with_key("slot_a");
    story.make_choice(2);
    story.make_choice(1);
    story.set_variable("player_name", "Ana");
    story.save_progress(&mut store).unwrap();

    let mut resumed = StoryEngine::builtin().unwrap().with_key("slot_a");
    assert!(resumed.load_progress(&store).unwrap());
    assert_eq!(resumed.current_node_id(), "merchant_info");
    assert_eq!(resumed.current_text(), story.current_text());
    assert_eq!(resumed.current_choices(), story.current_choices());
    assert_eq!(resumed.visited(), story.visited());
    assert_eq!(resumed.get_text("player_name"), Some("Ana"));
}

#[test]
fn test_narrator_greets_by_name() {
    let narrator = Narrator::builtin().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..10 {
        let line = narrator.respond_with_rng("merchant_npc", "greeting", Some("Ana"), &mut rng);
        assert!(!line.to_lowercase().contains("traveler"));
        assert!(!line.contains("adventurer!"));
    }
}
