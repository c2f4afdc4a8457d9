//! Save slots, backups and resuming a session

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use item_core::{Item, ItemType};
use save_core::*;
use stat_core::{create_character, take_damage, ActionError, CombatAction, CombatEvent, CombatPhase};
use story_core::StoryEngine;
use tables_core::CharacterClass;

fn session(class: CharacterClass) -> GameSession {
    let hero = create_character("Ana", class).unwrap();
    GameSession::new(hero, StoryEngine::builtin().unwrap())
}

fn slot(n: u8) -> SaveSlot {
    SaveSlot::new(n).unwrap()
}

#[test]
fn test_json_dir_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonDirStore::open(dir.path()).unwrap();
    let mut s = session(CharacterClass::Mage);
    s.make_choice(3);
    s.set_flag("saw_treeline", true);

    s.save(&mut store, slot(3)).unwrap();
    assert!(store.slot_path(slot(3)).exists());

    let record = store.load(slot(3)).unwrap().unwrap();
    assert_eq!(record.save_slot, 3);
    assert_eq!(record.version, SAVE_VERSION);
    assert_eq!(record.current_location, "shadowlands_edge");
    assert_eq!(record.character, s.character);
    assert_eq!(record.inventory, s.inventory);
    assert_eq!(record.story, s.story.progress());
    assert_eq!(record.game_flags.get("saw_treeline"), Some(&true));
}

#[test]
fn test_slots_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonDirStore::open(dir.path()).unwrap();
    let mut s = session(CharacterClass::Rogue);

    s.save(&mut store, slot(1)).unwrap();
    s.make_choice(1);
    s.save(&mut store, slot(5)).unwrap();

    let listed: Vec<SaveSummary> = store.list().unwrap().iter().map(SaveRecord::summary).collect();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].slot, 1);
    assert_eq!(listed[0].location, "millbrook");
    assert_eq!(listed[1].slot, 5);
    assert_eq!(listed[1].location, "tavern");

    store.delete(slot(1)).unwrap();
    assert_eq!(store.load(slot(1)).unwrap(), None);
    assert!(store.load(slot(5)).unwrap().is_some());
}

#[test]
fn test_export_import() {
    let s = session(CharacterClass::Cleric);
    let document = export_record(&s.record()).unwrap();
    assert!(document.contains("\n  \"version\": 1"));

    let record = import_record(&document).unwrap();
    assert_eq!(record.character, s.character);
    assert_eq!(record.quests.len(), s.quests.all().len());
}

#[test]
fn test_import_rejects_other_versions() {
    let s = session(CharacterClass::Warrior);
    let mut value = serde_json::to_value(s.record()).unwrap();
    value["version"] = serde_json::json!(99);

    let result = import_record(&value.to_string());
    assert!(matches!(
        result,
        Err(PersistError::VersionMismatch {
            expected: 1,
            found: 99
        })
    ));
}

#[test]
fn test_failed_load_leaves_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::open(dir.path()).unwrap();
    std::fs::write(store.slot_path(slot(2)), "[]").unwrap();

    let mut s = session(CharacterClass::Warrior);
    s.make_choice(2);
    let before = s.record();

    assert!(s.load(&store, slot(2)).is_err());
    assert_eq!(s.location, "marketplace");
    assert_eq!(s.character, before.character);
    assert_eq!(s.story.progress(), before.story);
}

#[test]
fn test_resume_mid_fight() {
    let mut store = MemoryStore::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut s = session(CharacterClass::Warrior);

    s.begin_encounter(&["skeleton"]).unwrap();
    s.take_turn(CombatAction::Defend, &mut rng).unwrap();
    assert!(s.combat.is_some());
    s.save(&mut store, slot(1)).unwrap();

    let mut resumed = session(CharacterClass::Warrior);
    assert!(resumed.load(&store, slot(1)).unwrap());
    assert!(resumed.character.in_combat);
    assert_eq!(resumed.combat, s.combat);

    let mut phase = CombatPhase::PlayerTurn;
    for _ in 0..50 {
        if resumed.combat.is_none() {
            break;
        }
        phase = resumed.take_turn(CombatAction::Attack, &mut rng).unwrap().phase();
    }
    assert!(resumed.combat.is_none());
    assert!(!resumed.character.in_combat);
    if phase == CombatPhase::Victory {
        assert!(resumed.achievements.get("first_blood").unwrap().unlocked);
        assert_eq!(resumed.achievements.get("monster_slayer").unwrap().progress, 1);
    }
}

#[test]
fn test_turn_without_fight() {
    let mut s = session(CharacterClass::Mage);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert!(s.take_turn(CombatAction::Attack, &mut rng).is_err());
    assert!(s.begin_encounter(&["not_a_monster"]).is_err());
}

#[test]
fn test_items_come_from_the_inventory() {
    let mut s = session(CharacterClass::Warrior);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    s.character = take_damage(&s.character, 40);
    s.begin_encounter(&["skeleton"]).unwrap();
    let health = s.character.health;
    let fight = s.combat.clone();

    let elixir = Item::new("elixir_of_gods", "Elixir of the Gods", ItemType::Consumable).with_healing(1000);
    assert!(!s.inventory.has_item("elixir_of_gods", 1));
    let result = s.take_turn(CombatAction::UseItem(elixir), &mut rng);
    assert!(matches!(result, Err(ActionError::ItemNotHeld(ref name)) if name == "Elixir of the Gods"));
    assert_eq!(s.character.health, health);
    assert_eq!(s.combat, fight);

    // The carried potion is used, not the caller's copy
    let potions = s.inventory.get("health_potion").unwrap().quantity();
    let boosted = Item::new("health_potion", "Health Potion", ItemType::Consumable).with_healing(1000);
    let outcome = s.take_turn(CombatAction::UseItem(boosted), &mut rng).unwrap();
    assert!(outcome
        .events
        .iter()
        .any(|e| matches!(e, CombatEvent::ItemUsed { health: 25, .. })));
    assert_eq!(s.inventory.get("health_potion").unwrap().quantity(), potions - 1);
}
