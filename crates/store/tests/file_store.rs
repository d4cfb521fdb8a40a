//! FileCharacterStore persistence round trips.

use sheet_core::{
    Ability, AccountId, CharacterId, CharacterPatch, CharacterRecord, HitPoints, Overridable,
    ResetPolicy, ResourcePool, SkillEntry, SkillKey,
};
use sheet_store::{CharacterStore, FileCharacterStore, StoreError};
use tempfile::TempDir;

fn sample(id: u64) -> CharacterRecord {
    let mut record = CharacterRecord::new(CharacterId(id), AccountId(7), format!("pc-{id}"));
    record.level = 3;
    record.abilities.set(Ability::Wisdom, 15);
    record.skills.set(SkillKey::Insight, SkillEntry::proficient());
    record.initiative = Overridable::manual(5);
    record.spellcasting_ability = Some(Ability::Wisdom);
    record.hit_points = HitPoints {
        pool: ResourcePool::new(9, 21, ResetPolicy::LongRest),
        temp: 3,
    };
    record.spell_slots.set_max(1, 4);
    record
}

#[test]
fn test_save_and_reload_record() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileCharacterStore::new(dir.path()).expect("store");

    let record = sample(1);
    store.save(&record).expect("save");
    assert!(dir.path().join("character_1.json").exists());

    // A second store on the same directory sees the same data.
    let reopened = FileCharacterStore::new(dir.path()).expect("store");
    let loaded = reopened.load(CharacterId(1)).expect("load").expect("present");
    assert_eq!(loaded, record.normalized());
    assert_eq!(loaded.initiative, Overridable::manual(5));
    assert_eq!(loaded.hit_points.pool.current(), 9);
}

#[test]
fn test_files_use_client_field_names() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileCharacterStore::new(dir.path()).expect("store");
    store.save(&sample(2)).expect("save");

    let text = std::fs::read_to_string(dir.path().join("character_2.json")).expect("read");
    assert!(text.contains("\"characterClass\""));
    assert!(text.contains("\"spellSlots\""));
    assert!(text.contains("\"hitPoints\""));
}

#[test]
fn test_partial_update_persists() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileCharacterStore::new(dir.path()).expect("store");
    store.save(&sample(4)).expect("save");

    let patch = CharacterPatch {
        name: Some("Renamed".into()),
        ..CharacterPatch::default()
    };
    let updated = store
        .apply_partial_update(CharacterId(4), &patch)
        .expect("update");
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.level, 3);

    let loaded = store.load(CharacterId(4)).expect("load").expect("present");
    assert_eq!(loaded, updated);

    let err = store
        .apply_partial_update(CharacterId(5), &patch)
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn test_list_insert_and_delete() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileCharacterStore::new(dir.path().join("nested")).expect("store");

    assert!(store.list().expect("list").is_empty());
    assert_eq!(store.next_id().expect("next id"), CharacterId(1));

    store.insert(&sample(10)).expect("insert");
    store.insert(&sample(2)).expect("insert");
    let err = store.insert(&sample(2)).unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists { .. }));

    let ids: Vec<u64> = store
        .list()
        .expect("list")
        .iter()
        .map(|record| record.id.0)
        .collect();
    assert_eq!(ids, vec![2, 10]);
    assert_eq!(store.next_id().expect("next id"), CharacterId(11));

    assert!(store.delete(CharacterId(10)).expect("delete"));
    assert!(!store.delete(CharacterId(10)).expect("delete"));
    assert!(!store.exists(CharacterId(10)).expect("exists"));
}

#[test]
fn test_concurrent_updates_are_serialized() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileCharacterStore::new(dir.path()).expect("store");
    store.save(&sample(6)).expect("save");

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..10 {
                    store
                        .update(CharacterId(6), |record| {
                            record.experience += 1;
                            Ok(())
                        })
                        .expect("update");
                }
            });
        }
    });

    let loaded = store.load(CharacterId(6)).expect("load").expect("present");
    assert_eq!(loaded.experience, 40);

    let err = store
        .update(CharacterId(6), |record| {
            record.name = "discarded".into();
            Err::<(), _>(StoreError::NotFound { id: record.id })
        })
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    let loaded = store.load(CharacterId(6)).expect("load").expect("present");
    assert_eq!(loaded.name, "pc-6");
}

#[test]
fn test_corrupt_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileCharacterStore::new(dir.path()).expect("store");
    std::fs::write(dir.path().join("character_3.json"), "not json").expect("write");

    let err = store.load(CharacterId(3)).unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}
