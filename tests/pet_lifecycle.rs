//! End-to-end behaviour of the pet model through the public API.

use rstest::rstest;

use memory_pet::dispatch::Tone;
use memory_pet::pet::apply_decay;
use memory_pet::{Command, InteractionDispatcher, Meter, Outcome, PetState, Trick};

fn meters(pet: &PetState) -> [f64; 6] {
    [
        pet.mood.happiness.value(),
        pet.mood.hunger.value(),
        pet.mood.health.value(),
        pet.memory.bond_level.value(),
        pet.memory.name_clarity.value(),
        pet.integrity.file_corruption().value(),
    ]
}

// ==================== Decay ====================

#[rstest]
#[case(0.0, "Sam")]
#[case(5.0, "Sam")]
#[case(6.0, "?a?")]
#[case(12.0, "stranger")]
#[case(18.0, "???")]
#[case(1_000.0, "???")]
fn test_name_fades_with_hours(#[case] hours: f64, #[case] expected: &str) {
    let mut pet = PetState::new("Sam", "Buddy");
    apply_decay(&mut pet, hours);
    assert_eq!(pet.display_name(), expected);
}

#[test]
fn test_long_absence_then_recovery() {
    let mut pet = PetState::new("Alexandra", "Buddy");
    apply_decay(&mut pet, 72.0);

    assert!(pet.memory.name_clarity.is_empty());
    assert!(pet.memory.bond_level.is_empty());
    assert!(pet.integrity.file_corruption().is_full());
    assert_eq!(pet.display_name(), "???");

    let dispatcher = InteractionDispatcher::default();
    for _ in 0..12 {
        dispatcher.dispatch(&mut pet, Command::Play);
    }
    // 12 plays at +3 clarity each.
    assert_eq!(pet.memory.name_clarity.value(), 36.0);
    assert_eq!(pet.display_name(), "stranger");

    for _ in 0..2 {
        dispatcher.dispatch(&mut pet, Command::Play);
    }
    assert_eq!(pet.display_name(), "?l?x?n?r?");

    // Interaction never repairs files.
    assert!(pet.integrity.file_corruption().is_full());
    dispatcher.dispatch(&mut pet, Command::Repair);
    assert!(pet.integrity.file_corruption().is_empty());
}

#[test]
fn test_every_command_keeps_meters_in_range() {
    let dispatcher = InteractionDispatcher::default();
    let mut pet = PetState::new("Sam", "Buddy");

    for round in 0..50 {
        for command in [
            Command::Feed,
            Command::Play,
            Command::Dance,
            Command::Sit,
            Command::Sing,
            Command::Status,
            Command::Decay,
        ] {
            dispatcher.dispatch(&mut pet, command);
            for value in meters(&pet) {
                assert!(
                    (Meter::MIN..=Meter::MAX).contains(&value),
                    "round {round}, {command}: {value}"
                );
            }
        }
    }
}

// ==================== Tricks ====================

#[test]
fn test_tricks_are_learned_once() {
    let dispatcher = InteractionDispatcher::default();
    let mut pet = PetState::new("Sam", "Buddy");

    let first = dispatcher.dispatch_text(&mut pet, "Sing");
    let second = dispatcher.dispatch_text(&mut pet, "  sing ");

    let sing = |learned| Outcome::Trick {
        trick: Trick::Sing,
        learned,
    };
    assert_eq!(first, sing(true));
    assert_eq!(second, sing(false));
    assert_eq!(first.tone(), Tone::Info);
    assert_eq!(second.tone(), Tone::Success);
    assert_eq!(pet.memory.tricks(), &[Trick::Sing]);
    assert_eq!(pet.memory.interaction_count(), 2);
}

#[test]
fn test_status_reports_without_side_effects() {
    let dispatcher = InteractionDispatcher::default();
    let mut pet = PetState::new("Sam", "Buddy");
    dispatcher.dispatch(&mut pet, Command::Sit);
    dispatcher.dispatch(&mut pet, Command::Dance);

    let before = pet.clone();
    let outcome = dispatcher.dispatch(&mut pet, Command::Status);
    assert_eq!(pet, before);
    assert_eq!(
        outcome.message(pet.pet_name()),
        "📊 Interactions: 2 | Tricks known: sit, dance"
    );
}

#[test]
fn test_unknown_text_is_harmless() {
    let dispatcher = InteractionDispatcher::default();
    let mut pet = PetState::new("Sam", "Buddy");
    let before = pet.clone();

    let outcome = dispatcher.dispatch_text(&mut pet, "roll over");
    assert_eq!(
        outcome,
        Outcome::Unrecognized {
            input: "roll over".to_string()
        }
    );
    assert!(!outcome.ends_session());
    assert_eq!(pet, before);
}

#[test]
fn test_pet_state_serializes() {
    let mut pet = PetState::new("Sam", "Buddy");
    InteractionDispatcher::default().dispatch(&mut pet, Command::Dance);

    let json = serde_json::to_string(&pet).unwrap();
    let back: PetState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, pet);
}
