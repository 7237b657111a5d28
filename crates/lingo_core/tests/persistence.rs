use lingo_core::{update, AppState, ChatMessage, Effect, Msg};

fn init_logging() {
    lingo_logging::initialize_for_tests();
}

#[test]
fn restore_does_not_request_persistence() {
    init_logging();
    let restored = vec![ChatMessage::restore(
        "Hello".to_string(),
        Some("en".to_string()),
        String::new(),
        "Hola".to_string(),
        false,
    )];

    let (mut state, effects) = update(AppState::new(), Msg::RestoreMessages(restored.clone()));

    assert!(effects.is_empty());
    assert_eq!(state.messages(), restored.as_slice());
    assert!(state.consume_dirty());
    assert_eq!(
        state.view().messages[0].translation.as_deref(),
        Some("Hola")
    );
}

#[test]
fn every_mutation_persists_full_snapshot() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::InputChanged("Merhaba".to_string()));
    let (state, _) = update(state, Msg::SendClicked);
    let (state, effects) = update(
        state,
        Msg::LanguageDetected {
            text: "Merhaba".to_string(),
            language: Some("tr".to_string()),
        },
    );
    let Effect::PersistMessages(snapshot) = &effects[0] else {
        panic!("expected persist effect, got {effects:?}");
    };
    assert_eq!(snapshot.len(), 1);

    let (state, _) = update(state, Msg::TranslateClicked { index: 0 });
    let action = state.loading().expect("translation in flight").id;
    let (_state, effects) = update(
        state,
        Msg::TranslationFinished {
            action,
            index: 0,
            result: Ok("Hello".to_string()),
        },
    );
    let Effect::PersistMessages(snapshot) = &effects[0] else {
        panic!("expected persist effect, got {effects:?}");
    };
    assert_eq!(snapshot[0].translation(), "Hello");
    assert_eq!(snapshot[0].text(), "Merhaba");
}
