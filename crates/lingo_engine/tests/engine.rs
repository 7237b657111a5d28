mod support;

use std::sync::mpsc::Receiver;
use std::time::Duration;

use lingo_engine::{
    Availability, DownloadProgress, EngineEvent, EngineHandle, Orchestrator, OrchestratorError,
};
use support::{candidate, FakeHost};

fn next_event(events: &Receiver<EngineEvent>) -> EngineEvent {
    events
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

#[test]
fn detect_round_trips_text_and_language() {
    let host = FakeHost {
        candidates: Ok(vec![candidate("tr", 0.9)]),
        ..FakeHost::default()
    };
    let (engine, events) = EngineHandle::spawn(Orchestrator::new(host.capabilities())).unwrap();

    engine.detect("Merhaba");

    assert_eq!(
        next_event(&events),
        EngineEvent::LanguageDetected {
            text: "Merhaba".to_string(),
            language: Some("tr".to_string()),
        }
    );
}

#[test]
fn summarize_reports_progress_before_result() {
    let host = FakeHost {
        availability: Ok(Availability::AfterDownload),
        download_events: vec![DownloadProgress { loaded: 3, total: 4 }],
        ..FakeHost::default()
    };
    let (engine, events) = EngineHandle::spawn(Orchestrator::new(host.capabilities())).unwrap();

    engine.summarize(7, 2, "long text");

    assert_eq!(
        next_event(&events),
        EngineEvent::DownloadProgress {
            action: 7,
            index: 2,
            progress: DownloadProgress { loaded: 3, total: 4 },
        }
    );
    assert_eq!(
        next_event(&events),
        EngineEvent::SummaryFinished {
            action: 7,
            index: 2,
            result: Ok("A short summary.".to_string()),
        }
    );
}

#[test]
fn translate_reports_failures_as_events() {
    let host = FakeHost::default();
    let (engine, events) = EngineHandle::spawn(Orchestrator::new(host.capabilities())).unwrap();

    engine.translate(1, 0, "Bonjour", "", "es");

    assert_eq!(
        next_event(&events),
        EngineEvent::TranslationFinished {
            action: 1,
            index: 0,
            result: Err(OrchestratorError::MissingLanguage),
        }
    );
    assert!(host.calls().is_empty());
}

#[test]
fn translate_success_carries_action_and_index() {
    let host = FakeHost::default();
    let (engine, events) = EngineHandle::spawn(Orchestrator::new(host.capabilities())).unwrap();

    engine.translate(9, 5, "Bonjour le monde", "fr", "es");

    assert_eq!(
        next_event(&events),
        EngineEvent::TranslationFinished {
            action: 9,
            index: 5,
            result: Ok("Hola mundo".to_string()),
        }
    );
}
