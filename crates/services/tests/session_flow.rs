use std::sync::Arc;

use services::{SessionConfig, SessionError, Trainer};
use storage::name::GlossaryName;
use storage::repository::{HistoryRepository, InMemoryStore};
use vocab_core::model::WordDraft;
use vocab_core::ordering::OrderingPolicy;
use vocab_core::time::fixed_clock;

fn draft(term: &str, translation: &str, section: &str, subsection: &str) -> WordDraft {
    WordDraft::new(term, translation, section, subsection).unwrap()
}

/// Two sections; "Casa" has subsections "Cucina" and "Bagno" with two words
/// each. Deliberately inserted out of order.
fn seeded_store() -> (InMemoryStore, GlossaryName) {
    let store = InMemoryStore::new();
    let name = GlossaryName::new("prova").unwrap();
    store
        .insert_glossary(
            &name,
            vec![
                draft("pane", "bread", "Cibo", "Forno"),
                draft("pentola", "pot", "Casa", "Cucina"),
                draft("specchio", "mirror", "Casa", "Bagno"),
                draft("forchetta", "fork", "Casa", "Cucina"),
                draft("letto", "bed", "Casa", "Bagno"),
                draft("vino", "wine", "Cibo", "Cantina"),
            ],
        )
        .unwrap();
    (store, name)
}

#[test]
fn alphabetic_walk_covers_casa_before_cibo() {
    let (store, name) = seeded_store();
    let trainer = Trainer::new(
        fixed_clock(),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    );
    let config = SessionConfig::new(name, OrderingPolicy::Alphabetic, true);

    let mut session = trainer.start_session(&config).unwrap();
    assert_eq!(session.len(), 6);

    // Sorted walk starts in Casa/Bagno.
    let start = session.cursor().unwrap();
    assert_eq!(start.section, "Casa");
    assert_eq!(start.subsection, "Bagno");

    let mut visited = vec![session.current_front().unwrap().to_string()];
    for _ in 0..3 {
        session.reveal().unwrap();
        let state = session.feedback(false).unwrap();
        assert_eq!(state.section, "Casa");
        visited.push(session.current_front().unwrap().to_string());
    }

    // Four advances visited every Casa word exactly once, none from Cibo.
    visited.sort();
    assert_eq!(visited, ["forchetta", "letto", "pentola", "specchio"]);

    // The fourth feedback moves into Cibo.
    session.reveal().unwrap();
    let state = session.feedback(false).unwrap();
    assert_eq!(state.section, "Cibo");

    // Each Casa word got exactly one correct answer.
    for entry in session
        .glossary()
        .entries()
        .iter()
        .filter(|e| e.term() != "pane" && e.term() != "vino")
    {
        assert_eq!(entry.stats().ok(), 1, "term {}", entry.term());
        assert_eq!(entry.stats().not_ok(), 0);
    }
}

#[test]
fn full_run_persists_and_merges_back() {
    let (store, name) = seeded_store();
    let trainer = Trainer::new(
        fixed_clock(),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    );
    let config = SessionConfig::new(name.clone(), OrderingPolicy::Alphabetic, true);

    let mut session = trainer.start_session(&config).unwrap();
    // Miss the first word, get the second right, then stop.
    session.reveal().unwrap();
    session.feedback(true).unwrap();
    session.reveal().unwrap();
    session.feedback(false).unwrap();

    let saved = trainer.finish_session(&config, session).unwrap();
    assert_eq!(saved, 2);

    // A fresh session over the same store sees the merged history.
    let session = trainer.start_session(&config).unwrap();
    let letto = session
        .glossary()
        .entries()
        .iter()
        .find(|e| e.term() == "letto")
        .unwrap();
    assert_eq!(letto.stats().not_ok(), 1);
    let specchio = session
        .glossary()
        .entries()
        .iter()
        .find(|e| e.term() == "specchio")
        .unwrap();
    assert_eq!(specchio.stats().ok(), 1);

    let untouched: Vec<_> = session
        .glossary()
        .entries()
        .iter()
        .filter(|e| !e.attempted())
        .collect();
    assert_eq!(untouched.len(), 4);
}

#[test]
fn net_errors_session_surfaces_missed_words_first() {
    let (store, name) = seeded_store();
    let trainer = Trainer::new(
        fixed_clock(),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    );

    // First run: miss "letto" three times worth of history by replaying it.
    let alphabetic = SessionConfig::new(name.clone(), OrderingPolicy::Alphabetic, true);
    let mut session = trainer.start_session(&alphabetic).unwrap();
    session.reveal().unwrap();
    session.feedback(true).unwrap();
    trainer.finish_session(&alphabetic, session).unwrap();

    // Second run ordered by net errors starts at the missed word.
    let net_errors = SessionConfig::new(name, OrderingPolicy::NetErrors, true);
    let session = trainer.start_session(&net_errors).unwrap();
    assert_eq!(session.current_front(), Some("letto"));
}

#[test]
fn exhausted_session_still_saves_every_feedback() {
    let (store, name) = seeded_store();
    let trainer = Trainer::new(
        fixed_clock(),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    );
    let config = SessionConfig::new(name.clone(), OrderingPolicy::Alphabetic, true);

    let mut session = trainer.start_session(&config).unwrap();
    for ix in 0..6 {
        session.reveal().unwrap();
        match session.feedback(ix % 2 == 0) {
            Ok(_) => assert!(ix < 5),
            Err(err) => {
                assert_eq!(err, SessionError::ExhaustedDeck);
                assert_eq!(ix, 5);
            }
        }
    }
    assert!(session.is_exhausted());

    trainer.finish_session(&config, session).unwrap();
    let rows = store.load_history(&name).unwrap().unwrap();
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|r| r.ok + r.not_ok == 1));
}
