mod helpers;

use helpers::memory_engine;
use mnema::chunker::normalize_whitespace;

#[test]
fn long_message_is_split_into_bounded_tagged_chunks() {
    let engine = memory_engine();
    let content = "The quarterly report covers revenue, churn, and hiring. ".repeat(40);

    let stored = engine.persist_memory("alice", "s1", "m-long", &content).unwrap();
    assert!(stored.len() > 1, "long message should produce multiple chunks");

    for chunk in &stored {
        assert!(chunk.text_chunk.chars().count() <= 450);
        assert!(!chunk.text_chunk.is_empty());
        assert_eq!(chunk.message_ids, vec!["m-long"]);
        assert_eq!(chunk.embedding.len(), 32, "every stored chunk carries an embedding");
    }

    // Chunks concatenate back to the normalized message
    let rejoined: String = stored.iter().map(|c| c.text_chunk.as_str()).collect();
    assert_eq!(rejoined, normalize_whitespace(&content));
}

#[test]
fn empty_and_whitespace_messages_store_nothing() {
    let engine = memory_engine();
    assert!(engine.persist_memory("alice", "s1", "m1", "").unwrap().is_empty());
    assert!(engine.persist_memory("alice", "s1", "m2", " \n\t ").unwrap().is_empty());

    let results = engine.retrieve_context("alice", "anything", None).unwrap();
    assert!(results.is_empty());
}

#[test]
fn persist_is_deterministic_for_identical_content() {
    let engine = memory_engine();
    let a = engine.persist_memory("alice", "s1", "m1", "same message text").unwrap();
    let b = engine.persist_memory("alice", "s1", "m2", "same message text").unwrap();

    assert_eq!(a.len(), b.len());
    assert_eq!(a[0].text_chunk, b[0].text_chunk);
    assert_eq!(a[0].embedding, b[0].embedding, "fallback embeddings are deterministic");
    assert_ne!(a[0].id, b[0].id, "each persist stores a fresh chunk");
}

#[test]
fn messages_accumulate_across_sessions_for_one_user() {
    let engine = memory_engine();
    engine.persist_memory("alice", "s1", "m1", "first session note").unwrap();
    engine.persist_memory("alice", "s2", "m2", "second session note").unwrap();

    let results = engine.retrieve_context("alice", "session note", None).unwrap();
    assert_eq!(results.len(), 2, "retrieval spans sessions within a user");
}
