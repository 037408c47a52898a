use super::*;
use crate::kernel::services::ports::{TAG_HISTORY_MERGE, TAG_LOADED_CONTENT};

#[test]
fn from_paragraphs_has_no_updates() {
    let mut doc = MemoryDocument::from_paragraphs(&["a", "b"]);
    assert_eq!(doc.paragraphs(), vec!["a", "b"]);
    assert!(doc.take_updates().is_empty());
}

#[test]
fn traverse_leaves_in_order() {
    let doc = MemoryDocument::from_paragraphs(&["one", "two", "three"]);
    let leaves = doc.traverse_leaves();
    let texts: Vec<_> = leaves.iter().map(|l| l.text).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
    assert_eq!(leaves[1].id, doc.leaf_ids()[1]);
}

#[test]
fn edit_outside_transaction_commits_once() {
    let mut doc = MemoryDocument::from_paragraphs(&["a"]);
    let leaf = doc.leaf_ids()[0];
    doc.edit(leaf, "b").unwrap();

    let updates = doc.take_updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].changed_leaf_count, 1);
    assert!(!updates[0].previous_state_was_empty);
    assert!(updates[0].tags.is_empty());
}

#[test]
fn nested_mutations_merge_tags() {
    let mut doc = MemoryDocument::from_paragraphs(&["a", "b"]);
    let ids = doc.leaf_ids().to_vec();

    doc.mutate(UpdateTags::history_merge(), |doc| {
        doc.set_text(ids[0], "x".to_string()).unwrap();
        doc.mutate(UpdateTags::loaded_content(), |doc| {
            doc.set_text(ids[1], "y".to_string()).unwrap();
        });
    });

    let updates = doc.take_updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].changed_leaf_count, 2);
    assert!(updates[0].tags.contains(TAG_HISTORY_MERGE));
    assert!(updates[0].tags.contains(TAG_LOADED_CONTENT));
}

#[test]
fn unchanged_text_is_not_a_change() {
    let mut doc = MemoryDocument::from_paragraphs(&["same"]);
    let leaf = doc.leaf_ids()[0];
    doc.edit(leaf, "same").unwrap();

    let updates = doc.take_updates();
    assert_eq!(updates.len(), 1);
    assert!(!updates[0].has_changes());
}

#[test]
fn push_leaf_into_empty_document() {
    let mut doc = MemoryDocument::new();
    doc.push_leaf("first");
    doc.push_leaf("second");

    let updates = doc.take_updates();
    assert!(updates[0].previous_state_was_empty);
    assert!(!updates[1].previous_state_was_empty);
    assert_eq!(updates[1].changed_element_count, 1);
}

#[test]
fn remove_leaf_clears_selection() {
    let mut doc = MemoryDocument::from_paragraphs(&["a", "b"]);
    let leaf = doc.leaf_ids()[0];
    doc.select_range(leaf, 0, 1).unwrap();

    assert_eq!(doc.remove_leaf(leaf).unwrap(), "a");
    assert_eq!(doc.selection(), None);
    assert_eq!(doc.paragraphs(), vec!["b"]);
    assert_eq!(doc.remove_leaf(leaf), Err(DocumentError::UnknownLeaf(leaf)));
    assert_eq!(doc.text(leaf), None);
}

#[test]
fn select_range_validates_bounds() {
    let mut doc = MemoryDocument::from_paragraphs(&["héllo"]);
    let leaf = doc.leaf_ids()[0];

    assert!(doc.select_range(leaf, 0, 3).is_ok());
    assert!(matches!(
        doc.select_range(leaf, 0, 2),
        Err(DocumentError::InvalidRange { .. })
    ));
    assert!(doc.select_range(leaf, 4, 2).is_err());
    assert!(doc.select_range(leaf, 0, 99).is_err());
    assert_eq!(
        doc.selection(),
        Some(Selection {
            leaf,
            start: 0,
            end: 3
        })
    );
}

#[test]
fn scroll_requires_selection() {
    let mut doc = MemoryDocument::from_paragraphs(&["text"]);
    let leaf = doc.leaf_ids()[0];
    assert!(doc.scroll_into_selection().is_err());

    doc.place_caret(leaf).unwrap();
    assert!(doc.selection().unwrap().is_caret());
    assert_eq!(doc.selection().unwrap().start, 4);
    doc.scroll_into_selection().unwrap();
    assert_eq!(doc.scrolled_to(), Some(leaf));
}

#[test]
fn shrinking_text_drops_out_of_range_selection() {
    let mut doc = MemoryDocument::from_paragraphs(&["long text"]);
    let leaf = doc.leaf_ids()[0];
    doc.select_range(leaf, 5, 9).unwrap();
    doc.edit(leaf, "short").unwrap();
    assert_eq!(doc.selection(), None);
}

#[test]
fn state_round_trip() {
    let doc = MemoryDocument::from_paragraphs(&["alpha", "", "gamma \"quoted\""]);
    let payload = doc.serialize_state();

    let mut restored = MemoryDocument::from_paragraphs(&["old"]);
    restored.install_state(&payload).unwrap();
    assert_eq!(restored.paragraphs(), doc.paragraphs());

    let updates = restored.take_updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].changed_leaf_count, 3);
}

#[test]
fn install_state_rejects_bad_payloads() {
    let mut doc = MemoryDocument::from_paragraphs(&["keep"]);

    assert!(matches!(
        doc.install_state("garbage"),
        Err(DocumentError::InvalidState(_))
    ));
    assert!(matches!(
        doc.install_state(r#"{"version":99,"leaves":[]}"#),
        Err(DocumentError::InvalidState(_))
    ));
    assert_eq!(doc.paragraphs(), vec!["keep"]);
    assert!(doc.take_updates().is_empty());
}
