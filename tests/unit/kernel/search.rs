use super::*;
use crate::kernel::services::adapters::MemoryDocument;
use crate::kernel::services::ports::SearchError;

fn doc(paragraphs: &[&str]) -> MemoryDocument {
    MemoryDocument::from_paragraphs(paragraphs)
}

#[test]
fn test_empty_pattern_yields_empty_set() {
    let d = doc(&["hello"]);
    let set = search(&d, &SearchOptions::new("")).unwrap();
    assert!(set.is_empty());
    assert_eq!(set.cursor(), None);
}

#[test]
fn test_matches_in_document_order() {
    let d = doc(&["cat dog cat", "no match here", "Cat"]);
    let ids = d.leaf_ids().to_vec();
    let set = search(&d, &SearchOptions::new("cat")).unwrap();

    let found: Vec<_> = set.matches().iter().map(|m| (m.leaf, m.offset, m.len)).collect();
    assert_eq!(
        found,
        vec![(ids[0], 0, 3), (ids[0], 8, 3), (ids[2], 0, 3)]
    );
    assert_eq!(set.cursor(), Some(0));
}

#[test]
fn test_matches_do_not_overlap() {
    let d = doc(&["aaaa", "aaa"]);
    let set = search(&d, &SearchOptions::new("aa").case_sensitive(true)).unwrap();

    assert_eq!(set.len(), 3);
    for pair in set.matches().windows(2) {
        if pair[0].leaf == pair[1].leaf {
            assert!(pair[0].end() <= pair[1].offset);
        }
    }
}

#[test]
fn test_case_sensitive() {
    let d = doc(&["Hello HELLO hello"]);
    let insensitive = search(&d, &SearchOptions::new("hello")).unwrap();
    let sensitive = search(&d, &SearchOptions::new("hello").case_sensitive(true)).unwrap();

    assert_eq!(insensitive.len(), 3);
    assert_eq!(sensitive.len(), 1);
    assert_eq!(sensitive.matches()[0].offset, 12);
}

#[test]
fn test_whole_word() {
    let d = doc(&["cat catalog concat cat."]);
    let partial = search(&d, &SearchOptions::new("cat")).unwrap();
    let whole = search(&d, &SearchOptions::new("cat").whole_word(true)).unwrap();

    assert_eq!(partial.len(), 4);
    let offsets: Vec<_> = whole.matches().iter().map(|m| m.offset).collect();
    assert_eq!(offsets, vec![0, 19]);
}

#[test]
fn test_whole_word_wraps_alternation() {
    let d = doc(&["cats dog catdog"]);
    let set = search(&d, &SearchOptions::new("cat|dog").whole_word(true)).unwrap();
    let offsets: Vec<_> = set.matches().iter().map(|m| m.offset).collect();
    assert_eq!(offsets, vec![5]);
}

#[test]
fn test_invalid_pattern_is_reported() {
    let d = doc(&["text"]);
    let err = search(&d, &SearchOptions::new("(unclosed")).unwrap_err();
    assert!(matches!(err, SearchError::Pattern(_)));
    assert!(err.to_string().starts_with("Invalid pattern"));
}

#[test]
fn test_zero_length_matches_skipped() {
    let d = doc(&["bab"]);
    let set = search(&d, &SearchOptions::new("a*").case_sensitive(true)).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.matches()[0].offset, 1);
    assert_eq!(set.matches()[0].len, 1);
}

#[test]
fn test_multibyte_offsets_are_bytes() {
    let d = doc(&["héllo wörld wörld"]);
    let set = search(&d, &SearchOptions::new("wörld")).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.matches()[0].offset, "héllo ".len());
    assert_eq!(set.matches()[0].len, "wörld".len());
}

#[test]
fn test_search_is_idempotent() {
    let d = doc(&["one two one", "two one"]);
    let options = SearchOptions::new("one");
    let a = search(&d, &options).unwrap();
    let b = search(&d, &options).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_compile_reuse() {
    let d = doc(&["x1 x2", "x3"]);
    let config = SearchConfig::compile(&SearchOptions::new(r"x\d"))
        .unwrap()
        .unwrap();
    assert_eq!(search_with(&d, &config).len(), 3);
    assert_eq!(config.find_ranges("x9 y").collect::<Vec<_>>(), vec![0..2]);
}
