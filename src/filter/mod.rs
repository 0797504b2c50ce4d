//! Client-side note filtering and tag helpers.
//!
//! Everything here is pure so views can recompute it inside memos.

use crate::api::ApiResult;
use crate::models::Note;
use std::collections::BTreeSet;

/// A search term filters as soon as it holds any character, spaces included.
pub(crate) fn search_is_active(search: &str) -> bool {
    !search.is_empty()
}

/// Notes matching `search` (title or content, case-insensitive) and carrying
/// every tag in `selected`. Source order is preserved.
///
/// The term is matched as typed, surrounding whitespace included.
pub(crate) fn filter_notes(notes: &[Note], search: &str, selected: &BTreeSet<String>) -> Vec<Note> {
    let needle = search.to_lowercase();

    notes
        .iter()
        .filter(|n| {
            !search_is_active(&needle)
                || n.title.to_lowercase().contains(&needle)
                || n.content.to_lowercase().contains(&needle)
        })
        .filter(|n| selected.iter().all(|tag| n.tags.iter().any(|t| t == tag)))
        .cloned()
        .collect()
}

/// Distinct tags across all notes, in first-seen order.
pub(crate) fn collect_tags(notes: &[Note]) -> Vec<String> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut out: Vec<String> = Vec::new();
    for tag in notes.iter().flat_map(|n| n.tags.iter()) {
        if seen.insert(tag.as_str()) {
            out.push(tag.clone());
        }
    }
    out
}

/// Add `tag` to the selection if absent, remove it otherwise.
pub(crate) fn toggle_tag(selected: &mut BTreeSet<String>, tag: &str) {
    if !selected.remove(tag) {
        selected.insert(tag.to_string());
    }
}

/// Drop selected tags no longer present in `available`. Returns true if anything changed.
pub(crate) fn retain_known_tags(selected: &mut BTreeSet<String>, available: &[String]) -> bool {
    let before = selected.len();
    selected.retain(|t| available.iter().any(|a| a == t));
    selected.len() != before
}

/// Split the comma-separated tag field of the note form.
///
/// Tokens are trimmed and empty ones dropped. Duplicates are kept; the
/// backend owns any normalization.
pub(crate) fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Remove the note with identifier `id`. Returns false if no note matched.
pub(crate) fn remove_note(notes: &mut Vec<Note>, id: &str) -> bool {
    match notes.iter().position(|n| n.id == id) {
        Some(idx) => {
            notes.remove(idx);
            true
        }
        None => false,
    }
}

/// Fold the outcome of a delete request into the list view state.
///
/// On success the note is removed and selected tags that no longer occur
/// in any note are dropped. On failure nothing is touched and the error is
/// handed back.
pub(crate) fn apply_delete_result(
    notes: &mut Vec<Note>,
    selected: &mut BTreeSet<String>,
    id: &str,
    result: ApiResult<()>,
) -> ApiResult<()> {
    result?;
    remove_note(notes, id);
    retain_known_tags(selected, &collect_tags(notes));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn note(id: &str, title: &str, content: &str, tags: &[&str]) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            updated_at: "2024-01-01T00:00:00".to_string(),
            created_at: None,
            version: None,
        }
    }

    fn set(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn ids(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.id.as_str()).collect()
    }

    fn sample() -> Vec<Note> {
        vec![
            note("1", "Shopping list", "Milk and eggs", &["home"]),
            note("2", "Rust notes", "Borrow checker tips", &["work", "rust"]),
            note("3", "Weekend", "Buy MILK for pancakes", &["home", "food"]),
            note("4", "Meeting", "Sprint planning", &["work"]),
        ]
    }

    #[test]
    fn test_no_filters_returns_everything_in_order() {
        let notes = sample();
        let out = filter_notes(&notes, "", &BTreeSet::new());
        assert_eq!(out, notes);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_content() {
        let notes = sample();
        let out = filter_notes(&notes, "milk", &BTreeSet::new());
        assert_eq!(ids(&out), vec!["1", "3"]);

        let out = filter_notes(&notes, "RUST", &BTreeSet::new());
        assert_eq!(ids(&out), vec!["2"]);
    }

    #[test]
    fn test_search_results_are_subset_containing_term() {
        let notes = sample();
        for term in ["e", "Pl", "tips", "zzz", "  milk  ", " b", "   "] {
            let out = filter_notes(&notes, term, &BTreeSet::new());
            let needle = term.to_lowercase();
            for n in &out {
                assert!(notes.contains(n));
                assert!(
                    n.title.to_lowercase().contains(&needle)
                        || n.content.to_lowercase().contains(&needle)
                );
            }
        }
    }

    #[test]
    fn test_search_whitespace_is_part_of_the_term() {
        let notes = vec![note("1", "ab", "", &[]), note("2", "a b", "", &[])];
        assert_eq!(ids(&filter_notes(&notes, " b", &BTreeSet::new())), vec!["2"]);
        assert_eq!(ids(&filter_notes(&notes, " ", &BTreeSet::new())), vec!["2"]);
        assert!(filter_notes(&notes, "   ", &BTreeSet::new()).is_empty());

        assert!(search_is_active(" "));
        assert!(!search_is_active(""));
    }

    #[test]
    fn test_tag_selection_uses_and_semantics() {
        let notes = vec![
            note("a", "A", "", &["a"]),
            note("b", "B", "", &["b"]),
            note("ab", "AB", "", &["a", "b"]),
        ];
        let out = filter_notes(&notes, "", &set(&["a", "b"]));
        assert_eq!(ids(&out), vec!["ab"]);

        let out = filter_notes(&notes, "", &set(&["a"]));
        assert_eq!(ids(&out), vec!["a", "ab"]);
    }

    #[test]
    fn test_search_and_tags_combine() {
        let notes = sample();
        let out = filter_notes(&notes, "milk", &set(&["food"]));
        assert_eq!(ids(&out), vec!["3"]);
    }

    #[test]
    fn test_tag_match_is_exact() {
        let notes = vec![note("1", "t", "c", &["Work"])];
        assert!(filter_notes(&notes, "", &set(&["work"])).is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_result() {
        let notes = sample();
        let mut selected = set(&["home"]);
        let before = filter_notes(&notes, "", &selected);

        toggle_tag(&mut selected, "food");
        assert_eq!(ids(&filter_notes(&notes, "", &selected)), vec!["3"]);

        toggle_tag(&mut selected, "food");
        assert_eq!(selected, set(&["home"]));
        assert_eq!(filter_notes(&notes, "", &selected), before);
    }

    #[test]
    fn test_collect_tags_unique_first_seen_order() {
        let notes = sample();
        assert_eq!(collect_tags(&notes), vec!["home", "work", "rust", "food"]);
        assert!(collect_tags(&[]).is_empty());
    }

    #[test]
    fn test_retain_known_tags_drops_vanished() {
        let mut selected = set(&["home", "gone"]);
        let changed = retain_known_tags(&mut selected, &["home".to_string()]);
        assert!(changed);
        assert_eq!(selected, set(&["home"]));
        assert!(!retain_known_tags(&mut selected, &["home".to_string()]));
    }

    #[test]
    fn test_parse_tags_trims_and_drops_empty_keeps_duplicates() {
        assert_eq!(parse_tags("x, y, y, "), vec!["x", "y", "y"]);
        assert_eq!(parse_tags(" , ,"), Vec::<String>::new());
        assert_eq!(parse_tags(""), Vec::<String>::new());
        assert_eq!(parse_tags("single"), vec!["single"]);
    }

    #[test]
    fn test_join_then_parse_keeps_tags() {
        let tags = vec!["a".to_string(), "b c".to_string()];
        assert_eq!(join_tags(&tags), "a, b c");
        assert_eq!(parse_tags(&join_tags(&tags)), tags);
    }

    #[test]
    fn test_remove_note_removes_exactly_one() {
        let mut notes = sample();
        assert!(remove_note(&mut notes, "2"));
        assert_eq!(ids(&notes), vec!["1", "3", "4"]);

        assert!(!remove_note(&mut notes, "missing"));
        assert_eq!(notes.len(), 3);
    }

    #[test]
    fn test_failed_delete_leaves_list_and_selection_unchanged() {
        let mut notes = sample();
        let mut selected = set(&["food"]);
        let err = ApiError::Http { status: 500, detail: None };

        let out = apply_delete_result(&mut notes, &mut selected, "3", Err(err.clone()));
        assert_eq!(out, Err(err));
        assert_eq!(notes, sample());
        assert_eq!(selected, set(&["food"]));
    }

    #[test]
    fn test_successful_delete_removes_one_and_prunes_vanished_tags() {
        let mut notes = sample();
        let mut selected = set(&["home", "food"]);

        let out = apply_delete_result(&mut notes, &mut selected, "3", Ok(()));
        assert_eq!(out, Ok(()));
        assert_eq!(ids(&notes), vec!["1", "2", "4"]);
        // "food" only lived on note 3; "home" is still on note 1.
        assert_eq!(selected, set(&["home"]));
    }
}
