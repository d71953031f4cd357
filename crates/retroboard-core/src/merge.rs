//! # Note Merge Rules
//!
//! Pure reconciliation functions for merging a source note into a target
//! note. The repository owns the surrounding transaction (re-reading both
//! participants, writing the target, deleting the source); this module owns
//! the field-level algebra.
//!
//! The operation is deliberately **not commutative**: target/source order
//! decides the surviving id, the text ordering, and the author-merge
//! direction. It is also not associative in the author field — already
//! "&"-joined author strings are treated as opaque, with no de-duplication.

/// Separator placed between the two texts when both sides are non-empty.
pub const TEXT_SEPARATOR: &str = "\n\n---\n\n";

/// The author value assigned when a caller supplies no author.
pub const ANONYMOUS: &str = "Anonymous";

/// Normalize a caller-supplied author: trimmed, blank becomes [`ANONYMOUS`].
pub fn normalize_author(author: &str) -> String {
    let trimmed = author.trim();
    if trimmed.is_empty() {
        ANONYMOUS.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Combine target and source texts.
///
/// Both sides are trimmed; the separator appears only when both trimmed
/// texts are non-empty.
pub fn merge_text(target: &str, source: &str) -> String {
    let target = target.trim();
    let source = source.trim();
    let separator = if !target.is_empty() && !source.is_empty() {
        TEXT_SEPARATOR
    } else {
        ""
    };
    format!("{target}{separator}{source}")
}

/// Reconcile the surviving author for a merge.
///
/// - Target anonymous, source named: adopt the source's author.
/// - Both named and different: join as `"{target} & {source}"`.
/// - Otherwise (equal authors, or source anonymous): target unchanged.
pub fn merge_authors(target: &str, source: &str) -> String {
    if target == ANONYMOUS && source != ANONYMOUS {
        source.to_string()
    } else if target != ANONYMOUS && source != ANONYMOUS && target != source {
        format!("{target} & {source}")
    } else {
        target.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_merge_uses_literal_separator() {
        assert_eq!(merge_text("A", "B"), "A\n\n---\n\nB");
    }

    #[test]
    fn text_merge_trims_both_sides() {
        assert_eq!(merge_text("  left ", "\nright\t"), "left\n\n---\n\nright");
    }

    #[test]
    fn text_merge_skips_separator_when_a_side_is_empty() {
        assert_eq!(merge_text("A", "   "), "A");
        assert_eq!(merge_text("", "B"), "B");
        assert_eq!(merge_text("", ""), "");
    }

    #[test]
    fn anonymous_target_adopts_named_source() {
        assert_eq!(merge_authors("Anonymous", "Mary"), "Mary");
    }

    #[test]
    fn two_named_authors_are_joined() {
        assert_eq!(merge_authors("Alex", "Mary"), "Alex & Mary");
    }

    #[test]
    fn equal_authors_stay_single() {
        assert_eq!(merge_authors("Alex", "Alex"), "Alex");
    }

    #[test]
    fn anonymous_source_leaves_target_alone() {
        assert_eq!(merge_authors("Alex", "Anonymous"), "Alex");
        assert_eq!(merge_authors("Anonymous", "Anonymous"), "Anonymous");
    }

    #[test]
    fn author_merge_is_not_associative() {
        // A previously joined author string is opaque; repeated names are
        // not de-duplicated.
        let joined = merge_authors("Alex", "Mary");
        assert_eq!(merge_authors(&joined, "Alex"), "Alex & Mary & Alex");
    }

    #[test]
    fn normalize_author_defaults_blank_to_anonymous() {
        assert_eq!(normalize_author(""), "Anonymous");
        assert_eq!(normalize_author("   "), "Anonymous");
        assert_eq!(normalize_author(" Mary "), "Mary");
    }
}
