use crate::domain::model::TagMatchMode;

/// Decides whether a record carrying `record_tags` satisfies `requested`.
///
/// An empty request matches every record in both modes, so an empty tag
/// list can never be used to express "match nothing". Comparison is exact
/// and case-sensitive.
pub fn tags_match<S: AsRef<str>>(record_tags: &[S], requested: &[S], mode: TagMatchMode) -> bool {
    if requested.is_empty() {
        return true;
    }

    let present = |tag: &S| record_tags.iter().any(|t| t.as_ref() == tag.as_ref());
    match mode {
        TagMatchMode::All => requested.iter().all(present),
        TagMatchMode::Any => requested.iter().any(present),
    }
}
