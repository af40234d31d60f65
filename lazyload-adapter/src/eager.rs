use lazyload::Document;

/// Loads every candidate right away, ignoring geometry.
///
/// This is the usual fallback when a session cannot start because the host has no geometry
/// support ([`lazyload::LazyLoadError::Capability`]). Candidates without a placeholder source
/// are skipped.
///
/// Returns the number of candidates that received a source.
pub fn load_all_eagerly<D: Document + ?Sized>(
    doc: &mut D,
    candidates: impl IntoIterator<Item = D::Candidate>,
) -> usize {
    let mut loaded = 0;
    for candidate in candidates {
        let Some(source) = doc.deferred_source(&candidate) else {
            continue;
        };
        doc.assign_source(&candidate, &source);
        doc.clear_deferred_source(&candidate);
        loaded += 1;
    }
    loaded
}
