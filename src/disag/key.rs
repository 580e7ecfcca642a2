// src/disag/key.rs

/// Canonical lookup key for a set of category option UIDs.
///
/// Option UIDs are sorted and concatenated without a separator, so the key
/// does not depend on category order in the combo or in the result row.
pub fn canonical_key<I, S>(options: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options: Vec<S> = options.into_iter().collect();
    options.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
    options.iter().map(AsRef::as_ref).collect()
}
