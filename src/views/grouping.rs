use std::hash::Hash;

use indexmap::IndexMap;

/// Group `items` by `key`, skipping items for which `key` returns `None`.
///
/// Groups iterate in the order their key first appeared, which is the
/// tie-break every view relies on.
pub fn group_by<I, K, F>(items: I, mut key: F) -> IndexMap<K, Vec<I::Item>>
where
    I: IntoIterator,
    K: Hash + Eq,
    F: FnMut(&I::Item) -> Option<K>,
{
    let mut groups: IndexMap<K, Vec<I::Item>> = IndexMap::new();
    for item in items {
        if let Some(k) = key(&item) {
            groups.entry(k).or_default().push(item);
        }
    }
    groups
}
