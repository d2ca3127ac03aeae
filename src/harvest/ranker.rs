use crate::types::ArtistRecord;

/// Orders records by popularity, most popular first, and keeps at most `limit`.
///
/// # Arguments
///
/// * `records` - One genre's collected artists, in catalog page order
/// * `limit` - Maximum number of records to keep; `0` keeps none
///
/// # Returns
///
/// The `min(limit, records.len())` most popular records. The sort is stable:
/// artists with equal popularity stay in the order the catalog returned
/// them, so the result is deterministic for a given input, and ranking an
/// already ranked list changes nothing.
///
/// # Example
///
/// ```
/// // popularities 10, 50, 30 with limit 2
/// let top = rank(records, 2);
/// assert_eq!(top.iter().map(|r| r.popularity).collect::<Vec<_>>(), vec![50, 30]);
/// ```
pub fn rank(mut records: Vec<ArtistRecord>, limit: usize) -> Vec<ArtistRecord> {
    records.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    records.truncate(limit);
    records
}
