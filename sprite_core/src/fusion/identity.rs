//! Fused creature identity - id and display name

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static FUSION_SEQUENCE: AtomicU64 = AtomicU64::new(0);

const FUSION_ID_PREFIX: &str = "sprite_";

/// Part of a parent id that goes into a child id. Base ids are used whole;
/// fused ids contribute only their `{unix_millis}_{sequence}` tail, so ids
/// stay short across fusion chains.
fn parent_tag(id: &str) -> &str {
    if !id.starts_with(FUSION_ID_PREFIX) {
        return id;
    }
    match id.rmatch_indices('_').nth(1) {
        Some((pos, _)) => &id[pos + 1..],
        None => id,
    }
}

/// Unique id for a child of `a_id` and `b_id`.
///
/// Format: `sprite_{a}_{b}_{unix_millis}_{sequence}`. The sequence counter
/// is shared by the whole process, so fusing the same pair twice within one
/// millisecond still gives two ids.
pub fn fusion_id(a_id: &str, b_id: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let sequence = FUSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!(
        "{}{}_{}_{}_{}",
        FUSION_ID_PREFIX,
        parent_tag(a_id),
        parent_tag(b_id),
        millis,
        sequence
    )
}

/// Blend two names: the first half of `a` (rounded up) followed by the
/// second half of `b` (starting at floor(len/2)). Counts characters, not
/// bytes.
pub fn fusion_name(a: &str, b: &str) -> String {
    let take = (a.chars().count() + 1) / 2;
    let skip = b.chars().count() / 2;
    a.chars().take(take).chain(b.chars().skip(skip)).collect()
}
