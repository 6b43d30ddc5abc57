//! Anchor lookup for cache misses.
//!
//! When neither the target key nor its predecessor is cached, the buffer needs
//! some populated entry at or below the target to start walking from. This is
//! an approximate halving search rather than a strict binary search: a hit
//! moves the window up, a miss moves it down, and the search gives up as soon
//! as a miss lands on the lower bound. It can return `None` even though some
//! key in the window is populated, in which case the caller walks from the
//! start of the document.

/// Search `[start, end]` for a populated key.
///
/// `probe` reads the cache. `round` maps a key down to the nearest key the cache
/// can hold (block start for the block cache, identity for the line cache) and
/// must be a monotone floor function.
pub fn find_anchor<T>(
    start: usize,
    end: usize,
    probe: impl Fn(usize) -> Option<T>,
    round: impl Fn(usize) -> usize,
) -> Option<(usize, T)> {
    let mut low = round(start);
    let mut high = round(end);
    if low > high {
        return None;
    }

    loop {
        let mid = round(low + (high - low) / 2);
        match probe(mid) {
            Some(value) if mid == low || mid == high => return Some((mid, value)),
            Some(_) => low = mid,
            None if mid == low => return None,
            None => high = mid,
        }
    }
}
