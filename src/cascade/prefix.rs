//! k-prefix generation over a batch of cascades

use super::Cascade;

/// Cut every cascade down to its earliest `k` events
///
/// Cascades with fewer than `k` events are dropped. Sources are sorted in
/// place as a side effect.
pub fn generate_prefix_cascades(cascades: &mut [Cascade], k: usize) -> Vec<Cascade> {
    cascades.iter_mut()
        .filter_map(|cascade| cascade.get_k_prefix(k))
        .collect()
}
