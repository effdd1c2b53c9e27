//! Learnable parameter counts per kind.

use super::kind::NodeKind;
use super::params::Params;

/// Trainable weights of a single node. Kinds without weights, and
/// parameters that are absent or not non-negative integers, count as zero.
pub fn param_count(kind: NodeKind, params: &Params) -> u64 {
    let get = |name: &str| {
        params
            .integer(name)
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0)
    };

    match kind {
        NodeKind::Linear => {
            let out_features = get("out_features");
            get("in_features")
                .saturating_mul(out_features)
                .saturating_add(out_features)
        }
        NodeKind::Conv2D => {
            let out_channels = get("out_channels");
            let kernel = get("kernel_size");
            get("in_channels")
                .saturating_mul(out_channels)
                .saturating_mul(kernel.saturating_mul(kernel))
                .saturating_add(out_channels)
        }
        // gamma + beta
        NodeKind::BatchNorm => get("num_features").saturating_mul(2),
        _ => 0,
    }
}
