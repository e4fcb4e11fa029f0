//! Density grouping.

use crate::types::AssetDescriptor;

/// Descriptors sharing one density ratio, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioGroup {
    pub ratio: u32,
    pub assets: Vec<AssetDescriptor>,
}

/// Partition descriptors by ratio, lowest ratio first.
///
/// This is a stable sort followed by a split into runs, so descriptors with
/// the same ratio keep their relative input order and the output is
/// deterministic for a given input.
pub fn group_by_ratio(mut descriptors: Vec<AssetDescriptor>) -> Vec<RatioGroup> {
    descriptors.sort_by_key(|d| d.ratio);

    let mut groups: Vec<RatioGroup> = Vec::new();
    for descriptor in descriptors {
        match groups.last_mut() {
            Some(group) if group.ratio == descriptor.ratio => group.assets.push(descriptor),
            _ => groups.push(RatioGroup {
                ratio: descriptor.ratio,
                assets: vec![descriptor],
            }),
        }
    }
    groups
}
