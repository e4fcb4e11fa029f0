//! CSS text emission.

use crate::types::AssetDescriptor;

use super::RatioGroup;

/// Reference resolution of a ratio-1 display.
pub const BASE_DPI: u32 = 96;

const INDENT: &str = "  ";

/// Render one descriptor as a single-line background rule.
pub fn render_rule(descriptor: &AssetDescriptor) -> String {
    format!(
        "{} {{ background: url({}) no-repeat 0 0; background-size: 100% 100%; \
         width: {}px; height: {}px; display: inline-block; vertical-align: middle; \
         font-size: 0; }}",
        descriptor.selector,
        descriptor.url,
        descriptor.effective_width(),
        descriptor.effective_height(),
    )
}

/// Render a group's rules, wrapped in a resolution media query above ratio 1.
pub fn render_group(group: &RatioGroup) -> String {
    if group.ratio <= 1 {
        return group
            .assets
            .iter()
            .map(render_rule)
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut out = format!(
        "@media (-webkit-min-device-pixel-ratio: {}), (min-resolution: {}dpi) {{\n",
        group.ratio,
        group.ratio * BASE_DPI
    );
    for descriptor in &group.assets {
        out.push_str(INDENT);
        out.push_str(&render_rule(descriptor));
        out.push('\n');
    }
    out.push('}');
    out
}

/// Render all groups, separated by a blank line.
///
/// Groups are expected in ascending ratio order, as produced by
/// [`group_by_ratio`](super::group_by_ratio).
pub fn render_stylesheet(groups: &[RatioGroup]) -> String {
    groups
        .iter()
        .map(render_group)
        .collect::<Vec<_>>()
        .join("\n\n")
}
