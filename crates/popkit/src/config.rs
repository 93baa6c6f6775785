//! Library Configuration

use crate::{Offset, Placement, PositioningStrategy};

/// Library-wide defaults applied to every popup
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Field pairing records in option arrays (positioning modifiers are keyed by name)
    pub identity_key: String,

    /// Keep user-only option keys and default-only modifiers when merging
    pub append_unmatched: bool,

    /// Placement when a popup does not choose one
    pub placement: Placement,

    /// Positioning strategy when a popup does not choose one
    pub strategy: PositioningStrategy,

    /// Offset parts used where a popup leaves them unset
    pub offset: Offset,

    /// Close on clicks outside the popup unless the popup says otherwise
    pub hide_on_click_outside: bool,

    /// Padding kept between the popup and the viewport edge (px)
    pub overflow_padding: f64,
}

impl Config {
    /// Merge options derived from this configuration
    pub fn merge_options(&self) -> popkit_merge::MergeOptions {
        popkit_merge::MergeOptions::keyed_by(self.identity_key.clone())
            .append_unmatched(self.append_unmatched)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identity_key: "name".to_string(),
            append_unmatched: true,
            placement: Placement::Bottom,
            strategy: PositioningStrategy::Absolute,
            offset: Offset(Some(0.0), Some(8.0)),
            hide_on_click_outside: true,
            overflow_padding: 8.0,
        }
    }
}
