//! Popup properties

use serde::{Deserialize, Serialize};
use serde_json::Value;

use popkit_dom::EventCategory;

/// What opens a popup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Click on the reference toggles
    #[default]
    Click,
    /// Pointer entering opens, leaving closes
    Hover,
    /// Focus entering opens, leaving closes
    Focus,
}

impl TriggerMode {
    /// Categories the trigger itself observes
    pub fn categories(self) -> &'static [EventCategory] {
        match self {
            TriggerMode::Click => &[EventCategory::Click],
            TriggerMode::Hover => &[EventCategory::MouseOver, EventCategory::MouseOut],
            TriggerMode::Focus => &[EventCategory::FocusIn, EventCategory::FocusOut],
        }
    }
}

/// Where the popup sits relative to its reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    Auto,
    AutoStart,
    AutoEnd,
    Top,
    TopStart,
    TopEnd,
    Bottom,
    BottomStart,
    BottomEnd,
    Right,
    RightStart,
    RightEnd,
    Left,
    LeftStart,
    LeftEnd,
}

impl Placement {
    /// Name understood by the positioning engine
    pub fn as_str(self) -> &'static str {
        match self {
            Placement::Auto => "auto",
            Placement::AutoStart => "auto-start",
            Placement::AutoEnd => "auto-end",
            Placement::Top => "top",
            Placement::TopStart => "top-start",
            Placement::TopEnd => "top-end",
            Placement::Bottom => "bottom",
            Placement::BottomStart => "bottom-start",
            Placement::BottomEnd => "bottom-end",
            Placement::Right => "right",
            Placement::RightStart => "right-start",
            Placement::RightEnd => "right-end",
            Placement::Left => "left",
            Placement::LeftStart => "left-start",
            Placement::LeftEnd => "left-end",
        }
    }
}

/// CSS positioning used for the popup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositioningStrategy {
    Absolute,
    Fixed,
}

impl PositioningStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            PositioningStrategy::Absolute => "absolute",
            PositioningStrategy::Fixed => "fixed",
        }
    }
}

/// `[skidding, distance]` in px; unset parts fall back to the library default
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset(pub Option<f64>, pub Option<f64>);

impl Offset {
    /// Fill unset parts from `fallback`
    pub fn or(self, fallback: Offset) -> Offset {
        Offset(self.0.or(fallback.0), self.1.or(fallback.1))
    }
}

/// Per-popup properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PopupProps {
    pub trigger: TriggerMode,
    /// Element id of the reference; clicks on it toggle a click-triggered popup
    pub reference: Option<String>,
    /// Raw positioning-engine options, merged over everything else
    pub options: Option<Value>,
    /// Initial open state
    pub model_value: bool,
    pub placement: Option<Placement>,
    pub offset: Option<Offset>,
    pub strategy: Option<PositioningStrategy>,
    /// `None` defers to [`Config::hide_on_click_outside`](crate::Config)
    pub hide_on_click_outside: Option<bool>,
    pub arrow: bool,
    pub force_show: bool,
    pub force_hide: bool,
    pub disabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_props_from_json() {
        let props: PopupProps = serde_json::from_value(json!({
            "trigger": "hover",
            "placement": "top-start",
            "offset": [null, 12.0],
            "hideOnClickOutside": false,
            "options": { "strategy": "fixed" }
        }))
        .unwrap();

        assert_eq!(props.trigger, TriggerMode::Hover);
        assert_eq!(props.placement, Some(Placement::TopStart));
        assert_eq!(props.offset, Some(Offset(None, Some(12.0))));
        assert_eq!(props.hide_on_click_outside, Some(false));
        assert!(!props.disabled);
    }

    #[test]
    fn test_placement_names_match_serde() {
        for placement in [Placement::Auto, Placement::BottomEnd, Placement::LeftStart] {
            assert_eq!(serde_json::to_value(placement).unwrap(), json!(placement.as_str()));
        }
    }

    #[test]
    fn test_offset_fallback() {
        assert_eq!(Offset(None, Some(4.0)).or(Offset(Some(1.0), Some(8.0))), Offset(Some(1.0), Some(4.0)));
    }

    #[test]
    fn test_trigger_categories() {
        assert_eq!(TriggerMode::Click.categories(), &[EventCategory::Click]);
        assert!(TriggerMode::Hover.categories().iter().all(|c| c.is_hover()));
        assert!(TriggerMode::Focus.categories().iter().all(|c| c.is_focus()));
    }
}
