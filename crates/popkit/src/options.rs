//! Positioning options
//!
//! Options handed to the positioning engine come from three layers, lowest
//! precedence first: library defaults, values computed from popup props, and
//! the user's raw `options` tree.

use serde_json::{json, Value};

use popkit_merge::{dedupe_by_identity, merge_config};

use crate::{Config, PopupProps};

/// The external positioning engine's option surface
pub trait Positioner {
    /// Options the engine currently runs with
    fn options(&self) -> Value;

    /// Replace the engine's options
    fn set_options(&mut self, options: Value);
}

/// Library defaults
pub fn library_defaults(config: &Config) -> Value {
    let offset = config.offset;
    json!({
        "placement": config.placement.as_str(),
        "strategy": config.strategy.as_str(),
        "modifiers": [
            {
                "name": "offset",
                "options": { "offset": [offset.0.unwrap_or(0.0), offset.1.unwrap_or(0.0)] }
            },
            { "name": "preventOverflow", "options": { "padding": config.overflow_padding } },
            { "name": "flip", "options": { "padding": config.overflow_padding } }
        ]
    })
}

/// Values derived from a popup's props
///
/// Only what the props actually set appears here, so unset props leave the
/// defaults untouched.
pub fn computed_options(props: &PopupProps, config: &Config) -> Value {
    let mut computed = serde_json::Map::new();
    if let Some(placement) = props.placement {
        computed.insert("placement".to_string(), Value::from(placement.as_str()));
    }
    if let Some(strategy) = props.strategy {
        computed.insert("strategy".to_string(), Value::from(strategy.as_str()));
    }

    let mut modifiers = Vec::new();
    if let Some(offset) = props.offset {
        let offset = offset.or(config.offset);
        modifiers.push(json!({
            "name": "offset",
            "options": { "offset": [offset.0.unwrap_or(0.0), offset.1.unwrap_or(0.0)] }
        }));
    }
    modifiers.push(json!({
        "name": "arrow",
        "enabled": props.arrow,
        "options": { "element": "[data-popper-arrow]" }
    }));
    computed.insert("modifiers".to_string(), Value::Array(modifiers));

    Value::Object(computed)
}

/// Reconcile every layer into the options passed to the engine
pub fn resolve_options(props: &PopupProps, config: &Config) -> Value {
    let merge = config.merge_options();
    let layered = merge_config(&computed_options(props, config), &library_defaults(config), &merge);
    let mut resolved = match &props.options {
        Some(user) => merge_config(user, &layered, &merge),
        None => layered,
    };

    // User arrays may repeat a modifier; the engine expects one entry per name
    if let Some(Value::Array(modifiers)) = resolved.get_mut("modifiers") {
        *modifiers = dedupe_by_identity(modifiers, &config.identity_key);
    }
    tracing::debug!("Resolved popup options: {}", resolved);
    resolved
}
