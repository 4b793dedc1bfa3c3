//! Layered export configuration.
//!
//! A config document has up to three top-level sections:
//!
//! ```json
//! {
//!   "export": { "zoom": { "mode": "fitToWidth", "width": 1600 }, "density": "compact" },
//!   "page": { "size": "a3", "orientation": "landscape" },
//!   "today": "2025-03-01"
//! }
//! ```
//!
//! Site defaults and per-export overrides are merged as JSON first and only then converted into
//! typed [`ExportOptions`]/[`PageOptions`], so a partial override never resets sibling fields.

use crate::options::ExportOptions;
use crate::page::PageOptions;
use crate::time::parse_date;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig(Value);

impl Default for ExportConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl ExportConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(text)?))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text)?;
        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Configs are objects; coerce anything else so this API never panics on user input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    /// `site` defaults with `overrides` merged on top.
    pub fn layered(site: &ExportConfig, overrides: &ExportConfig) -> Self {
        let mut out = site.clone();
        out.deep_merge(overrides.as_value());
        out
    }

    /// Typed, validated export options from the `export` section (defaults when absent).
    pub fn export_options(&self) -> Result<ExportOptions> {
        let options: ExportOptions = match self.get("export") {
            Some(v) => serde_json::from_value(v.clone())?,
            None => ExportOptions::default(),
        };
        options.validate()?;
        Ok(options)
    }

    /// Typed, validated page options from the `page` section (defaults when absent).
    pub fn page_options(&self) -> Result<PageOptions> {
        let page: PageOptions = match self.get("page") {
            Some(v) => serde_json::from_value(v.clone())?,
            None => PageOptions::default(),
        };
        page.validate()?;
        Ok(page)
    }

    /// A pinned "today", used for reproducible fallback windows.
    pub fn fixed_today(&self) -> Result<Option<NaiveDate>> {
        match self.get("today") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(parse_date(s)?)),
            Some(other) => Err(Error::InvalidDate {
                value: other.to_string(),
            }),
        }
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Density, ZoomMode};
    use crate::page::{Orientation, PageSize};
    use serde_json::json;

    #[test]
    fn overrides_keep_sibling_site_defaults() {
        let site = ExportConfig::from_value(json!({
            "export": { "density": "compact", "zoom": { "mode": "custom", "zoom": 0.5 } },
            "page": { "size": "a3" }
        }));
        let overrides = ExportConfig::from_value(json!({
            "export": { "zoom": { "mode": "custom", "zoom": 2.0 } },
            "page": { "orientation": "portrait" }
        }));
        let cfg = ExportConfig::layered(&site, &overrides);

        let options = cfg.export_options().unwrap();
        assert_eq!(options.density, Density::Compact);
        assert_eq!(options.zoom, ZoomMode::Custom { zoom: 2.0 });

        let page = cfg.page_options().unwrap();
        assert_eq!(page.size, PageSize::A3);
        assert_eq!(page.orientation, Orientation::Portrait);
    }

    #[test]
    fn set_value_creates_intermediate_objects() {
        let mut cfg = ExportConfig::from_value(json!("not an object"));
        cfg.set_value("export.density", json!("comfortable"));
        assert_eq!(cfg.get("export.density"), Some(&json!("comfortable")));
        assert_eq!(
            cfg.export_options().unwrap().density,
            Density::Comfortable
        );
    }

    #[test]
    fn invalid_sections_are_reported() {
        let cfg = ExportConfig::from_value(json!({
            "export": { "zoom": { "mode": "custom", "zoom": -1.0 } }
        }));
        assert!(matches!(
            cfg.export_options(),
            Err(Error::InvalidOptions { .. })
        ));

        let cfg = ExportConfig::from_value(json!({ "today": 20250101 }));
        assert!(cfg.fixed_today().is_err());
    }

    #[test]
    fn yaml_configs_are_accepted() {
        let cfg = ExportConfig::from_yaml_str(
            "export:\n  density: compact\n  layers:\n    header: false\ntoday: 2025-03-01\n",
        )
        .unwrap();
        assert!(!cfg.export_options().unwrap().include_header());
        assert_eq!(
            cfg.fixed_today().unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
        assert_eq!(cfg.get("export.layers.header"), Some(&json!(false)));
    }
}
