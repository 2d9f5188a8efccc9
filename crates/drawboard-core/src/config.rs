//! Engine constants.

use crate::error::{BoardError, BoardResult};
use serde::{Deserialize, Serialize};

/// Tunable constants for the interaction engine.
///
/// Missing fields fall back to their defaults when loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Increment for step zoom and wheel zoom.
    pub zoom_step: f64,
    /// Smallest width/height a resized selection box may shrink to.
    pub min_resize_extent: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub min_font_size: f64,
    pub max_font_size: f64,
    /// Text font size as a multiple of the brush size.
    pub text_size_factor: f64,
    /// Side of a square resize handle.
    pub handle_size: f64,
    /// Gap between the selection bounds and the overlay box.
    pub handle_margin: f64,
    /// Extra grab distance around each handle.
    pub handle_slop: f64,
    /// Pointer tolerance when hit-testing objects.
    pub hit_tolerance: f64,
    /// Select freshly drawn strokes and figures.
    pub auto_select: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.2,
            max_zoom: 5.0,
            zoom_step: 0.1,
            min_resize_extent: 10.0,
            min_scale: 0.2,
            max_scale: 5.0,
            min_font_size: 8.0,
            max_font_size: 200.0,
            text_size_factor: 3.0,
            handle_size: 8.0,
            handle_margin: 5.0,
            handle_slop: 4.0,
            hit_tolerance: 5.0,
            auto_select: true,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every limit pair is finite, positive and ordered, and
    /// that distances are finite and non-negative.
    pub fn validate(&self) -> BoardResult<()> {
        check_range("zoom", self.min_zoom, self.max_zoom)?;
        check_range("scale", self.min_scale, self.max_scale)?;
        check_range("font size", self.min_font_size, self.max_font_size)?;
        check_positive("zoom_step", self.zoom_step)?;
        check_positive("text_size_factor", self.text_size_factor)?;
        for (name, value) in [
            ("min_resize_extent", self.min_resize_extent),
            ("handle_size", self.handle_size),
            ("handle_margin", self.handle_margin),
            ("handle_slop", self.handle_slop),
            ("hit_tolerance", self.hit_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(BoardError::InvalidConfig(format!("{} must be >= 0, got {}", name, value)));
            }
        }
        Ok(())
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> BoardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_positive(name: &str, value: f64) -> BoardResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BoardError::InvalidConfig(format!("{} must be > 0, got {}", name, value)))
    }
}

fn check_range(name: &str, min: f64, max: f64) -> BoardResult<()> {
    check_positive(name, min)?;
    check_positive(name, max)?;
    if min > max {
        return Err(BoardError::InvalidConfig(format!(
            "{} range is inverted: {} > {}",
            name, min, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = BoardConfig::from_json(r#"{ "max_zoom": 8.0, "auto_select": false }"#).unwrap();
        assert!((config.max_zoom - 8.0).abs() < f64::EPSILON);
        assert!(!config.auto_select);
        assert!((config.min_zoom - 0.2).abs() < f64::EPSILON);
        assert!((config.handle_size - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_json() {
        assert!(BoardConfig::from_json("{ nope").is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = BoardConfig::default();
        let back = BoardConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_inverted_limits_rejected() {
        for json in [
            r#"{ "min_zoom": 6.0 }"#,
            r#"{ "min_scale": 2.0, "max_scale": 1.0 }"#,
            r#"{ "max_font_size": 4.0 }"#,
        ] {
            assert!(matches!(BoardConfig::from_json(json), Err(BoardError::InvalidConfig(_))), "{}", json);
        }
    }

    #[test]
    fn test_zero_and_non_finite_limits_rejected() {
        for json in [
            r#"{ "min_zoom": 0.0 }"#,
            r#"{ "min_scale": -1.0 }"#,
            r#"{ "zoom_step": 0.0 }"#,
            r#"{ "hit_tolerance": -2.0 }"#,
        ] {
            assert!(matches!(BoardConfig::from_json(json), Err(BoardError::InvalidConfig(_))), "{}", json);
        }
        let config = BoardConfig {
            max_zoom: f64::INFINITY,
            ..BoardConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(BoardConfig::default().validate().is_ok());
    }
}
