//! Motion tuning loaded from `config/motion.json`.
//!
//! Every numeric field has a default and an inclusive `(min, max)` range. A
//! value outside its range falls back to the default instead of failing the
//! whole file, so a typo in one knob never disables the page's motion.

use serde::Deserialize;

use crate::cursor::default_cursor_spring;
use crate::geometry::ViewportMargin;
use crate::log::LogLevel;
use crate::sections::{DEFAULT_SCROLLED_OFFSET_PX, DEFAULT_THRESHOLD_RATIO};
use crate::spring::SpringConfig;
use crate::tilt::{TiltConfig, DEFAULT_MAX_TILT_DEG, DEFAULT_SHEEN_FADE_SECS};

const EMBEDDED_MOTION_CONFIG: &str = include_str!("../config/motion.json");

const DEFAULT_ENTRANCE_MARGIN: &str = "-100px 0px";
const DEFAULT_TILT_STIFFNESS: f64 = 300.0;
const DEFAULT_TILT_MASS: f64 = 1.0;

const SECTION_THRESHOLD_RATIO_BOUNDS: (f64, f64) = (0.05, 0.95);
const NAVBAR_SCROLLED_PX_BOUNDS: (f64, f64) = (0.0, 400.0);
const MAX_TILT_DEG_BOUNDS: (f64, f64) = (0.0, 45.0);
const SPRING_STIFFNESS_BOUNDS: (f64, f64) = (10.0, 2_000.0);
const SPRING_DAMPING_BOUNDS: (f64, f64) = (0.0, 200.0);
const SPRING_MASS_BOUNDS: (f64, f64) = (0.05, 10.0);
const SHEEN_FADE_SECS_BOUNDS: (f64, f64) = (0.0, 2.0);

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawMotionConfig {
    log_level: Option<String>,
    reduced_motion: Option<bool>,
    section_threshold_ratio: Option<f64>,
    navbar_scrolled_px: Option<f64>,
    entrance_margin: Option<String>,
    max_tilt_deg: Option<f64>,
    tilt_stiffness: Option<f64>,
    tilt_damping: Option<f64>,
    tilt_mass: Option<f64>,
    sheen_fade_secs: Option<f64>,
    cursor_stiffness: Option<f64>,
    cursor_damping: Option<f64>,
    cursor_mass: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub log_level: LogLevel,
    /// Force motion off regardless of the visitor's OS preference.
    pub reduced_motion: bool,
    pub section_threshold_ratio: f64,
    pub navbar_scrolled_px: f64,
    pub entrance_margin: ViewportMargin,
    pub tilt: TiltConfig,
    pub cursor_spring: SpringConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            reduced_motion: false,
            section_threshold_ratio: DEFAULT_THRESHOLD_RATIO,
            navbar_scrolled_px: DEFAULT_SCROLLED_OFFSET_PX,
            entrance_margin: ViewportMargin::new(-100.0, 0.0),
            tilt: TiltConfig::default(),
            cursor_spring: default_cursor_spring(),
        }
    }
}

impl MotionConfig {
    pub fn from_json(source: &str) -> Result<Self, &'static str> {
        let raw: RawMotionConfig =
            serde_json::from_str(source).map_err(|_| "motion config is not valid JSON")?;
        Ok(Self::from_raw(raw))
    }

    /// The config compiled into the bundle, or defaults when it cannot be
    /// parsed. The error is returned alongside so the caller can log it.
    pub fn embedded() -> (Self, Option<&'static str>) {
        match Self::from_json(EMBEDDED_MOTION_CONFIG) {
            Ok(config) => (config, None),
            Err(error) => (Self::default(), Some(error)),
        }
    }

    fn from_raw(raw: RawMotionConfig) -> Self {
        let defaults = Self::default();

        let log_level = raw
            .log_level
            .as_deref()
            .and_then(LogLevel::parse)
            .unwrap_or(defaults.log_level);
        let entrance_margin = raw
            .entrance_margin
            .as_deref()
            .and_then(|value| ViewportMargin::parse(value).ok())
            .unwrap_or_else(|| {
                ViewportMargin::parse(DEFAULT_ENTRANCE_MARGIN).unwrap_or(defaults.entrance_margin)
            });

        let tilt_stiffness = bounded(
            raw.tilt_stiffness,
            DEFAULT_TILT_STIFFNESS,
            SPRING_STIFFNESS_BOUNDS,
        );
        let tilt_mass = bounded(raw.tilt_mass, DEFAULT_TILT_MASS, SPRING_MASS_BOUNDS);
        let critical = SpringConfig::critically_damped(tilt_stiffness, tilt_mass);
        let tilt_spring = SpringConfig::new(
            tilt_stiffness,
            bounded(raw.tilt_damping, critical.damping, SPRING_DAMPING_BOUNDS),
            tilt_mass,
        );

        let cursor_defaults = defaults.cursor_spring;
        let cursor_spring = SpringConfig::new(
            bounded(
                raw.cursor_stiffness,
                cursor_defaults.stiffness,
                SPRING_STIFFNESS_BOUNDS,
            ),
            bounded(
                raw.cursor_damping,
                cursor_defaults.damping,
                SPRING_DAMPING_BOUNDS,
            ),
            bounded(raw.cursor_mass, cursor_defaults.mass, SPRING_MASS_BOUNDS),
        );

        Self {
            log_level,
            reduced_motion: raw.reduced_motion.unwrap_or(defaults.reduced_motion),
            section_threshold_ratio: bounded(
                raw.section_threshold_ratio,
                DEFAULT_THRESHOLD_RATIO,
                SECTION_THRESHOLD_RATIO_BOUNDS,
            ),
            navbar_scrolled_px: bounded(
                raw.navbar_scrolled_px,
                DEFAULT_SCROLLED_OFFSET_PX,
                NAVBAR_SCROLLED_PX_BOUNDS,
            ),
            entrance_margin,
            tilt: TiltConfig {
                max_tilt_deg: bounded(raw.max_tilt_deg, DEFAULT_MAX_TILT_DEG, MAX_TILT_DEG_BOUNDS),
                spring: tilt_spring,
                sheen_fade_secs: bounded(
                    raw.sheen_fade_secs,
                    DEFAULT_SHEEN_FADE_SECS,
                    SHEEN_FADE_SECS_BOUNDS,
                ),
            },
            cursor_spring,
        }
    }
}

fn bounded(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let (config, error) = MotionConfig::embedded();
        assert_eq!(error, None);
        assert_eq!(config.entrance_margin, ViewportMargin::new(-100.0, 0.0));
        assert_eq!(config.tilt.max_tilt_deg, 10.0);
    }

    #[test]
    fn empty_object_yields_defaults() {
        let config = MotionConfig::from_json("{}").expect("empty object is valid");
        assert_eq!(config, MotionConfig::default());
        assert!((config.tilt.spring.damping_ratio() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn values_within_bounds_are_kept() {
        let config = MotionConfig::from_json(
            r#"{
                "logLevel": "debug",
                "sectionThresholdRatio": 0.5,
                "navbarScrolledPx": 64,
                "entranceMargin": "-40px 0px",
                "maxTiltDeg": 6,
                "tiltStiffness": 400,
                "tiltDamping": 20,
                "reducedMotion": true
            }"#,
        )
        .expect("valid config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.section_threshold_ratio, 0.5);
        assert_eq!(config.navbar_scrolled_px, 64.0);
        assert_eq!(config.entrance_margin, ViewportMargin::new(-40.0, 0.0));
        assert_eq!(config.tilt.max_tilt_deg, 6.0);
        assert_eq!(config.tilt.spring.stiffness, 400.0);
        assert_eq!(config.tilt.spring.damping, 20.0);
        assert!(config.reduced_motion);
    }

    #[test]
    fn out_of_range_values_fall_back_individually() {
        let config = MotionConfig::from_json(
            r#"{
                "sectionThresholdRatio": 3,
                "maxTiltDeg": -5,
                "tiltStiffness": 1,
                "cursorMass": 0.25,
                "logLevel": "chatty",
                "entranceMargin": "ten pixels"
            }"#,
        )
        .expect("valid JSON");

        assert_eq!(config.section_threshold_ratio, DEFAULT_THRESHOLD_RATIO);
        assert_eq!(config.tilt.max_tilt_deg, DEFAULT_MAX_TILT_DEG);
        assert_eq!(config.tilt.spring.stiffness, DEFAULT_TILT_STIFFNESS);
        assert_eq!(config.cursor_spring.mass, 0.25);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.entrance_margin, ViewportMargin::new(-100.0, 0.0));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(MotionConfig::from_json("{ not json").is_err());
        assert!(MotionConfig::from_json(r#"{ "maxTiltDeg": "steep" }"#).is_err());
    }
}
