use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grades::{CanonicalScorePolicy, GradeScale, PointScale};

use super::ConfigError;

/// How scores are turned into letters.
///
/// Curve grading is listed by hosts but not selectable until its rules exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingSystem {
    #[default]
    Normal,
}

impl fmt::Display for GradingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradingSystem::Normal => f.write_str("normal"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub point_scale: PointScale,
    #[serde(default)]
    pub grading_system: GradingSystem,
    #[serde(default)]
    pub score_policy: CanonicalScorePolicy,
    #[serde(default)]
    pub quiet: bool,
}

impl Config {
    pub const KEYS: [&'static str; 4] = ["point_scale", "grading_system", "score_policy", "quiet"];

    pub fn grade_scale(&self) -> GradeScale {
        GradeScale::new(self.point_scale, self.score_policy)
    }

    /// Current values as `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("point_scale", self.point_scale.to_string()),
            ("grading_system", self.grading_system.to_string()),
            ("score_policy", self.score_policy.to_string()),
            ("quiet", self.quiet.to_string()),
        ]
    }

    /// Updates one key from its textual form; the config is untouched on error.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key.trim().to_ascii_lowercase().as_str() {
            "point_scale" => self.point_scale = parse_point_scale(value)?,
            "grading_system" => self.grading_system = parse_grading_system(value)?,
            "score_policy" => {
                self.score_policy = value
                    .parse::<CanonicalScorePolicy>()
                    .map_err(|err| ConfigError::InvalidValue {
                        key: "score_policy".into(),
                        message: err.to_string(),
                    })?
            }
            "quiet" => self.quiet = parse_flag("quiet", value)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn parse_point_scale(value: &str) -> Result<PointScale, ConfigError> {
    match value.trim() {
        "5" | "5.0" | "5.00" | "5.000" => Ok(PointScale::FivePoint),
        "4" | "4.0" | "4.00" | "4.000" => {
            Err(ConfigError::Unsupported("The 4.000 point scale".into()))
        }
        other => Err(ConfigError::InvalidValue {
            key: "point_scale".into(),
            message: format!("`{other}` (expected 5.000)"),
        }),
    }
}

fn parse_grading_system(value: &str) -> Result<GradingSystem, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Ok(GradingSystem::Normal),
        "curve" => Err(ConfigError::Unsupported("Curve grading".into())),
        other => Err(ConfigError::InvalidValue {
            key: "grading_system".into(),
            message: format!("`{other}` (expected normal)"),
        }),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.into(),
            message: format!("`{other}` (expected on or off)"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_five_point_normal_system() {
        let config = Config::default();
        assert_eq!(config.point_scale, PointScale::FivePoint);
        assert_eq!(config.grading_system, GradingSystem::Normal);
        assert_eq!(config.score_policy, CanonicalScorePolicy::UpperBound);
        assert_eq!(config.grade_scale(), GradeScale::default());
    }

    #[test]
    fn disabled_systems_are_reported_as_unsupported() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_value("point_scale", "4.000"),
            Err(ConfigError::Unsupported(_))
        ));
        assert!(matches!(
            config.set_value("grading_system", "curve"),
            Err(ConfigError::Unsupported(_))
        ));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn policy_and_flags_are_settable() {
        let mut config = Config::default();
        config.set_value("score_policy", "midpoint").unwrap();
        config.set_value("QUIET", "on").unwrap();
        assert_eq!(config.score_policy, CanonicalScorePolicy::Midpoint);
        assert!(config.quiet);
        assert!(matches!(
            config.set_value("theme", "dark"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(config.set_value("quiet", "maybe").is_err());
    }

    #[test]
    fn entries_cover_every_key() {
        let keys: Vec<&str> = Config::default().entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, Config::KEYS);
    }
}
