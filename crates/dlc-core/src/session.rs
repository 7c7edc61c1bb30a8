//! Session parameters and custom DLC state
//!
//! A session bundles everything the input form collects plus the custom
//! DLCs submitted so far. It is owned by the caller and can be stored as a
//! JSON session file between CLI invocations.

use crate::assembly::{assemble, submit_custom, CustomDlcForm};
use crate::catalog;
use crate::climate::{
    resolve_climate, ClimateOverrides, EffectiveClimate, TurbineType, TurbulenceClass, WindClass,
};
use crate::error::{Error, Result};
use crate::table::{LoadCaseRow, LoadCaseTable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const SEEDS_RANGE: (u32, u32) = (1, 12);
pub const DURATION_RANGE: (u32, u32) = (10, 1200);
pub const WIND_SPEED_RANGE: (u32, u32) = (3, 25);

/// Mean wind speed range in m/s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindSpeedRange {
    pub low: u32,
    pub high: u32,
}

impl WindSpeedRange {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }
}

impl Default for WindSpeedRange {
    fn default() -> Self {
        Self { low: 6, high: 24 }
    }
}

impl std::fmt::Display for WindSpeedRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}–{}", self.low, self.high)
    }
}

/// The parameter bundle collected by the input form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub turbine_type: TurbineType,
    pub wind_class: WindClass,
    pub turbulence_class: TurbulenceClass,
    // Collected by the form; they do not filter the matrix.
    pub pitch_control: bool,
    pub yaw_control: bool,
    pub include_grid_loss: bool,
    pub include_faults: bool,
    pub seeds: u32,
    /// Simulation duration in seconds
    pub duration: u32,
    pub wind_speed: WindSpeedRange,
    pub advanced: bool,
    pub overrides: ClimateOverrides,
    /// Predefined DLC codes to include
    pub selected: Vec<String>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            turbine_type: TurbineType::default(),
            wind_class: WindClass::default(),
            turbulence_class: TurbulenceClass::default(),
            pitch_control: true,
            yaw_control: true,
            include_grid_loss: true,
            include_faults: true,
            seeds: 6,
            duration: 600,
            wind_speed: WindSpeedRange::default(),
            advanced: false,
            overrides: ClimateOverrides::default(),
            selected: catalog::codes(),
        }
    }
}

impl Parameters {
    /// Check the bounds the form widgets would enforce
    pub fn validate(&self) -> Result<()> {
        check_range("seeds", self.seeds, SEEDS_RANGE)?;
        check_range("duration", self.duration, DURATION_RANGE)?;
        check_range("wind speed low", self.wind_speed.low, WIND_SPEED_RANGE)?;
        check_range("wind speed high", self.wind_speed.high, WIND_SPEED_RANGE)?;
        if self.wind_speed.low > self.wind_speed.high {
            return Err(Error::InvertedWindRange {
                low: self.wind_speed.low,
                high: self.wind_speed.high,
            });
        }
        if let Some(code) = self.selected.iter().find(|c| catalog::find(c).is_none()) {
            return Err(Error::UnknownDlc(code.clone()));
        }
        Ok(())
    }

    /// Resolved climate for a predefined code, or for a custom row when `None`
    pub fn climate_for(&self, code: Option<&str>) -> EffectiveClimate {
        resolve_climate(
            self.wind_class,
            self.turbulence_class,
            self.advanced,
            &self.overrides,
            code,
        )
    }

    /// Whether a predefined code is selected
    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.iter().any(|c| c == code)
    }
}

pub(crate) fn check_range(name: &'static str, value: u32, (min, max): (u32, u32)) -> Result<()> {
    if value < min || value > max {
        return Err(Error::OutOfRange {
            name,
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        });
    }
    Ok(())
}

pub(crate) fn check_min(name: &'static str, value: u32, min: u32) -> Result<()> {
    if value < min {
        return Err(Error::BelowMinimum {
            name,
            value: i64::from(value),
            min: i64::from(min),
        });
    }
    Ok(())
}

/// A caller-owned session: current parameters and the custom DLC list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// When the session was started
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub parameters: Parameters,
    /// Custom DLCs in submission order
    #[serde(default)]
    pub custom: Vec<LoadCaseRow>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}

impl Session {
    /// Start a new session with no custom DLCs
    pub fn new(parameters: Parameters) -> Self {
        Self {
            created: Utc::now(),
            parameters,
            custom: Vec::new(),
        }
    }

    /// Load a session from a file, or start a fresh one if it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no session at {}, starting a new one", path.display());
            return Ok(Self::default());
        }

        Self::open(path)
    }

    /// Load an existing session file; a missing file is an error
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Parse a session from JSON
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(Error::Json)
    }

    /// Save the session to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Submit a custom DLC with the climate active right now
    pub fn add_custom(&mut self, form: &CustomDlcForm) -> Result<&LoadCaseRow> {
        submit_custom(form, &self.parameters, &mut self.custom)
    }

    /// Validate the parameters and assemble the current table
    pub fn table(&self) -> Result<LoadCaseTable> {
        self.parameters.validate()?;
        Ok(assemble(&self.parameters, &self.custom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        let p = Parameters::default();
        assert_eq!(p.seeds, 6);
        assert_eq!(p.duration, 600);
        assert_eq!(p.wind_speed, WindSpeedRange::new(6, 24));
        assert_eq!(p.selected.len(), 9);
        assert!(!p.advanced);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_bounds() {
        let mut p = Parameters::default();
        p.seeds = 13;
        assert!(matches!(p.validate(), Err(Error::OutOfRange { name: "seeds", .. })));

        let mut p = Parameters::default();
        p.duration = 5;
        assert!(matches!(p.validate(), Err(Error::OutOfRange { name: "duration", .. })));

        let mut p = Parameters::default();
        p.wind_speed = WindSpeedRange::new(20, 10);
        assert!(matches!(p.validate(), Err(Error::InvertedWindRange { low: 20, high: 10 })));

        let mut p = Parameters::default();
        p.selected.push("7.7".to_string());
        assert!(matches!(p.validate(), Err(Error::UnknownDlc(code)) if code == "7.7"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let session = Session::from_json(
            r#"{"created":"2024-01-01T00:00:00Z","parameters":{"wind_class":"III","seeds":3}}"#,
        )
        .unwrap();
        assert_eq!(session.parameters.wind_class, WindClass::III);
        assert_eq!(session.parameters.seeds, 3);
        assert_eq!(session.parameters.duration, 600);
        assert!(session.custom.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = Session::default();
        session.add_custom(&CustomDlcForm::default()).unwrap();
        session.save(&path).unwrap();

        let loaded = Session::load(&path).unwrap();
        assert_eq!(loaded.created, session.created);
        assert_eq!(loaded.custom.len(), 1);
        assert_eq!(loaded.custom[0].code, "X.1");
        assert_eq!(loaded.table().unwrap().row_count(), 10);
    }

    #[test]
    fn test_load_missing_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::load(dir.path().join("missing.json")).unwrap();
        assert!(session.custom.is_empty());
        assert_eq!(session.parameters, Parameters::default());
    }

    #[test]
    fn test_open_missing_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo_session.json");
        assert!(matches!(
            Session::open(&path),
            Err(Error::FileRead { path: p, .. }) if p == path
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut session = Session::default();
        session.parameters.seeds = 2;
        session.save(&path).unwrap();
        assert_eq!(Session::open(&path).unwrap().parameters.seeds, 2);
    }

    #[test]
    fn test_parameters_only_json() {
        let session = Session::from_json(r#"{"parameters":{"turbulence_class":"C"}}"#).unwrap();
        assert_eq!(session.parameters.turbulence_class, TurbulenceClass::C);
        assert!(session.custom.is_empty());
        assert!(session.created <= Utc::now());
    }

    #[test]
    fn test_table_rejects_invalid_parameters() {
        let mut session = Session::default();
        session.parameters.seeds = 0;
        assert!(session.table().is_err());
    }
}
