//! Climate parameter resolution
//!
//! Turns the class selection plus the optional advanced overrides into the
//! five climate fields attached to every load case row.

use crate::error::ParseValueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Temperature (°C) used when advanced mode is off
pub const DEFAULT_TEMPERATURE: &str = "15";

/// Yaw error used for codes without a catalog default
pub const FALLBACK_YAW_ERROR: &str = "0";

/// Yaw error pre-filled in the advanced override form
pub const DEFAULT_OVERRIDE_YAW_ERROR: &str = "5";

/// IEC wind class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindClass {
    #[default]
    I,
    II,
    III,
}

impl WindClass {
    /// Wind shear exponent (α) for this class
    pub fn shear_exponent(self) -> f64 {
        match self {
            WindClass::I => 0.14,
            WindClass::II => 0.20,
            WindClass::III => 0.30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WindClass::I => "I",
            WindClass::II => "II",
            WindClass::III => "III",
        }
    }
}

impl fmt::Display for WindClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindClass {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "I" => Ok(WindClass::I),
            "II" => Ok(WindClass::II),
            "III" => Ok(WindClass::III),
            other => Err(ParseValueError::new("wind class", other, "I, II, III")),
        }
    }
}

/// IEC turbulence class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TurbulenceClass {
    #[default]
    A,
    B,
    C,
}

impl TurbulenceClass {
    /// Reference turbulence intensity for this class
    pub fn intensity(self) -> f64 {
        match self {
            TurbulenceClass::A => 0.18,
            TurbulenceClass::B => 0.14,
            TurbulenceClass::C => 0.10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TurbulenceClass::A => "A",
            TurbulenceClass::B => "B",
            TurbulenceClass::C => "C",
        }
    }
}

impl fmt::Display for TurbulenceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TurbulenceClass {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(TurbulenceClass::A),
            "B" => Ok(TurbulenceClass::B),
            "C" => Ok(TurbulenceClass::C),
            _ => Err(ParseValueError::new("turbulence class", s.trim(), "A, B, C")),
        }
    }
}

/// Turbine installation type (recorded, not used by the matrix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurbineType {
    #[default]
    Onshore,
    Offshore,
    Floating,
}

impl fmt::Display for TurbineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TurbineType::Onshore => "Onshore",
            TurbineType::Offshore => "Offshore",
            TurbineType::Floating => "Floating",
        })
    }
}

impl FromStr for TurbineType {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onshore" => Ok(TurbineType::Onshore),
            "offshore" => Ok(TurbineType::Offshore),
            "floating" => Ok(TurbineType::Floating),
            _ => Err(ParseValueError::new(
                "turbine type",
                s.trim(),
                "Onshore, Offshore, Floating",
            )),
        }
    }
}

/// Default yaw error for a DLC code when advanced mode is off
pub fn default_yaw_error(code: &str) -> &'static str {
    match code {
        "1.1" | "1.2" | "1.3" | "1.4" | "2.1" | "2.4" => "5",
        "3.1" | "4.1" => "3",
        "6.4" => "0",
        _ => FALLBACK_YAW_ERROR,
    }
}

/// Values entered in the advanced climate form
///
/// Unset fields fall back to what the form pre-fills for the current
/// class selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateOverrides {
    /// Yaw error in degrees, free text
    pub yaw_error: Option<String>,
    pub turbulence: Option<f64>,
    pub shear_exp: Option<f64>,
    /// Temperature in °C, free text
    pub temperature: Option<String>,
    pub iec_class: Option<WindClass>,
}

impl ClimateOverrides {
    /// Fill unset fields from the class defaults
    pub fn effective(&self, wind: WindClass, turbulence: TurbulenceClass) -> EffectiveClimate {
        EffectiveClimate {
            yaw_error: self
                .yaw_error
                .clone()
                .unwrap_or_else(|| DEFAULT_OVERRIDE_YAW_ERROR.to_string()),
            turbulence: self.turbulence.unwrap_or_else(|| turbulence.intensity()),
            shear_exp: self.shear_exp.unwrap_or_else(|| wind.shear_exponent()),
            iec_class: self.iec_class.unwrap_or(wind),
            temperature: self
                .temperature
                .clone()
                .unwrap_or_else(|| DEFAULT_TEMPERATURE.to_string()),
        }
    }
}

/// Climate fields attached to a single row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveClimate {
    pub yaw_error: String,
    pub turbulence: f64,
    pub shear_exp: f64,
    pub iec_class: WindClass,
    pub temperature: String,
}

/// Resolve the climate for one row
///
/// With advanced mode on, the overrides apply to every row alike. Otherwise
/// the yaw error comes from the per-code table (`code` is `None` for custom
/// rows) and the rest from the class tables.
pub fn resolve_climate(
    wind: WindClass,
    turbulence: TurbulenceClass,
    advanced: bool,
    overrides: &ClimateOverrides,
    code: Option<&str>,
) -> EffectiveClimate {
    if advanced {
        return overrides.effective(wind, turbulence);
    }

    EffectiveClimate {
        yaw_error: code
            .map(default_yaw_error)
            .unwrap_or(FALLBACK_YAW_ERROR)
            .to_string(),
        turbulence: turbulence.intensity(),
        shear_exp: wind.shear_exponent(),
        iec_class: wind,
        temperature: DEFAULT_TEMPERATURE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_tables() {
        assert_eq!(WindClass::I.shear_exponent(), 0.14);
        assert_eq!(WindClass::II.shear_exponent(), 0.20);
        assert_eq!(WindClass::III.shear_exponent(), 0.30);
        assert_eq!(TurbulenceClass::A.intensity(), 0.18);
        assert_eq!(TurbulenceClass::B.intensity(), 0.14);
        assert_eq!(TurbulenceClass::C.intensity(), 0.10);
    }

    #[test]
    fn test_default_mode_uses_code_yaw() {
        let overrides = ClimateOverrides::default();
        let c = resolve_climate(WindClass::II, TurbulenceClass::C, false, &overrides, Some("3.1"));
        assert_eq!(c.yaw_error, "3");
        assert_eq!(c.turbulence, 0.10);
        assert_eq!(c.shear_exp, 0.20);
        assert_eq!(c.iec_class, WindClass::II);
        assert_eq!(c.temperature, "15");
    }

    #[test]
    fn test_default_mode_unlisted_code_and_custom() {
        let overrides = ClimateOverrides::default();
        let unlisted = resolve_climate(WindClass::I, TurbulenceClass::A, false, &overrides, Some("9.9"));
        let custom = resolve_climate(WindClass::I, TurbulenceClass::A, false, &overrides, None);
        assert_eq!(unlisted.yaw_error, "0");
        assert_eq!(custom.yaw_error, "0");
    }

    #[test]
    fn test_default_mode_ignores_overrides() {
        let overrides = ClimateOverrides {
            yaw_error: Some("12".to_string()),
            turbulence: Some(0.25),
            ..Default::default()
        };
        let c = resolve_climate(WindClass::I, TurbulenceClass::B, false, &overrides, Some("1.1"));
        assert_eq!(c.yaw_error, "5");
        assert_eq!(c.turbulence, 0.14);
    }

    #[test]
    fn test_advanced_mode_is_global() {
        let overrides = ClimateOverrides {
            yaw_error: Some("8".to_string()),
            turbulence: Some(0.16),
            shear_exp: Some(0.2),
            temperature: Some("-20".to_string()),
            iec_class: Some(WindClass::III),
        };
        let a = resolve_climate(WindClass::I, TurbulenceClass::A, true, &overrides, Some("1.1"));
        let b = resolve_climate(WindClass::I, TurbulenceClass::A, true, &overrides, Some("6.4"));
        let custom = resolve_climate(WindClass::I, TurbulenceClass::A, true, &overrides, None);
        assert_eq!(a, b);
        assert_eq!(a, custom);
        assert_eq!(a.yaw_error, "8");
        assert_eq!(a.iec_class, WindClass::III);
        assert_eq!(a.temperature, "-20");
    }

    #[test]
    fn test_advanced_mode_prefills_from_classes() {
        let c = resolve_climate(
            WindClass::III,
            TurbulenceClass::B,
            true,
            &ClimateOverrides::default(),
            Some("3.1"),
        );
        assert_eq!(c.yaw_error, "5");
        assert_eq!(c.turbulence, 0.14);
        assert_eq!(c.shear_exp, 0.30);
        assert_eq!(c.iec_class, WindClass::III);
        assert_eq!(c.temperature, "15");
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("II".parse::<WindClass>().unwrap(), WindClass::II);
        assert_eq!("b".parse::<TurbulenceClass>().unwrap(), TurbulenceClass::B);
        assert_eq!("floating".parse::<TurbineType>().unwrap(), TurbineType::Floating);
        assert!("IV".parse::<WindClass>().is_err());
    }
}
