//! Load case table types

use crate::catalog::Applicability;
use crate::climate::{EffectiveClimate, WindClass};
use serde::{Deserialize, Serialize};

/// A single load case, predefined or custom
///
/// Every column is a typed field, so no row can be missing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCaseRow {
    #[serde(rename = "DLC")]
    pub code: String,
    #[serde(rename = "Type")]
    pub kind: String,
    /// Literal value, keyword or "lo–hi" range
    #[serde(rename = "Vmean")]
    pub vmean: String,
    #[serde(rename = "Seeds")]
    pub seeds: u32,
    /// Simulation length in seconds
    #[serde(rename = "Duration")]
    pub duration: u32,
    #[serde(rename = "Fault")]
    pub fault: Applicability,
    #[serde(rename = "Grid Loss")]
    pub grid_loss: Applicability,
    #[serde(rename = "YawError")]
    pub yaw_error: String,
    #[serde(rename = "Turbulence")]
    pub turbulence: f64,
    #[serde(rename = "ShearExp")]
    pub shear_exp: f64,
    #[serde(rename = "IEC Class")]
    pub iec_class: WindClass,
    #[serde(rename = "Temperature")]
    pub temperature: String,
}

impl LoadCaseRow {
    /// Attach resolved climate fields to the run fields of a row
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        code: impl Into<String>,
        kind: impl Into<String>,
        vmean: impl Into<String>,
        seeds: u32,
        duration: u32,
        fault: Applicability,
        grid_loss: Applicability,
        climate: EffectiveClimate,
    ) -> Self {
        Self {
            code: code.into(),
            kind: kind.into(),
            vmean: vmean.into(),
            seeds,
            duration,
            fault,
            grid_loss,
            yaw_error: climate.yaw_error,
            turbulence: climate.turbulence,
            shear_exp: climate.shear_exp,
            iec_class: climate.iec_class,
            temperature: climate.temperature,
        }
    }

    /// The climate part of this row
    pub fn climate(&self) -> EffectiveClimate {
        EffectiveClimate {
            yaw_error: self.yaw_error.clone(),
            turbulence: self.turbulence,
            shear_exp: self.shear_exp,
            iec_class: self.iec_class,
            temperature: self.temperature.clone(),
        }
    }

    /// Cell value of one column
    pub fn get(&self, field: Field) -> CellValue {
        match field {
            Field::Dlc => CellValue::String(self.code.clone()),
            Field::Type => CellValue::String(self.kind.clone()),
            Field::Vmean => CellValue::String(self.vmean.clone()),
            Field::Seeds => CellValue::Integer(i64::from(self.seeds)),
            Field::Duration => CellValue::Integer(i64::from(self.duration)),
            Field::Fault => CellValue::String(self.fault.to_string()),
            Field::GridLoss => CellValue::String(self.grid_loss.to_string()),
            Field::YawError => CellValue::String(self.yaw_error.clone()),
            Field::Turbulence => CellValue::Float(self.turbulence),
            Field::ShearExp => CellValue::Float(self.shear_exp),
            Field::IecClass => CellValue::String(self.iec_class.to_string()),
            Field::Temperature => CellValue::String(self.temperature.clone()),
        }
    }
}

/// Column of a load case table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Dlc,
    Type,
    Vmean,
    Seeds,
    Duration,
    Fault,
    GridLoss,
    YawError,
    Turbulence,
    ShearExp,
    IecClass,
    Temperature,
}

impl Field {
    /// All columns in table order
    pub const ALL: [Field; 12] = [
        Field::Dlc,
        Field::Type,
        Field::Vmean,
        Field::Seeds,
        Field::Duration,
        Field::Fault,
        Field::GridLoss,
        Field::YawError,
        Field::Turbulence,
        Field::ShearExp,
        Field::IecClass,
        Field::Temperature,
    ];

    /// Column header as stored in the table
    pub fn name(self) -> &'static str {
        match self {
            Field::Dlc => "DLC",
            Field::Type => "Type",
            Field::Vmean => "Vmean",
            Field::Seeds => "Seeds",
            Field::Duration => "Duration",
            Field::Fault => "Fault",
            Field::GridLoss => "Grid Loss",
            Field::YawError => "YawError",
            Field::Turbulence => "Turbulence",
            Field::ShearExp => "ShearExp",
            Field::IecClass => "IEC Class",
            Field::Temperature => "Temperature",
        }
    }
}

/// A typed cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    String(String),
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(fl) => f.write_str(&format_float(*fl)),
            CellValue::String(s) => f.write_str(s),
        }
    }
}

/// Float text in the `repr` style of the tools reading these files
///
/// Shortest round-trip digits; ".0" is kept on integral values, and
/// exponent form ("1e+20", "1e-07") is used below 1e-4 and from 1e16 up.
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string().to_lowercase();
    }

    let sci = format!("{:e}", value);
    if let Some((mantissa, exp)) = sci.split_once('e') {
        if let Ok(exp) = exp.parse::<i32>() {
            if value != 0.0 && !(-4..16).contains(&exp) {
                let sign = if exp < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exp.abs());
            }
        }
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// The assembled matrix: predefined rows followed by custom rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadCaseTable {
    pub rows: Vec<LoadCaseRow>,
}

impl LoadCaseTable {
    pub fn new(rows: Vec<LoadCaseRow>) -> Self {
        Self { rows }
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
