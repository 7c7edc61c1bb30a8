//! Predefined SSLA design load cases

use crate::error::ParseValueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vmean keyword of the parked extreme case
pub const EXTREME_GUST: &str = "50-year Gust";

/// Seeds forced on the extreme gust case
pub const EXTREME_GUST_SEEDS: u32 = 1;

/// Duration (s) forced on the extreme gust case
pub const EXTREME_GUST_DURATION: u32 = 60;

/// Yes/No/N/A flag used for the fault and grid-loss columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Applicability {
    Yes,
    #[default]
    No,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Applicability {
    pub fn as_str(self) -> &'static str {
        match self {
            Applicability::Yes => "Yes",
            Applicability::No => "No",
            Applicability::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Applicability {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Applicability::Yes),
            "no" => Ok(Applicability::No),
            "n/a" | "na" => Ok(Applicability::NotApplicable),
            _ => Err(ParseValueError::new("flag", s.trim(), "Yes, No, N/A")),
        }
    }
}

/// How a catalog entry specifies its mean wind speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmeanSpec {
    /// Use the selected mean wind speed range
    Range,
    /// Fixed value or keyword, copied verbatim
    Literal(&'static str),
}

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredefinedDlc {
    pub code: &'static str,
    pub kind: &'static str,
    pub vmean: VmeanSpec,
    pub fault: Applicability,
    pub grid_loss: Applicability,
}

impl PredefinedDlc {
    /// Whether this is the parked extreme gust case
    pub fn is_extreme_gust(&self) -> bool {
        self.vmean == VmeanSpec::Literal(EXTREME_GUST)
    }
}

const fn entry(
    code: &'static str,
    kind: &'static str,
    vmean: VmeanSpec,
    fault: Applicability,
    grid_loss: Applicability,
) -> PredefinedDlc {
    PredefinedDlc {
        code,
        kind,
        vmean,
        fault,
        grid_loss,
    }
}

use Applicability::{No, NotApplicable, Yes};
use VmeanSpec::{Literal, Range};

static CATALOG: [PredefinedDlc; 9] = [
    entry("1.1", "Power Prod", Range, No, No),
    entry("1.2", "EOG", Literal("Vref"), No, No),
    entry("1.3", "EWS", Literal("Vhub"), No, No),
    entry("1.4", "Turbulence Faults", Literal("Vhub"), Yes, No),
    entry("2.1", "Fault During Operation", Literal("Vhub"), Yes, No),
    entry("2.4", "Grid Loss", Literal("Vhub"), No, Yes),
    entry("3.1", "Start-up", Literal("10"), No, No),
    entry("4.1", "Shut-down", Literal("10"), No, No),
    entry("6.4", "Parked (extreme)", Literal(EXTREME_GUST), NotApplicable, NotApplicable),
];

/// All predefined DLCs in catalog order
pub fn catalog() -> &'static [PredefinedDlc] {
    &CATALOG
}

/// Look up a catalog entry by code
pub fn find(code: &str) -> Option<&'static PredefinedDlc> {
    CATALOG.iter().find(|d| d.code == code)
}

/// All catalog codes in catalog order
pub fn codes() -> Vec<String> {
    CATALOG.iter().map(|d| d.code.to_string()).collect()
}
