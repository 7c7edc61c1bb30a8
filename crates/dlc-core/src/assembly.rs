//! Table assembly from the parameter bundle and the custom DLC list

use crate::catalog::{self, Applicability, VmeanSpec, EXTREME_GUST_DURATION, EXTREME_GUST_SEEDS};
use crate::error::Result;
use crate::session::{check_min, Parameters, DURATION_RANGE, SEEDS_RANGE};
use crate::table::{LoadCaseRow, LoadCaseTable};
use serde::{Deserialize, Serialize};

/// Fields of the "add custom DLC" form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomDlcForm {
    pub code: String,
    pub kind: String,
    /// Free text, e.g. "8" or "6–24"
    pub vmean: String,
    pub seeds: u32,
    pub duration: u32,
    pub fault: Applicability,
    pub grid_loss: Applicability,
}

impl Default for CustomDlcForm {
    fn default() -> Self {
        Self {
            code: "X.1".to_string(),
            kind: "Custom".to_string(),
            vmean: "12".to_string(),
            seeds: 6,
            duration: 600,
            fault: Applicability::No,
            grid_loss: Applicability::No,
        }
    }
}

/// Build the load case table
///
/// Selected predefined DLCs come first in catalog order, followed by the
/// custom rows in submission order. No deduplication is done.
pub fn assemble(params: &Parameters, custom: &[LoadCaseRow]) -> LoadCaseTable {
    let mut rows = Vec::with_capacity(params.selected.len() + custom.len());

    for dlc in catalog::catalog().iter().filter(|d| params.is_selected(d.code)) {
        let vmean = match dlc.vmean {
            VmeanSpec::Range => params.wind_speed.to_string(),
            VmeanSpec::Literal(v) => v.to_string(),
        };

        let (seeds, duration) = if dlc.is_extreme_gust() {
            (EXTREME_GUST_SEEDS, EXTREME_GUST_DURATION)
        } else {
            (params.seeds, params.duration)
        };

        rows.push(LoadCaseRow::new(
            dlc.code,
            dlc.kind,
            vmean,
            seeds,
            duration,
            dlc.fault,
            dlc.grid_loss,
            params.climate_for(Some(dlc.code)),
        ));
    }

    let predefined = rows.len();
    rows.extend(custom.iter().cloned());

    log::debug!(
        "assembled {} rows ({} predefined, {} custom)",
        rows.len(),
        predefined,
        custom.len()
    );

    LoadCaseTable::new(rows)
}

/// Append a custom DLC using the climate active at submission time
///
/// Codes that collide with a catalog entry or an earlier custom DLC are kept.
pub fn submit_custom<'a>(
    form: &CustomDlcForm,
    params: &Parameters,
    custom: &'a mut Vec<LoadCaseRow>,
) -> Result<&'a LoadCaseRow> {
    check_min("custom seeds", form.seeds, SEEDS_RANGE.0)?;
    check_min("custom duration", form.duration, DURATION_RANGE.0)?;

    if catalog::find(&form.code).is_some() || custom.iter().any(|r| r.code == form.code) {
        log::warn!("custom DLC '{}' duplicates an existing code", form.code);
    }

    let row = LoadCaseRow::new(
        form.code.clone(),
        form.kind.clone(),
        form.vmean.clone(),
        form.seeds,
        form.duration,
        form.fault,
        form.grid_loss,
        params.climate_for(None),
    );

    let index = custom.len();
    custom.push(row);
    log::info!("custom DLC '{}' added", form.code);
    Ok(&custom[index])
}
