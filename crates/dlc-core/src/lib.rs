//! dlc-core: Core library for IEC 61400-1 SSLA load case matrices
//!
//! This library provides functionality to:
//! - Resolve climate parameters from wind/turbulence classes or advanced overrides
//! - Assemble the design load case table from the predefined catalog and custom DLCs
//! - Export the table as an Excel workbook, a Bladed CSV or a Flex5 text file
//! - Store the parameter bundle and custom DLCs in a session file

pub mod assembly;
pub mod catalog;
pub mod climate;
pub mod error;
pub mod export;
pub mod session;
pub mod table;

pub use assembly::{assemble, submit_custom, CustomDlcForm};
pub use catalog::{catalog, Applicability, PredefinedDlc, VmeanSpec};
pub use climate::{
    resolve_climate, ClimateOverrides, EffectiveClimate, TurbineType, TurbulenceClass, WindClass,
};
pub use error::{Error, ParseValueError, Result};
pub use export::{export, ExportFormat, ExportPayload};
pub use session::{Parameters, Session, WindSpeedRange};
pub use table::{CellValue, Field, LoadCaseRow, LoadCaseTable};
