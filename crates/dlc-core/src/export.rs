//! Export of a load case table to the formats consumed by simulation tools
//!
//! - Excel: a workbook with every column, one sheet
//! - Bladed: renamed and reordered CSV
//! - Flex5: space-separated text, no header

use crate::error::{Error, ParseValueError, Result};
use crate::table::{CellValue, Field, LoadCaseTable};
use rust_xlsxwriter::Workbook;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const EXCEL_SHEET_NAME: &str = "LoadCases";

/// Bladed columns in output order with their header names
pub const BLADED_COLUMNS: [(Field, &str); 11] = [
    (Field::Dlc, "Case"),
    (Field::Vmean, "Vhub"),
    (Field::Seeds, "Seeds"),
    (Field::Duration, "Time (s)"),
    (Field::Fault, "Fault Enabled"),
    (Field::GridLoss, "Grid Loss"),
    (Field::YawError, "Yaw Error"),
    (Field::Turbulence, "TI"),
    (Field::ShearExp, "Shear Exp"),
    (Field::IecClass, "IEC Class"),
    (Field::Temperature, "Temperature"),
];

/// Flex5 columns in output order
pub const FLEX5_COLUMNS: [Field; 11] = [
    Field::Dlc,
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

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Bladed,
    Flex5,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Excel, ExportFormat::Bladed, ExportFormat::Flex5];

    pub fn filename(self) -> &'static str {
        match self {
            ExportFormat::Excel => "IEC_Load_Case_Matrix.xlsx",
            ExportFormat::Bladed => "bladed_dlc_matrix.csv",
            ExportFormat::Flex5 => "load_matrix_flex5.txt",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Bladed => "text/csv",
            ExportFormat::Flex5 => "text/plain",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Excel => "Excel",
            ExportFormat::Bladed => "Bladed",
            ExportFormat::Flex5 => "Flex5",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = ParseValueError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "bladed" | "csv" => Ok(ExportFormat::Bladed),
            "flex5" | "txt" => Ok(ExportFormat::Flex5),
            _ => Err(ParseValueError::new("format", s.trim(), "excel, bladed, flex5")),
        }
    }
}

/// A serialized table ready to be offered for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub filename: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportPayload {
    /// Write the payload into `dir` under its fixed filename
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(self.filename);
        fs::write(&path, &self.bytes)?;
        log::info!("wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Serialize a table in the given format
pub fn export(table: &LoadCaseTable, format: ExportFormat) -> Result<ExportPayload> {
    let bytes = match format {
        ExportFormat::Excel => to_excel(table)?,
        ExportFormat::Bladed => to_bladed_csv(table)?,
        ExportFormat::Flex5 => to_flex5(table).into_bytes(),
    };

    log::debug!("exported {} rows as {}", table.row_count(), format);

    Ok(ExportPayload {
        filename: format.filename(),
        content_type: format.content_type(),
        bytes,
    })
}

/// Workbook with one sheet, a header row and every column
pub fn to_excel(table: &LoadCaseTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXCEL_SHEET_NAME)?;

    for (col, field) in Field::ALL.iter().enumerate() {
        worksheet.write_string(0, col as u16, field.name())?;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, field) in Field::ALL.iter().enumerate() {
            let col = col as u16;
            match row.get(*field) {
                CellValue::Integer(v) => worksheet.write_number(r, col, v as f64)?,
                CellValue::Float(v) => worksheet.write_number(r, col, v)?,
                CellValue::String(s) => worksheet.write_string(r, col, s)?,
            };
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Bladed CSV with renamed, reordered columns and a header row
pub fn to_bladed_csv(table: &LoadCaseTable) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(BLADED_COLUMNS.iter().map(|(_, name)| *name))?;
    for row in &table.rows {
        writer.write_record(
            BLADED_COLUMNS
                .iter()
                .map(|(field, _)| row.get(*field).to_string()),
        )?;
    }

    writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}

/// Flex5 lines: values joined by single spaces, no header
///
/// Values are not quoted; one containing whitespace shifts the columns of
/// its line for any reader that splits on spaces.
pub fn to_flex5(table: &LoadCaseTable) -> String {
    table
        .rows
        .iter()
        .map(|row| {
            let values: Vec<String> = FLEX5_COLUMNS
                .iter()
                .map(|field| row.get(*field).to_string())
                .collect();
            if let Some(v) = values.iter().find(|v| v.chars().any(char::is_whitespace)) {
                log::warn!(
                    "Flex5 value '{}' in DLC '{}' contains whitespace and will not split cleanly",
                    v,
                    row.code
                );
            }
            values.join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::{assemble, submit_custom, CustomDlcForm};
    use crate::catalog::Applicability;
    use crate::climate::{EffectiveClimate, WindClass};
    use crate::session::Parameters;
    use crate::table::LoadCaseRow;

    fn power_production_row() -> LoadCaseRow {
        LoadCaseRow::new(
            "1.1",
            "Power Prod",
            "6–24",
            6,
            600,
            Applicability::No,
            Applicability::No,
            EffectiveClimate {
                yaw_error: "5".to_string(),
                turbulence: 0.18,
                shear_exp: 0.14,
                iec_class: WindClass::I,
                temperature: "15".to_string(),
            },
        )
    }

    fn session_table() -> LoadCaseTable {
        let params = Parameters::default();
        let mut custom = Vec::new();
        let form = CustomDlcForm {
            kind: "Custom, gusty".to_string(),
            ..Default::default()
        };
        submit_custom(&form, &params, &mut custom).unwrap();
        assemble(&params, &custom)
    }

    #[test]
    fn test_flex5_line() {
        let table = LoadCaseTable::new(vec![power_production_row()]);
        assert_eq!(to_flex5(&table), "1.1 6–24 6 600 No No 5 0.18 0.14 I 15");
    }

    #[test]
    fn test_flex5_no_header_or_trailing_newline() {
        let table = session_table();
        let text = to_flex5(&table);
        assert_eq!(text.lines().count(), table.row_count());
        assert!(!text.ends_with('\n'));
        assert!(text.lines().last().unwrap().starts_with("X.1 12 6 600"));
        assert!(text.lines().any(|l| l == "6.4 50-year Gust 1 60 N/A N/A 0 0.18 0.14 I 15"));
    }

    #[test]
    fn test_bladed_header() {
        let bytes = to_bladed_csv(&session_table()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text.lines().next().unwrap(),
            "Case,Vhub,Seeds,Time (s),Fault Enabled,Grid Loss,Yaw Error,TI,Shear Exp,IEC Class,Temperature"
        );
    }

    #[test]
    fn test_bladed_rows() {
        let table = LoadCaseTable::new(vec![power_production_row()]);
        let text = String::from_utf8(to_bladed_csv(&table).unwrap()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "1.1,6–24,6,600,No,No,5,0.18,0.14,I,15");
    }

    #[test]
    fn test_bladed_reads_back_with_csv() {
        let mut table = LoadCaseTable::new(vec![power_production_row()]);
        table.rows[0].yaw_error = "5,5".to_string();
        let bytes = to_bladed_csv(&table).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[6], "5,5");
        assert_eq!(record.len(), BLADED_COLUMNS.len());
    }

    #[test]
    fn test_export_payload_metadata() {
        let table = session_table();
        let csv = export(&table, ExportFormat::Bladed).unwrap();
        assert_eq!(csv.filename, "bladed_dlc_matrix.csv");
        assert_eq!(csv.content_type, "text/csv");

        let txt = export(&table, ExportFormat::Flex5).unwrap();
        assert_eq!(txt.filename, "load_matrix_flex5.txt");
        assert_eq!(txt.content_type, "text/plain");

        let xlsx = export(&table, ExportFormat::Excel).unwrap();
        assert_eq!(xlsx.filename, "IEC_Load_Case_Matrix.xlsx");
        assert!(xlsx.bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_excel_sheet_and_header() {
        use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};

        let table = session_table();
        let bytes = to_excel(&table).unwrap();
        let mut workbook: Xlsx<_> = open_workbook_from_rs(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec![EXCEL_SHEET_NAME.to_string()]);

        let range = workbook.worksheet_range(EXCEL_SHEET_NAME).unwrap();
        let rows: Vec<_> = range.rows().collect();
        assert_eq!(rows.len(), table.row_count() + 1);

        let header: Vec<String> = rows[0].iter().map(|c| c.to_string()).collect();
        let expected: Vec<String> = Field::ALL.iter().map(|f| f.name().to_string()).collect();
        assert_eq!(header, expected);

        let gust = rows
            .iter()
            .find(|r| r[0] == Data::String("6.4".to_string()))
            .unwrap();
        assert_eq!(gust[3], Data::Float(1.0));
        assert_eq!(gust[4], Data::Float(60.0));
        assert_eq!(gust[2], Data::String("50-year Gust".to_string()));
        assert_eq!(gust[8], Data::Float(0.18));

        let custom = rows.last().unwrap();
        assert_eq!(custom[1], Data::String("Custom, gusty".to_string()));
    }

    #[test]
    fn test_text_exports_are_idempotent() {
        let table = session_table();
        let before = table.clone();
        for format in [ExportFormat::Bladed, ExportFormat::Flex5] {
            let a = export(&table, format).unwrap();
            let b = export(&table, format).unwrap();
            assert_eq!(a.bytes, b.bytes);
        }
        assert_eq!(table, before);
    }

    #[test]
    fn test_empty_table() {
        let table = LoadCaseTable::default();
        assert_eq!(to_flex5(&table), "");
        let text = String::from_utf8(to_bladed_csv(&table).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(to_excel(&table).is_ok());
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let payload = export(&session_table(), ExportFormat::Flex5).unwrap();
        let path = payload.write_to(dir.path().join("out")).unwrap();
        assert!(path.ends_with("load_matrix_flex5.txt"));
        assert_eq!(fs::read(path).unwrap(), payload.bytes);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("Bladed".parse::<ExportFormat>().unwrap(), ExportFormat::Bladed);
        assert_eq!("FLEX5".parse::<ExportFormat>().unwrap(), ExportFormat::Flex5);
        assert_eq!("xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert!("json".parse::<ExportFormat>().is_err());
    }
}
