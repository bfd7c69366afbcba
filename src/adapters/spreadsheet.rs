use crate::domain::model::{Record, SUBJECT_INFO_COLUMN};
use crate::utils::error::{CoachError, Result};
use calamine::{Data, Reader, Xlsx};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "csv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Xlsx,
    Csv,
}

impl SpreadsheetFormat {
    /// 依副檔名判斷附件格式，只接受 .xlsx 與 .csv
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("xlsx") => Ok(SpreadsheetFormat::Xlsx),
            Some("csv") => Ok(SpreadsheetFormat::Csv),
            _ => Err(CoachError::UnsupportedFormat {
                path: path.to_string(),
            }),
        }
    }

    pub fn parse(self, data: &[u8], subject_info: Option<&str>) -> Result<Vec<Record>> {
        match self {
            SpreadsheetFormat::Xlsx => parse_xlsx(data, subject_info),
            SpreadsheetFormat::Csv => parse_csv(data, subject_info),
        }
    }
}

/// 將 CSV 內容轉成 Record，數字欄位轉成 JSON number，空白欄位為 null。
/// 有提供 subject 時會覆寫 EmailSubjectInfo 欄位。
pub fn parse_csv(data: &[u8], subject_info: Option<&str>) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();

    for row in reader.records() {
        rows.push(row?.iter().map(cell_value).collect());
    }

    Ok(build_records(&headers, rows, subject_info))
}

/// 讀取第一個工作表，第一列為欄位名稱，其餘為資料列
pub fn parse_xlsx(data: &[u8], subject_info: Option<&str>) -> Result<Vec<Record>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Err(CoachError::NoRecords),
    };

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect(),
        None => return Ok(Vec::new()),
    };

    let rows = rows
        .map(|row| row.iter().map(xlsx_cell_value).collect())
        .collect();

    Ok(build_records(&headers, rows, subject_info))
}

fn build_records(
    headers: &[String],
    rows: Vec<Vec<serde_json::Value>>,
    subject_info: Option<&str>,
) -> Vec<Record> {
    let records: Vec<Record> = rows
        .into_iter()
        .map(|row| {
            let mut data: HashMap<String, serde_json::Value> = headers
                .iter()
                .zip(row)
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, value)| (header.clone(), value))
                .collect();

            if let Some(subject) = subject_info {
                data.insert(
                    SUBJECT_INFO_COLUMN.to_string(),
                    serde_json::Value::String(subject.to_string()),
                );
            }

            Record { data }
        })
        .collect();

    tracing::debug!(
        "Parsed {} rows with columns: {:?}",
        records.len(),
        headers
    );

    records
}

fn cell_value(cell: &str) -> serde_json::Value {
    if cell.is_empty() {
        return serde_json::Value::Null;
    }

    if let Ok(n) = cell.parse::<i64>() {
        return serde_json::Value::Number(n.into());
    }

    cell.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(serde_json::Value::Number)
        .unwrap_or_else(|| serde_json::Value::String(cell.to_string()))
}

fn xlsx_cell_value(cell: &Data) -> serde_json::Value {
    match cell {
        Data::Empty => serde_json::Value::Null,
        Data::Int(n) => serde_json::Value::Number((*n).into()),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Data::Bool(b) => serde_json::Value::Bool(*b),
        // 數字存成文字的儲存格也照 CSV 規則轉換
        Data::String(s) => cell_value(s.trim()),
        other => serde_json::Value::String(other.to_string()),
    }
}
