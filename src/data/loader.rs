use std::fs::File;
use std::path::Path;

use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{LaunchRecord, LaunchTable, Outcome};
use crate::error::{DataLoadError, LoadResult};

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Path the dashboard reads when none is given on the command line.
pub const DEFAULT_DATASET: &str = "spacex_launch_dash.csv";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line (the reference format)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – scalar columns with the same names
///
/// Columns other than the four required ones are ignored.
pub fn load_file(path: &Path) -> LoadResult<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };

    log::debug!(
        "{}: {} records, payload range [{}, {}] kg",
        path.display(),
        table.len(),
        table.min_payload_mass_kg(),
        table.max_payload_mass_kg()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Cell validation shared by all formats
// ---------------------------------------------------------------------------

fn check_site(row: usize, site: &str) -> LoadResult<String> {
    let site = site.trim();
    if site.is_empty() {
        return Err(DataLoadError::invalid_value(row, COL_SITE, site, "empty site name"));
    }
    Ok(site.to_string())
}

fn check_payload(row: usize, value: Option<f64>, raw: &str) -> LoadResult<f64> {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(_) => Err(DataLoadError::invalid_value(
            row,
            COL_PAYLOAD,
            raw,
            "payload mass must be a finite, non-negative number",
        )),
        None => Err(DataLoadError::invalid_value(row, COL_PAYLOAD, raw, "not a number")),
    }
}

fn check_outcome(row: usize, value: Option<f64>, raw: &str) -> LoadResult<Outcome> {
    value
        .filter(|v| v.fract() == 0.0)
        .and_then(|v| Outcome::from_class(v as i64))
        .ok_or_else(|| DataLoadError::invalid_value(row, COL_CLASS, raw, "expected 0 or 1"))
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, comma separated, values may be
/// quoted. Whitespace around fields is trimmed.
fn load_csv(path: &Path) -> LoadResult<LaunchTable> {
    let file = File::open(path)?;
    read_csv(file)
}

fn read_csv<R: std::io::Read>(input: R) -> LoadResult<LaunchTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
    };
    let site_idx = column(COL_SITE)?;
    let payload_idx = column(COL_PAYLOAD)?;
    let class_idx = column(COL_CLASS)?;
    let booster_idx = column(COL_BOOSTER_CATEGORY)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let site = record.get(site_idx).unwrap_or("");
        let payload = record.get(payload_idx).unwrap_or("");
        let class = record.get(class_idx).unwrap_or("");
        let booster = record.get(booster_idx).unwrap_or("");

        records.push(LaunchRecord::new(
            check_site(row_no, site)?,
            check_payload(row_no, parse_number(payload), payload)?,
            check_outcome(row_no, parse_number(class), class)?,
            booster,
        ));
    }

    LaunchTable::from_records(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> LoadResult<LaunchTable> {
    let text = std::fs::read_to_string(path)?;
    parse_json(&text)
}

fn parse_json(text: &str) -> LoadResult<LaunchTable> {
    let root: JsonValue = serde_json::from_str(text)?;

    let Some(rows) = root.as_array() else {
        return Err(DataLoadError::invalid_value(
            0,
            "<root>",
            json_raw(&root),
            "expected a top-level array of records",
        ));
    };

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let Some(obj) = row.as_object() else {
            return Err(DataLoadError::invalid_value(i, "<row>", json_raw(row), "not a JSON object"));
        };
        let field = |name: &str| {
            obj.get(name)
                .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
        };

        let site = field(COL_SITE)?;
        let payload = field(COL_PAYLOAD)?;
        let class = field(COL_CLASS)?;
        let booster = field(COL_BOOSTER_CATEGORY)?;

        let Some(site_str) = site.as_str() else {
            return Err(DataLoadError::invalid_value(i, COL_SITE, json_raw(site), "not a string"));
        };
        let Some(booster_str) = booster.as_str() else {
            return Err(DataLoadError::invalid_value(
                i,
                COL_BOOSTER_CATEGORY,
                json_raw(booster),
                "not a string",
            ));
        };

        records.push(LaunchRecord::new(
            check_site(i, site_str)?,
            check_payload(i, json_number(payload), &json_raw(payload))?,
            check_outcome(i, json_number(class), &json_raw(class))?,
            booster_str,
        ));
    }

    LaunchTable::from_records(records)
}

/// Numbers may arrive as JSON numbers or as numeric strings.
fn json_number(val: &JsonValue) -> Option<f64> {
    match val {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => parse_number(s),
        _ => None,
    }
}

fn json_raw(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema: `Launch Site` and `Booster Version Category` as
/// Utf8/LargeUtf8, `Payload Mass (kg)` and `class` as any of
/// Int32/Int64/Float32/Float64. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> LoadResult<LaunchTable> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let column = |name: &str| {
            schema
                .index_of(name)
                .map(|idx| batch.column(idx))
                .map_err(|_| DataLoadError::MissingColumn(name.to_string()))
        };
        let site_col = column(COL_SITE)?;
        let payload_col = column(COL_PAYLOAD)?;
        let class_col = column(COL_CLASS)?;
        let booster_col = column(COL_BOOSTER_CATEGORY)?;

        for row in 0..batch.num_rows() {
            let row_no = row_offset + row;

            let site = string_cell(site_col, row)
                .ok_or_else(|| cell_error(site_col, row_no, COL_SITE))?;
            let booster = string_cell(booster_col, row)
                .ok_or_else(|| cell_error(booster_col, row_no, COL_BOOSTER_CATEGORY))?;
            let payload = number_cell(payload_col, row);
            let class = number_cell(class_col, row);

            records.push(LaunchRecord::new(
                check_site(row_no, &site)?,
                check_payload(row_no, payload, &raw_cell(payload))?,
                check_outcome(row_no, class, &raw_cell(class))?,
                booster,
            ));
        }

        row_offset += batch.num_rows();
    }

    LaunchTable::from_records(records)
}

// -- Parquet / Arrow helpers --

/// Read a string cell from a Utf8 or LargeUtf8 column. `None` for nulls and
/// for columns of any other type.
fn string_cell(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row).to_string()),
        DataType::LargeUtf8 => col
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .map(|s| s.value(row).to_string()),
        _ => None,
    }
}

/// Read a numeric cell as `f64` from an integer or float column.
fn number_cell(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| f64::from(a.value(row))),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| f64::from(a.value(row))),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        _ => None,
    }
}

fn raw_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "<null>".to_string(), |v| v.to_string())
}

fn cell_error(col: &ArrayRef, row: usize, column: &str) -> DataLoadError {
    let raw = if col.is_null(row) {
        "<null>".to_string()
    } else {
        format!("{:?}", col.data_type())
    };
    DataLoadError::invalid_value(row, column, raw, "expected a string")
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str = "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category";

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_csv_loads_required_columns() {
        let csv = format!(
            "{HEADER}\n\
             1,CCAFS LC-40,0,0,F9 v1.0  B0003,v1.0\n\
             2,CCAFS LC-40,1,525,F9 v1.0  B0005,v1.0\n\
             3,KSC LC-39A,1,5300.5,F9 FT B1031.1,FT\n"
        );
        let file = write_temp(".csv", &csv);
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.min_payload_mass_kg(), 0.0);
        assert_eq!(table.max_payload_mass_kg(), 5300.5);
        let first = &table.records()[0];
        assert_eq!(first.site_name, "CCAFS LC-40");
        assert_eq!(first.outcome, Outcome::Failure);
        assert_eq!(first.booster_category, "v1.0");
        assert_eq!(table.records()[2].booster_category, "FT");
    }

    #[test]
    fn test_csv_column_order_irrelevant() {
        let csv = "Booster Version Category,class,Launch Site,Payload Mass (kg)\n\
                   B5, 1 ,\"VAFB SLC-4E\",9600.0\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        let rec = &table.records()[0];
        assert_eq!(rec.site_name, "VAFB SLC-4E");
        assert_eq!(rec.payload_mass_kg, 9600.0);
        assert_eq!(rec.outcome, Outcome::Success);
        assert_eq!(rec.booster_category, "B5");
    }

    #[test]
    fn test_csv_missing_column() {
        let csv = "Launch Site,class,Payload Mass (kg)\nKSC LC-39A,1,500\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        match err {
            DataLoadError::MissingColumn(col) => assert_eq!(col, COL_BOOSTER_CATEGORY),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_csv_invalid_class() {
        let csv = format!("{HEADER}\n1,KSC LC-39A,2,500,F9 FT,FT\n");
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::InvalidValue { row: 0, ref column, .. } if column == COL_CLASS
        ));
    }

    #[test]
    fn test_csv_fractional_class_rejected() {
        let csv = format!("{HEADER}\n1,KSC LC-39A,1.5,500,F9 FT,FT\n");
        assert!(read_csv(csv.as_bytes()).is_err());
        let csv = format!("{HEADER}\n1,KSC LC-39A,1.0,500,F9 FT,FT\n");
        assert_eq!(read_csv(csv.as_bytes()).unwrap().records()[0].outcome, Outcome::Success);
    }

    #[test]
    fn test_csv_negative_payload_rejected() {
        let csv = format!("{HEADER}\n1,KSC LC-39A,1,-5,F9 FT,FT\n");
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains(COL_PAYLOAD));
    }

    #[test]
    fn test_csv_header_only_is_empty() {
        let csv = format!("{HEADER}\n");
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::Empty));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".xlsx", "whatever");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedFormat(ref ext) if ext == "xlsx"));
    }

    #[test]
    fn test_json_records() {
        let json = r#"[
            {"Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 500, "class": 1, "Booster Version Category": "v1.0", "Flight Number": 1},
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": "2500.5", "class": 0, "Booster Version Category": "FT"}
        ]"#;
        let file = write_temp(".json", json);
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].payload_mass_kg, 2500.5);
        assert_eq!(table.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn test_json_missing_column() {
        let json = r#"[{"Launch Site": "KSC LC-39A", "class": 1, "Booster Version Category": "FT"}]"#;
        let err = parse_json(json).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(ref c) if c == COL_PAYLOAD));
    }

    #[test]
    fn test_json_not_an_array() {
        assert!(matches!(
            parse_json(r#"{"Launch Site": "x"}"#),
            Err(DataLoadError::InvalidValue { .. })
        ));
        assert!(matches!(parse_json("[1, 2"), Err(DataLoadError::Json(_))));
    }

    #[test]
    fn test_parquet_roundtrip_mixed_numeric_types() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS LC-40", "VAFB SLC-4E"])),
                Arc::new(Float64Array::from(vec![500.0, 9600.0])),
                Arc::new(Int64Array::from(vec![0, 1])),
                Arc::new(StringArray::from(vec!["v1.0", "B5"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].outcome, Outcome::Failure);
        assert_eq!(table.records()[1].site_name, "VAFB SLC-4E");
        assert_eq!(table.max_payload_mass_kg(), 9600.0);
    }

    #[test]
    fn test_parquet_missing_column() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD, DataType::Int32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["KSC LC-39A"])),
                Arc::new(Int32Array::from(vec![500])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(ref c) if c == COL_CLASS));
    }
}
