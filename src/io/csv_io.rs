use std::io::Read;
use std::path::Path;

use crate::analysis::FilteredView;
use crate::error::{DashboardError, LoadError};
use crate::models::{Column, Dataset, Record};

use super::RowPolicy;

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers);
    builder
}

/// Fail with every required column the header row lacks.
fn check_headers(headers: &csv::StringRecord) -> Result<(), LoadError> {
    let missing: Vec<String> = Column::ALL
        .iter()
        .map(|c| c.header())
        .filter(|name| !headers.iter().any(|h| h == *name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let extra: Vec<&str> = headers
        .iter()
        .filter(|h| !Column::ALL.iter().any(|c| c.header() == *h))
        .collect();
    if !extra.is_empty() {
        tracing::debug!(columns = ?extra, "ignoring extra columns");
    }
    Ok(())
}

fn parse_csv_records<R: Read>(
    rdr: &mut csv::Reader<R>,
    policy: RowPolicy,
) -> Result<(Vec<Record>, usize), LoadError> {
    let headers = rdr.headers()?.clone();
    check_headers(&headers)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.records() {
        // Structural CSV errors (bad quoting, invalid UTF-8) are always fatal
        let raw = result?;
        let line = raw.position().map_or(0, |p| p.line());

        // Text fields are kept verbatim; numeric fields trim inside their deserializers
        let parsed = if raw.len() != headers.len() {
            Err(format!(
                "expected {} fields, found {}",
                headers.len(),
                raw.len()
            ))
        } else {
            raw.deserialize::<Record>(Some(&headers))
                .map_err(|e| e.to_string())
                .and_then(|record| record.validate().map(|_| record))
        };

        match parsed {
            Ok(record) => records.push(record),
            Err(message) => match policy {
                RowPolicy::Strict => return Err(LoadError::MalformedRow { line, message }),
                RowPolicy::Lenient => {
                    tracing::warn!(line, %message, "skipping malformed row");
                    skipped += 1;
                }
            },
        }
    }

    Ok((records, skipped))
}

/// Read the salary dataset from a CSV file.
pub fn read_csv(path: impl AsRef<Path>, policy: RowPolicy) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let mut rdr = reader_builder().from_path(path)?;
    let (records, skipped) = parse_csv_records(&mut rdr, policy)?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    Ok(Dataset::new(name, records).with_skipped_rows(skipped))
}

/// Read the salary dataset from CSV bytes.
pub fn read_csv_from_bytes(
    data: &[u8],
    name: &str,
    policy: RowPolicy,
) -> Result<Dataset, LoadError> {
    let mut rdr = reader_builder().from_reader(data);
    let (records, skipped) = parse_csv_records(&mut rdr, policy)?;
    Ok(Dataset::new(name, records).with_skipped_rows(skipped))
}

/// Serialize a filtered view to CSV bytes.
///
/// The header row is always written, even for an empty view, and columns
/// follow the canonical dataset order.
pub fn to_csv(view: &FilteredView<'_>) -> Result<Vec<u8>, DashboardError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(Column::ALL.iter().map(|c| c.header()))?;
    for record in view.iter() {
        wtr.serialize(record)?;
    }
    wtr.into_inner()
        .map_err(|e| DashboardError::Io(std::io::Error::other(e.to_string())))
}

/// Write a filtered view to a CSV file.
pub fn write_csv(view: &FilteredView<'_>, path: impl AsRef<Path>) -> Result<(), DashboardError> {
    let bytes = to_csv(view)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilterSelection;

    const HEADER: &str = "ano,senioridade,contrato,tamanho_empresa,remoto,cargo,residencia_iso3,usd";

    fn csv_with(rows: &[&str]) -> String {
        let mut s = format!("{HEADER}\n");
        for r in rows {
            s.push_str(r);
            s.push('\n');
        }
        s
    }

    #[test]
    fn test_read_valid_rows_in_order() {
        let data = csv_with(&[
            "2022,senior,CLT,L,remoto,Data Engineer,USA,100000",
            "2023,junior,PJ,S,presencial,Data Analyst,BRA,40000",
        ]);
        let ds = read_csv_from_bytes(data.as_bytes(), "t", RowPolicy::Strict).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].job_title, "Data Engineer");
        assert_eq!(ds.records()[1].residence_country_code, "BRA");
        assert_eq!(ds.records()[1].salary_usd, 40000.0);
    }

    #[test]
    fn test_missing_columns_reported_together() {
        let data = "ano,senioridade,contrato,tamanho_empresa,remoto\n2022,senior,CLT,L,remoto\n";
        let err = read_csv_from_bytes(data.as_bytes(), "t", RowPolicy::Strict).unwrap_err();
        match err {
            LoadError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["cargo", "residencia_iso3", "usd"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input_is_missing_columns() {
        let err = read_csv_from_bytes(b"", "t", RowPolicy::Strict).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumns(cols) if cols.len() == 8));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let data = "salario,ano,senioridade,contrato,tamanho_empresa,remoto,cargo,moeda,residencia_iso3,usd\n\
                    9000,2024,pleno,integral,media,hibrido,Data Analyst,BRL,BRA,25000\n";
        let ds = read_csv_from_bytes(data.as_bytes(), "t", RowPolicy::Strict).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].year, 2024);
        assert_eq!(ds.records()[0].salary_usd, 25000.0);
    }

    #[test]
    fn test_headers_and_numbers_are_trimmed() {
        let data = " ano , senioridade,contrato,tamanho_empresa,remoto,cargo,residencia_iso3, usd \n\
                    2024 , pleno ,integral,media,hibrido,Data Analyst,BRA, 25000 \n";
        let ds = read_csv_from_bytes(data.as_bytes(), "t", RowPolicy::Strict).unwrap();
        assert_eq!(ds.records()[0].year, 2024);
        assert_eq!(ds.records()[0].experience_level, " pleno ");
        assert_eq!(ds.records()[0].salary_usd, 25000.0);
    }

    #[test]
    fn test_text_edge_whitespace_survives_export() {
        let data = csv_with(&["2022,senior,CLT,L,remoto,\" Data Scientist \",USA,100000"]);
        let ds = read_csv_from_bytes(data.as_bytes(), "t", RowPolicy::Strict).unwrap();
        assert_eq!(ds.records()[0].job_title, " Data Scientist ");

        let view = FilteredView::new(&ds, &FilterSelection::unconstrained());
        let bytes = to_csv(&view).unwrap();
        let again = read_csv_from_bytes(&bytes, "t", RowPolicy::Strict).unwrap();
        assert_eq!(again.records(), ds.records());
    }

    #[test]
    fn test_strict_rejects_extra_fields() {
        let data = csv_with(&["2022,senior,CLT,L,remoto,Data Engineer,USA,100000,999"]);
        let err = read_csv_from_bytes(data.as_bytes(), "t", RowPolicy::Strict).unwrap_err();
        match err {
            LoadError::MalformedRow { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("expected 8 fields, found 9"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_skips_rows_with_extra_fields() {
        let data = csv_with(&[
            "2022,senior,CLT,L,remoto,Data Engineer,USA,100000,999",
            "2023,junior,PJ,S,presencial,Data Analyst,BRA,40000",
        ]);
        let ds = read_csv_from_bytes(data.as_bytes(), "t", RowPolicy::Lenient).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.skipped_rows(), 1);
        assert_eq!(ds.records()[0].salary_usd, 40000.0);
    }

    #[test]
    fn test_strict_rejects_non_numeric_salary() {
        let data = csv_with(&[
            "2022,senior,CLT,L,remoto,Data Engineer,USA,100000",
            "2022,senior,CLT,L,remoto,Data Engineer,USA,lots",
        ]);
        let err = read_csv_from_bytes(data.as_bytes(), "t", RowPolicy::Strict).unwrap_err();
        match err {
            LoadError::MalformedRow { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_rejects_negative_salary() {
        let data = csv_with(&["2022,senior,CLT,L,remoto,Data Engineer,USA,-5"]);
        let err = read_csv_from_bytes(data.as_bytes(), "t", RowPolicy::Strict).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_lenient_skips_bad_rows() {
        let data = csv_with(&[
            "2022,senior,CLT,L,remoto,Data Engineer,USA,100000",
            "2022,senior,CLT,L,remoto,Data Engineer,USA,lots",
            "20x2,senior,CLT,L,remoto,Data Engineer,USA,1",
            "2022,senior,CLT",
            "2023,junior,PJ,S,presencial,Data Analyst,BRA,40000",
        ]);
        let ds = read_csv_from_bytes(data.as_bytes(), "t", RowPolicy::Lenient).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.skipped_rows(), 3);
        assert_eq!(ds.records()[1].year, 2023);
    }

    #[test]
    fn test_read_csv_names_dataset_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dados.csv");
        std::fs::write(&path, csv_with(&["2022,senior,CLT,L,remoto,Data Engineer,USA,1"])).unwrap();
        let ds = read_csv(&path, RowPolicy::Strict).unwrap();
        assert_eq!(ds.name, "dados");
    }

    #[test]
    fn test_to_csv_empty_view_has_header() {
        let ds = Dataset::new("empty", Vec::new());
        let view = FilteredView::new(&ds, &FilterSelection::unconstrained());
        let bytes = to_csv(&view).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), format!("{HEADER}\n"));
    }

    #[test]
    fn test_to_csv_quotes_embedded_delimiters() {
        let data = csv_with(&[
            "2022,senior,CLT,L,remoto,\"Engineer, Data\",USA,100000",
            "2022,senior,CLT,L,remoto,\"Say \"\"hi\"\"\",USA,1",
        ]);
        let ds = read_csv_from_bytes(data.as_bytes(), "t", RowPolicy::Strict).unwrap();
        let view = FilteredView::new(&ds, &FilterSelection::unconstrained());
        let text = String::from_utf8(to_csv(&view).unwrap()).unwrap();
        assert!(text.contains("\"Engineer, Data\""));
        assert!(text.contains("\"Say \"\"hi\"\"\""));

        let again = read_csv_from_bytes(text.as_bytes(), "t", RowPolicy::Strict).unwrap();
        assert_eq!(again.records(), ds.records());
    }

    #[test]
    fn test_write_csv_to_file() {
        let data = csv_with(&["2022,senior,CLT,L,remoto,Data Engineer,USA,100000"]);
        let ds = read_csv_from_bytes(data.as_bytes(), "t", RowPolicy::Strict).unwrap();
        let view = FilteredView::new(&ds, &FilterSelection::unconstrained());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&view, &path).unwrap();
        let loaded = read_csv(&path, RowPolicy::Strict).unwrap();
        assert_eq!(loaded.records(), ds.records());
    }
}
