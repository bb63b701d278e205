use serde::{Deserialize, Deserializer, Serialize};

/// The fixed columns of the salary dataset, in canonical (export) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Year,
    ExperienceLevel,
    ContractType,
    CompanySize,
    RemoteType,
    JobTitle,
    ResidenceCountryCode,
    SalaryUsd,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Year,
        Column::ExperienceLevel,
        Column::ContractType,
        Column::CompanySize,
        Column::RemoteType,
        Column::JobTitle,
        Column::ResidenceCountryCode,
        Column::SalaryUsd,
    ];

    /// Header name of the column in the source CSV.
    pub fn header(self) -> &'static str {
        match self {
            Column::Year => "ano",
            Column::ExperienceLevel => "senioridade",
            Column::ContractType => "contrato",
            Column::CompanySize => "tamanho_empresa",
            Column::RemoteType => "remoto",
            Column::JobTitle => "cargo",
            Column::ResidenceCountryCode => "residencia_iso3",
            Column::SalaryUsd => "usd",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// A categorical column a view can be grouped or filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Year,
    ExperienceLevel,
    ContractType,
    CompanySize,
    RemoteType,
    JobTitle,
    ResidenceCountryCode,
}

impl Dimension {
    /// Dimensions exposed as user filters.
    pub const FILTERABLE: [Dimension; 4] = [
        Dimension::Year,
        Dimension::ExperienceLevel,
        Dimension::ContractType,
        Dimension::CompanySize,
    ];

    pub fn column(self) -> Column {
        match self {
            Dimension::Year => Column::Year,
            Dimension::ExperienceLevel => Column::ExperienceLevel,
            Dimension::ContractType => Column::ContractType,
            Dimension::CompanySize => Column::CompanySize,
            Dimension::RemoteType => Column::RemoteType,
            Dimension::JobTitle => Column::JobTitle,
            Dimension::ResidenceCountryCode => Column::ResidenceCountryCode,
        }
    }

    pub fn is_filterable(self) -> bool {
        Self::FILTERABLE.contains(&self)
    }
}

/// A numeric column statistics can be computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    Year,
    #[default]
    SalaryUsd,
}

/// Value of a categorical column, used as a group key.
///
/// Ordering is numeric for integers and lexical for text. A single column
/// only ever produces one variant, so keys of one grouping compare naturally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryValue {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryValue::Int(v) => write!(f, "{v}"),
            CategoryValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for CategoryValue {
    fn from(s: &str) -> Self {
        CategoryValue::Text(s.to_string())
    }
}

impl From<i64> for CategoryValue {
    fn from(v: i64) -> Self {
        CategoryValue::Int(v)
    }
}

/// One employment/salary observation.
///
/// Serde names match the source CSV headers, so the same struct is used to
/// parse and to export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "ano", deserialize_with = "deserialize_year")]
    pub year: i32,
    #[serde(rename = "senioridade")]
    pub experience_level: String,
    #[serde(rename = "contrato")]
    pub contract_type: String,
    #[serde(rename = "tamanho_empresa")]
    pub company_size: String,
    #[serde(rename = "remoto")]
    pub remote_type: String,
    #[serde(rename = "cargo")]
    pub job_title: String,
    /// ISO-3166 alpha-3 code
    #[serde(rename = "residencia_iso3")]
    pub residence_country_code: String,
    /// Annualized salary in USD
    #[serde(rename = "usd", deserialize_with = "deserialize_salary")]
    pub salary_usd: f64,
}

impl Record {
    /// Value of a categorical column for this record.
    pub fn category(&self, dimension: Dimension) -> CategoryValue {
        match dimension {
            Dimension::Year => CategoryValue::Int(i64::from(self.year)),
            Dimension::ExperienceLevel => CategoryValue::Text(self.experience_level.clone()),
            Dimension::ContractType => CategoryValue::Text(self.contract_type.clone()),
            Dimension::CompanySize => CategoryValue::Text(self.company_size.clone()),
            Dimension::RemoteType => CategoryValue::Text(self.remote_type.clone()),
            Dimension::JobTitle => CategoryValue::Text(self.job_title.clone()),
            Dimension::ResidenceCountryCode => {
                CategoryValue::Text(self.residence_country_code.clone())
            }
        }
    }

    /// Value of a numeric column for this record.
    pub fn numeric(&self, column: NumericColumn) -> f64 {
        match column {
            NumericColumn::Year => f64::from(self.year),
            NumericColumn::SalaryUsd => self.salary_usd,
        }
    }

    /// Check the constraints the CSV types alone do not enforce.
    pub fn validate(&self) -> Result<(), String> {
        if !self.salary_usd.is_finite() {
            return Err(format!("salary must be finite, got {}", self.salary_usd));
        }
        if self.salary_usd < 0.0 {
            return Err(format!(
                "salary must be non-negative, got {}",
                self.salary_usd
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Float(f64),
    Text(String),
}

/// A number that may arrive as text with surrounding whitespace.
fn deserialize_number<'de, D>(deserializer: D, field: &str) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawNumber::deserialize(deserializer)? {
        RawNumber::Float(v) => Ok(v),
        RawNumber::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid {field} '{s}'"))),
    }
}

/// Years are integers, but exports from dataframe tools sometimes write `2023.0`.
fn deserialize_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserialize_number(deserializer, "year")?;
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(serde::de::Error::custom(format!("invalid year '{value}'")));
    }
    Ok(value as i32)
}

fn deserialize_salary<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_number(deserializer, "salary")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            year: 2023,
            experience_level: "senior".to_string(),
            contract_type: "integral".to_string(),
            company_size: "media".to_string(),
            remote_type: "remoto".to_string(),
            job_title: "Data Scientist".to_string(),
            residence_country_code: "BRA".to_string(),
            salary_usd: 95000.0,
        }
    }

    #[test]
    fn test_column_headers_in_canonical_order() {
        let headers: Vec<&str> = Column::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(
            headers,
            vec![
                "ano",
                "senioridade",
                "contrato",
                "tamanho_empresa",
                "remoto",
                "cargo",
                "residencia_iso3",
                "usd"
            ]
        );
    }

    #[test]
    fn test_filterable_dimensions() {
        assert!(Dimension::Year.is_filterable());
        assert!(Dimension::CompanySize.is_filterable());
        assert!(!Dimension::JobTitle.is_filterable());
        assert!(!Dimension::RemoteType.is_filterable());
    }

    #[test]
    fn test_category_values() {
        let r = record();
        assert_eq!(r.category(Dimension::Year), CategoryValue::Int(2023));
        assert_eq!(
            r.category(Dimension::JobTitle),
            CategoryValue::Text("Data Scientist".to_string())
        );
        assert_eq!(r.category(Dimension::ResidenceCountryCode).to_string(), "BRA");
    }

    #[test]
    fn test_numeric_values() {
        let r = record();
        assert_eq!(r.numeric(NumericColumn::SalaryUsd), 95000.0);
        assert_eq!(r.numeric(NumericColumn::Year), 2023.0);
    }

    #[test]
    fn test_category_value_ordering() {
        assert!(CategoryValue::Int(2022) < CategoryValue::Int(2023));
        assert!(CategoryValue::from("L") < CategoryValue::from("M"));
    }

    #[test]
    fn test_validate_rejects_negative_salary() {
        let mut r = record();
        assert!(r.validate().is_ok());
        r.salary_usd = -1.0;
        assert!(r.validate().unwrap_err().contains("non-negative"));
        r.salary_usd = f64::NAN;
        assert!(r.validate().unwrap_err().contains("finite"));
    }

    #[test]
    fn test_year_accepts_float_formatting() {
        let data = "ano,senioridade,contrato,tamanho_empresa,remoto,cargo,residencia_iso3,usd\n\
                    2021.0,junior,integral,pequena,presencial,Data Analyst,USA,50000\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let rec: Record = rdr.deserialize().next().unwrap().unwrap();
        assert_eq!(rec.year, 2021);
    }

    #[test]
    fn test_year_rejects_fractional() {
        let data = "ano,senioridade,contrato,tamanho_empresa,remoto,cargo,residencia_iso3,usd\n\
                    2021.5,junior,integral,pequena,presencial,Data Analyst,USA,50000\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let rec: Result<Record, _> = rdr.deserialize().next().unwrap();
        assert!(rec.is_err());
    }

    #[test]
    fn test_numbers_tolerate_padding_text_does_not_change() {
        let data = "ano,senioridade,contrato,tamanho_empresa,remoto,cargo,residencia_iso3,usd\n\
                    \" 2021 \", junior ,integral,pequena,presencial,Data Analyst,USA,\" 50000 \"\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let rec: Record = rdr.deserialize().next().unwrap().unwrap();
        assert_eq!(rec.year, 2021);
        assert_eq!(rec.salary_usd, 50000.0);
        assert_eq!(rec.experience_level, " junior ");
    }

    #[test]
    fn test_salary_rejects_text() {
        let data = "ano,senioridade,contrato,tamanho_empresa,remoto,cargo,residencia_iso3,usd\n\
                    2021,junior,integral,pequena,presencial,Data Analyst,USA,lots\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let rec: Result<Record, _> = rdr.deserialize().next().unwrap();
        assert!(rec.unwrap_err().to_string().contains("invalid salary"));
    }
}
