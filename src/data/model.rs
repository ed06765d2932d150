use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::DatasetError;

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

pub const COL_LOCATION: &str = "Location";
pub const COL_INDUSTRY: &str = "Industry";
pub const COL_EXPERIENCE_LEVEL: &str = "Experience Level";
pub const COL_EMPLOYMENT_TYPE: &str = "Employment Type";
pub const COL_SALARY_USD: &str = "Salary (USD)";
pub const COL_POSTED_DATE: &str = "Posted Date";

// ---------------------------------------------------------------------------
// RawValue – a single untyped cell as read from the source file
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, before normalization into a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Null,
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::String(s) => write!(f, "{s}"),
            RawValue::Integer(i) => write!(f, "{i}"),
            RawValue::Float(v) => write!(f, "{v}"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            RawValue::Null => write!(f, "<null>"),
        }
    }
}

impl RawValue {
    /// Non-empty trimmed text, or `None` for nulls and blanks.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Null => None,
            RawValue::String(s) => {
                let t = s.trim();
                (!t.is_empty()).then(|| t.to_string())
            }
            other => Some(other.to_string()),
        }
    }

    /// Interpret the cell as a salary: finite and non-negative, else `None`.
    pub fn as_salary(&self) -> Option<f64> {
        let v = match self {
            RawValue::Float(v) => *v,
            RawValue::Integer(i) => *i as f64,
            RawValue::String(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
            _ => return None,
        };
        (v.is_finite() && v >= 0.0).then_some(v)
    }

    /// Interpret the cell as a calendar date; any time component is dropped.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            RawValue::Date(d) => Some(*d),
            RawValue::String(s) => parse_posted_date(s),
            _ => None,
        }
    }
}

/// One source row: column name → cell.
pub type RawRow = BTreeMap<String, RawValue>;

// ---------------------------------------------------------------------------
// Normalization helpers
// ---------------------------------------------------------------------------

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
///
/// `"senior"` → `"Senior"`, `"MID-level"` → `"Mid-Level"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Last comma-separated segment of a location, trimmed.
pub fn country_of(location: &str) -> &str {
    location.rsplit(',').next().unwrap_or(location).trim()
}

/// Parse the date formats seen in job-posting exports. Returns `None` when
/// no format matches.
pub fn parse_posted_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

// ---------------------------------------------------------------------------
// Record – one normalized job posting
// ---------------------------------------------------------------------------

/// A single job posting after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub location: String,
    /// Derived from the last segment of `location`.
    pub country: String,
    pub industry: Option<String>,
    /// Title-cased.
    pub experience_level: Option<String>,
    pub employment_type: Option<String>,
    pub salary_usd: Option<f64>,
    pub posted_date: Option<NaiveDate>,
}

impl Record {
    /// Normalize a raw row. `row_no` is only used for error reporting.
    pub fn from_raw(row: &RawRow, row_no: usize) -> Result<Self, DatasetError> {
        let text = |col: &str| row.get(col).and_then(RawValue::as_text);

        let location = text(COL_LOCATION).ok_or(DatasetError::MissingLocation { row: row_no })?;
        let country = country_of(&location).to_string();
        if country.is_empty() {
            return Err(DatasetError::MissingLocation { row: row_no });
        }

        Ok(Record {
            country,
            location,
            industry: text(COL_INDUSTRY),
            experience_level: text(COL_EXPERIENCE_LEVEL).map(|l| title_case(&l)),
            employment_type: text(COL_EMPLOYMENT_TYPE),
            salary_usd: row.get(COL_SALARY_USD).and_then(RawValue::as_salary),
            posted_date: row.get(COL_POSTED_DATE).and_then(RawValue::as_date),
        })
    }
}

// ---------------------------------------------------------------------------
// RecordStore – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full normalized dataset. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    pub records: Vec<Record>,
    /// Sorted distinct industries over all records.
    pub industries: Vec<String>,
    /// Sorted distinct countries over all records.
    pub countries: Vec<String>,
}

impl RecordStore {
    /// Build the option lists from the records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut industries = BTreeSet::new();
        let mut countries = BTreeSet::new();
        for r in &records {
            if let Some(ind) = &r.industry {
                industries.insert(ind.clone());
            }
            countries.insert(r.country.clone());
        }
        RecordStore {
            records,
            industries: industries.into_iter().collect(),
            countries: countries.into_iter().collect(),
        }
    }

    /// Normalize raw rows into a store; the first malformed row aborts.
    pub fn from_raw_rows(rows: &[RawRow]) -> Result<Self, DatasetError> {
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, row)| Record::from_raw(row, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
