//! Record builders shared by unit tests.

use chrono::NaiveDate;

use crate::data::model::{country_of, Record};

/// A full-time posting at `location`; `posted` is `YYYY-MM-DD`.
pub fn record(
    location: &str,
    industry: Option<&str>,
    level: &str,
    salary: f64,
    posted: &str,
) -> Record {
    Record {
        location: location.to_string(),
        country: country_of(location).to_string(),
        industry: industry.map(str::to_string),
        experience_level: Some(level.to_string()),
        employment_type: Some("Full-Time".to_string()),
        salary_usd: Some(salary),
        posted_date: NaiveDate::parse_from_str(posted, "%Y-%m-%d").ok(),
    }
}

pub fn with_salary(mut rec: Record, salary: Option<f64>) -> Record {
    rec.salary_usd = salary;
    rec
}

pub fn with_employment_type(mut rec: Record, kind: Option<&str>) -> Record {
    rec.employment_type = kind.map(str::to_string);
    rec
}

pub fn with_posted_date(mut rec: Record, date: Option<NaiveDate>) -> Record {
    rec.posted_date = date;
    rec
}
