use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Days, NaiveDate};
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Posting {
    title: String,
    location: String,
    industry: Option<String>,
    experience_level: String,
    employment_type: String,
    salary_usd: f64,
    posted_date: NaiveDate,
}

const LOCATIONS: &[&str] = &[
    "New York, NY, USA",
    "San Francisco, CA, USA",
    "Austin, TX, USA",
    "Toronto, ON, Canada",
    "Vancouver, BC, Canada",
    "London, UK",
    "Berlin, Germany",
    "Bangalore, India",
];
const INDUSTRIES: &[&str] = &["Tech", "Finance", "Healthcare", "Retail", "Education"];
const TITLES: &[&str] = &["Data Analyst", "Software Engineer", "Product Manager", "Designer"];
const EMPLOYMENT_TYPES: &[&str] = &["Full-Time", "Full-Time", "Full-Time", "Contract", "Part-Time"];

// (raw level as exported, mean salary)
const LEVELS: &[(&str, f64)] = &[
    ("entry", 55_000.0),
    ("mid", 80_000.0),
    ("senior", 115_000.0),
    ("LEAD", 140_000.0),
];

fn generate(rng: &mut SimpleRng, count: usize) -> Result<Vec<Posting>> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).context("start date")?;
    let mut postings = Vec::with_capacity(count);

    for _ in 0..count {
        let &(level, mean) = rng.pick(LEVELS);
        // Roughly one in twelve postings has no industry.
        let industry = if rng.next_u64() % 12 == 0 {
            None
        } else {
            Some(rng.pick(INDUSTRIES).to_string())
        };
        let offset = rng.next_u64() % 730;
        let posted_date = start
            .checked_add_days(Days::new(offset))
            .context("posted date out of range")?;

        postings.push(Posting {
            title: rng.pick(TITLES).to_string(),
            location: rng.pick(LOCATIONS).to_string(),
            industry,
            experience_level: level.to_string(),
            employment_type: rng.pick(EMPLOYMENT_TYPES).to_string(),
            salary_usd: rng.gauss(mean, mean * 0.15).max(20_000.0).round(),
            posted_date,
        });
    }
    Ok(postings)
}

fn write_csv(path: &str, postings: &[Posting]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    writer.write_record([
        "Job Title",
        "Location",
        "Industry",
        "Experience Level",
        "Employment Type",
        "Salary (USD)",
        "Posted Date",
    ])?;
    for p in postings {
        let salary = p.salary_usd.to_string();
        let posted = p.posted_date.format("%Y-%m-%d").to_string();
        writer.write_record([
            p.title.as_str(),
            p.location.as_str(),
            p.industry.as_deref().unwrap_or(""),
            p.experience_level.as_str(),
            p.employment_type.as_str(),
            salary.as_str(),
            posted.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, postings: &[Posting]) -> Result<()> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).context("epoch")?;

    let schema = Arc::new(Schema::new(vec![
        Field::new("Job Title", DataType::Utf8, false),
        Field::new("Location", DataType::Utf8, false),
        Field::new("Industry", DataType::Utf8, true),
        Field::new("Experience Level", DataType::Utf8, false),
        Field::new("Employment Type", DataType::Utf8, false),
        Field::new("Salary (USD)", DataType::Float64, false),
        Field::new("Posted Date", DataType::Date32, false),
    ]));

    let strings = |f: fn(&Posting) -> &str| {
        StringArray::from(postings.iter().map(f).collect::<Vec<_>>())
    };
    let industries =
        StringArray::from(postings.iter().map(|p| p.industry.as_deref()).collect::<Vec<_>>());
    let salaries = Float64Array::from(postings.iter().map(|p| p.salary_usd).collect::<Vec<_>>());
    let dates = Date32Array::from(
        postings
            .iter()
            .map(|p| (p.posted_date - epoch).num_days() as i32)
            .collect::<Vec<_>>(),
    );

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(strings(|p| p.title.as_str())),
            Arc::new(strings(|p| p.location.as_str())),
            Arc::new(industries),
            Arc::new(strings(|p| p.experience_level.as_str())),
            Arc::new(strings(|p| p.employment_type.as_str())),
            Arc::new(salaries),
            Arc::new(dates),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let postings = generate(&mut rng, 500)?;

    write_csv("employment_dataset.csv", &postings)?;
    write_parquet("employment_dataset.parquet", &postings)?;

    println!(
        "Wrote {} postings to employment_dataset.csv and employment_dataset.parquet",
        postings.len()
    );
    Ok(())
}
