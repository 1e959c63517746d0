use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];

/// Booster generations in flight order:
/// (category, version prefix, flights, payload kg range, success probability).
const GENERATIONS: [(&str, &str, usize, (f64, f64), f64); 5] = [
    ("v1.0", "F9 v1.0", 5, (0.0, 700.0), 0.0),
    ("v1.1", "F9 v1.1", 15, (500.0, 4600.0), 0.25),
    ("FT", "F9 FT", 24, (2000.0, 9600.0), 0.7),
    ("B4", "F9 B4", 11, (2200.0, 7100.0), 0.55),
    ("B5", "F9 B5", 11, (3000.0, 15600.0), 1.0),
];

#[derive(Serialize)]
struct Row {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    site: &'static str,
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: &'static str,
}

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut flight_number = 1;
    let mut core_serial = 3;

    for &(category, version, flights, (lo, hi), p_success) in &GENERATIONS {
        for _ in 0..flights {
            // Early boosters only flew from the Cape.
            let site = if category == "v1.0" { SITES[0] } else { rng.pick(&SITES) };
            let class = i64::from(rng.next_f64() < p_success);
            let payload = rng.range(lo, hi).round();

            rows.push(Row {
                flight_number,
                site,
                class,
                payload,
                booster_version: format!("{version} B{core_serial:04}"),
                booster_category: category,
            });
            flight_number += 1;
            core_serial += 1;
        }
    }
    rows
}

fn write_csv(rows: &[Row], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.booster_category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| ".".to_string()));
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    let csv_path = out_dir.join("spacex_launch_dash.csv");
    let parquet_path = out_dir.join("spacex_launch_dash.parquet");
    write_csv(&rows, &csv_path)?;
    write_parquet(&rows, &parquet_path)?;

    println!(
        "Wrote {} launches to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_deterministic_and_well_formed() {
        let a = generate_rows(&mut SimpleRng::new(42));
        let b = generate_rows(&mut SimpleRng::new(42));
        let expected: usize = GENERATIONS.iter().map(|g| g.2).sum();

        assert_eq!(a.len(), expected);
        assert!(a.iter().zip(&b).all(|(x, y)| x.payload == y.payload && x.site == y.site));
        assert!(a.iter().all(|r| r.class == 0 || r.class == 1));
        assert!(a.iter().all(|r| r.payload >= 0.0));
        assert!(a
            .iter()
            .filter(|r| r.booster_category == "v1.0")
            .all(|r| r.site == SITES[0]));
    }

    #[test]
    fn test_csv_has_source_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&generate_rows(&mut SimpleRng::new(1)), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category"
        );
    }
}
