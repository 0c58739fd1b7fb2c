use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::Float64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::json;

use hotspots::data::model::RawPoint;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// A busy building: centre on the canvas, spread, typical usage, samples.
struct Hotspot {
    name: &'static str,
    x: f64,
    y: f64,
    spread: f64,
    usage: f64,
    samples: usize,
}

const HOTSPOTS: &[Hotspot] = &[
    Hotspot { name: "Baker-Berry Library", x: 420.0, y: 260.0, spread: 30.0, usage: 420.0, samples: 120 },
    Hotspot { name: "Collis Center", x: 300.0, y: 380.0, spread: 25.0, usage: 300.0, samples: 80 },
    Hotspot { name: "Thayer School", x: 700.0, y: 200.0, spread: 35.0, usage: 250.0, samples: 60 },
    Hotspot { name: "River Dorms", x: 820.0, y: 480.0, spread: 45.0, usage: 150.0, samples: 70 },
    Hotspot { name: "Gym", x: 560.0, y: 560.0, spread: 20.0, usage: 600.0, samples: 30 },
];

fn generate(rng: &mut SimpleRng) -> Vec<RawPoint> {
    let mut points = Vec::new();
    for spot in HOTSPOTS {
        for _ in 0..spot.samples {
            let usage = rng.gauss(spot.usage, spot.usage * 0.3).max(0.0);
            points.push(RawPoint::new(
                rng.gauss(spot.x, spot.spread),
                rng.gauss(spot.y, spot.spread),
                (usage * 10.0).round() / 10.0,
            ));
        }
        log::debug!("{}: {} samples", spot.name, spot.samples);
    }
    points
}

fn write_json(points: &[RawPoint], path: &str) -> Result<()> {
    let records: Vec<_> = points
        .iter()
        .map(|p| {
            json!({
                "longitude": p.longitude,
                "latitude": p.latitude,
                "bandwidthUsage": p.bandwidth_usage,
            })
        })
        .collect();
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    serde_json::to_writer_pretty(file, &records).context("writing JSON")?;
    Ok(())
}

fn write_csv(points: &[RawPoint], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(["longitude", "latitude", "bandwidthUsage"])?;
    for p in points {
        writer.write_record([
            p.longitude.to_string(),
            p.latitude.to_string(),
            p.bandwidth_usage.to_string(),
        ])?;
    }
    writer.flush().context("writing CSV")?;
    Ok(())
}

fn write_parquet(points: &[RawPoint], path: &str) -> Result<()> {
    let column = |f: fn(&RawPoint) -> f64| Float64Array::from(points.iter().map(f).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("longitude", DataType::Float64, false),
        Field::new("latitude", DataType::Float64, false),
        Field::new("bandwidthUsage", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(column(|p| p.longitude)),
            Arc::new(column(|p| p.latitude)),
            Arc::new(column(|p| p.bandwidth_usage)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);
    let points = generate(&mut rng);

    write_json(&points, "sample_points.json")?;
    write_csv(&points, "sample_points.csv")?;
    write_parquet(&points, "sample_points.parquet")?;

    println!(
        "Wrote {} points from {} hotspots to sample_points.{{json,csv,parquet}}",
        points.len(),
        HOTSPOTS.len()
    );
    Ok(())
}
