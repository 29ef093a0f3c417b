use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Days, Months, NaiveDate};

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

    /// Uniform value in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn write_csv(dir: &Path, name: &str, header: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let path = dir.join(format!("{name}.csv"));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    println!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let year_start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;

    // Daily cash balance: a random walk with a slight upward drift.
    let mut cash = 250_000.0_f64;
    let mut cash_rows = Vec::new();
    for offset in 0..366 {
        let Some(date) = year_start.checked_add_days(Days::new(offset)) else {
            break;
        };
        cash = (cash + rng.gauss(300.0, 4_000.0)).max(0.0);
        cash_rows.push(vec![date.to_string(), format!("{cash:.2}")]);
    }
    write_csv(&out_dir, "cash_on_hand_trend", &["Date", "Cash_on_Hand_USD"], &cash_rows)?;

    // Month-end fixed deposit value, compounding monthly.
    let mut deposit = 500_000.0_f64;
    let mut deposit_rows = Vec::new();
    for month in 0..12 {
        let month_end = year_start
            .checked_add_months(Months::new(month + 1))
            .and_then(|d| d.pred_opt())
            .context("month end out of range")?;
        deposit *= 1.0 + rng.uniform(0.003, 0.005);
        deposit_rows.push(vec![month_end.to_string(), format!("{deposit:.2}")]);
    }
    write_csv(
        &out_dir,
        "fixed_deposits_trend",
        &["Date", "Fixed_Deposit_Value_USD"],
        &deposit_rows,
    )?;

    let expenditure: Vec<Vec<String>> = [
        ("Salaries", 850_000.0),
        ("Facilities", 120_000.0),
        ("Supplies", 45_000.0),
        ("Technology", 60_000.0),
        ("Transport", 38_000.0),
        ("Events", 15_000.0),
    ]
    .iter()
    .map(|&(category, base)| {
        let amount = base * rng.uniform(0.9, 1.1);
        vec![category.to_string(), format!("{amount:.2}")]
    })
    .collect();
    write_csv(&out_dir, "expenditure_breakdown", &["Category", "Amount_USD"], &expenditure)?;

    let outstanding: Vec<Vec<String>> = [
        ("Tuition Fees", 42_000.0),
        ("Transport Fees", 6_500.0),
        ("Vendor Invoices", 18_000.0),
        ("Utilities", 4_200.0),
    ]
    .iter()
    .map(|&(category, base)| {
        let amount = base * rng.uniform(0.8, 1.2);
        vec![category.to_string(), format!("{amount:.2}")]
    })
    .collect();
    write_csv(
        &out_dir,
        "outstanding_payments",
        &["Category", "Amount_Outstanding_USD"],
        &outstanding,
    )?;

    // Campus buildings scattered around a central point.
    let (lat0, lon0) = (37.7749, -122.4194);
    let locations: Vec<Vec<String>> = (0..8)
        .map(|_| {
            vec![
                format!("{:.5}", lat0 + rng.gauss(0.0, 0.004)),
                format!("{:.5}", lon0 + rng.gauss(0.0, 0.004)),
            ]
        })
        .collect();
    write_csv(&out_dir, "facilities_locations", &["lat", "lon"], &locations)?;

    let programs: Vec<Vec<String>> = [
        "Science",
        "Mathematics",
        "Humanities",
        "Arts",
        "Computer Science",
        "Physical Education",
    ]
    .iter()
    .map(|p| vec![p.to_string()])
    .collect();
    write_csv(&out_dir, "academic_programs", &["Program_Name"], &programs)?;

    println!("Sample data written to {}", out_dir.display());
    Ok(())
}
