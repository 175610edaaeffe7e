use anyhow::{Context, Result};
use serde::Serialize;

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// One output row, in the raw merged layout the dashboard renames on load.
#[derive(Serialize)]
struct Row {
    instant: u32,
    season_x: u8,
    workingday_x: u8,
    weathersit_x: u8,
    temp_x: f64,
    cnt_x: u32,
    mnth_x: u8,
    casual_x: u32,
    registered_x: u32,
    hr: u8,
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn season_for_month(month: u8) -> u8 {
    (month - 1) / 3 + 1
}

/// Relative demand by hour: commute peaks on working days, a midday hump
/// on weekends.
fn hourly_shape(hour: u8, working: bool) -> f64 {
    let h = f64::from(hour);
    let bump = |centre: f64, width: f64| (-(h - centre).powi(2) / (2.0 * width * width)).exp();
    if working {
        0.05 + 1.0 * bump(8.0, 1.2) + 1.1 * bump(17.5, 1.5) + 0.3 * bump(12.5, 2.0)
    } else {
        0.05 + 0.8 * bump(14.0, 3.5)
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "all_data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut instant: u32 = 0;
    let mut weekday: u32 = 5; // the first day is a Saturday
    for _year in 0..2 {
        for (m, &days) in DAYS_IN_MONTH.iter().enumerate() {
            let month = m as u8 + 1;
            let season = season_for_month(month);
            // warmest mid-year
            let base_temp = 0.5 - 0.3 * (2.0 * std::f64::consts::PI * (f64::from(month) - 1.0) / 12.0).cos();

            for _day in 0..days {
                let working = weekday < 5;
                let weathersit: u8 = match rng.next_f64() {
                    p if p < 0.65 => 1,
                    p if p < 0.92 => 2,
                    _ => 3,
                };
                for hour in 0..24u8 {
                    let temp = (base_temp + rng.gauss(0.0, 0.05)).clamp(0.02, 1.0);
                    let weather_factor = 1.0 - 0.3 * f64::from(weathersit - 1);
                    let demand = 400.0 * hourly_shape(hour, working) * (0.4 + temp) * weather_factor;

                    let casual_share = if working { 0.12 } else { 0.35 };
                    let casual = (demand * casual_share + rng.gauss(0.0, 4.0)).max(0.0).round() as u32;
                    let registered = (demand * (1.0 - casual_share) + rng.gauss(0.0, 10.0))
                        .max(0.0)
                        .round() as u32;

                    instant += 1;
                    writer.serialize(Row {
                        instant,
                        season_x: season,
                        workingday_x: u8::from(working),
                        weathersit_x: weathersit,
                        temp_x: (temp * 100.0).round() / 100.0,
                        cnt_x: casual + registered,
                        mnth_x: month,
                        casual_x: casual,
                        registered_x: registered,
                        hr: hour,
                    })?;
                }
                weekday = (weekday + 1) % 7;
            }
        }
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {instant} hourly records to {output_path}");
    Ok(())
}
