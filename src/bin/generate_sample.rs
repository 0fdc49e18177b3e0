use anyhow::{Context, Result};
use serde::Serialize;

/// One output row, using the same headers as the published survey.
#[derive(Serialize)]
struct Row<'a> {
    ano: i32,
    senioridade: &'a str,
    contrato: &'a str,
    tamanho_empresa: &'a str,
    cargo: &'a str,
    remoto: &'a str,
    usd: f64,
    residencia_iso3: &'a str,
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

    /// Pick from `(item, weight)` pairs.
    fn weighted<'a, T>(&mut self, items: &'a [(T, f64)]) -> &'a T {
        let total: f64 = items.iter().map(|(_, w)| w).sum();
        let mut target = self.next_f64() * total;
        for (item, w) in items {
            if target < *w {
                return item;
            }
            target -= w;
        }
        &items[items.len() - 1].0
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let years = [(2022, 1.0), (2023, 2.0), (2024, 3.0), (2025, 2.0)];
    // (label, salary multiplier)
    let seniorities = [("junior", 0.55), ("pleno", 0.8), ("senior", 1.0), ("executivo", 1.35)];
    let contracts = [("integral", 8.0), ("contrato", 1.0), ("freelancer", 0.5), ("parcial", 0.5)];
    let sizes = [("pequena", 1.0), ("media", 3.0), ("grande", 2.0)];
    let remote = [("presencial", 4.0), ("remoto", 4.0), ("hibrido", 1.0)];
    // (role, base USD)
    let roles = [
        ("Data Scientist", 150_000.0),
        ("Data Engineer", 145_000.0),
        ("Data Analyst", 100_000.0),
        ("Machine Learning Engineer", 175_000.0),
        ("Analytics Engineer", 150_000.0),
        ("Research Scientist", 185_000.0),
        ("Data Architect", 160_000.0),
        ("BI Developer", 95_000.0),
        ("Applied Scientist", 190_000.0),
        ("Data Manager", 120_000.0),
        ("Head of Data", 210_000.0),
        ("AI Engineer", 170_000.0),
    ];
    // (ISO3, weight, salary multiplier)
    let countries = [
        ("USA", 8.0, 1.0),
        ("GBR", 1.0, 0.65),
        ("CAN", 1.0, 0.8),
        ("DEU", 0.7, 0.6),
        ("ESP", 0.5, 0.45),
        ("FRA", 0.5, 0.5),
        ("IND", 0.6, 0.25),
        ("BRA", 0.6, 0.3),
        ("PRT", 0.3, 0.4),
        ("AUS", 0.4, 0.75),
    ];
    let country_weights: Vec<(usize, f64)> =
        countries.iter().enumerate().map(|(i, c)| (i, c.1)).collect();
    let role_weights: Vec<(usize, f64)> = (0..roles.len()).map(|i| (i, 1.0)).collect();

    let output_path = "sample_salaries.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let n_rows = 2_000;
    for _ in 0..n_rows {
        let year = *rng.weighted(&years);
        let &(seniority, level) = &seniorities[(rng.next_u64() % seniorities.len() as u64) as usize];
        let contract = *rng.weighted(&contracts);
        let size = *rng.weighted(&sizes);
        let remote_mode = *rng.weighted(&remote);
        let (role, base) = roles[*rng.weighted(&role_weights)];
        let (country, _, local) = countries[*rng.weighted(&country_weights)];

        let usd = rng
            .gauss(base * level * local, base * 0.15)
            .max(5_000.0)
            .round();

        writer.serialize(Row {
            ano: year,
            senioridade: seniority,
            contrato: contract,
            tamanho_empresa: size,
            cargo: role,
            remoto: remote_mode,
            usd,
            residencia_iso3: country,
        })?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {n_rows} salary records to {output_path}");
    Ok(())
}
