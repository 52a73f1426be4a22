// src/generate.rs - Synthetic CLF traffic for demos and tests
use std::io::Write;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const IPS: [&str; 5] = [
    "192.168.1.1",
    "10.0.0.1",
    "172.16.0.5",
    "192.168.1.200",
    "8.8.8.8",
];

const PATHS: [&str; 5] = ["/home", "/about", "/contact", "/api/login", "/assets/logo.png"];

const METHODS: [&str; 3] = ["GET", "POST", "PUT"];

// 200 is repeated so successful requests dominate the distribution.
const STATUS_CODES: [u16; 6] = [200, 200, 200, 404, 500, 301];

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub lines: u64,
    /// Fixed seed for reproducible output; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            lines: 10000,
            seed: None,
        }
    }
}

/// Write `config.lines` synthetic access-log lines, one per record,
/// timestamped with the current clock.
pub fn write_synthetic_log<W: Write>(
    out: &mut W,
    config: &GeneratorConfig,
) -> std::io::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    for _ in 0..config.lines {
        let ip = IPS[rng.random_range(0..IPS.len())];
        let timestamp = Utc::now().format("%d/%b/%Y:%H:%M:%S +0000");
        let method = METHODS[rng.random_range(0..METHODS.len())];
        let path = PATHS[rng.random_range(0..PATHS.len())];
        let status = STATUS_CODES[rng.random_range(0..STATUS_CODES.len())];
        let size: u64 = rng.random_range(100..=5000);

        writeln!(
            out,
            "{} - - [{}] \"{} {} HTTP/1.1\" {} {}",
            ip, timestamp, method, path, status, size
        )?;
    }

    Ok(())
}
