use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::{json, Value};

/// Pump energy (cm⁻¹) the nIR wavelength is tuned against.
const PUMP_ENERGY: f64 = 14_344.0;

fn nir_wavelength(energy: f64) -> f64 {
    1e7 / (PUMP_ENERGY - energy)
}

fn energy_from_wavelength(wavelength: f64) -> f64 {
    PUMP_ENERGY - 1e7 / wavelength
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

/// Wavemeter readings around `center`, quantized to the meter's 0.0001 nm.
fn wavemeter_samples(rng: &mut SimpleRng, center: f64, spread: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|_| (rng.gauss(center, spread) * 1e4).round() / 1e4)
        .collect()
}

fn scan_step(rng: &mut SimpleRng, desired_energy: f64, nested: bool) -> Value {
    let desired_wl = nir_wavelength(desired_energy);

    // Coarse move lands a few hundredths of a nm off; the correction pass
    // pulls it back. Every seventh step misses badly.
    let coarse_wl = desired_wl + rng.gauss(0.0, 0.05);
    let miss = if rng.next_u64() % 7 == 0 { 0.4 } else { 0.0 };
    let final_wl = desired_wl + rng.gauss(0.0, 0.004) + miss;

    let initial = wavemeter_samples(rng, coarse_wl, 0.002, 40);
    let final_values = wavemeter_samples(rng, final_wl, 0.0008, 40);
    let energy = energy_from_wavelength(final_wl);

    if nested {
        json!({
            "first": {
                "wavelength": coarse_wl,
                "opo_wl": desired_wl,
                "energy": energy_from_wavelength(coarse_wl),
            },
            "final": {
                "desired_energy": desired_energy,
                "energy": energy,
                "desired_wl": desired_wl,
                "wavelength": final_wl,
                "wl_measurements": {
                    "initial": { "values": initial },
                    "final": { "values": final_values },
                },
            },
        })
    } else {
        json!({
            "desired_energy": desired_energy,
            "energy": energy,
            "desired_wl": desired_wl,
            "wavelength": final_wl,
            "wl_measurements": {
                "initial_values": initial,
                "final_values": final_values,
            },
        })
    }
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    // 1500 → 1550 cm⁻¹ in 2 cm⁻¹ steps; the newer nested layout starts halfway.
    let steps: Vec<Value> = (0..26)
        .map(|i| {
            let desired_energy = 1500.0 + 2.0 * i as f64;
            scan_step(&mut rng, desired_energy, i >= 13)
        })
        .collect();

    let dir = Path::new("wavelength_measurements");
    fs::create_dir_all(dir).context("creating output directory")?;
    let output_path = dir.join("measurement_results_sample.json");
    let count = steps.len();
    let text = serde_json::to_string_pretty(&Value::Array(steps))?;
    fs::write(&output_path, text)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!(
        "Wrote {count} scan steps to {}",
        output_path.display()
    );
    Ok(())
}
