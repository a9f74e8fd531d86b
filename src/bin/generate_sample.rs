use std::f64::consts::PI;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use rand_distr::{ChiSquared, Distribution};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Physical constants (CGS)
// ---------------------------------------------------------------------------

const G: f64 = 6.67430e-8;
const MU_SUN: f64 = 1.3271244e26;
const MSUN: f64 = MU_SUN / G;
const RSUN: f64 = 6.957e10;
const KM_TO_CM: f64 = 1.0e5;
const DAY: f64 = 24.0 * 3600.0;

/// Period window of the orbit grid, in days.
const GRID_PERIOD_RANGE: (f64, f64) = (3.0, 400.0);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
enum KickDistribution {
    Maxwell,
    Uniform,
}

/// Pre-collapse binary and kick model. Masses in Msun, separation in Rsun,
/// kick speeds in km/s, phi limits in multiples of π.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct Config {
    m1: f64,
    m2: f64,
    separation: f64,
    compact_object_mass: f64,
    kick_distribution: KickDistribution,
    kick_sigma: f64,
    min_kick_value: f64,
    max_kick_value: f64,
    min_phi: f64,
    max_phi: f64,
    number_of_cases: usize,
    seed: u64,
    grid_periods: usize,
    grid_eccentricities: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            m1: 10.0,
            m2: 8.0,
            separation: 50.0,
            compact_object_mass: 7.0,
            kick_distribution: KickDistribution::Maxwell,
            kick_sigma: 265.0,
            min_kick_value: 0.0,
            max_kick_value: 1000.0,
            min_phi: 0.0,
            max_phi: 2.0,
            number_of_cases: 50_000,
            seed: 42,
            grid_periods: 40,
            grid_eccentricities: 20,
        }
    }
}

impl Config {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.m1 <= 0.0 || self.m2 <= 0.0 || self.compact_object_mass <= 0.0 {
            bail!("masses must be positive");
        }
        if self.separation <= 0.0 {
            bail!("separation must be positive");
        }
        if self.kick_distribution == KickDistribution::Uniform
            && self.min_kick_value > self.max_kick_value
        {
            bail!("min_kick_value is larger than max_kick_value");
        }
        if self.kick_sigma < 0.0 || self.min_kick_value < 0.0 {
            bail!("kick speeds must be non-negative");
        }
        if self.min_phi > self.max_phi {
            bail!("min_phi is larger than max_phi");
        }
        if self.grid_periods == 0 || self.grid_eccentricities == 0 {
            bail!("grid needs at least one bin per axis");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Kicks
// ---------------------------------------------------------------------------

/// One natal kick: speed in km/s and direction angles in radians.
#[derive(Debug, Clone, Copy)]
struct Kick {
    w: f64,
    theta: f64,
    phi: f64,
}

fn sample_kicks(config: &Config, rng: &mut ChaChaRng) -> Result<Vec<Kick>> {
    // Maxwellian speed: sigma * sqrt(chi-squared with 3 degrees of freedom).
    let chi2 = ChiSquared::<f64>::new(3.0).map_err(|e| anyhow!("chi-squared distribution: {e}"))?;

    let kicks = (0..config.number_of_cases)
        .map(|_| {
            let w = match config.kick_distribution {
                KickDistribution::Maxwell => config.kick_sigma * chi2.sample(rng).sqrt(),
                KickDistribution::Uniform => rng.random_range(
                    config.min_kick_value..=config.max_kick_value,
                ),
            };
            let phi = PI * rng.random_range(config.min_phi..=config.max_phi);
            let theta = (2.0 * rng.random::<f64>() - 1.0).acos();
            Kick { w, theta, phi }
        })
        .collect();
    Ok(kicks)
}

// ---------------------------------------------------------------------------
// Orbits after the kick
// ---------------------------------------------------------------------------

/// Bound post-kick orbit: period in days, separation in Rsun.
#[derive(Debug, Clone, Copy)]
struct Orbit {
    period: f64,
    separation: f64,
    eccentricity: f64,
}

/// Kepler's third law: separation (cm) → period (s).
fn a_to_p(a: f64, m1: f64, m2: f64) -> f64 {
    2.0 * PI * (a.powi(3) / (G * (m1 + m2))).sqrt()
}

/// Kepler's third law: period (s) → separation (cm).
fn p_to_a(p: f64, m1: f64, m2: f64) -> f64 {
    (G * (m1 + m2) * (p / (2.0 * PI)).powi(2)).cbrt()
}

/// Post-kick orbit from linear momentum conservation (Kalogera 1996,
/// eqs. 3-5). `None` when the binary is disrupted.
fn orbit_after_kick(config: &Config, kick: &Kick) -> Option<Orbit> {
    let m1 = config.m1 * MSUN;
    let m2 = config.m2 * MSUN;
    let mco = config.compact_object_mass * MSUN;
    let a_pre = config.separation * RSUN;
    let w = kick.w * KM_TO_CM;

    let v_pre = (G * (m1 + m2) / a_pre).sqrt();
    let wy = w * kick.theta.cos();
    let wz = w * kick.phi.sin() * kick.theta.sin();

    let gm_post = G * (mco + m2);
    let a_post = gm_post / (2.0 * gm_post / a_pre - w * w - v_pre * v_pre - 2.0 * wy * v_pre);
    if !(a_post > 0.0) {
        return None;
    }

    let h2 = (wz * wz + wy * wy + v_pre * v_pre + 2.0 * wy * v_pre) * a_pre * a_pre;
    let e2 = 1.0 - h2 / (gm_post * a_post);
    // Round-off can push a circular orbit marginally below zero.
    if !(e2 > -1e-12 && e2 < 1.0) {
        return None;
    }
    let e_post = e2.max(0.0).sqrt();

    Some(Orbit {
        period: a_to_p(a_post, mco, m2) / DAY,
        separation: a_post / RSUN,
        eccentricity: e_post,
    })
}

// ---------------------------------------------------------------------------
// Grid of orbits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct GridCell {
    period: f64,
    separation: f64,
    eccentricity: f64,
    probability: f64,
}

/// Bin bound orbits over log-period × eccentricity. Probabilities are
/// fractions of all `n_cases` kicks, so they sum to the bound fraction
/// inside the period window.
fn grid_of_orbits(config: &Config, orbits: &[Orbit], n_cases: usize) -> Vec<GridCell> {
    let (p_lo, p_hi) = (GRID_PERIOD_RANGE.0.log10(), GRID_PERIOD_RANGE.1.log10());
    let (np, ne) = (config.grid_periods, config.grid_eccentricities);
    let dp = (p_hi - p_lo) / np as f64;
    let de = 1.0 / ne as f64;

    let mut counts = vec![0usize; np * ne];
    for orbit in orbits {
        let log_p = orbit.period.log10();
        if !(p_lo..=p_hi).contains(&log_p) {
            continue;
        }
        let i = (((log_p - p_lo) / dp) as usize).min(np - 1);
        let j = ((orbit.eccentricity / de) as usize).min(ne - 1);
        counts[i * ne + j] += 1;
    }

    let m2 = config.m2 * MSUN;
    let mco = config.compact_object_mass * MSUN;

    counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(idx, &count)| {
            let (i, j) = (idx / ne, idx % ne);
            let period = 10f64.powf(p_lo + (i as f64 + 0.5) * dp);
            GridCell {
                period,
                separation: p_to_a(period * DAY, mco, m2) / RSUN,
                eccentricity: (j as f64 + 0.5) * de,
                probability: count as f64 / n_cases.max(1) as f64,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn fmt5(v: f64) -> String {
    format!("{v:.5}")
}

fn write_table(path: &Path, header: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

fn write_kicks(path: &Path, kicks: &[Kick]) -> Result<()> {
    let rows = kicks
        .iter()
        .enumerate()
        .map(|(id, k)| vec![id.to_string(), fmt5(k.w), fmt5(k.theta), fmt5(k.phi)])
        .collect();
    write_table(path, &["id", "w", "theta", "phi"], rows)
}

fn write_orbits(path: &Path, bound: &[(usize, Kick, Orbit)]) -> Result<()> {
    let rows = bound
        .iter()
        .map(|(id, k, o)| {
            vec![
                id.to_string(),
                fmt5(k.w),
                fmt5(k.theta),
                fmt5(k.phi),
                fmt5(o.period),
                fmt5(o.separation),
                fmt5(o.eccentricity),
            ]
        })
        .collect();
    write_table(
        path,
        &["id", "w", "theta", "phi", "period", "separation", "eccentricity"],
        rows,
    )
}

fn write_grid(path: &Path, cells: &[GridCell]) -> Result<()> {
    let rows = cells
        .iter()
        .enumerate()
        .map(|(id, c)| {
            vec![
                id.to_string(),
                fmt5(c.period),
                fmt5(c.separation),
                fmt5(c.eccentricity),
                format!("{:.5e}", c.probability),
            ]
        })
        .collect();
    write_table(
        path,
        &["id", "period", "separation", "eccentricity", "probability"],
        rows,
    )
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

struct Sample {
    kicks: Vec<Kick>,
    bound: Vec<(usize, Kick, Orbit)>,
    grid: Vec<GridCell>,
}

fn generate(config: &Config) -> Result<Sample> {
    let mut rng = ChaChaRng::seed_from_u64(config.seed);
    let kicks = sample_kicks(config, &mut rng)?;

    let bound: Vec<(usize, Kick, Orbit)> = kicks
        .iter()
        .enumerate()
        .filter_map(|(id, kick)| orbit_after_kick(config, kick).map(|o| (id, *kick, o)))
        .collect();

    let orbits: Vec<Orbit> = bound.iter().map(|(_, _, o)| *o).collect();
    let grid = grid_of_orbits(config, &orbits, kicks.len());

    Ok(Sample { kicks, bound, grid })
}

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(Path::new(&path))?,
        None => Config::default(),
    };
    log::info!("Sampling {} kicks with {:?}", config.number_of_cases, config);

    let sample = generate(&config)?;
    log::info!(
        "{} of {} binaries stay bound, {} grid cells populated",
        sample.bound.len(),
        sample.kicks.len(),
        sample.grid.len()
    );

    write_kicks(Path::new("kicks.data"), &sample.kicks)?;
    write_orbits(Path::new("orbits.data"), &sample.bound)?;
    write_grid(Path::new("grid.data"), &sample.grid)?;

    println!(
        "Wrote {} kicks, {} bound orbits and {} grid cells",
        sample.kicks.len(),
        sample.bound.len(),
        sample.grid.len()
    );
    Ok(())
}
