//! K-means palette construction.
//!
//! Derives a fixed-size palette from a pixel population by clustering in
//! RGB space:
//!
//! 1. Reduce the pixels to a histogram of distinct colors with counts,
//!    sorted by color so the run does not depend on hash ordering.
//! 2. Pick `k = min(palette_size, distinct colors)` initial centers with
//!    k-means++ driven by a seeded [`StdRng`].
//! 3. Lloyd iterations over the weighted histogram: assign every color to
//!    its nearest center, move each center to the weighted mean of its
//!    colors, and reseed any center that lost all of its colors to the
//!    color farthest from every current center.
//! 4. Stop when an assignment pass changes nothing, or at the iteration cap.
//! 5. Round centers to the nearest integer channel values.
//!
//! Clustering the weighted histogram is equivalent to clustering each pixel
//! individually, and much cheaper for images with large flat regions.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::palette::{Palette, MAX_PALETTE_SIZE};
use crate::api::ConvertError;
use crate::color::{squared_distance, Rgb};

/// Default cap on Lloyd iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 32;

/// Largest iteration cap a [`PaletteBuilder`] accepts.
pub const MAX_ITERATIONS_LIMIT: usize = 100;

/// Build a palette of up to `palette_size` colors from `pixels`.
///
/// Shorthand for `PaletteBuilder::new(palette_size).seed(seed).build(pixels)`.
///
/// # Errors
///
/// - [`ConvertError::InvalidInput`] if `pixels` is empty or `palette_size` is 0
/// - [`ConvertError::ResourceExhausted`] if `palette_size` exceeds 256
///
/// # Example
///
/// ```
/// use retro_quant::{build_palette, Rgb};
///
/// let pixels = [Rgb::new(10, 20, 30), Rgb::new(30, 40, 50)];
/// let palette = build_palette(&pixels, 1, 42).unwrap();
/// assert_eq!(palette.colors(), &[Rgb::new(20, 30, 40)]);
/// ```
pub fn build_palette(pixels: &[Rgb], palette_size: usize, seed: u64) -> Result<Palette, ConvertError> {
    PaletteBuilder::new(palette_size).seed(seed).build(pixels)
}

/// Configurable k-means palette builder.
///
/// The builder is reusable and deterministic: the same pixels, palette size,
/// seed and iteration cap always produce the same palette.
///
/// # Example
///
/// ```
/// use retro_quant::{PaletteBuilder, Rgb};
///
/// let pixels = vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255), Rgb::new(250, 250, 250)];
/// let palette = PaletteBuilder::new(2)
///     .seed(7)
///     .max_iterations(10)
///     .build(&pixels)
///     .unwrap();
/// assert_eq!(palette.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteBuilder {
    palette_size: usize,
    seed: u64,
    max_iterations: usize,
}

impl PaletteBuilder {
    /// Create a builder for `palette_size` colors with seed 0 and
    /// [`DEFAULT_MAX_ITERATIONS`].
    pub fn new(palette_size: usize) -> Self {
        Self {
            palette_size,
            seed: 0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the seed for k-means++ initialization.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the Lloyd iteration cap (1..=100).
    #[inline]
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Requested palette size.
    #[inline]
    pub fn palette_size(&self) -> usize {
        self.palette_size
    }

    /// Cluster `pixels` into a palette.
    ///
    /// The result has `min(palette_size, distinct colors in pixels)` entries.
    pub fn build(&self, pixels: &[Rgb]) -> Result<Palette, ConvertError> {
        self.validate()?;
        if pixels.is_empty() {
            return Err(ConvertError::invalid("cannot build a palette from zero pixels"));
        }

        let histogram = Histogram::from_pixels(pixels);
        let k = self.palette_size.min(histogram.len());

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centers = init_centers(&histogram, k, &mut rng);
        let (iterations, converged) = lloyd(&histogram, &mut centers, self.max_iterations);

        tracing::debug!(
            requested = self.palette_size,
            colors = k,
            distinct = histogram.len(),
            pixels = pixels.len(),
            iterations,
            converged,
            "Built k-means palette"
        );

        Palette::new(centers.into_iter().map(Rgb::from_f64_rounded).collect())
    }

    fn validate(&self) -> Result<(), ConvertError> {
        if self.palette_size == 0 {
            return Err(ConvertError::invalid("palette size must be at least 1"));
        }
        if self.palette_size > MAX_PALETTE_SIZE {
            return Err(ConvertError::exhausted(format!(
                "palette size {} exceeds maximum of {}",
                self.palette_size, MAX_PALETTE_SIZE
            )));
        }
        if self.max_iterations == 0 || self.max_iterations > MAX_ITERATIONS_LIMIT {
            return Err(ConvertError::invalid(format!(
                "max iterations must be between 1 and {}, got {}",
                MAX_ITERATIONS_LIMIT, self.max_iterations
            )));
        }
        Ok(())
    }
}

/// Distinct colors with their pixel counts, sorted by color.
struct Histogram {
    colors: Vec<[f64; 3]>,
    weights: Vec<f64>,
}

impl Histogram {
    fn from_pixels(pixels: &[Rgb]) -> Self {
        let mut counts: HashMap<Rgb, u64> = HashMap::new();
        for &p in pixels {
            *counts.entry(p).or_insert(0) += 1;
        }

        let mut entries: Vec<(Rgb, u64)> = counts.into_iter().collect();
        entries.sort_unstable_by_key(|&(color, _)| color);

        Self {
            colors: entries
                .iter()
                .map(|(c, _)| [c.r as f64, c.g as f64, c.b as f64])
                .collect(),
            weights: entries.iter().map(|&(_, n)| n as f64).collect(),
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.colors.len()
    }
}

/// Index of the nearest center; ties go to the lowest index.
#[inline]
fn nearest_center(centers: &[[f64; 3]], color: [f64; 3]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = f64::MAX;
    for (i, &c) in centers.iter().enumerate() {
        let d = squared_distance(color, c);
        if d < best_dist {
            best_dist = d;
            best_idx = i;
        }
    }
    best_idx
}

/// k-means++ seeding over the weighted histogram.
///
/// Requires `1 <= k <= histogram.len()`. Every chosen center is a distinct
/// histogram color.
fn init_centers(histogram: &Histogram, k: usize, rng: &mut StdRng) -> Vec<[f64; 3]> {
    let n = histogram.len();
    let mut centers = Vec::with_capacity(k);

    // First center: probability proportional to pixel count.
    let total: f64 = histogram.weights.iter().sum();
    let first = pick_weighted(&histogram.weights, total, rng).unwrap_or(0);
    centers.push(histogram.colors[first]);

    let mut min_dist: Vec<f64> = histogram
        .colors
        .iter()
        .map(|&c| squared_distance(c, histogram.colors[first]))
        .collect();

    while centers.len() < k {
        // Subsequent centers: probability proportional to count * D^2.
        // Already-chosen colors have D = 0 and are never picked again.
        let scores: Vec<f64> = (0..n)
            .map(|i| histogram.weights[i] * min_dist[i])
            .collect();
        let total: f64 = scores.iter().sum();

        let next = pick_weighted(&scores, total, rng).unwrap_or_else(|| farthest(&min_dist));
        let center = histogram.colors[next];
        centers.push(center);

        for (d, &c) in min_dist.iter_mut().zip(&histogram.colors) {
            *d = d.min(squared_distance(c, center));
        }
    }

    centers
}

/// Draw an index with probability proportional to `scores[i]`.
///
/// Returns `None` when no entry has a positive score.
fn pick_weighted(scores: &[f64], total: f64, rng: &mut StdRng) -> Option<usize> {
    if !(total > 0.0) {
        return None;
    }
    let target = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (i, &s) in scores.iter().enumerate() {
        if s <= 0.0 {
            continue;
        }
        cumulative += s;
        last_positive = Some(i);
        if cumulative > target {
            return Some(i);
        }
    }
    // Floating-point shortfall: fall back to the last eligible entry.
    last_positive
}

/// Index with the largest distance; lowest index on ties.
fn farthest(distances: &[f64]) -> usize {
    let mut best_idx = 0;
    let mut best = f64::MIN;
    for (i, &d) in distances.iter().enumerate() {
        if d > best {
            best = d;
            best_idx = i;
        }
    }
    best_idx
}

/// Run Lloyd iterations in place. Returns `(iterations, converged)`.
fn lloyd(histogram: &Histogram, centers: &mut [[f64; 3]], max_iterations: usize) -> (usize, bool) {
    let n = histogram.len();
    let k = centers.len();
    let mut assignments = vec![usize::MAX; n];

    for iteration in 1..=max_iterations {
        // Assignment step
        let mut changed = false;
        for (i, &color) in histogram.colors.iter().enumerate() {
            let c = nearest_center(centers, color);
            if assignments[i] != c {
                assignments[i] = c;
                changed = true;
            }
        }
        if !changed {
            return (iteration, true);
        }

        // Update step: weighted means
        let mut sums = vec![[0.0f64; 3]; k];
        let mut counts = vec![0.0f64; k];
        for (i, &c) in assignments.iter().enumerate() {
            let w = histogram.weights[i];
            let color = histogram.colors[i];
            sums[c][0] += color[0] * w;
            sums[c][1] += color[1] * w;
            sums[c][2] += color[2] * w;
            counts[c] += w;
        }

        let mut empty = Vec::new();
        for c in 0..k {
            if counts[c] > 0.0 {
                centers[c] = [
                    sums[c][0] / counts[c],
                    sums[c][1] / counts[c],
                    sums[c][2] / counts[c],
                ];
            } else {
                empty.push(c);
            }
        }

        if !empty.is_empty() {
            reseed_empty(histogram, centers, &empty);
        }
    }

    (max_iterations, false)
}

/// Move each empty cluster's center onto the histogram color farthest from
/// every current center, updating distances after each reseed so two empty
/// clusters never land on the same color.
fn reseed_empty(histogram: &Histogram, centers: &mut [[f64; 3]], empty: &[usize]) {
    let mut min_dist: Vec<f64> = histogram
        .colors
        .iter()
        .map(|&color| {
            centers
                .iter()
                .enumerate()
                .filter(|(c, _)| !empty.contains(c))
                .map(|(_, &center)| squared_distance(color, center))
                .fold(f64::MAX, f64::min)
        })
        .collect();

    for &c in empty {
        let idx = farthest(&min_dist);
        let center = histogram.colors[idx];
        centers[c] = center;
        for (d, &color) in min_dist.iter_mut().zip(&histogram.colors) {
            *d = d.min(squared_distance(color, center));
        }
        tracing::trace!(cluster = c, color = ?center, "Reseeded empty cluster");
    }
}
