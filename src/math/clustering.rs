//! Whitening and Lloyd's k-means over row-major sample matrices

use crate::io::error::{Result, invalid_parameter, invalid_source};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};
use rand::Rng;

/// Output of a k-means run
#[derive(Debug, Clone)]
pub struct Clustering {
    /// One centroid per row, exactly `k` rows
    pub centroids: Array2<f64>,
    /// Mean Euclidean distance from each sample to its nearest centroid
    pub distortion: f64,
    /// Lloyd iterations actually performed
    pub iterations: usize,
}

/// Scale every column to unit standard deviation
///
/// Returns the whitened samples together with the divisors used. A column
/// with zero spread is divided by one so it passes through unchanged.
pub fn whiten(samples: &Array2<f64>) -> (Array2<f64>, Array1<f64>) {
    let sigma = crate::analysis::statistics::channel_std_devs(samples)
        .mapv(|s| if s > 0.0 && s.is_finite() { s } else { 1.0 });
    let whitened = samples / &sigma;
    (whitened, sigma)
}

/// Index of the centroid closest to `sample`, with its squared distance
pub fn nearest_centroid(
    sample: ArrayView1<'_, f64>,
    centroids: ArrayView2<'_, f64>,
) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (index, centroid) in centroids.outer_iter().enumerate() {
        let distance: f64 = sample
            .iter()
            .zip(centroid.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        if distance < best.1 {
            best = (index, distance);
        }
    }
    best
}

/// Lloyd's algorithm with centroids seeded from randomly chosen samples
///
/// Stops after `max_iterations` rounds or once the distortion improves by no
/// more than `threshold`. A centroid whose cluster empties keeps its previous
/// position, so the result always has exactly `k` rows; coinciding centroids
/// are possible when `k` exceeds the number of distinct samples.
///
/// # Errors
///
/// Returns an error if `k` is zero or there are no samples
pub fn kmeans<R: Rng + ?Sized>(
    samples: ArrayView2<'_, f64>,
    k: usize,
    max_iterations: usize,
    threshold: f64,
    rng: &mut R,
) -> Result<Clustering> {
    if k == 0 {
        return Err(invalid_parameter("k", &k, &"need at least one cluster"));
    }
    let n = samples.nrows();
    if n == 0 {
        return Err(invalid_source(&"cannot cluster an empty sample set"));
    }

    let mut centroids = initial_centroids(samples, k, rng);
    let mut assignments = vec![0usize; n];
    let mut previous = f64::INFINITY;
    let mut distortion = f64::INFINITY;
    let mut iterations = 0;

    while iterations < max_iterations.max(1) {
        iterations += 1;

        let mut total = 0.0;
        for (slot, sample) in assignments.iter_mut().zip(samples.outer_iter()) {
            let (index, squared) = nearest_centroid(sample, centroids.view());
            *slot = index;
            total += squared.sqrt();
        }
        distortion = total / n as f64;

        update_centroids(samples, &assignments, &mut centroids);

        if previous - distortion <= threshold {
            break;
        }
        previous = distortion;
    }

    Ok(Clustering {
        centroids,
        distortion,
        iterations,
    })
}

fn initial_centroids<R: Rng + ?Sized>(
    samples: ArrayView2<'_, f64>,
    k: usize,
    rng: &mut R,
) -> Array2<f64> {
    let n = samples.nrows();
    let picks: Vec<usize> = if k <= n {
        rand::seq::index::sample(rng, n, k).into_vec()
    } else {
        (0..k).map(|_| rng.random_range(0..n)).collect()
    };
    samples.select(Axis(0), &picks)
}

fn update_centroids(
    samples: ArrayView2<'_, f64>,
    assignments: &[usize],
    centroids: &mut Array2<f64>,
) {
    let mut sums = Array2::<f64>::zeros(centroids.raw_dim());
    let mut counts = vec![0usize; centroids.nrows()];

    for (sample, &cluster) in samples.outer_iter().zip(assignments) {
        if let (Some(count), Some(mut sum)) = (
            counts.get_mut(cluster),
            sums.axis_iter_mut(Axis(0)).nth(cluster),
        ) {
            *count += 1;
            sum += &sample;
        }
    }

    for ((mut centroid, sum), &count) in centroids
        .outer_iter_mut()
        .zip(sums.outer_iter())
        .zip(&counts)
    {
        if count > 0 {
            let divisor = count as f64;
            Zip::from(&mut centroid)
                .and(&sum)
                .for_each(|c, &s| *c = s / divisor);
        }
    }
}
