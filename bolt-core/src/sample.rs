use rand::Rng;
use rand_distr::StandardNormal;

/// Standard deviation of the raw split-proportion sample.
///
/// Small on purpose: most raw samples land near `0.0`, and the fold in
/// [`fold_proportion`] mirrors the negative half up to `1.0`, so splits
/// are strongly biased toward one dominant child.
const PROPORTION_STD_DEV: f32 = 0.1;

/// Draws one sample from `Normal(mean, std_dev)`.
///
/// Implemented as a standard-normal draw scaled by the caller's mean and
/// deviation, so it is total for every finite input — including a zero or
/// negative `std_dev` — and never needs a fallible distribution
/// constructor.
///
/// ### Parameters
/// - `rng` - The random stream to draw from.
/// - `mean` - Mean of the distribution.
/// - `std_dev` - Standard deviation of the distribution.
pub fn normal(rng: &mut impl Rng, mean: f32, std_dev: f32) -> f32 {
    let z: f32 = rng.sample(StandardNormal);
    mean + std_dev * z
}

/// Folds a raw normal sample into a valid split proportion in `[0, 1]`.
///
/// Negative samples are reflected to the top of the range (`x -> 1 + x`)
/// before clamping, so a draw just below zero becomes a proportion just
/// below one instead of being clipped to zero. Together with the small
/// deviation in [`split_proportion`] this concentrates the mass near the
/// ends of the range: one child usually inherits almost all of the
/// parent's size.
pub fn fold_proportion(x: f32) -> f32 {
    let folded = if x < 0.0 { 1.0 + x } else { x };
    folded.clamp(0.0, 1.0)
}

/// Samples the fraction of a parent's size allocated to its first child.
pub fn split_proportion(rng: &mut impl Rng) -> f32 {
    fold_proportion(normal(rng, 0.0, PROPORTION_STD_DEV))
}
