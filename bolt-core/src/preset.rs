use std::f32::consts::{FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, FRAC_PI_8};

/// Scalar parameters driving one tree generation.
///
/// The `*_factor` fields are exponents applied to a branch's size, so a
/// factor of `0.0` makes the quantity size-independent and larger factors
/// shrink it faster as branches get smaller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preset {
    pub branch_width: f32,
    pub branch_width_factor: f32,
    pub branch_length_mean: f32,
    pub branch_length_range: f32,
    pub branch_length_factor: f32,
    pub branch_angle_mean: f32,
    pub branch_angle_range: f32,
    pub branch_angle_factor: f32,
}

impl Preset {
    /// Long, narrow forks that stay mostly straight. The classic look.
    pub fn lightning() -> Self {
        Self {
            branch_width: 3.0,
            branch_width_factor: 0.3,
            branch_length_mean: 15.0,
            branch_length_range: 5.0,
            branch_length_factor: 0.3,
            branch_angle_mean: FRAC_PI_6,
            branch_angle_range: FRAC_PI_8,
            branch_angle_factor: 0.0,
        }
    }

    /// Thicker, shorter segments with wide forks; reads as a tree crown.
    pub fn branches() -> Self {
        Self {
            branch_width: 5.0,
            branch_width_factor: 0.5,
            branch_length_mean: 10.0,
            branch_length_range: 3.0,
            branch_length_factor: 0.4,
            branch_angle_mean: FRAC_PI_4,
            branch_angle_range: FRAC_PI_6,
            branch_angle_factor: 0.2,
        }
    }

    /// Strongly size-scaled lengths and angles; gnarled, root-like spread.
    pub fn roots() -> Self {
        Self {
            branch_width: 4.0,
            branch_width_factor: 0.4,
            branch_length_mean: 8.0,
            branch_length_range: 4.0,
            branch_length_factor: 0.5,
            branch_angle_mean: FRAC_PI_3,
            branch_angle_range: FRAC_PI_4,
            branch_angle_factor: 0.1,
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::lightning()
    }
}
