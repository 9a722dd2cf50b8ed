// random perpendicular offset for new edge midpoints

use bevy::prelude::*;
use rand::Rng;
use rand_distr::Uniform;

use super::error::{TerrainError, TerrainResult};

/// Edge length is divided by this before flooring to get the displacement scale.
pub const LENGTH_DIVISOR: f32 = 2.3;

/// Reads a raw coordinate slice as a 2D point.
pub fn as_planar(coords: &[f32]) -> TerrainResult<Vec2> {
    match *coords {
        [x, y] => Ok(Vec2::new(x, y)),
        _ => Err(TerrainError::InvalidDimension(coords.len())),
    }
}

/// Largest offset allowed for a segment of the given length.
pub fn max_displacement(length: f32, roughness: f32) -> f32 {
    (length / LENGTH_DIVISOR).floor() * roughness
}

/// Midpoint of `start`..`end` pushed sideways along the segment normal by a
/// uniform draw from `[-alpha, alpha]`, see [`max_displacement`].
///
/// # Errors
///
/// - `InvalidDimension` if either coordinate is not 2D
/// - `DegenerateSegment` if `start == end`
/// - `InvalidRoughness` if `roughness` is negative or not finite
pub fn displaced_midpoint<R: Rng>(
    start: &[f32],
    end: &[f32],
    roughness: f32,
    rng: &mut R,
) -> TerrainResult<Vec2> {
    let start = as_planar(start)?;
    let end = as_planar(end)?;

    if !roughness.is_finite() || roughness < 0.0 {
        return Err(TerrainError::InvalidRoughness(roughness));
    }

    let segment = end - start;
    let length = segment.length();
    if length == 0.0 {
        return Err(TerrainError::DegenerateSegment {
            x: start.x,
            y: start.y,
        });
    }

    // rotate the unit direction by 90 degrees
    let normal = (segment / length).perp();

    let alpha = max_displacement(length, roughness);
    let displacement = if alpha == 0.0 {
        0.0
    } else {
        let spread = Uniform::new_inclusive(-alpha, alpha)
            .map_err(|_| TerrainError::InvalidRoughness(roughness))?;
        rng.sample(spread)
    };

    let midpoint = (start + end) * 0.5;
    Ok(midpoint + normal * displacement)
}
