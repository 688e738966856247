//! Star rating partition for review summaries.

/// Number of stars in a full rating.
pub const MAX_STARS: u8 = 5;

/// How a fractional rating splits into full, half and empty stars.
///
/// A rating of 3.7 shows three full stars, one half star and one empty
/// star. Ratings outside `0..=5` are clamped and `NaN` counts as zero.
///
/// ```rust
/// use boutique_storefront::catalog::StarRating;
///
/// let stars = StarRating::from_rating(3.7);
/// assert_eq!((stars.full, stars.half, stars.empty), (3, true, 1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    /// Partitions `rating` into stars.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_rating(rating: f64) -> Self {
        let rating = if rating.is_nan() {
            0.0
        } else {
            rating.clamp(0.0, f64::from(MAX_STARS))
        };

        // Clamped to 0..=5, so the cast is exact
        let full = rating.floor() as u8;
        let half = rating.fract() >= 0.5;
        let empty = MAX_STARS - full - u8::from(half);

        Self { full, half, empty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partitions_always_sum_to_five() {
        for tenths in 0..=50 {
            let stars = StarRating::from_rating(f64::from(tenths) / 10.0);
            assert_eq!(stars.full + u8::from(stars.half) + stars.empty, MAX_STARS);
        }
    }

    #[test]
    fn test_half_star_threshold() {
        assert_eq!(
            StarRating::from_rating(4.5),
            StarRating { full: 4, half: true, empty: 0 }
        );
        assert_eq!(
            StarRating::from_rating(4.49),
            StarRating { full: 4, half: false, empty: 1 }
        );
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        assert_eq!(
            StarRating::from_rating(7.2),
            StarRating { full: 5, half: false, empty: 0 }
        );
        assert_eq!(
            StarRating::from_rating(-1.0),
            StarRating { full: 0, half: false, empty: 5 }
        );
        assert_eq!(StarRating::from_rating(f64::NAN).empty, 5);
    }
}
