//! Color scales with interpolated lookup, trimming, and contrast search.

use crate::error::ScaleError;
use crate::{Color, ColorSpace, Float};

/// A stop on a color scale, i.e., a color at a position in unit range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScaleStop {
    pub position: Float,
    pub color: Color,
}

impl ColorScaleStop {
    /// Create a new color scale stop.
    pub const fn new(position: Float, color: Color) -> Self {
        Self { position, color }
    }
}

/// The parameters for [`ColorScale::find_next_color`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContrastSearch {
    /// The acceptable difference between achieved and targeted contrast.
    pub tolerance: Float,
    /// The maximum number of halving steps.
    pub max_iterations: usize,
}

impl Default for ContrastSearch {
    fn default() -> Self {
        Self {
            tolerance: 0.005,
            max_iterations: 32,
        }
    }
}

/// A color scale.
///
/// A color scale has one or more stops, sorted by position. Looking up a
/// color between two stops interpolates between the stops' colors in a color
/// space chosen by the caller.
///
/// ```
/// # use swatchbook::{Color, ColorScale, ColorSpace};
/// # use swatchbook::error::ScaleError;
/// let scale = ColorScale::balanced(vec![
///     Color::rgb(1.0, 1.0, 1.0),
///     Color::rgb(0.0, 0.0, 0.0),
/// ])?;
/// assert_eq!(scale.get_color(0.5, ColorSpace::Rgb), Color::rgb(0.5, 0.5, 0.5));
/// # Ok::<(), ScaleError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    stops: Vec<ColorScaleStop>,
}

impl ColorScale {
    /// Create a new color scale from the given stops.
    ///
    /// This function sorts the stops by position. Stops with equal positions
    /// retain their relative order. It fails if there are no stops.
    pub fn new(mut stops: Vec<ColorScaleStop>) -> Result<Self, ScaleError> {
        if stops.is_empty() {
            return Err(ScaleError::NoStops);
        }

        stops.sort_by(|s1, s2| s1.position.total_cmp(&s2.position));
        Ok(Self { stops })
    }

    /// Create a new color scale that spaces the given colors evenly across
    /// unit range.
    pub fn balanced(colors: Vec<Color>) -> Result<Self, ScaleError> {
        let denominator = colors.len().saturating_sub(1).max(1) as Float;
        let stops = colors
            .into_iter()
            .enumerate()
            .map(|(index, color)| ColorScaleStop::new(index as Float / denominator, color))
            .collect();
        Self::new(stops)
    }

    /// Access the stops.
    pub fn stops(&self) -> &[ColorScaleStop] {
        &self.stops
    }

    fn first(&self) -> &ColorScaleStop {
        // Construction guarantees at least one stop.
        &self.stops[0]
    }

    fn last(&self) -> &ColorScaleStop {
        &self.stops[self.stops.len() - 1]
    }

    /// Look up the color at the given position.
    ///
    /// Positions at or below 0 as well as not-a-number yield the first stop's
    /// color, positions at or above 1 the last stop's color. Otherwise, this
    /// method interpolates between the last stop at or before the position and
    /// its successor in the given color space.
    pub fn get_color(&self, position: Float, space: ColorSpace) -> Color {
        if self.stops.len() == 1 || position.is_nan() || position <= 0.0 {
            return self.first().color;
        } else if 1.0 <= position {
            return self.last().color;
        }

        let lower = self
            .stops
            .iter()
            .rposition(|stop| stop.position <= position)
            .unwrap_or(0);
        let upper = (lower + 1).min(self.stops.len() - 1);

        let s1 = &self.stops[lower];
        let s2 = &self.stops[upper];
        let span = s2.position - s1.position;
        if span <= 0.0 {
            return s1.color;
        }

        s1.color
            .interpolate((position - s1.position) / span, &s2.color, space)
    }

    /// Trim this color scale to the given bounds.
    ///
    /// The new scale retains the stops within bounds, synthesizes stops at
    /// the bounds if missing, and renormalizes positions to unit range. Equal
    /// bounds produce a scale with a single stop. This method fails if the
    /// bounds are not-a-number, fall outside unit range, or are inverted.
    pub fn trim(&self, lower: Float, upper: Float, space: ColorSpace) -> Result<Self, ScaleError> {
        if lower.is_nan() || upper.is_nan() || lower < 0.0 || 1.0 < upper || upper < lower {
            return Err(ScaleError::InvalidBounds { lower, upper });
        } else if lower == upper {
            return Self::new(vec![ColorScaleStop::new(0.0, self.get_color(lower, space))]);
        }

        let mut stops: Vec<ColorScaleStop> = self
            .stops
            .iter()
            .filter(|stop| lower <= stop.position && stop.position <= upper)
            .copied()
            .collect();

        if stops.first().map_or(true, |stop| stop.position != lower) {
            stops.insert(0, ColorScaleStop::new(lower, self.get_color(lower, space)));
        }
        if stops.last().map_or(true, |stop| stop.position != upper) {
            stops.push(ColorScaleStop::new(upper, self.get_color(upper, space)));
        }

        let range = upper - lower;
        for stop in stops.iter_mut() {
            stop.position = (stop.position - lower) / range;
        }

        Self::new(stops)
    }

    /// Find the position whose color has the targeted contrast against the
    /// color at the starting position.
    ///
    /// This method searches toward position 0 if `search_darker` is true and
    /// toward position 1 otherwise. If even the color at the end of the search
    /// direction does not exceed the targeted contrast, this method returns
    /// that end. Otherwise, it halves the search range until the contrast is
    /// within tolerance or the iterations are exhausted, in which case it
    /// returns the last midpoint.
    pub fn find_next_color(
        &self,
        start: Float,
        target_ratio: Float,
        search_darker: bool,
        space: ColorSpace,
        search: ContrastSearch,
    ) -> Float {
        let start = if start.is_nan() || start <= 0.0 {
            0.0
        } else if 1.0 <= start {
            1.0
        } else {
            start
        };

        let reference = self.get_color(start, space);
        let end = if search_darker { 0.0 } else { 1.0 };
        if reference.contrast(&self.get_color(end, space)) <= target_ratio {
            return end;
        }

        let (mut lower, mut upper) = if search_darker {
            (0.0, start)
        } else {
            (start, 1.0)
        };
        let mut middle = end;

        for _ in 0..=search.max_iterations {
            middle = (upper - lower).abs() / 2.0 + lower;
            let contrast = reference.contrast(&self.get_color(middle, space));
            if (contrast - target_ratio).abs() <= search.tolerance {
                return middle;
            }

            // Too much contrast means moving back toward the start.
            if (target_ratio < contrast) == search_darker {
                lower = middle;
            } else {
                upper = middle;
            }
        }

        middle
    }
}

#[cfg(test)]
mod test {
    use super::{ColorScale, ColorScaleStop, ContrastSearch};
    use crate::error::ScaleError;
    use crate::{Color, ColorSpace, Float};

    fn gray(value: Float) -> Color {
        Color::rgb(value, value, value)
    }

    fn white_to_black() -> ColorScale {
        ColorScale::new(vec![
            ColorScaleStop::new(0.0, gray(1.0)),
            ColorScaleStop::new(1.0, gray(0.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_new() {
        assert_eq!(ColorScale::new(vec![]), Err(ScaleError::NoStops));
        assert_eq!(ColorScale::balanced(vec![]), Err(ScaleError::NoStops));

        let scale = ColorScale::new(vec![
            ColorScaleStop::new(1.0, gray(0.0)),
            ColorScaleStop::new(0.0, gray(1.0)),
            ColorScaleStop::new(0.5, gray(0.5)),
        ])
        .unwrap();
        let positions: Vec<Float> = scale.stops().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);

        let balanced = ColorScale::balanced(vec![gray(1.0), gray(0.5), gray(0.0)]).unwrap();
        assert_eq!(balanced, scale);
    }

    #[test]
    fn test_get_color() {
        let scale = white_to_black();
        assert_eq!(scale.get_color(0.0, ColorSpace::Rgb), gray(1.0));
        assert_eq!(scale.get_color(1.0, ColorSpace::Rgb), gray(0.0));
        assert_eq!(scale.get_color(-5.0, ColorSpace::Lab), gray(1.0));
        assert_eq!(scale.get_color(5.0, ColorSpace::Lab), gray(0.0));
        assert_eq!(scale.get_color(Float::NAN, ColorSpace::Rgb), gray(1.0));
        assert_eq!(scale.get_color(0.25, ColorSpace::Rgb), gray(0.75));

        let single = ColorScale::new(vec![ColorScaleStop::new(0.3, gray(0.2))]).unwrap();
        assert_eq!(single.get_color(0.9, ColorSpace::Rgb), gray(0.2));

        // Stops at the same position do not divide by zero.
        let step = ColorScale::new(vec![
            ColorScaleStop::new(0.0, gray(1.0)),
            ColorScaleStop::new(0.5, gray(0.8)),
            ColorScaleStop::new(0.5, gray(0.2)),
            ColorScaleStop::new(1.0, gray(0.0)),
        ])
        .unwrap();
        assert_eq!(step.get_color(0.5, ColorSpace::Rgb), gray(0.2));
    }

    #[test]
    fn test_trim() {
        let scale = white_to_black();
        assert!(matches!(
            scale.trim(0.5, 0.4, ColorSpace::Rgb),
            Err(ScaleError::InvalidBounds { .. })
        ));
        assert!(scale.trim(-0.1, 0.4, ColorSpace::Rgb).is_err());
        assert!(scale.trim(0.1, 1.1, ColorSpace::Rgb).is_err());
        assert!(scale.trim(Float::NAN, 0.4, ColorSpace::Rgb).is_err());

        let point = scale.trim(0.25, 0.25, ColorSpace::Rgb).unwrap();
        assert_eq!(point.stops(), &[ColorScaleStop::new(0.0, gray(0.75))]);

        let trimmed = scale.trim(0.25, 0.75, ColorSpace::Rgb).unwrap();
        assert_eq!(
            trimmed.stops(),
            &[
                ColorScaleStop::new(0.0, gray(0.75)),
                ColorScaleStop::new(1.0, gray(0.25)),
            ]
        );

        let three = ColorScale::balanced(vec![gray(1.0), gray(0.5), gray(0.0)]).unwrap();
        let trimmed = three.trim(0.0, 0.75, ColorSpace::Rgb).unwrap();
        let positions: Vec<Float> = trimmed.stops().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.5 / 0.75, 1.0]);
    }

    #[test]
    fn test_find_next_color() {
        let scale = white_to_black();
        let search = ContrastSearch::default();

        // White against black has a contrast of 21, which cannot be exceeded.
        assert_eq!(scale.find_next_color(0.0, 21.5, false, ColorSpace::Rgb, search), 1.0);
        assert_eq!(scale.find_next_color(0.5, 21.0, true, ColorSpace::Rgb, search), 0.0);

        for (start, darker) in [(0.0, false), (1.0, true), (0.3, false), (0.8, true)] {
            let position = scale.find_next_color(start, 3.0, darker, ColorSpace::Rgb, search);
            let reference = scale.get_color(start, ColorSpace::Rgb);
            let contrast = reference.contrast(&scale.get_color(position, ColorSpace::Rgb));
            assert!(
                (contrast - 3.0).abs() <= search.tolerance,
                "start {} darker {} position {} contrast {}",
                start,
                darker,
                position,
                contrast
            );
            if darker {
                assert!(position <= start);
            } else {
                assert!(start <= position);
            }
        }
    }
}
