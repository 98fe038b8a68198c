//! IES LM-63 photometric profile reader
//!
//! Parses type C photometry (the common case for architectural luminaires)
//! into a candela table indexed by vertical and horizontal angle, and
//! evaluates it with bilinear interpolation.

use crate::foundation::math::utils::lerp;
use thiserror::Error;

/// IES parse errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IesError {
    /// No `TILT=` line was found
    #[error("Missing TILT line")]
    MissingTilt,

    /// `TILT=<file>` references are not supported
    #[error("Unsupported TILT mode: {0}")]
    UnsupportedTilt(String),

    /// The numeric block ended early
    #[error("Unexpected end of data while reading {0}")]
    UnexpectedEnd(&'static str),

    /// A token was not a finite number
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    /// A table size is negative, fractional or implausibly large
    #[error("Invalid {0} count: {1}")]
    InvalidCount(&'static str, String),

    /// Angle tables are empty or out of order
    #[error("Invalid angle table: {0}")]
    InvalidAngles(&'static str),
}

/// Photometric coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotometricType {
    /// Type C: vertical axis through the luminaire
    C,
    /// Type B: horizontal axis, used for floodlights
    B,
    /// Type A: horizontal axis, used for automotive lamps
    A,
}

/// Parsed photometric profile
#[derive(Debug, Clone, PartialEq)]
pub struct IesProfile {
    /// Vertical angles in degrees, ascending
    pub vertical_angles: Vec<f32>,
    /// Horizontal angles in degrees, ascending
    pub horizontal_angles: Vec<f32>,
    /// Candela values per horizontal angle, each `vertical_angles.len()` long
    pub candela: Vec<Vec<f32>>,
    /// Coordinate system of the angle tables
    pub photometric_type: PhotometricType,
    /// Largest candela value in the table
    pub peak_candela: f32,
}

/// Upper bound on any table declared in a profile
const MAX_TABLE_LEN: usize = 10_000;

struct Numbers<'a> {
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Numbers<'a> {
    fn next(&mut self, what: &'static str) -> Result<f32, IesError> {
        let token = self.tokens.next().ok_or(IesError::UnexpectedEnd(what))?;
        match token.trim_end_matches(',').parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(IesError::InvalidNumber(token.to_string())),
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn next_count(&mut self, what: &'static str) -> Result<usize, IesError> {
        let value = self.next(what)?;
        if value < 0.0 || value.fract() != 0.0 || value > MAX_TABLE_LEN as f32 {
            return Err(IesError::InvalidCount(what, value.to_string()));
        }
        Ok(value as usize)
    }

    fn take(&mut self, count: usize, what: &'static str) -> Result<Vec<f32>, IesError> {
        (0..count).map(|_| self.next(what)).collect()
    }
}

impl IesProfile {
    /// Parse the text of an IES file
    pub fn parse(text: &str) -> Result<Self, IesError> {
        let (tilt, rest) = split_after_tilt(text)?;

        let mut numbers = Numbers { tokens: rest.split_whitespace() };

        match tilt {
            "NONE" => {}
            "INCLUDE" => {
                // lamp-to-luminaire geometry, then angle/factor pairs
                numbers.next("tilt geometry")?;
                let count = numbers.next_count("tilt angle")?;
                numbers.take(count * 2, "tilt table")?;
            }
            other => return Err(IesError::UnsupportedTilt(other.to_string())),
        }

        numbers.next("lamp count")?;
        numbers.next("lumens per lamp")?;
        let multiplier = numbers.next("candela multiplier")?;
        let vertical_count = numbers.next_count("vertical angle")?;
        let horizontal_count = numbers.next_count("horizontal angle")?;
        let photometric_type = match numbers.next_count("photometric type")? {
            1 => PhotometricType::C,
            2 => PhotometricType::B,
            _ => PhotometricType::A,
        };
        // units, width, length, height, ballast factor, future use, input watts
        numbers.take(7, "luminaire dimensions")?;

        let vertical_angles = numbers.take(vertical_count, "vertical angles")?;
        let horizontal_angles = numbers.take(horizontal_count, "horizontal angles")?;
        validate_angles(&vertical_angles)?;
        validate_angles(&horizontal_angles)?;

        let mut candela = Vec::with_capacity(horizontal_count);
        for _ in 0..horizontal_count {
            let row = numbers.take(vertical_count, "candela values")?;
            let row: Vec<f32> = row.into_iter().map(|c| c * multiplier).collect();
            if let Some(bad) = row.iter().find(|c| !c.is_finite()) {
                return Err(IesError::InvalidNumber(bad.to_string()));
            }
            candela.push(row);
        }

        let peak_candela = candela
            .iter()
            .flatten()
            .copied()
            .fold(0.0_f32, f32::max);

        Ok(Self {
            vertical_angles,
            horizontal_angles,
            candela,
            photometric_type,
            peak_candela,
        })
    }

    /// Candela at vertical angle `theta` and horizontal angle `phi`, in
    /// degrees
    ///
    /// Horizontal symmetry follows the last horizontal angle: 0 means
    /// rotationally symmetric, 90 quadrant symmetric, 180 bilateral.
    pub fn eval(&self, theta: f32, phi: f32) -> f32 {
        let Some(&last_phi) = self.horizontal_angles.last() else {
            return 0.0;
        };
        if self.vertical_angles.is_empty() {
            return 0.0;
        }

        let phi = phi.rem_euclid(360.0);
        let phi = if last_phi <= 0.0 {
            0.0
        } else if last_phi <= 90.0 {
            let p = phi % 180.0;
            if p > 90.0 { 180.0 - p } else { p }
        } else if last_phi <= 180.0 {
            if phi > 180.0 { 360.0 - phi } else { phi }
        } else {
            phi
        };

        let (h0, h1, ht) = bracket(&self.horizontal_angles, phi);
        let (v0, v1, vt) = bracket(&self.vertical_angles, theta);

        let row = |h: usize| lerp(self.candela[h][v0], self.candela[h][v1], vt);
        lerp(row(h0), row(h1), ht)
    }

    /// Like [`IesProfile::eval`], with the vertical angle rescaled
    ///
    /// `angle_scale` 0 leaves the profile unchanged; positive values widen
    /// it and negative values (above -1) narrow it. `normalize` divides by
    /// the peak so the brightest direction evaluates to 1.
    pub fn eval_shaped(&self, theta: f32, phi: f32, angle_scale: f32, normalize: bool) -> f32 {
        let scale = 1.0 + angle_scale;
        let theta = if scale > 0.0 { theta / scale } else { theta };
        let value = self.eval(theta, phi);
        if normalize && self.peak_candela > 0.0 {
            value / self.peak_candela
        } else {
            value
        }
    }
}

fn split_after_tilt(text: &str) -> Result<(&str, &str), IesError> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if let Some(mode) = trimmed.strip_prefix("TILT=") {
            return Ok((mode.trim(), &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(IesError::MissingTilt)
}

fn validate_angles(angles: &[f32]) -> Result<(), IesError> {
    if angles.is_empty() {
        return Err(IesError::InvalidAngles("empty"));
    }
    if angles.windows(2).any(|w| w[1] < w[0]) {
        return Err(IesError::InvalidAngles("not ascending"));
    }
    Ok(())
}

/// Indices of the table entries around `x` and the blend factor between
/// them, clamping outside the table
fn bracket(angles: &[f32], x: f32) -> (usize, usize, f32) {
    let last = angles.len() - 1;
    // NaN clamps to the first entry
    if x.is_nan() || x <= angles[0] {
        return (0, 0, 0.0);
    }
    if x >= angles[last] {
        return (last, last, 0.0);
    }
    let upper = angles.partition_point(|&a| a <= x);
    let lower = upper - 1;
    let span = angles[upper] - angles[lower];
    let t = if span > 0.0 { (x - angles[lower]) / span } else { 0.0 };
    (lower, upper, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SYMMETRIC: &str = "IESNA:LM-63-2002
[TEST] symmetric downlight
[MANUFAC] none
TILT=NONE
1 1000 2.0 3 1 1 2 0 0 0
1.0 1.0 50
0 45 90
0
100 50 0
";

    const BILATERAL: &str = "IESNA91
TILT=INCLUDE
1
2
0 90
1 1
1 -1 1 2 3 1 1 0 0 0
1 1 10
0 90
0 90 180
10 0
20 0
30 0
";

    #[test]
    fn test_parse_symmetric_profile() {
        let profile = IesProfile::parse(SYMMETRIC).unwrap();
        assert_eq!(profile.vertical_angles, vec![0.0, 45.0, 90.0]);
        assert_eq!(profile.candela, vec![vec![200.0, 100.0, 0.0]]);
        assert_eq!(profile.photometric_type, PhotometricType::C);
        assert_relative_eq!(profile.peak_candela, 200.0);

        assert_relative_eq!(profile.eval(0.0, 123.0), 200.0);
        assert_relative_eq!(profile.eval(22.5, 0.0), 150.0);
        assert_relative_eq!(profile.eval(180.0, 0.0), 0.0);
    }

    #[test]
    fn test_bilateral_symmetry_and_tilt_include() {
        let profile = IesProfile::parse(BILATERAL).unwrap();
        assert_eq!(profile.horizontal_angles, vec![0.0, 90.0, 180.0]);

        assert_relative_eq!(profile.eval(0.0, 45.0), 15.0);
        // 270 mirrors to 90
        assert_relative_eq!(profile.eval(0.0, 270.0), 20.0);
    }

    #[test]
    fn test_shaped_eval() {
        let profile = IesProfile::parse(SYMMETRIC).unwrap();
        assert_relative_eq!(profile.eval_shaped(0.0, 0.0, 0.0, true), 1.0);
        // Doubling the spread moves the 45 degree sample out to 90
        assert_relative_eq!(profile.eval_shaped(90.0, 0.0, 1.0, false), 100.0);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(IesProfile::parse("IESNA91\n1 2 3"), Err(IesError::MissingTilt));
        assert!(matches!(
            IesProfile::parse("TILT=lamp.tlt\n"),
            Err(IesError::UnsupportedTilt(_))
        ));
        assert!(matches!(
            IesProfile::parse("TILT=NONE\n1 1000 1 3 1 1 2 0 0 0\n1 1 50\n0 45"),
            Err(IesError::UnexpectedEnd(_))
        ));
        assert!(matches!(
            IesProfile::parse("TILT=NONE\n1 lots 1"),
            Err(IesError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_out_of_range_numbers_are_rejected() {
        assert!(matches!(
            IesProfile::parse("TILT=INCLUDE\n1\n1e30\n"),
            Err(IesError::InvalidCount("tilt angle", _))
        ));
        assert!(matches!(
            IesProfile::parse("TILT=NONE\n1 1000 1 20000 1 1 2 0 0 0\n"),
            Err(IesError::InvalidCount("vertical angle", _))
        ));
        assert!(matches!(
            IesProfile::parse("TILT=NONE\n1 1000 1 2 1 1 2 0 0 0\n1 1 10\nNaN 90\n0\n5 1\n"),
            Err(IesError::InvalidNumber(_))
        ));
        assert!(matches!(
            IesProfile::parse("TILT=NONE\n1 1000 1e30 2 1 1 2 0 0 0\n1 1 10\n0 90\n0\n1e30 1\n"),
            Err(IesError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_nan_angles_clamp_in_eval() {
        let profile = IesProfile::parse(SYMMETRIC).unwrap();
        assert_relative_eq!(profile.eval(f32::NAN, 0.0), 200.0);
        let bilateral = IesProfile::parse(BILATERAL).unwrap();
        assert_relative_eq!(bilateral.eval(0.0, f32::NAN), 10.0);

        let empty = IesProfile {
            vertical_angles: Vec::new(),
            ..profile
        };
        assert_relative_eq!(empty.eval(10.0, 0.0), 0.0);
    }
}
