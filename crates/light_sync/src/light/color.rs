//! Color temperature conversion

use crate::foundation::math::Vec3;

/// Rec.709 luminance weights
const LUMINANCE: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Relative luminance of a linear RGB color
pub fn luminance(rgb: &Vec3) -> f32 {
    LUMINANCE[0] * rgb.x + LUMINANCE[1] * rgb.y + LUMINANCE[2] * rgb.z
}

/// Approximate RGB of a blackbody at `kelvin`, valid from 1000 K to 40000 K
///
/// Fitted curve by Tanner Helland; inputs outside the range are clamped.
pub fn blackbody_rgb(kelvin: f32) -> Vec3 {
    let temp = kelvin.clamp(1000.0, 40000.0) / 100.0;

    let r = if temp <= 66.0 {
        1.0
    } else {
        (329.698_73 * (temp - 60.0).powf(-0.133_204_76) / 255.0).clamp(0.0, 1.0)
    };

    let g = if temp <= 66.0 {
        ((99.470_8 * temp.ln() - 161.119_57) / 255.0).clamp(0.0, 1.0)
    } else {
        (288.122_16 * (temp - 60.0).powf(-0.075_514_85) / 255.0).clamp(0.0, 1.0)
    };

    let b = if temp >= 66.0 {
        1.0
    } else if temp <= 19.0 {
        0.0
    } else {
        ((138.517_73 * (temp - 10.0).ln() - 305.044_8) / 255.0).clamp(0.0, 1.0)
    };

    Vec3::new(r, g, b)
}

/// Blackbody tint scaled to unit luminance, so enabling a color
/// temperature changes hue but not brightness
pub fn blackbody_tint(kelvin: f32) -> Vec3 {
    let rgb = blackbody_rgb(kelvin);
    let lum = luminance(&rgb);
    if lum > 0.0 { rgb / lum } else { Vec3::new(1.0, 1.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tint_has_unit_luminance() {
        for kelvin in [1500.0, 3200.0, 6500.0, 10000.0] {
            assert_relative_eq!(luminance(&blackbody_tint(kelvin)), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_warm_and_cool_ordering() {
        let warm = blackbody_rgb(2700.0);
        let cool = blackbody_rgb(12000.0);
        assert!(warm.x > warm.z);
        assert!(cool.z > cool.x);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(blackbody_rgb(10.0), blackbody_rgb(1000.0));
        assert_eq!(blackbody_rgb(1.0e6), blackbody_rgb(40000.0));
    }
}
