//! Texture and IES loading during sync

use super::fixtures::{small_image, Harness, RecordingLoader, SPOT_IES};
use crate::accel::SoftwareScene;
use crate::assets::ImageData;
use crate::foundation::math::Vec3;
use crate::scene::{tokens, DirtyBits, Value};
use approx::assert_relative_eq;
use std::path::PathBuf;

fn harness_with(type_name: &str, loader: RecordingLoader) -> Harness {
    Harness::with_loader(type_name, loader, SoftwareScene::new(16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_texture_loads() {
        let loader = RecordingLoader::default().with_texture("panel.png", small_image());
        let mut h = harness_with(tokens::RECT_LIGHT, loader);
        h.set(tokens::TEXTURE_FILE, PathBuf::from("panel.png"));
        h.sync(DirtyBits::ALL_DIRTY);

        let texture = &h.light.data().texture;
        assert!(h.light.data().has_texture());
        assert_eq!((texture.width, texture.height), (2, 1));
        assert_eq!(texture.pixel(1, 0), Some(Vec3::new(0.0, 0.0, 1.0)));
        assert_eq!(texture.source, Some(PathBuf::from("panel.png")));
    }

    #[test]
    fn test_mismatched_texture_is_absent() {
        let broken = ImageData {
            pixels: vec![Vec3::new(1.0, 1.0, 1.0); 3],
            width: 2,
            height: 2,
        };
        let loader = RecordingLoader::default().with_texture("sky.hdr", broken);
        let mut h = harness_with(tokens::DOME_LIGHT, loader);
        h.set(tokens::TEXTURE_FILE, Value::String("sky.hdr".to_string()));
        let left = h.sync(DirtyBits::ALL_DIRTY);

        let texture = &h.light.data().texture;
        assert_eq!(left, DirtyBits::CLEAN);
        assert_eq!((texture.width, texture.height), (0, 0));
        assert!(texture.pixels.is_empty());
        assert!(!h.light.data().geometry_id.is_valid());
    }

    #[test]
    fn test_missing_texture_disables_feature() {
        let mut h = harness_with(tokens::RECT_LIGHT, RecordingLoader::default());
        h.set(tokens::TEXTURE_FILE, PathBuf::from("gone.png"));
        h.set(tokens::INTENSITY, 2.0_f32);
        h.sync(DirtyBits::ALL_DIRTY);

        assert!(!h.light.data().has_texture());
        assert_relative_eq!(h.light.data().intensity, 2.0);
        assert!(h.light.data().geometry_id.is_valid());
    }

    #[test]
    fn test_texture_reloads_only_on_change() {
        let loader = RecordingLoader::default()
            .with_texture("a.png", small_image())
            .with_texture("b.png", ImageData::solid_color(4, 4, Vec3::new(0.5, 0.5, 0.5)));
        let mut h = harness_with(tokens::RECT_LIGHT, loader);
        h.set(tokens::TEXTURE_FILE, PathBuf::from("a.png"));
        h.sync(DirtyBits::ALL_DIRTY);
        assert_eq!(h.request_count(), 1);

        h.set(tokens::INTENSITY, 3.0_f32);
        h.sync(DirtyBits::DIRTY_PARAMS);
        assert_eq!(h.request_count(), 1);

        h.sync(DirtyBits::DIRTY_RESOURCE);
        assert_eq!(h.request_count(), 2);

        h.set(tokens::TEXTURE_FILE, PathBuf::from("b.png"));
        h.sync(DirtyBits::DIRTY_PARAMS);
        assert_eq!(h.request_count(), 3);
        assert_eq!(h.light.data().texture.width, 4);

        h.delegate.clear(&h.path, tokens::TEXTURE_FILE);
        h.sync(DirtyBits::DIRTY_PARAMS);
        assert!(!h.light.data().has_texture());
        assert_eq!(h.request_count(), 3);
    }

    #[test]
    fn test_untextured_kinds_ignore_texture() {
        let loader = RecordingLoader::default().with_texture("panel.png", small_image());
        let mut h = harness_with(tokens::SPHERE_LIGHT, loader);
        h.set(tokens::TEXTURE_FILE, PathBuf::from("panel.png"));
        h.sync(DirtyBits::ALL_DIRTY);

        assert!(!h.light.data().has_texture());
        assert_eq!(h.request_count(), 0);
    }

    #[test]
    fn test_ies_profile_shapes_emission() {
        let loader = RecordingLoader::default().with_ies("spot.ies", SPOT_IES);
        let mut h = harness_with(tokens::SPHERE_LIGHT, loader);
        h.set(tokens::SHAPING_IES_FILE, PathBuf::from("spot.ies"));
        h.set(tokens::SHAPING_IES_NORMALIZE, true);
        h.sync(DirtyBits::ALL_DIRTY);

        let ies = &h.light.data().shaping.ies;
        assert!(h.light.data().has_ies());
        assert_relative_eq!(ies.eval(0.0, 0.0), 1.0);
        assert_relative_eq!(ies.eval(45.0, 0.0), 0.5);

        h.set(tokens::SHAPING_IES_ANGLE_SCALE, 1.0_f32);
        h.sync(DirtyBits::DIRTY_PARAMS);
        assert_relative_eq!(h.light.data().shaping.ies.eval(90.0, 0.0), 0.5);
        assert_eq!(h.request_count(), 1);
    }

    #[test]
    fn test_bad_ies_is_inert() {
        let loader = RecordingLoader::default().with_ies("broken.ies", "IESNA91\nno tilt here\n");
        let mut h = harness_with(tokens::DISK_LIGHT, loader);
        h.set(tokens::SHAPING_IES_FILE, PathBuf::from("broken.ies"));
        h.set(tokens::SHAPING_CONE_ANGLE, 30.0_f32);
        h.sync(DirtyBits::ALL_DIRTY);

        let shaping = &h.light.data().shaping;
        assert!(!h.light.data().has_ies());
        assert_eq!(shaping.ies.source, Some(PathBuf::from("broken.ies")));
        assert_relative_eq!(shaping.ies.eval(10.0, 0.0), 1.0);
        assert_relative_eq!(shaping.cone_angle, 30.0);
    }

    #[test]
    fn test_numerically_broken_ies_is_inert() {
        let cases = [
            ("tilt_overflow.ies", "IESNA91\nTILT=INCLUDE\n1\n1e30\n"),
            ("huge_table.ies", "TILT=NONE\n1 1000 1 3e9 4e9 1 2 0 0 0\n1 1 50\n"),
            ("nan_angles.ies", "TILT=NONE\n1 1000 1 2 1 1 2 0 0 0\n1 1 50\nNaN 90\n0\n5 1\n"),
            ("inf_candela.ies", "TILT=NONE\n1 1000 1 2 1 1 2 0 0 0\n1 1 50\n0 90\n0\n5 inf\n"),
            ("short_row.ies", "TILT=NONE\n1 1000 1 3 2 1 2 0 0 0\n1 1 50\n0 45 90\n0 90\n5 4 3\n2 1\n"),
        ];

        for (file, text) in cases {
            let loader = RecordingLoader::default().with_ies(file, text);
            let mut h = harness_with(tokens::SPHERE_LIGHT, loader);
            h.set(tokens::SHAPING_IES_FILE, PathBuf::from(file));
            h.set(tokens::INTENSITY, 4.0_f32);
            let left = h.sync(DirtyBits::ALL_DIRTY);

            let data = h.light.data();
            assert_eq!(left, DirtyBits::CLEAN, "{}", file);
            assert!(!data.has_ies(), "{}", file);
            assert_eq!(data.shaping.ies.source, Some(PathBuf::from(file)), "{}", file);
            assert_relative_eq!(data.shaping.ies.eval(10.0, 0.0), 1.0);
            assert_relative_eq!(data.intensity, 4.0);
            assert!(data.geometry_id.is_valid(), "{}", file);
        }
    }

    #[test]
    fn test_loaded_ies_survives_nan_directions() {
        let loader = RecordingLoader::default().with_ies("spot.ies", SPOT_IES);
        let mut h = harness_with(tokens::RECT_LIGHT, loader);
        h.set(tokens::SHAPING_IES_FILE, PathBuf::from("spot.ies"));
        h.sync(DirtyBits::ALL_DIRTY);

        let ies = &h.light.data().shaping.ies;
        assert!(h.light.data().has_ies());
        assert!(ies.eval(f32::NAN, 0.0).is_finite());
        assert!(ies.eval(10.0, f32::NAN).is_finite());
    }
}
