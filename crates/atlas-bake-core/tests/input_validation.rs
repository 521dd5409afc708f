use atlas_bake_core::prelude::*;

#[test]
fn mismatched_bpp_is_fatal_before_any_packing() {
    let rgba = SourceImage::new("a", vec![0; 8 * 8 * 4], 8, 8, 4).expect("valid image");
    let rgb = SourceImage::new("b", vec![0; 8 * 8 * 3], 8, 8, 3).expect("valid image");

    let result = pack_images(vec![rgba, rgb], &PackerConfig::default());
    match result {
        Err(AtlasBakeError::BppMismatch {
            key,
            expected,
            found,
        }) => {
            assert_eq!(key, "b");
            assert_eq!(expected, 4);
            assert_eq!(found, 3);
        }
        _ => panic!("Expected BppMismatch error"),
    }
}

#[test]
fn empty_input_is_rejected() {
    let result = pack_images(vec![], &PackerConfig::default());
    match result {
        Err(AtlasBakeError::Empty) => {}
        _ => panic!("Expected Empty error"),
    }
}

#[test]
fn zero_cap_is_rejected() {
    let cfg = PackerConfig {
        max_width: 0,
        max_height: 64,
        ..Default::default()
    };
    match cfg.validate() {
        Err(AtlasBakeError::InvalidDimensions { width, height }) => {
            assert_eq!(width, 0);
            assert_eq!(height, 64);
        }
        _ => panic!("Expected InvalidDimensions error"),
    }
}

#[test]
fn short_pixel_buffer_is_rejected() {
    let result = SourceImage::new("broken", vec![0; 10], 8, 8, 4);
    match result {
        Err(AtlasBakeError::InvalidInput(msg)) => {
            assert!(msg.contains("broken"));
        }
        _ => panic!("Expected InvalidInput error"),
    }
}

#[test]
fn deep_pixel_formats_are_rejected() {
    let result = SourceImage::new("deep", vec![0; 4 * 4 * 8], 4, 4, 8);
    match result {
        Err(AtlasBakeError::UnsupportedBpp(8)) => {}
        _ => panic!("Expected UnsupportedBpp error"),
    }
}
