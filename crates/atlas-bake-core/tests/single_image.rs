use atlas_bake_core::prelude::*;

fn patterned(key: &str, width: u32, height: u32, bpp: u32, salt: u8) -> SourceImage {
    let len = (width * height * bpp) as usize;
    let pixels: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_add(salt)).collect();
    SourceImage::new(key, pixels, width, height, bpp).expect("valid image")
}

#[test]
fn single_image_seeds_the_atlas() {
    let img = patterned("solo", 16, 16, 4, 7);
    let expected = img.pixels.clone();
    let cfg = PackerConfig::builder().with_max_dimensions(64, 64).build();

    let out = pack_images(vec![img], &cfg).expect("pack");

    assert_eq!((out.width, out.height), (16, 16));
    assert_eq!(out.placements.len(), 1);
    let p = &out.placements[0];
    assert_eq!((p.x, p.y), (0, 0));
    assert_eq!(p.u, 0.0);
    assert_eq!(p.v, 0.0);
    assert_eq!((p.width, p.height), (16, 16));

    // The page is exactly the source: the seed leaf was an exact fit.
    assert_eq!(out.pixels, expected);
    assert_eq!(out.stats.num_placed, 1);
    assert_eq!(out.stats.occupancy, 1.0);
}

#[test]
fn single_image_larger_than_cap_is_clipped_not_lost() {
    // The seed root always matches the first image, even past the cap; the
    // final extent clamps back down.
    let img = patterned("big", 100, 40, 4, 3);
    let cfg = PackerConfig::builder().with_max_dimensions(64, 64).build();

    let out = pack_images(vec![img], &cfg).expect("pack");

    assert_eq!((out.width, out.height), (64, 40));
    assert_eq!(out.placements.len(), 1);
    assert_eq!((out.placements[0].x, out.placements[0].y), (0, 0));
}
