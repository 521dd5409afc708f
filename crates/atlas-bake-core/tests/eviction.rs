use atlas_bake_core::prelude::*;

fn solid(key: &str, byte: u8) -> SourceImage {
    SourceImage::new(key, vec![byte; 32 * 32 * 4], 32, 32, 4).expect("valid image")
}

#[test]
fn fifth_square_evicts_the_oldest_placement() {
    let cfg = PackerConfig::builder().with_max_dimensions(64, 64).build();
    let out = pack_images(
        vec![
            solid("a", 1),
            solid("b", 2),
            solid("c", 3),
            solid("d", 4),
            solid("e", 5),
        ],
        &cfg,
    )
    .expect("pack");

    // The atlas is full at four squares; the fifth reclaims the
    // least-recent leaf.
    assert_eq!((out.width, out.height), (64, 64));
    assert_eq!(out.placements.len(), 4);
    assert_eq!(out.stats.num_placed, 4);

    let keys: Vec<&str> = out.placements.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["e", "d", "c", "b"]);
    assert!(!keys.contains(&"a"), "oldest placement must be gone");

    // "e" took over "a"'s quadrant.
    assert_eq!((out.placements[0].x, out.placements[0].y), (0, 0));
    let px = |x: u32, y: u32| out.pixels[((y * 64 + x) * 4) as usize];
    assert_eq!(px(16, 16), 5);
}
