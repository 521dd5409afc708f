use atlas_bake_core::prelude::*;

fn solid(key: &str, width: u32, height: u32, byte: u8) -> SourceImage {
    let pixels = vec![byte; (width * height * 4) as usize];
    SourceImage::new(key, pixels, width, height, 4).expect("valid image")
}

#[test]
fn two_equal_squares_grow_sideways() {
    // Equal prospective extents pick horizontal growth; vertical wins only
    // when strictly shorter.
    let cfg = PackerConfig::builder().with_max_dimensions(64, 64).build();
    let out = pack_images(vec![solid("a", 32, 32, 10), solid("b", 32, 32, 20)], &cfg)
        .expect("pack");

    assert_eq!((out.width, out.height), (64, 32));

    // Cache order: most recent first.
    assert_eq!(out.placements[0].key, "b");
    assert_eq!((out.placements[0].x, out.placements[0].y), (32, 0));
    assert_eq!(out.placements[1].key, "a");
    assert_eq!((out.placements[1].x, out.placements[1].y), (0, 0));

    // Both blits landed where the placements say.
    let px = |x: u32, y: u32| out.pixels[((y * out.width + x) * 4) as usize];
    assert_eq!(px(0, 0), 10);
    assert_eq!(px(31, 31), 10);
    assert_eq!(px(32, 0), 20);
    assert_eq!(px(63, 31), 20);
}

#[test]
fn tall_then_wide_fit_without_eviction() {
    // max widths and heights tie at 64, so the sort falls back to height
    // descending and the tall strip goes first.
    let cfg = PackerConfig::builder().with_max_dimensions(128, 128).build();
    let out = pack_images(
        vec![solid("wide", 64, 8, 1), solid("tall", 8, 64, 2)],
        &cfg,
    )
    .expect("pack");

    assert_eq!(out.placements.len(), 2);
    assert!(out.width <= 72 && out.height <= 72);

    let tall = out
        .placements
        .iter()
        .find(|p| p.key == "tall")
        .expect("tall placed");
    let wide = out
        .placements
        .iter()
        .find(|p| p.key == "wide")
        .expect("wide placed");
    assert_eq!((tall.x, tall.y), (0, 0));
    assert_eq!((wide.x, wide.y), (8, 0));
}

#[test]
fn extent_never_shrinks_while_packing() {
    // A mix that forces several expansions; the reported extent covers every
    // placement, so growth was monotone.
    let cfg = PackerConfig::builder().with_max_dimensions(256, 256).build();
    let images = vec![
        solid("a", 40, 40, 1),
        solid("b", 40, 40, 2),
        solid("c", 40, 40, 3),
        solid("d", 24, 24, 4),
        solid("e", 24, 24, 5),
    ];
    let out = pack_images(images, &cfg).expect("pack");

    assert_eq!(out.placements.len(), 5);
    for p in &out.placements {
        assert!(p.x + p.width <= out.width, "{} sticks out right", p.key);
        assert!(p.y + p.height <= out.height, "{} sticks out below", p.key);
    }
}
