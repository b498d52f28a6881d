//! Body fusion - per-part pixel mixing with mutation

use crate::constants::{FUSION_MUTATION_MAX, FUSION_MUTATION_MIN};
use crate::creature::{Body, BodyPart};
use rand::Rng;

/// Index of `color` in `palette`, appending it when first seen
fn palette_index(palette: &mut Vec<String>, color: &str) -> u16 {
    match palette.iter().position(|c| c == color) {
        Some(index) => index as u16,
        None => {
            palette.push(color.to_string());
            (palette.len() - 1) as u16
        }
    }
}

/// Mix two parts pixel by pixel.
///
/// The child covers the larger of both widths and heights. Each pixel is
/// copied from a parent picked with a fair coin; coordinates outside that
/// parent's grid come out transparent. Copied colours are re-indexed into a
/// merged palette. Then a single mutation rate is drawn from [0.05, 0.10)
/// and each opaque pixel independently switches to a random palette colour
/// at that rate.
pub fn fuse_part(a: &BodyPart, b: &BodyPart, rng: &mut impl Rng) -> BodyPart {
    let width = a.width.max(b.width);
    let height = a.height.max(b.height);
    let mut colors: Vec<String> = Vec::new();
    let mut pixels = Vec::with_capacity((width * height) as usize);

    for y in 0..height {
        for x in 0..width {
            let source = if rng.gen_bool(0.5) { a } else { b };
            let pixel = source
                .color_at(x, y)
                .map(|color| palette_index(&mut colors, color));
            pixels.push(pixel);
        }
    }

    let mutation_rate = rng.gen_range(FUSION_MUTATION_MIN..FUSION_MUTATION_MAX);
    if !colors.is_empty() {
        for index in pixels.iter_mut().flatten() {
            if rng.gen::<f64>() < mutation_rate {
                *index = rng.gen_range(0..colors.len()) as u16;
            }
        }
    }

    BodyPart {
        width,
        height,
        pixels,
        colors,
    }
}

fn fuse_optional(
    a: Option<&BodyPart>,
    b: Option<&BodyPart>,
    rng: &mut impl Rng,
) -> Option<BodyPart> {
    match (a, b) {
        (Some(a), Some(b)) => Some(fuse_part(a, b, rng)),
        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
        (None, None) => None,
    }
}

/// Fuse two bodies. Mandatory parts are always pixel-mixed; an optional
/// part only one parent has is inherited unchanged.
pub fn fuse_bodies(a: &Body, b: &Body, rng: &mut impl Rng) -> Body {
    Body {
        head: fuse_part(&a.head, &b.head, rng),
        ears: fuse_part(&a.ears, &b.ears, rng),
        body: fuse_part(&a.body, &b.body, rng),
        legs: fuse_part(&a.legs, &b.legs, rng),
        tail: fuse_optional(a.tail.as_ref(), b.tail.as_ref(), rng),
        wings: fuse_optional(a.wings.as_ref(), b.wings.as_ref(), rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_child_covers_both_parents() {
        let a = BodyPart::solid(4, 6, "#ff8800");
        let b = BodyPart::solid(3, 8, "#ffdd00");
        let mut rng = StdRng::seed_from_u64(21);

        let child = fuse_part(&a, &b, &mut rng);
        assert_eq!((child.width, child.height), (4, 8));
        assert_eq!(child.pixels.len(), 32);
        assert!(child.is_consistent());
    }

    #[test]
    fn test_palette_only_holds_parent_colors() {
        let a = BodyPart::solid(8, 8, "#ff6600");
        let b = BodyPart::solid(8, 8, "#9933ff");
        let mut rng = StdRng::seed_from_u64(8);

        let child = fuse_part(&a, &b, &mut rng);
        assert_eq!(child.opaque_count(), 64);
        assert!(child.colors.iter().all(|c| c == "#ff6600" || c == "#9933ff"));
        assert_eq!(child.colors.len(), 2);
    }

    #[test]
    fn test_pixels_outside_both_parents_are_transparent() {
        // Child is 4x4; everything right of column 0 below row 0 is in neither parent
        let a = BodyPart::solid(4, 1, "#111111");
        let b = BodyPart::solid(1, 4, "#222222");
        let mut rng = StdRng::seed_from_u64(2);

        let child = fuse_part(&a, &b, &mut rng);
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(child.pixel(x, y), None, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_fusing_empty_parts_stays_empty() {
        let a = BodyPart::empty(3, 3);
        let b = BodyPart::empty(2, 2);
        let mut rng = StdRng::seed_from_u64(2);

        let child = fuse_part(&a, &b, &mut rng);
        assert_eq!(child.opaque_count(), 0);
        assert!(child.colors.is_empty());
    }

    #[test]
    fn test_mutation_rate_is_bounded() {
        // Both parents alternate two colours, so the unmutated child
        // keeps index i % 2 at every pixel.
        let mut a = BodyPart::solid(100, 100, "#000000");
        a.colors.push("#ffffff".to_string());
        for (i, p) in a.pixels.iter_mut().enumerate() {
            *p = Some((i % 2) as u16);
        }
        let b = a.clone();
        let mut rng = StdRng::seed_from_u64(99);

        let child = fuse_part(&a, &b, &mut rng);
        let changed = child
            .pixels
            .iter()
            .enumerate()
            .filter(|(i, p)| **p != Some((i % 2) as u16))
            .count();

        // A mutated pixel lands on the other colour half of the time
        let rate = changed as f64 / 10_000.0;
        assert!((0.015..0.06).contains(&rate), "change rate {}", rate);
    }

    #[test]
    fn test_optional_parts() {
        let wings = BodyPart::solid(10, 8, "#8855ee");
        let mut rng = StdRng::seed_from_u64(4);

        let inherited = fuse_optional(None, Some(&wings), &mut rng);
        assert_eq!(inherited, Some(wings.clone()));
        assert_eq!(fuse_optional(None, None, &mut rng), None);
        assert!(fuse_optional(Some(&wings), Some(&wings), &mut rng).is_some());
    }
}
