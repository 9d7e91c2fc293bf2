//! Exact-match colour substitution for RGBA images.

use image::{Rgb, Rgba, RgbaImage};

/// Replace every pixel whose RGB equals `from` with `to`.
///
/// Alpha takes no part in the match and is never modified. All other pixels
/// pass through unchanged.
pub fn recolour(image: &RgbaImage, from: Rgb<u8>, to: Rgb<u8>) -> RgbaImage {
    let mut out = image.clone();
    recolour_mut(&mut out, from, to);
    out
}

/// In-place variant of [`recolour`].
pub fn recolour_mut(image: &mut RgbaImage, from: Rgb<u8>, to: Rgb<u8>) {
    let Rgb([fr, fg, fb]) = from;
    let Rgb([tr, tg, tb]) = to;

    for pixel in image.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        if (r, g, b) == (fr, fg, fb) {
            *pixel = Rgba([tr, tg, tb, a]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const ACCENT: Rgb<u8> = Rgb([0xFD, 0xC0, 0x17]);

    /// 4×2 image mixing placeholder pixels at several alphas with other colours
    fn sample_icon() -> RgbaImage {
        let pixels = [
            Rgba([255, 255, 255, 255]),
            Rgba([255, 255, 255, 128]),
            Rgba([255, 255, 255, 0]),
            Rgba([200, 200, 200, 255]),
            Rgba([0, 0, 0, 0]),
            Rgba([255, 255, 254, 255]),
            Rgba([0xFD, 0xC0, 0x17, 40]),
            Rgba([12, 34, 56, 78]),
        ];
        RgbaImage::from_fn(4, 2, |x, y| pixels[(y * 4 + x) as usize])
    }

    #[test]
    fn test_replaces_exact_matches_only() {
        let out = recolour(&sample_icon(), WHITE, ACCENT);

        assert_eq!(*out.get_pixel(0, 0), Rgba([0xFD, 0xC0, 0x17, 255]));
        assert_eq!(*out.get_pixel(1, 0), Rgba([0xFD, 0xC0, 0x17, 128]));
        assert_eq!(*out.get_pixel(2, 0), Rgba([0xFD, 0xC0, 0x17, 0]));
        // near misses are untouched
        assert_eq!(*out.get_pixel(3, 0), Rgba([200, 200, 200, 255]));
        assert_eq!(*out.get_pixel(1, 1), Rgba([255, 255, 254, 255]));
    }

    #[test]
    fn test_alpha_plane_preserved() {
        let input = sample_icon();
        let out = recolour(&input, WHITE, ACCENT);

        assert_eq!(out.dimensions(), input.dimensions());
        for (a, b) in input.pixels().zip(out.pixels()) {
            assert_eq!(a.0[3], b.0[3]);
        }
    }

    #[test]
    fn test_idempotent_once_source_colour_is_gone() {
        let once = recolour(&sample_icon(), WHITE, ACCENT);
        let twice = recolour(&once, WHITE, ACCENT);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_inverse_restores_source_coloured_pixels() {
        let input = sample_icon();
        let back = recolour(&recolour(&input, WHITE, ACCENT), ACCENT, WHITE);

        for (original, restored) in input.pixels().zip(back.pixels()) {
            let was_source = original.0[..3] == WHITE.0;
            let was_target = original.0[..3] == ACCENT.0;
            if was_source || !was_target {
                assert_eq!(original, restored);
            }
        }
        // a pixel already in the accent colour ends up as the placeholder
        assert_eq!(*back.get_pixel(2, 1), Rgba([255, 255, 255, 40]));
    }
}
