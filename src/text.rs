//! Anchored text runs and rotated time labels.

use image::{imageops, Rgb, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, Scale};

/// Font face: weight and whether it is condensed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Bold,
    Condensed,
    BoldCondensed,
}

impl FontStyle {
    /// File name under the `fonts/` asset directory.
    pub fn file_name(self) -> &'static str {
        match self {
            FontStyle::Bold => "DejaVuSans-Bold.ttf",
            FontStyle::Condensed => "DejaVuSansCondensed.ttf",
            FontStyle::BoldCondensed => "DejaVuSansCondensed-Bold.ttf",
        }
    }
}

/// Text sizes in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontSize {
    Xs = 16,
    Small = 18,
    MediumSm = 40,
    Medium = 50,
    Large = 64,
    Xl = 90,
}

impl FontSize {
    pub fn scale(self) -> Scale {
        Scale::uniform(self as u32 as f32)
    }
}

/// Horizontal pivot of a text run. Runs are always vertically centred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    Left,
    Center,
    Right,
}

/// One run of text to draw on the card.
#[derive(Clone, Debug)]
pub struct Text<'a> {
    pub text: &'a str,
    pub position: (i32, i32),
    pub size: FontSize,
    pub colour: Rgb<u8>,
    pub anchor: TextAnchor,
}

/// Advance width of `text` in pixels.
pub fn text_width(font: &Font<'_>, scale: Scale, text: &str) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Top-left origin for drawing `run` so that its anchor lands on `run.position`.
pub fn anchored_origin(font: &Font<'_>, run: &Text<'_>) -> (i32, i32) {
    let scale = run.size.scale();
    let width = text_width(font, scale, run.text);
    let v = font.v_metrics(scale);
    let height = v.ascent - v.descent;

    let (x, y) = run.position;
    let left = match run.anchor {
        TextAnchor::Left => x as f32,
        TextAnchor::Center => x as f32 - width / 2.0,
        TextAnchor::Right => x as f32 - width,
    };
    let top = y as f32 - height / 2.0;

    (left.round() as i32, top.round() as i32)
}

/// Draw `run` onto `canvas`, anchored at its position.
pub fn draw(canvas: &mut RgbaImage, font: &Font<'_>, run: &Text<'_>) {
    let (x, y) = anchored_origin(font, run);
    let Rgb([r, g, b]) = run.colour;
    draw_text_mut(
        canvas,
        Rgba([r, g, b, 255]),
        x,
        y,
        run.size.scale(),
        font,
        run.text,
    );
}

/// Side of the scratch square the time label is drawn into before rotation.
pub const LABEL_SQUARE: u32 = 50;

/// Render `text` in white on a transparent square and rotate it 90°
/// counter-clockwise, so it reads bottom to top.
///
/// The square is [`LABEL_SQUARE`] pixels unless the text is wider, in which
/// case it grows to fit. Rotation swaps the axes, so the output is never
/// smaller than the square.
///
/// The label is not trimmed to its ink: the transparent remainder of the
/// square is kept, so a label's placement on the card does not depend on
/// which digits it shows.
pub fn render_rotated_time(font: &Font<'_>, text: &str) -> RgbaImage {
    let scale = FontSize::Xs.scale();
    let width = text_width(font, scale, text).ceil() as u32;
    let side = LABEL_SQUARE.max(width);

    let mut label = RgbaImage::new(side, side);
    draw_text_mut(
        &mut label,
        Rgba([255, 255, 255, 255]),
        0,
        0,
        scale,
        font,
        text,
    );
    // glyph edges blend toward transparent black; keep the coverage as alpha only
    for pixel in label.pixels_mut() {
        let alpha = pixel.0[3];
        *pixel = Rgba([255, 255, 255, alpha]);
    }

    imageops::rotate270(&label)
}
