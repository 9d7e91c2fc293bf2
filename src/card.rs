//! # Tide Card Compositor
//!
//! Builds the finished card by layering assets onto a clone of the template:
//!
//! 1. Header text (spot name, date label, temperature) in the accent colour
//! 2. Tide curve strip, slid to line up with the low tide
//! 3. "Now" marker, only on today's card
//! 4. High and low tide markers on the day progress axis
//! 5. Tide height labels beside each marker
//! 6. Vertical tide-time labels
//! 7. Weather icon recoloured to the accent colour
//!
//! The renderer holds the assets read-only and every render clones its own
//! canvas, so one [`TideCardRenderer`] can serve concurrent renders from
//! behind an `Arc` without locking.

use crate::assets::{AssetError, AssetSet};
use crate::config::{Config, RenderConfig};
use crate::layout::{progress_x, tide_graph_x_at, LayoutConstants, LayoutVariant};
use crate::recolour::recolour;
use crate::text::{self, render_rotated_time, FontSize, FontStyle, Text, TextAnchor};
use crate::theme::{self, ConditionCode, ConditionTheme, ThemeError, DEFAULT_ACCENT, ICON_PLACEHOLDER};
use crate::{Tide, TideDataError, TideDay, WeatherSample};
use chrono::format::{Item, StrftimeItems};
use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime};
use image::codecs::png::PngEncoder;
use image::{imageops, ColorType, ImageEncoder, Rgb, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Height label colour for the high tide
pub const HI_TIDE_COLOUR: Rgb<u8> = Rgb([0xD8, 0x2E, 0x2A]);
/// Height label colour for the low tide
pub const LO_TIDE_COLOUR: Rgb<u8> = Rgb([0xA1, 0xCC, 0x39]);

/// Height labels sit this far right of their marker
const HEIGHT_LABEL_OFFSET_X: i32 = 14;
/// Time labels sit this far left of their marker
const TIME_LABEL_OFFSET_X: i32 = -2;

#[derive(Error, Debug)]
pub enum CardError {
    #[error(transparent)]
    Data(#[from] TideDataError),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Time and height label of one tide shown on the card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TideMark {
    pub time: NaiveTime,
    pub height: String,
}

impl From<&Tide> for TideMark {
    fn from(tide: &Tide) -> Self {
        Self {
            time: tide.time(),
            height: tide.height_value().to_string(),
        }
    }
}

/// Everything the compositor needs for one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// e.g. `TODAY | 8 July`
    pub header_label: String,
    pub spot_name: String,
    pub high_tide: TideMark,
    pub low_tide: TideMark,
    #[serde(default)]
    pub temperature: Option<i32>,
    #[serde(default)]
    pub condition: Option<ConditionCode>,
    #[serde(default)]
    pub is_today: bool,
    #[serde(default)]
    pub compact: bool,
}

impl RenderRequest {
    /// Request for `day` at `spot`, using the first daytime high and low tide.
    ///
    /// The header reads `TODAY | 8 July` when `day` is `today`,
    /// `TOMORROW | 9 July` the day after, and `Wednesday | 10 July` otherwise.
    pub fn for_day(
        spot: &str,
        day: &TideDay,
        weather: Option<&WeatherSample>,
        today: NaiveDate,
        compact: bool,
    ) -> Result<Self, TideDataError> {
        let (high, low) = day.primary_tides()?;

        let date = day.date();
        let prefix = if date == today {
            "TODAY".to_string()
        } else if today.checked_add_days(Days::new(1)) == Some(date) {
            "TOMORROW".to_string()
        } else {
            day.weekday().to_string()
        };

        Ok(Self {
            header_label: format!("{} | {}", prefix, date.format("%-d %B")),
            spot_name: spot.to_string(),
            high_tide: high.into(),
            low_tide: low.into(),
            temperature: weather.map(|w| w.temperature_c),
            condition: weather.map(|w| w.condition),
            is_today: date == today,
            compact,
        })
    }

    pub fn variant(&self) -> LayoutVariant {
        LayoutVariant::from_compact(self.compact)
    }
}

/// Renders tide cards from a loaded [`AssetSet`].
pub struct TideCardRenderer {
    assets: AssetSet,
    clock_format: String,
    compact_icon: Option<(i32, i32)>,
}

impl TideCardRenderer {
    pub fn new(assets: AssetSet) -> Self {
        Self::with_config(assets, &Config::default())
    }

    pub fn with_config(assets: AssetSet, config: &Config) -> Self {
        let mut clock_format = config.render.clock_format.clone();
        if StrftimeItems::new(&clock_format).any(|item| matches!(item, Item::Error)) {
            tracing::warn!(format = %clock_format, "Invalid clock format, using %H:%M");
            clock_format = RenderConfig::default().clock_format;
        }

        Self {
            assets,
            clock_format,
            compact_icon: config.layout.compact_icon,
        }
    }

    /// Load the assets named by `config` and build a renderer.
    ///
    /// Any asset problem is fatal here so that no render ever runs against an
    /// incomplete asset set.
    pub fn from_config(config: &Config) -> Result<Self, CardError> {
        let assets = AssetSet::load(&config.assets.dir)?;
        Ok(Self::with_config(assets, config))
    }

    pub fn assets(&self) -> &AssetSet {
        &self.assets
    }

    /// Layout constants for `variant`, with the configured compact icon slot.
    pub fn layout(&self, variant: LayoutVariant) -> LayoutConstants {
        let layout = LayoutConstants::for_variant(variant);
        match variant {
            LayoutVariant::Full => layout,
            LayoutVariant::Compact => layout.with_icon(self.compact_icon),
        }
    }

    /// Render `request` to PNG bytes using the local wall clock for the
    /// "now" marker.
    pub fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, CardError> {
        self.render_at(request, Local::now().time())
    }

    /// Render `request` to PNG bytes with an explicit clock.
    pub fn render_at(&self, request: &RenderRequest, now: NaiveTime) -> Result<Vec<u8>, CardError> {
        let canvas = self.compose(request, now);
        encode_png(&canvas)
    }

    /// Build and render the card for `day`.
    pub fn render_day(
        &self,
        spot: &str,
        day: &TideDay,
        weather: Option<&WeatherSample>,
        compact: bool,
    ) -> Result<Vec<u8>, CardError> {
        self.render_day_at(spot, day, weather, compact, Local::now().naive_local())
    }

    /// Build and render the card for `day` as seen at `now`.
    ///
    /// The date half decides the header and whether the "now" marker is
    /// drawn, the time half places that marker.
    pub fn render_day_at(
        &self,
        spot: &str,
        day: &TideDay,
        weather: Option<&WeatherSample>,
        compact: bool,
        now: NaiveDateTime,
    ) -> Result<Vec<u8>, CardError> {
        let request = RenderRequest::for_day(spot, day, weather, now.date(), compact)?;
        self.render_at(&request, now.time())
    }

    /// Composite every layer of the card onto a fresh canvas.
    pub fn compose(&self, request: &RenderRequest, now: NaiveTime) -> RgbaImage {
        let variant = request.variant();
        let layout = self.layout(variant);
        let mut canvas = self.assets.template(variant).clone();

        tracing::debug!(
            spot = %request.spot_name,
            header = %request.header_label,
            ?variant,
            "Composing tide card"
        );

        let weather_theme = request.condition.and_then(|code| match theme::theme(code) {
            Ok(found) => Some(found),
            Err(e) => {
                tracing::warn!(error = %e, "Rendering without weather theme");
                None
            }
        });
        let accent = weather_theme.map(|t| t.accent).unwrap_or(DEFAULT_ACCENT);

        self.draw_header(&mut canvas, &layout, request, accent);

        let graph_x = tide_graph_x_at(request.low_tide.time);
        imageops::overlay(
            &mut canvas,
            &self.assets.tide_graph,
            graph_x as i64,
            layout.tide_graph_y as i64,
        );

        if request.is_today {
            let x = progress_x(Some(now));
            tracing::debug!(x, "Placing time marker");
            imageops::overlay(
                &mut canvas,
                &self.assets.time_marker,
                x as i64,
                layout.time_marker_y as i64,
            );
        }

        let hi_x = progress_x(Some(request.high_tide.time));
        let lo_x = progress_x(Some(request.low_tide.time));
        tracing::debug!(hi_x, lo_x, graph_x, "Placing tide markers");

        for (marker, x) in [
            (&self.assets.hi_tide_marker, hi_x),
            (&self.assets.lo_tide_marker, lo_x),
        ] {
            imageops::overlay(&mut canvas, marker, x as i64, layout.tide_marker_y as i64);
        }

        let label_font = self.assets.fonts.get(FontStyle::BoldCondensed);
        for (mark, x, y, colour) in [
            (&request.high_tide, hi_x, layout.high_label_y, HI_TIDE_COLOUR),
            (&request.low_tide, lo_x, layout.low_label_y, LO_TIDE_COLOUR),
        ] {
            text::draw(
                &mut canvas,
                label_font,
                &Text {
                    text: &mark.height,
                    position: (x + HEIGHT_LABEL_OFFSET_X, y),
                    size: FontSize::Xs,
                    colour,
                    anchor: TextAnchor::Center,
                },
            );
        }

        for (mark, x) in [(&request.high_tide, hi_x), (&request.low_tide, lo_x)] {
            let label = render_rotated_time(label_font, &self.format_time(mark.time));
            imageops::overlay(
                &mut canvas,
                &label,
                (x + TIME_LABEL_OFFSET_X) as i64,
                layout.tide_time_y as i64,
            );
        }

        if let Some(found) = weather_theme {
            self.draw_icon(&mut canvas, &layout, found);
        }

        canvas
    }

    fn draw_header(
        &self,
        canvas: &mut RgbaImage,
        layout: &LayoutConstants,
        request: &RenderRequest,
        accent: Rgb<u8>,
    ) {
        let fonts = &self.assets.fonts;

        text::draw(
            canvas,
            fonts.get(FontStyle::BoldCondensed),
            &Text {
                text: &request.spot_name,
                position: layout.spot_name,
                size: FontSize::Large,
                colour: accent,
                anchor: TextAnchor::Left,
            },
        );
        text::draw(
            canvas,
            fonts.get(FontStyle::Condensed),
            &Text {
                text: &request.header_label,
                position: layout.header,
                size: FontSize::Medium,
                colour: accent,
                anchor: TextAnchor::Left,
            },
        );

        if let Some(temperature) = request.temperature {
            let label = format!("{}º", temperature);
            text::draw(
                canvas,
                fonts.get(FontStyle::Bold),
                &Text {
                    text: &label,
                    position: layout.temperature,
                    size: FontSize::Xl,
                    colour: accent,
                    anchor: TextAnchor::Right,
                },
            );
        }
    }

    fn draw_icon(&self, canvas: &mut RgbaImage, layout: &LayoutConstants, theme: &ConditionTheme) {
        let Some((x, y)) = layout.icon else {
            tracing::debug!("Layout has no icon slot, skipping weather icon");
            return;
        };
        let Some(icon) = self.assets.icon(theme.icon) else {
            // AssetSet::load guarantees an icon for every theme
            tracing::warn!(icon = theme.icon, "Weather icon not loaded");
            return;
        };

        let tinted = recolour(icon, ICON_PLACEHOLDER, theme.accent);
        imageops::overlay(canvas, &tinted, x as i64, y as i64);
    }

    fn format_time(&self, time: NaiveTime) -> String {
        time.format(&self.clock_format).to_string()
    }
}

/// Encode a canvas as PNG bytes.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, CardError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        ColorType::Rgba8,
    )?;
    Ok(bytes)
}
