//! # Card Geometry
//!
//! Fixed anchor coordinates for the two card layouts and the mapping from
//! clock times to horizontal pixel positions.
//!
//! ## Day Progress Axis
//! The tide markers and the "now" marker share one horizontal axis spanning the
//! daytime window: 09:00 sits at [`MARKER_MIN_X`] and 21:00 at [`MARKER_MAX_X`].
//! Times outside the window are legal and land outside that range.
//!
//! ## Tide Curve Strip
//! The tide curve is a pre-rendered 24-hour strip wider than the canvas. It is
//! slid horizontally so that its trough lines up with the day's low tide, see
//! [`tide_graph_x`].
//!
//! Every coordinate here is relative to the template canvas. Nothing is derived
//! from asset pixel sizes, so a layout must always be paired with its own
//! template.

use chrono::{Local, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// X position of 09:00 on the day progress axis
pub const MARKER_MIN_X: i32 = 17;

/// X position of 21:00 on the day progress axis
pub const MARKER_MAX_X: i32 = 800;

/// Length of the daytime window in minutes
const DAYTIME_MINUTES: f64 = 12.0 * 60.0;

/// Tide curve strip offset when the low tide falls at the reference hour
const GRAPH_REFERENCE_X: f64 = -769.0;
const GRAPH_REFERENCE_HOUR: f64 = 3.0;
/// Strip pixels per hour of tide time
const GRAPH_RATE_PER_HOUR: f64 = 66.5833;
const GRAPH_MAX_X: f64 = 30.0;
const GRAPH_MIN_X: f64 = -778.0;

/// Which of the two card variants to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    Full,
    Compact,
}

impl LayoutVariant {
    pub fn from_compact(compact: bool) -> Self {
        if compact {
            LayoutVariant::Compact
        } else {
            LayoutVariant::Full
        }
    }
}

/// Anchor coordinates for one card layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConstants {
    /// Template canvas size this layout was measured against
    pub canvas: (u32, u32),
    /// Left-middle anchor of the date header label
    pub header: (i32, i32),
    /// Left-middle anchor of the spot name
    pub spot_name: (i32, i32),
    /// Right-middle anchor of the temperature
    pub temperature: (i32, i32),
    /// Top-left corner of the weather icon; `None` omits the icon layer
    pub icon: Option<(i32, i32)>,
    pub time_marker_y: i32,
    pub tide_marker_y: i32,
    pub tide_graph_y: i32,
    pub high_label_y: i32,
    pub low_label_y: i32,
    pub tide_time_y: i32,
}

/// 842×596 card with header, weather icon and tide strip.
pub const FULL: LayoutConstants = LayoutConstants {
    canvas: (842, 596),
    header: (30, 59),
    spot_name: (30, 127),
    temperature: (810, 120),
    icon: Some((610, 85)),
    time_marker_y: 490,
    tide_marker_y: 428,
    tide_graph_y: 442,
    high_label_y: 444,
    low_label_y: 520,
    tide_time_y: 448,
};

/// 842×400 card: same header, tide strip lifted by 196 px.
///
/// The weather icon has no agreed slot on this variant and is omitted unless
/// configured through [`LayoutConstants::with_icon`].
pub const COMPACT: LayoutConstants = LayoutConstants {
    canvas: (842, 400),
    header: (30, 59),
    spot_name: (30, 127),
    temperature: (810, 120),
    icon: None,
    time_marker_y: 294,
    tide_marker_y: 232,
    tide_graph_y: 246,
    high_label_y: 248,
    low_label_y: 324,
    tide_time_y: 252,
};

impl LayoutConstants {
    pub fn for_variant(variant: LayoutVariant) -> Self {
        match variant {
            LayoutVariant::Full => FULL,
            LayoutVariant::Compact => COMPACT,
        }
    }

    /// Same layout with the weather icon anchored at `icon` (or hidden on `None`).
    pub fn with_icon(self, icon: Option<(i32, i32)>) -> Self {
        Self { icon, ..self }
    }
}

/// X position of `time` on the day progress axis.
///
/// `None` uses the local wall clock. The result is truncated toward zero and
/// is not clamped: times before 09:00 or from 21:00 fall outside
/// `[MARKER_MIN_X, MARKER_MAX_X]`.
///
/// # Example
/// ```
/// use chrono::NaiveTime;
/// use tide_card_lib::layout::progress_x;
///
/// assert_eq!(progress_x(NaiveTime::from_hms_opt(9, 0, 0)), 17);
/// assert_eq!(progress_x(NaiveTime::from_hms_opt(21, 0, 0)), 800);
/// ```
pub fn progress_x(time: Option<NaiveTime>) -> i32 {
    let time = time.unwrap_or_else(|| Local::now().time());

    let minutes_passed = (time.hour() as i32 - 9) * 60 + time.minute() as i32;
    let fraction = minutes_passed as f64 / DAYTIME_MINUTES;
    let span = (MARKER_MAX_X - MARKER_MIN_X) as f64;

    (MARKER_MIN_X as f64 + span * fraction) as i32
}

/// X offset of the tide curve strip for a day whose first low tide is at
/// `hour:minute`.
///
/// At 03:00 the strip sits at -769 px and it advances 66.5833 px per hour,
/// wrapping back by one cycle (808 px) whenever it passes 30 px. The result
/// always lies in `(-778, 30]`. Rounding is half-to-even.
pub fn tide_graph_x(hour: u32, minute: u32) -> i32 {
    let time_in_hours = hour as f64 + minute as f64 / 60.0;
    let hours_passed = (time_in_hours - GRAPH_REFERENCE_HOUR).rem_euclid(24.0);

    let mut x = GRAPH_REFERENCE_X + hours_passed * GRAPH_RATE_PER_HOUR;
    while x > GRAPH_MAX_X {
        x -= GRAPH_MAX_X - GRAPH_MIN_X;
    }

    x.round_ties_even() as i32
}

/// [`tide_graph_x`] for a wall-clock time.
pub fn tide_graph_x_at(time: NaiveTime) -> i32 {
    tide_graph_x(time.hour(), time.minute())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u32, minute: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(hour, minute, 0)
    }

    #[test]
    fn test_progress_anchors() {
        assert_eq!(progress_x(t(9, 0)), MARKER_MIN_X);
        assert_eq!(progress_x(t(21, 0)), MARKER_MAX_X);
        assert_eq!(progress_x(t(15, 0)), 408);
    }

    #[test]
    fn test_progress_truncates() {
        // 17 + 783 * 488/720 = 547.7
        assert_eq!(progress_x(t(17, 8)), 547);
        assert_eq!(progress_x(t(17, 35)), 577);
        assert_eq!(progress_x(t(11, 8)), 156);
    }

    #[test]
    fn test_progress_unclamped_outside_window() {
        // 17 - 65.25 truncates toward zero
        assert_eq!(progress_x(t(8, 0)), -48);
        assert!(progress_x(t(22, 0)) > MARKER_MAX_X);
    }

    #[test]
    fn test_progress_monotonic_over_daytime() {
        let xs: Vec<i32> = (9..21)
            .flat_map(|h| (0..60).map(move |m| progress_x(t(h, m))))
            .collect();
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
        assert!(xs
            .iter()
            .all(|x| (MARKER_MIN_X..=MARKER_MAX_X).contains(x)));
    }

    #[test]
    fn test_tide_graph_reference_points() {
        assert_eq!(tide_graph_x(3, 0), -769);
        assert_eq!(tide_graph_x(11, 8), -227);
        assert_eq!(tide_graph_x(12, 0), -170);
        assert_eq!(tide_graph_x(0, 0), -179);
        // 29.9996 stays, one minute later wraps
        assert_eq!(tide_graph_x(15, 0), 30);
        assert_eq!(tide_graph_x(15, 1), -777);
    }

    #[test]
    fn test_tide_graph_range() {
        for hour in 0..24 {
            for minute in 0..60 {
                let x = tide_graph_x(hour, minute);
                assert!(
                    x > -778 && x <= 30,
                    "{hour:02}:{minute:02} gave {x}, outside (-778, 30]"
                );
            }
        }
    }

    #[test]
    fn test_tide_graph_at_matches_components() {
        let time = NaiveTime::from_hms_opt(11, 8, 30).unwrap();
        assert_eq!(tide_graph_x_at(time), tide_graph_x(11, 8));
    }

    #[test]
    fn test_layout_variants() {
        assert_eq!(LayoutConstants::for_variant(LayoutVariant::Full).canvas, (842, 596));
        assert_eq!(LayoutConstants::for_variant(LayoutVariant::Compact).canvas, (842, 400));
        assert_eq!(FULL.icon, Some((610, 85)));
        assert_eq!(COMPACT.icon, None);
        assert_eq!(COMPACT.with_icon(Some((700, 20))).icon, Some((700, 20)));
        assert_eq!(LayoutVariant::from_compact(true), LayoutVariant::Compact);
    }
}
