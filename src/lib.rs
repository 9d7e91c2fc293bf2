//! # Tide Card Core Library
//!
//! This library renders compact "tide cards": a fixed-layout PNG summarising a
//! beach's high and low tides, tide heights, the progress of the current day,
//! air temperature and a weather icon tinted with the condition's accent colour.
//!
//! ## Data Flow
//! 1. **Upstream** (scraper, weather client, chat bot): build a [`TideDay`] and
//!    an optional [`WeatherSample`], then a [`card::RenderRequest`]
//! 2. **Layout**: tide and clock times become pixel positions ([`layout`])
//! 3. **Compositing**: markers, labels, the tide curve strip and the recoloured
//!    weather icon are layered onto a clone of the template ([`card`])
//! 4. **Output**: PNG bytes handed back to the caller
//!
//! The core never touches the network and never writes to disk. Static assets
//! are loaded once by [`assets::AssetSet::load`] and shared read-only between
//! renders; every render owns its own working canvas.
//!
//! ## Core Types
//! - [`Tide`]: a single high or low tide
//! - [`TideDay`]: the chronologically ordered tides of one calendar day
//! - [`WeatherSample`]: temperature and condition code for the card header

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

pub mod assets;
pub mod card;
pub mod config;
pub mod layout;
pub mod recolour;
pub mod text;
pub mod theme;

#[cfg(test)]
mod tests;

pub use card::{CardError, RenderRequest, TideCardRenderer, TideMark};
pub use theme::ConditionCode;

/// Errors raised while building or querying tide records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TideDataError {
    /// Tides must be listed in chronological order
    #[error("tide {index} at {time} is earlier than the tide before it")]
    Unordered { index: usize, time: NaiveTime },

    /// The daytime window holds no tide of the requested kind
    #[error("no {0} tide between 09:00 and 21:00")]
    MissingTideData(TideKind),
}

/// Whether a tide is a high or a low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TideKind {
    High,
    Low,
}

impl fmt::Display for TideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TideKind::High => f.write_str("high"),
            TideKind::Low => f.write_str("low"),
        }
    }
}

/// A single ocean tide.
///
/// The height keeps the label exactly as published upstream, unit suffix
/// included (e.g. `"3.5m"`).
///
/// # Example
/// ```
/// use chrono::NaiveTime;
/// use tide_card_lib::{Tide, TideKind};
///
/// let tide = Tide::new(TideKind::High, NaiveTime::from_hms_opt(12, 42, 0).unwrap(), "3m");
/// assert_eq!(tide.to_string(), "▲ / 12:42 / 3m");
/// assert_eq!(tide.height_value(), "3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tide {
    kind: TideKind,
    time: NaiveTime,
    height: String,
}

impl Tide {
    pub fn new(kind: TideKind, time: NaiveTime, height: impl Into<String>) -> Self {
        Self {
            kind,
            time,
            height: height.into(),
        }
    }

    pub fn kind(&self) -> TideKind {
        self.kind
    }

    pub fn is_high(&self) -> bool {
        self.kind == TideKind::High
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Height label including its unit suffix.
    pub fn height(&self) -> &str {
        &self.height
    }

    /// Height label with the trailing unit suffix removed (`"0.9m"` → `"0.9"`).
    pub fn height_value(&self) -> &str {
        self.height
            .trim()
            .trim_end_matches(|c: char| c.is_alphabetic())
            .trim_end()
    }
}

impl fmt::Display for Tide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.is_high() { '▲' } else { '▼' };
        write!(f, "{} / {} / {}", arrow, self.time.format("%H:%M"), self.height)
    }
}

/// Hours covered by the daytime window, `[09:00, 21:00)`.
pub const DAYTIME_HOURS: Range<u32> = 9..21;

/// True when `time` falls inside the daytime window.
pub fn is_daytime(time: NaiveTime) -> bool {
    DAYTIME_HOURS.contains(&time.hour())
}

/// One calendar day of tides, validated to be in chronological order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTideDay")]
pub struct TideDay {
    date: NaiveDate,
    weekday: String,
    tides: Vec<Tide>,
}

#[derive(Deserialize)]
struct RawTideDay {
    date: NaiveDate,
    weekday: String,
    tides: Vec<Tide>,
}

impl TryFrom<RawTideDay> for TideDay {
    type Error = TideDataError;

    fn try_from(raw: RawTideDay) -> Result<Self, Self::Error> {
        TideDay::new(raw.date, raw.weekday, raw.tides)
    }
}

impl TideDay {
    pub fn new(
        date: NaiveDate,
        weekday: impl Into<String>,
        tides: Vec<Tide>,
    ) -> Result<Self, TideDataError> {
        if let Some(index) = tides
            .windows(2)
            .position(|pair| pair[1].time < pair[0].time)
        {
            return Err(TideDataError::Unordered {
                index: index + 1,
                time: tides[index + 1].time,
            });
        }

        Ok(Self {
            date,
            weekday: weekday.into(),
            tides,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn weekday(&self) -> &str {
        &self.weekday
    }

    pub fn tides(&self) -> &[Tide] {
        &self.tides
    }

    /// First high and first low tide inside the daytime window.
    ///
    /// Either side is `None` when the window holds no tide of that kind.
    pub fn daytime_tides(&self) -> (Option<&Tide>, Option<&Tide>) {
        let first = |kind: TideKind| {
            self.tides
                .iter()
                .find(|t| t.kind == kind && is_daytime(t.time))
        };
        (first(TideKind::High), first(TideKind::Low))
    }

    /// Both daytime tides, or the kind that is missing.
    pub fn primary_tides(&self) -> Result<(&Tide, &Tide), TideDataError> {
        match self.daytime_tides() {
            (Some(high), Some(low)) => Ok((high, low)),
            (None, _) => Err(TideDataError::MissingTideData(TideKind::High)),
            (_, None) => Err(TideDataError::MissingTideData(TideKind::Low)),
        }
    }
}

impl fmt::Display for TideDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.date.format("%d/%m/%Y"), self.weekday)?;
        write!(f, "------------------------")?;
        for tide in &self.tides {
            write!(f, "\n{}", tide)?;
        }
        Ok(())
    }
}

/// Air temperature and weather condition for the card header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Whole degrees Celsius
    pub temperature_c: i32,
    pub condition: ConditionCode,
}
