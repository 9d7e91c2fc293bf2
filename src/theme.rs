//! # Weather Condition Theming
//!
//! Maps weather-API condition codes to one of a small set of conditions, and
//! each condition to its display name, accent colour, icon asset and symbol.
//!
//! The weather API reports a three-digit code embedded in its icon URL
//! (`.../day/113.png`). Many codes collapse onto the same condition, e.g. every
//! flavour of fog is [`Condition::Fog`].
//!
//! Unknown codes are an error ([`ThemeError::UnknownCondition`]) rather than a
//! silent default, so callers can tell "no weather" apart from "weather we
//! cannot theme".

use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Accent used for header text when no condition theme applies.
pub const DEFAULT_ACCENT: Rgb<u8> = Rgb([0xFD, 0xC0, 0x17]);

/// Colour painted into every icon asset where the accent colour goes.
pub const ICON_PLACEHOLDER: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown weather condition code {0}")]
    UnknownCondition(ConditionCode),

    #[error("invalid weather condition code {0:?}")]
    InvalidCode(String),
}

/// Weather-API condition code, e.g. `113` for clear skies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionCode(pub u16);

impl From<u16> for ConditionCode {
    fn from(code: u16) -> Self {
        ConditionCode(code)
    }
}

impl FromStr for ConditionCode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 3 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ThemeError::InvalidCode(s.to_string()));
        }
        trimmed
            .parse()
            .map(ConditionCode)
            .map_err(|_| ThemeError::InvalidCode(s.to_string()))
    }
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    VeryCloudy,
    Fog,
    LightShowers,
    LightSleetShowers,
    LightSleet,
    ThunderyShowers,
    LightSnow,
    HeavySnow,
    LightRain,
    HeavyShowers,
    HeavyRain,
    LightSnowShowers,
    HeavySnowShowers,
    ThunderyHeavyRain,
    ThunderySnowShowers,
}

/// Presentation of one weather condition on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConditionTheme {
    pub condition: Condition,
    pub display_name: &'static str,
    pub accent: Rgb<u8>,
    /// File stem under the `icons/` asset directory
    pub icon: &'static str,
    pub symbol: &'static str,
}

impl ConditionTheme {
    /// Accent colour as `#RRGGBB`.
    pub fn accent_hex(&self) -> String {
        let Rgb([r, g, b]) = self.accent;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

const fn entry(
    condition: Condition,
    display_name: &'static str,
    accent: [u8; 3],
    icon: &'static str,
    symbol: &'static str,
) -> ConditionTheme {
    ConditionTheme {
        condition,
        display_name,
        accent: Rgb(accent),
        icon,
        symbol,
    }
}

/// Every condition theme, one per [`Condition`].
pub static THEMES: [ConditionTheme; 18] = [
    entry(Condition::Sunny, "Sunny", [0xFD, 0xC0, 0x17], "sunny", "☀️"),
    entry(Condition::PartlyCloudy, "Partly cloudy", [0xF6, 0xD3, 0x65], "partly_cloudy", "⛅️"),
    entry(Condition::Cloudy, "Cloudy", [0xC9, 0xD6, 0xDF], "cloudy", "☁️"),
    entry(Condition::VeryCloudy, "Overcast", [0xA7, 0xB4, 0xBE], "very_cloudy", "☁️"),
    entry(Condition::Fog, "Fog", [0xB8, 0xC2, 0xC8], "fog", "🌫"),
    entry(Condition::LightShowers, "Light showers", [0x7F, 0xC8, 0xF8], "light_showers", "🌦"),
    entry(Condition::LightSleetShowers, "Light sleet showers", [0x9F, 0xD8, 0xE8], "light_sleet_showers", "🌧"),
    entry(Condition::LightSleet, "Light sleet", [0xA9, 0xDC, 0xEB], "light_sleet", "🌧"),
    entry(Condition::ThunderyShowers, "Thundery showers", [0xB3, 0x8C, 0xF2], "thundery_showers", "⛈"),
    entry(Condition::LightSnow, "Light snow", [0xE4, 0xF1, 0xFB], "light_snow", "🌨"),
    entry(Condition::HeavySnow, "Heavy snow", [0xF2, 0xF8, 0xFC], "heavy_snow", "❄️"),
    entry(Condition::LightRain, "Light rain", [0x6C, 0xB4, 0xEE], "light_rain", "🌦"),
    entry(Condition::HeavyShowers, "Heavy showers", [0x4A, 0x90, 0xD9], "heavy_showers", "🌧"),
    entry(Condition::HeavyRain, "Heavy rain", [0x35, 0x7A, 0xC8], "heavy_rain", "🌧"),
    entry(Condition::LightSnowShowers, "Light snow showers", [0xD6, 0xEA, 0xF8], "light_snow_showers", "🌨"),
    entry(Condition::HeavySnowShowers, "Heavy snow showers", [0xEA, 0xF4, 0xFB], "heavy_snow_showers", "❄️"),
    entry(Condition::ThunderyHeavyRain, "Thunderstorms", [0x9B, 0x6C, 0xE6], "thundery_heavy_rain", "🌩"),
    entry(Condition::ThunderySnowShowers, "Thundery snow", [0xC4, 0xA8, 0xF0], "thundery_snow_showers", "⛈"),
];

/// Condition reported by a weather-API code.
pub fn condition(code: ConditionCode) -> Result<Condition, ThemeError> {
    use Condition::*;

    let condition = match code.0 {
        113 => Sunny,
        116 => PartlyCloudy,
        119 => Cloudy,
        122 => VeryCloudy,
        143 | 248 | 260 => Fog,
        176 | 263 | 353 => LightShowers,
        179 | 362 | 365 | 374 => LightSleetShowers,
        182 | 185 | 281 | 284 | 311 | 314 | 317 | 350 | 377 => LightSleet,
        200 | 386 => ThunderyShowers,
        227 | 320 => LightSnow,
        230 | 329 | 332 | 338 => HeavySnow,
        266 | 293 | 296 => LightRain,
        299 | 305 | 356 => HeavyShowers,
        302 | 308 | 359 => HeavyRain,
        323 | 326 | 368 => LightSnowShowers,
        335 | 371 | 395 => HeavySnowShowers,
        389 => ThunderyHeavyRain,
        392 => ThunderySnowShowers,
        _ => return Err(ThemeError::UnknownCondition(code)),
    };
    Ok(condition)
}

impl Condition {
    pub fn theme(self) -> &'static ConditionTheme {
        // THEMES is declared in enum order
        &THEMES[self as usize]
    }
}

/// Accent colour and icon for a weather-API code.
pub fn theme(code: ConditionCode) -> Result<&'static ConditionTheme, ThemeError> {
    condition(code).map(Condition::theme)
}

/// Human-readable condition name for a weather-API code.
pub fn display_name(code: ConditionCode) -> Result<&'static str, ThemeError> {
    theme(code).map(|t| t.display_name)
}
