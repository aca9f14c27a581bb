//! Zodiac signs, focus areas, and the seam to a horoscope text service.
//!
//! Text generation itself lives outside this workspace. Implementors of
//! [`HoroscopeSource`] take a sign and a focus area and return prose, or
//! [`HoroscopeError::Unavailable`] for any failure of the service.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::error::HoroscopeError;

/// The 12 tropical zodiac signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in zodiacal order, Aries first.
pub const ALL_ZODIAC_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Aries => "♈",
            Self::Taurus => "♉",
            Self::Gemini => "♊",
            Self::Cancer => "♋",
            Self::Leo => "♌",
            Self::Virgo => "♍",
            Self::Libra => "♎",
            Self::Scorpio => "♏",
            Self::Sagittarius => "♐",
            Self::Capricorn => "♑",
            Self::Aquarius => "♒",
            Self::Pisces => "♓",
        }
    }
}

impl Display for ZodiacSign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Topic a horoscope is focused on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FocusArea {
    Love,
    Career,
    Wellness,
    Finance,
    Creativity,
}

pub const ALL_FOCUS_AREAS: [FocusArea; 5] = [
    FocusArea::Love,
    FocusArea::Career,
    FocusArea::Wellness,
    FocusArea::Finance,
    FocusArea::Creativity,
];

impl FocusArea {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Love => "Love",
            Self::Career => "Career",
            Self::Wellness => "Wellness",
            Self::Finance => "Finance",
            Self::Creativity => "Creativity",
        }
    }
}

impl Display for FocusArea {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a sign or focus area name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {name}")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub name: String,
}

fn parse_by_name<T: Copy>(
    all: &[T],
    name_of: fn(T) -> &'static str,
    kind: &'static str,
    s: &str,
) -> Result<T, ParseNameError> {
    all.iter()
        .copied()
        .find(|v| name_of(*v).eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| ParseNameError {
            kind,
            name: s.to_string(),
        })
}

impl FromStr for ZodiacSign {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(&ALL_ZODIAC_SIGNS, Self::name, "zodiac sign", s)
    }
}

impl FromStr for FocusArea {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(&ALL_FOCUS_AREAS, Self::name, "focus area", s)
    }
}

/// Request text handed to a text service for `sign` and `focus`.
pub fn horoscope_prompt(sign: ZodiacSign, focus: FocusArea) -> String {
    format!(
        "Generate a personal horoscope for a {}, focusing on {} for today.",
        sign.name(),
        focus.name()
    )
}

/// Provider of horoscope text.
pub trait HoroscopeSource {
    fn horoscope(&self, sign: ZodiacSign, focus: FocusArea) -> Result<String, HoroscopeError>;
}

impl<S: HoroscopeSource + ?Sized> HoroscopeSource for &S {
    fn horoscope(&self, sign: ZodiacSign, focus: FocusArea) -> Result<String, HoroscopeError> {
        (**self).horoscope(sign, focus)
    }
}

/// Map a raw service reply to text, treating blank replies as unavailable.
pub fn non_empty_reply(reply: Option<String>) -> Result<String, HoroscopeError> {
    match reply {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(HoroscopeError::Unavailable),
    }
}
