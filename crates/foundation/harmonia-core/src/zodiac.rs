//! Zodiac signs - twelve 30° sectors of the circle

use crate::harmonics::normalize_coordinate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        Self::Aries,
        Self::Taurus,
        Self::Gemini,
        Self::Cancer,
        Self::Leo,
        Self::Virgo,
        Self::Libra,
        Self::Scorpio,
        Self::Sagittarius,
        Self::Capricorn,
        Self::Aquarius,
        Self::Pisces,
    ];

    /// Sign containing an ecliptic position
    pub fn of(position: f64) -> Self {
        let sector = (normalize_coordinate(position) / 30.0) as usize;
        Self::ALL[sector.min(11)]
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Aries => '♈',
            Self::Taurus => '♉',
            Self::Gemini => '♊',
            Self::Cancer => '♋',
            Self::Leo => '♌',
            Self::Virgo => '♍',
            Self::Libra => '♎',
            Self::Scorpio => '♏',
            Self::Sagittarius => '♐',
            Self::Capricorn => '♑',
            Self::Aquarius => '♒',
            Self::Pisces => '♓',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_of_position() {
        assert_eq!(ZodiacSign::of(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::of(45.0), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::of(359.9), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::of(-1.0), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::Leo.symbol(), '♌');
    }
}
