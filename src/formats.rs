use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const COLUMNS: [&str; 5] = ["title", "price_raw", "availability", "rating", "price_clean"];

/// Star rating, encoded on the listing page as the second class token of
/// `p.star-rating` (`star-rating Three`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Rating {
    pub const ALL: [Rating; 5] = [
        Rating::One,
        Rating::Two,
        Rating::Three,
        Rating::Four,
        Rating::Five,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::One => "One",
            Rating::Two => "Two",
            Rating::Three => "Three",
            Rating::Four => "Four",
            Rating::Five => "Five",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rating word: {0:?}")]
pub struct UnknownRating(pub String);

impl FromStr for Rating {
    type Err = UnknownRating;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rating::ALL
            .into_iter()
            .find(|rating| rating.as_str() == s)
            .ok_or_else(|| UnknownRating(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBook {
    pub title: String,
    pub price_raw: String,
    pub availability: String,
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub price_raw: String,
    pub availability: String,
    pub rating: Option<Rating>,
    pub price_clean: f64,
}

impl Book {
    pub fn from_raw(raw: RawBook, price_clean: f64) -> Self {
        Self {
            title: raw.title,
            price_raw: raw.price_raw,
            availability: raw.availability,
            rating: raw.rating,
            price_clean,
        }
    }
}
