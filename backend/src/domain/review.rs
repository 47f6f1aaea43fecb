//! Shelter reviews: ratings, categorical assessments, and validation.
//!
//! Reviews are append-only; no edit or delete operation exists anywhere
//! in the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::kind::ShelterKind;

/// Star rating in `[0.0, 5.0]`, at most one decimal place.
///
/// Over-precise input is rejected, never rounded: a client sending
/// `1.23` has a bug we want surfaced, not masked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    /// Validate a raw rating value.
    pub fn try_new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || !(0.0..=5.0).contains(&value) {
            return Err(DomainError::invalid_request(
                "rating must be between 0.0 and 5.0",
            ));
        }
        let tenths = value * 10.0;
        if (tenths - tenths.round()).abs() > 1e-9 {
            return Err(DomainError::invalid_request(
                "rating must have at most one decimal place",
            ));
        }
        Ok(Self(value))
    }

    /// The validated value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.value()
    }
}

/// How busy the shelter felt. Wire values are the Korean labels used by
/// the source data and clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comfort {
    /// 여유 — plenty of space.
    #[serde(rename = "여유")]
    Easy,
    /// 보통 — average.
    #[serde(rename = "보통")]
    Normal,
    /// 혼잡 — crowded.
    #[serde(rename = "혼잡")]
    Crowded,
}

/// Accessibility grade. Wire values are the Korean labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accessibility {
    /// 상 — good.
    #[serde(rename = "상")]
    High,
    /// 중 — acceptable.
    #[serde(rename = "중")]
    Mid,
    /// 하 — poor.
    #[serde(rename = "하")]
    Low,
}

/// Whether heating/cooling was running during the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HvacStatus {
    /// Equipment running.
    On,
    /// Equipment off.
    Off,
}

macro_rules! labelled_enum_str {
    ($ty:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            /// Stored/wire label for this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Parse a stored label back into the enum.
            pub fn parse(raw: &str) -> Option<Self> {
                match raw {
                    $($label => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

labelled_enum_str!(Comfort { Easy => "여유", Normal => "보통", Crowded => "혼잡" });
labelled_enum_str!(Accessibility { High => "상", Mid => "중", Low => "하" });
labelled_enum_str!(HvacStatus { On => "on", Off => "off" });

/// A stored review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Primary key.
    pub id: i64,
    /// Author.
    pub user_id: i32,
    /// Target shelter id within its kind's table.
    pub shelter_id: i64,
    /// Target shelter kind.
    pub shelter_type: ShelterKind,
    /// Star rating.
    pub rating: Rating,
    /// Free-text body.
    pub review_text: Option<String>,
    /// Display name chosen by the author.
    pub review_name: Option<String>,
    /// Crowding assessment.
    pub comfort: Option<Comfort>,
    /// Accessibility grade.
    pub accessibility_rating: Option<Accessibility>,
    /// HVAC state during the visit.
    pub heating_cooling_status: Option<HvacStatus>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time (equals `created_at`; reviews are append-only).
    pub updated_at: DateTime<Utc>,
}

/// Validated review payload, ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    /// Author.
    pub user_id: i32,
    /// Target shelter id.
    pub shelter_id: i64,
    /// Target shelter kind.
    pub shelter_type: ShelterKind,
    /// Star rating.
    pub rating: Rating,
    /// Free-text body.
    pub review_text: Option<String>,
    /// Display name chosen by the author.
    pub review_name: Option<String>,
    /// Crowding assessment.
    pub comfort: Option<Comfort>,
    /// Accessibility grade.
    pub accessibility_rating: Option<Accessibility>,
    /// HVAC state during the visit.
    pub heating_cooling_status: Option<HvacStatus>,
}
