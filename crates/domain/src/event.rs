use crate::shared::entity::{Entity, ID};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The kind of activity a `CalendarEvent` represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Sport,
    Work,
    School,
    Rest,
    Other,
}

impl Default for ActivityType {
    fn default() -> Self {
        Self::Other
    }
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sport => "SPORT",
            Self::Work => "WORK",
            Self::School => "SCHOOL",
            Self::Rest => "REST",
            Self::Other => "OTHER",
        }
    }
}

/// Only meaningful for `ActivityType::Sport` events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SportType {
    Running,
    Cycling,
    Swimming,
    Other,
}

impl SportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Cycling => "CYCLING",
            Self::Swimming => "SWIMMING",
            Self::Other => "OTHER",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown {kind}: {value}")]
pub struct InvalidEnumValue {
    kind: &'static str,
    value: String,
}

impl FromStr for ActivityType {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SPORT" => Ok(Self::Sport),
            "WORK" => Ok(Self::Work),
            "SCHOOL" => Ok(Self::School),
            "REST" => Ok(Self::Rest),
            "OTHER" => Ok(Self::Other),
            _ => Err(InvalidEnumValue {
                kind: "activity type",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for SportType {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RUNNING" => Ok(Self::Running),
            "CYCLING" => Ok(Self::Cycling),
            "SWIMMING" => Ok(Self::Swimming),
            "OTHER" => Ok(Self::Other),
            _ => Err(InvalidEnumValue {
                kind: "sport type",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for SportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timed activity in a users calendar.
///
/// All timestamps are naive wall clock times in the application time zone.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub category: ActivityType,
    pub sport_type: Option<SportType>,
    /// `None` until the event has been placed in the calendar
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub all_day: bool,
    /// Planned duration in minutes
    pub duration: Option<f64>,
    /// Planned distance in kilometers
    pub distance: Option<f64>,
    pub sport_description: Option<String>,
    /// The owner. An event without an owner never receives reminders.
    pub user_id: Option<ID>,
}

impl Entity for CalendarEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl CalendarEvent {
    pub fn new(title: impl Into<String>, user_id: Option<ID>) -> Self {
        Self {
            id: Default::default(),
            title: title.into(),
            description: None,
            category: Default::default(),
            sport_type: None,
            start_time: None,
            end_time: None,
            all_day: false,
            duration: None,
            distance: None,
            sport_description: None,
            user_id,
        }
    }

    pub fn is_owned_by(&self, user_id: &ID) -> bool {
        self.user_id.as_ref() == Some(user_id)
    }

    /// Derives `end_time` so that it is never before `start_time`.
    ///
    /// A positive `duration` always wins unless the end would lie outside the
    /// representable time range. Otherwise a missing or invalid end time
    /// falls back to one hour after the start.
    pub fn apply_defaults(&mut self) {
        let start = match self.start_time {
            Some(start) => start,
            None => return,
        };

        let end_from_duration = self
            .duration
            .filter(|duration| *duration > 0.0)
            .and_then(|duration| Duration::try_minutes(duration as i64))
            .and_then(|duration| start.checked_add_signed(duration));
        if let Some(end) = end_from_duration {
            self.end_time = Some(end);
            return;
        }

        match self.end_time {
            Some(end) if end >= start => (),
            _ => self.end_time = start.checked_add_signed(Duration::hours(1)).or(Some(start)),
        }
    }
}
