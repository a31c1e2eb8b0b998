//! Appointment models.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::{free_text, optional_text, positive_id, ValidationError, ValidationResult};

/// ISO date format used for appointment dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Appointment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    /// Booked, not yet confirmed
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(AppointmentStatus::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for AppointmentStatus {
    type Err = ValidationError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new("status", format!("must be one of: {}", Self::choices()))
            })
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Years that format as four digits, so stored dates sort as text.
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> ValidationResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::new("date", "expected YYYY-MM-DD"))?;
    validate_date(date)
}

fn validate_date(date: NaiveDate) -> ValidationResult<NaiveDate> {
    if !YEARS.contains(&date.year()) {
        return Err(ValidationError::new(
            "date",
            format!("year must be between {} and {}", YEARS.start(), YEARS.end()),
        ));
    }
    Ok(date)
}

/// Plain field values for building or editing an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentFields {
    pub pet_id: i64,
    pub veterinarian_id: i64,
    pub date: NaiveDate,
    /// Free-form time of day, e.g. "10:30"
    pub time: String,
    #[serde(default)]
    pub reason: String,
    /// Defaults to PENDING when absent
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
}

/// A stored or serialized appointment before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentRecord {
    pub id: i64,
    #[serde(flatten)]
    pub fields: AppointmentFields,
}

/// A visit of a pet to a veterinarian.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "AppointmentRecord")]
pub struct Appointment {
    id: i64,
    pet_id: i64,
    veterinarian_id: i64,
    date: NaiveDate,
    time: String,
    reason: String,
    status: AppointmentStatus,
    diagnosis: Option<String>,
}

impl Appointment {
    /// Build an appointment, validating every field.
    pub fn new(id: i64, fields: AppointmentFields) -> ValidationResult<Self> {
        let status = match fields.status.as_deref() {
            Some(value) => value.parse()?,
            None => AppointmentStatus::default(),
        };
        Ok(Self {
            id: positive_id("id", id)?,
            pet_id: positive_id("pet_id", fields.pet_id)?,
            veterinarian_id: positive_id("veterinarian_id", fields.veterinarian_id)?,
            date: validate_date(fields.date)?,
            time: free_text(&fields.time),
            reason: free_text(&fields.reason),
            status,
            diagnosis: optional_text(fields.diagnosis.as_deref()),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn pet_id(&self) -> i64 {
        self.pet_id
    }

    pub fn veterinarian_id(&self) -> i64 {
        self.veterinarian_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    pub fn diagnosis(&self) -> Option<&str> {
        self.diagnosis.as_deref()
    }

    pub fn set_pet_id(&mut self, value: i64) -> ValidationResult<()> {
        self.pet_id = positive_id("pet_id", value)?;
        Ok(())
    }

    pub fn set_veterinarian_id(&mut self, value: i64) -> ValidationResult<()> {
        self.veterinarian_id = positive_id("veterinarian_id", value)?;
        Ok(())
    }

    pub fn set_date(&mut self, value: NaiveDate) -> ValidationResult<()> {
        self.date = validate_date(value)?;
        Ok(())
    }

    pub fn set_time(&mut self, value: &str) {
        self.time = free_text(value);
    }

    pub fn set_reason(&mut self, value: &str) {
        self.reason = free_text(value);
    }

    /// Status must match one of the upper-case names exactly.
    pub fn set_status(&mut self, value: &str) -> ValidationResult<()> {
        self.status = value.parse()?;
        Ok(())
    }

    pub fn set_diagnosis(&mut self, value: Option<&str>) {
        self.diagnosis = optional_text(value);
    }

    pub fn is_pending(&self) -> bool {
        self.status == AppointmentStatus::Pending
    }

    pub fn is_completed(&self) -> bool {
        self.status == AppointmentStatus::Completed
    }

    pub fn fields(&self) -> AppointmentFields {
        AppointmentFields {
            pet_id: self.pet_id,
            veterinarian_id: self.veterinarian_id,
            date: self.date,
            time: self.time.clone(),
            reason: self.reason.clone(),
            status: Some(self.status.as_str().to_string()),
            diagnosis: self.diagnosis.clone(),
        }
    }
}

impl TryFrom<AppointmentRecord> for Appointment {
    type Error = ValidationError;

    fn try_from(record: AppointmentRecord) -> Result<Self, Self::Error> {
        Appointment::new(record.id, record.fields)
    }
}

impl Serialize for Appointment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Appointment", 10)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("pet_id", &self.pet_id)?;
        state.serialize_field("veterinarian_id", &self.veterinarian_id)?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field("time", &self.time)?;
        state.serialize_field("reason", &self.reason)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("diagnosis", &self.diagnosis)?;
        state.serialize_field("is_pending", &self.is_pending())?;
        state.serialize_field("is_completed", &self.is_completed())?;
        state.end()
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Appointment #{} | Pet #{} | Veterinarian #{} | {} {} | {}",
            self.id,
            self.pet_id,
            self.veterinarian_id,
            self.date.format(DATE_FORMAT),
            self.time,
            self.status
        )
    }
}
