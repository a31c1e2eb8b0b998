//! Veterinarian model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    email_address, free_text, positive_id, required_text, ValidationError, ValidationResult,
};

/// Plain field values for building or editing a veterinarian.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VeterinarianFields {
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
    pub phone: String,
    pub email: String,
}

/// A stored or serialized veterinarian before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct VeterinarianRecord {
    pub id: i64,
    #[serde(flatten)]
    pub fields: VeterinarianFields,
}

/// A veterinarian who can be assigned appointments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VeterinarianRecord")]
pub struct Veterinarian {
    id: i64,
    first_name: String,
    last_name: String,
    specialty: String,
    phone: String,
    email: String,
}

impl Veterinarian {
    pub fn new(id: i64, fields: VeterinarianFields) -> ValidationResult<Self> {
        Ok(Self {
            id: positive_id("id", id)?,
            first_name: required_text("first_name", &fields.first_name)?,
            last_name: required_text("last_name", &fields.last_name)?,
            specialty: free_text(&fields.specialty),
            phone: free_text(&fields.phone),
            email: email_address("email", &fields.email)?,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_first_name(&mut self, value: &str) -> ValidationResult<()> {
        self.first_name = required_text("first_name", value)?;
        Ok(())
    }

    pub fn set_last_name(&mut self, value: &str) -> ValidationResult<()> {
        self.last_name = required_text("last_name", value)?;
        Ok(())
    }

    pub fn set_specialty(&mut self, value: &str) {
        self.specialty = free_text(value);
    }

    pub fn set_phone(&mut self, value: &str) {
        self.phone = free_text(value);
    }

    pub fn set_email(&mut self, value: &str) -> ValidationResult<()> {
        self.email = email_address("email", value)?;
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn fields(&self) -> VeterinarianFields {
        VeterinarianFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            specialty: self.specialty.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }
}

impl TryFrom<VeterinarianRecord> for Veterinarian {
    type Error = ValidationError;

    fn try_from(record: VeterinarianRecord) -> Result<Self, Self::Error> {
        Veterinarian::new(record.id, record.fields)
    }
}

impl fmt::Display for Veterinarian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Veterinarian #{} | {} | Specialty: {}",
            self.id,
            self.full_name(),
            self.specialty
        )
    }
}
