//! Pet models.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::{free_text, positive_id, required_text, ValidationError, ValidationResult};

/// Oldest plausible age, in years.
pub const MAX_AGE_YEARS: i32 = 50;
/// Heaviest plausible weight, in kg.
pub const MAX_WEIGHT_KG: f64 = 500.0;
/// Dogs and cats older than this are seniors.
pub const SENIOR_AGE_YEARS: i32 = 7;

/// Species the clinic treats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Species {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Hamster,
}

impl Species {
    pub const ALL: [Species; 5] = [
        Species::Dog,
        Species::Cat,
        Species::Bird,
        Species::Rabbit,
        Species::Hamster,
    ];

    /// Canonical upper-case name, as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Dog => "DOG",
            Species::Cat => "CAT",
            Species::Bird => "BIRD",
            Species::Rabbit => "RABBIT",
            Species::Hamster => "HAMSTER",
        }
    }

    /// Comma-separated list of accepted names.
    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(Species::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Species {
    type Err = ValidationError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|species| species.as_str() == upper)
            .ok_or_else(|| {
                ValidationError::new("species", format!("must be one of: {}", Self::choices()))
            })
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain field values for building or editing a pet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetFields {
    pub name: String,
    /// Species name, any case
    pub species: String,
    pub breed: String,
    /// Age in whole years
    pub age: i32,
    pub color: String,
    pub weight_kg: f64,
    /// Owning client
    pub client_id: i64,
}

/// A stored or serialized pet before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct PetRecord {
    pub id: i64,
    #[serde(flatten)]
    pub fields: PetFields,
}

/// A pet belonging to a client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "PetRecord")]
pub struct Pet {
    id: i64,
    name: String,
    species: Species,
    breed: String,
    age: i32,
    color: String,
    weight_kg: f64,
    client_id: i64,
}

impl Pet {
    /// Build a pet, validating every field.
    pub fn new(id: i64, fields: PetFields) -> ValidationResult<Self> {
        Ok(Self {
            id: positive_id("id", id)?,
            name: required_text("name", &fields.name)?,
            species: fields.species.parse()?,
            breed: free_text(&fields.breed),
            age: validate_age(fields.age)?,
            color: free_text(&fields.color),
            weight_kg: validate_weight(fields.weight_kg)?,
            client_id: positive_id("client_id", fields.client_id)?,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn client_id(&self) -> i64 {
        self.client_id
    }

    pub fn set_name(&mut self, value: &str) -> ValidationResult<()> {
        self.name = required_text("name", value)?;
        Ok(())
    }

    pub fn set_species(&mut self, value: &str) -> ValidationResult<()> {
        self.species = value.parse()?;
        Ok(())
    }

    pub fn set_breed(&mut self, value: &str) {
        self.breed = free_text(value);
    }

    pub fn set_age(&mut self, value: i32) -> ValidationResult<()> {
        self.age = validate_age(value)?;
        Ok(())
    }

    pub fn set_color(&mut self, value: &str) {
        self.color = free_text(value);
    }

    pub fn set_weight_kg(&mut self, value: f64) -> ValidationResult<()> {
        self.weight_kg = validate_weight(value)?;
        Ok(())
    }

    pub fn set_client_id(&mut self, value: i64) -> ValidationResult<()> {
        self.client_id = positive_id("client_id", value)?;
        Ok(())
    }

    /// Younger than one year.
    pub fn is_puppy(&self) -> bool {
        self.age < 1
    }

    /// Only dogs and cats become seniors.
    pub fn is_senior(&self) -> bool {
        matches!(self.species, Species::Dog | Species::Cat) && self.age > SENIOR_AGE_YEARS
    }

    /// Current values as plain fields.
    pub fn fields(&self) -> PetFields {
        PetFields {
            name: self.name.clone(),
            species: self.species.as_str().to_string(),
            breed: self.breed.clone(),
            age: self.age,
            color: self.color.clone(),
            weight_kg: self.weight_kg,
            client_id: self.client_id,
        }
    }
}

fn validate_age(value: i32) -> ValidationResult<i32> {
    if value < 0 {
        return Err(ValidationError::new("age", "must not be negative"));
    }
    if value > MAX_AGE_YEARS {
        return Err(ValidationError::new(
            "age",
            format!("implausible (max {} years)", MAX_AGE_YEARS),
        ));
    }
    Ok(value)
}

fn validate_weight(value: f64) -> ValidationResult<f64> {
    // NaN fails the first comparison
    if !(value > 0.0) {
        return Err(ValidationError::new("weight_kg", "must be greater than 0"));
    }
    if value > MAX_WEIGHT_KG {
        return Err(ValidationError::new(
            "weight_kg",
            format!("implausible (max {} kg)", MAX_WEIGHT_KG),
        ));
    }
    Ok(value)
}

impl TryFrom<PetRecord> for Pet {
    type Error = ValidationError;

    fn try_from(record: PetRecord) -> Result<Self, Self::Error> {
        Pet::new(record.id, record.fields)
    }
}

impl Serialize for Pet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Pet", 10)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("species", &self.species)?;
        state.serialize_field("breed", &self.breed)?;
        state.serialize_field("age", &self.age)?;
        state.serialize_field("color", &self.color)?;
        state.serialize_field("weight_kg", &self.weight_kg)?;
        state.serialize_field("client_id", &self.client_id)?;
        state.serialize_field("is_puppy", &self.is_puppy())?;
        state.serialize_field("is_senior", &self.is_senior())?;
        state.end()
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pet #{} | {} | {} | Breed: {} | Age: {} yr | Weight: {} kg | Owner #{}",
            self.id, self.name, self.species, self.breed, self.age, self.weight_kg, self.client_id
        )
    }
}
