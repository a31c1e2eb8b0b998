//! Vet-Clinic Core Library
//!
//! Records for a veterinary clinic: clients, their pets, veterinarians and
//! appointments.
//!
//! # Architecture
//!
//! ```text
//!   front end (CLI menus, FFI caller)
//!                 │  plain field values
//!                 ▼
//!   Entity::new / set_*   ── ValidationError ──▶ caller re-prompts
//!                 │  validated entity
//!                 ▼
//!   Repository<T>::create / update / delete / read_*
//!                 │  one connection per call
//!                 ▼
//!   SQLite (PK, FK and CHECK constraints, sequences table)
//!                 │
//!                 ▼
//!   WriteOutcome { Committed | NotFound | IntegrityViolation }  or  DbError
//! ```
//!
//! # Modules
//!
//! - [`models`]: Validated entities (Client, Pet, Veterinarian, Appointment)
//! - [`db`]: SQLite storage handle, schema and repositories

pub mod db;
pub mod models;

// Re-export commonly used types
pub use db::{
    AppointmentRepository, ClientRepository, Database, DbError, PetRepository, Repository,
    StoreConfig, VeterinarianRepository, WriteOutcome, DEFAULT_PAGE_SIZE,
};
pub use models::{
    Appointment, AppointmentFields, AppointmentStatus, Client, ClientFields, Pet, PetFields,
    Species, ValidationError, Veterinarian, VeterinarianFields,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<DbError> for ClinicError {
    fn from(e: DbError) -> Self {
        ClinicError::Database(e.to_string())
    }
}

impl From<ValidationError> for ClinicError {
    fn from(e: ValidationError) -> Self {
        ClinicError::Validation(e.to_string())
    }
}

/// Map a write outcome onto the FFI error space.
fn committed(outcome: WriteOutcome, what: impl FnOnce() -> String) -> Result<(), ClinicError> {
    match outcome {
        WriteOutcome::Committed => Ok(()),
        WriteOutcome::NotFound => Err(ClinicError::NotFound(what())),
        WriteOutcome::IntegrityViolation(reason) => Err(ClinicError::Integrity(reason)),
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_clinic(path: String) -> Result<Arc<ClinicCore>, ClinicError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(ClinicCore { db }))
}

/// Open the database named by `VET_CLINIC_DB`.
#[uniffi::export]
pub fn open_clinic_from_env() -> Result<Arc<ClinicCore>, ClinicError> {
    let db = Database::open_with_config(StoreConfig::from_env()?)?;
    Ok(Arc::new(ClinicCore { db }))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_clinic_in_memory() -> Result<Arc<ClinicCore>, ClinicError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(ClinicCore { db }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Clinic records for FFI callers. Each call uses its own connection.
#[derive(uniffi::Object)]
pub struct ClinicCore {
    db: Database,
}

#[uniffi::export]
impl ClinicCore {
    /// Check the store is reachable; returns its date as YYYY-MM-DD.
    pub fn ping(&self) -> Result<String, ClinicError> {
        Ok(self.db.ping()?.format(models::DATE_FORMAT).to_string())
    }

    // =========================================================================
    // Client Operations
    // =========================================================================

    /// Allocate an id, validate and store a new client.
    pub fn create_client(
        &self,
        rut: String,
        names: String,
        surnames: String,
        phone: String,
        email: String,
        address: Option<String>,
    ) -> Result<FfiClient, ClinicError> {
        let repo = ClientRepository::new(&self.db);
        let fields = ClientFields {
            rut,
            names,
            surnames,
            phone,
            email,
            address,
        };
        let client = Client::new(repo.next_id()?, fields)?;
        committed(repo.create(&client)?, || format!("client {}", client.id()))?;
        Ok(client.into())
    }

    pub fn get_client(&self, id: i64) -> Result<Option<FfiClient>, ClinicError> {
        let client = ClientRepository::new(&self.db).read_by_id(id)?;
        Ok(client.map(|c| c.into()))
    }

    pub fn list_clients(&self, limit: u32) -> Result<Vec<FfiClient>, ClinicError> {
        let clients = ClientRepository::new(&self.db).read_all(limit as usize)?;
        Ok(clients.into_iter().map(|c| c.into()).collect())
    }

    pub fn update_client(&self, client: FfiClient) -> Result<(), ClinicError> {
        let client = Client::try_from(client)?;
        let outcome = ClientRepository::new(&self.db).update(&client)?;
        committed(outcome, || format!("client {}", client.id()))
    }

    /// Fails with `Integrity` while the client still has pets.
    pub fn delete_client(&self, id: i64) -> Result<(), ClinicError> {
        let outcome = ClientRepository::new(&self.db).delete(id)?;
        committed(outcome, || format!("client {}", id))
    }

    // =========================================================================
    // Pet Operations
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub fn create_pet(
        &self,
        name: String,
        species: String,
        breed: String,
        age: i32,
        color: String,
        weight_kg: f64,
        client_id: i64,
    ) -> Result<FfiPet, ClinicError> {
        let repo = PetRepository::new(&self.db);
        let fields = PetFields {
            name,
            species,
            breed,
            age,
            color,
            weight_kg,
            client_id,
        };
        let pet = Pet::new(repo.next_id()?, fields)?;
        committed(repo.create(&pet)?, || format!("pet {}", pet.id()))?;
        Ok(pet.into())
    }

    pub fn get_pet(&self, id: i64) -> Result<Option<FfiPet>, ClinicError> {
        let pet = PetRepository::new(&self.db).read_by_id(id)?;
        Ok(pet.map(|p| p.into()))
    }

    pub fn list_pets(&self, limit: u32) -> Result<Vec<FfiPet>, ClinicError> {
        let pets = PetRepository::new(&self.db).read_all(limit as usize)?;
        Ok(pets.into_iter().map(|p| p.into()).collect())
    }

    pub fn list_pets_for_client(&self, client_id: i64) -> Result<Vec<FfiPet>, ClinicError> {
        let pets = PetRepository::new(&self.db).read_by_client(client_id)?;
        Ok(pets.into_iter().map(|p| p.into()).collect())
    }

    pub fn update_pet(&self, pet: FfiPet) -> Result<(), ClinicError> {
        let pet = Pet::try_from(pet)?;
        let outcome = PetRepository::new(&self.db).update(&pet)?;
        committed(outcome, || format!("pet {}", pet.id()))
    }

    pub fn delete_pet(&self, id: i64) -> Result<(), ClinicError> {
        let outcome = PetRepository::new(&self.db).delete(id)?;
        committed(outcome, || format!("pet {}", id))
    }

    // =========================================================================
    // Veterinarian Operations
    // =========================================================================

    pub fn create_veterinarian(
        &self,
        first_name: String,
        last_name: String,
        specialty: String,
        phone: String,
        email: String,
    ) -> Result<FfiVeterinarian, ClinicError> {
        let repo = VeterinarianRepository::new(&self.db);
        let fields = VeterinarianFields {
            first_name,
            last_name,
            specialty,
            phone,
            email,
        };
        let vet = Veterinarian::new(repo.next_id()?, fields)?;
        committed(repo.create(&vet)?, || format!("veterinarian {}", vet.id()))?;
        Ok(vet.into())
    }

    pub fn get_veterinarian(&self, id: i64) -> Result<Option<FfiVeterinarian>, ClinicError> {
        let vet = VeterinarianRepository::new(&self.db).read_by_id(id)?;
        Ok(vet.map(|v| v.into()))
    }

    pub fn list_veterinarians(&self, limit: u32) -> Result<Vec<FfiVeterinarian>, ClinicError> {
        let vets = VeterinarianRepository::new(&self.db).read_all(limit as usize)?;
        Ok(vets.into_iter().map(|v| v.into()).collect())
    }

    pub fn update_veterinarian(&self, vet: FfiVeterinarian) -> Result<(), ClinicError> {
        let vet = Veterinarian::try_from(vet)?;
        let outcome = VeterinarianRepository::new(&self.db).update(&vet)?;
        committed(outcome, || format!("veterinarian {}", vet.id()))
    }

    pub fn delete_veterinarian(&self, id: i64) -> Result<(), ClinicError> {
        let outcome = VeterinarianRepository::new(&self.db).delete(id)?;
        committed(outcome, || format!("veterinarian {}", id))
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    /// `date` is YYYY-MM-DD; `status` defaults to PENDING.
    #[allow(clippy::too_many_arguments)]
    pub fn create_appointment(
        &self,
        pet_id: i64,
        veterinarian_id: i64,
        date: String,
        time: String,
        reason: String,
        status: Option<String>,
        diagnosis: Option<String>,
    ) -> Result<FfiAppointment, ClinicError> {
        let repo = AppointmentRepository::new(&self.db);
        let fields = AppointmentFields {
            pet_id,
            veterinarian_id,
            date: models::parse_date(&date)?,
            time,
            reason,
            status,
            diagnosis,
        };
        let appt = Appointment::new(repo.next_id()?, fields)?;
        committed(repo.create(&appt)?, || format!("appointment {}", appt.id()))?;
        Ok(appt.into())
    }

    pub fn get_appointment(&self, id: i64) -> Result<Option<FfiAppointment>, ClinicError> {
        let appt = AppointmentRepository::new(&self.db).read_by_id(id)?;
        Ok(appt.map(|a| a.into()))
    }

    pub fn list_appointments(&self, limit: u32) -> Result<Vec<FfiAppointment>, ClinicError> {
        let appts = AppointmentRepository::new(&self.db).read_all(limit as usize)?;
        Ok(appts.into_iter().map(|a| a.into()).collect())
    }

    /// Newest date first.
    pub fn list_appointments_for_pet(
        &self,
        pet_id: i64,
    ) -> Result<Vec<FfiAppointment>, ClinicError> {
        let appts = AppointmentRepository::new(&self.db).read_by_pet(pet_id)?;
        Ok(appts.into_iter().map(|a| a.into()).collect())
    }

    /// Newest date first.
    pub fn list_appointments_for_veterinarian(
        &self,
        veterinarian_id: i64,
    ) -> Result<Vec<FfiAppointment>, ClinicError> {
        let appts = AppointmentRepository::new(&self.db).read_by_veterinarian(veterinarian_id)?;
        Ok(appts.into_iter().map(|a| a.into()).collect())
    }

    pub fn update_appointment(&self, appt: FfiAppointment) -> Result<(), ClinicError> {
        let appt = Appointment::try_from(appt)?;
        let outcome = AppointmentRepository::new(&self.db).update(&appt)?;
        committed(outcome, || format!("appointment {}", appt.id()))
    }

    pub fn delete_appointment(&self, id: i64) -> Result<(), ClinicError> {
        let outcome = AppointmentRepository::new(&self.db).delete(id)?;
        committed(outcome, || format!("appointment {}", id))
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe client.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiClient {
    pub id: i64,
    pub rut: String,
    pub names: String,
    pub surnames: String,
    pub phone: String,
    pub email: String,
    pub address: Option<String>,
}

impl From<Client> for FfiClient {
    fn from(client: Client) -> Self {
        let fields = client.fields();
        Self {
            id: client.id(),
            rut: fields.rut,
            names: fields.names,
            surnames: fields.surnames,
            phone: fields.phone,
            email: fields.email,
            address: fields.address,
        }
    }
}

impl TryFrom<FfiClient> for Client {
    type Error = ValidationError;

    fn try_from(client: FfiClient) -> Result<Self, Self::Error> {
        Client::new(
            client.id,
            ClientFields {
                rut: client.rut,
                names: client.names,
                surnames: client.surnames,
                phone: client.phone,
                email: client.email,
                address: client.address,
            },
        )
    }
}

/// FFI-safe pet. The flags are ignored on update.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPet {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: i32,
    pub color: String,
    pub weight_kg: f64,
    pub client_id: i64,
    pub is_puppy: bool,
    pub is_senior: bool,
}

impl From<Pet> for FfiPet {
    fn from(pet: Pet) -> Self {
        let is_puppy = pet.is_puppy();
        let is_senior = pet.is_senior();
        let fields = pet.fields();
        Self {
            id: pet.id(),
            name: fields.name,
            species: fields.species,
            breed: fields.breed,
            age: fields.age,
            color: fields.color,
            weight_kg: fields.weight_kg,
            client_id: fields.client_id,
            is_puppy,
            is_senior,
        }
    }
}

impl TryFrom<FfiPet> for Pet {
    type Error = ValidationError;

    fn try_from(pet: FfiPet) -> Result<Self, Self::Error> {
        Pet::new(
            pet.id,
            PetFields {
                name: pet.name,
                species: pet.species,
                breed: pet.breed,
                age: pet.age,
                color: pet.color,
                weight_kg: pet.weight_kg,
                client_id: pet.client_id,
            },
        )
    }
}

/// FFI-safe veterinarian.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiVeterinarian {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
    pub phone: String,
    pub email: String,
}

impl From<Veterinarian> for FfiVeterinarian {
    fn from(vet: Veterinarian) -> Self {
        let fields = vet.fields();
        Self {
            id: vet.id(),
            first_name: fields.first_name,
            last_name: fields.last_name,
            specialty: fields.specialty,
            phone: fields.phone,
            email: fields.email,
        }
    }
}

impl TryFrom<FfiVeterinarian> for Veterinarian {
    type Error = ValidationError;

    fn try_from(vet: FfiVeterinarian) -> Result<Self, Self::Error> {
        Veterinarian::new(
            vet.id,
            VeterinarianFields {
                first_name: vet.first_name,
                last_name: vet.last_name,
                specialty: vet.specialty,
                phone: vet.phone,
                email: vet.email,
            },
        )
    }
}

/// FFI-safe appointment. Dates are YYYY-MM-DD strings.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiAppointment {
    pub id: i64,
    pub pet_id: i64,
    pub veterinarian_id: i64,
    pub date: String,
    pub time: String,
    pub reason: String,
    pub status: String,
    pub diagnosis: Option<String>,
    pub is_pending: bool,
    pub is_completed: bool,
}

impl From<Appointment> for FfiAppointment {
    fn from(appt: Appointment) -> Self {
        Self {
            id: appt.id(),
            pet_id: appt.pet_id(),
            veterinarian_id: appt.veterinarian_id(),
            date: appt.date().format(models::DATE_FORMAT).to_string(),
            time: appt.time().to_string(),
            reason: appt.reason().to_string(),
            status: appt.status().as_str().to_string(),
            diagnosis: appt.diagnosis().map(str::to_string),
            is_pending: appt.is_pending(),
            is_completed: appt.is_completed(),
        }
    }
}

impl TryFrom<FfiAppointment> for Appointment {
    type Error = ValidationError;

    fn try_from(appt: FfiAppointment) -> Result<Self, Self::Error> {
        Appointment::new(
            appt.id,
            AppointmentFields {
                pet_id: appt.pet_id,
                veterinarian_id: appt.veterinarian_id,
                date: models::parse_date(&appt.date)?,
                time: appt.time,
                reason: appt.reason,
                status: Some(appt.status),
                diagnosis: appt.diagnosis,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> Arc<ClinicCore> {
        open_clinic_in_memory().unwrap()
    }

    fn seed(core: &ClinicCore) -> (FfiClient, FfiPet, FfiVeterinarian) {
        let client = core
            .create_client(
                "12345678-9".into(),
                "Ana".into(),
                "Rojas".into(),
                "555".into(),
                "ana@example.cl".into(),
                None,
            )
            .unwrap();
        let pet = core
            .create_pet(
                "Max".into(),
                "dog".into(),
                "Beagle".into(),
                9,
                "tricolor".into(),
                11.0,
                client.id,
            )
            .unwrap();
        let vet = core
            .create_veterinarian(
                "Carla".into(),
                "Muñoz".into(),
                "General".into(),
                String::new(),
                String::new(),
            )
            .unwrap();
        (client, pet, vet)
    }

    #[test]
    fn test_create_allocates_ids() {
        let core = core();
        let (client, pet, vet) = seed(&core);
        assert_eq!(client.id, 1);
        assert_eq!(pet.id, 1);
        assert_eq!(vet.id, 1);
        assert_eq!(pet.species, "DOG");
        assert!(pet.is_senior);

        let second = core
            .create_client(
                "2-7".into(),
                "Luis".into(),
                "Soto".into(),
                String::new(),
                String::new(),
                None,
            )
            .unwrap();
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_validation_error_maps() {
        let core = core();
        let result = core.create_client(
            String::new(),
            "Ana".into(),
            "Rojas".into(),
            String::new(),
            String::new(),
            None,
        );
        assert!(matches!(result, Err(ClinicError::Validation(_))));
        assert!(core.list_clients(10).unwrap().is_empty());
    }

    #[test]
    fn test_pet_for_unknown_client_is_integrity_error() {
        let core = core();
        let result = core.create_pet(
            "Max".into(),
            "DOG".into(),
            String::new(),
            1,
            String::new(),
            5.0,
            99,
        );
        assert!(matches!(result, Err(ClinicError::Integrity(_))));
    }

    #[test]
    fn test_update_and_delete() {
        let core = core();
        let (mut client, pet, vet) = seed(&core);

        client.phone = "777".into();
        core.update_client(client.clone()).unwrap();
        assert_eq!(core.get_client(client.id).unwrap().unwrap().phone, "777");

        assert!(matches!(
            core.delete_client(client.id),
            Err(ClinicError::Integrity(_))
        ));

        let appt = core
            .create_appointment(
                pet.id,
                vet.id,
                "2024-07-01".into(),
                "11:00".into(),
                "Limp".into(),
                None,
                None,
            )
            .unwrap();
        assert_eq!(appt.status, "PENDING");
        assert!(appt.is_pending);

        core.delete_appointment(appt.id).unwrap();
        core.delete_pet(pet.id).unwrap();
        core.delete_client(client.id).unwrap();
        assert!(matches!(core.delete_client(client.id), Err(ClinicError::NotFound(_))));
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let core = core();
        let ghost = FfiVeterinarian {
            id: 50,
            first_name: "No".into(),
            last_name: "Body".into(),
            specialty: String::new(),
            phone: String::new(),
            email: String::new(),
        };
        assert!(matches!(
            core.update_veterinarian(ghost),
            Err(ClinicError::NotFound(_))
        ));
    }

    #[test]
    fn test_appointment_history() {
        let core = core();
        let (_, pet, vet) = seed(&core);

        for date in ["2024-01-05", "2024-03-01", "2023-11-30"] {
            let time = "10:00".to_string();
            core.create_appointment(pet.id, vet.id, date.into(), time, String::new(), None, None)
                .unwrap();
        }

        let dates: Vec<String> = core
            .list_appointments_for_pet(pet.id)
            .unwrap()
            .into_iter()
            .map(|a| a.date)
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-01-05", "2023-11-30"]);
        assert_eq!(core.list_appointments_for_veterinarian(vet.id).unwrap().len(), 3);

        let bad_date = core.create_appointment(
            pet.id,
            vet.id,
            "01/02/2024".into(),
            String::new(),
            String::new(),
            None,
            None,
        );
        assert!(matches!(bad_date, Err(ClinicError::Validation(_))));
    }

    #[test]
    fn test_ping() {
        let core = core();
        assert_eq!(core.ping().unwrap().len(), 10);
    }
}
