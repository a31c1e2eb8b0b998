//! Property tests for entity validation.

use chrono::NaiveDate;
use proptest::prelude::*;
use vet_clinic_core::models::{MAX_AGE_YEARS, MAX_WEIGHT_KG, SENIOR_AGE_YEARS};
use vet_clinic_core::{
    Appointment, AppointmentFields, AppointmentStatus, Client, ClientFields, Pet, PetFields,
    Species,
};

fn species_name() -> impl Strategy<Value = String> {
    prop::sample::select(Species::ALL.to_vec()).prop_flat_map(|species| {
        let name = species.as_str().to_string();
        prop_oneof![
            Just(name.clone()),
            Just(name.to_lowercase()),
            Just(format!("  {}  ", name)),
        ]
    })
}

fn valid_pet_fields() -> impl Strategy<Value = PetFields> {
    (
        "[A-Za-z][A-Za-z ]{0,15}",
        species_name(),
        0..=MAX_AGE_YEARS,
        0.01f64..=MAX_WEIGHT_KG,
        1i64..10_000,
    )
        .prop_map(|(name, species, age, weight_kg, client_id)| PetFields {
            name,
            species,
            breed: String::new(),
            age,
            color: String::new(),
            weight_kg,
            client_id,
        })
}

fn base_appointment() -> AppointmentFields {
    AppointmentFields {
        pet_id: 1,
        veterinarian_id: 1,
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        time: "10:00".to_string(),
        reason: String::new(),
        status: None,
        diagnosis: None,
    }
}

proptest! {
    #[test]
    fn valid_pets_always_build(id in 1i64..1_000_000, fields in valid_pet_fields()) {
        let pet = Pet::new(id, fields.clone()).unwrap();
        prop_assert_eq!(pet.age(), fields.age);
        prop_assert_eq!(pet.is_puppy(), fields.age < 1);
    }

    #[test]
    fn out_of_range_age_rejected(
        fields in valid_pet_fields(),
        age in prop_oneof![i32::MIN..0, (MAX_AGE_YEARS + 1)..=i32::MAX],
    ) {
        let err = Pet::new(1, PetFields { age, ..fields }).unwrap_err();
        prop_assert_eq!(err.field, "age");
    }

    #[test]
    fn out_of_range_weight_rejected(
        fields in valid_pet_fields(),
        weight_kg in prop_oneof![-1000.0f64..=0.0, (MAX_WEIGHT_KG + 0.001)..1.0e9],
    ) {
        let err = Pet::new(1, PetFields { weight_kg, ..fields }).unwrap_err();
        prop_assert_eq!(err.field, "weight_kg");
    }

    #[test]
    fn failed_setter_keeps_previous_value(fields in valid_pet_fields(), bad_age in 51i32..1000) {
        let mut pet = Pet::new(1, fields.clone()).unwrap();
        prop_assert!(pet.set_age(bad_age).is_err());
        prop_assert_eq!(pet.age(), fields.age);
    }

    #[test]
    fn senior_needs_dog_or_cat(fields in valid_pet_fields()) {
        let pet = Pet::new(1, fields).unwrap();
        let gated = matches!(pet.species(), Species::Dog | Species::Cat);
        prop_assert_eq!(pet.is_senior(), gated && pet.age() > SENIOR_AGE_YEARS);
    }

    #[test]
    fn unknown_status_rejected(status in "[A-Z_]{1,12}") {
        prop_assume!(AppointmentStatus::ALL.iter().all(|s| s.as_str() != status));
        let fields = AppointmentFields { status: Some(status), ..base_appointment() };
        let err = Appointment::new(1, fields).unwrap_err();
        prop_assert_eq!(err.field, "status");
    }

    #[test]
    fn non_positive_ids_rejected(id in i64::MIN..=0) {
        let fields = ClientFields {
            rut: "1-9".to_string(),
            names: "Ana".to_string(),
            surnames: "Rojas".to_string(),
            ..Default::default()
        };
        prop_assert!(Client::new(id, fields).is_err());
    }

    #[test]
    fn email_without_at_rejected(email in "[a-z.]{1,20}") {
        let fields = ClientFields {
            rut: "1-9".to_string(),
            names: "Ana".to_string(),
            surnames: "Rojas".to_string(),
            email,
            ..Default::default()
        };
        let err = Client::new(1, fields).unwrap_err();
        prop_assert_eq!(err.field, "email");
    }
}

#[test]
fn default_status_is_pending() {
    let appt = Appointment::new(1, base_appointment()).unwrap();
    assert_eq!(appt.status(), AppointmentStatus::Pending);
    assert!(appt.is_pending());
}

#[test]
fn puppy_and_senior_boundaries() {
    let fields = |species: &str, age| PetFields {
        name: "Kiwi".to_string(),
        species: species.to_string(),
        age,
        weight_kg: 1.0,
        client_id: 1,
        ..Default::default()
    };
    assert!(Pet::new(1, fields("DOG", 0)).unwrap().is_puppy());
    assert!(!Pet::new(1, fields("DOG", 1)).unwrap().is_puppy());
    assert!(Pet::new(1, fields("DOG", 8)).unwrap().is_senior());
    assert!(!Pet::new(1, fields("BIRD", 8)).unwrap().is_senior());
    assert!(!Pet::new(1, fields("CAT", 7)).unwrap().is_senior());
}
