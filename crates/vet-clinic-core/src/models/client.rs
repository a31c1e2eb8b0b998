//! Client (pet owner) model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    email_address, free_text, optional_text, positive_id, required_text, ValidationError,
    ValidationResult,
};

/// Plain field values for building or editing a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientFields {
    /// National ID number (no format check)
    pub rut: String,
    pub names: String,
    pub surnames: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// A stored or serialized client before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientRecord {
    pub id: i64,
    #[serde(flatten)]
    pub fields: ClientFields,
}

/// A clinic client. Owns zero or more pets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ClientRecord")]
pub struct Client {
    id: i64,
    rut: String,
    names: String,
    surnames: String,
    phone: String,
    email: String,
    address: Option<String>,
}

impl Client {
    /// Build a client, validating every field.
    pub fn new(id: i64, fields: ClientFields) -> ValidationResult<Self> {
        Ok(Self {
            id: positive_id("id", id)?,
            rut: required_text("rut", &fields.rut)?,
            names: required_text("names", &fields.names)?,
            surnames: required_text("surnames", &fields.surnames)?,
            phone: free_text(&fields.phone),
            email: email_address("email", &fields.email)?,
            address: optional_text(fields.address.as_deref()),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn rut(&self) -> &str {
        &self.rut
    }

    pub fn names(&self) -> &str {
        &self.names
    }

    pub fn surnames(&self) -> &str {
        &self.surnames
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn set_rut(&mut self, value: &str) -> ValidationResult<()> {
        self.rut = required_text("rut", value)?;
        Ok(())
    }

    pub fn set_names(&mut self, value: &str) -> ValidationResult<()> {
        self.names = required_text("names", value)?;
        Ok(())
    }

    pub fn set_surnames(&mut self, value: &str) -> ValidationResult<()> {
        self.surnames = required_text("surnames", value)?;
        Ok(())
    }

    pub fn set_phone(&mut self, value: &str) {
        self.phone = free_text(value);
    }

    pub fn set_email(&mut self, value: &str) -> ValidationResult<()> {
        self.email = email_address("email", value)?;
        Ok(())
    }

    pub fn set_address(&mut self, value: Option<&str>) {
        self.address = optional_text(value);
    }

    /// "names surnames"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.names, self.surnames)
    }

    /// Current values as plain fields, e.g. to prefill an edit form.
    pub fn fields(&self) -> ClientFields {
        ClientFields {
            rut: self.rut.clone(),
            names: self.names.clone(),
            surnames: self.surnames.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }
}

impl TryFrom<ClientRecord> for Client {
    type Error = ValidationError;

    fn try_from(record: ClientRecord) -> Result<Self, Self::Error> {
        Client::new(record.id, record.fields)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Client #{} | RUT: {} | {} | Email: {}",
            self.id,
            self.rut,
            self.full_name(),
            self.email
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ClientFields {
        ClientFields {
            rut: " 12345678-9 ".into(),
            names: "Ana".into(),
            surnames: "Rojas".into(),
            phone: " +56 9 1234 5678 ".into(),
            email: "ana@example.cl".into(),
            address: Some("  Av. Siempre Viva 742 ".into()),
        }
    }

    #[test]
    fn test_new_client_trims() {
        let client = Client::new(1, fields()).unwrap();
        assert_eq!(client.rut(), "12345678-9");
        assert_eq!(client.phone(), "+56 9 1234 5678");
        assert_eq!(client.address(), Some("Av. Siempre Viva 742"));
        assert_eq!(client.full_name(), "Ana Rojas");
    }

    #[test]
    fn test_rejects_bad_fields() {
        assert_eq!(Client::new(0, fields()).unwrap_err().field, "id");

        let mut f = fields();
        f.names = "  ".into();
        assert_eq!(Client::new(1, f).unwrap_err().field, "names");

        let mut f = fields();
        f.email = "ana.example.cl".into();
        assert_eq!(Client::new(1, f).unwrap_err().field, "email");
    }

    #[test]
    fn test_empty_email_and_phone_allowed() {
        let mut f = fields();
        f.email = String::new();
        f.phone = String::new();
        f.address = None;
        let client = Client::new(3, f).unwrap();
        assert_eq!(client.email(), "");
        assert_eq!(client.address(), None);
    }

    #[test]
    fn test_failed_setter_keeps_value() {
        let mut client = Client::new(1, fields()).unwrap();
        assert!(client.set_surnames("").is_err());
        assert_eq!(client.surnames(), "Rojas");
        assert!(client.set_email("nope").is_err());
        assert_eq!(client.email(), "ana@example.cl");

        client.set_surnames(" Soto ").unwrap();
        assert_eq!(client.surnames(), "Soto");
    }

    #[test]
    fn test_fields_roundtrip() {
        let client = Client::new(7, fields()).unwrap();
        let rebuilt = Client::new(7, client.fields()).unwrap();
        assert_eq!(client, rebuilt);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok = r#"{"id":2,"rut":"1-9","names":"Ana","surnames":"Rojas","phone":"","email":""}"#;
        let client: Client = serde_json::from_str(ok).unwrap();
        assert_eq!(client.id(), 2);
        assert_eq!(client.address(), None);

        let bad = r#"{"id":2,"rut":"","names":"Ana","surnames":"Rojas","phone":"","email":""}"#;
        assert!(serde_json::from_str::<Client>(bad).is_err());
    }
}
