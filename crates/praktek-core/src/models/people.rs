//! Doctor and patient models.

use serde::{Deserialize, Serialize};

/// A practising doctor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    /// `D###` identifier
    pub id: String,
    /// Display name (e.g., "Dr. Andi")
    pub name: String,
    /// Specialty (e.g., "Umum", "Gigi")
    pub specialty: String,
    /// Login name; credentials themselves are kept elsewhere
    pub username: String,
}

impl Doctor {
    pub fn new(id: &str, name: &str, specialty: &str, username: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            specialty: specialty.to_string(),
            username: username.to_string(),
        }
    }
}

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// `P###` identifier
    pub id: String,
    /// Full name
    pub name: String,
    /// Login name, unique case-insensitively
    pub username: String,
    /// Phone number
    pub contact: String,
}

impl Patient {
    pub fn new(id: &str, name: &str, username: &str, contact: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            username: username.to_string(),
            contact: contact.to_string(),
        }
    }
}
