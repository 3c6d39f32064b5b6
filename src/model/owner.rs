use serde::{Deserialize, Serialize};

/// A property owner ("propriétaire"). Owns zero or more properties and
/// receives periodic remittances net of the agency commission.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Proprietaire {
    pub id: String,
    pub nom: String,
    #[serde(default)]
    pub telephone: Option<String>,
}
