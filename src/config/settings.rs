use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub agence: Agence,
    pub gestion: Gestion,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Agence {
    pub nom: String,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Gestion {
    /// Commission withheld on remittances, in percent.
    pub commission_pct: f64,
    pub devise: String,
}
