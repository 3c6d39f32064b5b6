use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatutLocataire {
    Actif,
    Inactif,
}

/// A tenant ("locataire"). Flips to `inactif` when the unit is vacated;
/// never hard-deleted while payment history references it.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Locataire {
    pub id: String,
    pub nom: String,
    pub statut: StatutLocataire,
    /// Monthly rent. Legacy records store this as a numeric string.
    #[serde(default)]
    pub montant_loyer: String,
    /// Occupied property, when assigned.
    #[serde(default)]
    pub cour_id: Option<String>,
    /// Sub-unit number within a cour commune.
    #[serde(default)]
    pub maison: Option<String>,
    pub cree_le: NaiveDate,
}

impl Locataire {
    pub fn est_actif(&self) -> bool {
        self.statut == StatutLocataire::Actif
    }

    /// Parsed monthly rent; `None` when missing or not numeric.
    pub fn loyer(&self) -> Option<f64> {
        let v: f64 = self.montant_loyer.trim().parse().ok()?;
        (v > 0.0).then_some(v)
    }

    pub fn a_un_bien(&self) -> bool {
        self.cour_id.is_some()
    }
}
