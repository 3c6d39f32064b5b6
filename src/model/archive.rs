use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snapshot written when a remittance is validated. Its existence for an
/// (owner, period) pair marks that period as settled: subsequent
/// remittance calculations offer 0 for the pair, and a second validation
/// attempt is rejected.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveReversement {
    pub proprietaire_id: String,
    /// 1-12 month number of the settled period.
    pub mois: u32,
    pub annee: i32,
    pub montant_brut: f64,
    pub montant_commission: f64,
    pub montant_net: f64,
    /// Ids of the payment records the remittance covered.
    pub paiements: Vec<String>,
    pub valide_le: NaiveDate,
}

impl ArchiveReversement {
    pub fn couvre(&self, proprietaire_id: &str, mois: u32, annee: i32) -> bool {
        self.proprietaire_id == proprietaire_id && self.mois == mois && self.annee == annee
    }
}
