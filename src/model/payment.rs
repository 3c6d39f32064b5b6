use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatutPaiement {
    Paye,
    Partiel,
    Impaye,
}

impl StatutPaiement {
    pub fn label(self) -> &'static str {
        match self {
            StatutPaiement::Paye => "payé",
            StatutPaiement::Partiel => "partiel",
            StatutPaiement::Impaye => "impayé",
        }
    }

    /// Derivation used at record-creation time: paid against due.
    pub fn derive(montant_paye: f64, montant_du: f64) -> Self {
        if montant_paye <= 0.0 {
            StatutPaiement::Impaye
        } else if montant_paye >= montant_du {
            StatutPaiement::Paye
        } else {
            StatutPaiement::Partiel
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModePaiement {
    Espece,
    Cheque,
    MobileMoney,
}

impl ModePaiement {
    pub fn label(self) -> &'static str {
        match self {
            ModePaiement::Espece => "espèce",
            ModePaiement::Cheque => "chèque",
            ModePaiement::MobileMoney => "mobile money",
        }
    }
}

/// The three legacy month encodings found in stored records: a number
/// (0-based index or 1-12) or a French month name. `ledger::Mois` is the
/// canonical form; nothing outside the conversion boundary matches on this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoisLegacy {
    Numero(u32),
    Nom(String),
}

/// A rent payment record ("paiement") covering a single month. Records
/// created from one multi-month submission share a `groupe_id` and carry
/// the undivided total in `montant_total_paye`.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Paiement {
    pub id: String,
    pub locataire_id: String,
    pub mois: MoisLegacy,
    /// Canonical 1-12 month number, preferred over `mois` when present.
    #[serde(default)]
    pub mois_index: Option<u32>,
    /// 4-digit year, stored as a string in legacy data.
    pub annee: String,
    /// Amounts for this record's single month (already divided when part
    /// of a group).
    pub montant_du: f64,
    pub montant_paye: f64,
    pub statut: StatutPaiement,
    pub date_paiement: NaiveDate,
    pub mode_paiement: ModePaiement,
    #[serde(default)]
    pub numero_cheque: Option<String>,
    #[serde(default)]
    pub numero_mobile_money: Option<String>,
    #[serde(default)]
    pub paiement_multiple: bool,
    #[serde(default)]
    pub groupe_id: Option<String>,
    #[serde(default)]
    pub total_mois_payes: u32,
    /// Undivided total paid across the whole group, repeated on every
    /// record so grouped sums can be deduplicated later.
    #[serde(default)]
    pub montant_total_paye: f64,
    #[serde(default)]
    pub index_in_group: u32,
    #[serde(default)]
    pub is_premier_du_groupe: bool,
    /// Month names of every month in the group, identical on each record.
    #[serde(default)]
    pub mois_du_groupe: Vec<String>,
    #[serde(default)]
    pub remarques: Option<String>,
}

impl Paiement {
    /// Year as a number; legacy data stores it as a string.
    pub fn annee_num(&self) -> Option<i32> {
        self.annee.trim().parse().ok()
    }

    #[cfg(test)]
    pub fn exemple(locataire_id: &str, annee: i32) -> Self {
        Paiement {
            id: format!("P-{locataire_id}-{annee}"),
            locataire_id: locataire_id.to_string(),
            mois: MoisLegacy::Numero(1),
            mois_index: Some(1),
            annee: annee.to_string(),
            montant_du: 0.0,
            montant_paye: 0.0,
            statut: StatutPaiement::Impaye,
            date_paiement: NaiveDate::from_ymd_opt(annee, 1, 1).unwrap(),
            mode_paiement: ModePaiement::Espece,
            numero_cheque: None,
            numero_mobile_money: None,
            paiement_multiple: false,
            groupe_id: None,
            total_mois_payes: 1,
            montant_total_paye: 0.0,
            index_in_group: 0,
            is_premier_du_groupe: true,
            mois_du_groupe: Vec::new(),
            remarques: None,
        }
    }
}
