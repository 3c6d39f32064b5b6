use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Paiement;

/// Canonical French month names, 0-based. Stored records may reference
/// months by this exact spelling.
pub const MOIS_NOMS: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

/// Canonical month reference: always 1-12 internally.
///
/// Legacy payment records encode their month three different ways (0-based
/// index, 1-12 number, or a French name string). Every ingestion point
/// converts to `Mois` here; aggregation code never branches on encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mois(u32);

impl Mois {
    /// From a 1-12 month number.
    pub fn from_number(n: u32) -> Option<Self> {
        (1..=12).contains(&n).then_some(Mois(n))
    }

    /// From a 0-based index (0-11), the form used by month selections.
    pub fn from_index0(idx: u32) -> Option<Self> {
        (idx < 12).then_some(Mois(idx + 1))
    }

    /// From a French month name, matched against the canonical list.
    pub fn from_name(name: &str) -> Option<Self> {
        MOIS_NOMS
            .iter()
            .position(|m| *m == name)
            .map(|p| Mois(p as u32 + 1))
    }

    /// Resolve a payment record's effective month: prefer `moisIndex`,
    /// else look up a name string, else parse `mois` as a number
    /// (1-12 assumed). Returns `None` for unresolvable records, which the
    /// period filter reports instead of miscounting.
    pub fn resolve(paiement: &Paiement) -> Option<Self> {
        if let Some(idx) = paiement.mois_index {
            return Mois::from_number(idx);
        }
        match &paiement.mois {
            crate::model::MoisLegacy::Nom(s) => match Mois::from_name(s) {
                Some(m) => Some(m),
                // Some very old records stored the number as a string.
                None => s.parse::<u32>().ok().and_then(Mois::from_number),
            },
            crate::model::MoisLegacy::Numero(n) => Mois::from_number(*n),
        }
    }

    /// 1-12 number.
    pub fn number(self) -> u32 {
        self.0
    }

    /// 0-based index (0-11).
    pub fn index0(self) -> u32 {
        self.0 - 1
    }

    /// Canonical French name.
    pub fn name(self) -> &'static str {
        MOIS_NOMS[self.index0() as usize]
    }
}

impl fmt::Display for Mois {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
