use crate::ledger::Mois;
use crate::model::Paiement;

/// A stored record whose month could not be resolved to any canonical
/// month. Such records are excluded from aggregation and reported, never
/// silently coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomalie {
    pub paiement_id: String,
    pub locataire_id: String,
    pub detail: String,
}

/// Result of filtering payments down to one (month, year) period.
#[derive(Debug, Default)]
pub struct PeriodSelection<'a> {
    pub paiements: Vec<&'a Paiement>,
    pub anomalies: Vec<Anomalie>,
}

/// Select the payment records belonging to one period.
///
/// A record matches iff its resolved month equals `mois` and its stored
/// year parses to `annee`. Records with an unresolvable month encoding
/// land in `anomalies` for the caller to surface.
pub fn filter_by_period(paiements: &[Paiement], mois: Mois, annee: i32) -> PeriodSelection<'_> {
    let mut selection = PeriodSelection::default();

    for p in paiements {
        let Some(annee_record) = p.annee_num() else {
            continue;
        };
        if annee_record != annee {
            continue;
        }
        match Mois::resolve(p) {
            Some(m) if m == mois => selection.paiements.push(p),
            Some(_) => {}
            None => selection.anomalies.push(Anomalie {
                paiement_id: p.id.clone(),
                locataire_id: p.locataire_id.clone(),
                detail: format!("mois illisible: {:?}", p.mois),
            }),
        }
    }

    selection
}
