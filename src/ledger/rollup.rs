use crate::ledger::period::filter_by_period;
use crate::ledger::Mois;
use crate::model::{Locataire, Paiement};

/// One month of the trailing collected/expected series.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRollup {
    pub mois: Mois,
    pub annee: i32,
    pub encaisse: f64,
    pub attendu: f64,
}

/// Trailing `months_back`-month series ending at (`mois`, `annee`),
/// oldest first. `encaisse` comes from the period filter; `attendu` is the
/// rent sum over currently-active housed tenants, applied to every
/// historical month. That does not reconstruct historical occupancy; it is
/// the application's documented approximation, kept as-is.
pub fn rollup_mensuel(
    paiements: &[Paiement],
    locataires: &[Locataire],
    months_back: u32,
    mois: Mois,
    annee: i32,
) -> Vec<PointRollup> {
    let attendu: f64 = locataires
        .iter()
        .filter(|l| l.est_actif() && l.a_un_bien())
        .filter_map(|l| l.loyer())
        .sum();

    // Months since year 0; modulo arithmetic wraps year boundaries.
    let fin = annee * 12 + mois.index0() as i32;
    let depart = fin - (months_back.max(1) as i32 - 1);

    (depart..=fin)
        .filter_map(|total| {
            // rem_euclid(12) is always a valid 0-based index.
            let m = Mois::from_index0(total.rem_euclid(12) as u32)?;
            let a = total.div_euclid(12);
            let encaisse = filter_by_period(paiements, m, a)
                .paiements
                .iter()
                .map(|p| p.montant_paye)
                .sum();
            Some(PointRollup {
                mois: m,
                annee: a,
                encaisse,
                attendu,
            })
        })
        .collect()
}
