use crate::model::{Locataire, Paiement, StatutPaiement};

/// One tenant's balance for a period.
#[derive(Debug, Clone, PartialEq)]
pub struct Impaye {
    pub locataire_id: String,
    pub nom: String,
    pub cour_id: Option<String>,
    pub maison: Option<String>,
    pub montant_du: f64,
    pub montant_paye: f64,
    pub montant_restant: f64,
    pub statut: StatutPaiement,
}

/// Compute each active tenant's balance for one period's records.
///
/// Only tenants that are active, have a parseable rent, and occupy a
/// property are considered. A tenant is in arrears iff the sum of paid
/// amounts over their period records is below the monthly rent. Multiple
/// records for one tenant in a single period are a data anomaly the guard
/// prevents at write time; legacy duplicates are summed as stored.
pub fn calculer_impayes(period_records: &[&Paiement], locataires: &[Locataire]) -> Vec<Impaye> {
    locataires
        .iter()
        .filter(|l| l.est_actif() && l.a_un_bien())
        .filter_map(|l| l.loyer().map(|loyer| (l, loyer)))
        .map(|(l, loyer)| {
            let paye: f64 = period_records
                .iter()
                .filter(|p| p.locataire_id == l.id)
                .map(|p| p.montant_paye)
                .sum();

            Impaye {
                locataire_id: l.id.clone(),
                nom: l.nom.clone(),
                cour_id: l.cour_id.clone(),
                maison: l.maison.clone(),
                montant_du: loyer,
                montant_paye: paye,
                montant_restant: (loyer - paye).max(0.0),
                statut: StatutPaiement::derive(paye, loyer),
            }
        })
        .collect()
}

/// The subset of balances still owing, for the arrears table.
pub fn en_retard(impayes: Vec<Impaye>) -> Vec<Impaye> {
    impayes
        .into_iter()
        .filter(|i| i.statut != StatutPaiement::Paye)
        .collect()
}
