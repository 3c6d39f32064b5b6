use crate::ledger::Mois;
use crate::model::{ModePaiement, MoisLegacy, Paiement, StatutPaiement};
use chrono::NaiveDate;

/// A validated payment submission covering one or more months.
#[derive(Debug, Clone)]
pub struct FormulairePaiement {
    pub locataire_id: String,
    /// Distinct 0-based month indices, in selection order. Non-empty.
    pub mois_selectionnes: Vec<u32>,
    pub annee: i32,
    /// Totals across all selected months.
    pub montant_du: f64,
    pub montant_paye: f64,
    pub date_paiement: NaiveDate,
    pub mode_paiement: ModePaiement,
    pub numero_cheque: Option<String>,
    pub numero_mobile_money: Option<String>,
    pub remarques: Option<String>,
}

/// Expand a submission into one payment record per selected month.
///
/// Due and paid totals are split evenly across the months; no remainder
/// redistribution is attempted, so per-record amounts can carry float
/// rounding when the totals are not evenly divisible. Multi-month
/// submissions get a freshly generated `groupe_id` shared by every record,
/// and every record carries the undivided `montant_total_paye` so later
/// aggregation can deduplicate the group.
///
/// Performs no validation; callers run `valider_formulaire` first.
pub fn expandre(form: &FormulairePaiement) -> Vec<Paiement> {
    let count = form.mois_selectionnes.len();
    let du_par_mois = form.montant_du / count as f64;
    let paye_par_mois = form.montant_paye / count as f64;

    let multiple = count > 1;
    let tag = chrono::Utc::now().timestamp_millis();
    let groupe_id = multiple.then(|| format!("G{tag}"));

    let mois_du_groupe: Vec<String> = form
        .mois_selectionnes
        .iter()
        .filter_map(|&idx| Mois::from_index0(idx))
        .map(|m| m.name().to_string())
        .collect();

    form.mois_selectionnes
        .iter()
        .enumerate()
        .filter_map(|(i, &idx)| Mois::from_index0(idx).map(|m| (i, m)))
        .map(|(i, mois)| Paiement {
            id: format!("P{tag}-{i}"),
            locataire_id: form.locataire_id.clone(),
            mois: MoisLegacy::Nom(mois.name().to_string()),
            mois_index: Some(mois.number()),
            annee: form.annee.to_string(),
            montant_du: du_par_mois,
            montant_paye: paye_par_mois,
            statut: StatutPaiement::derive(paye_par_mois, du_par_mois),
            date_paiement: form.date_paiement,
            mode_paiement: form.mode_paiement,
            numero_cheque: form.numero_cheque.clone(),
            numero_mobile_money: form.numero_mobile_money.clone(),
            paiement_multiple: multiple,
            groupe_id: groupe_id.clone(),
            total_mois_payes: count as u32,
            montant_total_paye: form.montant_paye,
            index_in_group: i as u32,
            is_premier_du_groupe: i == 0,
            mois_du_groupe: mois_du_groupe.clone(),
            remarques: form.remarques.clone(),
        })
        .collect()
}
