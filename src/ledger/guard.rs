use std::collections::BTreeSet;

use crate::error::ValidationIssue;
use crate::ledger::expand::FormulairePaiement;
use crate::ledger::Mois;
use crate::model::{Locataire, ModePaiement, Paiement};

/// Months (0-based) already covered by a tenant's records for one year.
///
/// Grouped records contribute every month named in `mois_du_groupe`;
/// single records contribute their resolved month. All three legacy month
/// encodings normalize into the same 0-based index space.
pub fn mois_deja_payes(locataire_id: &str, annee: i32, paiements: &[Paiement]) -> BTreeSet<u32> {
    let mut payes = BTreeSet::new();

    for p in paiements {
        if p.locataire_id != locataire_id || p.annee_num() != Some(annee) {
            continue;
        }
        if !p.mois_du_groupe.is_empty() {
            for nom in &p.mois_du_groupe {
                if let Some(m) = Mois::from_name(nom) {
                    payes.insert(m.index0());
                }
            }
        } else if let Some(m) = Mois::resolve(p) {
            payes.insert(m.index0());
        }
    }

    payes
}

/// Validate a payment submission before expansion. Returns every problem
/// at once; an `Err` means no records are created and nothing is written.
pub fn valider_formulaire(
    form: &FormulairePaiement,
    locataires: &[Locataire],
    paiements: &[Paiement],
) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if form.locataire_id.is_empty() {
        issues.push(ValidationIssue::new("locataire", "aucun locataire sélectionné"));
    } else {
        match locataires.iter().find(|l| l.id == form.locataire_id) {
            None => issues.push(ValidationIssue::new(
                "locataire",
                format!("locataire '{}' introuvable", form.locataire_id),
            )),
            Some(l) if !l.est_actif() => issues.push(ValidationIssue::new(
                "locataire",
                format!("locataire '{}' est inactif", l.nom),
            )),
            Some(_) => {}
        }
    }

    if form.mois_selectionnes.is_empty() {
        issues.push(ValidationIssue::new("mois", "aucun mois sélectionné"));
    }
    for &idx in &form.mois_selectionnes {
        if Mois::from_index0(idx).is_none() {
            issues.push(ValidationIssue::new(
                "mois",
                format!("index de mois invalide: {idx}"),
            ));
        }
    }
    let distincts: BTreeSet<_> = form.mois_selectionnes.iter().collect();
    if distincts.len() != form.mois_selectionnes.len() {
        issues.push(ValidationIssue::new("mois", "mois sélectionné en double"));
    }

    if form.montant_du <= 0.0 {
        issues.push(ValidationIssue::new(
            "montantDu",
            "le montant dû doit être supérieur à zéro",
        ));
    }
    if form.montant_paye < 0.0 {
        issues.push(ValidationIssue::new(
            "montantPaye",
            "le montant payé ne peut pas être négatif",
        ));
    }

    match form.mode_paiement {
        ModePaiement::Cheque if form.numero_cheque.as_deref().unwrap_or("").is_empty() => {
            issues.push(ValidationIssue::new(
                "numeroCheque",
                "numéro de chèque requis pour un paiement par chèque",
            ));
        }
        ModePaiement::MobileMoney
            if form.numero_mobile_money.as_deref().unwrap_or("").is_empty() =>
        {
            issues.push(ValidationIssue::new(
                "numeroMobileMoney",
                "numéro mobile money requis pour un paiement mobile money",
            ));
        }
        _ => {}
    }

    // One conflict entry per re-selected month, by name.
    let payes = mois_deja_payes(&form.locataire_id, form.annee, paiements);
    for &idx in &form.mois_selectionnes {
        if payes.contains(&idx) {
            if let Some(m) = Mois::from_index0(idx) {
                issues.push(ValidationIssue::new(
                    "mois",
                    format!("{} {} est déjà payé pour ce locataire", m.name(), form.annee),
                ));
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
