use serde::{Deserialize, Serialize};

use crate::error::{Result, WoningError};
use crate::model::{ArchiveReversement, Bien, Locataire, Paiement, Proprietaire};

/// Sequential id counters, one per record kind.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Compteur {
    pub proprietaires: u32,
    pub biens: u32,
    pub locataires: u32,
}

/// The record store: every array the ledger aggregates over, persisted as
/// one JSON document. Summaries are always recomputed from these arrays;
/// nothing derived is stored.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Store {
    #[serde(default)]
    pub compteur: Compteur,
    #[serde(default)]
    pub proprietaires: Vec<Proprietaire>,
    #[serde(default)]
    pub biens: Vec<Bien>,
    #[serde(default)]
    pub locataires: Vec<Locataire>,
    #[serde(default)]
    pub paiements: Vec<Paiement>,
    #[serde(default)]
    pub archives: Vec<ArchiveReversement>,
}

impl Store {
    pub fn prochain_id_proprietaire(&mut self) -> String {
        self.compteur.proprietaires += 1;
        format!("PRO-{:04}", self.compteur.proprietaires)
    }

    pub fn prochain_id_bien(&mut self) -> String {
        self.compteur.biens += 1;
        format!("BIEN-{:04}", self.compteur.biens)
    }

    pub fn prochain_id_locataire(&mut self) -> String {
        self.compteur.locataires += 1;
        format!("LOC-{:04}", self.compteur.locataires)
    }

    pub fn proprietaire(&self, id: &str) -> Result<&Proprietaire> {
        self.proprietaires
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| WoningError::OwnerNotFound(id.to_string()))
    }

    pub fn bien(&self, id: &str) -> Result<&Bien> {
        self.biens
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| WoningError::PropertyNotFound(id.to_string()))
    }

    pub fn locataire(&self, id: &str) -> Result<&Locataire> {
        self.locataires
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| WoningError::TenantNotFound(id.to_string()))
    }

    pub fn locataire_mut(&mut self, id: &str) -> Result<&mut Locataire> {
        self.locataires
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| WoningError::TenantNotFound(id.to_string()))
    }

    /// Append an archive, enforcing the one-archive-per-(owner, period)
    /// precondition. Single writer assumed: a real multi-writer
    /// persistence layer needs a uniqueness constraint on
    /// (proprietaireId, mois, annee) behind this check.
    pub fn ajouter_archive(&mut self, archive: ArchiveReversement) -> Result<()> {
        if self
            .archives
            .iter()
            .any(|a| a.couvre(&archive.proprietaire_id, archive.mois, archive.annee))
        {
            let periode = format!("{}/{}", archive.mois, archive.annee);
            return Err(WoningError::AlreadySettled {
                owner: archive.proprietaire_id,
                periode,
            });
        }
        self.archives.push(archive);
        Ok(())
    }
}
