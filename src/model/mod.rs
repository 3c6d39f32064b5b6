mod archive;
mod owner;
mod payment;
mod property;
mod tenant;

pub use archive::ArchiveReversement;
pub use owner::Proprietaire;
pub use payment::{ModePaiement, MoisLegacy, Paiement, StatutPaiement};
pub use property::{Bien, Maison, TypeBien};
pub use tenant::{Locataire, StatutLocataire};
