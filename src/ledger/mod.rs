//! Pure payment reconciliation: period filtering, grouped-payment
//! expansion, duplicate-month guarding, arrears, owner remittances, and
//! the monthly collected/expected rollup. Everything here recomputes from
//! the authoritative record arrays on each call; no derived state is held.

mod arrears;
mod expand;
mod guard;
mod month;
mod period;
mod remittance;
mod rollup;

pub use arrears::{calculer_impayes, en_retard, Impaye};
pub use expand::{expandre, FormulairePaiement};
pub use guard::{mois_deja_payes, valider_formulaire};
pub use month::{Mois, MOIS_NOMS};
pub use period::{filter_by_period, Anomalie, PeriodSelection};
pub use remittance::{calculer_reversements, Reversement};
pub use rollup::{rollup_mensuel, PointRollup};
