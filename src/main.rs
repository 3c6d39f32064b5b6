mod config;
mod error;
mod ledger;
mod model;

use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use crate::config::{config_dir, load_config, load_store, save_store, CONFIG_TEMPLATE};
use crate::error::{Result, WoningError};
use crate::ledger::{
    calculer_impayes, calculer_reversements, en_retard, expandre, filter_by_period,
    mois_deja_payes, rollup_mensuel, valider_formulaire, FormulairePaiement, Mois,
};
use crate::model::{
    ArchiveReversement, Bien, Locataire, Maison, ModePaiement, StatutLocataire, TypeBien,
};

#[derive(Parser)]
#[command(name = "woning")]
#[command(version, about = "Rental management CLI: tenants, rent payments, owner remittances", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.woning or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum TypeBienArg {
    CourUnique,
    CourCommune,
    Magasin,
}

impl From<TypeBienArg> for TypeBien {
    fn from(t: TypeBienArg) -> Self {
        match t {
            TypeBienArg::CourUnique => TypeBien::CourUnique,
            TypeBienArg::CourCommune => TypeBien::CourCommune,
            TypeBienArg::Magasin => TypeBien::Magasin,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Espece,
    Cheque,
    MobileMoney,
}

impl From<ModeArg> for ModePaiement {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Espece => ModePaiement::Espece,
            ModeArg::Cheque => ModePaiement::Cheque,
            ModeArg::MobileMoney => ModePaiement::MobileMoney,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config file
    Init,

    /// Register a property owner
    AddOwner {
        /// Owner name
        #[arg(long)]
        nom: String,

        /// Contact phone number
        #[arg(long)]
        telephone: Option<String>,
    },

    /// List registered owners
    Owners,

    /// Register a property ("bien")
    AddProperty {
        /// Property name or address label
        #[arg(long)]
        nom: String,

        /// Owner id (see 'woning owners')
        #[arg(long)]
        owner: String,

        /// Property kind
        #[arg(long, value_enum)]
        kind: TypeBienArg,

        /// Sub-unit numbers for a cour commune (can be repeated)
        #[arg(long)]
        maison: Vec<String>,
    },

    /// List registered properties
    Properties,

    /// Register a tenant and assign a property
    AddTenant {
        /// Tenant name
        #[arg(long)]
        nom: String,

        /// Monthly rent amount
        #[arg(long)]
        loyer: f64,

        /// Occupied property id
        #[arg(long)]
        property: String,

        /// Sub-unit number within a cour commune
        #[arg(long)]
        maison: Option<String>,
    },

    /// List tenants
    Tenants,

    /// Mark a tenant's lease as ended (statut becomes inactif)
    EndLease {
        /// Tenant id (see 'woning tenants')
        tenant: String,
    },

    /// Record a rent payment, possibly covering several months
    AddPayment {
        /// Tenant id
        #[arg(long)]
        tenant: String,

        /// Months covered: 1-12 numbers or French names, comma-separated
        #[arg(long, value_delimiter = ',')]
        mois: Vec<String>,

        /// Year the months belong to
        #[arg(long)]
        annee: i32,

        /// Total due across the selected months
        #[arg(long)]
        du: f64,

        /// Total paid across the selected months
        #[arg(long)]
        paye: f64,

        /// Payment method
        #[arg(long, value_enum, default_value = "espece")]
        mode: ModeArg,

        /// Cheque or mobile-money number, when the method requires one
        #[arg(long)]
        numero: Option<String>,

        /// Payment date (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Free-form note
        #[arg(long)]
        remarques: Option<String>,
    },

    /// List payments recorded for one period
    Payments {
        /// Month: 1-12 number or French name
        #[arg(long)]
        mois: String,

        #[arg(long)]
        annee: i32,
    },

    /// Show months already covered for a tenant in a year
    PaidMonths {
        /// Tenant id
        tenant: String,

        #[arg(long)]
        annee: i32,
    },

    /// Tenants with an outstanding balance for one period
    Arrears {
        /// Month: 1-12 number or French name
        #[arg(long)]
        mois: String,

        #[arg(long)]
        annee: i32,
    },

    /// Per-owner remittances for one period, net of commission
    Remittances {
        /// Month: 1-12 number or French name
        #[arg(long)]
        mois: String,

        #[arg(long)]
        annee: i32,
    },

    /// Validate an owner's remittance for one period (writes an archive)
    Settle {
        /// Owner id
        #[arg(long)]
        owner: String,

        /// Month: 1-12 number or French name
        #[arg(long)]
        mois: String,

        #[arg(long)]
        annee: i32,
    },

    /// Trailing collected/expected totals per month
    Rollup {
        /// Number of trailing months (6 or 12 are the usual windows)
        #[arg(long, default_value_t = 6)]
        months: u32,
    },

    /// Show store counts and configuration
    Status,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::AddOwner { nom, telephone } => cmd_add_owner(&cfg_dir, nom, telephone),
        Commands::Owners => cmd_owners(&cfg_dir),
        Commands::AddProperty {
            nom,
            owner,
            kind,
            maison,
        } => cmd_add_property(&cfg_dir, nom, &owner, kind.into(), maison),
        Commands::Properties => cmd_properties(&cfg_dir),
        Commands::AddTenant {
            nom,
            loyer,
            property,
            maison,
        } => cmd_add_tenant(&cfg_dir, nom, loyer, &property, maison),
        Commands::Tenants => cmd_tenants(&cfg_dir),
        Commands::EndLease { tenant } => cmd_end_lease(&cfg_dir, &tenant),
        Commands::AddPayment {
            tenant,
            mois,
            annee,
            du,
            paye,
            mode,
            numero,
            date,
            remarques,
        } => cmd_add_payment(
            &cfg_dir,
            &tenant,
            &mois,
            annee,
            du,
            paye,
            mode.into(),
            numero,
            date,
            remarques,
        ),
        Commands::Payments { mois, annee } => cmd_payments(&cfg_dir, &mois, annee),
        Commands::PaidMonths { tenant, annee } => cmd_paid_months(&cfg_dir, &tenant, annee),
        Commands::Arrears { mois, annee } => cmd_arrears(&cfg_dir, &mois, annee),
        Commands::Remittances { mois, annee } => cmd_remittances(&cfg_dir, &mois, annee),
        Commands::Settle { owner, mois, annee } => cmd_settle(&cfg_dir, &owner, &mois, annee),
        Commands::Rollup { months } => cmd_rollup(&cfg_dir, months),
        Commands::Status => cmd_status(&cfg_dir),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &PathBuf) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(WoningError::AlreadyInitialized(cfg_dir.clone()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized woning config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Review agency settings:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Register an owner:       woning add-owner --nom <name>");
    println!("  3. Register a property:     woning add-property --nom <name> --owner <id> --kind cour-unique");
    println!("  4. Register a tenant:       woning add-tenant --nom <name> --loyer <rent> --property <id>");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct OwnerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NOM")]
    nom: String,
    #[tabled(rename = "TELEPHONE")]
    telephone: String,
    #[tabled(rename = "BIENS")]
    biens: usize,
}

#[derive(Tabled)]
struct PropertyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NOM")]
    nom: String,
    #[tabled(rename = "TYPE")]
    kind: String,
    #[tabled(rename = "PROPRIETAIRE")]
    proprietaire: String,
    #[tabled(rename = "MAISONS")]
    maisons: String,
}

#[derive(Tabled)]
struct TenantRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NOM")]
    nom: String,
    #[tabled(rename = "STATUT")]
    statut: String,
    #[tabled(rename = "LOYER")]
    loyer: String,
    #[tabled(rename = "BIEN")]
    bien: String,
}

#[derive(Tabled)]
struct PaymentTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "LOCATAIRE")]
    locataire: String,
    #[tabled(rename = "MOIS")]
    mois: String,
    #[tabled(rename = "DU")]
    du: String,
    #[tabled(rename = "PAYE")]
    paye: String,
    #[tabled(rename = "STATUT")]
    statut: String,
    #[tabled(rename = "MODE")]
    mode: String,
    #[tabled(rename = "GROUPE")]
    groupe: String,
}

#[derive(Tabled)]
struct ArrearRow {
    #[tabled(rename = "LOCATAIRE")]
    locataire: String,
    #[tabled(rename = "BIEN")]
    bien: String,
    #[tabled(rename = "LOYER")]
    loyer: String,
    #[tabled(rename = "PAYE")]
    paye: String,
    #[tabled(rename = "RESTANT")]
    restant: String,
    #[tabled(rename = "STATUT")]
    statut: String,
}

#[derive(Tabled)]
struct RemittanceRow {
    #[tabled(rename = "PROPRIETAIRE")]
    proprietaire: String,
    #[tabled(rename = "LOCATAIRES")]
    locataires: usize,
    #[tabled(rename = "ATTENDU")]
    attendu: String,
    #[tabled(rename = "A REVERSER")]
    a_reverser: String,
    #[tabled(rename = "IMPAYE")]
    impaye: String,
    #[tabled(rename = "COMMISSION")]
    commission: String,
    #[tabled(rename = "NET")]
    net: String,
    #[tabled(rename = "REGLE")]
    regle: String,
}

#[derive(Tabled)]
struct RollupRow {
    #[tabled(rename = "MOIS")]
    mois: String,
    #[tabled(rename = "ENCAISSE")]
    encaisse: String,
    #[tabled(rename = "ATTENDU")]
    attendu: String,
    #[tabled(rename = "TAUX")]
    taux: String,
}

fn format_montant(value: f64, devise: &str) -> String {
    format!("{} {}", format_grouped_int(value.round() as i64), devise)
}

fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Parse a CLI month argument: a 1-12 number or a French month name.
fn parse_mois(input: &str) -> Result<Mois> {
    if let Some(m) = Mois::from_name(input) {
        return Ok(m);
    }
    input
        .parse::<u32>()
        .ok()
        .and_then(Mois::from_number)
        .ok_or_else(|| WoningError::InvalidMonth(input.to_string()))
}

fn warn_anomalies(anomalies: &[ledger::Anomalie]) {
    for a in anomalies {
        eprintln!(
            "warning: paiement {} (locataire {}) ignoré: {}",
            a.paiement_id, a.locataire_id, a.detail
        );
    }
}

/// Register a property owner
fn cmd_add_owner(cfg_dir: &PathBuf, nom: String, telephone: Option<String>) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let mut store = load_store(cfg_dir)?;
    let id = store.prochain_id_proprietaire();
    store.proprietaires.push(model::Proprietaire {
        id: id.clone(),
        nom: nom.clone(),
        telephone,
    });
    save_store(cfg_dir, &store)?;

    println!("Registered owner {nom} ({id})");
    Ok(())
}

/// List registered owners
fn cmd_owners(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let store = load_store(cfg_dir)?;
    if store.proprietaires.is_empty() {
        println!("No owners registered yet.");
        return Ok(());
    }

    let rows: Vec<OwnerRow> = store
        .proprietaires
        .iter()
        .map(|p| OwnerRow {
            id: p.id.clone(),
            nom: p.nom.clone(),
            telephone: p.telephone.clone().unwrap_or_default(),
            biens: store
                .biens
                .iter()
                .filter(|b| b.proprietaire_id == p.id)
                .count(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Register a property
fn cmd_add_property(
    cfg_dir: &PathBuf,
    nom: String,
    owner: &str,
    kind: TypeBien,
    maisons: Vec<String>,
) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let mut store = load_store(cfg_dir)?;
    store.proprietaire(owner)?;

    let id = store.prochain_id_bien();
    store.biens.push(Bien {
        id: id.clone(),
        nom: nom.clone(),
        type_bien: kind,
        proprietaire_id: owner.to_string(),
        maisons: maisons
            .into_iter()
            .map(|numero| Maison {
                numero,
                occupee: false,
                locataire_id: None,
            })
            .collect(),
    });
    save_store(cfg_dir, &store)?;

    println!("Registered property {nom} ({id}) for owner {owner}");
    Ok(())
}

/// List registered properties
fn cmd_properties(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let store = load_store(cfg_dir)?;
    if store.biens.is_empty() {
        println!("No properties registered yet.");
        return Ok(());
    }

    let rows: Vec<PropertyRow> = store
        .biens
        .iter()
        .map(|b| PropertyRow {
            id: b.id.clone(),
            nom: b.nom.clone(),
            kind: b.type_bien.label().to_string(),
            proprietaire: store
                .proprietaire(&b.proprietaire_id)
                .map(|p| p.nom.clone())
                .unwrap_or_else(|_| b.proprietaire_id.clone()),
            maisons: if b.maisons.is_empty() {
                "-".to_string()
            } else {
                format!(
                    "{} ({} occupée(s))",
                    b.maisons.len(),
                    b.maisons.iter().filter(|m| m.occupee).count()
                )
            },
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Register a tenant
fn cmd_add_tenant(
    cfg_dir: &PathBuf,
    nom: String,
    loyer: f64,
    property: &str,
    maison: Option<String>,
) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let mut store = load_store(cfg_dir)?;
    store.bien(property)?;

    let id = store.prochain_id_locataire();

    // Mark the sub-unit occupied when one is named.
    if let Some(ref numero) = maison {
        if let Some(b) = store.biens.iter_mut().find(|b| b.id == property) {
            if let Some(m) = b.maisons.iter_mut().find(|m| &m.numero == numero) {
                m.occupee = true;
                m.locataire_id = Some(id.clone());
            }
        }
    }

    store.locataires.push(Locataire {
        id: id.clone(),
        nom: nom.clone(),
        statut: StatutLocataire::Actif,
        montant_loyer: format!("{loyer}"),
        cour_id: Some(property.to_string()),
        maison,
        cree_le: chrono::Local::now().date_naive(),
    });
    save_store(cfg_dir, &store)?;

    println!("Registered tenant {nom} ({id}) at {property}");
    Ok(())
}

/// List tenants
fn cmd_tenants(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let store = load_store(cfg_dir)?;
    if store.locataires.is_empty() {
        println!("No tenants registered yet.");
        return Ok(());
    }

    let rows: Vec<TenantRow> = store
        .locataires
        .iter()
        .map(|l| TenantRow {
            id: l.id.clone(),
            nom: l.nom.clone(),
            statut: match l.statut {
                StatutLocataire::Actif => "actif".to_string(),
                StatutLocataire::Inactif => "inactif".to_string(),
            },
            loyer: l
                .loyer()
                .map(|v| format_montant(v, &config.gestion.devise))
                .unwrap_or_else(|| "-".to_string()),
            bien: l.cour_id.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// End a tenant's lease
fn cmd_end_lease(cfg_dir: &PathBuf, tenant: &str) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let mut store = load_store(cfg_dir)?;

    let locataire = store.locataire_mut(tenant)?;
    if !locataire.est_actif() {
        return Err(WoningError::TenantAlreadyInactive(tenant.to_string()));
    }
    locataire.statut = StatutLocataire::Inactif;
    let nom = locataire.nom.clone();

    // Free the sub-unit, if the tenant held one. Payment history keeps
    // referencing the tenant; the record is never deleted.
    for b in &mut store.biens {
        for m in &mut b.maisons {
            if m.locataire_id.as_deref() == Some(tenant) {
                m.occupee = false;
                m.locataire_id = None;
            }
        }
    }

    save_store(cfg_dir, &store)?;

    println!("Ended lease for {nom} ({tenant})");
    Ok(())
}

/// Record a rent payment
#[allow(clippy::too_many_arguments)]
fn cmd_add_payment(
    cfg_dir: &PathBuf,
    tenant: &str,
    mois_input: &[String],
    annee: i32,
    du: f64,
    paye: f64,
    mode: ModePaiement,
    numero: Option<String>,
    date: Option<String>,
    remarques: Option<String>,
) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let mut store = load_store(cfg_dir)?;

    let mois_selectionnes = mois_input
        .iter()
        .map(|s| parse_mois(s).map(|m| m.index0()))
        .collect::<Result<Vec<u32>>>()?;

    let date_paiement = match date {
        Some(s) => chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| WoningError::InvalidDate(s))?,
        None => chrono::Local::now().date_naive(),
    };

    let form = FormulairePaiement {
        locataire_id: tenant.to_string(),
        mois_selectionnes,
        annee,
        montant_du: du,
        montant_paye: paye,
        date_paiement,
        mode_paiement: mode,
        numero_cheque: matches!(mode, ModePaiement::Cheque)
            .then(|| numero.clone())
            .flatten(),
        numero_mobile_money: matches!(mode, ModePaiement::MobileMoney)
            .then(|| numero.clone())
            .flatten(),
        remarques,
    };

    valider_formulaire(&form, &store.locataires, &store.paiements)
        .map_err(WoningError::Validation)?;

    let records = expandre(&form);
    let n = records.len();
    let groupe = records.first().and_then(|p| p.groupe_id.clone());
    store.paiements.extend(records);
    save_store(cfg_dir, &store)?;

    let locataire_nom = store.locataire(tenant).map(|l| l.nom.clone())?;
    println!(
        "Recorded {} for {} covering {} month(s) of {}",
        format_montant(paye, &config.gestion.devise),
        locataire_nom,
        n,
        annee
    );
    if let Some(g) = groupe {
        println!("  Group: {g}");
    }

    Ok(())
}

/// List payments for one period
fn cmd_payments(cfg_dir: &PathBuf, mois_input: &str, annee: i32) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let store = load_store(cfg_dir)?;
    let mois = parse_mois(mois_input)?;

    let selection = filter_by_period(&store.paiements, mois, annee);
    warn_anomalies(&selection.anomalies);

    if selection.paiements.is_empty() {
        println!("No payments recorded for {mois} {annee}.");
        return Ok(());
    }

    let rows: Vec<PaymentTableRow> = selection
        .paiements
        .iter()
        .map(|p| PaymentTableRow {
            id: p.id.clone(),
            locataire: store
                .locataire(&p.locataire_id)
                .map(|l| l.nom.clone())
                .unwrap_or_else(|_| p.locataire_id.clone()),
            mois: mois.name().to_string(),
            du: format_montant(p.montant_du, &config.gestion.devise),
            paye: format_montant(p.montant_paye, &config.gestion.devise),
            statut: p.statut.label().to_string(),
            mode: p.mode_paiement.label().to_string(),
            groupe: p.groupe_id.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    let total: f64 = selection.paiements.iter().map(|p| p.montant_paye).sum();
    println!();
    println!(
        "Total collected for {mois} {annee}: {}",
        format_montant(total, &config.gestion.devise)
    );

    Ok(())
}

/// Show months already covered for a tenant
fn cmd_paid_months(cfg_dir: &PathBuf, tenant: &str, annee: i32) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let store = load_store(cfg_dir)?;
    let locataire = store.locataire(tenant)?;

    let payes = mois_deja_payes(tenant, annee, &store.paiements);
    if payes.is_empty() {
        println!("No months covered for {} in {annee}.", locataire.nom);
        return Ok(());
    }

    let noms: Vec<&str> = payes
        .iter()
        .filter_map(|&idx| Mois::from_index0(idx))
        .map(|m| m.name())
        .collect();
    println!("Months covered for {} in {annee}: {}", locataire.nom, noms.join(", "));

    Ok(())
}

/// Arrears table for one period
fn cmd_arrears(cfg_dir: &PathBuf, mois_input: &str, annee: i32) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let store = load_store(cfg_dir)?;
    let mois = parse_mois(mois_input)?;

    let selection = filter_by_period(&store.paiements, mois, annee);
    warn_anomalies(&selection.anomalies);

    let retard = en_retard(calculer_impayes(&selection.paiements, &store.locataires));
    if retard.is_empty() {
        println!("No arrears for {mois} {annee}.");
        return Ok(());
    }

    let rows: Vec<ArrearRow> = retard
        .iter()
        .map(|i| ArrearRow {
            locataire: i.nom.clone(),
            bien: i.cour_id.clone().unwrap_or_else(|| "-".to_string()),
            loyer: format_montant(i.montant_du, &config.gestion.devise),
            paye: format_montant(i.montant_paye, &config.gestion.devise),
            restant: format_montant(i.montant_restant, &config.gestion.devise),
            statut: i.statut.label().to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    let total: f64 = retard.iter().map(|i| i.montant_restant).sum();
    println!();
    println!(
        "Outstanding for {mois} {annee}: {} across {} tenant(s)",
        format_montant(total, &config.gestion.devise),
        retard.len()
    );

    Ok(())
}

/// Remittance table for one period
fn cmd_remittances(cfg_dir: &PathBuf, mois_input: &str, annee: i32) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let store = load_store(cfg_dir)?;
    let mois = parse_mois(mois_input)?;

    let selection = filter_by_period(&store.paiements, mois, annee);
    warn_anomalies(&selection.anomalies);

    let mut reversements = calculer_reversements(
        &store.proprietaires,
        &store.biens,
        &store.locataires,
        &selection.paiements,
        config.gestion.commission_pct,
        &store.archives,
        mois,
        annee,
    );

    if reversements.is_empty() {
        println!("No remittances due for {mois} {annee}.");
        return Ok(());
    }

    reversements.sort_by(|a, b| b.montant_net.total_cmp(&a.montant_net));

    let rows: Vec<RemittanceRow> = reversements
        .iter()
        .map(|r| RemittanceRow {
            proprietaire: format!("{} ({})", r.nom, r.proprietaire_id),
            locataires: r.nb_locataires,
            attendu: format_montant(r.total_attendu, &config.gestion.devise),
            a_reverser: format_montant(r.montant_a_reverser, &config.gestion.devise),
            impaye: format_montant(r.montant_impaye, &config.gestion.devise),
            commission: format_montant(r.commission, &config.gestion.devise),
            net: format_montant(r.montant_net, &config.gestion.devise),
            regle: if r.deja_reverse { "oui" } else { "" }.to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    let net_total: f64 = reversements.iter().map(|r| r.montant_net).sum();
    println!();
    println!(
        "Net payable for {mois} {annee} (commission {}%): {}",
        config.gestion.commission_pct,
        format_montant(net_total, &config.gestion.devise)
    );

    Ok(())
}

/// Validate an owner's remittance, archiving the settled period
fn cmd_settle(cfg_dir: &PathBuf, owner: &str, mois_input: &str, annee: i32) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let mut store = load_store(cfg_dir)?;
    let mois = parse_mois(mois_input)?;
    store.proprietaire(owner)?;

    let selection = filter_by_period(&store.paiements, mois, annee);
    warn_anomalies(&selection.anomalies);

    let reversements = calculer_reversements(
        &store.proprietaires,
        &store.biens,
        &store.locataires,
        &selection.paiements,
        config.gestion.commission_pct,
        &store.archives,
        mois,
        annee,
    );

    let periode = format!("{mois} {annee}");
    let reversement = reversements
        .into_iter()
        .find(|r| r.proprietaire_id == owner)
        .ok_or_else(|| WoningError::NothingToSettle {
            owner: owner.to_string(),
            periode: periode.clone(),
        })?;

    if reversement.deja_reverse {
        return Err(WoningError::AlreadySettled {
            owner: owner.to_string(),
            periode,
        });
    }
    if reversement.montant_a_reverser <= 0.0 {
        return Err(WoningError::NothingToSettle {
            owner: owner.to_string(),
            periode,
        });
    }

    store.ajouter_archive(ArchiveReversement {
        proprietaire_id: owner.to_string(),
        mois: mois.number(),
        annee,
        montant_brut: reversement.montant_a_reverser,
        montant_commission: reversement.commission,
        montant_net: reversement.montant_net,
        paiements: reversement.paiement_ids.clone(),
        valide_le: chrono::Local::now().date_naive(),
    })?;
    save_store(cfg_dir, &store)?;

    println!("Settled {periode} for {} ({owner})", reversement.nom);
    println!(
        "  Gross:      {}",
        format_montant(reversement.montant_a_reverser, &config.gestion.devise)
    );
    println!(
        "  Commission: {}",
        format_montant(reversement.commission, &config.gestion.devise)
    );
    println!(
        "  Net paid:   {}",
        format_montant(reversement.montant_net, &config.gestion.devise)
    );

    Ok(())
}

/// Trailing collected/expected rollup
fn cmd_rollup(cfg_dir: &PathBuf, months: u32) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let store = load_store(cfg_dir)?;

    let now = chrono::Local::now().date_naive();
    let courant = Mois::from_number(now.month())
        .ok_or_else(|| WoningError::InvalidMonth(now.month().to_string()))?;

    let points = rollup_mensuel(&store.paiements, &store.locataires, months, courant, now.year());

    let rows: Vec<RollupRow> = points
        .iter()
        .map(|pt| RollupRow {
            mois: format!("{} {}", pt.mois, pt.annee),
            encaisse: format_montant(pt.encaisse, &config.gestion.devise),
            attendu: format_montant(pt.attendu, &config.gestion.devise),
            taux: if pt.attendu > 0.0 {
                format!("{:.0}%", pt.encaisse / pt.attendu * 100.0)
            } else {
                "-".to_string()
            },
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("Expected uses the current active tenant list for every month shown.");

    Ok(())
}

/// Show store counts and configuration
fn cmd_status(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(WoningError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let store = load_store(cfg_dir)?;

    println!("Woning Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Agency:           {}", config.agence.nom);
    println!(
        "Commission:       {}% ({})",
        config.gestion.commission_pct, config.gestion.devise
    );
    println!("Owners:           {}", store.proprietaires.len());
    println!("Properties:       {}", store.biens.len());
    println!(
        "Tenants:          {} ({} active)",
        store.locataires.len(),
        store.locataires.iter().filter(|l| l.est_actif()).count()
    );
    println!("Payments:         {}", store.paiements.len());
    println!("Settled periods:  {}", store.archives.len());

    Ok(())
}
