use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn woning_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("woning"))
}

/// Init a config dir and register owner PRO-0001, property BIEN-0001 and
/// tenant LOC-0001 (rent 30000).
fn setup(config_path: &Path) {
    woning_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "add-owner",
            "--nom",
            "Kouassi Jean",
        ])
        .assert()
        .success();

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "add-property",
            "--nom",
            "Cour Abobo",
            "--owner",
            "PRO-0001",
            "--kind",
            "cour-unique",
        ])
        .assert()
        .success();

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "add-tenant",
            "--nom",
            "Traore Awa",
            "--loyer",
            "30000",
            "--property",
            "BIEN-0001",
        ])
        .assert()
        .success();
}

#[test]
fn test_help() {
    woning_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rental management CLI"));
}

#[test]
fn test_version() {
    woning_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("woning"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("woning-config");

    woning_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized woning config"));

    assert!(config_path.join("config.toml").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("woning-config");

    woning_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    woning_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    woning_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_owner_and_property_listing() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("woning-config");
    setup(&config_path);

    woning_cmd()
        .args(["-C", config_path.to_str().unwrap(), "owners"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PRO-0001"))
        .stdout(predicate::str::contains("Kouassi Jean"));

    woning_cmd()
        .args(["-C", config_path.to_str().unwrap(), "properties"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BIEN-0001"))
        .stdout(predicate::str::contains("cour unique"));

    woning_cmd()
        .args(["-C", config_path.to_str().unwrap(), "tenants"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LOC-0001"))
        .stdout(predicate::str::contains("actif"))
        .stdout(predicate::str::contains("30,000 FCFA"));
}

#[test]
fn test_add_property_requires_known_owner() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("woning-config");

    woning_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "add-property",
            "--nom",
            "Cour Abobo",
            "--owner",
            "PRO-9999",
            "--kind",
            "magasin",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Owner 'PRO-9999' not found"));
}

#[test]
fn test_multi_month_payment_and_period_listing() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("woning-config");
    setup(&config_path);

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "add-payment",
            "--tenant",
            "LOC-0001",
            "--mois",
            "Janvier,Février",
            "--annee",
            "2025",
            "--du",
            "60000",
            "--paye",
            "60000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("covering 2 month(s) of 2025"))
        .stdout(predicate::str::contains("Group: G"));

    // Only the January slice shows up for the January period.
    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "payments",
            "--mois",
            "Janvier",
            "--annee",
            "2025",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Traore Awa"))
        .stdout(predicate::str::contains(
            "Total collected for Janvier 2025: 30,000 FCFA",
        ));

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "payments",
            "--mois",
            "3",
            "--annee",
            "2025",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No payments recorded for Mars 2025"));

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "paid-months",
            "LOC-0001",
            "--annee",
            "2025",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Janvier, Février"));
}

#[test]
fn test_duplicate_month_is_rejected_by_name() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("woning-config");
    setup(&config_path);

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "add-payment",
            "--tenant",
            "LOC-0001",
            "--mois",
            "Janvier,Février",
            "--annee",
            "2025",
            "--du",
            "60000",
            "--paye",
            "60000",
        ])
        .assert()
        .success();

    // Février overlaps the existing group; the conflict names the month.
    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "add-payment",
            "--tenant",
            "LOC-0001",
            "--mois",
            "Février,Mars",
            "--annee",
            "2025",
            "--du",
            "60000",
            "--paye",
            "60000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Février 2025 est déjà payé"));
}

#[test]
fn test_cheque_requires_number() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("woning-config");
    setup(&config_path);

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "add-payment",
            "--tenant",
            "LOC-0001",
            "--mois",
            "Janvier",
            "--annee",
            "2025",
            "--du",
            "30000",
            "--paye",
            "30000",
            "--mode",
            "cheque",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("numéro de chèque requis"));
}

#[test]
fn test_arrears_listing() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("woning-config");
    setup(&config_path);

    // Nothing paid yet: the tenant is fully in arrears for January.
    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "arrears",
            "--mois",
            "Janvier",
            "--annee",
            "2025",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Traore Awa"))
        .stdout(predicate::str::contains("impayé"))
        .stdout(predicate::str::contains(
            "Outstanding for Janvier 2025: 30,000 FCFA",
        ));

    // Partial payment flips the classification.
    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "add-payment",
            "--tenant",
            "LOC-0001",
            "--mois",
            "Janvier",
            "--annee",
            "2025",
            "--du",
            "30000",
            "--paye",
            "20000",
        ])
        .assert()
        .success();

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "arrears",
            "--mois",
            "Janvier",
            "--annee",
            "2025",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("partiel"))
        .stdout(predicate::str::contains("10,000 FCFA"));
}

#[test]
fn test_remittance_end_to_end_and_idempotent_settle() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("woning-config");
    setup(&config_path);

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "add-payment",
            "--tenant",
            "LOC-0001",
            "--mois",
            "Janvier,Février",
            "--annee",
            "2025",
            "--du",
            "60000",
            "--paye",
            "60000",
        ])
        .assert()
        .success();

    // Default commission is 10%: January slice is 30000 gross, 3000
    // commission, 27000 net.
    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "remittances",
            "--mois",
            "Janvier",
            "--annee",
            "2025",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kouassi Jean"))
        .stdout(predicate::str::contains("3,000 FCFA"))
        .stdout(predicate::str::contains("27,000 FCFA"));

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "settle",
            "--owner",
            "PRO-0001",
            "--mois",
            "Janvier",
            "--annee",
            "2025",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Net paid:   27,000 FCFA"));

    // A settled period is rejected on a second attempt...
    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "settle",
            "--owner",
            "PRO-0001",
            "--mois",
            "Janvier",
            "--annee",
            "2025",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already settled"));

    // ...and offered as 0 in subsequent calculations.
    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "remittances",
            "--mois",
            "Janvier",
            "--annee",
            "2025",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("oui"))
        .stdout(predicate::str::contains("0 FCFA"));

    // February remains settleable.
    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "settle",
            "--owner",
            "PRO-0001",
            "--mois",
            "Février",
            "--annee",
            "2025",
        ])
        .assert()
        .success();
}

#[test]
fn test_end_lease_blocks_new_payments() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("woning-config");
    setup(&config_path);

    woning_cmd()
        .args(["-C", config_path.to_str().unwrap(), "end-lease", "LOC-0001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ended lease"));

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "add-payment",
            "--tenant",
            "LOC-0001",
            "--mois",
            "Janvier",
            "--annee",
            "2025",
            "--du",
            "30000",
            "--paye",
            "30000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("inactif"));
}

#[test]
fn test_invalid_month_argument() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("woning-config");
    setup(&config_path);

    woning_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "payments",
            "--mois",
            "Smarch",
            "--annee",
            "2025",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month 'Smarch'"));
}

#[test]
fn test_rollup_runs_with_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("woning-config");
    setup(&config_path);

    woning_cmd()
        .args(["-C", config_path.to_str().unwrap(), "rollup", "--months", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ENCAISSE"))
        .stdout(predicate::str::contains("ATTENDU"));
}

#[test]
fn test_status_counts() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("woning-config");
    setup(&config_path);

    woning_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Owners:           1"))
        .stdout(predicate::str::contains("Tenants:          1 (1 active)"));
}
