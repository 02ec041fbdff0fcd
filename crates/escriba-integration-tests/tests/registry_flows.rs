//! Archive registry flows.
//!
//! Builds a registry the way an archive scan does: folder names classified
//! into customers, filenames classified into certificate records, then the
//! tracker queried for the reports the practice reads.

use chrono::{TimeZone, Utc};

use escriba_core::Institution;
use escriba_registry::{
    certificate_state_from_filename, date_from_filename, derive_certificate_id,
    derive_customer_id, is_certificate_filename, CertificateRecord, CertificateState,
    CertificateTracker, Customer, CustomerKind, CustomerRegistry,
};

const COMPANY: &str = "Transportes del Plata S.A.";
const PERSON: &str = "Juan Pérez";

const COMPANY_FILES: &[&str] = &[
    "certificado_bps_2024-03-15.pdf",
    "certificado_bps_2024-03-20.pdf",
    "ERROR certificado_dgi_2024-01-10.pdf",
    "constancia_vigencia.pdf",
    "notas.txt",
];
const PERSON_FILES: &[&str] = &["certificado_msp_2023-06-01.pdf"];

/// Registers an archive layout the way the folder scan does: one customer
/// per folder, one record per file that classifies as a certificate.
fn scan(archive: &[(&str, &[&str])]) -> CustomerRegistry {
    let mut registry = CustomerRegistry::new();
    for (folder, files) in archive {
        let customer_id = derive_customer_id(folder);
        registry.add_customer(Customer {
            customer_id: customer_id.clone(),
            name: (*folder).to_owned(),
            kind: CustomerKind::infer(folder),
            folder_path: format!("/archive/{folder}"),
            created_at: Utc::now(),
        });

        for filename in *files {
            if !is_certificate_filename(filename) {
                continue;
            }
            let (has_error_prefix, state) = certificate_state_from_filename(filename);
            registry.add_certificate(CertificateRecord {
                certificate_id: derive_certificate_id(&customer_id, filename),
                customer_id: customer_id.clone(),
                certificate_type: None,
                institution: Institution::detect(filename),
                date: date_from_filename(filename),
                state,
                source_files: vec![(*filename).to_owned()],
                filename: (*filename).to_owned(),
                file_path: format!("/archive/{folder}/{filename}"),
                has_error_prefix,
                indexed_at: Utc::now(),
            });
        }
    }
    registry
}

fn sample_archive() -> CustomerRegistry {
    scan(&[(COMPANY, COMPANY_FILES), (PERSON, PERSON_FILES)])
}

// -- Scan --

#[test]
fn scan_classifies_and_registers_an_archive() {
    let registry = sample_archive();

    assert_eq!(registry.total_customers, 2);
    // notas.txt has no certificate keyword and is not registered.
    assert_eq!(registry.total_certificates, 5);

    let company = &registry.customers[0];
    assert_eq!(company.kind, CustomerKind::Company);
    let person = &registry.customers[1];
    assert_eq!(person.kind, CustomerKind::Person);

    let errors = registry.error_certificates();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].state, CertificateState::Error);
    assert!(errors[0].has_error_prefix);
    assert_eq!(errors[0].institution, Some(Institution::Dgi));
}

#[test]
fn record_ids_are_stable_across_rescans() {
    let first = sample_archive();
    let second = sample_archive();

    let first_ids: Vec<&str> = first
        .certificates
        .iter()
        .map(|cert| cert.certificate_id.as_str())
        .collect();
    let second_ids: Vec<&str> = second
        .certificates
        .iter()
        .map(|cert| cert.certificate_id.as_str())
        .collect();
    assert_eq!(first_ids, second_ids);

    assert_eq!(derive_customer_id(COMPANY).len(), 12);
    assert_eq!(first_ids[0].len(), 16);
    assert_ne!(derive_customer_id(COMPANY), derive_customer_id(PERSON));
}

// -- Tracker --

#[test]
fn history_is_newest_first_with_undated_records_last() {
    let registry = sample_archive();
    let tracker = CertificateTracker::new(&registry);
    let customer = tracker.customer_by_name("transportes").unwrap();

    let filenames: Vec<&str> = tracker
        .history(&customer.customer_id)
        .iter()
        .map(|cert| cert.filename.as_str())
        .collect();
    assert_eq!(
        filenames,
        vec![
            "certificado_bps_2024-03-20.pdf",
            "certificado_bps_2024-03-15.pdf",
            "ERROR certificado_dgi_2024-01-10.pdf",
            "constancia_vigencia.pdf",
        ]
    );
}

#[test]
fn summary_counts_errors_and_institutions() {
    let registry = sample_archive();
    let tracker = CertificateTracker::new(&registry);
    let customer_id = derive_customer_id(COMPANY);

    let summary = tracker.customer_summary(&customer_id).unwrap();
    assert_eq!(summary.total_certificates, 4);
    assert_eq!(summary.error_certificates, 1);
    assert_eq!(summary.error_rate, 0.25);
    assert_eq!(summary.by_institution.get(&Institution::Bps), Some(&2));
    assert_eq!(summary.by_institution.get(&Institution::Dgi), Some(&1));

    // Only dated certificates appear in the recent list, newest first.
    assert_eq!(summary.recent.len(), 3);
    assert_eq!(summary.recent[0].filename, "certificado_bps_2024-03-20.pdf");
    assert_eq!(
        summary.recent[0].date,
        Some(Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap())
    );
}

#[test]
fn timeline_spans_the_dated_certificates() {
    let registry = sample_archive();
    let tracker = CertificateTracker::new(&registry);
    let customer_id = derive_customer_id(COMPANY);

    let timeline = tracker.timeline_analysis(&customer_id).unwrap();
    assert_eq!(timeline.total_dated_certificates, 3);
    assert_eq!(
        timeline.oldest,
        Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
    );
    assert_eq!(
        timeline.newest,
        Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap()
    );
    assert_eq!(timeline.time_span_days, 70);
    assert_eq!(timeline.by_month.get("2024-01"), Some(&1));
    assert_eq!(timeline.by_month.get("2024-03"), Some(&2));
}

#[test]
fn search_scans_the_whole_registry() {
    let registry = sample_archive();
    let tracker = CertificateTracker::new(&registry);

    assert_eq!(tracker.search("BPS").len(), 2);
    assert_eq!(tracker.search("msp").len(), 1);
    assert_eq!(tracker.search("dnic").len(), 0);
}

#[test]
fn error_report_ranks_customers_by_flagged_certificates() {
    let registry = sample_archive();
    let tracker = CertificateTracker::new(&registry);

    let report = tracker.error_report();
    assert_eq!(report.total_error_certificates, 1);
    assert_eq!(report.customers_with_errors, 1);
    assert_eq!(report.error_rate, 1.0 / 5.0);
    assert_eq!(report.customers_by_error_count.len(), 1);
    assert_eq!(report.customers_by_error_count[0].customer_name, COMPANY);
    assert_eq!(report.customers_by_error_count[0].error_count, 1);
}

#[test]
fn duplicate_groups_fold_the_rejection_prefix() {
    const RESCANNED: &[&str] = &[
        "certificado_dgi_2024-01-10.pdf",
        "ERROR certificado_dgi_2024-01-10.pdf",
        "certificado_bps_2024-03-15.pdf",
    ];
    let registry = scan(&[(COMPANY, RESCANNED)]);
    let tracker = CertificateTracker::new(&registry);

    let groups = tracker.duplicate_groups(&derive_customer_id(COMPANY));
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert!(groups[0]
        .iter()
        .all(|cert| cert.filename.contains("certificado_dgi_2024-01-10")));
}
