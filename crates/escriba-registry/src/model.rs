//! Registry data model.
//!
//! Customers and certificates as flat, serializable records. Identifiers
//! are derived from content (folder name, filename), never generated
//! randomly: indexing the same archive twice yields the same ids, which
//! keeps references in saved reports stable across rescans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use escriba_core::Institution;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Derive the stable id for a customer from their folder name.
pub fn derive_customer_id(folder_name: &str) -> String {
    short_digest(folder_name.as_bytes(), 12)
}

/// Derive the stable id for a certificate from its owner and filename.
pub fn derive_certificate_id(customer_id: &str, filename: &str) -> String {
    short_digest(format!("{customer_id}_{filename}").as_bytes(), 16)
}

/// First `chars` hex characters of the SHA-256 of `input`.
fn short_digest(input: &[u8], chars: usize) -> String {
    let digest = Sha256::digest(input);
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex[..chars].to_string()
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Whether a customer is a natural person or a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerKind {
    /// Natural person.
    Person,
    /// Company or other legal entity.
    Company,
}

/// Validation state of an archived certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CertificateState {
    /// No problem recorded.
    Ok,
    /// Rejected by the notary.
    Error,
    /// State could not be determined.
    Unknown,
}

/// One customer. Each archive folder corresponds to one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Stable id derived from the folder name.
    pub customer_id: String,
    /// Customer name as the folder spells it.
    pub name: String,
    /// Person or company.
    pub kind: CustomerKind,
    /// Absolute path of the customer's folder.
    pub folder_path: String,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

/// One certificate file in a customer's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// Stable id derived from owner id and filename.
    pub certificate_id: String,
    /// Owning customer.
    pub customer_id: String,
    /// Certificate type, when known.
    pub certificate_type: Option<String>,
    /// Issuing institution, when one was recognized in the filename.
    pub institution: Option<Institution>,
    /// Issue date, when one was recognized in the filename.
    pub date: Option<DateTime<Utc>>,
    /// Validation state.
    pub state: CertificateState,
    /// Source files this record was assembled from.
    pub source_files: Vec<String>,
    /// Filename as archived, error prefix included.
    pub filename: String,
    /// Full path of the certificate file.
    pub file_path: String,
    /// Whether the filename starts with the notary's `ERROR` marker.
    pub has_error_prefix: bool,
    /// When this record was indexed.
    pub indexed_at: DateTime<Utc>,
}

impl CertificateRecord {
    /// Whether the notary flagged this certificate, by prefix or state.
    pub fn is_error(&self) -> bool {
        self.has_error_prefix || self.state == CertificateState::Error
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The complete registry: every customer and every certificate, plus
/// running totals maintained by the `add_*` methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRegistry {
    /// All customers, in insertion order.
    pub customers: Vec<Customer>,
    /// All certificates, in insertion order.
    pub certificates: Vec<CertificateRecord>,
    /// When the registry last changed.
    pub last_updated: DateTime<Utc>,
    /// Customer count.
    pub total_customers: usize,
    /// Certificate count.
    pub total_certificates: usize,
}

impl CustomerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            customers: Vec::new(),
            certificates: Vec::new(),
            last_updated: Utc::now(),
            total_customers: 0,
            total_certificates: 0,
        }
    }

    /// Add a customer and refresh the totals.
    pub fn add_customer(&mut self, customer: Customer) {
        self.customers.push(customer);
        self.total_customers = self.customers.len();
        self.last_updated = Utc::now();
    }

    /// Add a certificate and refresh the totals.
    pub fn add_certificate(&mut self, certificate: CertificateRecord) {
        self.certificates.push(certificate);
        self.total_certificates = self.certificates.len();
        self.last_updated = Utc::now();
    }

    /// All certificates belonging to one customer, in insertion order.
    pub fn customer_certificates(&self, customer_id: &str) -> Vec<&CertificateRecord> {
        self.certificates
            .iter()
            .filter(|cert| cert.customer_id == customer_id)
            .collect()
    }

    /// All certificates the notary flagged.
    pub fn error_certificates(&self) -> Vec<&CertificateRecord> {
        self.certificates
            .iter()
            .filter(|cert| cert.is_error())
            .collect()
    }
}

impl Default for CustomerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            customer_id: id.to_string(),
            name: name.to_string(),
            kind: CustomerKind::Company,
            folder_path: format!("/archive/{name}"),
            created_at: Utc::now(),
        }
    }

    fn certificate(customer_id: &str, filename: &str, state: CertificateState) -> CertificateRecord {
        CertificateRecord {
            certificate_id: derive_certificate_id(customer_id, filename),
            customer_id: customer_id.to_string(),
            certificate_type: None,
            institution: None,
            date: None,
            state,
            source_files: vec![format!("/archive/x/{filename}")],
            filename: filename.to_string(),
            file_path: format!("/archive/x/{filename}"),
            has_error_prefix: filename.to_uppercase().starts_with("ERROR"),
            indexed_at: Utc::now(),
        }
    }

    // -- Identifiers --

    #[test]
    fn customer_id_is_stable_and_short() {
        let first = derive_customer_id("Girtec S.A.");
        let second = derive_customer_id("Girtec S.A.");
        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_inputs_produce_different_ids() {
        assert_ne!(derive_customer_id("Girtec S.A."), derive_customer_id("Girtec SRL"));
        assert_ne!(
            derive_certificate_id("abc", "cert_2024.pdf"),
            derive_certificate_id("abc", "cert_2025.pdf")
        );
    }

    #[test]
    fn certificate_id_depends_on_the_owner() {
        assert_ne!(
            derive_certificate_id("customer-a", "certificado_bps.pdf"),
            derive_certificate_id("customer-b", "certificado_bps.pdf")
        );
        assert_eq!(derive_certificate_id("abc", "cert.pdf").len(), 16);
    }

    // -- Registry bookkeeping --

    #[test]
    fn totals_track_additions() {
        let mut registry = CustomerRegistry::new();
        let before = registry.last_updated;

        registry.add_customer(customer("c1", "Girtec S.A."));
        registry.add_certificate(certificate("c1", "certificado_bps.pdf", CertificateState::Ok));
        registry.add_certificate(certificate("c1", "certificado_dgi.pdf", CertificateState::Ok));

        assert_eq!(registry.total_customers, 1);
        assert_eq!(registry.total_certificates, 2);
        assert!(registry.last_updated >= before);
    }

    #[test]
    fn customer_certificates_filters_by_owner() {
        let mut registry = CustomerRegistry::new();
        registry.add_certificate(certificate("c1", "certificado_bps.pdf", CertificateState::Ok));
        registry.add_certificate(certificate("c2", "certificado_dgi.pdf", CertificateState::Ok));

        let certs = registry.customer_certificates("c1");
        assert_eq!(certs.len(), 1);
        assert_eq!(certs[0].filename, "certificado_bps.pdf");
    }

    #[test]
    fn error_certificates_match_prefix_or_state() {
        let mut registry = CustomerRegistry::new();
        registry.add_certificate(certificate("c1", "ERROR certificado_bps.pdf", CertificateState::Error));
        registry.add_certificate(certificate("c1", "certificado_dgi.pdf", CertificateState::Error));
        registry.add_certificate(certificate("c1", "certificado_msp.pdf", CertificateState::Ok));

        // Both the prefixed file and the state-flagged file count.
        assert_eq!(registry.error_certificates().len(), 2);
    }

    // -- Serialization --

    #[test]
    fn enums_serialize_uppercase() {
        assert_eq!(
            serde_json::to_value(CustomerKind::Company).unwrap(),
            serde_json::json!("COMPANY")
        );
        assert_eq!(
            serde_json::to_value(CertificateState::Unknown).unwrap(),
            serde_json::json!("UNKNOWN")
        );
    }
}
