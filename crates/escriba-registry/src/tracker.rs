//! History queries over a registry.
//!
//! The tracker borrows an assembled [`CustomerRegistry`] and answers the
//! questions the practice actually asks: what does this customer's
//! history look like, where do the rejections cluster, which institution
//! causes the most trouble. All aggregates use ordered maps, so the
//! reports serialize identically run to run.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use escriba_core::Institution;

use crate::model::{
    CertificateRecord, CertificateState, Customer, CustomerKind, CustomerRegistry,
};

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Aggregated view of one customer's certificate history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    /// Customer id.
    pub customer_id: String,
    /// Customer name.
    pub name: String,
    /// Person or company.
    pub kind: CustomerKind,
    /// Archive folder.
    pub folder_path: String,
    /// Certificates on record.
    pub total_certificates: usize,
    /// Certificates the notary flagged.
    pub error_certificates: usize,
    /// Flagged share of the total, zero when there are no certificates.
    pub error_rate: f64,
    /// Certificate counts per recognized institution.
    pub by_institution: BTreeMap<Institution, usize>,
    /// Up to five most recent dated certificates, newest first.
    pub recent: Vec<RecentCertificate>,
}

/// One entry of [`CustomerSummary::recent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentCertificate {
    /// Filename as archived.
    pub filename: String,
    /// Issue date.
    pub date: Option<DateTime<Utc>>,
    /// Issuing institution.
    pub institution: Option<Institution>,
    /// Validation state.
    pub state: CertificateState,
}

/// Cross-customer statistics for one institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionStats {
    /// Certificates attributed to the institution.
    pub total_certificates: usize,
    /// Flagged certificates among them.
    pub error_certificates: usize,
    /// Flagged share of the total.
    pub error_rate: f64,
    /// Distinct customers holding such certificates.
    pub unique_customers: usize,
}

/// When a customer's certificates were issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineAnalysis {
    /// Certificates that carry a date.
    pub total_dated_certificates: usize,
    /// Earliest date on record.
    pub oldest: DateTime<Utc>,
    /// Latest date on record.
    pub newest: DateTime<Utc>,
    /// Days between oldest and newest.
    pub time_span_days: i64,
    /// Certificate counts per `YYYY-MM` month.
    pub by_month: BTreeMap<String, usize>,
}

/// Registry-wide rejection report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Flagged certificates across all customers.
    pub total_error_certificates: usize,
    /// Customers with at least one flagged certificate.
    pub customers_with_errors: usize,
    /// Flagged share of all certificates in the registry.
    pub error_rate: f64,
    /// Per-customer counts, most errors first.
    pub customers_by_error_count: Vec<CustomerErrorCount>,
}

/// One entry of [`ErrorReport::customers_by_error_count`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerErrorCount {
    /// Customer name, or `"Unknown"` when the id has no customer record.
    pub customer_name: String,
    /// Customer id.
    pub customer_id: String,
    /// Flagged certificates for this customer.
    pub error_count: usize,
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Read-only query interface over a [`CustomerRegistry`].
pub struct CertificateTracker<'a> {
    registry: &'a CustomerRegistry,
}

impl<'a> CertificateTracker<'a> {
    /// Wrap a registry.
    pub fn new(registry: &'a CustomerRegistry) -> Self {
        Self { registry }
    }

    /// First customer whose name contains `name`, case-insensitive.
    pub fn customer_by_name(&self, name: &str) -> Option<&'a Customer> {
        let name_lower = name.to_lowercase();
        self.registry
            .customers
            .iter()
            .find(|customer| customer.name.to_lowercase().contains(&name_lower))
    }

    /// Customer with exactly this id.
    pub fn customer_by_id(&self, customer_id: &str) -> Option<&'a Customer> {
        self.registry
            .customers
            .iter()
            .find(|customer| customer.customer_id == customer_id)
    }

    /// A customer's certificates, newest first.
    ///
    /// Sorted by date then filename, both descending; undated
    /// certificates sort last.
    pub fn history(&self, customer_id: &str) -> Vec<&'a CertificateRecord> {
        let mut certificates = self.registry.customer_certificates(customer_id);
        certificates.sort_by(|a, b| (b.date, &b.filename).cmp(&(a.date, &a.filename)));
        certificates
    }

    /// A customer's flagged certificates, in insertion order.
    pub fn error_history(&self, customer_id: &str) -> Vec<&'a CertificateRecord> {
        self.registry
            .customer_certificates(customer_id)
            .into_iter()
            .filter(|cert| cert.is_error())
            .collect()
    }

    /// A customer's certificates from one institution.
    pub fn by_institution(
        &self,
        customer_id: &str,
        institution: Institution,
    ) -> Vec<&'a CertificateRecord> {
        self.registry
            .customer_certificates(customer_id)
            .into_iter()
            .filter(|cert| cert.institution == Some(institution))
            .collect()
    }

    /// Aggregate one customer's history, or `None` for an unknown id.
    pub fn customer_summary(&self, customer_id: &str) -> Option<CustomerSummary> {
        let customer = self.customer_by_id(customer_id)?;
        let certificates = self.registry.customer_certificates(customer_id);
        let error_certificates = certificates.iter().filter(|cert| cert.is_error()).count();

        let mut by_institution: BTreeMap<Institution, usize> = BTreeMap::new();
        for cert in &certificates {
            if let Some(institution) = cert.institution {
                *by_institution.entry(institution).or_default() += 1;
            }
        }

        let mut dated: Vec<&CertificateRecord> = certificates
            .iter()
            .copied()
            .filter(|cert| cert.date.is_some())
            .collect();
        dated.sort_by(|a, b| b.date.cmp(&a.date));
        let recent = dated
            .into_iter()
            .take(5)
            .map(|cert| RecentCertificate {
                filename: cert.filename.clone(),
                date: cert.date,
                institution: cert.institution,
                state: cert.state,
            })
            .collect();

        Some(CustomerSummary {
            customer_id: customer.customer_id.clone(),
            name: customer.name.clone(),
            kind: customer.kind,
            folder_path: customer.folder_path.clone(),
            total_certificates: certificates.len(),
            error_certificates,
            error_rate: rate(error_certificates, certificates.len()),
            by_institution,
            recent,
        })
    }

    /// Groups of a customer's certificates that look like duplicates.
    ///
    /// Certificates are grouped by the first thirty characters of the
    /// filename after stripping the error marker; only groups with more
    /// than one member are returned.
    pub fn duplicate_groups(&self, customer_id: &str) -> Vec<Vec<&'a CertificateRecord>> {
        let mut groups: BTreeMap<String, Vec<&'a CertificateRecord>> = BTreeMap::new();
        for cert in self.registry.customer_certificates(customer_id) {
            let stripped = cert.filename.replace("ERROR", "");
            let prefix: String = stripped.trim().chars().take(30).collect();
            groups.entry(prefix).or_default().push(cert);
        }
        groups
            .into_values()
            .filter(|group| group.len() > 1)
            .collect()
    }

    /// Per-institution statistics across the whole registry.
    pub fn institution_analysis(&self) -> BTreeMap<Institution, InstitutionStats> {
        let mut totals: BTreeMap<Institution, (usize, usize, HashSet<&str>)> = BTreeMap::new();
        for cert in &self.registry.certificates {
            if let Some(institution) = cert.institution {
                let entry = totals.entry(institution).or_default();
                entry.0 += 1;
                if cert.is_error() {
                    entry.1 += 1;
                }
                entry.2.insert(cert.customer_id.as_str());
            }
        }

        totals
            .into_iter()
            .map(|(institution, (total, errors, customers))| {
                let stats = InstitutionStats {
                    total_certificates: total,
                    error_certificates: errors,
                    error_rate: rate(errors, total),
                    unique_customers: customers.len(),
                };
                (institution, stats)
            })
            .collect()
    }

    /// When one customer's certificates were issued, or `None` when none
    /// of them carries a date.
    pub fn timeline_analysis(&self, customer_id: &str) -> Option<TimelineAnalysis> {
        let dates: Vec<DateTime<Utc>> = self
            .registry
            .customer_certificates(customer_id)
            .iter()
            .filter_map(|cert| cert.date)
            .collect();
        if dates.is_empty() {
            return None;
        }

        let oldest = dates.iter().copied().min()?;
        let newest = dates.iter().copied().max()?;

        let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
        for date in &dates {
            *by_month.entry(date.format("%Y-%m").to_string()).or_default() += 1;
        }

        Some(TimelineAnalysis {
            total_dated_certificates: dates.len(),
            oldest,
            newest,
            time_span_days: newest.signed_duration_since(oldest).num_days(),
            by_month,
        })
    }

    /// All certificates whose filename contains `term`, case-insensitive.
    pub fn search(&self, term: &str) -> Vec<&'a CertificateRecord> {
        let term_lower = term.to_lowercase();
        self.registry
            .certificates
            .iter()
            .filter(|cert| cert.filename.to_lowercase().contains(&term_lower))
            .collect()
    }

    /// Registry-wide rejection report.
    pub fn error_report(&self) -> ErrorReport {
        let error_certificates = self.registry.error_certificates();

        let mut by_customer: BTreeMap<&str, usize> = BTreeMap::new();
        for cert in &error_certificates {
            *by_customer.entry(cert.customer_id.as_str()).or_default() += 1;
        }

        let names: HashMap<&str, &str> = self
            .registry
            .customers
            .iter()
            .map(|customer| (customer.customer_id.as_str(), customer.name.as_str()))
            .collect();

        let mut customers_by_error_count: Vec<CustomerErrorCount> = by_customer
            .iter()
            .map(|(customer_id, count)| CustomerErrorCount {
                customer_name: names.get(customer_id).unwrap_or(&"Unknown").to_string(),
                customer_id: (*customer_id).to_string(),
                error_count: *count,
            })
            .collect();
        customers_by_error_count.sort_by(|a, b| b.error_count.cmp(&a.error_count));

        ErrorReport {
            total_error_certificates: error_certificates.len(),
            customers_with_errors: by_customer.len(),
            error_rate: rate(error_certificates.len(), self.registry.total_certificates),
            customers_by_error_count,
        }
    }
}

/// `part / whole`, zero when `whole` is zero.
fn rate(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
