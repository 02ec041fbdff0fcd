//! # Rule Table
//!
//! Strongly-typed model of the external rule configuration. Field names
//! match the configuration keys byte-for-byte — the table is maintained in
//! Spanish by counsel, and the keys are the contract:
//!
//! ```json
//! {
//!   "certificado_firmas": {
//!     "base_legal": { "articulo_principal": 247, "literal": "B" },
//!     "requisitos": [
//!       {
//!         "id": "firma_en_presencia",
//!         "descripcion": "Firma estampada en presencia del escribano",
//!         "obligatorio": true,
//!         "puede_vencer": false,
//!         "fuente_legal": { "articulo": 247, "referencia_cruzada": { "articulo": 239 } }
//!       }
//!     ],
//!     "requisitos_condicionales": [
//!       { "condicion": "otorgante_no_sabe_o_no_puede_firmar", "requisitos": [ ... ] }
//!     ]
//!   },
//!   "requisitos_globales_certificado": {
//!     "base_legal": { "articulo": 255 },
//!     "campos": [ { "id": "nombre_solicitante", "descripcion": "Nombre del solicitante" } ]
//!   }
//! }
//! ```
//!
//! Every top-level key other than `requisitos_globales_certificado` is a
//! certificate type. Parsing is strict: a requirement without an `id` or a
//! conditional block without a `condicion` fails the load, so a typo in the
//! table surfaces at startup instead of silently skipping a check.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};

// ---------------------------------------------------------------------------
// Table structure
// ---------------------------------------------------------------------------

/// The complete rule configuration: certificate types plus the global
/// field set that applies to every certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Fields every certificate must carry, regardless of type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requisitos_globales_certificado: Option<GlobalFieldSet>,

    /// Requirements per certificate type, keyed by type name
    /// (`certificado_firmas`, `certificado_hechos`, ...).
    #[serde(flatten)]
    pub certificate_types: BTreeMap<String, CertificateTypeRules>,
}

/// The rules for one certificate type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificateTypeRules {
    /// The primary statutory basis for this certificate type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_legal: Option<BaseLegal>,

    /// Requirements that always apply.
    #[serde(default)]
    pub requisitos: Vec<Requirement>,

    /// Requirement blocks that apply only when a named condition holds.
    #[serde(default)]
    pub requisitos_condicionales: Vec<ConditionalBlock>,
}

/// Primary statutory basis of a certificate type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseLegal {
    /// Principal article number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articulo_principal: Option<i64>,

    /// Literal (lettered subsection) within the article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
}

/// One requirement a certificate must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Stable identifier; also the key under which the case supplies the
    /// corresponding fact. Required — an entry without an id cannot be
    /// checked against anything.
    pub id: String,

    /// Operator-facing description, used verbatim in finding messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,

    /// Whether the requirement is mandatory. Non-mandatory requirements
    /// still contribute their citation to the legal basis.
    #[serde(default)]
    pub obligatorio: bool,

    /// Whether the attested document can expire.
    #[serde(default)]
    pub puede_vencer: bool,

    /// The statutory source backing this requirement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuente_legal: Option<LegalSource>,
}

impl Requirement {
    /// The operator-facing description, falling back to the id when counsel
    /// has not written one yet.
    pub fn description(&self) -> &str {
        self.descripcion.as_deref().unwrap_or(&self.id)
    }

    /// The citation parts of this requirement:
    /// (article, literal, cross-referenced article).
    pub fn legal_source(&self) -> (Option<i64>, Option<&str>, Option<i64>) {
        match &self.fuente_legal {
            Some(source) => (
                source.articulo,
                source.literal.as_deref(),
                source
                    .referencia_cruzada
                    .as_ref()
                    .and_then(|cross| cross.articulo),
            ),
            None => (None, None, None),
        }
    }
}

/// Statutory source of a requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegalSource {
    /// Article number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articulo: Option<i64>,

    /// Literal within the article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,

    /// Another article this requirement is read in relation with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referencia_cruzada: Option<CrossReference>,
}

/// A cross-referenced article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossReference {
    /// The cross-referenced article number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articulo: Option<i64>,
}

/// Requirements that apply only under a named condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalBlock {
    /// Key into the case's conditions map. The block is evaluated only when
    /// the case supplies `true` for this key.
    pub condicion: String,

    /// The requirements that activate with the condition.
    #[serde(default)]
    pub requisitos: Vec<Requirement>,
}

/// Fields every certificate must carry, with their shared statutory basis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalFieldSet {
    /// The article mandating the global fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_legal: Option<GlobalBasis>,

    /// The mandated fields.
    #[serde(default)]
    pub campos: Vec<GlobalField>,
}

impl GlobalFieldSet {
    /// The article number mandating the global fields, if configured.
    pub fn article(&self) -> Option<i64> {
        self.base_legal.as_ref().and_then(|basis| basis.articulo)
    }
}

/// Statutory basis of the global field set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalBasis {
    /// Article number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articulo: Option<i64>,
}

/// One globally mandated field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalField {
    /// Stable identifier; the key under which the case supplies the field.
    pub id: String,

    /// Operator-facing description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

impl GlobalField {
    /// The operator-facing description, falling back to the id.
    pub fn description(&self) -> &str {
        self.descripcion.as_deref().unwrap_or(&self.id)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl RuleTable {
    /// Load a rule table from a file, dispatching on extension: `.yaml` and
    /// `.yml` parse as YAML, everything else as JSON (the original format).
    ///
    /// # Errors
    ///
    /// [`RulesError::FileNotFound`] when the path does not exist;
    /// [`RulesError::JsonParse`]/[`RulesError::YamlParse`] when the content
    /// is malformed, including requirements without an `id`.
    pub fn load(path: &Path) -> RulesResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RulesError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                RulesError::Io(e)
            }
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );

        let table: Self = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| RulesError::YamlParse {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| RulesError::JsonParse {
                path: path.to_path_buf(),
                source: e,
            })?
        };

        tracing::debug!(
            path = %path.display(),
            certificate_types = table.certificate_types.len(),
            "loaded rule table"
        );
        Ok(table)
    }

    /// Parse a rule table from a JSON string.
    pub fn from_json_str(content: &str) -> RulesResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Build a rule table from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> RulesResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// The rules for one certificate type, if defined.
    pub fn get(&self, certificate_type: &str) -> Option<&CertificateTypeRules> {
        self.certificate_types.get(certificate_type)
    }

    /// All defined certificate types, sorted. The global field set is not a
    /// certificate type and is not listed.
    pub fn certificate_types(&self) -> Vec<&str> {
        self.certificate_types.keys().map(String::as_str).collect()
    }

    /// The global field set, if configured.
    pub fn global_fields(&self) -> Option<&GlobalFieldSet> {
        self.requisitos_globales_certificado.as_ref()
    }
}
