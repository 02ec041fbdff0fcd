//! # Acta Bridge
//!
//! Derives a rule-engine case from the extraction output of an acta de
//! asamblea. The mapping is deliberately conservative: facts the extraction
//! pipeline cannot attest are fixed to `false`, so the verdict errs toward
//! INVALID rather than passing on evidence nobody produced.

use std::collections::BTreeMap;

use serde_json::Value;

use escriba_core::fact::{truthy, FactValue};
use escriba_normalize::{DateConfidence, ExtractedRecord, NormalizationReport};
use escriba_rules::CaseInput;

/// Certificate type every acta-derived case evaluates under.
pub const ACTA_CERTIFICATE_TYPE: &str = "certificado_hechos";

/// Build a case for [`ACTA_CERTIFICATE_TYPE`] from an extracted record and
/// its normalization report.
///
/// Three groups of facts:
/// - attested by construction: the pipeline only emits records it read from
///   a source document, so the document-handling facts are fixed `true`;
/// - not yet extractable: personal knowledge of the notary and the
///   beneficial-ownership declarations are fixed `false`;
/// - derived from the record: legal-entity existence from the normalized
///   company name, officer designation from the meeting chair field, and
///   statute compliance from a literal mention in the amendment field.
pub fn case_input_from_extraction(
    record: &ExtractedRecord,
    report: &NormalizationReport,
) -> CaseInput {
    let has_company = report.normalized_fields.company_name.is_some();
    let has_chair = record
        .other_fields
        .get("presidente_asamblea")
        .is_some_and(truthy);
    let cites_18930 = mentions_statute(record.other_fields.get("modificacion_legal"), "18930");
    let has_date = report.normalized_fields.date.confidence != DateConfidence::Missing;

    let facts = BTreeMap::from([
        fact("objeto_del_certificado", true),
        fact("documento_fuente", true),
        fact("exhibicion_o_compulsa", true),
        fact("conocimiento_personal_del_escribano", false),
        fact("documentacion_verificada_por_escribano", true),
        fact("existencia_persona_juridica", has_company),
        fact("designacion_autoridades", has_chair),
        fact("cargo_vigente", has_chair),
        fact("cumplimiento_ley_18930", cites_18930),
        fact("cumplimiento_ley_17904", false),
        fact("beneficiario_final_declarado", false),
    ]);

    let conditions = BTreeMap::from([("otorgante_no_sabe_o_no_puede_firmar".to_owned(), false)]);

    let global_fields = BTreeMap::from([
        fact("nombre_solicitante", true),
        fact("destinatario", true),
        fact("lugar_expedicion", true),
        fact("fecha_expedicion", has_date),
        fact("firma_y_sello_escribano", true),
        fact("constancia_cumplimiento_legal", true),
    ]);

    CaseInput {
        certificate_type: ACTA_CERTIFICATE_TYPE.to_owned(),
        facts,
        conditions,
        global_fields,
    }
}

fn fact(id: &str, asserted: bool) -> (String, FactValue) {
    (id.to_owned(), FactValue::Flag(asserted))
}

/// Whether a free-form field mentions a statute number. String values are
/// searched directly; anything else is stringified first. The match is a
/// literal digit-run search, so the dotted citation form ("18.930") does
/// not count as a mention.
fn mentions_statute(value: Option<&Value>, number: &str) -> bool {
    match value {
        Some(Value::String(s)) => s.contains(number),
        Some(other) => other.to_string().contains(number),
        None => false,
    }
}
