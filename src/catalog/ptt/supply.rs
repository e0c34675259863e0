//! PTT gas-supply documents.
//!
//! Three shapes share this module: the single supply invoice, the invoice
//! register bundled with a heat-quantity statement, and the B8/32 platform
//! pack where several vendor invoices come with one heat total and the
//! model's own confidence scores.

use super::super::DocumentSpec;
use crate::adapters::Adapter;
use crate::schema::{Field, Schema};
use serde::{Deserialize, Serialize};

pub const INVOICE_PROMPT: &str = r#"You extract the header and totals of a PTT natural-gas supply invoice (Thai and/or English).
Return ONLY a JSON object with the schema's keys. No markdown, no commentary.

- invoice_no: เลขที่ใบแจ้งหนี้ / Invoice No.
- invoice_date: วันที่ as printed.
- supplier: the issuing company in the letterhead.
- period: billing period (งวด / ประจำเดือน) if printed.
- quantity_mmbtu: ปริมาณก๊าซ / ปริมาณความร้อน in MMBTU.
- unit_price_baht_mmbtu: ราคาต่อหน่วย (บาท/MMBTU).
- amount_before_vat_baht: มูลค่าก่อนภาษี / จำนวนเงินก่อน VAT.
- vat_baht: ภาษีมูลค่าเพิ่ม, if printed.
- total_amount_baht: จำนวนเงินรวมทั้งสิ้น after VAT.
- currency: default THB.

Numbers are plain numerics: no commas, currency symbols or units. Optional values that are not printed are null.
"#;

pub const INVOICE_AND_HEAT_PROMPT: &str = r#"You extract an invoice register and its heat-quantity statement from a PTT gas supply pack.
Return ONLY a JSON object with the schema's keys. No markdown, no commentary.

INVOICES
- One entry per invoice listed in the register (ทะเบียนใบแจ้งหนี้), in document order.
- invoice_no: เลขที่ใบแจ้งหนี้.
- description: รายการ, if printed.
- amount_excluding_vat_baht: จำนวนเงินไม่รวมภาษี. Never include VAT.

HEAT
- total_heat_quantity_mmbtu: the single total ปริมาณความร้อน (MMBTU) for the period, from the summary table.
  Do not add up per-invoice quantities.

TOTALS
- total_amount_excluding_vat_baht: the register's printed total before VAT, if printed.
- period: billing period as printed, if printed.

Numbers are plain numerics without separators. Optional values that are not printed are null.
"#;

pub const B8_INVOICE_AND_HEAT_PROMPT: &str = r#"You are an expert PDF data extractor for gas platform documents (B8/32, Benchamas / เบญจมาศ, Pailin / ไพลิน).
Documents are in Thai or English. Extract invoices and the energy quantity, with a confidence score (0-100) for each.

1. INVOICES (รายการใบแจ้งหนี้)
   Extract EVERY invoice as its own item:
   - vendor: ชื่อผู้ขาย/บริษัท, the company issuing the invoice
   - invoiceNumber: เลขที่ใบแจ้งหนี้
   - amountExcludingVAT: จำนวนเงินรวมไม่รวมภาษี, the amount BEFORE VAT in THB.
     Look for "จำนวนเงินรวม", "ยอดก่อนภาษี", "Subtotal", "Total (Exclude VAT)". NEVER include VAT.
   - currency: usually THB
   - confidence: 0-100

2. TOTAL HEAT QUANTITY (ปริมาณความร้อนรวม)
   ONE value for the whole document, usually in the summary table or the "Gas Delivery Report" section.
   Look for "ปริมาณความร้อน", "Total Energy", "Heat Quantity", "MMBTU".
   Do NOT add up per-invoice quantities. Give value, unit (usually MMBTU) and confidence 0-100.

3. CONFIDENCE SCORES (0-100)
   - invoices: average confidence across invoices
   - heatQuantity: confidence in the heat quantity
   - overall: confidence in the whole extraction

4. OPTIONAL CONTEXT
   - platformName: e.g. "B8/32", "Benchamas", "เบญจมาศ", "Pailin", "ไพลิน"
   - period: e.g. "Aug-2025", "สิงหาคม 2568"
   - extractionMetadata: confidenceLevel "high" (>= 90), "medium" (70-89) or "low" (< 70), notes,
     and uncertainFields listing the keys you were unsure of.

SCORING
- 95-100: clearly printed, unambiguous label
- 80-94: clear value, label slightly ambiguous
- 60-79: inferred from context or partially legible
- below 60: uncertain

Numbers are plain numerics: no commas or currency symbols. Thai numerals become Arabic numerals.
Return ONLY the JSON object.
"#;

fn baht(desc: &str) -> Schema {
    Schema::number().non_negative().describe(desc)
}

fn percent(desc: &str) -> Schema {
    Schema::number().min(0.0).max(100.0).describe(desc)
}

pub fn invoice_schema() -> Schema {
    Schema::object([
        Field::required("invoice_no", Schema::string().describe("เลขที่ใบแจ้งหนี้ | Invoice number")),
        Field::required("invoice_date", Schema::string().describe("วันที่ | Invoice date as printed")),
        Field::required("supplier", Schema::string().describe("ผู้ขาย | Issuing company")),
        Field::optional("period", Schema::string().describe("งวด | Billing period")),
        Field::required("quantity_mmbtu", baht("ปริมาณ | Quantity (MMBTU)")),
        Field::required("unit_price_baht_mmbtu", baht("ราคาต่อหน่วย | Unit price (THB/MMBTU)")),
        Field::required("amount_before_vat_baht", baht("มูลค่าก่อนภาษี | Amount before VAT (THB)")),
        Field::optional("vat_baht", baht("ภาษีมูลค่าเพิ่ม | VAT (THB)")),
        Field::required("total_amount_baht", baht("จำนวนเงินรวมทั้งสิ้น | Total after VAT (THB)")),
        Field::required(
            "currency",
            Schema::string().default_value_of("THB").describe("สกุลเงิน | Currency code"),
        ),
    ])
}

pub fn invoice_and_heat_schema() -> Schema {
    let register_line = Schema::object([
        Field::required("invoice_no", Schema::string().describe("เลขที่ใบแจ้งหนี้ | Invoice number")),
        Field::optional("description", Schema::string().describe("รายการ | Description")),
        Field::required(
            "amount_excluding_vat_baht",
            baht("จำนวนเงินไม่รวมภาษี | Amount excluding VAT (THB)"),
        ),
    ]);

    Schema::object([
        Field::optional("period", Schema::string().describe("งวด | Billing period")),
        Field::required(
            "invoices",
            Schema::array(register_line).describe("ทะเบียนใบแจ้งหนี้ | Invoice register"),
        ),
        Field::required(
            "total_heat_quantity_mmbtu",
            baht("ปริมาณความร้อนรวม | Total heat quantity (MMBTU)"),
        ),
        Field::optional(
            "total_amount_excluding_vat_baht",
            baht("ยอดรวมไม่รวมภาษี | Register total excluding VAT (THB)"),
        ),
    ])
}

pub fn b8_invoice_and_heat_schema() -> Schema {
    let invoice = Schema::object([
        Field::required("vendor", Schema::string().describe("ชื่อผู้ขาย/บริษัท (Vendor/Company name)")),
        Field::required("invoiceNumber", Schema::string().describe("เลขที่ใบแจ้งหนี้ (Invoice number)")),
        Field::required(
            "amountExcludingVAT",
            Schema::number()
                .describe("จำนวนเงินรวมไม่รวมภาษี (Total amount excluding VAT) in THB"),
        ),
        Field::required(
            "currency",
            Schema::string().default_value_of("THB").describe("สกุลเงิน (Currency code)"),
        ),
        Field::required(
            "confidence",
            percent("Confidence score for this invoice extraction (0-100%)"),
        ),
    ]);

    let heat = Schema::object([
        Field::required("value", Schema::number().describe("ปริมาณความร้อนรวม (Total heat quantity/energy)")),
        Field::required(
            "unit",
            Schema::string()
                .default_value_of("MMBTU")
                .describe("หน่วย (Unit of measurement, typically MMBTU)"),
        ),
        Field::required(
            "confidence",
            percent("Confidence score for heat quantity extraction (0-100%)"),
        ),
    ]);

    let scores = Schema::object([
        Field::required("invoices", percent("Average confidence score for all invoices (0-100%)")),
        Field::required("heatQuantity", percent("Confidence score for heat quantity (0-100%)")),
        Field::required("overall", percent("Overall confidence score for entire extraction (0-100%)")),
    ]);

    let metadata = Schema::object([
        Field::required(
            "confidenceLevel",
            Schema::enumeration(["high", "medium", "low"])
                .describe("ระดับความมั่นใจในการดึงข้อมูล (based on overall score)"),
        ),
        Field::optional("notes", Schema::string().describe("หมายเหตุหรือข้อสังเกตเพิ่มเติม")),
        Field::optional(
            "uncertainFields",
            Schema::array(Schema::string())
                .describe("รายการฟิลด์ที่มีความไม่แน่นอน (List of fields with uncertainty)"),
        ),
    ]);

    Schema::object([
        Field::optional(
            "platformName",
            Schema::string().describe("ชื่อแพลตฟอร์ม/แหล่งก๊าซ เช่น B8/32, Benchamas, เบญจมาศ, Pailin, ไพลิน"),
        ),
        Field::optional(
            "period",
            Schema::string().describe("งวดเวลา เช่น Aug-2025, สิงหาคม 2568 (Billing period)"),
        ),
        Field::required(
            "invoices",
            Schema::array(invoice).describe("รายการใบแจ้งหนี้ทั้งหมด (List of all invoices)"),
        ),
        Field::optional(
            "totalInvoiceAmount",
            Schema::number().describe(
                "ยอดรวมจำนวนเงินไม่รวมภาษีทั้งหมด (Total sum of all invoice amounts excluding VAT) in THB",
            ),
        ),
        Field::required(
            "totalHeatQuantity",
            heat.describe("ปริมาณความร้อนรวมทั้งหมดของเอกสาร (Total heat quantity for entire document)"),
        ),
        Field::required(
            "confidenceScores",
            scores.describe("Confidence scores for different aspects of extraction"),
        ),
        Field::optional("extractionMetadata", metadata),
    ])
}

pub fn invoice() -> DocumentSpec {
    DocumentSpec::new(INVOICE_PROMPT, invoice_schema())
}

pub fn invoice_and_heat() -> DocumentSpec {
    DocumentSpec::new(INVOICE_AND_HEAT_PROMPT, invoice_and_heat_schema())
}

pub fn b8_invoice_and_heat() -> DocumentSpec {
    DocumentSpec::new(B8_INVOICE_AND_HEAT_PROMPT, b8_invoice_and_heat_schema())
        .with_adapter(Adapter::SumInvoiceAmounts)
}

// ── Typed views ──────────────────────────────────────────────────────────

/// One vendor invoice inside a platform pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInvoice {
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(rename = "amountExcludingVAT", default)]
    pub amount_excluding_vat: f64,
}

/// The part of a platform pack the invoice total is computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GasPlatformData {
    #[serde(default)]
    pub invoices: Vec<PlatformInvoice>,
}

impl GasPlatformData {
    pub fn total_excluding_vat(&self) -> f64 {
        self.invoices.iter().map(|i| i.amount_excluding_vat).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn b8_output() -> serde_json::Value {
        json!({
            "platformName": "B8/32",
            "period": "Aug-2025",
            "invoices": [
                {"vendor": "Valeura", "invoiceNumber": "INV-1", "amountExcludingVAT": 1000.5, "confidence": 98},
                {"vendor": "Valeura", "invoiceNumber": "INV-2", "amountExcludingVAT": 250, "currency": "USD", "confidence": 91}
            ],
            "totalHeatQuantity": {"value": 123456.7, "confidence": 95},
            "confidenceScores": {"invoices": 94.5, "heatQuantity": 95, "overall": 94}
        })
    }

    #[test]
    fn b8_defaults_are_filled() {
        let out = b8_invoice_and_heat_schema().validate(&b8_output()).unwrap();
        assert_eq!(out["invoices"][0]["currency"], "THB");
        assert_eq!(out["invoices"][1]["currency"], "USD");
        assert_eq!(out["totalHeatQuantity"]["unit"], "MMBTU");
        assert!(out["extractionMetadata"].is_null());
        assert!(out["totalInvoiceAmount"].is_null());
    }

    #[test]
    fn b8_confidence_above_hundred_is_rejected() {
        let mut v = b8_output();
        v["confidenceScores"]["overall"] = json!(120);
        let err = b8_invoice_and_heat_schema().validate(&v).unwrap_err();
        assert_eq!(err.issues[0].path, "$.confidenceScores.overall");
    }

    #[test]
    fn b8_confidence_level_must_be_known() {
        let mut v = b8_output();
        v["extractionMetadata"] = json!({"confidenceLevel": "certain"});
        let err = b8_invoice_and_heat_schema().validate(&v).unwrap_err();
        assert_eq!(err.issues[0].path, "$.extractionMetadata.confidenceLevel");
    }

    #[test]
    fn platform_total_sums_invoices() {
        let data: GasPlatformData = serde_json::from_value(b8_output()).unwrap();
        assert_eq!(data.total_excluding_vat(), 1250.5);
    }

    #[test]
    fn register_requires_heat_total() {
        let err = invoice_and_heat_schema()
            .validate(&json!({"invoices": []}))
            .unwrap_err();
        assert_eq!(err.issues[0].path, "$.total_heat_quantity_mmbtu");
    }

    #[test]
    fn supply_invoice_accepts_null_vat() {
        let out = invoice_schema()
            .validate(&json!({
                "invoice_no": "3620001276",
                "invoice_date": "31/08/2568",
                "supplier": "PTT",
                "quantity_mmbtu": 100,
                "unit_price_baht_mmbtu": 300.5,
                "amount_before_vat_baht": 30050,
                "vat_baht": null,
                "total_amount_baht": 30050
            }))
            .unwrap();
        assert!(out["vat_baht"].is_null());
        assert_eq!(out["currency"], "THB");
    }
}
