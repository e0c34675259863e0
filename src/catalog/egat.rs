//! EGAT-style invoices.

use super::DocumentSpec;
use crate::schema::{Field, Schema};

pub const SYSTEM_PROMPT: &str = r#"You are an expert extractor of Thai/English tax invoices issued to or by EGAT (การไฟฟ้าฝ่ายผลิตแห่งประเทศไทย).
Return ONLY a JSON object that matches the provided schema. No markdown, no commentary.

NUMBERS
- Output plain numbers: no thousands separators, currency symbols or units.
- Convert Thai numerals (๐-๙) to Arabic numerals and keep every decimal place shown.
- Amounts are non-negative THB unless the document states another currency.

FIELDS
- invoice_number: เลขที่ใบแจ้งหนี้ / เลขที่ใบกำกับภาษี / Invoice No.
- invoice_date: วันที่ / Date, copied exactly as printed (Thai Buddhist-era dates stay as printed).
- seller_name: the issuing company in the letterhead.
- buyer_name: ชื่อลูกค้า / Bill To, if shown.
- seller_tax_id: เลขประจำตัวผู้เสียภาษี of the seller, if shown.
- line_items: one entry per row of the item table, in document order:
  description (รายการ), quantity (จำนวน / ปริมาณ), unit (หน่วย), unit_price (ราคาต่อหน่วย), amount (จำนวนเงิน).
- subtotal_thb: รวมเงิน / มูลค่าก่อนภาษี / Sub Total (before VAT).
- vat_thb: ภาษีมูลค่าเพิ่ม / VAT 7%.
- total_amount_thb: จำนวนเงินรวมทั้งสิ้น / Grand Total (after VAT).
- currency: ISO code, default THB.
- notes: remarks printed on the invoice, if any.

RULES
- If an optional field is not printed on the document, return null. Never guess.
- Do not add keys that are not in the schema.
"#;

pub fn schema() -> Schema {
    let line_item = Schema::object([
        Field::required("description", Schema::string().describe("รายการ | Line description")),
        Field::optional(
            "quantity",
            Schema::number().non_negative().describe("จำนวน | Quantity"),
        ),
        Field::optional("unit", Schema::string().describe("หน่วย | Unit")),
        Field::optional(
            "unit_price",
            Schema::number().non_negative().describe("ราคาต่อหน่วย | Unit price"),
        ),
        Field::required(
            "amount",
            Schema::number().non_negative().describe("จำนวนเงิน | Line amount"),
        ),
    ]);

    Schema::object([
        Field::required("invoice_number", Schema::string().describe("เลขที่ใบแจ้งหนี้ | Invoice number")),
        Field::required("invoice_date", Schema::string().describe("วันที่ | Invoice date as printed")),
        Field::required("seller_name", Schema::string().describe("Issuing company")),
        Field::optional("buyer_name", Schema::string().describe("ชื่อลูกค้า | Bill-to party")),
        Field::optional("seller_tax_id", Schema::string().describe("เลขประจำตัวผู้เสียภาษี")),
        Field::required("line_items", Schema::array(line_item).describe("Item table rows")),
        Field::required(
            "subtotal_thb",
            Schema::number().non_negative().describe("มูลค่าก่อนภาษี | Amount before VAT"),
        ),
        Field::optional(
            "vat_thb",
            Schema::number().non_negative().describe("ภาษีมูลค่าเพิ่ม | VAT"),
        ),
        Field::required(
            "total_amount_thb",
            Schema::number().non_negative().describe("จำนวนเงินรวมทั้งสิ้น | Grand total"),
        ),
        Field::required(
            "currency",
            Schema::string().default_value_of("THB").describe("Currency code"),
        ),
        Field::optional("notes", Schema::string().describe("หมายเหตุ | Remarks")),
    ])
}

pub fn invoice() -> DocumentSpec {
    DocumentSpec::new(SYSTEM_PROMPT, schema())
}
