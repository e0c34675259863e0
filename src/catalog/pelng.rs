//! PELNG LNG-terminal invoices (LMPT1 / LMPT2 station service fees).
//!
//! The headline fields are always present on the invoice. The per-block
//! fields (`*_ld_*` fixed cost, `*_lc_*` variable cost for each MTPA phase)
//! exist only on some months' documents and are optional; the prompt tells
//! the model to return null rather than borrow a value from another block.

use super::DocumentSpec;
use crate::schema::{Field, Schema};

pub const SYSTEM_PROMPT: &str = r#"You are a financial-document extraction model for Thai/English LNG terminal invoices (PELNG, EGAT).
Return ONLY a JSON object whose keys match the schema exactly. No extra keys, comments or text.

Language: Thai and/or English. Currency: THB unless stated otherwise.

1) NUMBERS
   - Plain numbers only: no commas, spaces or currency symbols; convert Thai numerals; keep decimals.
   - Required fields that cannot be found are 0.

2) UNITS
   - Gas quantities in MMBTU (ล้านบีทียู / ล้าน BTU).
   - Unit prices in THB per MMBTU.

3) WHERE TO LOOK (synonyms)
   - station_service_fee_thb — ค่าบริการสถานี; รวมจำนวนเงินค่าบริการส่วนต้นทุนคงที่กับค่าบริการต้นทุนผันแปร;
     Station / Terminal Service Fee. Equals fixed-cost amount + variable-cost amount.
   - fixed_cost_* — ค่าบริการส่วนต้นทุนคงที่ (Ld): ปริมาณ (quantity), ราคาต่อหน่วย (unit price), จำนวนเงิน (amount).
   - variable_cost_* — ค่าบริการส่วนต้นทุนผันแปร (Lc): same three columns.
   - total_amount_thb — มูลค่ารวม / จำนวนเงินรวม BEFORE tax. Not the grand total after VAT.
   - rlng_total_value_thb — มูลค่า RLNG รวม / มูลค่ารวม RLNG / RLNG Total Value.
   - lmpt2_station_service_fees_total_baht — the "รวมจำนวนเงิน" / "Total Amount" line of the LMPT2 station
     service fee table, before VAT.
   - no_N_rate_baht_per_mmbtu — ราคา LNG for cargo N of the month (รวมค่าเนื้อ LNG และค่าใช้จ่ายนำเข้า).
   - total_regas_sendout_null — ปริมาณเนื้อ Regas LNG ทั้งหมด.
   - total_regas_lng_value_null — มูลค่าเนื้อ Regas LNG ทั้งหมด.
   - total_service_value_null — ค่าบริการสถานี in the regas summary.

4) TABLE READING
   - Map columns as Description | Quantity | Unit | Unit Price | Amount.
   - Totals usually sit at the bottom or right, or in a summary box.
   - When a label appears more than once, take the one closest to its section header or in the summary box.

5) MTPA BLOCKS — DO NOT CROSS SECTIONS OR PAGES
   - Fields named after a block (phase 1 5 MTPA, phase 2 5 MTPA, 0.5 MTPA, 0.7 MTPA) come ONLY from the table
     section or page that carries that block's header.
   - If the Ld or Lc row does not exist inside that exact section, return null for its quantity, price and amount.
   - Never copy values from another block, from summary pages, or from neighbouring pages.

6) CHECKS
   - Money, quantities and prices are non-negative.
   - Optional values that are not explicitly printed are null. Do not infer, estimate or guess.
"#;

/// Optional MTPA-block lines: `(field prefix, human label)`.
const BLOCK_LINES: [(&str, &str); 9] = [
    ("fixed_cost_ld_phase_1_5_mtpa", "Fixed-cost Ld, phase 1 5 MTPA"),
    ("variable_cost_lc_phase_1", "Variable-cost Lc, phase 1"),
    ("fixed_cost_ld_phase_2_5_mtpa", "Fixed-cost Ld, phase 2 5 MTPA"),
    ("variable_cost_lc_phase_2", "Variable-cost Lc, phase 2"),
    ("fixed_cost_ld_05_mtpa", "Fixed-cost Ld, 0.5 MTPA"),
    ("variable_cost_lc_phase_1_05_mtpa", "Variable-cost Lc, phase 1 0.5 MTPA"),
    ("variable_cost_lc_phase_2_05_mtpa", "Variable-cost Lc, phase 2 0.5 MTPA"),
    ("fixed_cost_ld_07_mtpa", "Fixed-cost Ld, 0.7 MTPA"),
    ("variable_cost_lc_07_mtpa", "Variable-cost Lc, 0.7 MTPA"),
];

fn thb(desc: impl Into<String>) -> Schema {
    Schema::number().non_negative().describe(desc)
}

pub fn schema() -> Schema {
    let mut fields = vec![
        Field::required(
            "station_service_fee_thb",
            thb("ค่าบริการสถานี | Station service fee (THB) = fixed-cost amount + variable-cost amount"),
        ),
        Field::required(
            "fixed_cost_quantity_mmbtu",
            thb("ปริมาณค่าบริการส่วนต้นทุนคงที่ | Fixed-cost quantity (MMBTU)"),
        ),
        Field::required(
            "fixed_cost_unit_price_thb_per_mmbtu",
            thb("ราคาต่อหน่วยค่าบริการส่วนต้นทุนคงที่ | Fixed-cost unit price (THB/MMBTU)"),
        ),
        Field::required(
            "fixed_cost_amount_thb",
            thb("จำนวนเงินค่าบริการส่วนต้นทุนคงที่ | Fixed-cost amount (THB)"),
        ),
        Field::required(
            "variable_cost_quantity_mmbtu",
            thb("ปริมาณค่าบริการส่วนต้นทุนผันแปร | Variable-cost quantity (MMBTU)"),
        ),
        Field::required(
            "variable_cost_unit_price_thb_per_mmbtu",
            thb("ราคาต่อหน่วยค่าบริการส่วนต้นทุนผันแปร | Variable-cost unit price (THB/MMBTU)"),
        ),
        Field::required(
            "variable_cost_amount_thb",
            thb("จำนวนเงินค่าบริการส่วนต้นทุนผันแปร | Variable-cost amount (THB)"),
        ),
        Field::required(
            "rlng_total_value_thb",
            thb("มูลค่า RLNG รวม | RLNG total value (THB)"),
        ),
        Field::required(
            "total_amount_thb",
            thb("มูลค่ารวมก่อน Tax | Total amount before tax (THB), not the grand total"),
        ),
        Field::required(
            "currency",
            Schema::string()
                .default_value_of("THB")
                .describe("รหัสสกุลเงิน | Currency code"),
        ),
        Field::optional(
            "notes",
            Schema::string().describe("หมายเหตุเพิ่มเติม | Additional remarks"),
        ),
    ];

    for (prefix, label) in BLOCK_LINES {
        fields.push(Field::optional(
            format!("{prefix}_quantity"),
            thb(format!("{label}: quantity (MMBTU)")),
        ));
        fields.push(Field::optional(
            format!("{prefix}_price_per_unit"),
            thb(format!("{label}: unit price (THB/MMBTU)")),
        ));
        fields.push(Field::optional(
            format!("{prefix}_amount_baht"),
            thb(format!("{label}: amount (THB)")),
        ));
    }

    fields.push(Field::optional(
        "lmpt2_station_service_fees_total_baht",
        thb("รวมจำนวนเงิน | LMPT2 station service fees, total amount before VAT"),
    ));

    for cargo in 1..=5 {
        fields.push(Field::optional(
            format!("no_{cargo}_rate_baht_per_mmbtu"),
            thb(format!(
                "ราคา LNG เที่ยวที่ {cargo} | LNG price for cargo {cargo} incl. import costs (THB/MMBTU)"
            )),
        ));
    }

    fields.extend([
        Field::optional(
            "total_regas_sendout_null",
            thb("ปริมาณเนื้อ Regas LNG ทั้งหมด | Total regas LNG quantity"),
        ),
        Field::optional(
            "total_regas_lng_value_null",
            thb("มูลค่าเนื้อ Regas LNG ทั้งหมด | Total regas LNG value (THB)"),
        ),
        Field::optional(
            "total_service_value_null",
            thb("ค่าบริการสถานี | Station service value in the regas summary (THB)"),
        ),
    ]);

    Schema::object(fields)
}

pub fn invoice() -> DocumentSpec {
    DocumentSpec::new(SYSTEM_PROMPT, schema())
}
