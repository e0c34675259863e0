//! PTT transmission-system-operator reports.
//!
//! - `gas-amount`: delivered volumes for Areas 2, 3 and 4 from the pool
//!   manager report.
//! - `gas-cost`: the Area 1 fixed (TD) and variable (TC) service charge
//!   lines. This schema is a top-level array.

use super::super::DocumentSpec;
use crate::adapters::Adapter;
use crate::schema::{Field, Schema};
use serde::{Deserialize, Serialize};

pub const GAS_AMOUNT_PROMPT: &str = r#"You extract three numbers from a PTT natural-gas pool manager report.

1. Find the table of gas volumes by area (พื้นที่), titled like
   "ข้อมูลปริมาณก๊าซธรรมชาติทุกจุดจ่ายออกและค่าบริการระบบท่อส่งก๊าซธรรมชาตินอกชายฝั่ง (พื้นที่ 1)".
2. Read the volume in MMBTU (Million BTU) for:
   - Area 2 (พื้นที่ 2) — ขนอม  → volumeArea2KhanomMMBTU
   - Area 3 (พื้นที่ 3) — บนฝั่ง → volumeArea3OnshoreMMBTU
   - Area 4 (พื้นที่ 4) — จะนะ  → volumeArea4ChanaMMBTU
3. Strip commas and markers such as '*' before converting: "87,753,753*" becomes 87753753.

Output exactly one JSON object with those three numeric keys and nothing else:
no report date, no service charges, no other delivery points, no prose, no code fences.
"#;

pub const GAS_COST_PROMPT: &str = r#"You extract the Area 1 gas pipeline service charge lines from a PTT TSO invoice summary.

Output ONLY a JSON array with exactly two objects: one Fixed Cost (ต้นทุนคงที่, TD) record and one
Variable Cost (ต้นทุนผันแปร, TC) record. Use only Area 1 (พื้นที่ 1) / Zone 1; ignore Areas 2-5.

Per record:
- cost_type: "fixed_cost_td" or "variable_cost_tc"
- invoice_no: เลขที่ใบแจ้งหนี้ for that row
- quantity_mmbtu: ปริมาณ (MMBTU)
- unit_price_baht_mmbtu: อัตรา (บาท/MMBTU)
- amount_baht: จำนวนเงิน (บาท)

Rows to read in the summary table grouped by zone and cost type:
- Fixed: "Zone 1 TD" or "ค่าบริการส่งก๊าซส่วนต้นทุนคงที่พื้นที่1"
- Variable: "Zone 1 TC" or "ค่าบริการส่งก๊าซส่วนต้นทุนผันแปรพื้นที่1"

Numbers are plain numerics without commas; keep decimals as printed.

Example shape (values must come from the document):
[
  {"cost_type": "fixed_cost_td", "invoice_no": "3620001276", "quantity_mmbtu": 78932275, "unit_price_baht_mmbtu": 12.8869, "amount_baht": 1017192334.70},
  {"cost_type": "variable_cost_tc", "invoice_no": "3620001277", "quantity_mmbtu": 78932275, "unit_price_baht_mmbtu": 0.1996, "amount_baht": 15754882.09}
]
"#;

pub fn gas_amount_schema() -> Schema {
    Schema::object([
        Field::required(
            "volumeArea2KhanomMMBTU",
            Schema::number().describe("ปริมาณก๊าซฯ บนระบบท่อฯบนฝั่งขนอม (พื้นที่ 2)"),
        ),
        Field::required(
            "volumeArea3OnshoreMMBTU",
            Schema::number().describe("ปริมาณก๊าซฯ บนระบบท่อฯบนฝั่ง (พื้นที่ 3)"),
        ),
        Field::required(
            "volumeArea4ChanaMMBTU",
            Schema::number().describe("ปริมาณก๊าซฯ บนระบบท่อฯบนฝั่งจะนะ (พื้นที่ 4)"),
        ),
    ])
}

pub fn gas_cost_schema() -> Schema {
    let record = Schema::object([
        Field::required(
            "cost_type",
            Schema::enumeration(["fixed_cost_td", "variable_cost_tc"])
                .describe("ประเภทค่าบริการ: fixed_cost_td (ต้นทุนคงที่) or variable_cost_tc (ต้นทุนผันแปร)"),
        ),
        Field::required(
            "invoice_no",
            Schema::string().describe("เลขที่ใบแจ้งหนี้ | Invoice number of this line"),
        ),
        Field::required(
            "quantity_mmbtu",
            Schema::number().describe("ปริมาณ | Quantity (MMBTU)"),
        ),
        Field::required(
            "unit_price_baht_mmbtu",
            Schema::number().describe("อัตรา | Unit price (THB/MMBTU)"),
        ),
        Field::required(
            "amount_baht",
            Schema::number().describe("จำนวนเงิน | Amount (THB)"),
        ),
    ]);
    Schema::array(record).describe("Area 1 fixed-cost (TD) and variable-cost (TC) lines")
}

pub fn gas_amount() -> DocumentSpec {
    DocumentSpec::new(GAS_AMOUNT_PROMPT, gas_amount_schema()).with_adapter(Adapter::SumGasAreas)
}

pub fn gas_cost() -> DocumentSpec {
    DocumentSpec::new(GAS_COST_PROMPT, gas_cost_schema()).with_adapter(Adapter::FlattenGasCost)
}

// ── Typed views ──────────────────────────────────────────────────────────

/// Area volumes reported by the pool manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GasVolumes {
    #[serde(rename = "volumeArea2KhanomMMBTU", default)]
    pub area2_khanom_mmbtu: f64,
    #[serde(rename = "volumeArea3OnshoreMMBTU", default)]
    pub area3_onshore_mmbtu: f64,
    #[serde(rename = "volumeArea4ChanaMMBTU", default)]
    pub area4_chana_mmbtu: f64,
}

/// Category of an Area 1 service charge line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    FixedCostTd,
    VariableCostTc,
    /// Any label outside the two known categories.
    #[serde(other)]
    Unrecognized,
}

/// One Area 1 service charge line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasServiceCost {
    pub cost_type: CostType,
    #[serde(default)]
    pub invoice_no: String,
    #[serde(default)]
    pub quantity_mmbtu: f64,
    #[serde(default)]
    pub unit_price_baht_mmbtu: f64,
    #[serde(default)]
    pub amount_baht: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validated_volumes_deserialize() {
        let v = json!({
            "volumeArea2KhanomMMBTU": 2165209,
            "volumeArea3OnshoreMMBTU": 87753753,
            "volumeArea4ChanaMMBTU": 2990682,
            "reportDate": "2025-09-10"
        });
        let validated = gas_amount_schema().validate(&v).unwrap();
        assert!(validated.get("reportDate").is_none());
        let volumes: GasVolumes = serde_json::from_value(validated).unwrap();
        assert_eq!(volumes.area3_onshore_mmbtu, 87753753.0);
    }

    #[test]
    fn cost_lines_deserialize_with_unknown_category() {
        let lines: Vec<GasServiceCost> = serde_json::from_value(json!([
            {"cost_type": "fixed_cost_td", "invoice_no": "1", "quantity_mmbtu": 1, "unit_price_baht_mmbtu": 2, "amount_baht": 2},
            {"cost_type": "demand_charge", "amount_baht": 5}
        ]))
        .unwrap();
        assert_eq!(lines[0].cost_type, CostType::FixedCostTd);
        assert_eq!(lines[1].cost_type, CostType::Unrecognized);
        assert_eq!(lines[1].quantity_mmbtu, 0.0);
    }

    #[test]
    fn gas_cost_schema_rejects_unknown_category() {
        let err = gas_cost_schema()
            .validate(&json!([{
                "cost_type": "demand_charge",
                "invoice_no": "1",
                "quantity_mmbtu": 1,
                "unit_price_baht_mmbtu": 1,
                "amount_baht": 1
            }]))
            .unwrap_err();
        assert_eq!(err.issues[0].path, "$[0].cost_type");
    }
}
