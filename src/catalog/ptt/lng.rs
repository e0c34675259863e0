//! PTT LNG import and cost summary: one headline number per route.

use super::super::DocumentSpec;
use crate::schema::{Field, Schema};

pub const REGAS_SENDOUT_PROMPT: &str = r#"You extract a single number from a PTT LNG import and cost calculation summary report.
Output ONLY the raw JSON object. No markdown, no explanations.

total_regas_sendout (ปริมาณ "Regas. Sendout รวม"): total Regas. Sendout quantity in MMBtu.
- Locate the large transaction table. The value is in its final summary section at the bottom, in the
  quantity column on the row labelled "ปริมาณ Regas. Sendout".
- Remove thousand separators and units.

Example shape (the value must come from the document):
{"total_regas_sendout": 0.000}
"#;

pub const REGAS_VALUE_PROMPT: &str = r#"You extract a single number from a PTT LNG import and cost calculation summary report.
Output ONLY the raw JSON object. No markdown, no explanations.

total_regas_value (มูลค่าเนื้อ Regas LNG ทั้งหมด): total value of the regasified LNG in Baht.
- Locate the final summary box at the bottom right of the page, labelled "มูลค่าเนื้อ Regas LNG ทั้งหมด".
- Remove thousand separators and units such as 'บาท'. Keep two decimal places.

Example shape (the value must come from the document):
{"total_regas_value": 0.00}
"#;

pub fn regas_sendout_schema() -> Schema {
    Schema::object([Field::required(
        "total_regas_sendout",
        Schema::number().describe(
            "ปริมาณ Regas. Sendout รวม (Total Regas. Sendout Quantity) in MMBtu",
        ),
    )])
}

pub fn regas_value_schema() -> Schema {
    Schema::object([Field::required(
        "total_regas_value",
        Schema::number().describe("มูลค่าเนื้อ Regas LNG ทั้งหมด (Total Value of Regas LNG) in Baht"),
    )])
}

pub fn regas_sendout() -> DocumentSpec {
    DocumentSpec::new(REGAS_SENDOUT_PROMPT, regas_sendout_schema())
}

pub fn regas_value() -> DocumentSpec {
    DocumentSpec::new(REGAS_VALUE_PROMPT, regas_value_schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_keeps_decimals() {
        let out = regas_value_schema()
            .validate(&json!({"total_regas_value": 5447307387.79, "unit": "บาท"}))
            .unwrap();
        assert_eq!(out, json!({"total_regas_value": 5447307387.79}));
    }

    #[test]
    fn sendout_is_required() {
        assert!(regas_sendout_schema().validate(&json!({})).is_err());
    }
}
