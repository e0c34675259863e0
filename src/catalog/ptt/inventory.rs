//! PTT LNG terminal inventory cost statement.

use super::super::DocumentSpec;
use crate::schema::{Field, Schema};

pub const TERMINAL_COST_PROMPT: &str = r#"You extract the terminal cost summary from a PTT LNG inventory statement (Thai and/or English).
Return ONLY a JSON object with the schema's keys. No markdown, no commentary.

- period: งวด / ประจำเดือน as printed, if printed.
- terminal_name: the terminal (e.g. LMPT1, LMPT2, Map Ta Phut), if printed.
- regas_quantity_mmbtu: ปริมาณ Regas LNG sent out in the period (MMBTU).
- fixed_cost_baht: ค่าบริการส่วนต้นทุนคงที่ (Ld), amount in THB.
- variable_cost_baht: ค่าบริการส่วนต้นทุนผันแปร (Lc), amount in THB.
- total_terminal_cost_baht: รวมค่าบริการสถานี, the total before VAT.
- unit_cost_baht_mmbtu: ต้นทุนต่อหน่วย (บาท/MMBTU), only if printed. Do not compute it.

Numbers are plain numerics without separators or units. Optional values that are not printed are null.
"#;

pub fn terminal_cost_schema() -> Schema {
    let thb = |desc: &str| Schema::number().non_negative().describe(desc);
    Schema::object([
        Field::optional("period", Schema::string().describe("งวด | Statement period")),
        Field::optional("terminal_name", Schema::string().describe("ชื่อสถานี | Terminal")),
        Field::required("regas_quantity_mmbtu", thb("ปริมาณ Regas | Regas quantity (MMBTU)")),
        Field::required("fixed_cost_baht", thb("ต้นทุนคงที่ | Fixed cost Ld (THB)")),
        Field::required("variable_cost_baht", thb("ต้นทุนผันแปร | Variable cost Lc (THB)")),
        Field::required(
            "total_terminal_cost_baht",
            thb("รวมค่าบริการสถานี | Total terminal cost before VAT (THB)"),
        ),
        Field::optional(
            "unit_cost_baht_mmbtu",
            thb("ต้นทุนต่อหน่วย | Unit cost (THB/MMBTU)"),
        ),
    ])
}

pub fn terminal_cost() -> DocumentSpec {
    DocumentSpec::new(TERMINAL_COST_PROMPT, terminal_cost_schema())
}
