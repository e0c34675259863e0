//! Post-processing applied to validated model output.
//!
//! Adapters are pure functions over values that have already passed schema
//! validation. Each one deserialises the value into the typed view it needs
//! (see [`crate::catalog::ptt`]) and derives a new JSON value from it.
//! Numeric inputs that are absent or null count as zero. Derived totals
//! that are whole numbers are emitted as JSON integers.

use crate::catalog::ptt::supply::GasPlatformData;
use crate::catalog::ptt::tso::{CostType, GasServiceCost, GasVolumes};
use crate::error::ExtractionFailure;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// Post-processing step bound to a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Adapter {
    /// Return the validated value unchanged.
    #[default]
    None,
    /// Set `totalInvoiceAmount` to the sum of `invoices[].amountExcludingVAT`.
    SumInvoiceAmounts,
    /// Collapse Area 2/3/4 volumes into `{ "volumeArea234": sum }`.
    SumGasAreas,
    /// Turn fixed/variable cost records into one flat object.
    FlattenGasCost,
}

impl Adapter {
    pub fn name(self) -> &'static str {
        match self {
            Adapter::None => "none",
            Adapter::SumInvoiceAmounts => "sum-invoice-amounts",
            Adapter::SumGasAreas => "sum-gas-areas",
            Adapter::FlattenGasCost => "flatten-gas-cost",
        }
    }

    pub fn apply(self, value: Value) -> Result<Value, ExtractionFailure> {
        match self {
            Adapter::None => Ok(value),
            Adapter::SumInvoiceAmounts => sum_invoice_amounts(value),
            Adapter::SumGasAreas => {
                let volumes: GasVolumes = view(&value, self)?;
                Ok(json!({ "volumeArea234": number(sum_gas_areas(&volumes)) }))
            }
            Adapter::FlattenGasCost => {
                let lines: Vec<GasServiceCost> = view(&value, self)?;
                to_value(&flatten_gas_cost(&lines))
            }
        }
    }
}

/// Flat view of the Area 1 service charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlattenedGasCost {
    #[serde(serialize_with = "serialize_number")]
    pub fix_cost_quantity: f64,
    #[serde(serialize_with = "serialize_number")]
    pub fix_cost_price: f64,
    #[serde(serialize_with = "serialize_number")]
    pub fix_cost_amount: f64,
    #[serde(serialize_with = "serialize_number")]
    pub variable_cost_quantity: f64,
    #[serde(serialize_with = "serialize_number")]
    pub variable_cost_price: f64,
    #[serde(serialize_with = "serialize_number")]
    pub variable_cost_amount: f64,
    #[serde(serialize_with = "serialize_number")]
    pub sum_of_fix_and_variable_cost: f64,
}

/// Accumulate cost lines per category.
///
/// Lines with an unrecognised category are skipped.
pub fn flatten_gas_cost(lines: &[GasServiceCost]) -> FlattenedGasCost {
    let mut out = FlattenedGasCost::default();
    for line in lines {
        match line.cost_type {
            CostType::FixedCostTd => {
                out.fix_cost_quantity += line.quantity_mmbtu;
                out.fix_cost_price += line.unit_price_baht_mmbtu;
                out.fix_cost_amount += line.amount_baht;
            }
            CostType::VariableCostTc => {
                out.variable_cost_quantity += line.quantity_mmbtu;
                out.variable_cost_price += line.unit_price_baht_mmbtu;
                out.variable_cost_amount += line.amount_baht;
            }
            CostType::Unrecognized => {}
        }
    }
    out.sum_of_fix_and_variable_cost = out.fix_cost_amount + out.variable_cost_amount;
    out
}

pub fn sum_gas_areas(volumes: &GasVolumes) -> f64 {
    volumes.area2_khanom_mmbtu + volumes.area3_onshore_mmbtu + volumes.area4_chana_mmbtu
}

fn sum_invoice_amounts(mut value: Value) -> Result<Value, ExtractionFailure> {
    let data: GasPlatformData = view(&value, Adapter::SumInvoiceAmounts)?;
    let total = data.total_excluding_vat();
    match value.as_object_mut() {
        Some(obj) => {
            obj.insert("totalInvoiceAmount".into(), number(total));
            Ok(value)
        }
        None => Err(ExtractionFailure::decode(format!(
            "{}: expected an object",
            Adapter::SumInvoiceAmounts.name()
        ))),
    }
}

/// Largest magnitude below which every integer is exact in an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn as_whole(n: f64) -> Option<i64> {
    (n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER).then_some(n as i64)
}

fn number(n: f64) -> Value {
    match as_whole(n) {
        Some(i) => Value::from(i),
        None => json!(n),
    }
}

fn serialize_number<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match as_whole(*n) {
        Some(i) => serializer.serialize_i64(i),
        None => serializer.serialize_f64(*n),
    }
}

/// Deserialise a typed view, treating nulls as missing.
fn view<T: DeserializeOwned>(value: &Value, adapter: Adapter) -> Result<T, ExtractionFailure> {
    serde_json::from_value(strip_nulls(value.clone()))
        .map_err(|e| ExtractionFailure::decode(format!("{}: {e}", adapter.name())))
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

fn to_value<T: Serialize>(v: &T) -> Result<Value, ExtractionFailure> {
    serde_json::to_value(v).map_err(|e| ExtractionFailure::decode(e.to_string()))
}
