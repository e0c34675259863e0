//! The document catalog: prompt, schema and adapter per document type.
//!
//! Every supported document family is one [`DocumentType`]. The built-in
//! [`Catalog`] maps each of them to a [`DocumentSpec`]: the system prompt
//! sent to the model, the [`Schema`] its answer must satisfy, and the
//! [`Adapter`] applied afterwards. It is built once on first use and shared
//! read-only by every request.
//!
//! Prompts and field catalogs are business configuration; the pipeline in
//! [`crate::service`] never special-cases a document type.

pub mod egat;
pub mod pelng;
pub mod ptt;

use crate::adapters::Adapter;
use crate::schema::Schema;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A supported document family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// EGAT-style invoice.
    Invoice,
    /// PELNG LNG terminal invoice.
    Pelng,
    PttSupplyInvoice,
    PttSupplyInvoiceAndHeat,
    PttSupplyB8InvoiceAndHeat,
    PttTsoGasAmount,
    PttTsoGasCost,
    PttInventoryTerminalCost,
    PttLngRegasSendout,
    PttLngRegasValue,
}

impl DocumentType {
    pub const ALL: [DocumentType; 10] = [
        DocumentType::Invoice,
        DocumentType::Pelng,
        DocumentType::PttSupplyInvoice,
        DocumentType::PttSupplyInvoiceAndHeat,
        DocumentType::PttSupplyB8InvoiceAndHeat,
        DocumentType::PttTsoGasAmount,
        DocumentType::PttTsoGasCost,
        DocumentType::PttInventoryTerminalCost,
        DocumentType::PttLngRegasSendout,
        DocumentType::PttLngRegasValue,
    ];

    /// Stable catalog key, e.g. `ptt.tso.gas-cost`.
    pub fn key(self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::Pelng => "pelng",
            DocumentType::PttSupplyInvoice => "ptt.supply.invoice",
            DocumentType::PttSupplyInvoiceAndHeat => "ptt.supply.invoice-and-heat",
            DocumentType::PttSupplyB8InvoiceAndHeat => "ptt.supply.b8-invoice-and-heat",
            DocumentType::PttTsoGasAmount => "ptt.tso.gas-amount",
            DocumentType::PttTsoGasCost => "ptt.tso.gas-cost",
            DocumentType::PttInventoryTerminalCost => "ptt.inventory.terminal-cost",
            DocumentType::PttLngRegasSendout => "ptt.lng.regas-sendout",
            DocumentType::PttLngRegasValue => "ptt.lng.regas-value",
        }
    }

    /// HTTP route the document type is served on.
    pub fn route(self) -> &'static str {
        match self {
            DocumentType::Invoice => "/extract/invoice",
            DocumentType::Pelng => "/extract/pelng",
            DocumentType::PttSupplyInvoice => "/ptt/supply/invoice",
            DocumentType::PttSupplyInvoiceAndHeat => "/ptt/supply/invoice-and-heat",
            DocumentType::PttSupplyB8InvoiceAndHeat => "/ptt/supply/b8-invoice-and-heat",
            DocumentType::PttTsoGasAmount => "/ptt/tso/gas-amount",
            DocumentType::PttTsoGasCost => "/ptt/tso/gas-cost",
            DocumentType::PttInventoryTerminalCost => "/ptt/inventory/terminal-cost",
            DocumentType::PttLngRegasSendout => "/ptt/lng/regas-sendout",
            DocumentType::PttLngRegasValue => "/ptt/lng/regas-value",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|d| d.key() == s)
            .ok_or_else(|| format!("unknown document type '{s}'"))
    }
}

/// The `(prompt, schema, adapter)` triple for one document type.
#[derive(Debug, Clone)]
pub struct DocumentSpec {
    pub system_prompt: &'static str,
    pub schema: Schema,
    pub adapter: Adapter,
}

impl DocumentSpec {
    pub fn new(system_prompt: &'static str, schema: Schema) -> Self {
        Self {
            system_prompt,
            schema,
            adapter: Adapter::None,
        }
    }

    pub fn with_adapter(mut self, adapter: Adapter) -> Self {
        self.adapter = adapter;
        self
    }
}

/// Registry of document specs keyed by [`DocumentType`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<DocumentType, DocumentSpec>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let mut catalog = Catalog::default();
    catalog.insert(DocumentType::Invoice, egat::invoice());
    catalog.insert(DocumentType::Pelng, pelng::invoice());
    catalog.insert(DocumentType::PttSupplyInvoice, ptt::supply::invoice());
    catalog.insert(DocumentType::PttSupplyInvoiceAndHeat, ptt::supply::invoice_and_heat());
    catalog.insert(DocumentType::PttSupplyB8InvoiceAndHeat, ptt::supply::b8_invoice_and_heat());
    catalog.insert(DocumentType::PttTsoGasAmount, ptt::tso::gas_amount());
    catalog.insert(DocumentType::PttTsoGasCost, ptt::tso::gas_cost());
    catalog.insert(DocumentType::PttInventoryTerminalCost, ptt::inventory::terminal_cost());
    catalog.insert(DocumentType::PttLngRegasSendout, ptt::lng::regas_sendout());
    catalog.insert(DocumentType::PttLngRegasValue, ptt::lng::regas_value());
    catalog
});

impl Catalog {
    /// The built-in catalog covering every [`DocumentType`].
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn insert(&mut self, doc: DocumentType, spec: DocumentSpec) {
        self.entries.insert(doc, spec);
    }

    pub fn get(&self, doc: DocumentType) -> Option<&DocumentSpec> {
        self.entries.get(&doc)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
