//! Token Pricing Module
//!
//! Fixed per-model price table and the savings costing model.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Input price used for models missing from the table.
pub const FALLBACK_INPUT_PRICE: f64 = 1.0;

const TOKENS_PER_PRICE_UNIT: f64 = 1_000_000.0;

// == Model Pricing ==
/// Dollars per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ModelPricing {
    pub input: f64,
    pub output: f64,
}

/// Published prices, in display order.
pub const TOKEN_PRICING: &[(&str, ModelPricing)] = &[
    ("gpt-4o", ModelPricing { input: 2.50, output: 10.00 }),
    ("gpt-4o-mini", ModelPricing { input: 0.15, output: 0.60 }),
    ("claude-3-5-sonnet", ModelPricing { input: 3.00, output: 15.00 }),
    ("claude-3-haiku", ModelPricing { input: 0.25, output: 1.25 }),
    ("llama-3.1-70b", ModelPricing { input: 0.52, output: 0.75 }),
    ("deepseek-v3", ModelPricing { input: 0.14, output: 0.28 }),
];

/// Looks up the pricing entry for a model identifier.
pub fn pricing_for(model: &str) -> Option<ModelPricing> {
    TOKEN_PRICING
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, pricing)| *pricing)
}

/// Input price per million tokens, falling back for unknown models.
pub fn input_price(model: &str) -> f64 {
    pricing_for(model)
        .map(|p| p.input)
        .unwrap_or(FALLBACK_INPUT_PRICE)
}

// == Costing ==
/// Dollars saved by one request: the full input cost on a hit, nothing on a miss.
pub fn saved_dollars(model: &str, input_tokens: u64, hit: bool) -> f64 {
    if hit {
        input_tokens as f64 / TOKENS_PER_PRICE_UNIT * input_price(model)
    } else {
        0.0
    }
}

// == Price Table View ==
/// Serializes the price table as a JSON object keyed by model, in table order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceTable;

impl Serialize for PriceTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TOKEN_PRICING.len()))?;
        for (model, pricing) in TOKEN_PRICING {
            map.serialize_entry(model, pricing)?;
        }
        map.end()
    }
}
