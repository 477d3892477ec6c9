use crate::core::series::HISTORY_CAP;
use serde_json::Value;

/// Coerces a JSON observation field to `f64`.
///
/// Providers are inconsistent about numeric typing: FiscalData and FRED
/// serve numbers as strings (FRED uses `"."` for a missing observation),
/// ECB serves plain numbers. Anything that does not parse to a number
/// yields `None`.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Final per-adapter hygiene: drop non-finite observations, keep the most
/// recent [`HISTORY_CAP`] in order.
pub fn clean_observations(values: Vec<f64>) -> Vec<f64> {
    let mut clean: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if clean.len() > HISTORY_CAP {
        clean.drain(..clean.len() - HISTORY_CAP);
    }
    clean
}
