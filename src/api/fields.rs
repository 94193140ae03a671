use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::ApiError;

/// Trimmed, non-blank text or a 400 naming the field
pub fn required_text(field: &str, value: Option<String>) -> Result<String, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ApiError::invalid_field(field, "is required")),
    }
}

/// Blank strings collapse to `None`
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Cents kept by the `NUMERIC(14,2)` money columns
const MONEY_SCALE: u32 = 2;
/// Whole-number digits left over in a `NUMERIC(14,2)` column
const MONEY_WHOLE_DIGITS: u32 = 12;

/// Rejects values the money columns cannot hold, and pins the rest to two places
fn money(field: &str, amount: Decimal) -> Result<Decimal, ApiError> {
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(ApiError::invalid_field(
            field,
            format!("must have at most {} decimal places", MONEY_SCALE),
        ));
    }
    if amount.trunc().abs() >= Decimal::from(10_i64.pow(MONEY_WHOLE_DIGITS)) {
        return Err(ApiError::invalid_field(
            field,
            format!("must have at most {} digits before the decimal point", MONEY_WHOLE_DIGITS),
        ));
    }

    let mut amount = amount;
    amount.rescale(MONEY_SCALE);
    Ok(amount)
}

pub fn positive_amount(field: &str, value: Option<Decimal>) -> Result<Decimal, ApiError> {
    match value {
        Some(amount) if amount > Decimal::ZERO => money(field, amount),
        Some(_) => Err(ApiError::invalid_field(field, "must be greater than zero")),
        None => Err(ApiError::invalid_field(field, "is required")),
    }
}

pub fn non_negative_amount(field: &str, amount: Decimal) -> Result<Decimal, ApiError> {
    if amount < Decimal::ZERO {
        return Err(ApiError::invalid_field(field, "must not be negative"));
    }
    money(field, amount)
}

pub fn required<T>(field: &str, value: Option<T>) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::invalid_field(field, "is required"))
}

/// Project ids in rank order; accepts integers or integer strings, no repeats
pub fn priority_list(value: Option<&Value>) -> Result<Vec<i64>, ApiError> {
    let items = value
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::bad_request("priority_list must be an array"))?;

    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        let id = match item {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
        .ok_or_else(|| {
            ApiError::bad_request(format!("priority_list contains an invalid project id: {}", item))
        })?;

        if ids.contains(&id) {
            return Err(ApiError::bad_request(format!(
                "priority_list contains project {} more than once",
                id
            )));
        }
        ids.push(id);
    }

    Ok(ids)
}
