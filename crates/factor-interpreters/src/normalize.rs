//! Field normalizer.
//!
//! Providers disagree on field names, nest payloads differently, and return
//! single-element arrays where objects are expected. This module flattens
//! all of that into one typed record of nullable fields and isolates the
//! interpreters from provider-shape variance. It never fails: any coercion
//! problem becomes `None` for that field.

use serde_json::Value;

/// Typed view of a raw provider record. Every field is nullable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRecord {
    pub eps_actual: Option<f64>,
    pub eps_estimate: Option<f64>,
    pub eps_surprise_pct: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub sector: Option<String>,
    pub revenue_qoq_pct: Option<f64>,
    pub revenue_latest: Option<f64>,
    pub revenue_prior: Option<f64>,
    pub eps_growth_this_yr_pct: Option<f64>,
    pub eps_growth_next_yr_pct: Option<f64>,
    pub revisions_up: Option<f64>,
    pub revisions_down: Option<f64>,
    pub revisions_up_prior: Option<f64>,
    pub revisions_down_prior: Option<f64>,
    pub price: Option<f64>,
    pub ma_200: Option<f64>,
    pub rel_strength_pct: Option<f64>,
    pub volume: Option<f64>,
    pub avg_volume: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub price_change_pct: Option<f64>,
    pub total_debt: Option<f64>,
    pub total_cash: Option<f64>,
    pub shareholders_equity: Option<f64>,
    pub days_to_catalyst: Option<f64>,
    pub company_name: Option<String>,
}

/// Coerce a JSON value to a finite number. Accepts numbers and numeric
/// strings; rejects NaN and infinities.
fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Coerce a JSON value to a trimmed, non-empty string.
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

/// FMP-style payloads wrap objects in one-element arrays.
fn unwrap_first(value: &Value) -> &Value {
    match value {
        Value::Array(items) => items.first().unwrap_or(value),
        _ => value,
    }
}

fn lookup<'a>(scopes: &[&'a Value], aliases: &[&str]) -> Option<&'a Value> {
    for scope in scopes {
        for alias in aliases {
            if let Some(v) = scope.get(alias) {
                if !v.is_null() {
                    return Some(v);
                }
            }
        }
    }
    None
}

fn number(scopes: &[&Value], aliases: &[&str]) -> Option<f64> {
    lookup(scopes, aliases).and_then(coerce_number)
}

fn string(scopes: &[&Value], aliases: &[&str]) -> Option<String> {
    lookup(scopes, aliases).and_then(coerce_string)
}

/// Normalize a raw provider record.
pub fn normalize(raw: &Value) -> NormalizedRecord {
    let root = unwrap_first(raw);

    // Search the top level first, then known provider sub-payloads.
    let mut scopes: Vec<&Value> = vec![root];
    for key in [
        "quote",
        "profile",
        "summaryDetail",
        "earningsSurprises",
        "earnings_surprises",
    ] {
        if let Some(sub) = root.get(key) {
            scopes.push(unwrap_first(sub));
        }
    }
    let scopes = scopes.as_slice();

    let volume = number(scopes, &["volume"]);
    let avg_volume = number(scopes, &["avgVolume", "averageVolume", "avg_volume"]);
    let volume_ratio = number(scopes, &["volumeRatio", "volume_ratio"]).or(match (volume, avg_volume) {
        (Some(v), Some(avg)) if avg > 0.0 => Some(v / avg),
        _ => None,
    });

    NormalizedRecord {
        eps_actual: number(scopes, &["actual", "epsActual", "eps_actual"]),
        eps_estimate: number(scopes, &["estimate", "epsEstimated", "eps_estimate"]),
        eps_surprise_pct: number(
            scopes,
            &["surprisePercentage", "surprisePercent", "surprise_pct"],
        ),
        trailing_pe: number(
            scopes,
            &["trailingPE", "pe", "priceEarningsRatio", "trailing_pe"],
        ),
        forward_pe: number(scopes, &["forwardPE", "forward_pe"]),
        sector: string(scopes, &["sector", "industry"]),
        revenue_qoq_pct: number(scopes, &["revenueGrowthQoq", "revenue_qoq_pct"]),
        revenue_latest: number(scopes, &["revenue", "revenue_latest", "latestRevenue"]),
        revenue_prior: number(scopes, &["revenuePrior", "revenue_prior", "priorRevenue"]),
        eps_growth_this_yr_pct: number(
            scopes,
            &["epsGrowthThisYear", "eps_growth_this_yr_pct"],
        ),
        eps_growth_next_yr_pct: number(
            scopes,
            &["epsGrowthNextYear", "eps_growth_next_yr_pct"],
        ),
        revisions_up: number(scopes, &["revisionsUp", "revisions_up", "upRevisions"]),
        revisions_down: number(scopes, &["revisionsDown", "revisions_down", "downRevisions"]),
        revisions_up_prior: number(scopes, &["revisionsUpPrior", "revisions_up_prior"]),
        revisions_down_prior: number(scopes, &["revisionsDownPrior", "revisions_down_prior"]),
        price: number(
            scopes,
            &["price", "close", "lastPrice", "regularMarketPrice"],
        ),
        ma_200: number(
            scopes,
            &["priceAvg200", "ma200", "ma_200", "twoHundredDayAverage"],
        ),
        rel_strength_pct: number(
            scopes,
            &["relStrengthPct", "rel_strength_pct", "relativeStrengthVsSpy"],
        ),
        volume,
        avg_volume,
        volume_ratio,
        price_change_pct: number(
            scopes,
            &["changesPercentage", "changePercent", "price_change_pct"],
        ),
        total_debt: number(scopes, &["totalDebt", "total_debt"]),
        total_cash: number(
            scopes,
            &["totalCash", "total_cash", "cashAndCashEquivalents"],
        ),
        shareholders_equity: number(
            scopes,
            &["totalStockholdersEquity", "shareholders_equity", "totalEquity"],
        ),
        days_to_catalyst: number(
            scopes,
            &["daysToCatalyst", "days_to_catalyst", "daysToNextEarnings"],
        ),
        company_name: string(scopes, &["companyName", "name", "company_name"]),
    }
}
