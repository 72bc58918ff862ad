// src/services/format.rs
use chrono::NaiveDate;

use crate::models::ReportTime;

const TRILLION: f64 = 1.0e12;
const BILLION: f64 = 1.0e9;
const MILLION: f64 = 1.0e6;
const THOUSAND: f64 = 1.0e3;

/// Currency with T/B/M suffixes, e.g. `$14.24B`. Below a million the value
/// is digit-grouped instead.
pub fn format_money(value: Option<f64>) -> String {
    format_money_with(value, 2)
}

pub fn format_money_with(value: Option<f64>, decimals: usize) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };
    match scaled(value, decimals, &[(TRILLION, "T"), (BILLION, "B"), (MILLION, "M")]) {
        Some(short) => format!("${}", short),
        None => format!("${}", group_digits(value)),
    }
}

/// Share counts with M/K suffixes.
pub fn format_volume(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };
    scaled(value, 2, &[(MILLION, "M"), (THOUSAND, "K")]).unwrap_or_else(|| group_digits(value))
}

/// Large plain numbers with T/B/M suffixes.
pub fn format_number(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };
    scaled(value, 2, &[(TRILLION, "T"), (BILLION, "B"), (MILLION, "M")])
        .unwrap_or_else(|| group_digits(value))
}

pub fn format_eps(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${:.2}", v),
        None => "-".to_string(),
    }
}

pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

fn sign(value: f64) -> &'static str {
    if value >= 0.0 {
        "+"
    } else {
        ""
    }
}

/// `+1.23 (+0.45%)`; missing values count as zero.
pub fn format_change(change: Option<f64>, change_percentage: Option<f64>) -> String {
    let change = change.unwrap_or(0.0);
    let pct = change_percentage.unwrap_or(0.0);
    format!("{}{:.2} ({}{:.2}%)", sign(change), change, sign(change), pct)
}

pub fn format_signed_money(value: Option<f64>) -> String {
    let value = value.unwrap_or(0.0);
    format!("{}${:.2}", sign(value), value)
}

pub fn format_signed_percent(value: Option<f64>) -> String {
    let value = value.unwrap_or(0.0);
    format!("{}{:.2}%", sign(value), value)
}

pub fn report_time_label(time: Option<ReportTime>) -> &'static str {
    time.map(|t| t.label()).unwrap_or("TBD")
}

/// `Wednesday, October 15, 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// `Oct 15, 2026`
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn scaled(value: f64, decimals: usize, units: &[(f64, &str)]) -> Option<String> {
    units
        .iter()
        .find(|(threshold, _)| value.abs() >= *threshold)
        .map(|(threshold, suffix)| format!("{:.*}{}", decimals, value / threshold, suffix))
}

/// Thousands separators and at most three fraction digits, trailing zeros dropped.
pub fn group_digits(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let mut out = String::new();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
