//! Text and JSON rendering of an amortization table.

use rust_decimal::Decimal;

use crate::schedule::{AmortizationResult, round2};

const CURRENCY_SYMBOL: char = '$';
const GROUPING_SEPARATOR: char = ',';

const HEADERS: [&str; 7] = [
    "Period",
    "Opening balance",
    "Principal",
    "Interest",
    "VAT on interest",
    "Total payment",
    "Closing balance",
];

/// Formats an amount as pesos: `$12,345.60`, `-$5.00`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round2(amount);
    let body = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), "00"));

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{CURRENCY_SYMBOL}{}.{frac_part}",
        group_digits(int_part)
    )
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push(GROUPING_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}

/// Renders the client header, one line per period and a totals footer.
pub fn render_table(result: &AmortizationResult) -> String {
    let body: Vec<[String; 7]> = result
        .payments
        .iter()
        .map(|row| {
            [
                row.period.to_string(),
                format_currency(row.opening_balance),
                format_currency(row.principal_portion),
                format_currency(row.interest),
                format_currency(row.interest_tax),
                format_currency(row.total_payment),
                format_currency(row.closing_balance),
            ]
        })
        .collect();

    let totals = &result.totals;
    let footer = [
        "TOTALS".to_string(),
        String::new(),
        format_currency(totals.total_capital),
        format_currency(totals.total_interest),
        format_currency(totals.total_interest_tax),
        format_currency(totals.total_payments),
        String::new(),
    ];

    let widths = column_widths(body.iter().chain(std::iter::once(&footer)));
    let header = HEADERS.map(String::from);

    let mut out = String::new();
    out.push_str(&result.client.full_name());
    out.push('\n');
    out.push_str(&result.client.email);
    out.push_str("\n\n");
    out.push_str(&render_row(&header, &widths));
    out.push('\n');
    out.push_str(&horizontal_rule(&widths));
    out.push('\n');
    for row in &body {
        out.push_str(&render_row(row, &widths));
        out.push('\n');
    }
    out.push_str(&horizontal_rule(&widths));
    out.push('\n');
    out.push_str(&render_row(&footer, &widths));
    out.push('\n');
    out
}

/// Pretty-printed JSON for the whole result.
pub fn render_json(result: &AmortizationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

fn column_widths<'a>(rows: impl Iterator<Item = &'a [String; 7]>) -> [usize; 7] {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(idx, (cell, &width))| {
            if idx == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn horizontal_rule(widths: &[usize]) -> String {
    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    "-".repeat(total)
}
