/*
Financial aggregation over transaction records.
Pure reductions: totals, current-month totals, dashboard summary,
per-category breakdown, and the trailing monthly trend series. Also owns
the fixed category vocabularies used by transaction validation.
*/

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, FixedOffset};
use serde::Serialize;

use crate::models::{Transaction, TransactionKind};
use crate::temporal;

pub const EXPENSE_CATEGORIES: [&str; 9] = [
    "Seeds & Plants",
    "Fertilizers",
    "Equipment",
    "Labor",
    "Utilities",
    "Transport",
    "Insurance",
    "Maintenance",
    "Other",
];

pub const INCOME_CATEGORIES: [&str; 6] = [
    "Crop Sales",
    "Livestock Sales",
    "Equipment Rental",
    "Consulting",
    "Subsidies",
    "Other",
];

pub fn valid_category(kind: TransactionKind, category: &str) -> bool {
    let vocabulary: &[&str] = match kind {
        TransactionKind::Income => &INCOME_CATEGORIES,
        TransactionKind::Expense => &EXPENSE_CATEGORIES,
    };
    vocabulary.contains(&category)
}

// Sum of amounts across all given transactions, no type filter.
pub fn total_of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> f64 {
    transactions.into_iter().map(|t| t.amount).sum()
}

fn in_month_of(t: &Transaction, now: DateTime<FixedOffset>) -> bool {
    let today = now.date_naive();
    t.date.month0() == today.month0() && t.date.year() == today.year()
}

// Sum of amounts for transactions matching `kind` (all kinds when None)
// dated in now's calendar month.
pub fn monthly_total_of(
    transactions: &[Transaction],
    kind: Option<TransactionKind>,
    now: DateTime<FixedOffset>,
) -> f64 {
    transactions
        .iter()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| in_month_of(t, now))
        .map(|t| t.amount)
        .sum()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub monthly_profit: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_profit: f64,
    pub transaction_count: usize,
    pub monthly_transaction_count: usize,
}

pub fn summary(transactions: &[Transaction], now: DateTime<FixedOffset>) -> FinanceSummary {
    let sum_kind = |kind: TransactionKind| -> f64 {
        total_of(transactions.iter().filter(|t| t.kind == kind))
    };

    let monthly_income = monthly_total_of(transactions, Some(TransactionKind::Income), now);
    let monthly_expenses = monthly_total_of(transactions, Some(TransactionKind::Expense), now);
    let total_income = sum_kind(TransactionKind::Income);
    let total_expenses = sum_kind(TransactionKind::Expense);

    FinanceSummary {
        monthly_income,
        monthly_expenses,
        monthly_profit: monthly_income - monthly_expenses,
        total_income,
        total_expenses,
        total_profit: total_income - total_expenses,
        transaction_count: transactions.len(),
        monthly_transaction_count: transactions
            .iter()
            .filter(|t| in_month_of(t, now))
            .count(),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

// Per-category totals, largest first. The sort is stable, so categories
// with equal totals keep first-seen order.
pub fn by_category(
    transactions: &[Transaction],
    kind: Option<TransactionKind>,
) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for t in transactions
        .iter()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
    {
        match totals.iter_mut().find(|c| c.category == t.category) {
            Some(entry) => {
                entry.total += t.amount;
                entry.count += 1;
            }
            None => totals.push(CategoryTotal {
                category: t.category.clone(),
                total: t.amount,
                count: 1,
                kind: t.kind,
            }),
        }
    }

    totals.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    totals
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendPoint {
    pub month: String, // "Jun 2024"
    pub income: f64,
    pub expenses: f64,
    pub profit: f64,
}

// `months` consecutive calendar-month buckets ending at now's month,
// oldest first. Months with no transactions yield all-zero points.
pub fn monthly_trend(
    transactions: &[Transaction],
    months: u32,
    now: DateTime<FixedOffset>,
) -> Vec<TrendPoint> {
    temporal::last_n_months(months, now)
        .into_iter()
        .map(|m| {
            let bucket =
                temporal::bucket_by_month(transactions, m.month0, m.year, |t| Some(t.date));

            let sum_kind = |kind: TransactionKind| -> f64 {
                bucket
                    .iter()
                    .filter(|t| t.kind == kind)
                    .map(|t| t.amount)
                    .sum()
            };

            let income = sum_kind(TransactionKind::Income);
            let expenses = sum_kind(TransactionKind::Expense);

            TrendPoint {
                month: m.label(),
                income,
                expenses,
                profit: income - expenses,
            }
        })
        .collect()
}

// "$1,234.56" — report-friendly dollars. Non-finite input falls back to
// "$0.00" like the rest of the degrade-don't-fail layer.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let rem = cents % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{rem:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, m, d, 12, 0, 0)
            .unwrap()
    }

    fn tx(id: u32, kind: TransactionKind, amount: f64, category: &str, date: &str) -> Transaction {
        Transaction {
            id,
            kind,
            amount,
            description: format!("tx {id}"),
            category: category.to_string(),
            date: date.parse::<NaiveDate>().unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    fn june_sample() -> Vec<Transaction> {
        vec![
            tx(1, TransactionKind::Income, 1000.0, "Crop Sales", "2024-06-01"),
            tx(2, TransactionKind::Expense, 400.0, "Fertilizers", "2024-06-15"),
            tx(3, TransactionKind::Income, 250.0, "Subsidies", "2024-05-10"),
            tx(4, TransactionKind::Expense, 100.0, "Transport", "2024-04-02"),
        ]
    }

    #[test]
    fn summary_of_current_month_scenario() {
        let s = summary(&june_sample(), at(2024, 6, 20));

        assert_eq!(s.monthly_income, 1000.0);
        assert_eq!(s.monthly_expenses, 400.0);
        assert_eq!(s.monthly_profit, 600.0);
        assert_eq!(s.total_income, 1250.0);
        assert_eq!(s.total_expenses, 500.0);
        assert_eq!(s.total_profit, 750.0);
        assert_eq!(s.transaction_count, 4);
        assert_eq!(s.monthly_transaction_count, 2);
    }

    #[test]
    fn monthly_profit_is_income_minus_expenses_even_when_negative() {
        let txs = vec![
            tx(1, TransactionKind::Income, 100.0, "Crop Sales", "2024-06-01"),
            tx(2, TransactionKind::Expense, 300.0, "Labor", "2024-06-02"),
        ];
        let s = summary(&txs, at(2024, 6, 20));
        assert_eq!(s.monthly_profit, -200.0);
        assert_eq!(s.monthly_profit, s.monthly_income - s.monthly_expenses);
    }

    #[test]
    fn total_decomposes_into_current_month_plus_the_rest() {
        let txs = june_sample();
        let now = at(2024, 6, 20);

        let outside: Vec<Transaction> = txs
            .iter()
            .filter(|t| !in_month_of(t, now))
            .cloned()
            .collect();

        assert_eq!(
            total_of(&txs),
            monthly_total_of(&txs, None, now) + total_of(&outside)
        );
    }

    #[test]
    fn monthly_total_respects_the_kind_filter() {
        let txs = june_sample();
        let now = at(2024, 6, 20);

        assert_eq!(monthly_total_of(&txs, None, now), 1400.0);
        assert_eq!(
            monthly_total_of(&txs, Some(TransactionKind::Income), now),
            1000.0
        );
        assert_eq!(
            monthly_total_of(&txs, Some(TransactionKind::Expense), now),
            400.0
        );
    }

    #[test]
    fn by_category_groups_counts_and_sorts_descending() {
        let txs = vec![
            tx(1, TransactionKind::Expense, 50.0, "Transport", "2024-06-01"),
            tx(2, TransactionKind::Expense, 200.0, "Fertilizers", "2024-06-02"),
            tx(3, TransactionKind::Expense, 75.0, "Transport", "2024-06-03"),
            tx(4, TransactionKind::Income, 500.0, "Crop Sales", "2024-06-04"),
        ];

        let all = by_category(&txs, None);
        assert_eq!(all[0].category, "Crop Sales");
        assert_eq!(all[1].category, "Fertilizers");
        assert_eq!(all[2].category, "Transport");
        assert_eq!(all[2].total, 125.0);
        assert_eq!(all[2].count, 2);

        let expenses = by_category(&txs, Some(TransactionKind::Expense));
        assert_eq!(expenses.len(), 2);
        assert!(expenses.iter().all(|c| c.kind == TransactionKind::Expense));
    }

    #[test]
    fn by_category_keeps_first_seen_order_on_ties() {
        let txs = vec![
            tx(1, TransactionKind::Expense, 100.0, "Utilities", "2024-06-01"),
            tx(2, TransactionKind::Expense, 100.0, "Insurance", "2024-06-02"),
        ];

        let totals = by_category(&txs, None);
        assert_eq!(totals[0].category, "Utilities");
        assert_eq!(totals[1].category, "Insurance");
    }

    #[test]
    fn trend_emits_zero_points_for_empty_months_oldest_first() {
        let txs = vec![
            tx(1, TransactionKind::Income, 300.0, "Crop Sales", "2024-06-05"),
            tx(2, TransactionKind::Expense, 120.0, "Labor", "2024-04-12"),
        ];

        let trend = monthly_trend(&txs, 3, at(2024, 6, 20));
        assert_eq!(trend.len(), 3);

        assert_eq!(trend[0].month, "Apr 2024");
        assert_eq!(trend[0].expenses, 120.0);
        assert_eq!(trend[0].profit, -120.0);

        assert_eq!(trend[1].month, "May 2024");
        assert_eq!(trend[1].income, 0.0);
        assert_eq!(trend[1].expenses, 0.0);
        assert_eq!(trend[1].profit, 0.0);

        assert_eq!(trend[2].month, "Jun 2024");
        assert_eq!(trend[2].income, 300.0);
        assert_eq!(trend[2].profit, 300.0);
    }

    #[test]
    fn category_vocabularies_are_fixed_per_kind() {
        assert!(valid_category(TransactionKind::Expense, "Fertilizers"));
        assert!(valid_category(TransactionKind::Income, "Crop Sales"));
        assert!(!valid_category(TransactionKind::Income, "Fertilizers"));
        assert!(!valid_category(TransactionKind::Expense, "Crop Sales"));
        assert!(valid_category(TransactionKind::Income, "Other"));
        assert!(valid_category(TransactionKind::Expense, "Other"));
        assert!(!valid_category(TransactionKind::Expense, "fertilizers"));
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1234.56), "$1,234.56");
        assert_eq!(format_currency(1000000.0), "$1,000,000.00");
        assert_eq!(format_currency(-42.5), "-$42.50");
        assert_eq!(format_currency(f64::NAN), "$0.00");
    }
}
