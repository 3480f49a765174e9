//! Plain-text dashboard for the terminal

use spendlens_finance::Dashboard;
use spendlens_finance::recurring::monthly_recurring_total;
use std::io::{self, Write};

use crate::format::{assessment_text, title_case, truncate};

const WIDTH: usize = 80;
const RECURRING_SHOWN: usize = 5;
const QUESTIONABLE_SHOWN: usize = 8;
const RATINGS_SHOWN: usize = 15;

fn rule(out: &mut impl Write, c: char) -> io::Result<()> {
    writeln!(out, "{}", c.to_string().repeat(WIDTH))
}

fn banner(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    rule(out, '=')?;
    writeln!(out, "{:^width$}", title, width = WIDTH)?;
    rule(out, '=')
}

fn section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n{title}")?;
    rule(out, '-')
}

fn date_cell(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn render(dashboard: &Dashboard, out: &mut impl Write) -> io::Result<()> {
    if !dashboard.notices.is_empty() {
        banner(out, "⚠️  DATA QUALITY ALERTS")?;
        for n in &dashboard.notices {
            writeln!(out, "  {n}")?;
        }
    }

    banner(out, "💰 PERSONAL FINANCE DASHBOARD 💰")?;
    writeln!(out)?;

    writeln!(out, "📊 FINANCIAL SUMMARY")?;
    rule(out, '-')?;
    let s = &dashboard.summary;
    writeln!(out, "  Total Income:        ${:>10.2}", s.total_income)?;
    writeln!(out, "  Total Spent:         ${:>10.2}", s.total_spent)?;
    writeln!(out, "  Net Balance:         ${:>10.2}", s.net_balance)?;
    writeln!(out, "  Transactions:        {:>10}", s.transaction_count)?;

    section(out, "💵 INCOMING MONEY PREDICTIONS")?;
    let income = &dashboard.incoming_money;
    writeln!(out, "  Predicted Monthly:   ${:>10.2}", income.predicted_monthly_income)?;
    writeln!(out, "  Transactions:        {:>10}", income.transaction_count)?;

    section(out, "🔁 RECURRING PAYMENTS (Subscriptions, Rent, etc.)")?;
    for (i, p) in dashboard.recurring_payments.iter().take(RECURRING_SHOWN).enumerate() {
        writeln!(
            out,
            "  {}. {:<40} ${:>8.2}/month",
            i + 1,
            title_case(&p.description),
            p.average_amount
        )?;
    }
    writeln!(
        out,
        "\n  Total Recurring:     ${:>10.2}/month",
        monthly_recurring_total(&dashboard.recurring_payments)
    )?;

    section(
        out,
        &format!("✂️  TOP {} RECOMMENDED SPENDING CUTS", dashboard.spending_cuts.len()),
    )?;
    for (i, cut) in dashboard.spending_cuts.iter().enumerate() {
        writeln!(out, "  {}. {:<30} ${:>8.2}", i + 1, title_case(&cut.category), cut.amount)?;
        writeln!(out, "     → {}", cut.reason)?;
    }

    section(out, "⚠️  TOP QUESTIONABLE TRANSACTIONS (Low Worth-It Rating)")?;
    writeln!(
        out,
        "  {:<12} {:<30} {:>10} {:>8} {:<15}",
        "Date", "Description", "Amount", "Rating", "Status"
    )?;
    writeln!(out, "  {}", "-".repeat(WIDTH - 4))?;
    for t in dashboard.top_questionable_spending.iter().take(QUESTIONABLE_SHOWN) {
        writeln!(
            out,
            "  {:<12} {:<30} ${:>9.2} {:>7.2} {:<15}",
            date_cell(t.date),
            truncate(&t.description, 28),
            t.amount,
            t.worth_it_rating,
            assessment_text(t.assessment)
        )?;
    }

    section(out, "⭐ TRANSACTION RATINGS (Worth-It Score = Amount × Necessity)")?;
    writeln!(
        out,
        "  {:<12} {:<25} {:>10} {:>10} {:>10} {:<12}",
        "Date", "Description", "Amount", "Necessity", "Rating", "Status"
    )?;
    writeln!(out, "  {}", "-".repeat(WIDTH - 4))?;
    for t in dashboard.transaction_ratings.iter().take(RATINGS_SHOWN) {
        writeln!(
            out,
            "  {:<12} {:<25} ${:>9.2} {:>9.2} {:>9.2} {:<12}",
            date_cell(t.date),
            truncate(&t.description, 23),
            t.amount,
            t.necessity,
            t.worth_it_rating,
            assessment_text(t.assessment)
        )?;
    }

    banner(out, "LEGEND: ✓ Essential | → Important | ? Discretionary | ✗ Could Cut")?;
    writeln!(out)
}
