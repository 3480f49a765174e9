//! Self-contained HTML dashboard

use anyhow::{Context, Result};
use spendlens_core::Assessment;
use spendlens_finance::Dashboard;
use std::fs;
use std::path::Path;

use crate::format::{currency, date_or_blank, title_case};

const RECURRING_SHOWN: usize = 10;
const CUTS_SHOWN: usize = 6;
const QUESTIONABLE_SHOWN: usize = 15;
const RATINGS_SHOWN: usize = 50;

const HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Personal Finance Dashboard</title>
  <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;600;700&display=swap" rel="stylesheet">
  <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css" rel="stylesheet">
  <style>
    body { font-family: Inter, system-ui, -apple-system, sans-serif; background: #f8f9fa; padding: 20px 0; }
    .header { background: white; padding: 30px; margin-bottom: 30px; box-shadow: 0 1px 3px rgba(0,0,0,0.05); }
    .header h1 { font-size: 2.5rem; font-weight: 700; margin: 0; color: #1f2937; }
    .header p { margin: 5px 0 0 0; color: #6b7280; }
    .card { border: none; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.05); margin-bottom: 20px; }
    .metric { padding: 15px 0; border-bottom: 1px solid #e5e7eb; }
    .metric:last-child { border-bottom: none; }
    .metric-label { color: #6b7280; font-size: 0.9rem; margin-bottom: 5px; }
    .metric-value { font-size: 1.5rem; font-weight: 700; color: #111827; }
    .table { margin-bottom: 0; }
    .table th { background: #f3f4f6; font-weight: 600; color: #1f2937; border: none; }
    .table td { padding: 12px; color: #374151; }
    .badge-essential { background: #dcfce7; color: #166534; }
    .badge-important { background: #fef3c7; color: #92400e; }
    .badge-discretionary { background: #fecaca; color: #7f1d1d; }
    .alert-list { background: #fffbeb; border-left: 4px solid #f59e0b; padding: 15px; border-radius: 6px; margin-bottom: 20px; }
    .recommended-cut { background: #fef2f2; padding: 15px; border-radius: 6px; margin-bottom: 12px; border-left: 4px solid #ef4444; }
    .recommended-cut-title { font-weight: 600; color: #1f2937; margin-bottom: 5px; }
    .recommended-cut-amount { color: #ef4444; font-weight: 700; }
    .recommended-cut-reason { color: #6b7280; font-size: 0.9rem; margin-top: 5px; }
    .section-title { font-size: 1.3rem; font-weight: 700; color: #1f2937; margin-top: 30px; margin-bottom: 15px; padding-bottom: 10px; border-bottom: 2px solid #e5e7eb; }
  </style>
</head>
<body>
  <div class="header">
    <h1>💰 Personal Finance Dashboard</h1>
    <p>Your spending summary and recommendations</p>
  </div>
  <div class="container">
"#;

const FOOT: &str = r#"    <div style="padding: 30px 0; text-align: center; color: #6b7280; font-size: 0.9rem;">
      Generated locally. Your data stays private.
    </div>
  </div>
</body>
</html>
"#;

/// Escape text for element content and quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn badge_class(a: Assessment) -> &'static str {
    match a {
        Assessment::Essential => "badge-essential",
        Assessment::Important => "badge-important",
        Assessment::Discretionary | Assessment::CutCandidate => "badge-discretionary",
    }
}

fn metric_card(label: &str, value: &str, color: Option<&str>) -> String {
    let style = color
        .map(|c| format!(r#" style="color: {c};""#))
        .unwrap_or_default();
    format!(
        r#"      <div class="col-md-3">
        <div class="card p-4">
          <div class="metric">
            <div class="metric-label">{label}</div>
            <div class="metric-value"{style}>{value}</div>
          </div>
        </div>
      </div>
"#
    )
}

fn section_title(title: &str) -> String {
    format!("    <h3 class=\"section-title\">{title}</h3>\n")
}

pub fn render(d: &Dashboard) -> String {
    let mut html = String::from(HEAD);

    if !d.notices.is_empty() {
        html.push_str("    <div class=\"alert-list\">\n      <strong>Data quality alerts</strong>\n      <ul>\n");
        for n in &d.notices {
            html.push_str(&format!(
                "        <li>{} {}</li>\n",
                n.level.icon(),
                escape_html(&n.message)
            ));
        }
        html.push_str("      </ul>\n    </div>\n");
    }

    // Summary cards
    let s = &d.summary;
    let net_color = if s.net_balance >= 0.0 { "#16a34a" } else { "#dc2626" };
    html.push_str("    <div class=\"row mb-4\">\n");
    html.push_str(&metric_card("Total Income", &currency(s.total_income), None));
    html.push_str(&metric_card("Total Spent", &currency(s.total_spent), Some("#dc2626")));
    html.push_str(&metric_card("Net Balance", &currency(s.net_balance), Some(net_color)));
    html.push_str(&metric_card("Transactions", &s.transaction_count.to_string(), None));
    html.push_str("    </div>\n");

    html.push_str(&section_title("📊 Incoming Money"));
    html.push_str(&format!(
        r#"    <div class="card p-4">
      <div class="metric">
        <div class="metric-label">Predicted Monthly Income</div>
        <div class="metric-value">{}</div>
      </div>
      <div class="metric">
        <div class="metric-label">Income Transactions</div>
        <div class="metric-value">{}</div>
      </div>
    </div>
"#,
        currency(d.incoming_money.predicted_monthly_income),
        d.incoming_money.transaction_count
    ));

    html.push_str(&section_title("🔁 Recurring Payments"));
    html.push_str(
        "    <div class=\"card p-4\">\n      <table class=\"table\">\n        <thead><tr><th>Description</th><th class=\"text-end\">Avg Amount</th><th class=\"text-end\">Count</th></tr></thead>\n        <tbody>\n",
    );
    for r in d.recurring_payments.iter().take(RECURRING_SHOWN) {
        html.push_str(&format!(
            "          <tr><td>{}</td><td class=\"text-end\">{}</td><td class=\"text-end\">{}</td></tr>\n",
            escape_html(&title_case(&r.description)),
            currency(r.average_amount.abs()),
            r.count
        ));
    }
    let total_recurring: f64 = d.recurring_payments.iter().map(|r| r.average_amount.abs()).sum();
    html.push_str(&format!(
        "        </tbody>\n      </table>\n      <div style=\"padding-top: 15px; border-top: 1px solid #e5e7eb; font-weight: 600;\">Total Monthly Recurring: {}</div>\n    </div>\n",
        currency(total_recurring)
    ));

    html.push_str(&section_title("✂️ Top Recommended Cuts"));
    html.push_str("    <div class=\"row\">\n");
    for c in d.spending_cuts.iter().take(CUTS_SHOWN) {
        html.push_str(&format!(
            r#"      <div class="col-md-6 mb-3">
        <div class="recommended-cut">
          <div class="recommended-cut-title">{}</div>
          <div class="recommended-cut-amount">{}</div>
          <div class="recommended-cut-reason">{}</div>
        </div>
      </div>
"#,
            escape_html(&title_case(&c.category)),
            currency(c.amount),
            escape_html(&c.reason)
        ));
    }
    html.push_str("    </div>\n");

    html.push_str(&section_title("⚠️ Top Questionable Transactions"));
    html.push_str(
        "    <div class=\"card p-4\">\n      <table class=\"table\">\n        <thead><tr><th>Date</th><th>Description</th><th class=\"text-end\">Amount</th><th class=\"text-center\">Status</th></tr></thead>\n        <tbody>\n",
    );
    for t in d.top_questionable_spending.iter().take(QUESTIONABLE_SHOWN) {
        html.push_str(&format!(
            "          <tr><td>{}</td><td>{}</td><td class=\"text-end\">{}</td><td class=\"text-center\"><span class=\"badge {}\">{}</span></td></tr>\n",
            date_or_blank(t.date),
            escape_html(&t.description),
            currency(t.amount),
            badge_class(t.assessment),
            t.assessment.symbol()
        ));
    }
    html.push_str("        </tbody>\n      </table>\n    </div>\n");

    html.push_str(&section_title("⭐ All Transaction Ratings"));
    html.push_str(
        "    <div class=\"card p-4\">\n      <div style=\"max-height: 400px; overflow-y: auto;\">\n      <table class=\"table\">\n        <thead><tr><th>Date</th><th>Description</th><th class=\"text-end\">Amount</th><th class=\"text-end\">Necessity</th><th class=\"text-center\">Rating</th></tr></thead>\n        <tbody>\n",
    );
    for t in d.transaction_ratings.iter().take(RATINGS_SHOWN) {
        html.push_str(&format!(
            "          <tr><td>{}</td><td>{}</td><td class=\"text-end\">{}</td><td class=\"text-end\">{:.2}</td><td class=\"text-center\"><span class=\"badge {}\">{}</span></td></tr>\n",
            date_or_blank(t.date),
            escape_html(&t.description),
            currency(t.amount),
            t.necessity,
            badge_class(t.assessment),
            t.assessment.symbol()
        ));
    }
    html.push_str("        </tbody>\n      </table>\n      </div>\n    </div>\n");

    html.push_str(&section_title("📈 Investment Projections"));
    html.push_str(&format!(
        r#"    <div class="card p-4">
      <div class="metric-label">Monthly Savings Potential</div>
      <div style="font-size: 1.8rem; font-weight: 700; color: #16a34a;">{}</div>
      <div style="color: #6b7280; font-size: 0.9rem; margin-top: 5px;">If you implement the recommended spending cuts above</div>
      <table class="table" style="margin-top: 20px;">
        <thead><tr><th>Return Rate</th><th class="text-end">1 Year</th><th class="text-end">2 Years</th><th class="text-end">5 Years</th></tr></thead>
        <tbody>
"#,
        currency(d.investment_projection.monthly_savings)
    ));
    for scenario in &d.investment_projection.scenarios {
        let at = |years| currency(scenario.value_at(years).unwrap_or(0.0));
        html.push_str(&format!(
            "          <tr><td><strong>{}% annual</strong></td><td class=\"text-end\">{}</td><td class=\"text-end\">{}</td><td class=\"text-end\">{}</td></tr>\n",
            scenario.rate,
            at(1),
            at(2),
            at(5)
        ));
    }
    html.push_str(
        "        </tbody>\n      </table>\n      <div style=\"padding-top: 15px; color: #6b7280; font-size: 0.9rem; font-style: italic;\">💡 Projections assume you invest your monthly savings consistently. Returns are estimated based on historical averages for diversified portfolios.</div>\n    </div>\n",
    );

    html.push_str(FOOT);
    html
}

/// Render and write the page, creating parent directories as needed
pub fn write_dashboard(d: &Dashboard, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, render(d)).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
