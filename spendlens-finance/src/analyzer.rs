//! SpendingAnalyzer: owns one validated ledger and sequences the analyses.
//!
//! Each analysis is a plain function of the transactions; the analyzer only
//! wires them together, so calling any of them twice gives the same answer.

use chrono::NaiveDate;
use spendlens_core::{NecessityTable, Notice, Result, Transaction};
use spendlens_ingest::{ParsedExport, parse_bank_export, parse_bank_export_reader};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::dashboard::{Dashboard, Summary, generate_summary};
use crate::income::{IncomePrediction, predict_incoming_money};
use crate::projection::{InvestmentProjection, investment_projection};
use crate::rating::{
    DEFAULT_TOP_QUESTIONABLE, TransactionRating, rate_transaction_worth,
    top_questionable_transactions,
};
use crate::recurring::{RecurringPayment, identify_recurring_payments};
use crate::spending_cuts::{
    DEFAULT_TOP_CUTS, Recommendation, SpendingCutSuggestion, analyze_spending, get_recommendations,
};
use crate::validation::{ValidatedLedger, validate};

/// List lengths used when assembling the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSettings {
    pub top_cuts: usize,
    pub top_questionable: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_cuts: DEFAULT_TOP_CUTS,
            top_questionable: DEFAULT_TOP_QUESTIONABLE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpendingAnalyzer {
    ledger: ValidatedLedger,
    table: NecessityTable,
    settings: ReportSettings,
    processing_date: NaiveDate,
}

impl SpendingAnalyzer {
    /// Load, normalize and validate a bank export file.
    /// Fails only when the file is missing or unreadable.
    pub fn from_path(
        path: impl AsRef<Path>,
        table: NecessityTable,
        processing_date: NaiveDate,
    ) -> Result<Self> {
        let export = parse_bank_export(path)?;
        Ok(Self::from_export(export, table, processing_date))
    }

    pub fn from_reader<R: Read>(
        reader: R,
        table: NecessityTable,
        processing_date: NaiveDate,
    ) -> Result<Self> {
        let export = parse_bank_export_reader(reader)?;
        Ok(Self::from_export(export, table, processing_date))
    }

    pub fn from_export(
        export: ParsedExport,
        table: NecessityTable,
        processing_date: NaiveDate,
    ) -> Self {
        let ledger = validate(export, processing_date);
        info!(
            transactions = ledger.transactions.len(),
            notices = ledger.notices.len(),
            %processing_date,
            "ledger ready"
        );
        Self {
            ledger,
            table,
            settings: ReportSettings::default(),
            processing_date,
        }
    }

    pub fn with_settings(mut self, settings: ReportSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    /// Ingestion and validation notices, in the order they were raised
    pub fn notices(&self) -> &[Notice] {
        &self.ledger.notices
    }

    pub fn necessity_table(&self) -> &NecessityTable {
        &self.table
    }

    pub fn settings(&self) -> ReportSettings {
        self.settings
    }

    pub fn processing_date(&self) -> NaiveDate {
        self.processing_date
    }

    pub fn get_necessity_score(&self, category: &str) -> f64 {
        self.table.score(category)
    }

    pub fn generate_summary(&self) -> Summary {
        generate_summary(self.transactions())
    }

    pub fn identify_recurring_payments(&self) -> Vec<RecurringPayment> {
        identify_recurring_payments(self.transactions())
    }

    pub fn predict_incoming_money(&self) -> IncomePrediction {
        predict_incoming_money(self.transactions())
    }

    pub fn rate_transaction_worth(&self) -> Vec<TransactionRating> {
        rate_transaction_worth(self.transactions(), &self.table)
    }

    pub fn analyze_spending(&self) -> Vec<SpendingCutSuggestion> {
        analyze_spending(self.transactions(), &self.table)
    }

    pub fn get_recommendations(&self, top_n: usize) -> Vec<Recommendation> {
        get_recommendations(&self.analyze_spending(), top_n)
    }

    pub fn investment_projection(
        &self,
        recommendations: &[Recommendation],
    ) -> InvestmentProjection {
        investment_projection(recommendations)
    }

    /// Run every analysis and assemble the report
    pub fn generate_dashboard(&self) -> Dashboard {
        let summary = self.generate_summary();
        let incoming_money = self.predict_incoming_money();
        let recurring_payments = self.identify_recurring_payments();
        let transaction_ratings = self.rate_transaction_worth();
        let spending_cuts = self.get_recommendations(self.settings.top_cuts);
        let top_questionable_spending =
            top_questionable_transactions(&transaction_ratings, self.settings.top_questionable);
        let investment_projection = investment_projection(&spending_cuts);

        debug!(
            recurring = recurring_payments.len(),
            cuts = spending_cuts.len(),
            questionable = top_questionable_spending.len(),
            monthly_savings = investment_projection.monthly_savings,
            "dashboard assembled"
        );

        Dashboard {
            processing_date: self.processing_date,
            notices: self.ledger.notices.clone(),
            summary,
            incoming_money,
            recurring_payments,
            spending_cuts,
            top_questionable_spending,
            transaction_ratings,
            investment_projection,
        }
    }
}
