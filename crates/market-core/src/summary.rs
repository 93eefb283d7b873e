//! Quote summary record and its module groups.
//!
//! A quote summary is assembled from named modules selected per request. Each
//! group below corresponds to one module; repeated groups (quarterly history,
//! holdings, officers) have fixed arity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cache::{Record, RecordKind};
use crate::types::{COMPANY_OFFICERS, HOLDINGS, QUARTERLY};

/// A quote summary module selectable in a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Module {
    /// Company profile and officers.
    AssetProfile,
    /// Dividend and earnings dates.
    CalendarEvents,
    /// Valuation and share statistics.
    DefaultKeyStatistics,
    /// Quarterly earnings and revenue chart.
    Earnings,
    /// Reported versus estimated EPS history.
    EarningsHistory,
    /// Analyst earnings and revenue trend.
    EarningsTrend,
    /// Margins, cash and analyst targets.
    FinancialData,
    /// Fund top holdings.
    TopHoldings,
}

impl Module {
    /// Returns the module name used in the `modules` selector.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AssetProfile => "assetProfile",
            Self::CalendarEvents => "calendarEvents",
            Self::DefaultKeyStatistics => "defaultKeyStatistics",
            Self::Earnings => "earnings",
            Self::EarningsHistory => "earningsHistory",
            Self::EarningsTrend => "earningsTrend",
            Self::FinancialData => "financialData",
            Self::TopHoldings => "topHoldings",
        }
    }

    /// Modules fetched by a plain summary request.
    pub const SUMMARY: [Self; 3] = [
        Self::AssetProfile,
        Self::DefaultKeyStatistics,
        Self::FinancialData,
    ];

    /// Modules fetched by an earnings request.
    pub const EARNINGS: [Self; 4] = [
        Self::CalendarEvents,
        Self::Earnings,
        Self::EarningsHistory,
        Self::EarningsTrend,
    ];

    /// Modules fetched by a holdings request.
    pub const HOLDINGS: [Self; 1] = [Self::TopHoldings];
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A company officer listed in the asset profile.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyOfficer {
    pub age: i64,
    pub exercised_value: i64,
    pub fiscal_year: i64,
    pub name: String,
    pub title: String,
    pub total_pay: i64,
    pub unexercised_value: i64,
    pub year_born: i64,
}

/// Company profile (`assetProfile` module).
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetProfile {
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub city: String,
    pub country: String,
    pub full_time_employees: i64,
    pub industry: String,
    pub long_business_summary: String,
    pub phone: String,
    pub sector: String,
    pub state: String,
    pub website: String,
    pub zip: String,
    pub company_officers: [CompanyOfficer; COMPANY_OFFICERS],
    pub audit_risk: i64,
    pub board_risk: i64,
    pub compensation_as_of_epoch_date: i64,
    pub compensation_risk: i64,
    pub governance_epoch_date: i64,
    pub overall_risk: i64,
    pub share_holder_rights_risk: i64,
}

/// Upcoming corporate events (`calendarEvents` module).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvents {
    /// Next dividend payment date (epoch seconds).
    pub dividend_date: i64,
    /// Next ex-dividend date (epoch seconds).
    pub ex_dividend_date: i64,
    /// First announced earnings date (epoch seconds).
    pub earnings_date: i64,
}

/// Key statistics (`defaultKeyStatistics` module).
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultKeyStatistics {
    pub annual_holdings_turnover: f64,
    pub annual_report_expense_ratio: f64,
    pub beta: f64,
    pub beta_3_year: f64,
    pub book_value: f64,
    pub category: String,
    pub date_short_interest: i64,
    pub earnings_quarterly_growth: f64,
    pub enterprise_to_ebitda: f64,
    pub enterprise_to_revenue: f64,
    pub enterprise_value: i64,
    pub fifty_two_week_change: f64,
    pub five_year_average_return: f64,
    pub float_shares: i64,
    pub forward_eps: f64,
    pub forward_pe: f64,
    pub fund_family: String,
    pub fund_inception_date: i64,
    pub held_percent_insiders: f64,
    pub held_percent_institutions: f64,
    pub implied_shares_outstanding: i64,
    pub last_cap_gain: f64,
    pub last_dividend_date: i64,
    pub last_dividend_value: f64,
    pub last_fiscal_year_end: i64,
    pub last_split_date: i64,
    pub last_split_factor: String,
    pub legal_type: String,
    pub morning_star_overall_rating: i64,
    pub morning_star_risk_rating: i64,
    pub most_recent_quarter: i64,
    pub net_income_to_common: i64,
    pub next_fiscal_year_end: i64,
    pub peg_ratio: f64,
    pub price_hint: i64,
    pub price_to_book: f64,
    pub price_to_sales_trailing_12_months: f64,
    pub profit_margins: f64,
    pub revenue_quarterly_growth: f64,
    pub sand_p_52_week_change: f64,
    pub shares_outstanding: i64,
    pub shares_percent_shares_out: f64,
    pub shares_short: i64,
    pub shares_short_previous_month_date: i64,
    pub shares_short_prior_month: i64,
    pub short_percent_of_float: f64,
    pub short_ratio: f64,
    pub three_year_average_return: f64,
    pub total_assets: i64,
    pub trailing_eps: f64,
    pub yield_: f64,
    pub ytd_return: f64,
}

/// One quarter of the earnings chart (`earnings.financialsChart.quarterly`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialsChart {
    /// Quarter label (e.g. `"3Q2024"`).
    pub date: String,
    /// Reported earnings.
    pub earnings: i64,
    /// Reported revenue.
    pub revenue: i64,
}

/// One quarter of reported versus estimated EPS (`earningsHistory` module).
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EarningsHistory {
    pub eps_actual: f64,
    pub eps_difference: f64,
    pub eps_estimate: f64,
    pub period: String,
    pub quarter: i64,
    pub surprise_percent: f64,
}

/// Analyst EPS estimate for one trend period.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EarningsEstimate {
    pub avg: f64,
    pub growth: f64,
    pub high: f64,
    pub low: f64,
    pub number_of_analysts: i64,
    pub year_ago_eps: f64,
}

/// Analyst revenue estimate for one trend period.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueEstimate {
    pub avg: i64,
    pub growth: f64,
    pub high: i64,
    pub low: i64,
    pub number_of_analysts: i64,
    pub year_ago_revenue: i64,
}

/// One period of the analyst trend (`earningsTrend` module).
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EarningsTrend {
    pub end_date: String,
    pub growth: f64,
    pub period: String,
    pub earnings_estimate: EarningsEstimate,
    pub revenue_estimate: RevenueEstimate,
}

/// Financial data (`financialData` module).
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialData {
    pub current_price: f64,
    pub current_ratio: f64,
    pub debt_to_equity: f64,
    pub earnings_growth: f64,
    pub ebitda: i64,
    pub ebitda_margins: f64,
    pub financial_currency: String,
    pub free_cashflow: i64,
    pub gross_margins: f64,
    pub gross_profits: i64,
    pub number_of_analyst_opinions: i64,
    pub operating_cashflow: i64,
    pub operating_margins: f64,
    pub profit_margins: f64,
    pub quick_ratio: f64,
    pub recommendation_key: String,
    pub recommendation_mean: f64,
    pub return_on_assets: f64,
    pub return_on_equity: f64,
    pub revenue_growth: f64,
    pub revenue_per_share: f64,
    pub target_high_price: f64,
    pub target_low_price: f64,
    pub target_mean_price: f64,
    pub target_median_price: f64,
    pub total_cash: i64,
    pub total_cash_per_share: f64,
    pub total_debt: i64,
    pub total_revenue: i64,
}

/// One of a fund's top holdings (`topHoldings` module).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Holding name.
    pub holding_name: String,
    /// Share of the fund, as a fraction.
    pub holding_percent: f64,
    /// Ticker of the holding.
    pub symbol: String,
}

/// Detailed fundamentals for one symbol.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    /// Symbol this summary was requested for.
    pub symbol: String,
    /// `assetProfile` module.
    pub asset_profile: AssetProfile,
    /// `calendarEvents` module.
    pub calendar_events: CalendarEvents,
    /// `defaultKeyStatistics` module.
    pub default_key_statistics: DefaultKeyStatistics,
    /// `earnings` module, quarterly chart.
    pub financials_chart_quarterly: [FinancialsChart; QUARTERLY],
    /// `earningsHistory` module.
    pub earnings_history: [EarningsHistory; QUARTERLY],
    /// `earningsTrend` module.
    pub earnings_trend: [EarningsTrend; QUARTERLY],
    /// `financialData` module.
    pub financial_data: FinancialData,
    /// `topHoldings` module.
    pub top_holdings: [Holding; HOLDINGS],
}

impl QuoteSummary {
    /// Symbols of the populated top holdings, in reported order.
    pub fn holding_symbols(&self) -> impl Iterator<Item = &str> {
        self.top_holdings
            .iter()
            .map(|h| h.symbol.as_str())
            .filter(|s| !s.is_empty())
    }
}

impl Record for QuoteSummary {
    const KIND: RecordKind = RecordKind::QuoteSummary;

    fn symbol(&self) -> &str {
        &self.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_names() {
        let names: Vec<_> = Module::EARNINGS.iter().map(Module::as_str).collect();
        assert_eq!(
            names,
            ["calendarEvents", "earnings", "earningsHistory", "earningsTrend"]
        );
    }

    #[test]
    fn test_holding_symbols_skip_empty() {
        let mut summary = QuoteSummary::default();
        summary.top_holdings[0].symbol = "AAPL".to_string();
        summary.top_holdings[2].symbol = "MSFT".to_string();
        let symbols: Vec<_> = summary.holding_symbols().collect();
        assert_eq!(symbols, ["AAPL", "MSFT"]);
    }
}
