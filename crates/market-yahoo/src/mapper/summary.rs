//! `quoteSummary` mapper.
//!
//! A summary response carries only the modules that were requested. Each
//! module present in the response replaces its group in the record; groups
//! whose module is absent keep their previous contents.

use market_core::{
    AssetProfile, CalendarEvents, CompanyOfficer, DefaultKeyStatistics, EarningsEstimate,
    EarningsHistory, EarningsTrend, FinancialData, FinancialsChart, Holding, QuoteSummary,
    RevenueEstimate,
};

use crate::decode::Node;

/// Applies the modules present in one element of `quoteSummary.result` to
/// `summary`.
///
/// Returns the number of modules applied.
pub fn apply(node: Node<'_>, summary: &mut QuoteSummary) -> usize {
    let mut applied = 0;
    let mut present = |name: &str| {
        let module = node.get(name);
        let found = module.is_object();
        applied += usize::from(found);
        found.then_some(module)
    };

    if let Some(m) = present("assetProfile") {
        summary.asset_profile = asset_profile(m);
    }
    if let Some(m) = present("calendarEvents") {
        summary.calendar_events = calendar_events(m);
    }
    if let Some(m) = present("defaultKeyStatistics") {
        summary.default_key_statistics = default_key_statistics(m);
    }
    if let Some(m) = present("financialData") {
        summary.financial_data = financial_data(m);
    }
    if let Some(m) = present("earnings") {
        m.get("financialsChart").fill_records(
            "quarterly",
            &mut summary.financials_chart_quarterly,
            financials_chart,
        );
    }
    if let Some(m) = present("earningsHistory") {
        m.fill_records("history", &mut summary.earnings_history, earnings_history);
    }
    if let Some(m) = present("earningsTrend") {
        m.fill_records("trend", &mut summary.earnings_trend, earnings_trend);
    }
    if let Some(m) = present("topHoldings") {
        m.fill_records("holdings", &mut summary.top_holdings, holding);
    }

    applied
}

fn company_officer(node: Node<'_>) -> CompanyOfficer {
    CompanyOfficer {
        age: node.int("age"),
        exercised_value: node.int("exercisedValue"),
        fiscal_year: node.int("fiscalYear"),
        name: node.string("name"),
        title: node.string("title"),
        total_pay: node.int("totalPay"),
        unexercised_value: node.int("unexercisedValue"),
        year_born: node.int("yearBorn"),
    }
}

fn asset_profile(node: Node<'_>) -> AssetProfile {
    let mut profile = AssetProfile {
        address1: node.string("address1"),
        address2: node.string("address2"),
        address3: node.string("address3"),
        city: node.string("city"),
        country: node.string("country"),
        full_time_employees: node.int("fullTimeEmployees"),
        industry: node.string("industry"),
        long_business_summary: node.text("longBusinessSummary"),
        phone: node.string("phone"),
        sector: node.string("sector"),
        state: node.string("state"),
        website: node.string("website"),
        zip: node.string("zip"),
        audit_risk: node.int("auditRisk"),
        board_risk: node.int("boardRisk"),
        compensation_as_of_epoch_date: node.int("compensationAsOfEpochDate"),
        compensation_risk: node.int("compensationRisk"),
        governance_epoch_date: node.int("governanceEpochDate"),
        overall_risk: node.int("overallRisk"),
        share_holder_rights_risk: node.int("shareHolderRightsRisk"),
        ..Default::default()
    };
    node.fill_records(
        "companyOfficers",
        &mut profile.company_officers,
        company_officer,
    );
    profile
}

fn calendar_events(node: Node<'_>) -> CalendarEvents {
    CalendarEvents {
        dividend_date: node.int("dividendDate"),
        ex_dividend_date: node.int("exDividendDate"),
        // First of the announced earnings dates.
        earnings_date: node.get("earnings").get("earningsDate").at(0).to(),
    }
}

fn default_key_statistics(node: Node<'_>) -> DefaultKeyStatistics {
    DefaultKeyStatistics {
        annual_holdings_turnover: node.float("annualHoldingsTurnover"),
        annual_report_expense_ratio: node.float("annualReportExpenseRatio"),
        beta: node.float("beta"),
        beta_3_year: node.float("beta3Year"),
        book_value: node.float("bookValue"),
        category: node.string("category"),
        date_short_interest: node.int("dateShortInterest"),
        earnings_quarterly_growth: node.float("earningsQuarterlyGrowth"),
        enterprise_to_ebitda: node.float("enterpriseToEbitda"),
        enterprise_to_revenue: node.float("enterpriseToRevenue"),
        enterprise_value: node.int("enterpriseValue"),
        fifty_two_week_change: node.float("52WeekChange"),
        five_year_average_return: node.float("fiveYearAverageReturn"),
        float_shares: node.int("floatShares"),
        forward_eps: node.float("forwardEps"),
        forward_pe: node.float("forwardPE"),
        fund_family: node.string("fundFamily"),
        fund_inception_date: node.int("fundInceptionDate"),
        held_percent_insiders: node.float("heldPercentInsiders"),
        held_percent_institutions: node.float("heldPercentInstitutions"),
        implied_shares_outstanding: node.int("impliedSharesOutstanding"),
        last_cap_gain: node.float("lastCapGain"),
        last_dividend_date: node.int("lastDividendDate"),
        last_dividend_value: node.float("lastDividendValue"),
        last_fiscal_year_end: node.int("lastFiscalYearEnd"),
        last_split_date: node.int("lastSplitDate"),
        last_split_factor: node.string("lastSplitFactor"),
        legal_type: node.string("legalType"),
        morning_star_overall_rating: node.int("morningStarOverallRating"),
        morning_star_risk_rating: node.int("morningStarRiskRating"),
        most_recent_quarter: node.int("mostRecentQuarter"),
        net_income_to_common: node.int("netIncomeToCommon"),
        next_fiscal_year_end: node.int("nextFiscalYearEnd"),
        peg_ratio: node.float("pegRatio"),
        price_hint: node.int("priceHint"),
        price_to_book: node.float("priceToBook"),
        price_to_sales_trailing_12_months: node.float("priceToSalesTrailing12Months"),
        profit_margins: node.float("profitMargins"),
        revenue_quarterly_growth: node.float("revenueQuarterlyGrowth"),
        sand_p_52_week_change: node.float("SandP52WeekChange"),
        shares_outstanding: node.int("sharesOutstanding"),
        shares_percent_shares_out: node.float("sharesPercentSharesOut"),
        shares_short: node.int("sharesShort"),
        shares_short_previous_month_date: node.int("sharesShortPreviousMonthDate"),
        shares_short_prior_month: node.int("sharesShortPriorMonth"),
        short_percent_of_float: node.float("shortPercentOfFloat"),
        short_ratio: node.float("shortRatio"),
        three_year_average_return: node.float("threeYearAverageReturn"),
        total_assets: node.int("totalAssets"),
        trailing_eps: node.float("trailingEps"),
        yield_: node.float("yield"),
        ytd_return: node.float("ytdReturn"),
    }
}

fn financials_chart(node: Node<'_>) -> FinancialsChart {
    FinancialsChart {
        date: node.string("date"),
        earnings: node.int("earnings"),
        revenue: node.int("revenue"),
    }
}

fn earnings_history(node: Node<'_>) -> EarningsHistory {
    EarningsHistory {
        eps_actual: node.float("epsActual"),
        eps_difference: node.float("epsDifference"),
        eps_estimate: node.float("epsEstimate"),
        period: node.string("period"),
        quarter: node.int("quarter"),
        surprise_percent: node.float("surprisePercent"),
    }
}

fn earnings_trend(node: Node<'_>) -> EarningsTrend {
    let earnings = node.get("earningsEstimate");
    let revenue = node.get("revenueEstimate");
    EarningsTrend {
        end_date: node.string("endDate"),
        growth: node.float("growth"),
        period: node.string("period"),
        earnings_estimate: EarningsEstimate {
            avg: earnings.float("avg"),
            growth: earnings.float("growth"),
            high: earnings.float("high"),
            low: earnings.float("low"),
            number_of_analysts: earnings.int("numberOfAnalysts"),
            year_ago_eps: earnings.float("yearAgoEps"),
        },
        revenue_estimate: RevenueEstimate {
            avg: revenue.int("avg"),
            growth: revenue.float("growth"),
            high: revenue.int("high"),
            low: revenue.int("low"),
            number_of_analysts: revenue.int("numberOfAnalysts"),
            year_ago_revenue: revenue.int("yearAgoRevenue"),
        },
    }
}

fn financial_data(node: Node<'_>) -> FinancialData {
    FinancialData {
        current_price: node.float("currentPrice"),
        current_ratio: node.float("currentRatio"),
        debt_to_equity: node.float("debtToEquity"),
        earnings_growth: node.float("earningsGrowth"),
        ebitda: node.int("ebitda"),
        ebitda_margins: node.float("ebitdaMargins"),
        financial_currency: node.string("financialCurrency"),
        free_cashflow: node.int("freeCashflow"),
        gross_margins: node.float("grossMargins"),
        gross_profits: node.int("grossProfits"),
        number_of_analyst_opinions: node.int("numberOfAnalystOpinions"),
        operating_cashflow: node.int("operatingCashflow"),
        operating_margins: node.float("operatingMargins"),
        profit_margins: node.float("profitMargins"),
        quick_ratio: node.float("quickRatio"),
        recommendation_key: node.string("recommendationKey"),
        recommendation_mean: node.float("recommendationMean"),
        return_on_assets: node.float("returnOnAssets"),
        return_on_equity: node.float("returnOnEquity"),
        revenue_growth: node.float("revenueGrowth"),
        revenue_per_share: node.float("revenuePerShare"),
        target_high_price: node.float("targetHighPrice"),
        target_low_price: node.float("targetLowPrice"),
        target_mean_price: node.float("targetMeanPrice"),
        target_median_price: node.float("targetMedianPrice"),
        total_cash: node.int("totalCash"),
        total_cash_per_share: node.float("totalCashPerShare"),
        total_debt: node.int("totalDebt"),
        total_revenue: node.int("totalRevenue"),
    }
}

fn holding(node: Node<'_>) -> Holding {
    Holding {
        holding_name: node.string("holdingName"),
        holding_percent: node.float("holdingPercent"),
        symbol: node.string("symbol"),
    }
}
