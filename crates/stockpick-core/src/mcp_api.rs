use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::calculator::{
    CompoundInput, CompoundResult, DividendInput, DividendResult, PeInput, PeResult, PeVerdict,
    PositionInput, PositionResult,
};
use crate::model::{Category, CategoryKey, Guide, GuideSection, Term};

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchTermsParams {
    /// Case-insensitive text matched against term names and definitions. Empty matches all.
    pub query: Option<String>,
    /// Restrict to one category key such as "dividend" or "indicator".
    pub category: Option<String>,
    /// Maximum number of results to return (default and max set by the server).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTermParams {
    /// Exact term slug such as "per" or "dividend-yield".
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCategoryParams {
    /// Category key: basic, indicator, trading, dividend, analysis or market.
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetGuideParams {
    /// Guide slug such as "dividend-investing-101".
    pub slug: String,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CalculatePeParams {
    /// Current share price.
    pub price: Option<f64>,
    /// Earnings per share over the last year.
    pub earnings_per_share: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CalculateDividendParams {
    /// Current share price.
    pub price: Option<f64>,
    /// Dividend paid per share per year.
    pub annual_dividend: Option<f64>,
    /// Number of shares held.
    pub shares_owned: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CalculateCompoundParams {
    /// Starting balance.
    pub initial_amount: Option<f64>,
    /// Amount added at the end of every month (default 0).
    pub monthly_contribution: Option<f64>,
    /// Expected annual return in percent, e.g. 10 for 10%.
    pub annual_rate_percent: Option<f64>,
    /// Investment horizon in years.
    pub years: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CalculatePositionParams {
    /// Total portfolio value.
    pub portfolio_value: Option<f64>,
    /// Share of the portfolio to risk on this trade, in percent.
    pub risk_percent: Option<f64>,
    /// Planned entry price.
    pub entry_price: Option<f64>,
    /// Stop-loss price.
    pub stop_loss_price: Option<f64>,
}

impl From<CalculatePeParams> for PeInput {
    fn from(p: CalculatePeParams) -> Self {
        Self {
            price: p.price,
            earnings_per_share: p.earnings_per_share,
        }
    }
}

impl From<CalculateDividendParams> for DividendInput {
    fn from(p: CalculateDividendParams) -> Self {
        Self {
            price: p.price,
            annual_dividend: p.annual_dividend,
            shares_owned: p.shares_owned,
        }
    }
}

impl From<CalculateCompoundParams> for CompoundInput {
    fn from(p: CalculateCompoundParams) -> Self {
        Self {
            initial_amount: p.initial_amount,
            monthly_contribution: p.monthly_contribution,
            annual_rate_percent: p.annual_rate_percent,
            years: p.years,
        }
    }
}

impl From<CalculatePositionParams> for PositionInput {
    fn from(p: CalculatePositionParams) -> Self {
        Self {
            portfolio_value: p.portfolio_value,
            risk_percent: p.risk_percent,
            entry_price: p.entry_price,
            stop_loss_price: p.stop_loss_price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TermSummary {
    pub slug: String,
    pub term: String,
    pub term_en: String,
    pub definition: String,
    pub category: CategoryKey,
}

impl From<&Term> for TermSummary {
    fn from(t: &Term) -> Self {
        Self {
            slug: t.slug.clone(),
            term: t.term.clone(),
            term_en: t.term_en.clone(),
            definition: t.definition.clone(),
            category: t.category,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchTermsResponse {
    /// Number of matching terms before `limit` was applied.
    pub total: usize,
    pub results: Vec<TermSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    pub key: CategoryKey,
    pub label: String,
    pub color: String,
    pub term_count: usize,
}

impl CategoryInfo {
    pub fn new(category: &Category, term_count: usize) -> Self {
        Self {
            key: category.key,
            label: category.label.clone(),
            color: category.color.clone(),
            term_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TermDetailResponse {
    pub slug: String,
    pub term: String,
    pub term_en: String,
    pub definition: String,
    pub description: String,
    pub example: Option<String>,
    pub category: CategoryInfo,
    /// Related entries that exist in the glossary, in their listed order.
    pub related_terms: Vec<TermSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoriesResponse {
    /// SHA-256 of the glossary dataset.
    pub dataset_version: String,
    pub term_count: usize,
    pub categories: Vec<CategoryInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryListResponse {
    /// `None` when the key is not a known category.
    pub category: Option<CategoryInfo>,
    pub terms: Vec<TermSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GuideSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub read_time_minutes: u32,
    pub topic: String,
}

impl From<&Guide> for GuideSummary {
    fn from(g: &Guide) -> Self {
        Self {
            slug: g.slug.clone(),
            title: g.title.clone(),
            description: g.description.clone(),
            read_time_minutes: g.read_time_minutes,
            topic: g.topic.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GuideListResponse {
    pub guides: Vec<GuideSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GuideDetailResponse {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub read_time_minutes: u32,
    pub topic: String,
    pub sections: Vec<GuideSection>,
    pub next_guides: Vec<GuideSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PeResponse {
    pub ratio: f64,
    pub verdict: PeVerdict,
    pub message: String,
}

impl From<PeResult> for PeResponse {
    fn from(r: PeResult) -> Self {
        Self {
            ratio: r.ratio,
            verdict: r.verdict,
            message: r.verdict.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DividendResponse {
    /// `None` when price or dividend is missing, or price is zero.
    pub yield_percent: Option<f64>,
    /// `None` when dividend or share count is missing.
    pub annual_income: Option<f64>,
}

impl From<DividendResult> for DividendResponse {
    fn from(r: DividendResult) -> Self {
        Self {
            yield_percent: r.yield_percent,
            annual_income: r.annual_income,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CompoundResponse {
    pub future_value: f64,
    pub total_contributions: f64,
    pub total_earnings: f64,
}

impl From<CompoundResult> for CompoundResponse {
    fn from(r: CompoundResult) -> Self {
        Self {
            future_value: r.future_value,
            total_contributions: r.total_contributions,
            total_earnings: r.total_earnings,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PositionResponse {
    /// Whole number of shares.
    pub share_count: f64,
    pub risk_amount: f64,
    pub risk_per_share: f64,
    pub position_value: f64,
}

impl From<PositionResult> for PositionResponse {
    fn from(r: PositionResult) -> Self {
        Self {
            share_count: r.share_count,
            risk_amount: r.risk_amount,
            risk_per_share: r.risk_per_share,
            position_value: r.position_value,
        }
    }
}
