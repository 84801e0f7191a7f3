use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::debug;

use stockpick_core::calculator;
use stockpick_core::glossary::{Glossary, TermFilter};
use stockpick_core::guides::GuideCatalog;
use stockpick_core::mcp_api::{
    CalculateCompoundParams, CalculateDividendParams, CalculatePeParams, CalculatePositionParams,
    CategoriesResponse, CategoryInfo, CategoryListResponse, CompoundResponse, DividendResponse,
    GetGuideParams, GetTermParams, GuideDetailResponse, GuideListResponse, GuideSummary,
    ListCategoryParams, PeResponse, PositionResponse, SearchTermsParams, SearchTermsResponse,
    TermDetailResponse, TermSummary,
};
use stockpick_core::model::CategoryKey;

#[derive(Clone)]
pub struct StockGlossaryServer {
    glossary: Arc<Glossary>,
    guides: Arc<GuideCatalog>,
    search_limit: usize,
    tool_router: ToolRouter<StockGlossaryServer>,
}

impl StockGlossaryServer {
    pub fn new(glossary: Arc<Glossary>, guides: Arc<GuideCatalog>, search_limit: usize) -> Self {
        Self {
            glossary,
            guides,
            search_limit,
            tool_router: Self::tool_router(),
        }
    }

    fn category_info(&self, key: CategoryKey) -> Option<CategoryInfo> {
        let category = self.glossary.category(key)?;
        let count = self.glossary.by_category(key.as_str()).len();
        Some(CategoryInfo::new(category, count))
    }
}

#[tool_router]
impl StockGlossaryServer {
    #[tool(description = "Search the stock market glossary. Matches term names, alternate names and definitions case-insensitively, optionally within one category. An empty query lists every term.")]
    async fn search_terms(
        &self,
        Parameters(params): Parameters<SearchTermsParams>,
    ) -> Result<Json<SearchTermsResponse>, String> {
        let filter = TermFilter {
            category: params.category.as_deref(),
            query: params.query.as_deref(),
        };
        let limit = params
            .limit
            .map(|l| l as usize)
            .unwrap_or(self.search_limit)
            .min(self.search_limit);

        let matches = self.glossary.filter(&filter);
        debug!(query = ?filter.query, category = ?filter.category, total = matches.len(), "search");

        Ok(Json(SearchTermsResponse {
            total: matches.len(),
            results: matches.into_iter().take(limit).map(TermSummary::from).collect(),
        }))
    }

    #[tool(description = "Get a glossary term by its exact slug (e.g. 'per', 'dividend-yield'), with its category and related terms.")]
    async fn get_term(
        &self,
        Parameters(params): Parameters<GetTermParams>,
    ) -> Result<Json<TermDetailResponse>, String> {
        let term = self
            .glossary
            .term(&params.slug)
            .ok_or_else(|| format!("term not found: {}", params.slug))?;

        let category = self
            .category_info(term.category)
            .ok_or_else(|| format!("no metadata for category: {}", term.category))?;

        Ok(Json(TermDetailResponse {
            slug: term.slug.clone(),
            term: term.term.clone(),
            term_en: term.term_en.clone(),
            definition: term.definition.clone(),
            description: term.description.clone(),
            example: term.example.clone(),
            category,
            related_terms: self
                .glossary
                .related_for(term)
                .into_iter()
                .map(TermSummary::from)
                .collect(),
        }))
    }

    #[tool(description = "List glossary categories with their display labels, colors and term counts.")]
    async fn list_categories(&self) -> Result<Json<CategoriesResponse>, String> {
        let categories = self
            .glossary
            .category_counts()
            .into_iter()
            .map(|(category, count)| CategoryInfo::new(category, count))
            .collect();

        Ok(Json(CategoriesResponse {
            dataset_version: self.glossary.digest().to_string(),
            term_count: self.glossary.len(),
            categories,
        }))
    }

    #[tool(description = "List every glossary term in a category (basic, indicator, trading, dividend, analysis, market). Unknown categories return an empty list.")]
    async fn list_category(
        &self,
        Parameters(params): Parameters<ListCategoryParams>,
    ) -> Result<Json<CategoryListResponse>, String> {
        let category = params
            .category
            .parse::<CategoryKey>()
            .ok()
            .and_then(|key| self.category_info(key));

        let terms = self
            .glossary
            .by_category(&params.category)
            .into_iter()
            .map(TermSummary::from)
            .collect();

        Ok(Json(CategoryListResponse { category, terms }))
    }

    #[tool(description = "List the beginner investing guides.")]
    async fn list_guides(&self) -> Result<Json<GuideListResponse>, String> {
        Ok(Json(GuideListResponse {
            guides: self.guides.guides().iter().map(GuideSummary::from).collect(),
        }))
    }

    #[tool(description = "Get a guide by slug with its full section text and suggested next guides.")]
    async fn get_guide(
        &self,
        Parameters(params): Parameters<GetGuideParams>,
    ) -> Result<Json<GuideDetailResponse>, String> {
        let guide = self
            .guides
            .guide(&params.slug)
            .ok_or_else(|| format!("guide not found: {}", params.slug))?;

        Ok(Json(GuideDetailResponse {
            slug: guide.slug.clone(),
            title: guide.title.clone(),
            description: guide.description.clone(),
            read_time_minutes: guide.read_time_minutes,
            topic: guide.topic.clone(),
            sections: guide.sections.clone(),
            next_guides: self
                .guides
                .next_for(guide)
                .into_iter()
                .map(GuideSummary::from)
                .collect(),
        }))
    }

    #[tool(description = "P/E ratio (price / earnings per share) with a plain-language verdict.")]
    async fn calculate_pe(
        &self,
        Parameters(params): Parameters<CalculatePeParams>,
    ) -> Result<Json<PeResponse>, String> {
        let result = calculator::pe_ratio(params.into())
            .map_err(|e| format!("P/E unavailable: {e}"))?;
        Ok(Json(result.into()))
    }

    #[tool(description = "Dividend yield (annual dividend / price) and yearly income (annual dividend x shares). Each output is null when its inputs are missing.")]
    async fn calculate_dividend(
        &self,
        Parameters(params): Parameters<CalculateDividendParams>,
    ) -> Result<Json<DividendResponse>, String> {
        let result = calculator::dividend(params.into());
        if result.is_empty() {
            debug!("dividend calculation produced no outputs");
        }
        Ok(Json(result.into()))
    }

    #[tool(description = "Compound growth with monthly compounding and monthly contributions. Returns future value, total contributions and earnings rounded to whole units.")]
    async fn calculate_compound_growth(
        &self,
        Parameters(params): Parameters<CalculateCompoundParams>,
    ) -> Result<Json<CompoundResponse>, String> {
        let result = calculator::compound_growth(params.into())
            .map_err(|e| format!("compound growth unavailable: {e}"))?;
        Ok(Json(result.into()))
    }

    #[tool(description = "Position size from portfolio value, risk percent, entry and stop-loss prices. Returns whole shares, money at risk and position value.")]
    async fn calculate_position_size(
        &self,
        Parameters(params): Parameters<CalculatePositionParams>,
    ) -> Result<Json<PositionResponse>, String> {
        let result = calculator::position_size(params.into())
            .map_err(|e| format!("position size unavailable: {e}"))?;
        Ok(Json(result.into()))
    }
}

#[tool_handler]
impl ServerHandler for StockGlossaryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "stockpick-glossary".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Stock market glossary and investing calculators. Use search_terms to find terms \
                 by text and category, get_term for a specific slug (for example per or roe), \
                 list_categories/list_category for browsing, list_guides/get_guide for the \
                 beginner guides, and the calculate_* tools for P/E, dividend yield, compound \
                 growth and position sizing."
                    .to_string(),
            ),
        }
    }
}
