use std::sync::Arc;

use almanac_core::{Engine, EngineError};
use almanac_store::Store;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Days either side of the centre when a range request gives no bounds.
const DEFAULT_WINDOW: u32 = 15;

#[derive(Clone)]
pub struct AlmanacServer {
    engine: Arc<Mutex<Engine<Store>>>,
    tool_router: ToolRouter<Self>,
}

impl AlmanacServer {
    pub fn new(engine: Engine<Store>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            tool_router: Self::tool_router(),
        }
    }
}

fn engine_error(e: EngineError) -> McpError {
    if e.is_input_error() {
        McpError::invalid_params(e.to_string(), None)
    } else {
        McpError::internal_error(e.to_string(), None)
    }
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).unwrap_or_default(),
    )]))
}

// --- Tool parameter types ---

#[derive(Debug, Deserialize, JsonSchema)]
struct CycleValuesRequest {
    /// Anchor (birth) date, YYYY-MM-DD
    anchor: String,
    /// Target date, YYYY-MM-DD. Defaults to today.
    target: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CycleRangeRequest {
    /// Anchor (birth) date, YYYY-MM-DD
    anchor: String,
    /// First date of an explicit range, YYYY-MM-DD. Requires `to`.
    from: Option<String>,
    /// Last date of an explicit range (inclusive), YYYY-MM-DD. Requires `from`.
    to: Option<String>,
    /// Centre of a window when no explicit range is given. Defaults to today.
    center: Option<String>,
    /// Days before the centre (default 15)
    before: Option<u32>,
    /// Days after the centre (default 15)
    after: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DateRequest {
    /// Date, YYYY-MM-DD. Defaults to today.
    date: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AnchorRequest {
    /// Anchor (birth) date, YYYY-MM-DD
    anchor: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct EnergyRequest {
    /// Zodiac animal name (e.g. "goat") or a birth year (e.g. "1991")
    zodiac: String,
    /// Date, YYYY-MM-DD. Defaults to today.
    date: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TrendRequest {
    /// Anchor (birth) date, YYYY-MM-DD
    anchor: String,
    /// First day of the week, YYYY-MM-DD. Defaults to today.
    start: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SeasonRequest {
    /// Date, YYYY-MM-DD. Defaults to today.
    date: Option<String>,
    /// Hour of day 0-23 for the organ clock. Defaults to the local hour.
    hour: Option<u8>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RelationRequest {
    /// Element name: wood, fire, earth, metal or water
    from: String,
    /// Second element name. Defaults to the daily element of `date`.
    to: Option<String>,
    /// Date whose daily element is used when `to` is omitted. Defaults to today.
    date: Option<String>,
}

#[tool_router]
impl AlmanacServer {
    #[tool(
        description = "Physical (23-day), emotional (28-day) and intellectual (33-day) cycle values in [-100, 100] for a target date relative to an anchor date, with the weighted combined score and an outlook. Records the anchor in history."
    )]
    async fn cycle_values(
        &self,
        Parameters(req): Parameters<CycleValuesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut engine = self.engine.lock().await;
        let report = engine
            .get_cycle_values(&req.anchor, req.target.as_deref())
            .map_err(engine_error)?;
        json_result(&report)
    }

    #[tool(
        description = "Cycle values for every day of an inclusive date range (from/to), or of a window around a centre date. Returns parallel arrays: dates, physical, emotional, intellectual."
    )]
    async fn cycle_range(
        &self,
        Parameters(req): Parameters<CycleRangeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut engine = self.engine.lock().await;
        let range = match (req.from.as_deref(), req.to.as_deref()) {
            (Some(from), Some(to)) => engine.get_cycle_range(&req.anchor, from, to),
            (None, None) => engine.get_cycle_window(
                &req.anchor,
                req.center.as_deref(),
                req.before.unwrap_or(DEFAULT_WINDOW),
                req.after.unwrap_or(DEFAULT_WINDOW),
            ),
            _ => {
                return Err(McpError::invalid_params(
                    "`from` and `to` must be given together",
                    None,
                ));
            }
        }
        .map_err(engine_error)?;
        json_result(&range)
    }

    #[tool(
        description = "Seven days of cycle values from a start date, each tagged with its weekday and whether it is a weekday or weekend. Records the anchor in history."
    )]
    async fn weekly_trend(
        &self,
        Parameters(req): Parameters<TrendRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut engine = self.engine.lock().await;
        let trend = engine
            .get_weekly_trend(&req.anchor, req.start.as_deref())
            .map_err(engine_error)?;
        json_result(&trend)
    }

    #[tool(
        description = "Day summary for a target date: outlook band, title, description, the total of the three cycle values and a status band per cycle. Records the anchor in history."
    )]
    async fn day_summary(
        &self,
        Parameters(req): Parameters<CycleValuesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut engine = self.engine.lock().await;
        let summary = engine
            .get_day_summary(&req.anchor, req.target.as_deref())
            .map_err(engine_error)?;
        json_result(&summary)
    }

    #[tool(
        description = "Daily calendar page: 260-day position (ordinal, tone, seal), thirteen-moon date, suggestions, avoidances, lucky colour/number/food, message, quote and energy scores."
    )]
    async fn calendar_info(
        &self,
        Parameters(req): Parameters<DateRequest>,
    ) -> Result<CallToolResult, McpError> {
        let engine = self.engine.lock().await;
        let info = engine
            .get_calendar_info(req.date.as_deref())
            .map_err(engine_error)?;
        json_result(&info)
    }

    #[tool(
        description = "Birth chart for an anchor date: calendar position, purpose, strengths and primary/secondary energy fields. Records the anchor in history."
    )]
    async fn birth_chart(
        &self,
        Parameters(req): Parameters<AnchorRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut engine = self.engine.lock().await;
        let chart = engine.get_birth_chart(&req.anchor).map_err(engine_error)?;
        json_result(&chart)
    }

    #[tool(
        description = "Dress and food suggestions for a date: the daily element, each colour system's relation and luck, recommended systems, star colour and foods to favour or avoid."
    )]
    async fn dress_suggestion(
        &self,
        Parameters(req): Parameters<DateRequest>,
    ) -> Result<CallToolResult, McpError> {
        let engine = self.engine.lock().await;
        let suggestion = engine
            .get_dress_suggestion(req.date.as_deref())
            .map_err(engine_error)?;
        json_result(&suggestion)
    }

    #[tool(
        description = "Five-element energy guidance for a zodiac animal on a date: compatibility score with the day's element, lifestyle guidance, foods and compatible animals."
    )]
    async fn energy_guidance(
        &self,
        Parameters(req): Parameters<EnergyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let engine = self.engine.lock().await;
        let guidance = engine
            .get_energy_guidance(&req.zodiac, req.date.as_deref())
            .map_err(engine_error)?;
        json_result(&guidance)
    }

    #[tool(
        description = "Seasonal health guidance: the season and its element, organs and advice, element care, and the organ-clock window for an hour."
    )]
    async fn season_health(
        &self,
        Parameters(req): Parameters<SeasonRequest>,
    ) -> Result<CallToolResult, McpError> {
        let engine = self.engine.lock().await;
        let health = engine
            .get_season_health(req.date.as_deref(), req.hour)
            .map_err(engine_error)?;
        json_result(&health)
    }

    #[tool(
        description = "Five-element relation between two elements, or between one element and the day's element, with its compatibility score."
    )]
    async fn element_relation(
        &self,
        Parameters(req): Parameters<RelationRequest>,
    ) -> Result<CallToolResult, McpError> {
        let engine = self.engine.lock().await;
        let relation = engine
            .element_relation(&req.from, req.to.as_deref(), req.date.as_deref())
            .map_err(engine_error)?;
        json_result(&relation)
    }

    #[tool(description = "Record an anchor date in history, moving it to the front.")]
    async fn record_anchor(
        &self,
        Parameters(req): Parameters<AnchorRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut engine = self.engine.lock().await;
        let anchor = engine.record_anchor(&req.anchor).map_err(engine_error)?;
        json_result(&serde_json::json!({
            "recorded": anchor,
            "history": engine.list_history(),
        }))
    }

    #[tool(description = "List recorded anchor dates, most recent first.")]
    async fn list_history(&self) -> Result<CallToolResult, McpError> {
        let engine = self.engine.lock().await;
        json_result(&engine.list_history())
    }

    #[tool(
        description = "Remove an anchor date from history. The default anchor cannot be removed."
    )]
    async fn remove_from_history(
        &self,
        Parameters(req): Parameters<AnchorRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut engine = self.engine.lock().await;
        let removed = engine
            .remove_from_history(&req.anchor)
            .map_err(engine_error)?;
        json_result(&serde_json::json!({
            "removed": removed,
            "history": engine.list_history(),
        }))
    }

    #[tool(description = "Clear history, keeping only the default anchor.")]
    async fn clear_history(&self) -> Result<CallToolResult, McpError> {
        let mut engine = self.engine.lock().await;
        engine.clear_history().map_err(engine_error)?;
        json_result(&serde_json::json!({
            "cleared": true,
            "history": engine.list_history(),
        }))
    }

    #[tool(description = "Engine health: overall status and readiness of content and persistence.")]
    async fn health_check(&self) -> Result<CallToolResult, McpError> {
        let engine = self.engine.lock().await;
        json_result(&engine.health_check())
    }
}

#[tool_handler]
impl ServerHandler for AlmanacServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Deterministic almanac readings derived from calendar dates.\n\n\
                 Dates are YYYY-MM-DD strings; omitted dates mean today.\n\
                 - cycle_values / cycle_range: three sinusoidal cycles from an anchor (birth) date.\n\
                 - weekly_trend / day_summary: seven-day trend and status bands for a day.\n\
                 - calendar_info / birth_chart: 260-day calendar position and daily readings.\n\
                 - dress_suggestion / energy_guidance: five-element colour, food and zodiac guidance.\n\
                 - element_relation / season_health: element pairs, seasons and the organ clock.\n\
                 - record_anchor / list_history / remove_from_history / clear_history: recent anchors.\n\
                 The same inputs always produce the same outputs."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
