use diy_core::calculators::{
    DeckRequest,
    OutletRequest,
    PaintRequest,
    PexRequest,
    TileRequest,
    WireRequest,
    calculate_deck_lumber,
    calculate_outlets,
    calculate_paint,
    calculate_pex_pipe,
    calculate_tile,
    calculate_wire,
};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ErrorCode},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::MaterialsMcp;
use crate::format;
use crate::helpers::{mcp_err, non_negative, positive};

const DEFAULT_ROOM_TYPE: &str = "living";

/// Parameters for the wire calculator.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct WireParams {
    /// One-way distance from the panel to the furthest outlet, in feet.
    pub circuit_length_feet: f64,
    /// Number of circuits. Defaults to 1.
    pub num_circuits: Option<u32>,
    /// Extra fraction for waste. Defaults to 0.15.
    pub waste_factor: Option<f64>,
}

/// Parameters for the outlet calculator.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct OutletsParams {
    /// Total wall perimeter in feet.
    pub room_perimeter_feet: f64,
    /// kitchen, bathroom, living, bedroom, or garage. Defaults to living.
    pub room_type: Option<String>,
}

/// Parameters for the tile calculator.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TileParams {
    pub area_sq_ft: f64,
    /// Defaults to 12.
    pub tile_width_inches: Option<f64>,
    /// Defaults to 12.
    pub tile_height_inches: Option<f64>,
    /// Defaults to 0.10.
    pub waste_factor: Option<f64>,
}

/// Parameters for the paint calculator.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PaintParams {
    /// Wall and ceiling area in square feet.
    pub area_sq_ft: f64,
    /// Defaults to 2.
    pub num_coats: Option<u32>,
    /// Square feet per gallon. Defaults to 350.
    pub coverage_per_gallon: Option<f64>,
}

/// Parameters for the deck lumber calculator.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DeckParams {
    pub deck_length_ft: f64,
    pub deck_width_ft: f64,
    /// Defaults to 16.
    pub joist_spacing_inches: Option<f64>,
    /// Defaults to 5.5 (a 2x6).
    pub board_width_inches: Option<f64>,
}

/// Parameters for the PEX pipe calculator.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PexParams {
    /// Sinks, toilets, showers, and other fixtures to supply.
    pub num_fixtures: u32,
    /// Average run per fixture in feet. Defaults to 30.
    pub avg_distance_per_fixture: Option<f64>,
    /// Home-run manifold (true) or trunk-and-branch (false). Defaults to true.
    pub manifold_system: Option<bool>,
}

fn render<T: Serialize>(title: &str, estimate: &T) -> Result<CallToolResult, ErrorData> {
    let value = serde_json::to_value(estimate).map_err(|err| {
        mcp_err(
            ErrorCode::INTERNAL_ERROR,
            format!("failed to serialize {title}: {err}"),
        )
    })?;
    Ok(CallToolResult::success(vec![
        Content::text(format::calculation(title, &value)),
        Content::json(value)?,
    ]))
}

impl WireParams {
    fn into_request(self) -> Result<WireRequest, ErrorData> {
        let length = non_negative("circuit_length_feet", self.circuit_length_feet)?;
        let mut request = WireRequest::new(length);
        if let Some(num_circuits) = self.num_circuits {
            request = request.with_circuits(num_circuits);
        }
        if let Some(waste_factor) = self.waste_factor {
            request = request.with_waste_factor(non_negative("waste_factor", waste_factor)?);
        }
        Ok(request)
    }
}

impl TileParams {
    fn into_request(self) -> Result<TileRequest, ErrorData> {
        let mut request = TileRequest::new(non_negative("area_sq_ft", self.area_sq_ft)?);
        if self.tile_width_inches.is_some() || self.tile_height_inches.is_some() {
            let width = self.tile_width_inches.unwrap_or(request.tile_width_inches);
            let height = self.tile_height_inches.unwrap_or(request.tile_height_inches);
            request = request.with_tile_size(
                positive("tile_width_inches", width)?,
                positive("tile_height_inches", height)?,
            );
        }
        if let Some(waste_factor) = self.waste_factor {
            request = request.with_waste_factor(non_negative("waste_factor", waste_factor)?);
        }
        Ok(request)
    }
}

impl PaintParams {
    fn into_request(self) -> Result<PaintRequest, ErrorData> {
        let mut request = PaintRequest::new(non_negative("area_sq_ft", self.area_sq_ft)?);
        if let Some(coats) = self.num_coats {
            request = request.with_coats(coats);
        }
        if let Some(coverage) = self.coverage_per_gallon {
            request = request.with_coverage(positive("coverage_per_gallon", coverage)?);
        }
        Ok(request)
    }
}

impl DeckParams {
    fn into_request(self) -> Result<DeckRequest, ErrorData> {
        let mut request = DeckRequest::new(
            non_negative("deck_length_ft", self.deck_length_ft)?,
            non_negative("deck_width_ft", self.deck_width_ft)?,
        );
        if let Some(spacing) = self.joist_spacing_inches {
            request = request.with_joist_spacing(positive("joist_spacing_inches", spacing)?);
        }
        if let Some(width) = self.board_width_inches {
            request = request.with_board_width(positive("board_width_inches", width)?);
        }
        Ok(request)
    }
}

impl PexParams {
    fn into_request(self) -> Result<PexRequest, ErrorData> {
        let mut request = PexRequest::new(self.num_fixtures);
        if let Some(distance) = self.avg_distance_per_fixture {
            request = request.with_distance(non_negative("avg_distance_per_fixture", distance)?);
        }
        if let Some(manifold) = self.manifold_system {
            request = request.with_manifold(manifold);
        }
        Ok(request)
    }
}

#[tool_router(router = tool_router_calculators, vis = "pub")]
impl MaterialsMcp {
    #[tool(
        description = "Calculate how much electrical wire to buy for one or more circuits, rounded up to 25 ft spools."
    )]
    async fn calculate_wire_needed(
        &self,
        Parameters(params): Parameters<WireParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = params.into_request()?;
        render("Wire Calculation", &calculate_wire(&request))
    }

    #[tool(description = "Calculate the number of outlets a room needs under NEC 210.52.")]
    async fn calculate_outlets_needed(
        &self,
        Parameters(params): Parameters<OutletsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let perimeter = non_negative("room_perimeter_feet", params.room_perimeter_feet)?;
        let room_type = params
            .room_type
            .unwrap_or_else(|| DEFAULT_ROOM_TYPE.to_string());
        render(
            "Outlet Calculation",
            &calculate_outlets(&OutletRequest::new(perimeter, room_type)),
        )
    }

    #[tool(description = "Calculate tiles and cases needed for a floor or wall, including waste.")]
    async fn calculate_tile_needed(
        &self,
        Parameters(params): Parameters<TileParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = params.into_request()?;
        render("Tile Calculation", &calculate_tile(&request))
    }

    #[tool(description = "Calculate gallons of paint to buy for an area and number of coats.")]
    async fn calculate_paint_needed(
        &self,
        Parameters(params): Parameters<PaintParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = params.into_request()?;
        render("Paint Calculation", &calculate_paint(&request))
    }

    #[tool(description = "Estimate joists, decking boards, and posts for a rectangular deck.")]
    async fn calculate_deck_lumber(
        &self,
        Parameters(params): Parameters<DeckParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = params.into_request()?;
        render("Deck Lumber Calculation", &calculate_deck_lumber(&request))
    }

    #[tool(description = "Calculate hot and cold PEX pipe lengths, rounded up to coil sizes.")]
    async fn calculate_pex_pipe(
        &self,
        Parameters(params): Parameters<PexParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = params.into_request()?;
        render("PEX Pipe Calculation", &calculate_pex_pipe(&request))
    }
}
