//! Deterministic material-quantity calculators.
//!
//! Every calculator is a pure function from a request to a serializable
//! estimate. Inputs are not validated here; callers sanitize them first.

use serde::Serialize;

pub const DEFAULT_WIRE_WASTE_FACTOR: f64 = 0.15;
pub const WIRE_SPOOL_INCREMENT_FEET: u64 = 25;

pub const DEFAULT_TILE_WASTE_FACTOR: f64 = 0.10;
pub const DEFAULT_TILE_SIZE_INCHES: f64 = 12.0;
pub const TILES_PER_CASE: u64 = 10;

pub const DEFAULT_PAINT_COATS: u32 = 2;
pub const DEFAULT_PAINT_COVERAGE_SQ_FT: f64 = 350.0;

pub const DEFAULT_JOIST_SPACING_INCHES: f64 = 16.0;
pub const DEFAULT_BOARD_WIDTH_INCHES: f64 = 5.5;
pub const POST_SPACING_FEET: f64 = 6.0;

pub const DEFAULT_PEX_RUN_FEET: f64 = 30.0;
pub const PEX_HOT_SHARE: f64 = 0.6;
pub const PEX_TRUNK_FACTOR: f64 = 0.7;
pub const PEX_WASTE_MULTIPLIER: f64 = 1.2;

/// Values within this distance of an integer are treated as that integer
/// before taking a ceiling.
const SNAP_SCALE: f64 = 1e9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireRequest {
    /// One-way distance from the panel to the endpoint.
    pub circuit_length_feet: f64,
    pub num_circuits: u32,
    pub waste_factor: f64,
}

impl WireRequest {
    #[must_use]
    pub const fn new(circuit_length_feet: f64) -> Self {
        Self {
            circuit_length_feet,
            num_circuits: 1,
            waste_factor: DEFAULT_WIRE_WASTE_FACTOR,
        }
    }

    #[must_use]
    pub const fn with_circuits(mut self, num_circuits: u32) -> Self {
        self.num_circuits = num_circuits;
        self
    }

    #[must_use]
    pub const fn with_waste_factor(mut self, waste_factor: f64) -> Self {
        self.waste_factor = waste_factor;
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WireEstimate {
    pub base_feet: f64,
    pub with_waste: f64,
    pub recommended_feet: u64,
    pub waste_factor: f64,
    pub note: String,
}

/// Wire runs out and back for every circuit, plus waste, bought in 25 ft steps.
#[must_use]
pub fn calculate_wire(request: &WireRequest) -> WireEstimate {
    let base_feet = request.circuit_length_feet * 2.0 * f64::from(request.num_circuits);
    let with_waste = base_feet * (1.0 + request.waste_factor);
    let recommended_feet = ceil_units(with_waste / as_f64(WIRE_SPOOL_INCREMENT_FEET))
        .saturating_mul(WIRE_SPOOL_INCREMENT_FEET);

    WireEstimate {
        base_feet,
        with_waste: round_to(with_waste, 2),
        recommended_feet,
        waste_factor: request.waste_factor,
        note: format!(
            "Buying {recommended_feet}ft gives you buffer for mistakes and future repairs"
        ),
    }
}

/// Room classes with distinct receptacle rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    Kitchen,
    Bathroom,
    General,
}

impl RoomType {
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "kitchen" => Self::Kitchen,
            "bathroom" => Self::Bathroom,
            _ => Self::General,
        }
    }

    #[must_use]
    pub const fn code_reference(self) -> &'static str {
        match self {
            Self::Kitchen => "NEC 210.52(C)(1)",
            Self::Bathroom => "NEC 210.52(D)",
            Self::General => "NEC 210.52(A)(1)",
        }
    }

    #[must_use]
    pub const fn guidance(self) -> &'static str {
        match self {
            Self::Kitchen => "Kitchen countertops require outlets every 4 feet maximum",
            Self::Bathroom => {
                "Bathroom requires at least one GFCI outlet, all must be GFCI protected"
            }
            Self::General => "Living spaces require outlets every 12 feet of wall space",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutletRequest {
    pub room_perimeter_feet: f64,
    pub room_type: String,
}

impl OutletRequest {
    #[must_use]
    pub fn new(room_perimeter_feet: f64, room_type: impl Into<String>) -> Self {
        Self {
            room_perimeter_feet,
            room_type: room_type.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutletEstimate {
    pub outlets_needed: u64,
    pub room_type: String,
    pub perimeter_feet: f64,
    pub code_reference: String,
    pub note: String,
}

/// Receptacle count per NEC 210.52 spacing rules.
#[must_use]
pub fn calculate_outlets(request: &OutletRequest) -> OutletEstimate {
    let room = RoomType::from_label(&request.room_type);
    let perimeter = request.room_perimeter_feet;
    let outlets_needed = match room {
        // Countertop assumed to be half the perimeter, one receptacle per 4 ft.
        RoomType::Kitchen => ceil_units(perimeter * 0.5 / 4.0),
        RoomType::Bathroom => ceil_units(perimeter / 12.0).max(1),
        RoomType::General => ceil_units(perimeter / 12.0),
    };

    OutletEstimate {
        outlets_needed,
        room_type: request.room_type.clone(),
        perimeter_feet: perimeter,
        code_reference: room.code_reference().to_string(),
        note: room.guidance().to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRequest {
    pub area_sq_ft: f64,
    pub tile_width_inches: f64,
    pub tile_height_inches: f64,
    pub waste_factor: f64,
}

impl TileRequest {
    #[must_use]
    pub const fn new(area_sq_ft: f64) -> Self {
        Self {
            area_sq_ft,
            tile_width_inches: DEFAULT_TILE_SIZE_INCHES,
            tile_height_inches: DEFAULT_TILE_SIZE_INCHES,
            waste_factor: DEFAULT_TILE_WASTE_FACTOR,
        }
    }

    #[must_use]
    pub const fn with_tile_size(mut self, width_inches: f64, height_inches: f64) -> Self {
        self.tile_width_inches = width_inches;
        self.tile_height_inches = height_inches;
        self
    }

    #[must_use]
    pub const fn with_waste_factor(mut self, waste_factor: f64) -> Self {
        self.waste_factor = waste_factor;
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TileEstimate {
    pub area_sq_ft: f64,
    pub tile_size: String,
    pub base_tiles: u64,
    pub tiles_needed: u64,
    pub cases_needed: u64,
    pub total_tiles: u64,
    pub total_coverage_sq_ft: f64,
    pub waste_factor: f64,
    pub note: String,
}

/// Tiles for an area plus waste, rounded up to whole cases of ten.
#[must_use]
pub fn calculate_tile(request: &TileRequest) -> TileEstimate {
    let tile_area_sq_ft = (request.tile_width_inches / 12.0) * (request.tile_height_inches / 12.0);
    let base_tiles = ceil_units(request.area_sq_ft / tile_area_sq_ft);
    let tiles_needed = ceil_units(as_f64(base_tiles) * (1.0 + request.waste_factor));
    let cases_needed = tiles_needed.div_ceil(TILES_PER_CASE);
    let total_tiles = cases_needed.saturating_mul(TILES_PER_CASE);
    let total_coverage_sq_ft = round_to(as_f64(total_tiles) * tile_area_sq_ft, 1);
    let extra_tiles = tiles_needed.saturating_sub(base_tiles);

    TileEstimate {
        area_sq_ft: request.area_sq_ft,
        tile_size: format!(
            "{}x{} inches",
            request.tile_width_inches, request.tile_height_inches
        ),
        base_tiles,
        tiles_needed,
        cases_needed,
        total_tiles,
        total_coverage_sq_ft,
        waste_factor: request.waste_factor,
        note: format!(
            "Ordering {cases_needed} cases gives you {extra_tiles} extra tiles for cuts and repairs"
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintRequest {
    pub area_sq_ft: f64,
    pub coats: u32,
    pub coverage_per_gallon: f64,
}

impl PaintRequest {
    #[must_use]
    pub const fn new(area_sq_ft: f64) -> Self {
        Self {
            area_sq_ft,
            coats: DEFAULT_PAINT_COATS,
            coverage_per_gallon: DEFAULT_PAINT_COVERAGE_SQ_FT,
        }
    }

    #[must_use]
    pub const fn with_coats(mut self, coats: u32) -> Self {
        self.coats = coats;
        self
    }

    #[must_use]
    pub const fn with_coverage(mut self, coverage_per_gallon: f64) -> Self {
        self.coverage_per_gallon = coverage_per_gallon;
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaintEstimate {
    pub area_sq_ft: f64,
    pub coats: u32,
    pub total_area_to_cover: f64,
    pub gallons_needed: f64,
    pub gallons_to_buy: u64,
    pub coverage_per_gallon: f64,
    pub note: String,
}

#[must_use]
pub fn calculate_paint(request: &PaintRequest) -> PaintEstimate {
    let total_area_to_cover = request.area_sq_ft * f64::from(request.coats);
    let gallons = total_area_to_cover / request.coverage_per_gallon;
    let gallons_to_buy = ceil_units(gallons);

    PaintEstimate {
        area_sq_ft: request.area_sq_ft,
        coats: request.coats,
        total_area_to_cover,
        gallons_needed: round_to(gallons, 2),
        gallons_to_buy,
        coverage_per_gallon: request.coverage_per_gallon,
        note: format!("Buy {gallons_to_buy} gallon(s) for {} coats", request.coats),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckRequest {
    pub deck_length_ft: f64,
    pub deck_width_ft: f64,
    pub joist_spacing_inches: f64,
    pub board_width_inches: f64,
}

impl DeckRequest {
    #[must_use]
    pub const fn new(deck_length_ft: f64, deck_width_ft: f64) -> Self {
        Self {
            deck_length_ft,
            deck_width_ft,
            joist_spacing_inches: DEFAULT_JOIST_SPACING_INCHES,
            board_width_inches: DEFAULT_BOARD_WIDTH_INCHES,
        }
    }

    #[must_use]
    pub const fn with_joist_spacing(mut self, joist_spacing_inches: f64) -> Self {
        self.joist_spacing_inches = joist_spacing_inches;
        self
    }

    #[must_use]
    pub const fn with_board_width(mut self, board_width_inches: f64) -> Self {
        self.board_width_inches = board_width_inches;
        self
    }
}

/// One line of a lumber take-off.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LumberItem {
    pub quantity: u64,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeckEstimate {
    pub deck_size: String,
    pub area_sq_ft: f64,
    pub joists: LumberItem,
    pub decking_boards: LumberItem,
    pub posts: LumberItem,
    pub note: String,
}

/// Framing and decking counts for a rectangular deck.
#[must_use]
pub fn calculate_deck_lumber(request: &DeckRequest) -> DeckEstimate {
    let length = request.deck_length_ft;
    let width = request.deck_width_ft;
    let span = ceil_units(width);

    let joists = ceil_units(width * 12.0 / request.joist_spacing_inches).saturating_add(1);
    let boards = ceil_units(length / (request.board_width_inches / 12.0));
    let posts = ceil_units(length / POST_SPACING_FEET)
        .saturating_mul(ceil_units(width / POST_SPACING_FEET));

    DeckEstimate {
        deck_size: format!("{length}x{width} feet"),
        area_sq_ft: length * width,
        joists: LumberItem {
            quantity: joists,
            size: format!("2x8x{span} (or 2x10 for larger spans)"),
            spacing: Some(format!("{} inches on center", request.joist_spacing_inches)),
            note: None,
        },
        decking_boards: LumberItem {
            quantity: boards,
            size: format!("2x6x{span} or 5/4x6 composite"),
            spacing: None,
            note: Some("Add 10% for cuts and waste".to_string()),
        },
        posts: LumberItem {
            quantity: posts,
            size: "4x4x10 or 4x4x12 depending on height".to_string(),
            spacing: None,
            note: Some("Actual quantity depends on height and local code".to_string()),
        },
        note: "This is a basic estimate. Consult building codes for beam sizes and post spacing based on deck height.".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PexRequest {
    pub num_fixtures: u32,
    pub avg_distance_per_fixture: f64,
    /// Home-run manifold when true, trunk-and-branch otherwise.
    pub manifold_system: bool,
}

impl PexRequest {
    #[must_use]
    pub const fn new(num_fixtures: u32) -> Self {
        Self {
            num_fixtures,
            avg_distance_per_fixture: DEFAULT_PEX_RUN_FEET,
            manifold_system: true,
        }
    }

    #[must_use]
    pub const fn with_distance(mut self, avg_distance_per_fixture: f64) -> Self {
        self.avg_distance_per_fixture = avg_distance_per_fixture;
        self
    }

    #[must_use]
    pub const fn with_manifold(mut self, manifold_system: bool) -> Self {
        self.manifold_system = manifold_system;
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PipeRun {
    pub feet_needed: u64,
    pub feet_to_buy: u64,
    pub size: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PexEstimate {
    pub system_type: String,
    pub fixtures: u32,
    pub hot_water_pipe: PipeRun,
    pub cold_water_pipe: PipeRun,
    pub note: String,
}

/// Hot and cold PEX lengths, rounded up to retail coil sizes.
#[must_use]
pub fn calculate_pex_pipe(request: &PexRequest) -> PexEstimate {
    let fixtures = f64::from(request.num_fixtures);
    let distance = request.avg_distance_per_fixture;

    let (hot_feet, cold_feet) = if request.manifold_system {
        let hot_fixtures = ceil_units(fixtures * PEX_HOT_SHARE);
        (as_f64(hot_fixtures) * distance, fixtures * distance)
    } else {
        (
            fixtures * PEX_HOT_SHARE * distance * PEX_TRUNK_FACTOR,
            fixtures * distance * PEX_TRUNK_FACTOR,
        )
    };

    let hot_needed = ceil_units(hot_feet * PEX_WASTE_MULTIPLIER);
    let cold_needed = ceil_units(cold_feet * PEX_WASTE_MULTIPLIER);

    PexEstimate {
        system_type: if request.manifold_system {
            "Manifold (home-run)".to_string()
        } else {
            "Trunk-and-branch".to_string()
        },
        fixtures: request.num_fixtures,
        hot_water_pipe: pipe_run(hot_needed, "Red"),
        cold_water_pipe: pipe_run(cold_needed, "Blue"),
        note: "Also budget for manifold, fittings, and crimp rings. Consider 3/4 inch for main lines.".to_string(),
    }
}

fn pipe_run(feet_needed: u64, color: &str) -> PipeRun {
    PipeRun {
        feet_needed,
        feet_to_buy: round_to_coil(feet_needed),
        size: "1/2 inch PEX".to_string(),
        color: color.to_string(),
    }
}

/// PEX is sold in 100 ft and 300 ft coils.
#[must_use]
pub const fn round_to_coil(feet: u64) -> u64 {
    if feet <= 100 {
        100
    } else if feet <= 300 {
        300
    } else {
        feet.div_ceil(300).saturating_mul(300)
    }
}

fn snap(value: f64) -> f64 {
    (value * SNAP_SCALE).round() / SNAP_SCALE
}

/// Ceiling as a whole count. Negative and NaN inputs clamp to zero and
/// values past `u64::MAX` saturate. Counts derived from it saturate too.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ceil_units(value: f64) -> u64 {
    snap(value).ceil().max(0.0) as u64
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(value: u64) -> f64 {
    value as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_single_circuit() {
        let estimate = calculate_wire(&WireRequest::new(50.0));

        assert!((estimate.base_feet - 100.0).abs() < f64::EPSILON);
        assert!((estimate.with_waste - 115.0).abs() < f64::EPSILON);
        assert_eq!(estimate.recommended_feet, 125);
        assert_eq!(
            estimate.note,
            "Buying 125ft gives you buffer for mistakes and future repairs"
        );
    }

    #[test]
    fn wire_exact_spool_multiple_does_not_round_up() {
        let estimate = calculate_wire(&WireRequest::new(50.0).with_waste_factor(0.0));
        assert_eq!(estimate.recommended_feet, 100);

        let two = calculate_wire(&WireRequest::new(50.0).with_circuits(2));
        assert!((two.with_waste - 230.0).abs() < f64::EPSILON);
        assert_eq!(two.recommended_feet, 250);
    }

    #[test]
    fn wire_just_over_a_spool_multiple_buys_the_next_spool() {
        let estimate = calculate_wire(&WireRequest::new(50.0).with_waste_factor(0.00004));
        assert!((estimate.with_waste - 100.0).abs() < f64::EPSILON);
        assert_eq!(estimate.recommended_feet, 125);

        let estimate = calculate_wire(&WireRequest::new(43.479));
        assert!((estimate.with_waste - 100.0).abs() < f64::EPSILON);
        assert_eq!(estimate.recommended_feet, 125);
    }

    #[test]
    fn kitchen_outlets() {
        let estimate = calculate_outlets(&OutletRequest::new(48.0, "kitchen"));

        assert_eq!(estimate.outlets_needed, 6);
        assert_eq!(estimate.code_reference, "NEC 210.52(C)(1)");
        assert_eq!(estimate.note, "Kitchen countertops require outlets every 4 feet maximum");
    }

    #[test]
    fn bathroom_needs_at_least_one_outlet() {
        let small = calculate_outlets(&OutletRequest::new(0.0, "bathroom"));
        assert_eq!(small.outlets_needed, 1);
        assert_eq!(small.code_reference, "NEC 210.52(D)");

        let large = calculate_outlets(&OutletRequest::new(30.0, "bathroom"));
        assert_eq!(large.outlets_needed, 3);
    }

    #[test]
    fn room_labels_ignore_case_and_padding() {
        assert_eq!(RoomType::from_label("Kitchen"), RoomType::Kitchen);
        assert_eq!(RoomType::from_label(" BATHROOM "), RoomType::Bathroom);
        assert_eq!(RoomType::from_label("garage"), RoomType::General);
    }

    #[test]
    fn other_rooms_use_twelve_foot_rule() {
        let living = calculate_outlets(&OutletRequest::new(60.0, "living"));
        assert_eq!(living.outlets_needed, 5);
        assert_eq!(living.code_reference, "NEC 210.52(A)(1)");

        let garage = calculate_outlets(&OutletRequest::new(61.0, "garage"));
        assert_eq!(garage.outlets_needed, 6);
        assert_eq!(garage.room_type, "garage");
    }

    #[test]
    fn tile_twelve_inch_floor() {
        let estimate = calculate_tile(&TileRequest::new(120.0));

        assert_eq!(estimate.base_tiles, 120);
        assert_eq!(estimate.tiles_needed, 132);
        assert_eq!(estimate.cases_needed, 14);
        assert_eq!(estimate.total_tiles, 140);
        assert!((estimate.total_coverage_sq_ft - 140.0).abs() < f64::EPSILON);
        assert_eq!(estimate.tile_size, "12x12 inches");
        assert_eq!(
            estimate.note,
            "Ordering 14 cases gives you 12 extra tiles for cuts and repairs"
        );
    }

    #[test]
    fn tile_large_format() {
        let estimate = calculate_tile(&TileRequest::new(50.0).with_tile_size(24.0, 12.0));

        assert_eq!(estimate.base_tiles, 25);
        assert_eq!(estimate.tiles_needed, 28);
        assert_eq!(estimate.cases_needed, 3);
        assert_eq!(estimate.total_tiles, 30);
        assert!((estimate.total_coverage_sq_ft - 60.0).abs() < f64::EPSILON);
        assert_eq!(estimate.tile_size, "24x12 inches");
    }

    #[test]
    fn paint_two_coats() {
        let estimate = calculate_paint(&PaintRequest::new(400.0));

        assert!((estimate.total_area_to_cover - 800.0).abs() < f64::EPSILON);
        assert!((estimate.gallons_needed - 2.29).abs() < f64::EPSILON);
        assert_eq!(estimate.gallons_to_buy, 3);
        assert_eq!(estimate.note, "Buy 3 gallon(s) for 2 coats");
    }

    #[test]
    fn paint_exact_gallons() {
        let estimate = calculate_paint(&PaintRequest::new(350.0).with_coats(1));
        assert_eq!(estimate.gallons_to_buy, 1);
    }

    #[test]
    fn deck_twelve_by_ten() {
        let estimate = calculate_deck_lumber(&DeckRequest::new(12.0, 10.0));

        assert_eq!(estimate.deck_size, "12x10 feet");
        assert_eq!(estimate.joists.quantity, 9);
        assert_eq!(estimate.joists.size, "2x8x10 (or 2x10 for larger spans)");
        assert_eq!(estimate.joists.spacing.as_deref(), Some("16 inches on center"));
        assert_eq!(estimate.decking_boards.quantity, 27);
        assert_eq!(estimate.posts.quantity, 4);
    }

    #[test]
    fn pex_manifold_eight_fixtures() {
        let estimate = calculate_pex_pipe(&PexRequest::new(8));

        assert_eq!(estimate.system_type, "Manifold (home-run)");
        assert_eq!(estimate.hot_water_pipe.feet_needed, 180);
        assert_eq!(estimate.hot_water_pipe.feet_to_buy, 300);
        assert_eq!(estimate.cold_water_pipe.feet_needed, 288);
        assert_eq!(estimate.cold_water_pipe.feet_to_buy, 300);
        assert_eq!(estimate.hot_water_pipe.color, "Red");
        assert_eq!(estimate.cold_water_pipe.color, "Blue");
    }

    #[test]
    fn pex_trunk_and_branch() {
        let estimate = calculate_pex_pipe(&PexRequest::new(8).with_manifold(false));

        assert_eq!(estimate.system_type, "Trunk-and-branch");
        assert_eq!(estimate.hot_water_pipe.feet_needed, 121);
        assert_eq!(estimate.cold_water_pipe.feet_needed, 202);
    }

    #[test]
    fn coil_sizes() {
        assert_eq!(round_to_coil(0), 100);
        assert_eq!(round_to_coil(100), 100);
        assert_eq!(round_to_coil(101), 300);
        assert_eq!(round_to_coil(300), 300);
        assert_eq!(round_to_coil(301), 600);
        assert_eq!(round_to_coil(900), 900);
    }

    #[test]
    fn huge_inputs_saturate_instead_of_overflowing() {
        let wire = calculate_wire(&WireRequest::new(1e300));
        assert_eq!(wire.recommended_feet, u64::MAX);

        let tile = calculate_tile(&TileRequest::new(1e300));
        assert_eq!(tile.total_tiles, u64::MAX);

        let deck = calculate_deck_lumber(&DeckRequest::new(1e12, 1e12));
        assert_eq!(deck.posts.quantity, u64::MAX);

        let deck = calculate_deck_lumber(&DeckRequest::new(10.0, 1e300));
        assert_eq!(deck.joists.quantity, u64::MAX);

        assert_eq!(round_to_coil(u64::MAX), u64::MAX);
    }

    #[test]
    fn calculators_are_deterministic() {
        let render = || {
            vec![
                serde_json::to_string(&calculate_wire(&WireRequest::new(37.5).with_circuits(3)))
                    .expect("serialize"),
                serde_json::to_string(&calculate_tile(&TileRequest::new(87.3))).expect("serialize"),
                serde_json::to_string(&calculate_deck_lumber(&DeckRequest::new(16.0, 12.0)))
                    .expect("serialize"),
                serde_json::to_string(&calculate_pex_pipe(&PexRequest::new(5).with_distance(42.0)))
                    .expect("serialize"),
            ]
        };

        assert_eq!(render(), render());
    }

    #[test]
    fn estimates_serialize_in_declaration_order() {
        let value = serde_json::to_value(calculate_outlets(&OutletRequest::new(48.0, "kitchen")))
            .expect("serialize");
        let keys: Vec<_> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(
            keys,
            vec!["outlets_needed", "room_type", "perimeter_feet", "code_reference", "note"]
        );
    }
}
