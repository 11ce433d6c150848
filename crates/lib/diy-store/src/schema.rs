pub const DEFAULT_JURISDICTION: &str = "National";
pub const FALLBACK_CATEGORY: &str = "general";
pub const DEFAULT_CURRENCY: &str = "USD";

pub const CATEGORY_SAMPLE_LIMIT: usize = 3;

pub const PRODUCT_CATEGORY_ELECTRICAL: &str = "electrical";

pub const SPEC_VOLTAGE: &str = "voltage";
pub const SPEC_AMPERAGE: &str = "amperage";
