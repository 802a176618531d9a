/// Default config file name (looked up in the working directory)
pub const CONFIG_FILE: &str = "pagecite.json";

/// Fallback page width in points (US Letter)
pub const FALLBACK_PAGE_WIDTH: f64 = 612.0;

/// Fallback page height in points (US Letter)
pub const FALLBACK_PAGE_HEIGHT: f64 = 792.0;

/// Relative offsets below this fall in the bottom/left band
pub const LOWER_BAND_THRESHOLD: f64 = 0.33;

/// Relative offsets above this fall in the top/right band
pub const UPPER_BAND_THRESHOLD: f64 = 0.67;

/// Default hosted search service name
pub const DEFAULT_SEARCH_SERVICE: &str = "protocol_search";

/// Default number of search results to request
pub const DEFAULT_SEARCH_RESULTS: usize = 5;

/// Upper bound on search results per request
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Default completion model for answer synthesis
pub const DEFAULT_LLM_MODEL: &str = "claude-4-sonnet";

/// Excerpt length for result cards (chars)
pub const CARD_EXCERPT_CHARS: usize = 300;

/// Excerpt length for prompt source citations (chars)
pub const CITATION_EXCERPT_CHARS: usize = 200;
