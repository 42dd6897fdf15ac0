// ── CIGAM Atoms: Constants ─────────────────────────────────────────────────

/// Environment variable holding the ERP base address.
pub const ENV_BASE_URL: &str = "CIGAM_BASE_URL";

/// Environment variable holding the shared secret (PIN).
pub const ENV_PIN: &str = "CIGAM_PIN";

/// Query parameter that carries the shared secret on every request.
pub const PIN_PARAM: &str = "pin";

/// Per-request timeout applied by the transport (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Page size used when the caller does not supply a usable `limit`.
/// Limits go out as whole numbers: a fractional `limit` is truncated
/// (`7.9` → `7`), and anything below 1 falls back to this value.
pub const DEFAULT_LIMIT: u64 = 100;

/// Unit of measure applied to requisition items without one.
pub const DEFAULT_UNIT: &str = "UN";

/// Priority applied to requisitions without one.
pub const DEFAULT_PRIORITY: &str = "medium";

/// Prefix for relative custom-query service names.
pub const API_PREFIX: &str = "/api/v1";

// ── Protocol ───────────────────────────────────────────────────────────────

/// Server name advertised during `initialize`.
pub const SERVER_NAME: &str = "cigam-mcp";

/// MCP protocol version used when the client does not request one.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
