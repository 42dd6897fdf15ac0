// ── CIGAM Engine ───────────────────────────────────────────────────────────
// Leaf-first: params → http → client → tools → mcp.

pub mod client;
pub mod dates;
pub mod http;
pub mod mcp;
pub mod params;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_support;
