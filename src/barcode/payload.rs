//! SKU to Code 128 payload mapping
//!
//! Automatic code-set selection packs long digit runs into code set C.
//! Scanners in the warehouse read `999.` SKUs wrong when packed that way,
//! so those SKUs carry two extra leading nines on the wire. The renderer
//! keeps automatic selection; this prefix is the only compensation.

/// SKU prefix that triggers the payload rewrite
pub const SPECIAL_PREFIX: &str = "999.";

/// Digits prepended to SKUs starting with [`SPECIAL_PREFIX`]
const EXTRA_LEADING: &str = "99";

/// Map a raw SKU to the exact string handed to the Code 128 encoder
pub fn encode(raw_sku: &str) -> String {
    let trimmed = raw_sku.trim();
    if trimmed.starts_with(SPECIAL_PREFIX) {
        format!("{EXTRA_LEADING}{trimmed}")
    } else {
        trimmed.to_string()
    }
}
