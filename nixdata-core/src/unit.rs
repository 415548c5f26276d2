//! SI prefixed unit strings. A unit is a prefix symbol followed by a base
//! symbol, e.g. `"ms"`, `"uV"`, `"kHz"`. Scaling between two units is only
//! defined when both share the same base symbol.

use thiserror::Error;

/// sentinel for "no unit"
pub const NONE_UNIT: &str = "none";

/// true when the string denotes "no unit": empty or the `"none"` sentinel
pub fn is_none(unit: &str) -> bool {
    unit.is_empty() || unit == NONE_UNIT
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("units `{from}` and `{to}` denote different quantities and cannot be scaled")]
    Incompatible { from: String, to: String },
}

/// decimal exponent of every SI prefix; the two-character prefix comes first
/// so it wins over its one-character head
const PREFIXES: [(&str, i32); 21] = [
    ("da", 1),
    ("y", -24),
    ("z", -21),
    ("a", -18),
    ("f", -15),
    ("p", -12),
    ("n", -9),
    ("µ", -6),
    ("u", -6),
    ("m", -3),
    ("c", -2),
    ("d", -1),
    ("h", 2),
    ("k", 3),
    ("M", 6),
    ("G", 9),
    ("T", 12),
    ("P", 15),
    ("E", 18),
    ("Z", 21),
    ("Y", 24),
];

/// splits a unit into its decimal exponent and base symbol; a prefix is only
/// stripped when a non-empty base remains, so `"m"` stays the plain meter
fn split(unit: &str) -> (i32, &str) {
    for (prefix, exponent) in PREFIXES {
        if let Some(base) = unit.strip_prefix(prefix) {
            if !base.is_empty() {
                return (exponent, base);
            }
        }
    }
    (0, unit)
}

/// multiplicative factor such that a value in `from` times the factor equals
/// the same physical quantity expressed in `to`
pub fn scaling(from: &str, to: &str) -> Result<f64, UnitError> {
    let (from_exp, from_base) = split(from);
    let (to_exp, to_base) = split(to);
    if from_base.is_empty() || from_base != to_base {
        return Err(UnitError::Incompatible {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    Ok(10f64.powi(from_exp - to_exp))
}
