//! Coercion helpers between AttrValue variants and host attribute kinds.

use crate::{AttrValue, HostAttrKind};

/// Coerce a value into the representation stored by an attribute of `kind`.
///
/// Rules:
/// - Double accepts anything numeric (bool -> 0/1, enum -> index)
/// - Long / Bool / Enum reject doubles with a fractional part
/// - Enum additionally rejects negative values
///
/// Returns `None` when the value cannot be represented.
pub fn coerce_to_kind(value: AttrValue, kind: HostAttrKind) -> Option<AttrValue> {
    match kind {
        HostAttrKind::Double => Some(AttrValue::Double(value.as_f64())),
        HostAttrKind::Long => to_integral(value).map(AttrValue::Long),
        HostAttrKind::Bool => match value {
            AttrValue::Bool(b) => Some(AttrValue::Bool(b)),
            other => to_integral(other).map(|i| AttrValue::Bool(i != 0)),
        },
        HostAttrKind::Enum => to_integral(value)
            .and_then(|i| u32::try_from(i).ok())
            .map(AttrValue::Enum),
    }
}

/// Integral view of a value; `None` for doubles with decimals.
pub fn to_integral(value: AttrValue) -> Option<i64> {
    match value {
        AttrValue::Double(v) => {
            if v.is_finite() && v.fract() == 0.0 {
                Some(v as i64)
            } else {
                None
            }
        }
        AttrValue::Long(v) => Some(v),
        AttrValue::Bool(b) => Some(i64::from(b)),
        AttrValue::Enum(i) => Some(i64::from(i)),
    }
}

/// Boolean view of a discrete value (non-zero is true).
pub fn to_bool(value: AttrValue) -> bool {
    match value {
        AttrValue::Bool(b) => b,
        other => other.as_f64() != 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_accepts_everything_numeric() {
        assert_eq!(
            coerce_to_kind(AttrValue::Bool(true), HostAttrKind::Double),
            Some(AttrValue::Double(1.0))
        );
        assert_eq!(
            coerce_to_kind(AttrValue::Long(3), HostAttrKind::Double),
            Some(AttrValue::Double(3.0))
        );
    }

    #[test]
    fn discrete_kinds_reject_decimals() {
        assert_eq!(coerce_to_kind(AttrValue::Double(0.5), HostAttrKind::Long), None);
        assert_eq!(coerce_to_kind(AttrValue::Double(1.5), HostAttrKind::Enum), None);
        assert_eq!(
            coerce_to_kind(AttrValue::Double(2.0), HostAttrKind::Long),
            Some(AttrValue::Long(2))
        );
    }

    #[test]
    fn enum_rejects_negative_index() {
        assert_eq!(coerce_to_kind(AttrValue::Long(-1), HostAttrKind::Enum), None);
    }

    #[test]
    fn bool_from_discrete() {
        assert!(to_bool(AttrValue::Long(1)));
        assert!(!to_bool(AttrValue::Double(0.0)));
        assert_eq!(
            coerce_to_kind(AttrValue::Long(0), HostAttrKind::Bool),
            Some(AttrValue::Bool(false))
        );
    }
}
