use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MathError;

/// A principal rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Axis sequence for Euler angles. The first letter is applied first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationOrder {
    #[default]
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl RotationOrder {
    pub const ALL: [RotationOrder; 6] = [
        Self::Xyz,
        Self::Xzy,
        Self::Yxz,
        Self::Yzx,
        Self::Zxy,
        Self::Zyx,
    ];

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Xyz => "xyz",
            Self::Xzy => "xzy",
            Self::Yxz => "yxz",
            Self::Yzx => "yzx",
            Self::Zxy => "zxy",
            Self::Zyx => "zyx",
        }
    }

    /// Axes in application order.
    pub fn axes(&self) -> [Axis; 3] {
        use Axis::*;
        match self {
            Self::Xyz => [X, Y, Z],
            Self::Xzy => [X, Z, Y],
            Self::Yxz => [Y, X, Z],
            Self::Yzx => [Y, Z, X],
            Self::Zxy => [Z, X, Y],
            Self::Zyx => [Z, Y, X],
        }
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RotationOrder {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MathError::UnknownRotationOrder {
                order: s.to_string(),
            })
    }
}

/// One factor of a composed transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Scale,
    Rotate,
    Translate,
}

/// Sequence in which scale, rotate and translate are applied. The first
/// letter is applied first, so `srt` composes to `T * R * S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformOrder {
    #[default]
    Srt,
    Str,
    Rst,
    Rts,
    Tsr,
    Trs,
}

impl TransformOrder {
    pub const ALL: [TransformOrder; 6] = [
        Self::Srt,
        Self::Str,
        Self::Rst,
        Self::Rts,
        Self::Tsr,
        Self::Trs,
    ];

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Str => "str",
            Self::Rst => "rst",
            Self::Rts => "rts",
            Self::Tsr => "tsr",
            Self::Trs => "trs",
        }
    }

    /// Components in application order.
    pub fn components(&self) -> [Component; 3] {
        use Component::*;
        match self {
            Self::Srt => [Scale, Rotate, Translate],
            Self::Str => [Scale, Translate, Rotate],
            Self::Rst => [Rotate, Scale, Translate],
            Self::Rts => [Rotate, Translate, Scale],
            Self::Tsr => [Translate, Scale, Rotate],
            Self::Trs => [Translate, Rotate, Scale],
        }
    }

    /// True when scale is applied before rotation, i.e. the upper-left
    /// 3x3 block of the composed matrix is `R * S` and scale lives in the
    /// column lengths. Otherwise the block is `S * R` and scale lives in
    /// the row lengths.
    pub fn scales_columns(&self) -> bool {
        matches!(self, Self::Srt | Self::Str | Self::Tsr)
    }
}

impl fmt::Display for TransformOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformOrder {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MathError::UnknownTransformOrder {
                order: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_orders() {
        assert_eq!("zxy".parse::<RotationOrder>().unwrap(), RotationOrder::Zxy);
        assert_eq!("TRS".parse::<TransformOrder>().unwrap(), TransformOrder::Trs);
        assert!(matches!(
            "xxy".parse::<RotationOrder>(),
            Err(MathError::UnknownRotationOrder { .. })
        ));
        assert!(matches!(
            "sst".parse::<TransformOrder>(),
            Err(MathError::UnknownTransformOrder { .. })
        ));
    }

    #[test]
    fn test_display_matches_name() {
        for order in RotationOrder::ALL {
            assert_eq!(order.to_string().parse::<RotationOrder>().unwrap(), order);
        }
        for order in TransformOrder::ALL {
            assert_eq!(order.to_string(), order.name());
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&TransformOrder::Tsr).unwrap();
        assert_eq!(json, "\"tsr\"");
        let order: RotationOrder = serde_json::from_str("\"yzx\"").unwrap();
        assert_eq!(order, RotationOrder::Yzx);
    }

    #[test]
    fn test_scale_family() {
        let columns: Vec<_> = TransformOrder::ALL
            .into_iter()
            .filter(|o| o.scales_columns())
            .map(|o| o.name())
            .collect();
        assert_eq!(columns, vec!["srt", "str", "tsr"]);
    }
}
