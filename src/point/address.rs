//! Point address assembly

use super::classify::PointKind;
use super::slot_path::path_to_addr_suffix;
use crate::core::error::{Error, Result};

/// Address of a point relative to its source: `<prefix>.<suffix>`.
///
/// Both paths are raw slot paths; the point must live strictly below the
/// source. The root's path (`slot:/`) already ends in the separator.
pub fn point_addr(kind: PointKind, source_slot_path: &str, point_slot_path: &str) -> Result<String> {
    let relative = point_slot_path
        .strip_prefix(source_slot_path.trim_end_matches('/'))
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
        .ok_or_else(|| Error::Addressing {
            node: point_slot_path.to_string(),
            message: format!("not below source {}", source_slot_path),
        })?;

    Ok(format!("{}.{}", kind.prefix(), path_to_addr_suffix(relative)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addr_under_device() {
        let addr = point_addr(
            PointKind::AnalogInput,
            "slot:/Drivers/Bacnet/AHU$201",
            "slot:/Drivers/Bacnet/AHU$201/points/Supply$20Temp",
        )
        .unwrap();
        assert_eq!(addr, "ai.points.SupplyTemp");
    }

    #[test]
    fn test_addr_prefix_per_kind() {
        let addr = point_addr(PointKind::BinaryOutput, "slot:/Logic", "slot:/Logic/FanCmd").unwrap();
        assert_eq!(addr, "bv.FanCmd");

        let addr =
            point_addr(PointKind::MultiStateOutput, "slot:/Logic", "slot:/Logic/Mode").unwrap();
        assert_eq!(addr, "ev.Mode");
    }

    #[test]
    fn test_addr_under_root() {
        let addr = point_addr(PointKind::AnalogInput, "slot:/", "slot:/OutdoorTemp").unwrap();
        assert_eq!(addr, "ai.OutdoorTemp");
        assert!(point_addr(PointKind::AnalogInput, "slot:/", "slot:/").is_err());
    }

    #[test]
    fn test_addr_requires_containment() {
        assert!(matches!(
            point_addr(PointKind::AnalogInput, "slot:/A", "slot:/B/x"),
            Err(Error::Addressing { .. })
        ));
        // Sibling sharing a name prefix is not contained
        assert!(point_addr(PointKind::AnalogInput, "slot:/A", "slot:/AB/x").is_err());
        assert!(point_addr(PointKind::AnalogInput, "slot:/A", "slot:/A").is_err());
    }
}
