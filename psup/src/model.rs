//!
//! Printer MIB definitions
//!
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// prtGeneralPrinterName (RFC 3805), administratively assigned model name
pub const PRT_GENERAL_PRINTER_NAME: &str = "1.3.6.1.2.1.43.5.1.1.16.1";

/// prtGeneralSerialNumber (RFC 3805)
pub const PRT_GENERAL_SERIAL_NUMBER: &str = "1.3.6.1.2.1.43.5.1.1.17.1";

/// prtMarkerColorantValue table (RFC 3805), colorant names such as "black"
pub const PRT_MARKER_COLORANT_VALUE: &str = "1.3.6.1.2.1.43.12.1.1.4.1";

/// prtMarkerSuppliesLevel table (RFC 3805), remaining level per supply
pub const PRT_MARKER_SUPPLIES_LEVEL: &str = "1.3.6.1.2.1.43.11.1.1.9.1";

/// prtMarkerSuppliesLevel sentinel: the supply reports some other condition
pub const LEVEL_OTHER: i64 = -1;

/// prtMarkerSuppliesLevel sentinel: the remaining level is unknown
pub const LEVEL_UNKNOWN: i64 = -2;

/// prtMarkerSuppliesLevel sentinel: at least one unit remaining
pub const LEVEL_SOME_REMAINING: i64 = -3;

/// Acquisition stages, used to tag which read failed
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    SerialNumber,
    ModelName,
    SupplyNames,
    SupplyLevels,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Stage::SerialNumber => "serial number",
            Stage::ModelName => "model name",
            Stage::SupplyNames => "supply names",
            Stage::SupplyLevels => "supply levels",
        };
        f.write_str(name)
    }
}
