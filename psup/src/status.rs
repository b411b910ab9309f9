//!
//! Printer supply status assembly
//!
use std::collections::BTreeMap;

use log::{debug, warn};
use snmp2::Oid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    client::{parse_oid, SnmpClient},
    error::{ReadError, SupplyError},
    model::{
        Stage, PRT_GENERAL_PRINTER_NAME, PRT_GENERAL_SERIAL_NUMBER, PRT_MARKER_COLORANT_VALUE,
        PRT_MARKER_SUPPLIES_LEVEL,
    },
    value::RawValue,
};

/// Name the waste toner receptacle reports itself under. It always reads
/// 100% and carries no information, so it is dropped from the result.
const WASTE_SUPPLY_NAME: &str = "other";

/// Assembled status of one printer
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrinterStatus {
    /// Administratively assigned model name
    pub model_name: String,
    /// Device serial number
    pub serial_number: String,
    /// Supply level percentage by colorant name. Negative levels are the
    /// Printer MIB sentinels for unknown or unreported values.
    pub supplies: BTreeMap<String, i64>,
}

impl Default for PrinterStatus {
    fn default() -> Self {
        PrinterStatus {
            model_name: "N/A".to_owned(),
            serial_number: "N/A".to_owned(),
            supplies: BTreeMap::new(),
        }
    }
}

/// Read operations the assembler needs from a session
pub(crate) trait SupplySource {
    fn get(&mut self, oid: &Oid<'_>) -> Result<RawValue, ReadError>;
    fn walk(&mut self, root: &Oid<'_>) -> Result<Vec<RawValue>, ReadError>;
}

impl SupplySource for SnmpClient {
    fn get(&mut self, oid: &Oid<'_>) -> Result<RawValue, ReadError> {
        SnmpClient::get(self, oid)
    }

    fn walk(&mut self, root: &Oid<'_>) -> Result<Vec<RawValue>, ReadError> {
        SnmpClient::walk(self, root)
    }
}

/// Query one device and assemble its status.
///
/// The four reads run in a fixed order: serial number, model name, supply
/// names, supply levels. The first failure aborts the whole acquisition and
/// reports the stage that failed; there is no per-field skipping.
pub fn fetch_status(client: &mut SnmpClient) -> Result<PrinterStatus, SupplyError> {
    collect_status(client)
}

fn collect_status<S: SupplySource>(source: &mut S) -> Result<PrinterStatus, SupplyError> {
    let serial_number = read_text(source, Stage::SerialNumber, PRT_GENERAL_SERIAL_NUMBER)?;
    let model_name = read_text(source, Stage::ModelName, PRT_GENERAL_PRINTER_NAME)?;

    let names = walk_table(source, Stage::SupplyNames, PRT_MARKER_COLORANT_VALUE, RawValue::into_text)?;
    let levels = walk_table(
        source,
        Stage::SupplyLevels,
        PRT_MARKER_SUPPLIES_LEVEL,
        RawValue::into_integer,
    )?;

    debug!("device reported {} supplies", names.len());

    Ok(PrinterStatus {
        model_name,
        serial_number,
        supplies: merge_supplies(names, levels),
    })
}

fn read_text<S: SupplySource>(source: &mut S, stage: Stage, oid: &str) -> Result<String, SupplyError> {
    let oid = parse_oid(oid).map_err(|e| SupplyError::Read { stage, source: e })?;
    source
        .get(&oid)
        .and_then(RawValue::into_text)
        .map_err(|e| SupplyError::Read { stage, source: e })
}

fn walk_table<S, T, F>(source: &mut S, stage: Stage, oid: &str, coerce: F) -> Result<Vec<T>, SupplyError>
where
    S: SupplySource,
    F: Fn(RawValue) -> Result<T, ReadError>,
{
    let oid = parse_oid(oid).map_err(|e| SupplyError::Read { stage, source: e })?;
    source
        .walk(&oid)
        .and_then(|rows| rows.into_iter().map(&coerce).collect())
        .map_err(|e| SupplyError::Read { stage, source: e })
}

/// Pair the i-th name with the i-th level and drop the waste receptacle.
///
/// The two tables are walked independently and are expected to have equal
/// length; a mismatch truncates to the shorter side.
fn merge_supplies(names: Vec<String>, levels: Vec<i64>) -> BTreeMap<String, i64> {
    if names.len() != levels.len() {
        warn!(
            "supply tables disagree: {} names vs {} levels, extra entries dropped",
            names.len(),
            levels.len()
        );
    }

    let mut supplies: BTreeMap<String, i64> = names.into_iter().zip(levels).collect();
    supplies.remove(WASTE_SUPPLY_NAME);
    supplies
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted device: each read slot holds at most one reply, `None`
    /// injects a failure. Performed reads are recorded for ordering checks.
    struct FakeDevice {
        serial: Option<RawValue>,
        model: Option<RawValue>,
        names: Option<Vec<RawValue>>,
        levels: Option<Vec<RawValue>>,
        reads: Vec<String>,
    }

    impl FakeDevice {
        fn new() -> Self {
            FakeDevice {
                serial: Some(RawValue::Text("C123P000001".to_owned())),
                model: Some(RawValue::Text("MP C307".to_owned())),
                names: Some(
                    ["black", "cyan", "magenta", "yellow", "other"]
                        .iter()
                        .map(|n| RawValue::Text(n.to_string()))
                        .collect(),
                ),
                levels: Some([10, 30, 40, 20, 100].iter().map(|n| RawValue::Integer(*n)).collect()),
                reads: Vec::new(),
            }
        }
    }

    impl SupplySource for FakeDevice {
        fn get(&mut self, oid: &Oid<'_>) -> Result<RawValue, ReadError> {
            let oid = oid.to_string();
            self.reads.push(oid.clone());

            let slot = if oid == PRT_GENERAL_SERIAL_NUMBER {
                &mut self.serial
            } else {
                &mut self.model
            };
            slot.take().ok_or(ReadError::EmptyResponse)
        }

        fn walk(&mut self, root: &Oid<'_>) -> Result<Vec<RawValue>, ReadError> {
            let oid = root.to_string();
            self.reads.push(oid.clone());

            let slot = if oid == PRT_MARKER_COLORANT_VALUE {
                &mut self.names
            } else {
                &mut self.levels
            };
            slot.take().ok_or(ReadError::EmptyResponse)
        }
    }

    fn levels_of(pairs: &[(&str, i64)]) -> BTreeMap<String, i64> {
        pairs.iter().map(|(n, l)| (n.to_string(), *l)).collect()
    }

    #[test]
    fn test_collect_status() {
        let mut device = FakeDevice::new();
        let status = collect_status(&mut device).unwrap();

        assert_eq!(status.model_name, "MP C307");
        assert_eq!(status.serial_number, "C123P000001");
        assert_eq!(
            status.supplies,
            levels_of(&[("black", 10), ("cyan", 30), ("magenta", 40), ("yellow", 20)])
        );
    }

    #[test]
    fn test_reads_are_ordered() {
        let mut device = FakeDevice::new();
        collect_status(&mut device).unwrap();

        assert_eq!(
            device.reads,
            vec![
                PRT_GENERAL_SERIAL_NUMBER,
                PRT_GENERAL_PRINTER_NAME,
                PRT_MARKER_COLORANT_VALUE,
                PRT_MARKER_SUPPLIES_LEVEL,
            ]
        );
    }

    #[test]
    fn test_first_failure_aborts() {
        let mut device = FakeDevice::new();
        device.serial = None;

        let err = collect_status(&mut device).unwrap_err();
        assert!(matches!(
            err,
            SupplyError::Read {
                stage: Stage::SerialNumber,
                ..
            }
        ));
        // nothing read past the failed stage
        assert_eq!(device.reads, vec![PRT_GENERAL_SERIAL_NUMBER]);
    }

    #[test]
    fn test_levels_failure_is_tagged() {
        let mut device = FakeDevice::new();
        device.levels = None;

        let err = collect_status(&mut device).unwrap_err();
        assert!(matches!(
            err,
            SupplyError::Read {
                stage: Stage::SupplyLevels,
                ..
            }
        ));
        assert_eq!(device.reads.len(), 4);
    }

    #[test]
    fn test_coercion_failure_is_tagged() {
        let mut device = FakeDevice::new();
        device.names = Some(vec![RawValue::Integer(3)]);

        let err = collect_status(&mut device).unwrap_err();
        match err {
            SupplyError::Read {
                stage: Stage::SupplyNames,
                source: ReadError::Coercion { expected, .. },
            } => assert_eq!(expected, "text"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_merge_is_positional() {
        let names = vec!["black".to_owned(), "cyan".to_owned()];
        let supplies = merge_supplies(names, vec![10, 30]);
        assert_eq!(supplies, levels_of(&[("black", 10), ("cyan", 30)]));
    }

    #[test]
    fn test_merge_truncates_to_shorter() {
        let names = vec!["black".to_owned(), "cyan".to_owned(), "magenta".to_owned()];
        let supplies = merge_supplies(names, vec![10, 30]);
        assert_eq!(supplies, levels_of(&[("black", 10), ("cyan", 30)]));
    }

    #[test]
    fn test_merge_duplicate_names_last_wins() {
        let names = vec!["black".to_owned(), "black".to_owned()];
        let supplies = merge_supplies(names, vec![10, 70]);
        assert_eq!(supplies, levels_of(&[("black", 70)]));
    }

    #[test]
    fn test_waste_receptacle_is_dropped() {
        let names = vec!["black".to_owned(), "other".to_owned()];
        let supplies = merge_supplies(names, vec![10, 42]);
        assert_eq!(supplies, levels_of(&[("black", 10)]));
    }

    #[test]
    fn test_default_identity() {
        let status = PrinterStatus::default();
        assert_eq!(status.model_name, "N/A");
        assert_eq!(status.serial_number, "N/A");
        assert!(status.supplies.is_empty());
    }
}
