//!
//! Printer supply monitoring over SNMP. This crate queries a network printer
//! for its identity and consumable levels using the standard Printer MIB
//! (RFC 3805) objects and assembles them into a single result:
//! * a blocking SNMP v2c session client with scalar reads and table walks.
//! * a status assembler performing the fixed read sequence (serial number,
//!   model name, supply names, supply levels) and the positional merge.
//! * a progress-bar renderer for terminal output.
//!
//! The session is opened per query and closed when the client is dropped.
//! One client serves one device; concurrent polling of several devices means
//! one independent client per device, with no shared state between them.
//!
//! Feature flags:
//! * `serde` - derive `Serialize`/`Deserialize` on the public result types.
//!
//! Usage example:
//!
//!```rust,no_run
//! use psup::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let addr = "192.168.0.10".parse()?;
//!     let mut client = SnmpClient::builder(addr).community("public").connect()?;
//!     let status = fetch_status(&mut client)?;
//!     for (name, level) in &status.supplies {
//!         println!("{}", progress_bar(name, *level));
//!     }
//!     Ok(())
//! }
//!```

pub mod client;
pub mod error;
pub mod model;
pub mod render;
pub mod status;
pub mod value;

pub mod prelude {
    //!
    //! Common imports
    //!
    pub use snmp2::Oid;

    pub use crate::{
        client::{parse_oid, SnmpClient, SnmpClientBuilder, SNMP_PORT},
        error::{ReadError, SupplyError},
        model::Stage,
        render::progress_bar,
        status::{fetch_status, PrinterStatus},
        value::RawValue,
    };
}
