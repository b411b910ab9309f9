//!
//! Blocking SNMP v2c session client
//!
use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use log::debug;
use snmp2::{Oid, SyncSession};

use crate::{
    error::{ReadError, SupplyError},
    value::RawValue,
};

/// Default agent UDP port
pub const SNMP_PORT: u16 = 161;

const DEFAULT_COMMUNITY: &str = "public";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_RETRIES: u32 = 1;

/// GETBULK max-repetitions per request during a table walk
const WALK_MAX_REPETITIONS: u32 = 10;

/// Parse a dotted object identifier string
pub fn parse_oid(s: &str) -> Result<Oid<'static>, ReadError> {
    let parts = s
        .trim()
        .split('.')
        .filter(|p| !p.is_empty())
        .map(str::parse)
        .collect::<Result<Vec<u64>, _>>()
        .map_err(|_| ReadError::InvalidOid(s.to_owned()))?;

    Oid::from(&parts).map_err(|_| ReadError::InvalidOid(s.to_owned()))
}

/// Builder to create SNMP client
pub struct SnmpClientBuilder {
    addr: IpAddr,
    port: u16,
    community: String,
    timeout: Duration,
    retries: u32,
}

impl SnmpClientBuilder {
    fn new(addr: IpAddr) -> Self {
        SnmpClientBuilder {
            addr,
            port: SNMP_PORT,
            community: DEFAULT_COMMUNITY.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
        }
    }

    /// Community string identifying the access scope. Default is "public".
    pub fn community<S: AsRef<str>>(mut self, community: S) -> Self {
        self.community = community.as_ref().to_owned();
        self
    }

    /// Response timeout for a single request. Default is 5 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retransmissions after a failed request. Default is 1.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Agent UDP port. Default is 161.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Open the session
    pub fn connect(self) -> Result<SnmpClient, SupplyError> {
        let target = SocketAddr::new(self.addr, self.port);
        debug!("opening SNMP session to {target}");

        let session = SyncSession::new_v2c(target, self.community.as_bytes(), Some(self.timeout), 0)
            .map_err(SupplyError::Connection)?;

        Ok(SnmpClient {
            session,
            retries: self.retries,
        })
    }
}

/// Blocking SNMP v2c client.
///
/// Owns the UDP transport for the duration of one status query. The socket is
/// released when the client is dropped, on every exit path.
pub struct SnmpClient {
    session: SyncSession,
    retries: u32,
}

impl SnmpClient {
    /// Create a client with default options and open the session
    pub fn connect(addr: IpAddr) -> Result<SnmpClient, SupplyError> {
        SnmpClient::builder(addr).connect()
    }

    /// Create a client builder for setting extra options
    pub fn builder(addr: IpAddr) -> SnmpClientBuilder {
        SnmpClientBuilder::new(addr)
    }

    /// Read a single object and return the first varbind value
    pub fn get(&mut self, oid: &Oid<'_>) -> Result<RawValue, ReadError> {
        let mut attempt = 0;
        loop {
            match self.session.get(oid) {
                Ok(pdu) => {
                    return pdu
                        .varbinds
                        .into_iter()
                        .next()
                        .map(|(_, value)| RawValue::from(&value))
                        .ok_or(ReadError::EmptyResponse);
                }
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    debug!("GET {oid} failed ({e}), retransmission {attempt}/{}", self.retries);
                }
                Err(e) => return Err(ReadError::Snmp(e)),
            }
        }
    }

    /// Enumerate all objects subordinate to `root`, in device-reported order.
    ///
    /// The walk is atomic: an error part-way through discards everything
    /// collected so far.
    pub fn walk(&mut self, root: &Oid<'_>) -> Result<Vec<RawValue>, ReadError> {
        let mut results = Vec::new();
        let mut current = root.to_owned();

        loop {
            let rows = self.bulk_step(&current)?;
            if rows.is_empty() {
                return Ok(results);
            }

            for (oid, value) in rows {
                if !oid.starts_with(root) || value == RawValue::EndOfMibView {
                    return Ok(results);
                }
                results.push(value);
                current = oid;
            }
        }
    }

    /// One GETBULK request from `current`, decoded into owned rows
    fn bulk_step(&mut self, current: &Oid<'static>) -> Result<Vec<(Oid<'static>, RawValue)>, ReadError> {
        let mut attempt = 0;
        loop {
            match self.session.getbulk(&[current], 0, WALK_MAX_REPETITIONS) {
                Ok(pdu) => {
                    return Ok(pdu
                        .varbinds
                        .into_iter()
                        .map(|(oid, value)| (oid.to_owned(), RawValue::from(&value)))
                        .collect());
                }
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    debug!(
                        "GETBULK {current} failed ({e}), retransmission {attempt}/{}",
                        self.retries
                    );
                }
                Err(e) => return Err(ReadError::Snmp(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_oid() {
        let oid = parse_oid("1.3.6.1.2.1.43.5.1.1.17.1").unwrap();
        assert_eq!(oid.to_string(), "1.3.6.1.2.1.43.5.1.1.17.1");
    }

    #[test]
    fn test_parse_oid_trims_whitespace() {
        let oid = parse_oid(" 1.3.6.1 ").unwrap();
        assert_eq!(oid.to_string(), "1.3.6.1");
    }

    #[test]
    fn test_parse_oid_rejects_junk() {
        assert!(parse_oid("1.3.6.x").is_err());
        assert!(parse_oid("printer").is_err());
    }
}
