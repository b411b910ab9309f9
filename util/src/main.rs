//!
//! Command-line utility to query a printer for its supply levels
//!
use std::{net::IpAddr, process, time::Duration};

use clap::Parser;

use psup::prelude::*;

#[derive(Parser)]
#[clap(about = "SNMP printer supply utility", name = "psuputil", rename_all = "kebab-case")]
struct Params {
    #[clap(help = "Printer IPv4 or IPv6 address")]
    address: String,

    #[clap(
        long = "community",
        short = 'c',
        default_value = "public",
        help = "SNMP community string"
    )]
    community: String,

    #[clap(
        long = "timeout",
        short = 't',
        default_value_t = 5,
        help = "Response timeout per request in seconds"
    )]
    timeout: u64,

    #[clap(
        long = "retries",
        short = 'r',
        default_value_t = 1,
        help = "Retransmissions after a failed request"
    )]
    retries: u32,

    #[clap(long = "port", short = 'p', default_value_t = SNMP_PORT, help = "Agent UDP port")]
    port: u16,
}

fn run(params: &Params) -> Result<(), SupplyError> {
    let addr: IpAddr = params.address.parse()?;

    let mut client = SnmpClient::builder(addr)
        .community(&params.community)
        .timeout(Duration::from_secs(params.timeout))
        .retries(params.retries)
        .port(params.port)
        .connect()?;

    let status = fetch_status(&mut client)?;

    println!();
    println!(
        "ip: {} - model: {} - serial: {}",
        addr, status.model_name, status.serial_number
    );
    println!();

    for (name, level) in &status.supplies {
        println!("{}", progress_bar(name, *level));
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let params = Params::parse();
    if let Err(e) = run(&params) {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    }
}
