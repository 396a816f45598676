use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Result;
use clap::Parser;
use log::info;
use weather::{
    WeatherServer,
    cli::{init_logging, parse_args},
    protocol::DEFAULT_PORT,
};

#[derive(Parser)]
#[command(author, version)]
struct Args {
    /// Port to listen on, all interfaces
    #[arg(short, long, default_value_t = DEFAULT_PORT, value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,
}

fn main() -> Result<()> {
    init_logging();
    let args: Args = parse_args();

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, args.port));
    let mut server = WeatherServer::bind(addr)?;
    let result = server.run();

    // 释放监听套接字后再退出
    drop(server);
    info!("Server terminated");
    Ok(result?)
}
