use anyhow::Result;
use clap::Parser;
use weather::{
    WeatherClient, WeatherRequest,
    cli::{init_logging, parse_args},
    client::{parse_request_arg, render_response},
    protocol::{DEFAULT_PORT, DEFAULT_SERVER},
};

#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    /// Server name or address
    #[arg(short, long, default_value = DEFAULT_SERVER)]
    server: String,
    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT, value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,
    /// "<type> <city>", type one of t, h, w, p
    #[arg(short, long, value_parser = parse_request_arg)]
    request: WeatherRequest,
}

fn main() -> Result<()> {
    init_logging();
    let args: Args = parse_args();

    let mut client = WeatherClient::connect(&args.server, args.port)?;
    let response = client.request(&args.request)?;
    println!(
        "{}",
        render_response(client.server_ip()?, &args.request.city(), &response)
    );
    Ok(())
}
