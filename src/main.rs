use std::{error::Error, time::Duration};

use clap::Parser;
use slog::{debug, info, o, Drain};

use iplocate::{Client, LookupResponse, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// IPv4 or IPv6 address to look up, your own public address if omitted
    address: Option<String>,

    /// API key for the higher rate limit tier
    #[arg(long, env = "IPLOCATE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "IPLOCATE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Timeout for the request
    #[arg(long, short = 't', value_name = "SECONDS", default_value_t = 30)]
    timeout: u64,

    /// Print the raw response as JSON
    #[arg(long)]
    json: bool,

    #[arg(long, env = "DEBUG")]
    debug: bool,
}

fn make_logger(debug: bool) -> slog::Logger {
    // stdout is reserved for the report, `--json` output has to stay parseable
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain)
        .overflow_strategy(slog_async::OverflowStrategy::Block)
        .build()
        .fuse();
    let drain = drain
        .filter_level(if debug {
            slog::Level::Debug
        } else {
            slog::Level::Info
        })
        .fuse();

    slog::Logger::root(drain, o!())
}

fn print_section(title: &str) {
    println!("\n=== {title} ===");
}

fn print_field<T: std::fmt::Display>(label: &str, value: Option<T>) {
    match value {
        Some(value) => println!("{label}: {value}"),
        None => println!("{label}: <not available>"),
    }
}

fn print_report(resp: &LookupResponse) {
    print_section("Basic Information");
    println!("IP Address: {}", resp.ip);
    print_field("Country", resp.country.as_deref());
    print_field("Country Code", resp.country_code.as_deref());
    println!("Is EU: {}", resp.is_eu);
    print_field("City", resp.city.as_deref());
    print_field("Continent", resp.continent.as_deref());
    print_field("Subdivision", resp.subdivision.as_deref());
    print_field("Postal Code", resp.postal_code.as_deref());
    print_field("Time Zone", resp.time_zone.as_deref());
    print_field("Currency Code", resp.currency_code.as_deref());
    print_field("Calling Code", resp.calling_code.as_deref());

    print_section("Geographic Coordinates");
    print_field("Latitude", resp.latitude.map(|l| format!("{l:.4}")));
    print_field("Longitude", resp.longitude.map(|l| format!("{l:.4}")));
    if let Some((lat, lon)) = resp.coordinates() {
        println!("Map: https://www.openstreetmap.org/?mlat={lat:.4}&mlon={lon:.4}");
    }

    print_section("Network Information");
    print_field("Network", resp.network.as_deref());
    match &resp.asn {
        Some(asn) => {
            println!("ASN: {}", asn.asn);
            println!("ASN Name: {}", asn.name);
            println!("Route: {}", asn.route);
            println!("Netname: {}", asn.netname);
            println!("Domain: {}", asn.domain);
            println!("Type: {}", asn.kind);
            println!("RIR: {}", asn.rir);
            println!("ASN Country: {}", asn.country_code);
        }
        None => println!("ASN information: <not available>"),
    }

    print_section("Privacy & Threat Detection");
    let privacy = &resp.privacy;
    println!("Is Abuser: {}", privacy.is_abuser);
    println!("Is Anonymous: {}", privacy.is_anonymous);
    println!("Is Bogon: {}", privacy.is_bogon);
    println!("Is Hosting: {}", privacy.is_hosting);
    println!("Is iCloud Relay: {}", privacy.is_icloud_relay);
    println!("Is Proxy: {}", privacy.is_proxy);
    println!("Is Tor: {}", privacy.is_tor);
    println!("Is VPN: {}", privacy.is_vpn);

    print_section("Company Information");
    match &resp.company {
        Some(company) => {
            println!("Company Name: {}", company.name);
            println!("Company Domain: {}", company.domain);
            println!("Company Country: {}", company.country_code);
            println!("Company Type: {}", company.kind);
        }
        None => println!("Company information: <not available>"),
    }

    print_section("Hosting Information");
    match &resp.hosting {
        Some(hosting) => {
            print_field("Provider", hosting.provider.as_deref());
            print_field("Domain", hosting.domain.as_deref());
            print_field("Network", hosting.network.as_deref());
            print_field("Region", hosting.region.as_deref());
            print_field("Service", hosting.service.as_deref());
        }
        None => println!("Hosting information: <not available>"),
    }

    print_section("Abuse Contact Information");
    match &resp.abuse {
        Some(abuse) => {
            print_field("Name", abuse.name.as_deref());
            print_field("Email", abuse.email.as_deref());
            print_field("Phone", abuse.phone.as_deref());
            print_field("Address", abuse.address.as_deref());
            print_field("Network", abuse.network.as_deref());
            print_field("Country", abuse.country_code.as_deref());
        }
        None => println!("Abuse contact information: <not available>"),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli_args = Cli::parse();
    let timeout = Duration::from_secs(cli_args.timeout);

    let log = make_logger(cli_args.debug);
    debug!(log, "startup"; "address" => cli_args.address.clone(), "base_url" => cli_args.base_url.clone());

    let mut client = Client::default()
        .with_base_url(&cli_args.base_url)
        .with_timeout(timeout)
        .with_logger(&log);
    match cli_args.api_key {
        Some(api_key) => client = client.with_api_key(api_key),
        None => info!(log, "no API key given, using the free tier rate limit"),
    }

    let resp = match &cli_args.address {
        Some(address) => client.lookup(address)?,
        None => client.lookup_self()?,
    };

    drop(client);
    drop(log); // flush all log messages
    if cli_args.json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
    } else {
        print_report(&resp);
        if resp.privacy.uses_privacy_tools() {
            println!("\nPrivacy tools detected!");
        }
    }

    Ok(())
}
