use clap::Parser;
use groupcast::endpoint::{GroupAddress, MulticastEndpoint};

/// Receive datagrams from a UDP multicast group
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Multicast group to join
    #[arg(long, default_value = "239.1.1.1")]
    group: GroupAddress,

    /// UDP port to listen on
    #[arg(long, default_value_t = 5000)]
    port: u16,
}

fn main() {
    std::env::set_var("RUST_LOG", "info");
    env_logger::builder().try_init().ok();

    let args = Args::parse();
    log::info!("Join group {} on port {}", args.group, args.port);

    let mut endpoint = MulticastEndpoint::new(args.group, args.port);
    if let Err(e) = endpoint.initialize() {
        log::error!("{:?}", e);
        endpoint.close();
        std::process::exit(-1);
    }

    let mut buf = [0; 2048];
    loop {
        match endpoint.receive(&mut buf) {
            Ok(nb) => log::info!(
                "Received {} bytes: {}",
                nb,
                String::from_utf8_lossy(&buf[..nb])
            ),
            Err(e) if e.is_timeout() => log::debug!("No datagram, restart the wait"),
            Err(e) => {
                log::error!("{:?}", e);
                break;
            }
        }
    }
    endpoint.close();
    std::process::exit(-1);
}
