use clap::Parser;
use groupcast::endpoint::{GroupAddress, MulticastEndpoint};

/// Send datagrams to a UDP multicast group
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Multicast group to send to
    #[arg(long, default_value = "239.1.1.1")]
    group: GroupAddress,

    /// UDP port of the group
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Number of datagrams to send
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    /// Payload to send
    #[arg(default_value = "hello")]
    message: String,
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

    for _ in 0..args.repeat {
        match endpoint.send(args.message.as_bytes()) {
            Ok(nb) => log::info!("Sent {} bytes to {}:{}", nb, endpoint.group(), endpoint.port()),
            Err(e) => {
                log::error!("{:?}", e);
                endpoint.close();
                std::process::exit(-1);
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(100));
    }
    endpoint.close();
}
