mod tests {
    use groupcast::endpoint::{EndpointState, GroupAddress, MulticastEndpoint, IO_TIMEOUT};
    use groupcast::error::{InitError, InvalidGroupAddress, IoError};
    use rand::RngCore;
    use std::time::{Duration, Instant};

    pub fn init() {
        // std::env::set_var("RUST_LOG", "debug");
        env_logger::builder().is_test(true).try_init().ok();
    }

    // Each test runs on its own group and port so parallel tests do not
    // hear each other through the shared wildcard binding.
    fn bound_endpoint(group: &str, port: u16) -> MulticastEndpoint {
        let group = GroupAddress::new(group).unwrap();
        let mut endpoint = MulticastEndpoint::new(group, port);
        endpoint.initialize().unwrap();
        assert_eq!(endpoint.state(), EndpointState::Bound);
        endpoint
    }

    fn random_payload(size: usize) -> Vec<u8> {
        let mut payload = vec![0; size];
        let mut rng = rand::rng();
        rng.fill_bytes(payload.as_mut());
        payload
    }

    #[test]
    pub fn test_close_is_idempotent() {
        init();
        let mut endpoint = bound_endpoint("239.8.7.1", 47401);
        endpoint.close();
        endpoint.close();
        endpoint.close();
        assert_eq!(endpoint.state(), EndpointState::Closed);
        assert_eq!(endpoint.peer_addr(), None);
        let err = endpoint.receive(&mut [0; 16]).unwrap_err();
        assert!(matches!(err, IoError::NotBound(EndpointState::Closed)));

        // close is also valid on an endpoint that was never initialized
        let group = GroupAddress::new("239.8.7.1").unwrap();
        let mut endpoint = MulticastEndpoint::new(group, 47401);
        endpoint.close();
        assert_eq!(endpoint.state(), EndpointState::Closed);
    }

    #[test]
    pub fn test_address_reuse_allows_two_endpoints() {
        init();
        let mut first = bound_endpoint("239.8.7.2", 47402);
        let mut second = bound_endpoint("239.8.7.2", 47402);
        assert_eq!(first.state(), EndpointState::Bound);
        assert_eq!(second.state(), EndpointState::Bound);
        first.close();
        second.close();
    }

    #[test]
    pub fn test_datagram_round_trip_on_loopback() {
        init();
        let mut sender = bound_endpoint("239.8.7.3", 47403);
        let mut receiver = bound_endpoint("239.8.7.3", 47403);

        let payload = random_payload(64);
        assert_eq!(sender.send(&payload).unwrap(), payload.len());

        let mut buf = [0; 2048];
        let nb = receiver.receive(&mut buf).unwrap();
        assert_eq!(&buf[..nb], payload.as_slice());

        // the sender is a member of the group too, its datagram loops back
        let nb = sender.receive(&mut buf).unwrap();
        assert_eq!(&buf[..nb], payload.as_slice());

        // the reply destination now points at the source socket of the sender
        let peer = receiver.peer_addr().unwrap();
        assert_eq!(peer.port(), 47403);

        sender.close();
        receiver.close();
    }

    #[test]
    pub fn test_send_follows_the_last_peer() {
        init();
        let mut endpoint = bound_endpoint("239.8.7.4", 47404);

        // a plain unicast socket pokes the endpoint port
        let probe = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        probe
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        probe.send_to(b"ping", ("127.0.0.1", 47404)).unwrap();

        let mut buf = [0; 2048];
        let nb = endpoint.receive(&mut buf).unwrap();
        assert_eq!(&buf[..nb], b"ping");
        assert_eq!(endpoint.peer_addr(), Some(probe.local_addr().unwrap()));

        // the next send goes back to the probe, not to the group
        endpoint.send(b"pong").unwrap();
        let (nb, src) = probe.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..nb], b"pong");
        assert_eq!(src.port(), 47404);

        endpoint.close();
    }

    #[test]
    pub fn test_receive_times_out_after_wait_bound() {
        init();
        assert_eq!(IO_TIMEOUT, Duration::from_secs(5));
        let mut endpoint = bound_endpoint("239.8.7.5", 47405);

        let start = Instant::now();
        let err = endpoint.receive(&mut [0; 2048]).unwrap_err();
        let elapsed = start.elapsed();

        assert!(err.is_timeout());
        assert!(elapsed >= Duration::from_millis(4500), "{:?}", elapsed);
        assert!(elapsed <= Duration::from_millis(7500), "{:?}", elapsed);
        // a timeout is recoverable, the endpoint stays usable
        assert_eq!(endpoint.state(), EndpointState::Bound);
        endpoint.close();
    }

    #[test]
    pub fn test_malformed_group_address_is_rejected() {
        init();
        // size violations are caught at construction
        assert_eq!(GroupAddress::new(""), Err(InvalidGroupAddress::Empty));
        assert_eq!(
            GroupAddress::new("239.255.255.2550"),
            Err(InvalidGroupAddress::TooLong(16))
        );

        // parsing happens during initialization
        let group = GroupAddress::new("not-an-ip").unwrap();
        let mut endpoint = MulticastEndpoint::new(group, 47406);
        let err = endpoint.initialize().unwrap_err();
        assert!(matches!(err, InitError::AddressParse { ref literal } if literal == "not-an-ip"));
        assert_eq!(endpoint.state(), EndpointState::Failed);

        let err = endpoint.send(b"data").unwrap_err();
        assert!(matches!(err, IoError::NotBound(EndpointState::Failed)));
        endpoint.close();
        endpoint.close();
        assert_eq!(endpoint.state(), EndpointState::Closed);
    }

    #[test]
    pub fn test_join_rejects_non_multicast_address() {
        init();
        let group = GroupAddress::new("10.1.2.3").unwrap();
        let mut endpoint = MulticastEndpoint::new(group, 47407);
        let err = endpoint.initialize().unwrap_err();
        assert!(matches!(err, InitError::JoinGroup { .. }));
        assert_eq!(endpoint.state(), EndpointState::Failed);
        endpoint.close();
    }

    #[test]
    pub fn test_large_datagram_is_truncated() {
        init();
        let mut sender = bound_endpoint("239.8.7.8", 47408);
        let mut receiver = bound_endpoint("239.8.7.8", 47408);

        let payload = random_payload(64);
        sender.send(&payload).unwrap();

        let mut buf = [0; 16];
        let nb = receiver.receive(&mut buf).unwrap();
        assert_eq!(nb, buf.len());
        assert_eq!(&buf[..], &payload[..buf.len()]);

        sender.close();
        receiver.close();
    }

    #[test]
    pub fn test_zero_length_datagram_is_delivered() {
        init();
        let mut sender = bound_endpoint("239.8.7.9", 47409);
        let mut receiver = bound_endpoint("239.8.7.9", 47409);

        assert_eq!(sender.send(b"").unwrap(), 0);
        let nb = receiver.receive(&mut [0; 16]).unwrap();
        assert_eq!(nb, 0);

        sender.close();
        receiver.close();
    }

    #[test]
    pub fn test_multicast_session_scenario() {
        init();
        let mut endpoint = bound_endpoint("239.1.1.1", 5000);
        assert_eq!(endpoint.group().as_str(), "239.1.1.1");
        assert_eq!(endpoint.port(), 5000);
        assert_eq!(endpoint.peer_addr(), Some("239.1.1.1:5000".parse().unwrap()));

        // the first send targets the group itself and loops back to us
        let payload = b"hello multicast";
        assert_eq!(endpoint.send(payload).unwrap(), payload.len());
        let mut buf = [0; 2048];
        let nb = endpoint.receive(&mut buf).unwrap();
        assert_eq!(&buf[..nb], payload);

        endpoint.close();
        assert_eq!(endpoint.state(), EndpointState::Closed);
    }
}
