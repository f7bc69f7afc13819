// Host identity used for the `server` label
use std::net::{IpAddr, ToSocketAddrs};
use sysinfo::System;

const UNKNOWN_HOST: &str = "unknown";

/// Resolve the value of the `server` label.
///
/// An explicit override wins. Otherwise the host name is resolved and the
/// first IPv4 address is preferred, then any address, then the bare host
/// name.
pub fn resolve_server_identity(override_label: Option<&str>) -> String {
    if let Some(label) = override_label.map(str::trim).filter(|l| !l.is_empty()) {
        return label.to_string();
    }

    let Some(hostname) = System::host_name() else {
        log::warn!("Could not determine host name, using {:?}", UNKNOWN_HOST);
        return UNKNOWN_HOST.to_string();
    };

    match resolve_host(&hostname) {
        Some(ip) => ip.to_string(),
        None => {
            log::warn!("Could not resolve host name {:?}, using it as server label", hostname);
            hostname
        }
    }
}

fn resolve_host(hostname: &str) -> Option<IpAddr> {
    let addrs: Vec<IpAddr> = (hostname, 0)
        .to_socket_addrs()
        .ok()?
        .map(|addr| addr.ip())
        .collect();

    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}
