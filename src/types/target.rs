//! Address ranges and scan targets.
//!
//! `AddressRange` expands CIDR notation into usable host addresses for both
//! IPv4 and IPv6. `ScanTarget` pairs one host with one port.

use crate::error::{InputError, InputResult};
use crate::types::Port;
use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

/// A single (host, port) pair to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanTarget {
    /// Host address.
    pub host: IpAddr,
    /// Destination port.
    pub port: Port,
}

impl ScanTarget {
    /// Create a new scan target.
    pub const fn new(host: IpAddr, port: Port) -> Self {
        Self { host, port }
    }

    /// Socket address to connect to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port.as_u16())
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}

/// Cross product of hosts and ports, host-major.
///
/// Targets are produced on demand; only the host and port lists are held.
pub fn build_targets(hosts: Vec<IpAddr>, ports: Vec<Port>) -> Targets {
    let total = hosts.len().saturating_mul(ports.len());
    Targets {
        hosts,
        ports,
        index: 0,
        total,
    }
}

/// Lazy iterator over every (host, port) pair, see [`build_targets`].
#[derive(Debug, Clone)]
pub struct Targets {
    hosts: Vec<IpAddr>,
    ports: Vec<Port>,
    index: usize,
    total: usize,
}

impl Iterator for Targets {
    type Item = ScanTarget;

    fn next(&mut self) -> Option<ScanTarget> {
        if self.index >= self.total {
            return None;
        }

        let host = self.hosts[self.index / self.ports.len()];
        let port = self.ports[self.index % self.ports.len()];
        self.index += 1;
        Some(ScanTarget::new(host, port))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.index;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<ScanTarget> {
        self.index = self.index.saturating_add(n).min(self.total);
        self.next()
    }
}

impl ExactSizeIterator for Targets {}

/// A parsed CIDR block.
///
/// Supports IPv4 ("192.168.1.0/24") and IPv6 ("2001:db8::/120"). Host bits
/// in the address are ignored: "10.0.0.7/24" denotes 10.0.0.0/24.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    network: IpNetwork,
}

impl AddressRange {
    /// Largest block that will be expanded (an IPv4 /8).
    pub const MAX_ADDRESSES: u128 = 1 << 24;

    /// Parse CIDR notation. A prefix length is required.
    pub fn parse(s: &str) -> InputResult<Self> {
        if !s.contains('/') {
            return Err(InputError::InvalidRange(format!(
                "{s:?} is missing a prefix length"
            )));
        }

        let network: IpNetwork = s
            .parse()
            .map_err(|e| InputError::InvalidRange(format!("{s:?}: {e}")))?;

        Ok(Self { network })
    }

    /// Prefix length of the block.
    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    /// First address of the block.
    pub fn first(&self) -> IpAddr {
        self.network.network()
    }

    /// Last address of the block.
    pub fn last(&self) -> IpAddr {
        let prefix = u32::from(self.network.prefix());
        match self.network.network() {
            IpAddr::V4(addr) => {
                let host_mask = u32::MAX.checked_shr(prefix).unwrap_or(0);
                IpAddr::V4(Ipv4Addr::from(u32::from(addr) | host_mask))
            }
            IpAddr::V6(addr) => {
                let host_mask = u128::MAX.checked_shr(prefix).unwrap_or(0);
                IpAddr::V6(Ipv6Addr::from(u128::from(addr) | host_mask))
            }
        }
    }

    /// Number of addresses in the block, network and broadcast included.
    ///
    /// Saturates at `u128::MAX` for an IPv6 /0.
    pub fn size(&self) -> u128 {
        let bits: u32 = match self.network {
            IpNetwork::V4(_) => 32,
            IpNetwork::V6(_) => 128,
        };
        let host_bits = bits - u32::from(self.network.prefix());
        1u128.checked_shl(host_bits).unwrap_or(u128::MAX)
    }

    /// Iterate over every address in the block, in ascending order.
    pub fn iter(&self) -> AddressIter {
        AddressIter {
            next: Some(self.first()),
            last: self.last(),
        }
    }

    /// Usable host addresses: the block minus its first and last address.
    ///
    /// Blocks of fewer than two addresses are returned as-is, so a /32 or
    /// /128 yields the address itself and a /31 or /127 yields nothing.
    pub fn hosts(&self) -> InputResult<Vec<IpAddr>> {
        let size = self.size();
        if size > Self::MAX_ADDRESSES {
            return Err(InputError::InvalidRange(format!(
                "{} holds {} addresses (max: {})",
                self.network,
                size,
                Self::MAX_ADDRESSES
            )));
        }

        let mut addrs: Vec<IpAddr> = self.iter().collect();
        if addrs.len() < 2 {
            return Ok(addrs);
        }

        addrs.pop();
        addrs.remove(0);
        Ok(addrs)
    }
}

impl FromStr for AddressRange {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first(), self.prefix())
    }
}

/// Ascending iterator over the addresses of an [`AddressRange`].
#[derive(Debug, Clone)]
pub struct AddressIter {
    next: Option<IpAddr>,
    last: IpAddr,
}

impl Iterator for AddressIter {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        let current = self.next?;
        // Stop on the last address rather than on containment, so a block
        // ending at the top of the address space cannot wrap around.
        self.next = if current == self.last {
            None
        } else {
            Some(next_address(current))
        };
        Some(current)
    }
}

/// The address following `addr`, wrapping at the top of the address space.
///
/// `192.168.1.255` becomes `192.168.2.0`; `255.255.255.255` becomes `0.0.0.0`.
pub fn next_address(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V4(v4) => {
            let mut octets = v4.octets();
            increment(&mut octets);
            IpAddr::V4(Ipv4Addr::from(octets))
        }
        IpAddr::V6(v6) => {
            let mut octets = v6.octets();
            increment(&mut octets);
            IpAddr::V6(Ipv6Addr::from(octets))
        }
    }
}

/// Big-endian increment with carry into the next byte on the left.
fn increment(bytes: &mut [u8]) {
    for byte in bytes.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PortSpec;

    fn hosts(cidr: &str) -> Vec<IpAddr> {
        AddressRange::parse(cidr).unwrap().hosts().unwrap()
    }

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_hosts_v4_24() {
        let addrs = hosts("192.168.1.0/24");
        assert_eq!(addrs.len(), 254);
        assert_eq!(addrs[0], ip("192.168.1.1"));
        assert_eq!(addrs[253], ip("192.168.1.254"));
    }

    #[test]
    fn test_hosts_are_contiguous() {
        let addrs = hosts("10.0.0.0/22");
        assert_eq!(addrs.len(), 1022);
        for pair in addrs.windows(2) {
            assert_eq!(next_address(pair[0]), pair[1]);
        }
        assert!(addrs.contains(&ip("10.0.0.255")));
        assert!(addrs.contains(&ip("10.0.1.0")));
    }

    #[test]
    fn test_hosts_v4_30() {
        assert_eq!(hosts("10.0.0.0/30"), vec![ip("10.0.0.1"), ip("10.0.0.2")]);
    }

    #[test]
    fn test_small_blocks() {
        assert!(hosts("10.0.0.0/31").is_empty());
        assert_eq!(hosts("10.0.0.5/32"), vec![ip("10.0.0.5")]);
        assert!(hosts("2001:db8::/127").is_empty());
        assert_eq!(hosts("2001:db8::1/128"), vec![ip("2001:db8::1")]);
    }

    #[test]
    fn test_hosts_v6() {
        let addrs = hosts("2001:db8::/120");
        assert_eq!(addrs.len(), 254);
        assert_eq!(addrs[0], ip("2001:db8::1"));
        assert_eq!(addrs[253], ip("2001:db8::fe"));
    }

    #[test]
    fn test_host_bits_are_masked() {
        assert_eq!(hosts("192.168.1.77/30"), hosts("192.168.1.76/30"));
    }

    #[test]
    fn test_block_at_top_of_space() {
        let addrs = hosts("255.255.255.252/30");
        assert_eq!(addrs, vec![ip("255.255.255.253"), ip("255.255.255.254")]);
    }

    #[test]
    fn test_increment_carries() {
        assert_eq!(next_address(ip("192.168.1.255")), ip("192.168.2.0"));
        assert_eq!(next_address(ip("10.255.255.255")), ip("11.0.0.0"));
        assert_eq!(next_address(ip("255.255.255.255")), ip("0.0.0.0"));
        assert_eq!(next_address(ip("2001:db8::ffff")), ip("2001:db8::1:0"));
        assert_eq!(
            next_address(ip("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff")),
            ip("::")
        );
    }

    #[test]
    fn test_size() {
        assert_eq!(AddressRange::parse("10.0.0.0/8").unwrap().size(), 1 << 24);
        assert_eq!(AddressRange::parse("0.0.0.0/0").unwrap().size(), 1 << 32);
        assert_eq!(AddressRange::parse("::/0").unwrap().size(), u128::MAX);
        assert_eq!(AddressRange::parse("::1/128").unwrap().size(), 1);
    }

    #[test]
    fn test_too_large() {
        let range = AddressRange::parse("10.0.0.0/7").unwrap();
        assert!(matches!(range.hosts(), Err(InputError::InvalidRange(_))));

        let range = AddressRange::parse("2001:db8::/64").unwrap();
        assert!(matches!(range.hosts(), Err(InputError::InvalidRange(_))));
    }

    #[test]
    fn test_invalid_ranges() {
        for input in ["", "10.0.0.1", "10.0.0.0/33", "not-an-ip/24", "::/129"] {
            assert!(
                matches!(AddressRange::parse(input), Err(InputError::InvalidRange(_))),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_build_targets() {
        let hosts = vec![ip("10.0.0.1"), ip("10.0.0.2")];
        let ports = vec![Port::new(22).unwrap(), Port::new(80).unwrap()];
        let targets: Vec<ScanTarget> = build_targets(hosts.clone(), ports.clone()).collect();

        assert_eq!(targets.len(), 4);
        assert_eq!(targets[0], ScanTarget::new(hosts[0], ports[0]));
        assert_eq!(targets[1], ScanTarget::new(hosts[0], ports[1]));
        assert_eq!(targets[2], ScanTarget::new(hosts[1], ports[0]));
        assert_eq!(targets[3], ScanTarget::new(hosts[1], ports[1]));
    }

    #[test]
    fn test_build_targets_empty_side() {
        let ports = vec![Port::new(80).unwrap()];
        assert_eq!(build_targets(Vec::new(), ports).len(), 0);
        assert_eq!(build_targets(vec![ip("10.0.0.1")], Vec::new()).next(), None);
    }

    #[test]
    fn test_large_product_is_not_materialised() {
        // 1048574 hosts x 65535 ports: far too many targets to hold in memory.
        let hosts = hosts("10.0.0.0/12");
        let ports = PortSpec::parse("1-65535").unwrap().to_ports();
        let mut targets = build_targets(hosts, ports);

        assert_eq!(targets.len(), 1_048_574 * 65_535);
        assert_eq!(
            targets.next(),
            Some(ScanTarget::new(ip("10.0.0.1"), Port::new(1).unwrap()))
        );

        let last = targets.nth(1_048_574 * 65_535 - 2);
        assert_eq!(
            last,
            Some(ScanTarget::new(ip("10.15.255.254"), Port::new(65535).unwrap()))
        );
        assert_eq!(targets.next(), None);
        assert_eq!(targets.len(), 0);
    }

    #[test]
    fn test_target_display() {
        let port = Port::new(8080).unwrap();
        assert_eq!(ScanTarget::new(ip("127.0.0.1"), port).to_string(), "127.0.0.1:8080");
        assert_eq!(ScanTarget::new(ip("::1"), port).to_string(), "[::1]:8080");
    }
}
