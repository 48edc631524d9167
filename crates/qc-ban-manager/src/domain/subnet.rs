//! Subnet helpers over `ipnet`.
//!
//! SECURITY-CRITICAL: key normalization decides whether two bans collide.
//! Isolate for security audits.

use super::BanError;
use ipnet::{IpNet, Ipv4Net};
use std::net::IpAddr;

/// Prefix length of the `::ffff:0:0/96` IPv4-mapped block.
const MAPPED_PREFIX_LEN: u8 = 96;

/// Normalize a subnet to its network address.
///
/// `10.0.0.7/24` and `10.0.0.0/24` name the same range and must map to
/// the same table key. Ranges inside `::ffff:0:0/96` are folded to the
/// IPv4 range they map, matching how addresses are compared.
pub fn normalize(subnet: IpNet) -> IpNet {
    match subnet {
        IpNet::V6(v6) if v6.prefix_len() >= MAPPED_PREFIX_LEN => v6
            .addr()
            .to_ipv4_mapped()
            .and_then(|v4| Ipv4Net::new(v4, v6.prefix_len() - MAPPED_PREFIX_LEN).ok())
            .map_or(subnet, IpNet::V4)
            .trunc(),
        _ => subnet.trunc(),
    }
}

/// Exact-match subnet (/32 or /128) for a single address.
pub fn single_address(addr: IpAddr) -> IpNet {
    IpNet::from(addr.to_canonical())
}

/// True iff `outer` contains every address of `inner` (superset-or-equal).
///
/// IPv4 and IPv6 ranges are disjoint address spaces and never contain
/// each other.
pub fn is_superset(outer: &IpNet, inner: &IpNet) -> bool {
    outer.contains(inner)
}

/// True iff either subnet contains the other.
pub fn overlaps(a: &IpNet, b: &IpNet) -> bool {
    is_superset(a, b) || is_superset(b, a)
}

/// True iff `subnet` covers `addr`.
pub fn covers(subnet: &IpNet, addr: &IpAddr) -> bool {
    subnet.contains(&addr.to_canonical())
}

/// Raw identity bytes of an address, used as the discourage key.
///
/// IPv4-mapped IPv6 addresses are folded to their IPv4 form first.
pub fn address_key(addr: &IpAddr) -> Vec<u8> {
    match addr.to_canonical() {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

/// Parse `a.b.c.d`, `a.b.c.d/len` or the IPv6 equivalents.
///
/// Bare addresses become exact-match subnets. The result is normalized.
pub fn parse_subnet(input: &str) -> Result<IpNet, BanError> {
    let trimmed = input.trim();
    if trimmed.contains('/') {
        trimmed
            .parse::<IpNet>()
            .map(normalize)
            .map_err(|_| BanError::InvalidSubnet(input.to_string()))
    } else {
        parse_address(trimmed)
            .map(single_address)
            .map_err(|_| BanError::InvalidSubnet(input.to_string()))
    }
}

/// Parse a single address. Anything carrying a prefix length is rejected.
pub fn parse_address(input: &str) -> Result<IpAddr, BanError> {
    let trimmed = input.trim();
    if trimmed.contains('/') {
        return Err(BanError::NotSingleAddress(input.to_string()));
    }
    trimmed
        .parse::<IpAddr>()
        .map_err(|_| BanError::InvalidSubnet(input.to_string()))
}
