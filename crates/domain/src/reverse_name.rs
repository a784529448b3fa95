//! Reverse lookup names (`in-addr.arpa` / `ip6.arpa`) to IP addresses and back.

use std::fmt::Write;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

const IPV4_SUFFIX: &str = ".in-addr.arpa";
const IPV6_SUFFIX: &str = ".ip6.arpa";
const IPV6_NIBBLES: usize = 32;

/// Classification of a query name with respect to reverse lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReverseQuery {
    /// A reverse name that decodes to a concrete address.
    Address(IpAddr),
    /// Carries a reverse suffix but the labels in front of it do not form an address.
    Invalid,
    /// Not a reverse lookup at all.
    NotReverse,
}

impl ReverseQuery {
    pub fn address(&self) -> Option<IpAddr> {
        match self {
            ReverseQuery::Address(ip) => Some(*ip),
            _ => None,
        }
    }
}

/// Decodes a reverse lookup name into the address it refers to.
///
/// Abbreviated `ip6.arpa` names (fewer than 32 nibbles) are padded with zero
/// nibbles on the low-order side once the nibbles are put back in address order.
pub fn decode_reverse_query(name: &str) -> ReverseQuery {
    let name = name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase();

    if let Some(octets) = name.strip_suffix(IPV4_SUFFIX) {
        return decode_ipv4(octets);
    }
    if let Some(nibbles) = name.strip_suffix(IPV6_SUFFIX) {
        return decode_ipv6(nibbles);
    }
    ReverseQuery::NotReverse
}

fn decode_ipv4(reversed: &str) -> ReverseQuery {
    let parts: Vec<&str> = reversed.split('.').collect();
    if parts.len() != 4 {
        return ReverseQuery::Invalid;
    }

    let forward = format!("{}.{}.{}.{}", parts[3], parts[2], parts[1], parts[0]);
    match forward.parse::<Ipv4Addr>() {
        Ok(ip) => ReverseQuery::Address(IpAddr::V4(ip)),
        Err(_) => ReverseQuery::Invalid,
    }
}

fn decode_ipv6(reversed: &str) -> ReverseQuery {
    let nibbles: Vec<&str> = reversed.split('.').collect();
    if nibbles.len() > IPV6_NIBBLES {
        return ReverseQuery::Invalid;
    }

    let mut ordered = String::with_capacity(IPV6_NIBBLES);
    for nibble in nibbles.iter().rev() {
        let mut chars = nibble.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_hexdigit() => ordered.push(c),
            _ => return ReverseQuery::Invalid,
        }
    }
    while ordered.len() < IPV6_NIBBLES {
        ordered.push('0');
    }

    let quartets: Vec<&str> = (0..IPV6_NIBBLES)
        .step_by(4)
        .map(|i| &ordered[i..i + 4])
        .collect();

    match quartets.join(":").parse::<Ipv6Addr>() {
        Ok(ip) => ReverseQuery::Address(IpAddr::V6(ip)),
        Err(_) => ReverseQuery::Invalid,
    }
}

/// Builds the full reverse lookup name for an address, without the trailing dot.
pub fn reverse_name(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{}.{}.{}.{}{}", d, c, b, a, IPV4_SUFFIX)
        }
        IpAddr::V6(v6) => {
            let mut name = String::with_capacity(IPV6_NIBBLES * 2 + IPV6_SUFFIX.len());
            for byte in v6.octets().iter().rev() {
                let _ = write!(name, "{:x}.{:x}.", byte & 0x0f, byte >> 4);
            }
            name.pop();
            name.push_str(IPV6_SUFFIX);
            name
        }
    }
}
