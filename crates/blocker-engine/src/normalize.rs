//! Address normalization into DNSBL reverse-query form.
//!
//! Standard DNSBL pattern: reverse the address and query under the zone.
//! Example: checking 1.2.3.4 against `bl.example.com` queries
//! `4.3.2.1.bl.example.com`.

use crate::resolver::NameLookup;
use blocker_core::{BlockerError, Result};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Reverse an IPv4 address for DNSBL lookup.
///
/// Converts `1.2.3.4` into `4.3.2.1` (without zone suffix).
#[must_use]
pub fn reverse_ipv4(ip: &Ipv4Addr) -> String {
    let octets = ip.octets();
    format!("{}.{}.{}.{}", octets[3], octets[2], octets[1], octets[0])
}

/// Build the RFC 3596 §2.5 reverse-pointer form of an IPv6 address.
///
/// The fully expanded hexadecimal representation is split into nibbles,
/// reversed, and dot-joined: `2001:db8::1` becomes
/// `1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2`.
#[must_use]
pub fn ipv6_nibble_pointer(ip: &Ipv6Addr) -> String {
    let expanded: String = ip
        .segments()
        .iter()
        .map(|segment| format!("{segment:04x}"))
        .collect();
    let nibbles: Vec<String> = expanded.chars().rev().map(String::from).collect();
    nibbles.join(".")
}

/// Normalize a lookup value into the form used to build DNSBL query names.
///
/// IPv4 addresses reverse their octets, IPv6 addresses use the nibble
/// pointer form, and anything else is treated as a hostname: forward-resolved
/// to an IPv4 address which is then reversed.
pub async fn normalize(value: &str, resolver: &dyn NameLookup) -> Result<String> {
    if let Ok(v4) = value.parse::<Ipv4Addr>() {
        return Ok(reverse_ipv4(&v4));
    }
    if let Ok(v6) = value.parse::<Ipv6Addr>() {
        return Ok(ipv6_nibble_pointer(&v6));
    }
    match resolver.lookup_a(value).await {
        Ok(addrs) => addrs
            .first()
            .map(reverse_ipv4)
            .ok_or_else(|| BlockerError::Resolution(format!("no A records for '{value}'"))),
        Err(failure) => Err(BlockerError::Resolution(format!(
            "forward lookup of '{value}' failed: {failure}"
        ))),
    }
}
