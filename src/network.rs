use std::net::IpAddr;

use super::{ErrorKind, Result};

/// Intercepts outbound traffic to every ip, in cluster and outside
pub const ALL_OUTBOUND_IP_RANGES: &str = "*";

/// Parse a CIDR notation network like `10.0.0.0/8` or `fd00::/8`
///
/// Returns the address and prefix length. The prefix must be plain decimal
/// digits (leading zeros allowed) and fit the address family.
pub fn parse_cidr(s: &str) -> Result<(IpAddr, u8)> {
    let invalid = || ErrorKind::InvalidCidr(s.to_string());
    let slash = match s.find('/') {
        Some(i) => i,
        None => bail!(invalid()),
    };
    let (addr, prefix) = (&s[..slash], &s[slash + 1..]);

    let ip: IpAddr = addr.parse().map_err(|_| invalid())?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        bail!(invalid());
    }
    let bits: u8 = prefix.parse().map_err(|_| invalid())?;
    let max = if ip.is_ipv4() { 32 } else { 128 };
    if bits > max {
        bail!(invalid());
    }
    Ok((ip, bits))
}

/// Check a comma separated list of outbound ip ranges
///
/// `*` is always valid. Otherwise every entry must be a CIDR; the first bad
/// entry is the error.
pub fn validate_outbound_ip_ranges(s: &str) -> Result<()> {
    if s == ALL_OUTBOUND_IP_RANGES {
        return Ok(());
    }
    for cidr in s.split(',') {
        parse_cidr(cidr)?;
    }
    Ok(())
}
