//! Target address validation.
//!
//! Two strictness levels exist for dotted-quad addresses. The loose check
//! ([`is_dotted_quad`]) only requires four octets in 0–255. The strict check
//! ([`validate_address`]) additionally rejects reserved ranges; it is the
//! policy used by every command that takes an address (`scan`, `connect`,
//! `hack`). Mission targets are generated from private ranges (10.x,
//! 172.16.x, 192.168.x), which the strict policy accepts.

/// Address validation errors with user-facing messages.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid IP address format: {0}")]
    Malformed(String),

    #[error("Invalid IP address: octet {0} is out of range (0-255)")]
    OctetOutOfRange(String),

    #[error("Unroutable IP address: {addr} ({range})")]
    Reserved { addr: String, range: &'static str },
}

/// Parse a dotted-quad string into its four octets.
fn parse_octets(addr: &str) -> Result<[u8; 4], AddressError> {
    let parts: Vec<&str> = addr.split('.').collect();
    if parts.len() != 4 {
        return Err(AddressError::Malformed(addr.to_string()));
    }
    let mut octets = [0u8; 4];
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() || part.len() > 3 || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(AddressError::Malformed(addr.to_string()));
        }
        octets[i] = part
            .parse::<u8>()
            .map_err(|_| AddressError::OctetOutOfRange(part.to_string()))?;
    }
    Ok(octets)
}

/// Loose check: four dot-separated octets, each 0–255. No range policy.
pub fn is_dotted_quad(addr: &str) -> bool {
    parse_octets(addr).is_ok()
}

/// Strict check: loose syntax plus rejection of reserved ranges.
///
/// Rejected ranges: 0.0.0.0/8, 127.0.0.0/8 (loopback), 169.254.0.0/16
/// (link-local), the three TEST-NET blocks, and 224.0.0.0/4 upward
/// (multicast, experimental, and the broadcast address).
pub fn validate_address(addr: &str) -> Result<(), AddressError> {
    let [a, b, c, _d] = parse_octets(addr)?;
    let range = match (a, b, c) {
        (0, _, _) => Some("this network"),
        (127, _, _) => Some("loopback"),
        (169, 254, _) => Some("link-local"),
        (192, 0, 2) | (198, 51, 100) | (203, 0, 113) => Some("documentation"),
        (224..=255, _, _) => Some("multicast/reserved"),
        _ => None,
    };
    match range {
        Some(range) => Err(AddressError::Reserved {
            addr: addr.to_string(),
            range,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_accepts_well_formed_quads() {
        for addr in ["10.0.0.5", "127.0.0.1", "0.1.2.3", "255.255.255.255"] {
            assert!(is_dotted_quad(addr), "{addr} should pass the loose check");
        }
    }

    #[test]
    fn loose_rejects_malformed_input() {
        for addr in ["300.1.1.1", "1.2.3", "1.2.3.4.5", "a.b.c.d", "", "1..2.3", "01a.2.3.4"] {
            assert!(!is_dotted_quad(addr), "{addr} should fail the loose check");
        }
    }

    #[test]
    fn strict_accepts_private_ranges() {
        for addr in ["10.0.0.5", "192.168.1.77", "172.16.0.254", "8.8.8.8"] {
            assert!(validate_address(addr).is_ok(), "{addr} should pass strict");
        }
    }

    #[test]
    fn strict_rejects_reserved_ranges() {
        for addr in [
            "127.0.0.1",
            "0.1.2.3",
            "255.255.255.255",
            "169.254.10.1",
            "192.0.2.9",
            "198.51.100.1",
            "203.0.113.200",
            "224.0.0.1",
        ] {
            assert!(
                matches!(validate_address(addr), Err(AddressError::Reserved { .. })),
                "{addr} should be rejected as reserved"
            );
        }
    }

    #[test]
    fn strict_rejects_out_of_range_octet() {
        assert!(matches!(
            validate_address("300.1.1.1"),
            Err(AddressError::OctetOutOfRange(_))
        ));
    }

    #[test]
    fn generated_targets_pass_strict_policy() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..300 {
            let target = crate::game::missions::generate_random_target(&mut rng);
            assert!(validate_address(&target).is_ok(), "{target} must be valid");
        }
    }
}
