/// Validate an IPv4 address (e.g., "192.168.1.1").
/// Returns true if the string is a valid dotted-decimal IPv4 address.
pub fn is_valid_ipv4(ip: &str) -> bool {
    let parts: Vec<&str> = ip.split('.').collect();
    if parts.len() != 4 {
        return false;
    }
    parts
        .iter()
        .all(|p| p.bytes().all(|b| b.is_ascii_digit()) && p.parse::<u8>().is_ok())
}

/// Validate a hostname.
/// Allows alphanumeric, hyphens, dots, and underscores. No path separators or shell metacharacters.
pub fn is_valid_hostname(hostname: &str) -> bool {
    if hostname.is_empty() || hostname.len() > 253 {
        return false;
    }
    hostname
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_')
}

/// Convert a subnet mask to its CIDR prefix length.
/// Accepts "255.255.255.0" or a bare "/24"; returns None if unparseable.
pub fn mask_to_cidr(mask: &str) -> Option<u8> {
    let mask = mask.trim();
    if let Some(prefix) = mask.strip_prefix('/') {
        if !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        return prefix.parse::<u8>().ok().filter(|p| *p <= 32);
    }
    if !is_valid_ipv4(mask) {
        return None;
    }
    let bits = mask
        .split('.')
        .filter_map(|octet| octet.parse::<u8>().ok())
        .fold(0u32, |acc, octet| (acc << 8) | u32::from(octet));
    // Contiguous masks only: ones followed by zeros
    if bits.leading_ones() + bits.trailing_zeros() != 32 {
        return None;
    }
    Some(bits.leading_ones() as u8)
}

/// Replace every character that is not safe in a file name part with '_'
fn sanitize_filename_part(part: &str) -> String {
    let cleaned: String = part
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    // No leading dots: keeps ".." and hidden files out of the download dir
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Name of the file a downloaded configuration is saved under
/// e.g., ("SW-01", "cisco") -> "SW-01_cisco_config.txt"
pub fn download_filename(hostname: &str, vendor: &str) -> String {
    format!(
        "{}_{}_config.txt",
        sanitize_filename_part(hostname),
        sanitize_filename_part(vendor)
    )
}

/// Mask a secret for display, keeping the prefix and the last four characters
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ipv4() {
        assert!(is_valid_ipv4("192.168.1.1"));
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(is_valid_ipv4("255.255.255.255"));
        assert!(!is_valid_ipv4(""));
        assert!(!is_valid_ipv4("not-an-ip"));
        assert!(!is_valid_ipv4("256.1.1.1"));
        assert!(!is_valid_ipv4("1.2.3"));
        assert!(!is_valid_ipv4("1.2.3.4.5"));
        assert!(!is_valid_ipv4("1.2.3.-1"));
        assert!(!is_valid_ipv4("1.2.3.+1"));
        assert!(!is_valid_ipv4("; rm -rf /"));
    }

    #[test]
    fn test_is_valid_hostname() {
        assert!(is_valid_hostname("switch-01"));
        assert!(is_valid_hostname("router.lab.local"));
        assert!(is_valid_hostname("my_host"));
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("host name")); // spaces
        assert!(!is_valid_hostname("host;rm")); // semicolon
        assert!(!is_valid_hostname("../etc/passwd")); // path traversal
    }

    #[test]
    fn test_mask_to_cidr() {
        assert_eq!(mask_to_cidr("255.255.255.0"), Some(24));
        assert_eq!(mask_to_cidr("255.255.255.252"), Some(30));
        assert_eq!(mask_to_cidr("0.0.0.0"), Some(0));
        assert_eq!(mask_to_cidr("/16"), Some(16));
        assert_eq!(mask_to_cidr("10.0.0.0/8"), None);
        assert_eq!(mask_to_cidr("garbage/24"), None);
        assert_eq!(mask_to_cidr("/+8"), None);
        assert_eq!(mask_to_cidr("255.0.255.0"), None);
        assert_eq!(mask_to_cidr("/33"), None);
        assert_eq!(mask_to_cidr("garbage"), None);
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(download_filename("SW-HQ-01", "cisco"), "SW-HQ-01_cisco_config.txt");
        assert_eq!(download_filename("../../etc/passwd", "hp"), "_.._etc_passwd_hp_config.txt");
        assert_eq!(download_filename("core sw/1", "juniper"), "core_sw_1_juniper_config.txt");
        assert_eq!(download_filename("", "arista"), "__arista_config.txt");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk-abcdefghijkl"), "sk-...ijkl");
        assert_eq!(mask_secret("sk-1"), "****");
    }
}
