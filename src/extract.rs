//! Pattern extraction from external tool output.
//!
//! The node client has no machine-readable output, so these patterns are the
//! whole contract with it. Keep phrase additions in `NODE_ID_PHRASES` only.

use regex::Regex;
use std::sync::OnceLock;

/// Known node-client phrasings that precede a freshly registered node ID.
///
/// Ordered oldest to newest client release.
pub const NODE_ID_PHRASES: [&str; 2] = [
    "Node registered successfully with ID",
    "Successfully registered node with ID",
];

fn node_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let phrases = NODE_ID_PHRASES
            .iter()
            .map(|phrase| regex::escape(phrase))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?:{phrases}):\s*([a-zA-Z0-9\-]+)"))
            .expect("node id pattern compiles")
    })
}

fn glibc_version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9]+\.[0-9]+)$").expect("glibc pattern compiles"))
}

fn session_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s+([0-9]+\..*?)\s+\(").expect("session pattern compiles"))
}

/// Pull the registered node ID out of `register-node` output.
pub fn extract_node_id(output: &str) -> Option<String> {
    node_id_pattern()
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Parse `major.minor` from the first line of an `ldd --version` banner.
pub fn extract_glibc_version(banner: &str) -> Option<String> {
    let first = banner.lines().next()?.trim_end();
    glibc_version_pattern()
        .captures(first)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Collect `pid.name` session identifiers from a `screen -ls` listing,
/// preserving encounter order.
pub fn extract_session_names(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter_map(|line| session_line_pattern().captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_node_id_from_older_phrasing() {
        let out = "Registering node...\nNode registered successfully with ID: abc-123\n";
        assert_eq!(extract_node_id(out).as_deref(), Some("abc-123"));
    }

    #[test]
    fn extracts_node_id_from_newer_phrasing() {
        let out = "[info] ok\nSuccessfully registered node with ID: XYZ9\n";
        assert_eq!(extract_node_id(out).as_deref(), Some("XYZ9"));
    }

    #[test]
    fn first_matching_node_id_wins() {
        let out = "Successfully registered node with ID: first-1\n\
                   Node registered successfully with ID: second-2\n";
        assert_eq!(extract_node_id(out).as_deref(), Some("first-1"));
    }

    #[test]
    fn node_id_stops_at_non_identifier_characters() {
        let out = "Node registered successfully with ID: 6166-aa.\n";
        assert_eq!(extract_node_id(out).as_deref(), Some("6166-aa"));
    }

    #[test]
    fn missing_node_id_phrase_is_absent() {
        assert_eq!(extract_node_id("Error: wallet not registered\n"), None);
        assert_eq!(extract_node_id(""), None);
        assert_eq!(extract_node_id("Node ID: 1234\n"), None);
    }

    #[test]
    fn extracts_glibc_version_from_first_line() {
        let banner = "ldd (Ubuntu GLIBC 2.35-0ubuntu3.8) 2.35\nCopyright (C) 2022\n";
        assert_eq!(extract_glibc_version(banner).as_deref(), Some("2.35"));
    }

    #[test]
    fn glibc_version_ignores_later_lines() {
        let banner = "ldd: unknown build\nversion 2.39\n";
        assert_eq!(extract_glibc_version(banner), None);
        assert_eq!(extract_glibc_version(""), None);
    }

    #[test]
    fn extracts_session_names_in_encounter_order() {
        let listing = "There are screens on:\n\
                       \t12345.nexus-742\t(Detached)\n\
                       \t998.nexus-prover-101\t(10/01/2026 09:12:01 AM)\t(Attached)\n\
                       2 Sockets in /run/screen/S-root.\n";
        assert_eq!(
            extract_session_names(listing),
            vec!["12345.nexus-742", "998.nexus-prover-101"]
        );
    }

    #[test]
    fn single_listing_line_yields_one_session() {
        assert_eq!(
            extract_session_names("\t12345.nexus-742\t(Detached)"),
            vec!["12345.nexus-742"]
        );
    }

    #[test]
    fn listing_without_sessions_is_empty() {
        let listing = "No Sockets found in /run/screen/S-root.\n";
        assert!(extract_session_names(listing).is_empty());
        assert!(extract_session_names("").is_empty());
    }
}
