use dnscheck_domain::config::ConfigError;
use tokio::fs;
use tracing::{debug, warn};

/// Reads the `nameserver` entries of a resolv.conf file, in file order.
///
/// An unreadable file is an error; a readable file without nameservers
/// yields an empty list.
pub async fn read_nameservers(path: &str) -> Result<Vec<String>, ConfigError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;

    let nameservers = parse_nameservers(&content);
    if nameservers.is_empty() {
        warn!(path = %path, "No nameserver entries found");
    } else {
        debug!(path = %path, count = nameservers.len(), "Loaded system nameservers");
    }
    Ok(nameservers)
}

/// Format:
/// ```text
/// # comment
/// nameserver 127.0.0.53
/// nameserver fe80::1%eth0
/// search lan
/// ```
pub fn parse_nameservers(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split(['#', ';']).next().unwrap_or_default().trim())
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some("nameserver"), Some(address)) => Some(address),
                _ => None,
            }
        })
        // Zone IDs (fe80::1%eth0) are not valid resolver addresses.
        .map(|address| address.split('%').next().unwrap_or(address).to_string())
        .collect()
}
