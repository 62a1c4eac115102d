use std::fs;
use std::io;
use std::path::Path;

/// Extracts the secret from the contents of a secret file: its first line,
/// trimmed.
pub fn parse_secret(contents: &str) -> String {
    contents.lines().next().unwrap_or_default().trim().to_string()
}

/// Extracts shares from the contents of a share file, one per line.
///
/// Surrounding whitespace is trimmed and blank lines are skipped.
pub fn parse_shares(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Renders shares in the share file format.
pub fn format_shares<S: AsRef<str>>(shares: &[S]) -> String {
    let mut out = String::new();
    for share in shares {
        out.push_str(share.as_ref());
        out.push('\n');
    }
    out
}

pub fn read_secret_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path).map(|contents| parse_secret(&contents))
}

pub fn read_share_file(path: &Path) -> io::Result<Vec<String>> {
    fs::read_to_string(path).map(|contents| parse_shares(&contents))
}

pub fn write_share_file<S: AsRef<str>>(path: &Path, shares: &[S]) -> io::Result<()> {
    fs::write(path, format_shares(shares))
}
