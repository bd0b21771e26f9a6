use std::path::Path;

use anyhow::Context;

/// Loads member identifiers from a line-delimited file.
///
/// - Leading/trailing whitespace is stripped from every line
/// - Blank lines are skipped
/// - File order is preserved, duplicates are kept
///
/// A missing or unreadable file is fatal for the run.
pub async fn load_members(path: impl AsRef<Path>) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read member list {}", path.display()))?;

    Ok(parse_members(&contents))
}

fn parse_members(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace_around_each_line() {
        assert_eq!(parse_members("  Zezima  \n"), ["Zezima"]);
    }

    #[test]
    fn keeps_order_and_duplicates_skips_blanks() {
        let members = parse_members("Lynx Titan\r\n\n  \nZezima\n\tLynx Titan\n");
        assert_eq!(members, ["Lynx Titan", "Zezima", "Lynx Titan"]);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_members(dir.path().join("members.txt")).await.unwrap_err();
        assert!(err.to_string().contains("member list"));
    }

    #[tokio::test]
    async fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("members.txt");
        std::fs::write(&path, "Zezima\nWoox\n").unwrap();

        assert_eq!(load_members(&path).await.unwrap(), ["Zezima", "Woox"]);
    }
}
