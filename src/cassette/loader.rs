//! Reading cassettes from disk.

use std::path::Path;

use super::format::Cassette;
use super::replayer::CassetteReplayer;
use crate::error::BotError;

/// Load a cassette file and create a replayer for it.
///
/// # Errors
///
/// Returns a config error if the file cannot be read or parsed.
pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, BotError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        BotError::Config(format!("Failed to read cassette {}: {e}", path.display()))
    })?;
    let cassette: Cassette = serde_yaml::from_str(&content).map_err(|e| {
        BotError::Config(format!("Failed to parse cassette {}: {e}", path.display()))
    })?;
    Ok(CassetteReplayer::new(cassette))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::cassette::format::Interaction;

    #[test]
    fn load_written_cassette() {
        let dir = std::env::temp_dir().join("quotebot_cassette_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.cassette.yaml");

        let cassette = Cassette {
            name: "loader".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "quote_source".into(),
                method: "fetch_quote".into(),
                input: json!(4),
                output: json!({"Ok": {"number": 4}}),
            }],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let mut replayer = load_cassette(&path).unwrap();
        let first = replayer.next_interaction("quote_source", "fetch_quote").unwrap();
        assert_eq!(first.input, json!(4));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = load_cassette(Path::new("/nonexistent/session.cassette.yaml")).unwrap_err();
        assert!(matches!(err, BotError::Config(_)));
    }

    #[test]
    fn garbage_file_is_config_error() {
        let dir = std::env::temp_dir().join("quotebot_cassette_loader_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.cassette.yaml");
        std::fs::write(&path, "interactions: [[[").unwrap();

        assert!(load_cassette(&path).unwrap_err().to_string().contains("Failed to parse cassette"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
