//! Asynchronous word source.

use std::path::PathBuf;

use crate::core::{LoadError, WordPool};

/// Where the vocabulary comes from.
#[derive(Debug, Clone)]
pub enum WordSource {
    File(PathBuf),
    Inline(String),
}

impl WordSource {
    pub fn name(&self) -> String {
        match self {
            WordSource::File(p) => p.display().to_string(),
            WordSource::Inline(_) => "inline".to_string(),
        }
    }

    pub async fn load(&self) -> Result<WordPool, LoadError> {
        match self {
            WordSource::File(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|io| LoadError::Unreachable {
                        source_name: self.name(),
                        io,
                    })?;
                WordPool::from_text(&self.name(), &text)
            }
            WordSource::Inline(text) => WordPool::from_text("inline", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    #[test]
    fn inline_source_loads() {
        let pool = block_on(WordSource::Inline("comet\nmoon\n".into()).load()).unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn missing_file_is_unreachable() {
        let src = WordSource::File(PathBuf::from("/no/such/words.txt"));
        let err = block_on(src.load()).unwrap_err();
        assert!(matches!(err, LoadError::Unreachable { .. }));
        assert!(err.to_string().contains("/no/such/words.txt"));
    }

    #[test]
    fn blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "\n   \n").unwrap();
        let err = block_on(WordSource::File(path).load()).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }
}
