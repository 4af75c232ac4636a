//! Document Chunking
//!
//! Splits document text into overlapping token windows for embedding and
//! retrieval. Tokens are whitespace-delimited substrings; a window is
//! detokenized by joining its tokens with single spaces, so runs of
//! whitespace in the source collapse — chunk text is not a byte-exact
//! slice of the original document.

use thiserror::Error;

/// Default window size in tokens.
pub const DEFAULT_MAX_TOKENS: usize = 220;
/// Default overlap between consecutive windows, in tokens.
pub const DEFAULT_OVERLAP: usize = 40;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChunkerError {
    #[error("max_tokens must be greater than zero")]
    EmptyWindow,
    #[error("overlap {overlap} must be smaller than max_tokens {max_tokens}")]
    OverlapTooLarge { overlap: usize, max_tokens: usize },
}

/// Chunking window configuration.
#[derive(Debug, Clone, Copy)]
pub struct ChunkerConfig {
    /// Maximum tokens per chunk.
    pub max_tokens: usize,
    /// Tokens shared between consecutive chunks. Must stay below
    /// `max_tokens` or the window never advances.
    pub overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl ChunkerConfig {
    pub fn validate(&self) -> Result<(), ChunkerError> {
        if self.max_tokens == 0 {
            return Err(ChunkerError::EmptyWindow);
        }
        if self.overlap >= self.max_tokens {
            return Err(ChunkerError::OverlapTooLarge {
                overlap: self.overlap,
                max_tokens: self.max_tokens,
            });
        }
        Ok(())
    }
}

/// Split `text` into overlapping token windows.
///
/// Starting at token offset 0, each chunk takes up to `max_tokens` tokens.
/// A window that reaches the end of the token stream is the last chunk;
/// otherwise the next window starts `max_tokens - overlap` tokens later.
/// Empty input yields an empty sequence.
pub fn chunk(text: &str, config: &ChunkerConfig) -> Result<Vec<String>, ChunkerError> {
    config.validate()?;

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut chunks = Vec::new();

    let mut start = 0usize;
    while start < tokens.len() {
        let end = (start + config.max_tokens).min(tokens.len());
        chunks.push(tokens[start..end].join(" "));
        if end == tokens.len() {
            break;
        }
        start = end - config.overlap;
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_tokens(n: usize) -> String {
        (0..n).map(|i| format!("t{}", i)).collect::<Vec<_>>().join(" ")
    }

    fn config(max_tokens: usize, overlap: usize) -> ChunkerConfig {
        ChunkerConfig { max_tokens, overlap }
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunks = chunk("", &ChunkerConfig::default()).unwrap();
        assert!(chunks.is_empty());

        let chunks = chunk("   \n\t  ", &ChunkerConfig::default()).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_short_text_is_a_single_chunk() {
        let chunks = chunk("alpha beta gamma", &config(10, 2)).unwrap();
        assert_eq!(chunks, vec!["alpha beta gamma".to_string()]);
    }

    #[test]
    fn test_exact_window_is_a_single_chunk() {
        let text = numbered_tokens(10);
        let chunks = chunk(&text, &config(10, 2)).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn test_window_boundaries_500_tokens() {
        // 500 tokens at 220/40 -> [0:220) [180:400) [360:500)
        let text = numbered_tokens(500);
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let chunks = chunk(&text, &config(220, 40)).unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], tokens[0..220].join(" "));
        assert_eq!(chunks[1], tokens[180..400].join(" "));
        assert_eq!(chunks[2], tokens[360..500].join(" "));
    }

    #[test]
    fn test_chunk_count_formula() {
        // count = ceil((T - overlap) / (max - overlap)) for T > max
        for (total, max_tokens, overlap) in
            [(500, 220, 40), (1000, 220, 40), (7, 3, 1), (100, 10, 9)]
        {
            let text = numbered_tokens(total);
            let chunks = chunk(&text, &config(max_tokens, overlap)).unwrap();
            let expected = if total <= max_tokens {
                1
            } else {
                (total - overlap).div_ceil(max_tokens - overlap)
            };
            assert_eq!(
                chunks.len(),
                expected,
                "T={} max={} overlap={}",
                total,
                max_tokens,
                overlap
            );
        }
    }

    #[test]
    fn test_chunks_cover_every_token() {
        let total = 437;
        let text = numbered_tokens(total);
        let chunks = chunk(&text, &config(50, 7)).unwrap();

        let mut seen = vec![false; total];
        for c in &chunks {
            for tok in c.split_whitespace() {
                let i: usize = tok[1..].parse().unwrap();
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));

        // The last chunk ends exactly at the last token.
        let last = chunks.last().unwrap();
        assert!(last.ends_with(&format!("t{}", total - 1)));
    }

    #[test]
    fn test_overlap_repeats_tokens_between_neighbors() {
        let text = numbered_tokens(30);
        let chunks = chunk(&text, &config(10, 4)).unwrap();
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let prev: Vec<&str> = pair[0].split_whitespace().collect();
            let next: Vec<&str> = pair[1].split_whitespace().collect();
            assert_eq!(prev[prev.len() - 4..], next[..4]);
        }
    }

    #[test]
    fn test_whitespace_collapses_to_single_spaces() {
        let chunks = chunk("a\t\tb\n\nc   d", &ChunkerConfig::default()).unwrap();
        assert_eq!(chunks, vec!["a b c d".to_string()]);
    }

    #[test]
    fn test_overlap_at_or_above_window_is_rejected() {
        assert_eq!(
            chunk("some text", &config(10, 10)).unwrap_err(),
            ChunkerError::OverlapTooLarge { overlap: 10, max_tokens: 10 }
        );
        assert_eq!(
            chunk("some text", &config(10, 15)).unwrap_err(),
            ChunkerError::OverlapTooLarge { overlap: 15, max_tokens: 10 }
        );
    }

    #[test]
    fn test_zero_window_is_rejected() {
        assert_eq!(
            chunk("some text", &config(0, 0)).unwrap_err(),
            ChunkerError::EmptyWindow
        );
    }
}
