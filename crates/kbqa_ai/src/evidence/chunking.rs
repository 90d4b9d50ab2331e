/// Fraction of the window a newline must lie beyond before we cut on it.
const MIN_NEWLINE_CUT_RATIO: f64 = 0.45;

/// Half-open character range `[start, cut)` of one chunk window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkWindow {
    pub start: usize,
    pub cut: usize,
}

/// Split `text` into overlapping, newline-aware chunks.
///
/// Windows are `chunk_size` characters long. A window is cut at its last
/// newline when that newline falls in the back part of the window, otherwise
/// at the raw window end. Pieces are trimmed and empty ones dropped.
/// `chunk_size <= 0` returns the whole text as a single chunk.
pub fn chunk_text(text: &str, chunk_size: i64, overlap: usize) -> Vec<String> {
    if chunk_size <= 0 {
        return vec![text.to_string()];
    }

    let chars: Vec<char> = text.chars().collect();
    // Byte offset of every char position, plus the end of the string.
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    chunk_windows(&chars, chunk_size as usize, overlap)
        .into_iter()
        .filter_map(|w| {
            let piece = text[offsets[w.start]..offsets[w.cut]].trim();
            (!piece.is_empty()).then(|| piece.to_string())
        })
        .collect()
}

/// Window positions, in characters. `chunk_size` must be at least 1.
pub fn chunk_windows(chars: &[char], chunk_size: usize, overlap: usize) -> Vec<ChunkWindow> {
    let n = chars.len();
    let min_cut = (chunk_size as f64 * MIN_NEWLINE_CUT_RATIO) as usize;

    let mut out = Vec::new();
    let mut start = 0usize;
    while start < n {
        let end = start.saturating_add(chunk_size).min(n);
        let newline = chars[start..end]
            .iter()
            .rposition(|&c| c == '\n')
            .map(|i| start + i);
        let cut = match newline {
            Some(nl) if nl > start + min_cut => nl,
            _ => end,
        };
        out.push(ChunkWindow { start, cut });

        // The +1 floor keeps the loop moving when overlap >= chunk_size.
        start = cut.saturating_sub(overlap).max(start + 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows(text: &str, size: usize, overlap: usize) -> Vec<ChunkWindow> {
        let chars: Vec<char> = text.chars().collect();
        chunk_windows(&chars, size, overlap)
    }

    #[test]
    fn cuts_on_late_newline() {
        // Newline at position 7 is beyond 0.45 * 10.
        let w = windows("abcdefg\nhijklmnop", 10, 0);
        assert_eq!(w[0], ChunkWindow { start: 0, cut: 7 });
    }

    #[test]
    fn ignores_early_newline() {
        // Newline at position 2 is too early; cut at the raw window end.
        let w = windows("ab\ncdefghijklmnop", 10, 0);
        assert_eq!(w[0], ChunkWindow { start: 0, cut: 10 });
    }

    #[test]
    fn starts_strictly_increase_even_with_huge_overlap() {
        let text = "line one\nline two\nline three\n".repeat(20);
        for (size, overlap) in [(1, 0), (5, 5), (10, 50), (16, 15), (40, 8)] {
            let w = windows(&text, size, overlap);
            assert!(!w.is_empty());
            for pair in w.windows(2) {
                assert!(pair[1].start > pair[0].start, "size={size} overlap={overlap}");
            }
            for win in &w {
                assert!(win.cut > win.start);
                assert!(win.cut - win.start <= size);
            }
        }
    }

    #[test]
    fn multibyte_text_is_sliced_on_char_boundaries() {
        let text = "Rebar #3–#11 — stocked\nW6–W36 beams in A992 ✓";
        let chunks = chunk_text(text, 7, 2);
        assert!(!chunks.is_empty());
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }
}
