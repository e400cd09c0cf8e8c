use pcc_core::error::AppError;

/// Split-point candidates in priority order: paragraph break, line break,
/// sentence-terminal period, plain space. A hard cut at the window edge is
/// the last resort when none of these can make progress.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ".", " "];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum chunk length in characters.
    pub max_size: usize,
    /// Characters shared between consecutive chunks.
    pub overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_size: 500,
            overlap: 50,
        }
    }
}

/// Split `text` into overlapping chunks of at most `cfg.max_size` chars.
///
/// Each chunk after the first repeats the previous chunk's trailing
/// `cfg.overlap` chars, so concatenating the first chunk with every later
/// chunk minus its first `cfg.overlap` chars reconstructs the input
/// exactly. Separators stay attached to the chunk they terminate.
///
/// Empty input yields an empty vec; input no longer than `max_size` yields
/// exactly one chunk.
pub fn chunk_text(text: &str, cfg: &ChunkConfig) -> Result<Vec<String>, AppError> {
    if cfg.max_size == 0 {
        return Err(AppError::new(
            "VALIDATION_FAILED",
            "Chunk max_size must be at least 1",
        ));
    }
    if cfg.overlap >= cfg.max_size {
        return Err(AppError::new(
            "VALIDATION_FAILED",
            "Chunk overlap must be smaller than max_size",
        )
        .with_details(format!(
            "max_size={}; overlap={}",
            cfg.max_size, cfg.overlap
        )));
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Ok(Vec::new());
    }
    if chars.len() <= cfg.max_size {
        return Ok(vec![text.to_string()]);
    }

    let mut out = Vec::new();
    let mut start = 0usize;
    loop {
        let end = usize::min(start + cfg.max_size, chars.len());
        let cut = if end == chars.len() {
            end
        } else {
            pick_cut(&chars, start, end, cfg.overlap)
        };
        out.push(chars[start..cut].iter().collect::<String>());
        if cut == chars.len() {
            break;
        }
        start = cut - cfg.overlap;
    }
    Ok(out)
}

/// Choose where to end the chunk starting at `start`, scanning the window
/// `[start, end)` for the rightmost occurrence of each separator in
/// priority order. A candidate cut must leave more than `overlap` chars in
/// the chunk, or the next chunk's start would not advance. Falls back to a
/// hard cut at `end`.
fn pick_cut(chars: &[char], start: usize, end: usize, overlap: usize) -> usize {
    let window = &chars[start..end];
    for sep in SEPARATORS {
        let sep: Vec<char> = sep.chars().collect();
        if window.len() < sep.len() {
            continue;
        }
        let mut j = window.len() - sep.len();
        loop {
            if window[j..j + sep.len()] == sep[..] {
                let cut = start + j + sep.len();
                if cut - start > overlap {
                    return cut;
                }
                // Any earlier occurrence is shorter still; try the next
                // separator in priority order.
                break;
            }
            if j == 0 {
                break;
            }
            j -= 1;
        }
    }
    end
}
