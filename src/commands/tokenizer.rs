//! Tokenizer for command lines.
//!
//! Splits a raw line on single spaces and re-joins double-quoted spans into a
//! single token. There is no escape handling; a quote character inside a word
//! is kept as-is.

const QUOTE: char = '"';

/// Tokenizes a raw command line.
///
/// - Pieces are separated by exactly one space, so `"a  b"` yields an empty
///   token between `a` and `b`.
/// - A piece starting with `"` opens a quoted span and a piece ending with `"`
///   at the same or a later index closes it. The span collapses into one token
///   with the outer quotes stripped: `say "hello world"` → `["say", "hello world"]`.
/// - An unterminated quote never closes; its pieces are returned unchanged.
pub fn tokenize(line: &str) -> Vec<String> {
    let pieces: Vec<&str> = line.split(' ').collect();
    let mut tokens: Vec<String> = Vec::with_capacity(pieces.len());
    let mut open: Option<usize> = None;

    for (i, piece) in pieces.iter().enumerate() {
        if piece.starts_with(QUOTE) {
            open = Some(i);
        }

        if let Some(start) = open {
            if piece.ends_with(QUOTE) {
                let joined = pieces[start..=i].join(" ");
                // Drop the tokens already emitted for the span's earlier pieces.
                tokens.truncate(tokens.len() - (i - start));
                tokens.push(strip_quotes(&joined).to_string());
                open = None;
                continue;
            }
        }

        tokens.push((*piece).to_string());
    }

    tokens
}

/// Strips one leading and one trailing quote.
fn strip_quotes(span: &str) -> &str {
    let inner = span.strip_prefix(QUOTE).unwrap_or(span);
    inner.strip_suffix(QUOTE).unwrap_or(inner)
}
