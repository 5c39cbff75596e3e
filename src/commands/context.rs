//! Binding of tokens into flags and positional arguments.

use std::collections::BTreeMap;

use super::tokenizer::tokenize;

/// Structured arguments for one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    /// Tokens as produced by the tokenizer, command word included.
    pub raw_args: Vec<String>,
    /// Flag name to value. A flag without a value maps to an empty string.
    pub flags: BTreeMap<String, String>,
    /// Positional arguments in line order.
    pub positionals: Vec<String>,
}

impl CallContext {
    /// Tokenizes and binds a raw line.
    pub fn parse(line: &str) -> Self {
        bind(&tokenize(line))
    }

    /// Returns the command word, if any.
    pub fn command(&self) -> Option<&str> {
        self.raw_args.first().map(String::as_str)
    }

    /// Returns the value of a flag, or None if the flag was not given.
    pub fn flag(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(String::as_str)
    }

    /// Returns true if the flag was given, with or without a value.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Returns the first flag among `names` that was given.
    ///
    /// Useful for long/short pairs: `ctx.flag_any(&["name", "n"])`.
    pub fn flag_any(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.flag(name))
    }

    /// Returns the positional argument at `index`.
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(String::as_str)
    }
}

/// Returns the flag name if the token is a flag.
///
/// `--name` is a long flag, `-n` a short flag. A bare `-` or `--` is a flag
/// with an empty name.
pub fn flag_name(token: &str) -> Option<&str> {
    if token.len() >= 2 {
        if let Some(name) = token.strip_prefix("--") {
            return Some(name);
        }
    }
    token.strip_prefix('-')
}

/// Returns true if the token is a flag.
pub fn is_flag(token: &str) -> bool {
    flag_name(token).is_some()
}

/// Binds a token sequence into a call context.
///
/// Never fails: a flag without a following non-flag token gets an empty value,
/// and tokens that are neither flags nor eligible positionals are dropped.
///
/// A non-flag token at index `i > 0` is positional only when the token at
/// `i - 1` is non-empty and not a flag. Index 0 is the command word, and a
/// token directly after a flag is that flag's value, so neither is positional.
pub fn bind(tokens: &[String]) -> CallContext {
    let mut flags = BTreeMap::new();
    let mut positionals = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if let Some(name) = flag_name(token) {
            let value = tokens
                .get(i + 1)
                .filter(|next| !is_flag(next))
                .cloned()
                .unwrap_or_default();
            flags.insert(name.to_string(), value);
            continue;
        }

        if i == 0 {
            continue;
        }

        let previous = &tokens[i - 1];
        if !previous.is_empty() && !is_flag(previous) {
            positionals.push(token.clone());
        }
    }

    CallContext {
        raw_args: tokens.to_vec(),
        flags,
        positionals,
    }
}
