use std::error::Error;
use std::fmt;

/// Ordered set of distinct, non-whitespace characters that words are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    /// Fewer than two distinct characters after trimming.
    TooShort(usize),
    Whitespace(char),
    Duplicate(char),
}

impl fmt::Display for AlphabetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlphabetError::TooShort(n) => {
                write!(f, "need at least 2 distinct letters, got {n}")
            }
            AlphabetError::Whitespace(_) => write!(f, "letters must not contain whitespace"),
            AlphabetError::Duplicate(c) => write!(f, "duplicate letter '{c}'"),
        }
    }
}

impl Error for AlphabetError {}

impl Alphabet {
    /// Parses a user-supplied letters string. Leading/trailing whitespace is
    /// trimmed; anything else must be distinct and non-whitespace.
    pub fn parse(input: &str) -> Result<Self, AlphabetError> {
        let mut chars: Vec<char> = Vec::new();
        for c in input.trim().chars() {
            if c.is_whitespace() {
                return Err(AlphabetError::Whitespace(c));
            }
            if chars.contains(&c) {
                return Err(AlphabetError::Duplicate(c));
            }
            chars.push(c);
        }
        if chars.len() < 2 {
            return Err(AlphabetError::TooShort(chars.len()));
        }
        Ok(Self { chars })
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Every word of `length` characters over `alphabet`, letters may repeat.
///
/// Built as an iterative Cartesian power: start from the length-1 words and
/// prepend each alphabet letter to every word of the previous round, exactly
/// `length - 1` times. Enumeration order is deterministic: for each letter A
/// in alphabet order, for each previously generated suffix S, emit A+S.
///
/// Output size is `|alphabet| ^ length`; no cap is enforced here, callers
/// must guard against combinatorial explosion (see `config::MAX_COMBINATIONS`).
pub fn generate(length: usize, alphabet: &Alphabet) -> Vec<String> {
    debug_assert!(length >= 1, "word length must be positive");

    let mut output: Vec<String> = alphabet.chars().iter().map(|c| c.to_string()).collect();
    for _ in 1..length {
        let mut next = Vec::with_capacity(output.len() * alphabet.len());
        for &letter in alphabet.chars() {
            for suffix in &output {
                let mut word = String::with_capacity(suffix.len() + 1);
                word.push(letter);
                word.push_str(suffix);
                next.push(word);
            }
        }
        output = next;
    }
    output
}
