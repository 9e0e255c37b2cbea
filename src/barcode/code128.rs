//! Code 128 symbology
//!
//! Turns ASCII text into Code 128 codewords and the bar/space module
//! sequence. Code sets are chosen automatically: digit runs of four or more
//! are packed into set C, control characters use set A, everything else
//! set B.

use std::fmt;
use thiserror::Error;

/// Bar/space widths for codeword values 0..=106, bar first
const PATTERNS: [&[u8]; 107] = [
    b"212222", b"222122", b"222221", b"121223", b"121322", b"131222", b"122213", b"122312",
    b"132212", b"221213", b"221312", b"231212", b"112232", b"122132", b"122231", b"113222",
    b"123122", b"123221", b"223211", b"221132", b"221231", b"213212", b"223112", b"312131",
    b"311222", b"321122", b"321221", b"312212", b"322112", b"322211", b"212123", b"212321",
    b"232121", b"111323", b"131123", b"131321", b"112313", b"132113", b"132311", b"211313",
    b"231113", b"231311", b"112133", b"112331", b"132131", b"113123", b"113321", b"133121",
    b"313121", b"211331", b"231131", b"213113", b"213311", b"213131", b"311123", b"311321",
    b"331121", b"312113", b"312311", b"332111", b"314111", b"221411", b"431111", b"111224",
    b"111422", b"121124", b"121421", b"141122", b"141221", b"112214", b"112412", b"122114",
    b"122411", b"142112", b"142211", b"241211", b"221114", b"413111", b"241112", b"134111",
    b"111242", b"121142", b"121241", b"114212", b"124112", b"124211", b"411212", b"421112",
    b"421211", b"212141", b"214121", b"412121", b"111143", b"111341", b"131141", b"114113",
    b"114311", b"411113", b"411311", b"113141", b"114131", b"311141", b"411131", b"211412",
    b"211214", b"211232", b"2331112",
];

const START_A: u8 = 103;
const START_B: u8 = 104;
const START_C: u8 = 105;
const STOP: u8 = 106;

/// Switch to set C (valid in A and B)
const CODE_C: u8 = 99;
/// Switch to set B (valid in A and C)
const CODE_B: u8 = 100;
/// Switch to set A (valid in B and C)
const CODE_A: u8 = 101;

const CHECKSUM_MODULUS: u32 = 103;

/// Code 128 character subsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSet {
    /// Upper case, digits, punctuation and ASCII control characters
    A,
    /// Full printable ASCII
    B,
    /// Digit pairs 00..=99
    C,
}

impl fmt::Display for CodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        };
        write!(f, "{}", name)
    }
}

/// Errors raised while encoding text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymbologyError {
    #[error("nothing to encode")]
    Empty,

    #[error("character {ch:?} at position {position} is not encodable in Code 128")]
    Unsupported { ch: char, position: usize },
}

/// An encoded Code 128 symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code128 {
    /// Start, data, checksum and stop codewords
    codewords: Vec<u8>,
    start: CodeSet,
}

impl Code128 {
    /// All codewords including start, checksum and stop
    pub fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    /// Code set the symbol starts in
    pub fn start_set(&self) -> CodeSet {
        self.start
    }

    /// The modulo-103 check codeword
    pub fn checksum(&self) -> u8 {
        self.codewords[self.codewords.len() - 2]
    }

    /// Bars (`true`) and spaces (`false`), one entry per module, no quiet zone
    pub fn modules(&self) -> Vec<bool> {
        let mut modules = Vec::with_capacity(self.codewords.len() * 11 + 2);
        for &value in &self.codewords {
            for (i, width) in PATTERNS[value as usize].iter().enumerate() {
                let bar = i % 2 == 0;
                for _ in 0..(width - b'0') {
                    modules.push(bar);
                }
            }
        }
        modules
    }
}

/// Encode ASCII text as a Code 128 symbol with automatic code-set selection
pub fn encode(data: &str) -> Result<Code128, SymbologyError> {
    if data.is_empty() {
        return Err(SymbologyError::Empty);
    }
    if let Some((position, ch)) = data.char_indices().find(|(_, c)| !c.is_ascii()) {
        return Err(SymbologyError::Unsupported { ch, position });
    }

    let bytes = data.as_bytes();
    let start = start_set(bytes);
    let mut codewords = vec![match start {
        CodeSet::A => START_A,
        CodeSet::B => START_B,
        CodeSet::C => START_C,
    }];

    let mut set = start;
    let mut i = 0;
    while i < bytes.len() {
        match set {
            CodeSet::C => {
                if i + 1 < bytes.len() && bytes[i].is_ascii_digit() && bytes[i + 1].is_ascii_digit()
                {
                    codewords.push((bytes[i] - b'0') * 10 + (bytes[i + 1] - b'0'));
                    i += 2;
                } else {
                    set = text_set(&bytes[i..]);
                    codewords.push(if set == CodeSet::A { CODE_A } else { CODE_B });
                }
            }
            CodeSet::A | CodeSet::B => {
                let run = digit_run(&bytes[i..]);
                if run >= 4 && run % 2 == 0 {
                    codewords.push(CODE_C);
                    set = CodeSet::C;
                    continue;
                }

                let byte = bytes[i];
                if let Some(value) = text_value(set, byte) {
                    codewords.push(value);
                    i += 1;
                    continue;
                }

                let other = if set == CodeSet::A {
                    CodeSet::B
                } else {
                    CodeSet::A
                };
                if text_value(other, byte).is_none() {
                    return Err(SymbologyError::Unsupported {
                        ch: byte as char,
                        position: i,
                    });
                }
                codewords.push(if other == CodeSet::A { CODE_A } else { CODE_B });
                set = other;
            }
        }
    }

    let checksum = codewords
        .iter()
        .enumerate()
        .map(|(position, &value)| position.max(1) as u32 * value as u32)
        .sum::<u32>()
        % CHECKSUM_MODULUS;
    codewords.push(checksum as u8);
    codewords.push(STOP);

    Ok(Code128 { codewords, start })
}

/// Pick the start set for the whole input
fn start_set(bytes: &[u8]) -> CodeSet {
    let run = digit_run(bytes);
    if run >= 2 && run % 2 == 0 && (run >= 4 || run == bytes.len()) {
        CodeSet::C
    } else {
        text_set(bytes)
    }
}

/// A if a control character comes before any lower case letter, else B
fn text_set(bytes: &[u8]) -> CodeSet {
    for &b in bytes {
        if b < 32 {
            return CodeSet::A;
        }
        if b >= 96 {
            return CodeSet::B;
        }
    }
    CodeSet::B
}

/// Number of consecutive ASCII digits at the start of `bytes`
fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Codeword value of a single character in set A or B
fn text_value(set: CodeSet, byte: u8) -> Option<u8> {
    match (set, byte) {
        (CodeSet::A, 32..=95) => Some(byte - 32),
        (CodeSet::A, 0..=31) => Some(byte + 64),
        (CodeSet::B, 32..=127) => Some(byte - 32),
        _ => None,
    }
}
