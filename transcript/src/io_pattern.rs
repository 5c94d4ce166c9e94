use std::fmt;

use itertools::Itertools;

use crate::{GrammarError, OpQueue};

/// Separates the domain separator and the operations of a protocol description.
pub const SEP_BYTE: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Absorb,
    Squeeze,
    Ratchet,
    Hint,
}

impl OpKind {
    /// The byte that introduces the operation in a protocol description.
    pub fn tag(&self) -> u8 {
        match self {
            OpKind::Absorb => b'A',
            OpKind::Squeeze => b'S',
            OpKind::Ratchet => b'R',
            OpKind::Hint => b'H',
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'A' => Some(OpKind::Absorb),
            b'S' => Some(OpKind::Squeeze),
            b'R' => Some(OpKind::Ratchet),
            b'H' => Some(OpKind::Hint),
            _ => None,
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::Absorb => write!(f, "Absorb"),
            OpKind::Squeeze => write!(f, "Squeeze"),
            OpKind::Ratchet => write!(f, "Ratchet"),
            OpKind::Hint => write!(f, "Hint"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    pub kind: OpKind,
    pub label: Vec<u8>,
    pub size: u64,
}

impl Op {
    pub fn label_lossy(&self) -> String {
        String::from_utf8_lossy(&self.label).into_owned()
    }
}

/// A protocol description: `domain_separator \0 (kind size label \0)*`.
///
/// Two sessions run the same protocol iff their descriptions are byte-equal; the session tag
/// is derived from the exact bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IOPattern {
    pub domain_separator: Vec<u8>,
    pub ops: Vec<Op>,
}

/// Split at the first separator; without one, everything is the head.
#[inline]
fn split_at_sep(buf: &[u8]) -> (&[u8], &[u8]) {
    match buf.iter().position(|b| *b == SEP_BYTE) {
        Some(i) => (&buf[..i], &buf[i + 1..]),
        None => (buf, &[]),
    }
}

fn check_label(label: &str) -> Result<(), GrammarError> {
    let reason = if label.as_bytes().contains(&SEP_BYTE) {
        Some("contains the separator byte")
    } else if label.starts_with(|c: char| c.is_ascii_digit()) {
        Some("starts with a digit")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(GrammarError::InvalidLabel {
            label: label.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

impl IOPattern {
    /// Parse a protocol description. Parsing is total apart from unknown operation kinds, sizes
    /// overflowing 64 bits and empty absorb, squeeze or hint operations.
    pub fn parse(text: &[u8]) -> Result<Self, GrammarError> {
        let (domain_separator, mut rest) = split_at_sep(text);
        let mut ops = vec![];
        while !rest.is_empty() {
            let offset = text.len() - rest.len();
            let kind = OpKind::from_tag(rest[0]).ok_or(GrammarError::UnknownOpKind {
                offset,
                byte: rest[0],
            })?;
            rest = &rest[1..];

            let n_digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
            let size = rest[..n_digits].iter().try_fold(0u64, |acc, d| {
                acc.checked_mul(10)
                    .and_then(|acc| acc.checked_add((d - b'0') as u64))
                    .ok_or(GrammarError::SizeOverflow { offset: offset + 1 })
            })?;
            rest = &rest[n_digits..];
            if size == 0 && kind != OpKind::Ratchet {
                return Err(GrammarError::ZeroSize(kind));
            }

            let (label, tail) = split_at_sep(rest);
            ops.push(Op {
                kind,
                label: label.to_vec(),
                size,
            });
            rest = tail;
        }

        log::debug!(
            "parsed protocol `{}` with {} operations",
            String::from_utf8_lossy(domain_separator),
            ops.len()
        );
        Ok(Self {
            domain_separator: domain_separator.to_vec(),
            ops,
        })
    }

    /// Start a description with the given domain separator.
    pub fn new(domain_separator: &str) -> Result<Self, GrammarError> {
        if domain_separator.as_bytes().contains(&SEP_BYTE) {
            return Err(GrammarError::InvalidLabel {
                label: domain_separator.to_string(),
                reason: "contains the separator byte",
            });
        }
        Ok(Self {
            domain_separator: domain_separator.as_bytes().to_vec(),
            ops: vec![],
        })
    }

    fn push(mut self, kind: OpKind, size: u64, label: &str) -> Result<Self, GrammarError> {
        check_label(label)?;
        if size == 0 && kind != OpKind::Ratchet {
            return Err(GrammarError::ZeroSize(kind));
        }
        self.ops.push(Op {
            kind,
            label: label.as_bytes().to_vec(),
            size,
        });
        Ok(self)
    }

    pub fn absorb(self, count: u64, label: &str) -> Result<Self, GrammarError> {
        self.push(OpKind::Absorb, count, label)
    }

    pub fn squeeze(self, count: u64, label: &str) -> Result<Self, GrammarError> {
        self.push(OpKind::Squeeze, count, label)
    }

    pub fn hint(self, count: u64, label: &str) -> Result<Self, GrammarError> {
        self.push(OpKind::Hint, count, label)
    }

    pub fn ratchet(self) -> Result<Self, GrammarError> {
        self.push(OpKind::Ratchet, 0, "")
    }

    /// Render the description text. Ratchets are written without a size.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.domain_separator.clone();
        for op in &self.ops {
            out.push(SEP_BYTE);
            out.push(op.kind.tag());
            if op.kind != OpKind::Ratchet || op.size != 0 {
                out.extend_from_slice(op.size.to_string().as_bytes());
            }
            out.extend_from_slice(&op.label);
        }
        out
    }

    /// A fresh conformance queue over a copy of the operations.
    pub fn op_queue(&self) -> OpQueue {
        OpQueue::new(&self.ops)
    }
}

impl fmt::Display for IOPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IOPattern {{")?;
        writeln!(
            f,
            "  DomainSeparator: {}",
            String::from_utf8_lossy(&self.domain_separator)
        )?;
        writeln!(f, "  Ops:")?;
        if !self.ops.is_empty() {
            let ops = self
                .ops
                .iter()
                .map(|op| format!("    * {} {} {}", op.kind, op.size, op.label_lossy()))
                .join("\n");
            writeln!(f, "{ops}")?;
        }
        write!(f, "}}")
    }
}
