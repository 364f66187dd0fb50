//! Rule graph nodes.

use std::fmt;

use regex::Regex;
use smallvec::SmallVec;

use crate::{IrError, RuleFlags, RuleId};

/// Ordered child list of a `Sequence` or `Choice`.
pub type RuleList = SmallVec<[RuleId; 4]>;

/// A compiled, start-anchored regular expression.
///
/// The user's pattern is wrapped as `^(?:…)`, so a match can only begin at
/// offset 0 of the slice it is run against.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source`, rejecting patterns that accept the empty string.
    pub fn new(source: &str) -> Result<Self, IrError> {
        let regex = Regex::new(&format!("^(?:{source})")).map_err(|err| IrError::InvalidPattern {
            pattern: source.to_owned(),
            message: err.to_string(),
        })?;
        if regex.is_match("") {
            return Err(IrError::EmptyPattern {
                pattern: source.to_owned(),
            });
        }
        Ok(Pattern {
            source: source.to_owned(),
            regex,
        })
    }

    /// The pattern as written by the grammar author.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Length in bytes of the match at the start of `input`, if any.
    ///
    /// A returned length of zero means the pattern matched the empty string
    /// in this context; callers treat that as a definition error.
    #[inline]
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.regex.find(input).map(|m| m.end())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.source)
    }
}

/// Node variants of the rule graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleKind {
    /// Exact text.
    Literal(String),
    /// Regular expression anchored at the current position.
    Pattern(Pattern),
    /// Every child, contiguously.
    Sequence(RuleList),
    /// First matching child, in order.
    Choice(RuleList),
    /// Child or nothing; never fails.
    Optional(RuleId),
    /// Zero or more consecutive non-empty matches of the child; never fails.
    Repetition(RuleId),
    /// Always matches, consumes nothing.
    Epsilon,
    /// Matches only at the end of the buffer.
    EndOfInput,
    /// Placeholder for a rule defined later. `None` until bound.
    Reference(Option<RuleId>),
}

impl RuleKind {
    /// Outgoing edges, in evaluation order.
    pub fn children(&self) -> &[RuleId] {
        match self {
            RuleKind::Sequence(children) | RuleKind::Choice(children) => children,
            RuleKind::Optional(child)
            | RuleKind::Repetition(child)
            | RuleKind::Reference(Some(child)) => std::slice::from_ref(child),
            RuleKind::Literal(_)
            | RuleKind::Pattern(_)
            | RuleKind::Epsilon
            | RuleKind::EndOfInput
            | RuleKind::Reference(None) => &[],
        }
    }

    /// Mutable outgoing edges, used by the reference rewrite pass.
    pub(crate) fn children_mut(&mut self) -> &mut [RuleId] {
        match self {
            RuleKind::Sequence(children) | RuleKind::Choice(children) => children,
            RuleKind::Optional(child)
            | RuleKind::Repetition(child)
            | RuleKind::Reference(Some(child)) => std::slice::from_mut(child),
            RuleKind::Literal(_)
            | RuleKind::Pattern(_)
            | RuleKind::Epsilon
            | RuleKind::EndOfInput
            | RuleKind::Reference(None) => &mut [],
        }
    }

    /// Flags that hold for this variant regardless of its children.
    pub fn intrinsic_flags(&self) -> RuleFlags {
        match self {
            RuleKind::Optional(_) | RuleKind::Repetition(_) | RuleKind::Epsilon => {
                RuleFlags::NULLABLE
            }
            RuleKind::Literal(text) if text.is_empty() => RuleFlags::NULLABLE,
            _ => RuleFlags::empty(),
        }
    }
}

/// A node of the rule graph.
///
/// Names are labels for humans; identity is the node's [`RuleId`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    name: String,
    kind: RuleKind,
    flags: RuleFlags,
}

impl Rule {
    /// Create a rule with the flags intrinsic to its variant.
    pub fn new(name: impl Into<String>, kind: RuleKind) -> Self {
        let flags = kind.intrinsic_flags();
        Rule {
            name: name.into(),
            kind,
            flags,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    #[inline]
    pub fn flags(&self) -> RuleFlags {
        self.flags
    }

    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.flags.is_nullable()
    }

    #[inline]
    pub fn is_left_recursive(&self) -> bool {
        self.flags.is_left_recursive()
    }

    #[inline]
    pub fn is_reference(&self) -> bool {
        matches!(self.kind, RuleKind::Reference(_))
    }

    /// Add analysis flags. Existing flags are kept.
    pub fn insert_flags(&mut self, flags: RuleFlags) {
        self.flags.insert(flags);
    }

    pub(crate) fn kind_mut(&mut self) -> &mut RuleKind {
        &mut self.kind
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
