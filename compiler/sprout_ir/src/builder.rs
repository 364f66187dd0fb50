//! Combinator API for assembling grammars.
//!
//! Rules are created bottom-up. Recursion is expressed by creating a
//! [`forward_reference`](GrammarBuilder::forward_reference) first, using it
//! as a child, and binding it once the real rule exists:
//!
//! ```text
//! // R -> R a | b
//! let r_ref = b.forward_reference();
//! let a = b.literal("a");
//! let ra = b.sequence("Ra", [r_ref, a]);
//! let lit_b = b.literal("b");
//! let r = b.choice("R", [ra, lit_b]);
//! b.bind(r_ref, r)?;
//! ```

use crate::{IrError, Pattern, Rule, RuleArena, RuleId, RuleKind};

/// Name given to forward references until they are bound.
const UNBOUND_NAME: &str = "<forward>";

/// Builds a [`RuleArena`] through PEG combinators.
#[derive(Clone, Debug, Default)]
pub struct GrammarBuilder {
    arena: RuleArena,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match `text` exactly. The rule is named after the text.
    pub fn literal(&mut self, text: impl Into<String>) -> RuleId {
        let text = text.into();
        self.arena
            .alloc(Rule::new(text.clone(), RuleKind::Literal(text)))
    }

    /// Match a regular expression anchored at the current position.
    ///
    /// Fails if the expression does not compile or accepts the empty string.
    pub fn pattern(&mut self, regex: &str) -> Result<RuleId, IrError> {
        let pattern = Pattern::new(regex)?;
        Ok(self
            .arena
            .alloc(Rule::new(format!("re[{regex}]"), RuleKind::Pattern(pattern))))
    }

    /// Match every rule in order.
    pub fn sequence(
        &mut self,
        name: impl Into<String>,
        rules: impl IntoIterator<Item = RuleId>,
    ) -> RuleId {
        let children = rules.into_iter().collect();
        self.arena
            .alloc(Rule::new(name, RuleKind::Sequence(children)))
    }

    /// Match the first rule that succeeds, trying them in order.
    pub fn choice(
        &mut self,
        name: impl Into<String>,
        rules: impl IntoIterator<Item = RuleId>,
    ) -> RuleId {
        let children = rules.into_iter().collect();
        self.arena.alloc(Rule::new(name, RuleKind::Choice(children)))
    }

    /// Match `rule` or nothing. Named `<child>?`.
    pub fn optional(&mut self, rule: RuleId) -> RuleId {
        let name = format!("{}?", self.arena.name(rule));
        self.arena.alloc(Rule::new(name, RuleKind::Optional(rule)))
    }

    /// Match `rule` zero or more times.
    pub fn repetition(&mut self, name: impl Into<String>, rule: RuleId) -> RuleId {
        self.arena.alloc(Rule::new(name, RuleKind::Repetition(rule)))
    }

    /// Match `rule` one or more times: `rule rule*`.
    pub fn plus(&mut self, name: impl Into<String>, rule: RuleId) -> RuleId {
        let name = name.into();
        let rest = self.repetition(format!("{name}*"), rule);
        self.sequence(name, [rule, rest])
    }

    /// Always match, consuming nothing.
    pub fn epsilon(&mut self, name: impl Into<String>) -> RuleId {
        self.arena.alloc(Rule::new(name, RuleKind::Epsilon))
    }

    /// Match only at the end of the buffer.
    pub fn end_of_input(&mut self, name: impl Into<String>) -> RuleId {
        self.arena.alloc(Rule::new(name, RuleKind::EndOfInput))
    }

    /// Create a placeholder to be bound later with [`bind`](Self::bind).
    pub fn forward_reference(&mut self) -> RuleId {
        self.arena
            .alloc(Rule::new(UNBOUND_NAME, RuleKind::Reference(None)))
    }

    /// Bind a placeholder to its target. The placeholder takes the target's name.
    pub fn bind(&mut self, placeholder: RuleId, target: RuleId) -> Result<(), IrError> {
        let name = self.arena.name(target).to_owned();
        let rule = self.arena.get_mut(placeholder);
        if !rule.is_reference() {
            return Err(IrError::NotAReference {
                rule: placeholder,
                name: rule.name().to_owned(),
            });
        }
        if let RuleKind::Reference(slot) = rule.kind_mut() {
            if slot.is_some() {
                return Err(IrError::AlreadyBound { rule: placeholder });
            }
            *slot = Some(target);
        }
        rule.set_name(name);
        Ok(())
    }

    /// The rules built so far.
    pub fn arena(&self) -> &RuleArena {
        &self.arena
    }

    /// Finish building and hand over the arena.
    pub fn finish(self) -> RuleArena {
        self.arena
    }
}
