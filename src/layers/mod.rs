//! Ordered layer stack reduced to a single pattern by a left fold.

pub mod session;

use crate::error::{PatternError, Result};
use crate::pattern::Pattern;

/// How a layer is folded into the accumulated pattern below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerOp {
    /// Operator of a freshly added layer. On the bottom layer it is a no-op
    /// marker; anywhere else it behaves like `Replace`.
    #[default]
    First,
    And,
    Or,
    Xor,
    /// Discard the accumulator and continue from this layer.
    Replace,
}

impl LayerOp {
    pub const ALL: &[LayerOp] = &[
        LayerOp::First,
        LayerOp::And,
        LayerOp::Or,
        LayerOp::Xor,
        LayerOp::Replace,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayerOp::First => "first",
            LayerOp::And => "and",
            LayerOp::Or => "or",
            LayerOp::Xor => "xor",
            LayerOp::Replace => "replace",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            LayerOp::First => ' ',
            LayerOp::And => '&',
            LayerOp::Or => '|',
            LayerOp::Xor => '^',
            LayerOp::Replace => '=',
        }
    }

    /// Accepts either the name or the symbol of an operator a user can
    /// choose. `First` is never parsed.
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .filter(|&op| op != LayerOp::First)
            .find(|op| op.name().eq_ignore_ascii_case(text) || text.chars().eq(std::iter::once(op.symbol())))
    }

    fn apply(self, acc: Pattern, layer: Pattern) -> Result<Pattern> {
        match self {
            LayerOp::And => acc.and(&layer),
            LayerOp::Or => acc.or(&layer),
            LayerOp::Xor => acc.xor(&layer),
            LayerOp::First | LayerOp::Replace => {
                acc.ensure_same_shape(&layer)?;
                Ok(layer)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub pattern: Pattern,
    pub negated: bool,
    pub op: LayerOp,
}

impl Layer {
    pub fn new(name: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            name: name.into(),
            pattern,
            negated: false,
            op: LayerOp::First,
        }
    }

    pub fn with_op(mut self, op: LayerOp) -> Self {
        self.op = op;
        self
    }

    /// Mark the layer as negated.
    pub fn with_negation(mut self) -> Self {
        self.negated = true;
        self
    }

    /// The layer's pattern with its negation flag applied.
    pub fn effective_pattern(&self) -> Pattern {
        if self.negated {
            !&self.pattern
        } else {
            self.pattern.clone()
        }
    }

    /// One-line summary, e.g. `2: rim (circle) [NOT] (&)`.
    pub fn describe(&self, index: usize) -> String {
        let mut line = format!("{index}: {}", self.name);
        if self.negated {
            line.push_str(" [NOT]");
        }
        if index > 0 {
            line.push_str(&format!(" ({})", self.op.symbol()));
        }
        line
    }
}

/// Layers applied bottom (index 0) to top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn get(&self, index: usize) -> Result<&Layer> {
        let len = self.layers.len();
        self.layers
            .get(index)
            .ok_or(PatternError::IndexOutOfRange { index, len })
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Layer> {
        let len = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or(PatternError::IndexOutOfRange { index, len })
    }

    /// Append a layer on top. Returns its index.
    pub fn push(&mut self, layer: Layer) -> usize {
        self.layers.push(layer);
        self.layers.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Result<Layer> {
        self.get(index)?;
        Ok(self.layers.remove(index))
    }

    pub fn rename(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.get_mut(index)?.name = name.into();
        Ok(())
    }

    /// Flip the negation flag; returns the new value.
    pub fn toggle_negation(&mut self, index: usize) -> Result<bool> {
        let layer = self.get_mut(index)?;
        layer.negated = !layer.negated;
        Ok(layer.negated)
    }

    /// Set the combine operator. The bottom layer has no operator.
    pub fn set_op(&mut self, index: usize, op: LayerOp) -> Result<()> {
        let layer = self.get_mut(index)?;
        if index == 0 {
            return Err(PatternError::invalid_parameter(
                "the bottom layer has no combine operator",
            ));
        }
        layer.op = op;
        Ok(())
    }

    /// Swap with the previous layer (index - 1). Returns the new index.
    pub fn move_earlier(&mut self, index: usize) -> Result<usize> {
        self.get(index)?;
        if index == 0 {
            return Ok(0);
        }
        self.layers.swap(index, index - 1);
        Ok(index - 1)
    }

    /// Swap with the next layer (index + 1). Returns the new index.
    pub fn move_later(&mut self, index: usize) -> Result<usize> {
        self.get(index)?;
        if index + 1 >= self.layers.len() {
            return Ok(index);
        }
        self.layers.swap(index, index + 1);
        Ok(index + 1)
    }

    /// Fold all layers into one pattern.
    ///
    /// An empty stack yields an all-false `default_width` x `default_height`
    /// grid. Otherwise the bottom layer seeds the accumulator and every layer
    /// above is negated (if flagged) and combined with its operator. The
    /// first shape mismatch aborts the fold.
    pub fn reduce(&self, default_width: usize, default_height: usize) -> Result<Pattern> {
        let Some((first, rest)) = self.layers.split_first() else {
            return Pattern::new(default_width, default_height);
        };

        let mut acc = first.effective_pattern();
        for (i, layer) in rest.iter().enumerate() {
            if matches!(layer.op, LayerOp::First | LayerOp::Replace) {
                log::warn!(
                    "layer {} '{}' replaces everything below it",
                    i + 1,
                    layer.name
                );
            }
            acc = layer.op.apply(acc, layer.effective_pattern())?;
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{checkerboard, circle, triangle};

    fn stack_of(layers: Vec<Layer>) -> LayerStack {
        let mut stack = LayerStack::new();
        for layer in layers {
            stack.push(layer);
        }
        stack
    }

    #[test]
    fn empty_stack_reduces_to_blank() {
        let p = LayerStack::new().reduce(5, 3).unwrap();
        assert_eq!(p.dimensions(), (5, 3));
        assert_eq!(p.count_set(), 0);
    }

    #[test]
    fn circle_and_checker() {
        let c = circle(8, 8, 3).unwrap();
        let b = checkerboard(8, 8, 2).unwrap();
        let stack = stack_of(vec![
            Layer::new("c", c.clone()),
            Layer::new("b", b.clone()).with_op(LayerOp::And),
        ]);
        assert_eq!(stack.reduce(8, 8).unwrap(), c.and(&b).unwrap());
    }

    #[test]
    fn negation_applies_before_fold() {
        let c = circle(9, 9, 3).unwrap();
        let t = triangle(9, 9).unwrap();
        let stack = stack_of(vec![
            Layer::new("c", c.clone()).with_negation(),
            Layer::new("t", t.clone()).with_negation().with_op(LayerOp::Or),
        ]);
        let expected = (!&c).or(&!&t).unwrap();
        assert_eq!(stack.reduce(9, 9).unwrap(), expected);
    }

    #[test]
    fn bottom_operator_ignored() {
        let c = circle(6, 6, 2).unwrap();
        let stack = stack_of(vec![Layer::new("c", c.clone()).with_op(LayerOp::Xor)]);
        assert_eq!(stack.reduce(6, 6).unwrap(), c);
    }

    #[test]
    fn replace_and_default_op_discard_accumulator() {
        let c = circle(6, 6, 2).unwrap();
        let b = checkerboard(6, 6, 1).unwrap();
        let t = triangle(6, 6).unwrap();
        let stack = stack_of(vec![
            Layer::new("c", c.clone()),
            Layer::new("b", b.clone()).with_op(LayerOp::Replace),
        ]);
        assert_eq!(stack.reduce(6, 6).unwrap(), b);

        let stack = stack_of(vec![Layer::new("c", c), Layer::new("t", t.clone())]);
        assert_eq!(stack.reduce(6, 6).unwrap(), t);
    }

    #[test]
    fn left_fold_order() {
        let c = circle(8, 8, 3).unwrap();
        let b = checkerboard(8, 8, 2).unwrap();
        let t = triangle(8, 8).unwrap();
        let stack = stack_of(vec![
            Layer::new("c", c.clone()),
            Layer::new("b", b.clone()).with_op(LayerOp::Or),
            Layer::new("t", t.clone()).with_op(LayerOp::And),
        ]);
        let expected = c.or(&b).unwrap().and(&t).unwrap();
        assert_eq!(stack.reduce(8, 8).unwrap(), expected);
    }

    #[test]
    fn mismatch_aborts_fold() {
        let stack = stack_of(vec![
            Layer::new("a", circle(4, 4, 1).unwrap()),
            Layer::new("b", circle(3, 3, 1).unwrap()).with_op(LayerOp::Xor),
            Layer::new("c", circle(4, 4, 1).unwrap()).with_op(LayerOp::Replace),
        ]);
        assert!(matches!(
            stack.reduce(4, 4),
            Err(PatternError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn editing_operations() {
        let p = circle(4, 4, 1).unwrap();
        let mut stack = stack_of(vec![
            Layer::new("a", p.clone()),
            Layer::new("b", p.clone()),
            Layer::new("c", p),
        ]);

        stack.rename(1, "middle").unwrap();
        assert_eq!(stack.get(1).unwrap().name, "middle");

        assert!(stack.toggle_negation(2).unwrap());
        assert!(!stack.toggle_negation(2).unwrap());

        stack.set_op(2, LayerOp::Xor).unwrap();
        assert!(matches!(stack.set_op(0, LayerOp::And), Err(PatternError::InvalidParameter { .. })));

        assert_eq!(stack.move_earlier(2).unwrap(), 1);
        assert_eq!(stack.get(1).unwrap().name, "c");
        assert_eq!(stack.move_later(1).unwrap(), 2);
        assert_eq!(stack.move_later(2).unwrap(), 2);
        assert_eq!(stack.move_earlier(0).unwrap(), 0);

        let removed = stack.remove(0).unwrap();
        assert_eq!(removed.name, "a");
        assert_eq!(stack.len(), 2);
        assert_eq!(
            stack.remove(5),
            Err(PatternError::IndexOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn describe_line() {
        let layer = Layer::new("rim", circle(4, 4, 1).unwrap())
            .with_negation()
            .with_op(LayerOp::And);
        assert_eq!(layer.describe(0), "0: rim [NOT]");
        assert_eq!(layer.describe(2), "2: rim [NOT] (&)");
    }

    #[test]
    fn parse_ops() {
        assert_eq!(LayerOp::parse("AND"), Some(LayerOp::And));
        assert_eq!(LayerOp::parse("^"), Some(LayerOp::Xor));
        assert_eq!(LayerOp::parse("|"), Some(LayerOp::Or));
        assert_eq!(LayerOp::parse("nand"), None);
        assert_eq!(LayerOp::parse("replace"), Some(LayerOp::Replace));
        assert_eq!(LayerOp::parse("first"), None);
        assert_eq!(LayerOp::parse(" "), None);
    }

    #[test]
    fn with_negation_is_idempotent() {
        let layer = Layer::new("c", circle(4, 4, 1).unwrap())
            .with_negation()
            .with_negation();
        assert!(layer.negated);
    }
}
