use crate::core::utils::elements;
use std::fmt;

/// The token that stands for "any element" in wildcard-eligible key positions.
pub const WILDCARD_TOKEN: &str = "X";

/// A concrete chemical element used as a key component.
///
/// Symbols are interned against the periodic table, so equality is an exact
/// string match and the type is `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementSymbol(&'static str);

impl ElementSymbol {
    /// Parses an element symbol, returning `None` for anything that is not a
    /// periodic-table symbol (including the wildcard `X`).
    pub fn new(symbol: &str) -> Option<Self> {
        elements::interned_element(symbol).map(Self)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ElementSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One position of a tuple key: either a concrete element or the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    Element(ElementSymbol),
    Wildcard,
}

impl Species {
    pub fn parse(token: &str) -> Option<Self> {
        if token == WILDCARD_TOKEN {
            Some(Species::Wildcard)
        } else {
            ElementSymbol::new(token).map(Species::Element)
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Species::Wildcard)
    }

    pub fn element(&self) -> Option<ElementSymbol> {
        match self {
            Species::Element(symbol) => Some(*symbol),
            Species::Wildcard => None,
        }
    }
}

impl From<ElementSymbol> for Species {
    fn from(symbol: ElementSymbol) -> Self {
        Species::Element(symbol)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Element(symbol) => symbol.fmt(f),
            Species::Wildcard => f.write_str(WILDCARD_TOKEN),
        }
    }
}

/// An ordered tuple of 0 to 4 species addressing one table entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TupleKey(Box<[Species]>);

impl TupleKey {
    pub fn new(species: impl Into<Box<[Species]>>) -> Self {
        Self(species.into())
    }

    /// Builds a key from symbol strings, `None` if any token is neither an
    /// element nor the wildcard.
    pub fn parse<S: AsRef<str>>(symbols: &[S]) -> Option<Self> {
        symbols
            .iter()
            .map(|s| Species::parse(s.as_ref()))
            .collect::<Option<Vec<_>>>()
            .map(Self::new)
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn species(&self) -> &[Species] {
        &self.0
    }

    pub fn reversed(&self) -> Self {
        self.0.iter().rev().copied().collect::<Vec<_>>().into()
    }

    /// Returns a copy with the given positions replaced by the wildcard.
    pub fn relaxed(&self, positions: &[usize]) -> Self {
        let mut species = self.0.clone();
        for &position in positions {
            if let Some(slot) = species.get_mut(position) {
                *slot = Species::Wildcard;
            }
        }
        Self(species)
    }

    pub fn has_wildcard(&self) -> bool {
        self.0.iter().any(Species::is_wildcard)
    }
}

impl From<Vec<Species>> for TupleKey {
    fn from(species: Vec<Species>) -> Self {
        Self::new(species)
    }
}

impl fmt::Display for TupleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, species) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            species.fmt(f)?;
        }
        Ok(())
    }
}
