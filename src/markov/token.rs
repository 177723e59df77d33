//! Symbols and states of the transition table

/// One position in a padded sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token<S> {
    /// Sequence start/end marker used for padding
    Boundary,
    /// A learned alphabet symbol
    Symbol(S),
}

impl<S> Token<S> {
    /// Whether this is the boundary marker
    pub const fn is_boundary(&self) -> bool {
        matches!(self, Self::Boundary)
    }

    /// Borrow the wrapped symbol, if any
    pub const fn symbol(&self) -> Option<&S> {
        match self {
            Self::Symbol(symbol) => Some(symbol),
            Self::Boundary => None,
        }
    }
}

impl<S> From<S> for Token<S> {
    fn from(symbol: S) -> Self {
        Self::Symbol(symbol)
    }
}

/// Lookup key of the transition table: exactly `order` tokens
pub type State<S> = Vec<Token<S>>;

/// State made only of boundary markers, used to restart a sequence
pub fn boundary_state<S>(order: usize) -> State<S> {
    (0..order).map(|_| Token::Boundary).collect()
}

/// Build a state from the last `order` symbols, left-padded with boundaries
pub fn tail_state<S: Clone>(history: &[S], order: usize) -> State<S> {
    let available = history.len().min(order);
    let mut state = boundary_state(order - available);
    state.extend(
        history
            .iter()
            .skip(history.len() - available)
            .cloned()
            .map(Token::Symbol),
    );
    state
}
