use crate::id::Identifier;
use crate::strategy::Strategy;

/// Per-actor configuration supplied at spawn time.
#[derive(Clone, Debug)]
pub struct Properties {
    pub parent: Option<Identifier>,
    pub supervision_strategy: Strategy,
    pub root_strategy: Strategy,
}

impl Properties {
    pub fn new(parent: Option<Identifier>) -> Self {
        Properties {
            parent,
            supervision_strategy: Strategy::default(),
            root_strategy: Strategy::default(),
        }
    }

    pub fn with_strategies(
        parent: Option<Identifier>,
        supervision_strategy: Strategy,
        root_strategy: Strategy,
    ) -> Self {
        Properties {
            parent,
            supervision_strategy,
            root_strategy,
        }
    }
}
