pub mod candidates;
pub mod placement;
pub mod regenerate;
pub mod rules;

pub use candidates::{candidates, is_candidate};
pub use placement::generate;
pub use regenerate::regenerate;
pub use rules::{DEFAULT_RULES, FrequencyRule, RuleSet, SlotRule};
