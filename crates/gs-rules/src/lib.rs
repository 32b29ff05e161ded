pub mod builtin;
pub mod mapping;
pub mod names;
pub mod rule;

pub use builtin::static_rules;
pub use mapping::{BiMapping, Mapping, SKIPPED_REPLACEMENTS};
pub use names::{NameCorpus, NameSet};
pub use rule::{CaseTransform, Pattern, Rule};
