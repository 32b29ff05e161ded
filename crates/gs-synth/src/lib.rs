pub mod cache;
pub mod distance;
pub mod graph;
pub mod rough;

pub use cache::{generate_rules, pairs_to_rules, synthesize_pairs};
pub use distance::{edit_distance, is_title};
pub use graph::{LexicalGraph, MemoryGraph, Sense, SensePos};
pub use rough::{
    rough_mapping, SynthesizedEntry, DEFAULT_MAX_DISTANCE, FEMININE_MARKERS, PERSON_CATEGORY,
};
