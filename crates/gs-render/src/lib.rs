pub mod reassemble;
pub mod result;
pub mod tokenize;
pub mod transform;
pub mod worker;

pub use reassemble::reassemble;
pub use result::{SwapResult, SwapStats};
pub use tokenize::{is_punctuation_token, HeuristicTagger, Tagger};
pub use transform::{swap_paragraph, swap_sentence};
pub use worker::{
    lines_between, render_html, select_lines, split_paragraphs, SwapEngine, HTML_FOOTER,
    HTML_HEADER,
};
