//! Rebuild text from fragments.
//!
//! Spacing rules:
//! - No space before punctuation (as decided by the [`Tagger`]) or at the
//!   start of the text.
//! - An opening `"` gets a space before it and suppresses the space after
//!   it; a closing `"` attaches to the previous token.
//! - Substitutions render as `<del>ORIGINAL</del><ins>REPLACEMENT</ins>`
//!   and are spaced like words.
//!
//! Example:
//!   [Hello][,][world][.] → "Hello, world."

use gs_core::Fragment;

use crate::tokenize::Tagger;

pub fn reassemble<T: Tagger + ?Sized>(sentences: &[Vec<Fragment>], tagger: &T) -> String {
    let mut buf = String::new();
    let mut at_start = true;
    let mut in_dquote = false;

    for fragment in sentences.iter().flatten() {
        match fragment {
            Fragment::Word { text } if text == "\"" => {
                if in_dquote {
                    in_dquote = false;
                } else {
                    if !at_start {
                        buf.push(' ');
                    }
                    at_start = true;
                    in_dquote = true;
                }
            }
            Fragment::Word { text } if tagger.is_punctuation(text) || at_start => {
                at_start = false;
            }
            _ if at_start => at_start = false,
            _ => buf.push(' '),
        }

        match fragment {
            Fragment::Word { text } => buf.push_str(text),
            Fragment::Substitution(s) => {
                buf.push_str("<del>");
                buf.push_str(&s.original);
                buf.push_str("</del><ins>");
                buf.push_str(&s.replacement);
                buf.push_str("</ins>");
            }
        }
    }

    buf
}
