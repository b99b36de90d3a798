//! Line classification
//!
//! Splits submitted lines into local directives and pass-through text.

use console_types::Line;
use serde::{Deserialize, Serialize};

/// A parsed local command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// Directive name without the sentinel prefix
    pub name: String,
    /// Whitespace-separated arguments
    ///
    /// Never empty: a directive typed without arguments carries a single
    /// empty-string argument.
    pub args: Vec<String>,
    /// The submitted line, unmodified
    pub raw: Line,
}

impl Directive {
    /// Returns true if the directive was typed without arguments
    pub fn has_no_arguments(&self) -> bool {
        self.args.len() == 1 && self.args[0].is_empty()
    }
}

/// Result of classifying a submitted line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// Local command, handled by the registry
    Directive(Directive),
    /// Text destined for the peer
    PlainText(Line),
}

impl Classified {
    /// Returns the directive if this is one
    pub fn as_directive(&self) -> Option<&Directive> {
        match self {
            Self::Directive(d) => Some(d),
            Self::PlainText(_) => None,
        }
    }

    /// Returns the original submitted line
    pub fn line(&self) -> &Line {
        match self {
            Self::Directive(d) => &d.raw,
            Self::PlainText(line) => line,
        }
    }
}

/// Classifies `raw` against the sentinel `prefix`
///
/// A line is a directive when its very first character is the prefix. The
/// first whitespace token (minus the prefix) is the name; the rest are
/// arguments.
pub fn classify(raw: &Line, prefix: char) -> Classified {
    let Some(body) = raw.as_str().strip_prefix(prefix) else {
        return Classified::PlainText(raw.clone());
    };

    let mut tokens = body.split_whitespace();

    // "/ foo" has an empty name; "/" alone too. Both fall through to an
    // unknown-name lookup later.
    let name = if body.starts_with(char::is_whitespace) {
        String::new()
    } else {
        tokens.next().unwrap_or_default().to_string()
    };

    let mut args: Vec<String> = tokens.map(str::to_string).collect();
    if args.is_empty() {
        args.push(String::new());
    }

    Classified::Directive(Directive {
        name,
        args,
        raw: raw.clone(),
    })
}
