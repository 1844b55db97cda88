/// One classified command-line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `-n`, `--name`, optionally with a value fused to it (`-n10`, `--name=v`).
    /// `text` carries the name without dashes.
    Name {
        text: String,
        attached: Option<String>,
    },
    /// Anything else. `escaped` is set for values that followed `--`; those
    /// are only ever bound positionally.
    Value { text: String, escaped: bool },
}

impl Token {
    pub fn name(text: impl Into<String>) -> Self {
        Self::Name {
            text: text.into(),
            attached: None,
        }
    }

    pub fn name_with(text: impl Into<String>, attached: impl Into<String>) -> Self {
        Self::Name {
            text: text.into(),
            attached: Some(attached.into()),
        }
    }

    pub fn value(text: impl Into<String>) -> Self {
        Self::Value {
            text: text.into(),
            escaped: false,
        }
    }

    pub fn escaped(text: impl Into<String>) -> Self {
        Self::Value {
            text: text.into(),
            escaped: true,
        }
    }

    pub fn is_name(&self) -> bool {
        matches!(self, Self::Name { .. })
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Name { text, .. } | Self::Value { text, .. } => text,
        }
    }
}

/// Turns raw arguments into tokens.
///
/// `is_known` reports whether a name (without dashes) belongs to a declared
/// option; it decides how `-abc` style arguments are split. Help names are
/// not known names, so in `-xh` the `h` is attached to `x` as its value.
pub trait Tokenize: Send + Sync {
    fn tokenize(&self, args: &[String], is_known: &dyn Fn(&str) -> bool) -> Vec<Token>;
}

/// The default tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardTokenizer {
    /// Treat `--` as end of options.
    pub dash_dash: bool,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        Self { dash_dash: true }
    }
}

impl Tokenize for StandardTokenizer {
    fn tokenize(&self, args: &[String], is_known: &dyn Fn(&str) -> bool) -> Vec<Token> {
        if self.dash_dash {
            preprocess_dash_dash(args, |head| tokenize(head, is_known))
        } else {
            tokenize(args, is_known)
        }
    }
}

/// Split `args` at the first `--`: everything before it goes through
/// `tokenize`, everything after it becomes escaped value tokens verbatim.
///
/// Custom tokenizers can reuse this to get standard `--` handling.
pub fn preprocess_dash_dash<F>(args: &[String], tokenize: F) -> Vec<Token>
where
    F: FnOnce(&[String]) -> Vec<Token>,
{
    match args.iter().position(|a| a == "--") {
        Some(at) => {
            let mut tokens = tokenize(&args[..at]);
            tokens.extend(args[at + 1..].iter().map(|a| Token::escaped(a.as_str())));
            tokens
        }
        None => tokenize(args),
    }
}

/// Classify each argument on its own. A bare `--` is a plain value here;
/// see [`preprocess_dash_dash`].
pub fn tokenize(args: &[String], is_known: &dyn Fn(&str) -> bool) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(args.len());
    for arg in args {
        tokenize_arg(arg, is_known, &mut tokens);
    }
    tokens
}

fn tokenize_arg(arg: &str, is_known: &dyn Fn(&str) -> bool, out: &mut Vec<Token>) {
    // --name, --name=value
    if let Some(rest) = arg.strip_prefix("--") {
        if rest.is_empty() {
            out.push(Token::value(arg));
        } else if let Some((name, value)) = rest.split_once('=') {
            out.push(Token::name_with(name, value));
        } else {
            out.push(Token::name(rest));
        }
        return;
    }

    let Some(rest) = arg.strip_prefix('-') else {
        out.push(Token::value(arg));
        return;
    };
    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        // lone "-"
        out.push(Token::value(arg));
        return;
    };

    let first = first.to_string();
    // Negative numbers.
    if first.starts_with(|c: char| c.is_ascii_digit()) && !is_known(&first) {
        out.push(Token::value(arg));
        return;
    }

    // -n, -abc (cluster), -n10 (attached). Every known character after the
    // first is its own name; the first unknown one starts the attached value.
    let mut names = vec![first];
    let mut remainder = chars.as_str();
    let mut attached = None;
    while let Some(c) = remainder.chars().next() {
        let name = c.to_string();
        if is_known(&name) {
            names.push(name);
            remainder = &remainder[c.len_utf8()..];
        } else {
            attached = Some(remainder.to_string());
            break;
        }
    }

    let last = names.len() - 1;
    for (i, text) in names.into_iter().enumerate() {
        let attached = if i == last { attached.take() } else { None };
        out.push(Token::Name { text, attached });
    }
}
