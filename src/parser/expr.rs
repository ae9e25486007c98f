//! Shift-reduce inline expression parser
//!
//! A loop over an index into a token buffer. Tokens with nothing pending
//! commit directly as text; everything else shifts onto a stack owned by
//! the loop frame. After each shift the stack is projected to balance
//! symbols and collapsed as soon as it forms a complete `[name ...]`,
//! `$...$` or `` `...` `` expression. When tokens run out with a non-empty
//! stack the parser enters error recovery: it emits an `errorHighlight`
//! marker for the broken prefix, records a message, and resumes scanning
//! past it. The parser is total - it always returns.

use tracing::debug;

use crate::ast::{ExprMeta, Expression};
use crate::tokenizer::{tokenize, Token, TokenMeta};

use super::matcher;
use super::symbol;

enum Step {
    Continue,
    Done,
}

pub struct ExprParser {
    tokens: Vec<Token>,
    position: usize,
    committed: Vec<Expression>,
    stack: Vec<Token>,
    stack_start: usize,
    messages: Vec<String>,
    line_number: usize,
}

/// Parse one line (or joined body) of inline source. `line_number` is the
/// zero-based line the content started at; it only feeds expression ids
/// and recovery messages.
pub fn parse(line_number: usize, input: &str) -> (Vec<Expression>, Vec<String>) {
    ExprParser::new(line_number, tokenize(input)).run()
}

/// Parse with line number 0, discarding messages.
pub fn parse_expressions(input: &str) -> Vec<Expression> {
    parse(0, input).0
}

impl ExprParser {
    pub fn new(line_number: usize, tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            committed: Vec::new(),
            stack: Vec::new(),
            stack_start: 0,
            messages: Vec::new(),
            line_number,
        }
    }

    pub fn run(mut self) -> (Vec<Expression>, Vec<String>) {
        loop {
            match self.step() {
                Step::Continue => {}
                Step::Done => break,
            }
        }
        (self.committed, self.messages)
    }

    fn step(&mut self) -> Step {
        match self.tokens.get(self.position).cloned() {
            Some(token) => {
                self.shift(token);
                self.position += 1;
                Step::Continue
            }
            None if self.stack.is_empty() => Step::Done,
            None => self.recover(),
        }
    }

    fn shift(&mut self, token: Token) {
        match token {
            Token::Str { content, meta } | Token::Space { content, meta }
                if self.stack.is_empty() =>
            {
                self.commit_text(content, meta);
            }
            token => {
                if self.stack.is_empty() {
                    self.stack_start = self.position;
                }
                self.stack.push(token);
                if matcher::is_reducible(&symbol::to_symbols(&self.stack)) {
                    self.reduce_stack();
                }
            }
        }
    }

    /// Commit a text token, merging with a preceding text expression so a
    /// run of words becomes one `Text` node.
    fn commit_text(&mut self, content: String, meta: TokenMeta) {
        if let Some(Expression::Text {
            content: last,
            meta: last_meta,
        }) = self.committed.last_mut()
        {
            last.push_str(&content);
            last_meta.end = meta.end;
            return;
        }
        let meta = ExprMeta::new(meta.begin, meta.end, meta.index, self.line_number);
        self.committed.push(Expression::Text { content, meta });
    }

    fn reduce_stack(&mut self) {
        let stack = std::mem::take(&mut self.stack);
        let head = stack.first().map(symbol::to_symbol);
        match head {
            Some(symbol::Symbol::M) => self.commit_span("math", &stack),
            Some(symbol::Symbol::C) => self.commit_span("code", &stack),
            Some(symbol::Symbol::L) => self.commit_fun(stack),
            _ => {}
        }
    }

    /// A math or code span: the interior is swallowed verbatim, brackets
    /// included.
    fn commit_span(&mut self, name: &str, stack: &[Token]) {
        let interior = &stack[1..stack.len() - 1];
        let body: String = interior.iter().map(Token::literal).collect();
        let open = stack[0].meta();
        let close = stack[stack.len() - 1].meta();
        let meta = ExprMeta::new(open.begin, close.end, open.index, self.line_number);
        self.committed.push(Expression::VFun {
            name: name.to_string(),
            body,
            meta,
        });
    }

    /// `[name args...]`: the first interior text token is the function
    /// name, the remaining tokens parse recursively into the argument
    /// list.
    fn commit_fun(&mut self, stack: Vec<Token>) {
        let open = *stack[0].meta();
        let close = *stack[stack.len() - 1].meta();
        let interior = &stack[1..stack.len() - 1];
        let (name, rest) = match interior.first() {
            Some(Token::Str { content, .. }) => (content.clone(), &interior[1..]),
            _ => (String::new(), interior),
        };
        let args = fixup(self.eval_list(rest));
        let meta = ExprMeta::new(open.begin, close.end, open.index, self.line_number);
        self.committed.push(Expression::Fun { name, args, meta });
    }

    fn eval_list(&mut self, tokens: &[Token]) -> Vec<Expression> {
        if tokens.is_empty() {
            return Vec::new();
        }
        let sub = ExprParser::new(self.line_number, tokens.to_vec());
        let (expressions, messages) = sub.run();
        self.messages.extend(messages);
        expressions
    }

    /// Error recovery, keyed on the bottom of the stack. Each case emits a
    /// highlight marker, records a message and resumes the scan past the
    /// broken prefix; recovery therefore always makes progress.
    fn recover(&mut self) -> Step {
        let stack = std::mem::take(&mut self.stack);
        let start = self.stack_start;
        match (&stack[0], stack.get(1)) {
            (Token::LeftBracket { .. }, Some(Token::RightBracket { .. })) => {
                self.commit_error("[?]", stack[0].meta());
                self.note("Brackets must enclose something");
                self.position = start + 2;
                Step::Continue
            }
            (Token::LeftBracket { .. }, Some(Token::Str { content, .. })) => {
                let marker = format!("[{content}]?");
                self.commit_error(&marker, stack[0].meta());
                self.note("Missing right bracket");
                self.position = start + 2;
                Step::Continue
            }
            (Token::LeftBracket { .. }, Some(Token::Space { .. })) => {
                self.commit_error("[ - can't have space after the bracket", stack[0].meta());
                self.note("Can't have space after left bracket");
                self.position = start + 2;
                Step::Continue
            }
            (Token::LeftBracket { .. }, None) => {
                self.commit_error("[...?", stack[0].meta());
                self.note("That left bracket needs something after it");
                self.position = self.tokens.len();
                Step::Continue
            }
            (Token::RightBracket { .. }, _) => {
                self.commit_error(" extra ]?", stack[0].meta());
                self.note("Extra right bracket(s)");
                self.position = start + 1;
                Step::Continue
            }
            (Token::MathDelim { .. }, _) => {
                self.commit_error("$?$", stack[0].meta());
                self.note("opening dollar sign needs to be matched");
                self.position = start + 1;
                Step::Continue
            }
            (Token::CodeDelim { .. }, _) => {
                self.commit_error("`?`", stack[0].meta());
                self.note("opening backtick needs to be matched");
                self.position = start + 1;
                Step::Continue
            }
            _ => {
                self.commit_error(" ?!? ", stack[0].meta());
                self.note("Unknown error");
                Step::Done
            }
        }
    }

    fn commit_error(&mut self, marker: &str, source: &TokenMeta) {
        let meta = ExprMeta::new(source.begin, source.end, source.index, self.line_number);
        let inner = Expression::Text {
            content: marker.to_string(),
            meta: meta.clone(),
        };
        self.committed.push(Expression::Fun {
            name: "errorHighlight".to_string(),
            args: vec![inner],
            meta,
        });
    }

    fn note(&mut self, message: &str) {
        let message = format!("{} (line {})", message, self.line_number);
        debug!(line = self.line_number, "inline recovery: {message}");
        self.messages.push(message);
    }
}

/// Trim whitespace at the front of a reduced function's first textual
/// argument, dropping the argument entirely when nothing remains.
fn fixup(mut args: Vec<Expression>) -> Vec<Expression> {
    let drop_first = match args.first_mut() {
        Some(Expression::Text { content, meta }) => {
            let trimmed = content.trim_start();
            if trimmed.is_empty() {
                true
            } else {
                let delta = content.chars().count() - trimmed.chars().count();
                meta.begin += delta;
                *content = trimmed.to_string();
                false
            }
        }
        _ => false,
    };
    if drop_first {
        args.remove(0);
    }
    args
}
