use crate::error_handling::*;
use log::debug;
use pest::iterators::Pair;
use pest::Parser;
use std::fmt;

#[derive(pest_derive::Parser)]
#[grammar = "grammar.pest"]
struct GrammarParser;

const SKIPPED: [char; 4] = [' ', '\n', '\r', '\t'];

/// The rule a syntax tree node was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    start,
    expression,
    assignment,
    additive,
    multitive,
    primary,
    variable,
    additive_operator,
    multitive_operator,
    number,
    identifier,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        use Tag::*;
        match self {
            start => "START",
            expression => "EXPRESSION",
            assignment => "ASSIGNMENT",
            additive => "ADDITIVE",
            multitive => "MULTITIVE",
            primary => "PRIMARY",
            variable => "VARIABLE",
            additive_operator => "ADDITIVE_OPERATOR",
            multitive_operator => "MULTITIVE_OPERATOR",
            number => "NUMBER",
            identifier => "IDENTIFIER",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Rule> for Tag {
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::start => Tag::start,
            Rule::expression => Tag::expression,
            Rule::assignment => Tag::assignment,
            Rule::additive => Tag::additive,
            Rule::multitive => Tag::multitive,
            Rule::primary => Tag::primary,
            Rule::variable => Tag::variable,
            Rule::additive_operator => Tag::additive_operator,
            Rule::multitive_operator => Tag::multitive_operator,
            Rule::number => Tag::number,
            Rule::identifier => Tag::identifier,
            #[allow(unreachable_patterns)]
            other => unreachable!("{other:?} never produces a tree node"),
        }
    }
}

/// A node of the parsed line.
///
/// Leaves carry the matched token text. `original` differs from `tag` only
/// when single-child wrappers were flattened away; it then names the
/// outermost rule this node replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub tag: Tag,
    pub original: Tag,
    pub token: Option<String>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn branch(tag: Tag, children: Vec<SyntaxNode>) -> Self {
        Self{tag, original: tag, token: None, children}
    }

    pub fn leaf(tag: Tag, token: &str) -> Self {
        Self{tag, original: tag, token: Some(token.into()), children: Vec::new()}
    }

    /// Token text of a leaf. Panics on interior nodes.
    pub fn text(&self) -> &str {
        match &self.token {
            Some(token) => token,
            None => unreachable!("{} node has no token", self.tag),
        }
    }

    /// Collapses every single-child node into its child, except `VARIABLE`.
    pub fn flatten(mut self) -> Self {
        if self.tag != Tag::variable && self.children.len() == 1 {
            if let Some(child) = self.children.pop() {
                let mut child = child.flatten();
                child.original = self.original;
                return child;
            }
        }
        self.children = self.children.into_iter().map(SyntaxNode::flatten).collect();
        self
    }

    fn write_indented(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        write!(f, "{}", "  ".repeat(depth))?;
        let name = if self.original == self.tag {
            self.tag.to_string()
        } else {
            format!("{}[{}]", self.original, self.tag)
        };
        match &self.token {
            Some(token) => writeln!(f, "- {name} ({token})")?,
            None => writeln!(f, "+ {name}")?,
        }
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

fn build(pair: Pair<Rule>) -> SyntaxNode {
    let tag = Tag::from(pair.as_rule());
    let text = pair.as_str();
    let children: Vec<_> = pair
        .into_inner()
        .filter(|inner| inner.as_rule() != Rule::EOI)
        .map(build)
        .collect();

    if children.is_empty() {
        SyntaxNode::leaf(tag, text.trim_end_matches(SKIPPED))
    } else {
        SyntaxNode::branch(tag, children)
    }
}

/// Parses a line into its tree exactly as the grammar produced it.
pub fn parse_raw(line: &str) -> Result<SyntaxNode> {
    let mut pairs = GrammarParser::parse(Rule::start, line).map_err(|error| {
        debug!("rejected {line:?}:\n{error}");
        CalcError::syntax_error
    })?;
    match pairs.next() {
        Some(start) => Ok(build(start)),
        None => unreachable!("a successful parse always yields START"),
    }
}

/// Parses a line and flattens redundant wrapper nodes.
pub fn parse(line: &str) -> Result<SyntaxNode> {
    let tree = parse_raw(line)?.flatten();
    debug!("parsed {line:?} into a {} tree", tree.tag);
    Ok(tree)
}
