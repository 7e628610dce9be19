//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which offers methods
//! to parse files or single strings, as well as lazy parsing via a
//! [NewickIterator].

use crate::model::{Age, Collection, NodeId, Tree, TreeError, canonical_name, years_from_million};
use crate::newick::defs::{MIN_BRANCH_LENGTH, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use crate::parser::utils::unescape_label;
use std::collections::HashSet;
use tracing::{debug, trace};

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser (configuration) for Newick trees with branch lengths in million years.
///
/// Each parsed tree gets the base name of the parser; the second and later
/// trees of a stream get the suffix `.1`, `.2`, and so on.
///
/// # Configuration
/// * [`with_root_age(age)`](Self::with_root_age)
///     - Sets the root age (years) of every parsed tree; the longest
///       root-to-terminal length must not exceed it. By default (`0`) the
///       root age is that longest length, making the youngest terminal
///       age `0`.
///
/// # Parsing
/// * [`next_tree`](Self::next_tree) - Parse the next tree in a stream
/// * [`parse_all`](Self::parse_all) - Parse all trees eagerly
/// * [`into_iter`](Self::into_iter) - Parse trees lazily
///
/// # Example
/// ```
/// use timetree::newick::NewickParser;
/// use timetree::parser::ByteParser;
///
/// let input = "(Gallus_gallus:324,(Macropus_fuliginosus:176,(Macaca_mulatta:25,'Homo sapiens':25):151):148);";
/// let mut byte_parser = ByteParser::for_str(input);
/// let mut newick_parser = NewickParser::new("amniota");
///
/// let tree = newick_parser.next_tree(&mut byte_parser)?.unwrap();
/// assert_eq!(tree.root_age(), 324_000_000);
/// assert_eq!(tree.age(tree.tax_node("homo sapiens").unwrap()), Some(0));
/// # Ok::<(), timetree::parser::ParsingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    name: String,
    root_age: Age,
    num_parsed: usize,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with the given base name for trees,
    /// inferring root ages.
    pub fn new(name: &str) -> Self {
        Self {
            name: canonical_name(name),
            root_age: 0,
            num_parsed: 0,
        }
    }

    /// Sets the root age in years; `0` infers it from the branch lengths.
    pub fn with_root_age(mut self, root_age: Age) -> Self {
        self.root_age = root_age;
        self
    }

    /// Returns the number of trees parsed so far.
    pub fn num_parsed(&self) -> usize {
        self.num_parsed
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Consumes the parser and returns an iterator over trees from the byte source.
    ///
    /// The parser can be retrieved again via [NewickIterator::into_parser].
    pub fn into_iter<B: ByteSource>(self, byte_parser: ByteParser<B>) -> NewickIterator<B> {
        NewickIterator {
            byte_parser,
            parser: self,
            done: false,
        }
    }

    /// Parses all Newick trees from the byte source until EOF.
    ///
    /// # Returns
    /// * `Ok(Collection)` - All parsed trees, at least one
    /// * `Err(ParsingError)` - If any tree fails to parse or there is none
    pub fn parse_all<B: ByteSource>(&mut self, mut byte_parser: ByteParser<B>) -> Result<Collection, ParsingError> {
        let mut collection = Collection::new();
        while let Some(tree) = self.next_tree(&mut byte_parser)? {
            collection.add(tree)?;
        }
        Ok(collection)
    }

    /// Parses the next tree of the stream.
    ///
    /// Text before the opening parenthesis of the tree is skipped.
    ///
    /// # Returns
    /// * `Ok(Some(Tree))` - The parsed tree
    /// * `Ok(None)` - If the stream holds no further tree
    ///
    /// # Errors
    /// * [TreeError::MissingTreeName] if the base name is blank
    /// * [ParsingErrorType::NotNewick] if the stream holds no tree at all
    /// * Any error of a malformed tree; there is no partial result
    pub fn next_tree<B: ByteSource>(&mut self, parser: &mut ByteParser<B>) -> Result<Option<Tree>, ParsingError> {
        if self.name.is_empty() {
            return Err(TreeError::MissingTreeName.into());
        }

        loop {
            parser.skip_comment_and_whitespace()?;
            match parser.peek() {
                Some(b'(') => break,
                Some(_) => {
                    parser.next_byte();
                }
                None if self.num_parsed == 0 => {
                    return Err(ParsingError::from_parser(ParsingErrorType::NotNewick, parser));
                }
                None => return Ok(None),
            }
        }

        let name = match self.num_parsed {
            0 => self.name.clone(),
            n => format!("{}.{n}", self.name),
        };
        let tree = self.parse_tree(parser, &name)?;
        self.num_parsed += 1;
        Ok(Some(tree))
    }

    /// Parses a single tree, which must start (after whitespace and
    /// comments) with its opening parenthesis and end with `;`.
    pub(crate) fn parse_tree<B: ByteSource>(&self, parser: &mut ByteParser<B>, name: &str) -> Result<Tree, ParsingError> {
        let mut pending = PendingTree::default();
        read_nodes(parser, &mut pending).map_err(|e| e.with_last_terminal(pending.last_terminal.clone()))?;

        let tree = self
            .build_tree(pending.nodes, name)
            .map_err(|e| ParsingError::from(e).with_last_terminal(pending.last_terminal))?;
        debug!(tree = %tree.name(), nodes = tree.num_nodes(), root_age = tree.root_age(), "parsed Newick tree");
        Ok(tree)
    }

    /// Fixes the root age and builds the tree top-down.
    fn build_tree(&self, nodes: Vec<PendingNode>, name: &str) -> Result<Tree, TreeError> {
        // Parents precede their children, so one forward pass suffices
        // A length beyond Age::MAX fits no root age
        let mut len_to_root: Vec<Age> = vec![0; nodes.len()];
        for (id, node) in nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                len_to_root[id] = len_to_root[parent].checked_add(node.branch_length).ok_or(
                    TreeError::InvalidRootAge {
                        age: self.root_age,
                        min_age: Age::MAX,
                    },
                )?;
            }
        }
        let max_len = len_to_root.iter().copied().max().unwrap_or(0);

        let root_age = match self.root_age {
            0 => max_len,
            age if age < max_len => {
                return Err(TreeError::InvalidRootAge { age, min_age: max_len });
            }
            age => age,
        };

        let mut tree = Tree::new(name, root_age);
        let mut ids: Vec<NodeId> = vec![tree.root(); nodes.len()];
        for (id, node) in nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                ids[id] = tree.add(ids[parent], node.branch_length, &node.taxon)?;
            }
        }

        tree.validate()?;
        tree.format();
        Ok(tree)
    }
}

// =#========================================================================#=
// TREE READING
// =#========================================================================#=
/// Node read from the stream, before ages are known.
#[derive(Debug, Default)]
struct PendingNode {
    parent: Option<usize>,
    children: usize,
    branch_length: Age,
    taxon: String,
}

/// Nodes read so far, in pre-order.
#[derive(Debug, Default)]
struct PendingTree {
    nodes: Vec<PendingNode>,
    taxa: HashSet<String>,
    last_terminal: Option<String>,
}

impl PendingTree {
    fn push(&mut self, parent: Option<usize>, taxon: String) -> usize {
        if let Some(parent) = parent {
            self.nodes[parent].children += 1;
        }
        self.nodes.push(PendingNode {
            parent,
            taxon,
            ..PendingNode::default()
        });
        self.nodes.len() - 1
    }
}

/// Reads the nodes of one tree, from its opening parenthesis up to and
/// including the closing `;`.
///
/// Works on an explicit stack of open parentheses, so nesting depth is not
/// limited by the call stack. Commas and whitespace both separate children.
fn read_nodes<B: ByteSource>(parser: &mut ByteParser<B>, pending: &mut PendingTree) -> Result<(), ParsingError> {
    parser.skip_comment_and_whitespace()?;
    if !parser.consume_if(b'(') {
        return Err(ParsingError::invalid_newick_string(parser, "expected '(' at start of tree"));
    }
    let mut open = vec![pending.push(None, String::new())];

    while let Some(&current) = open.last() {
        parser.skip_comment_and_whitespace()?;
        match parser.peek() {
            None | Some(b';') => {
                return Err(ParsingError::from_parser(ParsingErrorType::UnbalancedParentheses, parser));
            }
            Some(b',') => {
                parser.next_byte();
            }
            Some(b':') => {
                return Err(ParsingError::from_parser(ParsingErrorType::UnexpectedBranchLength, parser));
            }
            Some(b'(') => {
                parser.next_byte();
                open.push(pending.push(Some(current), String::new()));
            }
            Some(b')') => {
                parser.next_byte();
                open.pop();
                if pending.nodes[current].children < 2 {
                    return Err(ParsingError::from_parser(TreeError::SingleChild(current).into(), parser));
                }
                skip_internal_label(parser)?;
                let branch_length = read_branch_length(parser)?;
                if open.is_empty() {
                    if branch_length.is_some() {
                        trace!("ignoring branch length of root");
                    }
                } else {
                    pending.nodes[current].branch_length = branch_length.unwrap_or(0);
                }
            }
            Some(_) => {
                let taxon = canonical_name(&read_terminal_label(parser)?);
                if taxon.is_empty() {
                    let id = pending.nodes.len();
                    return Err(ParsingError::from_parser(TreeError::UnnamedTerminal(id).into(), parser));
                }
                if !pending.taxa.insert(taxon.clone()) {
                    return Err(ParsingError::from_parser(TreeError::RepeatedTaxon(taxon).into(), parser));
                }
                let id = pending.push(Some(current), taxon.clone());
                pending.last_terminal = Some(taxon);
                pending.nodes[id].branch_length = read_branch_length(parser)?.unwrap_or(0);
            }
        }
    }

    parser.skip_comment_and_whitespace()?;
    if !parser.consume_if(b';') {
        return Err(ParsingError::invalid_newick_string(parser, "expected ';' at end of tree"));
    }
    Ok(())
}

/// Reads a terminal label; unquoted labels have underscores turned into spaces.
fn read_terminal_label<B: ByteSource>(parser: &mut ByteParser<B>) -> Result<String, ParsingError> {
    if parser.peek() == Some(b'\'') {
        parser.parse_quoted_label()
    } else {
        Ok(unescape_label(&parser.parse_unquoted_label(NEWICK_LABEL_DELIMITERS)))
    }
}

/// Skips a label directly after a closing parenthesis, e.g. a support value.
fn skip_internal_label<B: ByteSource>(parser: &mut ByteParser<B>) -> Result<(), ParsingError> {
    if parser.peek() == Some(b'\'') {
        parser.parse_quoted_label()?;
    } else {
        parser.parse_unquoted_label(NEWICK_LABEL_DELIMITERS);
    }
    Ok(())
}

/// Reads an optional `:<million years>` branch length.
///
/// # Returns
/// The branch length in whole years, at least [MIN_BRANCH_LENGTH] if present.
fn read_branch_length<B: ByteSource>(parser: &mut ByteParser<B>) -> Result<Option<Age>, ParsingError> {
    parser.skip_comment_and_whitespace()?;
    if !parser.consume_if(b':') {
        return Ok(None);
    }
    parser.skip_comment_and_whitespace()?;

    let value = parser.parse_unquoted_label(NEWICK_LABEL_DELIMITERS);
    value
        .parse::<f64>()
        .ok()
        .and_then(years_from_million)
        .map(|years| Some(years.max(MIN_BRANCH_LENGTH)))
        .ok_or_else(|| ParsingError::from_parser(ParsingErrorType::InvalidBranchLength(value), parser))
}

// =#========================================================================#=
// NEWICK ITERATOR
// =#========================================================================#=
/// Iterator parsing one Newick tree per call to `next`.
///
/// Stops after the last tree or after the first error.
pub struct NewickIterator<B: ByteSource> {
    byte_parser: ByteParser<B>,
    parser: NewickParser,
    done: bool,
}

impl<B: ByteSource> NewickIterator<B> {
    /// Consumes the iterator and returns the underlying parser.
    pub fn into_parser(self) -> NewickParser {
        self.parser
    }
}

impl<B: ByteSource> Iterator for NewickIterator<B> {
    type Item = Result<Tree, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.parser.next_tree(&mut self.byte_parser) {
            Ok(Some(tree)) => Some(Ok(tree)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
