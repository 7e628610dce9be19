//! Structs and logic to parse Nexus files.
//!
//! This module provides the [NexusParser] struct. Only the TREES block is
//! interpreted; every other block is skipped.

use crate::model::{Age, Collection, NodeId, Tree, TreeError, canonical_name};
use crate::newick::NewickParser;
use crate::nexus::defs::*;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use crate::parser::utils::unescape_label;
use std::collections::HashMap;
use tracing::{debug, trace};

// =#========================================================================#=
// NEXUS PARSER
// =#========================================================================#=
/// Parser (configuration) for Nexus files with a TREES block.
///
/// # Configuration
/// * [`with_root_age(age)`](Self::with_root_age) - Root age in years of
///   every parsed tree; inferred from the branch lengths by default.
///
/// # Format
/// After the mandatory `#NEXUS` header, the file is a sequence of
/// `BEGIN <name>; ... END;` blocks. Inside the TREES block:
/// * `TRANSLATE 1 label, 2 label, ... ;` maps numeric terminal labels to
///   taxon names; keys must be `1..n` in order.
/// * `TREE [*] name = [&R] newick;` defines a tree, parsed by [NewickParser].
///   Trees get their (canonical) name, with `.1`, `.2`, ... appended if the
///   name is already taken.
/// * Other commands are skipped.
///
/// Tokens are separated by whitespace and `;,/=` punctuation; quoted tokens
/// use single or double quotes, and `[...]` comments are skipped.
///
/// # Example
/// ```
/// use timetree::nexus::NexusParser;
/// use timetree::parser::ByteParser;
///
/// let nexus = "#NEXUS
/// BEGIN TREES;
///     TRANSLATE 1 Gallus_gallus, 2 Homo_sapiens, 3 Pan_troglodytes;
///     TREE amniota = [&R] (1:324,(2:6.3,3:6.3):317.7);
/// END;";
/// let trees = NexusParser::new().parse(ByteParser::for_str(nexus))?;
///
/// let tree = trees.get("amniota").unwrap();
/// assert_eq!(tree.terms(), vec!["Gallus gallus", "Homo sapiens", "Pan troglodytes"]);
/// # Ok::<(), timetree::parser::ParsingError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct NexusParser {
    root_age: Age,
}

impl NexusParser {
    /// Creates a new [NexusParser] inferring root ages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root age in years; `0` infers it from the branch lengths.
    pub fn with_root_age(mut self, root_age: Age) -> Self {
        self.root_age = root_age;
        self
    }

    /// Parses all trees of the Nexus data in `parser`.
    ///
    /// # Errors
    /// * [ParsingErrorType::MissingNexusHeader] if the data does not start with `#NEXUS`
    /// * [ParsingErrorType::NoTrees] if no tree was found
    /// * Any error of a malformed block, translation table or tree
    pub fn parse<B: ByteSource>(&self, mut parser: ByteParser<B>) -> Result<Collection, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if_sequence(NEXUS_HEADER)
            || parser.peek().is_some_and(|b| !NEXUS_TOKEN_DELIMITERS.contains(&b))
        {
            return Err(ParsingError::from_parser(ParsingErrorType::MissingNexusHeader, &parser));
        }

        let mut collection = Collection::new();
        loop {
            parser.skip_comment_and_whitespace()?;
            if parser.is_eof() {
                break;
            }

            let begin = read_token(&mut parser)?;
            if !begin.is(BEGIN) {
                let msg = format!("expected BEGIN, found '{}'", begin.text);
                return Err(ParsingError::from_parser(ParsingErrorType::InvalidFormatting(msg), &parser));
            }
            let name = read_token(&mut parser)?;
            match NexusBlock::from_name(&name.text) {
                NexusBlock::Trees => self.parse_trees_block(&mut parser, &mut collection)?,
                NexusBlock::Skipped(block) => {
                    debug!(%block, "skipping Nexus block");
                    skip_block(&mut parser)?;
                }
            }
        }

        if collection.is_empty() {
            return Err(ParsingError::from_parser(ParsingErrorType::NoTrees, &parser));
        }
        Ok(collection)
    }

    /// Parses the commands of a TREES block up to and including its end.
    fn parse_trees_block<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        collection: &mut Collection,
    ) -> Result<(), ParsingError> {
        let mut translation = HashMap::new();
        loop {
            let command = read_token(parser)?;
            if command.is(END) || command.is(ENDBLOCK) {
                return Ok(());
            } else if command.is(TRANSLATE) {
                if command.delimiter != Some(b';') {
                    translation = read_translation(parser)?;
                }
            } else if command.is(TREE) {
                let tree = self.read_tree(parser, &translation, collection)?;
                collection.add(tree)?;
            } else {
                trace!(command = %command.text, "skipping command in TREES block");
                if command.delimiter != Some(b';') {
                    skip_command(parser)?;
                }
            }
        }
    }

    /// Reads `[*] name = newick;` after a TREE keyword and translates the
    /// terminal labels.
    fn read_tree<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        translation: &HashMap<String, String>,
        collection: &Collection,
    ) -> Result<Tree, ParsingError> {
        let mut name = read_token(parser)?;
        if name.text == DEFAULT_TREE_MARKER && name.delimiter.is_none() {
            name = read_token(parser)?;
        }
        if name.delimiter != Some(b'=') {
            let msg = format!("expected '=' after tree name '{}'", name.text);
            return Err(ParsingError::invalid_trees_block(parser, msg));
        }
        let base = unescape_label(&name.text);
        if canonical_name(&base).is_empty() {
            return Err(TreeError::MissingTreeName.into());
        }

        let tree_name = collection.free_name(&base);
        let mut tree = NewickParser::new(&tree_name)
            .with_root_age(self.root_age)
            .parse_tree(parser, &tree_name)?;

        if !translation.is_empty() {
            let names: Vec<(NodeId, &str)> = tree
                .pre_order_iter()
                .filter(|n| n.is_term())
                .filter_map(|n| translation.get(n.taxon()).map(|taxon| (n.id(), taxon.as_str())))
                .collect();
            tree.set_names(&names)?;
            tree.format();
        }
        Ok(tree)
    }
}

/// Reads the entries of a TRANSLATE command up to and including its `;`.
///
/// # Returns
/// Map from key to canonical taxon name.
fn read_translation<B: ByteSource>(parser: &mut ByteParser<B>) -> Result<HashMap<String, String>, ParsingError> {
    let mut translation = HashMap::new();
    loop {
        let key = read_token(parser)?;
        if key.text.is_empty() && key.delimiter == Some(b';') {
            break;
        }

        let expected = translation.len() + 1;
        if key.text.parse::<usize>().ok() != Some(expected) {
            let msg = format!("expected key {expected}, found '{}'", key.text);
            return Err(ParsingError::invalid_translate_command(parser, msg));
        }
        if key.delimiter.is_some() {
            let msg = format!("missing taxon for key {expected}");
            return Err(ParsingError::invalid_translate_command(parser, msg));
        }

        let label = read_token(parser)?;
        let taxon = canonical_name(&unescape_label(&label.text));
        if taxon.is_empty() {
            let msg = format!("empty taxon for key {expected}");
            return Err(ParsingError::invalid_translate_command(parser, msg));
        }
        trace!(key = %key.text, %taxon, "translate");
        translation.insert(key.text, taxon);

        match label.delimiter {
            Some(b';') => break,
            Some(b',') | None => {}
            Some(other) => {
                let msg = format!("unexpected '{}' after taxon {expected}", other as char);
                return Err(ParsingError::invalid_translate_command(parser, msg));
            }
        }
    }
    Ok(translation)
}

// =#========================================================================#=
// TOKENS
// =#========================================================================#=
/// A Nexus token with the punctuation that ended it, if any.
#[derive(Debug)]
struct Token {
    text: String,
    delimiter: Option<u8>,
}

impl Token {
    /// Case-insensitive comparison with a keyword.
    fn is(&self, keyword: &str) -> bool {
        self.text.eq_ignore_ascii_case(keyword)
    }
}

/// Reads the next token, skipping whitespace and comments around it.
///
/// The token ends at whitespace, punctuation or a comment. If the next
/// meaningful byte after it is punctuation (`;,/=`), that byte is consumed
/// and reported as delimiter. Quoted tokens may contain anything.
///
/// # Errors
/// [ParsingErrorType::UnexpectedEOF] if there is no token left.
fn read_token<B: ByteSource>(parser: &mut ByteParser<B>) -> Result<Token, ParsingError> {
    parser.skip_comment_and_whitespace()?;
    let text = match parser.peek() {
        None => return Err(ParsingError::unexpected_eof(parser)),
        Some(b'\'' | b'"') => parser.parse_quoted_label()?,
        Some(_) => parser.parse_unquoted_label(NEXUS_TOKEN_DELIMITERS),
    };

    parser.skip_comment_and_whitespace()?;
    let delimiter = match parser.peek() {
        Some(b) if NEXUS_PUNCTUATION.contains(&b) => {
            parser.next_byte();
            Some(b)
        }
        _ => None,
    };
    Ok(Token { text, delimiter })
}

/// Skips tokens up to and including the next `;`.
fn skip_command<B: ByteSource>(parser: &mut ByteParser<B>) -> Result<(), ParsingError> {
    while read_token(parser)?.delimiter != Some(b';') {}
    Ok(())
}

/// Skips tokens up to and including an END or ENDBLOCK token.
fn skip_block<B: ByteSource>(parser: &mut ByteParser<B>) -> Result<(), ParsingError> {
    loop {
        let token = read_token(parser)?;
        if token.is(END) || token.is(ENDBLOCK) {
            return Ok(());
        }
    }
}
