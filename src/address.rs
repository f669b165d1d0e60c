//! Parsing pasted text into address records.
//!
//! Input is free text: blocks separated by one or more blank lines, one name/address
//! per block. A block whose first line starts with the word "from" is a sender block
//! and the name follows on the next line; every other block is a recipient. Blocks with
//! fewer than two non-empty lines can't be a label and are dropped, but each drop is
//! reported as a [ParseWarning] rather than silently lost.
//!
//! ```
//! use label_gen::address::{parse_addresses, AddressKind};
//!
//! let parsed = parse_addresses("John Doe\n123 Main St\n\nFrom:\nJane Roe\nLondon");
//! assert_eq!(parsed.records.len(), 2);
//! assert_eq!(parsed.records[1].kind, AddressKind::From);
//! assert_eq!(parsed.records[1].name, "Jane Roe");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a label addresses its recipient or identifies its sender
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressKind {
    To,
    From,
}

impl AddressKind {
    /// The marker printed above the name when kind headers are enabled
    pub fn header(self) -> &'static str {
        match self {
            AddressKind::To => "TO,",
            AddressKind::From => "FROM,",
        }
    }
}

/// One parsed name/address block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub kind: AddressKind,
    /// Never empty
    pub name: String,
    /// May be empty, for a sender block with only a name
    pub address_lines: Vec<String>,
}

/// A block that was dropped instead of becoming a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 0-based index of the block among all non-blank blocks of the input
    pub block: usize,
    /// How many non-empty lines the block had
    pub lines: usize,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block {} skipped: needs a name and at least one more line, found {} line",
            self.block + 1,
            self.lines
        )?;
        if self.lines != 1 {
            write!(f, "s")?;
        }
        Ok(())
    }
}

/// Records in input order, plus a warning for every block that was dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAddresses {
    pub records: Vec<AddressRecord>,
    pub warnings: Vec<ParseWarning>,
}

/// Split raw text into records. Never fails: malformed blocks are skipped.
pub fn parse_addresses(raw: &str) -> ParsedAddresses {
    let mut parsed = ParsedAddresses::default();

    for (index, block) in split_blocks(raw).into_iter().enumerate() {
        match parse_block(&block) {
            Some(record) => parsed.records.push(record),
            None => {
                let warning = ParseWarning {
                    block: index,
                    lines: block.len(),
                };
                tracing::warn!(block = index, lines = block.len(), "dropping address block");
                parsed.warnings.push(warning);
            }
        }
    }

    parsed
}

/// Group the trimmed, non-empty lines of the input into blocks. Any line made only of
/// whitespace ends the current block.
fn split_blocks(raw: &str) -> Vec<Vec<&str>> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    // `lines` already handles \n and \r\n; lone \r is split here
    for line in raw.lines().flat_map(|l| l.split('\r')) {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn parse_block(lines: &[&str]) -> Option<AddressRecord> {
    if lines.len() < 2 {
        return None;
    }

    let (kind, name, rest) = if starts_with_from(lines[0]) {
        (AddressKind::From, lines[1], &lines[2..])
    } else {
        (AddressKind::To, lines[0], &lines[1..])
    };

    Some(AddressRecord {
        kind,
        name: name.to_string(),
        address_lines: rest.iter().map(|l| l.to_string()).collect(),
    })
}

/// "From", "FROM:", "from - " all mark a sender block; "Fromm Family" does not.
fn starts_with_from(line: &str) -> bool {
    let Some(prefix) = line.get(..4) else {
        return false;
    };
    prefix.eq_ignore_ascii_case("from")
        && line[4..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric())
}
