//! Parser for cabinet `description.yaml` files.
//!
//! Descriptions use a restricted YAML dialect that is read line by line
//! instead of through a general YAML parser:
//!
//! - [`token`] splits the text into indentation-aware `key: value` lines
//! - [`description`] runs those lines through a small state machine that
//!   builds a [`CabinetDescription`](crate::types::CabinetDescription)
//!
//! # Usage
//!
//! ```ignore
//! use cabinetry::parser::decode;
//!
//! let source = std::fs::read_to_string("galaga/description.yaml")?;
//! let description = decode(&source);
//!
//! for part in &description.parts {
//!     println!("{}: {:?}", part.name, part.art_file());
//! }
//! ```

pub mod description;
pub mod token;

pub use description::{decode, decode_named, Decoder, PartBlock, Section};
pub use token::{tokenize, Token, TokenKind};
