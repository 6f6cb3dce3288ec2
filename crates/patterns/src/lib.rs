#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `patterns` compiles the path expressions used by localization project
//! configurations into matchers that can both recognize and generate file
//! paths. A pattern such as `/l10n/{locale}/browser/**` describes every
//! localized file of a component; the same pattern, with `locale` bound,
//! produces the concrete path of one translation.
//!
//! # Design
//!
//! - [`Pattern`] is the compiled form: a closed sequence of [`Node`]s plus an
//!   optional root directory and the index of the first wildcard. Compilation
//!   is a single left-to-right scan that never fails.
//! - [`Matcher`] pairs a pattern with an [`Environment`] of variable bindings
//!   and lazily builds an anchored regular expression on first use. Repeated
//!   variables compile to backreferences.
//! - Expansion walks the nodes and resolves variables through the
//!   environment, hiding the variable being expanded from its own binding so
//!   self-references stop instead of recursing.
//! - [`android`] maps between BCP 47 locale codes and Android resource
//!   qualifiers for the `{android_locale}` variable.
//! - [`BytesMatcher`] handles paths stored as encoded bytes.
//!
//! # Invariants
//!
//! - Matches cover the whole path; there are no partial matches.
//! - `*` never crosses a `/`. `**` spans zero or more whole segments and is
//!   only recognized directly after a `/` (or at the start) and directly
//!   before a `/` (or at the end).
//! - Wildcards are bound as `s1`, `s2`, … in order of appearance.
//! - A root is only applied when the pattern does not start with `/`.
//!
//! # Errors
//!
//! Strict expansion reports [`PatternError::MissingBinding`] for the first
//! unresolved variable or wildcard. Concatenating a rooted matcher yields
//! [`PatternError::RootedConcat`]. Byte paths fail with
//! [`PatternError::Decode`] or [`PatternError::Encode`] at the encoding
//! boundary.
//!
//! # Examples
//!
//! Translate a localized path into its reference counterpart:
//!
//! ```
//! use patterns::Matcher;
//!
//! let l10n = Matcher::new("/l10n/{locale}/browser/**");
//! let reference = Matcher::new("/src/browser/locales/en-US/**");
//!
//! let captured = l10n.captures("/l10n/de/browser/menu.ftl").unwrap().unwrap();
//! assert_eq!(captured.get("locale"), Some("de"));
//!
//! let path = l10n.sub(&reference, "/l10n/de/browser/menu.ftl").unwrap();
//! assert_eq!(path.as_deref(), Some("/src/browser/locales/en-US/menu.ftl"));
//!
//! let german = l10n.with_env([("locale", "de")]);
//! assert_eq!(german.prefix(), "/l10n/de/browser/");
//! ```
//!
//! # See also
//!
//! - `filters` builds project filter trees out of these matchers.

pub mod android;
mod bindings;
mod bytes;
mod compiler;
pub mod debug_pattern;
mod env;
mod error;
mod matcher;
mod node;
pub mod pathutil;
mod pattern;
mod regex_writer;

pub use bindings::Bindings;
pub use bytes::BytesMatcher;
pub use env::Environment;
pub use error::PatternError;
pub use matcher::{Matcher, expand};
pub use node::{ANDROID_LOCALE, LOCALE, Node};
pub use pattern::{IntoPattern, Pattern};
