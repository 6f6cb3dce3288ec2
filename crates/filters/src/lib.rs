#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` decides, for a localization project, whether a localized file
//! or a single entity inside it is compared against its reference and how
//! problems are reported. Projects are described by configurations that
//! declare path groups (which files are localized), ordered filter rules
//! (how strictly they are checked), locales, and other configurations they
//! include or exclude. Every query resolves to one [`FilterAction`]:
//! `error`, `warning`, or `ignore`.
//!
//! # Design
//!
//! - [`ProjectConfig`] is the configuration tree. It is built once through
//!   [`add_paths`](ProjectConfig::add_paths),
//!   [`add_rules`](ProjectConfig::add_rules),
//!   [`add_child`](ProjectConfig::add_child) and
//!   [`exclude`](ProjectConfig::exclude), then queried with
//!   [`filter`](ProjectConfig::filter).
//! - [`PathGroup`] and [`FilterRule`] hold compiled [`patterns::Matcher`]s.
//!   Configuration loaders hand over [`PathDeclaration`] and
//!   [`RuleDeclaration`] values; list-valued rule paths and keys expand into
//!   one rule per combination.
//! - Queries bind the `locale` variable into every matcher. The bound rule
//!   set is cached per locale and dropped on the next mutation.
//!
//! # Invariants
//!
//! - Locales the project does not know are always `ignore`.
//! - Files no path group covers are `ignore`; covered files default to
//!   `error` until a rule says otherwise.
//! - The last declared rule that applies wins. Keyed rules only apply to
//!   entity queries with a matching key.
//! - An excluded configuration that reports `error` for a file makes the
//!   file an `error`. Otherwise the strongest action of a configuration and
//!   its includes wins, with `error > warning > ignore`.
//! - Excluded configurations have no excludes of their own, directly or
//!   through includes.
//!
//! # Errors
//!
//! Building reports [`FilterConfigError`] for malformed `re:` keys, bad
//! exclude nesting, and unresolvable roots. Queries surface pattern
//! failures as [`FilterConfigError::Pattern`].
//!
//! # Examples
//!
//! ```
//! use filters::{FilterAction, PathDeclaration, ProjectConfig, RuleDeclaration};
//!
//! let mut project = ProjectConfig::new("/src/browser/l10n.toml");
//! project.add_paths([PathDeclaration::new("/l10n/{locale}/browser/**")])?;
//! project.add_rules([
//!     RuleDeclaration::new("/l10n/{locale}/browser/menu.ftl", FilterAction::Warning),
//!     RuleDeclaration::new("/l10n/{locale}/browser/menu.ftl", FilterAction::Ignore)
//!         .with_key("re:obsolete-"),
//! ])?;
//! project.set_locales(["de", "fr"], false);
//!
//! assert_eq!(project.filter("de", "/l10n/de/browser/app.ftl", None)?, FilterAction::Error);
//! assert_eq!(project.filter("de", "/l10n/de/browser/menu.ftl", None)?, FilterAction::Warning);
//! assert_eq!(
//!     project.filter("de", "/l10n/de/browser/menu.ftl", Some("obsolete-file"))?,
//!     FilterAction::Ignore
//! );
//! assert_eq!(project.filter("it", "/l10n/it/browser/app.ftl", None)?, FilterAction::Ignore);
//! # Ok::<(), filters::FilterConfigError>(())
//! ```
//!
//! # See also
//!
//! - [`patterns`] for the path pattern grammar used by every path group and
//!   rule.
//! - [`debug_filter`] for the tracing hooks enabled by the `tracing` feature.

mod action;
mod decision;
mod declaration;
pub mod debug_filter;
mod error;
mod key;
mod paths;
mod project;
mod rule;

pub use action::FilterAction;
pub use declaration::{OneOrMany, PathDeclaration, RuleDeclaration};
pub use error::{FilterConfigError, ParseActionError};
pub use key::KeyPattern;
pub use paths::PathGroup;
pub use project::{Configs, ProjectConfig};
pub use rule::FilterRule;
