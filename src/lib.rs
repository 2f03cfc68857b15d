// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # tagscope
//!
//! Static validation of telemetry span attributes against a registry of semantic conventions.
//!
//! Instrumented code attaches key/value attributes to spans through calls such as
//! `activity.SetTag("http.request.method", method)`. A misspelled key or a value of the wrong type
//! silently produces telemetry that dashboards and alerts cannot match. `tagscope` catches these
//! at analysis time: given the call sites of a source unit (supplied by a host compiler front
//! end) and an attribute metadata document, it reports
//!
//! - attribute names that are not registered,
//! - values whose static type does not match the registered type,
//! - attributes that are experimental,
//! - attributes that are deprecated, together with the replacement guidance.
//!
//! ## Features
//!
//! - **Lenient registry loading** - a broken metadata document disables validation instead of
//!   failing the build
//! - **Conservative name resolution** - only literal and constant names are checked, so there are
//!   no false positives from dynamic keys
//! - **Parallel validation** - call sites and source units are checked on the `rayon` pool
//! - **Configurable severities** - every rule can be raised, lowered or switched off
//!
//! ## Quick Start
//!
//! ```rust
//! use tagscope::prelude::*;
//!
//! let session = AnalysisSession::new(
//!     Some(r#"{
//!         "version": "1.26.0",
//!         "attributes": [
//!             {"attribute_name": "http.response.status_code", "type": "int"}
//!         ]
//!     }"#),
//!     AnalyzerConfig::default(),
//! );
//!
//! let unit = SourceUnit::new(
//!     "src/Checkout.cs",
//!     vec![CallSite::new("System.Diagnostics.Activity", "SetTag")
//!         .with_argument(Argument::new(
//!             SourceSpan::new(120, 147).at(8, 21),
//!             Expression::string_literal("http.response.status_code"),
//!         ))
//!         .with_argument(
//!             Argument::new(SourceSpan::new(149, 155).at(8, 50), Expression::Other)
//!                 .with_type(ValueType::converted(ConcreteType::String.into())),
//!         )],
//! );
//!
//! let diagnostics = session.analyze(&unit);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(
//!     diagnostics[0].message(),
//!     "Attribute 'http.response.status_code' expects a value of type 'int' but got 'string'"
//! );
//! ```
//!
//! ## Architecture
//!
//! - [`registry`] - Builds the attribute registry from the metadata document
//! - [`host`] - Facts supplied by the host: call sites, argument expressions and static types
//! - [`resolver`] - Resolves the attribute name of a call to a constant string
//! - [`compat`] - Decides whether a static type satisfies a declared attribute type
//! - [`validation`] - Runs the checks and applies the configuration
//! - [`session`] - Owns registry and configuration for one compilation
//! - [`diagnostics`] - Rules, severities and findings

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use tagscope::prelude::*;
///
/// let session = AnalysisSession::new(None, AnalyzerConfig::default());
/// assert!(!session.is_enabled());
/// ```
pub mod prelude;

pub mod compat;
pub mod diagnostics;
pub mod host;
pub mod registry;
pub mod resolver;
pub mod session;
pub mod validation;

/// `tagscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `tagscope` Error type
///
/// Returned by the explicit loaders for metadata documents, facts documents and configuration
/// files. Analysis itself does not fail.
pub use error::Error;

pub use registry::AttributeRegistry;
pub use session::AnalysisSession;
pub use validation::{validate, AnalyzerConfig, Validator};
