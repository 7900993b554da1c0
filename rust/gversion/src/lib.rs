//! gversion
//!
//! Parses `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` strings, optionally led by
//! `v`, into a [`Version`] and renders them back out.
//!
//! ```
//! use gversion::{parse, ParseErrorKind, Version};
//!
//! let v = parse("v1.2.3-beta+42").unwrap();
//! assert_eq!(v.vstring(), "v1.2.3-beta+42");
//! assert!(Version::new(1, 2, 3).is_after(&v));
//!
//! let err = parse("v1.0.0.1").unwrap_err();
//! assert_eq!(err.kind, ParseErrorKind::TooManySegments);
//! ```

pub mod math;
pub mod parse;
pub mod version;

pub use parse::{parse, ParseError, ParseErrorKind, PARSE_BUFFER_SIZE};
pub use version::Version;
