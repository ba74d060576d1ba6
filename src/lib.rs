//! # prin
//!
//! Decide which files of a tree get printed, and in what order.
//!
//! prin is a traversal-and-filtering engine. It owns the depth-first walk,
//! the rule matching (literal path segments, shell globs, regex), the
//! gitignore-style ignore tree, the shared emission budget and the
//! contracts ([`Source`], [`Sink`]). It does **not** fetch bytes itself or
//! format output: sources provide nodes and bytes, sinks render them.
//!
//! # Quick Start
//!
//! ```rust
//! use prin::{Budget, CollectSink, MemorySource};
//!
//! let source = MemorySource::new()
//!     .file("src/a.py", "print('a')\n")
//!     .file("src/b.py", "print('b')\n")
//!     .file("tests/test_c.py", "assert True\n")
//!     .file("build/out.o", vec![0x7f, b'E', b'L', b'F', 0]);
//!
//! let walker = prin::walk().source(source).build().unwrap();
//!
//! let mut sink = CollectSink::new();
//! let mut budget = Budget::Unbounded;
//! let results = walker.run(&["."], &mut sink, &mut budget);
//!
//! assert_eq!(sink.paths(), ["src/a.py", "src/b.py"]);
//! assert_eq!(results.emitted, 2);
//! ```
//!
//! # Sharing a budget
//!
//! One [`Budget`] caps emissions across several walkers. Sources walked
//! later get whatever the earlier ones left:
//!
//! ```rust
//! use prin::{Budget, CollectSink, FilterConfig, MemorySource};
//!
//! let local  = MemorySource::new().file("a.rs", "a").file("b.rs", "b");
//! let remote = MemorySource::new().file("c.rs", "c");
//!
//! let config = FilterConfig { max_files: Some(2), ..Default::default() };
//! let mut budget = config.budget();
//! let mut sink = CollectSink::new();
//!
//! for source in [local, remote] {
//!     let walker = prin::walk().source(source).config(config.clone()).build().unwrap();
//!     walker.run(&["."], &mut sink, &mut budget);
//! }
//!
//! assert_eq!(sink.paths(), ["a.rs", "b.rs"]);
//! ```

#![forbid(unsafe_code)]

pub mod classify;
pub mod content;
pub mod defaults;
pub mod emptiness;
pub mod matcher;

mod budget;
mod builder;
mod config;
mod engine;
mod entry;
mod error;
mod ignore_tree;
mod memory;
mod pattern;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use budget::Budget;
pub use builder::WalkBuilder;
pub use classify::{classify, PatternKind};
pub use config::FilterConfig;
pub use content::{Body, TextPredicate};
pub use engine::{DepthGate, Walker};
pub use entry::{Entry, EntryKind};
pub use error::PrinError;
pub use ignore_tree::{IgnoreSpec, IgnoreTree};
pub use matcher::Matcher;
pub use memory::MemorySource;
pub use pattern::Pattern;
pub use results::{Results, ScanStats};
pub use traits::{CollectSink, Sink, Source};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`WalkBuilder`] to configure a walk.
///
/// # Example
///
/// ```rust
/// use prin::{Budget, CollectSink, FilterConfig, MemorySource};
///
/// let source = MemorySource::new()
///     .file("Cargo.lock", "# generated\n")
///     .file("src/main.rs", "fn main() {}\n");
///
/// let walker = prin::walk()
///     .source(source)
///     .config(FilterConfig::default())
///     .build()
///     .unwrap();
///
/// // Lock files are excluded during descent, but naming one emits it.
/// let mut sink = CollectSink::new();
/// walker.run(&[".", "Cargo.lock"], &mut sink, &mut Budget::Unbounded);
/// assert_eq!(sink.paths(), ["src/main.rs", "Cargo.lock"]);
/// ```
pub fn walk() -> WalkBuilder {
    WalkBuilder::default()
}
