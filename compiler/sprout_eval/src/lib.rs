//! Memoizing PEG evaluator with support for direct and indirect left
//! recursion.
//!
//! ```text
//! let evaluator = Evaluator::for_grammar(&grammar, EvalConfig::default());
//! let tree = evaluator.evaluate(expr, "1+2+3")?;
//! assert!(tree.is_complete("1+2+3"));
//! ```
//!
//! "No match" is an ordinary result (`ParseTree::matched() == false`);
//! [`EvalError`] is reserved for malformed grammars and misuse.
//!
//! # Tracing
//!
//! With [`EvalConfig::trace`] set, every rule application emits a span and
//! enter/exit events on the `sprout_eval::trace` target. Nothing is printed
//! unless a subscriber is installed, e.g. with [`init_tracing`].

mod answer;
mod config;
mod error;
mod memo;
mod parse_tree;
mod session;
mod stack;

pub use config::EvalConfig;
pub use error::EvalError;
pub use parse_tree::{ParseNode, ParseTree};
pub use session::{Evaluator, Session};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a global `tracing` subscriber for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=sprout_eval=debug` or `RUST_LOG=sprout_eval::trace=trace` for
/// per-application output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true);
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry().with(tree).with(filter).try_init();
        }
    });
}
