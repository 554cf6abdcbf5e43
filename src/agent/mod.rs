//! Agents: one decision-making unit per player.
//!
//! An [`Agent`] is a closed tagged union over where its logic executes:
//!
//! - **Unset**: nothing bound yet; invoking it is a setup error.
//! - **Native**: a Rust closure, called directly and free to run concurrently
//!   with other native agents.
//! - **ForeignBoundary**: a handle into a foreign runtime (Python, a JSON
//!   bridge). Calls are serialized process-wide by the [`boundary`] lock,
//!   since such runtimes are not safe for concurrent entry.
//!
//! Callers never see the distinction: `agent.invoke(&state)` returns a `Move`
//! or an [`AgentError`], whatever the variant.

pub mod boundary;
pub mod dispatch;
pub mod error;
pub mod foreign;
pub mod random;

pub use boundary::{BoundaryGuard, BoundaryStats};
pub use dispatch::{Agent, NativeFn};
pub use error::{AgentError, AgentKind};
pub use foreign::{ForeignCallable, JsonCallable};
pub use random::RandomAgent;
