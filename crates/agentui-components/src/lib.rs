//! AgentUI Components
//!
//! The shipped component set: the static tag list, a class for every tag
//! and the bundle chunks that define them.

mod tags;
mod builtin;
mod chunks;

pub use tags::{is_agentui_tag, DECLARED_TOTAL, TAG_LIST, TAG_PREFIX};
pub use builtin::{builtin_class, builtin_spec, escape, Behavior, BuiltinClass, BuiltinSpec, Template, BUILTINS};
pub use chunks::{chunk, full_bundle, standard_chunks, CHUNK_TAGS};
