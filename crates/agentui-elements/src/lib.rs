//! AgentUI Elements
//!
//! Custom element definitions and the render lifecycle contract.
//!
//! - [`ElementRegistry`]: idempotent tag → definition registry
//! - [`Component`] / [`ComponentClass`]: instance and class sides of a component
//! - [`Lifecycle`]: per-instance state machine
//! - [`Page`]: headless host that drives the lifecycle from DOM mutations
//! - [`BundleChunk`]: a set of classes loaded together

mod definition;
mod registry;
mod lifecycle;
mod component;
mod scope;
mod instance;
mod page;
mod chunk;

pub use definition::{ComponentClass, ComponentDefinition, ComponentMetadata, Describable};
pub use registry::{is_valid_custom_element_name, ElementRegistry, Registration, RegistryError};
pub use lifecycle::{Lifecycle, LifecycleError, LifecycleEvent, LifecycleState};
pub use component::{Component, ComponentEvent, RenderContext};
pub use scope::{ListenerScope, ListenerTarget, TimerId};
pub use instance::LiveInstance;
pub use page::Page;
pub use chunk::{BundleChunk, ChunkLoadReport};
