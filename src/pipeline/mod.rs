//! Reactive pipelines between the state stores and the result source.
//!
//! # Modules
//!
//! - [`stages`]: Debounce, distinct, gating and latest-wins building blocks
//! - [`suggest`]: Keystroke to suggestion-fetch pipeline
//! - [`coordinator`]: Search trigger plus sort/page/size into query intents
//! - [`dispatch`]: Envelope fan-out to render and alert listeners

pub mod coordinator;
pub mod dispatch;
pub mod stages;
pub mod suggest;

pub use coordinator::QueryCoordinator;
pub use dispatch::{ListenerId, ResultDispatcher};
pub use stages::{Debounce, Distinct, Filter, Gate, LatestWins, MinLength, RequestToken};
pub use suggest::SuggestionPipeline;
