//! Application layer: the search state machine.
//!
//! Sits between the session runtime and the pipelines. Everything here is
//! synchronous and deterministic; time and I/O enter only as events.
//!
//! ```text
//! RawEvent → Event → handle_event → state mutations → Actions → runtime
//!                         ↑                                       ↓
//!                         └──── TimerFired / fetch completions ───┘
//! ```
//!
//! # Modules
//!
//! - [`events`]: Raw control events and their normalized form
//! - [`actions`]: Side effects emitted by the handler
//! - [`handler`]: Event processing and state transitions
//! - [`state`]: Session state container
//!
//! # Example
//!
//! ```rust
//! use reposearch::app::{handle_event, start, Action, AppState, Event, RawEvent};
//!
//! let mut state = AppState::default();
//! let initial = start(&mut state);
//! assert!(initial.contains(&Action::RenderPageNumber(1)));
//!
//! let event = Event::try_from(RawEvent::input("keyword", "rxjs"))?;
//! let actions = handle_event(&mut state, &event);
//! assert!(matches!(actions[0], Action::ScheduleTimer { .. }));
//! # Ok::<(), reposearch::domain::SearchError>(())
//! ```

pub mod actions;
pub mod events;
pub mod handler;
pub mod state;

pub use actions::{Action, TimerId};
pub use events::{Control, Event, RawEvent};
pub use handler::{handle_event, start};
pub use state::AppState;
