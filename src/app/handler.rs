//! Event handling and state transitions.
//!
//! [`handle_event`] applies one [`Event`] to [`AppState`] and returns the
//! actions it implies, in execution order:
//!
//! - keystrokes update the keyword cell and schedule a debounce timer;
//! - fired timers may release a suggestion fetch;
//! - sort and page events render their derived indicators first, then
//!   re-evaluate the query intent;
//! - every issued search is preceded by [`Action::ShowLoading`];
//! - completions become [`Action::RenderSuggestions`] or [`Action::Deliver`]
//!   when they belong to the newest request, and nothing otherwise.
//!
//! [`start`] emits the renders the session shows before any input: page 1
//! and the initial sort indicator.

use crate::app::actions::TimerId;
use crate::app::{Action, AppState, Event};
use crate::source::FetchRequest;

/// Renders the initial derived state of a fresh session.
pub fn start(state: &mut AppState) -> Vec<Action> {
    let _span = tracing::debug_span!("start_session").entered();

    let mut actions = Vec::new();
    render_derived(state, &mut actions);
    actions
}

/// Processes an event and returns the actions to execute.
pub fn handle_event(state: &mut AppState, event: &Event) -> Vec<Action> {
    let _span = tracing::debug_span!("handle_event", event_type = event.kind()).entered();

    let mut actions = Vec::new();
    match event {
        Event::KeywordChanged(text) => {
            state.stores.keyword.set(text.clone());
            let generation = state.suggestions.keystroke(text.clone());
            actions.push(Action::ScheduleTimer {
                timer: TimerId { generation },
                after: state.suggestions.quiet_period(),
            });
        }
        Event::SearchTriggered => {
            let request = state.coordinator.trigger(&state.stores);
            issue_search(state, request, &mut actions);
        }
        Event::SortClicked(field) => {
            state.stores.sort.click(*field);
            render_derived(state, &mut actions);
            let request = state.coordinator.reconcile(&state.stores);
            issue_search(state, request, &mut actions);
        }
        Event::PerPageChanged(size) => {
            tracing::debug!(per_page = size.get(), "page size changed");
            state.stores.per_page.set(*size);
            let request = state.coordinator.reconcile(&state.stores);
            issue_search(state, request, &mut actions);
        }
        Event::PageStepped(step) => {
            state.stores.page.step(*step);
            render_derived(state, &mut actions);
            let request = state.coordinator.reconcile(&state.stores);
            issue_search(state, request, &mut actions);
        }
        Event::TimerFired(timer) => {
            if let Some(request) = state.suggestions.settle(timer.generation) {
                actions.push(Action::Fetch(request));
            }
        }
        Event::SuggestionsLoaded { token, result } => {
            if let Some(list) = state.suggestions.accept(*token, result) {
                tracing::debug!(count = list.len(), "suggestions updated");
                state.suggestion_list.clone_from(&list);
                actions.push(Action::RenderSuggestions(list));
            }
        }
        Event::QueryCompleted { token, result } => {
            if let Some(envelope) = state.coordinator.complete(*token, result) {
                tracing::debug!(success = envelope.success, rows = envelope.data.len(), "search finished");
                state.loading = false;
                actions.push(Action::Deliver(envelope));
            }
        }
    }

    actions
}

fn issue_search(state: &mut AppState, request: Option<FetchRequest>, actions: &mut Vec<Action>) {
    if let Some(request) = request {
        state.loading = true;
        actions.push(Action::ShowLoading);
        actions.push(Action::Fetch(request));
    }
}

/// Pushes page-number and sort-indicator renders for pending emissions.
fn render_derived(state: &mut AppState, actions: &mut Vec<Action>) {
    if let Some(page) = state.page_render.changed(state.stores.page.cell()) {
        actions.push(Action::RenderPageNumber(page.get()));
    }
    if let Some(sort) = state.sort_render.changed(state.stores.sort.cell()) {
        actions.push(Action::ClearSortIndicators);
        actions.push(Action::RenderSortIndicator {
            field: sort.field,
            direction: sort.direction,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FetchError, PageSize, PageStep, Repository, SortDirection, SortField};
    use crate::pipeline::RequestToken;
    use std::time::Duration;

    fn fetched(actions: &[Action]) -> Vec<&FetchRequest> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Fetch(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn search(state: &mut AppState, keyword: &str) -> RequestToken {
        handle_event(state, &Event::KeywordChanged(keyword.to_string()));
        let actions = handle_event(state, &Event::SearchTriggered);
        fetched(&actions)
            .first()
            .map(|request| request.token())
            .unwrap_or_else(|| panic!("search for {keyword:?} should fetch"))
    }

    // ========================================================================
    // Start-up renders
    // ========================================================================

    #[test]
    fn start_renders_first_page_and_default_sort() {
        let mut state = AppState::default();
        assert_eq!(
            start(&mut state),
            vec![
                Action::RenderPageNumber(1),
                Action::ClearSortIndicators,
                Action::RenderSortIndicator {
                    field: SortField::Stars,
                    direction: SortDirection::Descending,
                },
            ]
        );
        assert!(start(&mut state).is_empty());
    }

    // ========================================================================
    // Suggestions
    // ========================================================================

    #[test]
    fn keystroke_schedules_debounce_timer() {
        let mut state = AppState::default();
        let actions = handle_event(&mut state, &Event::KeywordChanged("rx".to_string()));
        assert_eq!(
            actions,
            vec![Action::ScheduleTimer {
                timer: TimerId { generation: 1 },
                after: Duration::from_millis(700),
            }]
        );
        assert_eq!(state.stores.keyword.get(), "rx");
    }

    #[test]
    fn only_latest_timer_fetches_suggestions() {
        let mut state = AppState::default();
        for text in ["rxj", "rxjs"] {
            handle_event(&mut state, &Event::KeywordChanged(text.to_string()));
        }

        let stale = handle_event(&mut state, &Event::TimerFired(TimerId { generation: 1 }));
        assert!(stale.is_empty());

        let fresh = handle_event(&mut state, &Event::TimerFired(TimerId { generation: 2 }));
        assert!(matches!(
            fetched(&fresh).as_slice(),
            [FetchRequest::Suggestions { keyword, .. }] if keyword == "rxjs"
        ));
    }

    #[test]
    fn loaded_suggestions_replace_the_list() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::KeywordChanged("rxjs".to_string()));
        let actions = handle_event(&mut state, &Event::TimerFired(TimerId { generation: 1 }));
        let token = fetched(&actions)[0].token();

        let list = vec!["ReactiveX/rxjs".to_string()];
        let rendered = handle_event(
            &mut state,
            &Event::SuggestionsLoaded {
                token,
                result: Ok(list.clone()),
            },
        );
        assert_eq!(rendered, vec![Action::RenderSuggestions(list.clone())]);

        let failed = handle_event(
            &mut state,
            &Event::SuggestionsLoaded {
                token,
                result: Err(FetchError::new("timeout")),
            },
        );
        assert!(failed.is_empty());
        assert_eq!(state.suggestion_list, list);
    }

    // ========================================================================
    // Search
    // ========================================================================

    #[test]
    fn no_search_before_first_trigger() {
        let mut state = AppState::default();
        let mut actions = Vec::new();
        actions.extend(handle_event(&mut state, &Event::SortClicked(SortField::Forks)));
        actions.extend(handle_event(&mut state, &Event::PageStepped(PageStep::Next)));
        actions.extend(handle_event(
            &mut state,
            &Event::PerPageChanged(PageSize::new(30).unwrap_or_default()),
        ));

        assert!(fetched(&actions).is_empty());
        assert!(!actions.contains(&Action::ShowLoading));
        assert!(!state.loading);
    }

    #[test]
    fn search_shows_loading_before_fetch() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::KeywordChanged("rxjs".to_string()));
        let actions = handle_event(&mut state, &Event::SearchTriggered);

        assert_eq!(actions.first(), Some(&Action::ShowLoading));
        assert!(matches!(actions.get(1), Some(Action::Fetch(FetchRequest::Results { .. }))));
        assert!(state.loading);
    }

    #[test]
    fn page_steps_render_every_accumulated_value() {
        let mut state = AppState::default();
        let mut pages: Vec<u32> = start(&mut state)
            .into_iter()
            .filter_map(|action| match action {
                Action::RenderPageNumber(page) => Some(page),
                _ => None,
            })
            .collect();

        let steps = [PageStep::Next, PageStep::Next, PageStep::Previous, PageStep::Previous, PageStep::Previous];
        for step in steps {
            for action in handle_event(&mut state, &Event::PageStepped(step)) {
                if let Action::RenderPageNumber(page) = action {
                    pages.push(page);
                }
            }
        }

        assert_eq!(pages, vec![1, 2, 3, 2, 1, 1]);
    }

    #[test]
    fn sort_click_renders_indicator_then_searches() {
        let mut state = AppState::default();
        start(&mut state);
        let token = search(&mut state, "rxjs");
        handle_event(&mut state, &Event::QueryCompleted { token, result: Ok(vec![]) });

        let actions = handle_event(&mut state, &Event::SortClicked(SortField::Stars));
        assert_eq!(actions[0], Action::ClearSortIndicators);
        assert_eq!(
            actions[1],
            Action::RenderSortIndicator {
                field: SortField::Stars,
                direction: SortDirection::Ascending,
            }
        );
        assert_eq!(actions[2], Action::ShowLoading);
        assert!(matches!(
            &actions[3],
            Action::Fetch(FetchRequest::Results { intent, .. }) if intent.sort.direction == SortDirection::Ascending
        ));
    }

    #[test]
    fn only_current_search_is_delivered() {
        let mut state = AppState::default();
        let first = search(&mut state, "rxjs");
        let second = search(&mut state, "rust");

        let stale = handle_event(
            &mut state,
            &Event::QueryCompleted {
                token: first,
                result: Ok(vec![Repository::new("ReactiveX/rxjs", 1, 1)]),
            },
        );
        assert!(stale.is_empty());
        assert!(state.loading);

        let fresh = handle_event(
            &mut state,
            &Event::QueryCompleted {
                token: second,
                result: Err(FetchError::new("Validation Failed")),
            },
        );
        assert!(matches!(
            fresh.as_slice(),
            [Action::Deliver(envelope)] if !envelope.success && envelope.data.is_empty()
        ));
        assert!(!state.loading);
    }
}
