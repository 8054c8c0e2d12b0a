//! Tutorial state machine
//!
//! `TutorialSession` is the explicit context object for one learner: the
//! selected tutorial, the step cursor, a live rules engine, the highlight and
//! arrow state mirrored from the current step, and the latest insight.
//!
//! Navigation never fails. Out-of-range requests are no-ops and an illegal
//! scripted move is logged and swallowed. Every navigation that changes
//! state bumps `generation`, which tags insight fetches so a response for an
//! older state is dropped instead of overwriting newer state.
//!
//! Moving forward replays the step's move on the engine; moving backward or
//! jumping reloads the step's FEN. Catalog validation guarantees both reach
//! the same position.

use coach_common::events::{AudioCue, EventBus, TutorEvent};
use coach_common::{Arrow, Insight, InsightRequest, Step, Tutorial};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::rules::RulesEngine;

/// An insight fetch captured at the generation it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightTicket {
    pub generation: u64,
    pub request: InsightRequest,
}

/// Read-only snapshot for the presentation layer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub tutorial_id: String,
    pub tutorial_title: String,
    pub difficulty: String,
    pub step_index: usize,
    pub total_steps: usize,
    pub progress: u8,
    pub fen: String,
    pub notation: String,
    pub explanation: String,
    pub highlight_squares: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_arrow: Option<Arrow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<Insight>,
    pub loading_insight: bool,
    pub is_first_step: bool,
    pub is_last_step: bool,
}

/// Mutable session state over an immutable catalog
pub struct TutorialSession {
    catalog: Arc<Catalog>,
    /// Index of the current tutorial in the catalog
    tutorial: usize,
    step_index: usize,
    engine: RulesEngine,
    highlight_squares: Vec<String>,
    show_arrow: Option<Arrow>,
    insight: Option<Insight>,
    /// Fetches issued for the current generation and not yet completed
    fetches_in_flight: usize,
    generation: u64,
    events: EventBus,
}

impl TutorialSession {
    /// Start a session on the catalog's first tutorial, first step
    pub fn initialize(catalog: Arc<Catalog>, events: EventBus) -> Result<Self> {
        let first = catalog.first().ok_or(Error::EmptyCatalog)?;
        if first.steps.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let mut session = Self {
            catalog,
            tutorial: 0,
            step_index: 0,
            engine: RulesEngine::new(),
            highlight_squares: Vec::new(),
            show_arrow: None,
            insight: None,
            fetches_in_flight: 0,
            generation: 0,
            events,
        };
        session.reload_current();
        session.enter_step();

        info!(
            tutorial = %session.current_tutorial().id,
            tutorials = session.catalog.len(),
            "Tutorial session initialized"
        );
        Ok(session)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Switch to tutorial `id` at its first step
    ///
    /// Unknown ids and tutorials without steps leave the state unchanged.
    pub fn select_tutorial(&mut self, id: &str) -> bool {
        let Some(index) = self.catalog.position_of(id) else {
            debug!(tutorial = id, "Ignoring selection of unknown tutorial");
            return false;
        };
        if self.catalog.tutorials()[index].steps.is_empty() {
            warn!(tutorial = id, "Ignoring selection of tutorial without steps");
            return false;
        }

        self.tutorial = index;
        self.step_index = 0;
        self.reload_current();
        self.enter_step();
        self.events.emit_lossy(TutorEvent::cue(AudioCue::Success));

        info!(tutorial = id, "Tutorial selected");
        true
    }

    /// Advance one step, playing the step's move on the engine
    pub fn next_step(&mut self) -> bool {
        if self.step_index + 1 >= self.total_steps() {
            return false;
        }

        self.step_index += 1;
        let step = self.current_step().clone();

        if step.has_move() {
            match self.engine.apply_san(&step.move_san) {
                Ok(()) => {
                    self.events.emit_lossy(TutorEvent::cue(AudioCue::Hit));
                }
                Err(e) => {
                    warn!(
                        tutorial = %self.current_tutorial().id,
                        step = self.step_index,
                        san = %step.move_san,
                        "Scripted move could not be played: {}", e
                    );
                    self.events.emit_lossy(TutorEvent::IllegalScriptedMove {
                        tutorial_id: self.current_tutorial().id.clone(),
                        step_index: self.step_index,
                        san: step.move_san.clone(),
                        reason: e.to_string(),
                        timestamp: chrono::Utc::now(),
                    });
                }
            }
        }

        self.enter_step();
        true
    }

    /// Go back one step, reloading that step's FEN
    pub fn previous_step(&mut self) -> bool {
        if self.step_index == 0 {
            return false;
        }

        self.step_index -= 1;
        self.reload_current();
        self.enter_step();
        true
    }

    /// Jump to `index`, reloading that step's FEN
    pub fn go_to_step(&mut self, index: usize) -> bool {
        if index >= self.total_steps() {
            return false;
        }

        self.step_index = index;
        self.reload_current();
        self.enter_step();
        true
    }

    /// Return to the first step of the current tutorial
    pub fn restart(&mut self) -> bool {
        self.step_index = 0;
        self.reload_current();
        self.enter_step();
        self.events.emit_lossy(TutorEvent::cue(AudioCue::Success));
        true
    }

    // ------------------------------------------------------------------
    // Insight bookkeeping
    // ------------------------------------------------------------------

    /// Mark an insight fetch as started and describe what to ask for
    ///
    /// May be called repeatedly; every call produces a ticket for the
    /// current generation. The session stays loading until every ticket of
    /// the current generation has completed.
    pub fn begin_insight_fetch(&mut self) -> InsightTicket {
        self.fetches_in_flight += 1;

        let tutorial = self.current_tutorial();
        let step = self.current_step();
        let previous_move = self
            .step_index
            .checked_sub(1)
            .and_then(|i| tutorial.step(i))
            .map(|s| s.move_san.clone())
            .filter(|san| !san.is_empty());

        let request = InsightRequest {
            fen: self.engine.fen(),
            move_san: Some(step.move_san.clone()).filter(|san| !san.is_empty()),
            notation: Some(step.notation.clone()).filter(|n| !n.is_empty()),
            previous_move,
            difficulty: Some(tutorial.difficulty),
        };

        self.events.emit_lossy(TutorEvent::InsightRequested {
            tutorial_id: tutorial.id.clone(),
            step_index: self.step_index,
            generation: self.generation,
            timestamp: chrono::Utc::now(),
        });

        InsightTicket {
            generation: self.generation,
            request,
        }
    }

    /// Store a fetched insight if the ticket is still current
    ///
    /// Returns false (and drops the insight) for stale tickets.
    pub fn complete_insight_fetch(&mut self, ticket: &InsightTicket, insight: Insight) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale insight"
            );
            return false;
        }

        self.events.emit_lossy(TutorEvent::InsightUpdated {
            tutorial_id: self.current_tutorial().id.clone(),
            step_index: self.step_index,
            generation: self.generation,
            degraded: insight.is_degraded(),
            timestamp: chrono::Utc::now(),
        });
        self.insight = Some(insight);
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
        true
    }

    // ------------------------------------------------------------------
    // Derived queries
    // ------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_tutorial(&self) -> &Tutorial {
        &self.catalog.tutorials()[self.tutorial]
    }

    pub fn current_step(&self) -> &Step {
        &self.current_tutorial().steps[self.step_index]
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn total_steps(&self) -> usize {
        self.current_tutorial().total_steps()
    }

    /// Percentage through the tutorial, 0 for single-step tutorials
    pub fn progress(&self) -> u8 {
        progress_percent(self.step_index, self.total_steps())
    }

    pub fn fen(&self) -> String {
        self.engine.fen()
    }

    pub fn engine(&self) -> &RulesEngine {
        &self.engine
    }

    pub fn highlight_squares(&self) -> &[String] {
        &self.highlight_squares
    }

    pub fn show_arrow(&self) -> Option<&Arrow> {
        self.show_arrow.as_ref()
    }

    pub fn insight(&self) -> Option<&Insight> {
        self.insight.as_ref()
    }

    pub fn is_loading_insight(&self) -> bool {
        self.fetches_in_flight > 0
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn view(&self) -> SessionView {
        let tutorial = self.current_tutorial();
        let step = self.current_step();
        SessionView {
            tutorial_id: tutorial.id.clone(),
            tutorial_title: tutorial.title.clone(),
            difficulty: tutorial.difficulty.to_string(),
            step_index: self.step_index,
            total_steps: self.total_steps(),
            progress: self.progress(),
            fen: self.fen(),
            notation: step.notation.clone(),
            explanation: step.explanation.clone(),
            highlight_squares: self.highlight_squares.clone(),
            show_arrow: self.show_arrow.clone(),
            insight: self.insight.clone(),
            loading_insight: self.is_loading_insight(),
            is_first_step: self.step_index == 0,
            is_last_step: self.step_index + 1 == self.total_steps(),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Load the current step's FEN into the engine
    ///
    /// An empty FEN on the first step means the standard start position.
    /// An unusable FEN is logged and the engine keeps its position.
    fn reload_current(&mut self) {
        let fen = self.current_step().fen.clone();
        if fen.trim().is_empty() {
            if self.step_index == 0 {
                self.engine.reset();
            }
            return;
        }

        if let Err(e) = self.engine.load(&fen) {
            warn!(
                tutorial = %self.current_tutorial().id,
                step = self.step_index,
                "Step position could not be loaded: {}", e
            );
        }
    }

    /// Mirror step fields, drop the insight of the previous state and
    /// start a new generation
    fn enter_step(&mut self) {
        let (highlights, arrow) = {
            let step = self.current_step();
            (step.highlight_squares.clone(), step.show_arrow.clone())
        };
        self.highlight_squares = highlights;
        self.show_arrow = arrow;
        self.insight = None;
        self.fetches_in_flight = 0;
        self.generation += 1;

        self.events.emit_lossy(TutorEvent::StepChanged {
            tutorial_id: self.current_tutorial().id.clone(),
            step_index: self.step_index,
            total_steps: self.total_steps(),
            fen: self.engine.fen(),
            timestamp: chrono::Utc::now(),
        });
    }
}

/// `round(index / (total - 1) * 100)`, 0 when `total <= 1`
pub fn progress_percent(index: usize, total: usize) -> u8 {
    if total <= 1 {
        return 0;
    }
    let ratio = index.min(total - 1) as f64 / (total - 1) as f64;
    (ratio * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent_edges() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(0, 1), 0);
        assert_eq!(progress_percent(0, 2), 0);
        assert_eq!(progress_percent(1, 2), 100);
        assert_eq!(progress_percent(1, 3), 50);
        // 1/6 = 16.67
        assert_eq!(progress_percent(1, 7), 17);
        assert_eq!(progress_percent(11, 12), 100);
    }

    #[test]
    fn test_initialize_rejects_empty_catalog() {
        let result = TutorialSession::initialize(Arc::new(Catalog::new(vec![])), EventBus::new(8));
        assert!(matches!(result, Err(Error::EmptyCatalog)));
    }

    #[test]
    fn test_insight_ticket_carries_step_context() {
        let mut session =
            TutorialSession::initialize(Arc::new(Catalog::builtin()), EventBus::new(8)).unwrap();
        session.next_step();
        session.next_step();

        let ticket = session.begin_insight_fetch();
        assert!(session.is_loading_insight());
        assert_eq!(ticket.generation, session.generation());
        assert_eq!(ticket.request.move_san.as_deref(), Some("e5"));
        assert_eq!(ticket.request.notation.as_deref(), Some("e5"));
        assert_eq!(ticket.request.previous_move.as_deref(), Some("e4"));
        assert_eq!(ticket.request.fen, session.fen());
    }

    #[test]
    fn test_overlapping_fetches_keep_loading_until_last_completes() {
        let mut session =
            TutorialSession::initialize(Arc::new(Catalog::builtin()), EventBus::new(8)).unwrap();
        let scheduled = session.begin_insight_fetch();
        let manual = session.begin_insight_fetch();

        assert!(session.complete_insight_fetch(&scheduled, Insight::new("a", "b", "c")));
        assert!(session.is_loading_insight());
        assert!(session.insight().is_some());

        assert!(session.complete_insight_fetch(&manual, Insight::new("d", "e", "f")));
        assert!(!session.is_loading_insight());
        assert_eq!(session.insight().map(|i| i.insight.as_str()), Some("d"));
    }

    #[test]
    fn test_navigation_resets_in_flight_fetches() {
        let mut session =
            TutorialSession::initialize(Arc::new(Catalog::builtin()), EventBus::new(8)).unwrap();
        let stale = session.begin_insight_fetch();
        session.begin_insight_fetch();
        session.next_step();
        assert!(!session.is_loading_insight());

        let current = session.begin_insight_fetch();
        assert!(!session.complete_insight_fetch(&stale, Insight::new("a", "b", "c")));
        assert!(session.is_loading_insight());
        assert!(session.complete_insight_fetch(&current, Insight::new("d", "e", "f")));
        assert!(!session.is_loading_insight());
    }

    #[test]
    fn test_first_step_ticket_has_no_moves() {
        let mut session =
            TutorialSession::initialize(Arc::new(Catalog::builtin()), EventBus::new(8)).unwrap();
        let ticket = session.begin_insight_fetch();

        assert!(ticket.request.move_san.is_none());
        assert!(ticket.request.previous_move.is_none());
        assert_eq!(
            ticket.request.difficulty,
            Some(coach_common::Difficulty::Beginner)
        );
    }
}
