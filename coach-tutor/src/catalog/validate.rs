//! Load-time catalog validation
//!
//! Replays every tutorial through the rules engine. For each step `i > 0`,
//! playing `steps[i].move` from `steps[i-1].fen` must reach `steps[i].fen`
//! (placement and side to move). A step without a move must repeat the
//! previous position. Square labels in highlights and arrows must name real
//! squares.

use coach_common::Tutorial;
use shakmaty::Square;
use std::collections::HashSet;
use std::fmt;

use crate::rules::{board_and_turn, RulesEngine};

/// What is wrong with a tutorial or step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    DuplicateId,
    EmptyTutorial,
    InitialStepHasMove { san: String },
    InvalidFen { reason: String },
    IllegalMove { san: String, reason: String },
    PositionMismatch { expected: String, actual: String },
    InvalidSquare { label: String },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::DuplicateId => write!(f, "duplicate tutorial id"),
            IssueKind::EmptyTutorial => write!(f, "tutorial has no steps"),
            IssueKind::InitialStepHasMove { san } => {
                write!(f, "initial step carries move '{}'", san)
            }
            IssueKind::InvalidFen { reason } => write!(f, "invalid FEN: {}", reason),
            IssueKind::IllegalMove { san, reason } => {
                write!(f, "move '{}' cannot be played: {}", san, reason)
            }
            IssueKind::PositionMismatch { expected, actual } => write!(
                f,
                "replayed position '{}' does not match authored '{}'",
                actual, expected
            ),
            IssueKind::InvalidSquare { label } => write!(f, "'{}' is not a square", label),
        }
    }
}

/// One inconsistency, located by tutorial and (optionally) step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIssue {
    pub tutorial_id: String,
    pub step_index: Option<usize>,
    pub kind: IssueKind,
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.step_index {
            Some(index) => write!(f, "{} step {}: {}", self.tutorial_id, index, self.kind),
            None => write!(f, "{}: {}", self.tutorial_id, self.kind),
        }
    }
}

/// Result of validating a whole catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogReport {
    pub tutorials_checked: usize,
    pub steps_checked: usize,
    pub issues: Vec<CatalogIssue>,
}

impl CatalogReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues_for(&self, tutorial_id: &str) -> impl Iterator<Item = &CatalogIssue> {
        let tutorial_id = tutorial_id.to_string();
        self.issues
            .iter()
            .filter(move |issue| issue.tutorial_id == tutorial_id)
    }
}

impl fmt::Display for CatalogReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} issue(s) in {} tutorial(s), {} step(s) checked",
            self.issues.len(),
            self.tutorials_checked,
            self.steps_checked
        )?;
        for issue in &self.issues {
            write!(f, "\n  - {}", issue)?;
        }
        Ok(())
    }
}

pub(super) fn validate(tutorials: &[Tutorial]) -> CatalogReport {
    let mut report = CatalogReport::default();
    let mut seen_ids = HashSet::new();

    for tutorial in tutorials {
        report.tutorials_checked += 1;
        let mut push = |step_index: Option<usize>, kind: IssueKind| {
            report.issues.push(CatalogIssue {
                tutorial_id: tutorial.id.clone(),
                step_index,
                kind,
            });
        };

        if !seen_ids.insert(tutorial.id.as_str()) {
            push(None, IssueKind::DuplicateId);
        }

        if tutorial.steps.is_empty() {
            push(None, IssueKind::EmptyTutorial);
            continue;
        }

        // Position the next step's move is replayed from: the authored one,
        // or the replayed one when the authored FEN is unusable
        let mut previous: Option<RulesEngine> = None;

        for (index, step) in tutorial.steps.iter().enumerate() {
            report.steps_checked += 1;

            let labels = step.highlight_squares.iter().chain(
                step.show_arrow
                    .iter()
                    .flat_map(|arrow| [&arrow.from, &arrow.to]),
            );
            for label in labels {
                if label.parse::<Square>().is_err() {
                    push(Some(index), IssueKind::InvalidSquare { label: label.clone() });
                }
            }

            if index == 0 && step.has_move() {
                push(
                    Some(index),
                    IssueKind::InitialStepHasMove { san: step.move_san.clone() },
                );
            }

            let authored = if index == 0 && step.fen.trim().is_empty() {
                Some(RulesEngine::new())
            } else {
                match RulesEngine::from_fen(&step.fen) {
                    Ok(engine) => Some(engine),
                    Err(e) => {
                        push(Some(index), IssueKind::InvalidFen { reason: e.to_string() });
                        None
                    }
                }
            };

            let mut replayed = None;
            if let Some(mut position) = previous.take() {
                let replay_ok = if step.has_move() {
                    match position.apply_san(&step.move_san) {
                        Ok(()) => true,
                        Err(e) => {
                            push(
                                Some(index),
                                IssueKind::IllegalMove {
                                    san: step.move_san.clone(),
                                    reason: e.to_string(),
                                },
                            );
                            false
                        }
                    }
                } else {
                    true
                };

                if replay_ok {
                    if let Some(expected) = authored.as_ref() {
                        if !position.same_board_and_turn(expected.position()) {
                            push(
                                Some(index),
                                IssueKind::PositionMismatch {
                                    expected: board_and_turn(&expected.fen()),
                                    actual: board_and_turn(&position.fen()),
                                },
                            );
                        }
                    }
                    replayed = Some(position);
                }
            }

            previous = authored.or(replayed);
        }
    }

    report
}
