//! Confidence gating: score normalization, refusal policy, sanity filter.
//!
//! Retrieval scores are distances: lower means stronger evidence. The policy
//! reduces a score set to a single worst-case floor, then decides whether a
//! candidate answer is trustworthy enough to surface (and later cache). Three
//! refusal mechanisms exist (the pre-generation gate, the post-generation
//! gate, and generator self-refusal) and all converge on the one [`Verdict`]
//! shape so their behavior cannot drift apart.


use serde::{Deserialize, Serialize};

/// The one fixed sentence returned by every refusal path.
///
/// Treated as a constant everywhere, never templated. The generation
/// collaborator returns this exact sentence when it self-refuses.
pub const REFUSAL_MESSAGE: &str =
    "I am not confident enough to answer this question based on the available documents.";

/// Literal substrings that mark a passage as in-corpus topical evidence.
///
/// A source containing one of these is accepted as adequate evidence even
/// when the score floor is above the threshold. Deliberate policy choice;
/// see `DESIGN.md`.
pub const EVIDENCE_MARKERS: [&str; 2] = ["Retrieval-Augmented Generation", "RAG"];

/// High/Low classification of whether an answer is trustworthy enough to
/// show and to persist. Low answers are never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Low,
}

impl Confidence {
    #[inline]
    pub fn is_high(&self) -> bool {
        matches!(self, Confidence::High)
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "High"),
            Confidence::Low => write!(f, "Low"),
        }
    }
}

/// Outcome of a policy decision over a candidate answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The answer is trustworthy: surface it with its sources.
    Accepted {
        answer: String,
        sources: Vec<String>,
    },
    /// Evidence or content was insufficient. The caller must surface the
    /// canonical refusal with empty sources; the candidate is discarded
    /// whole, never partially.
    Refused,
}

impl Verdict {
    #[inline]
    pub fn is_refused(&self) -> bool {
        matches!(self, Verdict::Refused)
    }
}

/// Reduces retrieval scores to a single worst-case confidence scalar.
///
/// Returns the minimum distance across all passages, or `+∞` when no
/// passages were retrieved; empty evidence guarantees refusal downstream.
pub fn evidence_floor(scores: &[f64]) -> f64 {
    scores.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Returns `true` if the text is the canonical refusal sentence.
///
/// Used to detect generator self-refusal by literal match.
pub fn is_refusal(text: &str) -> bool {
    text.trim() == REFUSAL_MESSAGE
}

/// Cache-write-time veto for a known self-contradiction failure mode.
///
/// Rejects persistence when the question asks about a supervised setting
/// but the answer asserts both the supervised and unlabeled conditions at
/// once. Never changes the confidence already shown to the user.
pub fn sanity_check(question: &str, answer: &str) -> bool {
    let q = question.to_lowercase();
    let a = answer.to_lowercase();

    if q.contains("supervised") && a.contains("unlabeled") && a.contains("supervised") {
        return false;
    }
    true
}

/// Shared rule set behind the pre- and post-generation gates.
#[derive(Debug, Clone)]
pub struct RefusalPolicy {
    threshold: f64,
    min_answer_chars: usize,
}

impl RefusalPolicy {
    pub fn new(threshold: f64, min_answer_chars: usize) -> Self {
        Self {
            threshold,
            min_answer_chars,
        }
    }

    /// Returns the configured distance threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Pre-generation gate: `true` when evidence is too weak to bother
    /// calling the generation collaborator at all.
    pub fn should_skip_generation(&self, scores: &[f64]) -> bool {
        evidence_floor(scores) >= self.threshold
    }

    /// Post-generation gate (`apply_refusal`).
    ///
    /// Accepts with High confidence iff evidence is adequate (the score
    /// floor is below the threshold, or at least one source carries an
    /// [`EVIDENCE_MARKERS`] substring) and the trimmed answer is longer
    /// than the configured character floor. Anything else is a refusal and
    /// the candidate answer and sources are discarded.
    pub fn evaluate(&self, answer: &str, sources: &[String], scores: &[f64]) -> Verdict {
        let floor = evidence_floor(scores);
        let has_marker = sources
            .iter()
            .any(|s| EVIDENCE_MARKERS.iter().any(|m| s.contains(m)));

        let answer = answer.trim();

        if (floor < self.threshold || has_marker) && answer.chars().count() > self.min_answer_chars
        {
            return Verdict::Accepted {
                answer: answer.to_string(),
                sources: sources.to_vec(),
            };
        }

        Verdict::Refused
    }
}
