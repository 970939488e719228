use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Category a finding is filed under. Closed set; kebab-case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Communication,
    Timing,
    Boundaries,
    Interest,
    SocialCues,
    Oversharing,
}

/// Severity of an issue, ordered low to high. Also used as risk impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub category: Category,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    pub title: String,
    pub description: String,
    pub actionable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    #[serde(rename = "type")]
    pub risk_type: String,
    pub description: String,
    pub impact: Severity,
}

/// How the result was produced. The LLM delegation path reuses the same
/// result shape and tags its output `llm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMethod {
    Local,
    Llm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub issues: Vec<Issue>,
    pub strengths: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub risk_factors: Vec<RiskFactor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub analysis_method: AnalysisMethod,
}

// ---------------------------------------------------------------------------
// Scoring policy
// ---------------------------------------------------------------------------

struct Policy {
    baseline: i32,
    high_penalty: i32,
    medium_penalty: i32,
    low_penalty: i32,
    strength_bonus: i32,
    score_min: i32,
    score_max: i32,
}

static POLICY: Policy = Policy {
    baseline: 85,
    high_penalty: 15,
    medium_penalty: 8,
    low_penalty: 3,
    strength_bonus: 5,
    score_min: 0,
    score_max: 100,
};

fn severity_penalty(severity: Severity) -> i32 {
    match severity {
        Severity::High => POLICY.high_penalty,
        Severity::Medium => POLICY.medium_penalty,
        Severity::Low => POLICY.low_penalty,
    }
}

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

// Three question marks with intervening text, scanned non-overlapping.
static EXCESSIVE_QUESTIONS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\?[^?]+\?[^?]+\?").unwrap());

// A low-effort token standing alone as a whole message line.
static SHORT_REPLY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:ok|yes|no|maybe|sure|fine)[.!]?[ \t]*$").unwrap()
});

// Longest alternative first so "well actually" is not split in two.
static INTERRUPTING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:well actually|but|however|actually)\b").unwrap());

// Three consecutive short lines; each burst is one non-overlapping match.
static FLOODING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^.{1,25}\n.{1,25}\n.{1,25}$").unwrap());

static DELAY_APOLOGY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:sorry for the late reply|sorry i just saw this|been busy)").unwrap()
});

static OVERSHARING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bmy (?:ex|therapist|medication|problems|trauma)\b").unwrap()
});

static DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:you should|you need to|you have to|why don't you)\b").unwrap()
});

static INVASIVE_QUESTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)(?:how much (?:money )?do you (?:make|earn)",
        r"|are you single|are you seeing (?:anyone|someone)",
        r"|where (?:exactly )?do you live|what's your (?:address|salary))",
    ))
    .unwrap()
});

// Repeated exclamation points, shouting runs, or upbeat vocabulary.
static ENTHUSIASM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!{2,}|\b[A-Z]{3,}\b|(?i:\b(?:love|amazing|awesome|excited|can't wait)\b)")
        .unwrap()
});

static DISENGAGEMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:busy|swamped|hectic|whatever|don't care|not interested)\b").unwrap()
});

static VENTING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:hate|horrible|awful|terrible|worst|can't stand)\b").unwrap()
});

// ---------------------------------------------------------------------------
// Detector registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct SuggestionSpec {
    pub category: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct RiskSpec {
    pub risk_type: &'static str,
    pub description: &'static str,
    pub impact: Severity,
}

#[derive(Debug, Clone, Copy)]
pub struct IssueSpec {
    pub category: Category,
    pub severity: Severity,
    pub title: &'static str,
    pub description: &'static str,
    /// How many match snippets to keep as examples.
    pub example_limit: usize,
    /// Replaces the match snippets entirely when set.
    pub fixed_example: Option<&'static str>,
    pub suggestion: Option<SuggestionSpec>,
    pub risk: Option<RiskSpec>,
}

/// What a detector contributes to the result when it fires.
#[derive(Debug, Clone, Copy)]
pub enum Emit {
    Issue(IssueSpec),
    Risk(RiskSpec),
    Strength(&'static str),
}

/// One entry in the fixed detector table. Fires iff the number of matches
/// is strictly greater than `threshold`.
pub struct Detector {
    pub name: &'static str,
    pub pattern: &'static Lazy<Regex>,
    pub threshold: usize,
    pub emit: Emit,
}

/// The full battery, in presentation order: communication style, timing,
/// boundaries, engagement. Thresholds are empirical constants carried over
/// as-is; there is no unifying rule behind them.
pub static DETECTORS: &[Detector] = &[
    Detector {
        name: "excessive-questions",
        pattern: &EXCESSIVE_QUESTIONS_RE,
        threshold: 2,
        emit: Emit::Issue(IssueSpec {
            category: Category::Communication,
            severity: Severity::Medium,
            title: "Excessive Questioning",
            description: "Rapid-fire questions can make a conversation feel like an \
                          interview rather than an exchange.",
            example_limit: 2,
            fixed_example: None,
            suggestion: Some(SuggestionSpec {
                category: "communication",
                title: "Pace Your Questions",
                description: "Ask one question at a time and give the other person room \
                              to answer fully.",
            }),
            risk: None,
        }),
    },
    Detector {
        name: "short-replies",
        pattern: &SHORT_REPLY_RE,
        threshold: 3,
        emit: Emit::Issue(IssueSpec {
            category: Category::Interest,
            severity: Severity::High,
            title: "Short, Low-Effort Replies",
            description: "A run of one-word answers usually signals fading interest or \
                          distraction.",
            example_limit: 3,
            fixed_example: None,
            suggestion: None,
            risk: None,
        }),
    },
    Detector {
        name: "interrupting",
        pattern: &INTERRUPTING_RE,
        threshold: 2,
        emit: Emit::Issue(IssueSpec {
            category: Category::Communication,
            severity: Severity::Medium,
            title: "Interrupting or Contradicting",
            description: "Frequent pushback words can come across as dismissive of the \
                          other person's point.",
            example_limit: 2,
            fixed_example: None,
            suggestion: None,
            risk: None,
        }),
    },
    Detector {
        name: "message-flooding",
        pattern: &FLOODING_RE,
        threshold: 1,
        emit: Emit::Issue(IssueSpec {
            category: Category::Timing,
            severity: Severity::Medium,
            title: "Message Flooding",
            description: "Several short messages in quick succession can feel \
                          overwhelming on the receiving end.",
            example_limit: 0,
            fixed_example: Some("Burst of short messages in immediate succession"),
            suggestion: Some(SuggestionSpec {
                category: "timing",
                title: "Space Out Your Messages",
                description: "Combine related thoughts into one message and wait for a \
                              reply before sending more.",
            }),
            risk: None,
        }),
    },
    Detector {
        name: "delayed-replies",
        pattern: &DELAY_APOLOGY_RE,
        threshold: 0,
        emit: Emit::Issue(IssueSpec {
            category: Category::Timing,
            severity: Severity::Low,
            title: "Delayed Responses",
            description: "Apologies for slow replies suggest an inconsistent response \
                          rhythm.",
            example_limit: 2,
            fixed_example: None,
            suggestion: None,
            risk: None,
        }),
    },
    Detector {
        name: "oversharing",
        pattern: &OVERSHARING_RE,
        threshold: 1,
        emit: Emit::Issue(IssueSpec {
            category: Category::Boundaries,
            severity: Severity::High,
            title: "Oversharing Personal Details",
            description: "Deeply personal disclosures early in a conversation can put \
                          pressure on the other person.",
            example_limit: 2,
            fixed_example: None,
            suggestion: None,
            risk: Some(RiskSpec {
                risk_type: "oversharing",
                description: "Highly personal topics surfaced before the relationship \
                              could support them",
                impact: Severity::High,
            }),
        }),
    },
    Detector {
        name: "directive-language",
        pattern: &DIRECTIVE_RE,
        threshold: 2,
        emit: Emit::Issue(IssueSpec {
            category: Category::Boundaries,
            severity: Severity::High,
            title: "Commanding or Directive Language",
            description: "Telling someone what they should do reads as controlling \
                          rather than supportive.",
            example_limit: 2,
            fixed_example: None,
            suggestion: None,
            risk: None,
        }),
    },
    Detector {
        name: "invasive-questions",
        pattern: &INVASIVE_QUESTION_RE,
        threshold: 0,
        emit: Emit::Risk(RiskSpec {
            risk_type: "invasive-questions",
            description: "Probing questions about income, relationship status, or home \
                          address",
            impact: Severity::High,
        }),
    },
    Detector {
        name: "enthusiasm",
        pattern: &ENTHUSIASM_RE,
        threshold: 2,
        emit: Emit::Strength("Shows genuine enthusiasm and positive energy"),
    },
    Detector {
        name: "disengagement",
        pattern: &DISENGAGEMENT_RE,
        threshold: 1,
        emit: Emit::Issue(IssueSpec {
            category: Category::Interest,
            severity: Severity::High,
            title: "Disengaged or Dismissive Tone",
            description: "Brush-off phrases suggest the conversation is being kept at \
                          arm's length.",
            example_limit: 2,
            fixed_example: None,
            suggestion: None,
            risk: None,
        }),
    },
    Detector {
        name: "negative-venting",
        pattern: &VENTING_RE,
        threshold: 3,
        emit: Emit::Issue(IssueSpec {
            category: Category::Communication,
            severity: Severity::Medium,
            title: "Negative Venting",
            description: "A heavy run of negative words drags the overall tone down.",
            example_limit: 0,
            fixed_example: Some("Repeated negative language throughout the conversation"),
            suggestion: Some(SuggestionSpec {
                category: "communication",
                title: "Balance the Tone",
                description: "Pair complaints with something positive or redirect to a \
                              lighter topic.",
            }),
            risk: None,
        }),
    },
];

// ---------------------------------------------------------------------------
// Stage 1: detector scan
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Findings {
    issues: Vec<Issue>,
    strengths: Vec<String>,
    suggestions: Vec<Suggestion>,
    risk_factors: Vec<RiskFactor>,
}

fn suggestion_from(spec: &SuggestionSpec) -> Suggestion {
    Suggestion {
        category: spec.category.to_string(),
        title: spec.title.to_string(),
        description: spec.description.to_string(),
        actionable: true,
    }
}

fn risk_from(spec: &RiskSpec) -> RiskFactor {
    RiskFactor {
        risk_type: spec.risk_type.to_string(),
        description: spec.description.to_string(),
        impact: spec.impact,
    }
}

fn run_detectors(text: &str) -> Findings {
    let mut findings = Findings::default();

    for detector in DETECTORS {
        // Fresh non-overlapping scan per detector; no cursor survives the call.
        let matches: Vec<String> = detector
            .pattern
            .find_iter(text)
            .map(|m| m.as_str().trim().to_string())
            .collect();
        if matches.len() <= detector.threshold {
            continue;
        }

        match &detector.emit {
            Emit::Issue(spec) => {
                let examples = match spec.fixed_example {
                    Some(fixed) => vec![fixed.to_string()],
                    None => matches.into_iter().take(spec.example_limit).collect(),
                };
                findings.issues.push(Issue {
                    category: spec.category,
                    title: spec.title.to_string(),
                    description: spec.description.to_string(),
                    severity: spec.severity,
                    examples,
                });
                if let Some(sugg) = &spec.suggestion {
                    findings.suggestions.push(suggestion_from(sugg));
                }
                if let Some(risk) = &spec.risk {
                    findings.risk_factors.push(risk_from(risk));
                }
            }
            Emit::Risk(spec) => findings.risk_factors.push(risk_from(spec)),
            Emit::Strength(statement) => findings.strengths.push(statement.to_string()),
        }
    }

    findings
}

// ---------------------------------------------------------------------------
// Stage 2: cross-cutting derivation rules
// ---------------------------------------------------------------------------

// Runs after the full scan so a rule sees every accumulated finding, not
// just its own pass.
type DerivationRule = fn(&Findings) -> Option<Suggestion>;

static DERIVATIONS: &[DerivationRule] = &[suggest_open_ended_questions];

fn suggest_open_ended_questions(findings: &Findings) -> Option<Suggestion> {
    findings
        .issues
        .iter()
        .any(|issue| issue.category == Category::Interest)
        .then(|| Suggestion {
            category: "engagement".to_string(),
            title: "Ask Open-Ended Questions".to_string(),
            description: "Questions that invite a story rather than a yes or no tend to \
                          re-engage a quiet conversation partner."
                .to_string(),
            actionable: true,
        })
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

fn compute_score(issues: &[Issue], strength_count: usize) -> u8 {
    let mut total = POLICY.baseline;
    for issue in issues {
        total -= severity_penalty(issue.severity);
    }
    total += POLICY.strength_bonus * strength_count as i32;
    total.clamp(POLICY.score_min, POLICY.score_max) as u8
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score a conversation transcript against the fixed detector battery.
///
/// Total over every string input: the empty string fires nothing and comes
/// back at the baseline score with all collections empty. Deterministic and
/// side-effect free, so concurrent callers need no coordination.
pub fn analyze(text: &str) -> AnalysisResult {
    let mut findings = run_detectors(text);

    for rule in DERIVATIONS {
        if let Some(suggestion) = rule(&findings) {
            findings.suggestions.push(suggestion);
        }
    }

    let overall_score = compute_score(&findings.issues, findings.strengths.len());

    AnalysisResult {
        overall_score,
        issues: findings.issues,
        strengths: findings.strengths,
        suggestions: findings.suggestions,
        risk_factors: findings.risk_factors,
        summary: None,
        analysis_method: AnalysisMethod::Local,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
