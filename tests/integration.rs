use vibe_check::{analyze, AnalysisMethod, Category, Severity};

#[test]
fn empty_input_scores_baseline() {
    let result = analyze("");
    assert_eq!(result.overall_score, 85);
    assert!(result.issues.is_empty());
    assert!(result.strengths.is_empty());
    assert!(result.suggestions.is_empty());
    assert!(result.risk_factors.is_empty());
    assert_eq!(result.summary, None);
    assert_eq!(result.analysis_method, AnalysisMethod::Local);
}

#[test]
fn score_is_always_bounded() {
    let long = "whatever. ".repeat(5000);
    let inputs = [
        "",
        "???",
        "ok",
        "a perfectly ordinary message about weekend plans",
        "日本語のテキストでも問題なく動くはず。絵文字too 🎉🎉🎉",
        long.as_str(),
    ];
    for input in inputs {
        let result = analyze(input);
        assert!(
            result.overall_score <= 100,
            "score out of range: {}",
            result.overall_score
        );
    }
}

#[test]
fn identical_input_yields_identical_results() {
    let text = "she said whatever to the plan, but i kept asking: why? really why? \
                and why not? sorry for the late reply.";
    assert_eq!(analyze(text), analyze(text));
}

#[test]
fn two_interruptions_stay_below_threshold() {
    let text = "I wanted to go, but it rained. However, the evening went fine in the end.";
    let result = analyze(text);
    assert!(
        !result
            .issues
            .iter()
            .any(|i| i.title == "Interrupting or Contradicting"),
        "exactly 2 markers must not fire"
    );
}

#[test]
fn three_interruptions_fire() {
    let text = "I wanted to go, but it rained. However, the evening went fine in the end. \
                Actually, we enjoyed ourselves.";
    let result = analyze(text);
    let issue = result
        .issues
        .iter()
        .find(|i| i.title == "Interrupting or Contradicting")
        .expect("3 markers should fire");
    assert_eq!(issue.category, Category::Communication);
    assert_eq!(issue.severity, Severity::Medium);
    assert_eq!(issue.examples.len(), 2);
}

#[test]
fn excessive_questioning_detected_with_pacing_suggestion() {
    let text = "how was it? where did you go? who was there? what did you eat? \
                was it fun? would you go back? when? why? how?";
    let result = analyze(text);
    assert!(result
        .issues
        .iter()
        .any(|i| i.title == "Excessive Questioning"));
    let suggestion = result
        .suggestions
        .iter()
        .find(|s| s.title == "Pace Your Questions")
        .expect("questioning issue should carry a pacing suggestion");
    assert!(suggestion.actionable);
}

#[test]
fn short_replies_flag_low_interest() {
    let text = "did you finish?\nyes\nand the other one?\nno\nwill you get to it?\nmaybe\nok\n";
    let result = analyze(text);
    let issue = result
        .issues
        .iter()
        .find(|i| i.title == "Short, Low-Effort Replies")
        .expect("4 bare replies should fire");
    assert_eq!(issue.category, Category::Interest);
    assert_eq!(issue.severity, Severity::High);
    assert_eq!(issue.examples, vec!["yes", "no", "maybe"]);
}

#[test]
fn message_flooding_detected() {
    let text = "hey\ngood morning\nhow are you\nwhat's up\nare you there\nhello??\n";
    let result = analyze(text);
    let issue = result
        .issues
        .iter()
        .find(|i| i.title == "Message Flooding")
        .expect("two bursts of short lines should fire");
    assert_eq!(issue.category, Category::Timing);
    assert_eq!(
        issue.examples,
        vec!["Burst of short messages in immediate succession"]
    );
    assert!(result
        .suggestions
        .iter()
        .any(|s| s.title == "Space Out Your Messages" && s.actionable));
}

#[test]
fn delay_apologies_are_low_severity() {
    let text = "sorry i just saw this! work has been busy lately.";
    let result = analyze(text);
    let issue = result
        .issues
        .iter()
        .find(|i| i.title == "Delayed Responses")
        .expect("any delay apology should fire");
    assert_eq!(issue.severity, Severity::Low);
    assert_eq!(issue.examples.len(), 2);
}

#[test]
fn oversharing_flags_issue_and_risk_factor() {
    let text = "then i told her about my ex and what my therapist keeps saying about my trauma.";
    let result = analyze(text);
    let issue = result
        .issues
        .iter()
        .find(|i| i.title == "Oversharing Personal Details")
        .expect("2+ disclosure phrases should fire");
    assert_eq!(issue.category, Category::Boundaries);
    assert_eq!(issue.severity, Severity::High);
    assert_eq!(issue.examples, vec!["my ex", "my therapist"]);
    let risk = result
        .risk_factors
        .iter()
        .find(|r| r.risk_type == "oversharing")
        .expect("oversharing also surfaces a risk factor");
    assert_eq!(risk.impact, Severity::High);
}

#[test]
fn invasive_questions_surface_risk_without_issue() {
    let text = "hey, are you single? and where do you live these days?";
    let result = analyze(text);
    assert!(result.issues.is_empty());
    let risk = result
        .risk_factors
        .iter()
        .find(|r| r.risk_type == "invasive-questions")
        .expect("invasive probes should surface a risk factor");
    assert_eq!(risk.impact, Severity::High);
}

#[test]
fn enthusiasm_counts_as_strength() {
    let text = "I love this!! It was amazing and I'm so excited, can't wait for SATURDAY.";
    let result = analyze(text);
    assert_eq!(
        result.strengths,
        vec!["Shows genuine enthusiasm and positive energy"]
    );
    assert!(result.issues.is_empty());
    assert_eq!(result.overall_score, 90);
}

#[test]
fn negative_venting_uses_fixed_example() {
    let text = "i hate mondays, the traffic was horrible, the meeting was awful, \
                lunch was terrible, and the weather is the worst.";
    let result = analyze(text);
    let issue = result
        .issues
        .iter()
        .find(|i| i.title == "Negative Venting")
        .expect("5 negative words should fire");
    assert_eq!(
        issue.examples,
        vec!["Repeated negative language throughout the conversation"]
    );
    assert!(result
        .suggestions
        .iter()
        .any(|s| s.title == "Balance the Tone" && s.actionable));
}

#[test]
fn interest_issue_derives_open_ended_suggestion() {
    // The disengagement detector emits no suggestion of its own; the
    // open-ended-questions advice comes from the derivation stage.
    let text = "she said whatever to my plan and that she was not interested in talking.";
    let result = analyze(text);
    assert!(result
        .issues
        .iter()
        .any(|i| i.category == Category::Interest));
    let suggestion = result
        .suggestions
        .iter()
        .find(|s| s.title == "Ask Open-Ended Questions")
        .expect("interest issue should derive the open-ended suggestion");
    assert!(suggestion.actionable);
    assert_eq!(suggestion.category, "engagement");
}

#[test]
fn engineered_pileup_clamps_to_zero() {
    let text = "ok\n\
                yes\n\
                no\n\
                maybe\n\
                sure\n\
                fine\n\
                ok\n\
                sorry for the late reply, been busy with everything going on\n\
                my ex said my therapist thinks my trauma and my problems and my medication are the reason\n\
                you should go. you need to stop. you have to listen. why don't you leave.\n\
                whatever. i don't care. not interested. too swamped and hectic.\n\
                i hate this. horrible. awful. terrible. the worst. i can't stand it.\n\
                did you? and then? what happened? did he? and after? what next? so then? and why? really why?\n\
                but however actually but\n";
    let result = analyze(text);
    assert_eq!(result.overall_score, 0);
    assert!(result.strengths.is_empty());
    assert!(result.issues.len() >= 6);
}

#[test]
fn json_output_uses_camel_case_keys() {
    let text = "then i told her about my ex and what my therapist keeps saying about my trauma.";
    let result = analyze(text);
    let json = serde_json::to_string_pretty(&result).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed.get("overallScore").is_some());
    assert!(parsed.get("issues").is_some());
    assert!(parsed.get("strengths").is_some());
    assert!(parsed.get("suggestions").is_some());
    assert!(parsed.get("riskFactors").is_some());
    assert_eq!(parsed["analysisMethod"], "local");
    // summary is omitted entirely when absent
    assert!(parsed.get("summary").is_none());
    assert_eq!(parsed["issues"][0]["category"], "boundaries");
    assert_eq!(parsed["issues"][0]["severity"], "high");
    assert_eq!(parsed["riskFactors"][0]["type"], "oversharing");
    assert_eq!(parsed["riskFactors"][0]["impact"], "high");
}
