use crate::analysis::tables::{
    contains_any, structures_for, BASE_HOOK_STRENGTH, BROAD_APPEAL, DEFAULT_EMOTION, DIGIT_BONUS,
    EMOTION_TRIGGERS, HIGH_SCORE_BONUS, HIGH_SCORE_THRESHOLD, MAX_HOOK_STRENGTH, MID_SCORE_BONUS,
    MID_SCORE_THRESHOLD, POWER_WORDS, POWER_WORD_BONUS, QUESTION_MARK_BONUS, QUESTION_WORDS,
    QUESTION_WORD_BONUS, TARGETED_APPEAL, TIMING_FACTOR_RANGE,
};
use crate::analysis::Variation;
use crate::{ViralContent, ViralPattern};

pub fn classify(content: &ViralContent, variation: &mut Variation) -> ViralPattern {
    let hook_strength = hook_strength(&content.title, content.viral_score);
    let emotional_trigger = emotional_trigger(&content.title);

    let structures = structures_for(content.platform.label());
    let content_structure = variation
        .pick(structures)
        .copied()
        .unwrap_or("standard")
        .to_string();

    ViralPattern {
        hook_strength,
        emotional_trigger: emotional_trigger.to_string(),
        content_structure,
        timing_factor: variation.uniform(TIMING_FACTOR_RANGE),
        audience_appeal: audience_appeal(content.viral_score).to_string(),
    }
}

pub fn hook_strength(title: &str, viral_score: f64) -> f64 {
    let lowercase = title.to_lowercase();
    let mut strength = BASE_HOOK_STRENGTH;

    if title.contains('?') {
        strength += QUESTION_MARK_BONUS;
    }
    if contains_any(&lowercase, QUESTION_WORDS) {
        strength += QUESTION_WORD_BONUS;
    }
    if title.chars().any(char::is_numeric) {
        strength += DIGIT_BONUS;
    }
    if contains_any(&lowercase, POWER_WORDS) {
        strength += POWER_WORD_BONUS;
    }
    if viral_score > HIGH_SCORE_THRESHOLD {
        strength += HIGH_SCORE_BONUS;
    } else if viral_score > MID_SCORE_THRESHOLD {
        strength += MID_SCORE_BONUS;
    }

    strength.min(MAX_HOOK_STRENGTH)
}

pub fn emotional_trigger(title: &str) -> &'static str {
    let lowercase = title.to_lowercase();
    EMOTION_TRIGGERS
        .iter()
        .find(|rule| contains_any(&lowercase, rule.keywords))
        .map(|rule| rule.emotion)
        .unwrap_or(DEFAULT_EMOTION)
}

pub fn audience_appeal(viral_score: f64) -> &'static str {
    if viral_score > HIGH_SCORE_THRESHOLD {
        TARGETED_APPEAL
    } else {
        BROAD_APPEAL
    }
}
