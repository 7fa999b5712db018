use moodtunes::{
    mood::{Mood, MoodPolicy},
    sentiment::Sentiment,
};

fn s(polarity: f64, subjectivity: f64) -> Sentiment {
    Sentiment {
        polarity,
        subjectivity,
    }
}

#[test]
fn test_blank_text_has_no_mood() {
    for policy in [MoodPolicy::Threshold, MoodPolicy::Keyword] {
        assert_eq!(policy.classify("", s(0.9, 0.9)), None);
        assert_eq!(policy.classify("   \n\t", s(-0.9, 0.1)), None);
    }
}

#[test]
fn test_threshold_policy_quadrants() {
    let p = MoodPolicy::Threshold;
    let text = "some text";

    assert_eq!(p.classify(text, s(0.6, 0.7)), Some(Mood::ExcitedJoyful));
    assert_eq!(p.classify(text, s(0.6, 0.3)), Some(Mood::GenerallyPositive));
    assert_eq!(p.classify(text, s(-0.6, 0.7)), Some(Mood::SadAngry));
    assert_eq!(p.classify(text, s(-0.6, 0.3)), Some(Mood::GenerallyNegative));
    assert_eq!(p.classify(text, s(0.0, 0.7)), Some(Mood::NeutralAmbivalent));
    assert_eq!(p.classify(text, s(0.0, 0.3)), Some(Mood::CalmPeaceful));
}

#[test]
fn test_threshold_boundaries_fall_through() {
    let p = MoodPolicy::Threshold;
    let text = "on the edge";

    // polarity exactly 0.2 is not positive
    assert_eq!(p.classify(text, s(0.2, 0.9)), Some(Mood::NeutralAmbivalent));
    // polarity exactly -0.2 is not negative
    assert_eq!(p.classify(text, s(-0.2, 0.9)), Some(Mood::NeutralAmbivalent));
    // subjectivity exactly 0.5 is not subjective
    assert_eq!(p.classify(text, s(0.5, 0.5)), Some(Mood::GenerallyPositive));
    assert_eq!(p.classify(text, s(-0.5, 0.5)), Some(Mood::GenerallyNegative));
    assert_eq!(p.classify(text, s(0.0, 0.5)), Some(Mood::CalmPeaceful));
}

#[test]
fn test_threshold_ignores_keywords() {
    let p = MoodPolicy::Threshold;
    assert_eq!(
        p.classify("I want to relax and find some peace", s(0.0, 0.7)),
        Some(Mood::NeutralAmbivalent)
    );
}

#[test]
fn test_keyword_policy_polarity_bands() {
    let p = MoodPolicy::Keyword;
    let text = "just words";

    assert_eq!(p.classify(text, s(0.8, 0.1)), Some(Mood::ExcitedJoyful));
    assert_eq!(p.classify(text, s(0.5, 0.9)), Some(Mood::GenerallyPositive));
    assert_eq!(p.classify(text, s(0.3, 0.9)), Some(Mood::GenerallyPositive));
    assert_eq!(p.classify(text, s(-0.8, 0.1)), Some(Mood::SadAngry));
    assert_eq!(p.classify(text, s(-0.5, 0.9)), Some(Mood::Melancholy));
    assert_eq!(p.classify(text, s(-0.3, 0.9)), Some(Mood::Melancholy));
    assert_eq!(p.classify(text, s(0.2, 0.9)), Some(Mood::NeutralAmbivalent));
}

#[test]
fn test_keyword_policy_neutral_band_keywords() {
    let p = MoodPolicy::Keyword;
    let neutral = s(0.0, 0.5);

    assert_eq!(
        p.classify("Looking for something to help me RELAX", neutral),
        Some(Mood::CalmRelaxed)
    );
    assert_eq!(p.classify("peaceful evening", neutral), Some(Mood::CalmRelaxed));
    assert_eq!(p.classify("Let's DANCE tonight", neutral), Some(Mood::PartyHighEnergy));
    assert_eq!(p.classify("so much energy", neutral), Some(Mood::PartyHighEnergy));
    assert_eq!(p.classify("excitement!", neutral), Some(Mood::PartyHighEnergy));
    assert_eq!(p.classify("a regular tuesday", neutral), Some(Mood::NeutralAmbivalent));
}

#[test]
fn test_keyword_relaxed_wins_over_energetic() {
    assert_eq!(
        MoodPolicy::Keyword.classify("calm dance", s(0.0, 0.0)),
        Some(Mood::CalmRelaxed)
    );
}

#[test]
fn test_keywords_do_not_override_strong_polarity() {
    assert_eq!(
        MoodPolicy::Keyword.classify("I hate how calm it is", s(-0.7, 0.9)),
        Some(Mood::SadAngry)
    );
}

#[test]
fn test_classification_is_deterministic() {
    let text = "I feel so energized and ready to dance!";
    for policy in [MoodPolicy::Threshold, MoodPolicy::Keyword] {
        let first = policy.classify(text, s(0.35, 0.55));
        for _ in 0..10 {
            assert_eq!(policy.classify(text, s(0.35, 0.55)), first);
        }
    }
}

#[test]
fn test_mood_labels_round_trip_through_from_str() {
    for mood in Mood::ALL {
        assert_eq!(mood.label().parse::<Mood>(), Ok(mood));
        assert_eq!(mood.to_string(), mood.label());
    }
    assert!("Happy-ish".parse::<Mood>().is_err());
}

#[test]
fn test_mood_serializes_as_label() {
    let json = serde_json::to_string(&Mood::PartyHighEnergy).unwrap();
    assert_eq!(json, "\"Party/High Energy\"");
}

#[test]
fn test_policy_from_str() {
    assert_eq!("threshold".parse::<MoodPolicy>(), Ok(MoodPolicy::Threshold));
    assert_eq!(" Keyword ".parse::<MoodPolicy>(), Ok(MoodPolicy::Keyword));
    assert!("vibes".parse::<MoodPolicy>().is_err());
    assert_eq!(MoodPolicy::default(), MoodPolicy::Threshold);
}
