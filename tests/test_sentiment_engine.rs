mod common;

use gaia::nlp::Sentiment;
use gaia::stream::SCENARIOS;

use common::test_engine;

#[test]
fn analysis_stays_within_star_range_and_mapping() {
    let engine = test_engine();
    for scenario in SCENARIOS.iter() {
        for event in &scenario.events {
            let analysis = engine.analyze(&event.text).unwrap();
            assert!((1..=5).contains(&analysis.stars));
            let expected = match analysis.stars {
                1 | 2 => Sentiment::Fear,
                3 => Sentiment::Neutral,
                _ => Sentiment::Joy,
            };
            assert_eq!(analysis.sentiment, expected);
        }
    }
}

#[test]
fn keyword_examples() {
    let engine = test_engine();
    assert_eq!(
        engine.analyze("AI Regulation Bill causes market panic").unwrap().sentiment,
        Sentiment::Fear
    );
    assert_eq!(engine.analyze("meh").unwrap().sentiment, Sentiment::Neutral);
    assert_eq!(engine.analyze("I love AI").unwrap().sentiment, Sentiment::Joy);
}
