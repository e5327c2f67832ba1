//! Longer scripted sessions exercising word selection, scoring and mode
//! transitions across many completions.

use kombo::{
    drill::Drill,
    generator::{generate, Alphabet},
    scoring::ScoreTable,
    selection::{Mode, Selector},
    session::KeyOutcome,
};

/// Types the currently served word to completion and returns its slug.
fn complete_current_word(drill: &mut Drill) -> String {
    let slug = drill.session().word().slug.clone();
    loop {
        let c = drill
            .session()
            .expected_char()
            .expect("served word always has a next char");
        if let KeyOutcome::Completed { .. } = drill.on_key(c) {
            return slug;
        }
    }
}

#[test]
fn test_discovery_covers_every_word_exactly_once() {
    let mut drill = Drill::new(1, Alphabet::parse("abc").unwrap());
    let mut seen = Vec::new();

    for _ in 0..3 {
        assert_eq!(drill.mode(), Mode::Discovery);
        let slug = complete_current_word(&mut drill);
        assert!(!seen.contains(&slug), "{slug} served twice during discovery");
        seen.push(slug);
    }

    seen.sort();
    assert_eq!(seen, vec!["a", "b", "c"]);
    assert_eq!(drill.mode(), Mode::Drill);
}

#[test]
fn test_no_immediate_repeat_over_a_long_session() {
    let mut drill = Drill::new(2, Alphabet::parse("ab").unwrap());
    let mut previous = drill.session().word().slug.clone();

    for _ in 0..1000 {
        complete_current_word(&mut drill);
        let current = drill.session().word().slug.clone();
        assert_ne!(current, previous, "same word served twice in a row");
        previous = current;
    }
}

#[test]
fn test_drill_mode_sticks_to_the_slowest_three() {
    let mut drill = Drill::new(2, Alphabet::parse("abc").unwrap());
    while drill.mode() == Mode::Discovery {
        complete_current_word(&mut drill);
    }

    for _ in 0..200 {
        let pool: Vec<String> = drill
            .scores()
            .hardest(3)
            .into_iter()
            .map(str::to_string)
            .collect();
        let served = drill.session().word().slug.clone();
        assert!(pool.contains(&served), "{served} is outside the pool {pool:?}");
        complete_current_word(&mut drill);
    }
}

#[test]
fn test_two_word_drill_alternates() {
    // Smallest possible word set. In drill mode the no-repeat rule leaves a
    // single candidate each time, so the two words strictly alternate.
    let mut drill = Drill::new(1, Alphabet::parse("ab").unwrap());
    complete_current_word(&mut drill);
    complete_current_word(&mut drill);
    assert_eq!(drill.mode(), Mode::Drill);

    let mut previous = drill.session().word().slug.clone();
    for _ in 0..20 {
        complete_current_word(&mut drill);
        let current = drill.session().word().slug.clone();
        assert_ne!(current, previous);
        previous = current;
    }
}

#[test]
fn test_selector_falls_back_to_previous_for_a_lone_word() {
    // Not reachable through a drill (the alphabet floor is two letters) but
    // the selector itself must terminate when the only candidate is the word
    // just served.
    let words = vec!["nn".to_string()];
    let scores = ScoreTable::new(&words);
    let selector = Selector::new();
    let mut rng = rand::thread_rng();

    let picked = selector.pick_next(&scores, Some("nn"), &mut rng);
    assert_eq!(picked.as_deref(), Some("nn"));
}

#[test]
fn test_scores_settle_toward_steady_typing_speed() {
    let words = generate(2, &Alphabet::parse("ab").unwrap());
    let mut scores = ScoreTable::new(&words);

    // A word typed at a steady 800 ms converges to 800 from above.
    scores.record_completion("aa", 900);
    for _ in 0..20 {
        scores.record_completion("aa", 800);
    }
    assert_eq!(scores.get("aa"), Some(800));

    // A sudden fast result beats the old score by more than 20 percent and
    // replaces it outright.
    scores.record_completion("ab", 1000);
    scores.record_completion("ab", 300);
    assert_eq!(scores.get("ab"), Some(300));
}

#[test]
fn test_meter_tracks_a_session() {
    let mut drill = Drill::new(1, Alphabet::parse("ab").unwrap());
    for n in 1..=5 {
        complete_current_word(&mut drill);
        assert_eq!(drill.meter.target(), n * 10);
    }

    let wrong = if drill.session().expected_char() == Some('a') {
        'b'
    } else {
        'a'
    };
    drill.on_key(wrong);
    assert_eq!(drill.meter.target(), 0);
}
