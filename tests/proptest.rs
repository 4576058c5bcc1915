//! Property-based tests for chatlens.
//!
//! These tests generate random transcripts to find edge cases.

use proptest::prelude::*;

use chatlens::prelude::*;
use chatlens::record::hour_period_label;

/// Day and month of a marker; a few are impossible dates that no strategy
/// can read
fn arb_day_month() -> impl Strategy<Value = (u32, u32, bool)> {
    prop_oneof![
        8 => (1u32..=28, 1u32..=12).prop_map(|(d, m)| (d, m, true)),
        1 => prop::sample::select(vec![(31u32, 2u32), (30, 2), (32, 13), (0, 5)])
            .prop_map(|(d, m)| (d, m, false)),
    ]
}

/// One transcript line: marker plus body, built from fast strategies (no regex!)
/// Also reports whether the marker holds a real date.
fn arb_line() -> impl Strategy<Value = (String, bool)> {
    (
        arb_day_month(),
        20u32..=25,
        1u32..=12,
        0u32..60,
        prop::sample::select(vec!["AM", "PM", "am", "pm"]),
        prop::sample::select(vec!["-", "\u{2013}"]),
        prop::sample::select(vec![
            "Alice: Hello".to_string(),
            "Bob: kal milte hai".to_string(),
            "Иван: Привет мир".to_string(),
            "Alice: <Media omitted>".to_string(),
            "Bob: see https://example.com/x 😂".to_string(),
            "Alice: ratio 3:1".to_string(),
            "Bob: line one\nline two".to_string(),
            "Charlie: 🎉🔥 party".to_string(),
            "Bob added Charlie".to_string(),
            "Alice left".to_string(),
            String::new(),
        ]),
    )
        .prop_map(|((day, month, valid), year, hour, minute, meridiem, dash, body)| {
            let line = format!("{day}/{month}/{year}, {hour}:{minute:02} {meridiem} {dash} {body}");
            (line, valid)
        })
}

/// Generate a transcript of up to `max_len` lines: (lines, untimed lines, text)
fn arb_transcript(max_len: usize) -> impl Strategy<Value = (usize, usize, String)> {
    prop::collection::vec(arb_line(), 0..max_len).prop_map(|lines| {
        let untimed = lines.iter().filter(|(_, valid)| !valid).count();
        let text = lines.iter().map(|(line, _)| line.as_str()).collect::<Vec<_>>().join("\n");
        (lines.len(), untimed, text)
    })
}

fn parse(text: &str) -> Corpus {
    WhatsAppParser::new().parse_str(text).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // PARSING PROPERTIES
    // ============================================

    /// Arbitrary input either parses or errors, never panics
    #[test]
    fn parse_never_panics(text in any::<String>()) {
        let _ = WhatsAppParser::new().parse_str(&text);
    }

    /// Every marker yields exactly one record
    #[test]
    fn one_record_per_marker((lines, untimed, text) in arb_transcript(30)) {
        let corpus = parse(&text);
        prop_assert_eq!(corpus.len(), lines);
        prop_assert_eq!(corpus.untimed_count(), untimed);
    }

    /// The hour-period label always spans the hour
    #[test]
    fn period_label_matches_hour(hour in 0u32..24) {
        let expected = match hour {
            0 => "00-01".to_string(),
            23 => "23-00".to_string(),
            h => format!("{}-{}", h, h + 1),
        };
        prop_assert_eq!(hour_period_label(hour), expected.as_str());
    }

    // ============================================
    // AGGREGATION PROPERTIES
    // ============================================

    /// Timelines and heatmap account for every timed record
    #[test]
    fn timelines_cover_timed_records((_, _, text) in arb_transcript(30)) {
        let corpus = parse(&text);
        let analyzer = Analyzer::new();
        let view = corpus.view();
        let overall = UserSelection::Overall;
        let timed = corpus.len() - corpus.untimed_count();

        let daily: usize = analyzer.daily_timeline(&overall, &view).iter().map(|d| d.count).sum();
        let monthly: usize = analyzer.monthly_timeline(&overall, &view).iter().map(|m| m.count).sum();
        let weekly: usize = analyzer.week_activity_map(&overall, &view).iter().map(|w| w.count).sum();

        prop_assert_eq!(daily, timed);
        prop_assert_eq!(monthly, timed);
        prop_assert_eq!(weekly, timed);
        prop_assert_eq!(analyzer.activity_heatmap(&overall, &view).total(), timed);
    }

    /// Daily timeline is strictly ascending by date
    #[test]
    fn daily_timeline_is_sorted((_, _, text) in arb_transcript(30)) {
        let corpus = parse(&text);
        let daily = Analyzer::new().daily_timeline(&UserSelection::Overall, &corpus.view());
        prop_assert!(daily.windows(2).all(|w| w[0].date < w[1].date));
    }

    /// Busy-user shares add up to 100 percent, give or take rounding
    #[test]
    fn busy_shares_sum_to_hundred((_, _, text) in arb_transcript(30)) {
        let corpus = parse(&text);
        let busy = Analyzer::new()
            .most_busy_users(&UserSelection::Overall, &corpus.view())
            .unwrap();

        if !busy.shares.is_empty() {
            let total: f64 = busy.shares.iter().map(|s| s.percent).sum();
            let slack = 0.005 * busy.shares.len() as f64 + 1e-9;
            prop_assert!((total - 100.0).abs() <= slack, "total = {}", total);
        }
        prop_assert!(busy.top.len() <= 5);
        prop_assert!(busy.top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    /// Per-user stats partition the authored messages
    #[test]
    fn user_stats_partition_messages((_, _, text) in arb_transcript(30)) {
        let corpus = parse(&text);
        let analyzer = Analyzer::new();
        let view = corpus.view();

        let per_user: usize = corpus
            .users()
            .into_iter()
            .map(|u| analyzer.fetch_stats(&UserSelection::from_name(u), &view).messages)
            .sum();
        let notifications = corpus.iter().filter(|r| r.is_notification()).count();
        prop_assert_eq!(per_user + notifications, analyzer.fetch_stats(&UserSelection::Overall, &view).messages);
    }

    // ============================================
    // FILTER PROPERTIES
    // ============================================

    /// Overall over the corpus' own date bounds reproduces the unfiltered
    /// report, untimed records included
    #[test]
    fn full_range_is_passthrough((_, _, text) in arb_transcript(30)) {
        let corpus = parse(&text);
        let full_view = FilterCriteria::overall().with_full_range(&corpus).apply(&corpus);
        prop_assert_eq!(full_view.len(), corpus.len());
        prop_assert_eq!(full_view, corpus.view());

        let analyzer = Analyzer::new();
        let unfiltered = Report::build(&analyzer, &corpus, &FilterCriteria::overall(), &[]).unwrap();
        let full = Report::build(
            &analyzer,
            &corpus,
            &FilterCriteria::overall().with_full_range(&corpus),
            &[],
        )
        .unwrap();

        prop_assert_eq!(unfiltered.stats, full.stats);
        prop_assert_eq!(unfiltered.busy_users, full.busy_users);
        prop_assert_eq!(unfiltered.daily_timeline, full.daily_timeline);
        prop_assert_eq!(unfiltered.monthly_timeline, full.monthly_timeline);
        prop_assert_eq!(unfiltered.heatmap, full.heatmap);
        prop_assert_eq!(unfiltered.common_words, full.common_words);
        prop_assert_eq!(unfiltered.emojis, full.emojis);
    }

    /// Filtering never adds records
    #[test]
    fn filter_never_increases_count(
        (_, _, text) in arb_transcript(30),
        user in prop::sample::select(vec!["Overall", "Alice", "Bob", "Nobody"]),
    ) {
        let corpus = parse(&text);
        let criteria = FilterCriteria::new(UserSelection::from_name(user));
        let view = criteria.apply(&corpus);
        prop_assert!(view.len() <= corpus.len());
        prop_assert!(view.iter().all(|r| criteria.matches(r)));
    }

    // ============================================
    // WORD PROPERTIES
    // ============================================

    /// Stop words and exclusions never show up in word tables
    #[test]
    fn excluded_words_never_leak(
        (_, _, text) in arb_transcript(30),
        exclude in prop::collection::vec(prop::sample::select(vec!["hello", "KAL", "party", "line"]), 0..3),
    ) {
        let corpus = parse(&text);
        let stop_words = StopWords::from_words(["hai", "milte"]);
        let analyzer = Analyzer::new().with_stop_words(stop_words.clone());
        let view = corpus.view();
        let exclude: Vec<String> = exclude.into_iter().map(String::from).collect();
        let lowered: Vec<String> = exclude.iter().map(|w| w.to_lowercase()).collect();

        let words = analyzer.most_common_words(&UserSelection::Overall, &view, &exclude);
        prop_assert!(words.len() <= 20);
        for w in &words {
            prop_assert!(!stop_words.contains(&w.word));
            prop_assert!(!lowered.contains(&w.word));
        }

        let cloud = analyzer.wordcloud_text(&UserSelection::Overall, &view, &exclude);
        prop_assert!(!cloud.is_empty());
        for token in cloud.split(' ') {
            prop_assert!(!stop_words.contains(token));
            prop_assert!(!lowered.iter().any(|w| w == token));
        }
    }
}
