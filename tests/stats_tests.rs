// tests/stats_tests.rs

use chrono::{Duration, TimeZone, Utc};

use cyberquiz_core::models::attempt::{QuizAttempt, SubmitAttemptRequest};
use cyberquiz_core::stats::{accuracy_percent, apply_attempt};

fn attempt(score: i64, total_questions: i64, duration_seconds: i64) -> QuizAttempt {
    let req = SubmitAttemptRequest {
        quiz_id: "network-security-basics".to_string(),
        score,
        total_questions,
        duration_seconds,
    };
    QuizAttempt::from_request("u1", &req, Utc::now())
}

#[test]
fn first_attempt_initializes_counters() {
    // Scenario: {score: 4, totalQuestions: 5, durationSeconds: 120} on
    // empty prior stats.
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 14, 30, 0).unwrap();
    let stats = apply_attempt(None, &attempt(4, 5, 120), now);

    assert_eq!(stats.total_points, 400);
    assert_eq!(stats.total_quizzes, 1);
    assert_eq!(stats.total_correct, 4);
    assert_eq!(stats.total_questions_answered, 5);
    assert_eq!(stats.total_duration_seconds, 120);
    assert_eq!(stats.accuracy, 80);
    assert_eq!(stats.current_streak_days, 1);
    assert_eq!(stats.last_quiz_date, Some(now.date_naive()));
}

#[test]
fn same_day_attempts_accumulate_without_extending_streak() {
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();

    let mut stats = None;
    for _ in 0..4 {
        stats = Some(apply_attempt(stats.as_ref(), &attempt(3, 5, 60), now));
    }
    let stats = stats.unwrap();

    assert_eq!(stats.total_quizzes, 4);
    assert_eq!(stats.total_points, 1200);
    assert_eq!(stats.current_streak_days, 1);
}

#[test]
fn attempt_on_consecutive_day_extends_streak() {
    let day1 = Utc.with_ymd_and_hms(2024, 3, 10, 22, 0, 0).unwrap();
    let day2 = Utc.with_ymd_and_hms(2024, 3, 11, 6, 0, 0).unwrap();
    let day3 = Utc.with_ymd_and_hms(2024, 3, 12, 12, 0, 0).unwrap();

    let s1 = apply_attempt(None, &attempt(5, 5, 90), day1);
    let s2 = apply_attempt(Some(&s1), &attempt(5, 5, 90), day2);
    let s3 = apply_attempt(Some(&s2), &attempt(5, 5, 90), day3);

    assert_eq!(s1.current_streak_days, 1);
    assert_eq!(s2.current_streak_days, 2);
    assert_eq!(s3.current_streak_days, 3);
}

#[test]
fn gap_of_two_days_resets_streak() {
    let day1 = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
    let day4 = day1 + Duration::days(3);

    let s1 = apply_attempt(None, &attempt(5, 5, 90), day1);
    let s2 = apply_attempt(Some(&s1), &attempt(5, 5, 90), day4);

    assert_eq!(s2.current_streak_days, 1);
    // Everything else still accumulates across the gap.
    assert_eq!(s2.total_quizzes, 2);
    assert_eq!(s2.total_points, 1000);
}

#[test]
fn accuracy_recomputed_across_attempts() {
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();

    let s1 = apply_attempt(None, &attempt(5, 5, 30), now);
    assert_eq!(s1.accuracy, 100);

    let s2 = apply_attempt(Some(&s1), &attempt(0, 5, 30), now);
    assert_eq!(s2.accuracy, 50);

    let s3 = apply_attempt(Some(&s2), &attempt(1, 5, 30), now);
    // 6 correct of 15 answered -> 40%.
    assert_eq!(s3.accuracy, 40);
}

#[test]
fn zero_score_attempt_is_well_formed() {
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
    let stats = apply_attempt(None, &attempt(0, 10, 5), now);

    assert_eq!(stats.total_points, 0);
    assert_eq!(stats.accuracy, 0);
    assert_eq!(stats.current_streak_days, 1);
}

#[test]
fn accuracy_percent_guards_division() {
    assert_eq!(accuracy_percent(0, 0), 0);
    assert_eq!(accuracy_percent(2, 3), 67);
    assert_eq!(accuracy_percent(3, 3), 100);
}
