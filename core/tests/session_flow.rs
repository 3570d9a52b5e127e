use flashgrid_core::*;

const FLASH_MS: Millis = 10_000;

/// Plays the current level answering with `answer`, returns the points it earned.
fn play_level(session: &mut GameSession, answer: impl Fn(CellSet) -> CellSet) -> u32 {
    assert_eq!(session.phase(), Phase::Intro);
    session.start();

    // host timer firing every 100ms
    let mut elapsed = 0;
    while session.phase() == Phase::Flashing {
        session.advance(100);
        elapsed += 100;
    }
    assert_eq!(elapsed, FLASH_MS);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, Phase::Selecting);
    assert!(!snapshot.blink_on);

    for cell in answer(snapshot.flashing_set) {
        session.toggle_cell(cell).unwrap();
    }
    session.submit();
    session.submission().map(|s| s.points).unwrap_or_default()
}

#[test]
fn perfect_game_scores_five_hundred() {
    let mut session = GameSession::default();

    for level in 0..5 {
        assert_eq!(session.level_index(), level);
        assert_eq!(play_level(&mut session, |truth| truth), 100);
        session.next();
    }

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, Phase::Complete);
    assert_eq!(snapshot.score, 500);
    assert!(snapshot.is_last_level());
}

#[test]
fn score_never_decreases_across_attempts() {
    let mut session = GameSession::default();
    let mut last = 0;

    // wrong everywhere, then half right, then perfect
    let answers: [fn(CellSet) -> CellSet; 3] = [
        |truth| CellSet::full() - truth,
        |truth| CellSet::from_indices(truth.iter().step_by(2)).unwrap(),
        |truth| truth,
    ];
    for answer in answers {
        play_level(&mut session, answer);
        assert!(session.score() >= last);
        last = session.score();
        session.retry();
    }

    // 0, then 7 of 13 is 54, then 100
    assert_eq!(session.score(), 154);
}

#[test]
fn reset_mid_flash_leaves_no_live_timers() {
    let mut session = GameSession::default();
    play_level(&mut session, |truth| truth);
    session.next();
    session.start();
    session.advance(2_500);
    assert_eq!(session.phase(), Phase::Flashing);

    session.reset();
    for _ in 0..100 {
        assert_eq!(session.advance(250), TickOutcome::NoChange);
    }

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, Phase::Intro);
    assert_eq!(snapshot.level_index, 0);
    assert_eq!(snapshot.score, 0);
    assert!(!snapshot.blink_on);
    assert_eq!(snapshot.ticks_remaining, 0);

    // the next flashing phase starts from a full countdown
    session.start();
    assert_eq!(session.snapshot().ticks_remaining, 10);
}

#[test]
fn ignored_actions_leave_snapshot_untouched() {
    let mut session = GameSession::default();
    let before = session.snapshot();

    assert!(!session.submit().has_update());
    assert!(!session.next().has_update());
    assert!(!session.retry().has_update());
    assert!(!session.toggle_cell(0).unwrap().has_update());
    assert!(!session.advance(5_000).has_update());

    assert_eq!(session.snapshot(), before);
}
