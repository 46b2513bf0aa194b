use priorank_core::{
    open_db_in_memory, Matchup, MatchupError, RankSession, RankStore, RepoError, RepoResult,
    SessionError, SqliteStateRepository, StateRepository, Verdict, K_FACTOR, MAX_BAR_UNITS,
};

#[test]
fn books_scenario_first_verdict_moves_half_k_and_orders_view() {
    let conn = open_db_in_memory().unwrap();
    let mut session = RankSession::hydrate(SqliteStateRepository::new(&conn)).unwrap();

    session.create_theme("books").unwrap();
    session.add_item("books", "A").unwrap();
    session.add_item("books", "B").unwrap();

    let matchup = Matchup {
        left: "A".to_string(),
        right: "B".to_string(),
    };
    let exchanged = session
        .record_verdict("books", &matchup, Verdict::Left)
        .unwrap();
    assert!((exchanged - K_FACTOR * 0.5).abs() < 1e-9);

    let rows = session.rankings("books").unwrap();
    assert_eq!(rows[0].label, "A");
    assert!((rows[0].rating - 1016.0).abs() < 1e-9);
    assert!((rows[1].rating - 984.0).abs() < 1e-9);
    assert!(rows[0].bar_units >= rows[1].bar_units);
    assert_eq!(rows[0].bar_units, MAX_BAR_UNITS);
}

#[test]
fn right_verdict_awards_the_right_item() {
    let conn = open_db_in_memory().unwrap();
    let mut session = RankSession::hydrate(SqliteStateRepository::new(&conn)).unwrap();

    session.create_theme("t").unwrap();
    session.add_item("t", "left").unwrap();
    session.add_item("t", "right").unwrap();

    let matchup = session.next_matchup("t").unwrap();
    session.record_verdict("t", &matchup, Verdict::Right).unwrap();

    let theme = session.store().theme("t").unwrap();
    let winner = theme.item(&matchup.right).unwrap();
    let loser = theme.item(&matchup.left).unwrap();
    assert_eq!(winner.wins, 1);
    assert_eq!(loser.losses, 1);
}

#[test]
fn every_mutation_is_flushed_immediately() {
    let conn = open_db_in_memory().unwrap();
    let mut session = RankSession::hydrate(SqliteStateRepository::new(&conn)).unwrap();
    let observer = SqliteStateRepository::new(&conn);

    session.create_theme("t").unwrap();
    assert_eq!(observer.load().unwrap().themes().len(), 1);

    session.add_item("t", "a").unwrap();
    session.add_item("t", "b").unwrap();
    assert_eq!(observer.load().unwrap().theme("t").unwrap().len(), 2);

    session.remove_item("t", "a").unwrap();
    assert_eq!(observer.load().unwrap().theme("t").unwrap().len(), 1);

    session.remove_theme("t").unwrap();
    assert!(observer.load().unwrap().themes().is_empty());
}

#[test]
fn an_unrecorded_matchup_mutates_nothing() {
    let conn = open_db_in_memory().unwrap();
    let mut session = RankSession::hydrate(SqliteStateRepository::new(&conn)).unwrap();

    session.create_theme("t").unwrap();
    session.add_item("t", "a").unwrap();
    session.add_item("t", "b").unwrap();
    let before = session.store().clone();

    // Presenting a pair and then aborting the prompt records nothing.
    let _matchup = session.next_matchup("t").unwrap();
    assert_eq!(session.store(), &before);
}

#[test]
fn matchup_on_single_item_theme_is_refused() {
    let conn = open_db_in_memory().unwrap();
    let mut session = RankSession::hydrate(SqliteStateRepository::new(&conn)).unwrap();

    session.create_theme("t").unwrap();
    session.add_item("t", "only").unwrap();

    let err = session.next_matchup("t").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Matchup(MatchupError::InsufficientItems { available: 1 })
    ));
}

#[test]
fn failed_verdict_leaves_persisted_state_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut session = RankSession::hydrate(SqliteStateRepository::new(&conn)).unwrap();
    let observer = SqliteStateRepository::new(&conn);

    session.create_theme("t").unwrap();
    session.add_item("t", "a").unwrap();
    session.add_item("t", "b").unwrap();
    let persisted_before = observer.load().unwrap();

    let degenerate = Matchup {
        left: "a".to_string(),
        right: "a".to_string(),
    };
    let err = session
        .record_verdict("t", &degenerate, Verdict::Left)
        .unwrap_err();
    assert!(matches!(err, SessionError::Rating(_)));
    assert_eq!(observer.load().unwrap(), persisted_before);
    assert_eq!(session.store(), &persisted_before);
}

/// Repository that hydrates empty but refuses every save, standing in for
/// storage that became unavailable mid-session.
struct UnwritableRepository;

impl StateRepository for UnwritableRepository {
    fn load(&self) -> RepoResult<RankStore> {
        Ok(RankStore::new())
    }

    fn save(&self, _store: &RankStore) -> RepoResult<()> {
        Err(RepoError::InvalidData(
            "state file is not writable".to_string(),
        ))
    }
}

#[test]
fn failed_flush_keeps_the_mutation_and_surfaces_the_error() {
    let mut session = RankSession::hydrate(UnwritableRepository).unwrap();

    let err = session.create_theme("t").unwrap_err();
    assert!(matches!(err, SessionError::Repo(_)));
    // The in-memory mutation survives; the caller decides whether to retry
    // or continue in-memory.
    assert!(session.store().theme("t").is_ok());

    for label in ["a", "b"] {
        let err = session.add_item("t", label).unwrap_err();
        assert!(matches!(err, SessionError::Repo(_)));
    }
    assert_eq!(session.store().theme("t").unwrap().len(), 2);

    let matchup = Matchup {
        left: "a".to_string(),
        right: "b".to_string(),
    };
    let err = session
        .record_verdict("t", &matchup, Verdict::Left)
        .unwrap_err();
    assert!(matches!(err, SessionError::Repo(_)));
    let winner = session.store().theme("t").unwrap().item("a").unwrap();
    assert_eq!((winner.wins, winner.plays), (1, 1));
    assert!(winner.rating > 1000.0);
}

#[test]
fn a_new_session_sees_ratings_from_the_previous_one() {
    let conn = open_db_in_memory().unwrap();
    {
        let mut session = RankSession::hydrate(SqliteStateRepository::new(&conn)).unwrap();
        session.create_theme("t").unwrap();
        session.add_item("t", "a").unwrap();
        session.add_item("t", "b").unwrap();
        let matchup = Matchup {
            left: "a".to_string(),
            right: "b".to_string(),
        };
        session.record_verdict("t", &matchup, Verdict::Left).unwrap();
    }

    let session = RankSession::hydrate(SqliteStateRepository::new(&conn)).unwrap();
    let rows = session.rankings("t").unwrap();
    assert_eq!(rows[0].label, "a");
    assert_eq!(rows[0].plays, 1);
}
