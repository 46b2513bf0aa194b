use priorank_core::{
    open_db, open_db_in_memory, Matchup, RankSession, RankStore, RepoError,
    SqliteStateRepository, StateRepository, Verdict,
};

#[test]
fn fresh_database_loads_as_empty_store() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStateRepository::new(&conn);

    let store = repo.load().unwrap();
    assert!(store.themes().is_empty());
}

#[test]
fn save_and_load_round_trip_every_field() {
    let conn = open_db_in_memory().unwrap();
    let mut session = RankSession::hydrate(SqliteStateRepository::new(&conn)).unwrap();

    session.create_theme("books").unwrap();
    session.add_item("books", "Dune").unwrap();
    session.add_item("books", "Hyperion").unwrap();
    let matchup = Matchup {
        left: "Dune".to_string(),
        right: "Hyperion".to_string(),
    };
    session.record_verdict("books", &matchup, Verdict::Left).unwrap();

    let loaded = SqliteStateRepository::new(&conn).load().unwrap();
    assert_eq!(&loaded, session.store());

    let dune = loaded.theme("books").unwrap().item("Dune").unwrap();
    assert_eq!((dune.wins, dune.losses, dune.plays), (1, 0, 1));
    assert!(dune.rating > 1000.0);
}

#[test]
fn insertion_order_survives_a_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStateRepository::new(&conn);

    let mut store = RankStore::new();
    store.create_theme("zeta").unwrap();
    store.create_theme("alpha").unwrap();
    for label in ["c", "a", "b"] {
        store.add_item("zeta", label).unwrap();
    }

    repo.save(&store).unwrap();
    let loaded = repo.load().unwrap();

    let theme_names: Vec<_> = loaded.themes().iter().map(|t| t.name()).collect();
    assert_eq!(theme_names, ["zeta", "alpha"]);
    let labels: Vec<_> = loaded
        .theme("zeta")
        .unwrap()
        .items()
        .iter()
        .map(|item| item.label.as_str())
        .collect();
    assert_eq!(labels, ["c", "a", "b"]);
}

#[test]
fn save_replaces_the_previous_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStateRepository::new(&conn);

    let mut store = RankStore::new();
    store.create_theme("old").unwrap();
    repo.save(&store).unwrap();

    store.remove_theme("old").unwrap();
    store.create_theme("new").unwrap();
    repo.save(&store).unwrap();

    let loaded = repo.load().unwrap();
    assert!(loaded.theme("old").is_err());
    assert!(loaded.theme("new").is_ok());
}

#[test]
fn state_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("priorank.db");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteStateRepository::new(&conn);
        let mut store = RankStore::new();
        store.create_theme("books").unwrap();
        store.add_item("books", "Dune").unwrap();
        repo.save(&store).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteStateRepository::new(&conn);
    let loaded = repo.load().unwrap();
    assert_eq!(loaded.theme("books").unwrap().item("Dune").unwrap().plays, 0);
}

#[test]
fn load_rejects_negative_counters() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO themes (name, position) VALUES ('t', 0);", [])
        .unwrap();
    conn.execute(
        "INSERT INTO items (theme, label, rating, wins, losses, plays, position)
         VALUES ('t', 'bad', 1000.0, -1, 0, 0, 0);",
        [],
    )
    .unwrap();

    let repo = SqliteStateRepository::new(&conn);
    let err = repo.load().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn load_rejects_inconsistent_play_counts() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO themes (name, position) VALUES ('t', 0);", [])
        .unwrap();
    conn.execute(
        "INSERT INTO items (theme, label, rating, wins, losses, plays, position)
         VALUES ('t', 'bad', 1000.0, 2, 1, 5, 0);",
        [],
    )
    .unwrap();

    let repo = SqliteStateRepository::new(&conn);
    let err = repo.load().unwrap_err();
    assert!(matches!(err, RepoError::Store(_)));
}
