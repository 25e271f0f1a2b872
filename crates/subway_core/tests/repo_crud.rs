use rusqlite::Connection;
use subway_core::db::migrations::latest_version;
use subway_core::db::open_db_in_memory;
use subway_core::{
    Line, LineRepository, RepoError, Section, SectionRepository, SqliteLineRepository,
    SqliteSectionRepository, SqliteStationRepository, SqliteUnitOfWork, Station,
    StationRepository, ValidationError,
};

#[test]
fn line_create_find_update_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLineRepository::try_new(&conn).unwrap();

    let id = repo.create_line(&Line::new("2호선", "green")).unwrap();
    let loaded = repo.find_line(id).unwrap().unwrap();
    assert_eq!(loaded, Line::with_id(id, "2호선", "green"));
    assert_eq!(repo.find_line_by_name("2호선").unwrap(), Some(loaded));

    let changed = repo
        .update_line(&Line::with_id(id, "순환선", "bg-green-600"))
        .unwrap();
    assert_eq!(changed, 1);
    assert_eq!(
        repo.find_line(id).unwrap().unwrap().color,
        "bg-green-600".to_string()
    );

    assert_eq!(repo.delete_line(id).unwrap(), 1);
    assert_eq!(repo.delete_line(id).unwrap(), 0);
    assert!(repo.find_line(id).unwrap().is_none());
}

#[test]
fn line_name_lookup_is_case_sensitive() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLineRepository::try_new(&conn).unwrap();

    repo.create_line(&Line::new("Airport", "blue")).unwrap();
    assert!(repo.find_line_by_name("airport").unwrap().is_none());
    repo.create_line(&Line::new("airport", "blue")).unwrap();
}

#[test]
fn duplicate_line_name_maps_to_typed_conflict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLineRepository::try_new(&conn).unwrap();

    repo.create_line(&Line::new("2호선", "green")).unwrap();
    let err = repo.create_line(&Line::new("2호선", "red")).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateLineName(name) if name == "2호선"));

    let other = repo.create_line(&Line::new("3호선", "orange")).unwrap();
    let err = repo
        .update_line(&Line::with_id(other, "2호선", "orange"))
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateLineName(_)));
}

#[test]
fn update_of_missing_line_reports_zero_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLineRepository::try_new(&conn).unwrap();

    let changed = repo
        .update_line(&Line::with_id(404, "유령선", "gray"))
        .unwrap();
    assert_eq!(changed, 0);
}

#[test]
fn list_lines_follows_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLineRepository::try_new(&conn).unwrap();

    let first = repo.create_line(&Line::new("b-line", "blue")).unwrap();
    let second = repo.create_line(&Line::new("a-line", "amber")).unwrap();
    let ids: Vec<_> = repo
        .list_lines()
        .unwrap()
        .into_iter()
        .filter_map(|line| line.id)
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn blank_line_fields_are_rejected_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLineRepository::try_new(&conn).unwrap();

    let err = repo.create_line(&Line::new(" ", "green")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::BlankLineName)
    ));
    assert!(repo.list_lines().unwrap().is_empty());
}

#[test]
fn sections_are_listed_per_line_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let stations = SqliteStationRepository::try_new(&conn).unwrap();
    let lines = SqliteLineRepository::try_new(&conn).unwrap();
    let sections = SqliteSectionRepository::try_new(&conn).unwrap();

    let a = stations.create_station(&Station::new("A")).unwrap();
    let b = stations.create_station(&Station::new("B")).unwrap();
    let c = stations.create_station(&Station::new("C")).unwrap();
    let line = lines.create_line(&Line::new("1호선", "navy")).unwrap();
    let other = lines.create_line(&Line::new("4호선", "sky")).unwrap();

    sections.create_section(&Section::new(line, a, b, 3)).unwrap();
    sections.create_section(&Section::new(other, a, c, 9)).unwrap();
    sections.create_section(&Section::new(line, b, c, 4)).unwrap();

    let listed = sections.list_sections_by_line(line).unwrap();
    let endpoints: Vec<_> = listed.iter().map(Section::endpoints).collect();
    assert_eq!(endpoints, vec![[a, b], [b, c]]);
    assert!(sections.list_sections_by_line(999).unwrap().is_empty());
}

#[test]
fn section_with_unknown_station_is_rejected_by_foreign_key() {
    let conn = open_db_in_memory().unwrap();
    let lines = SqliteLineRepository::try_new(&conn).unwrap();
    let sections = SqliteSectionRepository::try_new(&conn).unwrap();

    let line = lines.create_line(&Line::new("1호선", "navy")).unwrap();
    let err = sections
        .create_section(&Section::new(line, 41, 42, 5))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn deleting_line_cascades_to_sections() {
    let conn = open_db_in_memory().unwrap();
    let stations = SqliteStationRepository::try_new(&conn).unwrap();
    let lines = SqliteLineRepository::try_new(&conn).unwrap();
    let sections = SqliteSectionRepository::try_new(&conn).unwrap();

    let a = stations.create_station(&Station::new("A")).unwrap();
    let b = stations.create_station(&Station::new("B")).unwrap();
    let line = lines.create_line(&Line::new("1호선", "navy")).unwrap();
    sections.create_section(&Section::new(line, a, b, 3)).unwrap();

    assert_eq!(lines.delete_line(line).unwrap(), 1);
    assert!(sections.list_sections_by_line(line).unwrap().is_empty());
    assert_eq!(stations.list_stations().unwrap().len(), 2);
}

#[test]
fn station_in_use_cannot_be_deleted() {
    let conn = open_db_in_memory().unwrap();
    let stations = SqliteStationRepository::try_new(&conn).unwrap();
    let lines = SqliteLineRepository::try_new(&conn).unwrap();
    let sections = SqliteSectionRepository::try_new(&conn).unwrap();

    let a = stations.create_station(&Station::new("A")).unwrap();
    let b = stations.create_station(&Station::new("B")).unwrap();
    let line = lines.create_line(&Line::new("1호선", "navy")).unwrap();
    sections.create_section(&Section::new(line, a, b, 3)).unwrap();

    let err = stations.delete_station(a).unwrap_err();
    assert!(matches!(err, RepoError::StationInUse(id) if id == a));
    assert_eq!(stations.delete_station(999).unwrap(), 0);
}

#[test]
fn duplicate_station_name_maps_to_typed_conflict() {
    let conn = open_db_in_memory().unwrap();
    let stations = SqliteStationRepository::try_new(&conn).unwrap();

    stations.create_station(&Station::new("잠실역")).unwrap();
    let err = stations.create_station(&Station::new("잠실역")).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateStationName(_)));
}

#[test]
fn unit_of_work_rolls_back_when_dropped() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let uow = SqliteUnitOfWork::begin(&mut conn).unwrap();
        uow.lines().create_line(&Line::new("임시선", "gray")).unwrap();
    }

    let repo = SqliteLineRepository::try_new(&conn).unwrap();
    assert!(repo.list_lines().unwrap().is_empty());

    let uow = SqliteUnitOfWork::begin(&mut conn).unwrap();
    uow.lines().create_line(&Line::new("확정선", "black")).unwrap();
    uow.commit().unwrap();

    let repo = SqliteLineRepository::try_new(&conn).unwrap();
    assert_eq!(repo.list_lines().unwrap().len(), 1);
}

#[test]
fn repositories_reject_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteLineRepository::try_new(&conn).err().unwrap();
    match err {
        RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        } => {
            assert_eq!(expected_version, latest_version());
            assert_eq!(actual_version, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}
