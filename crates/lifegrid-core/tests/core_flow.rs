use chrono::{NaiveDate, Utc};
use lifegrid_core::cli::{AddArgs, Command, WeekArgs};
use lifegrid_core::commands::dispatch;
use lifegrid_core::config::Config;
use lifegrid_core::datastore::DataStore;
use lifegrid_core::render::Renderer;
use lifegrid_shared::{
    Activity, ActivityDraft, ActivityLog, ActivityPatch, AddModal, LIFE_DOMAINS, NewActivity,
    WeekKey, WeekSelection, build_grid,
};
use tempfile::tempdir;
use uuid::Uuid;

fn new_activity(title: &str, domain_id: &str, week: WeekKey) -> NewActivity {
    NewActivity {
        title: title.to_string(),
        description: String::new(),
        domain_id: domain_id.to_string(),
        week_number: week.week_number,
        year: week.year,
    }
}

#[test]
fn datastore_roundtrip_and_grid() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");
    let now = Utc::now();
    let week = WeekKey::new(3, 2024);

    let first = store
        .add_activity(new_activity("Run 5k", "health", week), now)
        .expect("add first");
    store
        .add_activity(new_activity("Stretch", "health", week), now)
        .expect("add second");
    store
        .add_activity(new_activity("Later", "health", WeekKey::new(4, 2024)), now)
        .expect("add third");

    let reopened = DataStore::open(temp.path()).expect("reopen datastore");
    let log = reopened.load_activities().expect("load activities");
    assert_eq!(log.len(), 3);
    assert_eq!(log.activities()[0], first);

    let selection =
        WeekSelection::new(NaiveDate::from_ymd_opt(2024, 1, 17).expect("valid date"));
    let grid = build_grid(LIFE_DOMAINS, log.activities(), selection.key());
    let health = grid
        .iter()
        .find(|column| column.domain.id == "health")
        .expect("health column");
    let titles: Vec<&str> = health
        .activities
        .iter()
        .map(|activity| activity.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Run 5k", "Stretch"]);
    assert!(
        grid.iter()
            .filter(|column| column.domain.id != "health")
            .all(|column| column.is_empty())
    );
}

#[test]
fn edit_and_delete_by_prefix() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");
    let now = Utc::now();

    let added = store
        .add_activity(new_activity("Call mom", "family", WeekKey::new(10, 2024)), now)
        .expect("add activity");

    let log = store.load_activities().expect("load");
    let prefix = added.id.to_string()[..8].to_string();
    let id = store.resolve_id(&log, &prefix).expect("resolve prefix");
    assert_eq!(id, added.id);

    let edited = store
        .edit_activity(
            id,
            ActivityPatch {
                completed: Some(true),
                ..ActivityPatch::default()
            },
            now,
        )
        .expect("edit activity");
    assert!(edited.completed);
    assert_eq!(edited.title, "Call mom");
    assert!(store.load_activities().expect("load").activities()[0].completed);

    store.delete_activity(id).expect("delete activity");
    assert!(store.load_activities().expect("load").is_empty());
    assert!(store.delete_activity(id).is_err());
}

#[test]
fn unknown_ids_are_errors() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");
    let log = store.load_activities().expect("load");

    assert!(store.resolve_id(&log, "deadbeef").is_err());
    assert!(
        store
            .edit_activity(Uuid::new_v4(), ActivityPatch::default(), Utc::now())
            .is_err()
    );
}

#[test]
fn modal_submissions_persist_through_the_store() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");
    let week = WeekKey::new(12, 2024);

    let mut log = store.load_activities().expect("load");
    let mut modal = AddModal::default();
    modal.open("career");
    assert!(modal.submit(ActivityDraft::titled("Update CV"), week, &mut log));
    assert!(modal.submit(ActivityDraft::titled("Apply"), week, &mut log));
    store.save_activities(&log).expect("save");

    let reloaded = store.load_activities().expect("reload");
    assert_eq!(reloaded.len(), 2);
    assert!(
        reloaded
            .activities()
            .iter()
            .all(|activity| activity.domain_id == "career" && activity.week() == week)
    );
    assert_eq!(modal.domain_id(), Some("career"));
}

#[test]
fn corrupt_lines_report_the_file() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");
    std::fs::write(&store.activities_path, "{not json}\n").expect("write corrupt data");

    let err = store.load_activities().expect_err("corrupt data");
    assert!(format!("{err:#}").contains("activities.data"));
}

fn activity_with_id(raw_id: &str, title: &str) -> Activity {
    Activity {
        id: Uuid::parse_str(raw_id).expect("valid uuid"),
        domain_id: "social".to_string(),
        week_number: 5,
        year: 2024,
        created_at: Utc::now(),
        modified_at: None,
        title: title.to_string(),
        description: String::new(),
        completed: false,
    }
}

#[test]
fn shared_prefixes_do_not_resolve() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");
    let log = ActivityLog::from(vec![
        activity_with_id("abcd0000-0000-4000-8000-000000000001", "Dinner"),
        activity_with_id("abcd1111-0000-4000-8000-000000000002", "Game night"),
    ]);
    store.save_activities(&log).expect("save");

    let log = store.load_activities().expect("load");
    let err = store.resolve_id(&log, "abcd").expect_err("ambiguous prefix");
    assert!(err.to_string().contains("no unique activity"));

    let id = store.resolve_id(&log, "abcd1").expect("unique prefix");
    assert_eq!(log.get(id).map(|activity| activity.title.as_str()), Some("Game night"));
}

fn add_command(domain: &str, title: &str) -> Command {
    Command::Add(AddArgs {
        domain: domain.to_string(),
        title: title.to_string(),
        description: String::new(),
        week: WeekArgs {
            date: None,
            week: Some(WeekKey::new(3, 2024)),
        },
    })
}

fn run_command(store: &mut DataStore, command: Command) -> anyhow::Result<()> {
    let mut cfg = Config::default();
    cfg.apply_overrides(vec![("color".to_string(), "off".to_string())]);
    let mut renderer = Renderer::new(&cfg).expect("renderer");
    dispatch(store, &cfg, &mut renderer, command)
}

#[test]
fn add_rejects_unknown_domain_and_blank_title() {
    let temp = tempdir().expect("tempdir");
    let mut store = DataStore::open(temp.path()).expect("open datastore");

    let err = run_command(&mut store, add_command("hobbies", "Paint")).expect_err("unknown domain");
    assert!(err.to_string().contains("unknown domain: hobbies"));

    let err = run_command(&mut store, add_command("health", "   ")).expect_err("blank title");
    assert!(err.to_string().contains("title cannot be empty"));

    assert!(store.load_activities().expect("load").is_empty());

    run_command(&mut store, add_command("health", "Run 5k")).expect("valid add");
    let log = store.load_activities().expect("load");
    assert_eq!(log.len(), 1);
    assert_eq!(log.activities()[0].week(), WeekKey::new(3, 2024));
}

#[cfg(unix)]
#[test]
fn unwritable_activities_file_names_the_path() {
    let temp = tempdir().expect("tempdir");
    std::os::unix::fs::symlink(
        temp.path().join("missing").join("target"),
        temp.path().join("activities.data"),
    )
    .expect("dangling symlink");

    let err = DataStore::open(temp.path()).expect_err("unwritable data file");
    assert!(format!("{err:#}").contains("activities.data"));
}
