use mcdo_core::MapDefaults;
use mcdo_store::KeyValueStore;
use mcdo_tracker::StoreActions;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["mcdo-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_status_command() {
    let cli = Cli::try_parse_from(["mcdo-cli", "status"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Status)));
}

#[test]
fn parses_list_with_filters() {
    let cli = Cli::try_parse_from(["mcdo-cli", "list", "--search", "shibuya", "--visited-only"])
        .expect("expected valid cli args");

    let Some(command) = cli.command else {
        panic!("expected a command");
    };
    assert!(matches!(
        command,
        Commands::List {
            ref search,
            visited_only: true
        } if search.as_deref() == Some("shibuya")
    ));
    assert_eq!(
        command.initial_view(),
        ViewState {
            mode: ViewMode::List,
            search_term: "shibuya".to_string(),
            show_unvisited: false,
        }
    );
}

#[test]
fn map_without_filters_shows_everything() {
    let cli = Cli::try_parse_from(["mcdo-cli", "map", "--focus", "42"]).unwrap();
    let command = cli.command.unwrap();

    assert!(matches!(
        command,
        Commands::Map { ref focus, .. } if focus.as_deref() == Some("42")
    ));
    assert_eq!(command.initial_view(), ViewState::default());
}

#[test]
fn parses_visit_and_unvisit() {
    let visit = Cli::try_parse_from(["mcdo-cli", "visit", "123"]).unwrap();
    assert!(matches!(visit.command, Some(Commands::Visit { ref id }) if id == "123"));

    let unvisit = Cli::try_parse_from(["mcdo-cli", "unvisit", "123"]).unwrap();
    assert!(matches!(unvisit.command, Some(Commands::Unvisit { ref id }) if id == "123"));
}

#[test]
fn visit_requires_an_id() {
    assert!(Cli::try_parse_from(["mcdo-cli", "visit"]).is_err());
}

#[test]
fn erase_defaults_to_prompting() {
    let cli = Cli::try_parse_from(["mcdo-cli", "erase"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Erase { yes: false })));

    let cli = Cli::try_parse_from(["mcdo-cli", "erase", "--yes"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Erase { yes: true })));
}

#[test]
fn parses_import_with_mime_override() {
    let cli =
        Cli::try_parse_from(["mcdo-cli", "import", "backup.dat", "--mime", "application/json"])
            .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Import { ref path, ref mime })
            if path == &PathBuf::from("backup.dat") && mime.as_deref() == Some("application/json")
    ));
}

#[test]
fn parses_export_out_dir() {
    let cli = Cli::try_parse_from(["mcdo-cli", "export", "--out-dir", "/tmp/exports"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Export { out_dir: Some(ref dir) }) if dir == &PathBuf::from("/tmp/exports")
    ));
}

fn offline_session(storage: &std::path::Path) -> commands::Session {
    let kv = FileKvStore::open(storage).unwrap();
    Tracker::new(
        VisitedStore::new(kv, "visitedMcDonaldsIds_jp"),
        TerminalUi::new(true),
        MapDefaults::default(),
    )
}

#[test]
fn export_file_can_be_imported_elsewhere() {
    let dir = tempfile::tempdir().unwrap();

    let mut source = offline_session(&dir.path().join("a.json"));
    source.mark_visited("10").unwrap();
    source.mark_visited("20").unwrap();
    let exported = commands::run_export(&source, &dir.path().join("out")).unwrap();
    assert!(exported
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("mcdo-visited-jp-"));

    let mut target = offline_session(&dir.path().join("b.json"));
    commands::run_import(&mut target, &exported, None).unwrap();

    assert_eq!(target.visited(), source.visited());
    let reopened = FileKvStore::open(dir.path().join("b.json")).unwrap();
    assert_eq!(
        reopened.get("visitedMcDonaldsIds_jp").unwrap().as_deref(),
        Some(r#"["10","20"]"#)
    );
}

#[test]
fn import_of_non_json_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ids.txt");
    std::fs::write(&path, r#"["1"]"#).unwrap();

    let mut tracker = offline_session(&dir.path().join("storage.json"));
    assert!(commands::run_import(&mut tracker, &path, None).is_err());
    assert_eq!(tracker.visited_count(), 0);
}

#[test]
fn visit_of_unknown_store_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = offline_session(&dir.path().join("storage.json"));

    assert!(commands::run_visit(&mut tracker, "404").is_err());
    assert_eq!(tracker.visited_count(), 0);
}
