//! Record-replay round trip through the controller.
//!
//! 1. Run controller operations against the real disk with the recording
//!    context (the backend executable is absent, so its launch failures are
//!    recorded too).
//! 2. Replay the session's per-port cassettes without touching the disk.
//! 3. Assert the controller returns identical results.

use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};

use tfvc_bridge::cassette::config::CassetteConfig;
use tfvc_bridge::config::BridgeConfig;
use tfvc_bridge::context::ServiceContext;
use tfvc_bridge::controller::TfsVersionsController;
use tfvc_bridge::versions::{FileVersion, PageVersion, VersionInfo, VersionsController};

fn config() -> BridgeConfig {
    BridgeConfig { tf_root: Some(PathBuf::from("/nonexistent/tee")), ..BridgeConfig::default() }
}

/// Creates a page directory, writes its content and looks it up again.
fn exercise(ctx: &ServiceContext, root: &Path) -> (VersionInfo, VersionInfo, Vec<String>) {
    let controller = TfsVersionsController::new(ctx, &config());
    let page = root.join("FrontPage");
    let content = page.join("content.txt");
    let when = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();

    let dir_info = controller.add_directory(&PageVersion::directory(&page, "ann", when)).unwrap();
    let write_info = controller
        .make_version(&[&PageVersion::new(&content, "!1 Welcome", "ann", when)])
        .unwrap();
    let found = controller
        .revision_data(None, &[&content, &root.join("Missing")])
        .iter()
        .map(|v| v.file().display().to_string())
        .collect();
    (dir_info, write_info, found)
}

#[test]
fn replayed_session_matches_recording() {
    let scratch = tempfile::tempdir().unwrap();
    let root = scratch.path().join("wiki");
    std::fs::create_dir(&root).unwrap();

    let (ctx, session) = ServiceContext::recording_at(scratch.path().join("cassettes")).unwrap();
    let recorded = exercise(&ctx, &root);
    drop(ctx);
    let cassettes = session.finish().unwrap();

    // The disk is gone during replay; everything must come from cassettes.
    std::fs::remove_dir_all(&root).unwrap();

    let replay_config = CassetteConfig::from_session_dir(&cassettes);
    let first = exercise(&ServiceContext::replaying_from(&replay_config).unwrap(), &root);
    let second = exercise(&ServiceContext::replaying_from(&replay_config).unwrap(), &root);

    assert_eq!(first, recorded);
    assert_eq!(second, recorded);
    assert_eq!(recorded.2, vec![root.join("FrontPage/content.txt").display().to_string()]);
}

#[test]
fn recorded_shell_cassette_lists_backend_commands() {
    let scratch = tempfile::tempdir().unwrap();
    let root = scratch.path().join("wiki");
    std::fs::create_dir(&root).unwrap();

    let (ctx, session) = ServiceContext::recording_at(scratch.path().join("cassettes")).unwrap();
    let _ = exercise(&ctx, &root);
    drop(ctx);
    let cassettes = session.finish().unwrap();

    let yaml = std::fs::read_to_string(cassettes.join("shell.cassette.yaml")).unwrap();
    assert!(yaml.contains("/nonexistent/tee/tf.exe"));
    assert!(yaml.contains("err:"));
    assert_eq!(yaml.matches("- add").count(), 2);
}
