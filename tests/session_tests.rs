//! Viewer Session Tests
//!
//! Tests for:
//! - Asset replace: temporary handle accounting, old nodes released
//! - Rejected and undecodable files leave the running asset untouched
//! - Cancel-then-register: stale ticks never mutate the scene
//! - Teardown: terminal, idempotent, releases everything
//! - Initial model and export request

mod common;

use std::path::PathBuf;

use glb_animator::motion::{DriverState, ProfileId};
use glb_animator::{AnimatorError, AnimatorSettings, ExportRequest, FrameScheduler, LocalFile};

use common::{DT, block_on, clip_model, glb_file, root_transform, session, session_with, static_model};

fn load(session: &mut common::TestSession, name: &str, bytes: Vec<u8>) {
    block_on(session.on_file_accepted(glb_file(name, bytes))).unwrap();
}

/// Valid header, unparsable JSON chunk.
fn broken_glb() -> Vec<u8> {
    let mut bytes = static_model();
    bytes[20] = b'!';
    bytes
}

fn temp_model_path() -> PathBuf {
    std::env::temp_dir().join(format!("glb-animator-{}.glb", uuid::Uuid::new_v4()))
}

// ============================================================================
// Load & Replace
// ============================================================================

#[test]
fn fresh_session_is_idle() {
    let session = session();
    assert_eq!(session.driver_state(), DriverState::Idle);
    assert!(session.current_asset().is_none());
    assert_eq!(session.file_name(), "Sample Model");
    assert!(session.export_request().is_none());
}

#[test]
fn local_file_load_starts_running() {
    let mut session = session();
    load(&mut session, "robot.glb", static_model());

    assert_eq!(session.driver_state(), DriverState::Running);
    assert_eq!(session.file_name(), "robot.glb");
    assert_eq!(session.temp_store().live_count(), 1);
    assert_eq!(session.frames().live_registrations(), 1);

    let asset = session.current_asset().unwrap();
    assert!(asset.source().is_local());
    assert!(session.temp_store().is_live(asset.source_uri()));
}

#[test]
fn replacing_a_local_file_leaves_exactly_one_live_handle() {
    let mut session = session();
    load(&mut session, "first.glb", static_model());
    let first_uri = session.current_asset().unwrap().source_uri().to_string();

    load(&mut session, "second.glb", clip_model(&["idle"]));
    let second_uri = session.current_asset().unwrap().source_uri().to_string();

    let store = session.temp_store();
    assert_eq!(store.live_count(), 1);
    assert!(!store.is_live(&first_uri));
    assert!(store.is_live(&second_uri));
    assert_eq!(store.totals(), (2, 1));

    assert_eq!(session.file_name(), "second.glb");
    assert_eq!(session.frames().live_registrations(), 1);
}

#[test]
fn replacing_an_asset_drops_its_nodes() {
    let mut session = session();
    load(&mut session, "first.glb", static_model());
    let first_root = session.current_asset().unwrap().root().unwrap();

    load(&mut session, "second.glb", static_model());
    let graph = session.renderer().graph();
    assert!(!graph.contains(first_root));
    assert_eq!(graph.len(), 2);
}

#[test]
fn replace_restarts_motion_on_the_new_root() {
    let mut session = session();
    load(&mut session, "first.glb", static_model());
    for _ in 0..20 {
        session.frame(DT);
    }

    load(&mut session, "second.glb", static_model());
    session.frame(DT);
    assert_eq!(root_transform(&session).rotation.y, 0.01);
}

#[test]
fn only_the_first_dropped_file_is_loaded() {
    let mut session = session();
    let files = vec![
        glb_file("a.glb", static_model()),
        glb_file("b.glb", static_model()),
    ];
    block_on(session.on_files_dropped(files)).unwrap();

    assert_eq!(session.file_name(), "a.glb");
    assert_eq!(session.temp_store().totals(), (1, 0));
}

#[test]
fn empty_drop_is_ignored() {
    let mut session = session();
    block_on(session.on_files_dropped(Vec::new())).unwrap();
    assert_eq!(session.driver_state(), DriverState::Idle);
}

// ============================================================================
// Failed Loads
// ============================================================================

#[test]
fn wrong_extension_leaves_running_animation_untouched() {
    let mut session = session();
    load(&mut session, "robot.glb", static_model());
    for _ in 0..5 {
        session.frame(DT);
    }
    let rotation = root_transform(&session).rotation.y;

    let err = block_on(session.on_file_accepted(glb_file("model.gltf", static_model()))).unwrap_err();
    assert!(matches!(err, AnimatorError::InvalidAsset { .. }));

    assert_eq!(session.file_name(), "robot.glb");
    assert_eq!(session.driver_state(), DriverState::Running);
    assert_eq!(session.temp_store().totals(), (1, 0));

    session.frame(DT);
    assert_eq!(root_transform(&session).rotation.y, rotation + 0.01);
}

#[test]
fn decode_failure_keeps_previous_asset_live() {
    let mut session = session();
    load(&mut session, "robot.glb", static_model());
    let uri = session.current_asset().unwrap().source_uri().to_string();

    let err = block_on(session.on_file_accepted(glb_file("broken.glb", broken_glb()))).unwrap_err();
    assert!(err.is_decode_failure(), "{err}");

    // the handle made for the broken file is revoked, the old one survives
    assert_eq!(session.temp_store().totals(), (2, 1));
    assert!(session.temp_store().is_live(&uri));
    assert_eq!(session.current_asset().unwrap().source_uri(), uri);
    assert_eq!(session.file_name(), "robot.glb");
    assert_eq!(session.frame(DT), 1);
}

#[test]
fn failed_first_load_stays_idle() {
    let mut session = session();
    let err = block_on(session.on_file_accepted(glb_file("broken.glb", broken_glb()))).unwrap_err();
    assert!(err.is_decode_failure());
    assert_eq!(session.driver_state(), DriverState::Idle);
    assert_eq!(session.frames().live_registrations(), 0);
    assert_eq!(session.temp_store().live_count(), 0);
}

#[test]
fn missing_uri_is_a_decode_failure() {
    let mut session = session();
    let err = block_on(session.load_uri("/definitely/not/here.glb", "Ghost")).unwrap_err();
    assert!(err.is_decode_failure());
    assert!(session.current_asset().is_none());
}

// ============================================================================
// Scheduling
// ============================================================================

#[test]
fn tick_pending_across_a_profile_switch_is_dropped() {
    let mut session = session();
    load(&mut session, "robot.glb", static_model());

    let stale = session.frames_mut().advance(DT);
    assert_eq!(stale.len(), 1);

    session.select_profile(ProfileId::Bounce);
    assert!(!session.dispatch(stale[0]));
    assert_eq!(root_transform(&session).rotation.y, 0.0);

    assert_eq!(session.frame(DT), 1);
    assert_eq!(root_transform(&session).position.y, 0.01);
}

#[test]
fn tick_for_a_cancelled_registration_is_dropped() {
    let mut session = session();
    load(&mut session, "robot.glb", static_model());

    let ticks = session.frames_mut().advance(DT);
    session.frames_mut().cancel(ticks[0].token);
    assert!(!session.dispatch(ticks[0]));
    assert_eq!(root_transform(&session).rotation.y, 0.0);
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn teardown_then_pending_tick_mutates_nothing() {
    let mut session = session();
    load(&mut session, "robot.glb", static_model());
    session.frame(DT);

    let pending = session.frames_mut().advance(DT);
    session.teardown();

    for tick in pending {
        assert!(!session.dispatch(tick));
    }
    assert_eq!(session.frame(DT), 0);
    assert_eq!(session.driver_state(), DriverState::Suspended);
    assert_eq!(session.frames().live_registrations(), 0);
}

#[test]
fn teardown_releases_everything_once() {
    let mut session = session();
    load(&mut session, "robot.glb", static_model());

    session.teardown();
    session.teardown();

    assert!(session.current_asset().is_none());
    assert!(session.renderer().graph().is_empty());
    assert_eq!(session.temp_store().totals(), (1, 1));
}

#[test]
fn torn_down_session_rejects_further_work() {
    let mut session = session();
    session.teardown();

    let err = block_on(session.on_file_accepted(glb_file("robot.glb", static_model()))).unwrap_err();
    assert!(matches!(err, AnimatorError::SessionSuspended));
    let err = block_on(session.load_uri("/sample-model.glb", "Sample Model")).unwrap_err();
    assert!(matches!(err, AnimatorError::SessionSuspended));

    session.select_profile(ProfileId::Walk);
    assert_eq!(session.active_profile(), ProfileId::Rotate);
    assert_eq!(session.temp_store().totals(), (0, 0));
}

#[test]
fn dropping_the_session_revokes_its_handle() {
    let mut session = session();
    load(&mut session, "robot.glb", static_model());
    let store = session.temp_store().clone();
    assert_eq!(store.live_count(), 1);

    drop(session);
    assert_eq!(store.live_count(), 0);
}

// ============================================================================
// Initial Model & Export
// ============================================================================

#[test]
fn start_loads_the_configured_model() {
    let path = temp_model_path();
    std::fs::write(&path, clip_model(&["Idle"])).unwrap();

    let mut session = session_with(AnimatorSettings {
        initial_model_uri: Some(path.to_string_lossy().into_owned()),
        ..AnimatorSettings::default()
    });
    let result = block_on(session.start());
    std::fs::remove_file(&path).unwrap();
    result.unwrap();

    assert_eq!(session.file_name(), "Sample Model");
    assert_eq!(session.active_clip_name(), Some("Idle"));
    assert!(!session.current_asset().unwrap().source().is_local());
    assert_eq!(session.temp_store().totals(), (0, 0));

    assert_eq!(
        session.export_request(),
        Some(ExportRequest {
            source_uri: path.to_string_lossy().into_owned(),
            suggested_name: "animated-Sample Model.glb".to_string(),
        })
    );
}

#[test]
fn start_without_initial_model_does_nothing() {
    let mut session = session();
    block_on(session.start()).unwrap();
    assert_eq!(session.driver_state(), DriverState::Idle);
}

#[test]
fn export_request_names_local_files() {
    let mut session = session();
    load(&mut session, "robot.glb", static_model());

    let export = session.export_request().unwrap();
    assert_eq!(export.suggested_name, "animated-robot.glb");
    assert!(export.source_uri.starts_with("blob:"));
}

#[test]
fn local_file_can_be_read_from_disk() {
    let path = temp_model_path();
    std::fs::write(&path, static_model()).unwrap();
    let file = block_on(LocalFile::from_path(&path));
    std::fs::remove_file(&path).unwrap();

    let file = file.unwrap();
    assert!(file.name.ends_with(".glb"));
    let mut session = session();
    block_on(session.on_file_accepted(file)).unwrap();
    assert_eq!(session.driver_state(), DriverState::Running);
}
